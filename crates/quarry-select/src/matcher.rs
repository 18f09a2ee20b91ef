//! Selector evaluation.
//!
//! A selector is evaluated subject-first. The context starts as the single
//! query root; the rightmost compound replaces it with every matching
//! descendant in document order. Each remaining compound, read right to
//! left, then narrows the context according to the combinator that joins
//! it to the part already consumed.
//!
//! Every context entry remembers its subject (the node that will be
//! returned) and its anchors: the nodes that matched the most recently
//! consumed compound on this subject's behalf. Combinators relate the next
//! compound to the anchors, so `a > b c` requires the `b` ancestor of `c`,
//! not `c` itself, to be a child of an `a`.

use std::fmt;
use std::str::FromStr;

use crate::compound::CompoundSelector;
use crate::error::SelectorError;
use crate::tokenizer::{SelectorToken, SelectorTokenizer};
use crate::tree::SelectorTree;

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: `A B` matches a `B` with some `A` ancestor.
    Descendant,

    /// `>`: `A > B` matches a `B` whose parent is an `A`.
    Child,

    /// `+`: `A + B` matches a `B` whose immediately preceding element
    /// sibling is an `A`. Text and comments between them are skipped.
    NextSibling,

    /// `~`: `A ~ B` matches a `B` with some preceding element sibling `A`.
    SubsequentSibling,
}

impl Combinator {
    /// Map a combinator symbol to its combinator. Only single-character
    /// symbols are combinators; a run such as `>>` is not.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            " " => Some(Self::Descendant),
            ">" => Some(Self::Child),
            "+" => Some(Self::NextSibling),
            "~" => Some(Self::SubsequentSibling),
            _ => None,
        }
    }

    /// The symbol as written between compounds.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => ">",
            Self::NextSibling => "+",
            Self::SubsequentSibling => "~",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed selector, reusable across queries and trees.
///
/// For `A > B C` the subject is `C` and the chain is
/// `[(Descendant, B), (Child, A)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// The rightmost compound; its matches are the query results.
    pub subject: CompoundSelector,
    /// `(combinator, compound)` pairs going left from the subject.
    pub chain: Vec<(Combinator, CompoundSelector)>,
}

/// A subject node and the nodes currently standing in for it.
#[derive(Debug)]
struct Candidate<N> {
    subject: N,
    anchors: Vec<N>,
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] if the string is not a well-formed
    /// selector.
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let mut tokenizer = SelectorTokenizer::new(raw);
        tokenizer.run()?;

        let mut compounds = Vec::new();
        let mut combinators = Vec::new();
        for token in tokenizer.into_tokens() {
            match token {
                SelectorToken::Compound(compound) => compounds.push(compound),
                SelectorToken::Combinator(combinator) => combinators.push(combinator),
            }
        }

        let Some(subject) = compounds.pop() else {
            return Err(SelectorError::MalformedSelector {
                selector: raw.to_string(),
                reason: "selector has no compound selector".to_string(),
            });
        };

        // For "A > B C": compounds [A, B], combinators [Child, Descendant]
        // become the chain [(Descendant, B), (Child, A)].
        let chain = combinators
            .into_iter()
            .zip(compounds)
            .rev()
            .collect();

        Ok(Self { subject, chain })
    }

    /// Every element below `root` that the selector matches, in document order.
    pub fn select<T: SelectorTree + ?Sized>(&self, tree: &T, root: T::Node) -> Vec<T::Node> {
        let context: Vec<Candidate<T::Node>> = tree
            .find_all(root, |node| self.subject.matches(tree, node))
            .into_iter()
            .map(|node| Candidate {
                subject: node,
                anchors: vec![node],
            })
            .collect();
        log::trace!(target: "quarry::select", "{} -> {} candidates", self.subject, context.len());

        self.narrow(tree, context)
            .into_iter()
            .map(|candidate| candidate.subject)
            .collect()
    }

    /// Whether the selector matches `node`.
    pub fn matches<T: SelectorTree + ?Sized>(&self, tree: &T, node: T::Node) -> bool {
        if !self.subject.matches(tree, node) {
            return false;
        }
        let context = vec![Candidate {
            subject: node,
            anchors: vec![node],
        }];
        !self.narrow(tree, context).is_empty()
    }

    /// Fold the chain over the context, one compound at a time.
    fn narrow<T: SelectorTree + ?Sized>(
        &self,
        tree: &T,
        mut context: Vec<Candidate<T::Node>>,
    ) -> Vec<Candidate<T::Node>> {
        for (combinator, compound) in &self.chain {
            if context.is_empty() {
                break;
            }
            context = context
                .into_iter()
                .filter_map(|candidate| {
                    let anchors = related_anchors(tree, &candidate.anchors, *combinator, compound);
                    (!anchors.is_empty()).then_some(Candidate {
                        subject: candidate.subject,
                        anchors,
                    })
                })
                .collect();
            log::trace!(
                target: "quarry::select",
                "{compound} {combinator} -> {} candidates",
                context.len()
            );
        }
        context
    }
}

/// Nodes matching `compound` that stand in `combinator` relation to any of
/// `anchors`, without duplicates.
fn related_anchors<T: SelectorTree + ?Sized>(
    tree: &T,
    anchors: &[T::Node],
    combinator: Combinator,
    compound: &CompoundSelector,
) -> Vec<T::Node> {
    let mut related = Vec::new();
    let mut keep = |node: T::Node| {
        if compound.matches(tree, node) && !related.contains(&node) {
            related.push(node);
        }
    };

    for &anchor in anchors {
        match combinator {
            // [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
            Combinator::Descendant => tree.ancestors(anchor).for_each(&mut keep),

            // [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
            Combinator::Child => tree.parent(anchor).into_iter().for_each(&mut keep),

            // [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
            Combinator::NextSibling => tree
                .previous_element_sibling(anchor)
                .into_iter()
                .for_each(&mut keep),

            // [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
            Combinator::SubsequentSibling => tree
                .preceding_siblings(anchor)
                .for_each(&mut keep),
        }
    }

    related
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (combinator, compound) in self.chain.iter().rev() {
            match combinator {
                Combinator::Descendant => write!(f, "{compound} ")?,
                _ => write!(f, "{compound} {combinator} ")?,
            }
        }
        write!(f, "{}", self.subject)
    }
}

/// Parse `selector` and return every matching element below `root`.
///
/// # Errors
///
/// Returns a [`SelectorError`] if the selector is malformed; nothing is
/// evaluated in that case.
pub fn select<T: SelectorTree + ?Sized>(
    tree: &T,
    root: T::Node,
    selector: &str,
) -> Result<Vec<T::Node>, SelectorError> {
    Ok(Selector::parse(selector)?.select(tree, root))
}
