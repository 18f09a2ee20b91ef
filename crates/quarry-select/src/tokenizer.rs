use quarry_common::warning::warn_once;

use crate::attribute::{AttributeOperator, AttributePredicate};
use crate::compound::{CompoundSelector, TagName};
use crate::error::SelectorError;
use crate::matcher::Combinator;

/// One unit of a selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorToken {
    /// A compound selector such as `div#main.active`.
    Compound(CompoundSelector),
    /// The combinator joining the compounds on either side.
    Combinator(Combinator),
}

/// Splits a selector string, left to right, into alternating compound and
/// combinator tokens.
///
/// A successful run always produces `compound (combinator compound)*`:
/// leading, trailing and doubled combinators are rejected, and whitespace
/// between two compounds becomes [`Combinator::Descendant`].
pub struct SelectorTokenizer {
    /// The selector as given, for error messages
    source: String,
    /// The input as characters
    input: Vec<char>,
    /// Current position in the input
    position: usize,
    /// Collected tokens
    tokens: Vec<SelectorToken>,
}

impl SelectorTokenizer {
    /// Create a tokenizer for the given selector.
    pub fn new(input: impl Into<String>) -> Self {
        let source = input.into();
        Self {
            input: source.chars().collect(),
            source,
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole input.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found; see [`SelectorError`].
    pub fn run(&mut self) -> Result<(), SelectorError> {
        let _ = self.consume_whitespace();
        if self.peek().is_none() {
            return Err(self.malformed("selector is empty"));
        }

        loop {
            match self.peek() {
                None => return Err(self.malformed("selector ends with a combinator")),
                Some(c) if is_combinator_char(c) => {
                    let reason = if self.tokens.is_empty() {
                        format!("selector starts with combinator '{c}'")
                    } else {
                        format!("combinator '{c}' has no selector on its left")
                    };
                    return Err(self.malformed(reason));
                }
                Some(_) => {}
            }

            let compound = self.consume_compound()?;
            self.tokens.push(SelectorToken::Compound(compound));

            let saw_whitespace = self.consume_whitespace();
            match self.peek() {
                None => return Ok(()),
                Some(c) if is_combinator_char(c) => {
                    let combinator = self.consume_combinator()?;
                    self.tokens.push(SelectorToken::Combinator(combinator));
                    let _ = self.consume_whitespace();
                }
                Some(_) if saw_whitespace => {
                    self.tokens
                        .push(SelectorToken::Combinator(Combinator::Descendant));
                }
                Some(c) => return Err(self.malformed(format!("unexpected character '{c}'"))),
            }
        }
    }

    /// Return the collected tokens.
    pub fn into_tokens(self) -> Vec<SelectorToken> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    pub fn tokens(&self) -> &[SelectorToken] {
        &self.tokens
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    /// Skip whitespace, returning whether any was skipped.
    fn consume_whitespace(&mut self) -> bool {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.position += 1;
        }
        self.position > start
    }

    fn consume_ident(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek().filter(|&c| is_ident_char(c)) {
            ident.push(c);
            self.position += 1;
        }
        ident
    }

    /// A combinator is the maximal run of `>`, `+` and `~`; only single
    /// characters name a combinator.
    fn consume_combinator(&mut self) -> Result<Combinator, SelectorError> {
        let mut run = String::new();
        while let Some(c) = self.peek().filter(|&c| is_combinator_char(c)) {
            run.push(c);
            self.position += 1;
        }
        Combinator::from_symbol(&run)
            .ok_or_else(|| self.malformed(format!("'{run}' is not a combinator")))
    }

    fn consume_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let start = self.position;
        let mut compound = CompoundSelector::default();
        let mut has_tag = false;
        let mut has_other = false;

        while let Some(c) = self.peek() {
            match c {
                c if c.is_whitespace() || is_combinator_char(c) => break,

                // [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
                '*' => {
                    self.position += 1;
                    self.check_tag_position(start, has_tag, has_other, "*")?;
                    has_tag = true;
                }

                // [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
                c if is_ident_char(c) => {
                    let name = self.consume_ident();
                    self.check_tag_position(start, has_tag, has_other, &name)?;
                    compound.tag = TagName::Named(name);
                    has_tag = true;
                }

                // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
                '#' => {
                    self.position += 1;
                    let id = self.consume_ident();
                    if id.is_empty() {
                        return Err(self.malformed("'#' must be followed by an id"));
                    }
                    if compound.id.is_some() {
                        return Err(SelectorError::AmbiguousId {
                            compound: self.compound_text(start),
                        });
                    }
                    compound.id = Some(id);
                    has_other = true;
                }

                // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
                '.' => {
                    self.position += 1;
                    let class = self.consume_ident();
                    if class.is_empty() {
                        return Err(self.malformed("'.' must be followed by a class name"));
                    }
                    let _ = compound.classes.insert(class);
                    has_other = true;
                }

                ':' => {
                    self.consume_pseudo()?;
                    has_other = true;
                }

                '[' => {
                    let predicate = self.consume_attribute()?;
                    compound.attributes.push(predicate);
                    has_other = true;
                }

                c => return Err(self.malformed(format!("unexpected character '{c}'"))),
            }
        }

        Ok(compound)
    }

    fn check_tag_position(
        &self,
        start: usize,
        has_tag: bool,
        has_other: bool,
        name: &str,
    ) -> Result<(), SelectorError> {
        if has_tag {
            return Err(SelectorError::MultipleTags {
                compound: self.compound_text(start),
            });
        }
        if has_other {
            return Err(self.malformed(format!(
                "type selector '{name}' must come first in '{}'",
                self.compound_text(start)
            )));
        }
        Ok(())
    }

    /// Pseudo-classes and pseudo-elements are accepted and ignored.
    fn consume_pseudo(&mut self) -> Result<(), SelectorError> {
        let _ = self.consume(); // ':'
        let prefix = if self.peek() == Some(':') {
            let _ = self.consume();
            "::"
        } else {
            ":"
        };

        let name = self.consume_ident();
        if name.is_empty() {
            return Err(self.malformed(format!("'{prefix}' must be followed by a name")));
        }

        // Functional form, e.g. :nth-child(2n + 1)
        if self.peek() == Some('(') {
            let _ = self.consume();
            let mut depth = 1u32;
            while depth > 0 {
                match self.consume() {
                    Some('(') => depth += 1,
                    Some(')') => depth -= 1,
                    Some(_) => {}
                    None => {
                        return Err(self.malformed(format!("unbalanced parentheses in '{prefix}{name}('")));
                    }
                }
            }
        }

        let _ = warn_once(
            "selector",
            &format!("'{prefix}{name}' is not supported and was ignored"),
        );
        Ok(())
    }

    /// `[name]`, `[name=value]` or `[name op= value]`, value quoted or bare.
    fn consume_attribute(&mut self) -> Result<AttributePredicate, SelectorError> {
        let _ = self.consume(); // '['
        let _ = self.consume_whitespace();

        let name = self.consume_ident();
        if name.is_empty() {
            return Err(self.malformed("attribute selector is missing a name"));
        }
        let _ = self.consume_whitespace();

        let operator = match self.consume() {
            Some(']') => return Ok(AttributePredicate::exists(name)),
            Some('=') => AttributeOperator::Equals,
            Some(op @ ('~' | '|' | '^' | '$' | '*')) => {
                if self.consume() != Some('=') {
                    return Err(self.malformed(format!("expected '=' after '{op}' in [{name}")));
                }
                AttributeOperator::from_symbol(&op.to_string())
            }
            Some(c) => {
                return Err(self.malformed(format!(
                    "unexpected character '{c}' in attribute selector [{name}"
                )));
            }
            None => return Err(self.malformed(format!("unterminated attribute selector [{name}"))),
        };

        let value = self.consume_attribute_value()?;
        let _ = self.consume_whitespace();
        if self.consume() != Some(']') {
            return Err(self.malformed(format!("expected ']' to close [{name}")));
        }

        Ok(AttributePredicate::new(operator, name, value))
    }

    fn consume_attribute_value(&mut self) -> Result<String, SelectorError> {
        let _ = self.consume_whitespace();

        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let _ = self.consume();
                let mut value = String::new();
                loop {
                    match self.consume() {
                        Some(c) if c == quote => return Ok(value),
                        Some('\\') => match self.consume() {
                            Some(escaped) => value.push(escaped),
                            None => {
                                return Err(
                                    self.malformed("unterminated string in attribute selector")
                                );
                            }
                        },
                        Some(c) => value.push(c),
                        None => return Err(self.malformed("unterminated string in attribute selector")),
                    }
                }
            }
            _ => {
                let mut value = String::new();
                while let Some(c) = self
                    .peek()
                    .filter(|&c| !c.is_whitespace() && !matches!(c, ']' | '"' | '\''))
                {
                    value.push(c);
                    self.position += 1;
                }
                if value.is_empty() {
                    return Err(self.malformed("attribute selector is missing a value"));
                }
                Ok(value)
            }
        }
    }

    /// The compound starting at `start`, up to the next whitespace or combinator.
    fn compound_text(&self, start: usize) -> String {
        self.input[start..]
            .iter()
            .take_while(|&&c| !c.is_whitespace() && !is_combinator_char(c))
            .collect()
    }

    fn malformed(&self, reason: impl Into<String>) -> SelectorError {
        SelectorError::MalformedSelector {
            selector: self.source.clone(),
            reason: reason.into(),
        }
    }
}

const fn is_combinator_char(c: char) -> bool {
    matches!(c, '>' | '+' | '~')
}

/// Letters, digits, `-` and `_`; non-ASCII letters are allowed as in CSS.
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
