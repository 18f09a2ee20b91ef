use thiserror::Error;

/// Reasons a selector string could not be evaluated.
///
/// All variants abort the whole query; no prefix of the selector is applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector does not have the shape `compound (combinator compound)*`.
    #[error("malformed selector '{selector}': {reason}")]
    MalformedSelector {
        /// The full selector text.
        selector: String,
        /// What was wrong with it.
        reason: String,
    },

    /// One compound selector named more than one tag (e.g. `*div`).
    #[error("multiple tag names in compound selector '{compound}'")]
    MultipleTags {
        /// The offending compound selector.
        compound: String,
    },

    /// One compound selector carried more than one `#id` (e.g. `div#a#b`).
    #[error("more than one id in compound selector '{compound}'")]
    AmbiguousId {
        /// The offending compound selector.
        compound: String,
    },
}
