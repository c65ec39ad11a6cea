//! Query parsing errors.

/// Error returned when a query string is not a valid search expression.
///
/// Offsets are byte positions in the original query string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The query is empty or only whitespace
    #[error("empty query")]
    Empty,

    /// A character that cannot start any token
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    /// A quoted string with no closing quote
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// A valid token in the wrong place
    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    /// Lists and tuples nested deeper than the parser accepts
    #[error("query nested deeper than {limit} levels at offset {offset}")]
    TooDeep { limit: usize, offset: usize },

    /// Extra tokens after a complete expression
    #[error("unexpected {found} after the end of the query at offset {offset}")]
    TrailingInput { found: String, offset: usize },
}
