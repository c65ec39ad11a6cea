//! Search queries over agenda events.
//!
//! Syntax:
//!   'term' or "term"        - substring of name, place or address
//!   [expr, expr, ...]       - all must match
//!   (expr, expr, ...)       - any must match
//!   (expr,)                 - one-element "any"
//!   (expr)                  - grouping
//!   expr, expr, ...         - top-level "any" without parentheses
//!
//! Lists and tuples nest at most [`MAX_DEPTH`] levels deep.
//!
//! Matching is case-sensitive and does not trim terms.

mod error;
mod expr;
mod lexer;
mod parser;

pub use error::QueryError;
pub use expr::SearchExpression;
pub use parser::{MAX_DEPTH, parse_query};
