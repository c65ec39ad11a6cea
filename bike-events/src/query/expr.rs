//! Boolean search expressions over event text.

use std::fmt;

use crate::domain::Event;

/// A search query as a tree of terms, conjunctions and disjunctions.
///
/// # Examples
///
/// ```
/// use bike_events::query::SearchExpression;
/// use bike_events::domain::Event;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2018, 9, 24).unwrap();
/// let event = Event::new("Gran Festa Major", "Plaça Sant Jaume", "Pl Sant Jaume 1", date);
///
/// let query = SearchExpression::All(vec![
///     SearchExpression::term("Festa"),
///     SearchExpression::term("Major"),
/// ]);
/// assert!(query.matches(&event));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchExpression {
    /// Case-sensitive substring of the name, place or address.
    Term(String),
    /// Every child must match. Empty matches everything.
    All(Vec<SearchExpression>),
    /// At least one child must match. Empty matches nothing.
    Any(Vec<SearchExpression>),
}

impl SearchExpression {
    /// Shorthand for a [`SearchExpression::Term`].
    pub fn term(text: impl Into<String>) -> Self {
        SearchExpression::Term(text.into())
    }

    /// Returns true if `event` satisfies this expression.
    ///
    /// Children are evaluated in order and evaluation stops as soon as the
    /// result is known.
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            SearchExpression::Term(text) => event
                .searchable_text()
                .iter()
                .any(|field| field.contains(text.as_str())),
            SearchExpression::All(children) => children.iter().all(|c| c.matches(event)),
            SearchExpression::Any(children) => children.iter().any(|c| c.matches(event)),
        }
    }
}

/// Formats the expression in the literal query syntax, so that
/// `parse_query(&expr.to_string())` gives back `expr`.
impl fmt::Display for SearchExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchExpression::Term(text) => {
                f.write_str("'")?;
                for c in text.chars() {
                    match c {
                        '\'' => f.write_str("\\'")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("'")
            }
            SearchExpression::All(children) => {
                f.write_str("[")?;
                write_children(f, children)?;
                f.write_str("]")
            }
            SearchExpression::Any(children) => {
                f.write_str("(")?;
                write_children(f, children)?;
                // A lone element needs the comma to stay a disjunction
                if children.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[SearchExpression]) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{child}")?;
    }
    Ok(())
}
