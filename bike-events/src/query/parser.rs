//! Parser for the query literal syntax.
//!
//! Grammar (in rough EBNF):
//!
//! query = expr ("," (expr ("," expr)* ","?)?)? EOF
//! expr  = STRING | list | tuple | "(" expr ")"
//! list  = "[" (expr ("," expr)* ","?)? "]"
//! tuple = "(" ")" | "(" expr "," (expr ("," expr)* ","?)? ")"
//!
//! A list is a conjunction and a tuple a disjunction. Parentheses around a
//! single expression with no comma only group it. Comma-separated
//! expressions at the top level form a tuple without the parentheses.

use super::error::QueryError;
use super::expr::SearchExpression;
use super::lexer::{Spanned, Token, tokenize};

/// Deepest nesting of lists and tuples accepted in a query.
pub const MAX_DEPTH: usize = 256;

/// Parser state.
struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Open one level of nesting at `offset`.
    fn enter(&mut self, offset: usize) -> Result<(), QueryError> {
        if self.depth >= MAX_DEPTH {
            return Err(QueryError::TooDeep {
                limit: MAX_DEPTH,
                offset,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|s| &s.token)
            .unwrap_or(&Token::Eof)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|s| s.offset)
            .unwrap_or(0)
    }

    fn advance(&mut self) -> Spanned {
        let offset = self.offset();
        let tok = self.tokens.get(self.pos).cloned().unwrap_or(Spanned {
            token: Token::Eof,
            offset,
        });
        self.pos += 1;
        tok
    }

    /// Parse one expression.
    fn parse_expr(&mut self) -> Result<SearchExpression, QueryError> {
        let Spanned { token, offset } = self.advance();
        match token {
            Token::Str(text) => Ok(SearchExpression::Term(text)),
            Token::LBracket => {
                self.enter(offset)?;
                let (children, _) = self.parse_sequence(&Token::RBracket)?;
                self.depth -= 1;
                Ok(SearchExpression::All(children))
            }
            Token::LParen => {
                self.enter(offset)?;
                let (mut children, saw_comma) = self.parse_sequence(&Token::RParen)?;
                self.depth -= 1;
                if !saw_comma
                    && children.len() == 1
                    && let Some(inner) = children.pop()
                {
                    return Ok(inner);
                }
                Ok(SearchExpression::Any(children))
            }
            other => Err(QueryError::UnexpectedToken {
                found: other.describe(),
                offset,
            }),
        }
    }

    /// Parse comma-separated expressions up to and including `close`.
    ///
    /// Also reports whether any comma was seen, to tell `(x)` from `(x,)`.
    fn parse_sequence(
        &mut self,
        close: &Token,
    ) -> Result<(Vec<SearchExpression>, bool), QueryError> {
        let mut children = Vec::new();
        let mut saw_comma = false;

        loop {
            if self.peek() == close {
                self.advance();
                return Ok((children, saw_comma));
            }

            children.push(self.parse_expr()?);

            let Spanned { token, offset } = self.advance();
            if token == Token::Comma {
                saw_comma = true;
            } else if &token == close {
                return Ok((children, saw_comma));
            } else {
                return Err(QueryError::UnexpectedToken {
                    found: token.describe(),
                    offset,
                });
            }
        }
    }
}

/// Parse a query string into a [`SearchExpression`].
///
/// # Examples
///
/// ```
/// use bike_events::query::{SearchExpression, parse_query};
///
/// let query = parse_query("('Festa', 'Concert')").unwrap();
/// assert_eq!(
///     query,
///     SearchExpression::Any(vec![
///         SearchExpression::term("Festa"),
///         SearchExpression::term("Concert"),
///     ])
/// );
///
/// assert!(parse_query("['Festa'").is_err());
/// ```
pub fn parse_query(input: &str) -> Result<SearchExpression, QueryError> {
    if input.trim().is_empty() {
        return Err(QueryError::Empty);
    }

    let tokens = tokenize(input)?;
    let mut parser = Parser::new(tokens);
    let mut expr = parser.parse_expr()?;

    // A bare top-level tuple: 'a', 'b'
    if parser.peek() == &Token::Comma {
        parser.advance();
        let (rest, _) = parser.parse_sequence(&Token::Eof)?;
        let mut children = vec![expr];
        children.extend(rest);
        expr = SearchExpression::Any(children);
    }

    // Ensure we consumed all tokens
    if !matches!(parser.peek(), Token::Eof) {
        let offset = parser.offset();
        return Err(QueryError::TrailingInput {
            found: parser.peek().describe(),
            offset,
        });
    }

    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(s: &str) -> SearchExpression {
        SearchExpression::term(s)
    }

    #[test]
    fn test_single_term() {
        assert_eq!(parse_query("'Festa'").unwrap(), term("Festa"));
        assert_eq!(parse_query("  \"Festa\"  ").unwrap(), term("Festa"));
    }

    #[test]
    fn test_list_is_conjunction() {
        assert_eq!(
            parse_query("['Festa', 'Major']").unwrap(),
            SearchExpression::All(vec![term("Festa"), term("Major")])
        );
    }

    #[test]
    fn test_tuple_is_disjunction() {
        assert_eq!(
            parse_query("('Festa', 'Concert')").unwrap(),
            SearchExpression::Any(vec![term("Festa"), term("Concert")])
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse_query("[]").unwrap(), SearchExpression::All(vec![]));
        assert_eq!(parse_query("()").unwrap(), SearchExpression::Any(vec![]));
    }

    #[test]
    fn test_parentheses_group_without_comma() {
        assert_eq!(parse_query("('Festa')").unwrap(), term("Festa"));
        assert_eq!(
            parse_query("(['a', 'b'])").unwrap(),
            SearchExpression::All(vec![term("a"), term("b")])
        );
    }

    #[test]
    fn test_single_element_tuple() {
        assert_eq!(
            parse_query("('Festa',)").unwrap(),
            SearchExpression::Any(vec![term("Festa")])
        );
    }

    #[test]
    fn test_trailing_comma_in_list() {
        assert_eq!(
            parse_query("['Festa',]").unwrap(),
            SearchExpression::All(vec![term("Festa")])
        );
    }

    #[test]
    fn test_nested() {
        assert_eq!(
            parse_query("['Festa', ('Major', 'Jove'), [('Gràcia',)]]").unwrap(),
            SearchExpression::All(vec![
                term("Festa"),
                SearchExpression::Any(vec![term("Major"), term("Jove")]),
                SearchExpression::All(vec![SearchExpression::Any(vec![term("Gràcia")])]),
            ])
        );
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(parse_query(""), Err(QueryError::Empty));
        assert_eq!(parse_query("   "), Err(QueryError::Empty));
    }

    #[test]
    fn test_unclosed_list() {
        assert_eq!(
            parse_query("['Festa'"),
            Err(QueryError::UnexpectedToken {
                found: "end of input".into(),
                offset: 8,
            })
        );
    }

    #[test]
    fn test_missing_comma() {
        assert_eq!(
            parse_query("['a' 'b']"),
            Err(QueryError::UnexpectedToken {
                found: "string \"b\"".into(),
                offset: 5,
            })
        );
    }

    #[test]
    fn test_leading_comma() {
        assert!(matches!(
            parse_query("[,]"),
            Err(QueryError::UnexpectedToken { offset: 1, .. })
        ));
    }

    #[test]
    fn test_mismatched_close() {
        assert!(matches!(
            parse_query("['a')"),
            Err(QueryError::UnexpectedToken { offset: 4, .. })
        ));
    }

    #[test]
    fn test_trailing_input() {
        assert_eq!(
            parse_query("'a' 'b'"),
            Err(QueryError::TrailingInput {
                found: "string \"b\"".into(),
                offset: 4,
            })
        );
    }

    #[test]
    fn test_bare_top_level_tuple() {
        assert_eq!(
            parse_query("'Festa', 'Concert'").unwrap(),
            SearchExpression::Any(vec![term("Festa"), term("Concert")])
        );
        assert_eq!(
            parse_query("'Festa',").unwrap(),
            SearchExpression::Any(vec![term("Festa")])
        );
        assert_eq!(
            parse_query("['a', 'b'], ('c',)").unwrap(),
            SearchExpression::Any(vec![
                SearchExpression::All(vec![term("a"), term("b")]),
                SearchExpression::Any(vec![term("c")]),
            ])
        );
    }

    #[test]
    fn test_bare_top_level_tuple_errors() {
        assert!(matches!(
            parse_query("'a', , 'b'"),
            Err(QueryError::UnexpectedToken { offset: 5, .. })
        ));
        assert!(matches!(
            parse_query("'a', 'b']"),
            Err(QueryError::UnexpectedToken { offset: 8, .. })
        ));
    }

    #[test]
    fn test_nesting_at_limit() {
        let input = format!("{}'a'{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_query(&input).is_ok());
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let input = format!("{}'a'{}", "[".repeat(100_000), "]".repeat(100_000));
        assert_eq!(
            parse_query(&input),
            Err(QueryError::TooDeep {
                limit: MAX_DEPTH,
                offset: MAX_DEPTH,
            })
        );

        let input = format!("{}'a'{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(
            parse_query(&input),
            Err(QueryError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        let inputs = [
            "'Festa'",
            "['Festa', 'Major']",
            "('Festa', 'Concert')",
            "('Festa',)",
            "[('a', ['b', \"d'Art\"]), (), []]",
        ];
        for input in inputs {
            let parsed = parse_query(input).unwrap();
            assert_eq!(parse_query(&parsed.to_string()).unwrap(), parsed);
        }
    }
}
