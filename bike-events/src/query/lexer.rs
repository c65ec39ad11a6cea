//! Tokenizer for the query literal syntax.

use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::{any, one_of, take_till};

use super::error::QueryError;

/// Token types for the query syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Quoted string, escapes already resolved
    Str(String),

    LBracket, // [
    RBracket, // ]
    LParen,   // (
    RParen,   // )
    Comma,    // ,

    // End of input
    Eof,
}

impl Token {
    /// Human-readable name for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Str(s) => format!("string {s:?}"),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

type PResult<T> = Result<T, winnow::error::ErrMode<winnow::error::ContextError>>;

/// Lex a single- or double-quoted string.
///
/// Known escapes are resolved; unknown ones are kept as written, backslash
/// included.
fn lex_string(input: &mut &str) -> PResult<String> {
    let quote = one_of(['\'', '"']).parse_next(input)?;
    let mut out = String::new();

    loop {
        let chunk = take_till(0.., |c: char| c == quote || c == '\\').parse_next(input)?;
        out.push_str(chunk);

        // Fails at end of input: the string is unterminated
        let c = any.parse_next(input)?;
        if c == quote {
            return Ok(out);
        }

        let escaped = any.parse_next(input)?;
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' | '\'' | '"' => out.push(escaped),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
}

/// Lex a single token. Leading whitespace must already be skipped.
fn lex_token(input: &mut &str) -> PResult<Token> {
    alt((
        "[".value(Token::LBracket),
        "]".value(Token::RBracket),
        "(".value(Token::LParen),
        ")".value(Token::RParen),
        ",".value(Token::Comma),
        lex_string.map(Token::Str),
    ))
    .parse_next(input)
}

/// Tokenize the entire input. The last token is always [`Token::Eof`].
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, QueryError> {
    let mut remaining = input;
    let mut tokens = Vec::new();

    loop {
        remaining = remaining.trim_start();
        let offset = input.len() - remaining.len();

        let Some(first) = remaining.chars().next() else {
            tokens.push(Spanned {
                token: Token::Eof,
                offset,
            });
            return Ok(tokens);
        };

        match lex_token(&mut remaining) {
            Ok(token) => tokens.push(Spanned { token, offset }),
            Err(_) if first == '\'' || first == '"' => {
                return Err(QueryError::UnterminatedString { offset });
            }
            Err(_) => {
                return Err(QueryError::UnexpectedChar { ch: first, offset });
            }
        }
    }
}
