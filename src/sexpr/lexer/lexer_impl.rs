//! Implementation of the S-expression scanner
//!
//! The actual pattern matching is handled entirely by logos. [`Scanner`] adds
//! spans and turns unmatched input into an error item.

use crate::sexpr::error::Error;
use crate::sexpr::lexer::tokens::Token;
use logos::Logos;

/// Byte range of a token in the scanned text
pub type Span = std::ops::Range<usize>;

/// Lazy token iterator over a source text.
///
/// Each item is either a token with its span, or the span of input that no
/// pattern matched. A scanner only moves forward; to rescan, build a new one.
pub struct Scanner<'s> {
    lexer: logos::Lexer<'s, Token>,
}

impl<'s> Scanner<'s> {
    pub fn new(source: &'s str) -> Self {
        Scanner {
            lexer: Token::lexer(source),
        }
    }

    /// Drop comment and whitespace tokens, keeping scan failures
    pub fn significant(self) -> impl Iterator<Item = Result<(Token, Span), Span>> + 's {
        self.filter(|step| !matches!(step, Ok((token, _)) if token.is_trivia()))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<(Token, Span), Span>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.lexer.next()?;
        let span = self.lexer.span();
        Some(match result {
            Ok(token) => Ok((token, span)),
            Err(()) => Err(span),
        })
    }
}

fn collect<I>(steps: I) -> Result<Vec<(Token, Span)>, Error>
where
    I: Iterator<Item = Result<(Token, Span), Span>>,
{
    steps
        .map(|step| {
            step.map_err(|span| {
                Error::Syntax(format!("unexpected input at offset {}", span.start))
            })
        })
        .collect()
}

/// Tokenize a whole string the way the grammar sees it (no comments or whitespace)
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, Error> {
    collect(Scanner::new(source).significant())
}

/// Tokenize a whole string keeping comment and whitespace tokens
pub fn tokenize_raw(source: &str) -> Result<Vec<(Token, Span)>, Error> {
    collect(Scanner::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sexpr::lexer::QuoteKind;

    fn kinds(tokens: Vec<(Token, Span)>) -> Vec<Token> {
        tokens.into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_significant_tokens_skip_trivia() {
        let tokens = tokenize("(a ; note\n  1)").unwrap();
        assert_eq!(
            kinds(tokens),
            vec![
                Token::ListOpen,
                Token::Symbol("a".to_string()),
                Token::Int("1".to_string()),
                Token::ListClose,
            ]
        );
    }

    #[test]
    fn test_raw_tokens_keep_trivia() {
        let tokens = tokenize_raw("a ;c").unwrap();
        assert_eq!(
            kinds(tokens),
            vec![
                Token::Symbol("a".to_string()),
                Token::Whitespace(" ".to_string()),
                Token::Comment(";c".to_string()),
            ]
        );
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = tokenize("  'foo").unwrap();
        assert_eq!(tokens[0], (Token::Quote(QuoteKind::Quote), 2..3));
        assert_eq!(tokens[1], (Token::Symbol("foo".to_string()), 3..6));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
        assert_eq!(tokenize(" \n\t; only a comment").unwrap(), vec![]);
    }

    #[test]
    fn test_scan_failure_reports_offset() {
        let err = tokenize("(a \"open").unwrap_err();
        assert_eq!(err.kind(), "syntax-error");
        assert!(err.message().contains("offset 3"));
    }

    #[test]
    fn test_scanner_is_lazy() {
        let mut scanner = Scanner::new("a \"broken");
        assert_eq!(scanner.next(), Some(Ok((Token::Symbol("a".to_string()), 0..1))));
        assert!(matches!(scanner.next(), Some(Ok((Token::Whitespace(_), _)))));
        assert!(matches!(scanner.next(), Some(Err(_))));
    }
}
