//! Token definitions for S-expressions
//!
//! The tokens are defined using the logos derive macro. Payload-carrying
//! kinds keep their exact lexeme; converting lexemes to values is the job of
//! the grammar's semantic actions, not the lexer.
use logos::Logos;
use serde::Serialize;
use std::fmt;

/// The four quote-family shorthands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteKind {
    /// `'x`
    Quote,
    /// `` `x ``
    Quasiquote,
    /// `,x`
    Unquote,
    /// `,@x`
    UnquoteSplicing,
}

impl QuoteKind {
    /// Name of the symbol heading the expanded two-element list
    pub fn symbol_name(self) -> &'static str {
        match self {
            QuoteKind::Quote => "quote",
            QuoteKind::Quasiquote => "quasiquote",
            QuoteKind::Unquote => "unquote",
            QuoteKind::UnquoteSplicing => "unquote-splicing",
        }
    }

    /// Source marker for this shorthand
    pub fn marker(self) -> &'static str {
        match self {
            QuoteKind::Quote => "'",
            QuoteKind::Quasiquote => "`",
            QuoteKind::Unquote => ",",
            QuoteKind::UnquoteSplicing => ",@",
        }
    }
}

/// All possible tokens of the S-expression syntax
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Serialize)]
pub enum Token {
    // Dotted pair separator
    #[token(".")]
    Dot,

    // Primary brackets
    #[token("(")]
    ListOpen,
    #[token(")")]
    ListClose,

    // Secondary brackets, same meaning as the primary ones
    #[token("[")]
    ListOpen2,
    #[token("]")]
    ListClose2,

    // Numbers beat the symbol catch-all on equal length
    #[regex(r"-?[0-9]+", |lex| lex.slice().to_owned(), priority = 3)]
    Int(String),
    #[regex(r"-?[0-9]+\.[0-9]+", |lex| lex.slice().to_owned(), priority = 3)]
    Float(String),

    // Quotes stay in the lexeme; unescaping happens in the grammar
    #[regex(r#""([^"\\]|\\(.|\n))*""#, |lex| lex.slice().to_owned())]
    Str(String),

    #[regex(r";[^\n]*", |lex| lex.slice().to_owned())]
    Comment(String),

    #[regex(r"\s+", |lex| lex.slice().to_owned())]
    Whitespace(String),

    #[token("'", |_| QuoteKind::Quote)]
    #[token("`", |_| QuoteKind::Quasiquote)]
    #[token(",", |_| QuoteKind::Unquote)]
    #[token(",@", |_| QuoteKind::UnquoteSplicing)]
    Quote(QuoteKind),

    // Catch-all, lowest priority
    #[regex(r#"[^#()"\[\]'`,@;\s]+"#, |lex| lex.slice().to_owned(), priority = 1)]
    Symbol(String),

    #[regex(r"#.", |lex| lex.slice().to_owned())]
    Hash(String),
}

impl Token {
    /// Comments and whitespace, which never reach the grammar
    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Comment(_) | Token::Whitespace(_))
    }

    /// Check if this token opens a list in either bracket style
    pub fn is_list_open(&self) -> bool {
        matches!(self, Token::ListOpen | Token::ListOpen2)
    }

    /// Check if this token closes a list in either bracket style
    pub fn is_list_close(&self) -> bool {
        matches!(self, Token::ListClose | Token::ListClose2)
    }

    /// Lowercase dash-separated kind name, as used by the simple token format
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Dot => "dot",
            Token::ListOpen => "list-open",
            Token::ListClose => "list-close",
            Token::ListOpen2 => "list-open2",
            Token::ListClose2 => "list-close2",
            Token::Int(_) => "int",
            Token::Float(_) => "float",
            Token::Str(_) => "str",
            Token::Comment(_) => "comment",
            Token::Whitespace(_) => "whitespace",
            Token::Quote(_) => "quote",
            Token::Symbol(_) => "symbol",
            Token::Hash(_) => "hash",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(lexeme)
            | Token::Float(lexeme)
            | Token::Str(lexeme)
            | Token::Symbol(lexeme)
            | Token::Hash(lexeme) => write!(f, "<{}:{}>", self.kind_name(), lexeme),
            Token::Quote(kind) => write!(f, "<{}:{}>", self.kind_name(), kind.marker()),
            _ => write!(f, "<{}>", self.kind_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Result<Token, ()>> {
        Token::lexer(source).collect()
    }

    #[test]
    fn test_structural_tokens() {
        let mut lexer = Token::lexer("( ) [ ] .");
        assert_eq!(lexer.next(), Some(Ok(Token::ListOpen)));
        assert!(matches!(lexer.next(), Some(Ok(Token::Whitespace(_)))));
        assert_eq!(lexer.next(), Some(Ok(Token::ListClose)));
        assert!(matches!(lexer.next(), Some(Ok(Token::Whitespace(_)))));
        assert_eq!(lexer.next(), Some(Ok(Token::ListOpen2)));
        assert!(matches!(lexer.next(), Some(Ok(Token::Whitespace(_)))));
        assert_eq!(lexer.next(), Some(Ok(Token::ListClose2)));
        assert!(matches!(lexer.next(), Some(Ok(Token::Whitespace(_)))));
        assert_eq!(lexer.next(), Some(Ok(Token::Dot)));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_longest_match_prefers_float() {
        assert_eq!(lex_all("3.5"), vec![Ok(Token::Float("3.5".to_string()))]);
        assert_eq!(lex_all("35"), vec![Ok(Token::Int("35".to_string()))]);
        assert_eq!(lex_all("-7"), vec![Ok(Token::Int("-7".to_string()))]);
    }

    #[test]
    fn test_symbol_catch_all() {
        assert_eq!(lex_all("foo"), vec![Ok(Token::Symbol("foo".to_string()))]);
        assert_eq!(lex_all("-"), vec![Ok(Token::Symbol("-".to_string()))]);
        assert_eq!(lex_all("..."), vec![Ok(Token::Symbol("...".to_string()))]);
        assert_eq!(lex_all("3d"), vec![Ok(Token::Symbol("3d".to_string()))]);
        assert_eq!(lex_all("a.b"), vec![Ok(Token::Symbol("a.b".to_string()))]);
    }

    #[test]
    fn test_punctuation_never_leaks_into_symbols() {
        assert_eq!(
            lex_all("a(b"),
            vec![
                Ok(Token::Symbol("a".to_string())),
                Ok(Token::ListOpen),
                Ok(Token::Symbol("b".to_string())),
            ]
        );
        assert_eq!(
            lex_all("x;note"),
            vec![
                Ok(Token::Symbol("x".to_string())),
                Ok(Token::Comment(";note".to_string())),
            ]
        );
    }

    #[test]
    fn test_quote_markers() {
        assert_eq!(
            lex_all(",@x"),
            vec![
                Ok(Token::Quote(QuoteKind::UnquoteSplicing)),
                Ok(Token::Symbol("x".to_string())),
            ]
        );
        assert_eq!(
            lex_all("'`,"),
            vec![
                Ok(Token::Quote(QuoteKind::Quote)),
                Ok(Token::Quote(QuoteKind::Quasiquote)),
                Ok(Token::Quote(QuoteKind::Unquote)),
            ]
        );
    }

    #[test]
    fn test_string_keeps_quotes_and_escapes() {
        assert_eq!(
            lex_all(r#""a \"b\" c""#),
            vec![Ok(Token::Str(r#""a \"b\" c""#.to_string()))]
        );
    }

    #[test]
    fn test_backslash_newline_stays_inside_the_string() {
        assert_eq!(
            lex_all("\"a\\\nb\" c"),
            vec![
                Ok(Token::Str("\"a\\\nb\"".to_string())),
                Ok(Token::Whitespace(" ".to_string())),
                Ok(Token::Symbol("c".to_string())),
            ]
        );
    }

    #[test]
    fn test_hash_takes_one_character() {
        assert_eq!(
            lex_all("#tx"),
            vec![
                Ok(Token::Hash("#t".to_string())),
                Ok(Token::Symbol("x".to_string())),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        assert!(lex_all("\"abc").iter().any(|t| t.is_err()));
    }

    #[test]
    fn test_token_display() {
        assert_eq!(format!("{}", Token::ListOpen), "<list-open>");
        assert_eq!(format!("{}", Token::Int("42".to_string())), "<int:42>");
        assert_eq!(
            format!("{}", Token::Quote(QuoteKind::UnquoteSplicing)),
            "<quote:,@>"
        );
        assert_eq!(
            format!("{}", Token::Whitespace(" ".to_string())),
            "<whitespace>"
        );
    }

    #[test]
    fn test_token_predicates() {
        assert!(Token::Comment(";".to_string()).is_trivia());
        assert!(Token::Whitespace(" ".to_string()).is_trivia());
        assert!(!Token::Dot.is_trivia());
        assert!(Token::ListOpen2.is_list_open());
        assert!(Token::ListClose.is_list_close());
        assert!(!Token::ListClose.is_list_open());
    }
}
