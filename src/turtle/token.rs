//! Turtle token types.

/// A token with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }
}

/// Token kinds for the supported Turtle subset.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Full IRI `<...>` with escapes decoded
    Iri(String),
    /// `prefix:local` (local may be empty, prefix may be empty)
    PrefixedName { prefix: String, local: String },
    /// `_:label`
    BlankNodeLabel(String),

    /// String literal (unescaped content)
    String(String),
    /// Language tag without the `@`
    LangTag(String),
    /// Integer literal, lexical form
    Integer(String),
    /// Decimal literal, lexical form
    Decimal(String),
    /// Double literal, lexical form
    Double(String),

    /// `@prefix`
    KwPrefix,
    /// `@base`
    KwBase,
    /// SPARQL-style `PREFIX`
    KwSparqlPrefix,
    /// SPARQL-style `BASE`
    KwSparqlBase,
    /// `a` (rdf:type)
    KwA,
    KwTrue,
    KwFalse,

    Dot,
    Comma,
    Semicolon,
    /// `^^`
    DoubleCaret,
    LBracket,
    RBracket,
    LParen,
    RParen,

    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Iri(s) => write!(f, "<{}>", s),
            TokenKind::PrefixedName { prefix, local } => write!(f, "{}:{}", prefix, local),
            TokenKind::BlankNodeLabel(s) => write!(f, "_:{}", s),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::LangTag(s) => write!(f, "@{}", s),
            TokenKind::Integer(s) | TokenKind::Decimal(s) | TokenKind::Double(s) => {
                write!(f, "{}", s)
            }
            TokenKind::KwPrefix => write!(f, "@prefix"),
            TokenKind::KwBase => write!(f, "@base"),
            TokenKind::KwSparqlPrefix => write!(f, "PREFIX"),
            TokenKind::KwSparqlBase => write!(f, "BASE"),
            TokenKind::KwA => write!(f, "a"),
            TokenKind::KwTrue => write!(f, "true"),
            TokenKind::KwFalse => write!(f, "false"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::DoubleCaret => write!(f, "^^"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
