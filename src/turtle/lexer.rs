//! Turtle lexer implementation using winnow.
//!
//! Tokenizes Turtle input into a stream of tokens with source spans.
//! Fails fast on the first lexical error with line/column information.

use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, not, opt, peek, preceded, repeat, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::{AsChar, Location};
use winnow::token::{any, one_of, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::chars::*;
use super::error::{Result, TurtleError};
use super::token::{Token, TokenKind};

/// Input type for the lexer; tracks byte offsets for spans.
type Input<'a> = LocatingSlice<&'a str>;

/// Characters that may follow a backslash inside a local name.
const LOCAL_ESCAPES: &str = "_~.-!$&'()*+,;=/?#@%";

/// Tokenize a whole document, ending with an `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::new();

    loop {
        // Only ever consumes; cannot fail
        let _ = skip_ws_and_comments(&mut input);

        let start = input.current_token_start();
        if input.is_empty() {
            tokens.push(Token::new(TokenKind::Eof, start, start));
            break;
        }

        let kind = next_token(&mut input).map_err(|_| lex_error(source, start))?;
        tokens.push(Token::new(kind, start, input.current_token_start()));
    }

    Ok(tokens)
}

fn lex_error(source: &str, position: usize) -> TurtleError {
    let message = match source[position..].chars().next() {
        Some('"') | Some('\'') => "unterminated or malformed string literal".to_string(),
        Some('<') => "invalid or unterminated IRI".to_string(),
        Some(c) => format!("unexpected character '{}'", c.escape_default()),
        None => "unexpected end of input".to_string(),
    };
    TurtleError::lexer(source, position, message)
}

fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

fn append(mut acc: String, piece: String) -> String {
    acc.push_str(&piece);
    acc
}

fn skip_ws_and_comments(input: &mut Input<'_>) -> ModalResult<()> {
    repeat(
        0..,
        alt((
            take_while(1.., is_ws).void(),
            ('#', take_till(0.., ['\n', '\r'])).void(),
        )),
    )
    .parse_next(input)
}

fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        "^^".value(TokenKind::DoubleCaret),
        iri_ref,
        blank_node_label,
        at_word,
        default_prefix,
        name_or_keyword,
        string_literal,
        number,
        punctuation,
    ))
    .parse_next(input)
}

// IRIs

fn iri_ref(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited(
        '<',
        repeat(
            0..,
            alt((
                take_while(1.., is_iri_char).map(String::from),
                preceded('\\', unicode_escape).map(String::from),
            )),
        )
        .fold(String::new, append),
        '>',
    )
    .map(TokenKind::Iri)
    .parse_next(input)
}

/// `uXXXX` / `UXXXXXXXX`, after the backslash
fn unicode_escape(input: &mut Input<'_>) -> ModalResult<char> {
    alt((
        preceded('u', take_while(4, AsChar::is_hex_digit)),
        preceded('U', take_while(8, AsChar::is_hex_digit)),
    ))
    .verify_map(|hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32))
    .parse_next(input)
}

// Directives and language tags

fn at_word(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded('@', take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-'))
        .map(|word: &str| match word {
            "prefix" => TokenKind::KwPrefix,
            "base" => TokenKind::KwBase,
            tag => TokenKind::LangTag(tag.to_string()),
        })
        .parse_next(input)
}

// Prefixed names and keywords

/// PN_CHARS runs with inner dots; a trailing dot is left for the statement end
fn dotted_tail<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    repeat::<_, _, (), _, _>(
        0..,
        alt((
            take_while(1.., is_pn_chars).void(),
            terminated('.', peek(one_of(is_pn_chars))).void(),
        )),
    )
    .take()
    .parse_next(input)
}

/// `:local` in the default namespace
fn default_prefix(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded(':', local_name)
        .map(|local| TokenKind::PrefixedName {
            prefix: String::new(),
            local,
        })
        .parse_next(input)
}

fn name_or_keyword(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let word = (one_of(is_pn_chars_base), dotted_tail)
        .take()
        .parse_next(input)?;

    if let Some(local) = opt(preceded(':', local_name)).parse_next(input)? {
        return Ok(TokenKind::PrefixedName {
            prefix: word.to_string(),
            local,
        });
    }

    match word {
        "a" => Ok(TokenKind::KwA),
        "true" => Ok(TokenKind::KwTrue),
        "false" => Ok(TokenKind::KwFalse),
        w if w.eq_ignore_ascii_case("prefix") => Ok(TokenKind::KwSparqlPrefix),
        w if w.eq_ignore_ascii_case("base") => Ok(TokenKind::KwSparqlBase),
        _ => backtrack(),
    }
}

/// Local part of a prefixed name; may be empty
fn local_name(input: &mut Input<'_>) -> ModalResult<String> {
    let starts_local = input
        .chars()
        .next()
        .is_some_and(|c| is_pn_local_start(c) || c == '%' || c == '\\');
    if !starts_local {
        return Ok(String::new());
    }

    repeat(
        0..,
        alt((
            take_while(1.., |c: char| is_pn_chars(c) || c == ':').map(String::from),
            terminated(
                '.',
                peek(one_of(|c: char| is_pn_chars(c) || matches!(c, ':' | '%' | '\\'))),
            )
            .map(String::from),
            ('%', take_while(2, AsChar::is_hex_digit))
                .take()
                .map(String::from),
            preceded('\\', one_of(|c: char| LOCAL_ESCAPES.contains(c))).map(String::from),
        )),
    )
    .fold(String::new, append)
    .parse_next(input)
}

// Blank nodes

fn blank_node_label(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded(
        "_:",
        (
            one_of(|c: char| is_pn_chars_u(c) || c.is_ascii_digit()),
            dotted_tail,
        )
            .take(),
    )
    .map(|label: &str| TokenKind::BlankNodeLabel(label.to_string()))
    .parse_next(input)
}

// String literals

fn string_literal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        long_string("\"\"\"", '"'),
        long_string("'''", '\''),
        short_string('"'),
        short_string('\''),
    ))
    .map(TokenKind::String)
    .parse_next(input)
}

fn short_string<'a>(quote: char) -> impl Parser<Input<'a>, String, ErrMode<ContextError>> {
    delimited(
        quote,
        repeat(
            0..,
            alt((
                take_while(1.., move |c: char| {
                    c != quote && c != '\\' && c != '\n' && c != '\r'
                })
                .map(String::from),
                string_escape.map(String::from),
            )),
        )
        .fold(String::new, append),
        quote,
    )
}

fn long_string<'a>(
    delimiter: &'static str,
    quote: char,
) -> impl Parser<Input<'a>, String, ErrMode<ContextError>> {
    delimited(
        delimiter,
        repeat(
            0..,
            alt((
                take_while(1.., move |c: char| c != quote && c != '\\').map(String::from),
                string_escape.map(String::from),
                preceded(not(delimiter), one_of(quote)).map(String::from),
            )),
        )
        .fold(String::new, append),
        delimiter,
    )
}

fn string_escape(input: &mut Input<'_>) -> ModalResult<char> {
    preceded(
        '\\',
        alt((
            unicode_escape,
            any.verify_map(|c| match c {
                't' => Some('\t'),
                'b' => Some('\u{8}'),
                'n' => Some('\n'),
                'r' => Some('\r'),
                'f' => Some('\u{c}'),
                '"' => Some('"'),
                '\'' => Some('\''),
                '\\' => Some('\\'),
                _ => None,
            }),
        )),
    )
    .parse_next(input)
}

// Numbers

/// Integer, decimal, or double; the token keeps the lexical form
fn number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let ((_, fraction, exponent), lexical) = (
        opt(one_of(['+', '-'])),
        alt((
            (digit1, opt(('.', digit1))).map(|(_, f): (&str, Option<(char, &str)>)| f.is_some()),
            ('.', digit1).value(true),
        )),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .with_taken()
        .parse_next(input)?;

    let lexical = lexical.to_string();
    Ok(match (fraction, exponent) {
        (_, Some(_)) => TokenKind::Double(lexical),
        (true, None) => TokenKind::Decimal(lexical),
        (false, None) => TokenKind::Integer(lexical),
    })
}

// Punctuation

fn punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    any.verify_map(|c| match c {
        '.' => Some(TokenKind::Dot),
        ',' => Some(TokenKind::Comma),
        ';' => Some(TokenKind::Semicolon),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        _ => None,
    })
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_prefix_directive() {
        assert_eq!(
            kinds("@prefix rj: <http://example.org/rj#> ."),
            vec![
                TokenKind::KwPrefix,
                TokenKind::PrefixedName { prefix: "rj".into(), local: String::new() },
                TokenKind::Iri("http://example.org/rj#".into()),
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_prefixed_name_stops_before_final_dot() {
        assert_eq!(
            kinds("rj:Masjid a rj:TempatIbadah."),
            vec![
                TokenKind::PrefixedName { prefix: "rj".into(), local: "Masjid".into() },
                TokenKind::KwA,
                TokenKind::PrefixedName { prefix: "rj".into(), local: "TempatIbadah".into() },
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#""Jl. \"Satu\"\n"@id 42 -6.2 1.5e3 true "1978"^^xsd:gYear"#),
            vec![
                TokenKind::String("Jl. \"Satu\"\n".into()),
                TokenKind::LangTag("id".into()),
                TokenKind::Integer("42".into()),
                TokenKind::Decimal("-6.2".into()),
                TokenKind::Double("1.5e3".into()),
                TokenKind::KwTrue,
                TokenKind::String("1978".into()),
                TokenKind::DoubleCaret,
                TokenKind::PrefixedName { prefix: "xsd".into(), local: "gYear".into() },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_long_string_and_comments() {
        let input = "# header\n'''multi\nline's''' # trailing\n";
        assert_eq!(
            kinds(input),
            vec![TokenKind::String("multi\nline's".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_iri_unicode_escape() {
        assert_eq!(
            kinds(r"<http://example.org/Test\u0020Mosque>"),
            vec![
                TokenKind::Iri("http://example.org/Test Mosque".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_blank_nodes_and_sparql_keywords() {
        assert_eq!(
            kinds("PREFIX _:b0 [ ]"),
            vec![
                TokenKind::KwSparqlPrefix,
                TokenKind::BlankNodeLabel("b0".into()),
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_reports_position() {
        let err = tokenize("rj:a rj:b \"open\n").unwrap_err();
        match err {
            TurtleError::Lexer { line, column, .. } => {
                assert_eq!(line, 1);
                assert_eq!(column, 11);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_character() {
        assert!(tokenize("rj:a rj:b ?x .").is_err());
        assert!(tokenize("<http://example.org/a b>").is_err());
        assert!(tokenize("rj:a rj:b word .").is_err());
    }
}
