//! Turtle parser that collects statements into a [`TripleStore`].

use std::collections::HashMap;

use super::error::{Result, TurtleError};
use super::lexer::tokenize;
use super::token::{Token, TokenKind};
use crate::graph::TripleStore;
use crate::term::{Datatype, Literal, Term, Triple};
use crate::vocab::{rdf, xsd};

/// Parse a Turtle document into a new store.
pub fn parse(input: &str) -> Result<TripleStore> {
    let mut store = TripleStore::new();
    parse_into(input, &mut store)?;
    Ok(store)
}

/// Parse a Turtle document, adding its statements to `store`.
///
/// Returns the number of statements that were new to the store. On error
/// the store may hold the statements read before the failing token.
pub fn parse_into(input: &str, store: &mut TripleStore) -> Result<usize> {
    let before = store.len();
    Parser::new(input, store)?.parse()?;
    Ok(store.len() - before)
}

/// Turtle parser state.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    store: &'a mut TripleStore,
    /// Prefix mappings (prefix -> namespace IRI)
    prefixes: HashMap<String, String>,
    /// Base IRI for relative IRI resolution
    base: Option<String>,
    /// Counter for anonymous blank nodes
    next_blank: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, store: &'a mut TripleStore) -> Result<Self> {
        Ok(Self {
            source,
            tokens: tokenize(source)?,
            pos: 0,
            store,
            prefixes: HashMap::new(),
            base: None,
            next_blank: 0,
        })
    }

    /// Parse the entire document.
    pub fn parse(mut self) -> Result<()> {
        while !self.is_at_end() {
            self.parse_statement()?;
        }
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> TurtleError {
        TurtleError::parse(self.source, self.current().start, message)
    }

    fn unexpected(&self, expected: &str) -> TurtleError {
        self.error(format!("expected {}, found {}", expected, self.current().kind))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.current().kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", kind)))
        }
    }

    fn parse_statement(&mut self) -> Result<()> {
        match self.current().kind {
            TokenKind::KwPrefix => self.parse_prefix_directive(true),
            TokenKind::KwSparqlPrefix => self.parse_prefix_directive(false),
            TokenKind::KwBase => self.parse_base_directive(true),
            TokenKind::KwSparqlBase => self.parse_base_directive(false),
            _ => self.parse_triples(),
        }
    }

    /// `@prefix p: <iri> .` or `PREFIX p: <iri>`
    fn parse_prefix_directive(&mut self, needs_dot: bool) -> Result<()> {
        self.advance();

        let prefix = match &self.current().kind {
            TokenKind::PrefixedName { prefix, local } if local.is_empty() => prefix.clone(),
            _ => return Err(self.unexpected("prefix namespace")),
        };
        self.advance();

        let namespace = match &self.current().kind {
            TokenKind::Iri(iri) => self.resolve_iri(iri)?,
            _ => return Err(self.unexpected("IRI for prefix namespace")),
        };
        self.advance();

        self.prefixes.insert(prefix, namespace);

        if needs_dot {
            self.expect(TokenKind::Dot)?;
        }
        Ok(())
    }

    /// `@base <iri> .` or `BASE <iri>`
    fn parse_base_directive(&mut self, needs_dot: bool) -> Result<()> {
        self.advance();

        let base = match &self.current().kind {
            TokenKind::Iri(iri) => self.resolve_iri(iri)?,
            _ => return Err(self.unexpected("IRI for base")),
        };
        self.advance();
        self.base = Some(base);

        if needs_dot {
            self.expect(TokenKind::Dot)?;
        }
        Ok(())
    }

    fn parse_triples(&mut self) -> Result<()> {
        if self.current().kind == TokenKind::LBracket {
            // `[ p o ] .` may stand alone or be followed by more predicates
            let subject = self.parse_blank_node_property_list()?;
            if self.current().kind != TokenKind::Dot {
                self.parse_predicate_object_list(&subject)?;
            }
        } else {
            let subject = self.parse_subject()?;
            self.parse_predicate_object_list(&subject)?;
        }
        self.expect(TokenKind::Dot)
    }

    fn parse_subject(&mut self) -> Result<Term> {
        match self.current().kind.clone() {
            TokenKind::Iri(iri) => {
                let resolved = self.resolve_iri(&iri)?;
                self.advance();
                Ok(Term::Iri(resolved))
            }
            TokenKind::PrefixedName { prefix, local } => {
                let iri = self.expand_prefixed_name(&prefix, &local)?;
                self.advance();
                Ok(Term::Iri(iri))
            }
            TokenKind::BlankNodeLabel(label) => {
                self.advance();
                Ok(Term::Blank(label))
            }
            TokenKind::LParen => Err(self.error("RDF collections are not supported")),
            _ => Err(self.unexpected("subject")),
        }
    }

    fn parse_predicate_object_list(&mut self, subject: &Term) -> Result<()> {
        loop {
            let predicate = self.parse_predicate()?;
            self.parse_object_list(subject, &predicate)?;

            if self.current().kind != TokenKind::Semicolon {
                break;
            }
            // Repeated and trailing semicolons are allowed
            while self.current().kind == TokenKind::Semicolon {
                self.advance();
            }
            if matches!(
                self.current().kind,
                TokenKind::Dot | TokenKind::RBracket | TokenKind::Eof
            ) {
                break;
            }
        }
        Ok(())
    }

    fn parse_predicate(&mut self) -> Result<String> {
        match self.current().kind.clone() {
            TokenKind::Iri(iri) => {
                let resolved = self.resolve_iri(&iri)?;
                self.advance();
                Ok(resolved)
            }
            TokenKind::PrefixedName { prefix, local } => {
                let iri = self.expand_prefixed_name(&prefix, &local)?;
                self.advance();
                Ok(iri)
            }
            TokenKind::KwA => {
                self.advance();
                Ok(rdf::TYPE.to_string())
            }
            _ => Err(self.unexpected("predicate")),
        }
    }

    fn parse_object_list(&mut self, subject: &Term, predicate: &str) -> Result<()> {
        loop {
            let object = self.parse_object()?;
            self.store
                .insert(Triple::new(subject.clone(), predicate, object));

            if self.current().kind == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }
        Ok(())
    }

    fn parse_object(&mut self) -> Result<Term> {
        match self.current().kind.clone() {
            TokenKind::Iri(_) | TokenKind::PrefixedName { .. } | TokenKind::BlankNodeLabel(_) => {
                self.parse_subject()
            }
            TokenKind::LBracket => self.parse_blank_node_property_list(),
            TokenKind::LParen => Err(self.error("RDF collections are not supported")),
            _ => self.parse_literal().map(Term::Literal),
        }
    }

    fn parse_literal(&mut self) -> Result<Literal> {
        let literal = match self.current().kind.clone() {
            TokenKind::String(value) => {
                self.advance();
                return match self.current().kind.clone() {
                    TokenKind::LangTag(lang) => {
                        self.advance();
                        Ok(Literal::lang_string(value, lang))
                    }
                    TokenKind::DoubleCaret => {
                        self.advance();
                        let datatype = self.parse_datatype_iri()?;
                        Ok(Literal::new(value, Datatype::from_iri(&datatype)))
                    }
                    _ => Ok(Literal::string(value)),
                };
            }
            TokenKind::Integer(lexical) => Literal::new(lexical, Datatype::Integer),
            TokenKind::Decimal(lexical) => Literal::new(lexical, Datatype::Decimal),
            TokenKind::Double(lexical) => {
                Literal::new(lexical, Datatype::Other(xsd::DOUBLE.to_string()))
            }
            TokenKind::KwTrue => Literal::boolean(true),
            TokenKind::KwFalse => Literal::boolean(false),
            _ => return Err(self.unexpected("object")),
        };
        self.advance();
        Ok(literal)
    }

    fn parse_datatype_iri(&mut self) -> Result<String> {
        match self.current().kind.clone() {
            TokenKind::Iri(iri) => {
                let resolved = self.resolve_iri(&iri)?;
                self.advance();
                Ok(resolved)
            }
            TokenKind::PrefixedName { prefix, local } => {
                let iri = self.expand_prefixed_name(&prefix, &local)?;
                self.advance();
                Ok(iri)
            }
            _ => Err(self.unexpected("datatype IRI")),
        }
    }

    /// `[ predicate object ; ... ]`
    fn parse_blank_node_property_list(&mut self) -> Result<Term> {
        self.expect(TokenKind::LBracket)?;

        let node = Term::Blank(format!("genid{}", self.next_blank));
        self.next_blank += 1;

        if self.current().kind != TokenKind::RBracket {
            self.parse_predicate_object_list(&node)?;
        }
        self.expect(TokenKind::RBracket)?;
        Ok(node)
    }

    fn expand_prefixed_name(&self, prefix: &str, local: &str) -> Result<String> {
        let namespace = self
            .prefixes
            .get(prefix)
            .ok_or_else(|| TurtleError::UndefinedPrefix(format!("{}:", prefix)))?;
        Ok(format!("{}{}", namespace, local))
    }

    /// Resolve a possibly relative IRI against the current base.
    ///
    /// Handles fragment (`#x`), absolute-path (`/x`) and relative-path
    /// references; dot segments are not normalized.
    fn resolve_iri(&self, reference: &str) -> Result<String> {
        if has_scheme(reference) {
            return Ok(reference.to_string());
        }

        let base = self.base.as_deref().ok_or_else(|| {
            TurtleError::IriResolution(format!("relative IRI '{}' without base", reference))
        })?;

        if reference.is_empty() {
            return Ok(base.to_string());
        }

        if reference.starts_with('#') {
            let without_fragment = base.split_once('#').map_or(base, |(b, _)| b);
            return Ok(format!("{}{}", without_fragment, reference));
        }

        if reference.starts_with('/') {
            let authority_end = base
                .find("://")
                .map(|i| i + 3)
                .and_then(|start| base[start..].find('/').map(|j| start + j))
                .unwrap_or(base.len());
            return Ok(format!("{}{}", &base[..authority_end], reference));
        }

        let dir_end = base.rfind('/').map_or(base.len(), |i| i + 1);
        Ok(format!("{}{}", &base[..dir_end], reference))
    }
}

/// True if the IRI starts with `scheme:`
fn has_scheme(iri: &str) -> bool {
    let Some((scheme, _)) = iri.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::rdfs;

    const EX: &str = "http://example.org/";

    fn ex(local: &str) -> Term {
        Term::iri(format!("{EX}{local}"))
    }

    #[test]
    fn test_parse_simple() {
        let store = parse(
            r#"
            @prefix ex: <http://example.org/> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

            ex:alice a ex:Person ;
                rdfs:label "Alice"@en ;
                ex:age 30 ;
                ex:nick "Al", "Ally" .
            "#,
        )
        .unwrap();

        assert_eq!(store.len(), 5);
        assert!(store.contains(&ex("alice"), rdf::TYPE, &ex("Person")));
        assert_eq!(
            store.value(&ex("alice"), rdfs::LABEL),
            Some(&Term::Literal(Literal::lang_string("Alice", "en")))
        );
        assert_eq!(
            store.value(&ex("alice"), &format!("{EX}age")),
            Some(&Term::Literal(Literal::new("30", Datatype::Integer)))
        );
        assert_eq!(store.values(&ex("alice"), &format!("{EX}nick")).len(), 2);
    }

    #[test]
    fn test_parse_typed_literals() {
        let store = parse(
            r#"
            PREFIX ex: <http://example.org/>
            PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>
            ex:s ex:year "1978"^^xsd:gYear ;
                 ex:flag "true"^^<http://www.w3.org/2001/XMLSchema#boolean> ;
                 ex:lat -6.17 ;
                 ex:area 1.2e3 .
            "#,
        )
        .unwrap();

        let year = store.value(&ex("s"), &format!("{EX}year")).unwrap();
        assert_eq!(year.as_literal().unwrap().datatype, Datatype::GYear);

        let flag = store.value(&ex("s"), &format!("{EX}flag")).unwrap();
        assert_eq!(flag.as_literal().unwrap().datatype.as_iri(), xsd::BOOLEAN);

        let lat = store.value(&ex("s"), &format!("{EX}lat")).unwrap();
        assert_eq!(lat.as_literal().unwrap().lexical, "-6.17");

        let area = store.value(&ex("s"), &format!("{EX}area")).unwrap();
        assert_eq!(area.as_literal().unwrap().datatype.as_iri(), xsd::DOUBLE);
    }

    #[test]
    fn test_parse_base_and_relative_iris() {
        let store = parse(
            r#"
            @base <http://example.org/data/ontology> .
            <#site> <http://example.org/p> </abs> .
            <rel> <http://example.org/p> "x" .
            "#,
        )
        .unwrap();

        assert!(store.contains(
            &Term::iri("http://example.org/data/ontology#site"),
            "http://example.org/p",
            &Term::iri("http://example.org/abs"),
        ));
        assert_eq!(store.subjects().count(), 2);
        assert!(
            store
                .subjects()
                .any(|s| s == &Term::iri("http://example.org/data/rel"))
        );
    }

    #[test]
    fn test_parse_blank_node_property_list() {
        let store = parse(
            r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:knows [ ex:name "Bob" ] .
            _:c ex:name "Carol" .
            "#,
        )
        .unwrap();

        assert_eq!(store.len(), 3);
        let bob = store.value(&ex("alice"), &format!("{EX}knows")).unwrap();
        assert!(matches!(bob, Term::Blank(_)));
        assert!(store.contains(&Term::blank("c"), &format!("{EX}name"), &Term::Literal(Literal::string("Carol"))));
    }

    #[test]
    fn test_undefined_prefix() {
        let err = parse("ex:a ex:b ex:c .").unwrap_err();
        assert!(matches!(err, TurtleError::UndefinedPrefix(p) if p == "ex:"));
    }

    #[test]
    fn test_missing_dot_is_parse_error() {
        let err = parse("@prefix ex: <http://example.org/> .\nex:a ex:b ex:c").unwrap_err();
        match err {
            TurtleError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_collections_rejected() {
        let err = parse("@prefix ex: <http://example.org/> .\nex:a ex:b ( 1 2 ) .").unwrap_err();
        assert!(err.to_string().contains("collections"));
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("http://example.org/"));
        assert!(has_scheme("urn:isbn:1"));
        assert!(!has_scheme("#frag"));
        assert!(!has_scheme("rel/path"));
    }
}
