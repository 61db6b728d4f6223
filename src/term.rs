//! RDF term types: IRI, blank node, and typed literal
//!
//! Literals always carry an explicit datatype tag. Plain strings are
//! `xsd:string`, language-tagged strings keep their tag inside
//! [`Datatype::LangString`]. The schema mapper relies on these tags when
//! coercing values back into record fields.

use crate::vocab::{rdf, xsd};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal datatype tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Datatype {
    /// xsd:string - default for plain string literals
    String,
    /// rdf:langString with its language tag (stored without the `@`)
    LangString(String),
    /// xsd:integer
    Integer,
    /// xsd:decimal
    Decimal,
    /// xsd:boolean
    Boolean,
    /// xsd:gYear
    GYear,
    /// Any other datatype IRI, kept verbatim
    Other(String),
}

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: &str) -> Self {
        match iri {
            xsd::STRING => Datatype::String,
            xsd::INTEGER => Datatype::Integer,
            xsd::DECIMAL => Datatype::Decimal,
            xsd::BOOLEAN => Datatype::Boolean,
            xsd::G_YEAR => Datatype::GYear,
            // A langString without a tag carries no extra information
            rdf::LANG_STRING => Datatype::String,
            other => Datatype::Other(other.to_string()),
        }
    }

    /// Get the IRI of this datatype
    pub fn as_iri(&self) -> &str {
        match self {
            Datatype::String => xsd::STRING,
            Datatype::LangString(_) => rdf::LANG_STRING,
            Datatype::Integer => xsd::INTEGER,
            Datatype::Decimal => xsd::DECIMAL,
            Datatype::Boolean => xsd::BOOLEAN,
            Datatype::GYear => xsd::G_YEAR,
            Datatype::Other(iri) => iri,
        }
    }

    /// Check if this is a plain or language-tagged string
    pub fn is_textual(&self) -> bool {
        matches!(self, Datatype::String | Datatype::LangString(_))
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_iri())
    }
}

/// A literal value: lexical form plus datatype tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Datatype,
}

impl Literal {
    pub fn new(lexical: impl Into<String>, datatype: Datatype) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
        }
    }

    /// Plain xsd:string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(value, Datatype::String)
    }

    /// Language-tagged string literal
    pub fn lang_string(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self::new(value, Datatype::LangString(lang.into()))
    }

    pub fn integer(value: i64) -> Self {
        Self::new(value.to_string(), Datatype::Integer)
    }

    pub fn decimal(value: f64) -> Self {
        Self::new(value.to_string(), Datatype::Decimal)
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(value.to_string(), Datatype::Boolean)
    }

    /// xsd:gYear literal, always four digits
    pub fn year(value: i32) -> Self {
        Self::new(format!("{:04}", value), Datatype::GYear)
    }

    /// Language tag, if this is a language-tagged string
    pub fn language(&self) -> Option<&str> {
        match &self.datatype {
            Datatype::LangString(lang) => Some(lang),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.datatype {
            Datatype::String => write!(f, "{:?}", self.lexical),
            Datatype::LangString(lang) => write!(f, "{:?}@{}", self.lexical, lang),
            other => write!(f, "{:?}^^<{}>", self.lexical, other.as_iri()),
        }
    }
}

/// An RDF term
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// Absolute IRI
    Iri(String),
    /// Blank node label (without `_:`)
    Blank(String),
    /// Typed literal
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::Blank(label.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Blank(label) => write!(f, "_:{}", label),
            Term::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

/// A subject-predicate-object statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    /// IRI or blank node
    pub subject: Term,
    /// Predicate IRI
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: impl Into<String>, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_iri_roundtrip() {
        for dt in [
            Datatype::String,
            Datatype::Integer,
            Datatype::Decimal,
            Datatype::Boolean,
            Datatype::GYear,
        ] {
            assert_eq!(Datatype::from_iri(dt.as_iri()), dt);
        }
        let custom = Datatype::from_iri("http://example.org/dt");
        assert_eq!(custom, Datatype::Other("http://example.org/dt".to_string()));
    }

    #[test]
    fn test_year_literal_is_four_digits() {
        assert_eq!(Literal::year(1695).lexical, "1695");
        assert_eq!(Literal::year(650).lexical, "0650");
    }

    #[test]
    fn test_language_tag() {
        let lit = Literal::lang_string("Masjid", "id");
        assert_eq!(lit.language(), Some("id"));
        assert!(lit.datatype.is_textual());
        assert_eq!(Literal::string("x").language(), None);
    }

    #[test]
    fn test_triple_display() {
        let triple = Triple::new(
            Term::iri("http://example.org/a"),
            "http://example.org/p",
            Literal::integer(5),
        );
        assert_eq!(
            triple.to_string(),
            "<http://example.org/a> <http://example.org/p> \"5\"^^<http://www.w3.org/2001/XMLSchema#integer> ."
        );
    }
}
