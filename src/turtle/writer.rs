//! Turtle serialization of a [`TripleStore`].
//!
//! Output is deterministic: prefixes in a fixed order, subjects sorted,
//! `rdf:type` first as `a`, remaining predicates sorted, and objects in the
//! order they were inserted. Every literal that is not a plain or
//! language-tagged string carries an explicit `^^` datatype.

use std::fmt::Write as FmtWrite;

use super::chars::{is_iri_char, is_simple_local_name};
use crate::graph::TripleStore;
use crate::term::{Datatype, Literal, Term};
use crate::vocab::{STANDARD_PREFIXES, rdf};

/// Header comment written above the prefix block.
pub const HEADER: &str = "\
# Religi Jakarta site graph
# Managed by `religi`. Manual edits are read back on the next start.\n";

/// Render the whole store as a Turtle document.
pub fn write_turtle(store: &TripleStore) -> String {
    let mut out = String::with_capacity(256 + store.len() * 64);
    out.push_str(HEADER);
    for (prefix, namespace) in STANDARD_PREFIXES {
        // Writing to a String cannot fail
        let _ = writeln!(out, "@prefix {}: <{}> .", prefix, namespace);
    }

    for subject in store.subjects() {
        out.push('\n');
        out.push_str(&subject_block(store, subject));
    }
    out
}

/// Render one subject and all of its statements.
fn subject_block(store: &TripleStore, subject: &Term) -> String {
    let mut s = String::with_capacity(512);
    s.push_str(&write_term(subject));

    let types = store.values(subject, rdf::TYPE);
    if types.is_empty() {
        s.push('\n');
    } else {
        let classes: Vec<String> = types.iter().map(write_term).collect();
        let _ = writeln!(s, " a {} ;", classes.join(", "));
    }

    for (predicate, object) in store.predicate_objects(subject) {
        if predicate == rdf::TYPE {
            continue;
        }
        let _ = writeln!(s, "    {} {} ;", write_iri(predicate), write_term(object));
    }

    // Close the block on the last predicate line
    if s.ends_with(" ;\n") {
        s.truncate(s.len() - 3);
        s.push_str(" .\n");
    } else {
        // A subject with no statements never reaches the store, but keep the
        // output parseable if it ever does
        s.push_str("    .\n");
    }
    s
}

fn write_term(term: &Term) -> String {
    match term {
        Term::Iri(iri) => write_iri(iri),
        Term::Blank(label) => format!("_:{}", label),
        Term::Literal(lit) => write_literal(lit),
    }
}

fn write_literal(lit: &Literal) -> String {
    let quoted = format!("\"{}\"", escape_turtle_string(&lit.lexical));
    match &lit.datatype {
        Datatype::String => quoted,
        Datatype::LangString(lang) => format!("{}@{}", quoted, lang),
        other => format!("{}^^{}", quoted, write_iri(other.as_iri())),
    }
}

/// Write an IRI in prefixed form when a standard namespace matches and the
/// remainder is a safe local name, otherwise as `<...>`.
pub fn write_iri(iri: &str) -> String {
    let compact = STANDARD_PREFIXES
        .iter()
        .filter_map(|(prefix, namespace)| {
            iri.strip_prefix(namespace)
                .filter(|local| is_simple_local_name(local))
                .map(|local| (namespace.len(), *prefix, local))
        })
        .max_by_key(|(len, _, _)| *len);

    match compact {
        Some((_, prefix, local)) => format!("{}:{}", prefix, local),
        None => format!("<{}>", escape_iri(iri)),
    }
}

/// Escape characters that may not appear raw inside `<...>`
fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        if is_iri_char(c) {
            out.push(c);
        } else {
            push_unicode_escape(&mut out, c);
        }
    }
    out
}

/// Escape a string for use inside a double-quoted Turtle literal.
pub fn escape_turtle_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

fn push_unicode_escape(out: &mut String, c: char) {
    let code = c as u32;
    if code <= 0xFFFF {
        let _ = write!(out, "\\u{:04X}", code);
    } else {
        let _ = write!(out, "\\U{:08X}", code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Triple;
    use crate::turtle::parse;
    use crate::vocab::{rj, schema};

    fn site(local: &str) -> Term {
        Term::iri(format!("{}{}", rj::NS, local))
    }

    #[test]
    fn test_write_iri_compaction() {
        assert_eq!(write_iri(rj::NAMA), "rj:nama");
        assert_eq!(write_iri(schema::LATITUDE), "schema:latitude");
        assert_eq!(write_iri("http://example.org/x"), "<http://example.org/x>");
        assert_eq!(
            write_iri(&format!("{}Test Mosque", rj::NS)),
            format!("<{}Test\\u0020Mosque>", rj::NS)
        );
    }

    #[test]
    fn test_escape_turtle_string() {
        assert_eq!(escape_turtle_string("a\"b"), "a\\\"b");
        assert_eq!(escape_turtle_string("line\nbreak"), "line\\nbreak");
        assert_eq!(escape_turtle_string("back\\slash"), "back\\\\slash");
        assert_eq!(escape_turtle_string("bell\u{7}"), "bell\\u0007");
    }

    #[test]
    fn test_block_layout() {
        let mut store = TripleStore::new();
        let s = site("Istiqlal");
        store.insert(Triple::new(s.clone(), rj::NAMA, Literal::string("Masjid Istiqlal")));
        store.insert(Triple::new(s.clone(), rdf::TYPE, Term::iri(rj::TEMPAT_IBADAH)));
        store.insert(Triple::new(s.clone(), rj::KAPASITAS, Literal::integer(200000)));

        let ttl = write_turtle(&store);
        assert!(ttl.starts_with("# Religi Jakarta site graph"));
        assert!(ttl.contains("@prefix rj: <http://www.semanticweb.org/religion/jakarta#> ."));
        assert!(ttl.contains("rj:Istiqlal a rj:TempatIbadah ;\n"));
        assert!(ttl.contains("    rj:kapasitas \"200000\"^^xsd:integer ;\n"));
        assert!(ttl.ends_with("    rj:nama \"Masjid Istiqlal\" .\n"));
    }

    #[test]
    fn test_written_graph_reads_back_identically() {
        let mut store = TripleStore::new();
        let s = site("Katedral");
        store.insert(Triple::new(s.clone(), rdf::TYPE, Term::iri(rj::TEMPAT_IBADAH)));
        store.insert(Triple::new(
            s.clone(),
            schema::DESCRIPTION,
            Literal::string("Gereja \"Katedral\"\nJakarta"),
        ));
        store.insert(Triple::new(s.clone(), rj::TRANSPORT_TERDEKAT, Literal::string("Stasiun Juanda")));
        store.insert(Triple::new(s.clone(), rj::TRANSPORT_TERDEKAT, Literal::string("Halte Istiqlal")));
        store.insert(Triple::new(s.clone(), schema::LATITUDE, Literal::decimal(-6.1702)));
        store.insert(Triple::new(s.clone(), rj::TAHUN_BERDIRI, Literal::year(1901)));
        store.insert(Triple::new(s.clone(), rj::IS_HERITAGE, Literal::boolean(true)));
        store.insert(Triple::new(s.clone(), rj::NAMA, Literal::lang_string("Katedral", "id")));
        store.insert(Triple::new(
            Term::blank("b0"),
            rj::NAMA,
            Literal::new("x", Datatype::Other("http://example.org/dt".to_string())),
        ));

        let ttl = write_turtle(&store);
        let reread = parse(&ttl).unwrap();
        assert_eq!(reread, store);

        let transport: Vec<_> = reread
            .values(&s, rj::TRANSPORT_TERDEKAT)
            .iter()
            .filter_map(|t| t.as_literal().map(|l| l.lexical.as_str()))
            .collect();
        assert_eq!(transport, vec!["Stasiun Juanda", "Halte Istiqlal"]);
    }

    #[test]
    fn test_empty_store_is_prefixes_only() {
        let ttl = write_turtle(&TripleStore::new());
        assert_eq!(parse(&ttl).unwrap().len(), 0);
        assert_eq!(ttl.matches("@prefix").count(), STANDARD_PREFIXES.len());
    }
}
