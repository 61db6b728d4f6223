//! Triple Store - In-memory statement set backing the site graph
//!
//! Statements are indexed subject → predicate → objects. Objects under one
//! subject/predicate keep their insertion order and are de-duplicated, so a
//! multi-valued field written in order reads back in the same order after a
//! flush/load cycle.

use std::collections::BTreeMap;
use crate::term::{Term, Triple};
use crate::vocab::rdf;

/// In-memory triple store.
///
/// The store is `Clone` so mutations can be staged on a copy and swapped in
/// only after they have been persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripleStore {
    /// subject → predicate IRI → objects (insertion ordered, unique)
    statements: BTreeMap<Term, BTreeMap<String, Vec<Term>>>,
    /// Total number of statements
    len: usize,
}

impl TripleStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        let objects = self
            .statements
            .entry(triple.subject)
            .or_default()
            .entry(triple.predicate)
            .or_default();

        if objects.contains(&triple.object) {
            return false;
        }
        objects.push(triple.object);
        self.len += 1;
        true
    }

    /// Add every statement from an iterator, returning how many were new
    pub fn extend<I: IntoIterator<Item = Triple>>(&mut self, triples: I) -> usize {
        triples.into_iter().map(|t| self.insert(t)).filter(|added| *added).count()
    }

    /// Remove a single statement. Returns false if it was not present.
    pub fn remove(&mut self, subject: &Term, predicate: &str, object: &Term) -> bool {
        let Some(predicates) = self.statements.get_mut(subject) else {
            return false;
        };
        let Some(objects) = predicates.get_mut(predicate) else {
            return false;
        };
        let Some(pos) = objects.iter().position(|o| o == object) else {
            return false;
        };

        objects.remove(pos);
        self.len -= 1;

        if objects.is_empty() {
            predicates.remove(predicate);
        }
        if predicates.is_empty() {
            self.statements.remove(subject);
        }
        true
    }

    /// Check whether a specific statement exists
    pub fn contains(&self, subject: &Term, predicate: &str, object: &Term) -> bool {
        self.values(subject, predicate).contains(object)
    }

    /// First object for a subject + predicate
    pub fn value(&self, subject: &Term, predicate: &str) -> Option<&Term> {
        self.values(subject, predicate).first()
    }

    /// All objects for a subject + predicate, in insertion order
    pub fn values(&self, subject: &Term, predicate: &str) -> &[Term] {
        self.statements
            .get(subject)
            .and_then(|predicates| predicates.get(predicate))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All subjects that carry `rdf:type <class_iri>`, in subject order
    pub fn subjects_of_type(&self, class_iri: &str) -> Vec<&Term> {
        let class = Term::iri(class_iri);
        self.statements
            .iter()
            .filter(|(_, predicates)| {
                predicates
                    .get(rdf::TYPE)
                    .is_some_and(|types| types.contains(&class))
            })
            .map(|(subject, _)| subject)
            .collect()
    }

    /// All predicate-object pairs of a subject
    pub fn predicate_objects<'a>(&'a self, subject: &Term) -> Vec<(&'a str, &'a Term)> {
        self.statements
            .get(subject)
            .map(|predicates| {
                predicates
                    .iter()
                    .flat_map(|(p, objects)| objects.iter().map(move |o| (p.as_str(), o)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remove every statement of a subject, returning how many were removed
    pub fn remove_subject(&mut self, subject: &Term) -> usize {
        let removed = self
            .statements
            .remove(subject)
            .map(|predicates| predicates.values().map(Vec::len).sum())
            .unwrap_or(0);
        self.len -= removed;
        removed
    }

    /// Remove all statements of a subject whose predicate is not kept
    pub fn retain_predicates<F>(&mut self, subject: &Term, keep: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let Some(predicates) = self.statements.get_mut(subject) else {
            return 0;
        };

        let before: usize = predicates.values().map(Vec::len).sum();
        predicates.retain(|p, _| keep(p));
        let after: usize = predicates.values().map(Vec::len).sum();

        if predicates.is_empty() {
            self.statements.remove(subject);
        }
        self.len -= before - after;
        before - after
    }

    /// All subjects in order
    pub fn subjects(&self) -> impl Iterator<Item = &Term> {
        self.statements.keys()
    }

    /// Iterate all statements as (subject, predicate, object)
    pub fn iter(&self) -> impl Iterator<Item = (&Term, &str, &Term)> {
        self.statements.iter().flat_map(|(s, predicates)| {
            predicates
                .iter()
                .flat_map(move |(p, objects)| objects.iter().map(move |o| (s, p.as_str(), o)))
        })
    }

    /// Total number of statements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get statistics about the store
    pub fn stats(&self) -> GraphStats {
        let literals = self.iter().filter(|(_, _, o)| o.is_literal()).count();
        GraphStats {
            subjects: self.statements.len(),
            triples: self.len,
            literals,
        }
    }
}

/// Statistics about a triple store
#[derive(Debug, Clone)]
pub struct GraphStats {
    pub subjects: usize,
    pub triples: usize,
    pub literals: usize,
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Graph Statistics:")?;
        writeln!(f, "  Subjects: {}", self.subjects)?;
        writeln!(f, "  Triples: {} (literal objects: {})", self.triples, self.literals)
    }
}
