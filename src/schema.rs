//! Schema Mapper - static field table and record ⇄ triple translation
//!
//! Every mapped field of a [`Site`] is a variant of the closed [`Field`]
//! enum. [`Field::spec`] binds each variant to its predicate, literal type
//! and multiplicity, so adding a field means extending the enum and the
//! compiler points at every match that needs a new arm.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::graph::TripleStore;
use crate::site::Site;
use crate::term::{Datatype, Literal, Term, Triple};
use crate::vocab::{rdf, rdfs, rj, schema};
use crate::{Error, Result};

/// A mapped site field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Address,
    Region,
    District,
    PostalCode,
    BuildingType,
    Religion,
    OpeningHours,
    Capacity,
    LandArea,
    Architect,
    FoundingYear,
    IsHeritage,
    HeritageCode,
    Transport,
    Latitude,
    Longitude,
    ImageUrl,
    Description,
}

/// How a field's literal is typed and coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    One,
    Many,
}

/// Predicate binding of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub predicate: &'static str,
    pub kind: ValueKind,
    pub multiplicity: Multiplicity,
}

impl FieldSpec {
    const fn one(predicate: &'static str, kind: ValueKind) -> Self {
        Self {
            predicate,
            kind,
            multiplicity: Multiplicity::One,
        }
    }
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::Name,
        Field::Address,
        Field::Region,
        Field::District,
        Field::PostalCode,
        Field::BuildingType,
        Field::Religion,
        Field::OpeningHours,
        Field::Capacity,
        Field::LandArea,
        Field::Architect,
        Field::FoundingYear,
        Field::IsHeritage,
        Field::HeritageCode,
        Field::Transport,
        Field::Latitude,
        Field::Longitude,
        Field::ImageUrl,
        Field::Description,
    ];

    pub fn spec(self) -> FieldSpec {
        use ValueKind::*;
        match self {
            Field::Name => FieldSpec::one(rj::NAMA, Text),
            Field::Address => FieldSpec::one(rj::ALAMAT, Text),
            Field::Region => FieldSpec::one(rj::WILAYAH, Text),
            Field::District => FieldSpec::one(rj::KECAMATAN, Text),
            Field::PostalCode => FieldSpec::one(rj::KODE_POS, Text),
            Field::BuildingType => FieldSpec::one(rj::TIPE, Text),
            Field::Religion => FieldSpec::one(rj::AGAMA, Text),
            Field::OpeningHours => FieldSpec::one(rj::JAM_BUKA, Text),
            Field::Capacity => FieldSpec::one(rj::KAPASITAS, Integer),
            Field::LandArea => FieldSpec::one(rj::LUAS, Text),
            Field::Architect => FieldSpec::one(rj::ARSITEK, Text),
            Field::FoundingYear => FieldSpec::one(rj::TAHUN_BERDIRI, Year),
            Field::IsHeritage => FieldSpec::one(rj::IS_HERITAGE, Boolean),
            Field::HeritageCode => FieldSpec::one(rj::HERITAGE_CODE, Text),
            Field::Transport => FieldSpec {
                predicate: rj::TRANSPORT_TERDEKAT,
                kind: Text,
                multiplicity: Multiplicity::Many,
            },
            Field::Latitude => FieldSpec::one(schema::LATITUDE, Decimal),
            Field::Longitude => FieldSpec::one(schema::LONGITUDE, Decimal),
            Field::ImageUrl => FieldSpec::one(schema::IMAGE, Text),
            Field::Description => FieldSpec::one(schema::DESCRIPTION, Text),
        }
    }

    /// Form / JSON key
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "nama",
            Field::Address => "alamat",
            Field::Region => "wilayah",
            Field::District => "kecamatan",
            Field::PostalCode => "kode_pos",
            Field::BuildingType => "tipe",
            Field::Religion => "agama",
            Field::OpeningHours => "jam_buka",
            Field::Capacity => "kapasitas",
            Field::LandArea => "luas",
            Field::Architect => "arsitek",
            Field::FoundingYear => "tahun_berdiri",
            Field::IsHeritage => "is_heritage",
            Field::HeritageCode => "heritage_code",
            Field::Transport => "transport_terdekat",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::ImageUrl => "gambar_url",
            Field::Description => "deskripsi",
        }
    }

    /// English alias accepted wherever a field name is parsed
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Address => "address",
            Field::Region => "region",
            Field::District => "district",
            Field::PostalCode => "postal_code",
            Field::BuildingType => "building_type",
            Field::Religion => "religion",
            Field::OpeningHours => "opening_hours",
            Field::Capacity => "capacity",
            Field::LandArea => "land_area",
            Field::Architect => "architect",
            Field::FoundingYear => "founding_year",
            Field::IsHeritage => "heritage",
            Field::HeritageCode => "heritage_code",
            Field::Transport => "transport",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::ImageUrl => "image_url",
            Field::Description => "description",
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Field::ALL
            .into_iter()
            .find(|f| f.key() == wanted || f.as_str() == wanted)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Year(i32),
    List(Vec<String>),
}

impl FieldValue {
    /// Text forms used for facets, one per list element
    pub fn display_values(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => vec![s.clone()],
            FieldValue::Integer(n) => vec![n.to_string()],
            FieldValue::Decimal(d) => vec![d.to_string()],
            FieldValue::Boolean(b) => vec![b.to_string()],
            FieldValue::Year(y) => vec![format!("{:04}", y)],
            FieldValue::List(items) => items.clone(),
        }
    }

    /// Literals to store for this value. Empty text yields none.
    fn to_literals(&self) -> Vec<Literal> {
        match self {
            FieldValue::Text(s) if s.trim().is_empty() => Vec::new(),
            FieldValue::Text(s) => vec![Literal::string(s.as_str())],
            FieldValue::Integer(n) => vec![Literal::integer(*n)],
            FieldValue::Decimal(d) => vec![Literal::decimal(*d)],
            FieldValue::Boolean(b) => vec![Literal::boolean(*b)],
            FieldValue::Year(y) => vec![Literal::year(*y)],
            FieldValue::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(Literal::string)
                .collect(),
        }
    }
}

impl ValueKind {
    fn expected(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::Decimal => "decimal",
            ValueKind::Boolean => "boolean",
            ValueKind::Year => "year",
        }
    }

    /// Parse submitted text. `raw` is already trimmed and non-empty.
    pub fn parse_input(self, field: Field, raw: &str) -> Result<FieldValue> {
        let fail = || Error::coercion(field.key(), raw, self.expected());
        let value = match self {
            ValueKind::Text => FieldValue::Text(raw.to_string()),
            ValueKind::Integer => raw.parse().map(FieldValue::Integer).map_err(|_| fail())?,
            ValueKind::Decimal => raw.parse().map(FieldValue::Decimal).map_err(|_| fail())?,
            ValueKind::Boolean => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => FieldValue::Boolean(true),
                "0" | "false" | "off" | "no" => FieldValue::Boolean(false),
                _ => return Err(fail()),
            },
            ValueKind::Year => raw.parse().map(FieldValue::Year).map_err(|_| fail())?,
        };
        self.check(field, &value).map_err(|_| fail())?;
        Ok(value)
    }

    /// Range check for values about to be written. Years must fit the
    /// four-digit `xsd:gYear` form and decimals must be finite, otherwise
    /// they would not read back unchanged.
    pub fn check(self, field: Field, value: &FieldValue) -> Result<()> {
        let in_range = match (self, value) {
            (ValueKind::Year, FieldValue::Year(year)) => (0..=9999).contains(year),
            (ValueKind::Decimal, FieldValue::Decimal(d)) => d.is_finite(),
            _ => true,
        };
        if in_range {
            Ok(())
        } else {
            Err(Error::coercion(
                field.key(),
                value.display_values().join(", "),
                self.expected(),
            ))
        }
    }

    /// Coerce a stored literal back to a value.
    ///
    /// Booleans compare against "true" ignoring case and never fail. Years
    /// use only the first four characters so `"1978-01-01"` and `"1978Z"`
    /// both read as 1978.
    pub fn from_literal(self, field: Field, literal: &Literal) -> Result<FieldValue> {
        let lexical = literal.lexical.trim();
        let fail = || Error::coercion(field.key(), lexical, self.expected());
        match self {
            ValueKind::Text => Ok(FieldValue::Text(literal.lexical.clone())),
            ValueKind::Boolean => Ok(FieldValue::Boolean(lexical.eq_ignore_ascii_case("true"))),
            ValueKind::Integer => lexical.parse().map(FieldValue::Integer).map_err(|_| fail()),
            ValueKind::Decimal => lexical.parse().map(FieldValue::Decimal).map_err(|_| fail()),
            ValueKind::Year => lexical
                .get(..4)
                .and_then(|digits| digits.parse().ok())
                .map(FieldValue::Year)
                .ok_or_else(fail),
        }
    }
}

/// Translates between [`Site`] records and triples.
#[derive(Debug, Clone)]
pub struct SiteMapper {
    base_iri: String,
}

impl Default for SiteMapper {
    fn default() -> Self {
        Self::new(rj::NS)
    }
}

impl SiteMapper {
    pub fn new(base_iri: impl Into<String>) -> Self {
        Self {
            base_iri: base_iri.into(),
        }
    }

    pub fn base_iri(&self) -> &str {
        &self.base_iri
    }

    /// Subject IRI for a site id
    pub fn subject(&self, id: &str) -> Term {
        Term::iri(format!("{}{}", self.base_iri, id))
    }

    /// Site id of a subject, if it lives under the base IRI
    pub fn local_id<'t>(&self, subject: &'t Term) -> Option<&'t str> {
        subject
            .as_iri()
            .and_then(|iri| iri.strip_prefix(self.base_iri.as_str()))
            .filter(|id| !id.is_empty())
    }

    /// The type-marker statement's object
    pub fn type_marker() -> Term {
        Term::iri(rj::TEMPAT_IBADAH)
    }

    /// True if the site's type marker is present
    pub fn exists(&self, store: &TripleStore, id: &str) -> bool {
        store.contains(&self.subject(id), rdf::TYPE, &Self::type_marker())
    }

    /// Ids of every site in the store
    pub fn ids<'s>(&self, store: &'s TripleStore) -> Vec<&'s str> {
        store
            .subjects_of_type(rj::TEMPAT_IBADAH)
            .into_iter()
            .filter_map(|subject| self.local_id(subject))
            .collect()
    }

    /// Every present field of `site` passes [`ValueKind::check`].
    pub fn validate(site: &Site) -> Result<()> {
        for field in Field::ALL {
            if let Some(value) = site.value(field) {
                field.spec().kind.check(field, &value)?;
            }
        }
        Ok(())
    }

    /// Statements describing `site`, type marker and label first.
    pub fn to_triples(&self, site: &Site) -> Vec<Triple> {
        let subject = self.subject(&site.id);
        let mut triples = vec![Triple::new(subject.clone(), rdf::TYPE, Self::type_marker())];

        if let Some(name) = site.name.as_deref().filter(|n| !n.trim().is_empty()) {
            triples.push(Triple::new(subject.clone(), rdfs::LABEL, Literal::string(name)));
        }

        for field in Field::ALL {
            let Some(value) = site.value(field) else {
                continue;
            };
            let predicate = field.spec().predicate;
            triples.extend(
                value
                    .to_literals()
                    .into_iter()
                    .map(|lit| Triple::new(subject.clone(), predicate, lit)),
            );
        }
        triples
    }

    /// Rebuild a site from the store. `Ok(None)` if it has no type marker.
    pub fn read(&self, store: &TripleStore, id: &str) -> Result<Option<Site>> {
        if !self.exists(store, id) {
            return Ok(None);
        }
        let subject = self.subject(id);

        let mut values = BTreeMap::new();
        for field in Field::ALL {
            let spec = field.spec();
            let mut literals = store
                .values(&subject, spec.predicate)
                .iter()
                .filter_map(Term::as_literal);

            let value = match spec.multiplicity {
                Multiplicity::Many => {
                    let items: Vec<String> = literals.map(|lit| lit.lexical.clone()).collect();
                    (!items.is_empty()).then_some(FieldValue::List(items))
                }
                Multiplicity::One => match literals.next() {
                    Some(lit) => Some(spec.kind.from_literal(field, lit)?),
                    None => None,
                },
            };
            if let Some(value) = value {
                values.insert(field, value);
            }
        }

        Site::from_values(id, values).map(Some)
    }

    /// Remove everything but the type marker from a site's subject
    pub fn clear_fields(&self, store: &mut TripleStore, id: &str) -> usize {
        store.retain_predicates(&self.subject(id), |predicate| predicate == rdf::TYPE)
    }

    /// Literal type a field is written with
    pub fn datatype(field: Field) -> Datatype {
        match field.spec().kind {
            ValueKind::Text => Datatype::String,
            ValueKind::Integer => Datatype::Integer,
            ValueKind::Decimal => Datatype::Decimal,
            ValueKind::Boolean => Datatype::Boolean,
            ValueKind::Year => Datatype::GYear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Coordinates;

    fn lit(lexical: &str, datatype: Datatype) -> Literal {
        Literal::new(lexical, datatype)
    }

    fn sample() -> Site {
        Site {
            id: "GerejaSion".to_string(),
            name: Some("GEREJA SION".to_string()),
            region: Some("JakartaBarat".to_string()),
            religion: Some("KristenProtestan".to_string()),
            capacity: Some(400),
            founding_year: Some(1695),
            is_heritage: true,
            heritage_code: Some("KB000344".to_string()),
            transport: vec!["Stasiun Jakarta Kota (KRL)".to_string(), "Halte Kota".to_string()],
            coordinates: Some(Coordinates {
                latitude: -6.137633,
                longitude: 106.813717,
            }),
            ..Site::default()
        }
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("agama".parse::<Field>().unwrap(), Field::Religion);
        assert_eq!("religion".parse::<Field>().unwrap(), Field::Religion);
        assert_eq!("Wilayah".parse::<Field>().unwrap(), Field::Region);
        assert!(matches!("colour".parse::<Field>(), Err(Error::UnknownField(_))));
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_predicates_are_unique() {
        let mut predicates: Vec<_> = Field::ALL.iter().map(|f| f.spec().predicate).collect();
        predicates.sort();
        predicates.dedup();
        assert_eq!(predicates.len(), Field::ALL.len());
    }

    #[test]
    fn test_to_triples_shape() {
        let mapper = SiteMapper::default();
        let site = sample();
        let triples = mapper.to_triples(&site);

        assert_eq!(triples[0].predicate, rdf::TYPE);
        assert_eq!(triples[1].predicate, rdfs::LABEL);
        let transport = triples
            .iter()
            .filter(|t| t.predicate == rj::TRANSPORT_TERDEKAT)
            .count();
        assert_eq!(transport, 2);
        let year = triples.iter().find(|t| t.predicate == rj::TAHUN_BERDIRI).unwrap();
        assert_eq!(year.object, Term::Literal(Literal::year(1695)));
        assert!(triples.iter().all(|t| t.predicate != rj::ARSITEK));
    }

    #[test]
    fn test_read_round_trip() {
        let mapper = SiteMapper::default();
        let site = sample();
        let mut store = TripleStore::new();
        store.extend(mapper.to_triples(&site));

        assert_eq!(mapper.read(&store, "GerejaSion").unwrap(), Some(site));
        assert_eq!(mapper.read(&store, "Missing").unwrap(), None);
    }

    #[test]
    fn test_stray_triples_without_marker_are_not_a_site() {
        let mapper = SiteMapper::default();
        let mut store = TripleStore::new();
        store.insert(Triple::new(mapper.subject("Ghost"), rj::NAMA, Literal::string("Ghost")));

        assert!(!mapper.exists(&store, "Ghost"));
        assert_eq!(mapper.read(&store, "Ghost").unwrap(), None);
        assert!(mapper.ids(&store).is_empty());
    }

    #[test]
    fn test_year_reads_first_four_characters() {
        let field = Field::FoundingYear;
        let kind = field.spec().kind;
        for lexical in ["1978", "1978-01-01", "1978Z"] {
            assert_eq!(
                kind.from_literal(field, &lit(lexical, Datatype::GYear)).unwrap(),
                FieldValue::Year(1978)
            );
        }
        assert!(matches!(
            kind.from_literal(field, &lit("19", Datatype::GYear)),
            Err(Error::Coercion { field: "tahun_berdiri", .. })
        ));
    }

    #[test]
    fn test_boolean_reads_case_insensitively() {
        let kind = ValueKind::Boolean;
        let read = |s| kind.from_literal(Field::IsHeritage, &lit(s, Datatype::Boolean)).unwrap();
        assert_eq!(read("TRUE"), FieldValue::Boolean(true));
        assert_eq!(read("true"), FieldValue::Boolean(true));
        assert_eq!(read("1"), FieldValue::Boolean(false));
        assert_eq!(read("false"), FieldValue::Boolean(false));
    }

    #[test]
    fn test_stored_non_numeric_capacity_is_coercion_error() {
        let mapper = SiteMapper::default();
        let mut store = TripleStore::new();
        let subject = mapper.subject("Bad");
        store.insert(Triple::new(subject.clone(), rdf::TYPE, SiteMapper::type_marker()));
        store.insert(Triple::new(subject.clone(), rj::NAMA, Literal::string("Bad")));
        store.insert(Triple::new(subject, rj::KAPASITAS, lit("lots", Datatype::Integer)));

        let err = mapper.read(&store, "Bad").unwrap_err();
        assert!(matches!(
            err,
            Error::Coercion { field: "kapasitas", ref value, expected: "integer" } if value == "lots"
        ));
    }

    #[test]
    fn test_validate_rejects_unwritable_values() {
        let mut site = Site::new("MasjidTua", "Masjid Tua");
        site.founding_year = Some(650);
        assert!(SiteMapper::validate(&site).is_ok());

        for year in [12345, -1200] {
            site.founding_year = Some(year);
            let err = SiteMapper::validate(&site).unwrap_err();
            assert!(matches!(
                err,
                Error::Coercion { field: "tahun_berdiri", ref value, expected: "year" }
                    if *value == year.to_string()
            ));
        }

        site.founding_year = None;
        site.coordinates = Some(Coordinates {
            latitude: f64::INFINITY,
            longitude: 106.8,
        });
        assert!(matches!(
            SiteMapper::validate(&site),
            Err(Error::Coercion { field: "latitude", .. })
        ));
    }

    #[test]
    fn test_parse_input_rules() {
        let cap = Field::Capacity;
        assert_eq!(ValueKind::Integer.parse_input(cap, "800").unwrap(), FieldValue::Integer(800));
        assert!(ValueKind::Integer.parse_input(cap, "eight hundred").is_err());
        assert!(ValueKind::Year.parse_input(Field::FoundingYear, "12345").is_err());
        assert!(ValueKind::Decimal.parse_input(Field::Latitude, "NaN").is_err());
        assert_eq!(
            ValueKind::Boolean.parse_input(Field::IsHeritage, "On").unwrap(),
            FieldValue::Boolean(true)
        );
        assert!(ValueKind::Boolean.parse_input(Field::IsHeritage, "maybe").is_err());
    }

    #[test]
    fn test_clear_fields_keeps_marker() {
        let mapper = SiteMapper::default();
        let mut store = TripleStore::new();
        store.extend(mapper.to_triples(&sample()));
        let total = store.len();

        let removed = mapper.clear_fields(&mut store, "GerejaSion");
        assert_eq!(removed, total - 1);
        assert_eq!(store.len(), 1);
        assert!(mapper.exists(&store, "GerejaSion"));
    }

    #[test]
    fn test_custom_base_iri() {
        let mapper = SiteMapper::new("http://example.org/site/");
        let subject = mapper.subject("X1");
        assert_eq!(subject, Term::iri("http://example.org/site/X1"));
        assert_eq!(mapper.local_id(&subject), Some("X1"));
        assert_eq!(mapper.local_id(&Term::iri("http://other.org/X1")), None);
        assert_eq!(SiteMapper::datatype(Field::FoundingYear), Datatype::GYear);
    }
}
