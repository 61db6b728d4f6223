//! Vocabulary IRIs used by the site graph
//!
//! Constants are organized by vocabulary:
//! - `rdf`, `rdfs`, `xsd` - W3C vocabularies
//! - `schema` - schema.org terms used for geo, image and description
//! - `rj` - the Religi Jakarta namespace (class and site properties)

/// RDF vocabulary constants
pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// RDFS vocabulary constants
pub mod rdfs {
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
}

/// XSD vocabulary constants
pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const G_YEAR: &str = "http://www.w3.org/2001/XMLSchema#gYear";
}

/// schema.org terms
pub mod schema {
    pub const NS: &str = "http://schema.org/";

    pub const LATITUDE: &str = "http://schema.org/latitude";
    pub const LONGITUDE: &str = "http://schema.org/longitude";
    pub const IMAGE: &str = "http://schema.org/image";
    pub const DESCRIPTION: &str = "http://schema.org/description";
}

/// Religi Jakarta namespace
pub mod rj {
    pub const NS: &str = "http://www.semanticweb.org/religion/jakarta#";

    // Classes
    pub const TEMPAT_IBADAH: &str = "http://www.semanticweb.org/religion/jakarta#TempatIbadah";

    // Properties
    pub const NAMA: &str = "http://www.semanticweb.org/religion/jakarta#nama";
    pub const ALAMAT: &str = "http://www.semanticweb.org/religion/jakarta#alamat";
    pub const WILAYAH: &str = "http://www.semanticweb.org/religion/jakarta#wilayah";
    pub const KECAMATAN: &str = "http://www.semanticweb.org/religion/jakarta#kecamatan";
    pub const KODE_POS: &str = "http://www.semanticweb.org/religion/jakarta#kodePos";
    pub const TIPE: &str = "http://www.semanticweb.org/religion/jakarta#tipe";
    pub const AGAMA: &str = "http://www.semanticweb.org/religion/jakarta#agama";
    pub const JAM_BUKA: &str = "http://www.semanticweb.org/religion/jakarta#jamBuka";
    pub const KAPASITAS: &str = "http://www.semanticweb.org/religion/jakarta#kapasitas";
    pub const LUAS: &str = "http://www.semanticweb.org/religion/jakarta#luas";
    pub const ARSITEK: &str = "http://www.semanticweb.org/religion/jakarta#arsitek";
    pub const TAHUN_BERDIRI: &str = "http://www.semanticweb.org/religion/jakarta#tahunBerdiri";
    pub const IS_HERITAGE: &str = "http://www.semanticweb.org/religion/jakarta#isHeritage";
    pub const HERITAGE_CODE: &str = "http://www.semanticweb.org/religion/jakarta#heritageCode";
    pub const TRANSPORT_TERDEKAT: &str =
        "http://www.semanticweb.org/religion/jakarta#transportTerdekat";
}

/// Prefixes written at the top of every serialized graph, in output order.
pub const STANDARD_PREFIXES: [(&str, &str); 5] = [
    ("rdf", rdf::NS),
    ("rdfs", rdfs::NS),
    ("xsd", xsd::NS),
    ("schema", schema::NS),
    ("rj", rj::NS),
];
