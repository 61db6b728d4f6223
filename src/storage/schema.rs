//! Database schema definitions

/// SQL to create the sites table
pub const CREATE_SITES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sites (
    id TEXT PRIMARY KEY,
    nama TEXT NOT NULL,
    alamat TEXT,
    wilayah TEXT,
    kecamatan TEXT,
    kode_pos TEXT,
    tipe TEXT,
    agama TEXT,
    jam_buka TEXT,
    kapasitas INTEGER,
    luas TEXT,
    arsitek TEXT,
    tahun_berdiri INTEGER,
    is_heritage INTEGER NOT NULL DEFAULT 0,
    heritage_code TEXT,
    transport_terdekat TEXT,
    latitude REAL,
    longitude REAL,
    gambar_url TEXT,
    deskripsi TEXT
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_sites_nama ON sites(nama)",
    "CREATE INDEX IF NOT EXISTS idx_sites_wilayah ON sites(wilayah)",
    "CREATE INDEX IF NOT EXISTS idx_sites_agama ON sites(agama)",
];

/// Column list shared by every SELECT and INSERT, in row order
pub const SITE_COLUMNS: &str = "id, nama, alamat, wilayah, kecamatan, kode_pos, tipe, agama, \
     jam_buka, kapasitas, luas, arsitek, tahun_berdiri, is_heritage, heritage_code, \
     transport_terdekat, latitude, longitude, gambar_url, deskripsi";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_SITES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
