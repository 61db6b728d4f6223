//! Initial directory content, inserted when a store is empty.

use crate::site::{Coordinates, Site};

#[allow(clippy::too_many_arguments)]
fn site(
    id: &str,
    name: &str,
    address: &str,
    region: &str,
    district: &str,
    postal_code: &str,
    building_type: &str,
    religion: &str,
    opening_hours: &str,
    capacity: i64,
    land_area: &str,
    architect: Option<&str>,
    founding_year: i32,
    heritage_code: Option<&str>,
    is_heritage: bool,
    transport: &str,
    (latitude, longitude): (f64, f64),
    image_url: &str,
    description: &str,
) -> Site {
    Site {
        id: id.to_string(),
        name: Some(name.to_string()),
        address: Some(address.to_string()),
        region: Some(region.to_string()),
        district: Some(district.to_string()),
        postal_code: Some(postal_code.to_string()),
        building_type: Some(building_type.to_string()),
        religion: Some(religion.to_string()),
        opening_hours: Some(opening_hours.to_string()),
        capacity: Some(capacity),
        land_area: Some(land_area.to_string()),
        architect: architect.map(String::from),
        founding_year: Some(founding_year),
        is_heritage,
        heritage_code: heritage_code.map(String::from),
        transport: vec![transport.to_string()],
        coordinates: Some(Coordinates {
            latitude,
            longitude,
        }),
        image_url: Some(image_url.to_string()),
        description: Some(description.to_string()),
    }
}

/// The six sites the directory starts with
pub fn initial_sites() -> Vec<Site> {
    vec![
        site(
            "MasjidIstiqlal",
            "MASJID ISTIQLAL",
            "Jl. Taman Wijaya Kusuma No. 1",
            "JakartaPusat",
            "KecamatanSawahBesar",
            "10710",
            "Mosque",
            "Islam",
            "04:00 - 22:00 WIB",
            200000,
            "9.5 Hektar",
            Some("Friedrich Silaban"),
            1978,
            None,
            true,
            "Stasiun Juanda (KRL)",
            (-6.170008, 106.831009),
            "/static/images/istiqlal.jpg",
            "Masjid Istiqlal adalah masjid terbesar di Asia Tenggara dan menjadi simbol kerukunan \
             beragama di Indonesia. Dibangun atas prakarsa Presiden Soekarno dan dirancang oleh \
             arsitek Kristen Protestan, Friedrich Silaban, sebagai tanda toleransi antar umat beragama.",
        ),
        site(
            "MasjidAgungAlAzhar",
            "MASJID AGUNG AL-AZHAR",
            "Jl. Sisingamangaraja No. 1",
            "JakartaSelatan",
            "KecamatanKebayoranBaru",
            "12110",
            "Mosque",
            "Islam",
            "04:00 - 22:00 WIB",
            15000,
            "2.5 Hektar",
            Some("Buya Hamka (Inisiator)"),
            1958,
            None,
            false,
            "Stasiun MRT ASEAN",
            (-6.234920731352565, 106.79910971785888),
            "/static/images/alazhar.jpg",
            "Masjid Agung Al-Azhar adalah salah satu masjid bersejarah di Jakarta yang didirikan \
             atas inisiatif Buya Hamka. Nama Al-Azhar diberikan oleh Grand Syaikh Al-Azhar Mesir \
             sebagai tanda persaudaraan.",
        ),
        site(
            "GerejaKatedral",
            "GEREJA KATEDRAL JAKARTA",
            "Jl. Katedral No. 7B",
            "JakartaPusat",
            "KecamatanSawahBesar",
            "10710",
            "Church",
            "Katolik",
            "06:00 - 20:00 WIB",
            800,
            "0.5 Hektar",
            Some("Marius Hulswit"),
            1901,
            Some("KB000123"),
            true,
            "Halte TransJakarta Juanda",
            (-6.169516, 106.832194),
            "/static/images/katedral.jpg",
            "Gereja Katedral Jakarta atau Gereja Santa Maria Pelindung Diangkat Ke Surga adalah \
             gereja Katolik bergaya neo-gotik yang terletak di Jakarta Pusat, tepat berseberangan \
             dengan Masjid Istiqlal.",
        ),
        site(
            "GerejaSion",
            "GEREJA SION",
            "Jl. Pangeran Jayakarta No. 1",
            "JakartaBarat",
            "KecamatanTamanSari",
            "11110",
            "Church",
            "KristenProtestan",
            "08:00 - 17:00 WIB",
            400,
            "0.3 Hektar",
            None,
            1695,
            Some("KB000344"),
            true,
            "Stasiun Jakarta Kota (KRL)",
            (-6.137633, 106.813717),
            "https://upload.wikimedia.org/wikipedia/commons/thumb/9/9c/COLLECTIE_TROPENMUSEUM_De_Portugese_binnenkerk_te_Batavia_TMnr_60015850.jpg/800px-COLLECTIE_TROPENMUSEUM_De_Portugese_binnenkerk_te_Batavia_TMnr_60015850.jpg",
            "Gereja Sion atau GPIB Portugis adalah gereja tertua di Jakarta yang dibangun pada \
             masa VOC. Gereja ini awalnya bernama Gereja Portugis karena dibangun untuk jemaat \
             Portugis di Batavia.",
        ),
        site(
            "ViharaSinTekBio",
            "VIHARA SIN TEK BIO",
            "Jl. Pasar Baru Dalam No. 146",
            "JakartaPusat",
            "KecamatanSawahBesar",
            "10710",
            "Vihara",
            "Buddha",
            "06:00 - 18:00 WIB",
            500,
            "0.4 Hektar",
            None,
            1650,
            Some("KB005402"),
            true,
            "Halte TransJakarta Pasar Baru",
            (-6.163230, 106.844283),
            "https://upload.wikimedia.org/wikipedia/commons/thumb/5/5d/Jin_de_yuan_-_panoramio.jpg/800px-Jin_de_yuan_-_panoramio.jpg",
            "Vihara Sin Tek Bio atau Jin De Yuan adalah klenteng tertua di Jakarta yang dibangun \
             pada abad ke-17. Vihara ini merupakan tempat ibadah bagi umat Buddha dan Konghucu.",
        ),
        site(
            "PuraAdityaJaya",
            "PURA ADITYA JAYA",
            "Jl. Daksinapati Raya No. 10",
            "JakartaTimur",
            "KecamatanPuloGadung",
            "13220",
            "Temple",
            "Hindu",
            "08:00 - 16:00 WIB",
            300,
            "0.6 Hektar",
            None,
            1972,
            None,
            false,
            "Halte TransJakarta Velodrome",
            (-6.191284, 106.896273),
            "https://upload.wikimedia.org/wikipedia/commons/thumb/c/cd/Pura_Aditya_Jaya_%28Rawamangun%2C_Jakarta%29.jpg/800px-Pura_Aditya_Jaya_%28Rawamangun%2C_Jakarta%29.jpg",
            "Pura Aditya Jaya adalah pura Hindu terbesar di Jakarta yang terletak di kawasan \
             Rawamangun. Pura ini menjadi pusat kegiatan keagamaan umat Hindu di ibukota.",
        ),
    ]
}
