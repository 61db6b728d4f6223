//! Site record

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::{Field, FieldValue, Multiplicity};
use crate::{Error, Result};

/// A place of worship or heritage site.
///
/// Serialized with the directory's field keys (`nama`, `wilayah`, ...). The
/// coordinate pair is flattened into `latitude` / `longitude` and omitted
/// when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(rename = "nama", default)]
    pub name: Option<String>,
    #[serde(rename = "alamat", default)]
    pub address: Option<String>,
    #[serde(rename = "wilayah", default)]
    pub region: Option<String>,
    #[serde(rename = "kecamatan", default)]
    pub district: Option<String>,
    #[serde(rename = "kode_pos", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "tipe", default)]
    pub building_type: Option<String>,
    #[serde(rename = "agama", default)]
    pub religion: Option<String>,
    #[serde(rename = "jam_buka", default)]
    pub opening_hours: Option<String>,
    #[serde(rename = "kapasitas", default)]
    pub capacity: Option<i64>,
    #[serde(rename = "luas", default)]
    pub land_area: Option<String>,
    #[serde(rename = "arsitek", default)]
    pub architect: Option<String>,
    #[serde(rename = "tahun_berdiri", default)]
    pub founding_year: Option<i32>,
    #[serde(default)]
    pub is_heritage: bool,
    #[serde(default)]
    pub heritage_code: Option<String>,
    #[serde(rename = "transport_terdekat", default)]
    pub transport: Vec<String>,
    #[serde(flatten)]
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "gambar_url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "deskripsi", default)]
    pub description: Option<String>,
}

/// Decimal-degree position. Both parts are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Parse a combined `"lat, lng"` value
    pub fn parse(raw: &str) -> Result<Self> {
        let fail = || Error::coercion("koordinat", raw, "\"lat, lng\"");
        let mut parts = raw.split(',').map(str::trim);
        let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(fail());
        };
        let parse = |s: &str| s.parse::<f64>().ok().filter(|d| d.is_finite());
        match (parse(lat), parse(lng)) {
            (Some(latitude), Some(longitude)) => Ok(Self {
                latitude,
                longitude,
            }),
            _ => Err(fail()),
        }
    }
}

impl Site {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Typed value of a mapped field, `None` when absent
    pub fn value(&self, field: Field) -> Option<FieldValue> {
        let text = |s: &Option<String>| s.clone().map(FieldValue::Text);
        match field {
            Field::Name => text(&self.name),
            Field::Address => text(&self.address),
            Field::Region => text(&self.region),
            Field::District => text(&self.district),
            Field::PostalCode => text(&self.postal_code),
            Field::BuildingType => text(&self.building_type),
            Field::Religion => text(&self.religion),
            Field::OpeningHours => text(&self.opening_hours),
            Field::Capacity => self.capacity.map(FieldValue::Integer),
            Field::LandArea => text(&self.land_area),
            Field::Architect => text(&self.architect),
            Field::FoundingYear => self.founding_year.map(FieldValue::Year),
            Field::IsHeritage => Some(FieldValue::Boolean(self.is_heritage)),
            Field::HeritageCode => text(&self.heritage_code),
            Field::Transport => {
                (!self.transport.is_empty()).then(|| FieldValue::List(self.transport.clone()))
            }
            Field::Latitude => self.coordinates.map(|c| FieldValue::Decimal(c.latitude)),
            Field::Longitude => self.coordinates.map(|c| FieldValue::Decimal(c.longitude)),
            Field::ImageUrl => text(&self.image_url),
            Field::Description => text(&self.description),
        }
    }

    /// Assemble a site from typed values.
    ///
    /// Fails when only one coordinate is present or a value does not match
    /// its field's kind.
    pub fn from_values(id: impl Into<String>, mut values: BTreeMap<Field, FieldValue>) -> Result<Self> {
        let mut site = Site {
            id: id.into(),
            ..Site::default()
        };

        let latitude = values.remove(&Field::Latitude);
        let longitude = values.remove(&Field::Longitude);
        site.coordinates = match (latitude, longitude) {
            (Some(FieldValue::Decimal(latitude)), Some(FieldValue::Decimal(longitude))) => {
                Some(Coordinates {
                    latitude,
                    longitude,
                })
            }
            (None, None) => None,
            (Some(half), None) | (None, Some(half)) => {
                return Err(Error::coercion(
                    "koordinat",
                    half.display_values().join(""),
                    "latitude and longitude pair",
                ));
            }
            (Some(other), Some(_)) => {
                return Err(Error::coercion(
                    "koordinat",
                    other.display_values().join(""),
                    "decimal",
                ));
            }
        };

        for (field, value) in values {
            site.set(field, value)?;
        }
        Ok(site)
    }

    fn set(&mut self, field: Field, value: FieldValue) -> Result<()> {
        let mismatch =
            |v: &FieldValue| Error::coercion(field.key(), v.display_values().join(", "), "matching kind");
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Address => &mut self.address,
            Field::Region => &mut self.region,
            Field::District => &mut self.district,
            Field::PostalCode => &mut self.postal_code,
            Field::BuildingType => &mut self.building_type,
            Field::Religion => &mut self.religion,
            Field::OpeningHours => &mut self.opening_hours,
            Field::LandArea => &mut self.land_area,
            Field::Architect => &mut self.architect,
            Field::HeritageCode => &mut self.heritage_code,
            Field::ImageUrl => &mut self.image_url,
            Field::Description => &mut self.description,
            Field::Capacity => {
                let FieldValue::Integer(n) = value else {
                    return Err(mismatch(&value));
                };
                self.capacity = Some(n);
                return Ok(());
            }
            Field::FoundingYear => {
                let FieldValue::Year(y) = value else {
                    return Err(mismatch(&value));
                };
                self.founding_year = Some(y);
                return Ok(());
            }
            Field::IsHeritage => {
                let FieldValue::Boolean(b) = value else {
                    return Err(mismatch(&value));
                };
                self.is_heritage = b;
                return Ok(());
            }
            Field::Transport => {
                let FieldValue::List(items) = value else {
                    return Err(mismatch(&value));
                };
                self.transport = items;
                return Ok(());
            }
            // Paired in from_values
            Field::Latitude | Field::Longitude => return Err(mismatch(&value)),
        };
        let FieldValue::Text(text) = value else {
            return Err(mismatch(&value));
        };
        *slot = Some(text);
        Ok(())
    }

    /// Build a site from submitted form fields.
    ///
    /// Keys are field keys or their English aliases; unknown keys are
    /// ignored. Blank values count as absent. `id` and `nama` are required.
    /// Coordinates come from a combined `koordinat` value or from the
    /// separate `latitude` / `longitude` keys.
    pub fn from_form(form: &BTreeMap<String, String>) -> Result<Self> {
        let present = |key: &str| {
            form.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let id = present("id").ok_or(Error::MissingField("id"))?.to_string();

        let mut values = BTreeMap::new();
        for (key, raw) in form {
            let raw = raw.trim();
            if raw.is_empty() || key == "id" || key == "koordinat" {
                continue;
            }
            let Ok(field) = key.parse::<Field>() else {
                continue;
            };
            let spec = field.spec();
            let value = match spec.multiplicity {
                Multiplicity::Many => {
                    let items = split_list(raw);
                    if items.is_empty() {
                        continue;
                    }
                    FieldValue::List(items)
                }
                Multiplicity::One => spec.kind.parse_input(field, raw)?,
            };
            values.insert(field, value);
        }

        if let Some(raw) = present("koordinat") {
            let coordinates = Coordinates::parse(raw)?;
            values.insert(Field::Latitude, FieldValue::Decimal(coordinates.latitude));
            values.insert(Field::Longitude, FieldValue::Decimal(coordinates.longitude));
        }

        let site = Site::from_values(id, values)?;
        if site.name.is_none() {
            return Err(Error::MissingField("nama"));
        }
        Ok(site)
    }
}

/// Split a comma separated list, dropping blank entries
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_form_full() {
        let site = Site::from_form(&form(&[
            ("id", "TestMosque"),
            ("nama", "Test Mosque"),
            ("wilayah", "North"),
            ("kapasitas", " 1200 "),
            ("tahun_berdiri", "1978"),
            ("is_heritage", "on"),
            ("heritage_code", ""),
            ("koordinat", "-6.2, 106.8"),
            ("transport_terdekat", "Bus A, Bus B,, "),
            ("submit", "Simpan"),
        ]))
        .unwrap();

        assert_eq!(site.id, "TestMosque");
        assert_eq!(site.name.as_deref(), Some("Test Mosque"));
        assert_eq!(site.region.as_deref(), Some("North"));
        assert_eq!(site.capacity, Some(1200));
        assert_eq!(site.founding_year, Some(1978));
        assert!(site.is_heritage);
        assert_eq!(site.heritage_code, None);
        assert_eq!(site.transport, vec!["Bus A", "Bus B"]);
        assert_eq!(
            site.coordinates,
            Some(Coordinates {
                latitude: -6.2,
                longitude: 106.8
            })
        );
    }

    #[test]
    fn test_from_form_english_aliases() {
        let site = Site::from_form(&form(&[
            ("id", "X"),
            ("name", "X Church"),
            ("religion", "Katolik"),
            ("latitude", "-6.1"),
            ("longitude", "106.9"),
        ]))
        .unwrap();
        assert_eq!(site.religion.as_deref(), Some("Katolik"));
        assert!(site.coordinates.is_some());
        assert!(!site.is_heritage);
    }

    #[test]
    fn test_from_form_required_fields() {
        assert!(matches!(
            Site::from_form(&form(&[("nama", "No Id")])),
            Err(Error::MissingField("id"))
        ));
        assert!(matches!(
            Site::from_form(&form(&[("id", "NoName"), ("nama", "  ")])),
            Err(Error::MissingField("nama"))
        ));
    }

    #[test]
    fn test_from_form_non_numeric_capacity_is_coercion_error() {
        let err = Site::from_form(&form(&[
            ("id", "X"),
            ("nama", "X"),
            ("kapasitas", "banyak"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Coercion { field: "kapasitas", .. }));

        let err = Site::from_form(&form(&[
            ("id", "X"),
            ("nama", "X"),
            ("tahun_berdiri", "abad 17"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Coercion { field: "tahun_berdiri", .. }));
    }

    #[test]
    fn test_from_form_bad_coordinates() {
        let half = Site::from_form(&form(&[("id", "X"), ("nama", "X"), ("latitude", "-6.2")]));
        assert!(matches!(half, Err(Error::Coercion { field: "koordinat", .. })));

        let garbled = Site::from_form(&form(&[("id", "X"), ("nama", "X"), ("koordinat", "-6.2")]));
        assert!(matches!(garbled, Err(Error::Coercion { field: "koordinat", .. })));
    }

    #[test]
    fn test_from_form_bad_heritage_flag() {
        let err = Site::from_form(&form(&[("id", "X"), ("nama", "X"), ("is_heritage", "perhaps")]));
        assert!(matches!(err, Err(Error::Coercion { field: "is_heritage", .. })));
    }

    #[test]
    fn test_value_accessors() {
        let mut site = Site::new("A", "Alpha");
        assert_eq!(site.value(Field::IsHeritage), Some(FieldValue::Boolean(false)));
        assert_eq!(site.value(Field::Transport), None);
        assert_eq!(site.value(Field::Latitude), None);

        site.coordinates = Some(Coordinates {
            latitude: 1.5,
            longitude: 2.5,
        });
        assert_eq!(site.value(Field::Longitude), Some(FieldValue::Decimal(2.5)));
    }

    #[test]
    fn test_json_keys() {
        let mut site = Site::new("MasjidIstiqlal", "MASJID ISTIQLAL");
        site.transport = vec!["Stasiun Juanda (KRL)".to_string()];
        site.coordinates = Some(Coordinates {
            latitude: -6.170008,
            longitude: 106.831009,
        });

        let json = serde_json::to_value(&site).unwrap();
        assert_eq!(json["nama"], "MASJID ISTIQLAL");
        assert_eq!(json["transport_terdekat"][0], "Stasiun Juanda (KRL)");
        assert_eq!(json["latitude"], -6.170008);
        assert_eq!(json["is_heritage"], false);
        assert!(json["agama"].is_null());

        let back: Site = serde_json::from_value(json).unwrap();
        assert_eq!(back, site);
    }
}
