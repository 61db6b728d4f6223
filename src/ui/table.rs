use tabled::{settings::Style, Table, Tabled};

use crate::site::Site;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
pub struct SiteRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Region")]
    pub region: String,
    #[tabled(rename = "Religion")]
    pub religion: String,
    #[tabled(rename = "Founded")]
    pub founded: String,
    #[tabled(rename = "Heritage")]
    pub heritage: String,
}

impl From<&Site> for SiteRow {
    fn from(site: &Site) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        Self {
            id: site.id.clone(),
            name: text(&site.name),
            region: text(&site.region),
            religion: text(&site.religion),
            founded: site
                .founding_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            heritage: match (site.is_heritage, &site.heritage_code) {
                (true, Some(code)) => code.clone(),
                (true, None) => "yes".to_string(),
                (false, _) => String::new(),
            },
        }
    }
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

pub fn sites_table(sites: &[Site]) -> String {
    if sites.is_empty() {
        return String::new();
    }
    let rows: Vec<SiteRow> = sites.iter().map(SiteRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sites_table_lists_every_site() {
        let mut katedral = Site::new("GerejaKatedral", "GEREJA KATEDRAL JAKARTA");
        katedral.is_heritage = true;
        katedral.heritage_code = Some("KB000123".to_string());
        let table = sites_table(&[katedral, Site::new("PuraAdityaJaya", "PURA ADITYA JAYA")]);

        assert!(table.contains("GerejaKatedral"));
        assert!(table.contains("KB000123"));
        assert!(table.contains("PuraAdityaJaya"));
        assert!(sites_table(&[]).is_empty());
    }

    #[test]
    fn test_stats_table() {
        let table = stats_table(&[("Sites", "6"), ("Heritage", "4")]);
        assert!(table.contains("Metric"));
        assert!(table.contains("Heritage"));
    }
}
