pub mod neighbors;
pub mod schema;
pub mod search;
pub mod vertex;

use tabled::settings::Style;
use tabled::{Table, Tabled};
use vertiscope_api::VertexRecord;

/// Render rows in the shared table style.
pub fn render<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

#[derive(Tabled)]
pub struct VertexRow {
    pub id: String,
    pub types: String,
    pub attributes: usize,
    pub state: String,
}

impl From<&VertexRecord> for VertexRow {
    fn from(record: &VertexRecord) -> Self {
        Self {
            id: record.id.to_string(),
            types: record
                .types
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            attributes: record.attributes.len(),
            state: format!("{:?}", record.resolution).to_lowercase(),
        }
    }
}
