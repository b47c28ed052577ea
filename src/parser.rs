use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

use crate::error::SeedError;
use crate::model::{Person, Zone};

#[derive(Debug, Deserialize)]
struct PersonRecord {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ZoneRecord {
    id: String,
    label: String,
    #[serde(default)]
    order: Option<String>,
}

/// Parses an order cell; blank means "use list position"
fn parse_order(zone: &str, value: Option<&str>) -> Result<Option<u32>, SeedError> {
    let value = value.map(str::trim).unwrap_or("");
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| SeedError::InvalidOrder {
        zone: zone.to_string(),
        value: value.to_string(),
    })
}

fn csv_error(path: &Path, source: csv::Error) -> SeedError {
    SeedError::Csv { path: path.to_path_buf(), source }
}

/// Loads the roster from a CSV with an `id,name` header row
pub fn load_people<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Person>, SeedError> {
    let path = csv_path.as_ref();
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut people = Vec::new();
    for record in reader.deserialize::<PersonRecord>() {
        let record = record.map_err(|e| csv_error(path, e))?;
        // Skip blank rows
        if record.id.is_empty() {
            continue;
        }
        people.push(Person::new(record.id, record.name));
    }
    Ok(people)
}

/// Loads zones from a CSV with an `id,label,order` header row. `order` may be
/// blank or the column missing entirely.
pub fn load_zones<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Zone>, SeedError> {
    let path = csv_path.as_ref();
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut zones = Vec::new();
    for record in reader.deserialize::<ZoneRecord>() {
        let record = record.map_err(|e| csv_error(path, e))?;
        if record.id.is_empty() {
            continue;
        }
        let order = parse_order(&record.id, record.order.as_deref())?;
        zones.push(Zone { id: record.id, label: record.label, order });
    }
    Ok(zones)
}
