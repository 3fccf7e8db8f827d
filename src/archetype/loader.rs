//! CSV-based archetype table loader
//!
//! Loads archetype parameter tables from CSV files in data/archetypes/

use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::{ArchetypeProfile, ArchetypeTable};

/// Default path to the archetype tables directory
pub const DEFAULT_ARCHETYPES_PATH: &str = "data/archetypes";

/// Load an archetype table from a single CSV file.
///
/// Expected header: archetype_id,label,base_revenue,growth_rate,churn_rate,period_fee
/// Row order in the file becomes the table's declaration order.
pub fn load_table(path: &Path) -> Result<ArchetypeTable, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut profiles = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let id = field(&record, 0, row)?.to_string();
        let label = field(&record, 1, row)?.to_string();
        let base_revenue: f64 = field(&record, 2, row)?.parse()?;
        let growth_rate: f64 = field(&record, 3, row)?.parse()?;
        let churn_rate: f64 = field(&record, 4, row)?.parse()?;
        let period_fee: f64 = field(&record, 5, row)?.parse()?;

        profiles.push(ArchetypeProfile::new(
            id,
            label,
            base_revenue,
            growth_rate,
            churn_rate,
            period_fee,
        ));
    }

    log::info!("loaded {} archetype profiles from {}", profiles.len(), path.display());

    Ok(ArchetypeTable::new(profiles)?)
}

/// Fetch a column from a record, turning a missing column into an error
/// instead of a panic (a consistently short file passes csv's length check)
fn field<'a>(
    record: &'a csv::StringRecord,
    idx: usize,
    row: usize,
) -> Result<&'a str, Box<dyn Error>> {
    record
        .get(idx)
        .ok_or_else(|| format!("row {}: missing column {}", row + 1, idx + 1).into())
}

/// Load the bundled monthly-survival table from the default directory
pub fn load_default_monthly() -> Result<ArchetypeTable, Box<dyn Error>> {
    load_table(&Path::new(DEFAULT_ARCHETYPES_PATH).join("monthly_survival.csv"))
}

/// Load the bundled annual-retention table from the default directory
pub fn load_default_annual() -> Result<ArchetypeTable, Box<dyn Error>> {
    load_table(&Path::new(DEFAULT_ARCHETYPES_PATH).join("annual_retention.csv"))
}
