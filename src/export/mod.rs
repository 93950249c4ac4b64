//! CSV export
//!
//! One row per listing: URL, title, every attribute column, and the image
//! URLs flattened into a single semicolon-separated cell.

use crate::extract::{Field, ListingRecord};
use crate::Result;
use std::path::Path;

/// Writes all records to a CSV file at `path`
///
/// Rows appear in the order the records were scraped.
///
/// # Arguments
///
/// * `records` - Listing records to export
/// * `path` - Target CSV path (truncated if it exists)
pub fn write_csv(records: &[ListingRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(header())?;
    for record in records {
        writer.write_record(row(record))?;
    }
    writer.flush()?;

    Ok(())
}

/// The export header: url, title, attribute columns, image_urls
fn header() -> Vec<&'static str> {
    let mut columns = vec!["url", "title"];
    columns.extend(Field::ALL.iter().map(|f| f.column_name()));
    columns.push("image_urls");
    columns
}

fn row(record: &ListingRecord) -> Vec<String> {
    let mut cells = vec![record.url.clone(), record.title.clone()];
    cells.extend(
        Field::ALL
            .iter()
            .map(|&field| record.attributes.get(field).to_string()),
    );
    cells.push(record.image_urls.join(";"));
    cells
}
