use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use super::error::{LoadError, Result};
use super::model::{Listing, VehicleTable};

/// Literal used for a missing `paint_color`.
pub const UNKNOWN_PAINT_COLOR: &str = "unknown";

/// Cell texts treated as missing, besides the empty string.
const MISSING_MARKERS: [&str; 5] = ["nan", "NaN", "NA", "N/A", "null"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalize the listings CSV at `path`.
///
/// Rows without a `model_year` are dropped; the remaining rows keep their
/// source order and are renumbered from zero.
pub fn normalize(path: &Path) -> Result<VehicleTable> {
    let file = File::open(path).map_err(|e| LoadError::not_found(path, e))?;
    let table = read_listings(file, path)?;
    log::info!(
        "Normalized {} listings from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Normalize listings from any CSV source with a header row.
pub fn normalize_reader<R: Read>(source: R) -> Result<VehicleTable> {
    read_listings(source, Path::new("<reader>"))
}

/// `origin` names the source in read-failure errors.
fn read_listings<R: Read>(source: R, origin: &Path) -> Result<VehicleTable> {
    // Short rows are allowed; their trailing cells count as missing.
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| csv_failure(e, origin, "reading CSV header"))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_failure(e, origin, &format!("CSV row {row_no}")))?;
        match columns.parse_record(&record, row_no)? {
            Some(listing) => rows.push(listing),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} rows without model_year");
    }

    Ok(VehicleTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Column lookup
// ---------------------------------------------------------------------------

/// Positions of the known columns in the header row.
/// Required columns are plain indices; optional ones may be absent.
struct ColumnIndex {
    model_year: usize,
    model: usize,
    date_posted: usize,
    price: Option<usize>,
    condition: Option<usize>,
    cylinders: Option<usize>,
    fuel: Option<usize>,
    odometer: Option<usize>,
    transmission: Option<usize>,
    body_type: Option<usize>,
    paint_color: Option<usize>,
    is_4wd: Option<usize>,
    days_listed: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                LoadError::DataFormat(format!("CSV missing required column '{name}'"))
            })
        };

        Ok(ColumnIndex {
            model_year: require("model_year")?,
            model: require("model")?,
            date_posted: require("date_posted")?,
            price: find("price"),
            condition: find("condition"),
            cylinders: find("cylinders"),
            fuel: find("fuel"),
            odometer: find("odometer"),
            transmission: find("transmission"),
            body_type: find("type"),
            paint_color: find("paint_color"),
            is_4wd: find("is_4wd"),
            days_listed: find("days_listed"),
        })
    }

    /// Turn one record into a listing, or `None` when `model_year` is missing.
    fn parse_record(&self, record: &StringRecord, row: usize) -> Result<Option<Listing>> {
        let Some(raw_year) = cell(record, Some(self.model_year)) else {
            return Ok(None);
        };
        let model_year = parse_model_year(raw_year)
            .ok_or_else(|| LoadError::bad_value(row, "model_year", raw_year, "an integer year"))?;

        let raw_date = cell(record, Some(self.date_posted)).unwrap_or("");
        let date_posted = parse_date(raw_date)
            .ok_or_else(|| LoadError::bad_value(row, "date_posted", raw_date, "a YYYY-MM-DD date"))?;

        let model = cell(record, Some(self.model)).unwrap_or("").to_string();
        let make = derive_make(&model);

        let text = |idx: Option<usize>| cell(record, idx).map(str::to_string);
        let number = |idx: Option<usize>| cell(record, idx).and_then(|s| s.parse::<f64>().ok());

        Ok(Some(Listing {
            price: number(self.price),
            model_year,
            model,
            make,
            condition: text(self.condition),
            cylinders: number(self.cylinders).unwrap_or(0.0),
            fuel: text(self.fuel),
            odometer: number(self.odometer).unwrap_or(0.0),
            transmission: text(self.transmission),
            body_type: text(self.body_type),
            paint_color: text(self.paint_color)
                .unwrap_or_else(|| UNKNOWN_PAINT_COLOR.to_string()),
            is_4wd: number(self.is_4wd) == Some(1.0),
            date_posted,
            days_listed: number(self.days_listed),
        }))
    }
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

/// I/O failures mean the source is unreadable; anything else is bad CSV.
fn csv_failure(e: csv::Error, origin: &Path, what: &str) -> LoadError {
    if !e.is_io_error() {
        return LoadError::DataFormat(format!("{what}: {e}"));
    }
    match e.into_kind() {
        csv::ErrorKind::Io(io) => LoadError::not_found(origin, io),
        other => LoadError::DataFormat(format!("{what}: {other:?}")),
    }
}

/// Fetch a cell, mapping absent columns and missing markers to `None`.
fn cell(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    let value = record.get(idx?)?;
    if value.is_empty() || MISSING_MARKERS.contains(&value) {
        None
    } else {
        Some(value)
    }
}

/// Years written as integers (`2011`) or floats (`2011.0`); fractions are
/// truncated. `None` for text that is not a finite number in `i32` range.
fn parse_model_year(s: &str) -> Option<i32> {
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if !f.is_finite() {
        return None;
    }
    i32::try_from(f.trunc() as i64).ok()
}

/// Strict `YYYY-MM-DD`: zero-padded fields, no time part, no other separators.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let shape_ok = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Leading whitespace-delimited token of the model text.
pub fn derive_make(model: &str) -> String {
    model.split_whitespace().next().unwrap_or("").to_string()
}
