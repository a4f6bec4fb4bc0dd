use std::collections::BTreeSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Listing – one row of the normalized table
// ---------------------------------------------------------------------------

/// A single used-vehicle listing after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub price: Option<f64>,
    pub model_year: i32,
    pub model: String,
    /// Leading token of `model`; empty when the model text is missing.
    pub make: String,
    pub condition: Option<String>,
    /// Zero when the source value is missing.
    pub cylinders: f64,
    pub fuel: Option<String>,
    /// Zero when the source value is missing.
    pub odometer: f64,
    pub transmission: Option<String>,
    /// Body type (`type` column).
    pub body_type: Option<String>,
    /// `"unknown"` when the source value is missing.
    pub paint_color: String,
    pub is_4wd: bool,
    pub date_posted: NaiveDate,
    pub days_listed: Option<f64>,
}

/// Display names of the columns shown in the data viewer, in source order.
pub const COLUMN_NAMES: [&str; 14] = [
    "price",
    "model_year",
    "model",
    "condition",
    "cylinders",
    "fuel",
    "odometer",
    "transmission",
    "type",
    "paint_color",
    "is_4wd",
    "date_posted",
    "days_listed",
    "make",
];

impl Listing {
    /// Render every column as text for the data viewer, in [`COLUMN_NAMES`] order.
    pub fn cells(&self) -> [String; 14] {
        fn opt<T: ToString>(v: &Option<T>) -> String {
            v.as_ref().map(ToString::to_string).unwrap_or_default()
        }
        [
            opt(&self.price),
            self.model_year.to_string(),
            self.model.clone(),
            opt(&self.condition),
            self.cylinders.to_string(),
            opt(&self.fuel),
            self.odometer.to_string(),
            opt(&self.transmission),
            opt(&self.body_type),
            self.paint_color.clone(),
            self.is_4wd.to_string(),
            self.date_posted.format("%Y-%m-%d").to_string(),
            opt(&self.days_listed),
            self.make.clone(),
        ]
    }
}

// ---------------------------------------------------------------------------
// VehicleTable – ordered, immutable collection of listings
// ---------------------------------------------------------------------------

/// An ordered table of listings.
///
/// Row identifiers are the positions in `rows`, so they are always a dense
/// zero-based sequence no matter how many source rows were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleTable {
    rows: Vec<Listing>,
}

impl VehicleTable {
    pub fn from_rows(rows: Vec<Listing>) -> Self {
        VehicleTable { rows }
    }

    pub fn rows(&self) -> &[Listing] {
        &self.rows
    }

    pub fn get(&self, row_id: usize) -> Option<&Listing> {
        self.rows.get(row_id)
    }

    /// Iterate `(row_id, listing)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Listing)> {
        self.rows.iter().enumerate()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted set of distinct makes present in the table.
    pub fn unique_makes(&self) -> BTreeSet<String> {
        self.rows.iter().map(|l| l.make.clone()).collect()
    }

    /// Sorted set of distinct non-missing conditions.
    pub fn unique_conditions(&self) -> BTreeSet<String> {
        self.rows
            .iter()
            .filter_map(|l| l.condition.clone())
            .collect()
    }
}
