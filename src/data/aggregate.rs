//! Chart series computed from a (filtered) table.
//!
//! Every function accepts an empty table and returns empty series.

use std::collections::BTreeMap;

use super::model::{Listing, VehicleTable};

/// Bins of the price histogram.
pub const PRICE_BINS: usize = 50;
/// Bins of the days-listed histogram.
pub const DAYS_LISTED_BINS: usize = 30;

/// `(condition, count)`, most frequent first; ties broken by name.
pub fn condition_counts(table: &VehicleTable) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for l in table.rows() {
        if let Some(c) = &l.condition {
            *counts.entry(c.as_str()).or_default() += 1;
        }
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(c, n)| (c.to_string(), n))
        .collect();
    // Stable sort keeps the alphabetical order among equal counts.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// `(body type, mean price)`, sorted by body type.
pub fn average_price_by_type(table: &VehicleTable) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for l in table.rows() {
        if let (Some(t), Some(p)) = (&l.body_type, l.price) {
            let entry = sums.entry(t.as_str()).or_default();
            entry.0 += p;
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(t, (sum, n))| (t.to_string(), sum / n as f64))
        .collect()
}

/// `(condition, [odometer, price] points)`, sorted by condition.
pub fn scatter_by_condition(table: &VehicleTable) -> Vec<(String, Vec<[f64; 2]>)> {
    let mut groups: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for l in table.rows() {
        if let (Some(c), Some(p)) = (&l.condition, l.price) {
            groups.entry(c.as_str()).or_default().push([l.odometer, p]);
        }
    }
    groups
        .into_iter()
        .map(|(c, pts)| (c.to_string(), pts))
        .collect()
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// How bar heights of a histogram series are scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistNorm {
    /// Raw counts.
    Count,
    /// Fraction of the series total; bars sum to 1.
    Probability,
    /// Percentage of the series total; bars sum to 100.
    Percent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub condition: String,
    /// One height per bin.
    pub heights: Vec<f64>,
}

/// Condition-coloured histogram with bins shared by every series.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges; empty when there is no data.
    pub edges: Vec<f64>,
    pub series: Vec<HistogramSeries>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    pub fn bin_center(&self, bin: usize) -> f64 {
        self.edges[bin] + self.bin_width() / 2.0
    }
}

/// Bin `value(listing)` for every listing with a condition, one series per
/// condition. Listings where `value` returns `None` are skipped.
pub fn histogram(
    table: &VehicleTable,
    value: impl Fn(&Listing) -> Option<f64>,
    bins: usize,
    norm: HistNorm,
) -> Histogram {
    let bins = bins.max(1);
    let points: Vec<(&str, f64)> = table
        .rows()
        .iter()
        .filter_map(|l| Some((l.condition.as_deref()?, value(l)?)))
        .filter(|(_, v)| v.is_finite())
        .collect();

    if points.is_empty() {
        return Histogram {
            edges: Vec::new(),
            series: Vec::new(),
        };
    }

    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let (start, width) = if max > min {
        (min, (max - min) / bins as f64)
    } else {
        (min - 0.5, 1.0 / bins as f64)
    };
    let edges: Vec<f64> = (0..=bins).map(|i| start + width * i as f64).collect();

    let mut counts: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (condition, v) in points {
        let bin = (((v - start) / width).floor() as usize).min(bins - 1);
        counts.entry(condition).or_insert_with(|| vec![0.0; bins])[bin] += 1.0;
    }

    let series = counts
        .into_iter()
        .map(|(condition, mut heights)| {
            let total: f64 = heights.iter().sum();
            let scale = match norm {
                HistNorm::Count => 1.0,
                HistNorm::Probability => 1.0 / total,
                HistNorm::Percent => 100.0 / total,
            };
            heights.iter_mut().for_each(|h| *h *= scale);
            HistogramSeries {
                condition: condition.to_string(),
                heights,
            }
        })
        .collect();

    Histogram { edges, series }
}

/// Price distribution per condition, in percent.
pub fn price_histogram(table: &VehicleTable) -> Histogram {
    histogram(table, |l| l.price, PRICE_BINS, HistNorm::Percent)
}

/// Days-listed distribution per condition; probabilities when `normalized`.
pub fn days_listed_histogram(table: &VehicleTable, normalized: bool) -> Histogram {
    let norm = if normalized {
        HistNorm::Probability
    } else {
        HistNorm::Count
    };
    histogram(
        table,
        |l| l.days_listed,
        DAYS_LISTED_BINS,
        norm,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::listing;

    fn row(condition: Option<&str>, body_type: &str, price: f64, days: f64) -> Listing {
        let mut l = listing(2015, "ford f150");
        l.condition = condition.map(str::to_string);
        l.body_type = Some(body_type.to_string());
        l.price = Some(price);
        l.days_listed = Some(days);
        l
    }

    fn sample() -> VehicleTable {
        VehicleTable::from_rows(vec![
            row(Some("good"), "sedan", 10_000.0, 10.0),
            row(Some("excellent"), "truck", 30_000.0, 40.0),
            row(Some("good"), "truck", 20_000.0, 25.0),
            row(Some("fair"), "sedan", 4_000.0, 70.0),
            row(None, "suv", 15_000.0, 5.0),
            row(Some("excellent"), "sedan", 16_000.0, 12.0),
        ])
    }

    #[test]
    fn empty_table_gives_empty_series() {
        let empty = VehicleTable::default();
        assert!(condition_counts(&empty).is_empty());
        assert!(average_price_by_type(&empty).is_empty());
        assert!(scatter_by_condition(&empty).is_empty());
        assert!(price_histogram(&empty).is_empty());
        assert!(days_listed_histogram(&empty, true).edges.is_empty());
    }

    #[test]
    fn condition_counts_sorted_by_frequency() {
        let counts = condition_counts(&sample());
        assert_eq!(
            counts,
            vec![
                ("excellent".to_string(), 2),
                ("good".to_string(), 2),
                ("fair".to_string(), 1),
            ]
        );
    }

    #[test]
    fn average_price_grouped_by_type() {
        let avg = average_price_by_type(&sample());
        assert_eq!(avg.len(), 3);
        assert_eq!(avg[0].0, "sedan");
        assert!((avg[0].1 - 10_000.0).abs() < 1e-9);
        assert_eq!(avg[1], ("suv".to_string(), 15_000.0));
        assert_eq!(avg[2], ("truck".to_string(), 25_000.0));
    }

    #[test]
    fn probability_series_sum_to_one() {
        let hist = days_listed_histogram(&sample(), true);
        assert_eq!(hist.edges.len(), DAYS_LISTED_BINS + 1);
        for s in &hist.series {
            let sum: f64 = s.heights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{} sums to {sum}", s.condition);
        }
    }

    #[test]
    fn percent_series_sum_to_hundred() {
        let hist = price_histogram(&sample());
        assert_eq!(hist.series.len(), 3);
        for s in &hist.series {
            let sum: f64 = s.heights.iter().sum();
            assert!((sum - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn counts_land_in_edge_bins() {
        let hist = days_listed_histogram(&sample(), false);
        let good = hist.series.iter().find(|s| s.condition == "good").unwrap();
        assert_eq!(good.heights.iter().sum::<f64>(), 2.0);
        let fair = hist.series.iter().find(|s| s.condition == "fair").unwrap();
        // The maximum value falls into the last bin.
        assert_eq!(fair.heights[DAYS_LISTED_BINS - 1], 1.0);
    }

    #[test]
    fn single_value_histogram_has_positive_width() {
        let table = VehicleTable::from_rows(vec![row(Some("good"), "sedan", 5_000.0, 3.0)]);
        let hist = days_listed_histogram(&table, false);
        assert!(hist.bin_width() > 0.0);
        assert_eq!(hist.series[0].heights.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn scatter_skips_rows_without_condition() {
        let groups = scatter_by_condition(&sample());
        let total: usize = groups.iter().map(|(_, pts)| pts.len()).sum();
        assert_eq!(total, 5);
        assert_eq!(groups[0].0, "excellent");
    }
}
