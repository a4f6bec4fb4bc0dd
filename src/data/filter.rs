use std::collections::BTreeSet;
use std::fmt;

use super::model::VehicleTable;

/// Newest and oldest model years offered by the year selector.
pub const NEWEST_YEAR: i32 = 2019;
pub const OLDEST_YEAR: i32 = 1908;

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// The "Model Year" selection: every year, or one specific year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YearSelection {
    #[default]
    All,
    Year(i32),
}

impl fmt::Display for YearSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearSelection::All => write!(f, "All"),
            YearSelection::Year(y) => write!(f, "{y}"),
        }
    }
}

/// Year selector options: `All`, then every year from newest to oldest.
pub fn year_options() -> Vec<YearSelection> {
    std::iter::once(YearSelection::All)
        .chain((OLDEST_YEAR..=NEWEST_YEAR).rev().map(YearSelection::Year))
        .collect()
}

/// Manufacturer selector options: distinct makes, alphabetically.
pub fn make_options(table: &VehicleTable) -> Vec<String> {
    table.unique_makes().into_iter().collect()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return row ids of `table` matching the year and make selection, in order.
///
/// An empty `makes` set means no manufacturer constraint.
pub fn filtered_indices(
    table: &VehicleTable,
    year: YearSelection,
    makes: &BTreeSet<String>,
) -> Vec<usize> {
    match (year, makes.is_empty()) {
        (YearSelection::All, true) => (0..table.len()).collect(),
        (YearSelection::Year(y), true) => table
            .iter()
            .filter(|(_, l)| l.model_year == y)
            .map(|(i, _)| i)
            .collect(),
        (YearSelection::Year(y), false) => table
            .iter()
            .filter(|(_, l)| l.model_year == y && makes.contains(&l.make))
            .map(|(i, _)| i)
            .collect(),
        (YearSelection::All, false) => table
            .iter()
            .filter(|(_, l)| makes.contains(&l.make))
            .map(|(i, _)| i)
            .collect(),
    }
}

/// Build the filtered table. Row ids of the result restart at zero.
pub fn filter(table: &VehicleTable, year: YearSelection, makes: &BTreeSet<String>) -> VehicleTable {
    if year == YearSelection::All && makes.is_empty() {
        return table.clone();
    }
    let rows = filtered_indices(table, year, makes)
        .into_iter()
        .filter_map(|i| table.get(i).cloned())
        .collect();
    VehicleTable::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::listing;

    fn makes(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> VehicleTable {
        VehicleTable::from_rows(vec![
            listing(2015, "ford f150"),
            listing(2012, "toyota camry"),
            listing(2015, "toyota tacoma"),
            listing(2011, "ford focus"),
            listing(2015, "bmw x5"),
        ])
    }

    #[test]
    fn all_with_no_makes_returns_table_unchanged() {
        let table = sample();
        assert_eq!(filter(&table, YearSelection::All, &BTreeSet::new()), table);
    }

    #[test]
    fn year_only() {
        let out = filter(&sample(), YearSelection::Year(2015), &BTreeSet::new());
        let models: Vec<_> = out.rows().iter().map(|l| l.model.as_str()).collect();
        assert_eq!(models, vec!["ford f150", "toyota tacoma", "bmw x5"]);
    }

    #[test]
    fn year_and_makes() {
        let out = filter(&sample(), YearSelection::Year(2015), &makes(&["toyota", "bmw"]));
        let models: Vec<_> = out.rows().iter().map(|l| l.model.as_str()).collect();
        assert_eq!(models, vec!["toyota tacoma", "bmw x5"]);
    }

    #[test]
    fn makes_only() {
        let out = filter(&sample(), YearSelection::All, &makes(&["ford"]));
        let years: Vec<_> = out.rows().iter().map(|l| l.model_year).collect();
        assert_eq!(years, vec![2015, 2011]);
    }

    #[test]
    fn result_is_sound_and_complete_for_every_selection() {
        let table = sample();
        let make_sets = [makes(&[]), makes(&["ford"]), makes(&["toyota", "bmw"]), makes(&["kia"])];

        for year in year_options() {
            for set in &make_sets {
                let expected: Vec<_> = table
                    .rows()
                    .iter()
                    .filter(|l| match year {
                        YearSelection::All => true,
                        YearSelection::Year(y) => l.model_year == y,
                    })
                    .filter(|l| set.is_empty() || set.contains(&l.make))
                    .cloned()
                    .collect();
                let out = filter(&table, year, set);
                assert_eq!(out.rows(), expected.as_slice(), "year {year}, makes {set:?}");
            }
        }
    }

    #[test]
    fn output_row_ids_restart_at_zero() {
        let out = filter(&sample(), YearSelection::All, &makes(&["toyota"]));
        let ids: Vec<_> = out.iter().map(|(i, _)| i).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let out = filter(&sample(), YearSelection::Year(1950), &makes(&["ford"]));
        assert!(out.is_empty());
        assert!(filter(&VehicleTable::default(), YearSelection::Year(2015), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn single_row_table_matches_only_its_year_and_make() {
        let table = VehicleTable::from_rows(vec![listing(2015, "Ford F150")]);
        assert_eq!(filter(&table, YearSelection::Year(2015), &makes(&["Ford"])).len(), 1);
        assert_eq!(filter(&table, YearSelection::Year(2016), &makes(&["Ford"])).len(), 0);
        assert_eq!(filter(&table, YearSelection::Year(2015), &makes(&["Toyota"])).len(), 0);
    }

    #[test]
    fn year_options_run_from_all_then_newest_to_oldest() {
        let opts = year_options();
        assert_eq!(opts.len(), 1 + (NEWEST_YEAR - OLDEST_YEAR + 1) as usize);
        assert_eq!(opts[0], YearSelection::All);
        assert_eq!(opts[1], YearSelection::Year(2019));
        assert_eq!(opts.last(), Some(&YearSelection::Year(1908)));
    }

    #[test]
    fn make_options_are_sorted() {
        assert_eq!(make_options(&sample()), vec!["bmw", "ford", "toyota"]);
    }
}
