use crate::{
    data::{coerce_year, AsInteger, Error, Month, MonthYear, Year, YearEntry, YearRecords, MONTHS},
    read::AccidentSource,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Loads every requested year and projects it down to `(MONTH, year)`.
///
/// Each year stands on its own: whatever goes wrong with one of them (bad year,
/// missing file, unreadable file, bogus month) turns it into `YearEntry::Absent`
/// with a warning, and the others are still loaded. The result has one entry per
/// requested year, in the same order.
pub fn read_years<S, Y>(source: &S, years: &[Y]) -> Vec<YearEntry>
where
    S: AccidentSource + ?Sized,
    Y: AsInteger,
{
    years
        .iter()
        .map(|year| match load_year(source, year) {
            Ok(records) => YearEntry::Present(records),
            Err(cause) => {
                warn!(error = %cause, "invalid year: {year}");
                YearEntry::Absent {
                    year: year.to_string(),
                    cause,
                }
            }
        })
        .collect()
}

fn load_year<S, Y>(source: &S, year: &Y) -> Result<YearRecords, Error>
where
    S: AccidentSource + ?Sized,
    Y: AsInteger + ?Sized,
{
    let year = coerce_year(year)?;
    let rows = source
        .accidents(year)?
        .iter()
        .map(|accident| MonthYear::new(accident.month, year))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(YearRecords { year, rows })
}

/// Crash counts with one row per month and one column per year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    counts: BTreeMap<Year, [usize; 12]>,
}

impl Summary {
    /// Column headers, in ascending order.
    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.counts.keys().copied()
    }

    pub fn count(&self, year: Year, month: Month) -> Option<usize> {
        if !MONTHS.contains(&month) {
            return None;
        }
        Some(self.counts.get(&year)?[month_index(month)])
    }

    pub fn total(&self, year: Year) -> Option<usize> {
        Some(self.counts.get(&year)?.iter().sum())
    }

    /// Twelve rows, January first, each holding one count per year of `years()`.
    pub fn rows(&self) -> impl Iterator<Item = (Month, Vec<usize>)> + '_ {
        MONTHS.map(move |month| {
            let counts = self
                .counts
                .values()
                .map(|months| months[month_index(month)])
                .collect();
            (month, counts)
        })
    }

    /// True when no year could be loaded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

fn month_index(month: Month) -> usize {
    usize::from(month - 1)
}

/// Counts accidents per year and month over all the years that could be loaded.
/// A year asked for twice is only counted once.
pub fn summarize_years<S, Y>(source: &S, years: &[Y]) -> Summary
where
    S: AccidentSource + ?Sized,
    Y: AsInteger,
{
    let mut counts = BTreeMap::new();
    for records in read_years(source, years)
        .into_iter()
        .filter_map(|entry| match entry {
            YearEntry::Present(records) => Some(records),
            YearEntry::Absent { .. } => None,
        })
    {
        if counts.contains_key(&records.year) {
            debug!(year = records.year, "Year requested twice, counted once");
            continue;
        }
        let mut months = [0; 12];
        for row in &records.rows {
            months[month_index(row.month)] += 1;
        }
        counts.insert(records.year, months);
    }
    Summary { counts }
}
