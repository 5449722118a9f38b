use serde::Deserialize;
use std::{fmt, ops::RangeInclusive, path::PathBuf};
use thiserror::Error;

pub type Year = i32;
pub type Month = u8;
pub type StateCode = u16;

pub const MONTHS: RangeInclusive<Month> = 1..=12;

/// FARS encodes unknown coordinates as 999.9999 / 99.9999 (and friends), so anything
/// past these bounds is not a location.
pub const LONGITUDE_SENTINEL: f64 = 900.0;
pub const LATITUDE_SENTINEL: f64 = 90.0;

/// One fatal crash as found in an `accident_<year>.csv` file. Only the columns the
/// pipeline looks at are kept, the others are skipped by the CSV deserializer.
/// Coordinates are optional because some years leave them blank.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Accident {
    #[serde(rename = "MONTH")]
    pub month: Month,
    #[serde(rename = "STATE")]
    pub state: StateCode,
    #[serde(rename = "LONGITUD")]
    pub longitude: Option<f64>,
    #[serde(rename = "LATITUDE")]
    pub latitude: Option<f64>,
}

/// The `(MONTH, year)` projection of an accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthYear {
    pub month: Month,
    pub year: Year,
}

impl MonthYear {
    pub fn new(month: Month, year: Year) -> Result<Self, Error> {
        if !MONTHS.contains(&month) {
            return Err(Error::InvalidMonth(month));
        }
        Ok(Self { month, year })
    }
}

/// All the accidents of one year, projected down to `(MONTH, year)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRecords {
    pub year: Year,
    pub rows: Vec<MonthYear>,
}

/// Outcome of loading one requested year. A year that could not be loaded stays in
/// the sequence as `Absent` so positions keep matching the request.
#[derive(Debug)]
pub enum YearEntry {
    Present(YearRecords),
    Absent { year: String, cause: Error },
}

impl YearEntry {
    pub fn records(&self) -> Option<&YearRecords> {
        match self {
            YearEntry::Present(records) => Some(records),
            YearEntry::Absent { .. } => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, YearEntry::Absent { .. })
    }
}

/// Location of a crash, with sentinel values already turned into `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

impl Coordinate {
    /// `(longitude, latitude)` when both are known.
    pub fn point(&self) -> Option<(f64, f64)> {
        Some((self.longitude?, self.latitude?))
    }
}

impl From<&Accident> for Coordinate {
    fn from(accident: &Accident) -> Self {
        Self {
            longitude: accident.longitude.filter(|&lon| lon <= LONGITUDE_SENTINEL),
            latitude: accident.latitude.filter(|&lat| lat <= LATITUDE_SENTINEL),
        }
    }
}

/// Anything a caller may hand us as a year or a state number. Floats are truncated
/// toward zero and strings may hold either an integer or a float.
pub trait AsInteger: fmt::Display {
    fn as_integer(&self) -> Option<i64>;
}

macro_rules! integer_as_integer {
    ($($t:ty),*) => {
        $(
            impl AsInteger for $t {
                fn as_integer(&self) -> Option<i64> {
                    i64::try_from(*self).ok()
                }
            }
        )*
    };
}

integer_as_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl AsInteger for f64 {
    fn as_integer(&self) -> Option<i64> {
        let truncated = self.trunc();
        (truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
            .then_some(truncated as i64)
    }
}

impl AsInteger for f32 {
    fn as_integer(&self) -> Option<i64> {
        f64::from(*self).as_integer()
    }
}

impl AsInteger for str {
    fn as_integer(&self) -> Option<i64> {
        let text = self.trim();
        text.parse::<i64>()
            .ok()
            .or_else(|| text.parse::<f64>().ok()?.as_integer())
    }
}

impl AsInteger for String {
    fn as_integer(&self) -> Option<i64> {
        self.as_str().as_integer()
    }
}

impl<T: AsInteger + ?Sized> AsInteger for &T {
    fn as_integer(&self) -> Option<i64> {
        (**self).as_integer()
    }
}

pub fn coerce_year<Y: AsInteger + ?Sized>(year: &Y) -> Result<Year, Error> {
    year.as_integer()
        .and_then(|year| Year::try_from(year).ok())
        .ok_or_else(|| Error::InvalidYear(year.to_string()))
}

pub fn coerce_state<S: AsInteger + ?Sized>(state: &S) -> Result<StateCode, Error> {
    state
        .as_integer()
        .and_then(|state| StateCode::try_from(state).ok())
        .ok_or_else(|| Error::InvalidState(state.to_string()))
}

/// Everything that can go wrong in the pipeline. Per-year failures inside a batch
/// end up in `YearEntry::Absent` instead of being returned.
#[derive(Error, Debug)]
pub enum Error {
    #[error("file '{}' does not exist", .0.display())]
    FileNotFound(PathBuf),
    #[error("invalid year: {0}")]
    InvalidYear(String),
    #[error("invalid STATE number: {0}")]
    InvalidState(String),
    #[error("invalid MONTH {0}, expected 1 to 12")]
    InvalidMonth(Month),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("plotting failed: {0}")]
    Plot(String),
}
