//! Loading and summarizing FARS (Fatality Analysis Reporting System) accident files.
//!
//! Yearly `accident_<year>.csv.bz2` files are read into [`Accident`] records,
//! counted per month and year with [`summarize_years`], or drawn on a state map with
//! [`map_state`].

pub mod basemap;
pub mod compute;
pub mod data;
pub mod map;
pub mod read;
pub mod write;

pub use basemap::BaseMap;
pub use compute::{read_years, summarize_years, Summary};
pub use data::{Accident, AsInteger, Coordinate, Error, MonthYear, Year, YearEntry, YearRecords};
pub use map::{map_state, state_coordinates, MapOutcome};
pub use read::{make_filename, read_accidents, read_accidents_from, AccidentSource, DataDir};
pub use write::write_summary;
