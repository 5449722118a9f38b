use crate::data::{coerce_year, Accident, AsInteger, Error, Year};
use bzip2::read::MultiBzDecoder;
use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::{Path, PathBuf},
};
use tracing::debug;

/// Something that can hand out the accidents of a given year. The pipeline only
/// talks to this trait, which lets tests feed it in-memory data instead of files.
pub trait AccidentSource {
    fn accidents(&self, year: Year) -> Result<Vec<Accident>, Error>;
}

/// Directory holding the `accident_<year>.csv.bz2` files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, year: Year) -> PathBuf {
        self.root.join(filename(year))
    }
}

impl AccidentSource for DataDir {
    fn accidents(&self, year: Year) -> Result<Vec<Accident>, Error> {
        read_accidents(self.path_for(year))
    }
}

/// In-memory datasets keyed by year; a missing year behaves like a missing file.
impl AccidentSource for HashMap<Year, Vec<Accident>> {
    fn accidents(&self, year: Year) -> Result<Vec<Accident>, Error> {
        self.get(&year)
            .cloned()
            .ok_or_else(|| Error::FileNotFound(PathBuf::from(filename(year))))
    }
}

fn filename(year: Year) -> String {
    format!("accident_{year}.csv.bz2")
}

/// Conventional dataset file name for `year`, e.g. `accident_2015.csv.bz2`.
pub fn make_filename<Y: AsInteger>(year: Y) -> Result<String, Error> {
    Ok(filename(coerce_year(&year)?))
}

/// Loads a whole accident file. `.bz2` files are decompressed on the fly, anything
/// else is read as plain CSV.
pub fn read_accidents<P: AsRef<Path>>(path: P) -> Result<Vec<Accident>, Error> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::FileNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    let reader = BufReader::new(file);
    let accidents = if path.extension().is_some_and(|ext| ext == "bz2") {
        read_accidents_from(MultiBzDecoder::new(reader))?
    } else {
        read_accidents_from(reader)?
    };
    debug!(path = %path.display(), records = accidents.len(), "Accident file loaded");
    Ok(accidents)
}

/// Simple CSV importer for `Accident`s.
pub fn read_accidents_from<R: Read>(reader: R) -> Result<Vec<Accident>, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut accidents = Vec::new();
    for result in rdr.deserialize() {
        accidents.push(result?);
    }
    Ok(accidents)
}
