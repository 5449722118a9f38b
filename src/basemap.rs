use crate::data::Error;
use geo::{Coord, LineString};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::Path,
};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Vertex {
    group: String,
    longitude: f64,
    latitude: f64,
}

/// State boundary outlines drawn under the crash locations. It is loaded once by the
/// caller and handed to the plotter, so the plotter never goes looking for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseMap {
    outlines: Vec<LineString<f64>>,
}

impl BaseMap {
    /// A map with no outlines; only the points get drawn.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => e.into(),
        })?;
        let map = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), outlines = map.outlines.len(), "Base map loaded");
        Ok(map)
    }

    /// Reads `group,longitude,latitude` rows; consecutive rows of the same group make
    /// up one outline.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut outlines = Vec::new();
        let mut current: Option<(String, Vec<Coord<f64>>)> = None;
        for result in rdr.deserialize() {
            let vertex: Vertex = result?;
            let coord = Coord {
                x: vertex.longitude,
                y: vertex.latitude,
            };
            if let Some((group, coords)) = current.as_mut() {
                if *group == vertex.group {
                    coords.push(coord);
                    continue;
                }
            }
            if let Some((_, coords)) = current.replace((vertex.group, vec![coord])) {
                outlines.push(LineString::new(coords));
            }
        }
        if let Some((_, coords)) = current {
            outlines.push(LineString::new(coords));
        }
        Ok(Self { outlines })
    }

    pub fn outlines(&self) -> &[LineString<f64>] {
        &self.outlines
    }
}
