//! The palette module
//! Own the candidate set: load it from a JSON dataset, snapshot it with bincode
//! and search it through the ranker

use crate::color::Color;
use crate::ranker::{rank_with, Candidate, Metric, NamedColor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};
use thiserror::Error;

/// Number of matches returned when the caller does not ask for a specific count.
pub const DEFAULT_LIMIT: usize = 8;

const BUILTIN_DATASET: &str = include_str!("../data/colors.json");

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot (de)serialization failed: {0}")]
    Bincode(#[from] bincode::Error),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Palette {
    candidates: Vec<Candidate>,
    metric: Metric,
}

impl Palette {
    /// Creates an empty palette using the squared Euclidean metric.
    pub fn new() -> Palette {
        Palette::default()
    }

    /// Loads the bundled dataset of CSS named colors.
    ///
    /// # Examples
    ///
    /// ```
    /// use colorfinder::{Color, Palette};
    ///
    /// let palette = Palette::builtin().unwrap();
    /// let matches = palette.search(&Color::new(255, 0, 0), 1);
    /// assert_eq!(matches[0].name, "red");
    /// ```
    pub fn builtin() -> Result<Palette, PaletteError> {
        Palette::from_json_str(BUILTIN_DATASET)
    }

    /// Parses a JSON array of `{"id", "color", "colorvect_l2"}` records.
    ///
    /// Rows that are incomplete or carry a bad vector are kept as-is; the
    /// ranker skips them at search time. Only a document that is not a JSON
    /// array fails.
    pub fn from_json_str(json: &str) -> Result<Palette, PaletteError> {
        let rows: Vec<Value> = serde_json::from_str(json)?;
        let candidates = rows.iter().map(candidate_from_json).collect();
        Ok(Palette { candidates, metric: Metric::default() })
    }

    /// Reads a JSON dataset from disk. See [`from_json_str`](Palette::from_json_str).
    pub fn load_json(path: impl AsRef<Path>) -> Result<Palette, PaletteError> {
        let path = path.as_ref();
        let rows: Vec<Value> = serde_json::from_reader(open(path)?)?;
        let candidates: Vec<Candidate> = rows.iter().map(candidate_from_json).collect();

        tracing::info!(path = %path.display(), records = candidates.len(), "loaded color dataset");
        Ok(Palette { candidates, metric: Metric::default() })
    }

    /// Saves the palette to a file using bincode serialization.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PaletteError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| PaletteError::Io {
            path: path.display().to_string(),
            source,
        })?;

        bincode::serialize_into(BufWriter::new(file), self)?;
        tracing::info!(path = %path.display(), records = self.count(), "saved palette snapshot");
        Ok(())
    }

    /// Loads a palette previously written by [`save`](Palette::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Palette, PaletteError> {
        let path = path.as_ref();
        let palette: Palette = bincode::deserialize_from(open(path)?)?;

        tracing::info!(path = %path.display(), records = palette.count(), "loaded palette snapshot");
        Ok(palette)
    }

    pub fn with_metric(mut self, metric: Metric) -> Palette {
        self.metric = metric;
        self
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn insert(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Returns the number of stored records, malformed ones included.
    pub fn count(&self) -> usize {
        self.candidates.len()
    }

    /// Returns up to `limit` colors nearest to `query`, nearest first.
    pub fn search(&self, query: &Color, limit: usize) -> Vec<NamedColor> {
        rank_with(query, &self.candidates, limit, self.metric)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, PaletteError> {
    if !path.exists() {
        return Err(PaletteError::NotFound(path.display().to_string()));
    }

    let file = File::open(path).map_err(|source| PaletteError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn candidate_from_json(row: &Value) -> Candidate {
    let text = |key: &str| row.get(key).and_then(Value::as_str).map(str::to_string);

    let rgb = row
        .get("colorvect_l2")
        .and_then(Value::as_array)
        .and_then(|values| values.iter().map(integral).collect::<Option<Vec<i64>>>());

    Candidate {
        id: text("id"),
        name: text("color").or_else(|| text("name")),
        rgb,
    }
}

// Accepts 12 as well as 12.0; rejects 12.5
fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}
