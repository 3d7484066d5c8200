//! This is the ranking module
//! Provide distance metrics and nearest-first ranking of stored colors

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One stored color record. Fields are optional because the dataset may
/// contain incomplete rows; [`rank`] skips those instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub rgb: Option<Vec<i64>>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: Color) -> Self {
        Candidate {
            id: Some(id.into()),
            name: Some(name.into()),
            rgb: Some(color.channels().iter().map(|&c| c as i64).collect()),
        }
    }

    /// The validated color, or `None` if the stored vector is malformed.
    pub fn color(&self) -> Option<Color> {
        match self.rgb.as_deref() {
            Some(&[r, g, b]) => Color::try_from_channels(r, g, b).ok(),
            _ => None,
        }
    }
}

/// A candidate matched against a query, with its distance to that query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NamedColor {
    pub id: String,
    pub name: String,
    pub color: Color,
    pub distance: f64,
}

/// Distance metric used for ranking. Both variants order candidates identically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    #[default]
    SquaredEuclidean,
    Euclidean,
}

impl Metric {
    pub fn distance(&self, a: &Color, b: &Color) -> f64 {
        let squared = squared_distance(a, b) as f64;
        match self {
            Metric::SquaredEuclidean => squared,
            Metric::Euclidean => squared.sqrt(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::SquaredEuclidean => write!(f, "squared"),
            Metric::Euclidean => write!(f, "euclidean"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "squared" | "squared-euclidean" | "l2-squared" => Ok(Metric::SquaredEuclidean),
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            _ => Err(format!("Unknown metric: {}. Available: squared, euclidean", s)),
        }
    }
}

/// Squared Euclidean distance
/// dist = dr^2 + dg^2 + db^2
pub fn squared_distance(a: &Color, b: &Color) -> u32 {
    a.channels()
        .iter()
        .zip(b.channels().iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

/// Ranks candidates nearest-first by squared Euclidean distance.
///
/// # Examples
///
/// ```
/// use colorfinder::{rank, Candidate, Color};
///
/// let candidates = vec![
///     Candidate::new("A", "Red", Color::new(255, 0, 0)),
///     Candidate::new("B", "Maroon", Color::new(128, 0, 0)),
///     Candidate::new("C", "Blue", Color::new(0, 0, 255)),
/// ];
///
/// let matches = rank(&Color::new(255, 0, 0), &candidates, 2);
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].id, "A");
/// assert_eq!(matches[1].distance, 16129.0);
/// ```
pub fn rank(query: &Color, candidates: &[Candidate], limit: usize) -> Vec<NamedColor> {
    rank_with(query, candidates, limit, Metric::default())
}

/// Ranks candidates nearest-first using `metric`.
///
/// Malformed candidates (missing id, name or vector, wrong vector length, or a
/// channel outside [0, 255]) are skipped. Equal distances keep candidate order.
/// Returns at most `limit` matches.
pub fn rank_with(
    query: &Color,
    candidates: &[Candidate],
    limit: usize,
    metric: Metric,
) -> Vec<NamedColor> {
    if limit == 0 {
        return Vec::new();
    }

    let mut skipped = 0usize;
    let mut matches: Vec<NamedColor> = candidates
        .iter()
        .filter_map(|c| {
            let named = match (&c.id, &c.name, c.color()) {
                (Some(id), Some(name), Some(color)) => Some(NamedColor {
                    id: id.clone(),
                    name: name.clone(),
                    distance: metric.distance(query, &color),
                    color,
                }),
                _ => None,
            };
            if named.is_none() {
                skipped += 1;
                tracing::trace!(candidate = ?c, "skipping malformed candidate");
            }
            named
        })
        .collect();

    // sort_by is stable, so ties keep their input order
    matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    matches.truncate(limit);

    tracing::debug!(
        query = %query,
        %metric,
        returned = matches.len(),
        skipped,
        "ranked candidates"
    );

    matches
}
