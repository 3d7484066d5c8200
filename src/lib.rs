//! # colorfinder - Nearest Named Color Lookup
//!
//! colorfinder parses a color typed as `#rrggbb` or `r g b` and returns the
//! closest named colors from a dataset, ranked by squared Euclidean distance
//! in RGB space.
//!
//! ## Example
//!
//! ```
//! use colorfinder::{Candidate, Color, Palette};
//!
//! let mut palette = Palette::new();
//! palette.insert(Candidate::new("1", "red", Color::new(255, 0, 0)));
//! palette.insert(Candidate::new("2", "maroon", Color::new(128, 0, 0)));
//! palette.insert(Candidate::new("3", "blue", Color::new(0, 0, 255)));
//!
//! let query = Color::parse("#ff0000").unwrap();
//! let matches = palette.search(&query, 2);
//! assert_eq!(matches[0].name, "red"); // Nearest color
//! assert_eq!(matches[1].distance, 16129.0);
//! ```

pub mod color;
pub mod palette;
pub mod ranker;
pub mod server;

pub use color::{Color, ColorError};
pub use palette::{Palette, PaletteError, DEFAULT_LIMIT};
pub use ranker::{rank, rank_with, Candidate, Metric, NamedColor};
