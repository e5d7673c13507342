//! Stemmers usable as encoders.
//!
//! A stemmer reduces inflected forms to a common stem; two words with the
//! same stem are treated as equivalent, just like two words with the same
//! phonetic code.

mod schinke;

pub use schinke::{schinke, LatinStems, Schinke};
