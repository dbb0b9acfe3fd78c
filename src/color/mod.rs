//! # Color Analysis Module
//!
//! This module implements the color pipeline that drives the playlist sort:
//! dominant-color extraction from album artwork, conversion into the CIE
//! L\*a\*b\* color space, similarity scoring, and the final track ordering.
//!
//! ## Pipeline
//!
//! ```text
//! RgbImage (decoded artwork)
//!     ↓  extract::dominant_colors (median-cut palette, top-K by frequency)
//! Vec<Rgb8>
//!     ↓  space::rgb_to_lab (sRGB → XYZ (D65) → LAB)
//! ColorSignature (uniform length per run)
//!     ↓  metric (Euclidean distance | cosine similarity)
//! order (stable sort against a fixed reference signature)
//! ```
//!
//! Everything in this module is pure and synchronous; fetching and decoding
//! artwork bytes is the caller's responsibility. All values are transient and
//! scoped to a single sort invocation — nothing is persisted between runs.
//!
//! ## Determinism
//!
//! Every stage is deterministic: the quantizer uses no randomness, palette
//! ties are broken by palette index, ordering ties are broken by input order,
//! and the LAB conversion uses one canonical D65 mapping. Running the same
//! sort twice on the same input produces the same permutation.

mod extract;
mod metric;
mod order;
mod space;

pub use extract::dominant_colors;
pub use metric::{cosine_similarity, euclidean_distance};
pub use order::{
    CollectedEntries, SortConfig, SortMode, TrackColorEntry, TrackErrorPolicy, collect_entries,
    order, order_chained, signature,
};
pub use space::rgb_to_lab;

/// An error type for the color pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ColorError {
    /// A sort parameter failed validation before the pipeline started.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The artwork bytes could not be decoded into a raster image.
    #[error("failed to decode artwork: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The track has no artwork, or its artwork could not be fetched.
    #[error("artwork unavailable: {0}")]
    ArtworkUnavailable(String),

    /// Cosine similarity was requested for a zero-norm vector. The only
    /// realistic trigger is fully black artwork, whose LAB signature is all
    /// zeros.
    #[error("cosine similarity is undefined for a zero-norm color vector")]
    DegenerateVector,

    /// There were no tracks to order.
    #[error("no tracks to order")]
    EmptyInput,
}

/// An 8-bit RGB color, as produced by the palette extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A CIE L\*a\*b\* color with L in [0, 100] and a/b chromaticity axes
/// centered on zero. Euclidean distance between two `Lab` values
/// approximates perceived color difference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// The color signature of one piece of artwork: its dominant LAB colors in
/// descending order of pixel frequency.
///
/// Within one ordering run every signature has the same length (the
/// configured top-K), so the concatenated vectors compared by the cosine
/// metric always have uniform dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSignature {
    colors: Vec<Lab>,
}

impl ColorSignature {
    pub fn new(colors: Vec<Lab>) -> Self {
        Self { colors }
    }

    /// The single most dominant color.
    pub fn primary(&self) -> Lab {
        self.colors.first().copied().unwrap_or_default()
    }

    /// The signature flattened into a 3K-dimensional vector
    /// `[l1, a1, b1, l2, a2, b2, ...]` for the cosine metric.
    pub fn to_vector(&self) -> Vec<f64> {
        self.colors.iter().flat_map(|c| [c.l, c.a, c.b]).collect()
    }

    pub fn colors(&self) -> &[Lab] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
