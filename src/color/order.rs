use image::RgbImage;

use crate::color::{ColorError, ColorSignature, Lab, extract, metric, space};

pub const DEFAULT_PALETTE_SIZE: usize = 16;

/// Which similarity metric, and therefore which signature shape, a sort run
/// uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Compare only the single most dominant color by Euclidean LAB distance.
    SingleColorEuclidean,
    /// Compare the concatenated top-K LAB vector by cosine similarity, so
    /// accent colors contribute alongside the dominant one.
    MultiColorCosine,
}

impl SortMode {
    /// Signature length used when the caller doesn't override `top_k`.
    pub fn default_top_k(&self) -> usize {
        match self {
            SortMode::SingleColorEuclidean => 1,
            SortMode::MultiColorCosine => 3,
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::SingleColorEuclidean => write!(f, "single-color-euclidean"),
            SortMode::MultiColorCosine => write!(f, "multi-color-cosine"),
        }
    }
}

/// Parameters of one sort run, fixed before any artwork is fetched.
#[derive(Debug, Clone)]
pub struct SortConfig {
    pub palette_size: usize,
    pub top_k: usize,
    pub mode: SortMode,
}

impl SortConfig {
    pub fn new(mode: SortMode) -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
            top_k: mode.default_top_k(),
            mode,
        }
    }

    /// Validates the parameters up front; cheap to check before any network
    /// traffic happens.
    pub fn validate(&self) -> Result<(), ColorError> {
        if self.palette_size == 0 {
            return Err(ColorError::InvalidParameter(
                "palette size must be at least 1".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(ColorError::InvalidParameter(
                "top-k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How a failing track (missing artwork, undecodable bytes) affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackErrorPolicy {
    /// Drop the failing track from the output permutation and continue.
    Skip,
    /// Abort the whole run on the first failing track.
    Abort,
}

/// One track paired with the color signature of its artwork.
#[derive(Debug, Clone)]
pub struct TrackColorEntry {
    pub id: String,
    pub signature: ColorSignature,
}

/// The surviving entries of a run plus the tracks that were dropped under
/// the `Skip` policy, so the caller can report them.
#[derive(Debug)]
pub struct CollectedEntries {
    pub entries: Vec<TrackColorEntry>,
    pub skipped: Vec<(String, ColorError)>,
}

/// Computes the color signature of one piece of artwork under `config`.
///
/// Extracts the top-K dominant colors and converts them to LAB. Signatures
/// shorter than `top_k` (artwork with fewer distinct palette colors) are
/// padded by repeating the last dominant color, keeping the dimensionality
/// uniform across all tracks of a run.
pub fn signature(image: &RgbImage, config: &SortConfig) -> Result<ColorSignature, ColorError> {
    let dominant = extract::dominant_colors(image, config.palette_size, config.top_k)?;
    let mut colors: Vec<Lab> = dominant.into_iter().map(space::rgb_to_lab).collect();

    if let Some(&last) = colors.last() {
        while colors.len() < config.top_k {
            colors.push(last);
        }
    }

    Ok(ColorSignature::new(colors))
}

/// Applies the per-track error policy to the signature results, preserving
/// input order.
///
/// Under `Skip` the failing tracks are collected for reporting and excluded
/// from the entries; under `Abort` the first failure ends the run.
pub fn collect_entries(
    results: Vec<(String, Result<ColorSignature, ColorError>)>,
    policy: TrackErrorPolicy,
) -> Result<CollectedEntries, ColorError> {
    let mut entries = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();

    for (id, result) in results {
        match result {
            Ok(signature) => entries.push(TrackColorEntry { id, signature }),
            Err(e) => match policy {
                TrackErrorPolicy::Abort => return Err(e),
                TrackErrorPolicy::Skip => skipped.push((id, e)),
            },
        }
    }

    Ok(CollectedEntries { entries, skipped })
}

/// Orders tracks by color proximity to a fixed reference.
///
/// The first entry's signature is the reference (a deterministic design
/// choice, not a "best" anchor). Every entry is scored against it and the
/// list is stably sorted: ascending for distance, descending for similarity,
/// ties keeping input order. Returns the ids as a permutation of the input.
///
/// # Errors
///
/// Fails with `ColorError::EmptyInput` when there is nothing to order, and
/// propagates metric errors (`DegenerateVector` in cosine mode).
pub fn order(entries: &[TrackColorEntry], mode: SortMode) -> Result<Vec<String>, ColorError> {
    let Some(reference) = entries.first() else {
        return Err(ColorError::EmptyInput);
    };

    let mut scored: Vec<(f64, &TrackColorEntry)> = Vec::with_capacity(entries.len());
    for entry in entries {
        scored.push((score(&entry.signature, &reference.signature, mode)?, entry));
    }

    match mode {
        SortMode::SingleColorEuclidean => scored.sort_by(|a, b| a.0.total_cmp(&b.0)),
        SortMode::MultiColorCosine => scored.sort_by(|a, b| b.0.total_cmp(&a.0)),
    }

    Ok(scored.into_iter().map(|(_, entry)| entry.id.clone()).collect())
}

/// Greedy nearest-neighbor-chain ordering: starting from the first entry,
/// repeatedly appends the most similar remaining track to the last-placed
/// one. Produces smoother visual transitions than [`order`] at O(n²) cost;
/// experimental, opt-in only. Ties go to the earliest remaining entry.
pub fn order_chained(
    entries: &[TrackColorEntry],
    mode: SortMode,
) -> Result<Vec<String>, ColorError> {
    if entries.is_empty() {
        return Err(ColorError::EmptyInput);
    }

    let mut ordered: Vec<usize> = vec![0];
    let mut remaining: Vec<usize> = (1..entries.len()).collect();

    while !remaining.is_empty() {
        let last = &entries[ordered[ordered.len() - 1]];

        let mut best_pos = 0;
        let mut best_score = score(
            &entries[remaining[0]].signature,
            &last.signature,
            mode,
        )?;
        for (pos, &index) in remaining.iter().enumerate().skip(1) {
            let candidate = score(&entries[index].signature, &last.signature, mode)?;
            let better = match mode {
                SortMode::SingleColorEuclidean => candidate < best_score,
                SortMode::MultiColorCosine => candidate > best_score,
            };
            if better {
                best_pos = pos;
                best_score = candidate;
            }
        }

        ordered.push(remaining.remove(best_pos));
    }

    Ok(ordered
        .into_iter()
        .map(|index| entries[index].id.clone())
        .collect())
}

fn score(a: &ColorSignature, b: &ColorSignature, mode: SortMode) -> Result<f64, ColorError> {
    match mode {
        SortMode::SingleColorEuclidean => Ok(metric::euclidean_distance(&a.primary(), &b.primary())),
        SortMode::MultiColorCosine => metric::cosine_similarity(&a.to_vector(), &b.to_vector()),
    }
}
