use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{color::SortMode, types::PlaylistTrackRef};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn parse_sort_mode(input: &str) -> Result<SortMode, String> {
    let normalized = input.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "" => Err("sort mode cannot be empty".to_string()),
        "single-color-euclidean" => Ok(SortMode::SingleColorEuclidean),
        "multi-color-cosine" => Ok(SortMode::MultiColorCosine),
        other => Err(format!(
            "invalid value '{other}' (expected 'single-color-euclidean' or 'multi-color-cosine')"
        )),
    }
}

pub fn remove_duplicate_tracks(tracks: &mut Vec<PlaylistTrackRef>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{track_id}")
}
