use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    Res,
    color::{self, ColorError, ColorSignature, SortConfig, SortMode, TrackErrorPolicy},
    error, info,
    management::TokenManager,
    spotify, success,
    types::PlaylistTrackRef,
    utils, warning,
};

pub async fn sort(
    playlist_id: String,
    mode: SortMode,
    palette_size: Option<usize>,
    top_k: Option<usize>,
    strict: bool,
    greedy: bool,
) {
    let mut config = SortConfig::new(mode);
    if let Some(palette_size) = palette_size {
        config.palette_size = palette_size;
    }
    if let Some(top_k) = top_k {
        config.top_k = top_k;
    }
    if let Err(e) = config.validate() {
        error!("{}", e);
    }

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run huesort auth\n Error: {}",
                e
            );
        }
    };
    let token = token_mgr.get_valid_token().await;

    info!("Fetching tracks for playlist {}", playlist_id);
    let mut tracks = match spotify::playlists::get_playlist_tracks(&playlist_id, &token).await {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to fetch playlist tracks: {}", e),
    };
    utils::remove_duplicate_tracks(&mut tracks);

    if tracks.is_empty() {
        error!("{}", ColorError::EmptyInput);
    }
    info!("Found {} tracks, analyzing artwork...", tracks.len());

    let results = collect_signatures(tracks, &config).await;

    let policy = if strict {
        TrackErrorPolicy::Abort
    } else {
        TrackErrorPolicy::Skip
    };
    let collected = match color::collect_entries(results, policy) {
        Ok(collected) => collected,
        Err(e) => error!("Cannot analyze playlist artwork: {}", e),
    };
    for (track_id, e) in &collected.skipped {
        warning!("Skipping track {}: {}", track_id, e);
    }

    let ordered = if greedy {
        color::order_chained(&collected.entries, config.mode)
    } else {
        color::order(&collected.entries, config.mode)
    };
    let ordered = match ordered {
        Ok(track_ids) => track_ids,
        Err(e) => error!("Cannot order tracks: {}", e),
    };

    info!("Writing new track order back to playlist {}", playlist_id);
    let uris: Vec<String> = ordered.iter().map(|id| utils::track_uri(id)).collect();
    match spotify::playlists::replace_tracks(&playlist_id, &token, &uris).await {
        Ok(()) => success!("Sorted {} tracks by album-art color.", uris.len()),
        Err(e) => error!("Failed to update playlist: {}", e),
    }
}

/// Downloads and analyzes every track's artwork, one tokio task per track.
///
/// Network latency dominates the runtime, so the downloads run concurrently;
/// results are joined in input order, which keeps the final ordering
/// independent of completion order. Per-track failures stay in the result
/// list for the configured error policy to handle.
async fn collect_signatures(
    tracks: Vec<PlaylistTrackRef>,
    config: &SortConfig,
) -> Vec<(String, Result<ColorSignature, ColorError>)> {
    let pb = ProgressBar::new(tracks.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.blue}] {pos}/{len} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message("Extracting artwork colors");
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut handles = Vec::with_capacity(tracks.len());
    for track in tracks {
        let config = config.clone();
        let pb = pb.clone();
        handles.push(tokio::spawn(async move {
            let signature = track_signature(track.artwork_url.as_deref(), &config).await;
            pb.inc(1);
            (track.id, signature)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(pair) => results.push(pair),
            Err(e) => {
                warning!("Task join error: {}", e);
            }
        }
    }
    pb.finish_and_clear();

    results
}

async fn track_signature(
    artwork_url: Option<&str>,
    config: &SortConfig,
) -> Result<ColorSignature, ColorError> {
    let Some(url) = artwork_url else {
        return Err(ColorError::ArtworkUnavailable(
            "track has no album artwork".to_string(),
        ));
    };

    let bytes = download_artwork(url)
        .await
        .map_err(|e| ColorError::ArtworkUnavailable(e.to_string()))?;
    let image = image::load_from_memory(&bytes)?.to_rgb8();

    color::signature(&image, config)
}

async fn download_artwork(url: &str) -> Res<Vec<u8>> {
    let client = Client::new();
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}
