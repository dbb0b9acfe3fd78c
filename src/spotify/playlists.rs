use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    spotify::user,
    types::{
        Playlist, PlaylistTrackRef, PlaylistTracksPage, PlaylistsPage, ReplaceTracksRequest,
        SnapshotResponse,
    },
    warning,
};

/// Delay between chunked write-back requests to stay clear of the write
/// rate limit.
const CHUNK_PAUSE: Duration = Duration::from_millis(100);

/// Spotify accepts at most 100 track URIs per playlist write request.
const WRITE_CHUNK_SIZE: usize = 100;

/// Retrieves all playlists owned by the current user that contain at least
/// one track.
///
/// Follows the `next` URL of each page until the listing is exhausted.
/// Collaborative playlists and playlists the user merely follows are
/// filtered out, since the write-back can only reorder playlists the user
/// owns.
pub async fn get_owned_playlists(token: &str) -> Result<Vec<Playlist>, reqwest::Error> {
    let user = user::get_current_user(token).await?;

    let client = Client::new();
    let mut playlists: Vec<Playlist> = Vec::new();
    let mut next = Some(format!(
        "{uri}/me/playlists?limit=50",
        uri = &config::spotify_apiurl()
    ));

    while let Some(api_url) = next.take() {
        let response = match send_with_retry(client.get(&api_url).bearer_auth(token)).await {
            Ok(Some(resp)) => resp,
            Ok(None) => {
                next = Some(api_url);
                continue; // rate limited, retry the same page
            }
            Err(err) => return Err(err),
        };

        let page = response.json::<PlaylistsPage>().await?;
        playlists.extend(
            page.items
                .into_iter()
                .filter(|p| p.owner.id == user.id && p.tracks.total > 0),
        );
        next = page.next;
    }

    Ok(playlists)
}

/// Retrieves the tracks of a playlist in playlist order.
///
/// Follows the `next` URL of each page until the listing is exhausted. Each
/// item is projected down to the track id and the URL of its first (largest)
/// album image. Items without a track object or without an id (local files,
/// removed tracks) cannot be written back and are dropped here; missing
/// artwork is kept as `None` so the sort pipeline can apply its per-track
/// error policy.
pub async fn get_playlist_tracks(
    playlist_id: &str,
    token: &str,
) -> Result<Vec<PlaylistTrackRef>, reqwest::Error> {
    let client = Client::new();
    let mut tracks: Vec<PlaylistTrackRef> = Vec::new();
    let mut next = Some(format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    ));

    while let Some(api_url) = next.take() {
        let response = match send_with_retry(client.get(&api_url).bearer_auth(token)).await {
            Ok(Some(resp)) => resp,
            Ok(None) => {
                next = Some(api_url);
                continue; // rate limited, retry the same page
            }
            Err(err) => return Err(err),
        };

        let page = response.json::<PlaylistTracksPage>().await?;
        for item in page.items {
            let Some(track) = item.track else {
                continue;
            };
            let Some(id) = track.id else {
                continue;
            };
            let artwork_url = track.album.images.first().map(|image| image.url.clone());
            tracks.push(PlaylistTrackRef { id, artwork_url });
        }
        next = page.next;
    }

    Ok(tracks)
}

/// Replaces the tracks of a playlist with the given URIs in the given order.
///
/// The playlist is first cleared with an empty replace request. A single
/// chunk of up to 100 URIs is written with one replace request; longer lists
/// are appended chunk by chunk with a short pause between requests to stay
/// under the write rate limit.
pub async fn replace_tracks(
    playlist_id: &str,
    token: &str,
    uris: &[String],
) -> Result<(), reqwest::Error> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let chunks: Vec<&[String]> = uris.chunks(WRITE_CHUNK_SIZE).collect();

    if chunks.len() == 1 {
        let body = ReplaceTracksRequest {
            uris: chunks[0].to_vec(),
        };
        write_chunk(client.put(&api_url).bearer_auth(token).json(&body)).await?;
        return Ok(());
    }

    // clear first, then append chunk by chunk
    let clear = ReplaceTracksRequest { uris: Vec::new() };
    write_chunk(client.put(&api_url).bearer_auth(token).json(&clear)).await?;

    for chunk in chunks {
        let body = ReplaceTracksRequest {
            uris: chunk.to_vec(),
        };
        write_chunk(client.post(&api_url).bearer_auth(token).json(&body)).await?;
        sleep(CHUNK_PAUSE).await;
    }

    Ok(())
}

/// Sends one write request, retrying rate limits, and checks that Spotify
/// acknowledged it with a snapshot id.
async fn write_chunk(request: RequestBuilder) -> Result<(), reqwest::Error> {
    loop {
        let Some(request) = request.try_clone() else {
            // non-cloneable request bodies don't occur here; send once
            let response = request.send().await?.error_for_status()?;
            response.json::<SnapshotResponse>().await?;
            return Ok(());
        };

        match send_with_retry(request).await {
            Ok(Some(response)) => {
                response.json::<SnapshotResponse>().await?;
                return Ok(());
            }
            Ok(None) => continue, // rate limited, retry
            Err(err) => return Err(err),
        }
    }
}

/// Sends a request with the module's standard retry behavior: 502 responses
/// are retried in place after a pause, 429 responses honor `Retry-After` and
/// report `Ok(None)` so the caller can re-issue the request, other errors
/// are propagated.
async fn send_with_retry(
    request: RequestBuilder,
) -> Result<Option<reqwest::Response>, reqwest::Error> {
    loop {
        let Some(attempt) = request.try_clone() else {
            // fall back to a single uncloneable send
            return Ok(Some(request.send().await?.error_for_status()?));
        };

        let response = match attempt.send().await {
            Ok(resp) => resp,
            Err(err) => return Err(err),
        };

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            if let Some(retry_after) = response.headers().get("retry-after") {
                let retry_after = retry_after
                    .to_str()
                    .unwrap_or("0")
                    .parse::<u64>()
                    .unwrap_or(0);
                if retry_after <= 120 {
                    sleep(Duration::from_secs(retry_after)).await;
                } else {
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again tomorrow.",
                        retry_after
                    );
                }
            }
            return Ok(None);
        }

        match response.error_for_status() {
            Ok(valid_response) => return Ok(Some(valid_response)),
            Err(err) => {
                if let Some(status) = err.status() {
                    if status == StatusCode::BAD_GATEWAY {
                        sleep(Duration::from_secs(10)).await;
                        continue; // retry
                    }
                }
                return Err(err); // propagate other errors
            }
        }
    }
}
