use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    management::TokenManager,
    spotify,
    types::PlaylistTableRow,
    warning,
};

pub async fn playlists(search: Option<String>) {
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

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    match spotify::playlists::get_owned_playlists(&token).await {
        Ok(playlists) => {
            pb.finish_and_clear();

            // sort playlists by name
            let mut sorted_playlists = playlists.clone();
            sorted_playlists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

            if let Some(playlist_search) = search {
                let search_term = playlist_search.to_lowercase();
                sorted_playlists.retain(|p| p.name.to_lowercase().contains(&search_term));
            }

            // convert playlists to table rows
            let table_rows: Vec<PlaylistTableRow> = sorted_playlists
                .into_iter()
                .map(|p| PlaylistTableRow {
                    name: p.name,
                    tracks: p.tracks.total,
                    id: p.id,
                })
                .collect();

            let table = Table::new(table_rows);
            println!("{}", table);
        }
        Err(e) => {
            pb.finish_and_clear();
            warning!("Failed to load playlists. Err: {}", e)
        }
    }
}
