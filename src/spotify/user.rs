use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{config, types::CurrentUser};

/// Retrieves the profile of the currently authenticated user.
///
/// Used to resolve the user id that playlist ownership is checked against;
/// only playlists owned by the current user can be reordered.
pub async fn get_current_user(token: &str) -> Result<CurrentUser, reqwest::Error> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    loop {
        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let user = response.json::<CurrentUser>().await?;
        return Ok(user);
    }
}
