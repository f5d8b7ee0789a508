//! Leaderboard endpoint wire types and pagination glue.

use serde::Deserialize;
use tracing::debug;

use crate::error::RequestError;

use super::client::ApiClient;
use super::gateway::Gateway;

/// Leaderboard response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    /// Page of ranked players.
    #[serde(rename = "_items")]
    pub items: Vec<LeaderboardEntry>,
}

/// One ranked player.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Player id.
    #[serde(rename = "userID")]
    pub user_id: String,
    /// Current rank.
    #[serde(rename = "topRank")]
    pub top_rank: u32,
}

/// Fetch one leaderboard page.
pub async fn fetch_page(
    client: &ApiClient,
    limit: u32,
    offset: u32,
) -> Result<Vec<LeaderboardEntry>, RequestError> {
    let query = [("limit", limit.to_string()), ("offset", offset.to_string())];

    let response: LeaderboardResponse = client
        .get_json(client.leaderboard_url(), &query, "leaderboard")
        .await?;

    Ok(response.items)
}

/// Fetch `places` ranked players starting at `offset`, paging by `page_size`.
///
/// Stops early when the board runs out. Any page failure propagates; without
/// player ids there is nothing to do for the sweep.
pub async fn fetch_range<G: Gateway + ?Sized>(
    gateway: &G,
    page_size: u32,
    offset: u32,
    places: u32,
) -> Result<Vec<LeaderboardEntry>, RequestError> {
    let mut leaders = Vec::with_capacity(places as usize);
    let mut fetched = 0u32;

    while fetched < places {
        let limit = page_size.min(places - fetched);
        let page = gateway.leaderboard_page(limit, offset + fetched).await?;
        let got = page.len() as u32;
        debug!(offset = offset + fetched, limit, got, "leaderboard page");
        leaders.extend(page);

        if got < limit {
            break;
        }
        fetched += got;
    }

    Ok(leaders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_leaderboard_payload() {
        let payload = serde_json::json!({
            "_items": [
                {"userID": "u-1", "topRank": 5},
                {"userID": "u-2", "topRank": 6}
            ]
        });

        let response: LeaderboardResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].user_id, "u-1");
        assert_eq!(response.items[0].top_rank, 5);
    }
}
