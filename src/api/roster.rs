//! Community fighters endpoint: a user's own axies.

use serde::Deserialize;

use crate::error::RequestError;
use crate::genes::Genome;

use super::client::ApiClient;

/// Fighters response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct FightersResponse {
    /// The user's axies.
    #[serde(rename = "_items")]
    pub items: Vec<RosterAxie>,
}

/// One axie owned by the queried user. The endpoint reports the 512-bit
/// genome inline, so no marketplace round-trip is needed to decode it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RosterAxie {
    /// Axie id.
    pub id: u64,
    /// 512-bit genome.
    #[serde(rename = "genes512")]
    pub genes: Genome,
}

/// Fetch all of a user's on-chain axies.
pub async fn fetch_roster(
    client: &ApiClient,
    user_id: &str,
) -> Result<Vec<RosterAxie>, RequestError> {
    let query = [
        ("axieType", "ronin".to_string()),
        ("userID", user_id.to_string()),
    ];

    let response: FightersResponse = client
        .get_json(client.fighters_url(), &query, "fighters")
        .await?;

    Ok(response.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_fighters_payload() {
        let payload = serde_json::json!({
            "_items": [
                {"id": 1601978, "genes512": "0xdeadbeef"}
            ]
        });

        let response: FightersResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.items[0].id, 1601978);
        assert_eq!(response.items[0].genes.as_str(), "0xdeadbeef");
    }
}
