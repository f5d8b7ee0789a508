//! Battle-history endpoint wire types and fetcher.

use serde::Deserialize;

use crate::error::RequestError;

use super::client::ApiClient;

/// Battle-kind marker for ranked PvP, the only kind eligible for team
/// inference.
pub const RANKED_PVP: &str = "pvp";

/// Battle-history response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BattleHistoryResponse {
    /// Most-recent-first battle records.
    pub battles: Vec<BattleRecord>,
}

/// One battle as reported by the history endpoint. Read-only.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BattleRecord {
    /// Participant ids in stored order; the first id owns the first fighter
    /// list.
    pub client_ids: Vec<String>,
    /// Fighters fielded by the first participant.
    #[serde(default)]
    pub first_client_fighters: Vec<Fighter>,
    /// Fighters fielded by the second participant.
    #[serde(default)]
    pub second_client_fighters: Vec<Fighter>,
    /// Battle-kind tag.
    pub battle_type: String,
}

/// One fighter slot inside a battle record.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Fighter {
    /// Creature id.
    pub axie_id: u64,
    /// Genome as reported by the battle feed, when present.
    #[serde(default)]
    pub gene: Option<String>,
}

/// Fetch up to `limit` most-recent battle records for a player.
pub async fn fetch_battle_history(
    client: &ApiClient,
    user_id: &str,
    limit: u32,
) -> Result<Vec<BattleRecord>, RequestError> {
    let query = [
        ("client_id", user_id.to_string()),
        ("type", RANKED_PVP.to_string()),
        ("limit", limit.to_string()),
    ];

    let response: BattleHistoryResponse = client
        .get_json(client.battles_url(), &query, "battle-history")
        .await?;

    Ok(response.battles)
}
