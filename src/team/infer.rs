//! Majority-vote recovery of a player's active team.

use tracing::debug;

use crate::api::battles::{BattleRecord, RANKED_PVP};

/// The 3 creatures most consistently fielded by one player, derived once per
/// valuation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTeam {
    /// Creature ids, ordered by vote count with ties in first-observed order.
    pub creature_ids: [u64; 3],
}

/// Infer a player's active team from a window of battle records.
///
/// Only ranked-PvP records count. Each creature gets one vote per record it
/// appears in (repeats within one team do not stack). The top 3 ids by vote
/// win; ties keep first-observed order, which inherits the upstream
/// most-recent-first ordering of the battle feed — repeated calls on the same
/// input are deterministic. Returns `None` when fewer than 3 distinct ids are
/// observed; the caller treats that as "cannot value this player".
pub fn infer_active_team(records: &[BattleRecord], player_id: &str) -> Option<ActiveTeam> {
    let mut tally: Vec<(u64, u32)> = Vec::new();

    for record in records.iter().filter(|r| r.battle_type == RANKED_PVP) {
        let fighters = if record.client_ids.first().map(String::as_str) == Some(player_id) {
            &record.first_client_fighters
        } else if record.client_ids.get(1).map(String::as_str) == Some(player_id) {
            &record.second_client_fighters
        } else {
            debug!(player_id, "record does not involve player, ignoring");
            continue;
        };

        let mut seen_in_record: Vec<u64> = Vec::with_capacity(3);
        for fighter in fighters {
            if seen_in_record.contains(&fighter.axie_id) {
                continue;
            }
            seen_in_record.push(fighter.axie_id);
            match tally.iter_mut().find(|(id, _)| *id == fighter.axie_id) {
                Some((_, votes)) => *votes += 1,
                None => tally.push((fighter.axie_id, 1)),
            }
        }
    }

    if tally.len() < 3 {
        debug!(
            player_id,
            distinct = tally.len(),
            "fewer than 3 identifiable creatures"
        );
        return None;
    }

    // Stable sort: equal vote counts keep first-observed order.
    tally.sort_by(|a, b| b.1.cmp(&a.1));

    Some(ActiveTeam {
        creature_ids: [tally[0].0, tally[1].0, tally[2].0],
    })
}
