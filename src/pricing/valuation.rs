//! Team valuation pipeline.
//!
//! Orchestrates, per player: battle-history fetch, active-team inference,
//! per-creature genome fetch and decode, twin lookup, and exact price
//! summation. A team is priced as a unit or not at all.

use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::api::{leaderboard, Gateway};
use crate::config::Config;
use crate::error::{RequestError, ValuerError};
use crate::genes::Creature;
use crate::metrics;
use crate::team::infer_active_team;

use super::twins::find_cheapest_twin;

/// Final output row for one ranked player. Immutable; decoupled from the
/// creature graph so it can outlive the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamValuation {
    /// Player rank at sweep time.
    pub rank: u32,
    /// Player id.
    pub player_id: String,
    /// Cheapest-twin ids, one per active-team creature.
    pub twin_ids: [String; 3],
    /// Exact sum of the three twin prices.
    pub total_price: Decimal,
}

/// Cheapest-twin pricing for one axie of a user's roster. Unlike team
/// valuation this is per-axie: an unmatched axie keeps empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    /// The user's own axie id.
    pub axie_id: u64,
    /// Cheapest twin id, when one is listed and the genome decodes.
    pub twin_id: Option<String>,
    /// Cheapest twin price.
    pub price: Option<Decimal>,
}

/// Counters for one leaderboard sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Players pulled from the leaderboard.
    pub players_seen: u64,
    /// Players with a priced team.
    pub players_valuated: u64,
    /// Players skipped for absence reasons (no eligible history, decode
    /// failure, missing twin).
    pub players_skipped: u64,
    /// Players skipped because a request spent its retry budget.
    pub players_failed: u64,
    /// Priced teams dropped by the price cap.
    pub over_cap: u64,
}

/// Result of one leaderboard sweep.
#[derive(Debug, Clone)]
pub struct SweepReport {
    /// Valuation rows, in leaderboard order.
    pub rows: Vec<TeamValuation>,
    /// Sweep counters.
    pub stats: SweepStats,
    /// When the sweep finished.
    pub generated_at: OffsetDateTime,
}

/// Valuate one player's active team.
///
/// Returns `Ok(None)` when the player cannot be valued: no eligible battle
/// history, fewer than 3 identifiable creatures, a genome that fails to
/// decode, or any creature without a listed twin. Request failures propagate
/// so the caller can contain them at the per-player boundary.
pub async fn valuate_player<G: Gateway + ?Sized>(
    gateway: &G,
    config: &Config,
    player_id: &str,
    rank: u32,
) -> Result<Option<TeamValuation>, RequestError> {
    let records = gateway.battle_history(player_id, config.battle_limit).await?;

    let Some(team) = infer_active_team(&records, player_id) else {
        debug!(player_id, "no active team inferable, skipping");
        return Ok(None);
    };

    let mut twin_ids = Vec::with_capacity(3);
    let mut total_price = Decimal::ZERO;

    for creature_id in team.creature_ids {
        let genome = gateway.genome_of(creature_id).await?;
        let creature = Creature::new(creature_id, genome);

        let signature = match creature.signature() {
            Ok(signature) => signature,
            Err(err) => {
                debug!(player_id, creature_id, error = %err, "genome decode failed, skipping player");
                metrics::inc_decode_failures();
                return Ok(None);
            }
        };

        let Some(twin) = find_cheapest_twin(gateway, signature).await? else {
            debug!(player_id, creature_id, "creature has no listed twin, skipping player");
            metrics::inc_twins_missing();
            return Ok(None);
        };

        twin_ids.push(twin.listing_id);
        total_price += twin.price;
    }

    let twin_ids: [String; 3] = twin_ids.try_into().expect("team has exactly 3 creatures");

    Ok(Some(TeamValuation {
        rank,
        player_id: player_id.to_string(),
        twin_ids,
        total_price,
    }))
}

/// Valuate `places` ranked players starting at `offset`.
///
/// One player's failure never aborts the batch; only the leaderboard fetch
/// itself is fatal for the sweep.
pub async fn valuate_leaderboard<G: Gateway + ?Sized>(
    gateway: &G,
    config: &Config,
    offset: u32,
    places: u32,
) -> Result<SweepReport, ValuerError> {
    let leaders =
        leaderboard::fetch_range(gateway, config.leaderboard_page_size, offset, places).await?;
    info!(leaders = leaders.len(), offset, "leaderboard fetched, valuating teams");

    let mut stats = SweepStats::default();
    let mut rows = Vec::new();

    for leader in &leaders {
        stats.players_seen += 1;

        match valuate_player(gateway, config, &leader.user_id, leader.top_rank).await {
            Ok(Some(valuation)) => {
                if config
                    .max_team_price
                    .is_some_and(|cap| valuation.total_price > cap)
                {
                    debug!(
                        rank = valuation.rank,
                        price = %valuation.total_price,
                        "team over price cap, dropping"
                    );
                    stats.over_cap += 1;
                    continue;
                }

                info!(
                    rank = valuation.rank,
                    twins = %valuation.twin_ids.join("|"),
                    price = %valuation.total_price,
                    "team valuated"
                );
                metrics::inc_players_valuated();
                stats.players_valuated += 1;
                rows.push(valuation);
            }
            Ok(None) => {
                metrics::inc_players_skipped();
                stats.players_skipped += 1;
            }
            Err(err) => {
                warn!(player_id = %leader.user_id, error = %err, "request failed, skipping player");
                metrics::inc_players_failed();
                stats.players_failed += 1;
            }
        }
    }

    Ok(SweepReport {
        rows,
        stats,
        generated_at: OffsetDateTime::now_utc(),
    })
}

/// Price the cheapest twin of every axie a user owns.
///
/// Per-axie: a genome that fails to decode or a missing twin yields empty
/// cells for that axie only.
pub async fn valuate_roster<G: Gateway + ?Sized>(
    gateway: &G,
    user_id: &str,
) -> Result<Vec<RosterRow>, RequestError> {
    let roster = gateway.roster(user_id).await?;
    let mut rows = Vec::with_capacity(roster.len());

    for axie in roster {
        let creature = Creature::new(axie.id, axie.genes);

        let twin = match creature.signature() {
            Ok(signature) => find_cheapest_twin(gateway, signature).await?,
            Err(err) => {
                debug!(axie_id = creature.id, error = %err, "genome decode failed");
                metrics::inc_decode_failures();
                None
            }
        };

        rows.push(match twin {
            Some(twin) => RosterRow {
                axie_id: creature.id,
                twin_id: Some(twin.listing_id),
                price: Some(twin.price),
            },
            None => RosterRow {
                axie_id: creature.id,
                twin_id: None,
                price: None,
            },
        });
    }

    Ok(rows)
}
