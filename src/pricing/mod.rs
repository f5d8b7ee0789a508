//! Twin discovery, pricing and the valuation pipeline.
//!
//! This module handles:
//! - Cheapest-twin lookup for one signature
//! - Per-player team valuation (all-or-nothing)
//! - The leaderboard sweep and roster valuation

pub mod twins;
pub mod valuation;

pub use twins::{find_cheapest_twin, find_twins, inspect_twins, TwinInspection};
pub use valuation::{
    valuate_leaderboard, valuate_player, valuate_roster, RosterRow, SweepReport, SweepStats,
    TeamValuation,
};
