//! Active-team inference from battle-history samples.

pub mod infer;

pub use infer::{infer_active_team, ActiveTeam};
