//! Axie Infinity leaderboard team valuation.
//!
//! For each ranked player, find the cheapest currently-listed "twin"
//! (structurally identical axie) for every axie in that player's active
//! battle team, and sum those prices into a team valuation:
//!
//! ```text
//! leaderboard page ──▶ battle history ──▶ active team (majority vote)
//!                                              │
//!                              genome fetch ◀──┘
//!                                   │
//!                              gene decode ──▶ twin search ──▶ Σ prices
//! ```
//!
//! A team is priced as a unit or not at all: a single undecodable genome or
//! unmatched creature skips the whole player, never the batch.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: Request client, upstream endpoints and the gateway seam
//! - [`genes`]: Genome decoding into comparable signatures
//! - [`team`]: Active-team inference from battle history
//! - [`pricing`]: Twin discovery and the valuation pipeline
//! - [`report`]: Table rendering and CSV export
//! - [`metrics`]: Prometheus counters and histograms

pub mod api;
pub mod config;
pub mod error;
pub mod genes;
pub mod metrics;
pub mod pricing;
pub mod report;
pub mod team;

pub use config::Config;
pub use error::{Result, ValuerError};
