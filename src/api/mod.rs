//! Upstream API surface.
//!
//! This module handles:
//! - The resilient request client (bounded retries, fixed backoff)
//! - Wire types and fetchers for the leaderboard, battle-history and
//!   community-fighters endpoints
//! - The marketplace GraphQL operations
//! - The `Gateway` seam and its mock implementation for testing

pub mod battles;
pub mod client;
pub mod gateway;
pub mod leaderboard;
pub mod marketplace;
pub mod mock;
pub mod roster;

pub use client::{send_with_retry, ApiClient, RetryPolicy};
pub use gateway::Gateway;
pub use leaderboard::LeaderboardEntry;
pub use marketplace::{TwinListing, TwinSearch};
pub use mock::MockGateway;
