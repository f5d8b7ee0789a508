//! The upstream-API seam.
//!
//! The valuation pipeline talks to the outside world through this trait so
//! tests can swap the real client for [`super::mock::MockGateway`].

use async_trait::async_trait;

use crate::error::RequestError;
use crate::genes::{CreatureSignature, Genome};

use super::battles::{self, BattleRecord};
use super::client::ApiClient;
use super::leaderboard::{self, LeaderboardEntry};
use super::marketplace::{self, TwinSearch};
use super::roster::{self, RosterAxie};

/// The five upstream operations the pipeline consumes.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// One leaderboard page.
    async fn leaderboard_page(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<LeaderboardEntry>, RequestError>;

    /// Up to `limit` most-recent battle records for a player.
    async fn battle_history(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<BattleRecord>, RequestError>;

    /// All of a user's own axies.
    async fn roster(&self, user_id: &str) -> Result<Vec<RosterAxie>, RequestError>;

    /// One creature's genome by id.
    async fn genome_of(&self, axie_id: u64) -> Result<Genome, RequestError>;

    /// For-sale creatures matching `signature`, ascending by price, at most
    /// `size` listings.
    async fn search_twins(
        &self,
        signature: &CreatureSignature,
        size: u32,
    ) -> Result<TwinSearch, RequestError>;
}

#[async_trait]
impl Gateway for ApiClient {
    async fn leaderboard_page(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<LeaderboardEntry>, RequestError> {
        leaderboard::fetch_page(self, limit, offset).await
    }

    async fn battle_history(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<BattleRecord>, RequestError> {
        battles::fetch_battle_history(self, user_id, limit).await
    }

    async fn roster(&self, user_id: &str) -> Result<Vec<RosterAxie>, RequestError> {
        roster::fetch_roster(self, user_id).await
    }

    async fn genome_of(&self, axie_id: u64) -> Result<Genome, RequestError> {
        marketplace::fetch_genome(self, axie_id).await
    }

    async fn search_twins(
        &self,
        signature: &CreatureSignature,
        size: u32,
    ) -> Result<TwinSearch, RequestError> {
        marketplace::search_twins(self, signature, size).await
    }
}
