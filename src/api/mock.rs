//! Mock gateway for unit testing.
//!
//! This module provides a mock gateway that can be used in tests without
//! making real network requests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AttemptError, RequestError};
use crate::genes::{CreatureSignature, Genome};

use super::battles::BattleRecord;
use super::gateway::Gateway;
use super::leaderboard::LeaderboardEntry;
use super::marketplace::{TwinListing, TwinSearch};
use super::roster::RosterAxie;

/// Configuration for mock gateway behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockFailures {
    /// Fail leaderboard pages.
    pub leaderboard: bool,
    /// Fail battle-history fetches.
    pub battles: bool,
    /// Fail roster fetches.
    pub roster: bool,
    /// Fail genome fetches.
    pub genome: bool,
    /// Fail twin searches.
    pub twins: bool,
}

/// Mock gateway with canned responses and per-call failure toggles.
#[derive(Debug, Default)]
pub struct MockGateway {
    failures: MockFailures,
    leaderboard: Mutex<Vec<LeaderboardEntry>>,
    battles: Mutex<HashMap<String, Vec<BattleRecord>>>,
    rosters: Mutex<HashMap<String, Vec<RosterAxie>>>,
    genomes: Mutex<HashMap<u64, Genome>>,
    listings: Mutex<HashMap<String, Vec<TwinListing>>>,
}

/// A terminal request failure, as the real client reports after spending its
/// retry budget.
fn mock_failure(label: &str) -> RequestError {
    RequestError::RetriesExhausted {
        label: label.to_string(),
        attempts: 1,
        source: AttemptError::Payload("mock failure".to_string()),
    }
}

fn signature_key(signature: &CreatureSignature) -> String {
    signature.to_string()
}

impl MockGateway {
    /// Create a mock gateway with no canned data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock gateway with the given failure toggles.
    pub fn with_failures(failures: MockFailures) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    /// Set the full leaderboard; pages slice into it by offset and limit.
    pub fn set_leaderboard(&self, entries: Vec<LeaderboardEntry>) {
        *self.leaderboard.lock().unwrap() = entries;
    }

    /// Set a player's battle history.
    pub fn set_battles(&self, user_id: impl Into<String>, records: Vec<BattleRecord>) {
        self.battles.lock().unwrap().insert(user_id.into(), records);
    }

    /// Set a user's roster.
    pub fn set_roster(&self, user_id: impl Into<String>, axies: Vec<RosterAxie>) {
        self.rosters.lock().unwrap().insert(user_id.into(), axies);
    }

    /// Set the genome returned for an axie id.
    pub fn set_genome(&self, axie_id: u64, genome: Genome) {
        self.genomes.lock().unwrap().insert(axie_id, genome);
    }

    /// Set the for-sale listings matching a signature, cheapest first.
    pub fn set_listings(&self, signature: &CreatureSignature, listings: Vec<TwinListing>) {
        self.listings
            .lock()
            .unwrap()
            .insert(signature_key(signature), listings);
    }

    /// Clear all canned data.
    pub fn clear(&self) {
        self.leaderboard.lock().unwrap().clear();
        self.battles.lock().unwrap().clear();
        self.rosters.lock().unwrap().clear();
        self.genomes.lock().unwrap().clear();
        self.listings.lock().unwrap().clear();
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn leaderboard_page(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<LeaderboardEntry>, RequestError> {
        if self.failures.leaderboard {
            return Err(mock_failure("leaderboard"));
        }

        let entries = self.leaderboard.lock().unwrap();
        Ok(entries
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn battle_history(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<BattleRecord>, RequestError> {
        if self.failures.battles {
            return Err(mock_failure("battle-history"));
        }

        let battles = self.battles.lock().unwrap();
        Ok(battles
            .get(user_id)
            .map(|records| records.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn roster(&self, user_id: &str) -> Result<Vec<RosterAxie>, RequestError> {
        if self.failures.roster {
            return Err(mock_failure("fighters"));
        }

        let rosters = self.rosters.lock().unwrap();
        Ok(rosters.get(user_id).cloned().unwrap_or_default())
    }

    async fn genome_of(&self, axie_id: u64) -> Result<Genome, RequestError> {
        if self.failures.genome {
            return Err(mock_failure("axie-detail"));
        }

        let genomes = self.genomes.lock().unwrap();
        // An unknown id behaves like a payload the envelope never matched.
        genomes
            .get(&axie_id)
            .cloned()
            .ok_or_else(|| mock_failure("axie-detail"))
    }

    async fn search_twins(
        &self,
        signature: &CreatureSignature,
        size: u32,
    ) -> Result<TwinSearch, RequestError> {
        if self.failures.twins {
            return Err(mock_failure("twin-search"));
        }

        let listings = self.listings.lock().unwrap();
        let matches = listings
            .get(&signature_key(signature))
            .cloned()
            .unwrap_or_default();

        Ok(TwinSearch {
            total: matches.len() as u64,
            listings: matches.into_iter().take(size as usize).collect(),
        })
    }
}
