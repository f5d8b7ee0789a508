//! Twin discovery over the marketplace.

use tracing::debug;

use crate::api::{Gateway, TwinListing};
use crate::error::{RequestError, ValuerError};
use crate::genes::{Creature, CreatureSignature};

/// Find the cheapest currently-listed twin for a signature.
///
/// Zero marketplace matches is a normal outcome, not an error. When listings
/// tie on price the marketplace's own ascending order is authoritative and
/// the first result wins.
pub async fn find_cheapest_twin<G: Gateway + ?Sized>(
    gateway: &G,
    signature: &CreatureSignature,
) -> Result<Option<TwinListing>, RequestError> {
    let page = gateway.search_twins(signature, 1).await?;

    if page.total == 0 {
        debug!(%signature, "no twin currently listed");
        return Ok(None);
    }

    Ok(page.listings.into_iter().next())
}

/// List up to `size` twins for a signature, cheapest first.
pub async fn find_twins<G: Gateway + ?Sized>(
    gateway: &G,
    signature: &CreatureSignature,
    size: u32,
) -> Result<Vec<TwinListing>, RequestError> {
    Ok(gateway.search_twins(signature, size).await?.listings)
}

/// A creature's signature together with its current twins.
#[derive(Debug, Clone)]
pub struct TwinInspection {
    /// Decoded signature of the inspected creature.
    pub signature: CreatureSignature,
    /// Twins currently for sale, cheapest first.
    pub listings: Vec<TwinListing>,
}

/// Inspect the twins of one creature by id: fetch its genome, decode it and
/// list up to `size` matching listings.
pub async fn inspect_twins<G: Gateway + ?Sized>(
    gateway: &G,
    axie_id: u64,
    size: u32,
) -> Result<TwinInspection, ValuerError> {
    let genome = gateway.genome_of(axie_id).await?;
    let creature = Creature::new(axie_id, genome);
    let signature = creature.signature()?.clone();
    let listings = find_twins(gateway, &signature, size).await?;

    Ok(TwinInspection {
        signature,
        listings,
    })
}
