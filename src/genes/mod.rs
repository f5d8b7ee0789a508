//! Genome decoding: from opaque hex gene strings to comparable signatures.
//!
//! This module handles:
//! - Creature, genome and signature types
//! - The binary gene decoder for both genome encodings
//! - The embedded trait table (raw gene bits to part identifiers)

pub mod decoder;
pub mod traits;
pub mod types;

pub use decoder::{decode, Encoding};
pub use types::{BodyPart, Class, Creature, CreatureSignature, Genome, PartId};
