//! Creature, genome and signature types.

use std::fmt;

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::DecodeError;

use super::decoder::{decode, Encoding};

/// Axie class, normalized to its canonical capitalized name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Class {
    /// Beast class.
    Beast,
    /// Bug class.
    Bug,
    /// Bird class.
    Bird,
    /// Plant class.
    Plant,
    /// Aquatic class.
    Aquatic,
    /// Reptile class.
    Reptile,
    /// Mech secret class.
    Mech,
    /// Dusk secret class.
    Dusk,
    /// Dawn secret class.
    Dawn,
}

/// Body-part slot, in the fixed signature order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum BodyPart {
    /// Eyes slot.
    Eyes,
    /// Mouth slot.
    Mouth,
    /// Ears slot.
    Ears,
    /// Horn slot.
    Horn,
    /// Back slot.
    Back,
    /// Tail slot.
    Tail,
}

impl BodyPart {
    /// All six slots in signature order.
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Eyes,
        BodyPart::Mouth,
        BodyPart::Ears,
        BodyPart::Horn,
        BodyPart::Back,
        BodyPart::Tail,
    ];
}

/// Marketplace part identifier, e.g. `eyes-puppy`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(String);

impl PartId {
    /// Build a part identifier from a slot and a trait name.
    pub fn new(part: BodyPart, name: &str) -> Self {
        Self(format!("{part}-{name}"))
    }

    /// The identifier as the marketplace criteria string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque fixed-width hexadecimal genome string, exactly as fetched.
///
/// One of two encodings, distinguished by digit count; immutable once
/// fetched, decoded on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome(String);

impl Genome {
    /// Wrap a raw genome string (`0x`-prefixed or bare).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The hex digits without any `0x` prefix.
    pub fn hex_digits(&self) -> &str {
        self.0.strip_prefix("0x").unwrap_or(&self.0)
    }

    /// The raw string as fetched.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Decoded, comparable representation of a genome: class plus the six part
/// identifiers in slot order (eyes, mouth, ears, horn, back, tail).
///
/// All six slots resolve or the decode fails as a whole; partial signatures
/// are never produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureSignature {
    /// Canonical class.
    pub class: Class,
    /// Part identifiers in slot order.
    pub parts: [PartId; 6],
}

impl CreatureSignature {
    /// Part identifiers as marketplace criteria strings, in slot order.
    pub fn part_ids(&self) -> Vec<String> {
        self.parts.iter().map(|p| p.as_str().to_string()).collect()
    }
}

impl fmt::Display for CreatureSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.class)?;
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{part}")?;
        }
        f.write_str("]")
    }
}

/// A creature with its genome and a lazily derived, cached signature.
#[derive(Debug)]
pub struct Creature {
    /// Creature id.
    pub id: u64,
    /// Genome as fetched.
    pub genome: Genome,
    signature: OnceCell<CreatureSignature>,
}

impl Creature {
    /// Create a creature from its id and genome.
    pub fn new(id: u64, genome: Genome) -> Self {
        Self {
            id,
            genome,
            signature: OnceCell::new(),
        }
    }

    /// The decoded signature, computed on first access and cached for the
    /// creature's lifetime. The encoding is detected from the genome length.
    pub fn signature(&self) -> Result<&CreatureSignature, DecodeError> {
        self.signature.get_or_try_init(|| {
            let encoding = Encoding::detect(&self.genome)?;
            decode(&self.genome, encoding)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn class_display_is_capitalized() {
        assert_eq!(Class::Beast.to_string(), "Beast");
        assert_eq!(Class::Aquatic.to_string(), "Aquatic");
    }

    #[test]
    fn class_from_string_is_case_insensitive() {
        assert_eq!(Class::from_str("beast").unwrap(), Class::Beast);
        assert_eq!(Class::from_str("Reptile").unwrap(), Class::Reptile);
    }

    #[test]
    fn body_part_display_is_lowercase() {
        assert_eq!(BodyPart::Eyes.to_string(), "eyes");
        assert_eq!(BodyPart::Tail.to_string(), "tail");
    }

    #[test]
    fn part_id_joins_slot_and_name() {
        assert_eq!(PartId::new(BodyPart::Eyes, "puppy").as_str(), "eyes-puppy");
    }

    #[test]
    fn genome_strips_hex_prefix() {
        assert_eq!(Genome::new("0xabcd").hex_digits(), "abcd");
        assert_eq!(Genome::new("abcd").hex_digits(), "abcd");
    }
}
