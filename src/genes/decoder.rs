//! Binary gene decoder.
//!
//! A genome is a fixed-width hex string partitioned into a class field and
//! six body-part groups. Each part group holds three genes (dominant and two
//! recessives); only the dominant gene contributes to the signature. The bit
//! layout depends on the encoding width.

use std::ops::Range;

use crate::error::DecodeError;

use super::traits;
use super::types::{BodyPart, Class, CreatureSignature, Genome, PartId};

/// Genome encoding width, distinguished by hex digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Legacy 256-bit encoding (64 hex digits).
    B256,
    /// 512-bit encoding (128 hex digits).
    B512,
}

impl Encoding {
    /// Hex digits required by this encoding.
    pub const fn hex_len(self) -> usize {
        match self {
            Encoding::B256 => 64,
            Encoding::B512 => 128,
        }
    }

    /// Detect the encoding from the genome length.
    pub fn detect(genome: &Genome) -> Result<Self, DecodeError> {
        match genome.hex_digits().len() {
            64 => Ok(Encoding::B256),
            128 => Ok(Encoding::B512),
            n => Err(DecodeError::UnsupportedLength(n)),
        }
    }

    /// Bit range of the genome-level class field.
    fn class_range(self) -> Range<usize> {
        match self {
            Encoding::B256 => 0..4,
            Encoding::B512 => 0..5,
        }
    }

    /// Bit offset of a part group.
    fn part_offset(self, part: BodyPart) -> usize {
        match self {
            // 32-bit groups.
            Encoding::B256 => match part {
                BodyPart::Eyes => 64,
                BodyPart::Mouth => 96,
                BodyPart::Ears => 128,
                BodyPart::Horn => 160,
                BodyPart::Back => 192,
                BodyPart::Tail => 224,
            },
            // 43-bit groups.
            Encoding::B512 => match part {
                BodyPart::Eyes => 149,
                BodyPart::Mouth => 213,
                BodyPart::Ears => 277,
                BodyPart::Horn => 341,
                BodyPart::Back => 405,
                BodyPart::Tail => 469,
            },
        }
    }

    /// Bit range of the dominant gene's class bits within a part group.
    ///
    /// The group starts with skin bits (2 or 4 wide), then the dominant gene;
    /// each gene leads with its own class bits.
    fn dominant_class_range(self, part: BodyPart) -> Range<usize> {
        let offset = self.part_offset(part);
        match self {
            Encoding::B256 => offset + 2..offset + 6,
            Encoding::B512 => offset + 4..offset + 9,
        }
    }

    /// Bit range of the dominant gene's trait bits within a part group.
    fn dominant_trait_range(self, part: BodyPart) -> Range<usize> {
        let offset = self.part_offset(part);
        match self {
            Encoding::B256 => offset + 6..offset + 12,
            Encoding::B512 => offset + 11..offset + 17,
        }
    }
}

/// Genome bytes addressed bit-by-bit, MSB first.
struct BitField {
    bytes: Vec<u8>,
}

impl BitField {
    fn bit(&self, index: usize) -> u32 {
        ((self.bytes[index / 8] >> (7 - index % 8)) & 1) as u32
    }

    /// Bits of `range` packed into an integer.
    fn value(&self, range: Range<usize>) -> u32 {
        range.fold(0, |acc, i| (acc << 1) | self.bit(i))
    }

    /// Bits of `range` as a `0`/`1` string, for table keys and diagnostics.
    fn bit_string(&self, range: Range<usize>) -> String {
        range
            .map(|i| if self.bit(i) == 1 { '1' } else { '0' })
            .collect()
    }
}

/// Map raw class-field bits to a class.
fn class_for(encoding: Encoding, value: u32) -> Option<Class> {
    let class = match (encoding, value) {
        (_, 0) => Class::Beast,
        (_, 1) => Class::Bug,
        (_, 2) => Class::Bird,
        (_, 3) => Class::Plant,
        (_, 4) => Class::Aquatic,
        (_, 5) => Class::Reptile,
        (Encoding::B256, 8) | (Encoding::B512, 16) => Class::Mech,
        (Encoding::B256, 9) | (Encoding::B512, 17) => Class::Dusk,
        (Encoding::B256, 10) | (Encoding::B512, 18) => Class::Dawn,
        _ => return None,
    };
    Some(class)
}

/// Decode a genome into a signature under the declared encoding.
///
/// Fails as a whole on a length/format mismatch or any slot whose dominant
/// gene is not in the trait table; a partially filled signature is never
/// produced.
pub fn decode(genome: &Genome, encoding: Encoding) -> Result<CreatureSignature, DecodeError> {
    let digits = genome.hex_digits();
    if digits.len() != encoding.hex_len() {
        return Err(DecodeError::Length {
            expected: encoding.hex_len(),
            actual: digits.len(),
        });
    }

    let bits = BitField {
        bytes: hex::decode(digits)?,
    };

    let class_range = encoding.class_range();
    let class = class_for(encoding, bits.value(class_range.clone())).ok_or_else(|| {
        DecodeError::UnknownClass {
            bits: bits.bit_string(class_range),
        }
    })?;

    let slot = |part: BodyPart| -> Result<PartId, DecodeError> {
        let class_range = encoding.dominant_class_range(part);
        let gene_class =
            class_for(encoding, bits.value(class_range.clone())).ok_or_else(|| {
                DecodeError::UnknownClass {
                    bits: bits.bit_string(class_range),
                }
            })?;
        let trait_bits = bits.bit_string(encoding.dominant_trait_range(part));
        traits::part_id(gene_class, part, &trait_bits)
    };

    Ok(CreatureSignature {
        class,
        parts: [
            slot(BodyPart::Eyes)?,
            slot(BodyPart::Mouth)?,
            slot(BodyPart::Ears)?,
            slot(BodyPart::Horn)?,
            slot(BodyPart::Back)?,
            slot(BodyPart::Tail)?,
        ],
    })
}
