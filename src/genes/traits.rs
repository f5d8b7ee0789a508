//! Embedded gene trait table.
//!
//! Maps (gene class, body part, raw trait bits) to the marketplace part name.
//! The table ships with the crate; an entry missing for a decoded value is a
//! hard decode failure for the whole genome.
//!
//! Only the six base classes carry part genes; secret-class axies inherit
//! base-class parts, so the table has no Mech/Dusk/Dawn sections.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::DecodeError;

use super::types::{BodyPart, Class, PartId};

/// class name -> part slot -> trait bits -> part name.
type TraitTable = HashMap<String, HashMap<String, HashMap<String, String>>>;

static TRAIT_TABLE: Lazy<TraitTable> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/traits.json"))
        .expect("embedded trait table is valid JSON")
});

/// Look up the part identifier for a dominant gene.
pub fn part_id(
    gene_class: Class,
    part: BodyPart,
    trait_bits: &str,
) -> Result<PartId, DecodeError> {
    TRAIT_TABLE
        .get(&gene_class.to_string())
        .and_then(|parts| parts.get(&part.to_string()))
        .and_then(|entries| entries.get(trait_bits))
        .map(|name| PartId::new(part, name))
        .ok_or_else(|| DecodeError::UnknownTrait {
            part,
            class: gene_class,
            bits: trait_bits.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_all_base_classes_and_slots() {
        let base = [
            Class::Beast,
            Class::Bug,
            Class::Bird,
            Class::Plant,
            Class::Aquatic,
            Class::Reptile,
        ];
        for class in base {
            for part in BodyPart::ALL {
                assert!(
                    part_id(class, part, "000001").is_ok(),
                    "missing {class}/{part}"
                );
            }
        }
    }

    #[test]
    fn lookup_builds_slot_prefixed_id() {
        let id = part_id(Class::Beast, BodyPart::Horn, "000001").unwrap();
        assert_eq!(id.as_str(), "horn-little-branch");
    }

    #[test]
    fn unknown_bits_are_a_decode_error() {
        let err = part_id(Class::Beast, BodyPart::Eyes, "101010").unwrap_err();
        assert!(matches!(err, DecodeError::UnknownTrait { .. }));
    }

    #[test]
    fn secret_classes_have_no_part_genes() {
        assert!(part_id(Class::Mech, BodyPart::Eyes, "000001").is_err());
    }
}
