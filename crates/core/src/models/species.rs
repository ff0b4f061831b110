#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use super::Identified;

/// Species row identifier (distinct from the pokédex number).
pub type SpeciesId = u32;

/// The five base stat values of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(rename = "base_hp")]
    pub hp: u16,
    #[serde(rename = "base_attack")]
    pub attack: u16,
    #[serde(rename = "base_defense")]
    pub defense: u16,
    #[serde(rename = "base_speed")]
    pub speed: u16,
    #[serde(rename = "base_special")]
    pub special: u16,
}

/// Read-only reference data describing a kind of creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub pokedex_number: u32,
    pub name: String,
    pub type1: String,
    #[serde(default)]
    pub type2: Option<String>,
    #[serde(flatten)]
    pub base: BaseStats,
    /// Flavor text shown on the detail card.
    #[serde(rename = "entry", default)]
    pub flavor_text: Option<String>,
}

impl Species {
    /// One or two elemental types, primary first.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.type1.as_str()).chain(
            self.type2
                .as_deref()
                .filter(|value| !value.is_empty()),
        )
    }

    /// Whether either elemental type equals `kind` exactly.
    pub fn has_type(&self, kind: &str) -> bool {
        self.types().any(|value| value == kind)
    }

    /// `Grass/Poison` style label.
    pub fn type_label(&self) -> String {
        self.types().collect::<Vec<_>>().join("/")
    }
}

impl Identified for Species {
    type Id = SpeciesId;

    fn id(&self) -> SpeciesId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_flattened_base_stats_and_entry() {
        let species: Species = serde_json::from_value(json!({
            "id": 1,
            "pokedex_number": 1,
            "name": "Bulbasaur",
            "type1": "Grass",
            "type2": "Poison",
            "base_hp": 45,
            "base_attack": 49,
            "base_defense": 49,
            "base_special": 65,
            "base_speed": 45,
            "entry": "A strange seed was planted on its back at birth."
        }))
        .unwrap();

        assert_eq!(species.base.hp, 45);
        assert_eq!(species.base.special, 65);
        assert_eq!(species.base.speed, 45);
        assert_eq!(species.type_label(), "Grass/Poison");
        assert!(species.has_type("Poison"));
        assert!(species.flavor_text.is_some());
    }

    #[test]
    fn single_type_species_has_no_secondary() {
        let species: Species = serde_json::from_value(json!({
            "id": 4,
            "pokedex_number": 4,
            "name": "Charmander",
            "type1": "Fire",
            "type2": null,
            "base_hp": 39,
            "base_attack": 52,
            "base_defense": 43,
            "base_special": 50,
            "base_speed": 65
        }))
        .unwrap();

        assert_eq!(species.types().collect::<Vec<_>>(), vec!["Fire"]);
        assert!(!species.has_type("Flying"));
        assert_eq!(species.flavor_text, None);
    }
}
