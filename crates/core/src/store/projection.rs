//! Read-only projections over the species catalog.

use std::{cmp::Ordering, collections::BTreeSet, str::FromStr};

use crate::{error::Error, models::Species};

/// Sort key for the pokédex listing. Numeric keys sort ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeciesSort {
    #[default]
    PokedexNumber,
    Name,
    Hp,
    Attack,
    Defense,
    Speed,
    Special,
}

impl FromStr for SpeciesSort {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pokedex_number" | "number" | "dex" => Ok(SpeciesSort::PokedexNumber),
            "name" => Ok(SpeciesSort::Name),
            "hp" | "base_hp" => Ok(SpeciesSort::Hp),
            "attack" | "base_attack" => Ok(SpeciesSort::Attack),
            "defense" | "base_defense" => Ok(SpeciesSort::Defense),
            "speed" | "base_speed" => Ok(SpeciesSort::Speed),
            "special" | "base_special" => Ok(SpeciesSort::Special),
            other => Err(Error::validation(format!("unknown sort field '{other}'"))),
        }
    }
}

/// Filter and ordering applied to the held catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesQuery {
    /// Exact type match against either slot.
    pub type_filter: Option<String>,
    /// Case-insensitive substring of the name or the pokédex number.
    pub search: Option<String>,
    pub sort: SpeciesSort,
}

/// Result of a query: the matching rows and the size of the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesPage {
    pub items: Vec<Species>,
    pub total: usize,
}

impl SpeciesPage {
    /// `Showing X of Y Pokémon`
    pub fn summary(&self) -> String {
        format!("Showing {} of {} Pokémon", self.items.len(), self.total)
    }
}

impl SpeciesQuery {
    fn matches(&self, species: &Species) -> bool {
        let type_ok = self
            .type_filter
            .as_deref()
            .filter(|kind| !kind.is_empty())
            .map_or(true, |kind| species.has_type(kind));

        let needle = self
            .search
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .unwrap_or_default();
        let search_ok = needle.is_empty()
            || species.name.to_lowercase().contains(&needle)
            || species.pokedex_number.to_string().contains(&needle);

        type_ok && search_ok
    }

    fn compare(&self, a: &Species, b: &Species) -> Ordering {
        match self.sort {
            SpeciesSort::PokedexNumber => a.pokedex_number.cmp(&b.pokedex_number),
            SpeciesSort::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SpeciesSort::Hp => a.base.hp.cmp(&b.base.hp),
            SpeciesSort::Attack => a.base.attack.cmp(&b.base.attack),
            SpeciesSort::Defense => a.base.defense.cmp(&b.base.defense),
            SpeciesSort::Speed => a.base.speed.cmp(&b.base.speed),
            SpeciesSort::Special => a.base.special.cmp(&b.base.special),
        }
    }

    /// Apply the query to a catalog without modifying it.
    pub fn apply(&self, catalog: &[Species]) -> SpeciesPage {
        let mut items: Vec<Species> = catalog
            .iter()
            .filter(|species| self.matches(species))
            .cloned()
            .collect();
        items.sort_by(|a, b| self.compare(a, b));
        SpeciesPage {
            items,
            total: catalog.len(),
        }
    }
}

/// Every type appearing in the catalog, sorted and de-duplicated.
pub fn distinct_types(catalog: &[Species]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|species| species.types())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
