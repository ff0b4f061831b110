#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{species::SpeciesId, trainer::TrainerId, BaseStats, Identified, Species};
use crate::{
    error::{Error, Result},
    stats::{self, CalculatedStats, MAX_IV},
};

/// Server-assigned team member identifier.
pub type TeamMemberId = u32;

/// Creature level, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(100);

    /// Validate raw user input.
    pub fn new(value: i64) -> Result<Self> {
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            Ok(Level(value as u8))
        } else {
            Err(Error::validation("Level must be between 1 and 100"))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Level {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Level::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-stat variation assigned once by the server when the member is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndividualValues {
    #[serde(rename = "iv_attack", default)]
    pub attack: u8,
    #[serde(rename = "iv_defense", default)]
    pub defense: u8,
    #[serde(rename = "iv_speed", default)]
    pub speed: u8,
    #[serde(rename = "iv_special", default)]
    pub special: u8,
}

impl IndividualValues {
    /// Same value for every stat.
    pub fn uniform(value: u8) -> Self {
        Self {
            attack: value,
            defense: value,
            speed: value,
            special: value,
        }
    }

    /// Whether every value sits inside `0..=MAX_IV`.
    pub fn in_range(&self) -> bool {
        [self.attack, self.defense, self.speed, self.special]
            .iter()
            .all(|value| *value <= MAX_IV)
    }
}

/// Effort accumulators; zero for a freshly created member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EffortValues {
    #[serde(rename = "ev_hp", default)]
    pub hp: u16,
    #[serde(rename = "ev_attack", default)]
    pub attack: u16,
    #[serde(rename = "ev_defense", default)]
    pub defense: u16,
    #[serde(rename = "ev_speed", default)]
    pub speed: u16,
    #[serde(rename = "ev_special", default)]
    pub special: u16,
}

impl EffortValues {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// A creature owned by one trainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub trainer_id: TrainerId,
    pub pokemon_id: SpeciesId,
    #[serde(default)]
    pub nickname: Option<String>,
    pub level: Level,
    #[serde(flatten)]
    pub ivs: IndividualValues,
    #[serde(flatten)]
    pub evs: EffortValues,
    /// Species name, when the server joins it into the row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pokemon_name: Option<String>,
    /// Stats as computed by the server, when included in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_stats: Option<CalculatedStats>,
}

impl TeamMember {
    /// Nickname if set, otherwise the species name.
    pub fn display_name(&self, species: Option<&Species>) -> String {
        self.nickname
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .or(self.pokemon_name.as_deref())
            .or(species.map(|species| species.name.as_str()))
            .unwrap_or("Unnamed")
            .to_string()
    }

    /// Compute stats locally from the species' base stats.
    pub fn local_stats(&self, base: &BaseStats) -> CalculatedStats {
        stats::calculate_all(base, self.level, &self.ivs, &self.evs)
    }

    /// Server-reported stats when present, otherwise the local computation.
    pub fn resolved_stats(&self, species: &Species) -> CalculatedStats {
        self.calculated_stats
            .unwrap_or_else(|| self.local_stats(&species.base))
    }

    /// Whether server-reported stats (if any) agree with the local formula.
    pub fn verify_stats(&self, species: &Species) -> bool {
        match self.calculated_stats {
            Some(reported) => reported == self.local_stats(&species.base),
            None => true,
        }
    }
}

impl Identified for TeamMember {
    type Id = TeamMemberId;

    fn id(&self) -> TeamMemberId {
        self.id
    }
}

/// Body for adding a member to a trainer's team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeamMember {
    /// Selected species; `0` means nothing was picked.
    pub pokemon_id: SpeciesId,
    pub nickname: Option<String>,
    /// Raw level input, checked by [`NewTeamMember::validated`].
    pub level: i64,
}

impl NewTeamMember {
    pub fn new(pokemon_id: SpeciesId, level: i64) -> Self {
        Self {
            pokemon_id,
            nickname: None,
            level,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Reject a missing species or out-of-range level; blank nicknames become `null`.
    pub fn validated(self) -> Result<Self> {
        if self.pokemon_id == 0 {
            return Err(Error::validation("Please select a Pokemon"));
        }
        Level::new(self.level)?;
        Ok(Self {
            nickname: normalize_nickname(self.nickname),
            ..self
        })
    }
}

/// Body for renaming or re-levelling a member. IVs are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberUpdate {
    pub nickname: Option<String>,
    pub level: i64,
}

impl TeamMemberUpdate {
    pub fn new(nickname: Option<String>, level: i64) -> Self {
        Self { nickname, level }
    }

    pub fn validated(self) -> Result<Self> {
        Level::new(self.level)?;
        Ok(Self {
            nickname: normalize_nickname(self.nickname),
            level: self.level,
        })
    }
}

fn normalize_nickname(nickname: Option<String>) -> Option<String> {
    nickname
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// A member as returned by the `/stats` endpoint, with species details joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberDetails {
    #[serde(flatten)]
    pub member: TeamMember,
    #[serde(default)]
    pub pokedex_number: Option<u32>,
    #[serde(default)]
    pub type1: Option<String>,
    #[serde(default)]
    pub type2: Option<String>,
}

impl TeamMemberDetails {
    /// Server-computed stats; present on every well-formed details response.
    pub fn stats(&self) -> Option<CalculatedStats> {
        self.member.calculated_stats
    }
}
