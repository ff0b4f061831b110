#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Identified;
use crate::error::{Error, Result};

/// Server-assigned trainer identifier.
pub type TrainerId = u32;

/// Gender choices offered by the trainer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for Gender {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(Error::validation(format!("unknown gender '{other}'"))),
        }
    }
}

/// A named owner of zero or more team members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub occupation: Option<String>,
}

impl Identified for Trainer {
    type Id = TrainerId;

    fn id(&self) -> TrainerId {
        self.id
    }
}

/// Body for creating or updating a trainer; everything except the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerPayload {
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub occupation: Option<String>,
}

impl TrainerPayload {
    /// Payload with only the required name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check required fields and normalise optional ones.
    ///
    /// The name is trimmed and must be non-empty, the age must be positive,
    /// and a blank occupation is sent as `null`.
    pub fn validated(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::validation("Trainer name is required"));
        }
        if self.age == Some(0) {
            return Err(Error::validation("Trainer age must be a positive number"));
        }
        let occupation = self
            .occupation
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Self {
            name,
            age: self.age,
            gender: self.gender,
            occupation,
        })
    }
}
