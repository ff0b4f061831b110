//! Typed records exchanged with the remote API.
//!
//! Field names follow the JSON bodies exactly so decoding fails fast on a
//! shape mismatch instead of carrying missing fields around.

mod species;
mod team;
mod trainer;

pub use species::{BaseStats, Species, SpeciesId};
pub use team::{
    EffortValues, IndividualValues, Level, NewTeamMember, TeamMember, TeamMemberDetails,
    TeamMemberId, TeamMemberUpdate,
};
pub use trainer::{Gender, Trainer, TrainerId, TrainerPayload};

/// Records that carry a server-assigned identity.
pub trait Identified {
    /// Identifier type.
    type Id: Copy + Eq + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static;

    /// Server-assigned identifier.
    fn id(&self) -> Self::Id;
}
