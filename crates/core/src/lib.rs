#![warn(clippy::all, missing_docs)]

//! Core client logic for the trainer and team manager.
//!
//! This crate hosts the typed API records, the remote resource client,
//! the client-side collection store, and the stat derivation shared by
//! every front end.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod stats;
pub mod store;

pub use api::{ApiClient, PokedexApi};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use models::{
    Gender, Level, NewTeamMember, Species, TeamMember, TeamMemberUpdate, Trainer, TrainerPayload,
};
pub use stats::{CalculatedStats, Stat};
pub use store::{LoadState, Removed, SpeciesQuery, SpeciesSort, Store};
