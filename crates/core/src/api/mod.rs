//! Remote resource access.
//!
//! [`PokedexApi`] is the seam between the store and the network: one method per
//! (resource, verb) pair, no retries, and every failure surfaced as an
//! [`Error`](crate::Error). [`ApiClient`] is the HTTP implementation.

mod client;
#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

pub use client::ApiClient;

use crate::{
    error::Result,
    models::{
        NewTeamMember, Species, TeamMember, TeamMemberDetails, TeamMemberId, TeamMemberUpdate,
        Trainer, TrainerId, TrainerPayload,
    },
};

/// Typed operations against the trainer/team API.
#[async_trait]
pub trait PokedexApi: Send + Sync {
    /// `GET /Trainers/`
    async fn list_trainers(&self) -> Result<Vec<Trainer>>;

    /// `GET /Trainers/{id}`
    async fn get_trainer(&self, id: TrainerId) -> Result<Trainer>;

    /// `POST /Trainers/`
    async fn create_trainer(&self, payload: &TrainerPayload) -> Result<Trainer>;

    /// `PUT /Trainers/{id}`
    async fn update_trainer(&self, id: TrainerId, payload: &TrainerPayload) -> Result<Trainer>;

    /// `DELETE /Trainers/{id}`
    async fn delete_trainer(&self, id: TrainerId) -> Result<()>;

    /// `GET /Pokemon/`, optionally `?type=<kind>`.
    async fn list_species(&self, type_filter: Option<&str>) -> Result<Vec<Species>>;

    /// `GET /Trainers/{id}/TrainerPokemon/`
    async fn list_team(&self, trainer_id: TrainerId) -> Result<Vec<TeamMember>>;

    /// `GET /Trainers/{id}/TrainerPokemon/{tpId}`
    async fn get_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<TeamMember>;

    /// `GET /Trainers/{id}/TrainerPokemon/{tpId}/stats`
    async fn get_team_member_stats(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<TeamMemberDetails>;

    /// `POST /Trainers/{id}/TrainerPokemon/`
    async fn add_team_member(
        &self,
        trainer_id: TrainerId,
        payload: &NewTeamMember,
    ) -> Result<TeamMember>;

    /// `PUT /Trainers/{id}/TrainerPokemon/{tpId}`
    async fn update_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
        payload: &TeamMemberUpdate,
    ) -> Result<TeamMember>;

    /// `DELETE /Trainers/{id}/TrainerPokemon/{tpId}`
    async fn delete_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<()>;
}
