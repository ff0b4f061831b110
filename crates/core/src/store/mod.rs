//! Client-side collection store.
//!
//! The [`Store`] is the single owner of everything this client knows about
//! trainers, the team currently being viewed, and the species catalog. It is a
//! lagging mirror of server state with a single writer: local collections are
//! only touched after the server has acknowledged a request, a fetch-all
//! replaces a collection wholesale, and create/update/delete adjust one item.
//!
//! Overlapping calls are not serialised. Two updates to the same entity race
//! at the transport and whichever response lands last wins locally; the same
//! holds for two fetches of the same collection.

mod collection;
pub mod projection;

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

pub use collection::{Collection, CollectionStatus, LoadState};
pub use projection::{SpeciesPage, SpeciesQuery, SpeciesSort};

use crate::{
    api::PokedexApi,
    error::{Error, Result},
    models::{
        Level, NewTeamMember, Species, SpeciesId, TeamMember, TeamMemberDetails, TeamMemberId,
        TeamMemberUpdate, Trainer, TrainerId, TrainerPayload,
    },
    stats::{self, StatRange},
};

/// Receipt for a successful delete.
///
/// The store does not track what the UI is editing; callers compare their own
/// editing reference with [`Removed::clears`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removed<Id> {
    /// Identifier that the server deleted.
    pub id: Id,
    /// Whether the entity was present in the held collection.
    pub was_held: bool,
}

impl<Id: Copy + PartialEq> Removed<Id> {
    /// Whether an "editing" reference pointing at `editing` must be cleared.
    pub fn clears(&self, editing: Option<Id>) -> bool {
        editing == Some(self.id)
    }
}

/// Members of one trainer's team, tagged with whose team it is.
#[derive(Debug, Default)]
struct TeamView {
    trainer_id: Option<TrainerId>,
    members: Collection<TeamMember>,
}

impl TeamView {
    fn is_viewing(&self, trainer_id: TrainerId) -> bool {
        self.trainer_id == Some(trainer_id)
    }
}

#[derive(Debug, Default)]
struct Inner {
    trainers: Collection<Trainer>,
    current_trainer: Option<Trainer>,
    team: TeamView,
    species: Collection<Species>,
    error: Option<Error>,
}

/// Shared handle to the client's cached collections.
///
/// Cloning is cheap and every clone observes the same state. The lock is never
/// held across a request.
#[derive(Clone)]
pub struct Store {
    api: Arc<dyn PokedexApi>,
    inner: Arc<RwLock<Inner>>,
}

impl Store {
    /// Build an empty store on top of a resource client.
    pub fn new(api: Arc<dyn PokedexApi>) -> Self {
        Self {
            api,
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    fn record(&self, err: &Error) {
        self.inner.write().error = Some(err.clone());
    }

    // ---------------------------------------------------------------------
    // Trainers
    // ---------------------------------------------------------------------

    /// Fetch every trainer, replacing the held list on success.
    ///
    /// Failures are absorbed into the error state; the previous list is kept.
    pub async fn fetch_trainers(&self) {
        {
            let mut inner = self.inner.write();
            inner.error = None;
            inner.trainers.begin_load();
        }

        let result = self.api.list_trainers().await;

        let mut inner = self.inner.write();
        match result {
            Ok(trainers) => {
                info!("loaded {} trainers", trainers.len());
                inner.trainers.load_succeeded(trainers);
            }
            Err(err) => {
                warn!("failed to fetch trainers: {err}");
                inner.trainers.load_failed(err.clone());
                inner.error = Some(err);
            }
        }
    }

    /// Fetch a single trainer into the "current trainer" slot.
    ///
    /// Returns `None` on failure, with the error recorded.
    pub async fn fetch_trainer(&self, id: TrainerId) -> Option<Trainer> {
        self.inner.write().error = None;
        match self.api.get_trainer(id).await {
            Ok(trainer) => {
                self.inner.write().current_trainer = Some(trainer.clone());
                Some(trainer)
            }
            Err(err) => {
                warn!("failed to fetch trainer {id}: {err}");
                self.record(&err);
                None
            }
        }
    }

    /// Create a trainer and append the server's record to the held list.
    pub async fn create_trainer(&self, payload: TrainerPayload) -> Result<Trainer> {
        let payload = payload.validated()?;
        match self.api.create_trainer(&payload).await {
            Ok(trainer) => {
                info!(id = trainer.id, "created trainer {}", trainer.name);
                self.inner.write().trainers.append(trainer.clone());
                Ok(trainer)
            }
            Err(err) => {
                warn!("failed to create trainer: {err}");
                self.record(&err);
                Err(err)
            }
        }
    }

    /// Update a trainer and replace the held copy in place.
    ///
    /// If the id is not held, the server's record is dropped rather than
    /// appended so the list order never depends on update timing.
    pub async fn update_trainer(&self, id: TrainerId, payload: TrainerPayload) -> Result<Trainer> {
        let payload = payload.validated()?;
        match self.api.update_trainer(id, &payload).await {
            Ok(trainer) => {
                let mut inner = self.inner.write();
                if !inner.trainers.replace(trainer.clone()) {
                    debug!(id, "updated trainer not held locally; dropping");
                }
                if inner.current_trainer.as_ref().map(|current| current.id) == Some(trainer.id) {
                    inner.current_trainer = Some(trainer.clone());
                }
                Ok(trainer)
            }
            Err(err) => {
                warn!("failed to update trainer {id}: {err}");
                self.record(&err);
                Err(err)
            }
        }
    }

    /// Delete a trainer and remove it from the held list.
    ///
    /// The server removes the trainer's team along with it, so a team view
    /// bound to this trainer is emptied too.
    pub async fn delete_trainer(&self, id: TrainerId) -> Result<Removed<TrainerId>> {
        if let Err(err) = self.api.delete_trainer(id).await {
            warn!("failed to delete trainer {id}: {err}");
            self.record(&err);
            return Err(err);
        }

        let mut inner = self.inner.write();
        let was_held = inner.trainers.remove(id).is_some();
        if !was_held {
            debug!(id, "deleted trainer not held locally");
        }
        if inner.current_trainer.as_ref().map(|current| current.id) == Some(id) {
            inner.current_trainer = None;
        }
        if inner.team.is_viewing(id) {
            inner.team = TeamView::default();
        }
        info!(id, "deleted trainer");
        Ok(Removed { id, was_held })
    }

    // ---------------------------------------------------------------------
    // Species catalog
    // ---------------------------------------------------------------------

    /// Fetch the species catalog, optionally restricted server-side to one type.
    pub async fn fetch_species(&self, type_filter: Option<&str>) {
        {
            let mut inner = self.inner.write();
            inner.error = None;
            inner.species.begin_load();
        }

        let result = self.api.list_species(type_filter).await;

        let mut inner = self.inner.write();
        match result {
            Ok(species) => {
                info!("loaded {} species", species.len());
                inner.species.load_succeeded(species);
            }
            Err(err) => {
                warn!("failed to fetch species: {err}");
                inner.species.load_failed(err.clone());
                inner.error = Some(err);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Team
    // ---------------------------------------------------------------------

    /// Fetch a trainer's team and make it the viewed team.
    ///
    /// Switching to another trainer discards the old team immediately; a
    /// failed refresh of the same trainer keeps the last known-good members.
    pub async fn fetch_team(&self, trainer_id: TrainerId) {
        {
            let mut inner = self.inner.write();
            inner.error = None;
            if !inner.team.is_viewing(trainer_id) {
                inner.team = TeamView {
                    trainer_id: Some(trainer_id),
                    members: Collection::default(),
                };
            }
            inner.team.members.begin_load();
        }

        let result = self.api.list_team(trainer_id).await;

        let mut inner = self.inner.write();
        match result {
            Ok(members) => {
                info!(trainer_id, "loaded {} team members", members.len());
                inner.team.trainer_id = Some(trainer_id);
                inner.team.members.load_succeeded(members);
            }
            Err(err) => {
                warn!(trainer_id, "failed to fetch team: {err}");
                if inner.team.is_viewing(trainer_id) {
                    inner.team.members.load_failed(err.clone());
                }
                inner.error = Some(err);
            }
        }
    }

    /// Add a member to a trainer's team.
    ///
    /// The new member is appended locally only when that trainer's team is the
    /// one being viewed.
    pub async fn add_team_member(
        &self,
        trainer_id: TrainerId,
        payload: NewTeamMember,
    ) -> Result<TeamMember> {
        let payload = payload.validated()?;
        match self.api.add_team_member(trainer_id, &payload).await {
            Ok(member) => {
                info!(trainer_id, id = member.id, "added team member");
                let mut inner = self.inner.write();
                if inner.team.is_viewing(trainer_id) {
                    inner.team.members.append(member.clone());
                }
                Ok(member)
            }
            Err(err) => {
                warn!(trainer_id, "failed to add team member: {err}");
                self.record(&err);
                Err(err)
            }
        }
    }

    /// Change a member's nickname or level and replace the held copy in place.
    pub async fn update_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
        payload: TeamMemberUpdate,
    ) -> Result<TeamMember> {
        let payload = payload.validated()?;
        match self
            .api
            .update_team_member(trainer_id, member_id, &payload)
            .await
        {
            Ok(member) => {
                let mut inner = self.inner.write();
                let viewing = inner.team.is_viewing(trainer_id);
                if !(viewing && inner.team.members.replace(member.clone())) {
                    debug!(trainer_id, member_id, "updated member not held locally; dropping");
                }
                Ok(member)
            }
            Err(err) => {
                warn!(trainer_id, member_id, "failed to update team member: {err}");
                self.record(&err);
                Err(err)
            }
        }
    }

    /// Remove a member from a trainer's team.
    pub async fn delete_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<Removed<TeamMemberId>> {
        if let Err(err) = self.api.delete_team_member(trainer_id, member_id).await {
            warn!(trainer_id, member_id, "failed to delete team member: {err}");
            self.record(&err);
            return Err(err);
        }

        let mut inner = self.inner.write();
        let was_held = inner.team.is_viewing(trainer_id)
            && inner.team.members.remove(member_id).is_some();
        info!(trainer_id, member_id, "removed team member");
        Ok(Removed {
            id: member_id,
            was_held,
        })
    }

    /// Fetch one member with server-computed stats. Nothing is cached.
    pub async fn team_member_stats(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<TeamMemberDetails> {
        self.api
            .get_team_member_stats(trainer_id, member_id)
            .await
            .map_err(|err| {
                warn!(trainer_id, member_id, "failed to fetch member stats: {err}");
                self.record(&err);
                err
            })
    }

    // ---------------------------------------------------------------------
    // Derived views
    // ---------------------------------------------------------------------

    /// Snapshot of the held trainers, in server order plus local appends.
    pub fn trainers(&self) -> Vec<Trainer> {
        self.inner.read().trainers.items().to_vec()
    }

    pub fn trainer_by_id(&self, id: TrainerId) -> Option<Trainer> {
        self.inner.read().trainers.get(id).cloned()
    }

    pub fn has_trainers(&self) -> bool {
        !self.inner.read().trainers.is_empty()
    }

    pub fn current_trainer(&self) -> Option<Trainer> {
        self.inner.read().current_trainer.clone()
    }

    /// Members of the viewed team.
    pub fn team(&self) -> Vec<TeamMember> {
        self.inner.read().team.members.items().to_vec()
    }

    /// Whose team is currently held.
    pub fn team_trainer_id(&self) -> Option<TrainerId> {
        self.inner.read().team.trainer_id
    }

    pub fn team_member_by_id(&self, id: TeamMemberId) -> Option<TeamMember> {
        self.inner.read().team.members.get(id).cloned()
    }

    pub fn species(&self) -> Vec<Species> {
        self.inner.read().species.items().to_vec()
    }

    pub fn species_by_id(&self, id: SpeciesId) -> Option<Species> {
        self.inner.read().species.get(id).cloned()
    }

    /// Filtered and sorted view of the held catalog.
    pub fn query_species(&self, query: &SpeciesQuery) -> SpeciesPage {
        query.apply(self.inner.read().species.items())
    }

    /// Every type present in the held catalog, sorted.
    pub fn species_types(&self) -> Vec<String> {
        projection::distinct_types(self.inner.read().species.items())
    }

    /// Nickname, falling back to the species name from the held catalog.
    pub fn display_name(&self, member: &TeamMember) -> String {
        let inner = self.inner.read();
        member.display_name(inner.species.get(member.pokemon_id))
    }

    /// Stat range a new member of `species_id` would have at `level`.
    ///
    /// `None` when the species is not in the held catalog.
    pub fn preview(&self, species_id: SpeciesId, level: Level) -> Option<StatRange> {
        self.inner
            .read()
            .species
            .get(species_id)
            .map(|species| stats::preview_range(&species.base, level))
    }

    pub fn trainers_status(&self) -> CollectionStatus {
        self.inner.read().trainers.status()
    }

    pub fn team_status(&self) -> CollectionStatus {
        self.inner.read().team.members.status()
    }

    pub fn species_status(&self) -> CollectionStatus {
        self.inner.read().species.status()
    }

    /// Whether any collection has a fetch in flight.
    pub fn loading(&self) -> bool {
        let inner = self.inner.read();
        inner.trainers.is_loading() || inner.team.members.is_loading() || inner.species.is_loading()
    }

    /// Last failure propagated from the resource client.
    pub fn error(&self) -> Option<Error> {
        self.inner.read().error.clone()
    }

    pub fn clear_error(&self) {
        self.inner.write().error = None;
    }
}
