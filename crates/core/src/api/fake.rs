//! In-memory stand-in for the remote API, used by store tests.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::PokedexApi;
use crate::{
    error::{Error, Result},
    models::{
        EffortValues, IndividualValues, Level, NewTeamMember, Species, TeamMember,
        TeamMemberDetails, TeamMemberId, TeamMemberUpdate, Trainer, TrainerId, TrainerPayload,
    },
    stats,
};

#[derive(Default)]
pub(crate) struct FakeApi {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    trainers: Vec<Trainer>,
    species: Vec<Species>,
    team: Vec<TeamMember>,
    next_id: u32,
    fail_next: Option<Error>,
    calls: usize,
}

impl FakeState {
    fn assign_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Count the call and consume a queued failure, if any.
    fn enter(&mut self) -> Result<()> {
        self.calls += 1;
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str) -> Error {
    Error::request_failed(Some(404), format!("{what} not found"))
}

impl FakeApi {
    pub(crate) fn with_species(species: Vec<Species>) -> Self {
        let fake = Self::default();
        fake.state.lock().species = species;
        fake
    }

    /// Insert a trainer server-side without going through the store.
    pub(crate) fn seed_trainer(&self, name: &str) -> Trainer {
        let mut state = self.state.lock();
        let trainer = Trainer {
            id: state.assign_id(),
            name: name.to_string(),
            age: None,
            gender: None,
            occupation: None,
        };
        state.trainers.push(trainer.clone());
        trainer
    }

    /// Make the next call fail with `err` before touching any data.
    pub(crate) fn fail_next(&self, err: Error) {
        self.state.lock().fail_next = Some(err);
    }

    pub(crate) fn calls(&self) -> usize {
        self.state.lock().calls
    }
}

#[async_trait]
impl PokedexApi for FakeApi {
    async fn list_trainers(&self) -> Result<Vec<Trainer>> {
        let mut state = self.state.lock();
        state.enter()?;
        Ok(state.trainers.clone())
    }

    async fn get_trainer(&self, id: TrainerId) -> Result<Trainer> {
        let mut state = self.state.lock();
        state.enter()?;
        state
            .trainers
            .iter()
            .find(|trainer| trainer.id == id)
            .cloned()
            .ok_or_else(|| not_found("Trainer"))
    }

    async fn create_trainer(&self, payload: &TrainerPayload) -> Result<Trainer> {
        let mut state = self.state.lock();
        state.enter()?;
        let trainer = Trainer {
            id: state.assign_id(),
            name: payload.name.clone(),
            age: payload.age,
            gender: payload.gender,
            occupation: payload.occupation.clone(),
        };
        state.trainers.push(trainer.clone());
        Ok(trainer)
    }

    async fn update_trainer(&self, id: TrainerId, payload: &TrainerPayload) -> Result<Trainer> {
        let mut state = self.state.lock();
        state.enter()?;
        let trainer = state
            .trainers
            .iter_mut()
            .find(|trainer| trainer.id == id)
            .ok_or_else(|| not_found("Trainer"))?;
        trainer.name = payload.name.clone();
        trainer.age = payload.age;
        trainer.gender = payload.gender;
        trainer.occupation = payload.occupation.clone();
        Ok(trainer.clone())
    }

    async fn delete_trainer(&self, id: TrainerId) -> Result<()> {
        let mut state = self.state.lock();
        state.enter()?;
        let before = state.trainers.len();
        state.trainers.retain(|trainer| trainer.id != id);
        if state.trainers.len() == before {
            return Err(not_found("Trainer"));
        }
        state.team.retain(|member| member.trainer_id != id);
        Ok(())
    }

    async fn list_species(&self, type_filter: Option<&str>) -> Result<Vec<Species>> {
        let mut state = self.state.lock();
        state.enter()?;
        Ok(state
            .species
            .iter()
            .filter(|species| type_filter.map_or(true, |kind| species.has_type(kind)))
            .cloned()
            .collect())
    }

    async fn list_team(&self, trainer_id: TrainerId) -> Result<Vec<TeamMember>> {
        let mut state = self.state.lock();
        state.enter()?;
        Ok(state
            .team
            .iter()
            .filter(|member| member.trainer_id == trainer_id)
            .cloned()
            .collect())
    }

    async fn get_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<TeamMember> {
        let mut state = self.state.lock();
        state.enter()?;
        state
            .team
            .iter()
            .find(|member| member.id == member_id && member.trainer_id == trainer_id)
            .cloned()
            .ok_or_else(|| not_found("Trainer Pokémon"))
    }

    async fn get_team_member_stats(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<TeamMemberDetails> {
        let mut state = self.state.lock();
        state.enter()?;
        let mut member = state
            .team
            .iter()
            .find(|member| member.id == member_id && member.trainer_id == trainer_id)
            .cloned()
            .ok_or_else(|| not_found("Trainer Pokémon"))?;
        let species = state
            .species
            .iter()
            .find(|species| species.id == member.pokemon_id)
            .cloned()
            .ok_or_else(|| not_found("Pokémon"))?;

        member.calculated_stats = Some(stats::calculate_all(
            &species.base,
            member.level,
            &member.ivs,
            &member.evs,
        ));
        member.pokemon_name = Some(species.name.clone());
        Ok(TeamMemberDetails {
            member,
            pokedex_number: Some(species.pokedex_number),
            type1: Some(species.type1.clone()),
            type2: species.type2.clone(),
        })
    }

    async fn add_team_member(
        &self,
        trainer_id: TrainerId,
        payload: &NewTeamMember,
    ) -> Result<TeamMember> {
        let mut state = self.state.lock();
        state.enter()?;
        if !state.trainers.iter().any(|trainer| trainer.id == trainer_id) {
            return Err(not_found("Trainer"));
        }
        let level = Level::new(payload.level)
            .map_err(|err| Error::request_failed(Some(400), err.to_string()))?;
        let id = state.assign_id();
        // Deterministic stand-in for the server's random IV roll.
        let roll = |offset: u32| ((id * 7 + offset) % 16) as u8;
        let member = TeamMember {
            id,
            trainer_id,
            pokemon_id: payload.pokemon_id,
            nickname: payload.nickname.clone(),
            level,
            ivs: IndividualValues {
                attack: roll(0),
                defense: roll(3),
                speed: roll(5),
                special: roll(11),
            },
            evs: EffortValues::default(),
            pokemon_name: None,
            calculated_stats: None,
        };
        state.team.push(member.clone());
        Ok(member)
    }

    async fn update_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
        payload: &TeamMemberUpdate,
    ) -> Result<TeamMember> {
        let mut state = self.state.lock();
        state.enter()?;
        let level = Level::new(payload.level)
            .map_err(|err| Error::request_failed(Some(400), err.to_string()))?;
        let member = state
            .team
            .iter_mut()
            .find(|member| member.id == member_id && member.trainer_id == trainer_id)
            .ok_or_else(|| not_found("Trainer Pokémon"))?;
        member.nickname = payload.nickname.clone();
        member.level = level;
        Ok(member.clone())
    }

    async fn delete_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.enter()?;
        let before = state.team.len();
        state
            .team
            .retain(|member| !(member.id == member_id && member.trainer_id == trainer_id));
        if state.team.len() == before {
            return Err(not_found("Trainer Pokémon"));
        }
        Ok(())
    }
}
