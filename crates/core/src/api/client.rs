use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::PokedexApi;
use crate::{
    config::AppConfig,
    error::{Error, Result},
    models::{
        NewTeamMember, Species, TeamMember, TeamMemberDetails, TeamMemberId, TeamMemberUpdate,
        Trainer, TrainerId, TrainerPayload,
    },
};

/// Stateless HTTP client for the trainer/team API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client rooted at `base_url`, e.g. `http://127.0.0.1:5001`.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed)
            .map_err(|err| Error::Config(format!("invalid API base URL '{base_url}': {err}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: trimmed.to_string(),
        })
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.api_base_url)
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn dispatch(
        &self,
        builder: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<Response> {
        debug!(%method, path, "sending request");
        let response = builder.send().await.map_err(|err| {
            warn!(%method, path, "transport failure: {err}");
            Error::request_failed(err.status().map(|status| status.as_u16()), err.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = failure_message(status, &body);
        warn!(%method, path, status = status.as_u16(), "request rejected: {message}");
        Err(Error::request_failed(Some(status.as_u16()), message))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<T> {
        let response = self.dispatch(builder, method, path).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| Error::Decode(format!("{path}: {err}")))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(self.request(Method::GET, path), Method::GET, path).await
    }
}

#[async_trait]
impl PokedexApi for ApiClient {
    async fn list_trainers(&self) -> Result<Vec<Trainer>> {
        self.get(&trainers_path()).await
    }

    async fn get_trainer(&self, id: TrainerId) -> Result<Trainer> {
        self.get(&trainer_path(id)).await
    }

    async fn create_trainer(&self, payload: &TrainerPayload) -> Result<Trainer> {
        let path = trainers_path();
        let builder = self.request(Method::POST, &path).json(payload);
        self.fetch(builder, Method::POST, &path).await
    }

    async fn update_trainer(&self, id: TrainerId, payload: &TrainerPayload) -> Result<Trainer> {
        let path = trainer_path(id);
        let builder = self.request(Method::PUT, &path).json(payload);
        self.fetch(builder, Method::PUT, &path).await
    }

    async fn delete_trainer(&self, id: TrainerId) -> Result<()> {
        let path = trainer_path(id);
        self.dispatch(self.request(Method::DELETE, &path), Method::DELETE, &path)
            .await?;
        Ok(())
    }

    async fn list_species(&self, type_filter: Option<&str>) -> Result<Vec<Species>> {
        let path = species_path();
        let mut builder = self.request(Method::GET, &path);
        if let Some(kind) = type_filter.map(str::trim).filter(|kind| !kind.is_empty()) {
            builder = builder.query(&[("type", kind)]);
        }
        self.fetch(builder, Method::GET, &path).await
    }

    async fn list_team(&self, trainer_id: TrainerId) -> Result<Vec<TeamMember>> {
        self.get(&team_path(trainer_id)).await
    }

    async fn get_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<TeamMember> {
        self.get(&member_path(trainer_id, member_id)).await
    }

    async fn get_team_member_stats(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<TeamMemberDetails> {
        let path = format!("{}/stats", member_path(trainer_id, member_id));
        let details: TeamMemberDetails = self.get(&path).await?;
        if details.stats().is_none() {
            return Err(Error::Decode(format!("{path}: missing field `calculated_stats`")));
        }
        Ok(details)
    }

    async fn add_team_member(
        &self,
        trainer_id: TrainerId,
        payload: &NewTeamMember,
    ) -> Result<TeamMember> {
        let path = team_path(trainer_id);
        let builder = self.request(Method::POST, &path).json(payload);
        self.fetch(builder, Method::POST, &path).await
    }

    async fn update_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
        payload: &TeamMemberUpdate,
    ) -> Result<TeamMember> {
        let path = member_path(trainer_id, member_id);
        let builder = self.request(Method::PUT, &path).json(payload);
        self.fetch(builder, Method::PUT, &path).await
    }

    async fn delete_team_member(
        &self,
        trainer_id: TrainerId,
        member_id: TeamMemberId,
    ) -> Result<()> {
        let path = member_path(trainer_id, member_id);
        self.dispatch(self.request(Method::DELETE, &path), Method::DELETE, &path)
            .await?;
        Ok(())
    }
}

fn trainers_path() -> String {
    "/Trainers/".to_string()
}

fn trainer_path(id: TrainerId) -> String {
    format!("/Trainers/{id}")
}

fn species_path() -> String {
    "/Pokemon/".to_string()
}

fn team_path(trainer_id: TrainerId) -> String {
    format!("/Trainers/{trainer_id}/TrainerPokemon/")
}

fn member_path(trainer_id: TrainerId, member_id: TeamMemberId) -> String {
    format!("/Trainers/{trainer_id}/TrainerPokemon/{member_id}")
}

/// Prefer the server's `{"error": "..."}` body, fall back to the status reason.
fn failure_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            format!(
                "HTTP error! status: {}{}",
                status.as_u16(),
                status
                    .canonical_reason()
                    .map(|reason| format!(" {reason}"))
                    .unwrap_or_default()
            )
        })
}
