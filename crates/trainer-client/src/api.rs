//! Typed access to the Brain Trainer service
//!
//! [`TrainerApi`] wraps an [`ApiClient`] with one method per endpoint and keeps
//! the token from the last successful login.
//!
//! # Example
//!
//! ```rust,no_run
//! use trainer_client::{ApiClientConfig, LoginCredential, TrainerApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = TrainerApi::new(ApiClientConfig::new("https://api.example.com"))?;
//!
//!     let token = api.login(&LoginCredential::new("alice@example.com", "secret")).await?;
//!     let stats = api.game_stats(&token.user.id).await?;
//!     println!("{} has {} game records", token.user.name, stats.len());
//!
//!     Ok(())
//! }
//! ```

use crate::credentials::{LoginCredential, OAuthClient};
use crate::http::{ApiClient, ApiClientConfig, ApiRequest};
use crate::models::{
    Achievement, AuthToken, User, UserAchievement, UserAchievementUpdate, UserGameStat,
    UserGameStatUpdate, UserUpdate,
};
use crate::{Error, Result};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Percent-encode one path segment
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Path of a user resource
fn user_path(user_id: &str) -> Result<String> {
    if user_id.trim().is_empty() {
        return Err(Error::InvalidInput("user id must not be empty".to_string()));
    }
    Ok(format!("/users/{}", segment(user_id)))
}

/// Typed client for the service endpoints
#[derive(Debug)]
pub struct TrainerApi {
    client: ApiClient,
    oauth: OAuthClient,
    session: RwLock<Option<AuthToken>>,
}

impl TrainerApi {
    /// Create a client with the placeholder OAuth credentials
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(config)?,
            oauth: OAuthClient::default(),
            session: RwLock::new(None),
        })
    }

    /// Use different OAuth client credentials for logins
    pub fn with_oauth_client(mut self, oauth: OAuthClient) -> Self {
        self.oauth = oauth;
        self
    }

    /// Underlying transport
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Exchange credentials for a token and keep it as the session
    ///
    /// # Errors
    ///
    /// - `Error::Encoding` - the credentials could not be turned into a body;
    ///   nothing was sent. Valid UTF-8 credentials always encode
    /// - `Error::Api` - the service rejected the login or was unreachable
    pub async fn login(&self, credential: &LoginCredential) -> Result<AuthToken> {
        let body = credential
            .to_request_body_for(&self.oauth)
            .ok_or_else(|| Error::Encoding("login credentials".to_string()))?;

        let request = ApiRequest::post("/auth/login").form_body(body);
        let token: AuthToken = self.client.send(request).await?.data;

        tracing::info!(user_id = %token.user.id, "Logged in");
        *self.session.write().await = Some(token.clone());
        Ok(token)
    }

    /// Resume with a token obtained earlier
    pub async fn resume(&self, token: AuthToken) {
        *self.session.write().await = Some(token);
    }

    /// Drop the current session
    pub async fn logout(&self) {
        if self.session.write().await.take().is_some() {
            tracing::info!("Logged out");
        }
    }

    /// Token of the current session, if any
    pub async fn session(&self) -> Option<AuthToken> {
        self.session.read().await.clone()
    }

    async fn authorization(&self) -> Result<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(AuthToken::authorization_header)
            .ok_or(Error::NoSession)
    }

    async fn authed<T>(&self, request: ApiRequest) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = request.bearer(self.authorization().await?);
        Ok(self.client.send(request).await?.data)
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Profile of the logged-in user
    pub async fn current_user(&self) -> Result<User> {
        self.authed(ApiRequest::get("/users/me")).await
    }

    /// Patch a user profile
    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User> {
        let request = ApiRequest::patch(user_path(user_id)?).json_body(update)?;
        self.authed(request).await
    }

    // =========================================================================
    // Achievements
    // =========================================================================

    /// Achievement catalog
    pub async fn achievements(&self) -> Result<Vec<Achievement>> {
        self.authed(ApiRequest::get("/achievements")).await
    }

    /// Progress of one user on every achievement
    pub async fn user_achievements(&self, user_id: &str) -> Result<Vec<UserAchievement>> {
        self.authed(ApiRequest::get(format!("{}/achievements", user_path(user_id)?)))
            .await
    }

    /// Patch one user achievement
    pub async fn update_user_achievement(
        &self,
        user_id: &str,
        achievement_id: i64,
        update: &UserAchievementUpdate,
    ) -> Result<UserAchievement> {
        let path = format!("{}/achievements/{}", user_path(user_id)?, achievement_id);
        self.authed(ApiRequest::patch(path).json_body(update)?).await
    }

    // =========================================================================
    // Game statistics
    // =========================================================================

    /// Statistics of one user for every game played
    pub async fn game_stats(&self, user_id: &str) -> Result<Vec<UserGameStat>> {
        self.authed(ApiRequest::get(format!("{}/stats", user_path(user_id)?)))
            .await
    }

    /// Patch the statistics for one game
    pub async fn update_game_stat(
        &self,
        user_id: &str,
        game_id: i64,
        update: &UserGameStatUpdate,
    ) -> Result<UserGameStat> {
        let path = format!("{}/stats/{}", user_path(user_id)?, game_id);
        self.authed(ApiRequest::patch(path).json_body(update)?).await
    }
}
