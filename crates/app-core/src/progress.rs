//! Progress synchronization
//!
//! Turns finished games and achievement steps into the partial updates the
//! service expects, and sends them. Every update is computed from the
//! server's current values, so only legitimate changes are ever sent: high
//! scores never drop, experience never decreases, achievement progress stays
//! within its maximum.

use crate::games::GameKind;
use std::sync::Arc;
use thiserror::Error;
use trainer_client::{
    ContractError, TrainerApi, User, UserAchievement, UserGameStat, UserUpdate,
};

/// Progress sync errors
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Client error
    #[error("Client error: {0}")]
    Client(#[from] trainer_client::Error),

    /// Achievement is not in the catalog
    #[error("Unknown achievement: {0}")]
    UnknownAchievement(i64),

    /// Server data violates a contract
    #[error("Contract violation: {0}")]
    Contract(#[from] ContractError),
}

/// Result type for progress operations
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Outcome of recording one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Statistics after the update
    pub stat: UserGameStat,
    /// Whether the score beat the previous best
    pub new_high_score: bool,
}

/// Keeps the player's progress in sync with the service
///
/// # Example
///
/// ```rust,no_run
/// use app_core::games::GameKind;
/// use app_core::progress::ProgressService;
/// use std::sync::Arc;
/// use trainer_client::{ApiClientConfig, LoginCredential, TrainerApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = Arc::new(TrainerApi::new(ApiClientConfig::new("https://api.example.com"))?);
///     let token = api.login(&LoginCredential::new("alice@example.com", "secret")).await?;
///
///     let progress = ProgressService::new(api);
///     let result = progress.record_game(&token.user.id, GameKind::ChimpTest, 14).await?;
///     println!("new high score: {}", result.new_high_score);
///     Ok(())
/// }
/// ```
pub struct ProgressService {
    api: Arc<TrainerApi>,
}

impl ProgressService {
    /// Create a service over an API client
    pub fn new(api: Arc<TrainerApi>) -> Self {
        Self { api }
    }

    /// Latest profile of the logged-in user
    pub async fn refresh_profile(&self) -> Result<User> {
        Ok(self.api.current_user().await?)
    }

    /// Record a finished game
    ///
    /// Increments the play count and raises the high score if `score` beats it.
    pub async fn record_game(&self, user_id: &str, game: GameKind, score: i64) -> Result<GameResult> {
        let game_id = game.game_id();
        let current = self
            .api
            .game_stats(user_id)
            .await?
            .into_iter()
            .find(|s| s.game_id == game_id)
            .unwrap_or_else(|| UserGameStat::new(user_id, game_id));

        let update = current.record_score(score);
        let new_high_score = update.high_score.is_some();
        let stat = self.api.update_game_stat(user_id, game_id, &update).await?;

        tracing::info!(
            game = game.slug(),
            score,
            games_played = stat.games_played,
            new_high_score,
            "Recorded game"
        );
        Ok(GameResult { stat, new_high_score })
    }

    /// Advance an achievement by `steps`
    ///
    /// Nothing is sent when the achievement is already complete.
    pub async fn advance_achievement(
        &self,
        user_id: &str,
        achievement_id: i64,
        steps: u32,
    ) -> Result<UserAchievement> {
        let achievement = self
            .api
            .achievements()
            .await?
            .into_iter()
            .find(|a| a.id == achievement_id)
            .ok_or(ProgressError::UnknownAchievement(achievement_id))?;
        achievement.validate()?;

        let current = self
            .api
            .user_achievements(user_id)
            .await?
            .into_iter()
            .find(|a| a.achievement_id == achievement_id)
            .unwrap_or_else(|| UserAchievement::new(user_id, achievement_id));

        let update = current.advance(steps, &achievement);
        if update.is_empty() {
            tracing::debug!(achievement_id, "Achievement unchanged; skipping update");
            return Ok(current);
        }

        let updated = self
            .api
            .update_user_achievement(user_id, achievement_id, &update)
            .await?;
        if update.achieved == Some(true) {
            tracing::info!(achievement = %achievement.name, "Achievement unlocked");
        }
        Ok(updated)
    }

    /// Add experience points to a user
    pub async fn award_experience(&self, user: &User, points: u64) -> Result<User> {
        if points == 0 {
            return Ok(user.clone());
        }
        let update = UserUpdate::default().with_experience(user.experience.saturating_add(points));
        Ok(self.api.update_user(&user.id, &update).await?)
    }
}
