//! Data contracts exchanged with the Brain Trainer service
//!
//! Every entity here is a plain value: constructed right before a request,
//! discarded after the response is decoded. Field names are snake_case both in
//! memory and on the wire, so serde maps them one to one.
//!
//! The `*Update` types are partial patches. An absent field means "leave it
//! alone" and is omitted from the serialized body entirely; it is never sent
//! as `null` and never applied as zero.
//!
//! # Example
//!
//! ```rust
//! use trainer_client::models::{User, UserUpdate};
//!
//! let mut user = User::new("u-1", "Alice", "alice@example.com");
//! let update = UserUpdate::default().with_experience(120);
//!
//! user.apply(&update);
//! assert_eq!(user.experience, 120);
//! assert_eq!(user.name, "Alice");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// Violations of the value constraints carried by the contracts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// An achievement must require at least one unit of progress
    #[error("Achievement {id} has invalid max progress {max_progress}")]
    InvalidMaxProgress {
        /// Achievement id
        id: i64,
        /// Offending maximum
        max_progress: u32,
    },

    /// Progress exceeds the referenced achievement's maximum
    #[error("Progress {progress} exceeds max progress {max_progress} of achievement {achievement_id}")]
    ProgressOutOfRange {
        /// Achievement id
        achievement_id: i64,
        /// Reported progress
        progress: u32,
        /// Achievement maximum
        max_progress: u32,
    },

    /// A user achievement was checked against a different achievement
    #[error("User achievement references {expected}, got achievement {actual}")]
    AchievementMismatch {
        /// Id referenced by the user achievement
        expected: i64,
        /// Id of the achievement supplied
        actual: i64,
    },
}

// =============================================================================
// User
// =============================================================================

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identity
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Accumulated experience points
    #[serde(default)]
    pub experience: u64,

    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    /// Create a user with no experience and no avatar
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            experience: 0,
            avatar_url: None,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &UserUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(experience) = update.experience {
            self.experience = experience;
        }
    }
}

/// Partial update for a [`User`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// New experience total
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u64>,
}

impl UserUpdate {
    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the experience total
    pub fn with_experience(mut self, experience: u64) -> Self {
        self.experience = Some(experience);
        self
    }

    /// True when the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.experience.is_none()
    }
}

// =============================================================================
// Auth
// =============================================================================

/// Token issued by a successful login
///
/// `user` is a copy of the profile at issuance time. It does not track later
/// changes to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Bearer credential for subsequent requests
    pub access_token: String,

    /// Token scheme, normally `bearer`
    pub token_type: String,

    /// Profile snapshot
    pub user: User,
}

impl AuthToken {
    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        let scheme = if self.token_type.eq_ignore_ascii_case("bearer") || self.token_type.is_empty() {
            "Bearer"
        } else {
            self.token_type.as_str()
        };
        format!("{} {}", scheme, self.access_token)
    }
}

// =============================================================================
// Achievements
// =============================================================================

/// Catalog entry describing an achievement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Catalog id
    pub id: i64,

    /// Short name
    pub name: String,

    /// What the player has to do
    pub description: String,

    /// Progress required to unlock
    pub max_progress: u32,
}

impl Achievement {
    /// Check the catalog constraints
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.max_progress == 0 {
            return Err(ContractError::InvalidMaxProgress {
                id: self.id,
                max_progress: self.max_progress,
            });
        }
        Ok(())
    }
}

/// A player's progress towards one achievement
///
/// Identity is the `(user_id, achievement_id)` pair. `achieved` is derived by
/// the server; the client does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAchievement {
    /// Owning user
    pub user_id: String,

    /// Referenced achievement
    pub achievement_id: i64,

    /// Whether the achievement is unlocked
    #[serde(default)]
    pub achieved: bool,

    /// Current progress
    #[serde(default)]
    pub progress: u32,
}

impl UserAchievement {
    /// Start tracking an achievement for a user
    pub fn new(user_id: impl Into<String>, achievement_id: i64) -> Self {
        Self {
            user_id: user_id.into(),
            achievement_id,
            achieved: false,
            progress: 0,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &UserAchievementUpdate) {
        if let Some(achieved) = update.achieved {
            self.achieved = achieved;
        }
        if let Some(progress) = update.progress {
            self.progress = progress;
        }
    }

    /// Check progress against the referenced catalog entry
    pub fn validate_against(&self, achievement: &Achievement) -> Result<(), ContractError> {
        if achievement.id != self.achievement_id {
            return Err(ContractError::AchievementMismatch {
                expected: self.achievement_id,
                actual: achievement.id,
            });
        }
        achievement.validate()?;
        if self.progress > achievement.max_progress {
            return Err(ContractError::ProgressOutOfRange {
                achievement_id: achievement.id,
                progress: self.progress,
                max_progress: achievement.max_progress,
            });
        }
        Ok(())
    }

    /// Build the update that advances progress by `by` steps
    ///
    /// Progress is clamped to the achievement maximum. `achieved` is only
    /// included once the maximum is reached for the first time.
    pub fn advance(&self, by: u32, achievement: &Achievement) -> UserAchievementUpdate {
        let progress = self.progress.saturating_add(by).min(achievement.max_progress);
        let reached = progress >= achievement.max_progress;

        UserAchievementUpdate {
            achieved: (reached && !self.achieved).then_some(true),
            progress: (progress != self.progress).then_some(progress),
        }
    }
}

/// Partial update for a [`UserAchievement`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAchievementUpdate {
    /// New unlocked flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved: Option<bool>,

    /// New progress value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
}

impl UserAchievementUpdate {
    /// True when the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.achieved.is_none() && self.progress.is_none()
    }
}

// =============================================================================
// Game statistics
// =============================================================================

/// A player's statistics for one game
///
/// Identity is the `(user_id, game_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGameStat {
    /// Owning user
    pub user_id: String,

    /// Game id
    pub game_id: i64,

    /// Best score so far
    #[serde(default)]
    pub high_score: i64,

    /// Completed sessions
    #[serde(default)]
    pub games_played: u32,
}

impl UserGameStat {
    /// Fresh statistics for a game the user has not played
    pub fn new(user_id: impl Into<String>, game_id: i64) -> Self {
        Self {
            user_id: user_id.into(),
            game_id,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &UserGameStatUpdate) {
        if let Some(high_score) = update.high_score {
            self.high_score = high_score;
        }
        if let Some(games_played) = update.games_played {
            self.games_played = games_played;
        }
    }

    /// Build the update for one finished game
    ///
    /// The high score only appears in the update when it is beaten, so a
    /// legitimate update never lowers it.
    pub fn record_score(&self, score: i64) -> UserGameStatUpdate {
        UserGameStatUpdate {
            high_score: (score > self.high_score).then_some(score),
            games_played: Some(self.games_played.saturating_add(1)),
        }
    }
}

/// Partial update for a [`UserGameStat`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGameStatUpdate {
    /// New best score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_score: Option<i64>,

    /// New session count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games_played: Option<u32>,
}

impl UserGameStatUpdate {
    /// True when the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.high_score.is_none() && self.games_played.is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================
