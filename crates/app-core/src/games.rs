//! Game catalog
//!
//! Every game the app ships, grouped into categories. `game_id` values are
//! the ids the service uses in per-game statistics and must never be reused.

use serde::{Deserialize, Serialize};

// =============================================================================
// Categories
// =============================================================================

/// Group of games shown on one selection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameCategory {
    /// Short-term memory games
    #[default]
    Memory,
    /// Reaction and pointer speed
    Speed,
    /// Focus and inhibition
    Attention,
}

impl GameCategory {
    /// All categories in display order
    pub fn all() -> [GameCategory; 3] {
        [GameCategory::Memory, GameCategory::Speed, GameCategory::Attention]
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            GameCategory::Memory => "Memory",
            GameCategory::Speed => "Speed",
            GameCategory::Attention => "Attention",
        }
    }

    /// URL slug
    pub fn slug(&self) -> &'static str {
        match self {
            GameCategory::Memory => "memory",
            GameCategory::Speed => "speed",
            GameCategory::Attention => "attention",
        }
    }

    /// Parse a URL slug
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.slug() == slug)
    }

    /// Games in this category, in display order
    pub fn games(&self) -> Vec<GameKind> {
        GameKind::all()
            .into_iter()
            .filter(|g| g.category() == *self)
            .collect()
    }
}

// =============================================================================
// Games
// =============================================================================

/// A playable game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    /// Tap numbers in order after they are hidden
    ChimpTest,
    /// Recall an ever longer number
    NumberMemo,
    /// Repeat a growing sequence of flashes
    SequenceMemory,
    /// Remember which tiles lit up
    VisualMemory,
    /// Decide whether a word was seen before
    VerbalMemory,
    /// Tap as soon as the screen changes
    ReactionTime,
    /// Hit targets as fast as possible
    AimTrainer,
    /// Name the ink color, not the word
    StroopTest,
    /// Find numbers in a shuffled grid
    SchulteTable,
}

impl GameKind {
    /// All games in catalog order
    pub fn all() -> [GameKind; 9] {
        [
            GameKind::ChimpTest,
            GameKind::NumberMemo,
            GameKind::SequenceMemory,
            GameKind::VisualMemory,
            GameKind::VerbalMemory,
            GameKind::ReactionTime,
            GameKind::AimTrainer,
            GameKind::StroopTest,
            GameKind::SchulteTable,
        ]
    }

    /// Id used by the service for statistics
    pub fn game_id(&self) -> i64 {
        match self {
            GameKind::ChimpTest => 1,
            GameKind::NumberMemo => 2,
            GameKind::SequenceMemory => 3,
            GameKind::VisualMemory => 4,
            GameKind::VerbalMemory => 5,
            GameKind::ReactionTime => 6,
            GameKind::AimTrainer => 7,
            GameKind::StroopTest => 8,
            GameKind::SchulteTable => 9,
        }
    }

    /// Category the game belongs to
    pub fn category(&self) -> GameCategory {
        match self {
            GameKind::ChimpTest
            | GameKind::NumberMemo
            | GameKind::SequenceMemory
            | GameKind::VisualMemory
            | GameKind::VerbalMemory => GameCategory::Memory,
            GameKind::ReactionTime | GameKind::AimTrainer => GameCategory::Speed,
            GameKind::StroopTest | GameKind::SchulteTable => GameCategory::Attention,
        }
    }

    /// Title shown on the selection button
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::ChimpTest => "Chimp Test",
            GameKind::NumberMemo => "Number Memo",
            GameKind::SequenceMemory => "Sequence Memory",
            GameKind::VisualMemory => "Visual Memory",
            GameKind::VerbalMemory => "Verbal Memory",
            GameKind::ReactionTime => "Reaction Time",
            GameKind::AimTrainer => "Aim Trainer",
            GameKind::StroopTest => "Stroop Test",
            GameKind::SchulteTable => "Schulte Table",
        }
    }

    /// One-line description under the title
    pub fn description(&self) -> &'static str {
        match self {
            GameKind::ChimpTest => "Click the squares in order according to their numbers.",
            GameKind::NumberMemo => "Remember the longest number you can.",
            GameKind::SequenceMemory => "Memorize the pattern and repeat it.",
            GameKind::VisualMemory => "Remember an increasingly large board of squares.",
            GameKind::VerbalMemory => "Keep as many words in short term memory as possible.",
            GameKind::ReactionTime => "Test your visual reflexes.",
            GameKind::AimTrainer => "How quickly can you hit all the targets?",
            GameKind::StroopTest => "Name the color of the ink, not the word.",
            GameKind::SchulteTable => "Find the numbers in ascending order.",
        }
    }

    /// URL slug
    pub fn slug(&self) -> &'static str {
        match self {
            GameKind::ChimpTest => "chimp-test",
            GameKind::NumberMemo => "number-memo",
            GameKind::SequenceMemory => "sequence-memory",
            GameKind::VisualMemory => "visual-memory",
            GameKind::VerbalMemory => "verbal-memory",
            GameKind::ReactionTime => "reaction-time",
            GameKind::AimTrainer => "aim-trainer",
            GameKind::StroopTest => "stroop-test",
            GameKind::SchulteTable => "schulte-table",
        }
    }

    /// Look up a game by its display title
    pub fn from_title(title: &str) -> Option<Self> {
        let title = title.trim();
        Self::all()
            .into_iter()
            .find(|g| g.title().eq_ignore_ascii_case(title))
    }

    /// Look up a game by URL slug
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::all().into_iter().find(|g| g.slug() == slug)
    }

    /// Look up a game by service id
    pub fn from_game_id(game_id: i64) -> Option<Self> {
        Self::all().into_iter().find(|g| g.game_id() == game_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_game_ids_are_unique() {
        let ids: HashSet<i64> = GameKind::all().iter().map(GameKind::game_id).collect();
        assert_eq!(ids.len(), GameKind::all().len());
    }

    #[test]
    fn test_every_game_has_a_category() {
        let total: usize = GameCategory::all().iter().map(|c| c.games().len()).sum();
        assert_eq!(total, GameKind::all().len());
    }

    #[test]
    fn test_memory_games_in_order() {
        let games = GameCategory::Memory.games();
        assert_eq!(games[0], GameKind::ChimpTest);
        assert_eq!(games[1], GameKind::NumberMemo);
    }

    #[test]
    fn test_lookups() {
        assert_eq!(GameKind::from_title("Chimp Test"), Some(GameKind::ChimpTest));
        assert_eq!(GameKind::from_title(" number memo "), Some(GameKind::NumberMemo));
        assert_eq!(GameKind::from_title("Chess"), None);
        assert_eq!(GameKind::from_slug("aim-trainer"), Some(GameKind::AimTrainer));
        assert_eq!(GameKind::from_game_id(8), Some(GameKind::StroopTest));
        assert_eq!(GameCategory::from_slug("speed"), Some(GameCategory::Speed));
        assert_eq!(GameCategory::from_slug("music"), None);
    }

    #[test]
    fn test_slug_matches_serde_name() {
        for game in GameKind::all() {
            let json = serde_json::to_string(&game).unwrap();
            assert_eq!(json, format!("\"{}\"", game.slug()));
        }
    }
}
