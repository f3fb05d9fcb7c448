//! Styling for the game list
//!
//! Raw design tokens plus [`GameListStyle`], the configuration handed to a
//! game list screen when it is built.

use serde::{Deserialize, Serialize};

// =============================================================================
// Tokens
// =============================================================================

/// Spacing scale in points
pub mod spacing {
    /// 4pt
    pub const SPACE_XS: f32 = 4.0;
    /// 8pt
    pub const SPACE_SM: f32 = 8.0;
    /// 16pt
    pub const SPACE_MD: f32 = 16.0;
    /// 24pt
    pub const SPACE_LG: f32 = 24.0;
}

/// Corner radii in points
pub mod radius {
    /// Small controls
    pub const SM: f32 = 8.0;
    /// Game buttons
    pub const MD: f32 = 16.0;
    /// Fully rounded
    pub const FULL: f32 = 9999.0;
}

/// Shadow applied to a game button
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Horizontal offset
    pub offset_x: f32,
    /// Vertical offset
    pub offset_y: f32,
    /// Blur radius
    pub blur: f32,
    /// Opacity between 0 and 1
    pub opacity: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 4.0,
            blur: 8.0,
            opacity: 0.2,
        }
    }
}

impl Shadow {
    /// No shadow
    pub const NONE: Shadow = Shadow {
        offset_x: 0.0,
        offset_y: 0.0,
        blur: 0.0,
        opacity: 0.0,
    };
}

// =============================================================================
// Game list style
// =============================================================================

/// Visual configuration for a game list screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameListStyle {
    /// Height of each game button
    pub button_height: f32,
    /// Corner radius of each game button
    pub corner_radius: f32,
    /// Vertical gap between buttons
    pub spacing: f32,
    /// Button shadow
    pub shadow: Shadow,
    /// Show the description under the title
    pub show_descriptions: bool,
}

impl Default for GameListStyle {
    fn default() -> Self {
        Self {
            button_height: 72.0,
            corner_radius: radius::MD,
            spacing: spacing::SPACE_MD,
            shadow: Shadow::default(),
            show_descriptions: true,
        }
    }
}

impl GameListStyle {
    /// Default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set button height
    pub fn with_button_height(mut self, height: f32) -> Self {
        self.button_height = height.max(0.0);
        self
    }

    /// Set corner radius
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    /// Set spacing between buttons
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// Set button shadow; opacity is clamped to `0..=1`
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Shadow {
            opacity: shadow.opacity.clamp(0.0, 1.0),
            ..shadow
        };
        self
    }

    /// Hide or show descriptions
    pub fn with_descriptions(mut self, show: bool) -> Self {
        self.show_descriptions = show;
        self
    }

    /// Total height of a list with `rows` buttons
    pub fn content_height(&self, rows: usize) -> f32 {
        if rows == 0 {
            return 0.0;
        }
        rows as f32 * self.button_height + (rows - 1) as f32 * self.spacing
    }
}
