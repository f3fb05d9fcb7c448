//! User interface for Brain Trainer
//!
//! This crate provides the UI layer: the game selection screen and its
//! assembly, navigation, and list styling.
//!
//! # Modules
//!
//! - [`screens`] - Application screens and their module factories
//! - [`navigation`] - Routes, navigation stacks and path routing
//! - [`style`] - Styling tokens and the game list style
//!
//! # Example
//!
//! ```rust
//! use app_core::games::GameCategory;
//! use app_ui::navigation::NavigationState;
//! use app_ui::screens::create_module_for;
//! use app_ui::style::GameListStyle;
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let navigation = Arc::new(Mutex::new(NavigationState::new()));
//! let screen = create_module_for(GameCategory::Memory, GameListStyle::default(), navigation);
//!
//! if let Some(load) = screen.load() {
//!     load.await.unwrap();
//! }
//! assert_eq!(screen.content().titles()[0], "Chimp Test");
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod navigation;
pub mod screens;
pub mod style;

// Re-export commonly used types
pub use navigation::{
    NavigationStack, NavigationState, NavigationTab, PendingNavigation, Route, RouteParams,
    Router, StackEntry,
};

pub use screens::{create_module, create_module_for, GameListScreen, GameRouter, ScreenContent};

pub use style::{GameListStyle, Shadow};
