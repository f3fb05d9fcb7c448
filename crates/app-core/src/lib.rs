//! Core application logic for Brain Trainer
//!
//! This crate contains the game catalog, the game-selection screen module
//! (presenter, interactor and their collaborator contracts) and progress
//! synchronization with the service.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod game_selection;
pub mod games;
pub mod progress;

pub use game_selection::{
    CatalogError, GameCard, GameCatalog, GameListView, GameNavigator, GamePresenter,
    PresenterState, SelectionError, StaticGameCatalog,
};
pub use games::{GameCategory, GameKind};
pub use progress::{GameResult, ProgressError, ProgressService};
