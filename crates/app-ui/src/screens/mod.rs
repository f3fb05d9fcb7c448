//! Application screens

pub mod game_selection;

pub use game_selection::{
    create_module, create_module_for, GameListScreen, GameRouter, GameRow, ScreenContent,
    SharedNavigation,
};
