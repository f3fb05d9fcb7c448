//! Presentation logic for the game-selection screen
//!
//! The presenter sits between the display surface, the interactor and the
//! navigator. It owns the interactor; the view and navigator are held weakly
//! so the screen can be torn down from the outside at any time.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};
use thiserror::Error;
use tokio::task::JoinHandle;

use super::catalog::{
    CatalogError, FetchTicket, GameCatalog, GameCatalogOutput, GameList, GameSelectionInteractor,
};

// =============================================================================
// Display model
// =============================================================================

/// One selectable game as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCard {
    /// Button title
    pub title: String,
    /// Text under the title
    pub description: String,
}

impl GameCard {
    /// Create a card
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

// =============================================================================
// Collaborator contracts
// =============================================================================

/// Rendering side of the screen
#[cfg_attr(test, mockall::automock)]
pub trait GameListView: Send + Sync {
    /// Replace whatever is on screen with `games`, in order
    fn show_games(&self, games: &[GameCard]);

    /// Replace whatever is on screen with an empty, failed state
    fn show_load_error(&self, error: &CatalogError);
}

/// Screen transitions out of the selection screen
#[cfg_attr(test, mockall::automock)]
pub trait GameNavigator: Send + Sync {
    /// Open the detail screen of the named game
    ///
    /// Unknown names must be logged and ignored.
    fn navigate_to_game_detail(&self, game_name: &str);
}

// =============================================================================
// Errors and state
// =============================================================================

/// Misuse of the selection contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The index is not a position in the rendered list
    #[error("Game index {index} out of range for {len} rendered games")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of rendered games
        len: usize,
    },
}

/// Lifecycle of the presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    /// Nothing requested yet
    Idle,
    /// A fetch is outstanding
    Loading,
    /// The latest fetch has been rendered
    Loaded,
    /// A selection is being handed to the navigator
    Navigating,
}

struct PresenterInner {
    state: PresenterState,
    latest: FetchTicket,
    games: Vec<GameCard>,
}

// =============================================================================
// Presenter
// =============================================================================

/// Mediator of the game-selection screen
///
/// Repeated loads follow a latest-wins policy: each call to
/// [`view_did_load`](Self::view_did_load) issues a new ticket and any result
/// carrying an older ticket is discarded unrendered.
pub struct GamePresenter {
    interactor: GameSelectionInteractor,
    view: Weak<dyn GameListView>,
    navigator: Weak<dyn GameNavigator>,
    inner: Mutex<PresenterInner>,
}

impl GamePresenter {
    /// Build a presenter and its interactor
    ///
    /// The interactor receives a weak handle back to the returned presenter.
    pub fn new(
        catalog: Arc<dyn GameCatalog>,
        view: Weak<dyn GameListView>,
        navigator: Weak<dyn GameNavigator>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|me: &Weak<GamePresenter>| {
            let output: Weak<dyn GameCatalogOutput> = me.clone();
            Self {
                interactor: GameSelectionInteractor::new(catalog, output),
                view,
                navigator,
                inner: Mutex::new(PresenterInner {
                    state: PresenterState::Idle,
                    latest: FetchTicket(0),
                    games: Vec::new(),
                }),
            }
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> PresenterState {
        self.inner.lock().state
    }

    /// Games from the last render
    pub fn games(&self) -> Vec<GameCard> {
        self.inner.lock().games.clone()
    }

    /// The screen became visible; request the game list
    ///
    /// Supersedes any fetch still in flight. The returned handle completes
    /// once the fetch has been delivered (or discarded).
    pub fn view_did_load(&self) -> Option<JoinHandle<()>> {
        let ticket = {
            let mut inner = self.inner.lock();
            if inner.state == PresenterState::Loading {
                tracing::debug!(stale = inner.latest.0, "Superseding in-flight game fetch");
            }
            inner.latest = FetchTicket(inner.latest.0 + 1);
            inner.state = PresenterState::Loading;
            inner.latest
        };

        self.interactor.fetch_games(ticket)
    }

    /// The user tapped the game at `index`
    ///
    /// # Errors
    ///
    /// `SelectionError::IndexOutOfRange` when `index` is not a position in the
    /// last rendered list; the navigator is not called.
    pub fn did_select_game(&self, index: usize) -> Result<(), SelectionError> {
        let title = {
            let mut inner = self.inner.lock();
            let len = inner.games.len();
            let title = match inner.games.get(index) {
                Some(card) => card.title.clone(),
                None => {
                    tracing::error!(index, len, "Game selection outside rendered list");
                    return Err(SelectionError::IndexOutOfRange { index, len });
                }
            };
            if inner.state == PresenterState::Loaded {
                inner.state = PresenterState::Navigating;
            }
            title
        };

        match self.navigator.upgrade() {
            Some(navigator) => navigator.navigate_to_game_detail(&title),
            None => tracing::debug!(%title, "Navigator released; selection dropped"),
        }

        let mut inner = self.inner.lock();
        if inner.state == PresenterState::Navigating {
            inner.state = PresenterState::Loaded;
        }
        Ok(())
    }
}

impl GameCatalogOutput for GamePresenter {
    fn games_fetched(&self, ticket: FetchTicket, result: Result<GameList, CatalogError>) {
        let outcome = {
            let mut inner = self.inner.lock();
            if ticket != inner.latest || inner.state != PresenterState::Loading {
                tracing::debug!(
                    ticket = ticket.0,
                    latest = inner.latest.0,
                    "Discarding stale game list"
                );
                return;
            }

            inner.state = PresenterState::Loaded;
            match result {
                Ok(list) => {
                    inner.games = list.into_cards();
                    Ok(inner.games.clone())
                }
                Err(error) => {
                    inner.games.clear();
                    Err(error)
                }
            }
        };

        let Some(view) = self.view.upgrade() else {
            tracing::debug!(ticket = ticket.0, "View released; nothing to render");
            return;
        };

        match outcome {
            Ok(games) => {
                tracing::debug!(count = games.len(), "Rendering games");
                view.show_games(&games);
            }
            Err(error) => {
                tracing::warn!("Failed to fetch games: {}", error);
                view.show_load_error(&error);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
