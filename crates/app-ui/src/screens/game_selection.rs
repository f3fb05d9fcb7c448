//! Game selection screen
//!
//! [`create_module`] builds one screen activation: a [`GameListScreen`] that
//! renders the game list and owns the presenter and router, a
//! [`GamePresenter`] with its interactor, and a [`GameRouter`] that turns a
//! selected title into a pushed [`Route::GameDetail`].

use app_core::game_selection::{
    CatalogError, GameCard, GameCatalog, GameListView, GameNavigator, GamePresenter,
    SelectionError, StaticGameCatalog,
};
use app_core::games::{GameCategory, GameKind};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;

use crate::navigation::{NavigationState, Route};
use crate::style::GameListStyle;

/// Navigation state shared by every screen of a window
pub type SharedNavigation = Arc<Mutex<NavigationState>>;

// =============================================================================
// Screen content
// =============================================================================

/// One laid-out game button
#[derive(Debug, Clone, PartialEq)]
pub struct GameRow {
    /// Button title
    pub title: String,
    /// Subtitle, absent when the style hides descriptions
    pub description: Option<String>,
    /// Offset of the button from the top of the list
    pub top: f32,
}

/// What the screen currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenContent {
    /// Nothing rendered yet
    #[default]
    Empty,
    /// A list of games, in display order
    Games(Vec<GameRow>),
    /// The last load failed
    Error(String),
}

impl ScreenContent {
    /// Titles on screen, in order
    pub fn titles(&self) -> Vec<&str> {
        match self {
            ScreenContent::Games(rows) => rows.iter().map(|r| r.title.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// Display surface
// =============================================================================

/// The game selection screen
///
/// This is the handle returned by [`create_module`]. Dropping the last
/// reference tears the whole graph down; a fetch still in flight then
/// completes without effect.
pub struct GameListScreen {
    presenter: Arc<GamePresenter>,
    router: Arc<GameRouter>,
    style: GameListStyle,
    navigation: SharedNavigation,
    content: Mutex<ScreenContent>,
    renders: Mutex<usize>,
}

impl GameListScreen {
    /// Start loading the game list
    pub fn load(&self) -> Option<JoinHandle<()>> {
        self.presenter.view_did_load()
    }

    /// The user tapped the button at `index`
    pub fn tap_game(&self, index: usize) -> Result<(), SelectionError> {
        self.presenter.did_select_game(index)
    }

    /// Current content
    pub fn content(&self) -> ScreenContent {
        self.content.lock().clone()
    }

    /// Rows currently rendered
    pub fn rows(&self) -> Vec<GameRow> {
        match &*self.content.lock() {
            ScreenContent::Games(rows) => rows.clone(),
            _ => Vec::new(),
        }
    }

    /// Number of times the content was replaced
    pub fn render_count(&self) -> usize {
        *self.renders.lock()
    }

    /// Styling in use
    pub fn style(&self) -> &GameListStyle {
        &self.style
    }

    /// The screen's presenter
    pub fn presenter(&self) -> &Arc<GamePresenter> {
        &self.presenter
    }

    /// The screen's router
    pub fn router(&self) -> &Arc<GameRouter> {
        &self.router
    }

    /// Push `route` onto the shared navigation state
    pub fn present(&self, route: Route) {
        tracing::debug!(path = %route.to_path(), "Presenting route");
        self.navigation.lock().navigate(route);
    }

    fn replace_content(&self, content: ScreenContent) {
        *self.content.lock() = content;
        *self.renders.lock() += 1;
    }

    fn layout(&self, games: &[GameCard]) -> Vec<GameRow> {
        games
            .iter()
            .enumerate()
            .map(|(i, card)| GameRow {
                title: card.title.clone(),
                description: self
                    .style
                    .show_descriptions
                    .then(|| card.description.clone()),
                top: i as f32 * (self.style.button_height + self.style.spacing),
            })
            .collect()
    }
}

impl GameListView for GameListScreen {
    fn show_games(&self, games: &[GameCard]) {
        let rows = self.layout(games);
        self.replace_content(ScreenContent::Games(rows));
    }

    fn show_load_error(&self, error: &CatalogError) {
        self.replace_content(ScreenContent::Error(error.to_string()));
    }
}

// =============================================================================
// Navigation delegate
// =============================================================================

/// Turns a selected game title into a detail screen transition
pub struct GameRouter {
    screen: Weak<GameListScreen>,
}

impl GameRouter {
    fn new(screen: Weak<GameListScreen>) -> Self {
        Self { screen }
    }
}

impl GameNavigator for GameRouter {
    fn navigate_to_game_detail(&self, game_name: &str) {
        let Some(game) = GameKind::from_title(game_name) else {
            tracing::warn!(game_name, "No detail screen for game; ignoring selection");
            return;
        };

        match self.screen.upgrade() {
            Some(screen) => screen.present(Route::GameDetail { game }),
            None => tracing::debug!(game = game.slug(), "Screen released; navigation dropped"),
        }
    }
}

// =============================================================================
// Module factory
// =============================================================================

/// Build a game selection screen over `catalog`
///
/// Every call builds a new, independent graph.
pub fn create_module(
    catalog: Arc<dyn GameCatalog>,
    style: GameListStyle,
    navigation: SharedNavigation,
) -> Arc<GameListScreen> {
    Arc::new_cyclic(|me: &Weak<GameListScreen>| {
        let router = Arc::new(GameRouter::new(me.clone()));
        let view: Weak<dyn GameListView> = me.clone();
        let navigator = Arc::downgrade(&router);
        let navigator: Weak<dyn GameNavigator> = navigator;

        GameListScreen {
            presenter: GamePresenter::new(catalog, view, navigator),
            router,
            style,
            navigation,
            content: Mutex::new(ScreenContent::Empty),
            renders: Mutex::new(0),
        }
    })
}

/// Build a game selection screen listing the built-in games of `category`
pub fn create_module_for(
    category: GameCategory,
    style: GameListStyle,
    navigation: SharedNavigation,
) -> Arc<GameListScreen> {
    create_module(Arc::new(StaticGameCatalog::new(category)), style, navigation)
}
