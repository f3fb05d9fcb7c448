//! Game selection flow tests
//!
//! End-to-end tests of one screen activation: catalog, presenter, screen,
//! router and the shared navigation state.

use app_core::game_selection::{CatalogError, GameCatalog, GameList, PresenterState, SelectionError};
use app_core::games::{GameCategory, GameKind};
use app_ui::navigation::{NavigationState, Route, Router};
use app_ui::screens::{create_module, create_module_for, ScreenContent, SharedNavigation};
use app_ui::style::GameListStyle;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::oneshot;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn navigation() -> SharedNavigation {
    Arc::new(Mutex::new(NavigationState::new()))
}

/// One scripted catalog answer
struct Reply {
    gate: Option<oneshot::Receiver<()>>,
    titles: Vec<&'static str>,
    descriptions: Vec<&'static str>,
}

impl Reply {
    fn now(titles: Vec<&'static str>, descriptions: Vec<&'static str>) -> Self {
        Self {
            gate: None,
            titles,
            descriptions,
        }
    }

    fn gated(gate: oneshot::Receiver<()>, titles: Vec<&'static str>) -> Self {
        let descriptions = titles.iter().map(|_| "gated").collect();
        Self {
            gate: Some(gate),
            titles,
            descriptions,
        }
    }
}

/// Answers fetches in order from a script
struct ScriptedCatalog {
    replies: Mutex<VecDeque<Reply>>,
}

impl ScriptedCatalog {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
        })
    }
}

#[async_trait]
impl GameCatalog for ScriptedCatalog {
    async fn fetch_games(&self) -> Result<GameList, CatalogError> {
        let reply = self
            .replies
            .lock()
            .pop_front()
            .ok_or_else(|| CatalogError::Unavailable("script exhausted".to_string()))?;

        if let Some(gate) = reply.gate {
            gate.await.map_err(|_| CatalogError::Cancelled)?;
        }

        GameList::new(
            reply.titles.into_iter().map(String::from).collect(),
            reply.descriptions.into_iter().map(String::from).collect(),
        )
    }
}

#[tokio::test]
async fn test_fetched_games_render_in_order() {
    init_tracing();

    let catalog = ScriptedCatalog::new([Reply::now(
        vec!["Chimp Test", "Number Memo"],
        vec!["Are you smarter than a chimp?", "Remember the longest number"],
    )]);
    let screen = create_module(catalog, GameListStyle::default(), navigation());

    screen.load().unwrap().await.unwrap();

    assert_eq!(screen.content().titles(), vec!["Chimp Test", "Number Memo"]);
    let rows = screen.rows();
    assert_eq!(rows[0].description.as_deref(), Some("Are you smarter than a chimp?"));
    assert_eq!(rows[1].description.as_deref(), Some("Remember the longest number"));
    assert_eq!(screen.render_count(), 1);
    assert_eq!(screen.presenter().state(), PresenterState::Loaded);
}

#[tokio::test]
async fn test_selection_pushes_detail_route() {
    init_tracing();

    let nav = navigation();
    let screen = create_module_for(GameCategory::Memory, GameListStyle::default(), Arc::clone(&nav));
    screen.load().unwrap().await.unwrap();

    let titles: Vec<String> = screen.rows().into_iter().map(|r| r.title).collect();
    let index = titles.iter().position(|t| t == "Visual Memory").unwrap();
    screen.tap_game(index).unwrap();

    let route = nav.lock().current_route();
    assert_eq!(route, Route::GameDetail { game: GameKind::VisualMemory });
    assert_eq!(Router::new().match_path(&route.to_path()), route);

    let mut state = nav.lock();
    assert!(state.pending.as_ref().is_some_and(|p| !p.is_back));
    state.complete_navigation();
    assert!(state.go_back());
    assert_eq!(state.current_route(), Route::default());
}

#[tokio::test]
async fn test_unknown_title_is_ignored_by_router() {
    init_tracing();

    let nav = navigation();
    let catalog = ScriptedCatalog::new([Reply::now(vec!["Tetris"], vec!["Falling blocks"])]);
    let screen = create_module(catalog, GameListStyle::default(), Arc::clone(&nav));
    screen.load().unwrap().await.unwrap();

    screen.tap_game(0).unwrap();

    assert!(!nav.lock().can_go_back());
    assert_eq!(screen.presenter().state(), PresenterState::Loaded);
}

#[tokio::test]
async fn test_out_of_range_selection_is_rejected() {
    init_tracing();

    let nav = navigation();
    let screen = create_module_for(GameCategory::Speed, GameListStyle::default(), Arc::clone(&nav));

    assert_eq!(
        screen.tap_game(0),
        Err(SelectionError::IndexOutOfRange { index: 0, len: 0 })
    );

    screen.load().unwrap().await.unwrap();
    assert_eq!(
        screen.tap_game(5),
        Err(SelectionError::IndexOutOfRange { index: 5, len: 2 })
    );
    assert!(!nav.lock().can_go_back());
}

#[tokio::test]
async fn test_mismatched_catalog_shows_error() {
    init_tracing();

    let catalog = ScriptedCatalog::new([Reply::now(vec!["Chimp Test", "Number Memo"], vec!["only one"])]);
    let screen = create_module(catalog, GameListStyle::default(), navigation());

    screen.load().unwrap().await.unwrap();

    assert!(matches!(screen.content(), ScreenContent::Error(_)));
    assert_eq!(screen.render_count(), 1);
    assert!(screen.tap_game(0).is_err());
}

#[tokio::test]
async fn test_failed_load_then_reload_recovers() {
    init_tracing();

    let catalog = ScriptedCatalog::new([Reply::now(vec!["Aim Trainer"], vec!["Hit the targets"])]);
    let screen = create_module(catalog, GameListStyle::default(), navigation());

    screen.load().unwrap().await.unwrap();
    assert_eq!(screen.content().titles(), vec!["Aim Trainer"]);

    // Script exhausted: the second load fails and replaces the list.
    screen.load().unwrap().await.unwrap();
    assert!(matches!(screen.content(), ScreenContent::Error(_)));
    assert_eq!(screen.render_count(), 2);
}

#[tokio::test]
async fn test_second_load_supersedes_first() {
    init_tracing();

    let (open_first, first_gate) = oneshot::channel();
    let catalog = ScriptedCatalog::new([
        Reply::gated(first_gate, vec!["Stale"]),
        Reply::now(vec!["Stroop Test"], vec!["Name the ink color"]),
    ]);
    let screen = create_module(catalog, GameListStyle::default(), navigation());

    let first = screen.load().unwrap();
    let second = screen.load().unwrap();
    second.await.unwrap();

    assert_eq!(screen.content().titles(), vec!["Stroop Test"]);

    open_first.send(()).unwrap();
    first.await.unwrap();

    assert_eq!(screen.content().titles(), vec!["Stroop Test"]);
    assert_eq!(screen.render_count(), 1);
}

#[tokio::test]
async fn test_teardown_before_late_result() {
    init_tracing();

    let nav = navigation();
    let (open, gate) = oneshot::channel();
    let catalog = ScriptedCatalog::new([Reply::gated(gate, vec!["Chimp Test"])]);
    let screen = create_module(catalog, GameListStyle::default(), Arc::clone(&nav));
    let presenter = Arc::downgrade(screen.presenter());
    let router = Arc::downgrade(screen.router());

    let pending = screen.load().unwrap();
    drop(screen);
    assert!(presenter.upgrade().is_none());
    assert!(router.upgrade().is_none());

    open.send(()).unwrap();
    pending.await.unwrap();

    assert!(nav.lock().pending.is_none());
}
