//! Game-selection screen module
//!
//! One screen is a small graph of four collaborators:
//!
//! - a display surface ([`GameListView`]) that renders [`GameCard`]s and owns
//!   the presenter
//! - the [`GamePresenter`], which owns the [`GameSelectionInteractor`] and
//!   holds the view and navigator weakly
//! - the interactor, which runs [`GameCatalog`] fetches and reports back to
//!   the presenter through a weak handle
//! - a navigator ([`GameNavigator`]) that performs the transition to a game
//!
//! [`assemble`] wires the presenter half of the graph. The concrete view and
//! navigator live in the UI layer, which finishes the wiring by handing the
//! returned presenter to its view.

pub mod catalog;
pub mod presenter;

pub use catalog::{
    CatalogError, FetchTicket, GameCatalog, GameCatalogOutput, GameList, GameSelectionInteractor,
    StaticGameCatalog,
};
pub use presenter::{
    GameCard, GameListView, GameNavigator, GamePresenter, PresenterState, SelectionError,
};

use std::sync::{Arc, Weak};

/// Build a fresh presenter and interactor for one screen activation
///
/// Only weak handles to `view` and `navigator` are kept; the caller decides
/// who owns them. Each call produces an independent graph.
pub fn assemble<V, N>(catalog: Arc<dyn GameCatalog>, view: &Arc<V>, navigator: &Arc<N>) -> Arc<GamePresenter>
where
    V: GameListView + 'static,
    N: GameNavigator + 'static,
{
    let view = Arc::downgrade(view);
    let view: Weak<dyn GameListView> = view;
    let navigator = Arc::downgrade(navigator);
    let navigator: Weak<dyn GameNavigator> = navigator;
    tracing::debug!("Assembling game selection module");
    GamePresenter::new(catalog, view, navigator)
}
