//! Data source for the game-selection screen
//!
//! [`GameCatalog`] is the async seam: anything that can produce titles and
//! descriptions (the built-in list, a network call) implements it.
//! [`GameSelectionInteractor`] runs one fetch per request on the tokio runtime
//! and hands the outcome to its output exactly once.

use crate::games::GameCategory;
use async_trait::async_trait;
use std::sync::{Arc, Weak};
use thiserror::Error;
use tokio::task::JoinHandle;

use super::presenter::GameCard;

// =============================================================================
// Errors
// =============================================================================

/// Reasons a game list could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The source could not be reached or failed
    #[error("Game catalog unavailable: {0}")]
    Unavailable(String),

    /// Titles and descriptions did not pair up
    #[error("Game catalog returned {titles} titles but {descriptions} descriptions")]
    MismatchedLengths {
        /// Number of titles
        titles: usize,
        /// Number of descriptions
        descriptions: usize,
    },

    /// The fetch was abandoned before completing
    #[error("Game catalog fetch cancelled")]
    Cancelled,
}

// =============================================================================
// Game list
// =============================================================================

/// Ordered titles with their descriptions
///
/// Construction guarantees both sequences have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameList {
    titles: Vec<String>,
    descriptions: Vec<String>,
}

impl GameList {
    /// Pair up titles and descriptions
    pub fn new(titles: Vec<String>, descriptions: Vec<String>) -> Result<Self, CatalogError> {
        if titles.len() != descriptions.len() {
            return Err(CatalogError::MismatchedLengths {
                titles: titles.len(),
                descriptions: descriptions.len(),
            });
        }
        Ok(Self { titles, descriptions })
    }

    /// Titles in display order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Descriptions in display order
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// Number of games
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// True when there are no games
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Zip into display records, keeping order
    pub fn into_cards(self) -> Vec<GameCard> {
        self.titles
            .into_iter()
            .zip(self.descriptions)
            .map(|(title, description)| GameCard { title, description })
            .collect()
    }
}

// =============================================================================
// Sources
// =============================================================================

/// Anything that can list the games for a screen
#[async_trait]
pub trait GameCatalog: Send + Sync {
    /// Fetch the current list
    async fn fetch_games(&self) -> Result<GameList, CatalogError>;
}

/// The games bundled with the app for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticGameCatalog {
    category: GameCategory,
}

impl StaticGameCatalog {
    /// Catalog for a category
    pub fn new(category: GameCategory) -> Self {
        Self { category }
    }

    /// Category served by this catalog
    pub fn category(&self) -> GameCategory {
        self.category
    }
}

#[async_trait]
impl GameCatalog for StaticGameCatalog {
    async fn fetch_games(&self) -> Result<GameList, CatalogError> {
        let games = self.category.games();
        let titles = games.iter().map(|g| g.title().to_string()).collect();
        let descriptions = games.iter().map(|g| g.description().to_string()).collect();
        GameList::new(titles, descriptions)
    }
}

// =============================================================================
// Interactor
// =============================================================================

/// Identifies one fetch request
///
/// Tickets increase monotonically per presenter; only the newest one is
/// honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(pub u64);

/// Receiver of fetch outcomes
pub trait GameCatalogOutput: Send + Sync {
    /// Called exactly once per [`GameSelectionInteractor::fetch_games`] call
    fn games_fetched(&self, ticket: FetchTicket, result: Result<GameList, CatalogError>);
}

/// Runs catalog fetches and reports back to the presenter
///
/// Holds the presenter weakly. A fetch that completes after the presenter is
/// gone is dropped silently.
pub struct GameSelectionInteractor {
    catalog: Arc<dyn GameCatalog>,
    output: Weak<dyn GameCatalogOutput>,
}

impl GameSelectionInteractor {
    /// Create an interactor reporting to `output`
    pub fn new(catalog: Arc<dyn GameCatalog>, output: Weak<dyn GameCatalogOutput>) -> Self {
        Self { catalog, output }
    }

    /// Start a fetch without blocking the caller
    ///
    /// The output is always told exactly once, also when the catalog panics.
    /// Returns the spawned task, or `None` when no tokio runtime is available;
    /// in that case the output is told synchronously that the catalog is
    /// unavailable.
    pub fn fetch_games(&self, ticket: FetchTicket) -> Option<JoinHandle<()>> {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!(ticket = ticket.0, "No async runtime for game fetch: {}", e);
                deliver(
                    &self.output,
                    ticket,
                    Err(CatalogError::Unavailable("no async runtime".to_string())),
                );
                return None;
            }
        };

        let catalog = Arc::clone(&self.catalog);
        let output = self.output.clone();
        tracing::debug!(ticket = ticket.0, "Fetching games");

        // The fetch runs in its own task so a panicking catalog still
        // produces a completion.
        let fetch = runtime.spawn(async move { catalog.fetch_games().await });
        Some(runtime.spawn(async move {
            let result = match fetch.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(ticket = ticket.0, "Game fetch task failed: {}", e);
                    Err(CatalogError::Unavailable(format!("catalog task failed: {}", e)))
                }
            };
            deliver(&output, ticket, result);
        }))
    }
}

fn deliver(
    output: &Weak<dyn GameCatalogOutput>,
    ticket: FetchTicket,
    result: Result<GameList, CatalogError>,
) {
    match output.upgrade() {
        Some(output) => output.games_fetched(ticket, result),
        None => tracing::debug!(ticket = ticket.0, "Screen released before fetch completed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Collector {
        results: Mutex<Vec<(FetchTicket, Result<GameList, CatalogError>)>>,
    }

    impl GameCatalogOutput for Collector {
        fn games_fetched(&self, ticket: FetchTicket, result: Result<GameList, CatalogError>) {
            self.results.lock().push((ticket, result));
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl GameCatalog for FailingCatalog {
        async fn fetch_games(&self) -> Result<GameList, CatalogError> {
            Err(CatalogError::Unavailable("offline".to_string()))
        }
    }

    fn interactor(catalog: Arc<dyn GameCatalog>, output: &Arc<Collector>) -> GameSelectionInteractor {
        let output: Arc<dyn GameCatalogOutput> = output.clone();
        GameSelectionInteractor::new(catalog, Arc::downgrade(&output))
    }

    #[test]
    fn test_game_list_rejects_mismatched_lengths() {
        let result = GameList::new(vec!["A".to_string()], vec![]);
        assert_eq!(
            result,
            Err(CatalogError::MismatchedLengths { titles: 1, descriptions: 0 })
        );
    }

    #[test]
    fn test_into_cards_keeps_order() {
        let list = GameList::new(
            vec!["Chimp Test".to_string(), "Number Memo".to_string()],
            vec!["first".to_string(), "second".to_string()],
        )
        .unwrap();
        let cards = list.into_cards();
        assert_eq!(cards[0].title, "Chimp Test");
        assert_eq!(cards[1].description, "second");
    }

    #[tokio::test]
    async fn test_static_catalog_lists_category() {
        let list = StaticGameCatalog::new(GameCategory::Speed).fetch_games().await.unwrap();
        assert_eq!(list.titles(), ["Reaction Time", "Aim Trainer"]);
        assert_eq!(list.len(), list.descriptions().len());
    }

    #[tokio::test]
    async fn test_fetch_reports_exactly_once() {
        let output = Arc::new(Collector::default());
        let interactor = interactor(Arc::new(StaticGameCatalog::default()), &output);

        interactor.fetch_games(FetchTicket(1)).unwrap().await.unwrap();

        let results = output.results.lock();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, FetchTicket(1));
        assert!(results[0].1.is_ok());
    }

    #[tokio::test]
    async fn test_failure_still_completes() {
        let output = Arc::new(Collector::default());
        let interactor = interactor(Arc::new(FailingCatalog), &output);

        interactor.fetch_games(FetchTicket(7)).unwrap().await.unwrap();

        let results = output.results.lock();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].1,
            Err(CatalogError::Unavailable("offline".to_string()))
        );
    }

    struct PanickingCatalog;

    #[async_trait]
    impl GameCatalog for PanickingCatalog {
        async fn fetch_games(&self) -> Result<GameList, CatalogError> {
            panic!("catalog backend crashed");
        }
    }

    #[tokio::test]
    async fn test_panicking_catalog_reports_unavailable() {
        let output = Arc::new(Collector::default());
        let interactor = interactor(Arc::new(PanickingCatalog), &output);

        interactor.fetch_games(FetchTicket(3)).unwrap().await.unwrap();

        let results = output.results.lock();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, FetchTicket(3));
        assert!(matches!(results[0].1, Err(CatalogError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_released_output_is_ignored() {
        let output = Arc::new(Collector::default());
        let interactor = interactor(Arc::new(StaticGameCatalog::default()), &output);
        drop(output);

        let handle = interactor.fetch_games(FetchTicket(1)).unwrap();
        assert!(handle.await.is_ok());
    }

    #[test]
    fn test_without_runtime_reports_unavailable() {
        let output = Arc::new(Collector::default());
        let interactor = interactor(Arc::new(StaticGameCatalog::default()), &output);

        assert!(interactor.fetch_games(FetchTicket(1)).is_none());

        let results = output.results.lock();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0].1, Err(CatalogError::Unavailable(_))));
    }
}
