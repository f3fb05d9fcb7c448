//! Navigation system for Brain Trainer
//!
//! This module provides:
//! - Route definitions with path mapping
//! - Navigation stacks per tab
//! - Navigation state with pending transitions
//! - A path router for deep links

use app_core::games::{GameCategory, GameKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Routes
// =============================================================================

/// Parameters captured while matching a path
pub type RouteParams = HashMap<String, String>;

/// All screens in the application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    /// Game selection for a category
    GameSelection {
        /// Category shown
        category: GameCategory,
    },
    /// Detail screen of one game
    GameDetail {
        /// Game shown
        game: GameKind,
    },
    /// Achievement list
    Achievements,
    /// Player profile
    Profile,
    /// Login screen
    Login,
    /// Not found
    NotFound,
}

impl Default for Route {
    fn default() -> Self {
        Route::GameSelection {
            category: GameCategory::default(),
        }
    }
}

impl Route {
    /// URL path for this route
    pub fn to_path(&self) -> String {
        match self {
            Route::GameSelection { category } => {
                format!("/games/{}", urlencoding::encode(category.slug()))
            }
            Route::GameDetail { game } => format!("/game/{}", urlencoding::encode(game.slug())),
            Route::Achievements => "/achievements".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Login => "/login".to_string(),
            Route::NotFound => "/not-found".to_string(),
        }
    }

    /// Whether the route needs a logged-in user
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Achievements | Route::Profile)
    }

    /// Navigation bar title
    pub fn title(&self) -> &'static str {
        match self {
            Route::GameSelection { category } => category.label(),
            Route::GameDetail { game } => game.title(),
            Route::Achievements => "Achievements",
            Route::Profile => "Profile",
            Route::Login => "Log In",
            Route::NotFound => "Not Found",
        }
    }
}

// =============================================================================
// Tabs
// =============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTab {
    /// Game categories
    #[default]
    Games,
    /// Achievements
    Achievements,
    /// Profile
    Profile,
}

impl NavigationTab {
    /// Root route of the tab
    pub fn root_route(&self) -> Route {
        match self {
            NavigationTab::Games => Route::default(),
            NavigationTab::Achievements => Route::Achievements,
            NavigationTab::Profile => Route::Profile,
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            NavigationTab::Games => "Games",
            NavigationTab::Achievements => "Achievements",
            NavigationTab::Profile => "Profile",
        }
    }

    /// All tabs in order
    pub fn all() -> [NavigationTab; 3] {
        [NavigationTab::Games, NavigationTab::Achievements, NavigationTab::Profile]
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Navigation stack for a tab
///
/// Never empty: the root entry cannot be popped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    root: StackEntry,
    pushed: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a stack with a root route
    pub fn new(root: Route) -> Self {
        Self {
            root: StackEntry::new(root),
            pushed: Vec::new(),
        }
    }

    /// Push a route
    pub fn push(&mut self, route: Route) {
        self.pushed.push(StackEntry::new(route));
    }

    /// Pop the top route (false at root)
    pub fn pop(&mut self) -> bool {
        self.pushed.pop().is_some()
    }

    /// Pop to root
    pub fn pop_to_root(&mut self) {
        self.pushed.clear();
    }

    /// Top entry
    pub fn current_entry(&self) -> &StackEntry {
        self.pushed.last().unwrap_or(&self.root)
    }

    /// Top route
    pub fn current(&self) -> &Route {
        &self.current_entry().route
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.pushed.is_empty()
    }

    /// Number of entries including the root
    pub fn depth(&self) -> usize {
        self.pushed.len() + 1
    }

    /// Routes bottom to top
    pub fn routes(&self) -> Vec<&Route> {
        std::iter::once(&self.root)
            .chain(self.pushed.iter())
            .map(|e| &e.route)
            .collect()
    }

    /// Replace the whole stack with a new root
    pub fn reset(&mut self, route: Route) {
        *self = Self::new(route);
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// A transition waiting to be performed by the platform layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingNavigation {
    /// Target route
    pub route: Route,
    /// Whether this is a back navigation
    pub is_back: bool,
}

/// Complete navigation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Active tab
    pub active_tab: NavigationTab,
    /// One stack per tab
    pub tab_stacks: HashMap<NavigationTab, NavigationStack>,
    /// Transition not yet completed
    #[serde(skip)]
    pub pending: Option<PendingNavigation>,
}

impl Default for NavigationState {
    fn default() -> Self {
        let tab_stacks = NavigationTab::all()
            .into_iter()
            .map(|tab| (tab, NavigationStack::new(tab.root_route())))
            .collect();

        Self {
            active_tab: NavigationTab::Games,
            tab_stacks,
            pending: None,
        }
    }
}

impl NavigationState {
    /// Create a new navigation state
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack of the active tab
    pub fn current_stack(&self) -> Option<&NavigationStack> {
        self.tab_stacks.get(&self.active_tab)
    }

    fn current_stack_mut(&mut self) -> &mut NavigationStack {
        let tab = self.active_tab;
        self.tab_stacks
            .entry(tab)
            .or_insert_with(|| NavigationStack::new(tab.root_route()))
    }

    /// Route currently on screen
    pub fn current_route(&self) -> Route {
        self.current_stack()
            .map(|s| s.current().clone())
            .unwrap_or_else(|| self.active_tab.root_route())
    }

    /// Push a route on the active tab
    pub fn navigate(&mut self, route: Route) {
        self.pending = Some(PendingNavigation {
            route: route.clone(),
            is_back: false,
        });
        self.current_stack_mut().push(route);
    }

    /// Pop the active tab (false at root)
    pub fn go_back(&mut self) -> bool {
        if !self.current_stack_mut().pop() {
            return false;
        }
        self.pending = Some(PendingNavigation {
            route: self.current_route(),
            is_back: true,
        });
        true
    }

    /// Switch the active tab
    pub fn switch_tab(&mut self, tab: NavigationTab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.pending = Some(PendingNavigation {
                route: self.current_route(),
                is_back: false,
            });
        }
    }

    /// Mark the pending transition as done
    pub fn complete_navigation(&mut self) {
        self.pending = None;
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.current_stack().is_some_and(NavigationStack::can_go_back)
    }

    /// Reset entire navigation state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Router
// =============================================================================

/// Segment type in a pattern
#[derive(Debug, Clone)]
enum PatternSegment {
    Literal(String),
    Param(String),
}

struct RoutePattern {
    segments: Vec<PatternSegment>,
    builder: fn(&RouteParams) -> Option<Route>,
}

/// Maps URL paths to routes
pub struct Router {
    patterns: Vec<RoutePattern>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router with every route registered
    pub fn new() -> Self {
        let mut router = Self { patterns: Vec::new() };

        router.add_route("/", |_| Some(Route::default()));
        router.add_route("/games/:category", |params| {
            Some(Route::GameSelection {
                category: GameCategory::from_slug(params.get("category")?)?,
            })
        });
        router.add_route("/game/:game", |params| {
            Some(Route::GameDetail {
                game: GameKind::from_slug(params.get("game")?)?,
            })
        });
        router.add_route("/achievements", |_| Some(Route::Achievements));
        router.add_route("/profile", |_| Some(Route::Profile));
        router.add_route("/login", |_| Some(Route::Login));

        router
    }

    fn add_route(&mut self, pattern: &str, builder: fn(&RouteParams) -> Option<Route>) {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => PatternSegment::Param(name.to_string()),
                None => PatternSegment::Literal(s.to_string()),
            })
            .collect();

        self.patterns.push(RoutePattern { segments, builder });
    }

    /// Match a path, falling back to [`Route::NotFound`]
    pub fn match_path(&self, path: &str) -> Route {
        let pathname = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

        self.patterns
            .iter()
            .find_map(|pattern| {
                let params = Self::match_pattern(&pattern.segments, &segments)?;
                (pattern.builder)(&params)
            })
            .unwrap_or(Route::NotFound)
    }

    fn match_pattern(pattern: &[PatternSegment], path: &[&str]) -> Option<RouteParams> {
        if pattern.len() != path.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, actual) in pattern.iter().zip(path) {
            match segment {
                PatternSegment::Literal(expected) if expected == actual => {}
                PatternSegment::Literal(_) => return None,
                PatternSegment::Param(name) => {
                    params.insert(name.clone(), urlencoding::decode(actual).ok()?.into_owned());
                }
            }
        }
        Some(params)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_to_path() {
        assert_eq!(Route::default().to_path(), "/games/memory");
        assert_eq!(
            Route::GameDetail { game: GameKind::ChimpTest }.to_path(),
            "/game/chimp-test"
        );
        assert_eq!(Route::Profile.to_path(), "/profile");
    }

    #[test]
    fn test_route_requires_auth() {
        assert!(!Route::default().requires_auth());
        assert!(Route::Profile.requires_auth());
        assert!(!Route::Login.requires_auth());
    }

    #[test]
    fn test_route_title() {
        assert_eq!(Route::GameDetail { game: GameKind::NumberMemo }.title(), "Number Memo");
        assert_eq!(Route::GameSelection { category: GameCategory::Speed }.title(), "Speed");
    }

    #[test]
    fn test_router_round_trips_every_route() {
        let router = Router::new();
        let mut routes = vec![Route::Achievements, Route::Profile, Route::Login];
        routes.extend(GameCategory::all().map(|category| Route::GameSelection { category }));
        routes.extend(GameKind::all().map(|game| Route::GameDetail { game }));

        for route in routes {
            assert_eq!(router.match_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_router_unknown_paths() {
        let router = Router::new();
        assert_eq!(router.match_path("/"), Route::default());
        assert_eq!(router.match_path("/game/chess"), Route::NotFound);
        assert_eq!(router.match_path("/games/memory/extra"), Route::NotFound);
        assert_eq!(router.match_path("/profile?tab=stats"), Route::Profile);
    }

    #[test]
    fn test_navigation_stack() {
        let mut stack = NavigationStack::new(Route::default());
        assert!(!stack.can_go_back());
        assert!(!stack.pop());

        stack.push(Route::GameDetail { game: GameKind::AimTrainer });
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.current(), &Route::GameDetail { game: GameKind::AimTrainer });

        stack.pop_to_root();
        assert_eq!(stack.current(), &Route::default());
        assert_eq!(stack.routes(), vec![&Route::default()]);
    }

    #[test]
    fn test_navigation_state_flow() {
        let mut state = NavigationState::new();
        assert_eq!(state.current_route(), Route::default());

        state.navigate(Route::GameDetail { game: GameKind::ChimpTest });
        assert_eq!(
            state.pending,
            Some(PendingNavigation {
                route: Route::GameDetail { game: GameKind::ChimpTest },
                is_back: false,
            })
        );
        assert!(state.can_go_back());

        state.complete_navigation();
        assert!(state.pending.is_none());

        state.switch_tab(NavigationTab::Profile);
        assert_eq!(state.current_route(), Route::Profile);
        assert!(!state.go_back());

        state.switch_tab(NavigationTab::Games);
        assert!(state.go_back());
        assert_eq!(state.current_route(), Route::default());
        assert!(state.pending.as_ref().is_some_and(|p| p.is_back));
    }

    #[test]
    fn test_route_serialization() {
        let route = Route::GameDetail { game: GameKind::SchulteTable };
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["route"], "GameDetail");
        assert_eq!(json["params"]["game"], "schulte-table");

        let back: Route = serde_json::from_value(json).unwrap();
        assert_eq!(back, route);
    }

    #[test]
    fn test_stack_entry_keys_are_unique() {
        let a = StackEntry::new(Route::Profile);
        let b = StackEntry::new(Route::Profile);
        assert_ne!(a.key, b.key);
    }
}
