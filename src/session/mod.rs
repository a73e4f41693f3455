//! Listing session: one route's filter state over one dataset
//!
//! A session ties the pieces together the way a listing page does:
//!
//! 1. the starting query comes from query memory, falling back to the
//!    address bar when the route has never been stored
//! 2. it is decoded into a [`FilterState`]
//! 3. [`ListingSession::view`] runs the reducer and the paginator
//! 4. every mutation encodes the new state over the address-bar query,
//!    stores it under the route and returns a [`Navigation`]
//!
//! ```
//! use sievr::listing::Item;
//! use sievr::memory::{MemoryQueryStore, QueryStore};
//! use sievr::session::ListingSession;
//!
//! let items = vec![
//!     Item::new(1, "Hello world").with_tags(["rust"]),
//!     Item::new(2, "Second post").with_tags(["cli"]),
//! ];
//! let store = MemoryQueryStore::new();
//!
//! let mut session = ListingSession::builder()
//!     .route("/blog")
//!     .items(&items)
//!     .store(&store)
//!     .build()?;
//!
//! let nav = session.toggle_tag("rust");
//! assert_eq!(nav.location, "/blog?sort=%7Etitle-descending%7E&tags=%7Erust%7E&page=1");
//! assert_eq!(session.view().total_filtered, 1);
//! assert_eq!(store.get("/blog").as_deref(), Some(nav.query.as_str()));
//! # Ok::<(), sievr::session::SessionError>(())
//! ```

pub mod error;
pub mod view;

pub use error::{Result, SessionError};
pub use view::{ListingView, Navigation, SortOption, TagEntry};

use crate::config::ListingConfig;
use crate::listing::{FilterState, Listable, SortSpec, census, reduce};
use crate::memory::QueryStore;
use crate::pagination::{self, PaginationControls};
use crate::search::SearchDebouncer;
use std::time::Instant;

/// Filter state of one listing route
#[derive(Debug)]
pub struct ListingSession<'a, T, S> {
    route: String,
    items: &'a [T],
    store: S,
    config: ListingConfig,
    address_query: String,
    state: FilterState,
    tag_census: Vec<String>,
    search: SearchDebouncer,
}

impl<'a, T: Listable, S: QueryStore> ListingSession<'a, T, S> {
    /// Create a new builder for constructing a `ListingSession`
    #[must_use]
    pub fn builder() -> ListingSessionBuilder<'a, T, S> {
        ListingSessionBuilder::new()
    }

    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &ListingConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Query string the host currently shows in its address bar
    #[must_use]
    pub fn address_query(&self) -> &str {
        &self.address_query
    }

    /// Ranked tags over the full dataset, taken once when the session opened
    #[must_use]
    pub fn tag_census(&self) -> &[String] {
        &self.tag_census
    }

    /// Search text as typed, including a value still waiting on the debounce
    #[must_use]
    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    /// All items that pass the current filters, sorted
    #[must_use]
    pub fn filtered(&self) -> Vec<&'a T> {
        reduce(self.items, &self.state)
    }

    /// Compute what to render for the current state
    #[must_use]
    pub fn view(&self) -> ListingView<'a, T> {
        let filtered = self.filtered();
        let total_filtered = filtered.len();
        let paging = &self.config.pagination;

        let controls = PaginationControls::new(total_filtered as u64, self.state.page, paging);
        let window = controls.window.clone();

        let (items, controls) = if paging.show {
            let page = pagination::slice(&filtered, self.state.page, paging.page_size).to_vec();
            (page, controls.is_visible().then_some(controls))
        } else {
            (filtered, None)
        };

        ListingView {
            items,
            total_filtered,
            page: self.state.page,
            window,
            search: self.search.text().to_string(),
            sort_options: self.sort_options(),
            tags: self.tag_entries(),
            controls,
            show_results: self.config.show_results,
        }
    }

    fn sort_options(&self) -> Vec<SortOption> {
        if !self.config.sort.show {
            return Vec::new();
        }
        self.config
            .sort
            .options()
            .iter()
            .map(|spec| SortOption::new(spec, &self.state.sort))
            .collect()
    }

    fn tag_entries(&self) -> Vec<TagEntry> {
        if !self.config.tags.show {
            return Vec::new();
        }
        self.tag_census
            .iter()
            .map(|tag| TagEntry {
                tag: tag.clone(),
                label: tag.to_lowercase(),
                active: self.state.is_tag_active(tag),
            })
            .collect()
    }

    /// Encode the current state, remember it for this route and return the new location
    pub fn commit(&mut self) -> Navigation {
        let query = self.state.encode_onto(&self.address_query);
        let changed = self.store.set(&self.route, &query);
        self.address_query.clone_from(&query);
        Navigation::new(&self.route, query, changed)
    }

    /// Toggle a tag on or off; back to page 1
    pub fn toggle_tag(&mut self, tag: &str) -> Navigation {
        self.state.toggle_tag(tag);
        self.commit()
    }

    /// Replace the active tags; back to page 1
    pub fn set_tags<I, V>(&mut self, tags: I) -> Navigation
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.state.set_tags(tags);
        self.commit()
    }

    pub fn clear_tags(&mut self) -> Navigation {
        self.state.clear_tags();
        self.commit()
    }

    /// Change the sort; back to page 1
    ///
    /// A key outside the configured sortable keys is replaced by the default sort.
    pub fn set_sort(&mut self, sort: SortSpec) -> Navigation {
        let sort = if self.config.sort.allows(&sort.key) {
            sort
        } else {
            tracing::debug!(key = %sort.key, "sort key is not sortable, using default");
            self.config.sort.default_spec()
        };
        self.state.set_sort(sort);
        self.commit()
    }

    /// Move to a page, keeping the other filters
    pub fn set_page(&mut self, page: u64) -> Navigation {
        self.state.set_page(page);
        self.commit()
    }

    /// Set the search text right away, bypassing the debounce; back to page 1
    pub fn set_search(&mut self, search: impl Into<String>) -> Navigation {
        let search = search.into();
        self.search.reset(search.clone());
        self.state.set_search(search);
        self.commit()
    }

    /// Record a keystroke in the search box
    ///
    /// Nothing is committed until [`ListingSession::poll_search`] sees the
    /// debounce deadline pass.
    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Commit a debounced search whose deadline has passed
    pub fn poll_search(&mut self, now: Instant) -> Option<Navigation> {
        let search = self.search.poll(now)?;
        self.state.set_search(search);
        Some(self.commit())
    }

    /// When the pending search will be due, if one is pending
    #[must_use]
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Empty the search box and commit immediately
    pub fn clear_search(&mut self) -> Navigation {
        self.search.clear();
        self.state.set_search(String::new());
        self.commit()
    }
}

/// Builder for `ListingSession`
///
/// `route`, `items` and `store` are required; the configuration defaults to
/// [`ListingConfig::default`] and the address-bar query to empty.
#[derive(Debug)]
pub struct ListingSessionBuilder<'a, T, S> {
    route: Option<String>,
    items: Option<&'a [T]>,
    store: Option<S>,
    config: Option<ListingConfig>,
    address_query: String,
}

impl<'a, T: Listable, S: QueryStore> ListingSessionBuilder<'a, T, S> {
    /// Create a new builder with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            route: None,
            items: None,
            store: None,
            config: None,
            address_query: String::new(),
        }
    }

    /// Route identifier under which the query is remembered
    #[must_use]
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    #[must_use]
    pub const fn items(mut self, items: &'a [T]) -> Self {
        self.items = Some(items);
        self
    }

    #[must_use]
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn config(mut self, config: ListingConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Query string currently in the address bar
    #[must_use]
    pub fn address_query(mut self, query: impl Into<String>) -> Self {
        self.address_query = query.into();
        self
    }

    /// Build the session
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingContext` if the route, items or store was
    /// not provided, and `SessionError::InvalidConfig` if the configuration
    /// fails validation.
    pub fn build(self) -> Result<ListingSession<'a, T, S>> {
        let route = self.route.ok_or(SessionError::MissingContext("route"))?;
        let items = self.items.ok_or(SessionError::MissingContext("items"))?;
        let store = self.store.ok_or(SessionError::MissingContext("query store"))?;
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| SessionError::InvalidConfig(e.to_string()))?;

        let address_query = self
            .address_query
            .strip_prefix('?')
            .unwrap_or(&self.address_query)
            .to_string();

        let starting_query = match store.get(&route) {
            Some(remembered) => {
                tracing::debug!(%route, query = %remembered, "using remembered query");
                remembered
            }
            None => address_query.clone(),
        };

        let state = FilterState::from_query(&starting_query, &config.sort);
        let tag_census = census(items, config.tags.cap());
        let search = SearchDebouncer::new(config.search.debounce(), state.search.clone());

        Ok(ListingSession {
            route,
            items,
            store,
            config,
            address_query,
            state,
            tag_census,
            search,
        })
    }
}

impl<T: Listable, S: QueryStore> Default for ListingSessionBuilder<'_, T, S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{Item, SortDirection};
    use crate::memory::MemoryQueryStore;
    use crate::pagination::WindowPosition;
    use std::time::Duration;

    fn items() -> Vec<Item> {
        (1..=20)
            .map(|i| {
                let tag = if i % 2 == 0 { "Even" } else { "odd" };
                Item::new(i, format!("Post {i:02}")).with_tags([tag]).with_date(i as i64)
            })
            .collect()
    }

    fn session<'a>(items: &'a [Item], store: &'a MemoryQueryStore) -> ListingSession<'a, Item, &'a MemoryQueryStore> {
        ListingSession::builder()
            .route("/blog")
            .items(items)
            .store(store)
            .build()
            .unwrap()
    }

    #[test]
    fn test_missing_store_fails() {
        let items = items();
        let result = ListingSession::<Item, MemoryQueryStore>::builder()
            .route("/blog")
            .items(&items)
            .build();
        assert!(matches!(result, Err(SessionError::MissingContext("query store"))));
    }

    #[test]
    fn test_missing_route_fails() {
        let items = items();
        let store = MemoryQueryStore::new();
        let result = ListingSession::builder().items(&items).store(&store).build();
        assert!(matches!(result, Err(SessionError::MissingContext("route"))));
    }

    #[test]
    fn test_invalid_config_fails() {
        let items = items();
        let store = MemoryQueryStore::new();
        let mut config = ListingConfig::default();
        config.pagination.window_size = 4;

        let result = ListingSession::builder()
            .route("/blog")
            .items(&items)
            .store(&store)
            .config(config)
            .build();
        assert!(matches!(result, Err(SessionError::InvalidConfig(_))));
    }

    #[test]
    fn test_initial_view_defaults() {
        let items = items();
        let store = MemoryQueryStore::new();
        let session = session(&items, &store);
        let view = session.view();

        assert_eq!(view.total_filtered, 20);
        assert_eq!(view.items.len(), 6);
        // title descending
        assert_eq!(view.items[0].title, "Post 20");
        assert!(view.show_results);
        assert!(!view.is_empty());

        let controls = view.controls.unwrap();
        assert_eq!(controls.position(), WindowPosition::First);
        assert_eq!(controls.total_pages, 4);
    }

    #[test]
    fn test_address_query_is_used_without_memory() {
        let items = items();
        let store = MemoryQueryStore::new();
        let session = ListingSession::builder()
            .route("/blog")
            .items(&items)
            .store(&store)
            .address_query("?page=3&ref=home")
            .build()
            .unwrap();

        assert_eq!(session.state().page, 3);
        assert_eq!(session.address_query(), "page=3&ref=home");
    }

    #[test]
    fn test_memory_wins_over_address_query() {
        let items = items();
        let store = MemoryQueryStore::new();
        store.set("/blog", "page=2");

        let session = ListingSession::builder()
            .route("/blog")
            .items(&items)
            .store(&store)
            .address_query("page=4")
            .build()
            .unwrap();
        assert_eq!(session.state().page, 2);
    }

    #[test]
    fn test_mutations_reset_page_and_commit() {
        let items = items();
        let store = MemoryQueryStore::new();
        let mut session = session(&items, &store);

        let nav = session.set_page(3);
        assert!(nav.changed);
        assert_eq!(session.state().page, 3);
        assert_eq!(store.get("/blog").as_deref(), Some(nav.query.as_str()));

        session.toggle_tag("Even");
        assert_eq!(session.state().page, 1);
        assert_eq!(session.view().total_filtered, 10);

        session.set_page(2);
        session.set_sort(SortSpec::new("date", SortDirection::Ascending));
        assert_eq!(session.state().page, 1);
        assert_eq!(session.view().items[0].id, 2);
    }

    #[test]
    fn test_recommit_same_state_is_unchanged() {
        let items = items();
        let store = MemoryQueryStore::new();
        let mut session = session(&items, &store);

        assert!(session.commit().changed);
        assert!(!session.commit().changed);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_foreign_keys_survive_commit() {
        let items = items();
        let store = MemoryQueryStore::new();
        let mut session = ListingSession::builder()
            .route("/blog")
            .items(&items)
            .store(&store)
            .address_query("ref=mail")
            .build()
            .unwrap();

        let nav = session.set_search("post 1");
        assert!(nav.query.starts_with("ref=mail&"));
        assert_eq!(session.address_query(), nav.query);
    }

    #[test]
    fn test_unsortable_key_uses_default() {
        let items = items();
        let store = MemoryQueryStore::new();
        let mut session = session(&items, &store);

        session.set_sort(SortSpec::new("views", SortDirection::Ascending));
        assert_eq!(session.state().sort, SortSpec::new("title", SortDirection::Descending));
    }

    #[test]
    fn test_debounced_search() {
        let items = items();
        let store = MemoryQueryStore::new();
        let mut session = session(&items, &store);
        let start = Instant::now();

        session.search_input("post 0", start);
        assert_eq!(session.search_text(), "post 0");
        assert_eq!(session.poll_search(start + Duration::from_millis(10)), None);
        assert_eq!(session.view().total_filtered, 20);

        let nav = session.poll_search(start + Duration::from_millis(150)).unwrap();
        assert!(nav.query.contains("search=post%25200"));
        assert_eq!(session.view().total_filtered, 9);

        session.search_input("post", start);
        let nav = session.clear_search();
        assert!(!nav.query.contains("search="));
        assert_eq!(session.search_deadline(), None);
    }

    #[test]
    fn test_tag_entries_lowercase_and_flag_active() {
        let items = items();
        let store = MemoryQueryStore::new();
        let mut session = session(&items, &store);
        session.toggle_tag("Even");

        let tags = session.view().tags;
        assert_eq!(tags.len(), 2);
        let even = tags.iter().find(|t| t.tag == "Even").unwrap();
        assert_eq!(even.label, "even");
        assert!(even.active);
        assert!(!tags.iter().find(|t| t.tag == "odd").unwrap().active);
    }

    #[test]
    fn test_disabled_pagination_shows_everything() {
        let items = items();
        let store = MemoryQueryStore::new();
        let mut config = ListingConfig::default();
        config.pagination.show = false;

        let session = ListingSession::builder()
            .route("/blog")
            .items(&items)
            .store(&store)
            .config(config)
            .build()
            .unwrap();
        let view = session.view();
        assert_eq!(view.items.len(), 20);
        assert!(view.controls.is_none());
    }

    #[test]
    fn test_single_page_hides_controls() {
        let items: Vec<Item> = items().into_iter().take(5).collect();
        let store = MemoryQueryStore::new();
        let session = session(&items, &store);
        let view = session.view();
        assert!(view.controls.is_none());
        assert_eq!(view.window.page_range, vec![1]);
        assert_eq!(view.window.position, WindowPosition::None);
    }

    #[test]
    fn test_empty_result() {
        let items = items();
        let store = MemoryQueryStore::new();
        let mut session = session(&items, &store);
        session.set_search("nothing matches this");

        let view = session.view();
        assert!(view.is_empty());
        assert!(view.items.is_empty());
    }
}
