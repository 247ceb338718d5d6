//! Paged movie grid state.
//!
//! [`MovieListView`] owns a [`ListPager`] and the rows currently shown. Each
//! pager change issues exactly one fetch; a response is applied only if no
//! newer fetch has started in the meantime.

use crate::generation::{RequestGeneration, Ticket};
use cinema_core::RequestError;
use cinema_core::api::{CatalogApi, MovieQuery};
use cinema_core::movie::Movie;
use cinema_core::notify::Notifier;
use cinema_core::pager::{ListPager, PageState, SortKey};
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard};

/// What happened to a requested state change.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The pager did not move, so nothing was fetched
    Unchanged,
    /// Rows were fetched and are now shown
    Applied(usize),
    /// A newer request started first; this response was dropped
    Stale,
    /// The fetch failed; the view shows no rows
    Failed(RequestError),
}

/// Render-ready copy of the view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    pub page: PageState,
    pub total_pages: u32,
    pub window: RangeInclusive<u32>,
    pub has_prev: bool,
    pub has_next: bool,
    pub search: Option<String>,
    pub movies: Vec<Movie>,
    pub loading: bool,
}

struct ListState {
    pager: ListPager,
    search: Option<String>,
    movies: Vec<Movie>,
    loading: bool,
}

pub struct MovieListView {
    api: Arc<dyn CatalogApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ListState>,
    generation: RequestGeneration,
}

impl MovieListView {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        notifier: Arc<dyn Notifier>,
        page_size: u32,
        sort_key: SortKey,
    ) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(ListState {
                pager: ListPager::new(page_size, sort_key),
                search: None,
                movies: Vec::new(),
                loading: false,
            }),
            generation: RequestGeneration::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let state = self.lock();
        ListSnapshot {
            page: state.pager.state(),
            total_pages: state.pager.total_pages(),
            window: state.pager.page_window(),
            has_prev: state.pager.has_prev(),
            has_next: state.pager.has_next(),
            search: state.search.clone(),
            movies: state.movies.clone(),
            loading: state.loading,
        }
    }

    /// Loads the total count, then the current page.
    pub async fn load(&self) -> FetchOutcome {
        self.load_page(None).await
    }

    /// Loads the total count, then page `page` with a single list fetch.
    ///
    /// The page is clamped to the total when the count is known.
    pub async fn load_at(&self, page: i64) -> FetchOutcome {
        self.load_page(Some(page)).await
    }

    /// Filters by a search text (blank clears) and reloads from page 1.
    pub async fn search(&self, text: Option<&str>) -> FetchOutcome {
        self.search_at(text, 1).await
    }

    /// Filters by a search text and loads page `page` of the results.
    pub async fn search_at(&self, text: Option<&str>, page: i64) -> FetchOutcome {
        {
            let mut state = self.lock();
            state.search = text.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
            state.pager.go_to_page(1);
        }
        self.load_at(page).await
    }

    async fn load_page(&self, page: Option<i64>) -> FetchOutcome {
        let (ticket, search) = {
            let mut state = self.lock();
            state.loading = true;
            (self.generation.begin(), state.search.clone())
        };

        match self.api.count_movies(search.as_deref()).await {
            Ok(total) => {
                if !self.generation.is_current(&ticket) {
                    return FetchOutcome::Stale;
                }
                self.lock().pager.set_total_count(total);
            }
            Err(e) => {
                tracing::warn!("[MovieListView] Total count unavailable: {}", e);
            }
        }
        if let Some(page) = page {
            self.lock().pager.seek(page);
        }

        let query = self.query_for_current();
        self.fetch(ticket, query).await
    }

    pub async fn set_sort(&self, key: SortKey) -> FetchOutcome {
        self.change(|pager| pager.set_sort(key)).await
    }

    pub async fn set_page_size(&self, size: u32) -> FetchOutcome {
        self.change(|pager| pager.set_page_size(size)).await
    }

    pub async fn go_to_page(&self, page: i64) -> FetchOutcome {
        self.change(|pager| pager.go_to_page(page)).await
    }

    pub async fn next_page(&self) -> FetchOutcome {
        self.change(ListPager::next_page).await
    }

    pub async fn prev_page(&self) -> FetchOutcome {
        self.change(ListPager::prev_page).await
    }

    async fn change<F>(&self, f: F) -> FetchOutcome
    where
        F: FnOnce(&mut ListPager) -> bool,
    {
        let (ticket, query) = {
            let mut state = self.lock();
            if !f(&mut state.pager) {
                return FetchOutcome::Unchanged;
            }
            state.loading = true;
            (self.generation.begin(), Self::query_of(&state))
        };
        self.fetch(ticket, query).await
    }

    fn query_for_current(&self) -> MovieQuery {
        Self::query_of(&self.lock())
    }

    fn query_of(state: &ListState) -> MovieQuery {
        MovieQuery::page(&state.pager.state()).with_query(state.search.as_deref())
    }

    async fn fetch(&self, ticket: Ticket, query: MovieQuery) -> FetchOutcome {
        let result = self.api.list_movies(&query).await;

        if !self.generation.is_current(&ticket) {
            tracing::debug!("[MovieListView] Dropping stale page response {:?}", ticket);
            return FetchOutcome::Stale;
        }

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(movies) => {
                let count = movies.len();
                state.movies = movies;
                FetchOutcome::Applied(count)
            }
            Err(e) => {
                tracing::warn!("[MovieListView] Page fetch failed: {}", e);
                state.movies.clear();
                drop(state);
                self.notifier.error(&e.message);
                FetchOutcome::Failed(e)
            }
        }
    }
}
