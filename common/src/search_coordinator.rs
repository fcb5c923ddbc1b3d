//! Bridges the committed URL state, the editable draft and the users fetch.
//!
//! The coordinator never performs I/O. Observing new committed criteria may hand
//! out a [`FetchTicket`]; the caller runs it (see [`UsersFetcher`]) and reports the
//! outcome through [`SearchCoordinator::complete`]. Only the most recently issued
//! ticket may change the [`ResultsPane`]; anything older is discarded.

use std::future::Future;

use crate::{
    cache_key::CacheKey,
    fetch_error::FetchError,
    filter_codec::FilterCodec,
    filter_criteria::{DraftFilterState, FilterCriteria},
    query_state::QueryState,
    search_const::{EMPTY_RESULTS_MESSAGE, ERROR_MESSAGE, LOADING_MESSAGE, PROMPT_MESSAGE},
    ttl_cache::{CachePolicy, Clock, TtlCache},
    users::UserRow,
};

/// The injected users query capability.
pub trait UsersFetcher {
    fn fetch_users(&self, query: &QueryState) -> impl Future<Output = Result<Vec<UserRow>, FetchError>>;
}

/// One issued users request. `sequence` grows with every issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub sequence: u64,
    pub cache_key: CacheKey,
    pub query: QueryState,
}

impl FetchTicket {
    pub async fn run<F: UsersFetcher>(&self, fetcher: &F) -> Result<Vec<UserRow>, FetchError> {
        fetcher.fetch_users(&self.query).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsPane {
    AwaitingInput,
    Loading,
    Success(Vec<UserRow>),
    Error {
        reason: String,
        retry_eligible: bool,
        /// Rows of the last successful search, left on screen.
        previous_rows: Vec<UserRow>,
    },
}

impl ResultsPane {
    /// Status line to show instead of (or above) result rows.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::AwaitingInput => Some(PROMPT_MESSAGE),
            Self::Loading => Some(LOADING_MESSAGE),
            Self::Success(rows) if rows.is_empty() => Some(EMPTY_RESULTS_MESSAGE),
            Self::Success(_) => None,
            Self::Error { .. } => Some(ERROR_MESSAGE),
        }
    }

    pub fn rows(&self) -> &[UserRow] {
        match self {
            Self::Success(rows) => rows,
            Self::Error { previous_rows, .. } => previous_rows,
            Self::AwaitingInput | Self::Loading => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

pub struct SearchCoordinator<C: Clock> {
    codec: FilterCodec,
    clock: C,
    cache: TtlCache<CacheKey, Vec<UserRow>>,
    committed: FilterCriteria,
    draft: DraftFilterState,
    active_key: Option<CacheKey>,
    in_flight: Option<u64>,
    last_sequence: u64,
    last_rows: Vec<UserRow>,
    pane: ResultsPane,
}

impl<C: Clock> SearchCoordinator<C> {
    pub fn new(codec: FilterCodec, policy: CachePolicy, clock: C) -> Self {
        Self {
            codec,
            clock,
            cache: TtlCache::new(policy),
            committed: FilterCriteria::default(),
            draft: DraftFilterState::default(),
            active_key: None,
            in_flight: None,
            last_sequence: 0,
            last_rows: Vec::new(),
            pane: ResultsPane::AwaitingInput,
        }
    }

    pub fn codec(&self) -> FilterCodec {
        self.codec
    }

    pub fn pane(&self) -> &ResultsPane {
        &self.pane
    }

    pub fn committed(&self) -> &FilterCriteria {
        &self.committed
    }

    pub fn draft(&self) -> &DraftFilterState {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftFilterState {
        &mut self.draft
    }

    /// Replaces the results cache, dropping what it held.
    pub fn set_cache_policy(&mut self, policy: CachePolicy) {
        self.cache = TtlCache::new(policy);
    }

    /// Takes a committed query (first load or an external URL change). The draft
    /// is re-seeded from it, discarding unsaved edits.
    pub fn initialize(&mut self, query: &QueryState) -> Option<FetchTicket> {
        let criteria = self.codec.decode(query);
        self.draft = DraftFilterState::from(&criteria);
        self.observe(criteria)
    }

    /// The query the draft commits to. Navigation is up to the caller; fetching
    /// follows from the committed state it produces.
    pub fn submit(&self) -> QueryState {
        self.codec.encode_draft(&self.draft)
    }

    /// Derived fetch effect for newly committed criteria.
    pub fn observe(&mut self, criteria: FilterCriteria) -> Option<FetchTicket> {
        self.committed = criteria;
        if !self.codec.is_meaningful(&self.committed) {
            self.active_key = None;
            self.in_flight = None;
            self.pane = ResultsPane::AwaitingInput;
            return None;
        }

        let key = self.codec.cache_key(&self.committed);
        if self.active_key.as_ref() == Some(&key) {
            return None;
        }
        self.active_key = Some(key.clone());

        let now_ms = self.clock.now_ms();
        if let Some(rows) = self.cache.get(&key, now_ms).cloned() {
            self.in_flight = None;
            self.show_rows(rows);
            return None;
        }
        Some(self.issue(key))
    }

    /// Applies a fetch outcome. Returns false, changing nothing, when the ticket
    /// is no longer the latest one.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<Vec<UserRow>, FetchError>) -> bool {
        if self.in_flight != Some(ticket.sequence) {
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(rows) => {
                let now_ms = self.clock.now_ms();
                self.cache.put(ticket.cache_key.clone(), rows.clone(), now_ms);
                self.show_rows(rows);
            }
            Err(error) => {
                self.pane = ResultsPane::Error {
                    reason: error.to_string(),
                    retry_eligible: error.retry_eligible(),
                    previous_rows: self.last_rows.clone(),
                };
            }
        }
        true
    }

    /// Re-issues the current search after a failure. Re-submitting an unchanged
    /// query does not change the committed state, so it lands here.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if !matches!(self.pane, ResultsPane::Error { .. }) {
            return None;
        }
        let key = self.active_key.clone()?;
        Some(self.issue(key))
    }

    fn issue(&mut self, cache_key: CacheKey) -> FetchTicket {
        self.last_sequence += 1;
        self.in_flight = Some(self.last_sequence);
        self.pane = ResultsPane::Loading;
        FetchTicket { sequence: self.last_sequence, cache_key, query: self.codec.encode(&self.committed) }
    }

    fn show_rows(&mut self, rows: Vec<UserRow>) {
        self.last_rows = rows.clone();
        self.pane = ResultsPane::Success(rows);
    }
}
