//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{PostsCommand, PostsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub posts_query: Arc<dyn PostsQuery>,
    pub posts_command: Arc<dyn PostsCommand>,
}

impl HttpState {
    /// Build state from the two driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::BoardService;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryBoardStore;
    ///
    /// let store = Arc::new(InMemoryBoardStore::new());
    /// let service = Arc::new(BoardService::new(store.clone(), store));
    /// let state = HttpState::new(service.clone(), service);
    /// # let _ = state;
    /// ```
    pub fn new(posts_query: Arc<dyn PostsQuery>, posts_command: Arc<dyn PostsCommand>) -> Self {
        Self {
            posts_query,
            posts_command,
        }
    }
}
