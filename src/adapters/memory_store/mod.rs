// Memory store adapter - In-process persistence with scripted responses

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

#[derive(Debug, Default)]
struct StoreState {
    requests: Vec<TrimRequest>,
    scripted: VecDeque<Result<TrimResponse, DomainError>>,
}

/// Records every request. Answers come from a script, then default to success.
#[derive(Debug, Default)]
pub struct MemoryStoreAdapter {
    state: Mutex<StoreState>,
}

impl MemoryStoreAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the answer for the next unanswered request
    pub fn push_response(&self, response: Result<TrimResponse, DomainError>) {
        self.lock().scripted.push_back(response);
    }

    pub fn requests(&self) -> Vec<TrimRequest> {
        self.lock().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }
}

#[async_trait]
impl PersistencePort for MemoryStoreAdapter {
    async fn trim(&self, request: &TrimRequest) -> Result<TrimResponse, DomainError> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        let response = state.scripted.pop_front().unwrap_or_else(|| Ok(TrimResponse::ok()));
        debug!(name = %request.name, ok = response.is_ok(), "Memory store answered trim");
        response
    }
}
