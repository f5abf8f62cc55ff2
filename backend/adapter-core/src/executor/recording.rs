//! In-memory executor for tests and offline development.

use crate::error::ExecutorError;
use crate::executor::{RequestDescriptor, RequestExecutor};

use common::{ErrorLocation, HttpStatusCode};

use std::collections::VecDeque;
use std::panic::Location;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
enum Reply {
    Body(String),
    Status(HttpStatusCode, String),
}

#[derive(Debug, Default)]
struct RecordingState {
    replies: VecDeque<Reply>,
    requests: Vec<RequestDescriptor>,
}

/// Records every request it receives and answers from a FIFO of canned replies.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    state: Mutex<RecordingState>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor that answers the first call with `body`.
    pub fn replying(body: impl Into<String>) -> Self {
        let executor = Self::new();
        executor.push_body(body);
        executor
    }

    /// Queue a successful response body.
    pub fn push_body(&self, body: impl Into<String>) {
        self.lock().replies.push_back(Reply::Body(body.into()));
    }

    /// Queue a non-2xx response.
    pub fn push_status(&self, status: u16, body: impl Into<String>) {
        self.lock()
            .replies
            .push_back(Reply::Status(HttpStatusCode(status), body.into()));
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> MutexGuard<'_, RecordingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[track_caller]
    fn answer(&self, request: RequestDescriptor) -> Result<String, ExecutorError> {
        let mut state = self.lock();
        let endpoint = request.endpoint().to_string();
        state.requests.push(request);

        match state.replies.pop_front() {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status, body)) => Err(ExecutorError::Server {
                status,
                body,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Err(ExecutorError::Exhausted {
                message: format!("no reply queued for {endpoint}"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl RequestExecutor for RecordingExecutor {
    async fn execute(&self, request: RequestDescriptor) -> Result<String, ExecutorError> {
        self.answer(request)
    }
}
