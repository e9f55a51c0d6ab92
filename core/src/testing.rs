//! In-memory `Transport` for tests: replays queued responses and records
//! every request it was asked to execute.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{CandlepinError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::rest::Transport;

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpResponse>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response; replies are consumed in FIFO order.
    pub fn push(&self, response: HttpResponse) -> &Self {
        self.replies.borrow_mut().push_back(Ok(response));
        self
    }

    /// Queue a JSON 200 response.
    pub fn push_json(&self, body: serde_json::Value) -> &Self {
        self.push(HttpResponse::new(200, body.to_string()))
    }

    /// Queue a failure below HTTP (connection refused and the like).
    pub fn push_error(&self, err: CandlepinError) -> &Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.replies.borrow_mut().pop_front().unwrap_or_else(|| {
            Err(CandlepinError::UnexpectedPayload(format!(
                "no scripted response for {} {}",
                request.method.as_str(),
                request.url
            )))
        })
    }
}
