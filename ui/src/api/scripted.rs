//! In-memory transport with canned responses, for tests and offline previews.

use std::{cell::RefCell, rc::Rc};

use super::{
    client::{HttpGet, HttpResponse},
    error::FetchError,
};

#[derive(Debug, Clone)]
enum Reply {
    Body(HttpResponse),
    Unreachable,
}

/// Routes are matched on the path-and-query part of the URL by longest prefix,
/// so `/dashboard/trend?tahun=2024` can be scripted separately from `/dashboard/trend`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    routes: Rc<RefCell<Vec<(String, Reply)>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.borrow_mut().push((
            path.to_string(),
            Reply::Body(HttpResponse {
                status,
                body: body.into(),
            }),
        ));
        self
    }

    pub fn json(self, path: &str, body: serde_json::Value) -> Self {
        self.respond(path, 200, body.to_string())
    }

    pub fn unreachable(self, path: &str) -> Self {
        self.routes
            .borrow_mut()
            .push((path.to_string(), Reply::Unreachable));
        self
    }

    /// Every URL requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count_matching(&self, fragment: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|url| url.contains(fragment))
            .count()
    }
}

fn path_and_query(url: &str) -> &str {
    match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            rest.find('/').map(|idx| &rest[idx..]).unwrap_or("/")
        }
        None => url,
    }
}

impl HttpGet for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.calls.borrow_mut().push(url.to_string());
        let target = path_and_query(url);
        let reply = self
            .routes
            .borrow()
            .iter()
            .filter(|(prefix, _)| target.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, reply)| reply.clone());
        match reply {
            Some(Reply::Body(resp)) => Ok(resp),
            Some(Reply::Unreachable) => Err(FetchError::Transport {
                url: url.to_string(),
                message: "connection refused".into(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
