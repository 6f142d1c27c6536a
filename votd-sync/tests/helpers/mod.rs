//! Test Helper Utilities
//!
//! Scripted HTTP transport shared by the integration tests. Routes are keyed
//! by method and exact URL; anything unscripted answers 404.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use votd_sync::http::{HttpConfig, HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use votd_sync::services::PageUpdateSink;
use votd_sync::{HttpClient, SyncResult, VerseRecord};

/// Fixed day used across the scenarios
pub fn test_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

#[derive(Debug, Clone)]
enum Reply {
    Respond(u16, String),
    Fail,
}

/// Transport that answers from a route table and records every request
#[derive(Default)]
pub struct StubTransport {
    routes: HashMap<(Method, String), Reply>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, method: Method, url: &str, status: u16, body: &str) -> Self {
        self.routes
            .insert((method, url.to_string()), Reply::Respond(status, body.to_string()));
        self
    }

    /// Connection failure for this route
    pub fn fail(mut self, method: Method, url: &str) -> Self {
        self.routes.insert((method, url.to_string()), Reply::Fail);
        self
    }

    pub fn into_client(self) -> (Arc<StubTransport>, HttpClient) {
        let transport = Arc::new(self);
        let client = HttpClient::new(transport.clone(), HttpConfig::default());
        (transport, client)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// URLs requested with `method`, in order
    pub fn urls_for(&self, method: Method) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .map(|r| r.url)
            .collect()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let key = (request.method.clone(), request.url.clone());
        self.requests.lock().unwrap().push(request.clone());

        match self.routes.get(&key) {
            Some(Reply::Respond(status, body)) => Ok(HttpResponse::new(*status, body.clone())),
            Some(Reply::Fail) => Err(TransportError::Connection {
                url: request.url,
                message: "connection refused".to_string(),
            }),
            None => Ok(HttpResponse::new(404, "")),
        }
    }
}

/// Sink that keeps what it was given
#[derive(Default)]
pub struct RecordingSink {
    pub published: Mutex<Vec<VerseRecord>>,
}

impl RecordingSink {
    pub fn published(&self) -> Vec<VerseRecord> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageUpdateSink for RecordingSink {
    async fn publish(&self, record: &VerseRecord) -> SyncResult<()> {
        self.published.lock().unwrap().push(record.clone());
        Ok(())
    }
}
