//! Fakes shared by the handler and adapter tests.

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::web::{self, Bytes};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;
use crate::handlers::page::BUNDLED_INDEX;
use crate::models::chat::{ChatReply, ChatRequest};
use crate::models::lead::Lead;
use crate::services::{ChatBackend, LeadStore};
use crate::state::AppState;

pub fn test_state(chat: Arc<dyn ChatBackend>, leads: Option<Arc<dyn LeadStore>>) -> AppState {
    AppState {
        index_html: Bytes::from_static(BUNDLED_INDEX.as_bytes()),
        chat,
        leads,
    }
}

type Reply = dyn Fn(&ChatRequest) -> Result<ChatReply, AppError> + Send + Sync;

pub struct FakeChat {
    calls: AtomicUsize,
    reply: Box<Reply>,
}

impl FakeChat {
    pub fn replying<F>(reply: F) -> Self
    where
        F: Fn(&ChatRequest) -> Result<ChatReply, AppError> + Send + Sync + 'static,
    {
        Self {
            calls: AtomicUsize::new(0),
            reply: Box::new(reply),
        }
    }

    pub fn unused() -> Self {
        Self::replying(|_| panic!("chat backend should not be called"))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for FakeChat {
    async fn generate(&self, request: &ChatRequest) -> Result<ChatReply, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(request)
    }
}

#[derive(Default)]
pub struct MemoryLeadStore {
    saved: Mutex<Vec<Lead>>,
    failure: Option<String>,
}

impl MemoryLeadStore {
    pub fn failing(message: &str) -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn saved(&self) -> Vec<Lead> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn insert(&self, lead: &Lead) -> Result<(), AppError> {
        if let Some(message) = &self.failure {
            return Err(sqlx::Error::Protocol(message.clone()).into());
        }
        self.saved.lock().unwrap().push(lead.clone());
        Ok(())
    }
}

/// One request as the fake Gemini server saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub query: String,
    pub api_key_header: Option<String>,
    pub body: Value,
}

struct UpstreamState {
    status: StatusCode,
    body: String,
    seen: Mutex<Vec<SeenRequest>>,
}

pub struct FakeUpstream {
    pub base_url: String,
    state: web::Data<UpstreamState>,
}

impl FakeUpstream {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }
}

async fn capture(req: HttpRequest, body: Bytes, state: web::Data<UpstreamState>) -> HttpResponse {
    state.seen.lock().unwrap().push(SeenRequest {
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        api_key_header: req
            .headers()
            .get("x-goog-api-key")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    HttpResponse::build(state.status)
        .content_type("application/json")
        .body(state.body.clone())
}

/// Starts a local server that answers every request with `status` and `body`.
pub async fn spawn_upstream(status: u16, body: Value) -> FakeUpstream {
    let state = web::Data::new(UpstreamState {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
        seen: Mutex::new(Vec::new()),
    });

    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .default_service(web::to(capture))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    FakeUpstream {
        base_url: format!("http://{}/v1beta", addr),
        state,
    }
}

/// A base URL nothing is listening on.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1beta", addr)
}
