use std::sync::Arc;

use actix_web::web::Bytes;

use crate::services::{ChatBackend, LeadStore};

/// Everything the handlers need, built once in `main`.
pub struct AppState {
    pub index_html: Bytes,
    pub chat: Arc<dyn ChatBackend>,
    /// `None` when no database was configured or reachable at startup.
    pub leads: Option<Arc<dyn LeadStore>>,
}
