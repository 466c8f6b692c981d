use actix_web::{web, HttpResponse};
use log::{info, warn};
use serde_json::json;

use crate::error::AppError;
use crate::models::lead::{Lead, LeadForm};
use crate::state::AppState;

/// The store is checked before the body so an unconfigured database answers
/// 503 no matter what was sent.
pub async fn save_lead(
    form: Result<web::Json<LeadForm>, actix_web::Error>,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    let Some(store) = state.leads.as_ref() else {
        warn!("Lead submission rejected: lead storage is disabled");
        return Err(AppError::ServiceUnavailable(
            "The database service is not available.".to_string(),
        )
        .into());
    };

    let lead = Lead::try_from(form?.into_inner())?;
    store.insert(&lead).await?;
    info!("Lead saved (servicio: {})", lead.servicio);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Lead guardado con éxito."
    })))
}
