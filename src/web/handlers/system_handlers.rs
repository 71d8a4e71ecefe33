// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::debug;

use crate::assistant::CampaignAssistant;
use crate::types::forms::FormOptions;
use crate::types::response::SystemStatus;
use crate::web::types::{DataResponse, TextResponse};

pub async fn status_handler(
    assistant: &State<CampaignAssistant>,
) -> Json<DataResponse<SystemStatus>> {
    let status = assistant.status();

    let message = match (status.inference_configured, status.sheets_configured) {
        (true, true) => "All integrations configured",
        (true, false) => "gcp_service_account не настроен — запись в Sheets отключена.",
        (false, _) => "HF_TOKEN не настроен ❌ — модель не будет работать.",
    };

    Json(DataResponse::success(message.to_string(), status, None))
}

pub async fn options_handler() -> Json<DataResponse<FormOptions>> {
    Json(DataResponse::success(
        "Form options".to_string(),
        FormOptions::current(),
        None,
    ))
}

pub async fn health_handler() -> Json<TextResponse> {
    debug!("Health check");
    Json(TextResponse::success("OK".to_string(), None))
}
