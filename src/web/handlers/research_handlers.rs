// src/web/handlers/research_handlers.rs
use rocket::serde::json::Json;
use rocket::State;

use super::post_handlers::{form_error_response, generation_response, notice_response};
use crate::assistant::CampaignAssistant;
use crate::types::forms::{ResearchForm, SaveResearchForm};
use crate::web::types::{
    DataResponse, GenerationData, NoticeData, StandardErrorResponse, StandardRequest,
    WithConversationId,
};

pub async fn research_insights_handler(
    request: Json<StandardRequest<ResearchForm>>,
    assistant: &State<CampaignAssistant>,
) -> Result<Json<DataResponse<GenerationData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    let generation = assistant
        .research_insights(&request.data)
        .await
        .map_err(|e| form_error_response(e, conversation_id.clone()))?;

    Ok(generation_response(
        generation,
        "Insights generated",
        conversation_id,
    ))
}

pub async fn save_research_handler(
    request: Json<StandardRequest<SaveResearchForm>>,
    assistant: &State<CampaignAssistant>,
) -> Result<Json<DataResponse<NoticeData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    let notice = assistant
        .save_research(&request.data)
        .await
        .map_err(|e| form_error_response(e, conversation_id.clone()))?;

    Ok(notice_response(notice, conversation_id))
}
