// src/web/handlers/post_handlers.rs
//! Job posts tab: advertisement, employer summary, save to JobPosts

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use crate::assistant::{CampaignAssistant, FormError};
use crate::types::forms::{JobPostForm, SaveJobPostForm};
use crate::types::response::{Generation, Notice, NoticeLevel};
use crate::web::types::{
    DataResponse, GenerationData, NoticeData, StandardErrorResponse, StandardRequest,
    WithConversationId,
};

pub(crate) fn form_error_response(
    error: FormError,
    conversation_id: Option<String>,
) -> Json<StandardErrorResponse> {
    let suggestions = match error {
        FormError::MissingJobFields => vec![
            "Fill in job_title, city and raw_description".to_string(),
        ],
        FormError::MissingResearchInput => {
            vec!["Provide a question or pasted data in research_input".to_string()]
        }
        FormError::NothingToSave => vec!["Generate a result before saving it".to_string()],
    };

    Json(StandardErrorResponse::new(
        error.message().to_string(),
        error.code().to_string(),
        suggestions,
        conversation_id,
    ))
}

pub(crate) fn generation_response(
    generation: Generation,
    done_message: &str,
    conversation_id: Option<String>,
) -> Json<DataResponse<GenerationData>> {
    if generation.is_generated() {
        Json(DataResponse::success(
            done_message.to_string(),
            generation.into(),
            conversation_id,
        ))
    } else {
        let message = generation.text.clone();
        Json(DataResponse::degraded(message, generation.into(), conversation_id))
    }
}

pub(crate) fn notice_response(
    notice: Notice,
    conversation_id: Option<String>,
) -> Json<DataResponse<NoticeData>> {
    let message = notice.message.clone();
    if notice.level == NoticeLevel::Success {
        Json(DataResponse::success(message, notice.into(), conversation_id))
    } else {
        Json(DataResponse::degraded(message, notice.into(), conversation_id))
    }
}

pub async fn generate_post_handler(
    request: Json<StandardRequest<JobPostForm>>,
    assistant: &State<CampaignAssistant>,
) -> Result<Json<DataResponse<GenerationData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    let generation = assistant
        .generate_post(&request.data)
        .await
        .map_err(|e| form_error_response(e, conversation_id.clone()))?;

    Ok(generation_response(
        generation,
        "Job post generated",
        conversation_id,
    ))
}

pub async fn employer_summary_handler(
    request: Json<StandardRequest<JobPostForm>>,
    assistant: &State<CampaignAssistant>,
) -> Result<Json<DataResponse<GenerationData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    let generation = assistant
        .employer_summary(&request.data)
        .await
        .map_err(|e| form_error_response(e, conversation_id.clone()))?;

    Ok(generation_response(
        generation,
        "Employer summary generated",
        conversation_id,
    ))
}

pub async fn save_post_handler(
    request: Json<StandardRequest<SaveJobPostForm>>,
    assistant: &State<CampaignAssistant>,
) -> Result<Json<DataResponse<NoticeData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    info!(
        "Save requested for job post '{}' ({})",
        request.data.form.job_title, request.data.form.city
    );

    let notice = assistant
        .save_job_post(&request.data)
        .await
        .map_err(|e| form_error_response(e, conversation_id.clone()))?;

    Ok(notice_response(notice, conversation_id))
}
