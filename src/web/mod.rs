// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use std::net::IpAddr;
use tracing::{error, info};

use crate::assistant::CampaignAssistant;
use crate::types::forms::{
    FormOptions, JobPostForm, ResearchForm, SaveJobPostForm, SaveResearchForm,
};
use crate::types::response::SystemStatus;

const INDEX_HTML: &str = include_str!("../../static/index.html");

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/")]
pub fn index() -> RawHtml<&'static str> {
    RawHtml(INDEX_HTML)
}

#[post("/posts/generate", data = "<request>")]
pub async fn generate_post(
    request: Json<StandardRequest<JobPostForm>>,
    assistant: &State<CampaignAssistant>,
) -> Result<Json<DataResponse<GenerationData>>, Json<StandardErrorResponse>> {
    handlers::generate_post_handler(request, assistant).await
}

#[post("/posts/summary", data = "<request>")]
pub async fn employer_summary(
    request: Json<StandardRequest<JobPostForm>>,
    assistant: &State<CampaignAssistant>,
) -> Result<Json<DataResponse<GenerationData>>, Json<StandardErrorResponse>> {
    handlers::employer_summary_handler(request, assistant).await
}

#[post("/posts/save", data = "<request>")]
pub async fn save_post(
    request: Json<StandardRequest<SaveJobPostForm>>,
    assistant: &State<CampaignAssistant>,
) -> Result<Json<DataResponse<NoticeData>>, Json<StandardErrorResponse>> {
    handlers::save_post_handler(request, assistant).await
}

#[post("/research/insights", data = "<request>")]
pub async fn research_insights(
    request: Json<StandardRequest<ResearchForm>>,
    assistant: &State<CampaignAssistant>,
) -> Result<Json<DataResponse<GenerationData>>, Json<StandardErrorResponse>> {
    handlers::research_insights_handler(request, assistant).await
}

#[post("/research/save", data = "<request>")]
pub async fn save_research(
    request: Json<StandardRequest<SaveResearchForm>>,
    assistant: &State<CampaignAssistant>,
) -> Result<Json<DataResponse<NoticeData>>, Json<StandardErrorResponse>> {
    handlers::save_research_handler(request, assistant).await
}

#[get("/status")]
pub async fn status(assistant: &State<CampaignAssistant>) -> Json<DataResponse<SystemStatus>> {
    handlers::status_handler(assistant).await
}

#[get("/options")]
pub async fn form_options() -> Json<DataResponse<FormOptions>> {
    handlers::options_handler().await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Check your request JSON format".to_string()],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Endpoint not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the request path and method".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected fields".to_string(),
        "INVALID_FIELDS".to_string(),
        vec![
            "Verify field names and value types".to_string(),
            "Use one of the research types listed by /api/options".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
        None,
    ))
}

/// Assemble the server around an assistant; used by the binary and by tests
pub fn build_rocket(assistant: CampaignAssistant) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(assistant)
        .mount("/", routes![index])
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                generate_post,
                employer_summary,
                save_post,
                research_insights,
                save_research,
                status,
                form_options,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(assistant: CampaignAssistant, address: IpAddr, port: u16) -> Result<()> {
    let status = assistant.status();

    info!("Starting Campaign Assistant server on http://{}:{}", address, port);
    info!("Model: {}", status.model_id);
    info!(
        "Inference: {}, Sheets: {} ({})",
        if status.inference_configured { "configured" } else { "not configured" },
        if status.sheets_configured { "configured" } else { "not configured" },
        status.spreadsheet_name
    );

    let figment = rocket::Config::figment()
        .merge(("address", address))
        .merge(("port", port));

    if let Err(e) = build_rocket(assistant).configure(figment).launch().await {
        error!("Server stopped with error: {}", e);
        return Err(anyhow::anyhow!("Rocket failed: {}", e));
    }

    Ok(())
}
