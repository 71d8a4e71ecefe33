// src/assistant.rs
//! The five user actions of the two tabs, on top of the shared clients

use anyhow::Result;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::config_manager::{AppConfig, ConfigManager};
use crate::core::inference_client::{call_model, ChatCompletion, HfInferenceClient};
use crate::core::sheets_client::{append_job_post, append_research, GoogleSheetsClient, SheetStore};
use crate::prompts;
use crate::types::forms::{JobPostForm, ResearchForm, SaveJobPostForm, SaveResearchForm};
use crate::types::records::{JobPostRecord, ResearchRecord};
use crate::types::response::{Generation, Notice, SystemStatus};
use crate::utils::is_blank;

/// Input problems caught before any external call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingJobFields,
    MissingResearchInput,
    NothingToSave,
}

impl FormError {
    pub fn code(&self) -> &'static str {
        match self {
            FormError::MissingJobFields => "MISSING_JOB_FIELDS",
            FormError::MissingResearchInput => "MISSING_RESEARCH_INPUT",
            FormError::NothingToSave => "NOTHING_TO_SAVE",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FormError::MissingJobFields => {
                "Пожалуйста, заполните хотя бы Должность, Город и Сырой текст."
            }
            FormError::MissingResearchInput => "Пожалуйста, введите вопрос или данные.",
            FormError::NothingToSave => "Нет текста для сохранения. Сначала сгенерируйте результат.",
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FormError {}

pub struct CampaignAssistant {
    settings: AppConfig,
    model: Option<Arc<dyn ChatCompletion>>,
    sheets: Option<Arc<dyn SheetStore>>,
    service_account: Option<String>,
}

impl CampaignAssistant {
    pub fn new(
        settings: AppConfig,
        model: Option<Arc<dyn ChatCompletion>>,
        sheets: Option<Arc<dyn SheetStore>>,
    ) -> Self {
        Self {
            settings,
            model,
            sheets,
            service_account: None,
        }
    }

    /// Build the clients whose credentials are present
    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        let settings = config.app.clone();

        let model: Option<Arc<dyn ChatCompletion>> = match &config.secrets.hf_token {
            Some(token) => Some(Arc::new(HfInferenceClient::new(
                settings.inference_base_url.clone(),
                settings.model_id.clone(),
                token.clone(),
                settings.timeout_seconds,
            )?)),
            None => {
                warn!("HF_TOKEN is not configured, generation is disabled");
                None
            }
        };

        let mut service_account = None;
        let sheets: Option<Arc<dyn SheetStore>> = match &config.secrets.gcp_service_account {
            Some(key) => {
                let client = GoogleSheetsClient::new(
                    key.clone(),
                    settings.spreadsheet_name.clone(),
                    settings.timeout_seconds,
                )?;
                service_account = Some(client.service_account().to_string());
                Some(Arc::new(client))
            }
            None => {
                warn!("gcp_service_account is not configured, saving to Sheets is disabled");
                None
            }
        };

        Ok(Self {
            settings,
            model,
            sheets,
            service_account,
        })
    }

    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            model_id: self.settings.model_id.clone(),
            inference_configured: self.model.is_some(),
            sheets_configured: self.sheets.is_some(),
            spreadsheet_name: self.settings.spreadsheet_name.clone(),
            service_account: self.service_account.clone(),
        }
    }

    fn check_job_fields(form: &JobPostForm) -> Result<(), FormError> {
        if is_blank(&form.job_title) || is_blank(&form.city) || is_blank(&form.raw_description) {
            return Err(FormError::MissingJobFields);
        }
        Ok(())
    }

    /// Russian job advertisement from the job posts tab
    pub async fn generate_post(&self, form: &JobPostForm) -> Result<Generation, FormError> {
        Self::check_job_fields(form)?;

        let action_id = Uuid::new_v4();
        info!(
            "[{}] Generating job post: '{}' in {} for {} (variant {})",
            action_id, form.job_title, form.city, form.platform, form.variant_label
        );

        let generation = call_model(self.model.as_deref(), &prompts::job_post(form)).await;
        info!("[{}] Job post finished: {:?}", action_id, generation.status);
        Ok(generation)
    }

    /// Employer-facing bullet summary (ENG/RU)
    pub async fn employer_summary(&self, form: &JobPostForm) -> Result<Generation, FormError> {
        Self::check_job_fields(form)?;

        let action_id = Uuid::new_v4();
        info!(
            "[{}] Generating employer summary: '{}' in {}",
            action_id, form.job_title, form.city
        );

        let generation =
            call_model(self.model.as_deref(), &prompts::employer_summary(form)).await;
        info!("[{}] Summary finished: {:?}", action_id, generation.status);
        Ok(generation)
    }

    pub async fn research_insights(&self, form: &ResearchForm) -> Result<Generation, FormError> {
        if is_blank(&form.research_input) {
            return Err(FormError::MissingResearchInput);
        }

        let action_id = Uuid::new_v4();
        info!(
            "[{}] Research request: {} ({} characters)",
            action_id,
            form.research_type,
            form.research_input.chars().count()
        );

        let request = prompts::research(form.research_type, &form.research_input);
        let generation = call_model(self.model.as_deref(), &request).await;
        info!("[{}] Research finished: {:?}", action_id, generation.status);
        Ok(generation)
    }

    /// Append the generated post with its form fields to the JobPosts worksheet
    pub async fn save_job_post(&self, save: &SaveJobPostForm) -> Result<Notice, FormError> {
        if is_blank(&save.generated_post) {
            return Err(FormError::NothingToSave);
        }

        let form = &save.form;
        let record = JobPostRecord {
            timestamp: Utc::now(),
            job_title: form.job_title.clone(),
            city: form.city.clone(),
            platform: form.platform.clone(),
            variant_label: form.variant_label.clone(),
            target_audience: form.target_audience.clone(),
            application_link: form.application_link.clone(),
            generated_post: save.generated_post.clone(),
        };

        let notice = append_job_post(
            self.sheets.as_deref(),
            &self.settings.jobposts_sheet,
            &record,
        )
        .await;
        info!("Save job post '{}': {:?}", record.job_title, notice.level);
        Ok(notice)
    }

    /// Append the question and insights to the ResearchInsights worksheet
    pub async fn save_research(&self, save: &SaveResearchForm) -> Result<Notice, FormError> {
        if is_blank(&save.insights) {
            return Err(FormError::NothingToSave);
        }

        let record = ResearchRecord {
            timestamp: Utc::now(),
            question_type: save.form.research_type.label().to_string(),
            input_text: save.form.research_input.clone(),
            insights: save.insights.clone(),
        };

        let notice = append_research(
            self.sheets.as_deref(),
            &self.settings.research_sheet,
            &record,
        )
        .await;
        info!("Save research insights: {:?}", notice.level);
        Ok(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inference_client::{ChatRequest, NOT_CONFIGURED_MESSAGE};
    use crate::core::sheets_client::{JOB_POST_SAVED, NOT_CONFIGURED_WARNING};
    use crate::types::forms::ResearchKind;
    use crate::types::response::{GenerationStatus, NoticeLevel};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingModel {
        requests: Mutex<Vec<ChatRequest>>,
    }

    #[rocket::async_trait]
    impl ChatCompletion for RecordingModel {
        async fn complete(&self, request: &ChatRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            Ok("готовый текст".to_string())
        }

        fn model_id(&self) -> &str {
            "recording"
        }
    }

    #[derive(Default)]
    struct RecordingSheets {
        rows: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[rocket::async_trait]
    impl SheetStore for RecordingSheets {
        async fn append_row(&self, worksheet: &str, row: Vec<String>) -> Result<()> {
            self.rows.lock().unwrap().push((worksheet.to_string(), row));
            Ok(())
        }

        fn spreadsheet_name(&self) -> &str {
            "recording"
        }
    }

    fn form() -> JobPostForm {
        JobPostForm {
            job_title: "Складской работник".to_string(),
            city: "Берлин".to_string(),
            raw_description: "Смены 2/2, 14 € / час".to_string(),
            target_audience: "Студенты".to_string(),
            application_link: "https://forms.example/x".to_string(),
            ..Default::default()
        }
    }

    fn assistant_with(
        model: Option<Arc<RecordingModel>>,
        sheets: Option<Arc<RecordingSheets>>,
    ) -> CampaignAssistant {
        CampaignAssistant::new(
            AppConfig::default(),
            model.map(|m| m as Arc<dyn ChatCompletion>),
            sheets.map(|s| s as Arc<dyn SheetStore>),
        )
    }

    #[tokio::test]
    async fn test_missing_fields_skip_model() {
        let model = Arc::new(RecordingModel::default());
        let assistant = assistant_with(Some(model.clone()), None);

        let mut incomplete = form();
        incomplete.city = " ".to_string();

        assert_eq!(
            assistant.generate_post(&incomplete).await,
            Err(FormError::MissingJobFields)
        );
        assert_eq!(
            assistant.employer_summary(&incomplete).await,
            Err(FormError::MissingJobFields)
        );
        assert_eq!(
            assistant.research_insights(&ResearchForm::default()).await,
            Err(FormError::MissingResearchInput)
        );
        assert!(model.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_model() {
        let assistant = assistant_with(None, None);
        let generation = assistant.generate_post(&form()).await.unwrap();
        assert_eq!(generation.status, GenerationStatus::NotConfigured);
        assert_eq!(generation.text, NOT_CONFIGURED_MESSAGE);
    }

    #[tokio::test]
    async fn test_generation_uses_expected_prompts() {
        let model = Arc::new(RecordingModel::default());
        let assistant = assistant_with(Some(model.clone()), None);

        let post = assistant.generate_post(&form()).await.unwrap();
        assert_eq!(post.text, "готовый текст");

        assistant.employer_summary(&form()).await.unwrap();
        assistant
            .research_insights(&ResearchForm {
                research_type: ResearchKind::StrategyQuestion,
                research_input: "Как поднять отклики?".to_string(),
            })
            .await
            .unwrap();

        let requests = model.requests.lock().unwrap();
        let limits: Vec<u32> = requests.iter().map(|r| r.max_tokens).collect();
        assert_eq!(limits, vec![350, 250, 500]);
        assert!(requests[2].user.contains("Как поднять отклики?"));
    }

    #[tokio::test]
    async fn test_save_job_post_row_order() {
        let sheets = Arc::new(RecordingSheets::default());
        let assistant = assistant_with(None, Some(sheets.clone()));

        let save = SaveJobPostForm {
            form: form(),
            generated_post: "👤 Должность: Складской работник".to_string(),
        };
        let notice = assistant.save_job_post(&save).await.unwrap();
        assert_eq!(notice, Notice::success(JOB_POST_SAVED));

        let rows = sheets.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        let (worksheet, row) = &rows[0];
        assert_eq!(worksheet, "JobPosts");
        assert_eq!(row.len(), 8);
        assert_eq!(
            &row[1..],
            &[
                "Складской работник",
                "Берлин",
                "Facebook",
                "A",
                "Студенты",
                "https://forms.example/x",
                "👤 Должность: Складской работник",
            ]
        );
    }

    #[tokio::test]
    async fn test_save_research_row_order() {
        let sheets = Arc::new(RecordingSheets::default());
        let assistant = assistant_with(None, Some(sheets.clone()));

        let save = SaveResearchForm {
            form: ResearchForm {
                research_type: ResearchKind::RegionPlatformComparison,
                research_input: "Гамбург vs Берлин".to_string(),
            },
            insights: "Берлин лучше".to_string(),
        };
        assistant.save_research(&save).await.unwrap();

        let rows = sheets.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "ResearchInsights");
        assert_eq!(
            &rows[0].1[1..],
            &["Сравнение регионов / платформ", "Гамбург vs Берлин", "Берлин лучше"]
        );
    }

    #[tokio::test]
    async fn test_save_without_sheets_warns() {
        let assistant = assistant_with(None, None);
        let save = SaveJobPostForm {
            form: form(),
            generated_post: "текст".to_string(),
        };
        let notice = assistant.save_job_post(&save).await.unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, NOT_CONFIGURED_WARNING);
    }

    #[tokio::test]
    async fn test_save_requires_text() {
        let sheets = Arc::new(RecordingSheets::default());
        let assistant = assistant_with(None, Some(sheets.clone()));
        let save = SaveJobPostForm {
            form: form(),
            generated_post: String::new(),
        };
        assert_eq!(
            assistant.save_job_post(&save).await,
            Err(FormError::NothingToSave)
        );
        assert!(sheets.rows.lock().unwrap().is_empty());
    }

    #[test]
    fn test_status() {
        let assistant = assistant_with(Some(Arc::new(RecordingModel::default())), None);
        let status = assistant.status();
        assert!(status.inference_configured);
        assert!(!status.sheets_configured);
        assert_eq!(status.model_id, "mistralai/Mistral-7B-Instruct-v0.3");
        assert_eq!(status.spreadsheet_name, "AI_Campaign_Control");
    }
}
