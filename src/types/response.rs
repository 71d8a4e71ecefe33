use serde::{Deserialize, Serialize};

/// Severity of a message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A user-visible outcome of a save action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Generated,
    NotConfigured,
    Failed,
}

/// Text returned by a generation action. Failures still carry the text to
/// display in place of the model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub status: GenerationStatus,
    pub text: String,
}

impl Generation {
    pub fn is_generated(&self) -> bool {
        self.status == GenerationStatus::Generated
    }

    pub fn level(&self) -> NoticeLevel {
        match self.status {
            GenerationStatus::Generated => NoticeLevel::Success,
            GenerationStatus::NotConfigured | GenerationStatus::Failed => NoticeLevel::Warning,
        }
    }
}

/// Integration status shown in the sidebar and by the `status` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub model_id: String,
    pub inference_configured: bool,
    pub sheets_configured: bool,
    pub spreadsheet_name: String,
    pub service_account: Option<String>,
}
