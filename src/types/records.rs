//! Rows appended to the campaign spreadsheet

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::iso_timestamp;

/// One row of the JobPosts worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPostRecord {
    pub timestamp: DateTime<Utc>,
    pub job_title: String,
    pub city: String,
    pub platform: String,
    pub variant_label: String,
    pub target_audience: String,
    pub application_link: String,
    pub generated_post: String,
}

/// One row of the ResearchInsights worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRecord {
    pub timestamp: DateTime<Utc>,
    pub question_type: String,
    pub input_text: String,
    pub insights: String,
}

impl JobPostRecord {
    /// Cell values in worksheet column order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            iso_timestamp(self.timestamp),
            self.job_title.clone(),
            self.city.clone(),
            self.platform.clone(),
            self.variant_label.clone(),
            self.target_audience.clone(),
            self.application_link.clone(),
            self.generated_post.clone(),
        ]
    }
}

impl ResearchRecord {
    /// Cell values in worksheet column order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            iso_timestamp(self.timestamp),
            self.question_type.clone(),
            self.input_text.clone(),
            self.insights.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_job_post_column_order() {
        let record = JobPostRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 5, 1, 8, 30, 0).unwrap(),
            job_title: "Установщик кухонь".to_string(),
            city: "Гамбург".to_string(),
            platform: "Telegram".to_string(),
            variant_label: "B".to_string(),
            target_audience: "Иммигранты".to_string(),
            application_link: "https://forms.example/apply".to_string(),
            generated_post: "👤 Должность".to_string(),
        };

        assert_eq!(
            record.to_row(),
            vec![
                "2025-05-01T08:30:00.000000",
                "Установщик кухонь",
                "Гамбург",
                "Telegram",
                "B",
                "Иммигранты",
                "https://forms.example/apply",
                "👤 Должность",
            ]
        );
    }

    #[test]
    fn test_research_column_order() {
        let record = ResearchRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 5, 1, 8, 30, 0).unwrap(),
            question_type: "Сравнение регионов / платформ".to_string(),
            input_text: "Киль vs Берлин".to_string(),
            insights: "1) ...".to_string(),
        };

        assert_eq!(
            record.to_row(),
            vec![
                "2025-05-01T08:30:00.000000",
                "Сравнение регионов / платформ",
                "Киль vs Берлин",
                "1) ...",
            ]
        );
    }
}
