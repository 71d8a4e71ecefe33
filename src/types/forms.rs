//! Form fields and fixed choice lists of the two tabs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const PLATFORMS: &[&str] = &["Facebook", "Instagram", "Telegram", "WhatsApp", "Generic"];

pub const TONES: &[&str] = &[
    "Простой и понятный",
    "Дружелюбный",
    "Профессиональный",
    "Срочно, но без паники",
];

pub const VARIANTS: &[&str] = &["A", "B", "C"];

fn default_platform() -> String {
    PLATFORMS[0].to_string()
}

fn default_tone() -> String {
    TONES[0].to_string()
}

fn default_variant() -> String {
    VARIANTS[0].to_string()
}

/// Accept only a value from a fixed choice list
fn listed_choice<'de, D>(
    deserializer: D,
    field: &str,
    allowed: &[&str],
) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    let wanted = value.trim();
    allowed
        .iter()
        .find(|choice| **choice == wanted)
        .map(|choice| choice.to_string())
        .ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown {} '{}', expected one of: {}",
                field,
                value,
                allowed.join(", ")
            ))
        })
}

fn platform_choice<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    listed_choice(deserializer, "platform", PLATFORMS)
}

fn tone_choice<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    listed_choice(deserializer, "tone", TONES)
}

fn variant_choice<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    listed_choice(deserializer, "variant_label", VARIANTS)
}

/// Fields of the job posts tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPostForm {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub city: String,
    #[serde(default = "default_platform", deserialize_with = "platform_choice")]
    pub platform: String,
    #[serde(default = "default_tone", deserialize_with = "tone_choice")]
    pub tone: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default = "default_variant", deserialize_with = "variant_choice")]
    pub variant_label: String,
    #[serde(default)]
    pub application_link: String,
    #[serde(default)]
    pub raw_description: String,
}

impl Default for JobPostForm {
    fn default() -> Self {
        Self {
            job_title: String::new(),
            city: String::new(),
            platform: default_platform(),
            tone: default_tone(),
            target_audience: String::new(),
            variant_label: default_variant(),
            application_link: String::new(),
            raw_description: String::new(),
        }
    }
}

/// Job post fields plus the text to store
#[derive(Debug, Clone, Deserialize)]
pub struct SaveJobPostForm {
    #[serde(flatten)]
    pub form: JobPostForm,
    #[serde(default)]
    pub generated_post: String,
}

/// Kind of analytics question; each selects its own analyst persona
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResearchKind {
    #[default]
    MetricsInterpretation,
    RegionPlatformComparison,
    StrategyQuestion,
}

impl ResearchKind {
    pub const ALL: [ResearchKind; 3] = [
        ResearchKind::MetricsInterpretation,
        ResearchKind::RegionPlatformComparison,
        ResearchKind::StrategyQuestion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResearchKind::MetricsInterpretation => "Интерпретация метрик / таблиц",
            ResearchKind::RegionPlatformComparison => "Сравнение регионов / платформ",
            ResearchKind::StrategyQuestion => "Общий вопрос по стратегии / трафику",
        }
    }
}

impl fmt::Display for ResearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResearchKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == wanted)
            .ok_or_else(|| anyhow::anyhow!("Unknown research question type: {}", s))
    }
}

impl Serialize for ResearchKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ResearchKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Fields of the research tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchForm {
    #[serde(default)]
    pub research_type: ResearchKind,
    #[serde(default)]
    pub research_input: String,
}

/// Research fields plus the insights to store
#[derive(Debug, Clone, Deserialize)]
pub struct SaveResearchForm {
    #[serde(flatten)]
    pub form: ResearchForm,
    #[serde(default)]
    pub insights: String,
}

/// Choice lists with their defaults, for rendering the form
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub platforms: Vec<&'static str>,
    pub tones: Vec<&'static str>,
    pub variants: Vec<&'static str>,
    pub research_types: Vec<&'static str>,
}

impl FormOptions {
    pub fn current() -> Self {
        Self {
            platforms: PLATFORMS.to_vec(),
            tones: TONES.to_vec(),
            variants: VARIANTS.to_vec(),
            research_types: ResearchKind::ALL.iter().map(|k| k.label()).collect(),
        }
    }
}
