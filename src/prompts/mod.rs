// src/prompts/mod.rs
//! Fixed prompt templates for the job-post, summary and research actions

pub mod template;

pub use template::TemplateProcessor;

use std::collections::HashMap;

use crate::core::inference_client::ChatRequest;
use crate::types::forms::{JobPostForm, ResearchKind};
use crate::utils::is_blank;

const JOB_POST_SYSTEM: &str = include_str!("job_post_system.txt");
const JOB_POST_USER: &str = include_str!("job_post_user.txt");
const CTA_WITH_LINK: &str = include_str!("cta_link.txt");
const CTA_DEFAULT: &str = include_str!("cta_default.txt");
const SUMMARY_SYSTEM: &str = include_str!("summary_system.txt");
const SUMMARY_USER: &str = include_str!("summary_user.txt");
const RESEARCH_METRICS_SYSTEM: &str = include_str!("research_metrics_system.txt");
const RESEARCH_REGIONS_SYSTEM: &str = include_str!("research_regions_system.txt");
const RESEARCH_STRATEGY_SYSTEM: &str = include_str!("research_strategy_system.txt");
const RESEARCH_USER: &str = include_str!("research_user.txt");

pub const JOB_POST_MAX_TOKENS: u32 = 350;
pub const SUMMARY_MAX_TOKENS: u32 = 250;
pub const RESEARCH_MAX_TOKENS: u32 = 500;

/// Call-to-action block closing the job post
fn call_to_action(application_link: &str) -> String {
    if is_blank(application_link) {
        CTA_DEFAULT.to_string()
    } else {
        let vars = HashMap::from([("application_link", application_link)]);
        TemplateProcessor::process_variables(CTA_WITH_LINK, &vars)
    }
}

/// Russian job advertisement in the Telegram/WhatsApp emoji-block style
pub fn job_post(form: &JobPostForm) -> ChatRequest {
    let cta = call_to_action(&form.application_link);
    let vars = HashMap::from([
        ("job_title", form.job_title.as_str()),
        ("city", form.city.as_str()),
        ("target_audience", form.target_audience.as_str()),
        ("variant_label", form.variant_label.as_str()),
        ("platform", form.platform.as_str()),
        ("tone", form.tone.as_str()),
        ("raw_description", form.raw_description.as_str()),
        ("cta", cta.as_str()),
    ]);

    ChatRequest::new(
        JOB_POST_SYSTEM.trim_end(),
        TemplateProcessor::process_variables(JOB_POST_USER, &vars),
        JOB_POST_MAX_TOKENS,
    )
}

/// Short bullet summary for employers and project managers
pub fn employer_summary(form: &JobPostForm) -> ChatRequest {
    let vars = HashMap::from([
        ("job_title", form.job_title.as_str()),
        ("city", form.city.as_str()),
        ("raw_description", form.raw_description.as_str()),
    ]);

    ChatRequest::new(
        SUMMARY_SYSTEM.trim_end(),
        TemplateProcessor::process_variables(SUMMARY_USER, &vars),
        SUMMARY_MAX_TOKENS,
    )
}

fn research_system(kind: ResearchKind) -> &'static str {
    match kind {
        ResearchKind::MetricsInterpretation => RESEARCH_METRICS_SYSTEM,
        ResearchKind::RegionPlatformComparison => RESEARCH_REGIONS_SYSTEM,
        ResearchKind::StrategyQuestion => RESEARCH_STRATEGY_SYSTEM,
    }
}

pub fn research(kind: ResearchKind, input: &str) -> ChatRequest {
    let vars = HashMap::from([("research_input", input)]);

    ChatRequest::new(
        research_system(kind).trim_end(),
        TemplateProcessor::process_variables(RESEARCH_USER, &vars),
        RESEARCH_MAX_TOKENS,
    )
}
