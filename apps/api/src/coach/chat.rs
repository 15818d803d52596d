//! Job coach prompt assembly and reply generation.

use tracing::info;

use crate::coach::prompts::{COACH_PROMPT_TEMPLATE, COACH_TEMPERATURE, SKILLS_WITHHELD};
use crate::errors::AppError;
use crate::jobs::models::JobRecord;
use crate::llm_client::prompts::GROUNDING_INSTRUCTION;
use crate::llm_client::TextGenerator;

/// Messages answered without the user's skill context.
const GREETINGS: [&str; 8] = [
    "hi",
    "hello",
    "hey",
    "hii",
    "heyy",
    "yo",
    "good morning",
    "good evening",
];

/// At most this many job titles are listed in the prompt.
const MAX_PROMPT_JOBS: usize = 10;

pub fn is_greeting(message: &str) -> bool {
    let normalized = message.trim().to_lowercase();
    GREETINGS.contains(&normalized.as_str())
}

pub fn build_coach_prompt(message: &str, skills: &str, jobs: &[JobRecord]) -> String {
    let skill_context = if is_greeting(message) || skills.trim().is_empty() {
        SKILLS_WITHHELD.to_string()
    } else {
        skills.trim().to_string()
    };

    let job_context = if jobs.is_empty() {
        "None".to_string()
    } else {
        jobs.iter()
            .take(MAX_PROMPT_JOBS)
            .map(|j| format!("- {} at {}", j.title, j.company))
            .collect::<Vec<_>>()
            .join("\n")
    };

    COACH_PROMPT_TEMPLATE
        .replace("{grounding}", GROUNDING_INSTRUCTION)
        .replace("{skills}", &skill_context)
        .replace("{jobs}", &job_context)
        .replace("{message}", message.trim())
}

/// Generates one coaching reply. Unlike consensus, a failure here is an error response.
pub async fn coach_reply(
    generator: &dyn TextGenerator,
    message: &str,
    skills: &str,
    jobs: &[JobRecord],
) -> Result<String, AppError> {
    if message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    info!("Generating coach reply (greeting={})", is_greeting(message));
    let prompt = build_coach_prompt(message, skills, jobs);
    generator
        .generate(&prompt, COACH_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(format!("Coach reply failed: {e}")))
}
