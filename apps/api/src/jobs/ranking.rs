//! Relevance Scoring: pluggable, trait-based scorer that ranks jobs against a skill list.
//!
//! Default: `KeywordRelevanceScorer` (pure, deterministic, no network access).
//!
//! `AppState` holds an `Arc<dyn RelevanceScorer>`, swapped at startup.

use crate::jobs::models::{JobRecord, ScoredJob};

/// Points per user skill found in a job's title, company or location.
pub const SKILL_MATCH_POINTS: u32 = 20;
pub const MAX_SCORE: u32 = 100;

/// Bonus keywords applied to every job regardless of the user's skills.
/// Overlap with a user skill counts twice; rankings depend on that.
pub const KEYWORD_BONUSES: [(&str, u32); 9] = [
    ("python", 15),
    ("sql", 15),
    ("machine learning", 20),
    ("ml", 10),
    ("data", 10),
    ("analyst", 20),
    ("engineer", 10),
    ("mongo", 10),
    ("power bi", 10),
];

/// The relevance scorer trait. Implement this to swap ranking backends without
/// touching handlers.
pub trait RelevanceScorer: Send + Sync {
    fn rank(&self, jobs: &[JobRecord], skills: &str) -> Vec<ScoredJob>;
}

/// Substring/keyword scorer.
///
/// Algorithm:
/// 1. skills → lower-cased, trimmed, non-empty comma-separated tokens
/// 2. haystack = lower-cased "title company location"
/// 3. score = 20 per token contained in the haystack + every bonus keyword contained in it
/// 4. clamp to 0..=100, then stable sort by score descending
pub struct KeywordRelevanceScorer;

impl RelevanceScorer for KeywordRelevanceScorer {
    fn rank(&self, jobs: &[JobRecord], skills: &str) -> Vec<ScoredJob> {
        rank_jobs(jobs, skills)
    }
}

pub fn rank_jobs(jobs: &[JobRecord], skills: &str) -> Vec<ScoredJob> {
    let tokens = skill_tokens(skills);

    let mut ranked: Vec<ScoredJob> = jobs
        .iter()
        .map(|job| ScoredJob {
            title: job.title.clone(),
            company: job.company.clone(),
            score: score_job(job, &tokens),
        })
        .collect();

    // sort_by is stable: equal scores keep input order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

fn skill_tokens(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn score_job(job: &JobRecord, tokens: &[String]) -> u32 {
    let haystack = format!("{} {} {}", job.title, job.company, job.location).to_lowercase();

    let skill_points: u32 = tokens
        .iter()
        .filter(|t| haystack.contains(t.as_str()))
        .map(|_| SKILL_MATCH_POINTS)
        .sum();

    let bonus_points: u32 = KEYWORD_BONUSES
        .iter()
        .filter(|(keyword, _)| haystack.contains(keyword))
        .map(|(_, points)| points)
        .sum();

    (skill_points + bonus_points).min(MAX_SCORE)
}
