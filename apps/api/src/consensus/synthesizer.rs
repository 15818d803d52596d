//! Consensus Synthesizer: merges the four reports into one fixed-schema report.
//!
//! Flow: bundle → (all empty? extractive report) → one generation call at
//! temperature 0 → section split → meta-line filter → per-section normalization,
//! with the extractive report filling anything missing → render.
//!
//! The caller always gets a string. A failed or malformed generation becomes a
//! single-line `[Consensus Error: ...]` marker.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::consensus::extract::{
    after_percent, exactly, extractive_report, first_percent, names_week, strip_marker,
    week_entry, NO_GAP, NO_STRENGTH,
};
use crate::consensus::prompts::{CONSENSUS_PROMPT_TEMPLATE, CONSENSUS_TEMPERATURE};
use crate::consensus::schema::{
    scrub_banned, ConsensusReport, Recommendation, ReportBundle, GAP_COUNT, ROADMAP_WEEKS,
    SECTION_HEADINGS, STRENGTH_COUNT,
};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, NO_META_INSTRUCTION};
use crate::llm_client::TextGenerator;

const SECTION_COUNT: usize = SECTION_HEADINGS.len();

/// Keywords that identify each numbered section heading in generated text.
const SECTION_KEYWORDS: [&[&str]; SECTION_COUNT] = [
    &["summary"],
    &["score"],
    &["strength"],
    &["gap"],
    &["roadmap"],
    &["projection"],
    &["recommendation", "verdict"],
];

const MISSING_INPUT: &str = "(no report provided)";
const UNJUSTIFIED_SCORE: &str = "Score stated in the combined report.";
const NO_RATIONALE: &str = "No rationale was given in the combined report.";

static SECTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s#*]*([1-7])\s*[).]\s*(.*)$").expect("static regex must compile"));
static META_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:turn\s*\d|turn\s*:|critic\b|moderator\b|debate\b)|moderator\s*:|critic\s*:")
        .expect("static regex must compile")
});

type Sections = [Vec<String>; SECTION_COUNT];

#[derive(Clone)]
pub struct ConsensusSynthesizer {
    generator: Arc<dyn TextGenerator>,
}

impl ConsensusSynthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produces the consensus report, or an error marker if generation fails.
    pub async fn synthesize(&self, bundle: &ReportBundle) -> String {
        let fallback = extractive_report(bundle);

        if bundle.is_empty() {
            info!("All source reports empty; rendering placeholder consensus");
            return fallback.to_string();
        }

        let prompt = build_prompt(bundle);
        let response = match self.generator.generate(&prompt, CONSENSUS_TEMPERATURE).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Consensus generation failed: {e}");
                return error_marker(&e.to_string());
            }
        };

        if response.trim().is_empty() {
            warn!("Consensus generation returned empty text");
            return error_marker("empty response from text generator");
        }

        let Some(sections) = split_sections(&response) else {
            warn!("Consensus response had no recognizable sections");
            return error_marker("response did not follow the report format");
        };

        normalize(&sections, fallback).to_string()
    }

    /// Synthesizes independent bundles with at most `limit` generation calls in flight.
    /// Output order matches input order.
    pub async fn synthesize_batch(&self, bundles: Vec<ReportBundle>, limit: usize) -> Vec<String> {
        info!(
            "Synthesizing {} consensus reports (concurrency {})",
            bundles.len(),
            limit.max(1)
        );
        // futures own their inputs; handler futures must be Send
        stream::iter(bundles)
            .map(|bundle| {
                let this = self.clone();
                async move { this.synthesize(&bundle).await }
            })
            .buffered(limit.max(1))
            .collect()
            .await
    }
}

fn build_prompt(bundle: &ReportBundle) -> String {
    let input = |text: &str| {
        if text.trim().is_empty() {
            MISSING_INPUT.to_string()
        } else {
            text.trim().to_string()
        }
    };

    CONSENSUS_PROMPT_TEMPLATE
        .replace("{grounding}", GROUNDING_INSTRUCTION)
        .replace("{no_meta}", NO_META_INSTRUCTION)
        .replace("{ai_insights}", &input(&bundle.ai_insights))
        .replace("{future_skills}", &input(&bundle.future_skills))
        .replace("{reasoning}", &input(&bundle.reasoning))
        .replace("{career_path}", &input(&bundle.career_path))
}

fn error_marker(reason: &str) -> String {
    let reason = reason.split_whitespace().collect::<Vec<_>>().join(" ");
    scrub_banned(&format!("[Consensus Error: {reason}]"))
}

/// Lines that narrate the combination process instead of reporting on the job.
fn is_meta_line(line: &str) -> bool {
    META_LINE.is_match(&strip_marker(line))
}

/// Splits generated text into the seven sections. Headings must appear in
/// increasing order; a numbered line that does not advance the section is content.
/// Returns `None` when no heading is recognized at all.
fn split_sections(text: &str) -> Option<Sections> {
    let mut sections: Sections = Default::default();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        if let Some((index, inline)) = section_header(line, current) {
            current = Some(index);
            if let Some(inline) = inline {
                sections[index].push(inline);
            }
            continue;
        }

        let Some(index) = current else { continue };
        if line.trim().is_empty() || is_meta_line(line) {
            continue;
        }
        sections[index].push(line.trim().to_string());
    }

    current.map(|_| sections)
}

/// Recognizes a heading for a section after `current`, with any content that
/// follows a colon on the same line.
fn section_header(line: &str, current: Option<usize>) -> Option<(usize, Option<String>)> {
    let caps = SECTION_HEADER.captures(line)?;
    let index = caps[1].parse::<usize>().ok()?.checked_sub(1)?;
    if current.is_some_and(|c| index <= c) {
        return None;
    }

    let rest = &caps[2];
    let lower = rest.to_lowercase();
    if !SECTION_KEYWORDS[index].iter().any(|k| lower.contains(k)) {
        return None;
    }

    let inline = rest
        .split_once(':')
        .map(|(_, after)| after.trim().to_string())
        .filter(|s| !s.is_empty() && !is_meta_line(s));
    Some((index, inline))
}

fn content_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|l| strip_marker(l))
        .filter(|l| !l.is_empty())
        .collect()
}

/// Forces parsed sections into the fixed schema, borrowing from `fallback`
/// wherever the generated text is missing or short.
fn normalize(sections: &Sections, fallback: ConsensusReport) -> ConsensusReport {
    let summary: Vec<String> = content_lines(&sections[0]).into_iter().take(2).collect();
    let summary = if summary.is_empty() {
        fallback.summary
    } else {
        summary
    };

    let fit_text = sections[1].join("\n");
    let (fit_score, fit_justification) = match first_percent(&fit_text) {
        Some(score) => {
            let justification = sections[1]
                .iter()
                .find_map(|l| after_percent(l))
                .or_else(|| {
                    content_lines(&sections[1])
                        .into_iter()
                        .find(|l| first_percent(l).is_none())
                })
                .unwrap_or_else(|| UNJUSTIFIED_SCORE.to_string());
            (score, justification)
        }
        None => (fallback.fit_score, fallback.fit_justification),
    };

    let strengths = exactly::<STRENGTH_COUNT>(
        merge(content_lines(&sections[2]), &fallback.strengths, NO_STRENGTH),
        NO_STRENGTH,
    );
    let gaps = exactly::<GAP_COUNT>(
        merge(content_lines(&sections[3]), &fallback.gaps, NO_GAP),
        NO_GAP,
    );

    let unlabeled: Vec<String> = sections[4]
        .iter()
        .filter(|l| !names_week(l))
        .map(|l| strip_marker(l))
        .filter(|l| !l.is_empty())
        .collect();
    let roadmap: [String; ROADMAP_WEEKS] = std::array::from_fn(|i| {
        sections[4]
            .iter()
            .find_map(|l| week_entry(l, i + 1))
            .or_else(|| unlabeled.get(i).cloned())
            .unwrap_or_else(|| fallback.roadmap[i].clone())
    });

    let projection = content_lines(&sections[5])
        .into_iter()
        .next()
        .unwrap_or(fallback.projection);

    let (recommendation, rationale) =
        recommendation(&sections[6]).unwrap_or((fallback.recommendation, fallback.rationale));

    ConsensusReport {
        summary,
        fit_score,
        fit_justification,
        strengths,
        gaps,
        roadmap,
        projection,
        recommendation,
        rationale,
    }
}

/// Generated items first, then extractive items not already present. Placeholders are skipped.
fn merge(generated: Vec<String>, fallback: &[String], placeholder: &str) -> Vec<String> {
    let mut items = generated;
    for item in fallback {
        if item != placeholder && !items.iter().any(|i| i.eq_ignore_ascii_case(item)) {
            items.push(item.clone());
        }
    }
    items
}

/// The first verdict in the section with its rationale: the rest of the verdict
/// line, else the next content line.
fn recommendation(lines: &[String]) -> Option<(Recommendation, String)> {
    let (pos, verdict, rest) = lines.iter().enumerate().find_map(|(pos, line)| {
        let (verdict, range) = Recommendation::find(line)?;
        let rest = line[range.end..]
            .trim_start_matches(|c: char| c.is_whitespace() || "-–—:,.;)(".contains(c))
            .trim()
            .to_string();
        Some((pos, verdict, rest))
    })?;

    let rationale = if rest.is_empty() {
        content_lines(&lines[pos + 1..])
            .into_iter()
            .next()
            .unwrap_or_else(|| NO_RATIONALE.to_string())
    } else {
        rest
    };
    Some((verdict, rationale))
}
