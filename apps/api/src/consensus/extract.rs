//! Extractive fallback: builds every consensus section from the input reports alone.
//!
//! Nothing here invents content: each value is a line lifted from a report, a
//! number stated in a report, or a fixed placeholder saying the material is missing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::consensus::schema::{
    ConsensusReport, Recommendation, ReportBundle, GAP_COUNT, ROADMAP_WEEKS, STRENGTH_COUNT,
};

pub const NO_SUMMARY: &str = "No source reports were provided for this job.";
pub const NO_SCORE: &str = "No fit score was stated in the source reports.";
pub const NO_STRENGTH: &str = "Not stated in the source reports.";
pub const NO_GAP: &str = "No further gap identified in the source reports.";
pub const NO_ROADMAP: &str = "No source material for this week.";
pub const NO_PROJECTION: &str = "No career projection was provided.";

static PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3})(?:\.\d+)?\s*%").expect("static regex must compile"));
static WEEK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bweek\s*([1-9])\b\s*[:\-–—)]?\s*(.*)$").expect("static regex must compile")
});
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*•+]|\d{1,2}[.)])\s+").expect("static regex must compile")
});

/// Headings under which reports list strengths and gaps.
const STRENGTH_HEADINGS: [&str; 1] = ["strength"];
const GAP_HEADINGS: [&str; 4] = ["missing", "gap", "lack", "weakness"];
const PROJECTION_HEADINGS: [&str; 4] = ["growth", "projection", "forecast", "direction"];
const VERDICT_HEADINGS: [&str; 3] = ["apply", "recommend", "verdict"];

/// A heading and the lines beneath it, up to the next heading.
#[derive(Debug, Default)]
struct Block<'a> {
    heading: String,
    lines: Vec<&'a str>,
}

/// Lines that introduce a block rather than carry content.
pub fn is_heading(line: &str) -> bool {
    let t = line.trim();
    if t.is_empty() || LIST_MARKER.is_match(t) {
        return false;
    }
    if t.starts_with('#') || (t.starts_with("**") && t.ends_with("**")) {
        return true;
    }
    if t.ends_with(':') || t.ends_with('?') {
        return t.chars().count() <= 60;
    }
    // emoji-led section titles
    t.chars()
        .next()
        .is_some_and(|c| !c.is_alphanumeric() && !c.is_ascii_punctuation())
}

/// Strips list markers and markdown emphasis, returning the bare content.
pub fn strip_marker(line: &str) -> String {
    let t = LIST_MARKER.replace(line.trim(), "");
    t.trim_matches(|c: char| c == '*' || c == '_' || c.is_whitespace())
        .to_string()
}

/// Content lines: non-blank, not headings, at least a few characters.
fn substantive(line: &str) -> Option<String> {
    if is_heading(line) {
        return None;
    }
    let content = strip_marker(line);
    (content.chars().count() >= 3).then_some(content)
}

fn blocks(text: &str) -> Vec<Block<'_>> {
    let mut out = vec![Block::default()];
    for line in text.lines() {
        if is_heading(line) {
            out.push(Block {
                heading: line.to_lowercase(),
                lines: Vec::new(),
            });
        } else if let Some(current) = out.last_mut() {
            current.lines.push(line);
        }
    }
    out
}

/// Content lines listed under headings matching any of `keywords`, across all reports.
fn items_under(bundle: &ReportBundle, keywords: &[&str]) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for (_, text) in bundle.labeled() {
        for block in blocks(text) {
            if !keywords.iter().any(|k| block.heading.contains(k)) {
                continue;
            }
            for line in block.lines.iter().filter_map(|l| substantive(l)) {
                if !items.iter().any(|i| i.eq_ignore_ascii_case(&line)) {
                    items.push(line);
                }
            }
        }
    }
    items
}

/// The first percentage stated in `text`, clamped to 0..=100.
pub fn first_percent(text: &str) -> Option<u32> {
    PERCENT
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok())
        .map(|p| p.min(100))
}

/// The first percentage stated on a content line; headings such as "(0–100%)" are skipped.
fn stated_percent(text: &str) -> Option<u32> {
    text.lines()
        .filter(|l| !is_heading(l))
        .find_map(first_percent)
}

/// A verdict written under an "apply"/"recommendation" heading, either as a
/// leading YES/NO answer or as one of the closed-set phrases. The answer word
/// takes precedence over any phrase later on the line.
fn stated_verdict(bundle: &ReportBundle) -> Option<Recommendation> {
    items_under(bundle, &VERDICT_HEADINGS)
        .iter()
        .find_map(|line| {
            let first_word = line
                .split(|c: char| !c.is_alphanumeric())
                .next()
                .unwrap_or_default()
                .to_lowercase();
            match first_word.as_str() {
                "yes" => Some(Recommendation::Apply),
                "no" => Some(Recommendation::DontApply),
                _ => Recommendation::find(line).map(|(verdict, _)| verdict),
            }
        })
}

/// Text following the first percentage on its line, stripped of separators.
pub fn after_percent(line: &str) -> Option<String> {
    let m = PERCENT.find(line)?;
    let rest = line[m.end()..]
        .trim_start_matches(|c: char| c.is_whitespace() || "-–—:,.;)".contains(c))
        .trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Roadmap content for `week` (1-based) if a line names it.
pub fn week_entry(line: &str, week: usize) -> Option<String> {
    let caps = WEEK.captures(line)?;
    if caps[1].parse::<usize>().ok()? != week {
        return None;
    }
    let content = strip_marker(&caps[2]);
    (!content.is_empty()).then_some(content)
}

/// Whether the line labels itself with a week number.
pub fn names_week(line: &str) -> bool {
    WEEK.is_match(line)
}

/// Pads or truncates `items` to exactly `N`, filling with `placeholder`.
pub fn exactly<const N: usize>(
    items: impl IntoIterator<Item = String>,
    placeholder: &str,
) -> [String; N] {
    let mut iter = items.into_iter();
    std::array::from_fn(|_| iter.next().unwrap_or_else(|| placeholder.to_string()))
}

/// Builds a complete report from the bundle without any text generation.
pub fn extractive_report(bundle: &ReportBundle) -> ConsensusReport {
    let reports = bundle.labeled();

    let summary = reports
        .iter()
        .find_map(|(_, text)| text.lines().find_map(substantive))
        .unwrap_or_else(|| NO_SUMMARY.to_string());

    let stated: Vec<u32> = reports
        .iter()
        .filter_map(|(_, text)| stated_percent(text))
        .collect();
    let (fit_score, fit_justification) = if stated.is_empty() {
        (0, NO_SCORE.to_string())
    } else {
        let mean = stated.iter().sum::<u32>() as f64 / stated.len() as f64;
        let listed: Vec<String> = stated.iter().map(|p| format!("{p}%")).collect();
        (
            mean.round() as u32,
            format!("Mean of the scores stated in the source reports ({}).", listed.join(", ")),
        )
    };

    let strengths = items_under(bundle, &STRENGTH_HEADINGS);
    let gaps = items_under(bundle, &GAP_HEADINGS);

    let roadmap: [String; ROADMAP_WEEKS] = std::array::from_fn(|i| {
        let week = i + 1;
        reports
            .iter()
            .flat_map(|(_, text)| text.lines())
            .find_map(|line| week_entry(line, week))
            .or_else(|| gaps.get(i).map(|g| format!("Work on: {g}")))
            .unwrap_or_else(|| NO_ROADMAP.to_string())
    });

    let projection = items_under(bundle, &PROJECTION_HEADINGS)
        .into_iter()
        .next()
        .or_else(|| bundle.career_path.lines().find_map(substantive))
        .or_else(|| bundle.future_skills.lines().find_map(substantive))
        .unwrap_or_else(|| NO_PROJECTION.to_string());

    let (recommendation, rationale) = match (stated_verdict(bundle), stated.is_empty()) {
        (Some(verdict), _) => (verdict, "Verdict stated in the source reports.".to_string()),
        (None, false) => (
            Recommendation::from_score(fit_score),
            format!("Derived from the {fit_score}% fit score stated in the source reports."),
        ),
        (None, true) => (
            Recommendation::ApplyAfterUpskill,
            "The source reports give no verdict or score; review the gaps before applying."
                .to_string(),
        ),
    };

    ConsensusReport {
        summary: vec![summary],
        fit_score,
        fit_justification,
        strengths: exactly::<STRENGTH_COUNT>(strengths, NO_STRENGTH),
        gaps: exactly::<GAP_COUNT>(gaps, NO_GAP),
        roadmap,
        projection,
        recommendation,
        rationale,
    }
}
