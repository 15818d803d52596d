//! Consensus data models: the four-report input bundle and the fixed 7-section output.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Headings of the consensus report, in output order.
pub const SECTION_HEADINGS: [&str; 7] = [
    "1) Executive Summary",
    "2) Unified Fit Score",
    "3) Combined Key Strengths",
    "4) Top 5 Gaps (ranked)",
    "5) Priority Roadmap",
    "6) Projection",
    "7) Final Recommendation",
];

pub const STRENGTH_COUNT: usize = 3;
pub const GAP_COUNT: usize = 5;
pub const ROADMAP_WEEKS: usize = 4;

/// Words that mark internal process commentary. They never appear verbatim in a report.
pub const BANNED_LABELS: [&str; 3] = ["Turn", "Critic", "Moderator"];

/// The four independently produced reports about one job/user pairing.
/// Missing fields mean "no input for this aspect".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBundle {
    #[serde(default)]
    pub ai_insights: String,
    #[serde(default)]
    pub future_skills: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub career_path: String,
}

impl ReportBundle {
    /// Reports in a fixed order, labeled for prompts and extraction.
    pub fn labeled(&self) -> [(&'static str, &str); 4] {
        [
            ("AI_INSIGHTS", self.ai_insights.as_str()),
            ("FUTURE_SKILLS", self.future_skills.as_str()),
            ("REASONING", self.reasoning.as_str()),
            ("CAREER_PATH", self.career_path.as_str()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.labeled().iter().all(|(_, text)| text.trim().is_empty())
    }
}

/// Closed set of final verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Apply,
    ApplyAfterUpskill,
    DontApply,
}

static VERDICT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(apply\s+after\s+upskill(?:ing)?|(?:don[’']?t|do\s+not|not|never|can[’']?t|cannot)\s+apply|apply)\b",
    )
    .expect("static regex must compile")
});

impl Recommendation {
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::Apply => "Apply",
            Recommendation::ApplyAfterUpskill => "Apply After Upskill",
            Recommendation::DontApply => "Don't Apply",
        }
    }

    /// Verdict implied by a fit score: ≥70 apply, ≥40 upskill first, otherwise don't.
    pub fn from_score(score: u32) -> Self {
        match score {
            70.. => Recommendation::Apply,
            40..=69 => Recommendation::ApplyAfterUpskill,
            _ => Recommendation::DontApply,
        }
    }

    /// Finds the first verdict phrase in `text`, returning it and the byte range it spans.
    pub fn find(text: &str) -> Option<(Self, std::ops::Range<usize>)> {
        let m = VERDICT.find(text)?;
        let phrase = m.as_str().to_lowercase();
        // any phrase longer than the bare verb carries a negation
        let verdict = if phrase.contains("upskill") {
            Recommendation::ApplyAfterUpskill
        } else if phrase == "apply" {
            Recommendation::Apply
        } else {
            Recommendation::DontApply
        };
        Some((verdict, m.range()))
    }
}

/// The structurally fixed consensus. Every field is a single line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusReport {
    /// One or two lines.
    pub summary: Vec<String>,
    pub fit_score: u32,
    pub fit_justification: String,
    pub strengths: [String; STRENGTH_COUNT],
    pub gaps: [String; GAP_COUNT],
    pub roadmap: [String; ROADMAP_WEEKS],
    pub projection: String,
    pub recommendation: Recommendation,
    pub rationale: String,
}

impl fmt::Display for ConsensusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [summary, fit, strengths, gaps, roadmap, projection, verdict] = SECTION_HEADINGS;

        writeln!(f, "{summary}")?;
        for line in self.summary.iter().take(2) {
            writeln!(f, "{}", clean(line))?;
        }

        writeln!(f, "{fit}: {}%", self.fit_score.min(100))?;
        writeln!(f, "{}", clean(&self.fit_justification))?;

        writeln!(f, "{strengths}")?;
        for item in &self.strengths {
            writeln!(f, "- {}", clean(item))?;
        }

        writeln!(f, "{gaps}")?;
        for (rank, item) in self.gaps.iter().enumerate() {
            writeln!(f, "{}. {}", rank + 1, clean(item))?;
        }

        writeln!(f, "{roadmap}")?;
        for (week, item) in self.roadmap.iter().enumerate() {
            writeln!(f, "- Week {}: {}", week + 1, clean(item))?;
        }

        writeln!(f, "{projection}")?;
        writeln!(f, "{}", clean(&self.projection))?;

        writeln!(f, "{verdict}: {}", self.recommendation.label())?;
        write!(f, "{}", clean(&self.rationale))
    }
}

/// Collapses a value onto one line and defuses banned labels.
fn clean(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    scrub_banned(&single_line)
}

/// Lower-cases the first letter of every banned label occurrence, so
/// "Critical" becomes "critical" and no label survives verbatim.
pub fn scrub_banned(text: &str) -> String {
    BANNED_LABELS.iter().fold(text.to_string(), |acc, label| {
        let mut lowered = label.to_string();
        lowered[..1].make_ascii_lowercase();
        acc.replace(label, &lowered)
    })
}
