// Prompt for the consensus combination call.
// The response is normalized afterwards, so the format block only has to be
// close enough for the section headings to be recognized.

/// Requested determinism level for consensus generation.
pub const CONSENSUS_TEMPERATURE: f32 = 0.0;

pub const CONSENSUS_PROMPT_TEMPLATE: &str = r#"You combine four analysis reports about one job and one candidate into a single final report.

{grounding}
{no_meta}
Keep the output concise and human-readable. Produce the same report for the same inputs.

OUTPUT FORMAT (exactly, plain text, no markdown headings):
1) Executive Summary
<1-2 lines>
2) Unified Fit Score: <number>% - <one short justification line>
3) Combined Key Strengths
- <bullet 1>
- <bullet 2>
- <bullet 3>
4) Top 5 Gaps (ranked)
1. <gap>
2. <gap>
3. <gap>
4. <gap>
5. <gap>
5) Priority Roadmap
- Week 1: <action>
- Week 2: <action>
- Week 3: <action>
- Week 4: <action>
6) Projection
<1 line>
7) Final Recommendation: <Apply | Apply After Upskill | Don't Apply> - <1-line rationale>

Now combine these inputs:

--- AI_INSIGHTS ---
{ai_insights}

--- FUTURE_SKILLS ---
{future_skills}

--- REASONING ---
{reasoning}

--- CAREER_PATH ---
{career_path}

Produce ONLY the final report following the exact format above."#;
