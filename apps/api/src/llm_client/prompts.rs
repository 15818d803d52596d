// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction forbidding facts that are not present in the supplied material.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Use the supplied texts as your only source material. \
    Do NOT invent facts, numbers, employers or skills that the inputs do not support. \
    If the inputs do not support a claim, omit it.";

/// Instruction forbidding process narration in the output.
pub const NO_META_INSTRUCTION: &str = "\
    Do NOT print any internal debate, turns, or chain-of-thought. \
    Do NOT label lines with internal roles. \
    Output only the final answer.";
