// Consensus synthesis: four independently generated reports → one fixed 7-section report.
// The only text-generation call goes through the injected TextGenerator.

pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod schema;
pub mod synthesizer;
