// Job discovery and ranking.
// Acquisition: source fetch → parse → fallback. Ranking: keyword relevance scoring.

pub mod fallback;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod ranking;
pub mod source;
