use std::sync::Arc;

use crate::config::Config;
use crate::consensus::synthesizer::ConsensusSynthesizer;
use crate::jobs::pipeline::AcquisitionPipeline;
use crate::jobs::ranking::RelevanceScorer;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every client is constructed once in `main`; nothing here is mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Text generation backend. Default: `LlmClient` (Groq).
    pub llm: Arc<dyn TextGenerator>,
    pub pipeline: AcquisitionPipeline,
    /// Pluggable relevance scorer. Default: KeywordRelevanceScorer.
    pub scorer: Arc<dyn RelevanceScorer>,
    pub synthesizer: ConsensusSynthesizer,
}
