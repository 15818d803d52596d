//! Acquisition Pipeline: fetch, parse and validate, else fall back.
//!
//! Discovery is advisory: `acquire` never fails. Every failure is logged and
//! degrades to the fallback catalog, so callers always get 1–40 complete records.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::jobs::fallback::fallback_jobs;
use crate::jobs::models::JobRecord;
use crate::jobs::parser::parse_postings;
use crate::jobs::source::{JobSource, SourceError};

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("job source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("no postings parsed from source payload")]
    ParseEmpty,
}

#[derive(Clone)]
pub struct AcquisitionPipeline {
    source: Arc<dyn JobSource>,
}

impl AcquisitionPipeline {
    pub fn new(source: Arc<dyn JobSource>) -> Self {
        Self { source }
    }

    /// Returns live postings when the source cooperates, the fallback catalog otherwise.
    pub async fn acquire(&self, role: &str, location: &str) -> Vec<JobRecord> {
        match self.try_acquire(role, location).await {
            Ok(jobs) => {
                info!(
                    "Acquired {} live postings for role={role:?} location={location:?}",
                    jobs.len()
                );
                jobs
            }
            Err(e) => {
                warn!("Job acquisition degraded to fallback catalog: {e}");
                fallback_jobs()
            }
        }
    }

    async fn try_acquire(
        &self,
        role: &str,
        location: &str,
    ) -> Result<Vec<JobRecord>, AcquisitionError> {
        let payload = self.source.fetch(role, location).await?;
        let jobs = parse_postings(&payload);
        if jobs.is_empty() {
            return Err(AcquisitionError::ParseEmpty);
        }
        Ok(jobs)
    }
}
