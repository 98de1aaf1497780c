//! Knowledge service — symptom catalog and specialization recommendations.
//!
//! The service is an external black box with two operations. The trait is
//! the seam the dispatcher calls through, and the seam tests use to
//! substitute a scripted service.

pub mod http;

pub use http::HttpKnowledgeService;

use crate::types::{SpecializationRecommendation, Symptom};
use anyhow::Result;
use async_trait::async_trait;

/// External medical knowledge source.
#[async_trait]
pub trait KnowledgeService: Send + Sync {
    /// Full symptom catalog.
    async fn list_symptoms(&self) -> Result<Vec<Symptom>>;

    /// Ranked specializations for the given symptoms and demographics.
    /// `gender` is expected to already be normalized to lower case.
    async fn recommend_specializations(
        &self,
        symptom_ids: &[i64],
        age: u32,
        gender: &str,
    ) -> Result<Vec<SpecializationRecommendation>>;
}
