//! HTTP implementation of the knowledge service client.

use super::KnowledgeService;
use crate::types::{SpecializationRecommendation, Symptom};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tracing::debug;

/// Thin client for the knowledge HTTP API.
///
/// Builds requests, checks status, and decodes the response shape; no
/// retries or timeouts beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpKnowledgeService {
    base_url: String,
    token: Option<String>,
    language: String,
    http: reqwest::Client,
}

impl HttpKnowledgeService {
    /// Create a new client for the given endpoint.
    pub fn new(base_url: &str, token: Option<&str>, language: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
            language: language.to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn base_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("language", self.language.clone()),
            ("format", "json".to_string()),
        ];
        if let Some(token) = &self.token {
            query.push(("token", token.clone()));
        }
        query
    }
}

#[async_trait]
impl KnowledgeService for HttpKnowledgeService {
    async fn list_symptoms(&self) -> Result<Vec<Symptom>> {
        let resp = self
            .http
            .get(self.endpoint("symptoms"))
            .query(&self.base_query())
            .send()
            .await
            .context("Symptom listing request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Symptom listing failed ({}): {}", status, body);
        }

        resp.json()
            .await
            .context("Failed to parse symptom listing")
    }

    async fn recommend_specializations(
        &self,
        symptom_ids: &[i64],
        age: u32,
        gender: &str,
    ) -> Result<Vec<SpecializationRecommendation>> {
        // The upstream API keys on year of birth rather than age.
        let year_of_birth = Utc::now().year() - age as i32;
        let symptoms =
            serde_json::to_string(symptom_ids).context("Failed to encode symptom ids")?;

        debug!(
            "Specialization lookup: symptoms={}, gender={}, year_of_birth={}",
            symptoms, gender, year_of_birth
        );

        let mut query = self.base_query();
        query.push(("symptoms", symptoms));
        query.push(("gender", gender.to_string()));
        query.push(("year_of_birth", year_of_birth.to_string()));

        let resp = self
            .http
            .get(self.endpoint("diagnosis/specialisations"))
            .query(&query)
            .send()
            .await
            .context("Specialization request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Specialization lookup failed ({}): {}", status, body);
        }

        resp.json()
            .await
            .context("Failed to parse specialization response")
    }
}
