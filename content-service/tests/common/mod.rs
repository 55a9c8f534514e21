//! Shared test doubles for content-service integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use content_service::models::{
    GenerationFilter, GenerationRecord, GenerationRequest, Platform, StoredGeneration,
};
use content_service::services::providers::{
    ChatCompletion, ChatMessage, ChatProvider, ProviderError, SamplingParams,
};
use content_service::services::GenerationStore;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::Mutex;

pub const TEST_MODEL: &str = "llama-3.3-70b-versatile";

pub fn healthcare_request() -> GenerationRequest {
    GenerationRequest {
        idea: "AI in healthcare".to_string(),
        target_audience: "hospital executives".to_string(),
        platform: Platform::Linkedin,
        post_category: "tech trend".to_string(),
    }
}

/// Provider that answers with a fixed text and records every prompt it sees.
///
/// Prompts containing `fail_marker` are answered with a rate-limit error.
pub struct ScriptedProvider {
    reply: String,
    fail_marker: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail_marker: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(reply: &str, marker: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail_marker: Some(marker.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(
        &self,
        _model: &str,
        messages: &[ChatMessage],
        _params: &SamplingParams,
    ) -> Result<ChatCompletion, ProviderError> {
        let prompt = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt.clone());

        if let Some(marker) = &self.fail_marker {
            if prompt.contains(marker.as_str()) {
                return Err(ProviderError::RateLimited);
            }
        }

        Ok(ChatCompletion {
            text: self.reply.clone(),
            input_tokens: None,
            output_tokens: None,
        })
    }
}

/// Store backed by a vector, assigning ObjectIds like MongoDB does.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<GenerationRecord>>,
}

impl InMemoryStore {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationStore for InMemoryStore {
    async fn insert(&self, record: &GenerationRecord) -> Result<String, AppError> {
        let id = ObjectId::new();
        let mut stored = record.clone();
        stored.id = Some(id);
        self.records.lock().unwrap().push(stored);
        Ok(id.to_hex())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<StoredGeneration>, AppError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == Some(oid))
            .cloned()
            .map(StoredGeneration::from))
    }

    async fn query(
        &self,
        filter: &GenerationFilter,
        limit: i64,
    ) -> Result<Vec<StoredGeneration>, AppError> {
        let mut records: Vec<GenerationRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.matches(&r.input_data))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit.max(0) as usize);
        Ok(records.into_iter().map(StoredGeneration::from).collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != Some(oid));
        Ok(records.len() < before)
    }
}

/// Store whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl GenerationStore for FailingStore {
    async fn insert(&self, _record: &GenerationRecord) -> Result<String, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!("connection refused")))
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<StoredGeneration>, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!("connection refused")))
    }

    async fn query(
        &self,
        _filter: &GenerationFilter,
        _limit: i64,
    ) -> Result<Vec<StoredGeneration>, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!("connection refused")))
    }

    async fn delete_by_id(&self, _id: &str) -> Result<bool, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!("connection refused")))
    }
}
