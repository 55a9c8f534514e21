//! Persisted generation records.

use super::{GenerationRequest, PlatformContent};
use chrono::{DateTime, Utc};
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default page size for record queries.
pub const DEFAULT_QUERY_LIMIT: i64 = 10;

/// Upper bound on a single record query.
pub const MAX_QUERY_LIMIT: i64 = 100;

/// A stored generation, as laid out in MongoDB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub input_data: GenerationRequest,

    /// Keyed by platform name.
    pub generated_content: BTreeMap<String, PlatformContent>,

    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,

    pub model_used: String,
}

impl GenerationRecord {
    pub fn new(
        input_data: GenerationRequest,
        generated_content: BTreeMap<String, PlatformContent>,
        model_used: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            input_data,
            generated_content,
            created_at: Utc::now(),
            model_used: model_used.into(),
        }
    }
}

/// A record handed back to callers, with its id as plain hex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredGeneration {
    pub id: String,
    pub input_data: GenerationRequest,
    pub generated_content: BTreeMap<String, PlatformContent>,
    pub created_at: DateTime<Utc>,
    pub model_used: String,
}

impl From<GenerationRecord> for StoredGeneration {
    fn from(record: GenerationRecord) -> Self {
        Self {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            input_data: record.input_data,
            generated_content: record.generated_content,
            created_at: record.created_at,
            model_used: record.model_used,
        }
    }
}

/// Exact-match filter over a record's input fields. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerationFilter {
    pub platform: Option<String>,
    pub post_category: Option<String>,
    pub target_audience: Option<String>,
}

impl GenerationFilter {
    pub fn is_empty(&self) -> bool {
        self.platform.is_none() && self.post_category.is_none() && self.target_audience.is_none()
    }

    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};

        if let Some(platform) = &self.platform {
            filter.insert("input_data.platform", platform.as_str());
        }
        if let Some(category) = &self.post_category {
            filter.insert("input_data.post_category", category.as_str());
        }
        if let Some(audience) = &self.target_audience {
            filter.insert("input_data.target_audience", audience.as_str());
        }

        filter
    }

    /// In-process equivalent of [`Self::to_document`].
    pub fn matches(&self, request: &GenerationRequest) -> bool {
        self.platform
            .as_deref()
            .map_or(true, |p| request.platform.as_str() == p)
            && self
                .post_category
                .as_deref()
                .map_or(true, |c| request.post_category == c)
            && self
                .target_audience
                .as_deref()
                .map_or(true, |a| request.target_audience == a)
    }
}
