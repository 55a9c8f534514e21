//! Database operations for content-service.
//!
//! Stores generation records in a single MongoDB collection.

use crate::models::{GenerationFilter, GenerationRecord, StoredGeneration};
use crate::services::metrics;
use crate::services::store::GenerationStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;
use std::time::Instant;

pub const GENERATIONS_COLLECTION: &str = "generated_content";

#[derive(Clone)]
pub struct ContentDb {
    client: MongoClient,
    db: Database,
}

fn db_error(operation: &str, e: impl std::fmt::Display) -> AppError {
    tracing::error!(operation = %operation, error = %e, "Database operation failed");
    metrics::record_db_error(operation);
    AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
}

impl ContentDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for content-service");

        // Newest-first listing
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_idx".to_string())
                    .build(),
            )
            .build();

        self.generations()
            .create_index(created_at_index, None)
            .await
            .map_err(|e| db_error("create_index", e))?;

        // Per-platform queries
        let platform_index = IndexModel::builder()
            .keys(doc! { "input_data.platform": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("platform_created_at_idx".to_string())
                    .build(),
            )
            .build();

        self.generations()
            .create_index(platform_index, None)
            .await
            .map_err(|e| db_error("create_index", e))?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    pub fn generations(&self) -> Collection<GenerationRecord> {
        self.db.collection(GENERATIONS_COLLECTION)
    }
}

#[async_trait]
impl GenerationStore for ContentDb {
    async fn insert(&self, record: &GenerationRecord) -> Result<String, AppError> {
        let started = Instant::now();

        let result = self
            .generations()
            .insert_one(record, None)
            .await
            .map_err(|e| db_error("insert", e))?;

        metrics::record_db_operation("insert", started.elapsed());

        let id = result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| db_error("insert", "inserted id is not an ObjectId"))?;

        tracing::debug!(document_id = %id, "Stored generation record");
        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<StoredGeneration>, AppError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            tracing::debug!(document_id = %id, "Ignoring malformed document id");
            return Ok(None);
        };

        let started = Instant::now();

        let record = self
            .generations()
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| db_error("get_by_id", e))?;

        metrics::record_db_operation("get_by_id", started.elapsed());

        Ok(record.map(StoredGeneration::from))
    }

    async fn query(
        &self,
        filter: &GenerationFilter,
        limit: i64,
    ) -> Result<Vec<StoredGeneration>, AppError> {
        let started = Instant::now();

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 }) // Newest first
            .limit(limit)
            .build();

        let cursor = self
            .generations()
            .find(filter.to_document(), find_options)
            .await
            .map_err(|e| db_error("query", e))?;

        let records: Vec<GenerationRecord> = cursor
            .try_collect()
            .await
            .map_err(|e| db_error("query", e))?;

        metrics::record_db_operation("query", started.elapsed());

        Ok(records.into_iter().map(StoredGeneration::from).collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let started = Instant::now();

        let result = self
            .generations()
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| db_error("delete_by_id", e))?;

        metrics::record_db_operation("delete_by_id", started.elapsed());

        Ok(result.deleted_count > 0)
    }
}
