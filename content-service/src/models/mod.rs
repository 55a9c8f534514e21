//! Domain models for the content service.

pub mod content;
pub mod record;

pub use content::{
    ContentSize, ContentVariant, GenerationRequest, GenerationResult, Platform, PlatformContent,
    ERROR_PREFIX,
};
pub use record::{
    GenerationFilter, GenerationRecord, StoredGeneration, DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT,
};
