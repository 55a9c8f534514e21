//! Post generation: three size variants per request, optionally persisted.

use crate::models::{
    ContentSize, ContentVariant, GenerationRecord, GenerationRequest, GenerationResult,
    PlatformContent,
};
use crate::services::metrics;
use crate::services::prompt::build_prompt;
use crate::services::providers::{ChatMessage, ChatProvider, SamplingParams};
use crate::services::store::GenerationStore;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

pub struct ContentGenerator {
    provider: Arc<dyn ChatProvider>,
    store: Option<Arc<dyn GenerationStore>>,
    model: String,
}

impl ContentGenerator {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        store: Option<Arc<dyn GenerationStore>>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            store,
            model: model.into(),
        }
    }

    pub fn store(&self) -> Option<&Arc<dyn GenerationStore>> {
        self.store.as_ref()
    }

    /// Run one completion. Provider failures come back as [`ContentVariant::Failed`].
    pub async fn complete(&self, prompt: &str, params: SamplingParams) -> ContentVariant {
        let messages = [ChatMessage::user(prompt)];
        let started = Instant::now();

        let result = self
            .provider
            .complete(&self.model, &messages, &params)
            .await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_completion(
            self.provider.name(),
            &self.model,
            outcome,
            started.elapsed(),
        );

        match result {
            Ok(completion) => {
                tracing::debug!(
                    provider = self.provider.name(),
                    model = %self.model,
                    input_tokens = ?completion.input_tokens,
                    output_tokens = ?completion.output_tokens,
                    "Completion succeeded"
                );
                ContentVariant::Generated(completion.text)
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    model = %self.model,
                    error = %e,
                    "Completion failed"
                );
                ContentVariant::Failed(e.to_string())
            }
        }
    }

    /// Generate the small, medium and long variants for the request's platform, in that order.
    pub async fn generate_for_platform(&self, request: &GenerationRequest) -> PlatformContent {
        let small = self.generate_variant(request, ContentSize::Small).await;
        let medium = self.generate_variant(request, ContentSize::Medium).await;
        let long = self.generate_variant(request, ContentSize::Long).await;

        PlatformContent {
            small,
            medium,
            long,
        }
    }

    async fn generate_variant(
        &self,
        request: &GenerationRequest,
        size: ContentSize,
    ) -> ContentVariant {
        let prompt = build_prompt(
            &request.idea,
            &request.target_audience,
            &request.platform,
            &request.post_category,
            size,
        );
        self.complete(&prompt, SamplingParams::default()).await
    }

    /// Generate content for one platform and store it when persistence is configured.
    ///
    /// A failed insert is logged and yields `document_id: None`; the content is kept.
    pub async fn generate(&self, request: GenerationRequest) -> GenerationResult {
        tracing::info!(
            platform = %request.platform,
            post_category = %request.post_category,
            "Generating content"
        );

        let content = self.generate_for_platform(&request).await;

        let failed = content.failed_count();
        if failed > 0 {
            tracing::warn!(
                platform = %request.platform,
                failed_variants = failed,
                "Some content variants failed to generate"
            );
        }

        let document_id = self.persist(&request, &content).await;
        metrics::record_generation(&request.platform, document_id.is_some());

        GenerationResult {
            platform: request.platform,
            content,
            document_id,
        }
    }

    async fn persist(
        &self,
        request: &GenerationRequest,
        content: &PlatformContent,
    ) -> Option<String> {
        let store = self.store.as_ref()?;

        let mut generated_content = BTreeMap::new();
        generated_content.insert(request.platform.as_str().to_string(), content.clone());
        let record = GenerationRecord::new(request.clone(), generated_content, self.model.clone());

        match store.insert(&record).await {
            Ok(id) => {
                tracing::info!(document_id = %id, "Saved generated content");
                Some(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save generated content");
                None
            }
        }
    }
}
