//! The common ten-step dispatch sequence every tool call passes through.
//! Individual [`crate::tool::Tool`] implementations supply only a system
//! prompt, input schema, and category; everything else is shared here.

use std::sync::Arc;

use catalog::Category;
use conversation::{ConversationStore, ConversationThread, ConversationTurn, ModelContext};
use providers::{ChatMessage, GenerateRequest, ImageAttachment, ProviderRegistry, Role as WireRole};

use crate::{
    error::ToolError,
    files,
    request::{self, CommonFields},
    response::{ContinuationOffer, ContentType, ResponseMetadata, Status, ToolResponse},
    sentinel,
    tool::Tool,
    tools,
};

pub struct Kernel {
    registry: Arc<ProviderRegistry>,
    store: ConversationStore,
    default_model: config::ModelSelector,
    default_vision_model: Option<String>,
    mcp_prompt_size_limit: usize,
}

impl Kernel {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        store: ConversationStore,
        default_model: config::ModelSelector,
        default_vision_model: Option<String>,
        mcp_prompt_size_limit: usize,
    ) -> Self {
        Self { registry, store, default_model, default_vision_model, mcp_prompt_size_limit }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Entry point for `tools/call`. Never returns an `Err`: every failure
    /// is folded into an error-status [`ToolResponse`] so the MCP layer
    /// always has a well-formed result to send back.
    pub async fn call(&self, tool: &dyn Tool, arguments: serde_json::Value) -> ToolResponse {
        if !tool.requires_model() {
            return self.call_model_free(tool);
        }

        match self.dispatch(tool, arguments).await {
            Ok(response) => response,
            Err(err) => ToolResponse::error(&err),
        }
    }

    fn call_model_free(&self, tool: &dyn Tool) -> ToolResponse {
        match tool.name() {
            "listmodels" => tools::listmodels::render(&self.registry),
            "version" => tools::version::render(&self.registry),
            _ => ToolResponse::error(&ToolError::InternalError),
        }
    }

    async fn dispatch(&self, tool: &dyn Tool, arguments: serde_json::Value) -> Result<ToolResponse, ToolError> {
        // 1. Schema validation.
        let fields = request::extract_common(tool, &arguments)?;

        // 2. Prompt-size gate.
        if fields.primary_text.len() > self.mcp_prompt_size_limit {
            return Ok(ToolResponse::clarification_requested(self.mcp_prompt_size_limit));
        }

        // 3. Continuation reconstruction.
        let thread = match &fields.continuation_id {
            Some(id) => Some(self.store.load(id).await?),
            None => None,
        };

        let files = merge_newest_first(&fields.files, thread.as_ref().map(|t| t.referenced_files_newest_first()));
        let images = merge_newest_first(&fields.images, thread.as_ref().map(|t| t.referenced_images_newest_first()));

        // 4. Model selection.
        let has_images = !images.is_empty();
        let (provider, canonical_name) = self.resolve_model(tool.category(), &fields, has_images)?;
        let capabilities = provider
            .capabilities(canonical_name)
            .expect("registry.resolve always returns a name the provider currently serves");

        if has_images && !capabilities.supports_images {
            return Err(ToolError::VisionUnsupported);
        }

        let resolved_images = if has_images { files::read_images(&images).await? } else { Vec::new() };

        if has_images {
            let total_bytes: u64 = resolved_images.iter().map(|img| img.bytes).sum();
            if total_bytes > capabilities.max_image_bytes {
                return Err(ToolError::ImagesTooLarge);
            }
        }

        let model_context = ModelContext::new(capabilities.clone());
        let allocation = model_context.allocate();

        // 5. Temperature resolution.
        let (temperature, corrected) = capabilities.temperature_policy.resolve(fields.temperature);
        if corrected {
            log::warn!("{}: requested temperature was out of range for {canonical_name}, corrected", tool.name());
        }

        // 6. Assemble provider request.
        let history = thread.as_ref().map(|t| conversation::build_history(t, &allocation)).unwrap_or_default();
        let resolved_files = files::read_files(&files).await?;

        let files_text = render_files(&resolved_files);
        let files_tokens = tokencount::estimate(&files_text);
        if files_tokens > allocation.file_budget {
            let files_bytes = resolved_files.iter().map(|f| f.content.len() as u64).sum();
            return Err(ToolError::ContextOverflow { files_bytes, file_budget_tokens: allocation.file_budget });
        }

        let user_message = assemble_user_message(&history.history_text, &files_text, &fields.primary_text);

        let message_images = resolved_images
            .iter()
            .map(|img| ImageAttachment { mime_type: img.mime_type.clone(), data_base64: img.data_base64.clone() })
            .collect();

        let request = GenerateRequest {
            canonical_name: canonical_name.to_string(),
            messages: vec![ChatMessage { role: WireRole::User, content: user_message, images: message_images }],
            system_prompt: Some(tool.system_prompt().to_string()),
            temperature,
            max_output_tokens: Some(allocation.response_reserve),
            thinking_mode: fields.thinking_mode.or_else(|| tool.default_thinking_mode()),
        };

        // 7. Provider call.
        let generated = provider.generate(request).await?;

        // 8. Post-process: sentinel-status detection short-circuits thread maintenance.
        if let Some(status) = sentinel::detect(&generated.content) {
            log::debug!("{}: provider output carried sentinel status {status}", tool.name());
            return Ok(ToolResponse {
                content: generated.content,
                content_type: ContentType::Json,
                status: Status::sentinel(status),
                metadata: ResponseMetadata {
                    model_used: Some(generated.model_name),
                    input_tokens: Some(generated.input_tokens),
                    output_tokens: Some(generated.output_tokens),
                    provider_type: Some(provider.kind().as_str().to_string()),
                    error_kind: None,
                },
                continuation_offer: None,
            });
        }

        // 9. Thread maintenance.
        let continuation_offer = self.maintain_thread(tool, &fields, thread, files, images, &generated).await?;

        // 10. Response formatting.
        Ok(ToolResponse {
            content: generated.content,
            content_type: ContentType::Text,
            status: Status::success(),
            metadata: ResponseMetadata {
                model_used: Some(generated.model_name),
                input_tokens: Some(generated.input_tokens),
                output_tokens: Some(generated.output_tokens),
                provider_type: Some(provider.kind().as_str().to_string()),
                error_kind: None,
            },
            continuation_offer: Some(continuation_offer),
        })
    }

    fn resolve_model<'a>(
        &'a self,
        category: Category,
        fields: &CommonFields,
        has_images: bool,
    ) -> Result<(&'a dyn providers::Provider, &'static str), ToolError> {
        let requested = fields.model.clone().unwrap_or_else(|| match &self.default_model {
            config::ModelSelector::Auto => "auto".to_string(),
            config::ModelSelector::Named(name) => name.clone(),
        });

        if requested.trim().eq_ignore_ascii_case("auto") {
            let canonical = self.registry.select_auto(category, has_images, self.default_vision_model.as_deref())?;
            Ok(self.registry.resolve(canonical)?)
        } else {
            self.registry.resolve(&requested).map_err(|err| self.enrich_resolve_error(err, &requested))
        }
    }

    /// `ResolveError::ModelNotFound` carries only the requested name; fill
    /// in the actionable "choose one of: ..." hint from what's currently
    /// claimed before converting to a client-visible [`ToolError`].
    fn enrich_resolve_error(&self, err: providers::ResolveError, requested: &str) -> ToolError {
        match err {
            providers::ResolveError::ModelNotFound(_) => {
                ToolError::ModelNotFound { requested: requested.to_string(), available: self.registry.available_models().into_iter().map(String::from).collect() }
            }
            providers::ResolveError::AutoUnresolved => ToolError::InternalError,
        }
    }

    async fn maintain_thread(
        &self,
        tool: &dyn Tool,
        fields: &CommonFields,
        existing_thread: Option<ConversationThread>,
        files: Vec<String>,
        images: Vec<String>,
        generated: &providers::GenerateResponse,
    ) -> Result<ContinuationOffer, ToolError> {
        let user_turn = ConversationTurn {
            role: conversation::Role::User,
            content: fields.primary_text.clone(),
            timestamp: jiff::Timestamp::now(),
            model_name: None,
            tool_name: Some(tool.name().to_string()),
            files,
            images,
            input_tokens: None,
            output_tokens: None,
        };

        let assistant_turn = ConversationTurn {
            role: conversation::Role::Assistant,
            content: generated.content.clone(),
            timestamp: jiff::Timestamp::now(),
            model_name: Some(generated.model_name.clone()),
            tool_name: Some(tool.name().to_string()),
            files: Vec::new(),
            images: Vec::new(),
            input_tokens: Some(generated.input_tokens),
            output_tokens: Some(generated.output_tokens),
        };

        let thread_id = match (existing_thread, &fields.continuation_id) {
            (Some(_), Some(id)) => {
                self.store.append(id, user_turn).await?;
                id.clone()
            }
            _ => self.store.create(tool.name(), user_turn).await?,
        };

        let thread = self.store.append(&thread_id, assistant_turn).await?;

        let mut suggestions = vec![tool.name().to_string()];
        if matches!(tool.category(), Category::Reasoning | Category::ExtendedReasoning) {
            suggestions.push("consensus".to_string());
        }

        Ok(ContinuationOffer {
            thread_id: thread.id.clone(),
            remaining_turns: self.store.remaining_turns(&thread),
            total_tokens: thread.total_tokens(),
            suggestions,
        })
    }
}

/// `request`-provided entries first (in their given order), then whatever
/// the thread already referenced that isn't already present — request
/// entries take precedence in the newest-first ordering.
fn merge_newest_first(requested: &[String], thread_refs: Option<Vec<String>>) -> Vec<String> {
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut out = Vec::new();

    for path in requested {
        if seen.insert(path.clone()) {
            out.push(path.clone());
        }
    }

    if let Some(thread_refs) = thread_refs {
        for path in thread_refs {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }

    out
}

fn render_files(files: &[files::ResolvedFile]) -> String {
    let mut text = String::new();

    for file in files {
        text.push_str("--- FILE: ");
        text.push_str(&file.path);
        text.push_str(" ---\n");
        text.push_str(&file.content);
        text.push('\n');
    }

    text
}

fn assemble_user_message(history_text: &str, files_text: &str, prompt: &str) -> String {
    let mut message = String::new();

    if !history_text.is_empty() {
        message.push_str(history_text);
        message.push('\n');
    }

    if !files_text.is_empty() {
        message.push_str(files_text);
        message.push('\n');
    }

    message.push_str(prompt);
    message
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use catalog::{Category, ModelCapabilities, ProviderKind, TemperaturePolicy};
    use conversation::MemoryStore;
    use providers::{GenerateRequest, GenerateResponse, Provider, ProviderError};
    use serde_json::json;

    use super::*;
    use crate::tools::chat::Chat;

    /// A fixture provider that echoes the incoming prompt back, exercised
    /// directly rather than mocked, matching this workspace's test style.
    struct EchoProvider;

    #[async_trait]
    impl Provider for EchoProvider {
        fn kind(&self) -> ProviderKind {
            ProviderKind::OpenAI
        }

        fn name(&self) -> &str {
            "openai"
        }

        fn list_models(&self) -> Vec<&'static str> {
            vec!["echo-model"]
        }

        fn capabilities(&self, canonical_name: &str) -> Option<ModelCapabilities> {
            (canonical_name.eq_ignore_ascii_case("echo-model")).then(|| ModelCapabilities {
                provider: ProviderKind::OpenAI,
                canonical_name: "echo-model",
                aliases: &["echo"],
                context_tokens: 128_000,
                category: Category::Balanced,
                supports_images: false,
                max_image_bytes: 0,
                supported_image_formats: &[],
                supports_extended_thinking: false,
                supports_system_prompt: true,
                supports_temperature: true,
                temperature_policy: TemperaturePolicy::Range { lo: 0.0, hi: 2.0 },
            })
        }

        fn resolve_alias(&self, name: &str) -> Option<&'static str> {
            (name.eq_ignore_ascii_case("echo-model") || name.eq_ignore_ascii_case("echo")).then_some("echo-model")
        }

        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ProviderError> {
            let prompt = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(GenerateResponse {
                content: format!("echo: {prompt}"),
                model_name: "echo-model".to_string(),
                input_tokens: tokencount::estimate(&prompt),
                output_tokens: 3,
                finish_reason: Some("stop".to_string()),
            })
        }
    }

    fn kernel() -> Kernel {
        let registry = Arc::new(ProviderRegistry::new(vec![Box::new(EchoProvider)]));
        let kv: Arc<dyn conversation::Kv> = Arc::new(MemoryStore::new(Duration::from_secs(3600)));
        let store = ConversationStore::new(kv, Duration::from_secs(3600), 20);
        Kernel::new(registry, store, config::ModelSelector::Named("echo-model".to_string()), None, 50_000)
    }

    #[tokio::test]
    async fn a_successful_call_creates_a_thread_and_offers_continuation() {
        let kernel = kernel();
        let response = kernel.call(&Chat, json!({"prompt": "hello there"})).await;

        assert_eq!(response.status.as_str(), "success");
        assert_eq!(response.content, "echo: hello there");
        let offer = response.continuation_offer.expect("a new thread should be offered");
        assert_eq!(offer.remaining_turns, 18);
    }

    #[tokio::test]
    async fn resuming_a_live_thread_appends_rather_than_creating_another() {
        let kernel = kernel();
        let first = kernel.call(&Chat, json!({"prompt": "first turn"})).await;
        let thread_id = first.continuation_offer.unwrap().thread_id;

        let second = kernel.call(&Chat, json!({"prompt": "second turn", "continuation_id": thread_id})).await;

        let offer = second.continuation_offer.expect("continuing thread should still offer continuation");
        assert_eq!(offer.thread_id, thread_id, "must resume the same thread, never create a second one");
        assert_eq!(offer.remaining_turns, 16, "two more turns (user+assistant) consumed from the cap");
    }

    #[tokio::test]
    async fn an_unknown_continuation_id_fails_closed_with_no_provider_call() {
        let kernel = kernel();
        let response = kernel.call(&Chat, json!({"prompt": "hi", "continuation_id": "does-not-exist"})).await;

        assert_eq!(response.status.as_str(), "error");
        assert_eq!(response.metadata.error_kind, Some("threadNotFound"));
    }

    #[tokio::test]
    async fn an_unresolvable_model_name_fails_with_a_hint_listing_whats_available() {
        let kernel = kernel();
        let response = kernel.call(&Chat, json!({"prompt": "hi", "model": "gpt-5-nonexistent"})).await;

        assert_eq!(response.status.as_str(), "error");
        assert_eq!(response.metadata.error_kind, Some("modelNotFound"));
        assert!(response.content.contains("echo-model"), "hint should list the one model this registry claims");
    }

    #[tokio::test]
    async fn an_empty_prompt_is_rejected_before_any_provider_call() {
        let kernel = kernel();
        let response = kernel.call(&Chat, json!({"prompt": "   "})).await;

        assert_eq!(response.status.as_str(), "error");
        assert_eq!(response.metadata.error_kind, Some("invalidRequest"));
    }

    #[tokio::test]
    async fn model_free_tools_never_touch_the_registry_or_store() {
        let kernel = kernel();
        let response = kernel.call(&crate::tools::version::Version, json!({})).await;

        assert_eq!(response.status.as_str(), "success");
        assert!(response.continuation_offer.is_none());
    }
}
