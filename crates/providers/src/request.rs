use config::ThinkingMode;

/// One message in a provider-agnostic chat transcript.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub images: Vec<ImageAttachment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub mime_type: String,
    /// Base64-encoded image bytes, already validated against the model's
    /// size/format limits by the tool kernel before this struct is built.
    pub data_base64: String,
}

/// The model-agnostic request the kernel constructs; each adapter translates
/// it into its own wire shape.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub canonical_name: String,
    pub messages: Vec<ChatMessage>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub thinking_mode: Option<ThinkingMode>,
}

/// The provider-agnostic result of a `generate` call.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub content: String,
    pub model_name: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub finish_reason: Option<String>,
}
