//! Enhancement workflow
//!
//! Decides between the hosted API and the offline fallback and shapes the
//! result the preview layer consumes. A failed API call is not fatal: the
//! original text comes back unchanged, so the diff renders all-unchanged.

use crate::config::Config;
use crate::error::{CvEnhancerError, Result};
use log::{debug, error, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::client::ChatClient;
use super::fallback::FallbackEnhancer;
use super::prompts::{EnhanceField, EnhancementContext, GenerateKind, PromptTemplates};

const ENHANCED_EXPLANATION: &str = "The AI enhancement improved grammar, clarity, and impact. \
It used stronger action verbs, more precise language, and better formatting to make your \
content more professional and compelling.";

const FAILURE_EXPLANATION: &str =
    "Sorry, there was an error processing your enhancement request. Please try again later.";

/// One piece of CV text to enhance, plus its context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancementRequest {
    pub field: EnhanceField,
    pub content: String,
    pub context: EnhancementContext,
}

/// Result of an enhancement pass, hosted or offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enhancement {
    pub original: String,
    pub enhanced: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Enhancement {
    /// True when the pass left the text untouched, either because the
    /// content needed no changes or because the API call failed.
    pub fn is_unchanged(&self) -> bool {
        self.original == self.enhanced
    }
}

/// Orchestrates prompts, the API client and the offline fallback.
pub struct Enhancer {
    client: Option<ChatClient>,
    fallback: FallbackEnhancer,
    templates: PromptTemplates,
}

impl Enhancer {
    /// Build an enhancer, resolving the API key from the configured
    /// environment variable. Without a key the offline fallback serves
    /// all enhancement requests.
    pub fn new(config: &Config) -> Result<Self> {
        let client = match std::env::var(&config.api.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Some(ChatClient::new(&config.api, key)?),
            _ => {
                warn!(
                    "No API key found in ${}; enhancement will use the offline fallback",
                    config.api.api_key_env
                );
                None
            }
        };

        Ok(Self {
            client,
            fallback: FallbackEnhancer::new(&config.enhancement)?,
            templates: PromptTemplates::default(),
        })
    }

    /// Build an enhancer that never touches the network.
    pub fn offline(config: &Config) -> Result<Self> {
        Ok(Self {
            client: None,
            fallback: FallbackEnhancer::new(&config.enhancement)?,
            templates: PromptTemplates::default(),
        })
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    pub fn model(&self) -> Option<&str> {
        self.client.as_ref().map(|c| c.model())
    }

    /// Enhance one piece of text. Never fails: API errors are logged and
    /// the original content is returned as the enhanced text.
    pub async fn enhance(&self, request: &EnhancementRequest) -> Enhancement {
        let Some(client) = &self.client else {
            debug!(
                "Using offline fallback for {} enhancement",
                request.field.as_str()
            );
            return self.fallback.enhance(request);
        };

        let prompt =
            self.templates
                .render_enhancement(request.field, &request.content, &request.context);
        debug!(
            "Requesting {} enhancement ({} chars of content)",
            request.field.as_str(),
            request.content.len()
        );

        match client.complete(self.templates.system_prompt(), &prompt).await {
            Ok(text) => {
                let bullets = extract_bullet_points(&text);
                Enhancement {
                    original: request.content.clone(),
                    enhanced: text,
                    bullet_points: (!bullets.is_empty()).then_some(bullets),
                    explanation: Some(ENHANCED_EXPLANATION.to_string()),
                }
            }
            Err(e) => {
                error!("Enhancement request failed: {}", e);
                Enhancement {
                    original: request.content.clone(),
                    enhanced: request.content.clone(),
                    bullet_points: None,
                    explanation: Some(FAILURE_EXPLANATION.to_string()),
                }
            }
        }
    }

    /// Generate fresh content from scratch. Unlike enhancement this has no
    /// offline path, so a missing key or API failure is a hard error.
    pub async fn generate(&self, kind: GenerateKind, context: &EnhancementContext) -> Result<String> {
        let client = self.client.as_ref().ok_or_else(|| {
            CvEnhancerError::Configuration(
                "content generation requires an API key; the offline fallback cannot generate text"
                    .to_string(),
            )
        })?;

        let prompt = self.templates.render_generation(kind, context);
        debug!("Requesting {} generation", kind.as_str());
        client.complete(self.templates.system_prompt(), &prompt).await
    }
}

/// Pull bullet points out of completion text. Bullet-marked lines win;
/// otherwise any multi-line text is split into its non-empty lines.
pub fn extract_bullet_points(text: &str) -> Vec<String> {
    let bullet_pattern = Regex::new(r"(?m)^[•*-]\s*(.+)$").expect("valid bullet pattern");

    let bullets: Vec<String> = bullet_pattern
        .captures_iter(text)
        .map(|c| c[1].trim().to_string())
        .collect();
    if !bullets.is_empty() {
        return bullets;
    }

    if text.contains('\n') {
        return text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
    }

    Vec::new()
}
