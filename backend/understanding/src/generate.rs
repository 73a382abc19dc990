//! Text generation — produce a shopper-facing description from a prompt.

use anyhow::{bail, Result};
use tracing::info;

/// Supported text-generation providers.
pub enum TextProvider {
    OpenAi { api_key: String, model: String },
    Gemini { api_key: String },
}

impl TextProvider {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::OpenAi {
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::Gemini {
            api_key: api_key.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi { .. } => "openai",
            Self::Gemini { .. } => "gemini",
        }
    }
}

/// Generate a short text completion for a prompt.
pub async fn generate_text(provider: &TextProvider, prompt: &str) -> Result<String> {
    match provider {
        TextProvider::OpenAi { api_key, model } => generate_via_openai(api_key, model, prompt).await,
        TextProvider::Gemini { api_key } => generate_via_gemini(api_key, prompt).await,
    }
}

async fn generate_via_openai(api_key: &str, model: &str, prompt: &str) -> Result<String> {
    info!("[Generate] Generating via OpenAI {}", model);
    let client = reqwest::Client::new();
    let body = serde_json::json!({
        "model": model,
        "messages": [{ "role": "user", "content": prompt }],
        "max_tokens": 256
    });
    let resp = client
        .post("https://api.openai.com/v1/chat/completions")
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;
    if !resp.status().is_success() {
        bail!("OpenAI generation error: {}", resp.text().await.unwrap_or_default());
    }
    let json: serde_json::Value = resp.json().await?;
    Ok(json["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .trim()
        .to_string())
}

async fn generate_via_gemini(api_key: &str, prompt: &str) -> Result<String> {
    info!("[Generate] Generating via Gemini");
    let client = reqwest::Client::new();
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key={}",
        api_key
    );
    let body = serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    });
    let resp = client.post(&url).json(&body).send().await?;
    if !resp.status().is_success() {
        bail!("Gemini generation error: {}", resp.text().await.unwrap_or_default());
    }
    let json: serde_json::Value = resp.json().await?;
    Ok(json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or("")
        .trim()
        .to_string())
}
