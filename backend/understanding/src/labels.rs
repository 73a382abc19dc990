//! Label detection — name the objects visible in an image via a vision LLM.

use anyhow::{bail, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::info;

/// Prompt shared by every provider; replies are parsed by
/// [`parse_label_reply`].
const LABEL_PROMPT: &str = "List the physical products or objects visible in this photo \
as a short comma-separated list of lowercase labels. Reply with the labels only.";

/// Supported label-detection providers.
pub enum LabelProvider {
    OpenAi { api_key: String, model: String },
    Gemini { api_key: String },
}

impl LabelProvider {
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

    /// Provider name for health reports and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi { .. } => "openai",
            Self::Gemini { .. } => "gemini",
        }
    }
}

/// Detect object labels in an image from raw bytes.
pub async fn detect_labels(
    provider: &LabelProvider,
    image_bytes: &[u8],
    mime_type: &str,
) -> Result<Vec<String>> {
    let b64 = STANDARD.encode(image_bytes);
    let reply = match provider {
        LabelProvider::OpenAi { api_key, model } => {
            detect_via_openai(api_key, model, &b64, mime_type).await?
        }
        LabelProvider::Gemini { api_key } => detect_via_gemini(api_key, &b64, mime_type).await?,
    };
    Ok(parse_label_reply(&reply))
}

async fn detect_via_openai(api_key: &str, model: &str, b64: &str, mime_type: &str) -> Result<String> {
    info!("[Labels] Detecting via OpenAI {}", model);
    let client = reqwest::Client::new();
    let body = serde_json::json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": LABEL_PROMPT },
                { "type": "image_url",
                  "image_url": { "url": format!("data:{};base64,{}", mime_type, b64) } }
            ]
        }],
        "max_tokens": 128
    });
    let resp = client
        .post("https://api.openai.com/v1/chat/completions")
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?;
    if !resp.status().is_success() {
        bail!("OpenAI label error: {}", resp.text().await.unwrap_or_default());
    }
    let json: serde_json::Value = resp.json().await?;
    Ok(json["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string())
}

async fn detect_via_gemini(api_key: &str, b64: &str, mime_type: &str) -> Result<String> {
    info!("[Labels] Detecting via Gemini");
    let client = reqwest::Client::new();
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key={}",
        api_key
    );
    let body = serde_json::json!({
        "contents": [{ "parts": [
            { "text": LABEL_PROMPT },
            { "inlineData": { "mimeType": mime_type, "data": b64 } }
        ]}]
    });
    let resp = client.post(&url).json(&body).send().await?;
    if !resp.status().is_success() {
        bail!("Gemini label error: {}", resp.text().await.unwrap_or_default());
    }
    let json: serde_json::Value = resp.json().await?;
    Ok(json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or("")
        .to_string())
}

/// Split a comma- or newline-separated model reply into clean labels.
fn parse_label_reply(reply: &str) -> Vec<String> {
    reply
        .split([',', '\n'])
        .map(|label| label.trim().trim_matches('.').trim().to_lowercase())
        .filter(|label| !label.is_empty())
        .collect()
}
