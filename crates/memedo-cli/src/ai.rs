use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client;
use serde_json::{json, Value};

use memedo_core::{SelectionConfig, SummaryConfig};

/// Commentator persona the summary model speaks in.
const SUMMARY_PERSONA: &str = "You are a passionate, over the top, brash sports commentator.
You do not care about being politically correct.
You take extreme positions and target individuals for either great or disastrous performance.
You also capture the sentiment of the fans, the coach and the captain.
You are also a little drunk.
Summarize what happened in";

const SELECTION_INSTRUCTIONS: &str = "You create memes from a commentary summary.
Pick the meme templates from the catalog below that fit the summary best and fill in their captions.
Answer with a JSON object of the form {\"memes\": [{\"id\": <template id>, \"meme_creation_input\": {<caption key>: <caption text>}}]}.
Every meme_creation_input must contain exactly the caption keys listed for its template.

Catalog:
";

/// Turns a free-text prompt into a flavorful commentary summary.
pub trait SummaryService {
    fn summarize(&self, prompt: &str) -> Result<String>;
}

/// One template pick from the selection model.
#[derive(Debug, Clone, PartialEq)]
pub struct MemeSelection {
    pub template_id: u32,
    /// Caption object keyed by the template's field names.
    pub caption_input: Value,
}

/// Picks templates and fills their captions for a summary.
pub trait MemeSelectionService {
    /// `catalog` is the rendered template catalog (see `TemplateRegistry::system_context`).
    fn select(&self, summary: &str, catalog: &str, max: usize) -> Result<Vec<MemeSelection>>;
}

fn api_key(env_name: &str, purpose: &str) -> Result<String> {
    std::env::var(env_name)
        .map_err(|_| anyhow!("{} is not set (needed for {})", env_name, purpose))
}

fn post_chat_completion(client: &Client, url: &str, api_key: &str, body: &Value, what: &str) -> Result<Value> {
    let res = client
        .post(url)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .with_context(|| format!("{} request failed", what))?;

    if !res.status().is_success() {
        let status = res.status();
        let text = res.text().unwrap_or_default();
        return Err(anyhow!("{} failed: {}: {}", what, status, text));
    }

    res.json::<Value>()
        .with_context(|| format!("failed to parse {} response", what))
}

/// Extract `choices[0].message.content` from a chat-completions response.
pub fn chat_content(body: &Value) -> Result<String> {
    body.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("chat completion response has no message content"))
}

/// Parse the selection model's `{"memes": [...]}` answer, keeping at most `max` picks.
///
/// `meme_creation_input` may be a JSON object or a string holding one.
pub fn parse_selections(content: &str, max: usize) -> Result<Vec<MemeSelection>> {
    let root: Value = serde_json::from_str(content.trim())
        .context("selection model did not answer with JSON")?;
    let memes = root
        .get("memes")
        .and_then(|m| m.as_array())
        .ok_or_else(|| anyhow!("selection answer has no 'memes' array"))?;

    let mut out = Vec::with_capacity(memes.len().min(max));
    for (i, meme) in memes.iter().take(max).enumerate() {
        let template_id = meme
            .get("id")
            .and_then(|id| id.as_u64())
            .and_then(|id| u32::try_from(id).ok())
            .ok_or_else(|| anyhow!("meme {} has no valid template id", i))?;

        let caption_input = match meme.get("meme_creation_input") {
            Some(Value::String(raw)) => serde_json::from_str(raw).with_context(|| {
                format!("meme {} (template {}) has malformed caption JSON", i, template_id)
            })?,
            Some(value @ Value::Object(_)) => value.clone(),
            Some(other) => bail!(
                "meme {} (template {}) has unsupported caption input: {}",
                i,
                template_id,
                other
            ),
            None => bail!("meme {} (template {}) has no meme_creation_input", i, template_id),
        };

        out.push(MemeSelection {
            template_id,
            caption_input,
        });
    }
    Ok(out)
}

/// Perplexity-style chat-completions summary service.
pub struct HttpSummaryService {
    client: Client,
    config: SummaryConfig,
    api_key: String,
}

impl HttpSummaryService {
    pub fn from_config(config: &SummaryConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            api_key: api_key(&config.api_key_env, "prompt summaries")?,
            config: config.clone(),
        })
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": "Be ridiculous and flamboyant." },
                { "role": "user", "content": format!("{} {}", SUMMARY_PERSONA, prompt) }
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "stream": false
        })
    }
}

impl SummaryService for HttpSummaryService {
    fn summarize(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = post_chat_completion(&self.client, &url, &self.api_key, &self.request_body(prompt), "summary")?;
        let summary = chat_content(&body)?;
        tracing::debug!("summary: {}", summary);
        Ok(summary)
    }
}

/// OpenAI-compatible chat-completions selection service.
pub struct HttpSelectionService {
    client: Client,
    config: SelectionConfig,
    api_key: String,
}

impl HttpSelectionService {
    pub fn from_config(config: &SelectionConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            api_key: api_key(&config.api_key_env, "meme selection")?,
            config: config.clone(),
        })
    }

    fn request_body(&self, summary: &str, catalog: &str, max: usize) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": format!("{}{}", SELECTION_INSTRUCTIONS, catalog) },
                { "role": "user", "content": format!("Create up to {} memes for this summary:\n{}", max, summary) }
            ],
            "response_format": { "type": "json_object" }
        })
    }
}

impl MemeSelectionService for HttpSelectionService {
    fn select(&self, summary: &str, catalog: &str, max: usize) -> Result<Vec<MemeSelection>> {
        let url = format!("{}/v1/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = post_chat_completion(
            &self.client,
            &url,
            &self.api_key,
            &self.request_body(summary, catalog, max),
            "meme selection",
        )?;
        parse_selections(&chat_content(&body)?, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_content_extracts_first_choice() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": "What a disaster!"}}]});
        assert_eq!(chat_content(&body).unwrap(), "What a disaster!");
        assert!(chat_content(&json!({"choices": []})).is_err());
    }

    #[test]
    fn test_parse_selections_object_and_string_inputs() {
        let content = r#"{"memes": [
            {"id": 2, "meme_creation_input": {"action": "wearing sunscreen"}},
            {"id": 12, "meme_creation_input": "{\"first\":\"Tea\", \"second\":\"coffee\"}"}
        ]}"#;
        let picks = parse_selections(content, 5).unwrap();
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].template_id, 2);
        assert_eq!(picks[0].caption_input["action"], "wearing sunscreen");
        assert_eq!(picks[1].caption_input["second"], "coffee");
    }

    #[test]
    fn test_parse_selections_truncates_to_max() {
        let content = r#"{"memes": [
            {"id": 2, "meme_creation_input": {"action": "a"}},
            {"id": 2, "meme_creation_input": {"action": "b"}},
            {"id": 2, "meme_creation_input": {"action": "c"}}
        ]}"#;
        let picks = parse_selections(content, 2).unwrap();
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[1].caption_input["action"], "b");
    }

    #[test]
    fn test_parse_selections_rejects_malformed() {
        assert!(parse_selections("not json", 5).is_err());
        assert!(parse_selections(r#"{"picks": []}"#, 5).is_err());
        assert!(parse_selections(r#"{"memes": [{"meme_creation_input": {}}]}"#, 5).is_err());
        assert!(parse_selections(r#"{"memes": [{"id": 2, "meme_creation_input": "{oops"}]}"#, 5).is_err());
    }

    #[test]
    fn test_summary_request_uses_persona_and_config() {
        let service = HttpSummaryService {
            client: Client::new(),
            config: SummaryConfig::default(),
            api_key: "test".into(),
        };
        let body = service.request_body("india new zealand test match");
        assert_eq!(body["model"], "llama-3.1-sonar-large-128k-online");
        let user = body["messages"][1]["content"].as_str().unwrap();
        assert!(user.starts_with("You are a passionate"));
        assert!(user.ends_with("india new zealand test match"));
    }

    #[test]
    fn test_selection_request_embeds_catalog() {
        let service = HttpSelectionService {
            client: Client::new(),
            config: SelectionConfig::default(),
            api_key: "test".into(),
        };
        let body = service.request_body("summary text", "id: 2\nname: Indifferent", 5);
        assert_eq!(body["response_format"]["type"], "json_object");
        assert!(body["messages"][0]["content"].as_str().unwrap().contains("name: Indifferent"));
        assert!(body["messages"][1]["content"].as_str().unwrap().contains("up to 5 memes"));
    }
}
