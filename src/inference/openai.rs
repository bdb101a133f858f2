//! OpenAI-compatible inference backend
//!
//! One blocking chat-completion call per file. The service is asked for a
//! JSON object; the reply is parsed tolerantly since models occasionally
//! return numbers, arrays, or nulls where strings were requested.

use crate::error::{Result, TagprepError};
use crate::inference::traits::MetadataInferrer;
use crate::types::MetadataRecord;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_PROMPT: &str = "You are a music metadata expert with comprehensive knowledge of \
music across all genres, artists, and time periods. Provide accurate metadata in JSON format \
ONLY. Do not include any explanations or comments outside the JSON object.";

/// Live inference backend talking to an OpenAI-compatible endpoint
pub struct OpenAiInferrer {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

impl OpenAiInferrer {
    pub fn new(api_base: &str, api_key: &str, model: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TagprepError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    fn build_prompt(hint: &str) -> String {
        format!(
            r#"I need detailed metadata for the song titled "{hint}".

Please provide the following information:
- title: The full and correct title of the song
- artist: The performers/singers of the song (as a comma-separated string, not an array)
- album: The album name or compilation it's from
- year: The release year (as a number)
- composer: The composer/producer/music director
- genre: The primary genre of the song
- language: The language of the song's lyrics (if applicable)

Return your response ONLY as a JSON object with these fields. If you cannot determine a field at all, use null for its value.

Example response format:

Example 1 (English song):
{{
  "title": "Yesterday",
  "artist": "The Beatles",
  "album": "Help!",
  "year": 1965,
  "composer": "John Lennon, Paul McCartney",
  "genre": "Rock",
  "language": "English"
}}

Example 2 (Hindi song):
{{
  "title": "Tum Hi Ho",
  "artist": "Arijit Singh",
  "album": "Aashiqui 2",
  "year": 2013,
  "composer": "Mithoon",
  "genre": "Indian Pop",
  "language": "Hindi"
}}"#
        )
    }
}

impl MetadataInferrer for OpenAiInferrer {
    fn infer(&self, hint: &str) -> Result<MetadataRecord> {
        let prompt = Self::build_prompt(hint);
        let request = ChatRequest {
            model: &self.model,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        debug!("Requesting metadata for '{}' from {}", hint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| TagprepError::inference(hint, format!("network error: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TagprepError::inference(
                hint,
                "rate limit rejected by the service (HTTP 429)",
            ));
        }
        if !status.is_success() {
            return Err(TagprepError::inference(
                hint,
                format!("service returned HTTP {}", status),
            ));
        }

        let completion: ChatResponse = response
            .json()
            .map_err(|e| TagprepError::inference(hint, format!("malformed response: {}", e)))?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| TagprepError::inference(hint, "response contained no completion"))?;

        parse_metadata(hint, content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Parse the model's JSON reply into a MetadataRecord.
///
/// Tolerates fenced code blocks, numeric or array values, explicit nulls, and
/// missing fields. Fails only when the content is not a JSON object at all.
pub fn parse_metadata(hint: &str, content: &str) -> Result<MetadataRecord> {
    let body = strip_code_fence(content);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| TagprepError::inference(hint, format!("unparseable reply: {}", e)))?;

    if !value.is_object() {
        return Err(TagprepError::inference(hint, "reply is not a JSON object"));
    }

    let record = MetadataRecord {
        title: text_field(&value, &["title"]),
        artist: text_field(&value, &["artist", "artists"]),
        album: text_field(&value, &["album"]),
        year: year_field(&value),
        composer: text_field(&value, &["composer"]),
        genre: text_field(&value, &["genre"]),
        language: text_field(&value, &["language"]),
    };

    debug!("Parsed metadata for '{}': {:?}", hint, record);

    Ok(record)
}

/// Unwrap a ```json ... ``` fence if the model added one despite instructions
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Extract a text field, accepting the first key present.
///
/// Strings are trimmed, numbers are stringified, arrays of strings are joined
/// with ", ". Nulls and empty values collapse to None ("no update").
fn text_field(obj: &Value, keys: &[&str]) -> Option<String> {
    let field = keys.iter().find_map(|k| obj.get(*k))?;

    let text = match field {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Extract the year, dropping values that are not plausible numbers
fn year_field(obj: &Value) -> Option<String> {
    let year = text_field(obj, &["year"])?;

    if year.chars().all(|c| c.is_ascii_digit()) {
        Some(year)
    } else {
        warn!("Dropping non-numeric year value '{}'", year);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_reply() {
        let content = r#"{
            "title": "Bohemian Rhapsody",
            "artist": "Queen",
            "album": "A Night at the Opera",
            "year": 1975,
            "composer": "Freddie Mercury",
            "genre": "Rock",
            "language": "English"
        }"#;

        let record = parse_metadata("bohemian rhapsody", content).expect("should parse");
        assert_eq!(record.title.as_deref(), Some("Bohemian Rhapsody"));
        assert_eq!(record.artist.as_deref(), Some("Queen"));
        assert_eq!(record.year.as_deref(), Some("1975"));
        assert_eq!(record.language.as_deref(), Some("English"));
    }

    #[test]
    fn accepts_artists_alias_and_array_values() {
        let content = r#"{"artists": ["Simon", "Garfunkel"], "title": "The Boxer"}"#;

        let record = parse_metadata("the boxer", content).expect("should parse");
        assert_eq!(record.artist.as_deref(), Some("Simon, Garfunkel"));
    }

    #[test]
    fn nulls_and_empty_strings_mean_no_update() {
        let content = r#"{"title": "X", "album": null, "genre": "", "composer": "  "}"#;

        let record = parse_metadata("x", content).expect("should parse");
        assert_eq!(record.title.as_deref(), Some("X"));
        assert!(record.album.is_none());
        assert!(record.genre.is_none());
        assert!(record.composer.is_none());
    }

    #[test]
    fn missing_fields_are_none() {
        let record = parse_metadata("y", r#"{"title": "Y"}"#).expect("should parse");
        assert!(record.artist.is_none());
        assert!(record.year.is_none());
    }

    #[test]
    fn non_numeric_year_is_dropped() {
        let record =
            parse_metadata("z", r#"{"title": "Z", "year": "unknown"}"#).expect("should parse");
        assert!(record.year.is_none());
    }

    #[test]
    fn year_as_string_number_is_kept() {
        let record =
            parse_metadata("z", r#"{"title": "Z", "year": "2013"}"#).expect("should parse");
        assert_eq!(record.year.as_deref(), Some("2013"));
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let content = "```json\n{\"title\": \"Fenced\"}\n```";
        let record = parse_metadata("fenced", content).expect("should parse");
        assert_eq!(record.title.as_deref(), Some("Fenced"));
    }

    #[test]
    fn garbage_reply_is_an_inference_error() {
        let result = parse_metadata("bad", "I think this song is by Queen.");
        assert!(matches!(result, Err(TagprepError::Inference { .. })));
    }

    #[test]
    fn non_object_reply_is_rejected() {
        let result = parse_metadata("bad", r#"["not", "an", "object"]"#);
        assert!(matches!(result, Err(TagprepError::Inference { .. })));
    }
}
