//! Inbound post requests.
//!
//! `PostRequest` is the lenient wire shape accepted from the browser client,
//! the CLI and the bot. `PostRequest::validate` turns it into a
//! [`ValidatedPost`] or names the first offending field.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::metadata::MediaType;

/// Request validation failure, always naming the JSON field at fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing {field}")]
    Missing { field: &'static str },

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field } | ValidationError::Invalid { field, .. } => field,
        }
    }
}

/// Post request as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    #[serde(default, alias = "media_type")]
    pub media_type: Option<String>,

    #[serde(
        default,
        alias = "content_id",
        alias = "tmdb_id",
        alias = "tmdbId",
        deserialize_with = "lenient_number"
    )]
    pub content_id: Option<u64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub season: Option<u32>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub episode: Option<u32>,

    #[serde(default, alias = "custom_link")]
    pub custom_link: Option<String>,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(default, alias = "channel_id", deserialize_with = "string_or_number")]
    pub channel_id: Option<String>,

    #[serde(default, alias = "banner_html")]
    pub banner_html: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPost {
    pub media_type: MediaType,
    pub content_id: u64,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub custom_link: Option<String>,
    pub note: Option<String>,
    pub channel_id: String,
    pub banner_html: Option<String>,
}

impl PostRequest {
    /// Request for one title with nothing else set.
    pub fn new(media_type: MediaType, content_id: u64) -> Self {
        Self {
            media_type: Some(media_type.as_str().to_string()),
            content_id: Some(content_id),
            ..Self::default()
        }
    }

    /// Validates the request, falling back to `default_channel` when the
    /// request names none.
    ///
    /// # Errors
    ///
    /// - `ValidationError::Missing` - mediaType, contentId or channelId absent
    /// - `ValidationError::Invalid` - Unknown mediaType or a customLink that is
    ///   not an absolute http(s) URL
    pub fn validate(&self, default_channel: Option<&str>) -> Result<ValidatedPost, ValidationError> {
        let media_type = non_blank(self.media_type.as_deref())
            .ok_or(ValidationError::Missing { field: "mediaType" })?
            .to_ascii_lowercase()
            .parse::<MediaType>()
            .map_err(|reason| ValidationError::Invalid {
                field: "mediaType",
                reason,
            })?;

        let content_id = self
            .content_id
            .filter(|id| *id > 0)
            .ok_or(ValidationError::Missing { field: "contentId" })?;

        let channel_id = non_blank(self.channel_id.as_deref())
            .or_else(|| non_blank(default_channel))
            .ok_or(ValidationError::Missing { field: "channelId" })?
            .to_string();

        let custom_link = non_blank(self.custom_link.as_deref())
            .map(validate_link)
            .transpose()?;

        Ok(ValidatedPost {
            media_type,
            content_id,
            season: self.season,
            episode: self.episode,
            custom_link,
            note: non_blank(self.note.as_deref()).map(str::to_string),
            channel_id,
            banner_html: non_blank(self.banner_html.as_deref()).map(str::to_string),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn validate_link(link: &str) -> Result<String, ValidationError> {
    let invalid = |reason: &str| ValidationError::Invalid {
        field: "customLink",
        reason: reason.to_string(),
    };

    let parsed = url::Url::parse(link).map_err(|e| invalid(&e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(link.to_string()),
        other => Err(invalid(&format!("unsupported scheme {other}"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

/// Accepts a number, a numeric string, an empty string or null.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    use serde::de::Error;

    let value = match Option::<NumberOrString>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(NumberOrString::Number(n)) => n,
        Some(NumberOrString::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<u64>()
                .map_err(|_| D::Error::custom(format!("expected a number, got {text:?}")))?
        }
    };

    T::try_from(value)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("number {value} out of range")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChatIdValue {
    Number(i64),
    Text(String),
}

/// Channel ids arrive as `@name` strings or as numeric ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<ChatIdValue>::deserialize(deserializer)?.map(|value| match value {
            ChatIdValue::Number(n) => n.to_string(),
            ChatIdValue::Text(text) => text,
        }),
    )
}
