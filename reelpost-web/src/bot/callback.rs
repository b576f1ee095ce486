//! Callback tokens carried by candidate buttons.

use std::fmt;

use reelpost_core::MediaType;
use thiserror::Error;

/// Longest `callback_data` the platform accepts, in bytes.
pub const MAX_CALLBACK_BYTES: usize = 64;

const PREFIX: &str = "pick";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("expected pick:<type>:<id>")]
    Shape,

    #[error("unknown media type {0}")]
    MediaType(String),

    #[error("invalid id {0}")]
    Id(String),

    #[error("token exceeds 64 bytes")]
    TooLong,
}

/// Selection of one search candidate: `pick:{movie|tv}:{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackToken {
    pub media_type: MediaType,
    pub id: u64,
}

impl CallbackToken {
    pub fn new(media_type: MediaType, id: u64) -> Self {
        Self { media_type, id }
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses a token from button data, rejecting anything not produced by
    /// [`CallbackToken::encode`].
    ///
    /// # Errors
    /// - `TokenError` - Wrong shape, unknown type, zero or non-numeric id,
    ///   or over the platform's size limit
    pub fn decode(data: &str) -> Result<Self, TokenError> {
        if data.len() > MAX_CALLBACK_BYTES {
            return Err(TokenError::TooLong);
        }

        let parts: Vec<&str> = data.split(':').collect();
        let [prefix, media_type, id] = parts.as_slice() else {
            return Err(TokenError::Shape);
        };
        if *prefix != PREFIX {
            return Err(TokenError::Shape);
        }

        let media_type = media_type
            .parse::<MediaType>()
            .map_err(|_| TokenError::MediaType((*media_type).to_string()))?;

        let id = id
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| TokenError::Id((*id).to_string()))?;

        Ok(Self { media_type, id })
    }
}

impl fmt::Display for CallbackToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}:{}:{}", self.media_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_and_decode() {
        let token = CallbackToken::new(MediaType::Tv, 1396);
        assert_eq!(token.encode(), "pick:tv:1396");
        assert_eq!(CallbackToken::decode("pick:tv:1396"), Ok(token));
        assert!(CallbackToken::new(MediaType::Movie, u64::MAX).encode().len() <= MAX_CALLBACK_BYTES);
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        assert_eq!(CallbackToken::decode("pick:movie"), Err(TokenError::Shape));
        assert_eq!(CallbackToken::decode("pick:movie:1:2"), Err(TokenError::Shape));
        assert_eq!(CallbackToken::decode("post:movie:550"), Err(TokenError::Shape));
        assert_eq!(
            CallbackToken::decode("pick:book:550"),
            Err(TokenError::MediaType("book".to_string()))
        );
        assert_eq!(
            CallbackToken::decode("pick:movie:0"),
            Err(TokenError::Id("0".to_string()))
        );
        assert_eq!(
            CallbackToken::decode("pick:movie:-5"),
            Err(TokenError::Id("-5".to_string()))
        );
        assert_eq!(
            CallbackToken::decode(&format!("pick:movie:{}", "9".repeat(70))),
            Err(TokenError::TooLong)
        );
    }
}
