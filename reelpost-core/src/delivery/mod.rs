//! Post delivery.
//!
//! `PostService` validates a request, fetches the title, composes the post,
//! then walks the fallback chain: photo from each poster source in order,
//! admin check, text-only message. The first success ends the request.

pub mod admin;
pub mod outcome;
pub mod posters;

use std::sync::Arc;

use tracing::{debug, info, warn};

pub use admin::{AdminCheck, check_admin};
pub use outcome::{AdminDiagnostic, DeliveryOutcome};
pub use posters::{PosterSource, poster_sources};

use crate::ReelpostError;
use crate::compose::{ComposedPost, Composer, PostContext};
use crate::config::{OmdbConfig, ReelpostConfig};
use crate::metadata::{Lookup, MetadataProvider, TmdbClient, find_trailer};
use crate::network::{HttpImageProbe, ImageProbe, build_http_client};
use crate::post::{PostRequest, ValidatedPost};
use crate::telegram::{ChatPlatform, TelegramClient, TelegramError};

/// Publishes titles to channels.
#[derive(Debug, Clone)]
pub struct PostService {
    metadata: Arc<dyn MetadataProvider>,
    chat: Arc<dyn ChatPlatform>,
    probe: Arc<dyn ImageProbe>,
    composer: Composer,
    omdb: OmdbConfig,
    default_channel: Option<String>,
    verify_admin_first: bool,
}

impl PostService {
    /// Creates a service over the given provider seams.
    pub fn new(
        config: &ReelpostConfig,
        metadata: Arc<dyn MetadataProvider>,
        chat: Arc<dyn ChatPlatform>,
        probe: Arc<dyn ImageProbe>,
    ) -> Self {
        Self {
            metadata,
            chat,
            probe,
            composer: Composer::new(&config.tmdb, &config.compose),
            omdb: config.omdb.clone(),
            default_channel: config.telegram.default_channel.clone(),
            verify_admin_first: config.delivery.verify_admin_first,
        }
    }

    /// Creates a service talking to the real TMDB and Telegram APIs.
    ///
    /// # Errors
    ///
    /// - `ReelpostError::Configuration` - If the HTTP client cannot be built
    pub fn from_config(config: &ReelpostConfig) -> Result<Self, ReelpostError> {
        let client = build_http_client(&config.network)?;
        Ok(Self::new(
            config,
            Arc::new(TmdbClient::new(client.clone(), config.tmdb.clone())),
            Arc::new(TelegramClient::new(client.clone(), config.telegram.clone())),
            Arc::new(HttpImageProbe::new(client)),
        ))
    }

    pub fn metadata(&self) -> Arc<dyn MetadataProvider> {
        Arc::clone(&self.metadata)
    }

    pub fn chat(&self) -> Arc<dyn ChatPlatform> {
        Arc::clone(&self.chat)
    }

    pub fn default_channel(&self) -> Option<&str> {
        self.default_channel.as_deref()
    }

    /// Runs one post request to a terminal outcome.
    pub async fn publish(&self, request: &PostRequest) -> DeliveryOutcome {
        let post = match request.validate(self.default_channel.as_deref()) {
            Ok(post) => post,
            Err(e) => {
                debug!(field = e.field(), "Post request rejected");
                return DeliveryOutcome::ValidationError(e);
            }
        };

        let outcome = self.publish_validated(&post).await;
        info!(
            media_type = %post.media_type,
            id = post.content_id,
            channel = %post.channel_id,
            outcome = outcome.kind(),
            "Post request finished"
        );
        outcome
    }

    async fn publish_validated(&self, post: &ValidatedPost) -> DeliveryOutcome {
        let (details, external_ids, videos) = tokio::join!(
            self.metadata.details(post.media_type, post.content_id),
            self.metadata.external_ids(post.media_type, post.content_id),
            self.metadata.videos(post.media_type, post.content_id),
        );

        let details = match details {
            Ok(Lookup::Found(details)) => details,
            Ok(Lookup::NotFound) => return DeliveryOutcome::NotFound,
            Err(e) => {
                warn!(error = %e, "Details lookup failed");
                return DeliveryOutcome::NetworkError {
                    reason: e.to_string(),
                };
            }
        };

        let imdb_id = match external_ids {
            Ok(ids) => ids.imdb_id,
            Err(e) => {
                warn!(error = %e, "External ids lookup failed, continuing without");
                None
            }
        };

        let videos = videos.unwrap_or_else(|e| {
            warn!(error = %e, "Videos lookup failed, continuing without trailer");
            Vec::new()
        });

        let composed = self.composer.compose(&PostContext {
            media_type: post.media_type,
            content_id: post.content_id,
            details: &details,
            season: post.season,
            episode: post.episode,
            note: post.note.as_deref(),
            banner_html: post.banner_html.as_deref(),
            custom_link: post.custom_link.as_deref(),
            imdb_id: imdb_id.as_deref(),
            trailer_key: find_trailer(&videos),
        });

        let sources = poster_sources(
            self.composer.links(),
            &self.omdb,
            post.media_type,
            post.content_id,
            details.poster_path.as_deref(),
            imdb_id.as_deref(),
        );

        self.deliver(&post.channel_id, &composed, &sources).await
    }

    /// Walks the delivery chain for an already composed post.
    pub async fn deliver(
        &self,
        channel_id: &str,
        composed: &ComposedPost,
        sources: &[PosterSource],
    ) -> DeliveryOutcome {
        if self.verify_admin_first {
            if let Some(outcome) = check_admin(self.chat.as_ref(), channel_id)
                .await
                .into_outcome()
            {
                return outcome;
            }
        }

        if composed.fits_caption() {
            if let Some(photo_url) = self.try_photos(channel_id, composed, sources).await {
                return DeliveryOutcome::PostedWithPhoto { photo_url };
            }
        } else {
            debug!(len = composed.visible_len(), "Text too long for a caption");
        }

        if !self.verify_admin_first {
            if let Some(outcome) = check_admin(self.chat.as_ref(), channel_id)
                .await
                .into_outcome()
            {
                return outcome;
            }
        }

        match self
            .chat
            .send_message(channel_id, &composed.text, &composed.keyboard)
            .await
        {
            Ok(_) => DeliveryOutcome::PostedTextOnly,
            Err(TelegramError::Rejected(rejection)) => {
                warn!(%rejection, "Text post rejected");
                DeliveryOutcome::Rejected(rejection)
            }
            Err(e) => {
                warn!(error = %e, "Text post failed");
                DeliveryOutcome::NetworkError {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Tries each source in order, returning the URL of the accepted photo.
    async fn try_photos(
        &self,
        channel_id: &str,
        composed: &ComposedPost,
        sources: &[PosterSource],
    ) -> Option<String> {
        for source in sources {
            let Some(url) = self.resolve(source).await else {
                continue;
            };

            match self
                .chat
                .send_photo(channel_id, &url, &composed.text, &composed.keyboard)
                .await
            {
                Ok(_) => {
                    debug!(source = source.label(), "Photo posted");
                    return Some(url);
                }
                Err(e) => {
                    warn!(source = %source, error = %e, "Photo post failed, trying next source");
                }
            }
        }
        None
    }

    async fn resolve(&self, source: &PosterSource) -> Option<String> {
        match source {
            PosterSource::Direct { url, .. } => match self.probe.is_reachable(url).await {
                Ok(true) => Some(url.clone()),
                Ok(false) => {
                    debug!(source = %source, "Poster pre-check failed");
                    None
                }
                Err(e) => {
                    warn!(source = %source, error = %e, "Poster pre-check errored");
                    None
                }
            },
            PosterSource::ImageSearch { media_type, id } => {
                match self.metadata.images(*media_type, *id).await {
                    Ok(images) => images
                        .best()
                        .map(|image| self.composer.links().image("original", &image.file_path)),
                    Err(e) => {
                        warn!(source = %source, error = %e, "Image search failed");
                        None
                    }
                }
            }
        }
    }
}
