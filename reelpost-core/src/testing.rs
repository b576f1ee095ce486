//! In-memory fakes of the provider seams.
//!
//! Available to this crate's tests and, through the `test-utils` feature, to
//! the web crate and the integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::metadata::{
    ContentDetails, ExternalIds, ImageSet, Lookup, MediaType, MetadataProvider, SearchHit,
    TmdbError, Video,
};
use crate::network::ImageProbe;
use crate::telegram::{
    Chat, ChatMember, ChatPlatform, InlineKeyboardMarkup, Message, PlatformRejection,
    TelegramError, User,
};

type TitleKey = (MediaType, u64);

fn fake_failure() -> TmdbError {
    TmdbError::Api {
        status_code: 500,
        message: "fake provider failure".to_string(),
    }
}

/// Metadata provider answering from preloaded titles.
///
/// Unknown titles are `Lookup::NotFound`; unknown extras are empty.
#[derive(Debug, Default)]
pub struct FakeMetadata {
    search_hits: Vec<SearchHit>,
    details: HashMap<TitleKey, ContentDetails>,
    external_ids: HashMap<TitleKey, ExternalIds>,
    videos: HashMap<TitleKey, Vec<Video>>,
    images: HashMap<TitleKey, ImageSet>,
    fail_search: bool,
    fail_details: bool,
    fail_extras: bool,
    queries: Mutex<Vec<String>>,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.search_hits = hits;
        self
    }

    pub fn with_details(mut self, media_type: MediaType, id: u64, details: ContentDetails) -> Self {
        self.details.insert((media_type, id), details);
        self
    }

    pub fn with_external_ids(mut self, media_type: MediaType, id: u64, ids: ExternalIds) -> Self {
        self.external_ids.insert((media_type, id), ids);
        self
    }

    pub fn with_videos(mut self, media_type: MediaType, id: u64, videos: Vec<Video>) -> Self {
        self.videos.insert((media_type, id), videos);
        self
    }

    pub fn with_images(mut self, media_type: MediaType, id: u64, images: ImageSet) -> Self {
        self.images.insert((media_type, id), images);
        self
    }

    /// Search requests fail as if the provider were down.
    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    /// Details requests fail as if the provider were down.
    pub fn failing_details(mut self) -> Self {
        self.fail_details = true;
        self
    }

    /// External id, video and image requests fail.
    pub fn failing_extras(mut self) -> Self {
        self.fail_extras = true;
        self
    }

    /// Queries received by `search_multi`, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl MetadataProvider for FakeMetadata {
    async fn search_multi(&self, query: &str) -> Result<Vec<SearchHit>, TmdbError> {
        self.queries.lock().push(query.to_string());
        if self.fail_search {
            return Err(fake_failure());
        }
        Ok(self.search_hits.clone())
    }

    async fn details(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<Lookup<ContentDetails>, TmdbError> {
        if self.fail_details {
            return Err(fake_failure());
        }
        Ok(self
            .details
            .get(&(media_type, id))
            .cloned()
            .map_or(Lookup::NotFound, Lookup::Found))
    }

    async fn external_ids(&self, media_type: MediaType, id: u64) -> Result<ExternalIds, TmdbError> {
        if self.fail_extras {
            return Err(fake_failure());
        }
        Ok(self
            .external_ids
            .get(&(media_type, id))
            .cloned()
            .unwrap_or_default())
    }

    async fn videos(&self, media_type: MediaType, id: u64) -> Result<Vec<Video>, TmdbError> {
        if self.fail_extras {
            return Err(fake_failure());
        }
        Ok(self.videos.get(&(media_type, id)).cloned().unwrap_or_default())
    }

    async fn images(&self, media_type: MediaType, id: u64) -> Result<ImageSet, TmdbError> {
        if self.fail_extras {
            return Err(fake_failure());
        }
        Ok(self.images.get(&(media_type, id)).cloned().unwrap_or_default())
    }
}

/// What kind of message the fake chat accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentKind {
    Photo { url: String },
    Text,
}

/// A message the fake chat accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub chat_id: String,
    pub kind: SentKind,
    pub text: String,
    pub keyboard: InlineKeyboardMarkup,
}

#[derive(Debug, Default)]
struct ChatLog {
    sent: Vec<SentMessage>,
    photo_attempts: Vec<String>,
    callback_answers: Vec<(String, Option<String>)>,
}

/// Messaging platform recording every call.
///
/// Channels without a configured membership answer `getChatMember` with the
/// platform's "member not found" refusal, like a channel the bot was never
/// added to.
#[derive(Debug)]
pub struct FakeChat {
    bot: Option<User>,
    members: HashMap<String, Result<String, PlatformRejection>>,
    rejected_photos: HashSet<String>,
    reject_all_photos: bool,
    text_rejection: Option<PlatformRejection>,
    next_message_id: AtomicI64,
    log: Mutex<ChatLog>,
}

impl Default for FakeChat {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeChat {
    pub fn new() -> Self {
        Self {
            bot: Some(Self::bot_user()),
            members: HashMap::new(),
            rejected_photos: HashSet::new(),
            reject_all_photos: false,
            text_rejection: None,
            next_message_id: AtomicI64::new(1),
            log: Mutex::new(ChatLog::default()),
        }
    }

    /// The identity `getMe` reports.
    pub fn bot_user() -> User {
        User {
            id: 4242,
            is_bot: true,
            first_name: "Reelpost Test".to_string(),
            username: Some("reelpost_test_bot".to_string()),
        }
    }

    pub fn with_member_status(mut self, chat_id: &str, status: &str) -> Self {
        self.members
            .insert(chat_id.to_string(), Ok(status.to_string()));
        self
    }

    pub fn with_member_rejection(mut self, chat_id: &str, rejection: PlatformRejection) -> Self {
        self.members.insert(chat_id.to_string(), Err(rejection));
        self
    }

    /// `getMe` fails.
    pub fn without_identity(mut self) -> Self {
        self.bot = None;
        self
    }

    pub fn rejecting_photo(mut self, url: &str) -> Self {
        self.rejected_photos.insert(url.to_string());
        self
    }

    pub fn rejecting_all_photos(mut self) -> Self {
        self.reject_all_photos = true;
        self
    }

    pub fn rejecting_text(mut self, rejection: PlatformRejection) -> Self {
        self.text_rejection = Some(rejection);
        self
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.log.lock().sent.clone()
    }

    /// Every `sendPhoto` URL, accepted or not.
    pub fn photo_attempts(&self) -> Vec<String> {
        self.log.lock().photo_attempts.clone()
    }

    /// Callback query ids answered, with their text.
    pub fn callback_answers(&self) -> Vec<(String, Option<String>)> {
        self.log.lock().callback_answers.clone()
    }

    fn accept(&self, chat_id: &str, kind: SentKind, text: &str, markup: &InlineKeyboardMarkup) -> Message {
        self.log.lock().sent.push(SentMessage {
            chat_id: chat_id.to_string(),
            kind,
            text: text.to_string(),
            keyboard: markup.clone(),
        });

        Message {
            message_id: self.next_message_id.fetch_add(1, Ordering::Relaxed),
            chat: Chat {
                id: chat_id.parse().unwrap_or_default(),
                kind: Some("channel".to_string()),
            },
            from: self.bot.clone(),
            text: Some(text.to_string()),
        }
    }
}

#[async_trait]
impl ChatPlatform for FakeChat {
    async fn send_photo(
        &self,
        chat_id: &str,
        photo_url: &str,
        caption: &str,
        markup: &InlineKeyboardMarkup,
    ) -> Result<Message, TelegramError> {
        self.log.lock().photo_attempts.push(photo_url.to_string());

        if self.reject_all_photos || self.rejected_photos.contains(photo_url) {
            return Err(TelegramError::Rejected(PlatformRejection::Other {
                error_code: Some(400),
                description: "Bad Request: wrong file identifier/HTTP URL specified".to_string(),
            }));
        }

        let kind = SentKind::Photo {
            url: photo_url.to_string(),
        };
        Ok(self.accept(chat_id, kind, caption, markup))
    }

    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        markup: &InlineKeyboardMarkup,
    ) -> Result<Message, TelegramError> {
        if let Some(rejection) = &self.text_rejection {
            return Err(TelegramError::Rejected(rejection.clone()));
        }
        Ok(self.accept(chat_id, SentKind::Text, text, markup))
    }

    async fn get_me(&self) -> Result<User, TelegramError> {
        self.bot.clone().ok_or_else(|| TelegramError::Parse {
            status: 502,
            reason: "fake getMe failure".to_string(),
        })
    }

    async fn get_chat_member(&self, chat_id: &str, user_id: i64) -> Result<ChatMember, TelegramError> {
        let user = self
            .bot
            .clone()
            .filter(|bot| bot.id == user_id)
            .unwrap_or_else(|| User {
                id: user_id,
                is_bot: false,
                first_name: String::new(),
                username: None,
            });

        match self.members.get(chat_id) {
            Some(Ok(status)) => Ok(ChatMember {
                status: status.clone(),
                user,
            }),
            Some(Err(rejection)) => Err(TelegramError::Rejected(rejection.clone())),
            None => Err(TelegramError::Rejected(PlatformRejection::Other {
                error_code: Some(400),
                description: "Bad Request: member not found".to_string(),
            })),
        }
    }

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError> {
        self.log
            .lock()
            .callback_answers
            .push((callback_query_id.to_string(), text.map(str::to_string)));
        Ok(())
    }
}

/// Poster probe reporting a fixed set of URLs as reachable.
///
/// Clones share the probe log.
#[derive(Debug, Clone, Default)]
pub struct FakeProbe {
    reachable: Arc<HashSet<String>>,
    probed: Arc<Mutex<Vec<String>>>,
}

impl FakeProbe {
    pub fn reachable<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reachable: Arc::new(urls.into_iter().map(Into::into).collect()),
            probed: Arc::default(),
        }
    }

    /// URLs probed so far, in order.
    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().clone()
    }
}

#[async_trait]
impl ImageProbe for FakeProbe {
    async fn is_reachable(&self, url: &str) -> Result<bool, reqwest::Error> {
        self.probed.lock().push(url.to_string());
        Ok(self.reachable.contains(url))
    }
}
