//! Photo-media service (JSON over GET).

use crate::config::ServicesConfig;
use crate::deserializer::{
    Deserializer, FeedDeserializer, StatusDeserializer, StatusLayout, SuccessSentinel, lookup,
};
use crate::error::AdapterError;
use crate::executor::{HttpExecutor, RequestDescriptor, RequestExecutor};

use common::{ErrorLocation, RedactedApiKey};

use std::panic::Location;

use log::warn;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use tokio::sync::OnceCell;

pub const MEDIA_SERVICE: &str = "media";

const ACCESS_TOKEN_PARAM: &str = "access_token";
const RECENT_MEDIA_ENDPOINT: &str = "users/self/media/recent";

// Everything but the unreserved characters, so an id stays one path segment.
const USER_ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

// ============================================
// DESERIALIZERS
// ============================================

/// A page of media with the service's `meta` status block.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFeed {
    raw: Value,
}

impl MediaFeed {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    #[track_caller]
    pub fn parse(body: &str) -> Result<Self, AdapterError> {
        Ok(Self::new(serde_json::from_str(body)?))
    }

    pub fn items_with_location_present(&self) -> Vec<MediaItem<'_>> {
        self.filter_items(MediaItem::has_location)
    }
}

impl Deserializer for MediaFeed {
    fn raw(&self) -> &Value {
        &self.raw
    }
}

impl StatusDeserializer for MediaFeed {
    const STATUS: StatusLayout = StatusLayout {
        container: "meta",
        code: "code",
        message: "error_message",
        success: SuccessSentinel::Code(200),
    };
}

impl FeedDeserializer for MediaFeed {
    const COLLECTION: &'static str = "data";

    type Item<'a> = MediaItem<'a>;
}

/// One media element, borrowed from its feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaItem<'a> {
    raw: &'a Value,
}

impl<'a> From<&'a Value> for MediaItem<'a> {
    fn from(raw: &'a Value) -> Self {
        Self { raw }
    }
}

impl Deserializer for MediaItem<'_> {
    fn raw(&self) -> &Value {
        self.raw
    }
}

impl<'a> MediaItem<'a> {
    pub fn id(&self) -> Option<&'a str> {
        self.text(&["id"])
    }

    /// Caption text.
    pub fn name(&self) -> Option<&'a str> {
        self.text(&["caption", "text"])
    }

    pub fn image_url(&self) -> Option<&'a str> {
        self.text(&["images", "standard_resolution", "url"])
    }

    pub fn location_name(&self) -> Option<&'a str> {
        self.text(&["location", "name"])
    }

    pub fn has_location(&self) -> bool {
        self.field(&["location"]).is_some()
    }

    // Borrows from the feed, not from this wrapper.
    fn text(&self, path: &[&str]) -> Option<&'a str> {
        lookup(self.raw, path).and_then(Value::as_str)
    }
}

// ============================================
// ADAPTER
// ============================================

pub struct MediaAdapter<E> {
    executor: E,
    access_token: RedactedApiKey,
    recent_media: OnceCell<MediaFeed>,
}

impl MediaAdapter<HttpExecutor> {
    /// Build from the `media` entry of `config`.
    pub fn from_config(config: &ServicesConfig) -> Result<Self, AdapterError> {
        let service = config.service(MEDIA_SERVICE)?;
        let access_token = service.credential()?;
        let executor = HttpExecutor::from_config(service)?;

        Ok(Self::new(executor, access_token))
    }
}

impl<E: RequestExecutor> MediaAdapter<E> {
    pub fn new(executor: E, access_token: RedactedApiKey) -> Self {
        Self {
            executor,
            access_token,
            recent_media: OnceCell::new(),
        }
    }

    /// The authenticated user's recent media.
    ///
    /// Fetched once per adapter; later calls reuse the first successful
    /// response until [`MediaAdapter::invalidate`].
    pub async fn recent_media(&self) -> Result<&MediaFeed, AdapterError> {
        self.recent_media
            .get_or_try_init(|| self.fetch(RECENT_MEDIA_ENDPOINT.to_string()))
            .await
    }

    pub async fn recent_media_with_location(&self) -> Result<Vec<MediaItem<'_>>, AdapterError> {
        Ok(self.recent_media().await?.items_with_location_present())
    }

    /// Recent media for another user. Not memoized.
    ///
    /// `user_id` is percent-encoded into a single path segment; empty, `.` and
    /// `..` ids are refused.
    pub async fn user_media(&self, user_id: &str) -> Result<MediaFeed, AdapterError> {
        let segment = user_segment(user_id)?;
        self.fetch(format!("users/{segment}/media/recent")).await
    }

    /// Drop the memoized feed so the next call hits the service again.
    pub fn invalidate(&mut self) {
        self.recent_media.take();
    }

    async fn fetch(&self, endpoint: String) -> Result<MediaFeed, AdapterError> {
        let request = RequestDescriptor::get(endpoint)
            .with_query(ACCESS_TOKEN_PARAM, self.access_token.as_str());

        let body = self.executor.execute(request).await?;
        let feed = MediaFeed::parse(&body)?;

        if feed.is_failed() {
            warn!(
                "Media service reported failure: {:?} {}",
                feed.status_code(),
                feed.status_message().unwrap_or_default()
            );
        }

        Ok(feed)
    }
}

#[track_caller]
fn user_segment(user_id: &str) -> Result<String, AdapterError> {
    if matches!(user_id, "" | "." | "..") {
        return Err(AdapterError::InvalidArgument {
            message: format!("'{user_id}' is not a usable user id"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(utf8_percent_encode(user_id, USER_ID_SEGMENT).to_string())
}
