// src/event_source.rs
use crate::config::Config;
use crate::errors::EventError;
use crate::event::{Event, EventDraft, EventId};
use crate::event_factory::{CreatedPost, EventFactory, NewPost, RemotePost};
use async_trait::async_trait;
use log::info;
use reqwest::{Client, Response, StatusCode};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

// ===== source
/// The three remote operations. Each performs at most one round trip and
/// never retries.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn list(&self) -> Result<Vec<Event>, EventError>;

    async fn get_by_id(&self, id: &EventId) -> Result<Event, EventError>;

    async fn create(&self, draft: &EventDraft) -> Result<Event, EventError>;
}

// ===== Live http source
pub struct HttpEventSource {
    client: Client,
    posts_url: Url,
    list_limit: usize,
    owner_id: u64,
}

impl HttpEventSource {
    pub fn new(config: &Config) -> Result<Self, EventError> {
        const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

        let client: Client =
            Client::builder().user_agent(APP_USER_AGENT).timeout(config.timeout()).build()?;

        let endpoint = format!("{}/posts", config.base_url());
        let posts_url = Url::parse(&endpoint).map_err(|e| EventError::InvalidUrl(e.to_string()))?;
        if posts_url.cannot_be_a_base() {
            return Err(EventError::InvalidUrl(endpoint));
        }

        Ok(Self {
            client,
            posts_url,
            list_limit: config.list_limit(),
            owner_id: config.owner_id(),
        })
    }

    fn posts_url(&self) -> Url {
        self.posts_url.clone()
    }

    /// The id becomes a single percent-encoded path segment.
    fn post_url(&self, id: &EventId) -> Url {
        let mut url = self.posts_url.clone();
        // Checked in `new`: the endpoint can always take path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }
}

fn ensure_success(response: Response) -> Result<Response, EventError> {
    let status: StatusCode = response.status();
    if status.is_success() { Ok(response) } else { Err(EventError::HttpStatus(status)) }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn list(&self) -> Result<Vec<Event>, EventError> {
        let url = self.posts_url();
        info!("HttpEventSource: fetching {} (limit {})", url, self.list_limit);
        let response: Response =
            self.client.get(url).query(&[("_limit", self.list_limit)]).send().await?;
        let posts: Vec<RemotePost> = ensure_success(response)?.json().await?;
        Ok(EventFactory::summaries().create_events(posts))
    }

    async fn get_by_id(&self, id: &EventId) -> Result<Event, EventError> {
        let url = self.post_url(id);
        info!("HttpEventSource: fetching {}", url);
        let response: Response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(EventError::NotFound(id.clone()));
        }
        let post: RemotePost = ensure_success(response)?.json().await?;
        Ok(EventFactory::new().create_event(post))
    }

    async fn create(&self, draft: &EventDraft) -> Result<Event, EventError> {
        draft.validate()?;
        let url = self.posts_url();
        info!("HttpEventSource: creating event '{}' at {}", draft.title, url);
        let body = NewPost { title: &draft.title, body: &draft.description, user_id: self.owner_id };
        // `json` keeps a content type that is already set.
        let response: Response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json; charset=UTF-8")
            .json(&body)
            .send()
            .await?;
        let created: CreatedPost = ensure_success(response)?.json().await?;
        Ok(EventFactory::new().create_from_draft(created, draft))
    }
}

// ===== Fake event source for testing
/// In-memory source. Every call is counted, including failed ones.
#[derive(Default)]
pub struct FakeEventSource {
    pub events: Vec<Event>,
    pub fail_status: Option<StatusCode>,
    pub created_id: Option<EventId>,
    requests: AtomicUsize,
    created: Mutex<Vec<EventDraft>>,
}

impl FakeEventSource {
    pub fn with_events(events: Vec<Event>) -> Self {
        Self { events, ..Self::default() }
    }

    pub fn with_created_id(mut self, id: EventId) -> Self {
        self.created_id = Some(id);
        self
    }

    pub fn failing(status: StatusCode) -> Self {
        Self { fail_status: Some(status), ..Self::default() }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn created_drafts(&self) -> Vec<EventDraft> {
        self.created.lock().map(|drafts| drafts.clone()).unwrap_or_default()
    }

    fn round_trip(&self) -> Result<(), EventError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.fail_status {
            Some(status) => Err(EventError::HttpStatus(status)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EventSource for FakeEventSource {
    async fn list(&self) -> Result<Vec<Event>, EventError> {
        self.round_trip()?;
        Ok(self.events.clone())
    }

    async fn get_by_id(&self, id: &EventId) -> Result<Event, EventError> {
        if self.fail_status == Some(StatusCode::NOT_FOUND) {
            self.requests.fetch_add(1, Ordering::SeqCst);
            return Err(EventError::NotFound(id.clone()));
        }
        self.round_trip()?;
        self.events
            .iter()
            .find(|event| event.id() == id)
            .cloned()
            .ok_or_else(|| EventError::NotFound(id.clone()))
    }

    async fn create(&self, draft: &EventDraft) -> Result<Event, EventError> {
        draft.validate()?;
        self.round_trip()?;
        if let Ok(mut drafts) = self.created.lock() {
            drafts.push(draft.clone());
        }
        let created = CreatedPost {
            id: self.created_id.clone(),
            title: Some(draft.title.clone()),
            body: Some(draft.description.clone()),
        };
        Ok(EventFactory::new().create_from_draft(created, draft))
    }
}
