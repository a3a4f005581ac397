use crate::error::FetchError;
use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, trace};

/// Raw HTTP response handed to the extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of web pages for content extraction
pub trait PageFetcher {
    /// Issue a single GET for `url`. Non-2xx responses are returned as pages;
    /// the caller decides what counts as failure.
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Production fetcher backed by a blocking reqwest client
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    timeout: Duration,
    user_agent: String,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            timeout,
            user_agent: user_agent.into(),
        }
    }
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        let fetch = crate::config::FetchConfig::default();
        Self::new(fetch.timeout(), fetch.user_agent)
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        // Built per request so constructing a session never touches TLS setup
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        debug!(url, timeout = ?self.timeout, "fetching page");
        let response = client.get(url).send().map_err(|e| {
            if e.is_builder() {
                FetchError::InvalidUrl(e.to_string())
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        trace!(url, status, bytes = body.len(), "page received");

        Ok(FetchedPage { status, body })
    }
}

#[derive(Debug, Clone)]
enum Canned {
    Page(FetchedPage),
    Failure(String),
}

/// In-memory fetcher serving canned responses, for tests and offline runs.
///
/// Unknown URLs answer with a 404 page.
#[derive(Debug, Clone, Default)]
pub struct StaticPageFetcher {
    responses: HashMap<String, Canned>,
}

impl StaticPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), Canned::Page(FetchedPage::ok(body)));
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(
            url.into(),
            Canned::Page(FetchedPage {
                status,
                body: String::new(),
            }),
        );
        self
    }

    pub fn with_failure(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), Canned::Failure(message.into()));
        self
    }
}

impl PageFetcher for StaticPageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        match self.responses.get(url) {
            Some(Canned::Page(page)) => Ok(page.clone()),
            Some(Canned::Failure(message)) => Err(FetchError::Transport(message.clone())),
            None => Ok(FetchedPage {
                status: 404,
                body: String::new(),
            }),
        }
    }
}
