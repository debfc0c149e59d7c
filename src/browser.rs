//! A minimal stand-in for a real browser.
//!
//! It keeps cookies between requests, follows redirects by hand so every
//! hop stays observable, and submits forms as
//! `application/x-www-form-urlencoded` payloads, which is all the flows
//! under test require from a user agent.

use reqwest::header::LOCATION;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

/// Upper bound on the redirect chain followed after a navigation or a form
/// submission. The flows under test use a single hop; anything deeper is a
/// misbehaving server.
const MAX_REDIRECT_HOPS: usize = 10;

#[derive(thiserror::Error, Debug)]
pub enum BrowserError {
    #[error("`{0}` is not a valid base URL")]
    InvalidBaseUrl(String, #[source] url::ParseError),
    #[error("failed to build the HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with unexpected status {status}")]
    UnexpectedStatus { url: Url, status: StatusCode },
    #[error("redirect from {url} carries no usable Location header")]
    MissingLocation { url: Url },
    #[error("redirect chain exceeded the hop limit, last stop was {url}")]
    TooManyRedirects { url: Url },
    #[error("no form found on {url}")]
    FormNotFound { url: Url },
    #[error("no input named `{name}` on {url}")]
    FieldNotFound { name: String, url: Url },
}

#[derive(Debug, Clone)]
pub struct Browser {
    client: Client,
    base_url: Url,
}

impl Browser {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BrowserError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BrowserError::InvalidBaseUrl(base_url.to_string(), e))?;
        let client = Client::builder()
            // Redirects are followed manually in `settle`.
            .redirect(reqwest::redirect::Policy::none())
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(BrowserError::Client)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Navigate to a path resolved against the base URL and follow redirects
    /// until a terminal page arrives.
    #[tracing::instrument(skip(self))]
    pub async fn visit(&self, path: &str) -> Result<Page, BrowserError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| BrowserError::InvalidBaseUrl(path.to_string(), e))?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| BrowserError::Transport { url, source })?;
        self.settle(response).await
    }

    pub(crate) async fn submit_form(
        &self,
        url: Url,
        fields: &[(String, String)],
    ) -> Result<Page, BrowserError> {
        let response = self
            .client
            .post(url.clone())
            .form(fields)
            .send()
            .await
            .map_err(|source| BrowserError::Transport { url, source })?;
        self.settle(response).await
    }

    /// Walk the redirect chain of `response` down to a terminal page.
    async fn settle(&self, mut response: reqwest::Response) -> Result<Page, BrowserError> {
        for _ in 0..MAX_REDIRECT_HOPS {
            if !response.status().is_redirection() {
                return Page::from_response(response).await;
            }
            let current = response.url().clone();
            let target = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| BrowserError::MissingLocation {
                    url: current.clone(),
                })?;
            // Relative `Location` values resolve against the URL that issued them.
            let next = current
                .join(target)
                .map_err(|_| BrowserError::MissingLocation {
                    url: current.clone(),
                })?;
            response = self
                .client
                .get(next.clone())
                .send()
                .await
                .map_err(|source| BrowserError::Transport { url: next, source })?;
        }
        Err(BrowserError::TooManyRedirects {
            url: response.url().clone(),
        })
    }
}

/// The terminal result of a navigation: where we ended up and what the
/// server rendered there.
#[derive(Debug)]
pub struct Page {
    url: Url,
    status: StatusCode,
    body: String,
}

impl Page {
    async fn from_response(response: reqwest::Response) -> Result<Self, BrowserError> {
        let url = response.url().clone();
        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::UnexpectedStatus { url, status });
        }
        let body = response
            .text()
            .await
            .map_err(|source| BrowserError::Transport {
                url: url.clone(),
                source,
            })?;
        Ok(Self { url, status, body })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Path component of the final URL.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Substring check over the raw page body, the assertion primitive of
    /// the flows.
    pub fn contains(&self, text: &str) -> bool {
        self.body.contains(text)
    }

    /// Start filling in the form on this page.
    pub fn form(&self) -> Result<Form<'_>, BrowserError> {
        if !self.body.contains("<form") {
            return Err(BrowserError::FormNotFound {
                url: self.url.clone(),
            });
        }
        Ok(Form {
            page: self,
            fields: Vec::new(),
        })
    }

    fn has_input(&self, name: &str) -> bool {
        // An attribute scan, not a DOM parse. It is enough to catch a
        // renamed or missing field before submitting garbage at the server.
        self.body.contains(&format!("name=\"{name}\""))
            || self.body.contains(&format!("name='{name}'"))
    }
}

/// Values typed into a page's form, waiting to be submitted.
#[derive(Debug)]
pub struct Form<'a> {
    page: &'a Page,
    fields: Vec<(String, String)>,
}

impl Form<'_> {
    /// Record a value for a named input, verifying the input exists on the
    /// page first.
    pub fn fill(mut self, name: &str, value: &str) -> Result<Self, BrowserError> {
        if !self.page.has_input(name) {
            return Err(BrowserError::FieldNotFound {
                name: name.to_string(),
                url: self.page.url.clone(),
            });
        }
        self.fields.push((name.to_string(), value.to_string()));
        Ok(self)
    }

    /// Submit the collected fields to the page's own URL and follow the
    /// server wherever it redirects.
    pub async fn submit(self, browser: &Browser) -> Result<Page, BrowserError> {
        browser.submit_form(self.page.url.clone(), &self.fields).await
    }
}
