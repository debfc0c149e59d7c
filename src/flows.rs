//! The two user journeys exercised against the application under test:
//! logging in an existing user and registering a new one. Each one drives
//! the browser through the same steps a person would take and enforces the
//! success contract of the server: a redirect to the profile page that
//! echoes the submitted details.

use crate::browser::{Browser, BrowserError, Page};
use reqwest::Url;

/// URL fragment every successful flow must land on.
const PROFILE_FRAGMENT: &str = "/profile";

#[derive(thiserror::Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Browser(#[from] BrowserError),
    #[error("expected to land on a URL containing `{expected}`, ended up at {actual}")]
    WrongDestination { expected: &'static str, actual: Url },
    #[error("page at {url} does not show `{needle}`")]
    MissingText { url: Url, needle: String },
}

/// Log an existing user in: open `/login`, type the username, submit, and
/// verify the server lands us on the profile page greeting that user.
#[tracing::instrument(skip(browser))]
pub async fn log_in(browser: &Browser, username: &str) -> Result<Page, FlowError> {
    let login_page = browser.visit("/login").await?;
    let landing = login_page
        .form()?
        .fill("username", username)?
        .submit(browser)
        .await?;
    expect_destination(&landing, PROFILE_FRAGMENT)?;
    expect_text(&landing, username)?;
    tracing::info!(url = %landing.url(), "login flow landed on the profile page");
    Ok(landing)
}

/// Register a new user: open `/register`, type username and email, submit,
/// and verify the profile page echoes both back.
#[tracing::instrument(skip(browser))]
pub async fn register(browser: &Browser, username: &str, email: &str) -> Result<Page, FlowError> {
    let register_page = browser.visit("/register").await?;
    let landing = register_page
        .form()?
        .fill("username", username)?
        .fill("email", email)?
        .submit(browser)
        .await?;
    expect_destination(&landing, PROFILE_FRAGMENT)?;
    expect_text(&landing, username)?;
    expect_text(&landing, email)?;
    tracing::info!(url = %landing.url(), "registration flow landed on the profile page");
    Ok(landing)
}

fn expect_destination(page: &Page, expected: &'static str) -> Result<(), FlowError> {
    if page.url().as_str().contains(expected) {
        Ok(())
    } else {
        Err(FlowError::WrongDestination {
            expected,
            actual: page.url().clone(),
        })
    }
}

fn expect_text(page: &Page, needle: &str) -> Result<(), FlowError> {
    if page.contains(needle) {
        Ok(())
    } else {
        Err(FlowError::MissingText {
            url: page.url().clone(),
            needle: needle.to_string(),
        })
    }
}
