//! Placeholder credential check.
//!
//! The application under test owns the real account lookup; this stub only
//! preserves the canned messages used while the harness was being wired up.
//! The flows never call it.

/// Classify a username against the canned rule: `admin` is greeted,
/// every other username is rejected.
pub fn login_message(username: &str) -> &'static str {
    if username == "admin" {
        "Welcome, admin!"
    } else {
        "Login failed"
    }
}
