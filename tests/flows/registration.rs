use crate::common::{TEST_EMAIL, TEST_USERNAME, spawn_stub_app};
use claims::assert_ok;
use fake::Fake;
use fake::faker::internet::en::{SafeEmail, Username};
use user_flows::flows;

#[tokio::test]
async fn submitting_the_registration_form_lands_on_the_profile_page() {
    // Arrange
    let app = spawn_stub_app().await;

    // Act - open the page, type username and email, submit the form
    let register_page = app
        .browser
        .visit("/register")
        .await
        .expect("Failed to open the registration page");
    let landing = register_page
        .form()
        .expect("The registration page has no form")
        .fill("username", TEST_USERNAME)
        .expect("The registration page has no username input")
        .fill("email", TEST_EMAIL)
        .expect("The registration page has no email input")
        .submit(&app.browser)
        .await
        .expect("Failed to submit the registration form");

    // Assert
    assert!(landing.url().as_str().contains("/profile"));
    assert!(landing.contains(TEST_USERNAME));
    assert!(landing.contains(TEST_EMAIL));
}

#[tokio::test]
async fn the_registration_flow_passes_against_a_conforming_server() {
    let app = spawn_stub_app().await;

    let landing = assert_ok!(flows::register(&app.browser, TEST_USERNAME, TEST_EMAIL).await);

    assert_eq!(landing.path(), "/profile");
}

#[tokio::test]
async fn the_profile_page_echoes_whatever_was_submitted() {
    let app = spawn_stub_app().await;
    let username: String = Username().fake();
    let email: String = SafeEmail().fake();

    let landing = assert_ok!(flows::register(&app.browser, &username, &email).await);

    assert!(landing.contains(&username));
    assert!(landing.contains(&email));
}

#[tokio::test]
async fn the_registration_page_exposes_username_and_email_inputs() {
    let app = spawn_stub_app().await;

    let page = app
        .browser
        .visit("/register")
        .await
        .expect("Failed to open the registration page");

    assert_ok!(
        page.form()
            .and_then(|form| form.fill("username", TEST_USERNAME))
            .and_then(|form| form.fill("email", TEST_EMAIL))
    );
}

#[tokio::test]
async fn logging_in_right_after_registering_sees_the_same_user() {
    let app = spawn_stub_app().await;

    assert_ok!(flows::register(&app.browser, TEST_USERNAME, TEST_EMAIL).await);
    assert_ok!(flows::log_in(&app.browser, TEST_USERNAME).await);
}
