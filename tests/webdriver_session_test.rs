// End-to-end checks against a real browser
// Run with a WebDriver listening (geckodriver --port 4444):
//   cargo test --test webdriver_session_test -- --ignored

use serial_test::serial;
use webassert::{PageVerifier, SessionContext, Settings, WebDriverSession, WebassertError};

const PAGE: &str = "data:text/html,<html><body>\
    <h1 id='title' style='color: green;'>Title</h1>\
    <p class='note'>one</p><p class='note'>two</p>\
    </body></html>";

async fn open() -> PageVerifier<WebDriverSession> {
    let settings = Settings::from_env().expect("settings");
    let session = WebDriverSession::connect(&settings)
        .await
        .expect("WebDriver must be running for ignored tests");
    session.goto(PAGE).await.expect("navigate");
    PageVerifier::new(session)
}

#[tokio::test]
#[serial]
#[ignore = "requires a running WebDriver"]
async fn test_assertions_on_live_page() {
    let verifier = open().await;

    verifier
        .assert_page_contains("id:title", Some("heading"), None, Some("TRACE"))
        .await
        .unwrap();
    let err = verifier
        .assert_page_contains("css:.absent", None, None, Some("NONE"))
        .await
        .unwrap_err();
    assert!(matches!(err, WebassertError::AssertionFailure(_)));

    verifier.into_session().close().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires a running WebDriver"]
async fn test_highlight_round_trip_on_live_page() {
    let mut verifier = open().await;

    verifier.highlight_element("id:title").await.unwrap();
    verifier.apply_original_style("id:title").await.unwrap();

    let session = verifier.into_session();
    let title = session
        .find_element("id:title", None, true)
        .await
        .unwrap()
        .unwrap();
    let style = session.get_attribute(&title, "style").await.unwrap();
    assert_eq!(style.as_deref(), Some("color: green;"));

    session.close().await.unwrap();
}
