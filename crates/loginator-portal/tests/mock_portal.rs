//! Mock portal tests.
//!
//! These tests use wiremock to play both the connectivity-check endpoint and
//! the captive portal, so the whole login flow runs without a real network.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use loginator_core::error::ParseError;
use loginator_core::{
    CredentialStore, Credentials, Error, NetworkIsolation, PortalConfig, PortalSession,
    ProbeResult, Result,
};
use loginator_portal::{CycleOutcome, LoginOutcome, Loginator};
use loginator_store::{PlainCredentialStore, SessionStore};

const LOGIN_PAGE: &str = r#"
<html><body>
  <form method="post" action="login">
    <input type="hidden" name="redirect" value="1">
    <input type="text" name="username">
    <input type="password" name="password">
  </form>
</body></html>
"#;

const WELCOME_PAGE: &str = r#"
<html><body>
  Logged in. <a href="http://10.0.0.1/keepalive?tok999">Keep this window open</a>
</body></html>
"#;

struct Harness {
    server: MockServer,
    dir: TempDir,
    isolation: RecordingIsolation,
}

impl Harness {
    async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            dir: TempDir::new().unwrap(),
            isolation: RecordingIsolation::connected(),
        }
    }

    fn credentials(&self) -> PlainCredentialStore {
        PlainCredentialStore::new(self.dir.path().join("credentials.json"))
    }

    fn sessions(&self) -> SessionStore {
        SessionStore::new(self.dir.path().join("session.json"))
    }

    fn loginator(&self) -> Loginator {
        let config = PortalConfig::with_probe_url(format!("{}/generate_204", self.server.uri()))
            .unwrap();
        Loginator::new(config, Box::new(self.credentials()), self.sessions())
            .unwrap()
            .with_isolation(Box::new(self.isolation.clone()))
    }

    async fn mount_portal_probe(&self) {
        let redirect = format!(
            r#"<html><script>window.location="{}/portal";</script></html>"#,
            self.server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/generate_204"))
            .respond_with(ResponseTemplate::new(200).set_body_string(redirect))
            .mount(&self.server)
            .await;
    }

    async fn mount_online_probe(&self) {
        Mock::given(method("GET"))
            .and(path("/generate_204"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    async fn mount_login_page(&self, html: &str) {
        Mock::given(method("GET"))
            .and(path("/portal"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&self.server)
            .await;
    }
}

/// Isolation tool that records every toggle.
#[derive(Clone)]
struct RecordingIsolation {
    connected: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingIsolation {
    fn connected() -> Self {
        Self {
            connected: Arc::new(Mutex::new(true)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl NetworkIsolation for RecordingIsolation {
    fn name(&self) -> &str {
        "recording"
    }

    fn is_connected(&self) -> bool {
        *self.connected.lock().unwrap()
    }

    fn disconnect(&self) -> Result<()> {
        self.calls.lock().unwrap().push("disconnect");
        *self.connected.lock().unwrap() = false;
        Ok(())
    }

    fn connect(&self) -> Result<()> {
        self.calls.lock().unwrap().push("connect");
        *self.connected.lock().unwrap() = true;
        Ok(())
    }
}

// ============================================================================
// Probe Tests
// ============================================================================

#[tokio::test]
async fn test_probe_no_content_is_online() {
    let h = Harness::new().await;
    Mock::given(method("GET"))
        .and(path("/generate_204"))
        .respond_with(ResponseTemplate::new(204).set_body_string("ignored"))
        .mount(&h.server)
        .await;

    assert_eq!(h.loginator().probe().await.unwrap(), ProbeResult::Online);
}

#[tokio::test]
async fn test_probe_javascript_redirect() {
    let h = Harness::new().await;
    Mock::given(method("GET"))
        .and(path("/generate_204"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<script>window.location="http://x/y"</script>"#),
        )
        .mount(&h.server)
        .await;

    assert_eq!(
        h.loginator().probe().await.unwrap(),
        ProbeResult::RedirectTo("http://x/y".to_string())
    );
}

#[tokio::test]
async fn test_probe_without_marker_is_parse_error() {
    let h = Harness::new().await;
    Mock::given(method("GET"))
        .and(path("/generate_204"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
        .mount(&h.server)
        .await;

    let err = h.loginator().probe().await.unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::NoRedirect)));
}

#[tokio::test]
async fn test_probe_unreachable_is_network_error() {
    let h = Harness::new().await;
    // Bind and release a port so nothing is listening on it.
    let closed = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let config =
        PortalConfig::with_probe_url(format!("http://{}/generate_204", closed)).unwrap();
    let loginator = Loginator::new(config, Box::new(h.credentials()), h.sessions()).unwrap();

    let err = loginator.probe().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)), "got {err:?}");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_end_to_end() {
    let h = Harness::new().await;
    h.mount_portal_probe().await;
    h.mount_login_page(LOGIN_PAGE).await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string("redirect=1&username=alice&password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WELCOME_PAGE))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h
        .loginator()
        .login(Some("alice"), Some("secret"))
        .await
        .unwrap();

    assert!(outcome.is_logged_in(), "got {outcome:?}");
    assert_eq!(
        h.sessions().load().unwrap(),
        PortalSession::new("10.0.0.1", "tok999")
    );
    assert_eq!(h.isolation.calls(), vec!["disconnect", "connect"]);
}

#[tokio::test]
async fn test_login_uses_first_stored_user() {
    let h = Harness::new().await;
    h.credentials()
        .store(&Credentials::new("alice", "secret"))
        .unwrap();
    h.credentials()
        .store(&Credentials::new("bob", "hunter2"))
        .unwrap();

    h.mount_portal_probe().await;
    h.mount_login_page(LOGIN_PAGE).await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string("redirect=1&username=alice&password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WELCOME_PAGE))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h.loginator().login(None, None).await.unwrap();
    assert!(outcome.is_logged_in(), "got {outcome:?}");
}

#[tokio::test]
async fn test_login_with_username_only_looks_up_password() {
    let h = Harness::new().await;
    h.credentials()
        .store(&Credentials::new("alice", "secret"))
        .unwrap();
    h.credentials()
        .store(&Credentials::new("bob", "hunter2"))
        .unwrap();

    h.mount_portal_probe().await;
    h.mount_login_page(LOGIN_PAGE).await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string("redirect=1&username=bob&password=hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WELCOME_PAGE))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h.loginator().login(Some("bob"), None).await.unwrap();
    assert!(outcome.is_logged_in(), "got {outcome:?}");
}

#[tokio::test]
async fn test_login_authentication_failed() {
    let h = Harness::new().await;
    h.mount_portal_probe().await;
    h.mount_login_page(LOGIN_PAGE).await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><b>Authentication Failed</b> try again</html>"),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h
        .loginator()
        .login(Some("alice"), Some("wrong"))
        .await
        .unwrap();

    assert!(
        matches!(outcome, LoginOutcome::Aborted(Error::Authentication { ref username }) if username == "alice"),
        "got {outcome:?}"
    );
    assert!(matches!(h.sessions().load(), Err(Error::SessionNotFound)));
    assert_eq!(h.isolation.calls(), vec!["disconnect", "connect"]);
}

#[tokio::test]
async fn test_login_page_without_form_restores_isolation() {
    let h = Harness::new().await;
    h.mount_portal_probe().await;
    h.mount_login_page("<html><body>Maintenance</body></html>")
        .await;

    let outcome = h
        .loginator()
        .login(Some("alice"), Some("secret"))
        .await
        .unwrap();

    assert!(
        matches!(outcome, LoginOutcome::Aborted(Error::Parse(ParseError::NoForm))),
        "got {outcome:?}"
    );
    assert!(h.isolation.is_connected());
    assert_eq!(h.isolation.calls(), vec!["disconnect", "connect"]);
}

#[tokio::test]
async fn test_login_without_keepalive_persists_nothing() {
    let h = Harness::new().await;
    h.mount_portal_probe().await;
    h.mount_login_page(LOGIN_PAGE).await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Thanks</html>"))
        .mount(&h.server)
        .await;

    let outcome = h
        .loginator()
        .login(Some("alice"), Some("secret"))
        .await
        .unwrap();

    assert!(
        matches!(outcome, LoginOutcome::Aborted(Error::Parse(ParseError::NoKeepalive))),
        "got {outcome:?}"
    );
    assert!(matches!(h.sessions().load(), Err(Error::SessionNotFound)));
}

#[tokio::test]
async fn test_login_when_online_is_a_no_op() {
    let h = Harness::new().await;
    h.sessions()
        .save(&PortalSession::new("10.0.0.1", "existing"))
        .unwrap();
    h.mount_online_probe().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let loginator = h.loginator();
    for _ in 0..2 {
        let outcome = loginator
            .login(Some("alice"), Some("secret"))
            .await
            .unwrap();
        assert!(matches!(outcome, LoginOutcome::Online), "got {outcome:?}");
    }

    assert_eq!(
        h.sessions().load().unwrap(),
        PortalSession::new("10.0.0.1", "existing")
    );
    assert!(h.isolation.calls().is_empty());
}

#[tokio::test]
async fn test_login_not_configured_makes_no_request() {
    let h = Harness::new().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&h.server)
        .await;

    let outcome = h.loginator().login(None, None).await.unwrap();
    assert!(matches!(outcome, LoginOutcome::NotConfigured), "got {outcome:?}");

    let outcome = h.loginator().login(Some("nobody"), None).await.unwrap();
    assert!(matches!(outcome, LoginOutcome::NotConfigured), "got {outcome:?}");
}

#[tokio::test]
async fn test_login_password_without_username_is_rejected() {
    let h = Harness::new().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&h.server)
        .await;

    let err = h.loginator().login(None, Some("secret")).await.unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
}

// ============================================================================
// Poll and Logout Tests
// ============================================================================

#[tokio::test]
async fn test_poll_once_logs_in_with_stored_credentials() {
    let h = Harness::new().await;
    h.credentials()
        .store(&Credentials::new("alice", "secret"))
        .unwrap();
    h.mount_portal_probe().await;
    h.mount_login_page(LOGIN_PAGE).await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WELCOME_PAGE))
        .mount(&h.server)
        .await;

    let outcome = h.loginator().poll_once().await;
    assert!(
        matches!(outcome, CycleOutcome::Login(LoginOutcome::LoggedIn(_))),
        "got {outcome:?}"
    );
}

#[tokio::test]
async fn test_poll_once_online() {
    let h = Harness::new().await;
    h.mount_online_probe().await;

    assert!(matches!(h.loginator().poll_once().await, CycleOutcome::Online));
}

#[tokio::test]
async fn test_poll_once_reports_probe_failure() {
    let h = Harness::new().await;
    Mock::given(method("GET"))
        .and(path("/generate_204"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&h.server)
        .await;

    let outcome = h.loginator().poll_once().await;
    assert!(
        matches!(outcome, CycleOutcome::Failed(Error::Parse(_))),
        "got {outcome:?}"
    );
}

#[tokio::test]
async fn test_run_keeps_polling_after_failed_cycles() {
    let h = Harness::new().await;
    Mock::given(method("GET"))
        .and(path("/generate_204"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&h.server)
        .await;

    let mut config =
        PortalConfig::with_probe_url(format!("{}/generate_204", h.server.uri())).unwrap();
    config.poll_interval = Duration::from_millis(50);
    let loginator = Loginator::new(config, Box::new(h.credentials()), h.sessions()).unwrap();

    let result = tokio::time::timeout(Duration::from_millis(300), loginator.run()).await;
    assert!(result.is_err(), "poll loop returned");

    let probes = h
        .server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == "/generate_204")
        .count();
    assert!(probes >= 2, "only {probes} probe requests");
}

#[tokio::test]
async fn test_logout_hits_portal_and_clears_session() {
    let h = Harness::new().await;
    let host = h.server.address().to_string();
    h.sessions()
        .save(&PortalSession::new(&host, "tok999"))
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_string("bye"))
        .expect(1)
        .mount(&h.server)
        .await;

    let session = h.loginator().logout().await.unwrap();
    assert_eq!(session.token(), "tok999");
    assert!(matches!(h.sessions().load(), Err(Error::SessionNotFound)));
}

#[tokio::test]
async fn test_logout_without_session() {
    let h = Harness::new().await;
    let err = h.loginator().logout().await.unwrap_err();
    assert!(matches!(err, Error::SessionNotFound));
}
