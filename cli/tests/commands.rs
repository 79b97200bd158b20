use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tokio::runtime::Runtime;
use uuid::Uuid;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

fn tandem_command(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("tandem").expect("tandem binary");
    cmd.env("TANDEM_BASE_URL", server.uri());
    cmd.env("TANDEM_API_TOKEN", "cli-token");
    cmd
}

#[test]
fn check_reports_a_reachable_backend() {
    let rt = Runtime::new().expect("runtime");
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&server)
            .await;
        server
    });

    tandem_command(&server)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(": ok ("));
}

#[test]
fn check_fails_when_the_backend_is_down() {
    let rt = Runtime::new().expect("runtime");
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        server
    });

    tandem_command(&server)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("degraded"));
}

#[test]
fn feed_lists_items_with_the_stored_token() {
    let rt = Runtime::new().expect("runtime");
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/journey/feed"))
            .and(header("Authorization", "Bearer cli-token"))
            .and(query_param("categories", "career"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "type": "insight",
                    "id": Uuid::new_v4(),
                    "title": "Delegation pattern",
                    "content": "body",
                    "created_at": "2025-11-02T09:30:00Z",
                    "updated_at": "2025-11-02T09:30:00Z"
                }],
                "total_count": 1,
                "skip": 0,
                "limit": 5
            })))
            .expect(1)
            .mount(&server)
            .await;
        server
    });

    tandem_command(&server)
        .args(["feed", "--category", "career", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Delegation pattern"))
        .stdout(predicate::str::contains("showing 1 of 1"));
}

#[test]
fn feed_without_a_token_fails_cleanly() {
    let rt = Runtime::new().expect("runtime");
    let server = rt.block_on(MockServer::start());

    let mut cmd = Command::cargo_bin("tandem").expect("tandem binary");
    cmd.env("TANDEM_BASE_URL", server.uri());
    cmd.env("TANDEM_API_TOKEN", "");
    // No auth file either: point HOME at an empty directory.
    let home = tempfile::tempdir().expect("tempdir");
    cmd.env("HOME", home.path());

    cmd.arg("feed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("authentication required"));
}

#[test]
fn insights_prints_the_neighbor_route() {
    let rt = Runtime::new().expect("runtime");
    let anchor = Uuid::new_v4();
    let older = Uuid::new_v4();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/journey/feed"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {
                        "type": "insight",
                        "id": anchor,
                        "title": "newer",
                        "content": "body",
                        "created_at": "2025-11-02T09:30:00Z",
                        "updated_at": "2025-11-02T09:30:00Z"
                    },
                    {
                        "type": "insight",
                        "id": older,
                        "title": "older",
                        "content": "body",
                        "created_at": "2025-10-02T09:30:00Z",
                        "updated_at": "2025-10-02T09:30:00Z"
                    }
                ],
                "total_count": 2,
                "skip": 0,
                "limit": 100
            })))
            .mount(&server)
            .await;
        server
    });

    tandem_command(&server)
        .args(["insights", &anchor.to_string(), "--next"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("/insights/{older}")))
        .stderr(predicate::str::contains("insight 1 of 2"));
}
