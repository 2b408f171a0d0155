#![deny(clippy::all, clippy::pedantic)]

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;

#[test]
fn blogs_list_works_end_to_end() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/api/blogs");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{"blogs":[{"id":"00000000-0000-0000-0000-000000000000","title":"Hello World","slug":"hello-world","status":"published","excerpt":"An opening post.","content":"<p>Hi</p>","coverImage":"https://example.com/c.png","author":{"id":"00000000-0000-0000-0000-000000000000","name":"Ada","email":"ada@example.com"},"createdAt":"2026-08-23T10:00:00Z","updatedAt":"2026-08-23T10:00:00Z"}]}"#,
            );
    });

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("scrivano-cli"));
    let assert = cmd
        .env("SCRIVANO_SITE_URL", server.base_url())
        .arg("blogs")
        .arg("list")
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("\"slug\": \"hello-world\""));
    mock.assert();
}

#[test]
fn missing_site_fails_fast() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("scrivano-cli"));
    cmd.arg("blogs")
        .arg("list")
        .env_remove("SCRIVANO_SITE_URL")
        .assert()
        .failure()
        .stderr(contains("site URL is required"));
}
