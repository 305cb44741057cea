use std::fs;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use prlink_test_utils::{GitRepoTestGuard, HomeEnvTestGuard};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `prlink` command isolated from the user's HOME, token and endpoint.
fn prlink(home: &HomeEnvTestGuard) -> Command {
  let mut cmd = cargo_bin_cmd!("prlink");
  cmd
    .envs(home.envs())
    .env_remove("GITHUB_TOKEN")
    .env_remove("PRLINK_GRAPHQL_URL")
    .env_remove("RUST_LOG");
  cmd
}

fn repo_with_origin() -> GitRepoTestGuard {
  let repo = GitRepoTestGuard::new();
  repo.add_remote("origin", "git@github.com:acme/widgets.git").unwrap();
  repo
}

#[test]
fn help_lists_commands() {
  let home = HomeEnvTestGuard::new();

  prlink(&home)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("next-number"))
    .stdout(predicate::str::contains("next-link"))
    .stdout(predicate::str::contains("current-number"))
    .stdout(predicate::str::contains("current-link"))
    .stdout(predicate::str::contains("clear-token"));
}

#[test]
fn fails_outside_a_repository() {
  let home = HomeEnvTestGuard::new();

  prlink(&home)
    .args(["next-number", "--no-input", "--path"])
    .arg(home.home_dir())
    .assert()
    .code(1)
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("is not a git repository"));
}

#[test]
fn current_without_upstream_reports_branch() {
  let home = HomeEnvTestGuard::new();
  let repo = repo_with_origin();

  prlink(&home)
    .args(["current-number", "--no-input", "--path"])
    .arg(repo.path())
    .assert()
    .code(1)
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("No upstream branch is configured for 'main'"));
}

#[test]
fn missing_token_without_input_fails() {
  let home = HomeEnvTestGuard::new();
  let repo = repo_with_origin();

  prlink(&home)
    .args(["next-number", "--no-input", "--path"])
    .arg(repo.path())
    .assert()
    .code(1)
    .stderr(predicate::str::contains("A GitHub token is required"));
}

#[test]
fn invalid_settings_file_is_reported() {
  let home = HomeEnvTestGuard::new();
  let repo = repo_with_origin();
  fs::write(home.config_dir().join("config.toml"), "[github]\ngraphql_url = \"not a url\"\n").unwrap();

  prlink(&home)
    .args(["next-number", "--no-input", "--path"])
    .arg(repo.path())
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Invalid settings"));
}

#[tokio::test(flavor = "multi_thread")]
async fn next_link_prints_snippet() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/graphql"))
    .and(header("authorization", "bearer env-token"))
    .and(body_partial_json(json!({ "variables": { "owner": "acme", "name": "widgets" } })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "data": {
        "repository": {
          "discussions": { "nodes": [{ "number": 38 }] },
          "issues": { "nodes": [{ "number": 41 }] },
          "pullRequests": { "nodes": [{ "number": 40 }] }
        }
      }
    })))
    .expect(1)
    .mount(&server)
    .await;

  let home = HomeEnvTestGuard::new();
  let repo = repo_with_origin();

  prlink(&home)
    .env("GITHUB_TOKEN", "env-token")
    .env("PRLINK_GRAPHQL_URL", format!("{}/graphql", server.uri()))
    .args(["next-link", "--no-input", "--path"])
    .arg(repo.path())
    .assert()
    .success()
    .stdout("([#42](https://github.com/acme/widgets/pull/42))");
}

#[tokio::test(flavor = "multi_thread")]
async fn current_number_uses_netrc_token_and_inserts_into_file() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(header("authorization", "bearer netrc-token"))
    .and(body_partial_json(json!({ "variables": { "branch": "refs/heads/feature" } })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "data": {
        "repository": {
          "ref": {
            "associatedPullRequests": {
              "nodes": [{
                "number": 7,
                "state": "OPEN",
                "title": "Add widgets",
                "url": "https://github.com/acme/widgets/pull/7"
              }]
            }
          }
        }
      }
    })))
    .expect(1)
    .mount(&server)
    .await;

  let home = HomeEnvTestGuard::new();
  home.write_netrc("machine github.com\n  login x-access-token\n  password netrc-token\n");
  let repo = repo_with_origin();
  repo.set_upstream("feature", "origin", "refs/heads/feature").unwrap();
  repo.set_head("ref: refs/heads/feature\n").unwrap();
  let message = repo.path().join("COMMIT_EDITMSG");
  fs::write(&message, "Add widgets \n").unwrap();

  prlink(&home)
    .env("PRLINK_GRAPHQL_URL", format!("{}/graphql", server.uri()))
    .args(["current-number", "--no-input", "--offset", "12", "--path"])
    .arg(repo.path())
    .arg("--insert-into")
    .arg(&message)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  assert_eq!(fs::read_to_string(&message).unwrap(), "Add widgets (#7)\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn query_failure_is_reported() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(401))
    .mount(&server)
    .await;

  let home = HomeEnvTestGuard::new();
  let repo = repo_with_origin();

  prlink(&home)
    .env("GITHUB_TOKEN", "stale-token")
    .env("PRLINK_GRAPHQL_URL", format!("{}/graphql", server.uri()))
    .args(["next-number", "--no-input", "--path"])
    .arg(repo.path())
    .assert()
    .code(1)
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("GitHub query failed: authentication failed"));
}

#[test]
fn clear_token_removes_netrc_entry() {
  let home = HomeEnvTestGuard::new();
  home.write_netrc(
    "machine github.com\n  login x-access-token\n  password old-token\n\nmachine example.com\n  login me\n  password keep\n",
  );

  prlink(&home)
    .arg("clear-token")
    .assert()
    .success()
    .stderr(predicate::str::contains("Removed the github.com token"));

  let netrc = fs::read_to_string(home.home_path(".netrc")).unwrap();
  assert!(!netrc.contains("github.com"));
  assert!(netrc.contains("machine example.com"));
}
