//! End-to-end pipeline tests against a mock GitHub API

mod support;

use prfiles::github::{FileUpload, PipelineError, PipelineStage, PrOptions, create_pr_from_files};
use prfiles_github::{Credentials, ExistingBranchPolicy, GitHubClient, RepoActions};
use serde_json::{Value, json};
use support::mount_happy_path;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials::new("octo", "hello", "octocat", "octo@example.com", "tok")
}

fn actions(server: &MockServer) -> RepoActions<GitHubClient> {
    RepoActions::connect_to(&credentials(), &server.uri()).unwrap()
}

fn files() -> Vec<FileUpload> {
    vec![
        FileUpload::new("a.md", "alpha"),
        FileUpload::new("docs/b.md", "beta"),
    ]
}

async fn request_body(server: &MockServer, endpoint: &str) -> Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .find(|request| request.url.path() == endpoint)
        .unwrap_or_else(|| panic!("no request to {endpoint}"));
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn test_pipeline_creates_pull_request() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;

    let options = PrOptions::new("main")
        .with_branch_name("docs")
        .with_title("Add docs")
        .with_labels(vec!["docs".to_string()])
        .as_draft();

    let outcome = create_pr_from_files(&actions(&server), &credentials(), &options, &files())
        .await
        .unwrap();

    assert_eq!(outcome.branch, "docs");
    assert_eq!(outcome.commit_sha, "C1");
    assert_eq!(outcome.pull_number, "5");
    assert_eq!(outcome.pull_url, "https://github.com/octo/hello/pull/5");
    assert_eq!(outcome.labels_applied, vec!["docs".to_string()]);

    assert_eq!(
        request_body(&server, "/repos/octo/hello/git/refs").await,
        json!({"ref": "refs/heads/docs", "sha": "S1"})
    );
    assert_eq!(
        request_body(&server, "/repos/octo/hello/git/trees").await,
        json!({
            "base_tree": "S2",
            "owner": "octo",
            "repo": "hello",
            "tree": [
                {"path": "a.md", "mode": "100644", "type": "blob", "sha": "B1"},
                {"path": "docs/b.md", "mode": "100644", "type": "blob", "sha": "B2"},
            ],
        })
    );
    assert_eq!(
        request_body(&server, "/repos/octo/hello/git/refs/heads/docs").await,
        json!({"ref": "refs/heads/docs", "sha": "C1"})
    );

    let pull = request_body(&server, "/repos/octo/hello/pulls").await;
    assert_eq!(pull["title"], "Add docs");
    assert_eq!(pull["head"], "docs");
    assert_eq!(pull["base"], "main");
    assert_eq!(pull["draft"], true);
    assert_eq!(pull["maintainer_can_modify"], true);
}

#[tokio::test]
async fn test_pipeline_stops_on_bad_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/branches/main"))
        .and(header("Authorization", "token tok"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = create_pr_from_files(
        &actions(&server),
        &credentials(),
        &PrOptions::new("main"),
        &files(),
    )
    .await
    .unwrap_err();

    match err {
        PipelineError::StageFailed { stage, reason } => {
            assert_eq!(stage, PipelineStage::CreateBranch);
            assert_eq!(reason, "Bad credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_pipeline_reuses_existing_branch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/branches/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"commit": {"sha": "S1"}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/hello/git/refs"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"message": "Reference already exists"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/branches/docs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"commit": {"sha": "S9"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/hello/git/blobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "B1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/hello/git/trees"))
        .and(body_json(json!({
            "base_tree": "S9",
            "owner": "octo",
            "repo": "hello",
            "tree": [{"path": "a.md", "mode": "100644", "type": "blob", "sha": "B1"}],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "T1"})))
        .expect(1)
        .mount(&server)
        .await;
    // Stop after the tree so only the branch handling is under test
    Mock::given(method("POST"))
        .and(path("/repos/octo/hello/git/commits"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "stop"})))
        .mount(&server)
        .await;

    let actions = actions(&server).with_branch_policy(ExistingBranchPolicy::Reuse);
    let options = PrOptions::new("main").with_branch_name("docs");
    let files = vec![FileUpload::new("a.md", "alpha")];

    let err = create_pr_from_files(&actions, &credentials(), &options, &files)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::StageFailed {
            stage: PipelineStage::CreateCommit,
            ..
        }
    ));
}

#[tokio::test]
async fn test_pipeline_fails_on_existing_branch_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/branches/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"commit": {"sha": "S1"}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/hello/git/refs"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"message": "Reference already exists"})),
        )
        .mount(&server)
        .await;

    let options = PrOptions::new("main").with_branch_name("docs");
    let err = create_pr_from_files(&actions(&server), &credentials(), &options, &files())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Creating branch failed: Reference already exists");
}

#[tokio::test]
async fn test_pipeline_recovers_existing_pull_request() {
    let server = MockServer::start().await;
    let responses = [
        ("GET", "/repos/octo/hello/branches/main", json!({"commit": {"sha": "S1"}})),
        ("POST", "/repos/octo/hello/git/refs", json!({"object": {"sha": "S2"}})),
        ("POST", "/repos/octo/hello/git/blobs", json!({"sha": "B1"})),
        ("POST", "/repos/octo/hello/git/trees", json!({"sha": "T1"})),
        ("POST", "/repos/octo/hello/git/commits", json!({"sha": "C1"})),
        ("POST", "/repos/octo/hello/git/refs/heads/docs", json!({"object": {"sha": "C1"}})),
    ];
    for (verb, endpoint, body) in responses {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/repos/octo/hello/pulls"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{"message": "A pull request already exists for octo:docs."}],
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/pulls"))
        .and(query_param("head", "octo:docs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "number": 3,
            "html_url": "https://github.com/octo/hello/pull/3",
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let options = PrOptions::new("main").with_branch_name("docs");
    let files = vec![FileUpload::new("a.md", "alpha")];

    let outcome = create_pr_from_files(&actions(&server), &credentials(), &options, &files)
        .await
        .unwrap();

    assert_eq!(outcome.pull_number, "3");
    assert_eq!(outcome.pull_url, "https://github.com/octo/hello/pull/3");
}
