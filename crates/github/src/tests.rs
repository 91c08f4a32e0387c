use std::time::Duration;

use httpmock::prelude::*;
use pipeline::{
    IssueSearch, Login, MembershipDirectory, MembershipLookupError, OrganizationId, QueryError,
    RepositoryId, SearchQuery,
};
use serde_json::json;

use super::*;

const QUERY: &str = "repo:acme/widgets is:issue is:open comments:>=1 no:milestone";

fn client(server: &MockServer) -> GithubClient {
    GithubClient::new(&server.base_url(), "t0ken", Duration::from_secs(5)).unwrap()
}

fn query() -> SearchQuery {
    SearchQuery::stale_candidates(RepositoryId::new("acme/widgets").unwrap())
}

fn org() -> OrganizationId {
    OrganizationId::new("acme").unwrap()
}

fn login(value: &str) -> Login {
    Login::new(value).unwrap()
}

#[tokio::test]
async fn search_sends_query_and_decodes_items_in_order() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search/issues")
                .query_param("q", QUERY)
                .query_param("per_page", "100")
                .header("authorization", "Bearer t0ken")
                .header("accept", "application/vnd.github+json");
            then.status(200).json_body(json!({
                "total_count": 2,
                "incomplete_results": false,
                "items": [
                    {
                        "number": 42,
                        "title": "Totally broken thing",
                        "updated_at": "2024-05-01T10:00:00Z",
                        "assignees": [{"login": "carol"}, {"login": "dave"}],
                        "comments": 3
                    },
                    {
                        "number": 7,
                        "title": "Bump dependency",
                        "updated_at": "2024-04-01T00:00:00Z",
                        "assignees": [],
                        "pull_request": {"url": "https://api.github.com/repos/acme/widgets/pulls/7"}
                    }
                ]
            }));
        })
        .await;

    let page = client(&server).search_issues(&query()).await.unwrap();

    search.assert_async().await;
    assert_eq!(page.total_count, 2);
    assert!(!page.is_truncated());
    assert_eq!(page.issues.len(), 2);

    let first = &page.issues[0];
    assert_eq!(first.number.as_u64(), 42);
    assert_eq!(first.title, "Totally broken thing");
    assert_eq!(first.updated_at.to_string(), "2024-05-01T10:00:00+00:00");
    assert_eq!(first.assignees, vec![login("carol"), login("dave")]);
    assert!(!first.is_pull_request);

    assert_eq!(page.issues[1].number.as_u64(), 7);
    assert!(page.issues[1].is_pull_request);
}

#[tokio::test]
async fn search_reports_matches_beyond_the_first_page() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search/issues");
            then.status(200).json_body(json!({
                "total_count": 250,
                "incomplete_results": false,
                "items": [{
                    "number": 1,
                    "title": "One",
                    "updated_at": "2024-05-01T10:00:00Z",
                    "assignees": []
                }]
            }));
        })
        .await;

    let page = client(&server).search_issues(&query()).await.unwrap();

    assert!(page.is_truncated());
    assert_eq!(page.omitted(), 249);
}

#[tokio::test]
async fn search_maps_auth_failures() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search/issues");
            then.status(401)
                .json_body(json!({"message": "Bad credentials"}));
        })
        .await;

    let err = client(&server).search_issues(&query()).await.unwrap_err();

    assert!(matches!(err, QueryError::Unauthorized { status: 401 }));
}

#[tokio::test]
async fn search_surfaces_validation_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search/issues");
            then.status(422)
                .json_body(json!({"message": "Validation Failed", "errors": []}));
        })
        .await;

    let err = client(&server).search_issues(&query()).await.unwrap_err();

    match err {
        QueryError::Rejected { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Validation Failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn search_rejects_undecodable_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search/issues");
            then.status(200).body("not json");
        })
        .await;

    let err = client(&server).search_issues(&query()).await.unwrap_err();

    assert!(matches!(err, QueryError::MalformedResponse { .. }));
}

#[tokio::test]
async fn membership_status_codes_map_to_answers() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/orgs/acme/members/carol");
            then.status(204);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/orgs/acme/members/mallory");
            then.status(404);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/orgs/acme/members/ratelimited");
            then.status(403);
        })
        .await;

    let github = client(&server);

    assert!(github.is_member(&org(), &login("carol")).await.unwrap());
    assert!(!github.is_member(&org(), &login("mallory")).await.unwrap());
    assert!(matches!(
        github.is_member(&org(), &login("ratelimited")).await,
        Err(MembershipLookupError::UnexpectedStatus { status: 403 })
    ));
}

#[tokio::test]
async fn membership_follows_public_members_redirect() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/orgs/acme/members/bob");
            then.status(302)
                .header("location", server.url("/orgs/acme/public_members/bob"));
        })
        .await;
    let public = server
        .mock_async(|when, then| {
            when.method(GET).path("/orgs/acme/public_members/bob");
            then.status(204);
        })
        .await;

    assert!(client(&server).is_member(&org(), &login("bob")).await.unwrap());
    public.assert_async().await;
}

#[tokio::test]
async fn membership_transport_failure_is_a_lookup_error() {
    let github = GithubClient::new("http://127.0.0.1:1", "t0ken", Duration::from_secs(2)).unwrap();

    let err = github.is_member(&org(), &login("carol")).await.unwrap_err();

    assert!(matches!(err, MembershipLookupError::Transport { .. }));
}

#[test]
fn token_with_newline_is_rejected() {
    assert!(matches!(
        GithubClient::new(DEFAULT_API_BASE, "abc\ndef", Duration::from_secs(1)),
        Err(GithubClientError::InvalidToken)
    ));
}
