//! Tests for the REST GitHub client against a mock GitHub API
//!
//! These tests use a local mockito server in place of api.github.com and verify:
//! 1. Search requests carry the expected query, sort, paging and auth headers
//! 2. Responses are mapped into candidates and ranked end to end
//! 3. Error statuses are classified and propagated (search) or absorbed (README)
//! 4. The octocrab backend maps the same responses the same way

use gitscout::config::ScoutConfig;
use gitscout::scout::providers::{
    GithubProvider, ProviderBackend, ProviderError, RepositoryProvider, SearchPageRequest,
};
use gitscout::scout::{RepositoryScout, ScoutError, SearchRequest};
use mockito::{Matcher, Server};
use serde_json::json;

fn search_item(full_name: &str, stars: u64, updated_at: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "name": full_name.split('/').nth(1).unwrap_or(full_name),
        "full_name": full_name,
        "url": format!("https://api.github.com/repos/{}", full_name),
        "html_url": format!("https://github.com/{}", full_name),
        "description": format!("{} description", full_name),
        "stargazers_count": stars,
        "updated_at": updated_at,
    })
}

fn search_body(items: Vec<serde_json::Value>) -> String {
    json!({
        "total_count": items.len(),
        "incomplete_results": false,
        "items": items,
    })
    .to_string()
}

fn octocrab_provider(server: &Server) -> GithubProvider {
    let config = ScoutConfig::with_api_base_url(&server.url())
        .unwrap()
        .with_backend(ProviderBackend::Octocrab);
    GithubProvider::from_config(&config).unwrap()
}

fn scout_for(server: &Server, token: Option<&str>) -> RepositoryScout {
    let config = ScoutConfig::with_api_base_url(&server.url())
        .unwrap()
        .with_token(token.map(str::to_string));
    RepositoryScout::from_config(&config).unwrap()
}

/// Search requests use the recently-updated ordering and the token header
#[tokio::test]
async fn test_search_request_parameters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "http client".into()),
            Matcher::UrlEncoded("sort".into(), "updated".into()),
            Matcher::UrlEncoded("order".into(), "desc".into()),
            Matcher::UrlEncoded("per_page".into(), "15".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .match_header("authorization", "token test-token")
        .match_header("accept", "application/vnd.github+json")
        .match_header("user-agent", Matcher::Regex("^gitscout/".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(vec![
            search_item("hyperium/hyper", 15000, "2026-10-15T08:00:00Z"),
            search_item("seanmonstar/reqwest", 10000, "2026-10-14T08:00:00Z"),
            search_item("tiny/client", 3, "2026-10-13T08:00:00Z"),
        ]))
        .create_async()
        .await;

    let scout = scout_for(&server, Some("test-token"));
    let request = SearchRequest::new(["http", "client"])
        .with_max_results(5)
        .with_min_stars(100);

    let results = scout.search(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].full_name, "hyperium/hyper");
    assert_eq!(results[0].url.as_str(), "https://github.com/hyperium/hyper");
    assert_eq!(
        results[0].description.as_deref(),
        Some("hyperium/hyper description")
    );
    assert_eq!(results[1].full_name, "seanmonstar/reqwest");
}

/// A full first page triggers a second request; the short second page ends it
#[tokio::test]
async fn test_search_paginates_until_short_page() {
    let mut server = Server::new_async().await;

    let first_page: Vec<_> = (0..100)
        .map(|i| search_item(&format!("acme/repo{}", i), 1000 - i, "2026-10-15T00:00:00Z"))
        .collect();
    let second_page: Vec<_> = (100..130)
        .map(|i| search_item(&format!("acme/repo{}", i), 1000 - i, "2026-10-10T00:00:00Z"))
        .collect();

    let page_one = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), "100".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(first_page))
        .create_async()
        .await;
    let page_two = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), "100".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(second_page))
        .create_async()
        .await;

    let scout = scout_for(&server, None);
    let results = scout
        .search(&SearchRequest::new(["acme"]).with_max_results(50))
        .await
        .unwrap();

    page_one.assert_async().await;
    page_two.assert_async().await;
    assert_eq!(results.len(), 50);
    assert_eq!(results[0].full_name, "acme/repo0");
}

/// A server error on any page fails the search
#[tokio::test]
async fn test_search_error_propagates() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("{\"message\": \"Server Error\"}")
        .create_async()
        .await;

    let result = scout_for(&server, None)
        .search(&SearchRequest::new(["rust"]))
        .await;

    match result {
        Err(ScoutError::Acquisition { page, source }) => {
            assert_eq!(page, 1);
            assert!(matches!(source, ProviderError::Api { status: 500, .. }));
        }
        other => panic!("expected acquisition failure, got {:?}", other),
    }
}

/// An exhausted rate limit is reported as such
#[tokio::test]
async fn test_rate_limit_classification() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_header("x-ratelimit-remaining", "0")
        .with_body("{\"message\": \"API rate limit exceeded\"}")
        .create_async()
        .await;

    let config = ScoutConfig::with_api_base_url(&server.url()).unwrap();
    let client = gitscout::scout::providers::GithubClient::from_config(&config).unwrap();

    let result = client
        .search_page(&SearchPageRequest::recently_updated("rust", 30, 1))
        .await;

    assert!(matches!(result, Err(ProviderError::RateLimited(_))));
}

/// Blank descriptions become absent values
#[tokio::test]
async fn test_blank_description_is_absent() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(vec![
            json!({
                "full_name": "acme/empty",
                "html_url": "https://github.com/acme/empty",
                "description": "",
                "stargazers_count": 5,
                "updated_at": "2026-10-15T00:00:00Z",
            }),
            json!({
                "full_name": "acme/null",
                "html_url": "https://github.com/acme/null",
                "description": null,
                "stargazers_count": 5,
                "updated_at": "2026-10-15T00:00:00Z",
            }),
        ]))
        .create_async()
        .await;

    let results = scout_for(&server, None)
        .search(&SearchRequest::new(["acme"]))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.description.is_none()));
}

/// README content is base64-decoded, line wrapping included
#[tokio::test]
async fn test_fetch_readme_decodes_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/hyperium/hyper/readme")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "name": "README.md",
                "path": "README.md",
                "content": "IyBIZWxs\nbwpXb3Js\nZAo=\n",
                "encoding": "base64",
            })
            .to_string(),
        )
        .create_async()
        .await;

    let readme = scout_for(&server, None).fetch_readme("hyperium/hyper").await;

    mock.assert_async().await;
    assert_eq!(readme.as_deref(), Some("# Hello\nWorld\n"));
}

/// A missing README is an absent value, not an error
#[tokio::test]
async fn test_fetch_readme_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/repos/acme/no-readme/readme")
        .with_status(404)
        .with_body("{\"message\": \"Not Found\"}")
        .create_async()
        .await;

    let readme = scout_for(&server, None).fetch_readme("acme/no-readme").await;

    assert_eq!(readme, None);
}

/// Any other failure is absorbed too
#[tokio::test]
async fn test_fetch_readme_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/repos/acme/broken/readme")
        .with_status(500)
        .create_async()
        .await;

    let scout = scout_for(&server, None);

    assert_eq!(scout.fetch_readme("acme/broken").await, None);
    // Invalid identifiers never reach the server
    assert_eq!(scout.fetch_readme("not-a-repository").await, None);
}

/// The octocrab backend sends the same search parameters and maps items into
/// candidates
#[tokio::test]
async fn test_octocrab_search_page() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "http client".into()),
            Matcher::UrlEncoded("sort".into(), "updated".into()),
            Matcher::UrlEncoded("order".into(), "desc".into()),
            Matcher::UrlEncoded("per_page".into(), "30".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(vec![
            search_item("hyperium/hyper", 15000, "2026-10-15T08:00:00Z"),
            search_item("seanmonstar/reqwest", 10000, "2026-10-14T08:00:00Z"),
        ]))
        .expect(1)
        .create_async()
        .await;

    let provider = octocrab_provider(&server);
    let candidates = provider
        .search_page(&SearchPageRequest::recently_updated("http client", 30, 2))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].full_name, "hyperium/hyper");
    assert_eq!(candidates[0].url.as_str(), "https://github.com/hyperium/hyper");
    assert_eq!(candidates[0].stars, 15000);
    assert_eq!(
        candidates[0].description.as_deref(),
        Some("hyperium/hyper description")
    );
    assert_eq!(
        candidates[1].updated_at.to_rfc3339(),
        "2026-10-14T08:00:00+00:00"
    );
}

/// A missing README is reported as not found by the octocrab backend
#[tokio::test]
async fn test_octocrab_readme_not_found() {
    let mut server = Server::new_async().await;
    // octocrab requests the README route with a trailing slash
    let _mock = server
        .mock("GET", "/repos/acme/no-readme/readme/")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body("{\"message\": \"Not Found\", \"documentation_url\": \"https://docs.github.com/rest\"}")
        .create_async()
        .await;

    let provider = octocrab_provider(&server);
    let result = provider.fetch_readme("acme", "no-readme").await;

    match result {
        Err(ProviderError::NotFound(resource)) => assert_eq!(resource, "acme/no-readme"),
        other => panic!("expected not found, got {:?}", other),
    }

    let scout = RepositoryScout::new(provider);
    assert_eq!(scout.fetch_readme("acme/no-readme").await, None);
}

/// Server errors keep their status and are not retried
#[tokio::test]
async fn test_octocrab_server_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body("{\"message\": \"Server Error\"}")
        .expect(1)
        .create_async()
        .await;

    let result = octocrab_provider(&server)
        .search_page(&SearchPageRequest::recently_updated("rust", 30, 1))
        .await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ProviderError::Api { status: 500, .. })));
}

/// A 429 is a rate limit for the octocrab backend too
#[tokio::test]
async fn test_octocrab_rate_limit() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body("{\"message\": \"API rate limit exceeded\"}")
        .create_async()
        .await;

    let result = octocrab_provider(&server)
        .search_page(&SearchPageRequest::recently_updated("rust", 30, 1))
        .await;

    assert!(matches!(result, Err(ProviderError::RateLimited(_))));
}
