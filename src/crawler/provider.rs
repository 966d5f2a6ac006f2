//! Page-link providers
//!
//! A provider turns a page title into that page's outbound link titles. The
//! crawler only sees the typed [`FetchResult`]; every failure variant is
//! handled the same way (logged and skipped).
//!
//! [`WikipediaProvider`] talks to the MediaWiki Action API. [`StaticProvider`]
//! serves canned results from memory and is what tests and offline replays
//! use.

use crate::config::ProviderConfig;
use crate::WikinetError;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Result of asking a provider for a page's links
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The page exists; these are its outbound link titles, as returned
    Success { links: Vec<String> },

    /// No page with this title exists
    Missing,

    /// The title cannot name a page
    Invalid { reason: String },

    /// The title resolves to a disambiguation page
    Disambiguation,

    /// The provider answered with a non-success HTTP status
    HttpError { status_code: u16 },

    /// The request never completed (connection refused, timeout, ...)
    NetworkError { error: String },

    /// The provider answered with something that could not be decoded
    DecodeError { error: String },
}

impl FetchResult {
    /// Human readable description of a failure; `None` on success
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::Missing => Some("page does not exist".to_string()),
            Self::Invalid { reason } => Some(format!("invalid title: {}", reason)),
            Self::Disambiguation => Some("disambiguation page".to_string()),
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error } => Some(format!("network error: {}", error)),
            Self::DecodeError { error } => Some(format!("undecodable response: {}", error)),
        }
    }
}

/// Source of outbound page links
pub trait LinkProvider {
    /// Fetches the outbound link titles of `title`
    fn fetch_links(&self, title: &str) -> impl Future<Output = FetchResult> + Send;
}

/// Builds an HTTP client with an identifying user agent
///
/// # Example
///
/// ```no_run
/// use wikinet::config::ProviderConfig;
/// use wikinet::crawler::build_http_client;
///
/// let client = build_http_client(&ProviderConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ProviderConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent())
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.request_timeout.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Link provider backed by the MediaWiki Action API
#[derive(Debug, Clone)]
pub struct WikipediaProvider {
    client: Client,
    api_url: Url,
}

impl WikipediaProvider {
    /// Creates a provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, WikinetError> {
        let api_url = Url::parse(&config.api_url).map_err(|e| {
            crate::ConfigError::InvalidUrl(format!("Invalid api_url '{}': {}", config.api_url, e))
        })?;
        let client = build_http_client(config)?;
        Ok(Self::with_client(client, api_url))
    }

    pub fn with_client(client: Client, api_url: Url) -> Self {
        Self { client, api_url }
    }

    /// Builds the request URL for one page of results
    fn query_url(&self, title: &str, continuation: &BTreeMap<String, String>) -> Url {
        let mut url = self.api_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("action", "query")
                .append_pair("format", "json")
                .append_pair("formatversion", "2")
                .append_pair("prop", "links|pageprops")
                .append_pair("ppprop", "disambiguation")
                .append_pair("titles", title)
                .append_pair("plnamespace", "0")
                .append_pair("pllimit", "max")
                .append_pair("redirects", "1");
            for (key, value) in continuation {
                query.append_pair(key, value);
            }
        }
        url
    }

    async fn fetch_all_links(&self, title: &str) -> FetchResult {
        let mut links = Vec::new();
        let mut continuation = BTreeMap::new();

        loop {
            let url = self.query_url(title, &continuation);
            tracing::trace!("GET {}", url);

            let response = match self.client.get(url).send().await {
                Ok(response) => response,
                Err(e) => return classify_request_error(&e),
            };

            let status = response.status();
            if status != StatusCode::OK {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            let body: QueryResponse = match response.json().await {
                Ok(body) => body,
                Err(e) => {
                    return FetchResult::DecodeError {
                        error: e.to_string(),
                    }
                }
            };

            if let Some(error) = body.error {
                return FetchResult::Invalid {
                    reason: format!("{}: {}", error.code, error.info),
                };
            }

            let page = match body.query.and_then(|q| q.pages.into_iter().next()) {
                Some(page) => page,
                None => {
                    return FetchResult::DecodeError {
                        error: "response contains no page".to_string(),
                    }
                }
            };

            if page.missing {
                return FetchResult::Missing;
            }
            if page.invalid {
                return FetchResult::Invalid {
                    reason: page.invalidreason.unwrap_or_default(),
                };
            }
            if page
                .pageprops
                .as_ref()
                .is_some_and(|props| props.contains_key("disambiguation"))
            {
                return FetchResult::Disambiguation;
            }

            links.extend(page.links.into_iter().map(|link| link.title));

            match body.continuation {
                Some(next) => {
                    continuation = next
                        .into_iter()
                        .map(|(key, value)| (key, json_scalar_to_string(value)))
                        .collect();
                }
                None => break,
            }
        }

        FetchResult::Success { links }
    }
}

impl LinkProvider for WikipediaProvider {
    async fn fetch_links(&self, title: &str) -> FetchResult {
        self.fetch_all_links(title).await
    }
}

fn classify_request_error(error: &reqwest::Error) -> FetchResult {
    let message = if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection refused".to_string()
    } else {
        error.to_string()
    };
    FetchResult::NetworkError { error: message }
}

fn json_scalar_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(rename = "continue")]
    continuation: Option<BTreeMap<String, serde_json::Value>>,
    query: Option<QueryBody>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<PageBody>,
}

#[derive(Debug, Deserialize)]
struct PageBody {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    invalidreason: Option<String>,
    #[serde(default)]
    links: Vec<LinkBody>,
    pageprops: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct LinkBody {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

/// Provider serving canned results from memory
///
/// Titles without an entry are reported as [`FetchResult::Missing`].
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    pages: HashMap<String, FetchResult>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page with the given outbound links
    pub fn with_page<I, S>(mut self, title: &str, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages.insert(
            title.to_string(),
            FetchResult::Success {
                links: links.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    /// Registers an arbitrary result for a title
    pub fn with_result(mut self, title: &str, result: FetchResult) -> Self {
        self.pages.insert(title.to_string(), result);
        self
    }
}

impl LinkProvider for StaticProvider {
    async fn fetch_links(&self, title: &str) -> FetchResult {
        self.pages
            .get(title)
            .cloned()
            .unwrap_or(FetchResult::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn provider_for(server: &MockServer) -> WikipediaProvider {
        let config = ProviderConfig {
            api_url: format!("{}/w/api.php", server.uri()),
            ..ProviderConfig::default()
        };
        WikipediaProvider::new(&config).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&ProviderConfig::default()).is_ok());
    }

    #[test]
    fn test_query_url_carries_continuation() {
        let provider = WikipediaProvider::with_client(
            Client::new(),
            Url::parse("https://en.wikipedia.org/w/api.php").unwrap(),
        );
        let mut continuation = BTreeMap::new();
        continuation.insert("plcontinue".to_string(), "42|0|Foo".to_string());

        let url = provider.query_url("Data engineering", &continuation);
        let pairs: HashMap<String, String> = url.query_pairs().into_owned().collect();

        assert_eq!(pairs.get("titles").unwrap(), "Data engineering");
        assert_eq!(pairs.get("plnamespace").unwrap(), "0");
        assert_eq!(pairs.get("plcontinue").unwrap(), "42|0|Foo");
    }

    #[tokio::test]
    async fn test_fetch_links_follows_continuation() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("plcontinue", "1|0|C"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "batchcomplete": true,
                "query": {"pages": [{"pageid": 1, "ns": 0, "title": "Data engineering",
                    "links": [{"ns": 0, "title": "Data lake"}]}]}
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("titles", "Data engineering"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "continue": {"plcontinue": "1|0|C", "continue": "||"},
                "query": {"pages": [{"pageid": 1, "ns": 0, "title": "Data engineering",
                    "links": [{"ns": 0, "title": "Apache Spark"}, {"ns": 0, "title": "Big data"}]}]}
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let result = provider.fetch_links("Data engineering").await;

        assert_eq!(
            result,
            FetchResult::Success {
                links: vec![
                    "Apache Spark".to_string(),
                    "Big data".to_string(),
                    "Data lake".to_string()
                ]
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_links_missing_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"pages": [{"ns": 0, "title": "Nonexistent", "missing": true}]}
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        assert_eq!(provider.fetch_links("Nonexistent").await, FetchResult::Missing);
    }

    #[tokio::test]
    async fn test_fetch_links_disambiguation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"pages": [{"pageid": 7, "ns": 0, "title": "Mercury",
                    "pageprops": {"disambiguation": ""},
                    "links": [{"ns": 0, "title": "Mercury (planet)"}]}]}
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        assert_eq!(provider.fetch_links("Mercury").await, FetchResult::Disambiguation);
    }

    #[tokio::test]
    async fn test_fetch_links_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        assert_eq!(
            provider.fetch_links("Anything").await,
            FetchResult::HttpError { status_code: 503 }
        );
    }

    #[tokio::test]
    async fn test_fetch_links_api_error_and_garbage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("titles", "Bad"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": {"code": "invalidtitle", "info": "Bad title"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        assert!(matches!(
            provider.fetch_links("Bad").await,
            FetchResult::Invalid { .. }
        ));
        assert!(matches!(
            provider.fetch_links("Other").await,
            FetchResult::DecodeError { .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_links_unreachable_host() {
        let config = ProviderConfig {
            api_url: "http://127.0.0.1:9/w/api.php".to_string(),
            request_timeout: 2,
            ..ProviderConfig::default()
        };
        let provider = WikipediaProvider::new(&config).unwrap();
        assert!(matches!(
            provider.fetch_links("Anything").await,
            FetchResult::NetworkError { .. }
        ));
    }

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticProvider::new()
            .with_page("A", ["B", "C"])
            .with_result("D", FetchResult::Disambiguation);

        assert_eq!(
            provider.fetch_links("A").await,
            FetchResult::Success {
                links: vec!["B".to_string(), "C".to_string()]
            }
        );
        assert_eq!(provider.fetch_links("D").await, FetchResult::Disambiguation);
        assert_eq!(provider.fetch_links("Z").await, FetchResult::Missing);
    }

    #[test]
    fn test_failure_reason() {
        assert!(FetchResult::Success { links: vec![] }.failure_reason().is_none());
        assert_eq!(
            FetchResult::HttpError { status_code: 404 }.failure_reason().unwrap(),
            "HTTP 404"
        );
    }
}
