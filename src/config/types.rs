use serde::Deserialize;

/// Main configuration structure for Wikinet
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub cleaner: CleanerConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Title of the page the crawl starts from
    pub seed: String,

    /// Depth at which discovered pages stop being expanded
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Titles starting with this prefix are never followed
    #[serde(rename = "listing-prefix", default = "default_listing_prefix")]
    pub listing_prefix: String,

    /// Titles excluded in addition to the built-in stop list
    #[serde(rename = "extra-stop-titles", default)]
    pub extra_stop_titles: Vec<String>,
}

/// Content provider (MediaWiki API) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Endpoint of the MediaWiki Action API
    #[serde(rename = "api-url", default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default = "default_contact_email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory shared by all pipeline artifacts
    #[serde(rename = "results-dir")]
    pub results_dir: String,
}

/// Cleaner configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CleanerConfig {
    /// Minimum in+out degree a node needs to survive cleaning
    #[serde(rename = "min-degree", default = "default_min_degree")]
    pub min_degree: usize,
}

/// Analyzer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Number of nodes listed per centrality ranking
    #[serde(rename = "top-n", default = "default_top_n")]
    pub top_n: usize,

    /// k used for the k-core; defaults to the largest core number
    #[serde(rename = "core-k", default)]
    pub core_k: Option<usize>,

    /// k used for the k-shell; defaults to one below the largest core number
    #[serde(rename = "shell-k", default)]
    pub shell_k: Option<usize>,
}

impl ProviderConfig {
    /// Formats the identifying user agent string
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn user_agent(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: default_request_timeout(),
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
            contact_email: default_contact_email(),
        }
    }
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            min_degree: default_min_degree(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            core_k: None,
            shell_k: None,
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_listing_prefix() -> String {
    "List Of".to_string()
}

fn default_api_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_crawler_name() -> String {
    "wikinet".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://example.com/about".to_string()
}

fn default_contact_email() -> String {
    "admin@example.com".to_string()
}

fn default_min_degree() -> usize {
    2
}

fn default_top_n() -> usize {
    10
}
