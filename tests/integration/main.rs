//! End-to-end tests for each pipeline stage

mod clean_tests;
mod crawl_tests;
mod pipeline_tests;

use std::path::Path;
use wikinet::config::{parse_config, Config};

/// Builds a validated configuration writing into `results_dir`
pub fn create_test_config(seed: &str, max_depth: u32, results_dir: &Path) -> Config {
    create_test_config_with_api(seed, max_depth, results_dir, "https://en.wikipedia.org/w/api.php")
}

/// Same as [`create_test_config`], pointing the provider at `api_url`
pub fn create_test_config_with_api(
    seed: &str,
    max_depth: u32,
    results_dir: &Path,
    api_url: &str,
) -> Config {
    let toml = format!(
        r#"
[crawler]
seed = "{}"
max-depth = {}

[provider]
api-url = "{}"
request-timeout = 5
crawler-name = "wikinet-test"
contact-email = "test@example.com"

[output]
results-dir = "{}"
"#,
        seed,
        max_depth,
        api_url,
        results_dir.display().to_string().replace('\\', "/")
    );
    parse_config(&toml).expect("test configuration should be valid")
}
