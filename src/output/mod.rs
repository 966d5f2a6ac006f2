//! Output module for stage summaries and reports
//!
//! This module handles:
//! - Printing crawl, cleaning and analysis summaries to the console
//! - Rendering the analysis report as markdown

mod markdown;
pub mod stats;

pub use markdown::{format_analysis_markdown, write_analysis_markdown};
pub use stats::{
    print_analysis_summary, print_clean_report, print_crawl_statistics, CrawlStatistics,
};
