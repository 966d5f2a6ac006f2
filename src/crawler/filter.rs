//! Title normalization and noise filtering
//!
//! Link titles are title-cased before anything else looks at them, so the
//! stop list is expressed in title case too.

use crate::config::CrawlerConfig;
use std::collections::HashSet;

/// Bibliographic and identifier pages linked from nearly every article
pub const DEFAULT_STOP_TITLES: [&str; 22] = [
    "International Standard Serial Number",
    "International Standard Book Number",
    "National Diet Library",
    "International Standard Name Identifier",
    "International Standard Book Number (Identifier)",
    "Pubmed Identifier",
    "Pubmed Central",
    "Digital Object Identifier",
    "Arxiv",
    "Proc Natl Acad Sci Usa",
    "Bibcode",
    "Library Of Congress Control Number",
    "Jstor",
    "Doi (Identifier)",
    "Isbn (Identifier)",
    "Pmid (Identifier)",
    "Arxiv (Identifier)",
    "Bibcode (Identifier)",
    "S2Cid (Identifier)",
    "Issn (Identifier)",
    "Oclc (Identifier)",
    "Open Library (Identifier)",
];

/// Default prefix of listing pages ("List of ...", title-cased)
pub const DEFAULT_LISTING_PREFIX: &str = "List Of";

/// Converts a title to title case
///
/// Every cased character that follows another cased character is
/// lowercased; every other cased character takes its Unicode titlecase form.
/// Digits and punctuation break words, so `"S2CID"` becomes `"S2Cid"` and
/// `"don't"` becomes `"Don'T"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;

    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase() || is_titlecase_letter(c);
        if cased && previous_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            push_titlecase(&mut out, c);
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }

    out
}

/// Letters of general category Lt, which are neither upper- nor lowercase
fn is_titlecase_letter(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// Appends the titlecase mapping of `c`
///
/// Only characters whose titlecase differs from their uppercase are mapped
/// here: digraphs, Latin and Armenian ligatures, and Greek letters with
/// ypogegrammeni. Everything else falls back to `to_uppercase`.
fn push_titlecase(out: &mut String, c: char) {
    let mapped: &str = match c {
        '\u{01C4}'..='\u{01C6}' => "\u{01C5}",
        '\u{01C7}'..='\u{01C9}' => "\u{01C8}",
        '\u{01CA}'..='\u{01CC}' => "\u{01CB}",
        '\u{01F1}'..='\u{01F3}' => "\u{01F2}",
        'ß' => "Ss",
        'ﬀ' => "Ff",
        'ﬁ' => "Fi",
        'ﬂ' => "Fl",
        'ﬃ' => "Ffi",
        'ﬄ' => "Ffl",
        'ﬅ' | 'ﬆ' => "St",
        '\u{0587}' => "\u{0535}\u{0582}",
        '\u{FB13}' => "\u{0544}\u{0576}",
        '\u{FB14}' => "\u{0544}\u{0565}",
        '\u{FB15}' => "\u{0544}\u{056B}",
        '\u{FB16}' => "\u{054E}\u{0576}",
        '\u{FB17}' => "\u{0544}\u{056D}",
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            if let Some(titled) = char::from_u32(c as u32 + 8) {
                out.push(titled);
            }
            return;
        }
        '\u{1F88}'..='\u{1F8F}'
        | '\u{1F98}'..='\u{1F9F}'
        | '\u{1FA8}'..='\u{1FAF}'
        | '\u{1FBC}'
        | '\u{1FCC}'
        | '\u{1FFC}' => {
            out.push(c);
            return;
        }
        '\u{1FB3}' => "\u{1FBC}",
        '\u{1FC3}' => "\u{1FCC}",
        '\u{1FF3}' => "\u{1FFC}",
        _ => {
            out.extend(c.to_uppercase());
            return;
        }
    };
    out.push_str(mapped);
}

/// Titles a crawl never records or follows
#[derive(Debug, Clone)]
pub struct StopList {
    titles: HashSet<String>,
    listing_prefix: String,
}

impl StopList {
    /// Builds a stop list from the built-in titles plus `extra` ones
    ///
    /// Extra titles are title-cased so they compare equal to normalized links.
    pub fn new<I, S>(listing_prefix: &str, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut titles: HashSet<String> =
            DEFAULT_STOP_TITLES.iter().map(|t| t.to_string()).collect();
        titles.extend(extra.into_iter().map(|t| title_case(t.as_ref())));

        Self {
            titles,
            listing_prefix: listing_prefix.to_string(),
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(&config.listing_prefix, &config.extra_stop_titles)
    }

    /// Returns true if a normalized title must be dropped
    pub fn is_excluded(&self, title: &str) -> bool {
        title.starts_with(&self.listing_prefix) || self.titles.contains(title)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl Default for StopList {
    fn default() -> Self {
        Self::new(DEFAULT_LISTING_PREFIX, std::iter::empty::<&str>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case("Data engineering"), "Data Engineering");
        assert_eq!(title_case("APACHE kafka"), "Apache Kafka");
        assert_eq!(title_case("extract, transform, load"), "Extract, Transform, Load");
    }

    #[test]
    fn test_title_case_non_letters_break_words() {
        assert_eq!(title_case("S2CID (identifier)"), "S2Cid (Identifier)");
        assert_eq!(title_case("don't"), "Don'T");
        assert_eq!(title_case("data-set"), "Data-Set");
        assert_eq!(title_case("3d printing"), "3D Printing");
    }

    #[test]
    fn test_title_case_uses_titlecase_mapping() {
        assert_eq!(title_case("\u{01C6}emal"), "\u{01C5}emal");
        assert_eq!(title_case("\u{01C4}EMAL"), "\u{01C5}emal");
        assert_eq!(title_case("\u{01C5}emal"), "\u{01C5}emal");
        assert_eq!(title_case("\u{FB01}nance"), "Finance");
        assert_eq!(title_case("\u{FB00} x"), "Ff X");
        assert_eq!(title_case("stra\u{00DF}e"), "Stra\u{00DF}e");
        assert_eq!(title_case("\u{1FB3}"), "\u{1FBC}");
    }

    #[test]
    fn test_title_case_non_ascii() {
        assert_eq!(title_case("émile durkheim"), "Émile Durkheim");
    }

    #[test]
    fn test_stop_list_defaults() {
        let stops = StopList::default();
        assert!(stops.is_excluded("Doi (Identifier)"));
        assert!(stops.is_excluded(&title_case("S2CID (identifier)")));
        assert!(stops.is_excluded("List Of Programming Languages"));
        assert!(!stops.is_excluded("Data Warehouse"));
        assert_eq!(stops.len(), DEFAULT_STOP_TITLES.len());
    }

    #[test]
    fn test_listing_prefix_is_case_sensitive_after_normalization() {
        let stops = StopList::default();
        // Normalized titles always carry "List Of"; a raw "List of" never reaches the filter
        assert!(stops.is_excluded(&title_case("List of databases")));
        assert!(!stops.is_excluded("Listing"));
    }

    #[test]
    fn test_extra_titles_are_normalized() {
        let stops = StopList::new("List Of", ["wikidata", "Semantic Scholar"]);
        assert!(stops.is_excluded("Wikidata"));
        assert!(stops.is_excluded("Semantic Scholar"));
        assert_eq!(stops.len(), DEFAULT_STOP_TITLES.len() + 2);
    }
}
