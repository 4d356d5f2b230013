//! Query reduction and the search fan-out plan

use crate::config::EngineConfig;
use appraisal_domain::Provenance;

/// Generic auction words that hurt search ranking
pub const STOP_TERMS: [&str; 7] = ["lot", "bundle", "collection", "vintage", "rare", "new", "used"];

fn is_stop_term(token: &str) -> bool {
    let bare = token.trim_matches(|c: char| !c.is_alphanumeric());
    STOP_TERMS.iter().any(|stop| bare.eq_ignore_ascii_case(stop))
}

/// Likely brand, model or descriptive noun
fn is_signal_token(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        || token.chars().next().is_some_and(char::is_uppercase)
        || token.chars().count() > 3
}

/// Identifier-like token (model numbers, brand names)
fn is_identifier(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        || token.chars().next().is_some_and(char::is_uppercase)
}

fn signal_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|token| !is_stop_term(token))
        .filter(|token| is_signal_token(token))
}

/// Reduce an auction title to a short, signal-dense query
///
/// Stop-terms are always removed. A token is kept when it contains a digit,
/// starts with an uppercase letter or is longer than three characters. If
/// nothing survives, the trimmed title is used as-is.
///
/// # Examples
///
/// ```
/// use appraisal_engine::reduce_title;
///
/// assert_eq!(
///     reduce_title("Vintage LOT of 3 Fenton Hobnail lamps rare", 5),
///     "3 Fenton Hobnail lamps"
/// );
/// assert_eq!(reduce_title("new lot", 5), "new lot");
/// ```
pub fn reduce_title(title: &str, max_terms: usize) -> String {
    let kept: Vec<&str> = signal_tokens(title).take(max_terms).collect();
    if kept.is_empty() {
        title.trim().to_string()
    } else {
        kept.join(" ")
    }
}

/// Build the search query for an item
///
/// When the title yields fewer than two terms, identifiers from the
/// description top the query up to `max_terms`.
pub fn build_query(title: &str, description: Option<&str>, max_terms: usize) -> String {
    let mut kept: Vec<&str> = signal_tokens(title).take(max_terms).collect();

    if kept.len() < 2 {
        if let Some(description) = description {
            for token in signal_tokens(description).filter(|t| is_identifier(t)) {
                if kept.len() >= max_terms {
                    break;
                }
                if !kept.iter().any(|k| k.eq_ignore_ascii_case(token)) {
                    kept.push(token);
                }
            }
        }
    }

    if kept.is_empty() {
        title.trim().to_string()
    } else {
        kept.join(" ")
    }
}

/// One search issued against the text search source
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVariant {
    /// Full query text, including any `site:` operator
    pub query: String,
    /// Hits requested
    pub limit: usize,
    /// Hits kept from the response
    pub keep: usize,
    /// Provenance given to the kept hits
    pub provenance: Provenance,
}

/// Every search issued for one item, in result order
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// Reduced query shared by all variants and the structured source
    pub base: String,
    /// Search variants
    pub variants: Vec<QueryVariant>,
}

const MARKETPLACE_SUFFIXES: [&str; 3] = [
    "site:etsy.com sold",
    "site:mercari.com sold",
    "site:amazon.com price",
];

const FORUM_SUFFIXES: [&str; 3] = [
    "site:reddit.com value price",
    "site:collectorsweekly.com",
    "forum discussion price",
];

impl QueryPlan {
    /// Plan the fan-out for a reduced query
    pub fn new(base: impl Into<String>, config: &EngineConfig) -> Self {
        let base = base.into();
        let mut variants = vec![QueryVariant {
            query: format!("{} price value worth", base),
            limit: config.general_result_limit,
            keep: config.general_result_keep,
            provenance: Provenance::WebSnippet,
        }];

        let scoped = |suffix: &str, provenance| QueryVariant {
            query: format!("{} {}", base, suffix),
            limit: config.scoped_result_limit,
            keep: config.scoped_result_limit,
            provenance,
        };
        variants.extend(
            MARKETPLACE_SUFFIXES
                .iter()
                .map(|suffix| scoped(*suffix, Provenance::WebSnippet)),
        );
        variants.extend(
            FORUM_SUFFIXES
                .iter()
                .map(|suffix| scoped(*suffix, Provenance::ForumSnippet)),
        );

        Self { base, variants }
    }
}
