//! Monetary pattern scanning

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Optional `$`, then either a comma-grouped amount or a plain run of
    // digits, each with an optional decimal fraction
    static ref AMOUNT_REGEX: Regex = Regex::new(
        r"(?P<symbol>\$\s?)?(?P<amount>\d{1,3}(?:,\d{3})+\b(?:\.\d+)?|\d+(?:\.\d+)?)"
    ).unwrap();
}

/// One monetary pattern found in a text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountMatch {
    /// Parsed amount
    pub value: f64,
    /// Whether the amount was written with a `$`
    pub has_symbol: bool,
    /// Byte offset where the match starts (including the symbol)
    pub start: usize,
    /// Byte offset just past the match
    pub end: usize,
}

/// Every parseable amount in `text`, in order of appearance
pub fn scan_amounts(text: &str) -> Vec<AmountMatch> {
    AMOUNT_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let amount = caps.name("amount")?;
            let value = parse_amount(amount.as_str())?;
            Some(AmountMatch {
                value,
                has_symbol: caps.name("symbol").is_some(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Parse a matched amount, dropping thousands separators
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether a bare number stands on its own rather than being part of a
/// word, a date, a version or a percentage
pub fn is_standalone(text: &str, m: &AmountMatch) -> bool {
    let before = text[..m.start].chars().next_back();
    let after = text[m.end..].chars().next();

    let glued_before = matches!(before, Some(c) if c.is_alphanumeric() || c == '.' || c == '/');
    let glued_after =
        matches!(after, Some(c) if c.is_alphanumeric() || c == '%' || c == '/');

    !glued_before && !glued_after
}

/// First parseable amount in `text`, whatever its size
pub fn first_amount(text: &str) -> Option<f64> {
    scan_amounts(text).first().map(|m| m.value)
}

/// The designated value line: the first line of the trimmed narrative
pub fn designated_line(narrative: &str) -> Option<&str> {
    narrative.trim().lines().next()
}

/// Parse an auction listing price such as `"$1.23 (5 bids)"`
///
/// # Examples
///
/// ```
/// use appraisal_extractor::parse_listing_price;
///
/// assert_eq!(parse_listing_price("$1.23 (5 bids)"), Some(1.23));
/// assert_eq!(parse_listing_price("US $1,250.00"), Some(1250.0));
/// assert_eq!(parse_listing_price("no bids"), None);
/// ```
pub fn parse_listing_price(listing: &str) -> Option<f64> {
    first_amount(listing)
}

/// Build the pattern for a verdict tag line such as `ESTIMATED_VALUE: 120`
pub fn verdict_tag_pattern(tag: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?im)^\s*{}\s*[:=]\s*(?P<rest>.*)$",
        regex::escape(tag)
    ))
}
