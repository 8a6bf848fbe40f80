//! Controlled tag vocabulary and extraction

use serde::Serialize;

use crate::model::Post;

/// Default number of tags shown on a single post
pub const DEFAULT_POST_TAG_LIMIT: usize = 6;

/// Default number of entries in the site-wide tag cloud
pub const DEFAULT_CLOUD_LIMIT: usize = 12;

/// The site's standard vocabulary: currency pairs and trading concepts.
///
/// Order is meaningful — it drives per-post tag order and breaks ties in
/// the aggregate ranking.
pub const DEFAULT_TERMS: [&str; 35] = [
    "EUR/USD",
    "GBP/USD",
    "USD/JPY",
    "AUD/USD",
    "USD/CHF",
    "Forex",
    "Currency",
    "Trading",
    "Technical Analysis",
    "Fundamental Analysis",
    "Risk Management",
    "Psychology",
    "Candlestick",
    "Support",
    "Resistance",
    "Trend",
    "Breakout",
    "Volatility",
    "Leverage",
    "Hedging",
    "Central Banks",
    "Interest Rates",
    "Economic Calendar",
    "NFP",
    "GDP",
    "Fibonacci",
    "Moving Average",
    "RSI",
    "MACD",
    "Bollinger Bands",
    "Stop Loss",
    "Take Profit",
    "Position Sizing",
    "Drawdown",
    "Pip",
];

/// A tag and the number of posts mentioning it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// An ordered controlled vocabulary of domain terms
///
/// The list is injected configuration, not derived logic: deployments can
/// swap or extend it without touching the extraction code.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_TERMS.iter().map(|t| (*t).to_string()).collect())
    }
}

impl Vocabulary {
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Tags matching a single post, in vocabulary order, truncated to `limit`
    ///
    /// A term matches when its lowercase form appears as a substring of the
    /// lowercased title+content haystack. There is deliberately no
    /// word-boundary check: "Trend" matches inside "Trending".
    pub fn extract_tags(&self, title: &str, content: &str, limit: usize) -> Vec<String> {
        let haystack = format!("{} {}", title, content).to_lowercase();
        self.terms
            .iter()
            .filter(|term| haystack.contains(&term.to_lowercase()))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Site-wide tag popularity: for each term, the number of distinct posts
    /// whose title+excerpt+content mentions it
    ///
    /// Sorted by count descending; ties keep vocabulary order. Terms that
    /// match no post are omitted entirely.
    pub fn tag_counts(&self, posts: &[Post], limit: usize) -> Vec<TagCount> {
        let haystacks: Vec<String> = posts
            .iter()
            .map(|p| format!("{} {} {}", p.title, p.excerpt, p.content).to_lowercase())
            .collect();

        let mut counts: Vec<TagCount> = self
            .terms
            .iter()
            .filter_map(|term| {
                let needle = term.to_lowercase();
                let count = haystacks.iter().filter(|h| h.contains(&needle)).count();
                (count > 0).then(|| TagCount {
                    tag: term.clone(),
                    count,
                })
            })
            .collect();

        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(limit);
        counts
    }
}
