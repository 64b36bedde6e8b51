//! Trending categories and how each one is fetched upstream.
//!
//! Categories with a YouTube video category id use the most-popular chart.
//! The rest have no usable upstream category and are approximated by a
//! keyword search with a per-region phrase.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Phrase used for search-based categories in regions without their own phrase.
pub const FALLBACK_SEARCH_PHRASE: &str = "seniors lifestyle";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    /// Most-popular chart, optionally narrowed to an upstream category id.
    Chart(Option<&'static str>),
    /// Keyword search; phrases keyed by region code.
    Search(&'static [(&'static str, &'static str)]),
}

/// Phrase for `region`, or the fallback phrase when the region has none.
pub fn phrase_for_region(phrases: &[(&str, &'static str)], region: &str) -> &'static str {
    phrases
        .iter()
        .find(|(code, _)| *code == region)
        .map(|(_, phrase)| *phrase)
        .unwrap_or(FALLBACK_SEARCH_PHRASE)
}

const HEALTH_PHRASES: &[(&str, &str)] = &[
    ("KR", "건강 60대 시니어"),
    ("US", "health tips seniors 60+"),
    ("JP", "健康 60代 シニア"),
];

const RELIGION_PHRASES: &[(&str, &str)] = &[
    ("KR", "명상 힐링 설교"),
    ("US", "meditation spiritual"),
    ("JP", "瞑想 癒し"),
];

const COOKING_PHRASES: &[(&str, &str)] = &[
    ("KR", "요리 반찬 만들기"),
    ("US", "cooking recipes traditional"),
    ("JP", "料理 レシピ 伝統"),
];

const HOBBY_PHRASES: &[(&str, &str)] = &[
    ("KR", "텃밭 원예 취미"),
    ("US", "gardening hobby seniors"),
    ("JP", "園芸 趣味 シニア"),
];

lazy_static! {
    static ref CATEGORY_TABLE: HashMap<&'static str, CategorySource> = HashMap::from([
        ("all", CategorySource::Chart(None)),
        ("news", CategorySource::Chart(Some("25"))),
        ("education", CategorySource::Chart(Some("27"))),
        ("howto", CategorySource::Chart(Some("26"))),
        ("people", CategorySource::Chart(Some("22"))),
        ("travel", CategorySource::Chart(Some("19"))),
        ("music", CategorySource::Chart(Some("10"))),
        ("health", CategorySource::Search(HEALTH_PHRASES)),
        ("religion", CategorySource::Search(RELIGION_PHRASES)),
        ("cooking", CategorySource::Search(COOKING_PHRASES)),
        ("hobby", CategorySource::Search(HOBBY_PHRASES)),
    ]);
}

/// Resolve a category name; unknown names behave like `all`.
pub fn resolve_category(name: &str) -> CategorySource {
    CATEGORY_TABLE
        .get(name)
        .copied()
        .unwrap_or(CategorySource::Chart(None))
}
