#![forbid(unsafe_code)]

//! Font metadata, catalog search, and font-stack helpers.
//!
//! [`FontQuery`] and [`FontPage`] mirror the paginated
//! `GET /api/google-fonts?q=&limit=&offset=&category=` endpoint;
//! [`FontCatalog::search`] is its in-process implementation. [`FontSearch`]
//! tracks the client side of infinite scroll, where only the latest query
//! may land results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_LIMIT: usize = 50;
pub const MAX_FONT_LIMIT: usize = 100;

/// Generic family names that never identify a concrete font.
const SYSTEM_FONTS: &[&str] = &[
    "ui-sans-serif",
    "ui-serif",
    "ui-monospace",
    "system-ui",
    "sans-serif",
    "serif",
    "monospace",
    "cursive",
    "fantasy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontCategory {
    SansSerif,
    Serif,
    Monospace,
    Display,
    Handwriting,
}

impl FontCategory {
    pub const ALL: [Self; 5] = [
        Self::SansSerif,
        Self::Serif,
        Self::Monospace,
        Self::Display,
        Self::Handwriting,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SansSerif => "sans-serif",
            Self::Serif => "serif",
            Self::Monospace => "monospace",
            Self::Display => "display",
            Self::Handwriting => "handwriting",
        }
    }

    /// System fonts appended after a web font of this category.
    #[must_use]
    pub const fn fallback_stack(self) -> &'static str {
        match self {
            Self::SansSerif | Self::Display => "ui-sans-serif, system-ui, sans-serif",
            Self::Serif => "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif",
            Self::Monospace => "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace",
            Self::Handwriting => "cursive",
        }
    }
}

impl fmt::Display for FontCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| format!("unknown font category: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontInfo {
    pub family: String,
    pub category: FontCategory,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub variable: bool,
}

impl FontInfo {
    #[must_use]
    pub fn new(family: impl Into<String>, category: FontCategory) -> Self {
        Self {
            family: family.into(),
            category,
            variants: vec!["400".to_string()],
            variable: false,
        }
    }

    /// Full `font-family` value with the category fallbacks.
    #[must_use]
    pub fn font_family(&self) -> String {
        build_font_family(&self.family, self.category)
    }
}

/// Search parameters. `limit` is clamped to `1..=100` when applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontQuery {
    pub q: String,
    pub limit: usize,
    pub offset: usize,
    pub category: Option<FontCategory>,
}

impl Default for FontQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            limit: DEFAULT_FONT_LIMIT,
            offset: 0,
            category: None,
        }
    }
}

impl FontQuery {
    #[must_use]
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: FontCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_FONT_LIMIT)
    }

    /// Query string for the fonts endpoint, without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut query = format!(
            "q={}&limit={}&offset={}",
            urlencoding::encode(self.q.trim()),
            self.effective_limit(),
            self.offset
        );
        if let Some(category) = self.category {
            query.push_str("&category=");
            query.push_str(category.as_str());
        }
        query
    }

    fn matches(&self, font: &FontInfo) -> bool {
        let needle = self.q.trim().to_lowercase();
        self.category.is_none_or(|category| font.category == category)
            && (needle.is_empty() || font.family.to_lowercase().contains(&needle))
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontPage {
    pub fonts: Vec<FontInfo>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// An in-memory font list searchable like the fonts endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontCatalog {
    fonts: Vec<FontInfo>,
}

impl FontCatalog {
    #[must_use]
    pub fn new(fonts: Vec<FontInfo>) -> Self {
        Self { fonts }
    }

    /// Load from a JSON array of [`FontInfo`].
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    #[must_use]
    pub fn search(&self, query: &FontQuery) -> FontPage {
        let limit = query.effective_limit();
        let matching: Vec<&FontInfo> = self.fonts.iter().filter(|f| query.matches(f)).collect();
        let total = matching.len();
        let fonts: Vec<FontInfo> = matching
            .into_iter()
            .skip(query.offset)
            .take(limit)
            .cloned()
            .collect();
        let has_more = query.offset.saturating_add(fonts.len()) < total;
        FontPage {
            fonts,
            total,
            offset: query.offset,
            limit,
            has_more,
        }
    }
}

// ── Latest-wins search ──────────────────────────────────────────────────

/// Identifies one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchTicket {
    generation: u64,
    offset: usize,
}

/// A request the caller should send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRequest {
    pub ticket: SearchTicket,
    pub query: FontQuery,
}

/// Client-side state of a paginated font search.
///
/// Starting a new query invalidates every outstanding request; responses to
/// them are rejected by [`accept`](Self::accept).
#[derive(Debug, Clone, Default)]
pub struct FontSearch {
    generation: u64,
    query: FontQuery,
    fonts: Vec<FontInfo>,
    total: usize,
    has_more: bool,
    pending: Option<SearchTicket>,
}

impl FontSearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query from offset zero.
    pub fn begin(&mut self, query: FontQuery) -> FontRequest {
        self.generation += 1;
        self.query = query.with_offset(0);
        self.fonts.clear();
        self.total = 0;
        self.has_more = false;
        self.request(0)
    }

    /// Request the next page, unless one is in flight or none remain.
    pub fn load_more(&mut self) -> Option<FontRequest> {
        if self.pending.is_some() || !self.has_more {
            return None;
        }
        Some(self.request(self.fonts.len()))
    }

    fn request(&mut self, offset: usize) -> FontRequest {
        let ticket = SearchTicket {
            generation: self.generation,
            offset,
        };
        self.pending = Some(ticket);
        FontRequest {
            ticket,
            query: self.query.clone().with_offset(offset),
        }
    }

    /// Land a response. Returns `false` when the ticket is stale.
    pub fn accept(&mut self, ticket: SearchTicket, page: FontPage) -> bool {
        if self.pending != Some(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                "dropping stale font page"
            );
            return false;
        }
        self.pending = None;
        self.total = page.total;
        self.has_more = page.has_more;
        self.fonts.extend(page.fonts);
        true
    }

    #[must_use]
    pub fn fonts(&self) -> &[FontInfo] {
        &self.fonts
    }

    #[must_use]
    pub fn query(&self) -> &FontQuery {
        &self.query
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

// ── Font stacks ─────────────────────────────────────────────────────────

/// `family` followed by the fallbacks of its category.
#[must_use]
pub fn build_font_family(family: &str, category: FontCategory) -> String {
    format!("{}, {}", family.trim(), category.fallback_stack())
}

/// First concrete family of a `font-family` value, quotes removed.
///
/// Returns `None` for an empty value or when the stack starts with a
/// generic or system family.
#[must_use]
pub fn extract_font_family(value: &str) -> Option<String> {
    let first = value.split(',').next()?.trim();
    let clean: String = first.chars().filter(|c| *c != '"' && *c != '\'').collect();
    if clean.is_empty() || SYSTEM_FONTS.contains(&clean.to_lowercase().as_str()) {
        return None;
    }
    Some(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FontCatalog {
        FontCatalog::new(vec![
            FontInfo::new("Inter", FontCategory::SansSerif),
            FontInfo::new("Lora", FontCategory::Serif),
            FontInfo::new("Roboto", FontCategory::SansSerif),
            FontInfo::new("Roboto Mono", FontCategory::Monospace),
            FontInfo::new("Roboto Slab", FontCategory::Serif),
            FontInfo::new("Caveat", FontCategory::Handwriting),
        ])
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let page = catalog().search(&FontQuery::new("roBOTO"));
        let names: Vec<_> = page.fonts.iter().map(|f| f.family.as_str()).collect();
        assert_eq!(names, ["Roboto", "Roboto Mono", "Roboto Slab"]);
        assert_eq!(page.total, 3);
        assert!(!page.has_more);
    }

    #[test]
    fn search_filters_by_category() {
        let page = catalog().search(&FontQuery::new("").with_category(FontCategory::Serif));
        assert_eq!(page.total, 2);
        assert!(page.fonts.iter().all(|f| f.category == FontCategory::Serif));
    }

    #[test]
    fn pagination_reports_has_more() {
        let query = FontQuery::new("").with_limit(4);
        let first = catalog().search(&query);
        assert_eq!(first.fonts.len(), 4);
        assert!(first.has_more);
        let second = catalog().search(&query.with_offset(4));
        assert_eq!(second.fonts.len(), 2);
        assert!(!second.has_more);
        assert_eq!(second.total, 6);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(FontQuery::default().effective_limit(), 50);
        assert_eq!(FontQuery::new("").with_limit(0).effective_limit(), 1);
        assert_eq!(FontQuery::new("").with_limit(500).effective_limit(), 100);
        assert_eq!(catalog().search(&FontQuery::new("").with_limit(0)).fonts.len(), 1);
    }

    #[test]
    fn query_string_encodes_parameters() {
        let query = FontQuery::new("Open Sans")
            .with_category(FontCategory::SansSerif)
            .with_offset(50);
        assert_eq!(
            query.to_query_string(),
            "q=Open%20Sans&limit=50&offset=50&category=sans-serif"
        );
    }

    #[test]
    fn query_string_escapes_reserved_characters() {
        let query = FontQuery::new("  Fira & Co/Mono?  ").with_limit(500);
        assert_eq!(
            query.to_query_string(),
            "q=Fira%20%26%20Co%2FMono%3F&limit=100&offset=0"
        );
    }

    #[test]
    fn page_serializes_like_the_endpoint() {
        let page = catalog().search(&FontQuery::new("lora"));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["hasMore"], false);
        assert_eq!(json["fonts"][0]["category"], "serif");
    }

    #[test]
    fn catalog_loads_from_json() {
        let json = r#"[{"family":"Geist","category":"sans-serif","variable":true}]"#;
        let catalog = FontCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        let page = catalog.search(&FontQuery::default());
        assert!(page.fonts[0].variable);
        assert!(page.fonts[0].variants.is_empty());
    }

    #[test]
    fn latest_query_wins() {
        let catalog = catalog();
        let mut search = FontSearch::new();
        let stale = search.begin(FontQuery::new("ro"));
        let fresh = search.begin(FontQuery::new("lora"));

        assert!(!search.accept(stale.ticket, catalog.search(&stale.query)));
        assert!(search.fonts().is_empty());
        assert!(search.accept(fresh.ticket, catalog.search(&fresh.query)));
        assert_eq!(search.fonts().len(), 1);
        assert!(!search.is_loading());
    }

    #[test]
    fn load_more_appends_pages() {
        let catalog = catalog();
        let mut search = FontSearch::new();
        let first = search.begin(FontQuery::new("").with_limit(4));
        assert!(search.load_more().is_none(), "first page still in flight");
        assert!(search.accept(first.ticket, catalog.search(&first.query)));

        let next = search.load_more().unwrap();
        assert_eq!(next.query.offset, 4);
        assert!(search.accept(next.ticket, catalog.search(&next.query)));
        assert_eq!(search.fonts().len(), 6);
        assert!(!search.has_more());
        assert!(search.load_more().is_none());
        // A duplicate response for a landed ticket is ignored.
        assert!(!search.accept(next.ticket, catalog.search(&next.query)));
    }

    #[test]
    fn font_stacks() {
        assert_eq!(
            build_font_family("Inter", FontCategory::SansSerif),
            "Inter, ui-sans-serif, system-ui, sans-serif"
        );
        assert_eq!(
            FontInfo::new("Caveat", FontCategory::Handwriting).font_family(),
            "Caveat, cursive"
        );
        assert_eq!(
            extract_font_family("\"Roboto Mono\", monospace").as_deref(),
            Some("Roboto Mono")
        );
        assert_eq!(extract_font_family("ui-sans-serif, system-ui"), None);
        assert_eq!(extract_font_family(""), None);
    }

    #[test]
    fn category_parses_from_wire_names() {
        assert_eq!("monospace".parse::<FontCategory>(), Ok(FontCategory::Monospace));
        assert!("comic".parse::<FontCategory>().is_err());
    }
}
