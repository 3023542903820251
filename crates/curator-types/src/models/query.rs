//! Listing filter state and paginated results.

use serde::{Deserialize, Serialize};

/// The content kinds that have public listing pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Video,
    BlogPost,
}

impl ContentType {
    /// Backend table holding rows of this kind.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Video => "videos",
            Self::BlogPost => "blog_posts",
        }
    }

    /// Column/value pair every public query must be restricted to.
    pub fn visibility(&self) -> (&'static str, &'static str) {
        match self {
            Self::Video => ("is_approved", "true"),
            Self::BlogPost => ("status", "published"),
        }
    }

    /// Text column searched alongside `title`.
    pub fn secondary_text_column(&self) -> &'static str {
        match self {
            Self::Video => "description",
            Self::BlogPost => "excerpt",
        }
    }

    /// Array column matched by the tag filter.
    pub fn tag_column(&self) -> &'static str {
        match self {
            Self::Video => "matched_keywords",
            Self::BlogPost => "tags",
        }
    }

    /// Column holding the publication date.
    pub fn date_column(&self) -> &'static str {
        match self {
            Self::Video => "publish_date",
            Self::BlogPost => "published_at",
        }
    }
}

/// Sort order offered on listing pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest first
    #[default]
    #[serde(alias = "publish_date", alias = "published_at")]
    Newest,
    /// Most viewed first
    ViewCount,
    /// Alphabetical
    Title,
}

impl SortKey {
    /// Backend column for this key on the given content type.
    pub fn column(&self, content_type: ContentType) -> &'static str {
        match self {
            Self::Newest => content_type.date_column(),
            Self::ViewCount => "view_count",
            Self::Title => "title",
        }
    }

    /// Alphabetical sorts ascend; date and popularity sorts descend.
    pub fn ascending(&self) -> bool {
        matches!(self, Self::Title)
    }
}

/// Page size of the public video grid.
pub const VIDEOS_PER_PAGE: u32 = 12;
/// Page size of the public blog listing.
pub const POSTS_PER_PAGE: u32 = 9;

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    VIDEOS_PER_PAGE
}

/// UI filter, sort and page state for one listing request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryFilter {
    /// Case-insensitive substring searched in title and the secondary text column
    #[serde(default, alias = "search")]
    pub search_term: String,
    /// Tag/category the item must carry
    #[serde(default, alias = "category")]
    pub tag: Option<String>,
    /// Sort order
    #[serde(default, alias = "sort_by")]
    pub sort: SortKey,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Only featured items
    #[serde(default)]
    pub featured_only: bool,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            tag: None,
            sort: SortKey::default(),
            page: default_page(),
            page_size: default_page_size(),
            featured_only: false,
        }
    }
}

impl QueryFilter {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Page number clamped to at least 1.
    pub fn effective_page(&self) -> u32 {
        self.page.max(1)
    }

    /// Page size clamped to at least 1.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.max(1)
    }

    /// Inclusive zero-based row window `(from, to)` for the current page.
    pub fn row_range(&self) -> (u64, u64) {
        let size = u64::from(self.effective_page_size());
        let from = u64::from(self.effective_page() - 1) * size;
        (from, from + size - 1)
    }
}

/// One page of listing results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,
    /// Matching rows across all pages
    pub total_count: u64,
    /// 1-based page number
    pub page: u32,
    /// Requested page size
    pub page_size: u32,
    /// `ceil(total_count / page_size)`
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, page: u32, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            items,
            total_count,
            page: page.max(1),
            page_size,
            total_pages: total_count.div_ceil(u64::from(page_size)),
        }
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_row_range_first_and_third_page() {
        let filter = QueryFilter::default().with_page(1, 12);
        assert_eq!(filter.row_range(), (0, 11));

        let filter = QueryFilter::default().with_page(3, 12);
        assert_eq!(filter.row_range(), (24, 35));
    }

    #[test]
    fn test_row_range_clamps_degenerate_input() {
        let filter = QueryFilter::default().with_page(0, 0);
        assert_eq!(filter.row_range(), (0, 0));
    }

    #[test]
    fn test_sort_key_accepts_original_wire_names() {
        let key: SortKey = serde_json::from_str("\"publish_date\"").unwrap();
        assert_eq!(key, SortKey::Newest);
        let key: SortKey = serde_json::from_str("\"published_at\"").unwrap();
        assert_eq!(key, SortKey::Newest);
        let key: SortKey = serde_json::from_str("\"view_count\"").unwrap();
        assert_eq!(key, SortKey::ViewCount);
    }

    #[test]
    fn test_sort_key_columns() {
        assert_eq!(SortKey::Newest.column(ContentType::Video), "publish_date");
        assert_eq!(SortKey::Newest.column(ContentType::BlogPost), "published_at");
        assert!(SortKey::Title.ascending());
        assert!(!SortKey::ViewCount.ascending());
    }

    #[test]
    fn test_page_total_pages() {
        let page: Page<u8> = Page::new(vec![], 25, 1, 12);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(!page.has_previous());

        let empty: Page<u8> = Page::new(vec![], 0, 1, 12);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next());
    }

    #[test]
    fn test_filter_defaults_from_empty_query() {
        let filter: QueryFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter, QueryFilter::default());
    }
}
