//! Content query builder.
//!
//! Translates listing UI state ([`QueryFilter`]) into one declarative
//! [`RemoteQuery`]. Pure: no I/O, and the same inputs always produce
//! structurally equal queries.

use curator_client::{Filter, RemoteQuery};
use curator_types::{ContentType, QueryFilter};

/// Tag value the listing pages use for "no category".
const ALL_TAGS: &str = "all";

/// Build the listing query for `content_type`.
///
/// The visibility predicate (approved videos, published posts) is always
/// the first filter; nothing in `filter` can remove it.
pub fn build_query(content_type: ContentType, filter: &QueryFilter) -> RemoteQuery {
    let (column, value) = content_type.visibility();
    let mut query = RemoteQuery::from(content_type.table()).eq(column, value);

    let term = filter.search_term.trim();
    if !term.is_empty() {
        query = query.or(vec![
            Filter::ilike("title", term),
            Filter::ilike(content_type.secondary_text_column(), term),
        ]);
    }

    let tag = filter.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());
    if let Some(tag) = tag.filter(|t| !t.eq_ignore_ascii_case(ALL_TAGS)) {
        query = query.contains(content_type.tag_column(), vec![tag.to_string()]);
    }

    if filter.featured_only {
        query = query.eq("is_featured", true);
    }

    let (from, to) = filter.row_range();
    query
        .order(filter.sort.column(content_type), filter.sort.ascending())
        .range(from, to)
        .count_exact()
}

/// Newest visible rows of `content_type`, without paging or count.
pub fn latest_query(content_type: ContentType, limit: u64) -> RemoteQuery {
    let (column, value) = content_type.visibility();
    RemoteQuery::from(content_type.table())
        .eq(column, value)
        .order(content_type.date_column(), false)
        .limit(limit.max(1))
}

#[cfg(test)]
#[path = "query_builder_tests.rs"]
mod query_builder_tests;
