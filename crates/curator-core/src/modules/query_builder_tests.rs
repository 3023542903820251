use super::*;
use curator_client::query::{CountMode, Order, RowRange};
use curator_types::SortKey;

fn order(column: &str, ascending: bool) -> Vec<Order> {
    vec![Order { column: column.to_string(), ascending }]
}

#[test]
fn test_default_video_listing() {
    let query = build_query(ContentType::Video, &QueryFilter::default());

    assert_eq!(query.table, "videos");
    assert_eq!(query.filters, vec![Filter::eq("is_approved", "true")]);
    assert_eq!(query.order, order("publish_date", false));
    assert_eq!(query.range, Some(RowRange::new(0, 11)));
    assert_eq!(query.count, Some(CountMode::Exact));
}

#[test]
fn test_third_page_range() {
    let filter = QueryFilter::default().with_page(3, 12);
    let query = build_query(ContentType::Video, &filter);
    assert_eq!(query.range, Some(RowRange::new(24, 35)));
}

#[test]
fn test_degenerate_paging_is_clamped() {
    let filter = QueryFilter::default().with_page(0, 0);
    let query = build_query(ContentType::BlogPost, &filter);
    assert_eq!(query.range, Some(RowRange::new(0, 0)));
}

#[test]
fn test_search_targets_title_and_secondary_column() {
    let filter = QueryFilter::default().with_search("  halving  ");

    let videos = build_query(ContentType::Video, &filter);
    assert_eq!(
        videos.filters[1],
        Filter::Or(vec![Filter::ilike("title", "halving"), Filter::ilike("description", "halving")])
    );

    let posts = build_query(ContentType::BlogPost, &filter);
    assert_eq!(
        posts.filters[1],
        Filter::Or(vec![Filter::ilike("title", "halving"), Filter::ilike("excerpt", "halving")])
    );
}

#[test]
fn test_blank_search_adds_no_predicate() {
    let filter = QueryFilter::default().with_search("   ");
    let query = build_query(ContentType::Video, &filter);
    assert_eq!(query.filters.len(), 1);
}

#[test]
fn test_visibility_predicate_always_first() {
    let filter = QueryFilter {
        featured_only: true,
        ..QueryFilter::default().with_search("cash").with_tag("mining")
    };

    let posts = build_query(ContentType::BlogPost, &filter);
    assert_eq!(posts.filters[0], Filter::eq("status", "published"));
    assert_eq!(posts.filters.len(), 4);
    assert_eq!(posts.filters[2], Filter::contains("tags", vec!["mining".to_string()]));
    assert_eq!(posts.filters[3], Filter::eq("is_featured", "true"));
}

#[test]
fn test_tag_uses_array_column() {
    let filter = QueryFilter::default().with_tag("cashtokens");
    let query = build_query(ContentType::Video, &filter);
    assert_eq!(
        query.filters[1],
        Filter::contains("matched_keywords", vec!["cashtokens".to_string()])
    );
}

#[test]
fn test_all_tag_means_no_tag_filter() {
    let filter = QueryFilter::default().with_tag("All");
    let query = build_query(ContentType::BlogPost, &filter);
    assert_eq!(query.filters, vec![Filter::eq("status", "published")]);
}

#[test]
fn test_sort_direction_mapping() {
    let title = build_query(ContentType::Video, &QueryFilter::default().with_sort(SortKey::Title));
    assert_eq!(title.order, order("title", true));

    let views =
        build_query(ContentType::Video, &QueryFilter::default().with_sort(SortKey::ViewCount));
    assert_eq!(views.order, order("view_count", false));

    let newest_posts = build_query(ContentType::BlogPost, &QueryFilter::default());
    assert_eq!(newest_posts.order, order("published_at", false));
}

#[test]
fn test_identical_inputs_build_identical_queries() {
    let filter = QueryFilter::default().with_search("bch").with_tag("news").with_page(2, 9);
    assert_eq!(
        build_query(ContentType::BlogPost, &filter),
        build_query(ContentType::BlogPost, &filter)
    );
}

#[test]
fn test_search_without_matches_still_builds_full_query() {
    let filter = QueryFilter::default().with_search("zzzz-no-such-title");
    let query = build_query(ContentType::Video, &filter);

    assert_eq!(query.filters[0], Filter::eq("is_approved", "true"));
    assert_eq!(query.order, order("publish_date", false));
    assert_eq!(query.range, Some(RowRange::new(0, 11)));
    assert_eq!(query.count, Some(CountMode::Exact));
}

#[test]
fn test_latest_query() {
    let query = latest_query(ContentType::BlogPost, 3);
    assert_eq!(query.filters, vec![Filter::eq("status", "published")]);
    assert_eq!(query.order, order("published_at", false));
    assert_eq!(query.limit, Some(3));
    assert_eq!(query.count, None);
}
