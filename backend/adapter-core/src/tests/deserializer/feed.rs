// Unit tests for collection deserializers

use crate::adapters::MediaFeed;
use crate::deserializer::FeedDeserializer;
use serde_json::json;

fn three_item_feed() -> MediaFeed {
    MediaFeed::new(json!({
        "meta": {"code": 200},
        "data": [
            {
                "id": "m1",
                "caption": {"text": "Harbour"},
                "images": {"standard_resolution": {"url": "https://cdn/m1.jpg"}},
                "location": {"name": "Lisbon"}
            },
            {
                "id": "m2",
                "caption": {"text": "Kitchen"},
                "images": {"standard_resolution": {"url": "https://cdn/m2.jpg"}}
            },
            {
                "id": "m3",
                "caption": null,
                "images": {"standard_resolution": {"url": "https://cdn/m3.jpg"}},
                "location": {"name": "Porto"}
            }
        ]
    }))
}

/// **VALUE**: Verifies N raw elements produce N wrappers in body order.
///
/// **BUG THIS CATCHES**: Would catch dropping or reordering elements during mapping.
#[test]
fn given_feed_with_three_elements_when_items_then_three_wrappers_in_order() {
    let feed = three_item_feed();

    let ids: Vec<_> = feed.items().iter().map(|item| item.id()).collect();

    assert_eq!(ids, vec![Some("m1"), Some("m2"), Some("m3")]);
}

/// **VALUE**: Verifies the location filter keeps items 1 and 3, in order, when
/// item 2 has no location.
///
/// **WHY THIS MATTERS**: This is the adapter's headline query. Order matters to
/// callers rendering a timeline.
///
/// **BUG THIS CATCHES**: Would catch an inverted predicate or a filter that sorts.
#[test]
fn given_middle_item_without_location_when_filtered_then_returns_first_and_third() {
    let feed = three_item_feed();

    let located = feed.items_with_location_present();

    assert_eq!(located.len(), 2);
    assert_eq!(located[0].id(), Some("m1"));
    assert_eq!(located[0].location_name(), Some("Lisbon"));
    assert_eq!(located[1].id(), Some("m3"));
    assert_eq!(located[1].location_name(), Some("Porto"));
}

/// **VALUE**: Verifies derived accessors read nested fields and tolerate gaps.
#[test]
fn given_items_when_accessors_called_then_absent_fields_are_none() {
    let feed = three_item_feed();
    let items = feed.items();

    assert_eq!(items[0].name(), Some("Harbour"));
    assert_eq!(items[0].image_url(), Some("https://cdn/m1.jpg"));
    assert_eq!(items[1].location_name(), None);
    assert!(!items[1].has_location());
    assert_eq!(items[2].name(), None);
}

/// **VALUE**: Verifies missing or non-array collections produce no items.
///
/// **BUG THIS CATCHES**: Would catch a panic when an error response has no `data`.
#[test]
fn given_missing_or_scalar_collection_when_items_then_empty() {
    let missing = MediaFeed::new(json!({"meta": {"code": 400}}));
    let scalar = MediaFeed::new(json!({"data": "nope"}));

    assert!(missing.items().is_empty());
    assert!(scalar.items().is_empty());
    assert!(missing.items_with_location_present().is_empty());
}

/// **VALUE**: Verifies a null location is treated as absent.
#[test]
fn given_null_location_when_filtered_then_item_excluded() {
    let feed = MediaFeed::new(json!({"data": [{"id": "a", "location": null}, {"id": "b", "location": {}}]}));

    let located = feed.filter_items(|item| item.has_location());

    assert_eq!(located.len(), 1);
    assert_eq!(located[0].id(), Some("b"));
}
