// Host-side tests for the gallery data model.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod gallery {
    pub mod model {
        include!("../src/gallery/model.rs");
    }
}

use gallery::model::*;

const MANIFEST: &str = r#"[
  {
    "title": "Nebula Drift",
    "year": 2023,
    "medium": "Acrylic on canvas",
    "dimensions": "60 x 80 cm",
    "description": "Blue and violet layers.",
    "thumbnailUrl": "images/thumbs/nebula.webp",
    "imageUrl": "images/full/nebula.webp",
    "sold": true
  },
  {
    "title": "Aurora",
    "year": "2021",
    "medium": "Oil on linen",
    "dimensions": "40 x 40 cm",
    "thumbnailRef": "images/thumbs/aurora.webp",
    "imageRef": "images/full/aurora.webp"
  },
  {
    "title": "Low Tide",
    "year": 2022,
    "medium": "Ink",
    "dimensions": "30 x 42 cm",
    "description": "",
    "thumbnailUrl": "images/thumbs/tide.webp",
    "imageUrl": "images/full/tide.webp",
    "sold": false
  }
]"#;

fn loaded() -> Gallery {
    let mut g = Gallery::default();
    g.apply_load(parse_manifest(MANIFEST)).expect("manifest loads");
    g
}

fn titles(layout: &GalleryLayout) -> Vec<&str> {
    match layout {
        GalleryLayout::Tiles(tiles) => tiles.iter().map(|t| t.alt.as_str()).collect(),
        GalleryLayout::Placeholder => panic!("expected tiles"),
    }
}

#[test]
fn manifest_accepts_numeric_and_text_years_and_both_field_names() {
    let list = parse_manifest(MANIFEST).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].year, "2023");
    assert_eq!(list[1].year, "2021");
    assert_eq!(list[1].thumbnail_url, "images/thumbs/aurora.webp");
    assert_eq!(list[1].image_url, "images/full/aurora.webp");
    assert!(!list[1].sold);
    assert_eq!(list[1].description, None);
}

#[test]
fn malformed_manifest_is_a_parse_error() {
    let err = parse_manifest(r#"{"title": "not a list"}"#).unwrap_err();
    assert!(matches!(err, ManifestError::Parse(_)));
    let err = parse_manifest("not json").unwrap_err();
    assert!(matches!(err, ManifestError::Parse(_)));
}

#[test]
fn malformed_entries_do_not_reject_the_manifest() {
    let text = r#"[
      {"title": "Kept", "year": 2020, "thumbnailUrl": "t.webp", "imageUrl": "i.webp", "sold": true},
      {"title": "Odd", "year": null, "sold": null, "medium": 7, "description": ["x"]},
      {"title": 42, "sold": "yes", "imageRef": false},
      "not an object",
      {}
    ]"#;
    let list = parse_manifest(text).unwrap();
    assert_eq!(list.len(), 4);

    assert_eq!(list[0].title, "Kept");
    assert!(list[0].sold);

    let odd = &list[1];
    assert_eq!(odd.year, "");
    assert!(!odd.sold);
    assert_eq!(odd.medium, "7");
    assert_eq!(odd.description, None);
    assert_eq!(odd.thumbnail_url, "");

    assert_eq!(list[2].title, "42");
    assert!(!list[2].sold);
    assert_eq!(list[2].image_url, "");
    assert_eq!(list[3], Artwork::default());

    let mut g = Gallery::default();
    g.apply_load(Ok(list)).unwrap();
    assert_eq!(
        titles(&g.layout(&RenderOptions::default())),
        vec!["Kept", "Odd", "42", ""]
    );
}

#[test]
fn non_success_status_is_reported() {
    assert!(check_status(200).is_ok());
    assert!(check_status(204).is_ok());
    let err = check_status(404).unwrap_err();
    assert!(matches!(err, ManifestError::Http { status: 404 }));
    assert_eq!(err.to_string(), "failed to load artwork manifest (404)");
    assert!(check_status(500).is_err());
    assert!(check_status(304).is_err());
}

#[test]
fn not_ready_gallery_shows_placeholder() {
    let g = Gallery::default();
    assert!(!g.is_ready());
    assert_eq!(g.layout(&RenderOptions::default()), GalleryLayout::Placeholder);
}

#[test]
fn failed_load_leaves_gallery_empty_and_shows_placeholder() {
    let mut g = loaded();
    let result = check_status(404).and_then(|_| parse_manifest(MANIFEST));
    let err = g.apply_load(result).unwrap_err();
    assert!(err.to_string().contains("404"));
    assert!(!g.is_ready());
    assert!(g.artworks().is_empty());
    assert_eq!(g.layout(&RenderOptions::default()), GalleryLayout::Placeholder);
}

#[test]
fn empty_manifest_shows_placeholder() {
    let mut g = Gallery::default();
    g.apply_load(parse_manifest("[]")).unwrap();
    assert!(g.is_ready());
    assert_eq!(g.layout(&RenderOptions::default()), GalleryLayout::Placeholder);
}

#[test]
fn tiles_follow_manifest_order_by_default() {
    let g = loaded();
    let layout = g.layout(&RenderOptions::default());
    assert_eq!(titles(&layout), vec!["Nebula Drift", "Aurora", "Low Tide"]);
}

#[test]
fn filter_and_sort_work_on_a_copy() {
    let g = loaded();
    let options = RenderOptions::default()
        .filter(|a| !a.sold)
        .sort(|a, b| a.title.cmp(&b.title));
    assert_eq!(titles(&g.layout(&options)), vec!["Aurora", "Low Tide"]);

    let by_year = RenderOptions::default().sort(|a, b| b.year.cmp(&a.year));
    assert_eq!(
        titles(&g.layout(&by_year)),
        vec!["Nebula Drift", "Low Tide", "Aurora"]
    );

    let order: Vec<&str> = g.artworks().iter().map(|a| a.title.as_str()).collect();
    assert_eq!(order, vec!["Nebula Drift", "Aurora", "Low Tide"]);
}

#[test]
fn filter_that_matches_nothing_yields_no_tiles() {
    let g = loaded();
    let none = RenderOptions::default().filter(|_| false);
    assert_eq!(g.layout(&none), GalleryLayout::Tiles(vec![]));
}

#[test]
fn tiles_carry_thumbnail_and_sold_label() {
    let g = loaded();
    let GalleryLayout::Tiles(tiles) = g.layout(&RenderOptions::default()) else {
        panic!("expected tiles");
    };
    assert_eq!(tiles[0].thumbnail_url, "images/thumbs/nebula.webp");
    assert_eq!(tiles[0].sold_label, SOLD_TEXT);
    assert_eq!(tiles[1].sold_label, "");
    assert_eq!(tiles[0].detail.image_url, "images/full/nebula.webp");
}

#[test]
fn detail_view_shows_status_and_optional_description() {
    let list = parse_manifest(MANIFEST).unwrap();
    let sold = DetailView::from(&list[0]);
    assert_eq!(sold.status, SOLD_TEXT);
    assert_eq!(sold.description.as_deref(), Some("Blue and violet layers."));
    assert_eq!(sold.medium, "Acrylic on canvas");
    assert_eq!(sold.dimensions, "60 x 80 cm");

    let available = DetailView::from(&list[1]);
    assert_eq!(available.status, AVAILABLE_TEXT);
    assert_eq!(available.description, None);

    // an empty description is treated as absent
    assert_eq!(DetailView::from(&list[2]).description, None);
}

#[test]
fn container_attributes_select_filter_and_order() {
    let g = loaded();
    let options = RenderOptions::from_attrs(Some("available"), Some("year-desc"));
    assert_eq!(titles(&g.layout(&options)), vec!["Low Tide", "Aurora"]);

    let options = RenderOptions::from_attrs(Some("Sold"), None);
    assert_eq!(titles(&g.layout(&options)), vec!["Nebula Drift"]);

    let options = RenderOptions::from_attrs(Some("all"), Some("title"));
    assert_eq!(
        titles(&g.layout(&options)),
        vec!["Aurora", "Low Tide", "Nebula Drift"]
    );

    let options = RenderOptions::from_attrs(None, Some("year"));
    assert_eq!(
        titles(&g.layout(&options)),
        vec!["Aurora", "Low Tide", "Nebula Drift"]
    );

    // unknown names leave the manifest order untouched
    let options = RenderOptions::from_attrs(Some("cheap"), Some("price"));
    assert_eq!(
        titles(&g.layout(&options)),
        vec!["Nebula Drift", "Aurora", "Low Tide"]
    );
}

#[test]
fn numeric_years_sort_by_value() {
    let mk = |title: &str, year: &str| Artwork {
        title: title.into(),
        year: year.into(),
        ..Artwork::default()
    };
    let mut list = vec![mk("a", "999"), mk("b", "2001"), mk("c", "circa 1990")];
    list.sort_by(|x, y| ArtworkSort::Year.compare(x, y));
    let order: Vec<&str> = list.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
}

#[test]
fn layout_details_follow_tile_order() {
    let g = loaded();
    let layout = g.layout(&RenderOptions::from_attrs(None, Some("title-desc")));
    let details = layout.details();
    assert_eq!(details.len(), 3);
    assert_eq!(details[0].title, "Nebula Drift");
    assert_eq!(details[2].title, "Aurora");
    assert!(GalleryLayout::Placeholder.details().is_empty());
}
