//! Property tests for wrapping and page breaking.

use kontrak_layout::{wrap_line, PageLayout, Paginator, TextStyle};
use proptest::prelude::*;

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn arb_document() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9 ,.]{0,300}", 1..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn wrapping_keeps_text_and_respects_width(line in "[a-z ]{0,200}", columns in 1usize..40) {
        let rows = wrap_line(&line, columns);
        prop_assert!(!rows.is_empty());
        for row in &rows {
            prop_assert!(row.chars().count() <= columns);
        }
        prop_assert_eq!(compact(&rows.concat()), compact(&line));
    }

    #[test]
    fn line_that_fits_is_kept_verbatim(line in " {0,6}[a-z][a-z ]{0,40}[a-z]") {
        prop_assert_eq!(wrap_line(&line, 80), vec![line.clone()]);
    }

    #[test]
    fn pagination_never_drops_text(document in arb_document()) {
        let pagination = Paginator::paginate(&document, &PageLayout::default());
        let laid_out: String = pagination.placements.iter().map(|p| p.text()).collect();
        prop_assert_eq!(compact(&laid_out), compact(&document));
    }

    #[test]
    fn placements_stay_inside_the_usable_area(document in arb_document()) {
        let layout = PageLayout::default();
        let pagination = Paginator::paginate(&document, &layout);

        let mut previous = (0usize, f64::MIN);
        for placement in &pagination.placements {
            prop_assert!(placement.page < pagination.page_count);
            prop_assert!(placement.y >= layout.margin_top - 1e-9);
            prop_assert!(placement.bottom() <= layout.bottom() + 1e-6);
            // reading order: page, then top to bottom
            prop_assert!((placement.page, placement.y) > previous);
            previous = (placement.page, placement.y);
        }
        let titles = pagination
            .placements
            .iter()
            .filter(|p| p.style == TextStyle::Title)
            .count();
        prop_assert!(titles <= 1);
    }
}

#[test]
fn body_taller_than_a_page_spans_pages() {
    let layout = PageLayout::default();
    let paragraph = "The parties agree to the terms set out below. ".repeat(400);
    let document = format!("SERVICE AGREEMENT\n\n{paragraph}");

    let pagination = Paginator::paginate(&document, &layout);

    assert!(pagination.page_count >= 2);
    let body_rows: usize = pagination
        .placements
        .iter()
        .filter(|p| p.style == TextStyle::Body)
        .map(|p| p.rows.len())
        .sum();
    let expected_rows = wrap_line(&paragraph, layout.columns(TextStyle::Body)).len();
    assert_eq!(body_rows, expected_rows);
}
