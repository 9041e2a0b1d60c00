//! Integration tests for the outline extraction pipeline.

use outpdf::{render, HeadingLevel, JsonFormat, OutlinePipeline, Span};

fn span(text: &str, size: f32, bold: bool, y: f32, page: u32) -> Span {
    Span::new(text, size, bold, 72.0, y, page)
}

/// A synthetic two-page report: title, two top-level sections on page 1,
/// two subsections on page 2, body text at 11pt throughout.
fn report_spans() -> Vec<Span> {
    vec![
        span("Annual Report", 24.0, true, 50.0, 1),
        span("Overview", 18.0, true, 120.0, 1),
        span(
            "The year in review covered substantial growth across all divisions of the company.",
            11.0,
            false,
            150.0,
            1,
        ),
        span(
            "Each region contributed to the overall result in meaningful ways.",
            11.0,
            false,
            165.0,
            1,
        ),
        span("Financials", 18.0, true, 300.0, 1),
        span(
            "Consolidated statements follow the accounting standards used last year.",
            11.0,
            false,
            330.0,
            1,
        ),
        span(
            "All figures are reported in thousands unless otherwise noted.",
            11.0,
            false,
            345.0,
            1,
        ),
        span("Revenue", 14.0, true, 80.0, 2),
        span(
            "Total revenue grew by twelve percent year over year.",
            11.0,
            false,
            110.0,
            2,
        ),
        span(
            "Subscription income remains the largest single component.",
            11.0,
            false,
            125.0,
            2,
        ),
        span("Costs", 14.0, true, 200.0, 2),
        span(
            "Operating costs held steady despite headcount growth.",
            11.0,
            false,
            230.0,
            2,
        ),
        span(
            "Infrastructure spending decreased after the migration completed.",
            11.0,
            false,
            245.0,
            2,
        ),
    ]
}

#[test]
fn test_report_outline_levels_and_order() {
    let pipeline = OutlinePipeline::new();
    let result = pipeline.run(&report_spans());

    assert_eq!(result.title, "Annual Report");

    let entries: Vec<(&str, HeadingLevel, u32)> = result
        .outline
        .iter()
        .map(|e| (e.text.as_str(), e.level, e.page))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("Overview", HeadingLevel::H1, 1),
            ("Financials", HeadingLevel::H1, 1),
            ("Revenue", HeadingLevel::H2, 2),
            ("Costs", HeadingLevel::H2, 2),
        ]
    );
}

#[test]
fn test_reading_order_invariant() {
    let pipeline = OutlinePipeline::new();
    let result = pipeline.run(&report_spans());

    let pages: Vec<u32> = result.outline.iter().map(|e| e.page).collect();
    let mut sorted = pages.clone();
    sorted.sort();
    assert_eq!(pages, sorted);
}

/// The worked threshold scenario: 11pt body, a 20pt block (ratio 1.82,
/// above the 1.8 boundary) and a 15pt block (ratio 1.36, above 1.15).
/// With the 20pt block selected as title, the 15pt block is the only
/// heading and takes H1.
#[test]
fn test_threshold_boundary_example() {
    let spans = vec![
        span("Introduction", 20.0, true, 60.0, 1),
        span("Background", 15.0, true, 150.0, 1),
        span(
            "This document describes the project at length in plain eleven point body text.",
            11.0,
            false,
            200.0,
            1,
        ),
        span(
            "Additional paragraphs keep the character-weighted body size firmly at eleven.",
            11.0,
            false,
            215.0,
            1,
        ),
    ];

    let pipeline = OutlinePipeline::new();
    let result = pipeline.run(&spans);

    assert_eq!(result.title, "Introduction");
    assert_eq!(result.outline.len(), 1);
    assert_eq!(result.outline[0].level, HeadingLevel::H1);
    assert_eq!(result.outline[0].text, "Background");
    assert_eq!(result.outline[0].page, 1);
}

#[test]
fn test_title_never_appears_in_outline() {
    let pipeline = OutlinePipeline::new();
    let result = pipeline.run(&report_spans());

    assert!(result.outline.iter().all(|e| e.text != result.title));
}

#[test]
fn test_determinism() {
    let spans = report_spans();

    let first = render::to_json(&OutlinePipeline::new().run(&spans), JsonFormat::Pretty).unwrap();
    let second = render::to_json(&OutlinePipeline::new().run(&spans), JsonFormat::Pretty).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_document() {
    let pipeline = OutlinePipeline::new();
    let result = pipeline.run(&[]);

    let json = render::to_json(&result, JsonFormat::Compact).unwrap();
    assert_eq!(json, r#"{"title":"","outline":[]}"#);
}

#[test]
fn test_no_headings_is_a_valid_answer() {
    let spans = vec![
        span(
            "A plain document with nothing but body text on its single page.",
            11.0,
            false,
            100.0,
            1,
        ),
        span(
            "No block here is larger or bolder than any other block.",
            11.0,
            false,
            140.0,
            1,
        ),
        span(
            "So the structural answer is an empty outline, not an error.",
            11.0,
            false,
            180.0,
            1,
        ),
    ];

    let pipeline = OutlinePipeline::new();
    let result = pipeline.run(&spans);

    assert!(!result.title.is_empty());
    assert!(result.outline.is_empty());
}

#[test]
fn test_page_number_never_promoted() {
    let spans = vec![
        span(
            "Body text on the first page establishing the baseline size.",
            11.0,
            false,
            100.0,
            1,
        ),
        span(
            "More first page body text to anchor the statistics.",
            11.0,
            false,
            115.0,
            1,
        ),
        span("7", 24.0, true, 60.0, 2),
        span(
            "Second page body text beneath the stray folio number.",
            11.0,
            false,
            200.0,
            2,
        ),
    ];

    let pipeline = OutlinePipeline::new();
    let result = pipeline.run(&spans);

    assert!(result.outline.is_empty());
}

#[test]
fn test_same_size_headings_share_a_level() {
    let spans = vec![
        span("Document Title", 24.0, true, 10.0, 1),
        span("Main Heading", 18.0, true, 60.0, 1),
        span(
            "Body paragraph one with enough characters to set the baseline at eleven points.",
            11.0,
            false,
            110.0,
            1,
        ),
        span("Second Heading", 18.1, true, 200.0, 1),
        span(
            "Body paragraph two continuing at the regular body size as before.",
            11.0,
            false,
            250.0,
            1,
        ),
        span(
            "Closing body paragraph rounding out the single page of text.",
            11.0,
            false,
            265.0,
            1,
        ),
    ];

    let pipeline = OutlinePipeline::new();
    let result = pipeline.run(&spans);

    // 18.0 and 18.1 are font-hinting noise, not two levels
    assert_eq!(result.outline.len(), 2);
    assert!(result
        .outline
        .iter()
        .all(|e| e.level == HeadingLevel::H1));
}
