mod common;

use devis_pdf::{DiscountState, QuoteInput, output_file_name, read_quote_input, render_quote};

#[test]
fn renders_a_pdf_document() {
    let _ = env_logger::try_init();
    let quote = common::sample_quote();
    let rendered = render_quote(&quote, &DiscountState::none(), &common::options()).unwrap();
    assert!(rendered.bytes.starts_with(b"%PDF-"));
    assert_eq!(rendered.page_count, 1);
    assert_eq!(rendered.totals.total_including_tax, 1836.0);
    assert_eq!(common::count_occurrences(&rendered.bytes, b"/Count 1"), 1);
    assert!(common::count_occurrences(&rendered.bytes, b"/Helvetica-Bold") >= 1);
    assert!(common::count_occurrences(&rendered.bytes, b"/WinAnsiEncoding") >= 2);
}

#[test]
fn page_tree_matches_layout() {
    let _ = env_logger::try_init();
    let quote = common::quote_with_rows(40);
    let rendered = render_quote(&quote, &DiscountState::none(), &common::options()).unwrap();
    assert!(rendered.page_count >= 2);
    let count = format!("/Count {}", rendered.page_count);
    assert_eq!(common::count_occurrences(&rendered.bytes, count.as_bytes()), 1);
    let page_objects = common::count_occurrences(&rendered.bytes, b"/Type /Page")
        - common::count_occurrences(&rendered.bytes, b"/Type /Pages");
    assert_eq!(page_objects, rendered.page_count);
}

#[test]
fn output_is_byte_identical_across_runs() {
    let _ = env_logger::try_init();
    let quote = common::quote_with_rows(30);
    let discount = DiscountState::applied(150.0);
    let a = render_quote(&quote, &discount, &common::options()).unwrap();
    let b = render_quote(&quote, &discount, &common::options()).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn save_writes_quote_named_file() {
    let _ = env_logger::try_init();
    let dir = common::output_dir("save_named");
    let quote = common::sample_quote();
    let path = devis_pdf::save_quote_pdf(
        &quote,
        &DiscountState::none(),
        &common::options(),
        &dir,
    )
    .unwrap();
    assert_eq!(path, dir.join("quote-D-MAN-250622-002.pdf"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(!dir.join("quote-D-MAN-250622-002.pdf.part").exists());
}

#[test]
fn file_name_strips_path_separators() {
    let mut quote = common::sample_quote();
    quote.id = "2025/06\\7".into();
    assert_eq!(output_file_name(&quote), "quote-2025-06-7.pdf");
}

#[test]
fn quote_input_reads_from_json() {
    let dir = common::output_dir("json_input");
    let input = QuoteInput {
        quote: common::sample_quote(),
        discount: DiscountState::applied(100.0),
    };
    let path = dir.join("quote.json");
    std::fs::write(&path, serde_json::to_string_pretty(&input).unwrap()).unwrap();

    let read = read_quote_input(&path).unwrap();
    assert_eq!(read, input);
}

#[test]
fn missing_optional_fields_take_defaults() {
    let json = r#"{
        "quote": {
            "id": "D-1",
            "date": "2025-06-22",
            "issuer": {
                "name": "Atelier", "address": "", "phone": "", "email": "",
                "legal": {
                    "siret": "", "ape_code": "", "rcs": "", "legal_form": "",
                    "share_capital": "", "vat_number": ""
                }
            },
            "client": { "name": "Client", "address": "" },
            "line_items": [
                {
                    "description": "Pose",
                    "quantity": { "value": 2.0, "unit": "h" },
                    "unit_price": 50.0,
                    "tax_rate_percent": 10.0
                }
            ]
        }
    }"#;
    let input: QuoteInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.discount, DiscountState::none());
    assert_eq!(input.quote.currency.symbol(), "€");
    assert_eq!(input.quote.terms.validity_days, 30);

    let rendered = render_quote(&input.quote, &input.discount, &common::options()).unwrap();
    assert_eq!(rendered.totals.total_including_tax, 110.0);
}

#[test]
fn unreadable_input_is_an_io_error() {
    let err = read_quote_input(std::path::Path::new("tests/output/does-not-exist.json"))
        .unwrap_err();
    assert!(matches!(err, devis_pdf::Error::Io(_)));
}

#[test]
fn write_pdf_serializes_a_stamped_layout() {
    let quote = common::sample_quote();
    let totals = devis_pdf::compute_totals(&quote.line_items, &DiscountState::none());
    let doc = devis_pdf::layout_quote(&quote, &totals, &common::options()).stamp_footers(&quote);
    let info = devis_pdf::DocumentInfo {
        title: "Devis D-MAN-250622-002".into(),
        author: "Entreprise ABC".into(),
    };
    let bytes = devis_pdf::write_pdf(&doc, &info).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(common::count_occurrences(&bytes, b"(Devis D-MAN-250622-002)"), 1);
}
