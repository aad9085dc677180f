use super::*;
use crate::error::ErrorCode;
use crate::panel::PanelKind;
use crate::panel::test_helpers::png_bytes;

fn uri_for(path: &Path) -> String {
    Url::from_file_path(path).unwrap().to_string()
}

// --- lenient parsing ---

#[test]
fn non_uri_is_raw_string() {
    let panel = resolve_reference("hello world").unwrap();
    assert_eq!(panel, Panel::RawString("hello world".into()));
}

#[test]
fn unknown_scheme_is_raw_string() {
    let panel = resolve_reference("https://example.com/vision").unwrap();
    assert_eq!(panel, Panel::RawString("https://example.com/vision".into()));
}

#[test]
fn color_reference_resolves_channels() {
    let panel = resolve_reference("color://10,20,30,40").unwrap();
    assert_eq!(panel, Panel::Color(Color::new(10, 20, 30, 40)));
}

#[test]
fn color_scheme_is_case_insensitive() {
    let panel = resolve_reference("COLOR://10,20,30,40").unwrap();
    assert_eq!(panel, Panel::Color(Color::new(10, 20, 30, 40)));
}

#[test]
fn color_with_three_components_is_transparent() {
    let panel = resolve_reference("color://1,2,3").unwrap();
    assert_eq!(panel, Panel::Color(Color::TRANSPARENT));
}

#[test]
fn color_with_five_components_is_transparent() {
    assert_eq!(parse_color("1,2,3,4,5"), Color::TRANSPARENT);
}

#[test]
fn color_non_numeric_component_reads_zero() {
    assert_eq!(parse_color("1,x,3,4"), Color::new(1, 0, 3, 4));
}

#[test]
fn color_out_of_range_components_saturate() {
    assert_eq!(parse_color("70000,-5,3,4"), Color::new(u16::MAX, 0, 3, 4));
}

// --- round trip ---

#[test]
fn color_round_trips_through_reference() {
    let samples = [
        Color::TRANSPARENT,
        Color::new(u16::MAX, u16::MAX, u16::MAX, u16::MAX),
        Color::from_rgba8(0x12, 0x34, 0x56, 0x78),
        Color::new(1, 65534, 257, 32768),
    ];
    for color in samples {
        let reference = color_reference(color);
        assert_eq!(resolve_reference(&reference).unwrap(), Panel::Color(color), "{reference}");
    }
}

#[test]
fn every_eight_bit_channel_round_trips() {
    for v in 0..=u8::MAX {
        let color = Color::from_rgba8(v, v, v, v);
        assert_eq!(parse_color(&format_color(color)), color);
    }
}

#[test]
fn format_color_is_comma_separated() {
    assert_eq!(format_color(Color::new(10, 20, 30, 40)), "10,20,30,40");
}

// --- files ---

#[test]
fn file_reference_reads_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    std::fs::write(&path, "keep going").unwrap();

    let panel = resolve_reference(&uri_for(&path)).unwrap();
    assert_eq!(panel, Panel::Text { markdown: "keep going".into() });
}

#[test]
fn file_reference_reads_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Beach.PNG");
    std::fs::write(&path, png_bytes(8, 4)).unwrap();

    let panel = resolve_reference(&uri_for(&path)).unwrap();
    assert_eq!(panel.kind(), PanelKind::Image);
}

#[test]
fn missing_file_is_a_retryable_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone.txt");

    let err = resolve_reference(&uri_for(&path)).unwrap_err();
    assert_eq!(err.error_code(), "E_FILE_READ");
    assert!(err.retryable());
}

#[test]
fn unsupported_file_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anim.gif");
    std::fs::write(&path, b"GIF89a").unwrap();

    let err = resolve_reference(&uri_for(&path)).unwrap_err();
    assert!(matches!(err, PanelError::UnsupportedFileType(_)));
}

#[test]
fn file_reference_makes_absolute_uri() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    let uri = file_reference(&path).unwrap();
    assert_eq!(uri.scheme(), "file");
    assert_eq!(uri.to_file_path().unwrap(), path);
}
