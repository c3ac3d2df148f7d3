use chrono::{TimeZone, Utc};
use sketch_io::{write_png, ExportConfig};

#[test]
fn written_png_decodes_to_same_pixels() {
    let config = ExportConfig {
        directory: "target/test_exports".into(),
        file_prefix: "drawing".into(),
    };
    let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

    let mut rgba = Vec::new();
    for i in 0..6u8 {
        rgba.extend_from_slice(&[i * 40, 255 - i * 40, 7, if i == 5 { 0 } else { 255 }]);
    }

    let path = write_png(&config, &rgba, 3, 2, now).unwrap();
    assert!(path.ends_with("drawing-2026-01-02T03-04-05.png"));

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.into_raw(), rgba);
}
