use super::*;

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgba8::parse_hex("#E8553D").unwrap(), Rgba8::rgb(0xE8, 0x55, 0x3D));
    assert_eq!(Rgba8::parse_hex("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::parse_hex("#11111180").unwrap(),
        Rgba8::rgba(0x11, 0x11, 0x11, 0x80)
    );
    assert_eq!(Rgba8::parse_hex("transparent").unwrap(), Rgba8::TRANSPARENT);
}

#[test]
fn hex_colors_reject_garbage() {
    assert!(Rgba8::parse_hex("E8553D").is_err());
    assert!(Rgba8::parse_hex("#E8553").is_err());
    assert!(Rgba8::parse_hex("#zzzzzz").is_err());
}

#[test]
fn color_lerp_hits_endpoints() {
    let a = Rgba8::TRANSPARENT;
    let b = Rgba8::rgb(0xE8, 0x55, 0x3D);
    assert_eq!(Rgba8::lerp(a, b, 0.0), a);
    assert_eq!(Rgba8::lerp(a, b, 1.0), b);
    let mid = Rgba8::lerp(a, b, 0.5);
    assert_eq!(mid.a, 128);
}

#[test]
fn millis_elapsed_saturates() {
    assert_eq!(Millis(1500).secs_since(Millis(500)), 1.0);
    assert_eq!(Millis(100).secs_since(Millis(500)), 0.0);
}

#[test]
fn viewport_rejects_non_positive_height() {
    assert!(Viewport::new(0.0, 100.0).is_err());
    assert!(Viewport::new(800.0, -1.0).is_err());
    assert!(Viewport::new(800.0, 4000.0).is_ok());
}
