#![cfg(test)]
//! The desktop build embeds the shared theme (`ui/assets/theme/main.css`)
//! instead of shipping an asset directory. A truncated file or broken path
//! would only degrade styling at runtime, so check it here.
//!
//! If the theme moves, update this test and the `include_str!` constant in
//! `desktop/src/main.rs` together.

const EMBEDDED_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

#[test]
fn embedded_css_file_exists_and_is_not_empty() {
    assert!(
        !EMBEDDED_CSS.trim().is_empty(),
        "Embedded CSS file appears to be empty."
    );
}

#[test]
fn embedded_css_defines_theme_tokens() {
    let required = [
        "--color-bg",
        "--color-positive",
        "--color-negative",
        "--radius-card",
        "body {",
    ];
    for token in required {
        assert!(
            EMBEDDED_CSS.contains(token),
            "Expected token `{token}` missing from embedded CSS"
        );
    }
}
