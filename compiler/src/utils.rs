use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // C++ identifier grammar, including the extended characters allowed by the standard
    // (see https://en.cppreference.com/w/cpp/language/identifiers).
    static ref IDENTIFIER: Regex = Regex::new(concat!(
        r"^[A-Za-z_\u{00a8}\u{00aa}\u{00ad}\u{00af}\u{00b2}-\u{00b5}\u{00b7}-\u{00ba}",
        r"\u{00bc}-\u{00be}\u{00c0}-\u{00d6}\u{00d8}-\u{00f6}\u{00f8}-\u{02ff}\u{0370}-\u{167f}",
        r"\u{1681}-\u{180d}\u{180f}-\u{1dbf}\u{1e00}-\u{1fff}\u{200b}-\u{200d}",
        r"\u{202a}-\u{202e}\u{203f}-\u{2040}\u{2054}\u{2060}-\u{20cf}\u{2100}-\u{218f}",
        r"\u{2460}-\u{24ff}\u{2776}-\u{2793}\u{2c00}-\u{2dff}\u{2e80}-\u{2fff}",
        r"\u{3004}-\u{3007}\u{3021}-\u{302f}\u{3031}-\u{d7ff}\u{f900}-\u{fd3d}",
        r"\u{fd40}-\u{fdcf}\u{fdf0}-\u{fe1f}\u{fe30}-\u{fe44}\u{fe47}-\u{fffd}]",
        r"[A-Za-z0-9_\u{00a8}\u{00aa}\u{00ad}\u{00af}\u{00b2}-\u{00b5}\u{00b7}-\u{00ba}",
        r"\u{00bc}-\u{00be}\u{00c0}-\u{00d6}\u{00d8}-\u{00f6}\u{00f8}-\u{167f}",
        r"\u{1681}-\u{180d}\u{180f}-\u{1fff}\u{200b}-\u{200d}",
        r"\u{202a}-\u{202e}\u{203f}-\u{2040}\u{2054}\u{2060}-\u{218f}",
        r"\u{2460}-\u{24ff}\u{2776}-\u{2793}\u{2c00}-\u{2dff}\u{2e80}-\u{2fff}",
        r"\u{3004}-\u{3007}\u{3021}-\u{302f}\u{3031}-\u{d7ff}\u{f900}-\u{fd3d}",
        r"\u{fd40}-\u{fdcf}\u{fdf0}-\u{fe44}\u{fe47}-\u{fffd}]*$",
    ))
    .unwrap();
}

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

pub fn is_valid_identifier(ident: &str) -> bool {
    !ident.is_empty() && IDENTIFIER.is_match(ident)
}
