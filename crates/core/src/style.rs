//! CSS style segments passed alongside `%c` placeholders

use crate::config::Configuration;

/// Join the declarations whose value is non-empty
///
/// Returns `None` when nothing remains, so the caller drops both the segment
/// and its `%c` placeholder.
fn segment(declarations: &[(&str, &str)]) -> Option<String> {
    let joined = declarations
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join(" ");

    (!joined.is_empty()).then_some(joined)
}

/// Style applied to the prefix: text color and background
pub fn prefix_style(config: &Configuration) -> Option<String> {
    segment(&[
        ("color", config.text_color.as_str()),
        ("background", config.background_color.as_str()),
    ])
}

/// Style applied to the label: font size and weight
pub fn label_style(config: &Configuration) -> Option<String> {
    segment(&[
        ("font-size", config.font_size.as_str()),
        ("font-weight", config.font_weight.as_str()),
    ])
}
