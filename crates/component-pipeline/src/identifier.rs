//! Component identifiers derived from file names.

/// The extension of component source files.
pub const DEFAULT_EXTENSION: &str = ".html";

/// Derives the exported symbol name for a component from its file name.
///
/// `extension` is removed only when `base_name` actually ends with it and
/// something remains in front of it. Every character outside
/// `[A-Za-z0-9_$]` is then replaced with `_`, one underscore per character.
/// A leading digit is kept. An empty name becomes `_`.
///
/// ```
/// use component_pipeline::component_identifier;
///
/// assert_eq!(component_identifier("My Comp.html", ".html"), "My_Comp");
/// assert_eq!(component_identifier("a-b.html", ".html"), "a_b");
/// ```
pub fn component_identifier(base_name: &str, extension: &str) -> String {
    let stem = match base_name.strip_suffix(extension) {
        Some(stem) if !extension.is_empty() && !stem.is_empty() => stem,
        _ => base_name,
    };

    if stem.is_empty() {
        return "_".to_string();
    }

    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
