/// Derives the icon identifier from a node's display name.
///
/// The name is lower-cased and accepted only if it is non-empty and made entirely of
/// ASCII letters, digits and underscores ("Sync_Disabled" -> "sync_disabled").
pub fn extract_icon_name(display_name: &str) -> Option<String> {
    let name = display_name.to_lowercase();
    if !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        Some(name)
    } else {
        None
    }
}
