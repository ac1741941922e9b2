//! Park identifiers used by the availability calendar.

use std::borrow::Cow;

/// Known park identifiers and their display names
pub const PARKS: &[(&str, &str)] = &[
    ("80007838", "Epcot"),
    ("80007823", "Animal Kingdom"),
    ("80007944", "Magic Kingdom"),
    ("80007998", "Hollywood Studios"),
    ("00000000", "Test Park"),
];

/// Look up the display name for a park identifier
pub fn park_name(id: &str) -> Option<&'static str> {
    PARKS
        .iter()
        .find(|(park_id, _)| *park_id == id)
        .map(|(_, name)| *name)
}

/// Display name for a park, falling back to a placeholder for unknown identifiers
pub fn display_name(id: &str) -> Cow<'static, str> {
    match park_name(id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("Unknown park ({})", id)),
    }
}
