use crate::parks::display_name;
use crate::types::{AvailabilityEntry, DiffEntry};

/// Render diffs as the plain-text body of a change notification.
///
/// Each date gets a header line followed by an `Added:` and/or `Removed:` block.
/// Empty blocks are omitted, and an empty diff list renders as an empty string.
pub fn format_diff(diffs: &[DiffEntry]) -> String {
    let mut out = String::new();

    for diff in diffs {
        out.push_str(&format!("{}:\n", diff.date));

        if !diff.added.is_empty() {
            out.push_str("  Added:\n");
            for park in &diff.added {
                out.push_str(&format!("    + {}\n", display_name(park)));
            }
        }

        if !diff.removed.is_empty() {
            out.push_str("  Removed:\n");
            for park in &diff.removed {
                out.push_str(&format!("    - {}\n", display_name(park)));
            }
        }
    }

    out
}

/// Render the current availability, one line per date in the given order
pub fn format_summary(entries: &[AvailabilityEntry]) -> String {
    let mut out = String::from("Availability\n");

    for entry in entries {
        let names: Vec<_> = entry.parks.iter().map(|p| display_name(p)).collect();
        out.push_str(&format!("{}: {}\n", entry.date, names.join(", ")));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_diff() {
        assert_eq!(format_diff(&[]), "");
    }

    #[test]
    fn test_format_added_only_omits_removed_block() {
        let diff = DiffEntry {
            date: "2024-01-01".to_string(),
            added: vec!["80007944".to_string()],
            removed: vec![],
        };

        let text = format_diff(&[diff]);

        assert_eq!(text, "2024-01-01:\n  Added:\n    + Magic Kingdom\n");
        assert!(!text.contains("Removed"));
    }

    #[test]
    fn test_format_added_and_removed() {
        let diffs = vec![
            DiffEntry {
                date: "2024-01-01".to_string(),
                added: vec!["80007823".to_string()],
                removed: vec!["80007838".to_string()],
            },
            DiffEntry {
                date: "2024-01-02".to_string(),
                added: vec![],
                removed: vec!["80007998".to_string(), "99999999".to_string()],
            },
        ];

        let expected = "\
2024-01-01:
  Added:
    + Animal Kingdom
  Removed:
    - Epcot
2024-01-02:
  Removed:
    - Hollywood Studios
    - Unknown park (99999999)
";
        assert_eq!(format_diff(&diffs), expected);
    }

    #[test]
    fn test_format_summary() {
        let entries = vec![
            AvailabilityEntry::new(
                "2024-01-02",
                "partial",
                vec!["80007838".to_string(), "80007944".to_string()],
            ),
            AvailabilityEntry::new("2024-01-01", "none", vec![]),
        ];

        assert_eq!(
            format_summary(&entries),
            "Availability\n2024-01-02: Epcot, Magic Kingdom\n2024-01-01: \n"
        );
    }
}
