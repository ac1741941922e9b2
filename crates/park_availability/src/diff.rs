use std::collections::HashSet;

use crate::types::{DiffEntry, Snapshot};

/// Compare two snapshots date by date.
///
/// Only dates present in `old` are considered: a date missing from `new` counts as
/// having no parks, and dates that only exist in `new` are not reported. Dates whose
/// park set did not change are left out of the result.
pub fn diff_snapshots(old: &Snapshot, new: &Snapshot) -> Vec<DiffEntry> {
    let mut diffs = Vec::new();

    for (date, old_entry) in old {
        let mut remaining: HashSet<&str> = old_entry.parks.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        let mut entry = DiffEntry::new(date.as_str());

        let new_parks = new.get(date).map(|e| e.parks.as_slice()).unwrap_or_default();

        for park in new_parks {
            if !seen.insert(park.as_str()) {
                continue;
            }
            if !remaining.remove(park.as_str()) {
                entry.added.push(park.clone());
            }
        }

        // Keep the order the parks had in the old entry
        for park in &old_entry.parks {
            if remaining.remove(park.as_str()) {
                entry.removed.push(park.clone());
            }
        }

        if !entry.is_empty() {
            diffs.push(entry);
        }
    }

    log::debug!("Compared {} dates, {} changed", old.len(), diffs.len());

    diffs
}
