use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Availability for a single calendar date as returned by the calendar API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
    /// Overall status for the date, e.g. `full`, `partial` or `none`
    #[serde(default)]
    pub availability: Option<String>,
    /// Identifiers of the parks that can be booked on this date
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parks: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl AvailabilityEntry {
    /// Create a new entry
    pub fn new(date: impl Into<String>, availability: impl Into<String>, parks: Vec<String>) -> Self {
        Self {
            date: date.into(),
            availability: Some(availability.into()),
            parks,
        }
    }
}

/// All known availability keyed by date.
///
/// Persisted as a JSON object mapping each date to its [`AvailabilityEntry`].
pub type Snapshot = BTreeMap<String, AvailabilityEntry>;

/// Collapse a list of entries into a [`Snapshot`]. The last entry for a date wins.
pub fn build_snapshot<I>(entries: I) -> Snapshot
where
    I: IntoIterator<Item = AvailabilityEntry>,
{
    entries
        .into_iter()
        .map(|entry| (entry.date.clone(), entry))
        .collect()
}

/// Parks that became bookable or stopped being bookable on a date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffEntry {
    /// Date the change applies to
    pub date: String,
    /// Park identifiers available now but not previously
    pub added: Vec<String>,
    /// Park identifiers available previously but not now
    pub removed: Vec<String>,
}

impl DiffEntry {
    /// Empty diff for a date
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }

    /// True when nothing was added or removed
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Compact `+<id>` / `-<id>` markers, additions first.
    pub fn markers(&self) -> Vec<String> {
        self.added
            .iter()
            .map(|id| format!("+{}", id))
            .chain(self.removed.iter().map(|id| format!("-{}", id)))
            .collect()
    }
}
