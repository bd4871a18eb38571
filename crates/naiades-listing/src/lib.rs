use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// One discovered download, as reported by the listing service.
///
/// All three fields are displayed verbatim; `date_time` is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub most_recent_file: String,
    pub date_time: String,
}

impl Entry {
    pub fn new(
        name: impl Into<String>,
        most_recent_file: impl Into<String>,
        date_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            most_recent_file: most_recent_file.into(),
            date_time: date_time.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// The full grouped payload. Groups keep the order they arrived in and
/// names are unique. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    groups: Vec<Group>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("listing payload does not match the expected shape: {0}")]
    Json(#[from] serde_json::Error),
}

impl Listing {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a listing from `(group, entries)` pairs. A repeated group name
    /// keeps its first position and takes the later entries.
    pub fn from_groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Entry>)>,
        S: Into<String>,
    {
        let mut listing = Self::empty();
        for (name, entries) in groups {
            listing.insert(name.into(), entries);
        }
        listing
    }

    pub fn from_json(body: &[u8]) -> Result<Self, ListingError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }

    fn insert(&mut self, name: String, entries: Vec<Entry>) {
        match self.groups.iter_mut().find(|group| group.name == name) {
            Some(existing) => existing.entries = entries,
            None => self.groups.push(Group { name, entries }),
        }
    }
}

// Wire item: the entry fields sit one level down, under `data`.
#[derive(Deserialize)]
struct WireItem {
    data: Entry,
}

impl<'de> Deserialize<'de> for Listing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ListingVisitor)
    }
}

struct ListingVisitor;

impl<'de> Visitor<'de> for ListingVisitor {
    type Value = Listing;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping group names to arrays of {\"data\": entry}")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut listing = Listing::empty();
        while let Some((name, items)) = access.next_entry::<String, Vec<WireItem>>()? {
            let entries = items.into_iter().map(|item| item.data).collect();
            listing.insert(name, entries);
        }
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_object_is_empty_listing() {
        let listing = Listing::from_json(b"{}").unwrap();
        assert!(listing.is_empty());
        assert_eq!(listing, Listing::empty());
    }

    #[test]
    fn entries_are_unwrapped_from_data() {
        let body = br#"{"2024-01": [{"data": {"name": "report.csv", "most_recent_file": "report.csv", "date_time": "2024-01-15T10:00:00Z"}}]}"#;
        let listing = Listing::from_json(body).unwrap();

        assert_eq!(
            listing.groups(),
            &[Group {
                name: "2024-01".to_string(),
                entries: vec![Entry::new(
                    "report.csv",
                    "report.csv",
                    "2024-01-15T10:00:00Z"
                )],
            }]
        );
    }

    #[test]
    fn group_and_entry_order_follow_the_payload() {
        let body = br#"{
            "/srv/tv": [
                {"data": {"name": "zeta", "most_recent_file": "z2.mkv", "date_time": "2024-03-02 08:00:00"}},
                {"data": {"name": "alpha", "most_recent_file": "a9.mkv", "date_time": "2024-03-01 21:15:00"}}
            ],
            "/srv/movies": [
                {"data": {"name": "beta", "most_recent_file": "b.mp4", "date_time": "2023-12-31 23:59:59"}},
                {"data": {"name": "aaa", "most_recent_file": "a.mp4", "date_time": "2023-01-01 00:00:00"}}
            ]
        }"#;
        let listing = Listing::from_json(body).unwrap();

        let names: Vec<&str> = listing.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["/srv/tv", "/srv/movies"]);

        let tv: Vec<&str> = listing.groups()[0]
            .entries
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(tv, vec!["zeta", "alpha"]);
        assert_eq!(listing.entry_count(), 4);
    }

    #[test]
    fn unknown_extra_fields_are_ignored() {
        let body = br#"{"g": [{"data": {"name": "n", "most_recent_file": "f", "date_time": "t", "path": "/x"}, "score": 3}]}"#;
        let listing = Listing::from_json(body).unwrap();
        assert_eq!(listing.group("g").unwrap().entries[0], Entry::new("n", "f", "t"));
    }

    #[test]
    fn shape_mismatches_are_rejected() {
        let cases: [&[u8]; 7] = [
            b"not json",
            b"[]",
            b"null",
            br#"{"g": {"data": {}}}"#,
            br#"{"g": [{"name": "n", "most_recent_file": "f", "date_time": "t"}]}"#,
            br#"{"g": [{"data": {"name": "n", "most_recent_file": "f"}}]}"#,
            br#"{"g": [{"data": {"name": 7, "most_recent_file": "f", "date_time": "t"}}]}"#,
        ];

        for body in cases {
            let result = Listing::from_json(body);
            assert!(
                matches!(result, Err(ListingError::Json(_))),
                "expected rejection for {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn repeated_group_keeps_first_position() {
        let listing = Listing::from_groups([
            ("a", vec![Entry::new("old", "f", "t")]),
            ("b", vec![]),
            ("a", vec![Entry::new("new", "f", "t")]),
        ]);

        assert_eq!(listing.len(), 2);
        assert_eq!(listing.groups()[0].name, "a");
        assert_eq!(listing.groups()[0].entries[0].name, "new");
    }
}
