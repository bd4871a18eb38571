use naiades_listing::{Entry, Group, Listing};

use crate::store::{Failure, ListingStore, ViewStatus};

pub const HEADING: &str = "The Latest";
pub const COLUMNS: [&str; 3] = ["Name", "Most Recent File", "Modified Time"];

/// Toolkit-neutral description of what the listing view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub heading: &'static str,
    pub notice: Option<Notice>,
    pub tables: Vec<GroupTable>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Loading,
    Failed(Failure),
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Self::Loading => "Fetching the latest...".to_string(),
            Self::Failed(failure) => format!(
                "Could not load downloads ({}): {}",
                failure.kind, failure.message
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTable {
    pub key: String,
    pub title: String,
    pub columns: [&'static str; 3],
    pub rows: Vec<Row>,
}

/// Row identity. Entry names may repeat inside a group, so the position
/// is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub position: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: RowKey,
    pub cells: [String; 3],
}

pub fn render(store: &ListingStore) -> Page {
    let notice = match store.status() {
        ViewStatus::Loading => Some(Notice::Loading),
        ViewStatus::Loaded => None,
        ViewStatus::Failed(failure) => Some(Notice::Failed(failure.clone())),
    };

    Page {
        heading: HEADING,
        notice,
        tables: render_listing(store.listing()),
    }
}

pub fn render_listing(listing: &Listing) -> Vec<GroupTable> {
    listing.groups().iter().map(group_table).collect()
}

fn group_table(group: &Group) -> GroupTable {
    GroupTable {
        key: group.name.clone(),
        title: group.name.clone(),
        columns: COLUMNS,
        rows: group
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| entry_row(position, entry))
            .collect(),
    }
}

fn entry_row(position: usize, entry: &Entry) -> Row {
    Row {
        key: RowKey {
            position,
            name: entry.name.clone(),
        },
        cells: [
            entry.name.clone(),
            entry.most_recent_file.clone(),
            entry.date_time.clone(),
        ],
    }
}
