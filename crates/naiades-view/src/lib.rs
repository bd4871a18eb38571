mod lifecycle;
mod render;
mod store;

pub use lifecycle::{Lifecycle, MountState};
pub use render::{render, render_listing, GroupTable, Notice, Page, Row, RowKey, COLUMNS, HEADING};
pub use store::{Failure, ListingStore, ViewStatus};
