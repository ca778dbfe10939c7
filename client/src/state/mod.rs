pub mod service;
pub mod store;

pub use service::{LeaveDraft, RequestsService};
pub use store::{RequestStore, SortKey, SortOrder};
