mod client;
mod requests;
mod users;

pub mod types;

pub use client::ApiClient;
pub use types::{ApiError, CreateLeaveRequest, Decision, UserPatch};

#[cfg(test)]
pub mod test_support;
