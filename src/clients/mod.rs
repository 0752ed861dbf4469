//! API 客户端层

pub mod youtrack_client;

pub use youtrack_client::{SubmitOutcome, YoutrackClient};
