pub mod config;
pub mod doc_link;
pub mod duration;
pub mod error;
pub mod jira_client;
pub mod links;
pub mod lookup;
pub mod models;
pub mod normalize;
pub mod report;
pub mod timestamps;

pub use error::Error;
