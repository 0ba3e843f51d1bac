pub mod client;
pub mod dto;

pub use client::{CivicClient, CivicDataSource};
pub use dto::Official;
