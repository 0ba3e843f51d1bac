pub mod dto;
pub mod handler;
pub mod service;

pub use dto::LookupRequest;
pub use handler::{handle_get_candidate_data, handle_healthcheck};
pub use service::CandidateService;
