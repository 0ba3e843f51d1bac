use std::sync::Arc;

use crate::features::candidates::CandidateService;

#[derive(Clone)]
pub struct AppState {
    pub candidates: Arc<CandidateService>,
}

impl AppState {
    pub fn new(candidates: Arc<CandidateService>) -> Self {
        Self { candidates }
    }
}
