pub mod candidates;
pub mod civic;
pub mod enrichment;
