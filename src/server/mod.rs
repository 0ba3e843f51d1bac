pub mod cors;
pub mod state;

pub use cors::apply_cors_headers;
pub use state::AppState;
