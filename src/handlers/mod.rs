pub mod health_handler;
pub mod mcq_handler;

pub use health_handler::{generation_stats, health_check, liveness_check, readiness_check};
pub use mcq_handler::generate_mcq;
