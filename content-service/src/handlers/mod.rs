//! HTTP handlers for the content service.

pub mod generate;
pub mod generations;
pub mod health;
pub mod metrics;

pub use generate::generate_content;
pub use generations::{delete_generation, get_generation, list_generations};
pub use health::{health_check, readiness_check, root};
pub use metrics::metrics_handler;
