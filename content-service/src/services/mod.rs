pub mod database;
pub mod generator;
pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod store;

pub use database::ContentDb;
pub use generator::ContentGenerator;
pub use store::GenerationStore;
