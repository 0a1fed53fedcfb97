pub mod cursor;
pub mod orchestrator;
pub mod query;
