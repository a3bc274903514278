pub mod pass;
pub mod placement;
pub mod query;
