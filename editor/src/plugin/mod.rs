pub mod persistence;
pub mod registry;
pub mod store;
pub mod utility_types;
