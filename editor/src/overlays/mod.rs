pub mod composition;
pub mod utility_types;
