pub mod error;
pub mod memory;
pub mod principal_repo;
