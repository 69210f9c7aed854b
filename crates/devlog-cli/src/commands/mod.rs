pub mod mapping;
pub mod mask;
pub mod repo;
