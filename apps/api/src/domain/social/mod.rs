pub mod like;
pub mod repository;
