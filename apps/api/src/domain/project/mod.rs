pub mod entity;
pub mod errors;
pub mod listing;
pub mod repository;
pub mod value_objects;
