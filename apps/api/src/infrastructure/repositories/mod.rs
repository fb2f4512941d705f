pub mod in_memory;
pub mod sqlx_project_repository;
pub mod sqlx_social_repository;
