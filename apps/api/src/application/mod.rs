pub mod list_projects;
pub mod social;
pub mod submit_project;
