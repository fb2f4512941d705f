pub mod about;
pub mod docs;
pub mod health;
pub mod projects;
pub mod social;
