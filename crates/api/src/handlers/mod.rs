pub mod auth;
pub mod dashboard;
pub mod deliverable;
pub mod pages;
pub mod project;
