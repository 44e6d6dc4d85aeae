pub mod project;
pub mod resume;
pub mod scholar;
