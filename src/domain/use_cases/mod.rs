pub mod about;
pub mod extractors;
pub mod messages;
pub mod projects;
pub mod skills;
