pub mod about;
pub mod home;
pub mod messages;
pub mod projects;
pub mod skills;
pub mod system;
