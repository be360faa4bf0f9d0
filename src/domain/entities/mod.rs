pub mod about;
pub mod message;
pub mod project;
pub mod skill;
pub mod token;
