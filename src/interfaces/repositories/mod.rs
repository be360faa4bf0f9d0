pub mod local;
pub mod record_store;
pub mod remote;
