use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Fixed document id of the singleton about-profile record.
pub const ABOUT_PROFILE_ID: &str = "profile";
