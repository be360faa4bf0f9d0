use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{auth, db, notify};

use crate::auth::jwt::JwtService;
use crate::notify::MessageNotifier;
use crate::repositories::record_store::RecordStore;
use crate::settings::StorageMode;
use crate::use_cases::{
    about::AboutHandler, messages::MessagesHandler, projects::ProjectsHandler,
    skills::SkillsHandler,
};

pub struct AppState {
    pub mode: StorageMode,
    pub jwt_service: JwtService,
    pub store: Arc<dyn RecordStore>,
    pub projects_handler: ProjectsHandler,
    pub skills_handler: SkillsHandler,
    pub about_handler: AboutHandler,
    pub messages_handler: MessagesHandler,
}

impl AppState {
    /// The store and notifier are injected so the persistence mode is
    /// decided exactly once, at startup.
    pub fn new(
        config: &settings::AppConfig,
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn MessageNotifier>,
    ) -> Self {
        AppState {
            mode: config.storage_mode,
            jwt_service: JwtService::new(config),
            projects_handler: ProjectsHandler::new(store.clone()),
            skills_handler: SkillsHandler::new(store.clone()),
            about_handler: AboutHandler::new(store.clone()),
            messages_handler: MessagesHandler::new(store.clone(), notifier),
            store,
        }
    }
}
