pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use std::sync::Arc;

use config::Settings;
use services::database::Database;
use services::editor::EditorService;
use services::mojang::MojangClient;
use services::review::ReviewService;
use services::sync::SyncHandle;

/// Shared application state: the persistence gateway, the review and
/// editor services, and the loaded settings.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub review: ReviewService,
    pub editor: EditorService,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(db: Database, sync: SyncHandle, settings: Arc<Settings>) -> Self {
        let mojang = settings.whitelist.lookup_uuids.then(MojangClient::new);
        let review = ReviewService::new(db.clone(), sync.clone(), mojang, &settings.whitelist);
        let editor = EditorService::new(db.clone(), sync);
        Self {
            db,
            review,
            editor,
            settings,
        }
    }
}
