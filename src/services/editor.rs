//! Admin-facing edits to existing whitelist entries, keeping the live
//! server and the persisted record aligned. Entries are addressed by their
//! opaque row id everywhere; list views carry the id.

use crate::error::AppError;
use crate::services::database::Database;
use crate::services::sync::SyncHandle;

#[derive(Clone)]
pub struct EditorService {
    db: Database,
    sync: SyncHandle,
}

impl EditorService {
    pub fn new(db: Database, sync: SyncHandle) -> Self {
        Self { db, sync }
    }

    /// Update an entry's name, contact and tier. A name change dispatches
    /// remove(old) then add(new), in that order, before the persisted
    /// update; a missing entry is a logged no-op.
    pub async fn update_entry(
        &self,
        id: i64,
        game_id: &str,
        contact: &str,
        user_tier: &str,
    ) -> Result<(), AppError> {
        let Some(entry) = self.db.entry_by_id(id).await? else {
            tracing::warn!(id, "update: whitelist entry not found");
            return Ok(());
        };

        if entry.game_id != game_id {
            self.sync.dispatch_remove(&entry.game_id);
            self.sync.dispatch_add(game_id);
        }

        self.db.update_entry(id, game_id, contact, user_tier).await?;
        tracing::info!(id, game_id, "whitelist entry updated");
        Ok(())
    }

    /// Remove an entry from the live server and delete the record.
    pub async fn remove_entry(&self, id: i64) -> Result<(), AppError> {
        let Some(entry) = self.db.entry_by_id(id).await? else {
            tracing::warn!(id, "remove: whitelist entry not found");
            return Ok(());
        };

        self.sync.dispatch_remove(&entry.game_id);
        self.db.delete_entry(id).await?;
        tracing::info!(id, game_id = %entry.game_id, "whitelist entry removed");
        Ok(())
    }
}
