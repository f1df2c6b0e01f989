//! Approval engine: the PENDING -> APPROVED | DENIED state machine and the
//! derivation of whitelist entries on approval.
//!
//! The status transition and entry inserts commit in a single transaction;
//! console dispatch is enqueued after commit as a best-effort action with
//! its own retry/log path. Re-approving or re-denying a terminal
//! application is a no-op and never duplicates entries.

use crate::config::WhitelistSettings;
use crate::error::AppError;
use crate::models::{Application, ApplicationStatus, Edition, NewEntry};
use crate::services::database::Database;
use crate::services::mojang::MojangClient;
use crate::services::sync::SyncHandle;

#[derive(Clone)]
pub struct ReviewService {
    db: Database,
    sync: SyncHandle,
    mojang: Option<MojangClient>,
    bedrock_prefix: String,
    default_user_tier: String,
}

impl ReviewService {
    pub fn new(
        db: Database,
        sync: SyncHandle,
        mojang: Option<MojangClient>,
        settings: &WhitelistSettings,
    ) -> Self {
        Self {
            db,
            sync,
            mojang,
            bedrock_prefix: settings.bedrock_prefix.clone(),
            default_user_tier: settings.default_user_tier.clone(),
        }
    }

    /// Approve a pending application and derive its whitelist entries (one
    /// per requested edition). Absent or already-terminal applications are
    /// logged no-ops.
    pub async fn approve(&self, id: i64) -> Result<(), AppError> {
        let Some(application) = self.db.application_by_id(id).await? else {
            tracing::warn!(id, "approve: application not found");
            return Ok(());
        };

        let entries = self.derive_entries(&application).await;

        let mut tx = self.db.pool().begin().await?;
        let transitioned =
            Database::transition_application(&mut tx, id, ApplicationStatus::Approved).await?;
        if !transitioned {
            tracing::info!(id, status = %application.status, "approve: already processed");
            return Ok(());
        }
        for entry in &entries {
            Database::insert_entry(&mut tx, entry).await?;
        }
        tx.commit().await?;

        for entry in &entries {
            self.sync.dispatch_add(&entry.game_id);
        }
        tracing::info!(id, game_id = %application.game_id, entries = entries.len(), "application approved");
        Ok(())
    }

    /// Deny a pending application. No whitelist side effects, ever.
    pub async fn deny(&self, id: i64) -> Result<(), AppError> {
        let mut conn = self.db.pool().acquire().await?;
        let transitioned =
            Database::transition_application(&mut conn, id, ApplicationStatus::Denied).await?;
        if transitioned {
            tracing::info!(id, "application denied");
        } else {
            tracing::info!(id, "deny: application missing or already processed");
        }
        Ok(())
    }

    /// Derive the entries an approval produces. For a pure Bedrock
    /// application the primary name is the Bedrock name; for `Both` the
    /// dedicated Bedrock name is used. Bedrock names carry the configured
    /// prefix.
    async fn derive_entries(&self, application: &Application) -> Vec<NewEntry> {
        let mut entries = Vec::with_capacity(2);

        if application.edition.includes_java() {
            let uuid = match &self.mojang {
                Some(client) => client
                    .lookup_uuid(&application.game_id)
                    .await
                    .map(|u| u.to_string()),
                None => None,
            };
            entries.push(NewEntry {
                game_id: application.game_id.clone(),
                uuid,
                edition: Edition::Java,
                contact: application.contact.clone(),
                user_tier: self.default_user_tier.clone(),
            });
        }

        if application.edition.includes_bedrock() {
            let base = match application.edition {
                Edition::Bedrock => Some(application.game_id.as_str()),
                _ => application.bedrock_name.as_deref(),
            };
            match base {
                Some(name) => entries.push(NewEntry {
                    game_id: format!("{}{}", self.bedrock_prefix, name),
                    uuid: None,
                    edition: Edition::Bedrock,
                    contact: application.contact.clone(),
                    user_tier: self.default_user_tier.clone(),
                }),
                None => {
                    tracing::warn!(
                        id = application.id,
                        "approve: BOTH application without a Bedrock name, skipping Bedrock entry"
                    );
                }
            }
        }

        entries
    }
}
