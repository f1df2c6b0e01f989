use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Client edition requested by an applicant. `Both` only ever appears on
/// applications; whitelist entries are always edition-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Edition {
    Java,
    Bedrock,
    Both,
}

impl Edition {
    pub fn includes_java(&self) -> bool {
        matches!(self, Edition::Java | Edition::Both)
    }

    pub fn includes_bedrock(&self) -> bool {
        matches!(self, Edition::Bedrock | Edition::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Java => "JAVA",
            Edition::Bedrock => "BEDROCK",
            Edition::Both => "BOTH",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state. Once terminal, never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Denied,
}

impl ApplicationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Denied)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Denied => "DENIED",
        };
        f.write_str(s)
    }
}

/// A stored access request.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Application {
    pub id: i64,
    pub game_id: String,
    pub contact: String,
    pub edition: Edition,
    /// Bedrock name, only meaningful when `edition == Both`.
    pub bedrock_name: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// A validated submission, ready to insert as a pending application.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub game_id: String,
    pub contact: String,
    pub edition: Edition,
    pub bedrock_name: Option<String>,
}

impl NewApplication {
    /// Validate raw form input. `game_id` and `contact` must be non-empty
    /// after trimming; the Bedrock name is kept only for `Both` (for a pure
    /// Bedrock application the primary name is reinterpreted at approval
    /// time instead).
    pub fn from_form(
        game_id: &str,
        contact: &str,
        edition: Edition,
        bedrock_name: &str,
    ) -> Result<Self, AppError> {
        let game_id = game_id.trim();
        let contact = contact.trim();
        if game_id.is_empty() || contact.is_empty() {
            return Err(AppError::Validation(
                "Game ID and contact are required".to_string(),
            ));
        }

        let bedrock_name = if edition == Edition::Both {
            let trimmed = bedrock_name.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        } else {
            None
        };

        Ok(Self {
            game_id: game_id.to_string(),
            contact: contact.to_string(),
            edition,
            bedrock_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edition_coverage() {
        assert!(Edition::Java.includes_java());
        assert!(!Edition::Java.includes_bedrock());
        assert!(Edition::Bedrock.includes_bedrock());
        assert!(!Edition::Bedrock.includes_java());
        assert!(Edition::Both.includes_java());
        assert!(Edition::Both.includes_bedrock());
    }

    #[test]
    fn terminal_statuses() {
        assert!(!ApplicationStatus::Pending.is_terminal());
        assert!(ApplicationStatus::Approved.is_terminal());
        assert!(ApplicationStatus::Denied.is_terminal());
    }

    #[test]
    fn from_form_trims_and_validates() {
        let app = NewApplication::from_form("  Steve ", " steve@example.com ", Edition::Java, "")
            .expect("valid submission");
        assert_eq!(app.game_id, "Steve");
        assert_eq!(app.contact, "steve@example.com");
        assert!(app.bedrock_name.is_none());
    }

    #[test]
    fn from_form_rejects_blank_fields() {
        assert!(NewApplication::from_form("   ", "contact", Edition::Java, "").is_err());
        assert!(NewApplication::from_form("Steve", "  ", Edition::Java, "").is_err());
    }

    #[test]
    fn bedrock_name_kept_only_for_both() {
        let both = NewApplication::from_form("Steve", "c", Edition::Both, " SteveBE ").unwrap();
        assert_eq!(both.bedrock_name.as_deref(), Some("SteveBE"));

        let bedrock = NewApplication::from_form("Steve", "c", Edition::Bedrock, "SteveBE").unwrap();
        assert!(bedrock.bedrock_name.is_none());
    }
}
