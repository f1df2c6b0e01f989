//! Best-effort player UUID lookup against the Mojang profile API. Failures
//! never block approval; the entry is simply stored without a UUID.

use std::time::Duration;

use serde::Deserialize;
use uuid::Uuid;

const MOJANG_API_URL: &str = "https://api.mojang.com";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Deserialize)]
struct Profile {
    // Mojang returns the UUID as 32 hex digits without hyphens.
    id: String,
}

#[derive(Clone)]
pub struct MojangClient {
    http: reqwest::Client,
    base_url: String,
}

impl MojangClient {
    pub fn new() -> Self {
        Self::with_base_url(MOJANG_API_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Returns None for unknown names, network trouble, or an unparsable
    /// response; the caller proceeds without enrichment.
    pub async fn lookup_uuid(&self, name: &str) -> Option<Uuid> {
        let url = format!("{}/users/profiles/minecraft/{}", self.base_url, name);
        let response = match self.http.get(&url).timeout(LOOKUP_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(name, "UUID lookup request failed: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!(name, status = %response.status(), "no Mojang profile");
            return None;
        }
        let profile: Profile = match response.json().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::debug!(name, "unparsable Mojang profile: {e}");
                return None;
            }
        };
        match Uuid::parse_str(&profile.id) {
            Ok(uuid) => Some(uuid),
            Err(e) => {
                tracing::warn!(name, id = %profile.id, "malformed profile id: {e}");
                None
            }
        }
    }
}

impl Default for MojangClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unhyphenated_profile_ids() {
        // uuid accepts Mojang's "simple" format directly.
        let uuid = Uuid::parse_str("069a79f444e94726a5befca90e38aaf5").unwrap();
        assert_eq!(uuid.to_string(), "069a79f4-44e9-4726-a5be-fca90e38aaf5");
    }
}
