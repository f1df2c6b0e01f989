use secrecy::Secret;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub admin: AdminSettings,
    #[serde(default)]
    pub whitelist: WhitelistSettings,
    #[serde(default)]
    pub rcon: RconSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Idle minutes before an admin session is treated as expired.
    #[serde(default = "default_session_timeout")]
    pub session_timeout_minutes: u64,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Deserialize, Clone)]
pub struct AdminSettings {
    /// Argon2 hash of the admin password. While unset (or empty), login
    /// falls back to plaintext comparison against `default_password`.
    #[serde(default)]
    pub password_hash: Option<Secret<String>>,
    #[serde(default = "default_admin_password")]
    pub default_password: Secret<String>,
}

#[derive(Deserialize, Clone)]
pub struct WhitelistSettings {
    /// Prefix applied to Bedrock names before they reach the server.
    #[serde(default = "default_bedrock_prefix")]
    pub bedrock_prefix: String,
    #[serde(default = "default_user_tier")]
    pub default_user_tier: String,
    /// Best-effort Mojang UUID lookup for Java entries on approval.
    #[serde(default = "default_true")]
    pub lookup_uuids: bool,
}

#[derive(Deserialize, Clone)]
pub struct RconSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_rcon_address")]
    pub address: String,
    #[serde(default = "default_empty_secret")]
    pub password: Secret<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_session_timeout() -> u64 {
    30
}

fn default_database_url() -> String {
    "sqlite://whitelist.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_admin_password() -> Secret<String> {
    Secret::new("admin123".to_string())
}

fn default_bedrock_prefix() -> String {
    "BE_".to_string()
}

fn default_user_tier() -> String {
    "TRIAL".to_string()
}

fn default_true() -> bool {
    true
}

fn default_rcon_address() -> String {
    "127.0.0.1:25575".to_string()
}

fn default_empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_timeout_minutes: default_session_timeout(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            password_hash: None,
            default_password: default_admin_password(),
        }
    }
}

impl Default for WhitelistSettings {
    fn default() -> Self {
        Self {
            bedrock_prefix: default_bedrock_prefix(),
            default_user_tier: default_user_tier(),
            lookup_uuids: true,
        }
    }
}

impl Default for RconSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            address: default_rcon_address(),
            password: default_empty_secret(),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("config");

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").expect("empty settings");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.whitelist.bedrock_prefix, "BE_");
        assert_eq!(settings.whitelist.default_user_tier, "TRIAL");
        assert!(settings.admin.password_hash.is_none());
        assert!(!settings.rcon.enabled);
    }
}
