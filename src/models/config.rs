use serde::Deserialize;

/// Settings for the recipes service, read from `config/*.yaml` and `APP_*`
/// environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Shared secret used to verify HS256 bearer tokens.
    pub jwt_secret: String,
}
