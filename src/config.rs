use crate::api_key::ApiSecret;

pub const HOST_VAR: &str = "SUPABASE_HOST";
pub const PORT_VAR: &str = "SUPABASE_PORT";
pub const USER_VAR: &str = "SUPABASE_USER";
pub const PASSWORD_VAR: &str = "SUPABASE_PASSWORD";
pub const DBNAME_VAR: &str = "SUPABASE_DBNAME";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const API_KEY_VAR: &str = "API_KEY";

/// Everything the server needs, read once at start-up.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub api_key: ApiSecret,
}

/// Database connection settings. Fields are kept optional here:
/// a missing one only becomes an error when the store first connects.
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
}

impl Config {
    /// Loads `.env` if there is one, then reads the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| dotenv::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = DatabaseConfig {
            url: lookup(DATABASE_URL_VAR),
            host: lookup(HOST_VAR),
            port: lookup(PORT_VAR),
            user: lookup(USER_VAR),
            password: lookup(PASSWORD_VAR),
            dbname: lookup(DBNAME_VAR),
        };
        let api_key = ApiSecret::new(lookup(API_KEY_VAR).unwrap_or_default());

        Self { database, api_key }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("dbname", &self.dbname)
            .finish()
    }
}
