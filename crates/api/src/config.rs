use std::fmt;

/// Connection string used when `DATABASE_URL` is unset: a SQLite file in
/// the working directory, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://hospital.db?mode=rwc";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Fully resolved database connection string.
    pub database_url: DatabaseUrl,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `5000`                           |
    /// | `DATABASE_URL`         | `sqlite://hospital.db?mode=rwc`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `LOG_FORMAT`           | `text` (`json` for JSON lines)   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = resolve_database_url(std::env::var("DATABASE_URL").ok().as_deref());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let json_logs = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            host,
            port,
            database_url,
            request_timeout_secs,
            json_logs,
        }
    }
}

/// A connection string with all deployment rewriting already applied.
///
/// `Display` hides credentials so the value can be logged.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseUrl(String);

impl DatabaseUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&patient_register_db::redact(&self.0))
    }
}

impl fmt::Debug for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatabaseUrl({self})")
    }
}

/// Turn the raw `DATABASE_URL` value into the connection string to use.
///
/// - unset or blank: [`DEFAULT_DATABASE_URL`]
/// - a Postgres URL on a Render-hosted database without an explicit
///   `sslmode`: `sslmode=require` is appended, since Render's external
///   endpoints refuse plaintext connections
/// - anything else: used as given
pub fn resolve_database_url(raw: Option<&str>) -> DatabaseUrl {
    let url = match raw.map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => return DatabaseUrl(DEFAULT_DATABASE_URL.to_string()),
    };

    let is_postgres = url.starts_with("postgres://") || url.starts_with("postgresql://");
    if is_postgres && url.contains("render.com") && !url.contains("sslmode=") {
        let separator = if url.contains('?') { '&' } else { '?' };
        return DatabaseUrl(format!("{url}{separator}sslmode=require"));
    }

    DatabaseUrl(url.to_string())
}
