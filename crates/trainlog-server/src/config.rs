//! Command-line and environment configuration.

use clap::Parser;
use trainlog_auth::AuthConfig;
use trainlog_db::DbConfig;
use trainlog_service::{GenerationConfig, PAGE_SIZE_LIMIT, ServiceConfig};

use crate::error::ServerError;

#[derive(Debug, Clone, Parser)]
#[clap(name = "trainlog server")]
pub struct Cli {
    /// SurrealDB endpoint: `ws://host:port` or `mem://`.
    #[clap(long, env = "TRAINLOG_DB_URL", default_value = "ws://127.0.0.1:8000")]
    pub db_url: String,
    #[clap(long, env = "TRAINLOG_DB_NAMESPACE", default_value = "trainlog")]
    pub db_namespace: String,
    #[clap(long, env = "TRAINLOG_DB_DATABASE", default_value = "main")]
    pub db_database: String,
    #[clap(long, env = "TRAINLOG_DB_USERNAME", default_value = "root")]
    pub db_username: String,
    #[clap(long, env = "TRAINLOG_DB_PASSWORD", default_value = "root", hide_env_values = true)]
    pub db_password: String,

    /// HMAC secret for signing bearer tokens. Required.
    #[clap(long, env = "TRAINLOG_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
    #[clap(long, env = "TRAINLOG_JWT_ISSUER", default_value = "trainlog")]
    pub jwt_issuer: String,
    #[clap(long, env = "TRAINLOG_TOKEN_LIFETIME_SECS", default_value = "604800")]
    pub token_lifetime_secs: u64,
    #[clap(long, env = "TRAINLOG_PASSWORD_PEPPER", hide_env_values = true)]
    pub password_pepper: Option<String>,
    #[clap(long, env = "TRAINLOG_MIN_PASSWORD_LENGTH", default_value = "8")]
    pub min_password_length: usize,

    #[clap(long, env = "TRAINLOG_DEFAULT_PER_PAGE", default_value = "20")]
    pub default_per_page: u64,
    #[clap(long, env = "TRAINLOG_MAX_PER_PAGE", default_value = "100")]
    pub max_per_page: u64,
    #[clap(long, env = "TRAINLOG_BODY_WEIGHT_LIMIT", default_value = "90")]
    pub body_weight_limit: u64,

    /// Leave unset to disable menu generation.
    #[clap(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,
    #[clap(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,
    #[clap(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub openai_model: String,
}

/// Per-crate configuration values derived from [`Cli`].
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub service: ServiceConfig,
    pub generation: GenerationConfig,
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings, ServerError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ServerError::Config("TRAINLOG_JWT_SECRET must not be empty".into()));
        }
        if self.max_per_page == 0 || self.max_per_page > PAGE_SIZE_LIMIT {
            return Err(ServerError::Config(format!(
                "maximum page size must be between 1 and {PAGE_SIZE_LIMIT}"
            )));
        }
        if self.default_per_page == 0 || self.default_per_page > self.max_per_page {
            return Err(ServerError::Config(
                "default page size must be between 1 and the maximum page size".into(),
            ));
        }

        Ok(Settings {
            db: DbConfig {
                url: self.db_url,
                namespace: self.db_namespace,
                database: self.db_database,
                username: self.db_username,
                password: self.db_password,
            },
            auth: AuthConfig {
                jwt_secret: self.jwt_secret,
                jwt_issuer: self.jwt_issuer,
                token_lifetime_secs: self.token_lifetime_secs,
                pepper: self.password_pepper.filter(|p| !p.is_empty()),
                min_password_length: self.min_password_length,
            },
            service: ServiceConfig {
                default_per_page: self.default_per_page,
                max_per_page: self.max_per_page,
                default_body_weight_limit: self.body_weight_limit,
            },
            generation: GenerationConfig {
                api_key: self.openai_api_key.filter(|k| !k.trim().is_empty()),
                base_url: self.openai_base_url,
                model: self.openai_model,
            },
        })
    }
}
