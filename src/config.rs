use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub environment: Environment,
    pub max_body_size: usize,
    pub log_level: String,
    pub reset_token_ttl_minutes: i64,
    pub session_ttl_days: i64,
    pub admin: Option<AdminBootstrap>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

/// Credentials for the admin account created on first start.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("MAISCRIANCA_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid MAISCRIANCA_HOST: {e}"))?;

        let port: u16 = env_or("MAISCRIANCA_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid MAISCRIANCA_PORT: {e}"))?;

        let base_url = env_or("MAISCRIANCA_BASE_URL", &format!("http://{host}:{port}"));

        let environment = match env_or("MAISCRIANCA_ENV", "development").as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };

        let max_body_size: usize = env_or("MAISCRIANCA_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid MAISCRIANCA_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("MAISCRIANCA_LOG_LEVEL", "info");

        let reset_token_ttl_minutes: i64 = env_or("MAISCRIANCA_RESET_TOKEN_TTL_MINUTES", "60")
            .parse()
            .map_err(|e| format!("Invalid MAISCRIANCA_RESET_TOKEN_TTL_MINUTES: {e}"))?;
        if reset_token_ttl_minutes <= 0 {
            return Err("MAISCRIANCA_RESET_TOKEN_TTL_MINUTES must be positive".to_string());
        }

        let session_ttl_days: i64 = env_or("MAISCRIANCA_SESSION_TTL_DAYS", "30")
            .parse()
            .map_err(|e| format!("Invalid MAISCRIANCA_SESSION_TTL_DAYS: {e}"))?;
        if session_ttl_days <= 0 {
            return Err("MAISCRIANCA_SESSION_TTL_DAYS must be positive".to_string());
        }

        let admin = match (
            std::env::var("MAISCRIANCA_ADMIN_EMAIL").ok(),
            std::env::var("MAISCRIANCA_ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(AdminBootstrap { email, password }),
            _ => None,
        };

        let smtp = match (
            std::env::var("MAISCRIANCA_SMTP_HOST").ok(),
            std::env::var("MAISCRIANCA_SMTP_PORT").ok(),
            std::env::var("MAISCRIANCA_SMTP_USER").ok(),
            std::env::var("MAISCRIANCA_SMTP_PASS").ok(),
            std::env::var("MAISCRIANCA_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid MAISCRIANCA_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            host,
            port,
            base_url,
            environment,
            max_body_size,
            log_level,
            reset_token_ttl_minutes,
            session_ttl_days,
            admin,
            smtp,
        })
    }

    /// Session cookies carry `Secure` only in production.
    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
