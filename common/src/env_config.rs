use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds everything needed to initialize and run the service: database
/// connection details, token signing configuration, server host and port,
/// number of worker threads, CORS settings, logging preferences, OTP
/// lifetime and outbound mail credentials.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Configuration for access/refresh token signing.
    pub token_config: TokenConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// How long a one-time passcode stays valid, in seconds.
    pub otp_expires_seconds: i64,
    /// Configuration for the outbound SMTP mailer.
    pub mail_config: MailConfig,
}

#[derive(Clone, Debug)]
/// Configuration for JWT-based session tokens.
///
/// The service issues a short-lived access token and a longer-lived
/// refresh token, signed with separate secrets.
pub struct TokenConfig {
    /// The secret key used to sign and verify access tokens.
    pub access_secret: String,
    /// The expiration time for access tokens, in minutes.
    pub access_expires_minutes: i64,
    /// The secret key used to sign and verify refresh tokens.
    pub refresh_secret: String,
    /// The expiration time for refresh tokens, in days.
    pub refresh_expires_days: i64,
}

#[derive(Clone, Debug)]
/// SMTP credentials for outbound mail (OTP delivery).
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    /// The From address on outgoing mail. Defaults to the SMTP user.
    pub from_address: String,
}

impl TokenConfig {
    /// Creates a new `TokenConfig` instance from environment variables.
    ///
    /// - `ACCESS_TOKEN_SECRET`: Required.
    /// - `REFRESH_TOKEN_SECRET`: Required.
    /// - `ACCESS_TOKEN_EXPIRES_MINUTES`: Optional. Defaults to 10 minutes.
    /// - `REFRESH_TOKEN_EXPIRES_DAYS`: Optional. Defaults to 15 days.
    ///
    /// # Panics
    ///
    /// Panics if either secret is unset or if an expiry variable is set
    /// but not a valid number.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        TokenConfig {
            access_secret: env::var("ACCESS_TOKEN_SECRET").expect("ACCESS_TOKEN_SECRET must be set"),
            access_expires_minutes: env::var("ACCESS_TOKEN_EXPIRES_MINUTES")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("ACCESS_TOKEN_EXPIRES_MINUTES must be a valid number"),
            refresh_secret: env::var("REFRESH_TOKEN_SECRET")
                .expect("REFRESH_TOKEN_SECRET must be set"),
            refresh_expires_days: env::var("REFRESH_TOKEN_EXPIRES_DAYS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .expect("REFRESH_TOKEN_EXPIRES_DAYS must be a valid number"),
        }
    }
}

impl MailConfig {
    /// Creates a new `MailConfig` instance from environment variables.
    ///
    /// `EMAIL_HOST`, `EMAIL_USER` and `EMAIL_PASSWORD` are required;
    /// `EMAIL_PORT` defaults to 587 and `EMAIL_FROM` to the SMTP user.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let smtp_user = env::var("EMAIL_USER").expect("EMAIL_USER must be set");
        MailConfig {
            smtp_host: env::var("EMAIL_HOST").expect("EMAIL_HOST must be set"),
            smtp_port: env::var("EMAIL_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .expect("EMAIL_PORT must be a valid port number"),
            smtp_password: env::var("EMAIL_PASSWORD").expect("EMAIL_PASSWORD must be set"),
            from_address: env::var("EMAIL_FROM").unwrap_or_else(|_| smtp_user.clone()),
            smtp_user,
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`, `DATABASE_URL`
    /// - `ACCESS_TOKEN_SECRET`, `REFRESH_TOKEN_SECRET` (via `TokenConfig::from_env()`)
    /// - `EMAIL_HOST`, `EMAIL_USER`, `EMAIL_PASSWORD` (via `MailConfig::from_env()`)
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `OTP_EXPIRES_SECONDS`: Passcode lifetime (default: 300)
    ///
    /// # Panics
    ///
    /// Panics if required environment variables are missing or if numeric
    /// values cannot be parsed correctly.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            token_config: TokenConfig::from_env(),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            otp_expires_seconds: env::var("OTP_EXPIRES_SECONDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("OTP_EXPIRES_SECONDS must be a valid number"),
            mail_config: MailConfig::from_env(),
        })
    }
}
