use std::{net::SocketAddr, time::Duration};

/// Process configuration, read from the environment exactly once at
/// startup. Components receive their settings through constructors; nothing
/// reads the environment after this.
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    /// Symbol the pipeline runs for.
    pub symbol: String,
    /// Alpha Vantage API key. May be empty; fetches then fail gracefully.
    pub alpha_vantage_api_key: String,
    /// Groq API key. Absent means insight generation is skipped at run time.
    pub groq_api_key: Option<String>,
    /// Shared secret for the /run trigger. Absent means the trigger is open.
    pub admin_token: Option<String>,
    /// Run the pipeline on a fixed daily interval in addition to the
    /// HTTP trigger.
    pub schedule_enabled: bool,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("TB_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid TB_LISTEN_ADDR");
        let db_path = std::env::var("TB_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let symbol = std::env::var("ALPHA_VANTAGE_SYMBOL").unwrap_or_else(|_| "IBM".into());
        let alpha_vantage_api_key = std::env::var("ALPHA_VANTAGE_API_KEY").unwrap_or_default();
        let groq_api_key = std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty());
        let admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
        let schedule_enabled = std::env::var("TB_SCHEDULE_ENABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let timeout_ms: u64 = std::env::var("TB_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Self {
            listen_addr,
            db_path,
            symbol,
            alpha_vantage_api_key,
            groq_api_key,
            admin_token,
            schedule_enabled,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }
}
