/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | SEED_DEMO_DATA | true | start with two users and one administrator |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment
    pub environment: String,
    /// Preload the demo accounts at startup
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            http_port: lookup("HTTP_PORT")
                .or_else(|| lookup("PORT"))
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.seed_demo_data),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            seed_demo_data: true,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
