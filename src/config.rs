use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:boards.db".into()),
            cors_origin: std::env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4000,
            database_url: "sqlite:boards.db".into(),
            cors_origin: "http://localhost:3000,http://127.0.0.1:3000".into(),
        }
    }
}
