use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];
pub const DEFAULT_ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];
pub const DEFAULT_ALLOWED_HEADERS: [&str; 4] =
    ["Origin", "Content-Type", "Accept", "Authorization"];

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub cors: CorsSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            cors: CorsSettings {
                allowed_origins: to_strings(&DEFAULT_ALLOWED_ORIGINS),
                allowed_methods: to_strings(&DEFAULT_ALLOWED_METHODS),
                allowed_headers: to_strings(&DEFAULT_ALLOWED_HEADERS),
            },
        }
    }
}

impl ServerConfig {
    /// Built-in defaults, optionally overridden by a `config.*` file in the
    /// working directory.
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("cors.allowed_origins", to_strings(&DEFAULT_ALLOWED_ORIGINS))?
            .set_default("cors.allowed_methods", to_strings(&DEFAULT_ALLOWED_METHODS))?
            .set_default("cors.allowed_headers", to_strings(&DEFAULT_ALLOWED_HEADERS))?
            .add_source(config::File::with_name("config").required(false))
            .build()?
            .try_deserialize::<ServerConfig>()?;

        Ok(settings)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
