use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenWeatherMap API key
    pub openweathermap_api_key: String,

    /// Default city for weather queries
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Temperature units: metric, imperial, or standard
    #[serde(default = "default_units")]
    pub units: String,

    /// Path of the JSON file backing the favorites list
    #[serde(default = "default_favorites_path")]
    pub favorites_path: String,

    /// Detect the server's location once at startup and seed the dashboard
    #[serde(default)]
    pub auto_locate: bool,

    /// IP geolocation endpoint used for one-shot location detection
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,

    /// Image generation settings
    #[serde(default)]
    pub images: ImagesConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ImagesConfig {
    /// External image-generation endpoint (POST {"prompt": ...})
    #[serde(default)]
    pub generation_url: Option<String>,

    /// Bearer token for the generation endpoint, if it requires one
    #[serde(default)]
    pub generation_api_key: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_city() -> String {
    "London".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_favorites_path() -> String {
    "data/favorites.json".to_string()
}

fn default_geolocation_url() -> String {
    "http://ip-api.com/json".to_string()
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("default_city", default_city())?
            .set_default("units", default_units())?
            .set_default("favorites_path", default_favorites_path())?
            .set_default("geolocation_url", default_geolocation_url())?
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with SKYCAST_)
            .add_source(
                Environment::with_prefix("SKYCAST")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
