//! src/configuration.rs
use config::{Config, File};
use secrecy::Secret;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

pub const BREVO_CONTACTS_URL: &str = "https://api.brevo.com/v3/contacts";

const DEFAULT_SIMULATED_LATENCY_MILLISECONDS: u64 = 1500;

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("Failed to determine the current directory")]
    CurrentDirectory(#[from] std::io::Error),
    #[error("{0}")]
    Environment(String),
    #[error("Failed to read application settings")]
    Application(#[from] config::ConfigError),
    #[error("Failed to read the local Brevo settings file")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Failed to read Brevo settings from the environment")]
    Brevo(#[from] envy::Error),
}

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub brevo: BrevoSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
}

/// Credentials and target list for the Brevo contacts API.
///
/// Every field is optional. Without an `api_key` the newsletter runs in
/// simulation mode and never touches the network.
#[derive(Deserialize, Clone, Debug)]
pub struct BrevoSettings {
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default, deserialize_with = "deserialize_list_id")]
    pub list_id: Option<u64>,
    #[serde(default = "default_simulated_latency")]
    pub simulated_latency_milliseconds: u64,
}

impl BrevoSettings {
    /// Reads `BREVO_API_KEY`, `BREVO_LIST_ID`, `BREVO_API_URL` and
    /// `BREVO_SIMULATED_LATENCY_MILLISECONDS`.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("BREVO_").from_env::<Self>()
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_milliseconds)
    }
}

impl Default for BrevoSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            list_id: None,
            simulated_latency_milliseconds: default_simulated_latency(),
        }
    }
}

fn default_api_url() -> String {
    BREVO_CONTACTS_URL.to_string()
}

fn default_simulated_latency() -> u64 {
    DEFAULT_SIMULATED_LATENCY_MILLISECONDS
}

// An empty value counts as unset.
fn deserialize_list_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<u64>().map(Some).map_err(|e| {
            serde::de::Error::custom(format!("{} is not a valid list id: {}", s, e))
        }),
    }
}

#[derive(PartialEq, Debug)]
pub enum Environment {
    Local,
    Production,
}
impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_ref() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            _ => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                s
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let base_path = std::env::current_dir()?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if not specified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigurationError::Environment)?;

    read_configuration(&configuration_directory, environment)
}

/// Reads the YAML layers under `configuration_directory`, then `BREVO_*`
/// from the environment. In `local` the optional `brevo` dotenv file in the
/// same directory is loaded first.
pub fn read_configuration(
    configuration_directory: &Path,
    environment: Environment,
) -> Result<Settings, ConfigurationError> {
    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")).required(true))
        .add_source(File::from(configuration_directory.join(environment.as_str())).required(true))
        .build()?;

    let mut settings: Settings = settings.try_deserialize()?;

    if environment == Environment::Local {
        load_brevo_file(&configuration_directory.join("brevo"))?;
    }

    settings.brevo = BrevoSettings::from_env()?;

    Ok(settings)
}

// A missing file leaves us in simulation mode, a broken one must not.
fn load_brevo_file(path: &Path) -> Result<(), dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
