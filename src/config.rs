use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Invalid APP_ENVIRONMENT: {0}")]
    Environment(String),
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(
        default = "default_log_level",
        deserialize_with = "deserialize_log_level"
    )]
    pub log_level: LogLevel,
    #[serde(default)]
    pub writer: WriterSettings,
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.try_into().map_err(serde::de::Error::custom)
}

/// Output formatting for annotation files.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct WriterSettings {
    /// Spaces per nesting level; `None` writes the document on one line.
    #[serde(default)]
    pub indent: Option<usize>,
    #[serde(default)]
    pub xml_declaration: bool,
    /// Reject box and class lists of different lengths instead of truncating.
    #[serde(default)]
    pub strict_lengths: bool,
}

#[derive(Debug, Deserialize, Clone)]
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
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            other => Err(format!(
                "{} is not a supported minimum log level. Use `debug`, `info` or `warn`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let base_path = std::env::current_dir().map_err(|e| {
        ConfigurationError::Config(config::ConfigError::Message(format!(
            "Failed to determine the current directory: {}",
            e
        )))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigurationError::Environment)?;

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            config::File::from(
                configuration_directory.join(format!("{}.yaml", environment.as_str())),
            )
            .required(false),
        )
        .add_source(
            config::Environment::with_prefix("VOC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;

    Ok(settings)
}
