//! Board configuration.
//!
//! Both configs are validated when they are built or deserialized. Broken geometry, such as an
//! empty board or a non-positive pixel size, is rejected before anything is drawn.

use std::{
    fs, io,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{
    de::{self, Unexpected},
    Deserialize, Deserializer, Serialize,
};
use thiserror::Error;
use tracing::debug;

/// The logical size of the board, shared by the controller and the renderer.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GameConfig {
    /// Number of fields per side of the square board.
    #[serde(deserialize_with = "validate_field_size")]
    field_size: NonZeroUsize,
}

impl GameConfig {
    pub fn new(field_size: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(field_size)
            .map(|field_size| Self { field_size })
            .ok_or(ConfigError::ZeroFieldSize)
    }

    pub fn field_size(&self) -> usize {
        self.field_size.get()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_size: NonZeroUsize::new(8).expect("default field size should be non-zero"),
        }
    }
}

/// How the board is laid out on the drawing surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Width and height of the whole board in pixels.
    #[serde(deserialize_with = "validate_pixel_size")]
    pub field_pixel_size: f32,
    /// Canvas font used for the adjacent mine counts.
    pub font: String,
}

impl RenderConfig {
    pub fn new(field_pixel_size: f32) -> Result<Self, ConfigError> {
        check_pixel_size(field_pixel_size)?;
        Ok(Self {
            field_pixel_size,
            ..Default::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_pixel_size(self.field_pixel_size)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            field_pixel_size: 400.0,
            font: "14px Arial".to_owned(),
        }
    }
}

/// Combined configuration as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub render: RenderConfig,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads the configuration from `path`.
    ///
    /// A missing file is not an error and yields the default configuration.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(?path, "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_owned(),
                    source,
                })
            }
        };
        let config = Self::from_toml_str(&contents)?;
        debug!(?path, ?config, "loaded config");
        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field size must be at least 1")]
    ZeroFieldSize,
    #[error("field pixel size must be positive and finite, got {0}")]
    InvalidPixelSize(f32),
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unable to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn check_pixel_size(field_pixel_size: f32) -> Result<(), ConfigError> {
    if field_pixel_size.is_finite() && field_pixel_size > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidPixelSize(field_pixel_size))
    }
}

fn validate_field_size<'de, D>(deserializer: D) -> Result<NonZeroUsize, D::Error>
where
    D: Deserializer<'de>,
{
    let field_size = usize::deserialize(deserializer)?;
    NonZeroUsize::new(field_size)
        .ok_or_else(|| de::Error::invalid_value(Unexpected::Unsigned(0), &"at least one field"))
}

fn validate_pixel_size<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let field_pixel_size = f32::deserialize(deserializer)?;
    check_pixel_size(field_pixel_size).map_err(|_| {
        de::Error::invalid_value(
            Unexpected::Float(field_pixel_size.into()),
            &"a positive pixel size",
        )
    })?;
    Ok(field_pixel_size)
}
