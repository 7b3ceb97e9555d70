//! Configuration management for the `rleplus` binary
use std::path::Path;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;

use crate::codec::DecodeLimits;
use crate::DEFAULT_VALUE_COUNT_LIMIT;

/// Trait for validating configuration values.
trait Validatable {
    /// Validate the configuration values.
    fn validate(&self, cfg: &Settings) -> Result<(), ConfigError>;
}

/// Top-level configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    /// Decoder settings
    pub decoder: DecoderConfig,
}

/// Settings controlling how buffers are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct DecoderConfig {
    /// Maximum number of values a single decoded set may hold.
    pub max_values: u64,
    /// Disables `max_values` entirely.
    pub unbounded: bool,
}

impl DecoderConfig {
    /// Returns the decode limits these settings describe.
    pub fn limits(&self) -> DecodeLimits {
        if self.unbounded {
            DecodeLimits::unbounded()
        } else {
            DecodeLimits::with_max_values(self.max_values)
        }
    }
}

impl Validatable for DecoderConfig {
    fn validate(&self, _: &Settings) -> Result<(), ConfigError> {
        if !self.unbounded && self.max_values == 0 {
            return Err(ConfigError::Message(
                "[decoder] max_values must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Initializing the global config first with default values and then with
    /// provided/overwritten environment variables. The explicit separator with
    /// double underscores is needed to correctly parse the nested config structure.
    ///
    /// The environment variables are prefixed with `RLEPLUS_` and the nested
    /// fields are separated with double underscores. For example, the path
    /// `decoder.max_values` is parsed as following:
    ///
    /// ```text
    /// RLEPLUS_DECODER__MAX_VALUES
    /// ^^^^^^^ ^^^^^^^  ^^^^^^^^^^
    ///    │   ^   │   ^^    │
    ///    │   │   │   ││    └ The `max_values` field of the `decoder` object
    ///    │   │   │   └ separator("__")
    ///    │   │   └ The `decoder` field of the root object (`Settings`)
    ///    │   └ prefix_separator("_")
    ///    └ with_prefix("RLEPLUS")
    /// ```
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix("RLEPLUS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);

        let mut cfg_builder = Config::builder();

        cfg_builder =
            cfg_builder.set_default("decoder.max_values", DEFAULT_VALUE_COUNT_LIMIT as i64)?;
        cfg_builder = cfg_builder.set_default("decoder.unbounded", false)?;

        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        let cfg = cfg_builder.build()?;

        let settings: Settings = cfg.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.decoder.validate(self)?;

        Ok(())
    }
}
