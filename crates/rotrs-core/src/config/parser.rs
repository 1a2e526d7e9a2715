// Rotrs Config Parser - TOML with Serde
// Parses sensor rotation configuration from TOML files

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::input::VIRTUAL_DEVICE_PREFIX;
use crate::transform::{ProcessorChain, RotationConfig, SensorRotation};

/// Default uinput device name
pub const DEFAULT_VIRTUAL_DEVICE_NAME: &str = "rotrs (virtual) pointer";
/// Default evdev poll timeout
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 100;
/// Default sleep after an idle poll
pub const DEFAULT_IDLE_SLEEP_MS: u64 = 10;

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("No [[sensor]] entries configured")]
    NoSensors,

    #[error("Sensor entry {0} has an empty name")]
    EmptySensorName(usize),

    #[error("Duplicate sensor name: {0}")]
    DuplicateSensor(String),
}

/// Main configuration structure (root TOML table)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    /// General settings
    #[serde(default)]
    pub general: Option<GeneralConfig>,

    /// Rotated sensors
    #[serde(default)]
    pub sensor: Vec<SensorTomlEntry>,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Name of the uinput device
    pub virtual_device_name: Option<String>,
    /// Timeout passed to the evdev poll loop
    pub poll_timeout_ms: Option<u64>,
    /// Sleep after a poll that returned nothing
    pub idle_sleep_ms: Option<u64>,
}

/// One `[[sensor]]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorTomlEntry {
    /// Name identifier for this sensor
    pub name: String,

    /// Mounting rotation in degrees
    pub rotation_angle: i32,

    /// Device names/paths this sensor applies to (empty = every pointer)
    #[serde(default)]
    pub devices: Vec<String>,
}

/// A validated sensor entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorEntry {
    pub name: String,
    pub rotation: RotationConfig,
    pub devices: Vec<String>,
}

impl SensorEntry {
    pub fn new(name: impl Into<String>, rotation_angle: i32, devices: Vec<String>) -> Self {
        Self {
            name: name.into(),
            rotation: RotationConfig::new(rotation_angle),
            devices,
        }
    }

    /// Whether this sensor applies to a device.
    ///
    /// An empty device list applies to every device the event loop selected.
    pub fn applies_to(&self, device_name: &str, device_path: &str) -> bool {
        self.devices.is_empty()
            || self
                .devices
                .iter()
                .any(|d| d == device_name || d == device_path)
    }
}

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Sensors in file order
    pub sensors: Vec<SensorEntry>,
    /// Name of the uinput device
    pub virtual_device_name: String,
    /// Event poll timeout in milliseconds
    pub poll_timeout_ms: u64,
    /// Idle loop sleep in milliseconds
    pub idle_sleep_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sensors: vec![],
            virtual_device_name: DEFAULT_VIRTUAL_DEVICE_NAME.to_string(),
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            idle_sleep_ms: DEFAULT_IDLE_SLEEP_MS,
        }
    }
}

impl Config {
    /// Single-sensor configuration, used when the angle comes from the command line
    pub fn single(rotation_angle: i32, devices: Vec<String>) -> Self {
        Self {
            sensors: vec![SensorEntry::new("cli", rotation_angle, devices)],
            ..Self::default()
        }
    }

    /// Get the default config path (~/.config/rotrs/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rotrs").join("config.toml"))
    }

    /// Parse a TOML configuration file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

        toml_config.to_config()
    }

    /// Union of every sensor's device list, for the event loop filter.
    ///
    /// Empty when any sensor applies to all pointers, which means autodetect.
    pub fn device_filter(&self) -> Vec<String> {
        if self.sensors.iter().any(|s| s.devices.is_empty()) {
            return vec![];
        }
        let mut seen = HashSet::new();
        self.sensors
            .iter()
            .flat_map(|s| s.devices.iter())
            .filter(|d| seen.insert(d.as_str()))
            .cloned()
            .collect()
    }

    /// Sensors that apply to a device, in config order
    pub fn sensors_for_device<'a>(
        &'a self,
        device_name: &'a str,
        device_path: &'a str,
    ) -> impl Iterator<Item = &'a SensorEntry> + 'a {
        self.sensors
            .iter()
            .filter(move |s| s.applies_to(device_name, device_path))
    }

    /// Build a fresh processor chain for one device.
    ///
    /// Each call initializes new rotation state, so every device gets its own.
    pub fn build_chain(&self, device_name: &str, device_path: &str) -> ProcessorChain {
        let mut chain = ProcessorChain::new();
        for sensor in self.sensors_for_device(device_name, device_path) {
            chain.push(SensorRotation::new(sensor.name.clone(), sensor.rotation));
        }
        chain
    }
}

impl ConfigToml {
    /// Validate and convert to the internal Config
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        if self.sensor.is_empty() {
            return Err(ConfigError::NoSensors);
        }

        let mut names = HashSet::new();
        let mut sensors = Vec::with_capacity(self.sensor.len());
        for (index, entry) in self.sensor.iter().enumerate() {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptySensorName(index));
            }
            if !names.insert(name.to_string()) {
                return Err(ConfigError::DuplicateSensor(name.to_string()));
            }
            log::debug!(
                "sensor '{}': rotation {} on {:?}",
                name,
                entry.rotation_angle,
                entry.devices
            );
            sensors.push(SensorEntry::new(
                name,
                entry.rotation_angle,
                entry.devices.clone(),
            ));
        }

        let mut config = Config {
            sensors,
            ..Config::default()
        };

        if let Some(general) = &self.general {
            if let Some(name) = &general.virtual_device_name {
                if !name.contains(VIRTUAL_DEVICE_PREFIX) {
                    log::warn!(
                        "virtual device name '{}' lacks the '{}' prefix; rotrs may grab its own output",
                        name,
                        VIRTUAL_DEVICE_PREFIX
                    );
                }
                config.virtual_device_name = name.clone();
            }
            if let Some(ms) = general.poll_timeout_ms {
                config.poll_timeout_ms = ms;
            }
            if let Some(ms) = general.idle_sleep_ms {
                config.idle_sleep_ms = ms;
            }
        }

        Ok(config)
    }
}
