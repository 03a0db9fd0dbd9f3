use std::fmt;

/// Why the webcam picker stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerError {
    /// No video input has this id or label.
    DeviceNotFound { input: String },
    /// A numeric query parameter did not parse.
    InvalidNumber { param: &'static str, value: String },
    /// A page element the picker renders into is missing.
    MissingElement(String),
    /// The browser rejected a call (permission denied, no such device, ...).
    Platform(String),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerError::DeviceNotFound { input } => write!(f, "device not found: \"{input}\""),
            PickerError::InvalidNumber { param, value } => {
                write!(f, "query parameter `{param}` is not a number: \"{value}\"")
            }
            PickerError::MissingElement(id) => write!(f, "missing element #{id}"),
            PickerError::Platform(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for PickerError {}

/// Why a demo config override was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The override is not valid JSON for [`crate::config::DemoConfig`].
    Parse(String),
    /// A numeric field is out of range (zero, negative or not finite).
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "config field `{field}` out of range: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
