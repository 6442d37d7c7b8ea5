//! Serializer configuration types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Convention used to encode array-valued params
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    /// `ids[0]=1&ids[1]=2`
    Indices,
    /// `ids[]=1&ids[]=2`
    #[default]
    Brackets,
    /// `ids=1&ids=2`
    Repeat,
    /// `ids=1,2`
    Comma,
}

impl ArrayFormat {
    /// Format name as used in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayFormat::Indices => "indices",
            ArrayFormat::Brackets => "brackets",
            ArrayFormat::Repeat => "repeat",
            ArrayFormat::Comma => "comma",
        }
    }
}

impl fmt::Display for ArrayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrayFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "indices" => Ok(ArrayFormat::Indices),
            "brackets" => Ok(ArrayFormat::Brackets),
            "repeat" => Ok(ArrayFormat::Repeat),
            "comma" => Ok(ArrayFormat::Comma),
            other => Err(Error::config(format!("Unknown array format: {other}"))),
        }
    }
}

/// Serializer section of a base config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializerConfig {
    /// Array encoding; brackets when unset
    #[serde(default)]
    pub array: Option<ArrayFormat>,
}

/// Params-to-query-string encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Serializer {
    array_format: ArrayFormat,
}

impl Serializer {
    /// Create a serializer with the given array format
    pub fn new(array_format: ArrayFormat) -> Self {
        Self { array_format }
    }

    /// Create a serializer from an optional config section
    pub fn from_config(config: Option<&SerializerConfig>) -> Self {
        Self::new(config.and_then(|c| c.array).unwrap_or_default())
    }

    /// The configured array format
    pub fn array_format(&self) -> ArrayFormat {
        self.array_format
    }
}
