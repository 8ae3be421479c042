use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PsaError;

/// Target environment of a generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Harmattan,
    Fremantle,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Harmattan, Platform::Fremantle];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Harmattan => "harmattan",
            Platform::Fremantle => "fremantle",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "harmattan" => Ok(Platform::Harmattan),
            "fremantle" => Ok(Platform::Fremantle),
            other => Err(PsaError::UnknownPlatform {
                platform: other.to_string(),
            }),
        }
    }
}
