use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How series values are presented: raw prices or percent change from a
/// basis price tied to the visible chart window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Percent,
    Dollar,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Percent => "percent",
            DisplayMode::Dollar => "dollar",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percent" => Ok(DisplayMode::Percent),
            // "price" is the legacy name for dollar mode
            "dollar" | "price" => Ok(DisplayMode::Dollar),
            other => Err(Error::InvalidInput(format!(
                "Unknown mode '{}', expected percent or dollar",
                other
            ))),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Percent
    }
}
