//! Typography presets
//!
//! Heading levels and the size/underline/colour preset drawn for each one.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::surface::TextOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text level, from `h1` down to body text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    #[default]
    Normal,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 7] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
        HeadingLevel::Normal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
            HeadingLevel::Normal => "normal",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeadingLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::config(format!("unknown heading level '{s}'")))
    }
}

/// How text at one level is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingPreset {
    pub size: f32,
    pub underline: bool,
    /// Overrides the document's primary colour when set
    pub color: Option<Color>,
}

impl HeadingPreset {
    pub const fn sized(size: f32) -> Self {
        Self {
            size,
            underline: false,
            color: None,
        }
    }

    /// Text options implied by the preset, before per-call options
    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            underline: self.underline,
            color: self.color,
            ..TextOptions::default()
        }
    }
}

impl Default for HeadingPreset {
    fn default() -> Self {
        Self::sized(12.0)
    }
}

/// Preset for every [`HeadingLevel`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSizes {
    pub normal: HeadingPreset,
    pub h1: HeadingPreset,
    pub h2: HeadingPreset,
    pub h3: HeadingPreset,
    pub h4: HeadingPreset,
    pub h5: HeadingPreset,
    pub h6: HeadingPreset,
}

impl Default for TextSizes {
    fn default() -> Self {
        Self {
            normal: HeadingPreset::sized(12.0),
            h1: HeadingPreset::sized(24.0),
            h2: HeadingPreset::sized(22.0),
            h3: HeadingPreset::sized(20.0),
            h4: HeadingPreset::sized(18.0),
            h5: HeadingPreset::sized(16.0),
            h6: HeadingPreset::sized(14.0),
        }
    }
}

impl TextSizes {
    pub fn preset(&self, level: HeadingLevel) -> &HeadingPreset {
        match level {
            HeadingLevel::H1 => &self.h1,
            HeadingLevel::H2 => &self.h2,
            HeadingLevel::H3 => &self.h3,
            HeadingLevel::H4 => &self.h4,
            HeadingLevel::H5 => &self.h5,
            HeadingLevel::H6 => &self.h6,
            HeadingLevel::Normal => &self.normal,
        }
    }

    pub fn preset_mut(&mut self, level: HeadingLevel) -> &mut HeadingPreset {
        match level {
            HeadingLevel::H1 => &mut self.h1,
            HeadingLevel::H2 => &mut self.h2,
            HeadingLevel::H3 => &mut self.h3,
            HeadingLevel::H4 => &mut self.h4,
            HeadingLevel::H5 => &mut self.h5,
            HeadingLevel::H6 => &mut self.h6,
            HeadingLevel::Normal => &mut self.normal,
        }
    }

    pub fn size(&self, level: HeadingLevel) -> f32 {
        self.preset(level).size
    }

    /// Every preset must have a positive, finite size
    pub fn validate(&self) -> Result<()> {
        for level in HeadingLevel::ALL {
            let size = self.size(level);
            if !size.is_finite() || size <= 0.0 {
                return Err(Error::config(format!(
                    "text size for {level} must be positive, got {size}"
                )));
            }
        }
        Ok(())
    }
}
