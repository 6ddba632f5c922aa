//! Simple TOML parser for clock configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the clock configuration. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [clock] and [display] section headers
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Multi-line strings, escapes
//! - Arrays and inline tables
//! - Dotted keys

use core::str::FromStr;

use heapless::String;

use super::types::{ClockConfig, ConfigError};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognized in the current section
    UnknownKey,
    /// Line is not `key = value`, or the value has the wrong type
    InvalidValue,
    /// String value longer than its fixed capacity
    TooLong,
    /// Parsed value failed range validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Clock,
    Display,
}

/// Parse TOML configuration into ClockConfig
///
/// Keys that are absent keep their default value.
pub fn parse_config(input: &str) -> Result<ClockConfig, ParseError> {
    let mut config = ClockConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = match line[1..line.len() - 1].trim() {
                "clock" => Section::Clock,
                "display" => Section::Display,
                _ => return Err(ParseError::InvalidSection),
            };
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidValue)?;
        let (key, value) = (key.trim(), value.trim());

        match (section, key) {
            (Section::Clock, "min_valid_year") => config.min_valid_year = parse_int(value)?,
            (Section::Clock, "utc_offset_minutes") => {
                config.utc_offset_minutes = parse_int(value)?
            }
            (Section::Clock, "zone") => config.zone = parse_string(value)?,
            (Section::Clock, "tick_ms") => config.tick_ms = parse_int(value)?,
            (Section::Display, "brightness") => config.brightness = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        }
    }

    config.validate()?;
    Ok(config)
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_int<T: FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_string<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)?;

    let mut s = String::new();
    s.push_str(inner).map_err(|_| ParseError::TooLong)?;
    Ok(s)
}
