//! Configuration types
//!
//! Clock behavior settings, loaded from a small TOML file embedded in the
//! firmware (or a copy stored in flash).

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
