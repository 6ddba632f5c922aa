//! Build script for horologe-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml at compile time
//! - Exports the build timestamp used as the last-resort boot time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    setup_linker();
    validate_config();
    export_build_epoch();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Seconds since the Unix epoch at build time
///
/// `SOURCE_DATE_EPOCH` wins when set, so reproducible builds embed a
/// fixed value.
fn export_build_epoch() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let epoch = match env::var("SOURCE_DATE_EPOCH") {
        Ok(value) => value.trim().parse::<i64>().unwrap_or_else(|_| {
            panic!("SOURCE_DATE_EPOCH must be an integer, got {:?}", value)
        }),
        Err(_) => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0),
    };

    println!("cargo:rustc-env=HOROLOGE_BUILD_EPOCH={}", epoch);
}

/// Validate clock.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds clock.toml as its default configuration.    ║\n\
            ║  Please create one in the horologe-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in clock.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_clock(&config, &mut errors);
    validate_display(&config, &mut errors);
    report("Invalid clock configuration", &errors);

    println!("cargo:warning=clock.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only [clock] and [display] are understood by the firmware parser
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        if name != "clock" && name != "display" {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

fn check_int(
    section: &toml::Table,
    name: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match section.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {} to {}", name, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", name, key)),
    }
}

fn validate_clock(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(clock) = config.get("clock").and_then(|c| c.as_table()) else {
        return;
    };

    for key in clock.keys() {
        if !matches!(
            key.as_str(),
            "min_valid_year" | "utc_offset_minutes" | "zone" | "tick_ms"
        ) {
            errors.push(format!("[clock] unknown key '{}'", key));
        }
    }

    check_int(clock, "clock", "min_valid_year", 2000, 2099, errors);
    check_int(clock, "clock", "utc_offset_minutes", -720, 840, errors);
    check_int(clock, "clock", "tick_ms", 100, 60_000, errors);

    match clock.get("zone") {
        None => {}
        Some(toml::Value::String(zone)) if (1..=8).contains(&zone.len()) => {}
        Some(toml::Value::String(_)) => {
            errors.push("[clock] zone must be 1 to 8 bytes".to_string());
        }
        Some(_) => errors.push("[clock] zone must be a string".to_string()),
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display").and_then(|d| d.as_table()) else {
        return;
    };

    for key in display.keys() {
        if key != "brightness" {
            errors.push(format!("[display] unknown key '{}'", key));
        }
    }

    check_int(display, "display", "brightness", 0, 7, errors);
}
