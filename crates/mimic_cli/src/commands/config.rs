//! `mimic config` subcommands.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use mimic_constant::app;
use mimic_runtime::{RuntimeConfig, ENV_KEYS};

use crate::output;

pub fn show(config: &RuntimeConfig) -> Result<()> {
    let entries: Vec<(String, String)> = config
        .entries()
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

    let mut table = output::table();
    output::table_header(&mut table, &["Setting", "Value"]);
    for (key, value) in &entries {
        output::table_row(&mut table, key, value);
    }
    output::table_print(&table, "config", &entries);

    if !output::is_json() {
        println!();
        output::dim(&format!(
            "Change a setting with `mimic config set KEY VALUE` (saved to ~/{}/{}).",
            app::DATA_DIR,
            app::ENV_FILE
        ));
    }
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let key = canonical_key(key)?;
    let path = config_path()?;
    save_setting(&path, &key, value)?;

    output::success(&format!("Saved {key} to {}", path.display()));
    output::dim("Variables set in the environment or in a project .mimic/env take precedence.");
    Ok(())
}

/// `owner` and `MIMIC_OWNER` both name `MIMIC_OWNER`.
fn canonical_key(key: &str) -> Result<String> {
    let upper = key.trim().to_uppercase().replace('-', "_");
    let full = if upper.starts_with("MIMIC_") {
        upper
    } else {
        format!("MIMIC_{upper}")
    };
    if ENV_KEYS.contains(&full.as_str()) {
        Ok(full)
    } else {
        bail!("Unknown setting '{key}'. Available: {}", ENV_KEYS.join(", "))
    }
}

fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    let dir = home.join(app::DATA_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir.join(app::ENV_FILE))
}

/// Upsert `key` in an env file of `export KEY="value"` lines.
fn save_setting(path: &Path, key: &str, value: &str) -> Result<()> {
    let existing = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut settings = parse_env(&existing);
    settings.insert(key.to_string(), value.to_string());

    let mut content = String::new();
    content.push_str("# mimic configuration\n");
    content.push_str("# Loaded automatically by mimic; can also be sourced: source ~/.mimic/env\n\n");
    for (k, v) in &settings {
        content.push_str(&format!("export {k}=\"{}\"\n", escape(v)));
    }

    fs::write(path, content)?;
    Ok(())
}

fn parse_env(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.starts_with('#') {
                return None;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            Some((key.trim().to_string(), unquote(value.trim())))
        })
        .collect()
}

fn unquote(value: &str) -> String {
    if let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    {
        inner.replace("\\\"", "\"").replace("\\\\", "\\")
    } else if let Some(inner) = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        inner.to_string()
    } else {
        value.to_string()
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
