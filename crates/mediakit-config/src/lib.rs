mod config;

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use mediakit_core::{MediaError, MediaResult};

pub use config::{ApiConfig, DEFAULT_LISTEN, MediakitConfig, OutputConfig, ServerConfig};

pub const KEYS: [&str; 4] = [
    "api.youtube_key",
    "api.youtube_base_url",
    "server.listen",
    "output.json",
];

pub fn config_path() -> MediaResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MediaError::Config("home directory not found".to_string()))?;
    Ok(home.join(".mediakit").join("config.toml"))
}

pub fn load_config() -> MediaResult<MediakitConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(MediakitConfig::default());
    }
    let content = fs::read_to_string(&path)
        .map_err(|err| MediaError::Config(format!("failed to read config: {err}")))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> MediaResult<MediakitConfig> {
    toml::from_str(content)
        .map_err(|err| MediaError::Config(format!("failed to parse config: {err}")))
}

pub fn save_config(config: &MediakitConfig) -> MediaResult<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|err| MediaError::Config(format!("failed to serialize config: {err}")))?;
    write_config_file(&content)
}

pub fn config_exists() -> MediaResult<bool> {
    let path = config_path()?;
    Ok(path.exists())
}

fn system_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// First non-blank value among `names`.
fn env_override(lookup: impl Fn(&str) -> Option<String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|value| !value.trim().is_empty())
}

pub fn resolve_youtube_key(config: &MediakitConfig) -> Option<String> {
    resolve_youtube_key_with(config, system_env)
}

pub fn resolve_youtube_key_with(
    config: &MediakitConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    env_override(lookup, &["MEDIAKIT_YOUTUBE_KEY", "YOUTUBE_API_KEY"])
        .or_else(|| config.api.youtube_key.clone())
}

pub fn resolve_youtube_base_url(config: &MediakitConfig) -> Option<String> {
    resolve_youtube_base_url_with(config, system_env)
}

pub fn resolve_youtube_base_url_with(
    config: &MediakitConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    env_override(lookup, &["MEDIAKIT_YOUTUBE_BASE_URL"])
        .or_else(|| config.api.youtube_base_url.clone())
}

pub fn resolve_listen(config: &MediakitConfig) -> String {
    resolve_listen_with(config, system_env)
}

pub fn resolve_listen_with(
    config: &MediakitConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    env_override(lookup, &["MEDIAKIT_LISTEN"])
        .or_else(|| config.server.listen.clone())
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string())
}

pub fn resolve_json_output(config: &MediakitConfig) -> Option<bool> {
    resolve_json_output_with(config, system_env)
}

pub fn resolve_json_output_with(
    config: &MediakitConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<bool> {
    if let Some(value) = env_override(lookup, &["MEDIAKIT_OUTPUT_JSON"]) {
        return Some(parse_flag(&value));
    }
    config.output.json
}

fn parse_flag(value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    normalized == "1" || normalized == "true" || normalized == "yes"
}

pub fn get_config_value(config: &MediakitConfig, key_path: &str) -> Option<String> {
    let parts: Vec<&str> = key_path.split('.').collect();

    match parts.as_slice() {
        ["api", "youtube_key"] => config.api.youtube_key.clone(),
        ["api", "youtube_base_url"] => config.api.youtube_base_url.clone(),
        ["server", "listen"] => config.server.listen.clone(),
        ["output", "json"] => config.output.json.map(|b| b.to_string()),
        _ => None,
    }
}

pub fn set_config_value(key_path: &str, value: &str) -> MediaResult<()> {
    let path = config_path()?;
    let content = if path.exists() {
        fs::read_to_string(&path)
            .map_err(|err| MediaError::Config(format!("failed to read config: {err}")))?
    } else {
        String::new()
    };

    let updated = set_value_in_document(&content, key_path, value)?;
    write_config_file(&updated)
}

/// Sets one dotted key inside a TOML document, leaving the rest untouched.
pub fn set_value_in_document(content: &str, key_path: &str, value: &str) -> MediaResult<String> {
    if !KEYS.contains(&key_path) {
        return Err(MediaError::Config(format!(
            "unknown key '{key_path}' (expected one of: {})",
            KEYS.join(", ")
        )));
    }

    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|err| MediaError::Config(format!("failed to parse config: {err}")))?;

    let parts: Vec<&str> = key_path.split('.').collect();
    let Some((last_part, tables)) = parts.split_last() else {
        return Err(MediaError::Config(format!("invalid key path '{key_path}'")));
    };

    let mut current = doc.as_table_mut();
    for part in tables {
        current = current
            .entry(part)
            .or_insert(toml_edit::Item::Table(Default::default()))
            .as_table_mut()
            .ok_or_else(|| {
                MediaError::Config(format!("cannot set nested value in '{key_path}'"))
            })?;
    }

    current[*last_part] = if key_path == "output.json" {
        toml_edit::value(parse_flag(value))
    } else {
        toml_edit::value(value)
    };

    Ok(doc.to_string())
}

fn write_config_file(content: &str) -> MediaResult<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| MediaError::Config(format!("failed to create config dir: {err}")))?;
    }
    fs::write(&path, content)
        .map_err(|err| MediaError::Config(format!("failed to write config: {err}")))?;
    Ok(())
}

pub fn open_in_editor() -> MediaResult<()> {
    let path = config_path()?;
    if !path.exists() {
        save_config(&MediakitConfig::default())?;
    }

    let editor = env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(target_os = "windows") {
            "notepad".to_string()
        } else {
            "vi".to_string()
        }
    });

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .map_err(|err| MediaError::Config(format!("failed to open editor '{editor}': {err}")))?;

    if !status.success() {
        return Err(MediaError::Config(format!(
            "editor exited with status: {status}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn parse_config_accepts_partial_file() {
        let config = parse_config("[api]\nyoutube_key = \"abc\"\n").unwrap();
        assert_eq!(config.api.youtube_key.as_deref(), Some("abc"));
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.output.json, None);

        assert_eq!(parse_config("").unwrap(), MediakitConfig::default());
    }

    #[test]
    fn parse_config_rejects_bad_toml() {
        assert!(matches!(
            parse_config("[api\nyoutube_key ="),
            Err(MediaError::Config(_))
        ));
    }

    #[test]
    fn youtube_key_env_takes_precedence() {
        let mut config = MediakitConfig::default();
        config.api.youtube_key = Some("from-file".to_string());

        assert_eq!(
            resolve_youtube_key_with(&config, lookup(&[("MEDIAKIT_YOUTUBE_KEY", "from-env")])),
            Some("from-env".to_string())
        );
        assert_eq!(
            resolve_youtube_key_with(&config, lookup(&[("YOUTUBE_API_KEY", "legacy")])),
            Some("legacy".to_string())
        );
        assert_eq!(
            resolve_youtube_key_with(&config, lookup(&[("MEDIAKIT_YOUTUBE_KEY", "  ")])),
            Some("from-file".to_string())
        );
        assert_eq!(
            resolve_youtube_key_with(&MediakitConfig::default(), lookup(&[])),
            None
        );
    }

    #[test]
    fn listen_defaults_when_unset() {
        assert_eq!(
            resolve_listen_with(&MediakitConfig::default(), lookup(&[])),
            DEFAULT_LISTEN
        );
        assert_eq!(
            resolve_listen_with(
                &MediakitConfig::default(),
                lookup(&[("MEDIAKIT_LISTEN", "0.0.0.0:8080")])
            ),
            "0.0.0.0:8080"
        );
    }

    #[test]
    fn base_url_env_overrides_file() {
        let mut config = MediakitConfig::default();
        assert_eq!(resolve_youtube_base_url_with(&config, lookup(&[])), None);

        config.api.youtube_base_url = Some("http://localhost:9000".to_string());
        assert_eq!(
            resolve_youtube_base_url_with(&config, lookup(&[])).as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(
            resolve_youtube_base_url_with(
                &config,
                lookup(&[("MEDIAKIT_YOUTUBE_BASE_URL", "http://127.0.0.1:8081")])
            )
            .as_deref(),
            Some("http://127.0.0.1:8081")
        );
    }

    #[test]
    fn json_output_env_parses_flags() {
        let mut config = MediakitConfig::default();
        assert_eq!(resolve_json_output_with(&config, lookup(&[])), None);

        for value in ["1", "true", "YES", " True "] {
            assert_eq!(
                resolve_json_output_with(&config, lookup(&[("MEDIAKIT_OUTPUT_JSON", value)])),
                Some(true),
                "{value}"
            );
        }
        for value in ["0", "false", "no", "off"] {
            assert_eq!(
                resolve_json_output_with(&config, lookup(&[("MEDIAKIT_OUTPUT_JSON", value)])),
                Some(false),
                "{value}"
            );
        }

        config.output.json = Some(true);
        assert_eq!(
            resolve_json_output_with(&config, lookup(&[("MEDIAKIT_OUTPUT_JSON", "  ")])),
            Some(true)
        );
        assert_eq!(
            resolve_json_output_with(&config, lookup(&[("MEDIAKIT_OUTPUT_JSON", "0")])),
            Some(false)
        );
    }

    #[test]
    fn get_config_value_reads_known_keys() {
        let mut config = MediakitConfig::default();
        config.server.listen = Some("0.0.0.0:9000".to_string());
        config.output.json = Some(true);
        assert_eq!(
            get_config_value(&config, "server.listen").as_deref(),
            Some("0.0.0.0:9000")
        );
        assert_eq!(get_config_value(&config, "output.json").as_deref(), Some("true"));
        assert_eq!(get_config_value(&config, "api.youtube_key"), None);
        assert_eq!(get_config_value(&config, "nope"), None);
    }

    #[test]
    fn set_value_preserves_other_entries() {
        let content = "# my settings\n[api]\nyoutube_key = \"abc\"\n";
        let updated = set_value_in_document(content, "server.listen", "0.0.0.0:8080").unwrap();
        assert!(updated.contains("# my settings"));

        let config = parse_config(&updated).unwrap();
        assert_eq!(config.api.youtube_key.as_deref(), Some("abc"));
        assert_eq!(config.server.listen.as_deref(), Some("0.0.0.0:8080"));
    }

    #[test]
    fn set_value_writes_booleans_for_flags() {
        let updated = set_value_in_document("", "output.json", "yes").unwrap();
        let config = parse_config(&updated).unwrap();
        assert_eq!(config.output.json, Some(true));
    }

    #[test]
    fn set_value_rejects_unknown_keys() {
        assert!(matches!(
            set_value_in_document("", "youtube_key", "abc"),
            Err(MediaError::Config(_))
        ));
        assert!(matches!(
            set_value_in_document("", "api.spotify_key", "abc"),
            Err(MediaError::Config(_))
        ));
    }
}
