//! Layered wiki settings: defaults, corpus YAML, explicit YAML, environment.

use crate::error::{Result, WikiError};
use crate::link_graph::DEFAULT_STATIC_PREFIX;
use crate::store::DEFAULT_DOCUMENT_EXTENSION;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Per-corpus settings file, relative to the corpus root.
pub const WIKI_CONFIG_RELATIVE_PATH: &str = ".connexus/wiki.yaml";
pub(crate) const HOME_TOPIC_ENV: &str = "CONNEXUS_HOME_TOPIC";
pub(crate) const SUMMARY_TOPIC_ENV: &str = "CONNEXUS_SUMMARY_TOPIC";
pub(crate) const STATIC_PREFIX_ENV: &str = "CONNEXUS_STATIC_PREFIX";
pub(crate) const DEFAULT_HOME_TOPIC: &str = "home";
pub(crate) const DEFAULT_SUMMARY_TOPIC: &str = "todos";

/// Resolved wiki settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WikiRuntimeConfig {
    /// Corpus root directory.
    pub root: PathBuf,
    /// Landing topic.
    pub home_topic: String,
    /// Reserved topic of the generated todo summary page.
    pub summary_topic: String,
    /// Document extension without the dot.
    pub document_extension: String,
    /// Link targets starting with this prefix are static assets.
    pub static_prefix: String,
}

impl WikiRuntimeConfig {
    /// Defaults for a corpus rooted at `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            home_topic: DEFAULT_HOME_TOPIC.to_string(),
            summary_topic: DEFAULT_SUMMARY_TOPIC.to_string(),
            document_extension: DEFAULT_DOCUMENT_EXTENSION.to_string(),
            static_prefix: DEFAULT_STATIC_PREFIX.to_string(),
        }
    }
}

fn read_yaml_file(path: &Path) -> std::result::Result<Value, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_yaml::from_str::<Value>(&content).map_err(|e| e.to_string())
}

/// Overlay `overlay` onto `base`: mappings merge key by key, anything else replaces.
fn deep_merge(base: &mut Value, overlay: Value) {
    let Value::Mapping(overlay_map) = overlay else {
        *base = overlay;
        return;
    };
    let Value::Mapping(base_map) = base else {
        *base = Value::Mapping(overlay_map);
        return;
    };
    for (key, value) in overlay_map {
        match base_map.get_mut(&key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                base_map.insert(key, value);
            }
        }
    }
}

fn wiki_setting<'a>(settings: &'a Value, key: &str) -> Option<&'a Value> {
    settings.get("wiki")?.get(key)
}

fn wiki_setting_text(settings: &Value, key: &str) -> Option<String> {
    match wiki_setting(settings, key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// First candidate that is non-blank after trimming.
fn pick_trimmed(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn merged_wiki_settings(root: &Path, explicit: Option<&Path>) -> Result<Value> {
    let mut merged = Value::Mapping(Mapping::new());

    let corpus_path = root.join(WIKI_CONFIG_RELATIVE_PATH);
    if corpus_path.is_file() {
        match read_yaml_file(&corpus_path) {
            Ok(corpus) => deep_merge(&mut merged, corpus),
            Err(e) => log::warn!("ignoring wiki config {}: {e}", corpus_path.display()),
        }
    }

    if let Some(path) = explicit {
        let user = read_yaml_file(path).map_err(|message| WikiError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        deep_merge(&mut merged, user);
    }
    Ok(merged)
}

/// Resolve settings for the corpus at `root`.
///
/// Order (later wins): defaults, `<root>/.connexus/wiki.yaml`, the explicit
/// `--conf` file, then `CONNEXUS_*` environment variables.
///
/// # Errors
///
/// Returns [`WikiError::Config`] when `explicit` cannot be read or parsed.
pub fn resolve_wiki_runtime(root: &Path, explicit: Option<&Path>) -> Result<WikiRuntimeConfig> {
    resolve_wiki_runtime_with_env(root, explicit, |key| std::env::var(key).ok())
}

/// Same as [`resolve_wiki_runtime`] with an injectable environment lookup.
///
/// # Errors
///
/// Returns [`WikiError::Config`] when `explicit` cannot be read or parsed.
pub fn resolve_wiki_runtime_with_env(
    root: &Path,
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<WikiRuntimeConfig> {
    let settings = merged_wiki_settings(root, explicit)?;
    let defaults = WikiRuntimeConfig::with_root(root);

    let home_topic = pick_trimmed([
        env(HOME_TOPIC_ENV),
        wiki_setting_text(&settings, "home_topic"),
    ])
    .unwrap_or(defaults.home_topic);
    let summary_topic = pick_trimmed([
        env(SUMMARY_TOPIC_ENV),
        wiki_setting_text(&settings, "summary_topic"),
    ])
    .unwrap_or(defaults.summary_topic);
    let document_extension = pick_trimmed([wiki_setting_text(&settings, "document_extension")])
        .map(|ext| ext.trim_start_matches('.').to_string())
        .filter(|ext| !ext.is_empty())
        .unwrap_or(defaults.document_extension);
    // An explicitly empty static prefix disables static filtering.
    let static_prefix = env(STATIC_PREFIX_ENV)
        .or_else(|| wiki_setting_text(&settings, "static_prefix"))
        .map(|prefix| prefix.trim().to_string())
        .unwrap_or(defaults.static_prefix);

    Ok(WikiRuntimeConfig {
        root: defaults.root,
        home_topic,
        summary_topic,
        document_extension,
        static_prefix,
    })
}

#[cfg(test)]
mod tests {
    use super::{Value, deep_merge, pick_trimmed, wiki_setting_text};

    #[test]
    fn overlay_replaces_leaves_and_keeps_siblings() -> Result<(), Box<dyn std::error::Error>> {
        let mut base: Value =
            serde_yaml::from_str("wiki:\n  home_topic: start\n  static_prefix: /s\n")?;
        let overlay: Value = serde_yaml::from_str("wiki:\n  home_topic: index\n")?;
        deep_merge(&mut base, overlay);
        assert_eq!(
            wiki_setting_text(&base, "home_topic").as_deref(),
            Some("index")
        );
        assert_eq!(
            wiki_setting_text(&base, "static_prefix").as_deref(),
            Some("/s")
        );
        Ok(())
    }

    #[test]
    fn scalar_settings_read_as_text() -> Result<(), Box<dyn std::error::Error>> {
        let settings: Value = serde_yaml::from_str("wiki:\n  home_topic: 2024\n")?;
        assert_eq!(
            wiki_setting_text(&settings, "home_topic").as_deref(),
            Some("2024")
        );
        assert_eq!(wiki_setting_text(&settings, "missing"), None);
        Ok(())
    }

    #[test]
    fn blank_candidates_are_skipped() {
        let picked = pick_trimmed([None, Some("   ".to_string()), Some(" home ".to_string())]);
        assert_eq!(picked.as_deref(), Some("home"));
    }
}
