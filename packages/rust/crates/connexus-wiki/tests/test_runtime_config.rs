use connexus_wiki::{WikiError, resolve_wiki_runtime_with_env};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_defaults_without_config() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let config = resolve_wiki_runtime_with_env(tmp.path(), None, no_env)?;
    assert_eq!(config.root, tmp.path());
    assert_eq!(config.home_topic, "home");
    assert_eq!(config.summary_topic, "todos");
    assert_eq!(config.document_extension, "md");
    assert_eq!(config.static_prefix, "/static");
    Ok(())
}

#[test]
fn test_corpus_then_explicit_then_env() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_file(
        &tmp.path().join(".connexus/wiki.yaml"),
        "wiki:\n  home_topic: start\n  summary_topic: agenda\n  document_extension: .markdown\n",
    )?;
    let explicit = tmp.path().join("override.yaml");
    write_file(
        &explicit,
        "wiki:\n  summary_topic: tasks\n  static_prefix: /assets\n",
    )?;

    let config = resolve_wiki_runtime_with_env(tmp.path(), Some(&explicit), no_env)?;
    assert_eq!(config.home_topic, "start");
    assert_eq!(config.summary_topic, "tasks");
    assert_eq!(config.document_extension, "markdown");
    assert_eq!(config.static_prefix, "/assets");

    let env: HashMap<&str, &str> = HashMap::from([
        ("CONNEXUS_HOME_TOPIC", "index"),
        ("CONNEXUS_STATIC_PREFIX", "/public"),
        ("CONNEXUS_SUMMARY_TOPIC", "   "),
    ]);
    let config = resolve_wiki_runtime_with_env(tmp.path(), Some(&explicit), |key| {
        env.get(key).map(|value| (*value).to_string())
    })?;
    assert_eq!(config.home_topic, "index");
    assert_eq!(config.summary_topic, "tasks");
    assert_eq!(config.static_prefix, "/public");
    Ok(())
}

#[test]
fn test_empty_static_prefix_is_kept() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_file(
        &tmp.path().join(".connexus/wiki.yaml"),
        "wiki:\n  static_prefix: \"\"\n",
    )?;
    let config = resolve_wiki_runtime_with_env(tmp.path(), None, no_env)?;
    assert_eq!(config.static_prefix, "");
    Ok(())
}

#[test]
fn test_broken_corpus_config_is_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_file(&tmp.path().join(".connexus/wiki.yaml"), "wiki: [unclosed\n")?;
    let config = resolve_wiki_runtime_with_env(tmp.path(), None, no_env)?;
    assert_eq!(config.home_topic, "home");
    Ok(())
}

#[test]
fn test_missing_explicit_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let missing = tmp.path().join("absent.yaml");
    let result = resolve_wiki_runtime_with_env(tmp.path(), Some(&missing), no_env);
    assert!(matches!(result, Err(WikiError::Config { .. })));
    Ok(())
}
