//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use diagram_export::config::{load_config, load_config_or_default, AppConfig};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("DIAGRAM_EXPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("DIAGRAM_EXPORT_EXPORT_FORMAT");
    std::env::remove_var("DIAGRAM_EXPORT_EXPORT_FILE_EXTENSIONS");
    std::env::remove_var("DIAGRAM_EXPORT_RENDERER_COMMAND");
    std::env::remove_var("DIAGRAM_EXPORT_RENDERER_CONCURRENCY");
    std::env::remove_var("TEST_DX_RENDERER");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[[workspace.folders]]
path = "docs"
name = "documentation"
export_format = "svg"

[[workspace.folders]]
path = "design"
file_extensions = [".puml"]

[export]
file_extensions = [".puml", ".wsd"]
export_format = "png"
output_dir = "out"

[[export.rules]]
pattern = "sequence/**/*.puml"
export_format = "pdf"

[renderer]
command = "/opt/plantuml/bin/plantuml"
args = ["-t{format}", "{file}"]
formats = ["png", "svg", "pdf"]
concurrency = 8
timeout_secs = 30

[ui]
messages_file = "messages.de.json"

[logging]
local_enabled = false
local_path = "/tmp/diagram-export"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");

    assert_eq!(config.workspace.folders.len(), 2);
    assert_eq!(config.workspace.folders[0].name, Some("documentation".to_string()));
    assert_eq!(config.workspace.folders[0].export_format, Some("svg".to_string()));
    assert_eq!(
        config.workspace.folders[1].file_extensions,
        Some(vec![".puml".to_string()])
    );

    assert_eq!(config.export.file_extensions, vec![".puml", ".wsd"]);
    assert_eq!(config.export.export_format, Some("png".to_string()));
    assert_eq!(config.export.output_dir, Some("out".to_string()));
    assert_eq!(config.export.rules.len(), 1);
    assert_eq!(config.export.rules[0].export_format, "pdf");

    assert_eq!(config.renderer.command, "/opt/plantuml/bin/plantuml");
    assert_eq!(config.renderer.args, vec!["-t{format}", "{file}"]);
    assert_eq!(config.renderer.formats, vec!["png", "svg", "pdf"]);
    assert_eq!(config.renderer.concurrency, 8);
    assert_eq!(config.renderer.timeout_secs, 30);

    assert_eq!(config.ui.messages_file, Some("messages.de.json".to_string()));
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(config.export.file_extensions, defaults.export.file_extensions);
    assert_eq!(config.export.export_format, None);
    assert_eq!(config.renderer.command, "plantuml");
    assert_eq!(config.renderer.concurrency, 4);
    assert!(config.workspace.folders.is_empty());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("TEST_DX_RENDERER", "/usr/local/bin/plantuml");
    let file = write_config(
        r#"
# command = "${NOT_SUBSTITUTED_IN_COMMENTS}"
[renderer]
command = "${TEST_DX_RENDERER}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.renderer.command, "/usr/local/bin/plantuml");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[renderer]
command = "${TEST_DX_RENDERER}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_DX_RENDERER"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("DIAGRAM_EXPORT_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("DIAGRAM_EXPORT_EXPORT_FORMAT", "svg");
    std::env::set_var("DIAGRAM_EXPORT_EXPORT_FILE_EXTENSIONS", ".puml, .iuml");
    std::env::set_var("DIAGRAM_EXPORT_RENDERER_COMMAND", "java -jar plantuml.jar");
    std::env::set_var("DIAGRAM_EXPORT_RENDERER_CONCURRENCY", "2");

    let file = write_config(
        r#"
[export]
export_format = "png"

[renderer]
concurrency = 8
"#,
    );

    let config = load_config(file.path()).unwrap();
    cleanup_env_vars();

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.export.export_format, Some("svg".to_string()));
    assert_eq!(config.export.file_extensions, vec![".puml", ".iuml"]);
    assert_eq!(config.renderer.command, "java -jar plantuml.jar");
    assert_eq!(config.renderer.concurrency, 2);
}

#[test]
fn test_invalid_override_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    std::env::set_var("DIAGRAM_EXPORT_RENDERER_CONCURRENCY", "0");
    let file = write_config("");
    let result = load_config(file.path());
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_invalid_values_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"loud\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[renderer]\nconcurrency = 100\n",
        "[renderer]\ncommand = \"\"\n",
        "not toml at all [",
    ] {
        let file = write_config(content);
        assert!(
            load_config(file.path()).is_err(),
            "expected failure for: {content}"
        );
    }
}

#[test]
fn test_explicit_missing_file_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    assert!(load_config_or_default(Some("/nonexistent/diagram-export.toml")).is_err());
}
