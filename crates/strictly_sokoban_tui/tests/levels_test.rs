//! Tests for loading level files and config from disk.

use std::fs;
use std::path::Path;
use strictly_sokoban::{RestartScope, Session};
use strictly_sokoban_tui::{Config, levels::level_paths, load_levels};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_levels_sorted_by_file_name() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "10_last.txt", "#@$.#");
    write(dir.path(), "01_first.txt", "#@$.#\n");
    write(dir.path(), "02_second.txt", "#@$ .#");

    let levels = load_levels(dir.path()).unwrap();
    let names: Vec<&str> = levels.iter().map(|l| l.name().as_str()).collect();
    assert_eq!(names, vec!["01_first", "02_second", "10_last"]);
    assert_eq!(levels[1].layout(), "#@$ .#");
}

#[test]
fn test_non_level_files_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", "#@$.#");
    write(dir.path(), "notes.md", "not a level");
    write(dir.path(), "b.txt.bak", "#@$.#");
    fs::create_dir(dir.path().join("nested.txt")).unwrap();

    let paths = level_paths(dir.path()).unwrap();
    assert_eq!(paths.len(), 1);
    assert!(paths[0].ends_with("a.txt"));
}

#[test]
fn test_empty_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "readme", "nothing here");
    let err = load_levels(dir.path()).unwrap_err();
    assert!(err.to_string().contains("No *.txt level files"));
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(load_levels(&dir.path().join("absent")).is_err());
}

#[test]
fn test_loaded_level_plays() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "crlf.txt", "#####\r\n#@$.#\r\n#####\r\n");
    let levels = load_levels(dir.path()).unwrap();
    let session = Session::new(levels[0].layout()).unwrap();
    assert_eq!(session.board().height(), 3);
    assert_eq!(session.board().width(), 5);
}

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("strictly_sokoban.toml");
    write(
        dir.path(),
        "strictly_sokoban.toml",
        "levels_dir = \"packs/easy\"\nrestart_scope = \"level\"\nshow_legend = false\n",
    );

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.levels_dir(), Path::new("packs/easy"));
    assert_eq!(*config.restart_scope(), RestartScope::Level);
    assert!(!*config.show_legend());
    assert!(*config.spaced_cells());
}

#[test]
fn test_config_errors_carry_location() {
    let dir = TempDir::new().unwrap();
    let err = Config::from_file(dir.path().join("missing.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
    assert!(err.file.ends_with("config.rs"));

    write(dir.path(), "bad.toml", "spaced_cells = \"yes\"");
    let err = Config::from_file(dir.path().join("bad.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_explicit_config_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Config::load(Some(missing.as_path())).is_err());
}
