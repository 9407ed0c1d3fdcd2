use clap::Parser;
use serde_json::{Map, Value, json};
use tempfile::TempDir;

use super::check::discover_pages;
use super::render::apply_assignment;
use super::{Cli, Commands, EngineSettings};
use crate::view::RenderOptions;

#[test]
fn test_parse_render_command() {
    let cli = Cli::parse_from([
        "folio",
        "--production",
        "-t",
        "views",
        "render",
        "blog/post",
        "--data",
        "post.json",
        "--set",
        "title=Hi",
        "--no-layout",
    ]);

    assert!(cli.production);
    assert_eq!(cli.templates, vec![std::path::PathBuf::from("views")]);
    match cli.command {
        Commands::Render(cmd) => {
            assert_eq!(cmd.page, "blog/post");
            assert_eq!(cmd.set, vec!["title=Hi"]);
            assert_eq!(cmd.render_options(), RenderOptions::new().without_layout());
        }
        Commands::Check(_) => panic!("expected render"),
    }
}

#[test]
fn test_layout_flags_conflict() {
    assert!(Cli::try_parse_from(["folio", "render", "index", "--layout", "a", "--no-layout"]).is_err());
}

#[test]
fn test_verbose_and_quiet_conflict() {
    assert!(Cli::try_parse_from(["folio", "-v", "-q", "check"]).is_err());
}

#[test]
fn test_apply_assignment() {
    let mut map = Map::new();
    apply_assignment(&mut map, "title=Hello world").unwrap();
    apply_assignment(&mut map, "count=3").unwrap();
    apply_assignment(&mut map, "user.name=ada").unwrap();
    apply_assignment(&mut map, "user.admin=true").unwrap();
    apply_assignment(&mut map, "empty=").unwrap();

    assert_eq!(
        Value::Object(map),
        json!({
            "title": "Hello world",
            "count": 3,
            "user": { "name": "ada", "admin": true },
            "empty": ""
        })
    );
}

#[test]
fn test_apply_assignment_replaces_scalars_on_path() {
    let mut map = Map::new();
    apply_assignment(&mut map, "user=anon").unwrap();
    apply_assignment(&mut map, "user.name=ada").unwrap();
    assert_eq!(Value::Object(map), json!({ "user": { "name": "ada" } }));
}

#[test]
fn test_apply_assignment_rejects_malformed_input() {
    let mut map = Map::new();
    assert!(apply_assignment(&mut map, "no-equals").is_err());
    assert!(apply_assignment(&mut map, "a..b=1").is_err());
    assert!(apply_assignment(&mut map, "=1").is_err());
}

#[test]
fn test_discover_pages_filters_by_extension() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("blog")).unwrap();
    std::fs::write(dir.path().join("index.html"), "").unwrap();
    std::fs::write(dir.path().join("blog/post.hbs"), "").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "").unwrap();

    let mut pages = discover_pages(dir.path(), &["hbs".to_string(), "html".to_string()]);
    pages.sort();
    assert_eq!(pages, vec!["blog/post.hbs", "index.html"]);
}

#[test]
fn test_discover_pages_missing_root() {
    let dir = TempDir::new().unwrap();
    assert!(discover_pages(&dir.path().join("absent"), &["html".to_string()]).is_empty());
}

#[tokio::test]
async fn test_settings_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("folio.toml");
    tokio::fs::write(&path, "templates = [\"from-file\"]\nproduction = false\n").await.unwrap();

    let settings = EngineSettings {
        config_path: Some(path),
        templates: vec!["from-flag".into()],
        production: true,
    };
    let file = settings.load_config().await.unwrap();
    assert_eq!(file.view.templates, vec![std::path::PathBuf::from("from-flag")]);
    assert_eq!(file.view.production, Some(true));
}

#[tokio::test]
async fn test_explicit_missing_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let settings = EngineSettings {
        config_path: Some(dir.path().join("missing.toml")),
        ..EngineSettings::default()
    };
    assert!(settings.load_config().await.is_err());
}
