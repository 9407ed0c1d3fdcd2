//! Rendering real template trees through the filesystem storage.

use anyhow::Result;
use folio::config::{ConfigFile, StaticEnv, ViewConfig};
use folio::core::{ErrorKind, ViewError};
use folio::engine::{EngineAdapter, EngineError};
use folio::reply::{BufferedReply, Reply};
use folio::test_utils::fixtures;
use folio::view::{RenderOptions, ViewEngine};
use serde_json::{Value, json};

use crate::common::TestProject;

#[tokio::test]
async fn test_tera_page_in_layout() -> Result<()> {
    let project = TestProject::new()?;
    project.template("index.html", fixtures::TERA_PAGE)?.template("layout.html", fixtures::TERA_LAYOUT)?;

    let engine = ViewEngine::builder(
        ViewConfig::new().with_templates(project.templates_dir()).with_layout("layout"),
    )
    .engine("html", EngineAdapter::tera())
    .env(StaticEnv::new())
    .build()?;

    let mut reply = BufferedReply::new();
    engine.view(&mut reply, "index", &json!({ "title": "Welcome", "name": "Ada" })).await?;

    assert_eq!(reply.content_type(), Some("text/html; charset=utf-8"));
    assert_eq!(
        reply.body(),
        Some("<html><title>Welcome</title><body><h1>Welcome</h1><p>Hello Ada</p></body></html>")
    );
    Ok(())
}

#[tokio::test]
async fn test_handlebars_nested_page() -> Result<()> {
    let project = TestProject::new()?;
    project
        .template("emails/welcome.hbs", "Hi {{user.name}}!")?
        .template("frame.hbs", fixtures::HANDLEBARS_LAYOUT)?;

    let engine = ViewEngine::builder(ViewConfig::new().with_templates(project.templates_dir()))
        .engine("hbs", EngineAdapter::handlebars())
        .env(StaticEnv::new())
        .build()?;

    let options = RenderOptions::new().with_layout("frame");
    let html = engine
        .render_with("./emails//welcome", &json!({ "user": { "name": "Ada" } }), &options)
        .await?;
    assert_eq!(html, "<main>Hi Ada!</main>");
    Ok(())
}

#[tokio::test]
async fn test_handlebars_strict_mode_missing_variable() -> Result<()> {
    let project = TestProject::new()?;
    project.template("page.hbs", fixtures::HANDLEBARS_PAGE)?;

    let engine = ViewEngine::builder(ViewConfig::new().with_templates(project.templates_dir()))
        .engine("hbs", EngineAdapter::handlebars())
        .env(StaticEnv::new())
        .build()?;

    let err = engine.render("page", &json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TemplateRenderError);
    Ok(())
}

#[tokio::test]
async fn test_custom_engine_by_extension() -> Result<()> {
    let project = TestProject::new()?;
    project.template("index.ejs", "<%= greeting %>")?;

    let ejs = EngineAdapter::custom("ejs", |source: &str, data: &Value| {
        let greeting = data
            .get("greeting")
            .and_then(Value::as_str)
            .ok_or_else(|| EngineError::render("greeting is not defined"))?;
        Ok(source.replace("<%= greeting %>", greeting))
    });

    let engine = ViewEngine::builder(ViewConfig::new().with_templates(project.templates_dir()))
        .engine("ejs", ejs)
        .env(StaticEnv::new())
        .build()?;

    let mut reply = BufferedReply::new().with_locals(
        json!({ "greeting": "hello" }).as_object().cloned().unwrap_or_default(),
    );
    engine.view(&mut reply, "index", &Value::Null).await?;
    assert_eq!(reply.body(), Some("hello"));
    Ok(())
}

#[tokio::test]
async fn test_roots_are_searched_in_order() -> Result<()> {
    let project = TestProject::new()?;
    project
        .file("site/index.html", "site")?
        .file("theme/index.html", "theme")?
        .file("theme/about.html", "theme about")?;

    let config = ViewConfig::new()
        .with_templates(project.path().join("site"))
        .with_template_root(project.path().join("theme"));
    let engine = ViewEngine::builder(config)
        .engine("html", EngineAdapter::interpolate())
        .env(StaticEnv::new())
        .build()?;

    assert_eq!(engine.render("index", &Value::Null).await?, "site");
    assert_eq!(engine.render("about", &Value::Null).await?, "theme about");
    Ok(())
}

#[tokio::test]
async fn test_production_serves_cached_until_invalidated() -> Result<()> {
    let project = TestProject::new()?;
    project.template("index.html", "v1")?;

    let engine = ViewEngine::builder(ViewConfig::new().with_templates(project.templates_dir()))
        .engine("html", EngineAdapter::interpolate())
        .env(StaticEnv::production())
        .build()?;
    assert!(engine.is_production());

    assert_eq!(engine.render("index", &Value::Null).await?, "v1");
    project.template("index.html", "v2")?;
    assert_eq!(engine.render("index", &Value::Null).await?, "v1");

    engine.invalidate("index")?;
    assert_eq!(engine.render("index", &Value::Null).await?, "v2");
    Ok(())
}

#[tokio::test]
async fn test_missing_template_reports_searched_paths() -> Result<()> {
    let project = TestProject::new()?;
    let engine = ViewEngine::builder(ViewConfig::new().with_templates(project.templates_dir()))
        .engine("html", EngineAdapter::tera())
        .env(StaticEnv::new())
        .build()?;

    match engine.render("nowhere", &Value::Null).await {
        Err(ViewError::TemplateNotFound {
            searched,
            ..
        }) => {
            assert_eq!(searched, vec![project.templates_dir().join("nowhere.html")]);
        }
        other => panic!("expected TemplateNotFound, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_engine_from_config_file() -> Result<()> {
    let project = TestProject::new()?;
    project.template("index.txt", "Hi {{ name }}")?;
    project.config(&format!(
        r#"
        templates = ["{}"]

        [engines]
        txt = "interpolate"

        [default_context]
        name = "world"
        "#,
        project.templates_dir().display().to_string().replace('\\', "/")
    ))?;

    let file = ConfigFile::load_from(&project.path().join("folio.toml")).await?;
    let engine = ViewEngine::builder(file.view.clone())
        .engines(file.build_registry()?)
        .env(StaticEnv::new())
        .build()?;

    assert_eq!(engine.render("index", &Value::Null).await?, "Hi world");
    assert_eq!(engine.render("index", &json!({ "name": "Ada" })).await?, "Hi Ada");
    Ok(())
}
