//! `folio render` end to end.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_render_to_stdout_with_set_values() -> Result<()> {
    let project = TestProject::new()?;
    project.template("index.html", "<h1>{{ title }}</h1>")?;

    project
        .folio()
        .args(["render", "index", "--set", "title=Hello"])
        .assert()
        .success()
        .stdout("<h1>Hello</h1>");
    Ok(())
}

#[test]
fn test_render_with_data_file_and_layout() -> Result<()> {
    let project = TestProject::new()?;
    project
        .template("post.hbs", "<article>{{title}}</article>")?
        .template("layout.hbs", "<body>{{{body}}}</body>")?
        .file("post.json", r#"{ "title": "First" }"#)?
        .config("layout = \"layout.hbs\"\n")?;

    project
        .folio()
        .args(["render", "post.hbs", "--data", "post.json"])
        .assert()
        .success()
        .stdout("<body><article>First</article></body>");

    project
        .folio()
        .args(["render", "post.hbs", "--data", "post.json", "--no-layout"])
        .assert()
        .success()
        .stdout("<article>First</article>");
    Ok(())
}

#[test]
fn test_render_to_output_file() -> Result<()> {
    let project = TestProject::new()?;
    project.template("index.html", "ok")?;

    project.folio().args(["render", "index", "--output", "out.html"]).assert().success();
    assert_eq!(project.read("out.html")?, "ok");
    Ok(())
}

#[test]
fn test_render_with_templates_flag() -> Result<()> {
    let project = TestProject::new()?;
    project.file("views/index.html", "from views")?;

    project
        .folio()
        .args(["--templates", "views", "render", "index"])
        .assert()
        .success()
        .stdout("from views");
    Ok(())
}

#[test]
fn test_render_missing_template_fails() -> Result<()> {
    let project = TestProject::new()?;

    project
        .folio()
        .args(["render", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Template 'missing.html' not found"));
    Ok(())
}

#[test]
fn test_render_unknown_engine_fails() -> Result<()> {
    let project = TestProject::new()?;
    project
        .template("notes.md", "# notes")?
        .config("[engines]\nhtml = \"tera\"\nhbs = \"handlebars\"\n")?;

    project
        .folio()
        .args(["render", "notes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No template engine is configured"));
    Ok(())
}

#[test]
fn test_render_invalid_data_file_fails() -> Result<()> {
    let project = TestProject::new()?;
    project.template("index.html", "x")?.file("bad.json", "{ nope")?;

    project
        .folio()
        .args(["render", "index", "--data", "bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.json"));
    Ok(())
}
