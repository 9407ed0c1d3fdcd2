//! `folio check` end to end.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_check_passes_for_valid_tree() -> Result<()> {
    let project = TestProject::new()?;
    project
        .template("index.html", "<h1>{{ title }}</h1>")?
        .template("blog/post.html", "{% if draft %}draft{% endif %}")?
        .template("email.hbs", "Hi {{name}}")?
        .template("README.txt", "not a template")?;

    project
        .folio()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("blog/post.html"))
        .stdout(predicate::str::contains("All 3 templates compiled successfully"))
        .stdout(predicate::str::contains("README.txt").not());
    Ok(())
}

#[test]
fn test_check_reports_broken_template() -> Result<()> {
    let project = TestProject::new()?;
    project
        .template("index.html", "fine")?
        .template("broken.html", "{% if %}")?;

    project
        .folio()
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("broken.html"))
        .stderr(predicate::str::contains("1 of 2 template(s) failed to compile"));
    Ok(())
}

#[test]
fn test_check_specific_pages() -> Result<()> {
    let project = TestProject::new()?;
    project.template("index.html", "fine")?.template("broken.html", "{% if %}")?;

    project.folio().args(["--quiet", "check", "index"]).assert().success().stdout("");
    Ok(())
}

#[test]
fn test_check_with_missing_layout_fails() -> Result<()> {
    let project = TestProject::new()?;
    project.template("index.html", "fine")?.config("layout = \"missing\"\n")?;

    project
        .folio()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Layout 'missing.html' not found"));
    Ok(())
}

#[test]
fn test_check_empty_tree() -> Result<()> {
    let project = TestProject::new()?;

    project
        .folio()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No templates found"));
    Ok(())
}

#[test]
fn test_explicit_missing_config_fails() -> Result<()> {
    let project = TestProject::new()?;

    project
        .folio()
        .args(["--config", "absent.toml", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
    Ok(())
}
