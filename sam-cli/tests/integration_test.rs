// Enable Clippy lints that are disabled by default.
// https://rust-lang.github.io/rust-clippy/stable/index.html
#![warn(clippy::pedantic)]

use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::{tempdir, TempDir};

#[test]
fn publish_without_template() {
    let app_dir = tempdir().unwrap();

    let output = sam_publish(&app_dir)
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "Publish Failed\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains(&format!(
        "Error: Template file not found at {}",
        Path::new(".").join("template.yaml").display()
    )));
}

#[test]
fn publish_app_template_without_application_metadata() {
    let app_dir = copy_fixture_to_temp_dir("no_metadata.yaml");

    let output = Command::new(SAM_BINARY_UNDER_TEST)
        .args(["publish", "app", "--region", INTEGRATION_TEST_REGION])
        .current_dir(app_dir.path())
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "Publish Failed\n");
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Application metadata not found in the SAM template"));
}

#[test]
fn publish_template_without_application_metadata() {
    let app_dir = copy_fixture_to_temp_dir("no_metadata.yaml");

    let output = sam_publish(&app_dir)
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "Publish Failed\n");
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Application metadata not found in the SAM template"));
}

#[test]
fn publish_template_with_incomplete_application_metadata() {
    let app_dir = copy_fixture_to_temp_dir("missing_author.yaml");

    let output = sam_publish(&app_dir)
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "Publish Failed\n");
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Invalid application metadata: 'Author' properties not provided"));
}

#[test]
fn semantic_version_override_keeps_template_without_application_metadata() {
    let app_dir = copy_fixture_to_temp_dir("no_metadata.yaml");
    let template_path = app_dir.path().join(TEMPLATE_FILE_NAME);
    let original_template = fs::read_to_string(&template_path).unwrap();

    let output = sam_publish(&app_dir)
        .args(["--semantic-version", "1.0.0"])
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "Publish Failed\n");
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Application metadata not found in the SAM template"));
    assert_eq!(fs::read_to_string(&template_path).unwrap(), original_template);
}

#[test]
fn publish_reads_template_from_config_file() {
    let app_dir = tempdir().unwrap();
    fs::write(
        app_dir.path().join("samconfig.toml"),
        indoc! {r#"
            version = 0.1

            [default.publish.parameters]
            template = "packaged.yaml"
        "#},
    )
    .unwrap();

    let output = sam_publish(&app_dir)
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Template file not found at packaged.yaml"));
}

#[test]
fn template_flag_overrides_config_file() {
    let app_dir = tempdir().unwrap();
    fs::write(
        app_dir.path().join("samconfig.toml"),
        indoc! {r#"
            [prod.publish.parameters]
            template = "packaged.yaml"
        "#},
    )
    .unwrap();

    let output = sam_publish(&app_dir)
        .args(["--config-env", "prod", "--template", "other.yaml"])
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Template file not found at other.yaml"));
}

#[test]
fn publish_with_missing_config_file() {
    let app_dir = tempdir().unwrap();

    let output = sam_publish(&app_dir)
        .args(["--config-file", "missing.toml"])
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "Publish Failed\n");
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Failed to read config file missing.toml"));
}

#[test]
fn publish_with_invalid_config_parameters() {
    let app_dir = copy_fixture_to_temp_dir("template.yaml");
    fs::write(
        app_dir.path().join("samconfig.toml"),
        indoc! {"
            [default.publish.parameters]
            region = 5
        "},
    )
    .unwrap();

    let output = sam_publish(&app_dir)
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "Publish Failed\n");
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Invalid parameters in [default.publish.parameters] of config file"));
}

#[test]
fn empty_semantic_version_keeps_template() {
    let app_dir = copy_fixture_to_temp_dir("missing_author.yaml");
    let template_path = app_dir.path().join(TEMPLATE_FILE_NAME);
    let original_template = fs::read_to_string(&template_path).unwrap();

    sam_publish(&app_dir)
        .args(["--semantic-version", ""])
        .assert()
        .code(USER_ERROR);

    assert_eq!(fs::read_to_string(&template_path).unwrap(), original_template);
}

#[test]
fn publish_help() {
    let output = Command::new(SAM_BINARY_UNDER_TEST)
        .args(["publish", "--help"])
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--template",
        "--semantic-version",
        "--region",
        "--profile",
        "--config-file",
        "--config-env",
        "--debug",
    ] {
        assert!(stdout.contains(flag), "{flag} missing from help: {stdout}");
    }
}

#[test]
#[ignore = "integration test"]
fn publish_new_application_and_version() {
    let app_dir = copy_fixture_to_temp_dir("template.yaml");
    let application_name = unique_application_name();
    rename_application(&app_dir.path().join(TEMPLATE_FILE_NAME), &application_name);

    let output = sam_publish_with_credentials(&app_dir)
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(indoc! {"
        Publish Succeeded
        Created new application with the following metadata:
        {
    "}));
    assert!(stdout.contains(&format!("\"Name\": \"{application_name}\"")));
    assert!(stdout.contains(&format!(
        "https://console.aws.amazon.com/serverlessrepo/home?region={INTEGRATION_TEST_REGION}#/published-applications/arn:aws:serverlessrepo:{INTEGRATION_TEST_REGION}:"
    )));
    assert!(stdout.contains(&format!(":applications~{application_name}")));

    let output = sam_publish_with_credentials(&app_dir)
        .args(["--semantic-version", "0.0.2"])
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("has been updated:\n{"));
    assert!(stdout.contains("\"SemanticVersion\": \"0.0.2\""));
    assert!(!stdout.contains("\"Name\""));
    assert!(fs::read_to_string(app_dir.path().join(TEMPLATE_FILE_NAME))
        .unwrap()
        .contains("SemanticVersion: 0.0.2"));
}

#[test]
#[ignore = "integration test"]
fn publish_existing_version_updates_metadata_only() {
    let app_dir = copy_fixture_to_temp_dir("template.yaml");
    rename_application(
        &app_dir.path().join(TEMPLATE_FILE_NAME),
        &unique_application_name(),
    );

    sam_publish_with_credentials(&app_dir).assert().success();

    let output = sam_publish_with_credentials(&app_dir)
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("has been updated:\n{"));
    assert!(!stdout.contains("\"SemanticVersion\""));
}

#[test]
#[ignore = "integration test"]
fn publish_invalid_semantic_version() {
    let app_dir = copy_fixture_to_temp_dir("template.yaml");
    rename_application(
        &app_dir.path().join(TEMPLATE_FILE_NAME),
        &unique_application_name(),
    );

    let output = sam_publish_with_credentials(&app_dir)
        .args(["--semantic-version", "1.0"])
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "Publish Failed\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("https://semver.org/"));
}

#[test]
#[ignore = "integration test"]
fn publish_template_with_local_artifacts() {
    let app_dir = copy_fixture_to_temp_dir("local_artifacts.yaml");

    let output = sam_publish_with_credentials(&app_dir)
        .assert()
        .code(USER_ERROR)
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "Publish Failed\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("packaging the template"));
}

// Runs `sam publish` in the given directory, isolated from the AWS configuration of the host.
fn sam_publish(app_dir: &TempDir) -> Command {
    let mut command = sam_publish_with_credentials(app_dir);
    command
        .env("AWS_CONFIG_FILE", app_dir.path().join("aws-config"))
        .env(
            "AWS_SHARED_CREDENTIALS_FILE",
            app_dir.path().join("aws-credentials"),
        )
        .env("AWS_ACCESS_KEY_ID", "testing")
        .env("AWS_SECRET_ACCESS_KEY", "testing")
        .env_remove("AWS_PROFILE")
        .env_remove("AWS_SESSION_TOKEN");
    command
}

fn sam_publish_with_credentials(app_dir: &TempDir) -> Command {
    let mut command = Command::new(SAM_BINARY_UNDER_TEST);
    command
        .args(["publish", "--region", INTEGRATION_TEST_REGION])
        .current_dir(app_dir.path())
        .env("AWS_EC2_METADATA_DISABLED", "true");
    command
}

fn copy_fixture_to_temp_dir(fixture_name: &str) -> TempDir {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("publish")
        .join(fixture_name);

    let temp_dir = tempdir().unwrap();
    fs::copy(fixture_path, temp_dir.path().join(TEMPLATE_FILE_NAME)).unwrap();
    temp_dir
}

fn rename_application(template_path: &Path, application_name: &str) {
    let template = fs::read_to_string(template_path).unwrap().replace(
        "Name: sam-publish-integration-test",
        &format!("Name: {application_name}"),
    );
    fs::write(template_path, template).unwrap();
}

fn unique_application_name() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis();

    format!("sam-publish-integration-test-{timestamp}")
}

const SAM_BINARY_UNDER_TEST: &str = env!("CARGO_BIN_EXE_sam");
const INTEGRATION_TEST_REGION: &str = "us-east-1";
const TEMPLATE_FILE_NAME: &str = "template.yaml";
const USER_ERROR: i32 = 1;
