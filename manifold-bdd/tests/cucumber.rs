use anyhow::Context;
use assert_cmd::Command;
use camino::Utf8PathBuf;
use cucumber::gherkin::Step;
use cucumber::{World, given, then, when};
use fs_err as fs;
use manifold_bdd::BINARY;
use std::process::Output;
use tempfile::TempDir;

#[derive(Debug, Default, World)]
pub struct ManifoldWorld {
    temp: Option<TempDir>,
    root: Option<Utf8PathBuf>,
    output: Option<Output>,
}

fn root(world: &ManifoldWorld) -> &Utf8PathBuf {
    world.root.as_ref().expect("root set")
}

fn output(world: &ManifoldWorld) -> &Output {
    world.output.as_ref().expect("a command has run")
}

fn stdout(world: &ManifoldWorld) -> String {
    String::from_utf8_lossy(&output(world).stdout).into_owned()
}

fn stderr(world: &ManifoldWorld) -> String {
    String::from_utf8_lossy(&output(world).stderr).into_owned()
}

fn read_json(path: &Utf8PathBuf) -> anyhow::Result<serde_json::Value> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).with_context(|| format!("parse {}", path))
}

fn run(world: &mut ManifoldWorld, args: &[&str]) {
    let root = root(world).clone();
    let mut cmd = Command::cargo_bin(BINARY).expect("manifold binary");
    cmd.env_remove("RUST_LOG")
        .current_dir(root.as_str())
        .arg("--root")
        .arg(root.as_str())
        .args(args);
    world.output = Some(cmd.output().expect("run manifold"));
}

fn write_file(world: &ManifoldWorld, name: &str, contents: &str) {
    fs::write(root(world).join(name), contents).unwrap();
}

// ============================================================================
// Fixtures
// ============================================================================

#[given("an empty working directory")]
async fn empty_working_directory(world: &mut ManifoldWorld) {
    let td = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();
    world.temp = Some(td);
    world.root = Some(root);
}

#[given(expr = "a manifest file {string} with content:")]
async fn manifest_with_content(world: &mut ManifoldWorld, step: &Step, name: String) {
    let contents = step.docstring.as_deref().expect("docstring");
    write_file(world, &name, contents.trim());
}

#[given(expr = "a W3C manifest file {string} with icons")]
async fn w3c_manifest_with_icons(world: &mut ManifoldWorld, name: String) {
    let manifest = serde_json::json!({
        "name": "Demo Application",
        "short_name": "Demo",
        "start_url": "/index.html",
        "display": "standalone",
        "icons": [
            {"src": "icon-44.png", "sizes": "44x44"},
            {"src": "icon-128.png", "sizes": "128x128"},
            {"src": "icon-150.png", "sizes": "150x150"}
        ]
    });
    write_file(world, &name, &manifest.to_string());
}

#[given(expr = "a Chrome OS manifest file {string}")]
async fn chromeos_manifest(world: &mut ManifoldWorld, name: String) {
    let manifest = serde_json::json!({
        "name": "Hosted App",
        "version": "1.0",
        "manifest_version": 2,
        "app": {
            "urls": ["https://hosted.example.com/"],
            "launch": {"web_url": "https://hosted.example.com/start"}
        },
        "icons": {"128": "icon_128.png"}
    });
    write_file(world, &name, &manifest.to_string());
}

// ============================================================================
// Commands
// ============================================================================

#[when(expr = "I run generate for {string} on platforms {string}")]
async fn generate_for_site(world: &mut ManifoldWorld, site: String, platforms: String) {
    run(world, &["generate", &site, "--platforms", &platforms]);
}

#[when(expr = "I run generate for {string} with manifest {string} on platforms {string}")]
async fn generate_for_site_with_manifest(
    world: &mut ManifoldWorld,
    site: String,
    manifest: String,
    platforms: String,
) {
    run(
        world,
        &["generate", &site, "--manifest", &manifest, "--platforms", &platforms],
    );
}

#[when(expr = "I run generate with manifest {string} on platforms {string}")]
async fn generate_with_manifest(world: &mut ManifoldWorld, manifest: String, platforms: String) {
    run(
        world,
        &["generate", "--manifest", &manifest, "--platforms", &platforms],
    );
}

#[when(expr = "I run detect on {string}")]
async fn detect(world: &mut ManifoldWorld, manifest: String) {
    run(world, &["detect", "--manifest", &manifest]);
}

#[when(expr = "I run convert on {string} to {string}")]
async fn convert(world: &mut ManifoldWorld, manifest: String, to: String) {
    run(world, &["convert", "--manifest", &manifest, "--to", &to]);
}

#[when(expr = "I run convert on {string} from {string} to {string}")]
async fn convert_from(world: &mut ManifoldWorld, manifest: String, from: String, to: String) {
    run(
        world,
        &["convert", "--manifest", &manifest, "--from", &from, "--to", &to],
    );
}

#[when(expr = "I run validate on {string} for platforms {string}")]
async fn validate(world: &mut ManifoldWorld, manifest: String, platforms: String) {
    run(
        world,
        &["validate", "--manifest", &manifest, "--platforms", &platforms],
    );
}

// ============================================================================
// Outcomes
// ============================================================================

#[then("the command succeeds")]
async fn command_succeeds(world: &mut ManifoldWorld) {
    let out = output(world);
    assert!(
        out.status.success(),
        "expected success, got {:?}\nstderr: {}",
        out.status.code(),
        stderr(world)
    );
}

#[then(expr = "the command exits with code {int}")]
async fn command_exits_with(world: &mut ManifoldWorld, code: i32) {
    assert_eq!(
        output(world).status.code(),
        Some(code),
        "stderr: {}",
        stderr(world)
    );
}

#[then(expr = "the output is {string}")]
async fn output_is(world: &mut ManifoldWorld, expected: String) {
    assert_eq!(stdout(world).trim(), expected);
}

#[then(expr = "the output contains {string}")]
async fn output_contains(world: &mut ManifoldWorld, expected: String) {
    let out = stdout(world);
    assert!(out.contains(&expected), "stdout was:\n{}", out);
}

#[then(expr = "the error output contains {string}")]
async fn error_output_contains(world: &mut ManifoldWorld, expected: String) {
    let err = stderr(world);
    assert!(err.contains(&expected), "stderr was:\n{}", err);
}

#[then(expr = "the output JSON has {string} equal to {string}")]
async fn output_json_member(world: &mut ManifoldWorld, member: String, expected: String) {
    let v: serde_json::Value = serde_json::from_str(&stdout(world)).expect("stdout is JSON");
    assert_eq!(v[member.as_str()].as_str(), Some(expected.as_str()));
}

#[then(expr = "the app {string} has a {string} manifest {string}")]
async fn app_has_manifest(world: &mut ManifoldWorld, app: String, platform: String, file: String) {
    let path = root(world).join(&app).join(&platform).join(&file);
    assert!(path.exists(), "missing {}", path);
}

#[then(expr = "the app {string} has no {string} directory")]
async fn app_has_no_platform_dir(world: &mut ManifoldWorld, app: String, platform: String) {
    let path = root(world).join(&app).join(&platform);
    assert!(!path.exists(), "unexpected {}", path);
}

#[then(expr = "the {string} manifest {string} of app {string} has {string} equal to {string}")]
async fn platform_manifest_member(
    world: &mut ManifoldWorld,
    platform: String,
    file: String,
    app: String,
    member: String,
    expected: String,
) {
    let path = root(world).join(&app).join(&platform).join(&file);
    let v = read_json(&path).unwrap();
    assert_eq!(v[member.as_str()].as_str(), Some(expected.as_str()));
}

#[then(expr = "the report for app {string} has status {string}")]
async fn report_status(world: &mut ManifoldWorld, app: String, status: String) {
    let path = root(world).join(&app).join("report.json");
    let report = read_json(&path).unwrap();
    assert_eq!(report["verdict"]["status"].as_str(), Some(status.as_str()));
}

#[then(expr = "the report for app {string} has the manifold schema")]
async fn report_schema(world: &mut ManifoldWorld, app: String) {
    let path = root(world).join(&app).join("report.json");
    let report = read_json(&path).unwrap();
    assert_eq!(
        report["schema"].as_str(),
        Some(manifold_types::schema::MANIFOLD_REPORT_V1)
    );
}

#[tokio::main]
async fn main() {
    let features_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    ManifoldWorld::cucumber().run(features_path).await;
}
