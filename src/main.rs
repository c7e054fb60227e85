use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Arg, Command};
use serde_json::Value;
use tracing::info;

use smithy_cli_gen::{generate, GenConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("smithy-cli-gen")
        .about("Generate a CLI on top of a generated Smithy client")
        .arg(required_arg("namespace", "Service namespace"))
        .arg(required_arg("service", "Service name"))
        .arg(required_arg("model", "Path to the Smithy model JSON"))
        .arg(required_arg(
            "build-config",
            "Path to smithy-build.json (supplies the client package)",
        ))
        .arg(required_arg(
            "plugin",
            "Plugin key in smithy-build.json to read the client package from",
        ))
        .arg(required_arg("cli-name", "Name of the generated CLI"))
        .arg(required_arg(
            "cli-description",
            "Description of the generated CLI",
        ))
        .arg(
            Arg::new("client")
                .long("client")
                .value_name("CLIENT")
                .help("Override the client dependency specifier (e.g. file:../widget-client)"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .value_name("DIR")
                .default_value(".")
                .help("Directory to write the generated CLI under"),
        )
}

fn required_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name(name.to_uppercase())
        .required(true)
        .help(help)
}

fn arg<'a>(matches: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| anyhow!("--{name} is required"))
}

fn run() -> Result<()> {
    let matches = cli().get_matches();

    let namespace = arg(&matches, "namespace")?;
    let service = arg(&matches, "service")?;
    let service_id = format!("{namespace}#{service}");

    let model_path = arg(&matches, "model")?;
    let model: Value = serde_json::from_str(
        &fs::read_to_string(model_path)
            .with_context(|| format!("failed to read model {model_path}"))?,
    )
    .with_context(|| format!("model {model_path} is not valid JSON"))?;

    let build_path = arg(&matches, "build-config")?;
    let plugin = arg(&matches, "plugin")?;
    let (client_package, client_version) = client_from_build_config(build_path, plugin)?;
    let client_version = match matches.get_one::<String>("client") {
        Some(location) => location.clone(),
        None => client_version,
    };

    let cli_name = arg(&matches, "cli-name")?;
    let cli_description = arg(&matches, "cli-description")?;

    let config = GenConfig::new(slugify(cli_name), cli_description, client_package)
        .client_version(client_version);

    info!(service = %service_id, model = %model_path, "generating CLI");
    let artifacts = generate(&model, &service_id, &config)?;

    let out_root = arg(&matches, "out")?;
    let out_dir = PathBuf::from(out_root).join(&config.cli_name);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    write_artifact(&out_dir, "package.json", &artifacts.package_json)?;
    write_artifact(&out_dir, "bin.js", &artifacts.entrypoint)?;
    write_artifact(&out_dir, "index.js", &artifacts.program)?;

    info!(dir = %out_dir.display(), "generated CLI");
    Ok(())
}

/// Read the client package name/version from the named plugin entry of
/// smithy-build.json.
fn client_from_build_config(path: &str, plugin: &str) -> Result<(String, String)> {
    let build: Value = serde_json::from_str(
        &fs::read_to_string(path)
            .with_context(|| format!("failed to read build config {path}"))?,
    )
    .with_context(|| format!("build config {path} is not valid JSON"))?;

    let entry = build
        .get("plugins")
        .and_then(|plugins| plugins.get(plugin))
        .ok_or_else(|| anyhow!("plugin {plugin} not found in {path}"))?;

    let package = entry
        .get("package")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("plugin {plugin} in {path} has no package"))?;
    let version = entry
        .get("packageVersion")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("plugin {plugin} in {path} has no packageVersion"))?;

    Ok((package.to_string(), version.to_string()))
}

fn write_artifact(dir: &Path, name: &str, text: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    info!(file = %path.display(), "wrote artifact");
    Ok(())
}

fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
