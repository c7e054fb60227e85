//! Fragment composition → generated program text
//!
//! Composes the header, one command/action block per operation (in declared
//! order), and the footer into the generated CLI program, plus the package
//! metadata and entry-point fragments. Everything here is substitution and
//! concatenation; all values arrive precomputed from the other modules.

use serde_json::Value;

use crate::error::SchemaError;
use crate::handling::field_handling;
use crate::operation::{extract_service, OperationDescriptor, ServiceDescriptor};
use crate::params::{
    doc_lines, flag_specs, json_file_example, mixed_usage_example, required_paths, usage_example,
};

/// Configuration for the generated CLI package.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GenConfig {
    /// Generated CLI name (binary and package name)
    pub cli_name: String,
    /// Generated CLI description
    pub cli_description: String,
    /// Generated CLI version
    pub cli_version: String,
    /// npm package of the pre-existing generated client
    pub client_package: String,
    /// Version (or path specifier) of the client package
    pub client_version: String,
}

impl GenConfig {
    pub fn new(
        cli_name: impl Into<String>,
        cli_description: impl Into<String>,
        client_package: impl Into<String>,
    ) -> Self {
        Self {
            cli_name: cli_name.into(),
            cli_description: cli_description.into(),
            cli_version: "0.1.0".to_string(),
            client_package: client_package.into(),
            client_version: "latest".to_string(),
        }
    }

    pub fn cli_version(mut self, version: impl Into<String>) -> Self {
        self.cli_version = version.into();
        self
    }

    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = version.into();
        self
    }
}

/// The three output artifacts of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedArtifacts {
    /// package.json text naming the CLI and its client dependency
    pub package_json: String,
    /// bin.js text
    pub entrypoint: String,
    /// index.js text: header, per-operation blocks, footer
    pub program: String,
}

/// Compile a Smithy model into the generated CLI artifacts.
///
/// Fails before any artifact text is assembled; there is no partial output.
pub fn generate(
    model: &Value,
    service_id: &str,
    config: &GenConfig,
) -> Result<GeneratedArtifacts, SchemaError> {
    let service = extract_service(model, service_id)?;

    let mut program = render_header(config, &service);
    for op in &service.operations {
        let requires_token = service.auth.requires_token(op);
        program.push_str(&render_operation_block(op, requires_token, config));
    }
    program.push_str("program.parse(process.argv);\n");

    Ok(GeneratedArtifacts {
        package_json: render_package_json(config),
        entrypoint: "#!/usr/bin/env node\nimport \"./index.js\";\n".to_string(),
        program,
    })
}

fn render_package_json(config: &GenConfig) -> String {
    let mut bin = serde_json::Map::new();
    bin.insert(
        config.cli_name.clone(),
        Value::String("bin.js".to_string()),
    );

    let mut dependencies = serde_json::Map::new();
    dependencies.insert(
        "commander".to_string(),
        Value::String("^12.0.0".to_string()),
    );
    dependencies.insert(
        config.client_package.clone(),
        Value::String(config.client_version.clone()),
    );

    let mut manifest = serde_json::Map::new();
    manifest.insert("name".to_string(), Value::String(config.cli_name.clone()));
    manifest.insert(
        "version".to_string(),
        Value::String(config.cli_version.clone()),
    );
    manifest.insert(
        "description".to_string(),
        Value::String(config.cli_description.clone()),
    );
    manifest.insert("type".to_string(), Value::String("module".to_string()));
    manifest.insert("bin".to_string(), Value::Object(bin));
    manifest.insert("dependencies".to_string(), Value::Object(dependencies));

    let mut rendered =
        serde_json::to_string_pretty(&Value::Object(manifest)).unwrap_or_default();
    rendered.push('\n');
    rendered
}

/// Escape text spliced into a generated double-quoted JS string.
fn escape_js_string(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Escape text spliced into a generated JS template literal. Newlines are
/// legal there; backslashes, backticks, and substitutions are not.
fn escape_js_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

// Runtime helpers shared by every generated action.
const PROGRAM_HELPERS: &str = r#"
const readJsonFile = (file) => JSON.parse(fs.readFileSync(file, "utf8"));

async function getClient(token, requiresAuth) {
  if (requiresAuth && !token) {
    console.error('Missing --token (or "token" in the params file)');
    process.exit(1);
  }
  return new ServiceClient(token ? { token } : {});
}

function mergeParams(paramsFile, options) {
  if (!paramsFile) {
    return { ...options };
  }
  const file = paramsFile.startsWith("@") ? paramsFile.slice(1) : paramsFile;
  return { ...readJsonFile(file), ...options };
}

function ensureRequired(finalOptions, requiredParams, opName) {
  const present = (value, segments) => {
    if (value === undefined || value === null) return false;
    if (segments.length === 0) return true;
    const [head, ...rest] = segments;
    if (head === "[]") {
      return Array.isArray(value) && value.every((item) => present(item, rest));
    }
    if (head === "{value}") {
      return typeof value === "object" && Object.values(value).every((v) => present(v, rest));
    }
    return present(value[head], rest);
  };
  for (const param of requiredParams) {
    const segments = param.split(/\.|(\[\])|(\{value\})/).filter(Boolean);
    if (!present(finalOptions, segments)) {
      console.error(`${opName}: missing required parameter ${param}`);
      process.exit(1);
    }
  }
}

function printResponse(response) {
  console.log(JSON.stringify(response, null, 2));
}
"#;

fn render_header(config: &GenConfig, service: &ServiceDescriptor) -> String {
    let mut imports: Vec<String> = vec![format!("{}Client", service.name)];
    imports.extend(
        service
            .operations
            .iter()
            .map(|op| format!("{}Command", op.name)),
    );

    let mut header = format!(
        "#!/usr/bin/env node\n\
         import fs from \"fs\";\n\
         import path from \"path\";\n\
         import {{ Command, InvalidArgumentError }} from \"commander\";\n\
         import {{ {} }} from \"{}\";\n",
        imports.join(", "),
        config.client_package
    );
    header.push_str(&PROGRAM_HELPERS.replace("ServiceClient", &format!("{}Client", service.name)));
    header.push_str(&format!(
        "\nconst program = new Command();\n\n\
         program\n  .name(\"{}\")\n  .description(\"{}\")\n  .version(\"{}\");\n",
        config.cli_name,
        escape_js_string(&config.cli_description),
        config.cli_version
    ));
    header
}

fn render_operation_block(
    op: &OperationDescriptor,
    requires_token: bool,
    config: &GenConfig,
) -> String {
    let name = &op.name;
    let required = required_paths(&op.input, requires_token);
    let required_json = serde_json::to_string(&required).unwrap_or_default();
    let handling = field_handling(&op.input);
    let auth_flag = if requires_token { "true" } else { "false" };

    let options: String = flag_specs(&op.input, requires_token)
        .iter()
        .map(|spec| spec.to_option_fragment())
        .collect();

    let docs = doc_lines(&op.input, requires_token);
    let usage = usage_example(name, &op.input, &config.cli_name, requires_token);
    let mixed = mixed_usage_example(name, &op.input, &config.cli_name, requires_token);
    let json_example = json_file_example(&op.input, requires_token);
    let help = escape_js_template(&format!(
        "\nParameters:\n{docs}\nExamples:\n{usage}\n\n{mixed}\n\n{json_example}\n"
    ));

    format!(
        "\nasync function {name}Action(paramsFile, options) {{\n\
         \x20 const finalOptions = mergeParams(paramsFile, options);\n\
         \x20 const requiredParams = {required_json};\n\
         \x20 ensureRequired(finalOptions, requiredParams, \"{name}\");\n\
         {handling}\
         \x20 const client = await getClient(finalOptions.token, {auth_flag});\n\
         \x20 const input = {{ ...finalOptions }};\n\
         \x20 delete input.token;\n\
         \x20 const command = new {name}Command(input);\n\
         \x20 const response = await client.send(command);\n\
         \x20 printResponse(response);\n\
         }}\n\n\
         program\n\
         \x20 .command(\"{name}\")\n\
         \x20 .description(\"{description}\")\n\
         \x20 .argument(\"[paramsFile]\", \"JSON file with parameters (@params.json)\")\n\
         {options}\
         \x20 .addHelpText(\n\
         \x20   \"after\",\n\
         \x20   `{help}`\n\
         \x20 )\n\
         \x20 .action({name}Action);\n",
        description = escape_js_string(&op.documentation),
    )
}
