//! Operation input tree → CLI surface projections
//!
//! Four order-preserving projections of an operation's top-level field list:
//! flag specs, flattened required-field paths, indented documentation lines,
//! and illustrative usage examples. All ordering follows declaration order.

use std::fmt;

use serde_json::Value;

use crate::shape::{Field, TypeDescriptor};

/// A location inside a nested parameter tree.
///
/// Path syntax is constructed here and nowhere else: structure members render
/// as `parent.name`, list elements as `parent.name[]`, map values as
/// `parent.name{value}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq)]
enum PathSegment {
    Member(String),
    ListElement,
    MapValue,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn member(&self, name: &str) -> Self {
        self.push(PathSegment::Member(name.to_string()))
    }

    pub fn list_element(&self) -> Self {
        self.push(PathSegment::ListElement)
    }

    pub fn map_value(&self) -> Self {
        self.push(PathSegment::MapValue)
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Member(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::ListElement => f.write_str("[]")?,
                PathSegment::MapValue => f.write_str("{value}")?,
            }
        }
        Ok(())
    }
}

/// Post-parse validation contract of a flag value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParserKind {
    /// Taken verbatim.
    Plain,
    /// Must parse as an integer.
    Integer,
    /// Must name an existing file.
    BlobPath { streaming: bool },
    /// Inline JSON or an `@file.json` reference.
    Document,
}

/// One `--flag` of a generated subcommand.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    pub name: String,
    /// Flag with its value placeholder, e.g. `--icon <file-path>`
    pub flag: String,
    pub description: String,
    pub required: bool,
    pub parser: ParserKind,
}

impl FlagSpec {
    /// Render the commander `.option(...)` line, including the validating
    /// parser closure where the kind requires one.
    pub fn to_option_fragment(&self) -> String {
        let flag = &self.flag;
        let desc = &self.description;
        let name = &self.name;
        match self.parser {
            ParserKind::Plain => format!("  .option(\"{flag}\", \"{desc}\")\n"),
            ParserKind::Integer => format!(
                r#"  .option("{flag}", "{desc}", (value) => {{
    const parsed = parseInt(value, 10);
    if (isNaN(parsed)) {{
      throw new InvalidArgumentError("--{name} must be a valid integer");
    }}
    return parsed;
  }})
"#
            ),
            ParserKind::BlobPath { .. } => format!(
                r#"  .option("{flag}", "{desc}", (value) => {{
    if (!fs.existsSync(value)) {{
      throw new InvalidArgumentError("--{name} must be an existing file path");
    }}
    return value;
  }})
"#
            ),
            ParserKind::Document => format!(
                r#"  .option("{flag}", "{desc}", (value) => {{
    try {{
      return value.startsWith("@") ? readJsonFile(value.slice(1)) : JSON.parse(value);
    }} catch (err) {{
      throw new InvalidArgumentError("--{name} must be valid JSON or a @file.json path");
    }}
  }})
"#
            ),
        }
    }
}

/// One flag per top-level field, plus `--token` when the operation
/// requires authentication.
pub fn flag_specs(fields: &[Field], requires_token: bool) -> Vec<FlagSpec> {
    let mut specs: Vec<FlagSpec> = fields.iter().map(field_flag).collect();
    if requires_token {
        specs.push(FlagSpec {
            name: "token".into(),
            flag: "--token <token>".into(),
            description: "Bearer token for authentication".into(),
            required: true,
            parser: ParserKind::Plain,
        });
    }
    specs
}

fn field_flag(field: &Field) -> FlagSpec {
    let name = &field.name;
    let (placeholder, parser) = match &field.ty {
        TypeDescriptor::Blob { streaming } => (
            "<file-path>".to_string(),
            ParserKind::BlobPath {
                streaming: *streaming,
            },
        ),
        TypeDescriptor::List { .. } => (format!("<{name}...>"), ParserKind::Plain),
        TypeDescriptor::Document => (format!("<{name}>"), ParserKind::Document),
        TypeDescriptor::Primitive(kind) if is_integer_kind(kind) => {
            (format!("<{name}>"), ParserKind::Integer)
        }
        _ => (format!("<{name}>"), ParserKind::Plain),
    };
    let description = match &field.ty {
        TypeDescriptor::Blob { streaming: true } => {
            format!("{name} parameter (file path, supports streaming)")
        }
        TypeDescriptor::Blob { streaming: false } => format!("{name} parameter (file path)"),
        _ => format!("{name} parameter"),
    };
    FlagSpec {
        name: name.clone(),
        flag: format!("--{name} {placeholder}"),
        description,
        required: field.required,
        parser,
    }
}

fn is_integer_kind(kind: &str) -> bool {
    matches!(kind, "integer" | "long" | "short" | "byte")
}

/// Flattened paths of every transitively required field, depth-first in
/// declaration order. `"token"` is appended last when authentication is
/// required.
pub fn required_paths(fields: &[Field], requires_token: bool) -> Vec<String> {
    let mut out = Vec::new();
    for field in fields {
        collect_required(field, &FieldPath::root(), &mut out);
    }
    if requires_token {
        out.push("token".to_string());
    }
    out
}

fn collect_required(field: &Field, prefix: &FieldPath, out: &mut Vec<String>) {
    let path = prefix.member(&field.name);
    if field.required {
        out.push(path.to_string());
    }
    descend_required(&field.ty, &path, out);
}

fn descend_required(ty: &TypeDescriptor, path: &FieldPath, out: &mut Vec<String>) {
    match ty {
        TypeDescriptor::Structure { members } => {
            for member in members {
                collect_required(member, path, out);
            }
        }
        TypeDescriptor::List { member } => {
            descend_required(member, &path.list_element(), out);
        }
        TypeDescriptor::Map { value, .. } => {
            let value_path = path.map_value();
            if value.required {
                out.push(value_path.to_string());
            }
            descend_required(&value.ty, &value_path, out);
        }
        _ => {}
    }
}

/// One documentation line per field at every nesting level, indented by
/// four spaces per depth. Top-level fields carry the `--` prefix.
pub fn doc_lines(fields: &[Field], requires_token: bool) -> String {
    let mut buf = String::new();
    for field in fields {
        field_doc(&mut buf, field, 4, true);
    }
    if requires_token {
        buf.push_str("    --token <string> (required) : Bearer token for authentication\n");
    }
    buf
}

fn field_doc(buf: &mut String, field: &Field, indent: usize, top_level: bool) {
    let sp = " ".repeat(indent);
    let prefix = if top_level { "--" } else { "" };
    let req = if field.required {
        "(required)"
    } else {
        "(optional)"
    };
    let name = &field.name;

    match &field.ty {
        TypeDescriptor::Blob { streaming } => {
            let note = if *streaming { " (streaming)" } else { "" };
            doc_line(buf, format!("{sp}{prefix}{name} <file-path>{note} {req}"), &field.documentation);
        }
        TypeDescriptor::Structure { members } => {
            doc_line(buf, format!("{sp}{prefix}{name} {req}"), &field.documentation);
            for member in members {
                field_doc(buf, member, indent + 4, false);
            }
        }
        TypeDescriptor::List { member } if is_compound(member) => {
            doc_line(buf, format!("{sp}{prefix}{name} {req}"), &field.documentation);
            member_doc(buf, member, indent + 4);
        }
        TypeDescriptor::List { member } => {
            let kind = scalar_placeholder(member);
            doc_line(buf, format!("{sp}{prefix}{name} [<{kind}>] {req}"), &field.documentation);
        }
        TypeDescriptor::Map { key, value } => {
            doc_line(buf, format!("{sp}{prefix}{name} {req}"), &field.documentation);
            let inner = " ".repeat(indent + 4);
            doc_line(
                buf,
                format!("{inner}key <{}>", scalar_placeholder(&key.ty)),
                &key.documentation,
            );
            if is_compound(&value.ty) {
                let value_req = if value.required {
                    "(required)"
                } else {
                    "(optional)"
                };
                doc_line(buf, format!("{inner}value {value_req}"), &value.documentation);
                member_doc(buf, &value.ty, indent + 8);
            } else {
                doc_line(
                    buf,
                    format!("{inner}value <{}>", scalar_placeholder(&value.ty)),
                    &value.documentation,
                );
            }
        }
        TypeDescriptor::Primitive(kind) => {
            doc_line(buf, format!("{sp}{prefix}{name} <{kind}> {req}"), &field.documentation);
        }
        TypeDescriptor::Document => {
            doc_line(buf, format!("{sp}{prefix}{name} <document> {req}"), &field.documentation);
        }
    }
}

/// Document an anonymous member (a list element or map value) inline.
fn member_doc(buf: &mut String, ty: &TypeDescriptor, indent: usize) {
    let sp = " ".repeat(indent);
    match ty {
        TypeDescriptor::Structure { members } => {
            for member in members {
                field_doc(buf, member, indent, false);
            }
        }
        TypeDescriptor::Blob { streaming } => {
            let note = if *streaming { " (streaming)" } else { "" };
            doc_line(buf, format!("{sp}<file-path>{note}"), "");
        }
        TypeDescriptor::List { member } if is_compound(member) => {
            member_doc(buf, member, indent);
        }
        TypeDescriptor::List { member } => {
            doc_line(buf, format!("{sp}[<{}>]", scalar_placeholder(member)), "");
        }
        TypeDescriptor::Map { key, value } => {
            doc_line(buf, format!("{sp}key <{}>", scalar_placeholder(&key.ty)), &key.documentation);
            if is_compound(&value.ty) {
                doc_line(buf, format!("{sp}value"), &value.documentation);
                member_doc(buf, &value.ty, indent + 4);
            } else {
                doc_line(
                    buf,
                    format!("{sp}value <{}>", scalar_placeholder(&value.ty)),
                    &value.documentation,
                );
            }
        }
        TypeDescriptor::Primitive(kind) => {
            doc_line(buf, format!("{sp}<{kind}>"), "");
        }
        TypeDescriptor::Document => {
            doc_line(buf, format!("{sp}<document>"), "");
        }
    }
}

fn doc_line(buf: &mut String, lead: String, documentation: &str) {
    buf.push_str(&lead);
    if !documentation.is_empty() {
        buf.push_str(" : ");
        buf.push_str(documentation);
    }
    buf.push('\n');
}

fn is_compound(ty: &TypeDescriptor) -> bool {
    matches!(
        ty,
        TypeDescriptor::Structure { .. }
            | TypeDescriptor::List { .. }
            | TypeDescriptor::Map { .. }
            | TypeDescriptor::Blob { .. }
    )
}

fn scalar_placeholder(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Primitive(kind) => kind.clone(),
        TypeDescriptor::Document => "document".to_string(),
        TypeDescriptor::Blob { .. } => "file-path".to_string(),
        TypeDescriptor::List { .. } => "list".to_string(),
        TypeDescriptor::Map { .. } => "map".to_string(),
        TypeDescriptor::Structure { .. } => "object".to_string(),
    }
}

fn usage_placeholder(field: &Field) -> String {
    match &field.ty {
        TypeDescriptor::Blob { .. } => "<file-path>".to_string(),
        TypeDescriptor::List { .. } => format!("<{}...>", field.name),
        TypeDescriptor::Document => "<json|@file.json>".to_string(),
        _ => format!("<{}>", field.name),
    }
}

/// All-flags usage example: every required flag, the token when required,
/// and the first optional flag bracketed.
pub fn usage_example(
    op_name: &str,
    fields: &[Field],
    command_prefix: &str,
    requires_token: bool,
) -> String {
    let mut example = format!("$ {command_prefix} {op_name}");
    for field in fields.iter().filter(|f| f.required) {
        example.push_str(&format!(
            " \\\n     --{} {}",
            field.name,
            usage_placeholder(field)
        ));
    }
    if requires_token {
        example.push_str(" \\\n     --token <string>");
    }
    if let Some(field) = fields.iter().find(|f| !f.required) {
        example.push_str(&format!(
            " \\\n     [--{} {}]",
            field.name,
            usage_placeholder(field)
        ));
    }
    example
}

/// Mixed usage example: a JSON parameter file reference combined with the
/// first two flags.
pub fn mixed_usage_example(
    op_name: &str,
    fields: &[Field],
    command_prefix: &str,
    requires_token: bool,
) -> String {
    let mut example = format!("$ {command_prefix} {op_name} @params.json");
    for field in fields.iter().take(2) {
        let placeholder = match &field.ty {
            TypeDescriptor::Blob { .. } => "<file-path>",
            TypeDescriptor::Document => "<json|@file.json>",
            _ => "<value>",
        };
        example.push_str(&format!(" --{} {}", field.name, placeholder));
    }
    if requires_token {
        example.push_str(" --token <value>");
    }
    example
}

/// Example JSON parameter file with representative values per type.
pub fn json_file_example(fields: &[Field], requires_token: bool) -> String {
    let mut example = serde_json::Map::new();
    for field in fields {
        example.insert(field.name.clone(), sample_value(field));
    }
    if requires_token {
        example.insert(
            "token".to_string(),
            Value::String("your_bearer_token_here".to_string()),
        );
    }
    let rendered = serde_json::to_string_pretty(&Value::Object(example)).unwrap_or_default();
    format!("JSON file format (params.json):\n{rendered}")
}

fn sample_value(field: &Field) -> Value {
    match &field.ty {
        TypeDescriptor::Blob { .. } => Value::String("./path/to/file.bin".to_string()),
        TypeDescriptor::Document => serde_json::json!({
            "example_key": "example_value",
            "version": "1.0.0"
        }),
        TypeDescriptor::Primitive(kind) if is_integer_kind(kind) => {
            Value::Number(serde_json::Number::from(123))
        }
        TypeDescriptor::List { .. } => serde_json::json!(["item1", "item2"]),
        _ => Value::String(format!("example_{}", field.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: TypeDescriptor, required: bool) -> Field {
        Field {
            name: name.to_string(),
            ty,
            required,
            documentation: String::new(),
            is_payload: false,
        }
    }

    fn create_widget_input() -> Vec<Field> {
        vec![
            field("name", TypeDescriptor::Primitive("string".into()), true),
            field("count", TypeDescriptor::Primitive("integer".into()), false),
            field("icon", TypeDescriptor::Blob { streaming: false }, false),
        ]
    }

    // -- FieldPath --

    #[test]
    fn field_path_composes_member_list_and_map_segments() {
        let p = FieldPath::root().member("a").member("b");
        assert_eq!(p.to_string(), "a.b");
        assert_eq!(p.list_element().to_string(), "a.b[]");
        assert_eq!(p.map_value().to_string(), "a.b{value}");
        assert_eq!(p.list_element().member("c").to_string(), "a.b[].c");
        assert_eq!(p.map_value().member("c").to_string(), "a.b{value}.c");
    }

    // -- flag_specs --

    #[test]
    fn flag_specs_for_create_widget() {
        let specs = flag_specs(&create_widget_input(), false);
        let flags: Vec<&str> = specs.iter().map(|s| s.flag.as_str()).collect();
        assert_eq!(
            flags,
            ["--name <name>", "--count <count>", "--icon <file-path>"]
        );
        assert!(specs[0].required);
        assert!(!specs[1].required);
        assert_eq!(specs[1].parser, ParserKind::Integer);
        assert_eq!(
            specs[2].parser,
            ParserKind::BlobPath { streaming: false }
        );
    }

    #[test]
    fn flag_specs_appends_token_when_auth_required() {
        let specs = flag_specs(&create_widget_input(), true);
        let last = specs.last().unwrap();
        assert_eq!(last.flag, "--token <token>");
        assert!(last.required);
    }

    #[test]
    fn list_flag_uses_repeated_value_placeholder() {
        let fields = vec![field(
            "tags",
            TypeDescriptor::List {
                member: Box::new(TypeDescriptor::Primitive("string".into())),
            },
            false,
        )];
        let specs = flag_specs(&fields, false);
        assert_eq!(specs[0].flag, "--tags <tags...>");
    }

    #[test]
    fn integer_option_fragment_validates_and_names_the_flag() {
        let specs = flag_specs(&create_widget_input(), false);
        let fragment = specs[1].to_option_fragment();
        assert!(fragment.contains("parseInt(value, 10)"));
        assert!(fragment.contains("--count must be a valid integer"));
        assert!(fragment.contains("InvalidArgumentError"));
    }

    #[test]
    fn blob_option_fragment_checks_file_existence() {
        let specs = flag_specs(&create_widget_input(), false);
        let fragment = specs[2].to_option_fragment();
        assert!(fragment.contains("fs.existsSync(value)"));
        assert!(fragment.contains("--icon must be an existing file path"));
    }

    #[test]
    fn document_option_fragment_accepts_inline_json_or_file_reference() {
        let fields = vec![field("meta", TypeDescriptor::Document, false)];
        let fragment = flag_specs(&fields, false)[0].to_option_fragment();
        assert!(fragment.contains("readJsonFile(value.slice(1))"));
        assert!(fragment.contains("JSON.parse(value)"));
        assert!(fragment.contains("--meta must be valid JSON or a @file.json path"));
    }

    // -- required_paths --

    #[test]
    fn required_paths_for_create_widget() {
        assert_eq!(required_paths(&create_widget_input(), false), ["name"]);
        assert_eq!(
            required_paths(&create_widget_input(), true),
            ["name", "token"]
        );
    }

    #[test]
    fn required_paths_recurse_through_structures_lists_and_maps() {
        // a.b (required struct member), a.b[].c (required member of a list
        // element), a.d{value}.e (required member of a map value)
        let fields = vec![Field {
            name: "a".into(),
            ty: TypeDescriptor::Structure {
                members: vec![
                    Field {
                        name: "b".into(),
                        ty: TypeDescriptor::List {
                            member: Box::new(TypeDescriptor::Structure {
                                members: vec![field(
                                    "c",
                                    TypeDescriptor::Primitive("string".into()),
                                    true,
                                )],
                            }),
                        },
                        required: true,
                        documentation: String::new(),
                        is_payload: false,
                    },
                    Field {
                        name: "d".into(),
                        ty: TypeDescriptor::Map {
                            key: Box::new(field(
                                "key",
                                TypeDescriptor::Primitive("string".into()),
                                false,
                            )),
                            value: Box::new(field(
                                "value",
                                TypeDescriptor::Structure {
                                    members: vec![field(
                                        "e",
                                        TypeDescriptor::Primitive("string".into()),
                                        true,
                                    )],
                                },
                                false,
                            )),
                        },
                        required: false,
                        documentation: String::new(),
                        is_payload: false,
                    },
                ],
            },
            required: true,
            documentation: String::new(),
            is_payload: false,
        }];

        assert_eq!(
            required_paths(&fields, false),
            ["a", "a.b", "a.b[].c", "a.d{value}.e"]
        );
    }

    #[test]
    fn required_map_value_contributes_the_value_path() {
        let fields = vec![field(
            "labels",
            TypeDescriptor::Map {
                key: Box::new(field(
                    "key",
                    TypeDescriptor::Primitive("string".into()),
                    false,
                )),
                value: Box::new(field(
                    "value",
                    TypeDescriptor::Primitive("string".into()),
                    true,
                )),
            },
            false,
        )];
        assert_eq!(required_paths(&fields, false), ["labels{value}"]);
    }

    #[test]
    fn required_paths_list_each_field_exactly_once() {
        let paths = required_paths(&create_widget_input(), true);
        let mut deduped = paths.clone();
        deduped.dedup();
        assert_eq!(paths, deduped);
    }

    // -- doc_lines --

    #[test]
    fn doc_lines_indent_four_spaces_per_level() {
        let fields = vec![Field {
            name: "config".into(),
            ty: TypeDescriptor::Structure {
                members: vec![Field {
                    name: "size".into(),
                    ty: TypeDescriptor::Primitive("integer".into()),
                    required: true,
                    documentation: "Widget size".into(),
                    is_payload: false,
                }],
            },
            required: false,
            documentation: "Widget configuration".into(),
            is_payload: false,
        }];
        let docs = doc_lines(&fields, false);
        assert_eq!(
            docs,
            "    --config (optional) : Widget configuration\n\
             \x20       size <integer> (required) : Widget size\n"
        );
    }

    #[test]
    fn doc_lines_scalar_list_uses_bracketed_placeholder() {
        let fields = vec![field(
            "tags",
            TypeDescriptor::List {
                member: Box::new(TypeDescriptor::Primitive("string".into())),
            },
            true,
        )];
        let docs = doc_lines(&fields, false);
        assert_eq!(docs, "    --tags [<string>] (required)\n");
    }

    #[test]
    fn doc_lines_compound_list_member_is_documented_inline() {
        let fields = vec![field(
            "items",
            TypeDescriptor::List {
                member: Box::new(TypeDescriptor::Structure {
                    members: vec![field(
                        "id",
                        TypeDescriptor::Primitive("string".into()),
                        true,
                    )],
                }),
            },
            false,
        )];
        let docs = doc_lines(&fields, false);
        assert_eq!(
            docs,
            "    --items (optional)\n\
             \x20       id <string> (required)\n"
        );
    }

    #[test]
    fn doc_lines_map_documents_key_and_value() {
        let fields = vec![field(
            "labels",
            TypeDescriptor::Map {
                key: Box::new(Field {
                    name: "key".into(),
                    ty: TypeDescriptor::Primitive("string".into()),
                    required: false,
                    documentation: "Label name".into(),
                    is_payload: false,
                }),
                value: Box::new(field(
                    "value",
                    TypeDescriptor::Primitive("string".into()),
                    false,
                )),
            },
            false,
        )];
        let docs = doc_lines(&fields, false);
        assert_eq!(
            docs,
            "    --labels (optional)\n\
             \x20       key <string> : Label name\n\
             \x20       value <string>\n"
        );
    }

    #[test]
    fn doc_lines_append_token_line_when_auth_required() {
        let docs = doc_lines(&[], true);
        assert_eq!(
            docs,
            "    --token <string> (required) : Bearer token for authentication\n"
        );
    }

    // -- usage examples --

    #[test]
    fn usage_example_shows_required_flags_then_first_optional() {
        let example = usage_example("CreateWidget", &create_widget_input(), "widgets", false);
        assert_eq!(
            example,
            "$ widgets CreateWidget \\\n     --name <name> \\\n     [--count <count>]"
        );
    }

    #[test]
    fn usage_example_includes_token_before_optional_flag() {
        let example = usage_example("CreateWidget", &create_widget_input(), "widgets", true);
        assert!(example.contains("--token <string>"));
        let token_at = example.find("--token").unwrap();
        let optional_at = example.find("[--count").unwrap();
        assert!(token_at < optional_at);
    }

    #[test]
    fn mixed_usage_example_combines_params_file_and_first_two_flags() {
        let example =
            mixed_usage_example("CreateWidget", &create_widget_input(), "widgets", true);
        assert_eq!(
            example,
            "$ widgets CreateWidget @params.json --name <value> --count <value> --token <value>"
        );
    }

    #[test]
    fn json_file_example_uses_representative_values() {
        let rendered = json_file_example(&create_widget_input(), false);
        let json_part = rendered.splitn(2, '\n').nth(1).unwrap();
        let parsed: Value = serde_json::from_str(json_part).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({
                "name": "example_name",
                "count": 123,
                "icon": "./path/to/file.bin"
            })
        );
        // Declaration order is preserved in the rendered text.
        let name_at = rendered.find("\"name\"").unwrap();
        let count_at = rendered.find("\"count\"").unwrap();
        let icon_at = rendered.find("\"icon\"").unwrap();
        assert!(name_at < count_at && count_at < icon_at);
    }

    #[test]
    fn json_file_example_adds_token_and_samples_lists_and_documents() {
        let fields = vec![
            field(
                "tags",
                TypeDescriptor::List {
                    member: Box::new(TypeDescriptor::Primitive("string".into())),
                },
                false,
            ),
            field("meta", TypeDescriptor::Document, false),
        ];
        let rendered = json_file_example(&fields, true);
        let json_part = rendered.splitn(2, '\n').nth(1).unwrap();
        let parsed: Value = serde_json::from_str(json_part).unwrap();
        assert_eq!(parsed["tags"], serde_json::json!(["item1", "item2"]));
        assert_eq!(parsed["meta"]["example_key"], "example_value");
        assert_eq!(parsed["token"], "your_bearer_token_here");
    }
}
