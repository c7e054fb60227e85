//! Smithy model → internal type IR
//!
//! Resolves a shape reference from the model's `"shapes"` map into a
//! `TypeDescriptor` tree that the CLI generators can consume. Resolution is
//! a pure function of the model; a visited set guards against cyclic shape
//! references.

use std::fmt;

use serde_json::Value;

use crate::error::SchemaError;

const SMITHY_NS: &str = "smithy.api";

/// A `namespace#Name` reference into the shape graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeRef {
    pub namespace: String,
    pub name: String,
}

impl ShapeRef {
    /// Parse a qualified target string such as `"com.example#Widget"`.
    pub fn parse(target: &str) -> Result<Self, SchemaError> {
        let (namespace, name) =
            target
                .split_once('#')
                .ok_or_else(|| SchemaError::InvalidShapeRef {
                    target: target.to_string(),
                })?;
        if namespace.is_empty() || name.is_empty() {
            return Err(SchemaError::InvalidShapeRef {
                target: target.to_string(),
            });
        }
        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    /// Whether this reference points into the Smithy prelude namespace.
    pub fn is_prelude(&self) -> bool {
        self.namespace == SMITHY_NS
    }
}

impl fmt::Display for ShapeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)
    }
}

/// Canonical type of a resolved shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// A scalar, kind taken verbatim (lowercased) from the prelude name
    /// (e.g. "string", "integer", "boolean", "timestamp").
    Primitive(String),
    /// Binary payload. `streaming` means the generated program binds the
    /// value to a lazily-read byte stream instead of reading it eagerly.
    Blob { streaming: bool },
    List { member: Box<TypeDescriptor> },
    Map { key: Box<Field>, value: Box<Field> },
    /// Members are kept in declaration order; ordering drives flag and
    /// documentation emission downstream.
    Structure { members: Vec<Field> },
    /// Untyped JSON-valued field.
    Document,
}

/// A named member of a structure (or the key/value slot of a map).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
    pub required: bool,
    pub documentation: String,
    /// Bound to the HTTP body rather than a structured field
    /// (`smithy.api#httpPayload`).
    pub is_payload: bool,
}

impl Field {
    fn new(name: &str, ty: TypeDescriptor) -> Self {
        Self {
            name: name.to_string(),
            ty,
            required: false,
            documentation: String::new(),
            is_payload: false,
        }
    }
}

/// Resolve a shape reference to its canonical `TypeDescriptor`,
/// recursively expanding nested members.
pub fn resolve_type(target: &str, model: &Value) -> Result<TypeDescriptor, SchemaError> {
    let mut chain = Vec::new();
    resolve_inner(target, model, &mut chain)
}

fn resolve_inner(
    target: &str,
    model: &Value,
    chain: &mut Vec<String>,
) -> Result<TypeDescriptor, SchemaError> {
    let shape_ref = ShapeRef::parse(target)?;

    if shape_ref.is_prelude() {
        return Ok(resolve_prelude(&shape_ref.name));
    }

    if chain.iter().any(|seen| seen == target) {
        return Err(SchemaError::CyclicShape {
            shape: target.to_string(),
        });
    }

    let def = model
        .get("shapes")
        .and_then(|shapes| shapes.get(target))
        .ok_or_else(|| SchemaError::ShapeNotFound {
            shape: target.to_string(),
        })?;

    let kind = def.get("type").and_then(Value::as_str).unwrap_or("");

    chain.push(target.to_string());
    let resolved = match kind {
        "blob" => Ok(TypeDescriptor::Blob {
            streaming: has_trait(def, "smithy.api#streaming"),
        }),
        "list" => {
            let member_target = member_target(def, "member", target)?;
            let member = resolve_inner(member_target, model, chain)?;
            Ok(TypeDescriptor::List {
                member: Box::new(member),
            })
        }
        "map" => {
            let key = resolve_slot(def, "key", model, chain, target)?;
            let value = resolve_slot(def, "value", model, chain, target)?;
            Ok(TypeDescriptor::Map {
                key: Box::new(key),
                value: Box::new(value),
            })
        }
        "structure" => {
            let mut members = Vec::new();
            if let Some(defs) = def.get("members").and_then(Value::as_object) {
                for (member_name, member_def) in defs {
                    let member_target = member_def
                        .get("target")
                        .and_then(Value::as_str)
                        .ok_or_else(|| SchemaError::ShapeNotFound {
                            shape: format!("{target}${member_name}"),
                        })?;
                    let ty = resolve_inner(member_target, model, chain)?;
                    members.push(Field {
                        name: member_name.clone(),
                        ty,
                        required: has_trait(member_def, "smithy.api#required"),
                        documentation: doc_trait(member_def),
                        is_payload: has_trait(member_def, "smithy.api#httpPayload"),
                    });
                }
            }
            Ok(TypeDescriptor::Structure { members })
        }
        other => Err(SchemaError::UnsupportedType {
            kind: other.to_string(),
        }),
    };
    chain.pop();

    resolved
}

fn resolve_prelude(name: &str) -> TypeDescriptor {
    let kind = name.to_ascii_lowercase();
    match kind.as_str() {
        "blob" => TypeDescriptor::Blob { streaming: false },
        "document" => TypeDescriptor::Document,
        _ => TypeDescriptor::Primitive(kind),
    }
}

/// Resolve a map key/value slot into a `Field` carrying its own
/// documentation trait.
fn resolve_slot(
    def: &Value,
    slot: &str,
    model: &Value,
    chain: &mut Vec<String>,
    parent: &str,
) -> Result<Field, SchemaError> {
    let slot_def = def
        .get(slot)
        .ok_or_else(|| SchemaError::ShapeNotFound {
            shape: format!("{parent}${slot}"),
        })?;
    let target =
        slot_def
            .get("target")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaError::ShapeNotFound {
                shape: format!("{parent}${slot}"),
            })?;
    let ty = resolve_inner(target, model, chain)?;
    let mut field = Field::new(slot, ty);
    field.documentation = doc_trait(slot_def);
    field.required = has_trait(slot_def, "smithy.api#required");
    Ok(field)
}

fn member_target<'a>(def: &'a Value, slot: &str, parent: &str) -> Result<&'a str, SchemaError> {
    def.get(slot)
        .and_then(|member| member.get("target"))
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::ShapeNotFound {
            shape: format!("{parent}${slot}"),
        })
}

pub(crate) fn has_trait(def: &Value, name: &str) -> bool {
    def.get("traits")
        .map(|traits| traits.get(name).is_some())
        .unwrap_or(false)
}

pub(crate) fn doc_trait(def: &Value) -> String {
    def.get("traits")
        .and_then(|traits| traits.get("smithy.api#documentation"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
