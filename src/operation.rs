//! Service shape → operation descriptors
//!
//! Walks the service's operation list in declared order, pulling route and
//! documentation traits and resolving input/output shapes into field lists.

use serde_json::Value;

use crate::error::SchemaError;
use crate::shape::{doc_trait, has_trait, resolve_type, Field, ShapeRef, TypeDescriptor};

/// A resolved service operation ready for CLI generation.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct OperationDescriptor {
    /// Operation name (e.g. "CreateWidget")
    pub name: String,
    /// Mandatory `smithy.api#http` route
    pub http: HttpRoute,
    /// Documentation trait text, empty when absent
    pub documentation: String,
    /// Top-level input structure members (empty when the operation
    /// declares no input)
    pub input: Vec<Field>,
    /// Top-level output structure members
    pub output: Vec<Field>,
    /// Declares an empty `smithy.api#auth` list, opting out of the
    /// service-wide auth requirement (token-issuing operations)
    pub auth_exempt: bool,
}

/// The `smithy.api#http` binding of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRoute {
    pub method: String,
    pub uri: String,
}

/// Service-level authentication requirement, applied per operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthPolicy {
    /// No authentication anywhere.
    None,
    /// `smithy.api#httpBearerAuth`: every operation takes `--token`
    /// unless it is auth-exempt.
    BearerToken,
}

impl AuthPolicy {
    pub fn requires_token(&self, op: &OperationDescriptor) -> bool {
        matches!(self, Self::BearerToken) && !op.auth_exempt
    }
}

/// A resolved service: auth policy plus operations in declared order.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    pub name: String,
    pub auth: AuthPolicy,
    pub operations: Vec<OperationDescriptor>,
}

/// Extract the service shape named by `service_id` (`namespace#Name`)
/// and resolve all of its operations.
pub fn extract_service(model: &Value, service_id: &str) -> Result<ServiceDescriptor, SchemaError> {
    let service_ref = ShapeRef::parse(service_id)?;
    let service = model
        .get("shapes")
        .and_then(|shapes| shapes.get(service_id))
        .ok_or_else(|| SchemaError::ShapeNotFound {
            shape: service_id.to_string(),
        })?;

    let auth = if has_trait(service, "smithy.api#httpBearerAuth") {
        AuthPolicy::BearerToken
    } else {
        AuthPolicy::None
    };

    let mut operations = Vec::new();
    if let Some(refs) = service.get("operations").and_then(Value::as_array) {
        for op_ref in refs {
            let target =
                op_ref
                    .get("target")
                    .and_then(Value::as_str)
                    .ok_or_else(|| SchemaError::ShapeNotFound {
                        shape: format!("{service_id}$operations"),
                    })?;
            operations.push(extract_operation(model, target)?);
        }
    }

    Ok(ServiceDescriptor {
        name: service_ref.name,
        auth,
        operations,
    })
}

fn extract_operation(model: &Value, target: &str) -> Result<OperationDescriptor, SchemaError> {
    let op_ref = ShapeRef::parse(target)?;
    let def = model
        .get("shapes")
        .and_then(|shapes| shapes.get(target))
        .ok_or_else(|| SchemaError::ShapeNotFound {
            shape: target.to_string(),
        })?;

    let http = def
        .get("traits")
        .and_then(|traits| traits.get("smithy.api#http"))
        .map(|http| HttpRoute {
            method: http
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or("POST")
                .to_string(),
            uri: http
                .get("uri")
                .and_then(Value::as_str)
                .unwrap_or("/")
                .to_string(),
        })
        .ok_or_else(|| SchemaError::MissingHttpRoute {
            operation: op_ref.name.clone(),
        })?;

    let auth_exempt = def
        .get("traits")
        .and_then(|traits| traits.get("smithy.api#auth"))
        .and_then(Value::as_array)
        .is_some_and(|mechanisms| mechanisms.is_empty());

    Ok(OperationDescriptor {
        name: op_ref.name,
        http,
        documentation: doc_trait(def),
        input: resolve_io(model, def, "input")?,
        output: resolve_io(model, def, "output")?,
        auth_exempt,
    })
}

/// Resolve an operation's input or output target into a top-level field
/// list. A missing target, or the Unit shape, yields an empty list.
fn resolve_io(model: &Value, def: &Value, slot: &str) -> Result<Vec<Field>, SchemaError> {
    let Some(target) = def
        .get(slot)
        .and_then(|io| io.get("target"))
        .and_then(Value::as_str)
    else {
        return Ok(Vec::new());
    };
    if target == "smithy.api#Unit" {
        return Ok(Vec::new());
    }
    match resolve_type(target, model)? {
        TypeDescriptor::Structure { members } => Ok(members),
        _ => Err(SchemaError::UnsupportedType {
            kind: format!("non-structure {slot} shape: {target}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget_model() -> Value {
        json!({
            "shapes": {
                "com.example#WidgetService": {
                    "type": "service",
                    "traits": { "smithy.api#httpBearerAuth": {} },
                    "operations": [
                        { "target": "com.example#Login" },
                        { "target": "com.example#CreateWidget" },
                        { "target": "com.example#ListWidgets" }
                    ]
                },
                "com.example#Login": {
                    "type": "operation",
                    "input": { "target": "com.example#LoginInput" },
                    "traits": {
                        "smithy.api#http": { "method": "POST", "uri": "/login" },
                        "smithy.api#auth": [],
                        "smithy.api#documentation": "Issue a bearer token"
                    }
                },
                "com.example#LoginInput": {
                    "type": "structure",
                    "members": {
                        "user": {
                            "target": "smithy.api#String",
                            "traits": { "smithy.api#required": {} }
                        }
                    }
                },
                "com.example#CreateWidget": {
                    "type": "operation",
                    "input": { "target": "com.example#CreateWidgetInput" },
                    "output": { "target": "smithy.api#Unit" },
                    "traits": {
                        "smithy.api#http": { "method": "POST", "uri": "/widgets" },
                        "smithy.api#documentation": "Create a widget"
                    }
                },
                "com.example#CreateWidgetInput": {
                    "type": "structure",
                    "members": {
                        "name": {
                            "target": "smithy.api#String",
                            "traits": { "smithy.api#required": {} }
                        }
                    }
                },
                "com.example#ListWidgets": {
                    "type": "operation",
                    "traits": {
                        "smithy.api#http": { "method": "GET", "uri": "/widgets" }
                    }
                }
            }
        })
    }

    #[test]
    fn extract_preserves_declared_operation_order() {
        let service = extract_service(&widget_model(), "com.example#WidgetService").unwrap();
        let names: Vec<&str> = service
            .operations
            .iter()
            .map(|op| op.name.as_str())
            .collect();
        assert_eq!(names, ["Login", "CreateWidget", "ListWidgets"]);
    }

    #[test]
    fn extract_reads_route_and_documentation() {
        let service = extract_service(&widget_model(), "com.example#WidgetService").unwrap();
        let create = &service.operations[1];
        assert_eq!(
            create.http,
            HttpRoute {
                method: "POST".into(),
                uri: "/widgets".into()
            }
        );
        assert_eq!(create.documentation, "Create a widget");
        assert_eq!(service.operations[2].documentation, "");
    }

    #[test]
    fn bearer_auth_with_empty_auth_list_exemption() {
        let service = extract_service(&widget_model(), "com.example#WidgetService").unwrap();
        assert_eq!(service.auth, AuthPolicy::BearerToken);

        let login = &service.operations[0];
        let create = &service.operations[1];
        assert!(login.auth_exempt);
        assert!(!create.auth_exempt);
        assert!(!service.auth.requires_token(login));
        assert!(service.auth.requires_token(create));
    }

    #[test]
    fn no_service_auth_trait_means_no_tokens() {
        let mut model = widget_model();
        model["shapes"]["com.example#WidgetService"]["traits"] = json!({});
        let service = extract_service(&model, "com.example#WidgetService").unwrap();
        assert_eq!(service.auth, AuthPolicy::None);
        assert!(!service.auth.requires_token(&service.operations[1]));
    }

    #[test]
    fn missing_input_and_unit_output_yield_empty_field_lists() {
        let service = extract_service(&widget_model(), "com.example#WidgetService").unwrap();
        assert!(service.operations[1].output.is_empty());
        assert!(service.operations[2].input.is_empty());
        assert!(service.operations[2].output.is_empty());
    }

    #[test]
    fn missing_http_trait_is_an_error() {
        let mut model = widget_model();
        model["shapes"]["com.example#CreateWidget"]["traits"] =
            json!({ "smithy.api#documentation": "no route" });
        match extract_service(&model, "com.example#WidgetService") {
            Err(SchemaError::MissingHttpRoute { operation }) => {
                assert_eq!(operation, "CreateWidget");
            }
            other => panic!("expected MissingHttpRoute, got {other:?}"),
        }
    }

    #[test]
    fn unknown_service_is_an_error() {
        assert!(matches!(
            extract_service(&widget_model(), "com.example#Nope"),
            Err(SchemaError::ShapeNotFound { .. })
        ));
    }
}
