//! Post-parse field handling emission
//!
//! Emits, for the generated action body, the logic that materializes
//! blob-typed fields from the file system and re-serializes document-typed
//! fields, at any nesting depth inside structures, list elements, and map
//! values. Fields whose subtree contains neither a blob nor a document are
//! skipped entirely so no dead guards are emitted.

use crate::shape::{Field, TypeDescriptor};

/// Whether a type, or anything nested inside it, is a blob or document.
pub fn needs_handling(ty: &TypeDescriptor) -> bool {
    match ty {
        TypeDescriptor::Blob { .. } | TypeDescriptor::Document => true,
        TypeDescriptor::List { member } => needs_handling(member),
        TypeDescriptor::Map { value, .. } => needs_handling(&value.ty),
        TypeDescriptor::Structure { members } => {
            members.iter().any(|member| needs_handling(&member.ty))
        }
        TypeDescriptor::Primitive(_) => false,
    }
}

/// Emit the handling fragment for an operation's top-level fields, rooted
/// at the generated program's `finalOptions` object. Returns an empty
/// string when nothing in the tree needs handling.
pub fn field_handling(fields: &[Field]) -> String {
    if !fields.iter().any(|field| needs_handling(&field.ty)) {
        return String::new();
    }

    let mut out = String::from(
        "  // Materialize file-backed and JSON-valued fields at every nesting level\n",
    );
    for field in fields {
        if needs_handling(&field.ty) {
            emit_type(&mut out, &field.ty, &format!("finalOptions.{}", field.name), 1);
        }
    }
    out
}

fn emit_type(out: &mut String, ty: &TypeDescriptor, expr: &str, depth: usize) {
    let i = "  ".repeat(depth);
    match ty {
        TypeDescriptor::Blob { streaming } => {
            let read = if *streaming {
                "fs.createReadStream"
            } else {
                "fs.readFileSync"
            };
            out.push_str(&format!(
                "{i}if ({expr}) {{\n\
                 {i}  const filePath{depth} = path.resolve({expr});\n\
                 {i}  if (!fs.existsSync(filePath{depth})) {{\n\
                 {i}    throw new Error(`File not found: ${{filePath{depth}}}`);\n\
                 {i}  }}\n\
                 {i}  {expr} = {read}(filePath{depth});\n\
                 {i}}}\n"
            ));
        }
        TypeDescriptor::Document => {
            out.push_str(&format!(
                "{i}if ({expr} && typeof {expr} === \"object\") {{\n\
                 {i}  {expr} = JSON.stringify({expr});\n\
                 {i}}}\n"
            ));
        }
        TypeDescriptor::Structure { members } => {
            out.push_str(&format!("{i}if ({expr}) {{\n"));
            for member in members {
                if needs_handling(&member.ty) {
                    emit_type(out, &member.ty, &format!("{expr}.{}", member.name), depth + 1);
                }
            }
            out.push_str(&format!("{i}}}\n"));
        }
        TypeDescriptor::List { member } => {
            out.push_str(&format!(
                "{i}if (Array.isArray({expr})) {{\n\
                 {i}  {expr}.forEach((_, i{depth}) => {{\n"
            ));
            emit_type(out, member, &format!("{expr}[i{depth}]"), depth + 2);
            out.push_str(&format!("{i}  }});\n{i}}}\n"));
        }
        TypeDescriptor::Map { value, .. } => {
            out.push_str(&format!(
                "{i}if ({expr} && typeof {expr} === \"object\") {{\n\
                 {i}  Object.keys({expr}).forEach((k{depth}) => {{\n"
            ));
            emit_type(out, &value.ty, &format!("{expr}[k{depth}]"), depth + 2);
            out.push_str(&format!("{i}  }});\n{i}}}\n"));
        }
        TypeDescriptor::Primitive(_) => {}
    }
}
