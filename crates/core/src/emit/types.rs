//! `types.ts`: one declaration per component schema plus the message unions.

use super::Emit;
use super::ts::{TsItem, TsLiteral, TsModule, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};
use super::utils::{make_unknown_record, sanitize_ts_identifier, value_to_literal};
use crate::document::Schema;
use crate::model::ResolvedModel;

/// TypeScript type name for a component schema.
///
/// Every artifact goes through this function, so a payload type imported by
/// `handlers.ts` or `client.ts` always matches its declaration here.
pub fn type_name(schema_name: &str) -> String {
    sanitize_ts_identifier(schema_name)
}

/// Map a schema to a TypeScript type.
pub fn schema_to_ts(schema: &Schema) -> TsType {
    if let Some(path) = &schema.ref_path {
        let target = path.rsplit('/').next().unwrap_or_default();
        return TsType::Ref(type_name(target));
    }

    if let Some(value) = &schema.const_value
        && let Some(literal) = value_to_literal(value)
    {
        return TsType::Literal(literal);
    }

    if let Some(values) = &schema.enum_values {
        let literals: Vec<TsType> = values
            .iter()
            .filter_map(value_to_literal)
            .map(TsType::Literal)
            .collect();
        if !literals.is_empty() {
            return union_or_never(literals);
        }
    }

    let alternatives = if schema.one_of.is_empty() {
        &schema.any_of
    } else {
        &schema.one_of
    };
    if !alternatives.is_empty() {
        let mut members: Vec<TsType> = Vec::with_capacity(alternatives.len());
        for ty in alternatives.iter().map(schema_to_ts) {
            if !members.contains(&ty) {
                members.push(ty);
            }
        }
        return union_or_never(members);
    }

    match schema.schema_type.as_deref() {
        Some("string") => TsType::Primitive(TsPrimitive::String),
        Some("number" | "integer") => TsType::Primitive(TsPrimitive::Number),
        Some("boolean") => TsType::Primitive(TsPrimitive::Boolean),
        Some("null") => TsType::Primitive(TsPrimitive::Null),
        Some("array") => {
            let item = schema
                .items
                .as_deref()
                .map_or(TsType::Primitive(TsPrimitive::Unknown), schema_to_ts);
            TsType::Array(Box::new(item))
        }
        Some("object") | None if !schema.properties.is_empty() => TsType::Object(props(schema)),
        Some("object") => make_unknown_record(),
        _ => TsType::Primitive(TsPrimitive::Unknown),
    }
}

fn props(schema: &Schema) -> Vec<TsProp> {
    schema
        .properties
        .iter()
        .map(|(name, prop)| TsProp {
            name: name.clone(),
            ty: schema_to_ts(prop),
            optional: !schema.is_required(name),
            description: prop.description.clone(),
        })
        .collect()
}

/// Declaration for a top-level component schema.
///
/// Schemas with properties become interfaces; everything else is an alias.
pub fn schema_to_typedef(name: &str, schema: &Schema) -> TsTypeDef {
    let kind = if schema.ref_path.is_none() && !schema.properties.is_empty() {
        TypeDefKind::Interface {
            properties: props(schema),
        }
    } else {
        TypeDefKind::TypeAlias {
            ty: schema_to_ts(schema),
        }
    };
    TsTypeDef {
        name: type_name(name),
        kind,
    }
}

/// Render `types.ts`.
pub fn render(model: &ResolvedModel) -> String {
    let mut module = TsModule::new(format!("Generated types for {}", model.title()));

    for (name, schema) in model.schemas() {
        module.push(TsItem::TypeDef(schema_to_typedef(name, schema)));
    }

    let names: Vec<TsType> = model
        .message_type_union()
        .into_iter()
        .map(|name| TsType::Literal(TsLiteral::String(name.to_string())))
        .collect();
    module.comment("Discriminator values of every message in the protocol");
    module.push(TsItem::TypeDef(TsTypeDef {
        name: "MessageType".into(),
        kind: TypeDefKind::TypeAlias { ty: union_or_never(names) },
    }));

    let mut payloads: Vec<TsType> = Vec::new();
    for message in model.union_messages() {
        let ty = TsType::Ref(type_name(&message.schema_name));
        if !payloads.contains(&ty) {
            payloads.push(ty);
        }
    }
    module.comment("Payload of any message in the protocol");
    module.push(TsItem::TypeDef(TsTypeDef {
        name: "AsyncApiMessage".into(),
        kind: TypeDefKind::TypeAlias {
            ty: union_or_never(payloads),
        },
    }));

    module.emit()
}

fn union_or_never(mut types: Vec<TsType>) -> TsType {
    match types.len() {
        0 => TsType::Primitive(TsPrimitive::Never),
        1 => types.remove(0),
        _ => TsType::Union(types),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> Schema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_schema_to_ts_primitives() {
        assert_eq!(schema_to_ts(&schema(json!({"type": "string"}))).emit(), "string");
        assert_eq!(schema_to_ts(&schema(json!({"type": "integer"}))).emit(), "number");
        assert_eq!(schema_to_ts(&schema(json!({"type": "boolean"}))).emit(), "boolean");
        assert_eq!(schema_to_ts(&schema(json!({}))).emit(), "unknown");
        assert_eq!(
            schema_to_ts(&schema(json!({"type": "object"}))).emit(),
            "Record<string, unknown>"
        );
    }

    #[test]
    fn test_schema_to_ts_const_enum_array_ref() {
        assert_eq!(
            schema_to_ts(&schema(json!({"type": "string", "const": "ping"}))).emit(),
            "\"ping\""
        );
        assert_eq!(
            schema_to_ts(&schema(json!({"type": "string", "enum": ["a", "b"]}))).emit(),
            "\"a\" | \"b\""
        );
        assert_eq!(
            schema_to_ts(&schema(json!({"type": "array", "items": {"type": "number"}}))).emit(),
            "number[]"
        );
        assert_eq!(
            schema_to_ts(&schema(json!({"$ref": "#/components/schemas/User"}))).emit(),
            "User"
        );
    }

    #[test]
    fn test_nested_object_inline() {
        let ty = schema_to_ts(&schema(json!({
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": {"type": "string"},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        })));
        assert_eq!(ty.emit(), "{ id: string; tags?: string[] }");
    }

    #[test]
    fn test_schema_to_typedef_interface() {
        let def = schema_to_typedef(
            "Ping",
            &schema(json!({
                "type": "object",
                "required": ["type"],
                "properties": {
                    "type": {"type": "string", "const": "ping", "description": "Message type"},
                    "timestamp": {"type": "number"}
                }
            })),
        );
        let out = def.emit();
        assert!(out.starts_with("export interface Ping {"));
        assert!(out.contains("  /** Message type */\n  type: \"ping\";"));
        assert!(out.contains("  timestamp?: number;"));
    }

    #[test]
    fn test_alternatives_become_unions() {
        assert_eq!(
            schema_to_ts(&schema(json!({"oneOf": [{"type": "string"}, {"type": "number"}]}))).emit(),
            "string | number"
        );
        assert_eq!(
            schema_to_ts(&schema(json!({
                "anyOf": [{"$ref": "#/components/schemas/User"}, {"type": "null"}, {"type": "null"}]
            })))
            .emit(),
            "User | null"
        );
        assert_eq!(
            schema_to_ts(&schema(json!({
                "type": "array",
                "items": {"oneOf": [{"type": "string"}, {"type": "integer"}]}
            })))
            .emit(),
            "(string | number)[]"
        );

        let def = schema_to_typedef(
            "Id",
            &schema(json!({"anyOf": [{"type": "string"}, {"type": "integer"}]})),
        );
        assert_eq!(def.emit(), "export type Id = string | number;\n");
    }

    #[test]
    fn test_schema_to_typedef_alias() {
        let def = schema_to_typedef("user-id", &schema(json!({"type": "string"})));
        assert_eq!(def.emit(), "export type userId = string;\n");
    }
}
