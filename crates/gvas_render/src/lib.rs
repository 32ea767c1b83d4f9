use std::fmt::Write as _;

use gvas_core::{Delegate, Document, Metadata, Properties, PropertyValue};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// `{ "metadata": ..., "properties": ... }`, keys in file order.
    #[default]
    CanonicalV1,
    /// The property map alone, without the metadata wrapper.
    PropertiesOnly,
}

pub fn render_document_json(document: &Document, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => {
            let mut out = JsonMap::new();
            if let Some(metadata) = &document.metadata {
                out.insert("metadata".to_string(), render_metadata_json(metadata));
            }
            out.insert(
                "properties".to_string(),
                render_properties_json(&document.properties),
            );
            JsonValue::Object(out)
        }
        JsonStyle::PropertiesOnly => render_properties_json(&document.properties),
    }
}

pub fn render_metadata_json(metadata: &Metadata) -> JsonValue {
    let engine = &metadata.engine_version;
    let mut engine_version = JsonMap::new();
    engine_version.insert("major".to_string(), JsonValue::from(engine.major));
    engine_version.insert("minor".to_string(), JsonValue::from(engine.minor));
    engine_version.insert("patch".to_string(), JsonValue::from(engine.patch));
    engine_version.insert("build".to_string(), JsonValue::from(engine.build));
    engine_version.insert(
        "build_id".to_string(),
        JsonValue::String(engine.build_id.clone()),
    );

    let custom_format_data: JsonMap<String, JsonValue> = metadata
        .custom_format_data
        .iter()
        .map(|(guid, version)| (guid.clone(), JsonValue::from(*version)))
        .collect();

    let mut out = JsonMap::new();
    out.insert(
        "save_version".to_string(),
        JsonValue::from(metadata.save_version),
    );
    out.insert(
        "package_version".to_string(),
        JsonValue::from(metadata.package_version),
    );
    out.insert(
        "engine_version".to_string(),
        JsonValue::Object(engine_version),
    );
    out.insert(
        "custom_format_version".to_string(),
        JsonValue::from(metadata.custom_format_version),
    );
    out.insert(
        "custom_format_data".to_string(),
        JsonValue::Object(custom_format_data),
    );
    out.insert(
        "save_game_type".to_string(),
        JsonValue::String(metadata.save_game_type.clone()),
    );
    JsonValue::Object(out)
}

pub fn render_properties_json(properties: &Properties) -> JsonValue {
    JsonValue::Object(
        properties
            .iter()
            .map(|(name, value)| (name.clone(), property_value_to_json(value)))
            .collect(),
    )
}

pub fn property_value_to_json(value: &PropertyValue) -> JsonValue {
    match value {
        PropertyValue::Int32(v) => JsonValue::from(*v),
        PropertyValue::UInt32(v) => JsonValue::from(*v),
        PropertyValue::Float32(v) => float_to_json(*v),
        PropertyValue::Bool(v) => JsonValue::Bool(*v),
        PropertyValue::Str(s) | PropertyValue::GuidHex(s) | PropertyValue::DateTimeTicks(s) => {
            JsonValue::String(s.clone())
        }
        PropertyValue::Struct(fields) => render_properties_json(fields),
        PropertyValue::IntArray(values) => {
            JsonValue::Array(values.iter().map(|v| JsonValue::from(*v)).collect())
        }
        PropertyValue::ObjectPathArray(items) | PropertyValue::GuidSet(items) => JsonValue::Array(
            items
                .iter()
                .map(|s| JsonValue::String(s.clone()))
                .collect(),
        ),
        PropertyValue::StructArray(elements) => {
            JsonValue::Array(elements.iter().map(property_value_to_json).collect())
        }
        PropertyValue::KeyedMap(entries) => JsonValue::Object(
            entries
                .iter()
                .map(|(key, v)| (key.clone(), property_value_to_json(v)))
                .collect(),
        ),
        PropertyValue::Delegate(delegate) => delegate_to_json(delegate),
    }
}

fn delegate_to_json(delegate: &Delegate) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "object_path".to_string(),
        JsonValue::String(delegate.object_path.clone()),
    );
    m.insert(
        "function_name".to_string(),
        JsonValue::String(delegate.function_name.clone()),
    );
    JsonValue::Object(m)
}

/// Widened through the shortest decimal form so `0.1f32` renders as `0.1`
/// rather than `0.10000000149011612`. NaN and infinities become `null`.
fn float_to_json(v: f32) -> JsonValue {
    if !v.is_finite() {
        return JsonValue::Null;
    }
    v.to_string()
        .parse::<f64>()
        .ok()
        .and_then(JsonNumber::from_f64)
        .map_or(JsonValue::Null, JsonValue::Number)
}

/// Keep only the named top-level fields. Order follows the file, not `names`;
/// names that are absent are skipped.
pub fn select_fields(properties: &Properties, names: &[String]) -> Properties {
    properties
        .iter()
        .filter(|(name, _)| names.iter().any(|wanted| wanted == *name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Names from `names` that do not appear in `properties`.
pub fn missing_fields<'a>(properties: &Properties, names: &'a [String]) -> Vec<&'a str> {
    names
        .iter()
        .filter(|name| !properties.contains(name))
        .map(String::as_str)
        .collect()
}

pub fn render_text(document: &Document) -> String {
    let mut out = String::new();
    if let Some(metadata) = &document.metadata {
        write_metadata_text(&mut out, metadata);
        writeln!(&mut out).expect("writing to String cannot fail");
    }
    write_properties_text(&mut out, &document.properties, 0);
    out
}

pub fn render_metadata_text(metadata: &Metadata) -> String {
    let mut out = String::new();
    write_metadata_text(&mut out, metadata);
    out
}

fn write_metadata_text(out: &mut String, metadata: &Metadata) {
    let engine = &metadata.engine_version;
    writeln!(out, "save_game_type: {}", metadata.save_game_type)
        .expect("writing to String cannot fail");
    writeln!(out, "save_version: {}", metadata.save_version)
        .expect("writing to String cannot fail");
    writeln!(out, "package_version: {}", metadata.package_version)
        .expect("writing to String cannot fail");
    writeln!(
        out,
        "engine_version: {}.{}.{}-{}+{}",
        engine.major, engine.minor, engine.patch, engine.build, engine.build_id
    )
    .expect("writing to String cannot fail");
    writeln!(
        out,
        "custom_format_version: {}",
        metadata.custom_format_version
    )
    .expect("writing to String cannot fail");
    if metadata.custom_format_data.is_empty() {
        writeln!(out, "custom_format_data: {{}}").expect("writing to String cannot fail");
        return;
    }
    writeln!(out, "custom_format_data:").expect("writing to String cannot fail");
    for (guid, version) in &metadata.custom_format_data {
        writeln!(out, "{INDENT}{guid}: {version}").expect("writing to String cannot fail");
    }
}

fn write_properties_text(out: &mut String, properties: &Properties, depth: usize) {
    for (name, value) in properties {
        write_entry_text(out, name, value, depth);
    }
}

fn write_entry_text(out: &mut String, label: &str, value: &PropertyValue, depth: usize) {
    let pad = INDENT.repeat(depth);
    match value {
        PropertyValue::Struct(fields) if fields.is_empty() => {
            writeln!(out, "{pad}{label}: {{}}").expect("writing to String cannot fail");
        }
        PropertyValue::Struct(fields) => {
            writeln!(out, "{pad}{label}:").expect("writing to String cannot fail");
            write_properties_text(out, fields, depth + 1);
        }
        PropertyValue::StructArray(elements) if !elements.is_empty() => {
            writeln!(out, "{pad}{label}:").expect("writing to String cannot fail");
            for (index, element) in elements.iter().enumerate() {
                write_entry_text(out, &format!("[{index}]"), element, depth + 1);
            }
        }
        PropertyValue::ObjectPathArray(items) | PropertyValue::GuidSet(items)
            if !items.is_empty() =>
        {
            writeln!(out, "{pad}{label}:").expect("writing to String cannot fail");
            for (index, item) in items.iter().enumerate() {
                writeln!(out, "{pad}{INDENT}[{index}]: {item}")
                    .expect("writing to String cannot fail");
            }
        }
        PropertyValue::KeyedMap(entries) if !entries.is_empty() => {
            writeln!(out, "{pad}{label}:").expect("writing to String cannot fail");
            for (key, entry) in entries {
                write_entry_text(out, key, entry, depth + 1);
            }
        }
        other => {
            writeln!(out, "{pad}{label}: {}", inline_text(other))
                .expect("writing to String cannot fail");
        }
    }
}

fn inline_text(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Int32(v) => v.to_string(),
        PropertyValue::UInt32(v) => v.to_string(),
        PropertyValue::Float32(v) => format!("{v:?}"),
        PropertyValue::Bool(v) => v.to_string(),
        PropertyValue::Str(s) => format!("{s:?}"),
        PropertyValue::GuidHex(s) => s.clone(),
        PropertyValue::DateTimeTicks(ticks) => format!("{ticks} ticks"),
        PropertyValue::IntArray(values) => {
            let joined: Vec<String> = values.iter().map(i32::to_string).collect();
            format!("[{}]", joined.join(", "))
        }
        PropertyValue::Delegate(delegate) => {
            format!("{} -> {}", delegate.object_path, delegate.function_name)
        }
        PropertyValue::Struct(_) => "{}".to_string(),
        PropertyValue::KeyedMap(_) => "{}".to_string(),
        PropertyValue::StructArray(_)
        | PropertyValue::ObjectPathArray(_)
        | PropertyValue::GuidSet(_) => "[]".to_string(),
    }
}
