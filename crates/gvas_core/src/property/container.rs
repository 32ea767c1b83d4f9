use std::io::{Read, Seek};

use indexmap::IndexMap;
use tracing::{instrument, trace, warn};

use crate::context::DecodeContext;
use crate::error::{Result, TypePosition};
use crate::value::PropertyValue;

use super::structure::{STRUCT_HEADER_RESERVED, decode_struct_body};
use super::{GUID_STRUCT, PropertyType, STRUCT_PROPERTY};

const ARRAY_RESERVED: u64 = 1;
const SET_RESERVED: u64 = 5;
const MAP_RESERVED: u64 = 5;
/// Redundant 64-bit length inside an array-of-struct header.
const ARRAY_STRUCT_LENGTH: u64 = 8;
/// Upper bound on up-front allocation; counts come from untrusted input.
const PREALLOCATE_LIMIT: usize = 4096;

#[derive(Debug, Clone, Copy)]
enum MapKeyKind {
    Guid,
    Int,
}

#[derive(Debug, Clone, Copy)]
enum MapValueKind {
    Struct,
    Int,
    Float,
    Bool,
}

#[instrument(name = "ArrayProperty_read", skip_all)]
pub(super) fn decode_array<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    let element_type = ctx.reader.read_string()?;
    ctx.reader.skip(ARRAY_RESERVED)?;
    let count = ctx.read_count("array")?;
    trace!(element_type = element_type.as_str(), count, "array");

    match PropertyType::from_name(&element_type) {
        Some(PropertyType::Struct) => decode_struct_array(ctx, count),
        Some(PropertyType::Int) => {
            let mut values = Vec::with_capacity(count.min(PREALLOCATE_LIMIT));
            for _ in 0..count {
                values.push(ctx.reader.read_i32()?);
            }
            Ok(PropertyValue::IntArray(values))
        }
        Some(PropertyType::Object) => {
            let mut paths = Vec::with_capacity(count.min(PREALLOCATE_LIMIT));
            for _ in 0..count {
                paths.push(ctx.reader.read_string()?);
            }
            Ok(PropertyValue::ObjectPathArray(paths))
        }
        _ => Err(ctx.unsupported(TypePosition::ArrayElement, &element_type)),
    }
}

/// Struct arrays repeat most of a field header before their elements:
/// array name, inner type name, an 8-byte length, then the struct subtype and
/// 17 reserved bytes exactly as a struct property would carry them.
fn decode_struct_array<R: Read + Seek>(
    ctx: &mut DecodeContext<R>,
    count: usize,
) -> Result<PropertyValue> {
    let _array_name = ctx.reader.read_string()?;
    let inner_type = ctx.reader.read_string()?;
    ctx.reader.skip(ARRAY_STRUCT_LENGTH)?;
    if inner_type != STRUCT_PROPERTY {
        return Err(ctx.unsupported(TypePosition::ArrayStructInner, &inner_type));
    }

    let struct_type = ctx.reader.read_string()?;
    ctx.reader.skip(STRUCT_HEADER_RESERVED)?;
    trace!(struct_type = struct_type.as_str(), count, "struct array");

    // An element body that opens on a zero word consumes nothing, so a
    // handful of bytes can stand for up to `max_element_count` empty
    // structs. The count ceiling is the only bound on that.
    let mut elements = Vec::with_capacity(count.min(PREALLOCATE_LIMIT));
    for index in 0..count {
        let element = if struct_type == GUID_STRUCT {
            PropertyValue::GuidHex(ctx.reader.read_guid_hex()?)
        } else {
            let body = ctx.with_scope(&index.to_string(), decode_struct_body)?;
            PropertyValue::Struct(body)
        };
        elements.push(element);
    }
    Ok(PropertyValue::StructArray(elements))
}

#[instrument(name = "SetProperty_read", skip_all)]
pub(super) fn decode_set<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    let element_type = ctx.reader.read_string()?;
    ctx.reader.skip(SET_RESERVED)?;
    let count = ctx.read_count("set")?;
    if element_type != STRUCT_PROPERTY {
        return Err(ctx.unsupported(TypePosition::SetElement, &element_type));
    }

    let mut guids = Vec::with_capacity(count.min(PREALLOCATE_LIMIT));
    for _ in 0..count {
        guids.push(ctx.reader.read_guid_hex()?);
    }
    Ok(PropertyValue::GuidSet(guids))
}

#[instrument(name = "MapProperty_read", skip_all)]
pub(super) fn decode_map<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    let key_type = ctx.reader.read_string()?;
    let value_type = ctx.reader.read_string()?;
    ctx.reader.skip(MAP_RESERVED)?;
    let count = ctx.read_count("map")?;
    trace!(
        key_type = key_type.as_str(),
        value_type = value_type.as_str(),
        count,
        "map"
    );

    let key_kind = match PropertyType::from_name(&key_type) {
        Some(PropertyType::Struct) => MapKeyKind::Guid,
        Some(PropertyType::Int) => MapKeyKind::Int,
        _ => return Err(ctx.unsupported(TypePosition::MapKey, &key_type)),
    };
    let value_kind = match PropertyType::from_name(&value_type) {
        Some(PropertyType::Struct) => MapValueKind::Struct,
        Some(PropertyType::Int) => MapValueKind::Int,
        Some(PropertyType::Float) => MapValueKind::Float,
        Some(PropertyType::Bool) => MapValueKind::Bool,
        _ => return Err(ctx.unsupported(TypePosition::MapValue, &value_type)),
    };

    let mut entries = IndexMap::with_capacity(count.min(PREALLOCATE_LIMIT));
    for _ in 0..count {
        let key = match key_kind {
            MapKeyKind::Guid => ctx.reader.read_guid_hex()?,
            MapKeyKind::Int => ctx.reader.read_i32()?.to_string(),
        };
        let value = match value_kind {
            MapValueKind::Struct => {
                PropertyValue::Struct(ctx.with_scope(&key, decode_struct_body)?)
            }
            MapValueKind::Int => PropertyValue::Int32(ctx.reader.read_i32()?),
            MapValueKind::Float => PropertyValue::Float32(ctx.reader.read_f32()?),
            MapValueKind::Bool => PropertyValue::Bool(ctx.reader.read_bool()?),
        };
        if entries.contains_key(&key) {
            warn!(
                path = %ctx.path(),
                key = key.as_str(),
                "duplicate map key, keeping last value"
            );
        }
        entries.insert(key, value);
    }
    Ok(PropertyValue::KeyedMap(entries))
}
