//! Type-name dispatch and the per-variant property decoders.
//!
//! Every decoder starts with the cursor just past the field's name, type
//! name and declared length. The declared length is never used to skip or
//! bound a value; only the layout each decoder knows about moves the cursor.

mod container;
mod scalar;
mod structure;

use std::io::{Read, Seek};

use crate::context::DecodeContext;
use crate::error::{Result, TypePosition};
use crate::value::PropertyValue;

pub const INT_PROPERTY: &str = "IntProperty";
pub const UINT32_PROPERTY: &str = "UInt32Property";
pub const FLOAT_PROPERTY: &str = "FloatProperty";
pub const BOOL_PROPERTY: &str = "BoolProperty";
pub const STR_PROPERTY: &str = "StrProperty";
pub const OBJECT_PROPERTY: &str = "ObjectProperty";
pub const STRUCT_PROPERTY: &str = "StructProperty";
pub const ARRAY_PROPERTY: &str = "ArrayProperty";
pub const SET_PROPERTY: &str = "SetProperty";
pub const MAP_PROPERTY: &str = "MapProperty";
pub const MULTICAST_INLINE_DELEGATE_PROPERTY: &str = "MulticastInlineDelegateProperty";
/// A bare 16-byte GUID field; same name as the struct subtype.
pub const GUID_PROPERTY: &str = "Guid";

/// Struct subtypes with a fixed payload instead of a nested field-list.
pub const GUID_STRUCT: &str = "Guid";
pub const DATE_TIME_STRUCT: &str = "DateTime";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Int,
    UInt32,
    Float,
    Bool,
    Str,
    Object,
    Struct,
    Array,
    Set,
    Map,
    MulticastInlineDelegate,
    Guid,
}

impl PropertyType {
    pub const ALL: [PropertyType; 12] = [
        Self::Int,
        Self::UInt32,
        Self::Float,
        Self::Bool,
        Self::Str,
        Self::Object,
        Self::Struct,
        Self::Array,
        Self::Set,
        Self::Map,
        Self::MulticastInlineDelegate,
        Self::Guid,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            INT_PROPERTY => Some(Self::Int),
            UINT32_PROPERTY => Some(Self::UInt32),
            FLOAT_PROPERTY => Some(Self::Float),
            BOOL_PROPERTY => Some(Self::Bool),
            STR_PROPERTY => Some(Self::Str),
            OBJECT_PROPERTY => Some(Self::Object),
            STRUCT_PROPERTY => Some(Self::Struct),
            ARRAY_PROPERTY => Some(Self::Array),
            SET_PROPERTY => Some(Self::Set),
            MAP_PROPERTY => Some(Self::Map),
            MULTICAST_INLINE_DELEGATE_PROPERTY => Some(Self::MulticastInlineDelegate),
            GUID_PROPERTY => Some(Self::Guid),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Self::Int => INT_PROPERTY,
            Self::UInt32 => UINT32_PROPERTY,
            Self::Float => FLOAT_PROPERTY,
            Self::Bool => BOOL_PROPERTY,
            Self::Str => STR_PROPERTY,
            Self::Object => OBJECT_PROPERTY,
            Self::Struct => STRUCT_PROPERTY,
            Self::Array => ARRAY_PROPERTY,
            Self::Set => SET_PROPERTY,
            Self::Map => MAP_PROPERTY,
            Self::MulticastInlineDelegate => MULTICAST_INLINE_DELEGATE_PROPERTY,
            Self::Guid => GUID_PROPERTY,
        }
    }
}

/// Decode one field value whose type name was read from a field header.
pub(crate) fn decode_property<R: Read + Seek>(
    ctx: &mut DecodeContext<R>,
    type_name: &str,
) -> Result<PropertyValue> {
    let Some(property_type) = PropertyType::from_name(type_name) else {
        return Err(ctx.unsupported(TypePosition::Field, type_name));
    };

    match property_type {
        PropertyType::Int => scalar::decode_int(ctx),
        PropertyType::UInt32 => scalar::decode_uint32(ctx),
        PropertyType::Float => scalar::decode_float(ctx),
        PropertyType::Bool => scalar::decode_bool(ctx),
        PropertyType::Str | PropertyType::Object => scalar::decode_str(ctx),
        PropertyType::Struct => structure::decode_struct(ctx),
        PropertyType::Array => container::decode_array(ctx),
        PropertyType::Set => container::decode_set(ctx),
        PropertyType::Map => container::decode_map(ctx),
        PropertyType::MulticastInlineDelegate => scalar::decode_delegate(ctx),
        PropertyType::Guid => scalar::decode_guid(ctx),
    }
}
