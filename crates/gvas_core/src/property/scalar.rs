use std::io::{Read, Seek};

use tracing::instrument;

use crate::context::DecodeContext;
use crate::error::Result;
use crate::value::{Delegate, PropertyValue};

/// Reserved byte between a scalar's field header and its payload.
const SCALAR_RESERVED: u64 = 1;
const DELEGATE_RESERVED: u64 = 5;

pub(super) fn decode_int<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    ctx.reader.skip(SCALAR_RESERVED)?;
    Ok(PropertyValue::Int32(ctx.reader.read_i32()?))
}

pub(super) fn decode_uint32<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    ctx.reader.skip(SCALAR_RESERVED)?;
    Ok(PropertyValue::UInt32(ctx.reader.read_u32()?))
}

pub(super) fn decode_float<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    ctx.reader.skip(SCALAR_RESERVED)?;
    Ok(PropertyValue::Float32(ctx.reader.read_f32()?))
}

pub(super) fn decode_bool<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    ctx.reader.skip(SCALAR_RESERVED)?;
    Ok(PropertyValue::Bool(ctx.reader.read_bool()?))
}

/// Plain strings and object references share a layout; the path is the payload.
pub(super) fn decode_str<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    ctx.reader.skip(SCALAR_RESERVED)?;
    Ok(PropertyValue::Str(ctx.reader.read_string()?))
}

/// A `Guid`-typed field carries its 16 bytes with no reserved prefix.
pub(super) fn decode_guid<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    Ok(PropertyValue::GuidHex(ctx.reader.read_guid_hex()?))
}

#[instrument(name = "MulticastInlineDelegate_read", skip_all)]
pub(super) fn decode_delegate<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    ctx.reader.skip(DELEGATE_RESERVED)?;
    let object_path = ctx.reader.read_string()?;
    let function_name = ctx.reader.read_string()?;
    Ok(PropertyValue::Delegate(Delegate {
        object_path,
        function_name,
    }))
}
