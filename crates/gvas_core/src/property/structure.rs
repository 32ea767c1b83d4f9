use std::io::{Read, Seek};

use tracing::{instrument, trace};

use crate::context::DecodeContext;
use crate::error::Result;
use crate::field_list::decode_field_list;
use crate::value::{Properties, PropertyValue};

use super::{DATE_TIME_STRUCT, GUID_STRUCT};

/// Zero GUID plus terminator byte after a struct's subtype name.
pub(super) const STRUCT_HEADER_RESERVED: u64 = 17;

#[instrument(name = "StructProperty_read", skip_all)]
pub(super) fn decode_struct<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<PropertyValue> {
    let struct_type = ctx.reader.read_string()?;
    ctx.reader.skip(STRUCT_HEADER_RESERVED)?;
    trace!(struct_type = struct_type.as_str(), "struct");

    match struct_type.as_str() {
        GUID_STRUCT => Ok(PropertyValue::GuidHex(ctx.reader.read_guid_hex()?)),
        DATE_TIME_STRUCT => {
            let ticks = ctx.reader.read_i64()?;
            Ok(PropertyValue::DateTimeTicks(ticks.to_string()))
        }
        _ => Ok(PropertyValue::Struct(decode_struct_body(ctx)?)),
    }
}

/// A struct body with no header of its own: straight into a field-list.
/// Used for struct array elements and struct map values.
pub(super) fn decode_struct_body<R: Read + Seek>(
    ctx: &mut DecodeContext<R>,
) -> Result<Properties> {
    decode_field_list(ctx)
}
