use std::io::{Read, Seek};

use tracing::{trace, warn};

use crate::context::DecodeContext;
use crate::error::Result;
use crate::property::decode_property;
use crate::value::Properties;

/// Field name that ends a field-list.
pub const NONE_SENTINEL: &str = "None";

#[derive(Debug)]
struct FieldHeader {
    name: String,
    type_name: String,
    declared_len: u64,
}

/// Read the header of the next field, or `None` once a terminator is seen.
fn read_field_header<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<Option<FieldHeader>> {
    // An all-zero word where a name length would be ends the list.
    if ctx.reader.peek_u32()? == 0 {
        return Ok(None);
    }
    let name = ctx.reader.read_string()?;
    if name == NONE_SENTINEL {
        return Ok(None);
    }
    let type_name = ctx.reader.read_string()?;
    let declared_len = ctx.reader.read_u64()?;

    Ok(Some(FieldHeader {
        name,
        type_name,
        declared_len,
    }))
}

/// Decode fields until a terminator. Shared by the document root and every
/// nested struct body; each call is one nesting level.
pub(crate) fn decode_field_list<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<Properties> {
    ctx.descend(|ctx| {
        let mut properties = Properties::new();
        while let Some(header) = read_field_header(ctx)? {
            trace!(
                offset = ctx.reader.position(),
                name = header.name.as_str(),
                type_name = header.type_name.as_str(),
                declared_len = header.declared_len,
                "field"
            );
            let value = ctx.with_scope(&header.name, |ctx| {
                decode_property(ctx, &header.type_name)
            })?;
            trace!(name = header.name.as_str(), kind = value.kind(), "decoded");
            if properties.contains(&header.name) {
                warn!(
                    path = %ctx.path(),
                    name = header.name.as_str(),
                    "duplicate field name, keeping last value"
                );
            }
            properties.insert(header.name, value);
        }
        Ok(properties)
    })
}
