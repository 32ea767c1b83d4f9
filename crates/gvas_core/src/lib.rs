/*!
Read-only decoder for GVAS save files, the property-bag container Unreal
Engine games write their saves in.

A save is a fixed header ([`Metadata`]) followed by a field-list: named,
self-typed properties terminated by a `None` sentinel. Struct properties nest
further field-lists, so the decoded tree is a [`Document`] of
[`PropertyValue`]s kept in file order.

# Example

```no_run
use std::fs::File;

use gvas_core::{PropertyValue, decode_document};

let doc = decode_document(File::open("save.sav")?)?;
if let Some(PropertyValue::Int32(level)) = doc.properties.get("Level") {
    println!("level {level}");
}
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub mod context;
pub mod decoder;
pub mod error;
mod field_list;
pub mod header;
pub mod property;
pub mod reader;
pub mod value;

pub use context::DecodeOptions;
pub use decoder::{Decoder, decode_document, decode_metadata};
pub use error::{DecodeError, DecodeErrorCode, Result, TypePosition};
pub use field_list::NONE_SENTINEL;
pub use header::{EngineVersion, MAGIC, Metadata};
pub use property::PropertyType;
pub use value::{Delegate, Document, Properties, PropertyValue};
