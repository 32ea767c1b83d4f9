#![allow(dead_code)]

//! Byte fixtures for decoder tests. Production code never encodes GVAS; this
//! writer only exists to build inputs.

use gvas_core::Metadata;

pub const GUID_A: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];
pub const GUID_B: [u8; 16] = [0xab; 16];

#[derive(Debug, Default, Clone)]
pub struct GvasWriter {
    bytes: Vec<u8>,
}

impl GvasWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn zeros(&mut self, n: usize) -> &mut Self {
        self.bytes.resize(self.bytes.len() + n, 0);
        self
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.raw(&[v])
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn i64(&mut self, v: i64) -> &mut Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn u64(&mut self, v: u64) -> &mut Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.raw(&v.to_le_bytes())
    }

    /// Length-prefixed, null-terminated; the empty string is a bare zero length.
    pub fn string(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            return self.i32(0);
        }
        self.i32(s.len() as i32 + 1);
        self.raw(s.as_bytes());
        self.u8(0)
    }

    pub fn guid(&mut self, guid: [u8; 16]) -> &mut Self {
        self.raw(&guid)
    }

    pub fn metadata(&mut self, m: &Metadata) -> &mut Self {
        self.raw(b"GVAS");
        self.i32(m.save_version);
        self.i32(m.package_version);
        self.u16(m.engine_version.major);
        self.u16(m.engine_version.minor);
        self.u16(m.engine_version.patch);
        self.u32(m.engine_version.build);
        self.string(&m.engine_version.build_id);
        self.i32(m.custom_format_version);
        self.u32(m.custom_format_data.len() as u32);
        for (key, value) in &m.custom_format_data {
            let key = hex::decode(key).expect("custom format key should be hex");
            self.raw(&key);
            self.i32(*value);
        }
        self.string(&m.save_game_type)
    }

    pub fn field_header(&mut self, name: &str, type_name: &str, declared_len: u64) -> &mut Self {
        self.string(name);
        self.string(type_name);
        self.u64(declared_len)
    }

    pub fn none(&mut self) -> &mut Self {
        self.string("None")
    }

    pub fn int_field(&mut self, name: &str, v: i32) -> &mut Self {
        self.field_header(name, "IntProperty", 4);
        self.u8(0);
        self.i32(v)
    }

    pub fn uint32_field(&mut self, name: &str, v: u32) -> &mut Self {
        self.field_header(name, "UInt32Property", 4);
        self.u8(0);
        self.u32(v)
    }

    pub fn float_field(&mut self, name: &str, v: f32) -> &mut Self {
        self.field_header(name, "FloatProperty", 4);
        self.u8(0);
        self.f32(v)
    }

    pub fn bool_field(&mut self, name: &str, v: u8) -> &mut Self {
        self.field_header(name, "BoolProperty", 0);
        self.u8(0);
        self.u8(v)
    }

    pub fn str_field(&mut self, name: &str, v: &str) -> &mut Self {
        self.field_header(name, "StrProperty", v.len() as u64 + 5);
        self.u8(0);
        self.string(v)
    }

    pub fn object_field(&mut self, name: &str, path: &str) -> &mut Self {
        self.field_header(name, "ObjectProperty", path.len() as u64 + 5);
        self.u8(0);
        self.string(path)
    }

    /// Field header plus struct subtype and its 17 reserved bytes.
    pub fn struct_field_header(&mut self, name: &str, struct_type: &str) -> &mut Self {
        self.field_header(name, "StructProperty", 0);
        self.string(struct_type);
        self.zeros(17)
    }

    pub fn guid_field(&mut self, name: &str, guid: [u8; 16]) -> &mut Self {
        self.struct_field_header(name, "Guid");
        self.guid(guid)
    }

    pub fn date_time_field(&mut self, name: &str, ticks: i64) -> &mut Self {
        self.struct_field_header(name, "DateTime");
        self.i64(ticks)
    }

    pub fn int_array_field(&mut self, name: &str, values: &[i32]) -> &mut Self {
        self.field_header(name, "ArrayProperty", 4 + 4 * values.len() as u64);
        self.string("IntProperty");
        self.u8(0);
        self.i32(values.len() as i32);
        for v in values {
            self.i32(*v);
        }
        self
    }

    pub fn object_array_field(&mut self, name: &str, paths: &[&str]) -> &mut Self {
        self.field_header(name, "ArrayProperty", 0);
        self.string("ObjectProperty");
        self.u8(0);
        self.i32(paths.len() as i32);
        for path in paths {
            self.string(path);
        }
        self
    }

    /// Everything of a struct array up to its first element.
    pub fn struct_array_header(&mut self, name: &str, struct_type: &str, count: i32) -> &mut Self {
        self.field_header(name, "ArrayProperty", 0);
        self.string("StructProperty");
        self.u8(0);
        self.i32(count);
        self.string(name);
        self.string("StructProperty");
        self.u64(0);
        self.string(struct_type);
        self.zeros(17)
    }

    pub fn guid_set_field(&mut self, name: &str, guids: &[[u8; 16]]) -> &mut Self {
        self.field_header(name, "SetProperty", 8 + 16 * guids.len() as u64);
        self.string("StructProperty");
        self.zeros(5);
        self.i32(guids.len() as i32);
        for guid in guids {
            self.guid(*guid);
        }
        self
    }

    pub fn map_header(
        &mut self,
        name: &str,
        key_type: &str,
        value_type: &str,
        count: i32,
    ) -> &mut Self {
        self.field_header(name, "MapProperty", 0);
        self.string(key_type);
        self.string(value_type);
        self.zeros(5);
        self.i32(count)
    }

    pub fn delegate_field(&mut self, name: &str, object_path: &str, function: &str) -> &mut Self {
        self.field_header(name, "MulticastInlineDelegateProperty", 0);
        self.zeros(5);
        self.string(object_path);
        self.string(function)
    }
}

/// The all-zero header: zero versions, empty strings, empty custom format table.
pub fn zero_metadata() -> Metadata {
    Metadata::default()
}

/// Header followed by whatever `body` writes, then the `None` sentinel.
pub fn document(body: impl FnOnce(&mut GvasWriter)) -> Vec<u8> {
    let mut w = GvasWriter::new();
    w.metadata(&zero_metadata());
    body(&mut w);
    w.none();
    w.into_bytes()
}
