use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{DecodeError, Result};
use crate::reader::{LittleEndianReader, check_count};

pub const MAGIC: &[u8; 4] = b"GVAS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub build: u32,
    pub build_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub save_version: i32,
    pub package_version: i32,
    pub engine_version: EngineVersion,
    pub custom_format_version: i32,
    /// Custom version GUID (lowercase hex) to version number.
    pub custom_format_data: IndexMap<String, i32>,
    pub save_game_type: String,
}

impl EngineVersion {
    pub fn parse<R: Read>(r: &mut LittleEndianReader<R>) -> Result<Self> {
        let major = r.read_u16()?;
        let minor = r.read_u16()?;
        let patch = r.read_u16()?;
        let build = r.read_u32()?;
        let build_id = r.read_string()?;

        Ok(Self {
            major,
            minor,
            patch,
            build,
            build_id,
        })
    }
}

impl Metadata {
    /// Check the magic tag, then decode the fixed-layout record that follows.
    #[instrument(skip_all)]
    pub fn parse<R: Read>(r: &mut LittleEndianReader<R>, max_entries: usize) -> Result<Self> {
        let magic: [u8; 4] = r.read_array()?;
        if &magic != MAGIC {
            return Err(DecodeError::InvalidHeader { found: magic });
        }

        let save_version = r.read_i32()?;
        let package_version = r.read_i32()?;
        let engine_version = EngineVersion::parse(r)?;
        let custom_format_version = r.read_i32()?;

        let offset = r.position();
        let count = r.read_u32()?;
        let count = check_count("custom format table", count.into(), max_entries, offset)?;
        let mut custom_format_data = IndexMap::with_capacity(count.min(256));
        for _ in 0..count {
            let key = r.read_guid_hex()?;
            let value = r.read_i32()?;
            if let Some(previous) = custom_format_data.insert(key, value) {
                warn!(previous, value, "duplicate custom format key, keeping last value");
            }
        }

        let save_game_type = r.read_string()?;

        debug!(
            save_version,
            package_version,
            engine_build = engine_version.build,
            build_id = engine_version.build_id.as_str(),
            custom_formats = custom_format_data.len(),
            save_game_type = save_game_type.as_str(),
            "decoded header"
        );

        Ok(Self {
            save_version,
            package_version,
            engine_version,
            custom_format_version,
            custom_format_data,
            save_game_type,
        })
    }
}
