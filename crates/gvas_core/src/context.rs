use std::io::{Read, Seek};

use crate::error::{DecodeError, Result, TypePosition};
use crate::reader::LittleEndianReader;

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_ELEMENT_COUNT: usize = 1 << 20;

/// Limits applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest allowed nesting of field-lists (the root list is level 1).
    pub max_depth: usize,
    /// Largest accepted element count for arrays, sets, maps and the header
    /// custom format table.
    pub max_element_count: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_element_count: DEFAULT_MAX_ELEMENT_COUNT,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_element_count(mut self, max_element_count: usize) -> Self {
        self.max_element_count = max_element_count;
        self
    }
}

/// The dotted field path of the value being decoded.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    components: Vec<String>,
}

impl Scope {
    pub(crate) fn path(&self) -> String {
        if self.components.is_empty() {
            "<root>".to_string()
        } else {
            self.components.join(".")
        }
    }
}

/// State threaded through one decode call.
pub(crate) struct DecodeContext<R> {
    pub(crate) reader: LittleEndianReader<R>,
    pub(crate) options: DecodeOptions,
    depth: usize,
    scope: Scope,
}

impl<R: Read + Seek> DecodeContext<R> {
    pub(crate) fn new(reader: LittleEndianReader<R>, options: DecodeOptions) -> Self {
        Self {
            reader,
            options,
            depth: 0,
            scope: Scope::default(),
        }
    }

    /// Run `f` one nesting level deeper, failing once `max_depth` is reached.
    pub(crate) fn descend<F, T>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::NestingTooDeep {
                limit: self.options.max_depth,
                offset: self.reader.position(),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn with_scope<F, T>(&mut self, name: &str, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        self.scope.components.push(name.to_string());
        let result = f(self);
        self.scope.components.pop();
        result
    }

    pub(crate) fn path(&self) -> String {
        self.scope.path()
    }

    pub(crate) fn read_count(&mut self, what: &'static str) -> Result<usize> {
        let limit = self.options.max_element_count;
        self.reader.read_count(what, limit)
    }

    /// Build an `UnsupportedType` error for a type name that was just read.
    pub(crate) fn unsupported(&self, position: TypePosition, type_name: &str) -> DecodeError {
        DecodeError::UnsupportedType {
            position,
            type_name: type_name.to_string(),
            path: self.path(),
            offset: self.reader.position(),
        }
    }
}
