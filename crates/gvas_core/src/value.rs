use std::ops::Index;

use indexmap::IndexMap;

use crate::header::Metadata;

/// A decoded property. Exactly one shape per value; there is no coercion
/// between variants.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Int32(i32),
    UInt32(u32),
    Float32(f32),
    Bool(bool),
    /// Plain strings and object paths.
    Str(String),
    Struct(Properties),
    GuidHex(String),
    /// Raw tick count as a decimal string; never converted to a calendar time.
    DateTimeTicks(String),
    IntArray(Vec<i32>),
    ObjectPathArray(Vec<String>),
    /// Each element is either `Struct` or `GuidHex`.
    StructArray(Vec<PropertyValue>),
    GuidSet(Vec<String>),
    KeyedMap(IndexMap<String, PropertyValue>),
    Delegate(Delegate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegate {
    pub object_path: String,
    pub function_name: String,
}

impl PropertyValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int32(_) => "int32",
            Self::UInt32(_) => "uint32",
            Self::Float32(_) => "float32",
            Self::Bool(_) => "bool",
            Self::Str(_) => "str",
            Self::Struct(_) => "struct",
            Self::GuidHex(_) => "guid",
            Self::DateTimeTicks(_) => "datetime",
            Self::IntArray(_) => "int_array",
            Self::ObjectPathArray(_) => "object_path_array",
            Self::StructArray(_) => "struct_array",
            Self::GuidSet(_) => "guid_set",
            Self::KeyedMap(_) => "map",
            Self::Delegate(_) => "delegate",
        }
    }

    pub fn as_struct(&self) -> Option<&Properties> {
        match self {
            Self::Struct(properties) => Some(properties),
            _ => None,
        }
    }
}

/// Named fields in the order the file declares them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(IndexMap<String, PropertyValue>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. A repeated name keeps its first position and takes the
    /// new value; the replaced value is returned.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: PropertyValue,
    ) -> Option<PropertyValue> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, PropertyValue> {
        self.0.iter()
    }
}

impl Index<&str> for Properties {
    type Output = PropertyValue;

    fn index(&self, name: &str) -> &PropertyValue {
        &self.0[name]
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a PropertyValue);
    type IntoIter = indexmap::map::Iter<'a, String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, PropertyValue)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A fully decoded save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// `None` when decoding started past the header.
    pub metadata: Option<Metadata>,
    pub properties: Properties,
}
