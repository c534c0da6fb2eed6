// Strongly-typed API model for codegen. Closed set of wire-friendly shapes.
use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiPrimitiveType {
    String,
    Number,
    Boolean,
    Any,
    Void,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiType {
    Primitive(ApiPrimitiveType),
    Array(Box<ApiType>),
    Dictionary { key: Box<ApiType>, value: Box<ApiType> },
    Class(ApiClassType),
    BlackBox(ApiBlackBoxType),
}

/// Reference to a class definition registered in [`ApiDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiClassType(String);

/// Opaque reference; never expanded into a definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiBlackBoxType(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub name: String,
    pub ty: ApiType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    ty: ApiClassType,
    properties: IndexMap<String, PropertyDefinition>, // insertion order, unique names
}

/// Registry of everything one translation run produced.
#[derive(Debug, Clone, Default)]
pub struct ApiDefinition {
    classes: IndexMap<String, ClassDefinition>,
    black_boxes: BTreeSet<ApiBlackBoxType>,
}

impl ApiType {
    pub const STRING: ApiType = ApiType::Primitive(ApiPrimitiveType::String);
    pub const NUMBER: ApiType = ApiType::Primitive(ApiPrimitiveType::Number);
    pub const BOOLEAN: ApiType = ApiType::Primitive(ApiPrimitiveType::Boolean);
    pub const ANY: ApiType = ApiType::Primitive(ApiPrimitiveType::Any);
    pub const VOID: ApiType = ApiType::Primitive(ApiPrimitiveType::Void);

    pub fn array(element: ApiType) -> Self {
        ApiType::Array(Box::new(element))
    }

    pub fn dictionary(key: ApiType, value: ApiType) -> Self {
        ApiType::Dictionary { key: Box::new(key), value: Box::new(value) }
    }
}

impl ApiClassType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl ApiBlackBoxType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, ty: ApiType) -> Self {
        Self { name: name.into(), ty }
    }
}

impl ClassDefinition {
    pub fn new(ty: ApiClassType) -> Self {
        Self { ty, properties: IndexMap::new() }
    }

    pub fn name(&self) -> &str {
        self.ty.name()
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Adds `property` unless one with the same name exists; returns whether it was added.
    pub fn add_property(&mut self, property: PropertyDefinition) -> bool {
        if self.properties.contains_key(&property.name) {
            return false;
        }
        self.properties.insert(property.name.clone(), property);
        true
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.properties.values()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl ApiDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_class_type(&self, ty: &ApiClassType) -> bool {
        self.classes.contains_key(ty.name())
    }

    /// Registers `definition` unless its name is already taken; existing
    /// definitions are never replaced. Returns whether it was added.
    pub fn add_class_definition(&mut self, definition: ClassDefinition) -> bool {
        if self.classes.contains_key(definition.name()) {
            return false;
        }
        self.classes.insert(definition.name().to_string(), definition);
        true
    }

    pub fn class_definition(&self, ty: &ApiClassType) -> Option<&ClassDefinition> {
        self.classes.get(ty.name())
    }

    pub fn class_definition_mut(&mut self, ty: &ApiClassType) -> Option<&mut ClassDefinition> {
        self.classes.get_mut(ty.name())
    }

    pub fn class_definitions(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.values()
    }

    pub fn class_definition_count(&self) -> usize {
        self.classes.len()
    }

    pub fn add_black_box(&mut self, ty: ApiBlackBoxType) {
        self.black_boxes.insert(ty);
    }

    pub fn black_boxes(&self) -> impl Iterator<Item = &ApiBlackBoxType> {
        self.black_boxes.iter()
    }

    pub fn black_box_count(&self) -> usize {
        self.black_boxes.len()
    }
}

// ------------------------------- Display ---------------------------------- //

impl fmt::Display for ApiPrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApiPrimitiveType::String => "string",
            ApiPrimitiveType::Number => "number",
            ApiPrimitiveType::Boolean => "boolean",
            ApiPrimitiveType::Any => "any",
            ApiPrimitiveType::Void => "void",
        })
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiType::Primitive(p) => write!(f, "{p}"),
            ApiType::Array(element) => write!(f, "{element}[]"),
            ApiType::Dictionary { key, value } => write!(f, "Dictionary<{key}, {value}>"),
            ApiType::Class(class) => f.write_str(class.name()),
            ApiType::BlackBox(black_box) => f.write_str(black_box.name()),
        }
    }
}

// ------------------------------ Serialize --------------------------------- //
// Types go out as their display form; downstream emitters only need the text.

impl Serialize for ApiType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for PropertyDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("PropertyDefinition", 2)?;
        st.serialize_field("name", &self.name)?;
        st.serialize_field("type", &self.ty)?;
        st.end()
    }
}

impl Serialize for ClassDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let properties: Vec<&PropertyDefinition> = self.properties().collect();
        let mut st = serializer.serialize_struct("ClassDefinition", 2)?;
        st.serialize_field("name", self.name())?;
        st.serialize_field("properties", &properties)?;
        st.end()
    }
}

impl Serialize for ApiDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let classes: Vec<&ClassDefinition> = self.class_definitions().collect();
        let black_boxes: Vec<&str> = self.black_boxes().map(ApiBlackBoxType::name).collect();
        let mut st = serializer.serialize_struct("ApiDefinition", 2)?;
        st.serialize_field("classes", &classes)?;
        st.serialize_field("blackBoxes", &black_boxes)?;
        st.end()
    }
}

// ------------------------------- Tests ------------------------------------ //
