//! Class metadata oracle.
//!
//! The translator never looks at class files itself; it asks a
//! [`ClassMetadataSource`] whether a type behaves like a collection, a map or
//! a number, and for the reflected members of a class.
use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::graph::{BasicType, JavaType, TypeSchema, TypeVariable};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Structural classification, independent of the concrete implementation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ListLike,
    MapLike,
    Numeric,
}

pub trait ClassMetadataSource {
    fn is_assignable_to(&self, ty: &BasicType, capability: Capability) -> bool;

    fn is_numeric(&self, ty: &BasicType) -> bool {
        ty.is_primitive_number() || self.is_assignable_to(ty, Capability::Numeric)
    }

    fn find_class(&self, ty: &BasicType) -> Option<&ClassMetadata>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<JavaType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<JavaType>,
    #[serde(default)]
    pub interfaces: Vec<JavaType>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub fields: Vec<FieldMetadata>,
    #[serde(default)]
    pub methods: Vec<MethodMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: JavaType,
    #[serde(default = "yes")]
    pub public: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodMetadata {
    pub name: String,
    pub return_type: JavaType,
    #[serde(default)]
    pub parameters: Vec<JavaType>,
    #[serde(default = "yes")]
    pub public: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub annotations: Vec<String>,
}

/// In-memory oracle over a set of known classes.
#[derive(Debug, Clone, Default)]
pub struct ClassMetadataCollection {
    classes: IndexMap<String, ClassMetadata>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

fn yes() -> bool { true }

/// Direct supertypes of JDK classes that usually are not part of a scanned universe.
const JDK_HIERARCHY: &[(&str, &[&str])] = &[
    ("java.util.List", &["java.util.Collection"]),
    ("java.util.Set", &["java.util.Collection"]),
    ("java.util.Queue", &["java.util.Collection"]),
    ("java.util.Deque", &["java.util.Queue"]),
    ("java.util.SortedSet", &["java.util.Set"]),
    ("java.util.NavigableSet", &["java.util.SortedSet"]),
    ("java.util.AbstractCollection", &["java.util.Collection"]),
    ("java.util.AbstractList", &["java.util.AbstractCollection", "java.util.List"]),
    ("java.util.ArrayList", &["java.util.AbstractList"]),
    ("java.util.LinkedList", &["java.util.AbstractList", "java.util.Deque"]),
    ("java.util.HashSet", &["java.util.AbstractCollection", "java.util.Set"]),
    ("java.util.LinkedHashSet", &["java.util.HashSet"]),
    ("java.util.TreeSet", &["java.util.AbstractCollection", "java.util.NavigableSet"]),
    ("java.util.ArrayDeque", &["java.util.AbstractCollection", "java.util.Deque"]),
    ("java.util.EnumSet", &["java.util.AbstractCollection", "java.util.Set"]),
    ("java.util.SortedMap", &["java.util.Map"]),
    ("java.util.NavigableMap", &["java.util.SortedMap"]),
    ("java.util.AbstractMap", &["java.util.Map"]),
    ("java.util.HashMap", &["java.util.AbstractMap"]),
    ("java.util.LinkedHashMap", &["java.util.HashMap"]),
    ("java.util.TreeMap", &["java.util.AbstractMap", "java.util.NavigableMap"]),
    ("java.util.EnumMap", &["java.util.AbstractMap"]),
    ("java.util.concurrent.ConcurrentMap", &["java.util.Map"]),
    ("java.util.concurrent.ConcurrentHashMap", &["java.util.AbstractMap", "java.util.concurrent.ConcurrentMap"]),
    ("java.lang.Byte", &["java.lang.Number"]),
    ("java.lang.Short", &["java.lang.Number"]),
    ("java.lang.Integer", &["java.lang.Number"]),
    ("java.lang.Long", &["java.lang.Number"]),
    ("java.lang.Float", &["java.lang.Number"]),
    ("java.lang.Double", &["java.lang.Number"]),
    ("java.math.BigInteger", &["java.lang.Number"]),
    ("java.math.BigDecimal", &["java.lang.Number"]),
    ("java.util.concurrent.atomic.AtomicInteger", &["java.lang.Number"]),
    ("java.util.concurrent.atomic.AtomicLong", &["java.lang.Number"]),
];

static JDK_SUPERTYPES: Lazy<HashMap<&str, &[&str]>> = Lazy::new(|| JDK_HIERARCHY.iter().copied().collect());

impl Capability {
    /// The type every member of this capability is assignable to.
    pub fn root_type(self) -> &'static str {
        match self {
            Capability::ListLike => "java.util.Collection",
            Capability::MapLike => "java.util.Map",
            Capability::Numeric => "java.lang.Number",
        }
    }
}

impl ClassMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            interfaces: Vec::new(),
            type_parameters: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldMetadata) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodMetadata) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_superclass(mut self, superclass: JavaType) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn with_interface(mut self, interface: JavaType) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_type_parameter(mut self, name: impl Into<String>, bounds: Vec<JavaType>) -> Self {
        self.type_parameters.push(TypeParameter { name: name.into(), bounds });
        self
    }

    pub fn public_fields(&self) -> impl Iterator<Item = &FieldMetadata> {
        self.fields.iter().filter(|f| f.public)
    }

    pub fn public_methods(&self) -> impl Iterator<Item = &MethodMetadata> {
        self.methods.iter().filter(|m| m.public)
    }

    /// Bounds context for the class's declared type parameters.
    pub fn type_schema(&self) -> TypeSchema {
        let mut schema = TypeSchema::new();
        for param in &self.type_parameters {
            schema.set_type_bounds(TypeVariable::new(param.name.clone()), param.bounds.clone());
        }
        schema
    }

    fn supertypes(&self) -> impl Iterator<Item = &BasicType> {
        self.superclass
            .iter()
            .chain(self.interfaces.iter())
            .filter_map(JavaType::to_basic_type)
    }
}

impl FieldMetadata {
    pub fn new(name: impl Into<String>, ty: JavaType) -> Self {
        Self { name: name.into(), ty, public: true, is_static: false, annotations: Vec::new() }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations.iter().any(|a| a == annotation)
    }
}

impl MethodMetadata {
    pub fn new(name: impl Into<String>, return_type: JavaType) -> Self {
        Self {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
            public: true,
            is_static: false,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations.iter().any(|a| a == annotation)
    }

    /// Bean accessor: `getX()` with any non-void return, or `isX()` returning
    /// primitive `boolean`. A boxed `Boolean` needs the `get` prefix.
    pub fn is_getter(&self) -> bool {
        if self.is_static || !self.parameters.is_empty() {
            return false;
        }
        let returns = self.return_type.to_basic_type();
        if returns.is_some_and(BasicType::is_void) {
            return false;
        }
        if has_accessor_prefix(&self.name, "get") {
            return true;
        }
        has_accessor_prefix(&self.name, "is") && returns.is_some_and(|t| t.name == "boolean")
    }
}

/// `prefix` followed by at least one character that starts a property name.
fn has_accessor_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| !c.is_lowercase())
}

impl ClassMetadataCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later definitions of the same class replace earlier ones.
    pub fn add_class(&mut self, class: ClassMetadata) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Declared supertypes plus the built-in JDK ones, so a document that
    /// redescribes a JDK class cannot hide its collection or number ancestry.
    fn direct_supertypes(&self, name: &str) -> Vec<&str> {
        let declared = self
            .classes
            .get(name)
            .into_iter()
            .flat_map(ClassMetadata::supertypes)
            .map(|t| t.name.as_str());
        let builtin = JDK_SUPERTYPES.get(name).into_iter().flat_map(|xs| xs.iter().copied());
        declared.chain(builtin).collect()
    }
}

impl FromIterator<ClassMetadata> for ClassMetadataCollection {
    fn from_iter<I: IntoIterator<Item = ClassMetadata>>(iter: I) -> Self {
        let mut out = Self::new();
        for class in iter {
            out.add_class(class);
        }
        out
    }
}

impl ClassMetadataSource for ClassMetadataCollection {
    fn is_assignable_to(&self, ty: &BasicType, capability: Capability) -> bool {
        let root = capability.root_type();
        let mut seen = HashSet::new();
        let mut pending = vec![ty.name.as_str()];
        while let Some(name) = pending.pop() {
            if name == root {
                return true;
            }
            if seen.insert(name) {
                pending.extend(self.direct_supertypes(name));
            }
        }
        false
    }

    fn find_class(&self, ty: &BasicType) -> Option<&ClassMetadata> {
        self.classes.get(&ty.name)
    }
}

// ------------------------------- Tests ------------------------------------ //
