//! Host type graph: the reflected Java-ish types we translate from.
//!
//! Every node is plain data (serde in/out) so a whole type universe can be
//! described in JSON. Well-known names are recognized by predicate rather than
//! by dedicated variants; the graph itself stays open to any class name.
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// A class or interface reference without generic arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BasicType {
    pub name: String,
}

/// Generic type variable (`T`), resolved through a [`TypeSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeVariable(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JavaType {
    Array {
        element: Box<JavaType>,
    },
    Basic(BasicType),
    Parameterized {
        base: BasicType,
        #[serde(default)]
        arguments: Vec<JavaType>,
    },
    Variable {
        name: TypeVariable,
    },
    /// `? extends U` / `? super L`. Only the lower bound takes part in translation.
    Wildcard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper_bound: Option<Box<JavaType>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower_bound: Option<Box<JavaType>>,
    },
    InnerClass {
        outer: Box<JavaType>,
        name: String,
    },
}

/// Bounds context: type variable → declared upper bounds, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeSchema {
    bounds: IndexMap<String, Vec<JavaType>>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

const PRIMITIVE_NUMBERS: [&str; 6] = ["byte", "short", "int", "long", "float", "double"];

impl BasicType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
    pub fn is_string(&self) -> bool {
        self.name == "java.lang.String"
    }
    pub fn is_boolean(&self) -> bool {
        self.name == "boolean" || self.name == "java.lang.Boolean"
    }
    pub fn is_object(&self) -> bool {
        self.name == "java.lang.Object"
    }
    pub fn is_void(&self) -> bool {
        self.name == "void" || self.name == "java.lang.Void"
    }
    pub fn is_primitive_number(&self) -> bool {
        PRIMITIVE_NUMBERS.contains(&self.name.as_str())
    }
}

impl TypeVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl JavaType {
    pub fn basic(name: impl Into<String>) -> Self {
        JavaType::Basic(BasicType::new(name))
    }
    pub fn array(element: JavaType) -> Self {
        JavaType::Array { element: Box::new(element) }
    }
    pub fn parameterized(base: impl Into<String>, arguments: Vec<JavaType>) -> Self {
        JavaType::Parameterized { base: BasicType::new(base), arguments }
    }
    pub fn variable(name: impl Into<String>) -> Self {
        JavaType::Variable { name: TypeVariable::new(name) }
    }
    /// Unbounded `?`.
    pub fn wildcard() -> Self {
        JavaType::Wildcard { upper_bound: None, lower_bound: None }
    }
    pub fn wildcard_extends(upper: JavaType) -> Self {
        JavaType::Wildcard { upper_bound: Some(Box::new(upper)), lower_bound: None }
    }
    pub fn wildcard_super(lower: JavaType) -> Self {
        JavaType::Wildcard { upper_bound: None, lower_bound: Some(Box::new(lower)) }
    }
    pub fn inner_class(outer: JavaType, name: impl Into<String>) -> Self {
        JavaType::InnerClass { outer: Box::new(outer), name: name.into() }
    }

    /// The raw class this type erases to, if it has one.
    pub fn to_basic_type(&self) -> Option<&BasicType> {
        match self {
            JavaType::Basic(basic) => Some(basic),
            JavaType::Parameterized { base, .. } => Some(base),
            _ => None,
        }
    }
}

impl TypeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared bounds of `var`; empty when the variable is unbound here.
    pub fn type_bounds(&self, var: &TypeVariable) -> &[JavaType] {
        self.bounds.get(var.name()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_type_bounds(&mut self, var: TypeVariable, bounds: Vec<JavaType>) {
        self.bounds.insert(var.0, bounds);
    }

    pub fn with_type_bounds(mut self, var: impl Into<String>, bounds: Vec<JavaType>) -> Self {
        self.set_type_bounds(TypeVariable::new(var), bounds);
        self
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Array { element } => write!(f, "{element}[]"),
            JavaType::Basic(basic) => write!(f, "{basic}"),
            JavaType::Parameterized { base, arguments } => {
                write!(f, "{base}<")?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            JavaType::Variable { name } => write!(f, "{name}"),
            JavaType::Wildcard { upper_bound, lower_bound } => match (lower_bound, upper_bound) {
                (Some(lower), _) => write!(f, "? super {lower}"),
                (None, Some(upper)) => write!(f, "? extends {upper}"),
                (None, None) => f.write_str("?"),
            },
            JavaType::InnerClass { outer, name } => write!(f, "{outer}.{name}"),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
