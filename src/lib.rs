//! Translate a reflected, Java-style type graph into a small API type model
//! (primitives, arrays, dictionaries, named classes, black boxes) for code
//! generators.
pub mod api;
pub mod cli;
pub mod error;
pub mod graph;
pub mod input;
pub mod metadata;
pub mod names;
pub mod outline;
pub mod path_de;
pub mod settings;
pub mod translator;

pub use api::{ApiBlackBoxType, ApiClassType, ApiDefinition, ApiPrimitiveType, ApiType, ClassDefinition, PropertyDefinition};
pub use error::{ConfigError, TranslationError};
pub use graph::{BasicType, JavaType, TypeSchema, TypeVariable};
pub use metadata::{Capability, ClassMetadata, ClassMetadataCollection, ClassMetadataSource};
pub use settings::{TranslationConfig, TranslationSettings};
pub use translator::TypeTranslator;
