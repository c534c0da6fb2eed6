//! Host type graph → API model.
//!
//! One [`TypeTranslator`] is one session: it owns the only mutable borrow of
//! the [`ApiDefinition`] it fills. Collections and maps are reduced to
//! structural array/dictionary shapes, every other class becomes a named
//! definition registered on first sight.
//!
//! Two simplifications are intentional and kept as policy:
//! - a type variable resolves through its *first* declared bound only;
//! - when a getter names a property a field already contributed, the field's
//!   type is kept without comparing the two.
//!
//! A type variable whose bound mentions itself (`T extends List<T>`) resolves
//! to `any` on re-entry.
use tracing::{debug, trace};

use crate::api::{ApiBlackBoxType, ApiClassType, ApiDefinition, ApiType, ClassDefinition, PropertyDefinition};
use crate::error::TranslationError;
use crate::graph::{BasicType, JavaType, TypeSchema, TypeVariable};
use crate::metadata::{Capability, ClassMetadata, ClassMetadataSource};
use crate::names::{property_name_for_getter, translate_class_name};
use crate::settings::TranslationSettings;

pub type Result<T> = std::result::Result<T, TranslationError>;

pub struct TypeTranslator<'a, C: ?Sized> {
    settings: &'a TranslationSettings,
    classes: &'a C,
    api: &'a mut ApiDefinition,
    /// Type variables whose bound is being translated in the current class scope.
    resolving: Vec<TypeVariable>,
}

impl<'a, C: ClassMetadataSource + ?Sized> TypeTranslator<'a, C> {
    pub fn new(settings: &'a TranslationSettings, classes: &'a C, api: &'a mut ApiDefinition) -> Self {
        Self { settings, classes, api, resolving: Vec::new() }
    }

    pub fn translate(&mut self, ty: &JavaType, schema: &TypeSchema) -> Result<ApiType> {
        match ty {
            JavaType::Array { element } => Ok(ApiType::array(self.translate(element, schema)?)),
            JavaType::Basic(basic) => self.translate_basic(basic),
            JavaType::Parameterized { base, arguments } => self.translate_parameterized(base, arguments, schema),
            JavaType::Variable { name } => match schema.type_bounds(name).first() {
                Some(_) if self.resolving.contains(name) => {
                    trace!(variable = %name, "recursive bound, translating as any");
                    Ok(ApiType::ANY)
                }
                Some(bound) => {
                    self.resolving.push(name.clone());
                    let result = self.translate(bound, schema);
                    self.resolving.pop();
                    result
                }
                None => Ok(ApiType::ANY),
            },
            JavaType::Wildcard { lower_bound, .. } => match lower_bound {
                Some(lower) => self.translate(lower, schema),
                None => Ok(ApiType::ANY),
            },
            JavaType::InnerClass { .. } => Err(TranslationError::UnsupportedConstruct { ty: ty.to_string() }),
        }
    }

    fn translate_basic(&mut self, ty: &BasicType) -> Result<ApiType> {
        if self.classes.is_assignable_to(ty, Capability::ListLike) {
            Ok(ApiType::array(ApiType::ANY))
        } else if self.classes.is_assignable_to(ty, Capability::MapLike) {
            Ok(ApiType::dictionary(ApiType::ANY, ApiType::ANY))
        } else if ty.is_string() {
            Ok(ApiType::STRING)
        } else if self.classes.is_numeric(ty) {
            Ok(ApiType::NUMBER)
        } else if ty.is_boolean() {
            Ok(ApiType::BOOLEAN)
        } else if ty.is_object() {
            Ok(ApiType::ANY)
        } else if ty.is_void() {
            Ok(ApiType::VOID)
        } else {
            self.translate_class_type(ty)
        }
    }

    /// Only list-like and map-like generics are specialized; anything else
    /// (including an arity mismatch) erases to its raw base type.
    fn translate_parameterized(&mut self, base: &BasicType, arguments: &[JavaType], schema: &TypeSchema) -> Result<ApiType> {
        match arguments {
            [element] if self.classes.is_assignable_to(base, Capability::ListLike) => {
                Ok(ApiType::array(self.translate(element, schema)?))
            }
            [key, value] if self.classes.is_assignable_to(base, Capability::MapLike) => {
                let key = self.translate(key, schema)?;
                let value = self.translate(value, schema)?;
                Ok(ApiType::dictionary(key, value))
            }
            _ => self.translate_basic(base),
        }
    }

    fn translate_class_type(&mut self, ty: &BasicType) -> Result<ApiType> {
        let translated_name = translate_class_name(&ty.name);

        if self.settings.is_black_box_class(&ty.name) {
            debug!(class = %ty.name, "translating as black box");
            let black_box = ApiBlackBoxType::new(translated_name);
            self.api.add_black_box(black_box.clone());
            return Ok(ApiType::BlackBox(black_box));
        }

        let class_type = ApiClassType::new(translated_name);

        if !self.api.contains_class_type(&class_type) {
            // Register before looking at members: a property that leads back
            // here must find the definition and stop.
            self.api.add_class_definition(ClassDefinition::new(class_type.clone()));
            debug!(class = %ty.name, name = class_type.name(), "registered class definition");

            let classes = self.classes;
            match classes.find_class(ty) {
                Some(class) => {
                    // Members live in their own bounds scope.
                    let outer = std::mem::take(&mut self.resolving);
                    let result = self.init_class_definition(&class_type, class);
                    self.resolving = outer;
                    result?
                }
                None => debug!(class = %ty.name, "no metadata for class, leaving definition empty"),
            }
        }

        Ok(ApiType::Class(class_type))
    }

    fn init_class_definition(&mut self, class_type: &ApiClassType, class: &ClassMetadata) -> Result<()> {
        let schema = class.type_schema();
        let settings = self.settings;
        let ignore = settings.ignore_annotation();

        let fields = class
            .public_fields()
            .filter(|f| !f.is_static && !f.has_annotation(ignore));
        for field in fields {
            let ty = self.translate(&field.ty, &schema)?;
            self.add_property(class_type, PropertyDefinition::new(field.name.clone(), ty));
        }

        let getters = class
            .public_methods()
            .filter(|m| m.is_getter() && !m.has_annotation(ignore));
        for method in getters {
            let Some(name) = property_name_for_getter(&method.name) else {
                continue;
            };
            let ty = self.translate(&method.return_type, &schema)?;
            // A public field may already have contributed this property.
            if self.has_property(class_type, &name) {
                trace!(class = class_type.name(), property = %name, "getter shadowed by field");
                continue;
            }
            self.add_property(class_type, PropertyDefinition::new(name, ty));
        }

        Ok(())
    }

    fn has_property(&self, class_type: &ApiClassType, name: &str) -> bool {
        self.api
            .class_definition(class_type)
            .is_some_and(|def| def.has_property(name))
    }

    fn add_property(&mut self, class_type: &ApiClassType, property: PropertyDefinition) {
        if let Some(def) = self.api.class_definition_mut(class_type) {
            def.add_property(property);
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
