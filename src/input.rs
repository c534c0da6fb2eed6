//! Type universe documents: the JSON the CLI feeds into a translation run.
//!
//! ```json
//! {
//!   "classes": [{ "name": "com.example.Point", "fields": [{ "name": "x", "type": { "kind": "basic", "name": "int" } }] }],
//!   "roots":   [{ "kind": "basic", "name": "com.example.Point" }],
//!   "bounds":  { "T": [{ "kind": "basic", "name": "java.lang.Number" }] }
//! }
//! ```
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::ApiDefinition;
use crate::graph::{JavaType, TypeSchema};
use crate::metadata::{ClassMetadata, ClassMetadataCollection};
use crate::settings::TranslationSettings;
use crate::translator::TypeTranslator;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDocument {
    #[serde(default)]
    pub classes: Vec<ClassMetadata>,
    /// Types to translate, in order.
    #[serde(default)]
    pub roots: Vec<JavaType>,
    /// Bounds context the roots are translated against.
    #[serde(default)]
    pub bounds: TypeSchema,
}

#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub document: TypeDocument,
}

/// All documents of one run, with their classes merged into one oracle.
#[derive(Debug, Clone, Default)]
pub struct TypeUniverse {
    pub classes: ClassMetadataCollection,
    pub documents: Vec<SourceDocument>,
}

impl TypeUniverse {
    pub fn merge(documents: Vec<SourceDocument>) -> Self {
        let classes = documents
            .iter()
            .flat_map(|source| source.document.classes.iter().cloned())
            .collect();
        Self { classes, documents }
    }

    pub fn root_count(&self) -> usize {
        self.documents.iter().map(|d| d.document.roots.len()).sum()
    }

    /// Translate every root in one session; the first failure aborts the run.
    pub fn translate(&self, settings: &TranslationSettings) -> Result<ApiDefinition> {
        let mut api = ApiDefinition::new();
        let mut translator = TypeTranslator::new(settings, &self.classes, &mut api);
        for source in &self.documents {
            for root in &source.document.roots {
                let ty = translator
                    .translate(root, &source.document.bounds)
                    .with_context(|| format!("failed to translate `{root}` from {}", source.path.display()))?;
                debug!(root = %root, api_type = %ty, "translated root");
            }
        }
        info!(
            classes = api.class_definition_count(),
            black_boxes = api.black_box_count(),
            "translation finished"
        );
        Ok(api)
    }
}

pub fn load_document(path: &Path) -> Result<SourceDocument> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))?;
    let document = crate::path_de::from_str_with_path::<TypeDocument>(&source)
        .with_context(|| format!("failed to parse type document {}", path.display()))?;
    debug!(
        path = %path.display(),
        classes = document.classes.len(),
        roots = document.roots.len(),
        "loaded type document"
    );
    Ok(SourceDocument { path: path.to_path_buf(), document })
}

pub fn load_documents<I>(paths: I) -> Result<Vec<SourceDocument>>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    paths.into_iter().map(|p| load_document(p.as_ref())).collect()
}

pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            let entries = glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
            for entry in entries {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                return Err(anyhow!("glob pattern matched no files: {pattern}"));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClassType, ApiType};

    fn document(value: serde_json::Value) -> TypeDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn merges_classes_across_documents() {
        let a = document(serde_json::json!({
            "classes": [{
                "name": "com.example.Order",
                "fields": [{ "name": "customer", "type": { "kind": "basic", "name": "com.example.Customer" } }]
            }],
            "roots": [{ "kind": "basic", "name": "com.example.Order" }]
        }));
        let b = document(serde_json::json!({
            "classes": [{
                "name": "com.example.Customer",
                "fields": [{ "name": "name", "type": { "kind": "basic", "name": "java.lang.String" } }]
            }]
        }));
        let universe = TypeUniverse::merge(vec![
            SourceDocument { path: "a.json".into(), document: a },
            SourceDocument { path: "b.json".into(), document: b },
        ]);
        assert_eq!(universe.classes.len(), 2);
        assert_eq!(universe.root_count(), 1);

        let api = universe.translate(&TranslationSettings::default()).unwrap();
        let customer = api.class_definition(&ApiClassType::new("Customer")).unwrap();
        assert_eq!(customer.property("name").map(|p| &p.ty), Some(&ApiType::STRING));
    }

    #[test]
    fn roots_use_document_bounds() {
        let doc = document(serde_json::json!({
            "classes": [{
                "name": "com.example.Page",
                "fields": [{ "name": "total", "type": { "kind": "basic", "name": "long" } }]
            }],
            "roots": [{ "kind": "variable", "name": "P" }],
            "bounds": { "P": [{ "kind": "basic", "name": "com.example.Page" }] }
        }));
        let universe = TypeUniverse::merge(vec![SourceDocument { path: "p.json".into(), document: doc }]);
        let api = universe.translate(&TranslationSettings::default()).unwrap();
        assert!(api.contains_class_type(&ApiClassType::new("Page")));
    }

    #[test]
    fn translation_errors_name_the_root_and_file() {
        let doc = document(serde_json::json!({
            "roots": [{ "kind": "inner_class", "outer": { "kind": "basic", "name": "com.example.Outer" }, "name": "Inner" }]
        }));
        let universe = TypeUniverse::merge(vec![SourceDocument { path: "bad.json".into(), document: doc }]);
        let err = format!("{:#}", universe.translate(&TranslationSettings::default()).unwrap_err());
        assert!(err.contains("com.example.Outer.Inner"), "{err}");
        assert!(err.contains("bad.json"), "{err}");
        assert!(err.contains("not supported"), "{err}");
    }

    #[test]
    fn unknown_document_keys_are_rejected() {
        assert!(serde_json::from_str::<TypeDocument>(r#"{ "types": [] }"#).is_err());
    }

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["does/not/exist.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("does/not/exist.json")]);
    }
}
