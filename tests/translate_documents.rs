use std::fs;

use serde_json::json;
use typebridge::input::{TypeUniverse, load_documents, resolve_file_path_patterns};
use typebridge::{TranslationConfig, TranslationSettings};

fn write_json(dir: &std::path::Path, name: &str, value: serde_json::Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn basic(name: &str) -> serde_json::Value {
    json!({ "kind": "basic", "name": name })
}

#[test]
fn glob_inputs_translate_into_one_model() {
    let dir = tempfile::tempdir().unwrap();

    write_json(dir.path(), "orders.json", json!({
        "classes": [{
            "name": "com.example.shop.Order",
            "fields": [
                { "name": "id", "type": basic("long") },
                { "name": "lines", "type": {
                    "kind": "parameterized",
                    "base": { "name": "java.util.List" },
                    "arguments": [basic("com.example.shop.OrderLine")]
                }},
                { "name": "customer", "type": basic("com.example.shop.Customer") },
                { "name": "INSTANCE_COUNT", "type": basic("int"), "static": true }
            ],
            "methods": [
                { "name": "getId", "return_type": basic("java.lang.String") },
                { "name": "isPaid", "return_type": basic("boolean") },
                { "name": "getRaw", "return_type": basic("com.example.raw.Payload") },
                { "name": "getInternal", "return_type": basic("java.lang.String"),
                  "annotations": ["com.fasterxml.jackson.annotation.JsonIgnore"] }
            ]
        }],
        "roots": [basic("com.example.shop.Order")]
    }));

    write_json(dir.path(), "lines.json", json!({
        "classes": [
            {
                "name": "com.example.shop.OrderLine",
                "fields": [
                    { "name": "order", "type": basic("com.example.shop.Order") },
                    { "name": "quantity", "type": basic("java.lang.Integer") },
                    { "name": "attributes", "type": {
                        "kind": "parameterized",
                        "base": { "name": "java.util.Map" },
                        "arguments": [basic("java.lang.String"), { "kind": "wildcard" }]
                    }}
                ]
            },
            {
                "name": "com.example.shop.Customer",
                "fields": [{ "name": "emails", "type": { "kind": "array", "element": basic("java.lang.String") } }]
            }
        ]
    }));

    let pattern = format!("{}/*.json", dir.path().display());
    let paths = resolve_file_path_patterns([pattern.as_str()]).unwrap();
    assert_eq!(paths.len(), 2);

    let universe = TypeUniverse::merge(load_documents(&paths).unwrap());
    let config = TranslationConfig {
        black_box_classes: vec![r"com\.example\.raw\..*".into()],
        ..TranslationConfig::default()
    };
    let settings = TranslationSettings::from_config(&config).unwrap();
    let api = universe.translate(&settings).unwrap();

    let model = serde_json::to_value(&api).unwrap();
    assert_eq!(
        model,
        json!({
            "classes": [
                { "name": "Order", "properties": [
                    { "name": "id", "type": "number" },
                    { "name": "lines", "type": "OrderLine[]" },
                    { "name": "customer", "type": "Customer" },
                    { "name": "paid", "type": "boolean" },
                    { "name": "raw", "type": "Payload" }
                ]},
                { "name": "OrderLine", "properties": [
                    { "name": "order", "type": "Order" },
                    { "name": "quantity", "type": "number" },
                    { "name": "attributes", "type": "Dictionary<string, any>" }
                ]},
                { "name": "Customer", "properties": [
                    { "name": "emails", "type": "string[]" }
                ]}
            ],
            "blackBoxes": ["Payload"]
        })
    );
}

#[test]
fn empty_glob_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = format!("{}/*.json", dir.path().display());
    let err = resolve_file_path_patterns([pattern.as_str()]).unwrap_err();
    assert!(err.to_string().contains("matched no files"));
}

#[test]
fn malformed_document_reports_file_and_json_path() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "broken.json", json!({
        "classes": [{ "name": "com.example.A", "fields": [{ "name": "x", "type": basic("int"), "static": "yes" }] }]
    }));
    let err = load_documents([dir.path().join("broken.json")]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("broken.json"), "{message}");
    assert!(message.contains("classes[0].fields[0].static"), "{message}");
}
