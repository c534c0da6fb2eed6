//! Human-readable view of an [`ApiDefinition`].
use std::fmt::Write;

use colored::Colorize;

use crate::api::ApiDefinition;

pub fn render_outline(api: &ApiDefinition, colorize: bool) -> String {
    let paint = |text: &str, f: fn(&str) -> colored::ColoredString| {
        if colorize { f(text).to_string() } else { text.to_string() }
    };

    let mut out = String::new();
    for class in api.class_definitions() {
        let _ = writeln!(out, "{} {} {{", paint("class", |s| s.blue().bold()), paint(class.name(), |s| s.bold()));
        for property in class.properties() {
            let ty = property.ty.to_string();
            let _ = writeln!(out, "    {}: {}", property.name, paint(&ty, |s| s.green()));
        }
        out.push_str("}\n");
    }
    for black_box in api.black_boxes() {
        let _ = writeln!(out, "{} {}", paint("blackbox", |s| s.magenta().bold()), black_box.name());
    }
    out
}
