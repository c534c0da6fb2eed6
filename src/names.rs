//! Naming conventions between Java names and output names.

/// Output name for a qualified class name: package dropped, `$` nesting flattened.
pub fn translate_class_name(qualified: &str) -> String {
    let simple = match qualified.rfind('.') {
        Some(idx) => &qualified[idx + 1..],
        None => qualified,
    };
    simple.replace('$', "_")
}

/// `getFooBar` → `fooBar`, `isEnabled` → `enabled`.
pub fn property_name_for_getter(getter: &str) -> Option<String> {
    let rest = getter
        .strip_prefix("get")
        .or_else(|| getter.strip_prefix("is"))
        .filter(|rest| !rest.is_empty())?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_drop_package() {
        assert_eq!(translate_class_name("com.example.Point"), "Point");
        assert_eq!(translate_class_name("Point"), "Point");
        assert_eq!(translate_class_name("com.example.Outer$Inner"), "Outer_Inner");
    }

    #[test]
    fn getter_names() {
        assert_eq!(property_name_for_getter("getName").as_deref(), Some("name"));
        assert_eq!(property_name_for_getter("getURL").as_deref(), Some("uRL"));
        assert_eq!(property_name_for_getter("isActive").as_deref(), Some("active"));
        assert_eq!(property_name_for_getter("get"), None);
        assert_eq!(property_name_for_getter("name"), None);
    }
}
