//! Name derivation for generated artifacts.

/// Convert a string to PascalCase (e.g., "to_lower" -> "ToLower").
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-'])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to snake_case (e.g., "ToLower" -> "to_lower").
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result.replace('-', "_")
}

/// Convert a string to kebab-case (e.g., "UserProfiles" -> "user-profiles").
/// Used for per-service output subdirectories.
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

/// Receiver type name of a service's implementation scaffold,
/// e.g. `Strings` -> `StringsImplementation`. The declaration oracle
/// gates the scaffold on this exact name.
pub fn impl_type_name(service: &str) -> String {
    format!("{}Implementation", to_pascal_case(service))
}

/// Base file name (no extension) of a stub: the service's snake-case name,
/// joined with the method's when a method stub is being emitted.
pub fn impl_file_name(service: &str, method: Option<&str>) -> String {
    match method {
        Some(method) => format!("{}_{}", to_snake_case(service), to_snake_case(method)),
        None => to_snake_case(service),
    }
}

/// File name of the always-regenerated binding artifact for `base`.
pub fn binding_file_name(base: &str) -> String {
    format!("{base}.pb.gantry.go")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("to_lower"), "ToLower");
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("user-profiles"), "UserProfiles");
        assert_eq!(to_pascal_case("AlreadyPascal"), "AlreadyPascal");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("ToLower"), "to_lower");
        assert_eq!(to_snake_case("Strings"), "strings");
        assert_eq!(to_snake_case("hello-world"), "hello_world");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("UserProfiles"), "user-profiles");
        assert_eq!(to_kebab_case("Strings"), "strings");
    }

    #[test]
    fn test_impl_names() {
        assert_eq!(impl_type_name("Strings"), "StringsImplementation");
        assert_eq!(impl_file_name("Strings", None), "strings");
        assert_eq!(impl_file_name("Strings", Some("ToLower")), "strings_to_lower");
    }

    #[test]
    fn test_binding_file_name() {
        assert_eq!(binding_file_name("strings"), "strings.pb.gantry.go");
    }
}
