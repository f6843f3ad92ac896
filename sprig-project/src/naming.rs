//! Identifier casing helpers.

/// Convert a camelCase or PascalCase identifier to kebab-case
/// (e.g., "myShopPlugin" -> "my-shop-plugin")
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('-');
        }
        result.extend(c.to_lowercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("fooBar"), "foo-bar");
        assert_eq!(to_kebab_case("FooBar"), "foo-bar");
        assert_eq!(to_kebab_case("abc"), "abc");
        assert_eq!(to_kebab_case(""), "");
    }

    #[test]
    fn test_to_kebab_case_consecutive_capitals() {
        assert_eq!(to_kebab_case("myAPIPlugin"), "my-a-p-i-plugin");
    }
}
