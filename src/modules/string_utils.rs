use crate::core::namespace::{Namespace, NamespaceBuilder};
use crate::domain::model::Value;
use crate::utils::error::Result;

pub const ID: &str = "utilities.string_utils";

pub fn namespace() -> Result<Namespace> {
    NamespaceBuilder::module(ID)
        .doc("String helpers")
        .function("reverse_string", 1, "Reverse a string", |args| {
            Ok(Value::Str(reverse_string(args[0].as_str("reverse_string")?)))
        })
        .function("capitalize_words", 1, "Capitalize each word in a string", |args| {
            Ok(Value::Str(capitalize_words(args[0].as_str("capitalize_words")?)))
        })
        .build()
}

pub fn reverse_string(s: &str) -> String {
    s.chars().rev().collect()
}

/// Splits on whitespace, upper-cases the first character of each word and
/// lower-cases the rest, then joins with single spaces.
pub fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_string() {
        assert_eq!(reverse_string("Hello World"), "dlroW olleH");
        assert_eq!(reverse_string(""), "");
        assert_eq!(reverse_string("añb"), "bña");
    }

    #[test]
    fn test_reverse_round_trip() {
        for s in ["", "a", "Hello World", "日本語 text", "  spaced  "] {
            assert_eq!(reverse_string(&reverse_string(s)), s);
        }
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("hello python world"), "Hello Python World");
        assert_eq!(capitalize_words("hELLO   wORLD"), "Hello World");
        assert_eq!(capitalize_words("  leading and trailing  "), "Leading And Trailing");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn test_namespace_rejects_non_strings() {
        let ns = namespace().unwrap();
        assert!(ns.call("reverse_string", &[Value::Int(12)]).is_err());
        assert_eq!(
            ns.call("reverse_string", &[Value::from("abc")]).unwrap(),
            Value::from("cba")
        );
    }
}
