//! Custom Tera filters for naming Kubernetes objects.

use std::collections::HashMap;

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use tera::{Result, Value};

/// Kubernetes DNS-1123 labels are capped at 63 characters.
const DNS_LABEL_MAX_LEN: usize = 63;

pub(crate) fn snake_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("snake_case filter expects a string"))?;
    Ok(Value::String(s.to_snake_case()))
}

pub(crate) fn pascal_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("pascal_case filter expects a string"))?;
    Ok(Value::String(s.to_pascal_case()))
}

pub(crate) fn camel_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("camel_case filter expects a string"))?;
    Ok(Value::String(s.to_lower_camel_case()))
}

pub(crate) fn kebab_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("kebab_case filter expects a string"))?;
    Ok(Value::String(s.to_kebab_case()))
}

/// DNS-1123 label: only `[a-z0-9-]`, at most 63 characters, no leading or trailing hyphen.
///
/// Characters outside that set become a single hyphen. A value with no usable
/// characters at all is an error.
pub(crate) fn dns_label(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("dns_label filter expects a string"))?;

    let mut label = String::with_capacity(s.len());
    for c in s.to_kebab_case().chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            label.push(c);
        } else if !label.is_empty() && !label.ends_with('-') {
            label.push('-');
        }
    }
    // ASCII only from here, so byte truncation is safe.
    label.truncate(DNS_LABEL_MAX_LEN);
    let label = label.trim_matches('-');

    if label.is_empty() {
        return Err(tera::Error::msg(format!(
            "dns_label: '{s}' has no characters valid in a DNS label"
        )));
    }
    Ok(Value::String(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(filter: fn(&Value, &HashMap<String, Value>) -> Result<Value>, input: &str) -> String {
        let val = Value::String(input.to_string());
        let args = HashMap::new();
        filter(&val, &args).unwrap().as_str().unwrap().to_string()
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(apply(snake_case, "DatabaseCreds"), "database_creds");
        assert_eq!(apply(snake_case, "database-creds"), "database_creds");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(apply(pascal_case, "database_creds"), "DatabaseCreds");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(apply(camel_case, "database_creds"), "databaseCreds");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(apply(kebab_case, "DatabaseCreds"), "database-creds");
        assert_eq!(apply(kebab_case, "database_creds"), "database-creds");
    }

    #[test]
    fn test_dns_label_normalizes_separators() {
        assert_eq!(apply(dns_label, "Payments_API.prod"), "payments-api-prod");
    }

    #[test]
    fn test_dns_label_truncates() {
        let long = "a".repeat(62) + "_b";
        let label = apply(dns_label, &long);
        assert_eq!(label.len(), 62);
        assert!(!label.ends_with('-'));
    }

    #[test]
    fn test_dns_label_drops_non_ascii() {
        assert_eq!(apply(dns_label, "db-пароль-prod"), "db-prod");
        assert_eq!(apply(dns_label, "Café_Credentials"), "caf-credentials");
    }

    #[test]
    fn test_dns_label_long_multibyte_input() {
        let long = "ключ-".repeat(20) + "api";
        assert!(long.len() > DNS_LABEL_MAX_LEN);
        assert_eq!(apply(dns_label, &long), "api");

        let mixed = "é".repeat(40) + &"x".repeat(80);
        let label = apply(dns_label, &mixed);
        assert_eq!(label, "x".repeat(DNS_LABEL_MAX_LEN));
    }

    #[test]
    fn test_dns_label_without_valid_characters() {
        let val = Value::String("é".repeat(40));
        let args = HashMap::new();
        let err = dns_label(&val, &args).unwrap_err();
        assert!(err.to_string().contains("no characters valid"));
    }

    #[test]
    fn test_filter_rejects_non_string() {
        let val = Value::Number(42.into());
        let args = HashMap::new();
        assert!(kebab_case(&val, &args).is_err());
        assert!(dns_label(&val, &args).is_err());
    }
}
