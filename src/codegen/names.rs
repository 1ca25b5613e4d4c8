//! Java identifier handling
//!
//! Property names come straight out of schema documents and are used as JSON
//! keys verbatim; only the Java side needs sanitizing. A property named after
//! a Java keyword keeps its wire key and gets an underscore-prefixed field.

/// Reserved words that cannot be used as Java identifiers, including the
/// three literals.
pub const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char",
    "class", "const", "continue", "default", "do", "double", "else", "enum",
    "extends", "final", "finally", "float", "for", "goto", "if", "implements",
    "import", "instanceof", "int", "interface", "long", "native", "new",
    "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null",
];

pub fn is_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

pub fn escape_keyword(name: &str) -> String {
    if is_keyword(name) {
        format!("_{}", name)
    } else {
        name.to_string()
    }
}

/// Derive the Java field name for a JSON property key.
pub fn field_name(property: &str) -> String {
    let mut sanitized = String::with_capacity(property.len());
    for c in property.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
            sanitized.push(c);
        } else {
            sanitized.push('_');
        }
    }
    if sanitized.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(true) {
        sanitized.insert(0, '_');
    }
    escape_keyword(&sanitized)
}

pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

pub fn getter_name(field: &str) -> String {
    format!("get{}", capitalize_first(field))
}

pub fn setter_name(field: &str) -> String {
    format!("set{}", capitalize_first(field))
}

/// Split a fully-qualified name into package and simple name.
pub fn split_fqn(fqn: &str) -> (&str, &str) {
    match fqn.rsplit_once('.') {
        Some((package, simple)) => (package, simple),
        None => ("", fqn),
    }
}

/// Quote a string as a Java string literal.
pub fn java_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_escaping() {
        assert_eq!(field_name("class"), "_class");
        assert_eq!(field_name("default"), "_default");
        assert_eq!(field_name("true"), "_true");
        assert_eq!(field_name("name"), "name");
    }

    #[test]
    fn test_invalid_characters_sanitized() {
        assert_eq!(field_name("content-type"), "content_type");
        assert_eq!(field_name("a.b"), "a_b");
        assert_eq!(field_name("with space"), "with_space");
    }

    #[test]
    fn test_digit_prefix() {
        assert_eq!(field_name("2ndValue"), "_2ndValue");
        assert_eq!(field_name(""), "_");
    }

    #[test]
    fn test_accessor_names() {
        assert_eq!(getter_name("name"), "getName");
        assert_eq!(setter_name("name"), "setName");
        assert_eq!(getter_name("_class"), "get_class");
    }

    #[test]
    fn test_split_fqn() {
        assert_eq!(
            split_fqn("org.example.Pet"),
            ("org.example", "Pet")
        );
        assert_eq!(split_fqn("Pet"), ("", "Pet"));
    }

    #[test]
    fn test_string_literal_quoting() {
        assert_eq!(java_string_literal("plain"), "\"plain\"");
        assert_eq!(java_string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(java_string_literal("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(java_string_literal("back\\slash"), "\"back\\\\slash\"");
    }
}
