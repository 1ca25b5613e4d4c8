//! `hashCode` and `equals` emission
//!
//! Every generated field is a boxed type, so one null-guarded pattern covers
//! all of them. A class with a superclass seeds `hashCode` from
//! `super.hashCode()` and lets `super.equals` stand in for the null check.

use crate::error::Result;
use crate::model::{JavaClass, JavaMethod, JavaType};

use super::HashAndEqualsHandler;

pub struct NullSafeEqualityHandler;

impl HashAndEqualsHandler for NullSafeEqualityHandler {
    fn add_hash_and_equals(&self, class: &mut JavaClass) -> Result<()> {
        let hash = build_hash_code(class);
        let equals = build_equals(class);
        class.methods.push(hash);
        class.methods.push(equals);
        Ok(())
    }
}

fn build_hash_code(class: &JavaClass) -> JavaMethod {
    let mut body = vec!["final int prime = 31;".to_string()];
    if class.extends.is_some() {
        body.push("int result = super.hashCode();".to_string());
    } else {
        body.push("int result = 1;".to_string());
    }
    for field in &class.fields {
        body.push(format!(
            "result = prime * result + (({name} == null) ? 0 : {name}.hashCode());",
            name = field.name
        ));
    }
    body.push("return result;".to_string());

    let mut method = JavaMethod::new("public", Some(JavaType::Primitive("int")), "hashCode");
    method.annotations.push("@Override".to_string());
    method.body = Some(body);
    method
}

fn build_equals(class: &JavaClass) -> JavaMethod {
    let mut body = vec![
        "if (this == obj) {".to_string(),
        "    return true;".to_string(),
        "}".to_string(),
    ];
    if class.extends.is_some() {
        body.push("if (!super.equals(obj)) {".to_string());
        body.push("    return false;".to_string());
        body.push("}".to_string());
    } else {
        body.push("if (obj == null) {".to_string());
        body.push("    return false;".to_string());
        body.push("}".to_string());
    }
    body.push("if (getClass() != obj.getClass()) {".to_string());
    body.push("    return false;".to_string());
    body.push("}".to_string());
    if !class.fields.is_empty() {
        body.push(format!("{name} other = ({name}) obj;", name = class.name));
        for field in &class.fields {
            body.push(format!("if ({} == null) {{", field.name));
            body.push(format!("    if (other.{} != null) {{", field.name));
            body.push("        return false;".to_string());
            body.push("    }".to_string());
            body.push(format!(
                "}} else if (!{name}.equals(other.{name})) {{",
                name = field.name
            ));
            body.push("    return false;".to_string());
            body.push("}".to_string());
        }
    }
    body.push("return true;".to_string());

    let mut method = JavaMethod::new("public", Some(JavaType::Primitive("boolean")), "equals");
    method.annotations.push("@Override".to_string());
    method.params.push((JavaType::object(), "obj".to_string()));
    method.body = Some(body);
    method
}
