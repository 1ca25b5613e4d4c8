//! `toString` emission

use crate::error::Result;
use crate::model::{JavaClass, JavaMethod, JavaType};

use super::ToStringHandler;

/// Emits a `StringBuilder` based `toString` listing the class's declared
/// fields in order.
pub struct StringBuilderToStringHandler;

impl ToStringHandler for StringBuilderToStringHandler {
    fn add_to_string(&self, class: &mut JavaClass) -> Result<()> {
        let mut body = vec![
            "StringBuilder result = new StringBuilder();".to_string(),
            format!("result.append(\"{} [\");", class.name),
        ];
        for (i, field) in class.fields.iter().enumerate() {
            let label = if i == 0 {
                format!("{}=", field.name)
            } else {
                format!(", {}=", field.name)
            };
            body.push(format!("result.append(\"{}\");", label));
            body.push(format!("result.append({});", field.name));
        }
        body.push("result.append(\"]\");".to_string());
        body.push("return result.toString();".to_string());

        let mut method = JavaMethod::new(
            "public",
            Some(JavaType::named("java.lang.String")),
            "toString",
        );
        method.annotations.push("@Override".to_string());
        method.body = Some(body);
        class.methods.push(method);
        Ok(())
    }
}
