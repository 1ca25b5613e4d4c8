//! Property emission
//!
//! Turns each field plan into a private boxed field plus a getter and setter
//! pair. On interfaces the same plans become abstract accessor declarations,
//! which is how implementing classes end up owning the actual state.

use crate::error::Result;
use crate::model::{ClassKind, JavaClass, JavaField, JavaMethod, JavaType};
use crate::registry::SchemaNode;
use crate::schema::SchemaKind;

use super::names::{getter_name, java_string_literal, setter_name};
use super::{EmitContext, FieldPlan, PropertyHandler};

/// The standard field-with-accessors property emitter.
pub struct AccessorPropertyHandler;

impl PropertyHandler for AccessorPropertyHandler {
    fn add_properties(
        &self,
        ctx: &EmitContext<'_>,
        fields: &[FieldPlan],
        class: &mut JavaClass,
    ) -> Result<()> {
        for plan in fields {
            let node = ctx.registry.node(plan.schema);
            if class.kind == ClassKind::Interface {
                add_abstract_accessors(plan, class);
            } else {
                add_field_with_accessors(plan, node, class);
            }
        }
        Ok(())
    }
}

fn add_field_with_accessors(plan: &FieldPlan, node: &SchemaNode, class: &mut JavaClass) {
    class.fields.push(JavaField {
        javadoc: node.description.clone(),
        modifiers: "private".to_string(),
        java_type: plan.java_type.clone(),
        name: plan.field_name.clone(),
        initializer: node
            .default_value
            .as_ref()
            .and_then(|value| default_initializer(node, &plan.java_type, value)),
    });

    let mut getter = JavaMethod::new(
        "public",
        Some(plan.java_type.clone()),
        getter_name(&plan.field_name),
    );
    getter.body = Some(vec![format!("return {};", plan.field_name)]);
    class.methods.push(getter);

    let mut setter = JavaMethod::new("public", Some(JavaType::Primitive("void")), setter_name(&plan.field_name));
    setter
        .params
        .push((plan.java_type.clone(), plan.field_name.clone()));
    setter.body = Some(vec![format!(
        "this.{name} = {name};",
        name = plan.field_name
    )]);
    class.methods.push(setter);
}

fn add_abstract_accessors(plan: &FieldPlan, class: &mut JavaClass) {
    let mut getter = JavaMethod::new(
        "",
        Some(plan.java_type.clone()),
        getter_name(&plan.field_name),
    );
    getter.body = None;
    class.methods.push(getter);

    let mut setter = JavaMethod::new("", Some(JavaType::Primitive("void")), setter_name(&plan.field_name));
    setter
        .params
        .push((plan.java_type.clone(), plan.field_name.clone()));
    setter.body = None;
    class.methods.push(setter);
}

/// Render a schema default as a Java initializer expression. Only scalar and
/// enum defaults are representable; anything else is ignored.
pub(crate) fn default_initializer(
    node: &SchemaNode,
    java_type: &JavaType,
    value: &serde_json::Value,
) -> Option<String> {
    if node.enum_values.is_some() {
        let constant = value.as_str()?;
        let fqn = java_type.fqn()?;
        return Some(format!("{}.{}", fqn, constant));
    }
    match node.kind() {
        SchemaKind::String => value.as_str().map(java_string_literal),
        SchemaKind::Integer => value.as_i64().map(|v| format!("{}L", v)),
        SchemaKind::Number => value.as_f64().map(|v| format!("{}D", v)),
        SchemaKind::Boolean => value.as_bool().map(|v| v.to_string()),
        _ => None,
    }
}
