//! Instance factory emission
//!
//! Interface-typed fields cannot be instantiated directly when reading a
//! document back in. Each interface that is read through marshaling gets a
//! companion `<Name>InstanceFactory` whose static `newInstance` inspects the
//! payload's `concreteType` key, falls back to the interface's
//! `defaultConcreteType`, and dispatches to the matching implementation
//! constructor. Requests are collected while classes are generated and the
//! factories are built in one pass at the end, once every implementation is
//! known.

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{ClassKind, CodeModel, JavaClass, JavaMethod, JavaType};
use crate::registry::SchemaId;

use super::names::{java_string_literal, split_fqn};
use super::EmitContext;

/// The JSON key carrying the implementation class name in a payload.
pub const CONCRETE_TYPE_KEY: &str = "concreteType";

#[derive(Default)]
pub struct InstanceFactoryGenerator {
    requested: IndexMap<String, SchemaId>,
}

impl InstanceFactoryGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The factory class name for an interface.
    pub fn factory_name(interface_fqn: &str) -> String {
        format!("{}InstanceFactory", interface_fqn)
    }

    /// Record that marshaling code instantiates the given interface, and
    /// return the factory class name the generated code should call.
    pub fn factory_for(&mut self, id: SchemaId, interface_fqn: &str) -> String {
        self.requested
            .entry(interface_fqn.to_string())
            .or_insert(id);
        Self::factory_name(interface_fqn)
    }

    /// Emit one factory class per requested interface. Implementations are
    /// every generated concrete class assignable to the interface.
    pub fn build_factories(&self, ctx: &EmitContext<'_>, model: &mut CodeModel) -> Result<()> {
        for (interface_fqn, id) in &self.requested {
            let node = ctx.registry.node(*id);
            let default_concrete = node.default_concrete_type.clone();
            let implementations = concrete_classes(ctx, model)
                .into_iter()
                .filter(|fqn| model.is_assignable_from(interface_fqn, fqn))
                .collect::<Vec<_>>();

            let factory_fqn = Self::factory_name(interface_fqn);
            let (package, simple) = split_fqn(&factory_fqn);
            let mut class = JavaClass::new(package, simple, ClassKind::Class);
            class.javadoc = Some(format!(
                "Creates {} instances from a JSON payload, dispatching on the {} key.",
                split_fqn(interface_fqn).1,
                CONCRETE_TYPE_KEY
            ));
            class.methods.push(new_instance_method(
                ctx,
                interface_fqn,
                default_concrete.as_deref(),
                &implementations,
            ));
            model.define_class(class)?;
        }
        Ok(())
    }
}

fn new_instance_method(
    ctx: &EmitContext<'_>,
    interface_fqn: &str,
    default_concrete: Option<&str>,
    implementations: &[String],
) -> JavaMethod {
    let key = java_string_literal(CONCRETE_TYPE_KEY);
    let mut body = vec![
        "String concreteType = null;".to_string(),
        format!("if (!adapter.isNull({})) {{", key),
        format!("    concreteType = adapter.getString({});", key),
        "}".to_string(),
    ];
    if let Some(default_concrete) = default_concrete {
        body.push("if (concreteType == null) {".to_string());
        body.push(format!(
            "    concreteType = {};",
            java_string_literal(default_concrete)
        ));
        body.push("}".to_string());
    }
    for implementation in implementations {
        body.push(format!(
            "if ({}.equals(concreteType)) {{",
            java_string_literal(implementation)
        ));
        body.push(format!("    return new {}(adapter);", implementation));
        body.push("}".to_string());
    }
    body.push(
        "throw new IllegalArgumentException(\"Unknown concreteType: \" + concreteType);"
            .to_string(),
    );

    let mut method = JavaMethod::new(
        "public static",
        Some(JavaType::named(interface_fqn)),
        "newInstance",
    );
    method.params.push((
        JavaType::named(ctx.object_adapter_fqn()),
        "adapter".to_string(),
    ));
    method.throws.push(ctx.adapter_exception_fqn());
    method.body = Some(body);
    method
}

/// Emit a registry class with a `newInstance(String)` dispatch over every
/// generated concrete class. Callers use it to instantiate by class name
/// without compile-time knowledge of the generated set.
pub fn build_register(
    ctx: &EmitContext<'_>,
    model: &mut CodeModel,
    register_fqn: &str,
) -> Result<()> {
    let implementations = concrete_classes(ctx, model);

    let mut body = Vec::new();
    for implementation in &implementations {
        body.push(format!(
            "if ({}.equals(className)) {{",
            java_string_literal(implementation)
        ));
        body.push(format!("    return new {}();", implementation));
        body.push("}".to_string());
    }
    body.push(
        "throw new IllegalArgumentException(\"Unknown class name: \" + className);".to_string(),
    );

    let mut method = JavaMethod::new(
        "public static",
        Some(JavaType::named(ctx.entity_interface_fqn())),
        "newInstance",
    );
    method
        .params
        .push((JavaType::named("java.lang.String"), "className".to_string()));
    method.body = Some(body);

    let (package, simple) = split_fqn(register_fqn);
    let mut class = JavaClass::new(package, simple, ClassKind::Class);
    class.javadoc = Some("Instantiates any generated class by its fully qualified name.".to_string());
    class.methods.push(method);
    model.define_class(class)?;
    Ok(())
}

/// Fully qualified names of every generated concrete class, in schema
/// registration order.
fn concrete_classes(ctx: &EmitContext<'_>, model: &CodeModel) -> Vec<String> {
    ctx.registry
        .identified()
        .filter_map(|(fqn, _)| {
            let class_id = model.get_class(fqn)?;
            if model.class(class_id).kind == ClassKind::Class {
                Some(fqn.to_string())
            } else {
                None
            }
        })
        .collect()
}
