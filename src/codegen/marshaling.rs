//! JSON marshaling emission
//!
//! Adds the adapter-facing surface to a generated class: a no-arg
//! constructor, a constructor taking an object adapter, and the
//! `initializeFromJSONObject` / `writeToJSONObject` pair. The emitted code
//! follows the schema-evolution contract: null fields are skipped on write,
//! absent keys fall back to the declared default (or null) on read, and
//! unknown keys in a payload are never copied forward. Required properties
//! are enforced at runtime on both sides.

use crate::error::{GeneratorError, Result};
use crate::model::{ClassKind, JavaClass, JavaMethod, JavaType};

use super::factory::InstanceFactoryGenerator;
use super::names::java_string_literal;
use super::property::default_initializer;
use super::{EmitContext, FieldPlan, FieldShape, MarshalingHandler};

pub struct AdapterMarshalingHandler;

impl MarshalingHandler for AdapterMarshalingHandler {
    fn add_marshaling(
        &self,
        ctx: &EmitContext<'_>,
        fields: &[FieldPlan],
        class: &mut JavaClass,
        factories: &mut InstanceFactoryGenerator,
    ) -> Result<()> {
        if class.kind != ClassKind::Class {
            return Ok(());
        }
        let initialize = build_initialize(ctx, fields, class, factories)?;
        let write = build_write(ctx, fields, class)?;
        // Constructors lead the member list.
        class.methods.insert(0, no_arg_constructor(class));
        class.methods.insert(1, adapter_constructor(ctx, class));
        class.methods.push(initialize);
        class.methods.push(write);
        Ok(())
    }
}

fn no_arg_constructor(class: &JavaClass) -> JavaMethod {
    JavaMethod::new("public", None, class.name.clone())
}

fn adapter_constructor(ctx: &EmitContext<'_>, class: &JavaClass) -> JavaMethod {
    let mut method = JavaMethod::new("public", None, class.name.clone());
    method.javadoc = Some(format!(
        "Marshal a new {} initialized from the given adapter.",
        class.name
    ));
    method.params.push((
        JavaType::named(ctx.object_adapter_fqn()),
        "toInitFrom".to_string(),
    ));
    method.throws.push(ctx.adapter_exception_fqn());
    method.body = Some(vec!["initializeFromJSONObject(toInitFrom);".to_string()]);
    method
}

fn build_initialize(
    ctx: &EmitContext<'_>,
    fields: &[FieldPlan],
    class: &JavaClass,
    factories: &mut InstanceFactoryGenerator,
) -> Result<JavaMethod> {
    let mut body = adapter_null_check(ctx, "toInitFrom");
    if class.extends.is_some() {
        body.push("super.initializeFromJSONObject(toInitFrom);".to_string());
    }
    for plan in fields {
        body.extend(read_field(ctx, plan, &class.package, factories)?);
    }
    body.push("return toInitFrom;".to_string());

    let mut method = JavaMethod::new(
        "public",
        Some(JavaType::named(ctx.object_adapter_fqn())),
        "initializeFromJSONObject",
    );
    method.annotations.push("@Override".to_string());
    method.params.push((
        JavaType::named(ctx.object_adapter_fqn()),
        "toInitFrom".to_string(),
    ));
    method.throws.push(ctx.adapter_exception_fqn());
    method.body = Some(body);
    Ok(method)
}

fn build_write(
    ctx: &EmitContext<'_>,
    fields: &[FieldPlan],
    class: &JavaClass,
) -> Result<JavaMethod> {
    let mut body = adapter_null_check(ctx, "writeTo");
    if class.extends.is_some() {
        body.push("super.writeToJSONObject(writeTo);".to_string());
    }
    for plan in fields {
        body.extend(write_field(ctx, plan, &class.package)?);
    }
    body.push("return writeTo;".to_string());

    let mut method = JavaMethod::new(
        "public",
        Some(JavaType::named(ctx.object_adapter_fqn())),
        "writeToJSONObject",
    );
    method.annotations.push("@Override".to_string());
    method.params.push((
        JavaType::named(ctx.object_adapter_fqn()),
        "writeTo".to_string(),
    ));
    method.throws.push(ctx.adapter_exception_fqn());
    method.body = Some(body);
    Ok(method)
}

fn adapter_null_check(ctx: &EmitContext<'_>, param: &str) -> Vec<String> {
    vec![
        format!("if ({} == null) {{", param),
        format!(
            "    throw new IllegalArgumentException(\"{} cannot be null\");",
            ctx.object_adapter_fqn()
        ),
        "}".to_string(),
    ]
}

fn required_throw(json_key: &str) -> String {
    format!(
        "throw new IllegalArgumentException(\"Property: '{}' is required and cannot be null\");",
        json_key
    )
}

/// The statements reading one property out of `toInitFrom`.
fn read_field(
    ctx: &EmitContext<'_>,
    plan: &FieldPlan,
    package: &str,
    factories: &mut InstanceFactoryGenerator,
) -> Result<Vec<String>> {
    let key = java_string_literal(&plan.json_key);
    let name = &plan.field_name;
    let node = ctx.registry.node(plan.schema);

    let mut lines = vec![format!("if (!toInitFrom.isNull({})) {{", key)];
    match &plan.shape {
        FieldShape::ListOf { item, unique } => {
            let item_type = type_argument(&plan.java_type, 0);
            let collection = if *unique {
                "java.util.LinkedHashSet"
            } else {
                "java.util.ArrayList"
            };
            lines.push(format!(
                "    {} jsonArray = toInitFrom.getJSONArray({});",
                ctx.array_adapter_fqn(),
                key
            ));
            lines.push(format!(
                "    {} = new {}<{}>();",
                name,
                collection,
                item_type.render(package)
            ));
            lines.push("    for (int i = 0; i < jsonArray.length(); i++) {".to_string());
            lines.push(format!(
                "        {}.add({});",
                name,
                element_read_expr(ctx, item, &plan.json_key, "jsonArray", "i", factories)?
            ));
            lines.push("    }".to_string());
        }
        FieldShape::MapOf { value } => {
            let value_type = type_argument(&plan.java_type, 1);
            lines.push(format!(
                "    {} jsonMap = toInitFrom.getJSONObject({});",
                ctx.object_adapter_fqn(),
                key
            ));
            lines.push(format!(
                "    {} = new java.util.LinkedHashMap<String, {}>();",
                name,
                value_type.render(package)
            ));
            lines.push(
                "    java.util.Iterator<String> keyIter = jsonMap.keys();".to_string(),
            );
            lines.push("    while (keyIter.hasNext()) {".to_string());
            lines.push("        String key = keyIter.next();".to_string());
            lines.push(format!(
                "        {}.put(key, {});",
                name,
                element_read_expr(ctx, value, &plan.json_key, "jsonMap", "key", factories)?
            ));
            lines.push("    }".to_string());
        }
        shape => {
            lines.push(format!(
                "    {} = {};",
                name,
                element_read_expr(ctx, shape, &plan.json_key, "toInitFrom", &key, factories)?
            ));
        }
    }

    lines.push("} else {".to_string());
    if node.required {
        lines.push(format!("    {}", required_throw(&plan.json_key)));
    } else if let Some(default) = node
        .default_value
        .as_ref()
        .and_then(|value| default_initializer(node, &plan.java_type, value))
    {
        lines.push(format!("    {} = {};", name, default));
    } else {
        lines.push(format!("    {} = null;", name));
    }
    lines.push("}".to_string());
    Ok(lines)
}

/// The expression reading one value from an adapter. `index` is already a
/// quoted key for object adapters or a loop variable for array adapters.
fn element_read_expr(
    ctx: &EmitContext<'_>,
    shape: &FieldShape,
    json_key: &str,
    adapter: &str,
    index: &str,
    factories: &mut InstanceFactoryGenerator,
) -> Result<String> {
    Ok(match shape {
        FieldShape::StringValue => format!("{}.getString({})", adapter, index),
        FieldShape::LongValue => format!("{}.getLong({})", adapter, index),
        FieldShape::DoubleValue => format!("{}.getDouble({})", adapter, index),
        FieldShape::BooleanValue => format!("{}.getBoolean({})", adapter, index),
        FieldShape::DateValue => format!("{}.getDate({})", adapter, index),
        FieldShape::EnumValue { class } => {
            format!("{}.valueOf({}.getString({}))", class, adapter, index)
        }
        FieldShape::Entity {
            class,
            interface: Some(interface),
        } => {
            let factory = factories.factory_for(*interface, class);
            format!("{}.newInstance({}.getJSONObject({}))", factory, adapter, index)
        }
        FieldShape::Entity {
            class,
            interface: None,
        } => format!("new {}({}.getJSONObject({}))", class, adapter, index),
        FieldShape::Raw => format!("{}.getJSONObject({})", adapter, index),
        FieldShape::ListOf { .. } => {
            return Err(GeneratorError::NestedArray);
        }
        FieldShape::MapOf { .. } => {
            return Err(GeneratorError::UnsupportedContainerElement(
                json_key.to_string(),
            ));
        }
    })
}

/// The statements writing one property into `writeTo`.
fn write_field(ctx: &EmitContext<'_>, plan: &FieldPlan, package: &str) -> Result<Vec<String>> {
    let key = java_string_literal(&plan.json_key);
    let name = &plan.field_name;
    let node = ctx.registry.node(plan.schema);

    let mut lines = vec![format!("if ({} != null) {{", name)];
    match &plan.shape {
        FieldShape::ListOf { item, .. } => {
            let item_type = type_argument(&plan.java_type, 0);
            lines.push(format!(
                "    {} jsonArray = writeTo.createNewArray();",
                ctx.array_adapter_fqn()
            ));
            lines.push("    int i = 0;".to_string());
            lines.push(format!(
                "    for ({} item : {}) {{",
                item_type.render(package),
                name
            ));
            lines.push(format!(
                "        {};",
                element_write_call(ctx, item, &plan.json_key, "jsonArray", "i", "item")?
            ));
            lines.push("        i++;".to_string());
            lines.push("    }".to_string());
            lines.push(format!("    writeTo.put({}, jsonArray);", key));
        }
        FieldShape::MapOf { value } => {
            let value_type = type_argument(&plan.java_type, 1);
            lines.push(format!(
                "    {} jsonMap = writeTo.createNew();",
                ctx.object_adapter_fqn()
            ));
            lines.push(format!(
                "    for (java.util.Map.Entry<String, {}> entry : {}.entrySet()) {{",
                value_type.render(package),
                name
            ));
            lines.push(format!(
                "        {};",
                element_write_call(
                    ctx,
                    value,
                    &plan.json_key,
                    "jsonMap",
                    "entry.getKey()",
                    "entry.getValue()"
                )?
            ));
            lines.push("    }".to_string());
            lines.push(format!("    writeTo.put({}, jsonMap);", key));
        }
        shape => {
            lines.push(format!(
                "    {};",
                element_write_call(ctx, shape, &plan.json_key, "writeTo", &key, name)?
            ));
        }
    }
    // Null fields are skipped on write; only required ones are an error.
    if node.required {
        lines.push("} else {".to_string());
        lines.push(format!("    {}", required_throw(&plan.json_key)));
    }
    lines.push("}".to_string());
    Ok(lines)
}

/// The call writing one value into an adapter slot.
fn element_write_call(
    ctx: &EmitContext<'_>,
    shape: &FieldShape,
    json_key: &str,
    adapter: &str,
    index: &str,
    expr: &str,
) -> Result<String> {
    Ok(match shape {
        FieldShape::StringValue
        | FieldShape::LongValue
        | FieldShape::DoubleValue
        | FieldShape::BooleanValue => format!("{}.put({}, {})", adapter, index, expr),
        FieldShape::DateValue => format!("{}.putDate({}, {})", adapter, index, expr),
        FieldShape::EnumValue { .. } => {
            format!("{}.put({}, {}.name())", adapter, index, expr)
        }
        FieldShape::Entity { .. } => format!(
            "{}.put({}, {}.writeToJSONObject(writeTo.createNew()))",
            adapter, index, expr
        ),
        FieldShape::Raw => format!(
            "{}.put({}, ({}) {})",
            adapter,
            index,
            ctx.object_adapter_fqn(),
            expr
        ),
        FieldShape::ListOf { .. } => {
            return Err(GeneratorError::NestedArray);
        }
        FieldShape::MapOf { .. } => {
            return Err(GeneratorError::UnsupportedContainerElement(
                json_key.to_string(),
            ));
        }
    })
}

/// A generic argument of the planned field type, for local declarations.
fn type_argument(java_type: &JavaType, position: usize) -> JavaType {
    match java_type {
        JavaType::Parameterized { args, .. } => {
            args.get(position).cloned().unwrap_or_else(JavaType::object)
        }
        _ => JavaType::object(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CodeModel;
    use crate::registry::{SchemaId, SchemaRegistry};
    use crate::schema::{ObjectSchema, SchemaKind};

    fn registry_with_root(root: ObjectSchema) -> SchemaRegistry {
        SchemaRegistry::resolve(&[root]).unwrap()
    }

    fn property_id(registry: &SchemaRegistry, root: &str, name: &str) -> SchemaId {
        let root_id = registry.lookup(root).unwrap();
        *registry.node(root_id).properties.get(name).unwrap()
    }

    fn render_class(mut class: JavaClass) -> String {
        let mut model = CodeModel::new();
        class.implements.push(JavaType::named("org.pojogen.adapter.JSONEntity"));
        let id = model.define_class(class).unwrap();
        model.render_unit(id)
    }

    fn string_plan(schema: SchemaId, name: &str) -> FieldPlan {
        FieldPlan {
            json_key: name.to_string(),
            field_name: name.to_string(),
            schema,
            java_type: JavaType::named("java.lang.String"),
            shape: FieldShape::StringValue,
        }
    }

    fn sample_root() -> ObjectSchema {
        let mut root = ObjectSchema::new(SchemaKind::Object);
        root.id = Some("org.example.Sample".to_string());
        root.name = Some("Sample".to_string());
        root.properties
            .insert("name".to_string(), ObjectSchema::new(SchemaKind::String));
        root
    }

    #[test]
    fn test_constructors_and_method_shells() {
        let registry = registry_with_root(sample_root());
        let ctx = EmitContext {
            registry: &registry,
            adapter_package: "org.pojogen.adapter",
        };
        let schema = property_id(&registry, "org.example.Sample", "name");
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        let mut factories = InstanceFactoryGenerator::new();

        AdapterMarshalingHandler
            .add_marshaling(&ctx, &[string_plan(schema, "name")], &mut class, &mut factories)
            .unwrap();
        let source = render_class(class);

        assert!(source.contains("public Sample() {"));
        assert!(source.contains(
            "public Sample(org.pojogen.adapter.JSONObjectAdapter toInitFrom) throws org.pojogen.adapter.JSONAdapterException {"
        ));
        assert!(source.contains("initializeFromJSONObject(toInitFrom);"));
        assert!(source.contains(
            "public org.pojogen.adapter.JSONObjectAdapter initializeFromJSONObject(org.pojogen.adapter.JSONObjectAdapter toInitFrom) throws org.pojogen.adapter.JSONAdapterException {"
        ));
        assert!(source.contains(
            "public org.pojogen.adapter.JSONObjectAdapter writeToJSONObject(org.pojogen.adapter.JSONObjectAdapter writeTo) throws org.pojogen.adapter.JSONAdapterException {"
        ));
        assert!(source.contains("return toInitFrom;"));
        assert!(source.contains("return writeTo;"));
        assert!(source.contains(
            "throw new IllegalArgumentException(\"org.pojogen.adapter.JSONObjectAdapter cannot be null\");"
        ));
    }

    #[test]
    fn test_scalar_read_and_write() {
        let registry = registry_with_root(sample_root());
        let ctx = EmitContext {
            registry: &registry,
            adapter_package: "org.pojogen.adapter",
        };
        let schema = property_id(&registry, "org.example.Sample", "name");
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        let mut factories = InstanceFactoryGenerator::new();

        AdapterMarshalingHandler
            .add_marshaling(&ctx, &[string_plan(schema, "name")], &mut class, &mut factories)
            .unwrap();
        let source = render_class(class);

        assert!(source.contains("if (!toInitFrom.isNull(\"name\")) {"));
        assert!(source.contains("name = toInitFrom.getString(\"name\");"));
        assert!(source.contains("name = null;"));
        assert!(source.contains("if (name != null) {"));
        assert!(source.contains("writeTo.put(\"name\", name);"));
    }

    #[test]
    fn test_required_property_throws() {
        let mut root = sample_root();
        root.properties.get_mut("name").unwrap().required = true;
        let registry = registry_with_root(root);
        let ctx = EmitContext {
            registry: &registry,
            adapter_package: "org.pojogen.adapter",
        };
        let schema = property_id(&registry, "org.example.Sample", "name");
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        let mut factories = InstanceFactoryGenerator::new();

        AdapterMarshalingHandler
            .add_marshaling(&ctx, &[string_plan(schema, "name")], &mut class, &mut factories)
            .unwrap();
        let source = render_class(class);

        assert!(source.contains(
            "throw new IllegalArgumentException(\"Property: 'name' is required and cannot be null\");"
        ));
        assert!(!source.contains("name = null;"));
    }

    #[test]
    fn test_default_restored_when_absent() {
        let mut root = sample_root();
        root.properties.get_mut("name").unwrap().default_value =
            Some(serde_json::json!("unknown"));
        let registry = registry_with_root(root);
        let ctx = EmitContext {
            registry: &registry,
            adapter_package: "org.pojogen.adapter",
        };
        let schema = property_id(&registry, "org.example.Sample", "name");
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        let mut factories = InstanceFactoryGenerator::new();

        AdapterMarshalingHandler
            .add_marshaling(&ctx, &[string_plan(schema, "name")], &mut class, &mut factories)
            .unwrap();
        let source = render_class(class);

        assert!(source.contains("name = \"unknown\";"));
    }

    #[test]
    fn test_super_calls_when_extending() {
        let registry = registry_with_root(sample_root());
        let ctx = EmitContext {
            registry: &registry,
            adapter_package: "org.pojogen.adapter",
        };
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        class.extends = Some(JavaType::named("org.example.Base"));
        let mut factories = InstanceFactoryGenerator::new();

        AdapterMarshalingHandler
            .add_marshaling(&ctx, &[], &mut class, &mut factories)
            .unwrap();
        let source = render_class(class);

        assert!(source.contains("super.initializeFromJSONObject(toInitFrom);"));
        assert!(source.contains("super.writeToJSONObject(writeTo);"));
    }

    #[test]
    fn test_list_of_strings() {
        let mut root = sample_root();
        let mut tags = ObjectSchema::new(SchemaKind::Array);
        tags.items = Some(Box::new(ObjectSchema::new(SchemaKind::String)));
        root.properties.insert("tags".to_string(), tags);
        let registry = registry_with_root(root);
        let ctx = EmitContext {
            registry: &registry,
            adapter_package: "org.pojogen.adapter",
        };
        let schema = property_id(&registry, "org.example.Sample", "tags");
        let plan = FieldPlan {
            json_key: "tags".to_string(),
            field_name: "tags".to_string(),
            schema,
            java_type: JavaType::list_of(JavaType::named("java.lang.String")),
            shape: FieldShape::ListOf {
                item: Box::new(FieldShape::StringValue),
                unique: false,
            },
        };
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        let mut factories = InstanceFactoryGenerator::new();

        AdapterMarshalingHandler
            .add_marshaling(&ctx, &[plan], &mut class, &mut factories)
            .unwrap();
        let source = render_class(class);

        assert!(source.contains(
            "org.pojogen.adapter.JSONArrayAdapter jsonArray = toInitFrom.getJSONArray(\"tags\");"
        ));
        assert!(source.contains("tags = new java.util.ArrayList<String>();"));
        assert!(source.contains("for (int i = 0; i < jsonArray.length(); i++) {"));
        assert!(source.contains("tags.add(jsonArray.getString(i));"));
        assert!(source.contains("for (String item : tags) {"));
        assert!(source.contains("jsonArray.put(i, item);"));
        assert!(source.contains("writeTo.put(\"tags\", jsonArray);"));
    }

    #[test]
    fn test_map_of_longs() {
        let mut root = sample_root();
        let mut scores = ObjectSchema::new(SchemaKind::Object);
        scores.key = Some(Box::new(ObjectSchema::new(SchemaKind::String)));
        scores.value = Some(Box::new(ObjectSchema::new(SchemaKind::Integer)));
        root.properties.insert("scores".to_string(), scores);
        let registry = registry_with_root(root);
        let ctx = EmitContext {
            registry: &registry,
            adapter_package: "org.pojogen.adapter",
        };
        let schema = property_id(&registry, "org.example.Sample", "scores");
        let plan = FieldPlan {
            json_key: "scores".to_string(),
            field_name: "scores".to_string(),
            schema,
            java_type: JavaType::map_of(
                JavaType::named("java.lang.String"),
                JavaType::named("java.lang.Long"),
            ),
            shape: FieldShape::MapOf {
                value: Box::new(FieldShape::LongValue),
            },
        };
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        let mut factories = InstanceFactoryGenerator::new();

        AdapterMarshalingHandler
            .add_marshaling(&ctx, &[plan], &mut class, &mut factories)
            .unwrap();
        let source = render_class(class);

        assert!(source.contains(
            "org.pojogen.adapter.JSONObjectAdapter jsonMap = toInitFrom.getJSONObject(\"scores\");"
        ));
        assert!(source.contains("scores = new java.util.LinkedHashMap<String, Long>();"));
        assert!(source.contains("java.util.Iterator<String> keyIter = jsonMap.keys();"));
        assert!(source.contains("while (keyIter.hasNext()) {"));
        assert!(source.contains("scores.put(key, jsonMap.getLong(key));"));
        assert!(source.contains(
            "for (java.util.Map.Entry<String, Long> entry : scores.entrySet()) {"
        ));
        assert!(source.contains("jsonMap.put(entry.getKey(), entry.getValue());"));
    }

    #[test]
    fn test_interface_field_reads_through_factory() {
        let mut pet = ObjectSchema::new(SchemaKind::Interface);
        pet.id = Some("org.example.Pet".to_string());
        pet.name = Some("Pet".to_string());
        let mut root = sample_root();
        let mut owner_pet = ObjectSchema::default();
        owner_pet.reference = Some("org.example.Pet".to_string());
        root.properties.insert("pet".to_string(), owner_pet);
        let registry = SchemaRegistry::resolve(&[pet, root]).unwrap();
        let ctx = EmitContext {
            registry: &registry,
            adapter_package: "org.pojogen.adapter",
        };

        let pet_id = registry.lookup("org.example.Pet").unwrap();
        let plan = FieldPlan {
            json_key: "pet".to_string(),
            field_name: "pet".to_string(),
            schema: pet_id,
            java_type: JavaType::named("org.example.Pet"),
            shape: FieldShape::Entity {
                class: "org.example.Pet".to_string(),
                interface: Some(pet_id),
            },
        };
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        let mut factories = InstanceFactoryGenerator::new();

        AdapterMarshalingHandler
            .add_marshaling(&ctx, &[plan], &mut class, &mut factories)
            .unwrap();
        let source = render_class(class);

        assert!(source.contains(
            "pet = org.example.PetInstanceFactory.newInstance(toInitFrom.getJSONObject(\"pet\"));"
        ));
        assert!(source.contains(
            "writeTo.put(\"pet\", pet.writeToJSONObject(writeTo.createNew()));"
        ));
    }

    #[test]
    fn test_date_uses_date_accessors() {
        let mut root = sample_root();
        let mut created = ObjectSchema::new(SchemaKind::String);
        created.format = Some(crate::schema::SchemaFormat::DateTime);
        root.properties.insert("createdOn".to_string(), created);
        let registry = registry_with_root(root);
        let ctx = EmitContext {
            registry: &registry,
            adapter_package: "org.pojogen.adapter",
        };
        let schema = property_id(&registry, "org.example.Sample", "createdOn");
        let plan = FieldPlan {
            json_key: "createdOn".to_string(),
            field_name: "createdOn".to_string(),
            schema,
            java_type: JavaType::named("java.util.Date"),
            shape: FieldShape::DateValue,
        };
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        let mut factories = InstanceFactoryGenerator::new();

        AdapterMarshalingHandler
            .add_marshaling(&ctx, &[plan], &mut class, &mut factories)
            .unwrap();
        let source = render_class(class);

        assert!(source.contains("createdOn = toInitFrom.getDate(\"createdOn\");"));
        assert!(source.contains("writeTo.putDate(\"createdOn\", createdOn);"));
    }

    #[test]
    fn test_nested_arrays_rejected() {
        let registry = registry_with_root(sample_root());
        let ctx = EmitContext {
            registry: &registry,
            adapter_package: "org.pojogen.adapter",
        };
        let schema = property_id(&registry, "org.example.Sample", "name");
        let plan = FieldPlan {
            json_key: "grid".to_string(),
            field_name: "grid".to_string(),
            schema,
            java_type: JavaType::list_of(JavaType::list_of(JavaType::named("java.lang.String"))),
            shape: FieldShape::ListOf {
                item: Box::new(FieldShape::ListOf {
                    item: Box::new(FieldShape::StringValue),
                    unique: false,
                }),
                unique: false,
            },
        };
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        let mut factories = InstanceFactoryGenerator::new();

        let err = AdapterMarshalingHandler
            .add_marshaling(&ctx, &[plan], &mut class, &mut factories)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Arrays of arrays are currently not supported"
        );
    }
}
