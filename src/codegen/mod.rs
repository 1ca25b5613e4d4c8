//! Code Generation
//!
//! Turns a resolved schema registry into a Java class model.
//!
//! Architecture:
//! - GenerationDriver: owns the options and the handler set, drives recursion
//! - Handlers: pluggable per-concern emitters (properties, marshaling,
//!   hashCode/equals, toString) that only ever see field plans and the class
//!   under construction
//! - FieldPlan: a pure projection of one property - json key, field name,
//!   Java type, and marshaling shape
//!
//! The key constraint: handlers never resolve references or walk the schema
//! graph. All recursion happens in the driver, and a class is registered in
//! the model before its members are populated so cycles close onto the
//! half-built class instead of recursing forever.

pub mod factory;
pub mod hash_equals;
pub mod marshaling;
pub mod names;
pub mod property;
pub mod to_string;

pub use factory::InstanceFactoryGenerator;
pub use hash_equals::NullSafeEqualityHandler;
pub use marshaling::AdapterMarshalingHandler;
pub use property::AccessorPropertyHandler;
pub use to_string::StringBuilderToStringHandler;

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::error::{GeneratorError, Result};
use crate::model::{ClassId, ClassKind, CodeModel, EnumConstant, JavaClass, JavaType};
use crate::registry::{SchemaId, SchemaNode, SchemaRegistry};
use crate::schema::{ObjectSchema, SchemaFormat, SchemaKind, SELF_REFERENCE};

/// Options frozen for one generation run.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Java package holding the adapter interfaces the generated code is
    /// written against.
    pub adapter_package: String,
    /// Fully qualified name of an optional registry class instantiating any
    /// generated class by name.
    pub register_class: Option<String>,
    /// Whether interface instance factories are emitted.
    pub emit_factories: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            adapter_package: "org.pojogen.adapter".to_string(),
            register_class: None,
            emit_factories: true,
        }
    }
}

/// Read-only context handed to emission handlers.
pub struct EmitContext<'a> {
    pub registry: &'a SchemaRegistry,
    pub adapter_package: &'a str,
}

impl EmitContext<'_> {
    pub fn object_adapter_fqn(&self) -> String {
        format!("{}.JSONObjectAdapter", self.adapter_package)
    }

    pub fn array_adapter_fqn(&self) -> String {
        format!("{}.JSONArrayAdapter", self.adapter_package)
    }

    pub fn adapter_exception_fqn(&self) -> String {
        format!("{}.JSONAdapterException", self.adapter_package)
    }

    pub fn entity_interface_fqn(&self) -> String {
        format!("{}.JSONEntity", self.adapter_package)
    }
}

/// How one value is read from and written to an adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    StringValue,
    LongValue,
    DoubleValue,
    BooleanValue,
    DateValue,
    EnumValue {
        class: String,
    },
    /// A generated class or interface; interface-typed values are read
    /// through an instance factory.
    Entity {
        class: String,
        interface: Option<SchemaId>,
    },
    /// An untyped value carried as a raw object adapter.
    Raw,
    ListOf {
        item: Box<FieldShape>,
        unique: bool,
    },
    MapOf {
        value: Box<FieldShape>,
    },
}

/// The boxed Java type a shape occupies in a field declaration.
pub fn java_type_of(shape: &FieldShape) -> JavaType {
    match shape {
        FieldShape::StringValue => JavaType::named("java.lang.String"),
        FieldShape::LongValue => JavaType::named("java.lang.Long"),
        FieldShape::DoubleValue => JavaType::named("java.lang.Double"),
        FieldShape::BooleanValue => JavaType::named("java.lang.Boolean"),
        FieldShape::DateValue => JavaType::named("java.util.Date"),
        FieldShape::EnumValue { class } => JavaType::named(class.clone()),
        FieldShape::Entity { class, .. } => JavaType::named(class.clone()),
        FieldShape::Raw => JavaType::object(),
        FieldShape::ListOf { item, unique } => {
            let item = java_type_of(item);
            if *unique {
                JavaType::set_of(item)
            } else {
                JavaType::list_of(item)
            }
        }
        FieldShape::MapOf { value } => {
            JavaType::map_of(JavaType::named("java.lang.String"), java_type_of(value))
        }
    }
}

/// One property of a class, projected for the handlers.
#[derive(Debug, Clone)]
pub struct FieldPlan {
    /// The JSON key in the document.
    pub json_key: String,
    /// The (escaped) Java field name.
    pub field_name: String,
    /// The property's schema node.
    pub schema: SchemaId,
    pub java_type: JavaType,
    pub shape: FieldShape,
}

pub trait PropertyHandler {
    fn add_properties(
        &self,
        ctx: &EmitContext<'_>,
        fields: &[FieldPlan],
        class: &mut JavaClass,
    ) -> Result<()>;
}

pub trait HashAndEqualsHandler {
    fn add_hash_and_equals(&self, class: &mut JavaClass) -> Result<()>;
}

pub trait MarshalingHandler {
    fn add_marshaling(
        &self,
        ctx: &EmitContext<'_>,
        fields: &[FieldPlan],
        class: &mut JavaClass,
        factories: &mut InstanceFactoryGenerator,
    ) -> Result<()>;
}

pub trait ToStringHandler {
    fn add_to_string(&self, class: &mut JavaClass) -> Result<()>;
}

/// The full set of emission handlers for one run.
pub struct HandlerSet {
    pub property: Box<dyn PropertyHandler>,
    pub hash_equals: Box<dyn HashAndEqualsHandler>,
    pub marshaling: Box<dyn MarshalingHandler>,
    pub to_string: Box<dyn ToStringHandler>,
}

impl HandlerSet {
    pub fn standard() -> Self {
        Self {
            property: Box::new(AccessorPropertyHandler),
            hash_equals: Box::new(NullSafeEqualityHandler),
            marshaling: Box::new(AdapterMarshalingHandler),
            to_string: Box::new(StringBuilderToStringHandler),
        }
    }
}

impl Default for HandlerSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// A resolved type: either a class defined in this run's model, or a plain
/// type such as `java.lang.String` or `java.util.List<T>`.
#[derive(Debug, Clone)]
pub enum TypeRef {
    Defined(ClassId),
    Plain(JavaType),
}

impl TypeRef {
    pub fn java_type(&self, model: &CodeModel) -> JavaType {
        match self {
            TypeRef::Defined(id) => JavaType::named(model.class(*id).fqn()),
            TypeRef::Plain(java_type) => java_type.clone(),
        }
    }
}

/// Everything produced by one generation run.
#[derive(Debug)]
pub struct GenerationOutput {
    pub registry: SchemaRegistry,
    pub model: CodeModel,
}

impl GenerationOutput {
    /// Render every class as `(fully qualified name, source)` pairs in
    /// definition order.
    pub fn units(&self) -> Vec<(String, String)> {
        self.model
            .classes()
            .map(|(id, class)| (class.fqn(), self.model.render_unit(id)))
            .collect()
    }
}

/// Drives generation over a set of root schemas.
pub struct GenerationDriver {
    options: DriverOptions,
    handlers: HandlerSet,
}

impl GenerationDriver {
    pub fn new(options: DriverOptions) -> Self {
        Self {
            options,
            handlers: HandlerSet::standard(),
        }
    }

    pub fn with_handlers(options: DriverOptions, handlers: HandlerSet) -> Self {
        Self { options, handlers }
    }

    /// Resolve the schemas and generate a class for every root, then
    /// validate `defaultConcreteType` declarations and build the requested
    /// instance factories.
    pub fn build_all(&self, schemas: &[ObjectSchema]) -> Result<GenerationOutput> {
        let registry = SchemaRegistry::resolve(schemas)?;
        info!(
            schemas = registry.len(),
            roots = registry.roots().len(),
            "resolved schema registry"
        );

        let mut model = CodeModel::new();
        {
            let mut generation = Generation {
                registry: &registry,
                handlers: &self.handlers,
                options: &self.options,
                model: &mut model,
                factories: InstanceFactoryGenerator::new(),
                memo: HashMap::new(),
            };
            let roots: Vec<(SchemaId, Option<String>)> = registry
                .roots()
                .iter()
                .map(|root| (*root, registry.node(*root).id.clone()))
                .collect();
            for (root, fqn) in roots {
                generation.type_for(root, fqn.as_deref())?;
            }
            generation.finish()?;
        }
        info!(classes = model.len(), "generated class model");
        Ok(GenerationOutput { registry, model })
    }
}

/// Mutable state for one run.
struct Generation<'a> {
    registry: &'a SchemaRegistry,
    handlers: &'a HandlerSet,
    options: &'a DriverOptions,
    model: &'a mut CodeModel,
    factories: InstanceFactoryGenerator,
    memo: HashMap<SchemaId, TypeRef>,
}

impl<'a> Generation<'a> {
    fn ctx(&self) -> EmitContext<'a> {
        EmitContext {
            registry: self.registry,
            adapter_package: &self.options.adapter_package,
        }
    }

    /// Resolve the type for a schema node, defining classes as needed.
    ///
    /// Results are memoized per node. A class is memoized and registered in
    /// the model before its members are populated, so a cycle hitting the
    /// same node again resolves to the half-built class.
    fn type_for(&mut self, id: SchemaId, root_fqn: Option<&str>) -> Result<TypeRef> {
        if let Some(known) = self.memo.get(&id) {
            return Ok(known.clone());
        }
        let node = self.registry.node(id).clone();

        // Recursive-reference markers always resolve to the already-defined
        // anchor class and are never traversed further.
        if node.is_recursive_ref_instance {
            let fqn = node
                .id
                .clone()
                .ok_or(GeneratorError::RecursiveRefToAnonymousSchema)?;
            let class_id = self
                .model
                .get_class(&fqn)
                .ok_or_else(|| GeneratorError::TypeResolution(fqn.clone()))?;
            let type_ref = TypeRef::Defined(class_id);
            self.memo.insert(id, type_ref.clone());
            return Ok(type_ref);
        }

        if let Some(reference) = node.reference.clone() {
            let type_ref = if reference == SELF_REFERENCE {
                let fqn = root_fqn
                    .ok_or_else(|| GeneratorError::TypeResolution(SELF_REFERENCE.to_string()))?;
                let class_id = self
                    .model
                    .get_class(fqn)
                    .ok_or_else(|| GeneratorError::TypeResolution(fqn.to_string()))?;
                TypeRef::Defined(class_id)
            } else {
                let target = self.registry.lookup(&reference).ok_or_else(|| {
                    GeneratorError::UnresolvedReference {
                        closest: self.registry.closest_id(&reference),
                        reference,
                    }
                })?;
                self.type_for(target, root_fqn)?
            };
            self.memo.insert(id, type_ref.clone());
            return Ok(type_ref);
        }

        if node.enum_values.is_some() {
            return self.enum_type(id, &node);
        }

        let is_map = node.key.is_some() && node.value.is_some();
        match (node.kind(), node.id.clone()) {
            (SchemaKind::Object | SchemaKind::Interface, Some(fqn)) if !is_map => {
                self.class_type(id, &node, fqn, root_fqn)
            }
            _ => {
                let shape = self.shape_of(id, root_fqn)?;
                let type_ref = TypeRef::Plain(java_type_of(&shape));
                self.memo.insert(id, type_ref.clone());
                Ok(type_ref)
            }
        }
    }

    fn enum_type(&mut self, id: SchemaId, node: &SchemaNode) -> Result<TypeRef> {
        let Some(fqn) = node.id.clone() else {
            debug!("enum without an id degrades to a plain string");
            let type_ref = TypeRef::Plain(JavaType::named("java.lang.String"));
            self.memo.insert(id, type_ref.clone());
            return Ok(type_ref);
        };
        if let Some(existing) = self.model.get_class(&fqn) {
            let type_ref = TypeRef::Defined(existing);
            self.memo.insert(id, type_ref.clone());
            return Ok(type_ref);
        }

        let (package, simple) = names::split_fqn(&fqn);
        let mut class = JavaClass::new(package, simple, ClassKind::Enum);
        class.javadoc = node.description.clone();
        if let Some(values) = &node.enum_values {
            for value in values {
                class.constants.push(EnumConstant {
                    name: names::field_name(value.name()),
                    javadoc: value.description().map(str::to_string),
                });
            }
        }
        let class_id = self.model.define_class(class)?;
        let type_ref = TypeRef::Defined(class_id);
        self.memo.insert(id, type_ref.clone());
        Ok(type_ref)
    }

    fn class_type(
        &mut self,
        id: SchemaId,
        node: &SchemaNode,
        fqn: String,
        root_fqn: Option<&str>,
    ) -> Result<TypeRef> {
        if let Some(existing) = self.model.get_class(&fqn) {
            let type_ref = TypeRef::Defined(existing);
            self.memo.insert(id, type_ref.clone());
            return Ok(type_ref);
        }

        // Supertypes resolve before the class itself is defined.
        let super_ref = match node.extends {
            Some(extends) => Some(self.type_for(extends, root_fqn)?),
            None => None,
        };
        let mut interface_refs = Vec::new();
        for interface in &node.implements {
            interface_refs.push(self.type_for(*interface, root_fqn)?);
        }

        let kind = if node.kind() == SchemaKind::Interface {
            ClassKind::Interface
        } else {
            ClassKind::Class
        };
        let (package, simple) = names::split_fqn(&fqn);
        let mut class = JavaClass::new(package, simple, kind);
        class.javadoc = node.description.clone();
        let super_type = super_ref.map(|type_ref| type_ref.java_type(self.model));
        let interface_types: Vec<JavaType> = interface_refs
            .iter()
            .map(|type_ref| type_ref.java_type(self.model))
            .collect();
        match kind {
            ClassKind::Interface => {
                class.implements = super_type.into_iter().chain(interface_types).collect();
            }
            _ => {
                class.extends = super_type;
                class.implements = interface_types;
            }
        }
        // Roots of the hierarchy pick up the entity contract; everything
        // below inherits it.
        if class.extends.is_none() && class.implements.is_empty() {
            class
                .implements
                .push(JavaType::named(self.ctx().entity_interface_fqn()));
        }

        let class_id = self.model.define_class(class)?;
        self.memo.insert(id, TypeRef::Defined(class_id));
        debug!(class = %fqn, "defined class");

        let fields = self.effective_fields(id);
        let plans = self.build_plans(&fields, root_fqn)?;
        let ctx = self.ctx();
        let class = self.model.class_mut(class_id);
        self.handlers.property.add_properties(&ctx, &plans, class)?;
        if kind != ClassKind::Interface {
            self.handlers
                .marshaling
                .add_marshaling(&ctx, &plans, class, &mut self.factories)?;
            self.handlers.hash_equals.add_hash_and_equals(class)?;
            self.handlers.to_string.add_to_string(class)?;
        }
        Ok(TypeRef::Defined(class_id))
    }

    /// The marshaling shape of a value. Defines classes for any identified
    /// object schemas it touches.
    fn shape_of(&mut self, id: SchemaId, root_fqn: Option<&str>) -> Result<FieldShape> {
        let node = self.registry.node(id).clone();

        if node.is_recursive_ref_instance {
            let fqn = node
                .id
                .clone()
                .ok_or(GeneratorError::RecursiveRefToAnonymousSchema)?;
            let interface = if node.kind() == SchemaKind::Interface {
                self.registry.lookup(&fqn)
            } else {
                None
            };
            return Ok(FieldShape::Entity {
                class: fqn,
                interface,
            });
        }
        if let Some(reference) = node.reference.clone() {
            if reference == SELF_REFERENCE {
                let fqn = root_fqn
                    .ok_or_else(|| GeneratorError::TypeResolution(SELF_REFERENCE.to_string()))?;
                let interface = self
                    .registry
                    .lookup(fqn)
                    .filter(|target| self.registry.node(*target).kind() == SchemaKind::Interface);
                return Ok(FieldShape::Entity {
                    class: fqn.to_string(),
                    interface,
                });
            }
            let target = self.registry.lookup(&reference).ok_or_else(|| {
                GeneratorError::UnresolvedReference {
                    closest: self.registry.closest_id(&reference),
                    reference,
                }
            })?;
            return self.shape_of(target, root_fqn);
        }
        if node.enum_values.is_some() {
            return match self.type_for(id, root_fqn)? {
                TypeRef::Defined(class_id) => Ok(FieldShape::EnumValue {
                    class: self.model.class(class_id).fqn(),
                }),
                TypeRef::Plain(_) => Ok(FieldShape::StringValue),
            };
        }

        match node.kind() {
            SchemaKind::String if node.format == Some(SchemaFormat::DateTime) => {
                Ok(FieldShape::DateValue)
            }
            SchemaKind::String => Ok(FieldShape::StringValue),
            SchemaKind::Integer => Ok(FieldShape::LongValue),
            SchemaKind::Number => Ok(FieldShape::DoubleValue),
            SchemaKind::Boolean => Ok(FieldShape::BooleanValue),
            SchemaKind::Array => {
                let item = match node.items {
                    Some(item_id) => self.shape_of(item_id, root_fqn)?,
                    None => FieldShape::Raw,
                };
                Ok(FieldShape::ListOf {
                    item: Box::new(item),
                    unique: node.unique_items,
                })
            }
            SchemaKind::Object | SchemaKind::Interface => {
                if let (Some(key), Some(value)) = (node.key, node.value) {
                    let key_shape = self.shape_of(key, root_fqn)?;
                    if key_shape != FieldShape::StringValue {
                        return Err(GeneratorError::UnsupportedMapKey(
                            self.registry.node(key).kind().json_name().to_string(),
                        ));
                    }
                    let value_shape = self.shape_of(value, root_fqn)?;
                    return Ok(FieldShape::MapOf {
                        value: Box::new(value_shape),
                    });
                }
                if let Some(fqn) = node.id.clone() {
                    self.type_for(id, root_fqn)?;
                    let interface = if node.kind() == SchemaKind::Interface {
                        Some(id)
                    } else {
                        None
                    };
                    return Ok(FieldShape::Entity {
                        class: fqn,
                        interface,
                    });
                }
                if node.properties.is_empty() {
                    if let Some(additional) = node.additional_properties {
                        let value_shape = self.shape_of(additional, root_fqn)?;
                        return Ok(FieldShape::MapOf {
                            value: Box::new(value_shape),
                        });
                    }
                }
                Ok(FieldShape::Raw)
            }
            SchemaKind::Null | SchemaKind::Any => Ok(FieldShape::Raw),
        }
    }

    fn build_plans(
        &mut self,
        fields: &[(String, SchemaId)],
        root_fqn: Option<&str>,
    ) -> Result<Vec<FieldPlan>> {
        let mut plans = Vec::with_capacity(fields.len());
        for (key, schema) in fields {
            let shape = self.shape_of(*schema, root_fqn)?;
            plans.push(FieldPlan {
                json_key: key.clone(),
                field_name: names::field_name(key),
                schema: *schema,
                java_type: java_type_of(&shape),
                shape,
            });
        }
        Ok(plans)
    }

    /// The properties a class declares itself: the closure of its interfaces'
    /// properties followed by its own, minus anything the superclass chain
    /// already carries. An own declaration replaces an interface's schema for
    /// the same key without changing its position.
    fn effective_fields(&self, id: SchemaId) -> Vec<(String, SchemaId)> {
        let node = self.registry.node(id);
        let mut fields: Vec<(String, SchemaId)> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut visited: HashSet<SchemaId> = HashSet::new();

        if node.kind() == SchemaKind::Interface {
            if let Some(extends) = node.extends {
                self.collect_interface_fields(extends, &mut fields, &mut seen, &mut visited);
            }
        }
        for interface in &node.implements {
            self.collect_interface_fields(*interface, &mut fields, &mut seen, &mut visited);
        }

        for (key, schema) in &node.properties {
            if let Some(existing) = fields.iter_mut().find(|(k, _)| k == key) {
                existing.1 = *schema;
            } else {
                fields.push((key.clone(), *schema));
            }
        }

        if node.kind() != SchemaKind::Interface {
            let inherited = self.inherited_names(node.extends);
            fields.retain(|(key, _)| !inherited.contains(key));
        }
        fields
    }

    fn collect_interface_fields(
        &self,
        id: SchemaId,
        fields: &mut Vec<(String, SchemaId)>,
        seen: &mut HashSet<String>,
        visited: &mut HashSet<SchemaId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        let node = self.registry.node(id);
        if node.is_recursive_ref_instance {
            return;
        }
        if let Some(extends) = node.extends {
            self.collect_interface_fields(extends, fields, seen, visited);
        }
        for interface in &node.implements {
            self.collect_interface_fields(*interface, fields, seen, visited);
        }
        for (key, schema) in &node.properties {
            if seen.insert(key.clone()) {
                fields.push((key.clone(), *schema));
            }
        }
    }

    /// Property names declared anywhere along the superclass chain,
    /// including the interfaces those classes materialize.
    fn inherited_names(&self, extends: Option<SchemaId>) -> HashSet<String> {
        let mut names = HashSet::new();
        let mut visited_chain = HashSet::new();
        let mut current = extends;
        while let Some(id) = current {
            if !visited_chain.insert(id) {
                break;
            }
            let node = self.registry.node(id);
            for key in node.properties.keys() {
                names.insert(key.clone());
            }
            let mut fields = Vec::new();
            let mut seen = HashSet::new();
            let mut visited = HashSet::new();
            for interface in &node.implements {
                self.collect_interface_fields(*interface, &mut fields, &mut seen, &mut visited);
            }
            for (key, _) in fields {
                names.insert(key);
            }
            current = node.extends;
        }
        names
    }

    /// Post-generation steps: `defaultConcreteType` validation, then the
    /// instance factories and the optional register class.
    fn finish(&mut self) -> Result<()> {
        self.validate_default_concrete_types()?;
        let factories = std::mem::take(&mut self.factories);
        let ctx = self.ctx();
        if self.options.emit_factories {
            factories.build_factories(&ctx, self.model)?;
        }
        if let Some(register) = &self.options.register_class {
            factory::build_register(&ctx, self.model, register)?;
        }
        Ok(())
    }

    /// Every identified interface carrying a `defaultConcreteType` must name
    /// a generated class assignable to it.
    fn validate_default_concrete_types(&self) -> Result<()> {
        for (fqn, id) in self.registry.identified() {
            let node = self.registry.node(id);
            if node.kind() != SchemaKind::Interface {
                continue;
            }
            let Some(concrete) = &node.default_concrete_type else {
                continue;
            };
            let interface_name = node
                .name
                .clone()
                .unwrap_or_else(|| names::split_fqn(fqn).1.to_string());
            if self.model.get_class(concrete).is_none() {
                return Err(GeneratorError::DefaultConcreteTypeMissing {
                    concrete: concrete.clone(),
                    interface: interface_name,
                });
            }
            if self.model.get_class(fqn).is_none() {
                return Err(GeneratorError::InterfaceTypeMissing(interface_name));
            }
            if !self.model.is_assignable_from(fqn, concrete) {
                return Err(GeneratorError::DefaultConcreteTypeNotAssignable {
                    concrete: concrete.clone(),
                    interface: fqn.to_string(),
                });
            }
        }
        Ok(())
    }
}
