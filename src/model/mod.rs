//! In-memory model of the generated Java declarations
//!
//! Emission handlers build classes up member by member; rendering to source
//! text happens only once a class is complete. Classes are looked up by
//! fully-qualified name, which is how recursive references close the loop
//! back onto a class that is still being populated.

pub mod builder;

pub use builder::SourceBuilder;

use std::collections::{HashMap, HashSet};

use crate::error::{GeneratorError, Result};

/// A Java type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    /// An unboxed primitive, e.g. `long`.
    Primitive(&'static str),
    /// A class or interface by fully-qualified name.
    Named(String),
    /// A generic instantiation such as `java.util.List<T>`.
    Parameterized { raw: String, args: Vec<JavaType> },
}

impl JavaType {
    pub fn named(name: impl Into<String>) -> Self {
        JavaType::Named(name.into())
    }

    pub fn object() -> Self {
        JavaType::named("java.lang.Object")
    }

    pub fn list_of(item: JavaType) -> Self {
        JavaType::Parameterized {
            raw: "java.util.List".to_string(),
            args: vec![item],
        }
    }

    pub fn set_of(item: JavaType) -> Self {
        JavaType::Parameterized {
            raw: "java.util.Set".to_string(),
            args: vec![item],
        }
    }

    pub fn map_of(key: JavaType, value: JavaType) -> Self {
        JavaType::Parameterized {
            raw: "java.util.Map".to_string(),
            args: vec![key, value],
        }
    }

    /// The erased class name, when there is one.
    pub fn fqn(&self) -> Option<&str> {
        match self {
            JavaType::Primitive(_) => None,
            JavaType::Named(name) => Some(name),
            JavaType::Parameterized { raw, .. } => Some(raw),
        }
    }

    /// Render for use inside `current_package`. Names from `java.lang` and
    /// the current package shorten to their simple name; everything else
    /// stays fully qualified so no import management is needed.
    pub fn render(&self, current_package: &str) -> String {
        match self {
            JavaType::Primitive(name) => (*name).to_string(),
            JavaType::Named(name) => simplify(name, current_package),
            JavaType::Parameterized { raw, args } => {
                let rendered: Vec<String> =
                    args.iter().map(|arg| arg.render(current_package)).collect();
                format!("{}<{}>", simplify(raw, current_package), rendered.join(", "))
            }
        }
    }
}

fn simplify(name: &str, current_package: &str) -> String {
    match name.rsplit_once('.') {
        Some((package, simple)) if package == "java.lang" || package == current_package => {
            simple.to_string()
        }
        _ => name.to_string(),
    }
}

/// What sort of declaration a [`JavaClass`] renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
}

impl ClassKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
        }
    }
}

/// One member field.
#[derive(Debug, Clone)]
pub struct JavaField {
    pub javadoc: Option<String>,
    pub modifiers: String,
    pub java_type: JavaType,
    pub name: String,
    pub initializer: Option<String>,
}

/// One method or constructor. A missing return type marks a constructor; a
/// missing body marks an abstract declaration.
#[derive(Debug, Clone)]
pub struct JavaMethod {
    pub javadoc: Option<String>,
    pub annotations: Vec<String>,
    pub modifiers: String,
    pub return_type: Option<JavaType>,
    pub name: String,
    pub params: Vec<(JavaType, String)>,
    pub throws: Vec<String>,
    /// Body statements with indentation baked relative to the body level.
    pub body: Option<Vec<String>>,
}

impl JavaMethod {
    pub fn new(modifiers: &str, return_type: Option<JavaType>, name: impl Into<String>) -> Self {
        Self {
            javadoc: None,
            annotations: Vec::new(),
            modifiers: modifiers.to_string(),
            return_type,
            name: name.into(),
            params: Vec::new(),
            throws: Vec::new(),
            body: Some(Vec::new()),
        }
    }
}

/// One enum constant.
#[derive(Debug, Clone)]
pub struct EnumConstant {
    pub name: String,
    pub javadoc: Option<String>,
}

/// One generated class, interface, or enum.
#[derive(Debug, Clone)]
pub struct JavaClass {
    pub package: String,
    pub name: String,
    pub kind: ClassKind,
    pub javadoc: Option<String>,
    pub extends: Option<JavaType>,
    pub implements: Vec<JavaType>,
    pub fields: Vec<JavaField>,
    pub methods: Vec<JavaMethod>,
    pub constants: Vec<EnumConstant>,
}

impl JavaClass {
    pub fn new(package: impl Into<String>, name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            kind,
            javadoc: None,
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constants: Vec::new(),
        }
    }

    pub fn fqn(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

/// Handle to a class in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(usize);

/// All classes generated in one run, indexed by fully-qualified name.
#[derive(Debug, Default)]
pub struct CodeModel {
    classes: Vec<JavaClass>,
    by_name: HashMap<String, ClassId>,
}

impl CodeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class to the model. Each fully-qualified name may only be
    /// defined once per run.
    pub fn define_class(&mut self, class: JavaClass) -> Result<ClassId> {
        let fqn = class.fqn();
        if self.by_name.contains_key(&fqn) {
            return Err(GeneratorError::DuplicateClass(fqn));
        }
        let id = ClassId(self.classes.len());
        self.classes.push(class);
        self.by_name.insert(fqn, id);
        Ok(id)
    }

    pub fn get_class(&self, fqn: &str) -> Option<ClassId> {
        self.by_name.get(fqn).copied()
    }

    pub fn class(&self, id: ClassId) -> &JavaClass {
        &self.classes[id.0]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut JavaClass {
        &mut self.classes[id.0]
    }

    /// Classes in definition order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &JavaClass)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(index, class)| (ClassId(index), class))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Whether `concrete` is `target` or reaches it through its extends and
    /// implements chains. Only classes defined in this model are walked.
    pub fn is_assignable_from(&self, target: &str, concrete: &str) -> bool {
        let mut queue = vec![concrete.to_string()];
        let mut seen = HashSet::new();
        while let Some(current) = queue.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if current == target {
                return true;
            }
            if let Some(id) = self.get_class(&current) {
                let class = self.class(id);
                if let Some(fqn) = class.extends.as_ref().and_then(JavaType::fqn) {
                    queue.push(fqn.to_string());
                }
                for interface in &class.implements {
                    if let Some(fqn) = interface.fqn() {
                        queue.push(fqn.to_string());
                    }
                }
            }
        }
        false
    }

    /// Render one class as a complete compilation unit.
    pub fn render_unit(&self, id: ClassId) -> String {
        let class = self.class(id);
        let mut builder = SourceBuilder::new();
        if !class.package.is_empty() {
            builder.push_line(&format!("package {};", class.package));
            builder.blank_line();
        }
        builder.push_lines(&self.render_class(class));
        builder.build()
    }

    fn render_class(&self, class: &JavaClass) -> String {
        let mut builder = SourceBuilder::new();
        if let Some(javadoc) = &class.javadoc {
            push_javadoc(&mut builder, javadoc);
        }

        let mut header = String::new();
        header.push_str("public ");
        header.push_str(class.kind.keyword());
        header.push(' ');
        header.push_str(&class.name);
        if let Some(extends) = &class.extends {
            header.push_str(" extends ");
            header.push_str(&extends.render(&class.package));
        }
        if !class.implements.is_empty() {
            // An interface extends its super-interfaces.
            let clause = match class.kind {
                ClassKind::Interface => "extends",
                _ => "implements",
            };
            let rendered: Vec<String> = class
                .implements
                .iter()
                .map(|interface| interface.render(&class.package))
                .collect();
            header.push_str(&format!(" {} {}", clause, rendered.join(", ")));
        }
        builder.push_line(&format!("{} {{", header.trim()));
        builder.indent();

        let last = class.constants.len().saturating_sub(1);
        for (index, constant) in class.constants.iter().enumerate() {
            if let Some(javadoc) = &constant.javadoc {
                push_javadoc(&mut builder, javadoc);
            }
            if index == last {
                builder.push_line(&constant.name);
            } else {
                builder.push_line(&format!("{},", constant.name));
            }
        }

        for field in &class.fields {
            if let Some(javadoc) = &field.javadoc {
                push_javadoc(&mut builder, javadoc);
            }
            let rendered = field.java_type.render(&class.package);
            match &field.initializer {
                Some(initializer) => builder.push_line(&format!(
                    "{} {} {} = {};",
                    field.modifiers, rendered, field.name, initializer
                )),
                None => builder.push_line(&format!(
                    "{} {} {};",
                    field.modifiers, rendered, field.name
                )),
            }
        }

        if !class.fields.is_empty() && !class.methods.is_empty() {
            builder.blank_line();
        }
        for (index, method) in class.methods.iter().enumerate() {
            builder.push_lines(&self.render_method(method, &class.package));
            if index + 1 < class.methods.len() {
                builder.blank_line();
            }
        }

        builder.dedent();
        builder.push_line("}");
        builder.build()
    }

    fn render_method(&self, method: &JavaMethod, package: &str) -> String {
        let mut builder = SourceBuilder::new();
        if let Some(javadoc) = &method.javadoc {
            push_javadoc(&mut builder, javadoc);
        }
        for annotation in &method.annotations {
            builder.push_line(annotation);
        }

        let mut header = String::new();
        if !method.modifiers.is_empty() {
            header.push_str(&method.modifiers);
            header.push(' ');
        }
        if let Some(return_type) = &method.return_type {
            header.push_str(&return_type.render(package));
            header.push(' ');
        }
        header.push_str(&method.name);
        header.push('(');
        let params: Vec<String> = method
            .params
            .iter()
            .map(|(java_type, name)| format!("{} {}", java_type.render(package), name))
            .collect();
        header.push_str(&params.join(", "));
        header.push(')');
        if !method.throws.is_empty() {
            let throws: Vec<String> = method
                .throws
                .iter()
                .map(|exception| simplify(exception, package))
                .collect();
            header.push_str(&format!(" throws {}", throws.join(", ")));
        }

        match &method.body {
            None => {
                header.push(';');
                builder.push_line(&header);
            }
            Some(lines) => {
                builder.push_line(&format!("{} {{", header));
                builder.indent();
                for line in lines {
                    if line.is_empty() {
                        builder.blank_line();
                    } else {
                        builder.push_line(line);
                    }
                }
                builder.dedent();
                builder.push_line("}");
            }
        }
        builder.build()
    }
}

fn push_javadoc(builder: &mut SourceBuilder, text: &str) {
    builder.push_line("/**");
    for line in text.lines() {
        if line.is_empty() {
            builder.push_line(" *");
        } else {
            builder.push_line(&format!(" * {}", line));
        }
    }
    builder.push_line(" */");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_class() -> JavaClass {
        let mut class = JavaClass::new("org.example", "Sample", ClassKind::Class);
        class.fields.push(JavaField {
            javadoc: Some("The display name".to_string()),
            modifiers: "private".to_string(),
            java_type: JavaType::named("java.lang.String"),
            name: "name".to_string(),
            initializer: None,
        });
        let mut getter = JavaMethod::new(
            "public",
            Some(JavaType::named("java.lang.String")),
            "getName",
        );
        getter.body = Some(vec!["return name;".to_string()]);
        class.methods.push(getter);
        class
    }

    #[test]
    fn test_define_and_lookup() {
        let mut model = CodeModel::new();
        let id = model.define_class(sample_class()).unwrap();
        assert_eq!(model.get_class("org.example.Sample"), Some(id));
        assert_eq!(model.class(id).name, "Sample");
    }

    #[test]
    fn test_duplicate_class_fails() {
        let mut model = CodeModel::new();
        model.define_class(sample_class()).unwrap();
        let err = model.define_class(sample_class()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "A class named org.example.Sample was already defined"
        );
    }

    #[test]
    fn test_render_class() {
        let mut model = CodeModel::new();
        let id = model.define_class(sample_class()).unwrap();
        let source = model.render_unit(id);

        assert!(source.starts_with("package org.example;\n\n"));
        assert!(source.contains("public class Sample {"));
        assert!(source.contains("    private String name;"));
        assert!(source.contains("    public String getName() {"));
        assert!(source.contains("        return name;"));
        assert!(source.contains("The display name"));
        assert!(source.trim_end().ends_with('}'));
    }

    #[test]
    fn test_render_interface_members() {
        let mut class = JavaClass::new("org.example", "HasName", ClassKind::Interface);
        class
            .implements
            .push(JavaType::named("org.example.Marker"));
        let mut method = JavaMethod::new(
            "",
            Some(JavaType::named("java.lang.String")),
            "getName",
        );
        method.body = None;
        class.methods.push(method);

        let mut model = CodeModel::new();
        let id = model.define_class(class).unwrap();
        let source = model.render_unit(id);

        assert!(source.contains("public interface HasName extends Marker {"));
        assert!(source.contains("    String getName();"));
    }

    #[test]
    fn test_render_enum_constants() {
        let mut class = JavaClass::new("org.example", "Color", ClassKind::Enum);
        for name in ["RED", "GREEN", "BLUE"] {
            class.constants.push(EnumConstant {
                name: name.to_string(),
                javadoc: None,
            });
        }
        let mut model = CodeModel::new();
        let id = model.define_class(class).unwrap();
        let source = model.render_unit(id);

        assert!(source.contains("public enum Color {"));
        assert!(source.contains("    RED,"));
        assert!(source.contains("    GREEN,"));
        assert!(source.contains("    BLUE\n"));
    }

    #[test]
    fn test_type_rendering() {
        assert_eq!(
            JavaType::named("java.lang.String").render("org.example"),
            "String"
        );
        assert_eq!(
            JavaType::named("org.example.Pet").render("org.example"),
            "Pet"
        );
        assert_eq!(
            JavaType::named("org.other.Pet").render("org.example"),
            "org.other.Pet"
        );
        assert_eq!(JavaType::Primitive("long").render("org.example"), "long");
        assert_eq!(
            JavaType::list_of(JavaType::named("org.example.Pet")).render("org.example"),
            "java.util.List<Pet>"
        );
        assert_eq!(
            JavaType::map_of(
                JavaType::named("java.lang.String"),
                JavaType::named("java.lang.Long")
            )
            .render("org.other"),
            "java.util.Map<String, Long>"
        );
    }

    #[test]
    fn test_is_assignable_from() {
        let mut model = CodeModel::new();
        let mut base = JavaClass::new("org.example", "Entity", ClassKind::Interface);
        base.implements.clear();
        model.define_class(base).unwrap();

        let mut middle = JavaClass::new("org.example", "Animal", ClassKind::Class);
        middle
            .implements
            .push(JavaType::named("org.example.Entity"));
        model.define_class(middle).unwrap();

        let mut leaf = JavaClass::new("org.example", "Dog", ClassKind::Class);
        leaf.extends = Some(JavaType::named("org.example.Animal"));
        model.define_class(leaf).unwrap();

        assert!(model.is_assignable_from("org.example.Entity", "org.example.Dog"));
        assert!(model.is_assignable_from("org.example.Animal", "org.example.Dog"));
        assert!(model.is_assignable_from("org.example.Dog", "org.example.Dog"));
        assert!(!model.is_assignable_from("org.example.Dog", "org.example.Entity"));
    }
}
