//! Schema registry and reference resolution
//!
//! Parsed schema trees are interned into an arena of [`SchemaNode`]s whose
//! child slots hold [`SchemaId`] links instead of nested values. Resolution
//! then rewrites every `$ref` / `$recursiveRef` slot to point at the actual
//! target node, so downstream code never sees a pointer again.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{GeneratorError, Result};
use crate::schema::{
    EnumValue, ObjectSchema, SchemaFormat, SchemaKind, SELF_REFERENCE,
};

/// Handle to a node in the registry arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaId(usize);

impl SchemaId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One interned schema node.
///
/// Scalar facets are copied from the parsed document; child slots hold arena
/// links. After resolution a slot either points at the node interned from the
/// inline sub-document, or at the identified target of a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub id: Option<String>,
    pub schema_type: Option<SchemaKind>,
    pub name: Option<String>,
    pub package_name: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub recursive_ref: Option<String>,
    pub recursive_anchor: bool,
    /// Set on anchor copies that stand in for a `$recursiveRef`. Marker nodes
    /// are never registered, re-resolved, or traversed.
    pub is_recursive_ref_instance: bool,
    pub properties: IndexMap<String, SchemaId>,
    pub additional_properties: Option<SchemaId>,
    pub items: Option<SchemaId>,
    pub additional_items: Option<SchemaId>,
    pub key: Option<SchemaId>,
    pub value: Option<SchemaId>,
    pub extends: Option<SchemaId>,
    pub implements: Vec<SchemaId>,
    pub enum_values: Option<Vec<EnumValue>>,
    pub format: Option<SchemaFormat>,
    pub unique_items: bool,
    pub required: bool,
    pub default_value: Option<serde_json::Value>,
    pub default_concrete_type: Option<String>,
}

impl SchemaNode {
    pub(crate) fn from_scalars(schema: &ObjectSchema) -> Self {
        Self {
            id: schema.id.clone(),
            schema_type: schema.schema_type,
            name: schema.name.clone(),
            package_name: schema.package_name.clone(),
            description: schema.description.clone(),
            reference: schema.reference.clone(),
            recursive_ref: schema.recursive_ref.clone(),
            recursive_anchor: schema.recursive_anchor,
            is_recursive_ref_instance: false,
            properties: IndexMap::new(),
            additional_properties: None,
            items: None,
            additional_items: None,
            key: None,
            value: None,
            extends: None,
            implements: Vec::new(),
            enum_values: schema.enum_values.clone(),
            format: schema.format,
            unique_items: schema.unique_items,
            required: schema.required,
            default_value: schema.default_value.clone(),
            default_concrete_type: schema.default_concrete_type.clone(),
        }
    }

    /// The effective kind; nodes without a `type` key describe objects.
    pub fn kind(&self) -> SchemaKind {
        self.schema_type.unwrap_or(SchemaKind::Object)
    }

    pub fn is_reference(&self) -> bool {
        self.reference.is_some() || self.recursive_ref.is_some()
    }

    /// The package this node's classes land in: an explicit `packageName`,
    /// otherwise the package portion of the id.
    pub fn package(&self) -> Option<String> {
        self.package_name.clone().or_else(|| {
            self.id
                .as_deref()
                .and_then(|id| id.rsplit_once('.'))
                .map(|(package, _)| package.to_string())
        })
    }
}

/// Arena of interned schema nodes plus the id registry built over them.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    nodes: Vec<SchemaNode>,
    index: IndexMap<String, SchemaId>,
    roots: Vec<SchemaId>,
}

impl SchemaRegistry {
    /// Intern and resolve a set of root schemas.
    ///
    /// Registration is pre-order: a parent claims its id before any of its
    /// sub-schemas, and a second claim on the same id fails the whole run.
    /// Resolution shares one recursion-anchor stack across all roots, so an
    /// anchor opened by one document never leaks into the next.
    pub fn resolve(schemas: &[ObjectSchema]) -> Result<Self> {
        let mut registry = Self::default();

        let mut interned = Vec::with_capacity(schemas.len());
        for schema in schemas {
            interned.push(registry.intern(schema)?);
        }
        debug!(
            nodes = registry.nodes.len(),
            identified = registry.index.len(),
            "interned schema set"
        );

        let mut anchors: Vec<SchemaId> = Vec::new();
        let mut visited: HashSet<SchemaId> = HashSet::new();
        for root in interned {
            let resolved = registry.replace_reference(root, &anchors)?;
            registry.roots.push(resolved);
            registry.replace_children(resolved, &mut anchors, &mut visited)?;
        }

        registry.synthesize_nested_ids();
        Ok(registry)
    }

    pub fn node(&self, id: SchemaId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: SchemaId) -> &mut SchemaNode {
        &mut self.nodes[id.0]
    }

    /// Look up an identified schema by id.
    pub fn lookup(&self, id: &str) -> Option<SchemaId> {
        self.index.get(id).copied()
    }

    /// Root schemas, post-resolution. A root that was itself a reference
    /// appears here as its target.
    pub fn roots(&self) -> &[SchemaId] {
        &self.roots
    }

    /// All identified schemas in registration order.
    pub fn identified(&self) -> impl Iterator<Item = (&str, SchemaId)> {
        self.index.iter().map(|(id, node)| (id.as_str(), *node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The registered id closest to `wanted`, for diagnostics.
    pub fn closest_id(&self, wanted: &str) -> Option<String> {
        use fuzzy_matcher::skim::SkimMatcherV2;
        use fuzzy_matcher::FuzzyMatcher;

        let matcher = SkimMatcherV2::default();
        self.index
            .keys()
            .filter_map(|id| matcher.fuzzy_match(id, wanted).map(|score| (score, id)))
            .max_by_key(|(score, _)| *score)
            .map(|(_, id)| id.clone())
    }

    fn intern(&mut self, schema: &ObjectSchema) -> Result<SchemaId> {
        let id = SchemaId(self.nodes.len());
        self.nodes.push(SchemaNode::from_scalars(schema));
        if let Some(name) = &schema.id {
            if self.index.contains_key(name) {
                return Err(GeneratorError::DuplicateId(name.clone()));
            }
            self.index.insert(name.clone(), id);
        }

        let mut properties = IndexMap::with_capacity(schema.properties.len());
        for (key, child) in &schema.properties {
            properties.insert(key.clone(), self.intern(child)?);
        }
        let additional_properties = match &schema.additional_properties {
            Some(child) => Some(self.intern(child)?),
            None => None,
        };
        let items = match &schema.items {
            Some(child) => Some(self.intern(child)?),
            None => None,
        };
        let key = match &schema.key {
            Some(child) => Some(self.intern(child)?),
            None => None,
        };
        let value = match &schema.value {
            Some(child) => Some(self.intern(child)?),
            None => None,
        };
        let additional_items = match &schema.additional_items {
            Some(child) => Some(self.intern(child)?),
            None => None,
        };
        let extends = match &schema.extends {
            Some(child) => Some(self.intern(child)?),
            None => None,
        };
        let mut implements = Vec::new();
        if let Some(interfaces) = &schema.implements {
            for interface in interfaces {
                implements.push(self.intern(interface)?);
            }
        }

        let node = self.node_mut(id);
        node.properties = properties;
        node.additional_properties = additional_properties;
        node.items = items;
        node.key = key;
        node.value = value;
        node.additional_items = additional_items;
        node.extends = extends;
        node.implements = implements;
        Ok(id)
    }

    /// Child slots in document order, as currently linked.
    fn child_ids(&self, id: SchemaId) -> Vec<SchemaId> {
        let node = &self.nodes[id.0];
        let mut children: Vec<SchemaId> = node.properties.values().copied().collect();
        children.extend(node.additional_properties);
        children.extend(node.items);
        children.extend(node.key);
        children.extend(node.value);
        children.extend(node.additional_items);
        children.extend(node.extends);
        children.extend(node.implements.iter().copied());
        children
    }

    /// Resolve all references below `id`, children before the node's own
    /// slots. A node carrying `$recursiveAnchor` is on the anchor stack for
    /// exactly the span of its subtree.
    fn replace_children(
        &mut self,
        id: SchemaId,
        anchors: &mut Vec<SchemaId>,
        visited: &mut HashSet<SchemaId>,
    ) -> Result<()> {
        if !visited.insert(id) {
            return Ok(());
        }
        let pushed = self.nodes[id.0].recursive_anchor;
        if pushed {
            anchors.push(id);
        }
        for child in self.child_ids(id) {
            self.replace_children(child, anchors, visited)?;
        }
        self.replace_slots(id, anchors)?;
        if pushed {
            anchors.pop();
        }
        Ok(())
    }

    /// Rewrite each of this node's slots through [`Self::replace_reference`].
    fn replace_slots(&mut self, id: SchemaId, anchors: &[SchemaId]) -> Result<()> {
        let entries: Vec<(String, SchemaId)> = self.nodes[id.0]
            .properties
            .iter()
            .map(|(key, child)| (key.clone(), *child))
            .collect();
        let mut properties = IndexMap::with_capacity(entries.len());
        for (key, child) in entries {
            properties.insert(key, self.replace_reference(child, anchors)?);
        }
        self.nodes[id.0].properties = properties;

        if let Some(child) = self.nodes[id.0].additional_properties {
            let resolved = self.replace_reference(child, anchors)?;
            self.nodes[id.0].additional_properties = Some(resolved);
        }
        if let Some(child) = self.nodes[id.0].items {
            let resolved = self.replace_reference(child, anchors)?;
            self.nodes[id.0].items = Some(resolved);
        }
        if let Some(child) = self.nodes[id.0].key {
            let resolved = self.replace_reference(child, anchors)?;
            self.nodes[id.0].key = Some(resolved);
        }
        if let Some(child) = self.nodes[id.0].value {
            let resolved = self.replace_reference(child, anchors)?;
            self.nodes[id.0].value = Some(resolved);
        }
        if let Some(child) = self.nodes[id.0].additional_items {
            let resolved = self.replace_reference(child, anchors)?;
            self.nodes[id.0].additional_items = Some(resolved);
        }
        if let Some(child) = self.nodes[id.0].extends {
            let resolved = self.replace_reference(child, anchors)?;
            self.nodes[id.0].extends = Some(resolved);
        }
        let interfaces = self.nodes[id.0].implements.clone();
        if !interfaces.is_empty() {
            let mut resolved = Vec::with_capacity(interfaces.len());
            for interface in interfaces {
                resolved.push(self.replace_reference(interface, anchors)?);
            }
            self.nodes[id.0].implements = resolved;
        }
        Ok(())
    }

    /// Resolve one slot. Non-reference nodes pass through unchanged, a
    /// `$recursiveRef` of `"#"` becomes a marker copy of the nearest anchor,
    /// a `$ref` of `"#"` is left for the type pass to close over the current
    /// document, and anything else is looked up in the id index.
    fn replace_reference(&mut self, id: SchemaId, anchors: &[SchemaId]) -> Result<SchemaId> {
        let node = &self.nodes[id.0];
        if !node.is_reference() {
            return Ok(id);
        }
        if node.recursive_ref.as_deref() == Some(SELF_REFERENCE) {
            let anchor = anchors
                .last()
                .copied()
                .ok_or(GeneratorError::RecursiveRefWithoutAnchor)?;
            return Ok(self.clone_as_recursive_instance(anchor));
        }
        if node.reference.as_deref() == Some(SELF_REFERENCE) {
            return Ok(id);
        }
        let wanted = node
            .reference
            .clone()
            .or_else(|| node.recursive_ref.clone())
            .unwrap_or_default();
        match self.index.get(&wanted) {
            Some(target) => Ok(*target),
            None => Err(GeneratorError::UnresolvedReference {
                closest: self.closest_id(&wanted),
                reference: wanted,
            }),
        }
    }

    /// Copy the anchor node and flag the copy as a recursive instance. The
    /// marker enters the arena so a slot can hold it, but never the index.
    fn clone_as_recursive_instance(&mut self, anchor: SchemaId) -> SchemaId {
        let mut copy = self.nodes[anchor.0].clone();
        copy.is_recursive_ref_instance = true;
        let id = SchemaId(self.nodes.len());
        debug!(anchor = ?self.nodes[anchor.0].id, "created recursive reference marker");
        self.nodes.push(copy);
        id
    }

    /// Give anonymous named property schemas an id in their parent's package,
    /// so they generate nested classes with a stable fully-qualified name.
    /// Synthesized ids never enter the index.
    fn synthesize_nested_ids(&mut self) {
        let roots = self.roots.clone();
        let mut visited = HashSet::new();
        for root in roots {
            self.synthesize_in(root, None, &mut visited);
        }
    }

    fn synthesize_in(
        &mut self,
        id: SchemaId,
        inherited: Option<String>,
        visited: &mut HashSet<SchemaId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        if self.nodes[id.0].is_recursive_ref_instance {
            return;
        }
        let package = self.nodes[id.0].package().or(inherited);
        let children: Vec<SchemaId> = self.nodes[id.0].properties.values().copied().collect();
        for child in children {
            if self.nodes[child.0].id.is_none() {
                if let (Some(package), Some(name)) = (&package, &self.nodes[child.0].name) {
                    self.nodes[child.0].id = Some(format!("{}.{}", package, name));
                }
            }
        }
        for child in self.child_ids(id) {
            self.synthesize_in(child, package.clone(), visited);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ObjectSchema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_duplicate_id_fails() {
        let schemas = vec![
            parse(json!({ "id": "org.example.Pet", "type": "object" })),
            parse(json!({ "id": "org.example.Pet", "type": "object" })),
        ];
        let err = SchemaRegistry::resolve(&schemas).unwrap_err();
        assert_eq!(
            err.to_string(),
            "More than one schema was found with id=org.example.Pet"
        );
    }

    #[test]
    fn test_duplicate_id_between_root_and_nested() {
        let schemas = vec![
            parse(json!({
                "id": "org.example.Owner",
                "type": "object",
                "properties": {
                    "pet": { "id": "org.example.Pet", "type": "object" }
                }
            })),
            parse(json!({ "id": "org.example.Pet", "type": "object" })),
        ];
        assert!(SchemaRegistry::resolve(&schemas).is_err());
    }

    #[test]
    fn test_reference_slot_rewritten_to_target() {
        let schemas = vec![
            parse(json!({ "id": "org.example.Pet", "type": "object" })),
            parse(json!({
                "id": "org.example.Owner",
                "type": "object",
                "properties": {
                    "pet": { "$ref": "org.example.Pet" }
                }
            })),
        ];
        let registry = SchemaRegistry::resolve(&schemas).unwrap();
        let owner = registry.lookup("org.example.Owner").unwrap();
        let pet_slot = registry.node(owner).properties["pet"];
        assert_eq!(pet_slot, registry.lookup("org.example.Pet").unwrap());
    }

    #[test]
    fn test_forward_reference_resolves() {
        // The target is registered after the referencing schema.
        let schemas = vec![
            parse(json!({
                "id": "org.example.Owner",
                "type": "object",
                "properties": {
                    "pet": { "$ref": "org.example.Pet" }
                }
            })),
            parse(json!({ "id": "org.example.Pet", "type": "object" })),
        ];
        let registry = SchemaRegistry::resolve(&schemas).unwrap();
        let owner = registry.lookup("org.example.Owner").unwrap();
        let pet_slot = registry.node(owner).properties["pet"];
        assert!(!registry.node(pet_slot).is_reference());
    }

    #[test]
    fn test_unresolved_reference_fails() {
        let schemas = vec![parse(json!({
            "id": "org.example.Owner",
            "type": "object",
            "properties": {
                "pet": { "$ref": "org.example.Dog" }
            }
        }))];
        let err = SchemaRegistry::resolve(&schemas).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot find the referenced schema: org.example.Dog"
        );
    }

    #[test]
    fn test_unresolved_reference_suggests_closest_id() {
        let schemas = vec![
            parse(json!({ "id": "org.example.PetRecord", "type": "object" })),
            parse(json!({
                "id": "org.example.Owner",
                "type": "object",
                "properties": {
                    "pet": { "$ref": "org.example.PetRecrod" }
                }
            })),
        ];
        let err = SchemaRegistry::resolve(&schemas).unwrap_err();
        match err {
            GeneratorError::UnresolvedReference { closest, .. } => {
                assert_eq!(closest.as_deref(), Some("org.example.PetRecord"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_recursive_ref_becomes_marker() {
        let schemas = vec![parse(json!({
            "id": "org.example.TreeNode",
            "type": "object",
            "$recursiveAnchor": true,
            "properties": {
                "left": { "$recursiveRef": "#" },
                "right": { "$recursiveRef": "#" }
            }
        }))];
        let registry = SchemaRegistry::resolve(&schemas).unwrap();
        let node = registry.lookup("org.example.TreeNode").unwrap();

        let left = registry.node(registry.node(node).properties["left"]);
        let right = registry.node(registry.node(node).properties["right"]);
        assert!(left.is_recursive_ref_instance);
        assert!(right.is_recursive_ref_instance);
        assert_eq!(left.id.as_deref(), Some("org.example.TreeNode"));
        // Each occurrence gets its own marker, distinct from the anchor.
        assert_ne!(registry.node(node).properties["left"], node);
        assert_ne!(
            registry.node(node).properties["left"],
            registry.node(node).properties["right"]
        );
        // The anchor itself is never flagged.
        assert!(!registry.node(node).is_recursive_ref_instance);
    }

    #[test]
    fn test_recursive_ref_binds_nearest_anchor() {
        let schemas = vec![parse(json!({
            "id": "org.example.Outer",
            "type": "object",
            "$recursiveAnchor": true,
            "properties": {
                "inner": {
                    "id": "org.example.Inner",
                    "type": "object",
                    "$recursiveAnchor": true,
                    "properties": {
                        "next": { "$recursiveRef": "#" }
                    }
                },
                "self": { "$recursiveRef": "#" }
            }
        }))];
        let registry = SchemaRegistry::resolve(&schemas).unwrap();
        let outer = registry.lookup("org.example.Outer").unwrap();
        let inner = registry.lookup("org.example.Inner").unwrap();

        let next = registry.node(registry.node(inner).properties["next"]);
        assert_eq!(next.id.as_deref(), Some("org.example.Inner"));
        let this = registry.node(registry.node(outer).properties["self"]);
        assert_eq!(this.id.as_deref(), Some("org.example.Outer"));
    }

    #[test]
    fn test_recursive_ref_without_anchor_fails() {
        let schemas = vec![parse(json!({
            "id": "org.example.Broken",
            "type": "object",
            "properties": {
                "next": { "$recursiveRef": "#" }
            }
        }))];
        let err = SchemaRegistry::resolve(&schemas).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Found a $recursiveRef but did not find a matching $recursiveAnchor"
        );
    }

    #[test]
    fn test_anchor_does_not_leak_across_roots() {
        let schemas = vec![
            parse(json!({
                "id": "org.example.Anchored",
                "type": "object",
                "$recursiveAnchor": true,
                "properties": {
                    "next": { "$recursiveRef": "#" }
                }
            })),
            parse(json!({
                "id": "org.example.Loose",
                "type": "object",
                "properties": {
                    "next": { "$recursiveRef": "#" }
                }
            })),
        ];
        let err = SchemaRegistry::resolve(&schemas).unwrap_err();
        assert!(matches!(err, GeneratorError::RecursiveRefWithoutAnchor));
    }

    #[test]
    fn test_self_reference_left_in_place() {
        let schemas = vec![parse(json!({
            "id": "org.example.Linked",
            "type": "object",
            "properties": {
                "next": { "$ref": "#" }
            }
        }))];
        let registry = SchemaRegistry::resolve(&schemas).unwrap();
        let linked = registry.lookup("org.example.Linked").unwrap();
        let next = registry.node(registry.node(linked).properties["next"]);
        assert_eq!(next.reference.as_deref(), Some("#"));
    }

    #[test]
    fn test_root_reference_resolves_to_target() {
        let schemas = vec![
            parse(json!({ "id": "org.example.Pet", "type": "object" })),
            parse(json!({ "$ref": "org.example.Pet" })),
        ];
        let registry = SchemaRegistry::resolve(&schemas).unwrap();
        assert_eq!(
            registry.roots()[1],
            registry.lookup("org.example.Pet").unwrap()
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let schemas = vec![
            parse(json!({ "id": "org.example.Pet", "type": "object" })),
            parse(json!({
                "id": "org.example.Owner",
                "type": "object",
                "$recursiveAnchor": true,
                "properties": {
                    "pet": { "$ref": "org.example.Pet" },
                    "friend": { "$recursiveRef": "#" }
                }
            })),
        ];
        let first = SchemaRegistry::resolve(&schemas).unwrap();
        let second = SchemaRegistry::resolve(&schemas).unwrap();
        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.roots, second.roots);
    }

    #[test]
    fn test_mutual_references_resolve() {
        let schemas = vec![
            parse(json!({
                "id": "org.example.Left",
                "type": "object",
                "properties": { "other": { "$ref": "org.example.Right" } }
            })),
            parse(json!({
                "id": "org.example.Right",
                "type": "object",
                "properties": { "other": { "$ref": "org.example.Left" } }
            })),
        ];
        let registry = SchemaRegistry::resolve(&schemas).unwrap();
        let left = registry.lookup("org.example.Left").unwrap();
        let right = registry.lookup("org.example.Right").unwrap();
        assert_eq!(registry.node(left).properties["other"], right);
        assert_eq!(registry.node(right).properties["other"], left);
    }

    #[test]
    fn test_extends_and_implements_slots_resolve() {
        let schemas = vec![
            parse(json!({ "id": "org.example.Base", "type": "object" })),
            parse(json!({ "id": "org.example.Marker", "type": "interface" })),
            parse(json!({
                "id": "org.example.Derived",
                "type": "object",
                "extends": { "$ref": "org.example.Base" },
                "implements": [ { "$ref": "org.example.Marker" } ]
            })),
        ];
        let registry = SchemaRegistry::resolve(&schemas).unwrap();
        let derived = registry.lookup("org.example.Derived").unwrap();
        assert_eq!(
            registry.node(derived).extends,
            registry.lookup("org.example.Base")
        );
        assert_eq!(
            registry.node(derived).implements[0],
            registry.lookup("org.example.Marker").unwrap()
        );
    }

    #[test]
    fn test_nested_id_synthesis() {
        let schemas = vec![parse(json!({
            "id": "org.example.Owner",
            "type": "object",
            "properties": {
                "address": {
                    "type": "object",
                    "name": "Address",
                    "properties": { "street": { "type": "string" } }
                },
                "nickname": { "type": "string" }
            }
        }))];
        let registry = SchemaRegistry::resolve(&schemas).unwrap();
        let owner = registry.lookup("org.example.Owner").unwrap();

        let address = registry.node(registry.node(owner).properties["address"]);
        assert_eq!(address.id.as_deref(), Some("org.example.Address"));
        // Synthesized ids are not registered.
        assert!(registry.lookup("org.example.Address").is_none());

        let nickname = registry.node(registry.node(owner).properties["nickname"]);
        assert_eq!(nickname.id, None);
    }

    #[test]
    fn test_marker_not_registered() {
        let schemas = vec![parse(json!({
            "id": "org.example.TreeNode",
            "type": "object",
            "$recursiveAnchor": true,
            "properties": {
                "child": { "$recursiveRef": "#" }
            }
        }))];
        let registry = SchemaRegistry::resolve(&schemas).unwrap();
        let anchor = registry.lookup("org.example.TreeNode").unwrap();
        let marker = registry.node(anchor).properties["child"];
        assert_ne!(marker, anchor);
        assert_eq!(registry.identified().count(), 1);
    }
}
