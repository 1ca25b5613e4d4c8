//! Schema dependency graph
//!
//! Builds a directed graph over the identified schemas of a resolved
//! [`SchemaRegistry`]: one node per registered id, one edge per child slot
//! that lands on another registered schema. Anonymous sub-schemas collapse
//! into their nearest identified ancestor, so the graph stays at the
//! granularity of the classes the generator emits.
//!
//! The graph never feeds back into generation. It backs the `graph` CLI
//! command: dependency fan-out, reference cycles, and GraphViz DOT export.

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::debug;

use crate::registry::{SchemaId, SchemaNode, SchemaRegistry};
use crate::schema::{SchemaKind, SELF_REFERENCE};

/// Which child slot of the source schema produced an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Named property field type
    Property,
    /// additionalProperties map value type
    AdditionalProperties,
    /// items array element type
    Items,
    /// additionalItems array element type
    AdditionalItems,
    /// Map key type
    Key,
    /// Map value type
    Value,
    /// extends superclass
    Extends,
    /// implements interface
    Implements,
    /// $recursiveRef back to its anchor
    RecursiveRef,
}

impl EdgeKind {
    /// Label used for DOT edges and CLI listings.
    pub fn label(&self) -> &'static str {
        match self {
            EdgeKind::Property => "property",
            EdgeKind::AdditionalProperties => "additionalProperties",
            EdgeKind::Items => "items",
            EdgeKind::AdditionalItems => "additionalItems",
            EdgeKind::Key => "key",
            EdgeKind::Value => "value",
            EdgeKind::Extends => "extends",
            EdgeKind::Implements => "implements",
            EdgeKind::RecursiveRef => "recursiveRef",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a schema turns into, for DOT coloring and CLI listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeCategory {
    Class,
    Interface,
    Enumeration,
    Value,
}

/// Display data kept per node so DOT export does not need the registry.
#[derive(Debug, Clone)]
struct NodeMeta {
    label: String,
    category: NodeCategory,
}

/// Node in a closure result.
#[derive(Debug, Clone)]
pub struct ClosureNode {
    pub id: String,
    pub depth: usize,
    pub in_cycle: bool,
}

/// The schema dependency graph.
pub struct SchemaGraph {
    graph: DiGraph<String, EdgeKind>,
    node_indices: HashMap<String, NodeIndex>,
    meta: HashMap<String, NodeMeta>,
    cycles: Vec<Vec<String>>,
}

impl SchemaGraph {
    /// Build the graph over every identified schema in the registry.
    pub fn from_registry(registry: &SchemaRegistry) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut meta = HashMap::new();

        for (id, schema) in registry.identified() {
            let idx = graph.add_node(id.to_string());
            node_indices.insert(id.to_string(), idx);
            meta.insert(id.to_string(), Self::describe(id, registry.node(schema)));
        }

        for (id, schema) in registry.identified() {
            if let Some(&owner) = node_indices.get(id) {
                Self::link_subtree(registry, &mut graph, &node_indices, owner, schema);
            }
        }

        let mut cycles = Vec::new();
        for component in tarjan_scc(&graph) {
            let looped = component.len() > 1
                || component
                    .first()
                    .map_or(false, |&idx| graph.find_edge(idx, idx).is_some());
            if looped {
                cycles.push(
                    component
                        .iter()
                        .filter_map(|&idx| graph.node_weight(idx).cloned())
                        .collect(),
                );
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            cycles = cycles.len(),
            "built schema dependency graph"
        );

        Self {
            graph,
            node_indices,
            meta,
            cycles,
        }
    }

    /// Walk one identified schema's slots. Registered children become edges
    /// and stop the walk there; their own slots are covered by their own
    /// entry in the id index. Anonymous children keep the current owner.
    fn link_subtree(
        registry: &SchemaRegistry,
        graph: &mut DiGraph<String, EdgeKind>,
        node_indices: &HashMap<String, NodeIndex>,
        owner: NodeIndex,
        current: SchemaId,
    ) {
        for (kind, child) in Self::slot_targets(registry.node(current)) {
            let child_node = registry.node(child);
            if child_node.is_recursive_ref_instance {
                match child_node.id.as_deref().and_then(|id| node_indices.get(id)) {
                    Some(&anchor) => {
                        graph.add_edge(owner, anchor, EdgeKind::RecursiveRef);
                    }
                    None => debug!("skipping recursive reference to anonymous anchor"),
                }
                continue;
            }
            if child_node.reference.as_deref() == Some(SELF_REFERENCE) {
                graph.add_edge(owner, owner, kind);
                continue;
            }
            let identified = child_node
                .id
                .as_deref()
                .filter(|id| registry.lookup(id) == Some(child));
            match identified.and_then(|id| node_indices.get(id)) {
                Some(&target) => {
                    graph.add_edge(owner, target, kind);
                }
                None => Self::link_subtree(registry, graph, node_indices, owner, child),
            }
        }
    }

    /// Child slots paired with the edge kind they contribute, in document
    /// order.
    fn slot_targets(node: &SchemaNode) -> Vec<(EdgeKind, SchemaId)> {
        let mut slots: Vec<(EdgeKind, SchemaId)> = node
            .properties
            .values()
            .map(|&child| (EdgeKind::Property, child))
            .collect();
        slots.extend(
            node.additional_properties
                .map(|child| (EdgeKind::AdditionalProperties, child)),
        );
        slots.extend(node.items.map(|child| (EdgeKind::Items, child)));
        slots.extend(node.key.map(|child| (EdgeKind::Key, child)));
        slots.extend(node.value.map(|child| (EdgeKind::Value, child)));
        slots.extend(
            node.additional_items
                .map(|child| (EdgeKind::AdditionalItems, child)),
        );
        slots.extend(node.extends.map(|child| (EdgeKind::Extends, child)));
        slots.extend(node.implements.iter().map(|&child| (EdgeKind::Implements, child)));
        slots
    }

    fn describe(id: &str, node: &SchemaNode) -> NodeMeta {
        let label = node
            .name
            .clone()
            .unwrap_or_else(|| id.rsplit('.').next().unwrap_or(id).to_string());
        let category = if node.enum_values.is_some() {
            NodeCategory::Enumeration
        } else {
            match node.kind() {
                SchemaKind::Interface => NodeCategory::Interface,
                SchemaKind::Object => NodeCategory::Class,
                _ => NodeCategory::Value,
            }
        };
        NodeMeta { label, category }
    }

    // ========== Public API ==========

    /// Get schema count
    pub fn schema_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// All schema ids in registration order.
    pub fn schema_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// All edges as (source, target, kind) triples.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, EdgeKind)> {
        self.graph.edge_references().filter_map(|edge| {
            let source = self.graph.node_weight(edge.source())?;
            let target = self.graph.node_weight(edge.target())?;
            Some((source.as_str(), target.as_str(), *edge.weight()))
        })
    }

    /// Reference cycles: every strongly connected component with more than
    /// one member, plus single schemas that point back at themselves.
    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    /// Get immediate outgoing refs (dependencies)
    pub fn refs_out(&self, id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|edge| self.graph.node_weight(edge.target()))
            .map(String::as_str)
            .collect()
    }

    /// Get immediate incoming refs (dependents)
    pub fn refs_in(&self, id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, Direction::Incoming)
            .filter_map(|edge| self.graph.node_weight(edge.source()))
            .map(String::as_str)
            .collect()
    }

    /// Get transitive closure (all deps or dependents)
    pub fn closure(
        &self,
        id: &str,
        direction: Direction,
        max_depth: Option<usize>,
    ) -> Vec<ClosureNode> {
        let Some(&start) = self.node_indices.get(id) else {
            return Vec::new();
        };

        let cyclic: HashSet<&String> = self.cycles.iter().flatten().collect();
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![(start, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            if let Some(max) = max_depth {
                if depth > max {
                    continue;
                }
            }

            if !visited.insert(node) {
                continue;
            }

            if node != start {
                if let Some(node_id) = self.graph.node_weight(node) {
                    result.push(ClosureNode {
                        id: node_id.clone(),
                        depth,
                        in_cycle: cyclic.contains(node_id),
                    });
                }
            }

            for edge in self.graph.edges_directed(node, direction) {
                let next = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                stack.push((next, depth + 1));
            }
        }

        result.sort_by_key(|node| node.depth);
        result
    }

    /// Export the schema dependency graph to GraphViz DOT format
    pub fn to_dot(&self) -> String {
        let mut output = String::new();

        output.push_str("digraph SchemaGraph {\n");
        output.push_str("  rankdir=LR;\n");
        output.push_str("  bgcolor=\"#1e1e1e\";\n");
        output.push_str("  node [shape=box, style=\"filled,rounded\", fontname=\"Helvetica\", fontsize=10, fontcolor=\"white\", color=\"#404040\"];\n");
        output.push_str("  edge [fontname=\"Helvetica\", fontsize=8, fontcolor=\"#808080\", color=\"#808080\"];\n");
        output.push('\n');

        for id in self.graph.node_weights() {
            let Some(meta) = self.meta.get(id) else {
                continue;
            };
            let color = match meta.category {
                NodeCategory::Class => "#00BCD4",
                NodeCategory::Interface => "#9C27B0",
                NodeCategory::Enumeration => "#FF5722",
                NodeCategory::Value => "#607D8B",
            };
            output.push_str(&format!(
                "  \"{}\" [label=\"{}\", fillcolor=\"{}\"];\n",
                dot_id(id),
                meta.label,
                color
            ));
        }

        output.push('\n');

        for (source, target, kind) in self.edges() {
            let style = match kind {
                EdgeKind::RecursiveRef => ", style=dashed",
                _ => "",
            };
            output.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"{}];\n",
                dot_id(source),
                dot_id(target),
                kind.label(),
                style
            ));
        }

        output.push_str("}\n");
        output
    }
}

fn dot_id(id: &str) -> String {
    id.replace('.', "_").replace('-', "_").replace('/', "_")
}
