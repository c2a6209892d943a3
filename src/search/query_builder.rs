// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Builder - AST for the query string
//!
//! Composite nodes combine field clauses and other nodes; rendering turns
//! the tree into RediSearch query syntax with the minimal parentheses needed
//! to keep precedence intact.
//!
//! ```text
//! intersect   a b      ->  (a b)
//! union       a b      ->  (a|b)
//! disjunct    a b      ->  -(a b)
//! disjunct_union a b   ->  -(a|b)
//! optional    a b      ->  ~(a b)
//! single child         ->  no parentheses
//! ```
//!
//! # Example
//!
//! ```rust
//! use redisearch_codec::search::{intersect, union, disjunct, values::{between, lt}};
//!
//! let query = intersect()
//!     .add_node(union().add("name", ["mark", "dvir"]))
//!     .add("time", [between(100, 200)])
//!     .add_node(disjunct().add("created", [lt(1000)]));
//!
//! assert_eq!(
//!     query.to_string(),
//!     "(@name:(mark|dvir) @time:[100.0 200.0] -@created:[-inf (1000.0])"
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::values::Value;

/// Parenthesization policy applied while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParenMode {
    Always,
    Never,
    /// Wrap only when more than one child is joined.
    #[default]
    Default,
}

/// Kind of composite node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Intersect,
    Union,
    /// Negated intersection: `-(a b)`
    Disjunct,
    /// Negated union: `-(a|b)`
    DisjunctUnion,
    /// Scored, non-required intersection: `~(a b)`
    Optional,
}

impl NodeKind {
    pub fn join_str(self) -> &'static str {
        match self {
            NodeKind::Intersect | NodeKind::Disjunct | NodeKind::Optional => " ",
            NodeKind::Union | NodeKind::DisjunctUnion => "|",
        }
    }

    fn prefix(self) -> Option<&'static str> {
        match self {
            NodeKind::Disjunct | NodeKind::DisjunctUnion => Some("-"),
            NodeKind::Optional => Some("~"),
            NodeKind::Intersect | NodeKind::Union => None,
        }
    }
}

/// Field clause: `@field:value` or `@field:(v1 v2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueNode {
    pub field: String,
    pub values: Vec<Value>,
    /// Join string of the parent node, captured when the clause was added.
    join: String,
}

impl ValueNode {
    pub fn new(field: impl Into<String>, join: &str, values: Vec<Value>) -> Self {
        Self {
            field: field.into(),
            values,
            join: join.to_string(),
        }
    }

    fn field_prefix(&self) -> String {
        format!("@{}:", self.field)
    }

    fn render_combinable(&self, mode: ParenMode) -> String {
        let parens = self.values.len() > 1 || mode == ParenMode::Always;
        let joined = self
            .values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(&self.join);

        if parens {
            format!("{}({})", self.field_prefix(), joined)
        } else {
            format!("{}{}", self.field_prefix(), joined)
        }
    }

    // Non-combinable values (ranges, geo) each get their own `@field:`.
    // Several clauses are wrapped in every mode so a prefix covers all of them.
    fn render_separate(&self, mode: ParenMode) -> String {
        let parens = self.values.len() > 1 || mode == ParenMode::Always;
        let prefix = self.field_prefix();
        let joined = self
            .values
            .iter()
            .map(|v| format!("{}{}", prefix, v))
            .collect::<Vec<_>>()
            .join(&self.join);

        if parens {
            format!("({})", joined)
        } else {
            joined
        }
    }

    pub fn render(&self, mode: ParenMode) -> String {
        let combinable = self.values.first().map(Value::is_combinable).unwrap_or(true);
        if self.values.len() == 1 || combinable {
            self.render_combinable(mode)
        } else {
            self.render_separate(mode)
        }
    }
}

/// Any node of the query tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Group(QueryNode),
    Leaf(ValueNode),
}

impl Node {
    pub fn render(&self, mode: ParenMode) -> String {
        match self {
            Node::Group(group) => group.render(mode),
            Node::Leaf(leaf) => leaf.render(mode),
        }
    }
}

impl From<QueryNode> for Node {
    fn from(node: QueryNode) -> Self {
        Node::Group(node)
    }
}

impl From<ValueNode> for Node {
    fn from(node: ValueNode) -> Self {
        Node::Leaf(node)
    }
}

/// Composite node owning an ordered list of children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryNode {
    kind: NodeKind,
    children: Vec<Node>,
}

impl QueryNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Add a field clause. Multiple values are joined with this node's
    /// join string: `@name:(mark dvir)` for an intersection.
    pub fn add<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.children
            .push(Node::Leaf(ValueNode::new(field, self.kind.join_str(), values)));
        self
    }

    /// Add a nested node.
    pub fn add_node(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Add several nested nodes, keeping their order.
    pub fn add_nodes<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    fn should_use_parens(&self, mode: ParenMode) -> bool {
        match mode {
            ParenMode::Always => true,
            ParenMode::Never => false,
            ParenMode::Default => self.children.len() > 1,
        }
    }

    // Top-level clauses this node emits when rendered bare. Prefixed groups
    // and leaves count as one clause.
    fn clause_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::Group(group) if group.kind.prefix().is_none() => group.clause_count(),
                Node::Group(_) | Node::Leaf(_) => 1,
            })
            .sum()
    }

    fn render_body(&self, mode: ParenMode) -> String {
        let joined = self
            .children
            .iter()
            .map(|c| c.render(mode))
            .collect::<Vec<_>>()
            .join(self.kind.join_str());

        if self.should_use_parens(mode) {
            format!("({})", joined)
        } else {
            joined
        }
    }

    pub fn render(&self, mode: ParenMode) -> String {
        match self.kind.prefix() {
            None => self.render_body(mode),
            Some(prefix) => {
                // The prefix applies to one joined group; children render bare.
                let body = self.render_body(ParenMode::Never);
                if self.should_use_parens(mode) || self.clause_count() > 1 {
                    format!("{}({})", prefix, body)
                } else {
                    format!("{}{}", prefix, body)
                }
            }
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(ParenMode::Default))
    }
}

/// All children must match.
pub fn intersect() -> QueryNode {
    QueryNode::new(NodeKind::Intersect)
}

/// Any child may match.
pub fn union() -> QueryNode {
    QueryNode::new(NodeKind::Union)
}

/// None of the children may match as a whole.
pub fn disjunct() -> QueryNode {
    QueryNode::new(NodeKind::Disjunct)
}

/// No child may match.
pub fn disjunct_union() -> QueryNode {
    QueryNode::new(NodeKind::DisjunctUnion)
}

/// Children boost the score but are not required.
pub fn optional() -> QueryNode {
    QueryNode::new(NodeKind::Optional)
}
