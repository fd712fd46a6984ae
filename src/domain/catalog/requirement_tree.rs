//! Requirement Tree - Incremental evaluator for AND/OR requirement expressions.
//!
//! Nodes live in an arena addressed by [`NodeId`]. Each node keeps a
//! non-owning parent handle, its settled outcome and a cache of the attribute
//! titles that can still change that outcome.
//!
//! # Invariants
//!
//! - A node is relevant exactly while its outcome is [`Truth::Undetermined`].
//! - `relevant_attributes` of a logical node is the union over its
//!   undetermined children, and is empty exactly when the node has settled.
//! - During evaluation outcomes only move from undetermined to settled; only
//!   [`RequirementTree::reset`] and structural edits re-derive them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

use super::{Answer, Attribute, Comparison, Requirement};
use crate::domain::foundation::ValidationError;

/// Outcome of a requirement given the answers received so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Truth {
    Satisfied,
    Violated,
    Undetermined,
}

impl Truth {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Truth::Undetermined)
    }

    /// Boolean view: a requirement holds until it has been violated.
    pub fn holds(&self) -> bool {
        !matches!(self, Truth::Violated)
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        if value {
            Truth::Satisfied
        } else {
            Truth::Violated
        }
    }
}

/// Handle to a node inside one [`RequirementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    All(Vec<NodeId>),
    Any(Vec<NodeId>),
    Categorical {
        attribute: Arc<Attribute>,
        accepted: Vec<String>,
    },
    Numeric {
        attribute: Arc<Attribute>,
        comparison: Comparison,
    },
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    outcome: Truth,
    relevant_attributes: BTreeSet<String>,
}

/// Stateful evaluator for one requirement expression.
#[derive(Debug, Clone)]
pub struct RequirementTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl RequirementTree {
    /// Builds the arena for a requirement and brings it to its initial state.
    pub fn new(requirement: &Requirement) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.insert(requirement, None);
        tree.reset();
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Outcome of the whole expression.
    pub fn outcome(&self) -> Truth {
        self.nodes[self.root.0].outcome
    }

    pub fn is_relevant(&self) -> bool {
        !self.outcome().is_settled()
    }

    /// Attributes that can still change the outcome of the whole expression.
    pub fn relevant_attributes(&self) -> &BTreeSet<String> {
        &self.nodes[self.root.0].relevant_attributes
    }

    pub fn node_outcome(&self, id: NodeId) -> Option<Truth> {
        self.nodes.get(id.0).map(|node| node.outcome)
    }

    pub fn node_relevant_attributes(&self, id: NodeId) -> Option<&BTreeSet<String>> {
        self.nodes.get(id.0).map(|node| &node.relevant_attributes)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    /// Children of a logical node; empty for concrete nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id.0).map(|node| &node.kind) {
            Some(NodeKind::All(children)) | Some(NodeKind::Any(children)) => children,
            _ => &[],
        }
    }

    /// Reachable nodes in pre-order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            ids.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        ids
    }

    /// Reachable concrete nodes bound to the given attribute.
    pub fn find_concrete(&self, title: &str) -> Vec<NodeId> {
        self.node_ids()
            .into_iter()
            .filter(|id| self.concrete_title(*id) == Some(title))
            .collect()
    }

    /// Rebuilds the value form of a node and its descendants.
    pub fn requirement_at(&self, id: NodeId) -> Option<Requirement> {
        let node = self.nodes.get(id.0)?;
        let requirement = match &node.kind {
            NodeKind::All(children) => Requirement::All(
                children
                    .iter()
                    .filter_map(|child| self.requirement_at(*child))
                    .collect(),
            ),
            NodeKind::Any(children) => Requirement::Any(
                children
                    .iter()
                    .filter_map(|child| self.requirement_at(*child))
                    .collect(),
            ),
            NodeKind::Categorical {
                attribute,
                accepted,
            } => Requirement::Categorical {
                attribute: Arc::clone(attribute),
                accepted: accepted.clone(),
            },
            NodeKind::Numeric {
                attribute,
                comparison,
            } => Requirement::Numeric {
                attribute: Arc::clone(attribute),
                comparison: *comparison,
            },
        };
        Some(requirement)
    }

    /// Value form of the whole expression.
    pub fn to_requirement(&self) -> Requirement {
        self.requirement_at(self.root)
            .unwrap_or_else(|| Requirement::All(Vec::new()))
    }

    /// Feeds one newly collected answer through the tree.
    ///
    /// Answers for attributes the tree no longer depends on (or never did)
    /// leave every node untouched and return the current outcome.
    pub fn evaluate(&mut self, answer: &Answer) -> Truth {
        self.evaluate_node(self.root, answer)
    }

    fn evaluate_node(&mut self, id: NodeId, answer: &Answer) -> Truth {
        let node = &self.nodes[id.0];
        if node.outcome.is_settled() || !node.relevant_attributes.contains(&answer.attribute) {
            return node.outcome;
        }

        let concrete = match &node.kind {
            NodeKind::Categorical { accepted, .. } => Some(Truth::from(
                answer
                    .value
                    .as_label()
                    .map_or(false, |label| accepted.iter().any(|a| a == label)),
            )),
            NodeKind::Numeric {
                attribute,
                comparison,
            } => Some(Truth::from(
                attribute.admits(&answer.value)
                    && answer
                        .value
                        .as_number()
                        .map_or(false, |value| comparison.test(value)),
            )),
            NodeKind::All(_) | NodeKind::Any(_) => None,
        };

        match concrete {
            Some(outcome) => {
                self.settle(id, outcome);
                outcome
            }
            None => {
                // Every relevant child sees the answer, so duplicate
                // attributes under one node are all spent together.
                for child in self.children(id).to_vec() {
                    self.evaluate_node(child, answer);
                }
                self.refresh(id)
            }
        }
    }

    /// Restores every reachable node to its initial state.
    pub fn reset(&mut self) {
        self.reset_node(self.root);
    }

    fn reset_node(&mut self, id: NodeId) {
        match self.concrete_title(id).map(str::to_string) {
            Some(title) => {
                let node = &mut self.nodes[id.0];
                node.outcome = Truth::Undetermined;
                node.relevant_attributes = BTreeSet::from([title]);
            }
            None => {
                for child in self.children(id).to_vec() {
                    self.reset_node(child);
                }
                self.refresh(id);
            }
        }
    }

    /// Changes the operator of a numeric comparison node.
    ///
    /// Rejected changes leave the node untouched.
    pub fn set_comparison_operator(
        &mut self,
        id: NodeId,
        symbol: &str,
    ) -> Result<(), ValidationError> {
        let Some(node) = self.nodes.get_mut(id.0) else {
            let err = ValidationError::invalid_format("requirement", "unknown requirement node");
            warn!(node = id.0, "Rejected comparison operator change: {}", err);
            return Err(err);
        };

        match &mut node.kind {
            NodeKind::Numeric {
                attribute,
                comparison,
            } => match comparison.with_operator(symbol) {
                Ok(updated) => {
                    *comparison = updated;
                    Ok(())
                }
                Err(err) => {
                    warn!(
                        attribute = attribute.title(),
                        symbol, "Rejected comparison operator change: {}", err
                    );
                    Err(err)
                }
            },
            _ => {
                let err = ValidationError::invalid_format(
                    "comparison_operator",
                    "requirement is not a numeric comparison",
                );
                warn!(node = id.0, "Rejected comparison operator change: {}", err);
                Err(err)
            }
        }
    }

    /// Detaches every concrete requirement bound to `title`.
    ///
    /// Returns the number of detached nodes. Removing the root leaves an
    /// empty AND, which is satisfied.
    pub fn remove_requirements_for(&mut self, title: &str) -> usize {
        if self.concrete_title(self.root) == Some(title) {
            let old_root = self.root;
            self.nodes[old_root.0].parent = None;
            self.root = self.push(NodeKind::All(Vec::new()), None);
            self.refresh(self.root);
            return 1;
        }

        let removed = self.detach_matching(self.root, title);
        if removed == 0 {
            warn!(
                attribute = title,
                "No requirement is bound to attribute; nothing removed"
            );
        }
        removed
    }

    fn detach_matching(&mut self, id: NodeId, title: &str) -> usize {
        let (doomed, kept): (Vec<NodeId>, Vec<NodeId>) = self
            .children(id)
            .iter()
            .partition(|child| self.concrete_title(**child) == Some(title));

        for child in &doomed {
            self.nodes[child.0].parent = None;
        }
        if !doomed.is_empty() {
            if let Some(slots) = self.children_mut(id) {
                *slots = kept.clone();
            }
        }

        let mut removed = doomed.len();
        for child in kept {
            removed += self.detach_matching(child, title);
        }
        if !doomed.is_empty() {
            self.propagate_from(id);
        }
        removed
    }

    /// Appends a requirement under an AND/OR node.
    pub fn add_requirement(
        &mut self,
        parent: NodeId,
        requirement: &Requirement,
    ) -> Result<NodeId, ValidationError> {
        let is_logical = matches!(
            self.nodes.get(parent.0).map(|node| &node.kind),
            Some(NodeKind::All(_)) | Some(NodeKind::Any(_))
        );
        if !is_logical {
            let err = ValidationError::invalid_format(
                "requirement",
                "requirements can only be added to AND/OR nodes",
            );
            warn!(node = parent.0, "Rejected requirement addition: {}", err);
            return Err(err);
        }

        let child = self.insert(requirement, Some(parent));
        self.reset_node(child);
        if let Some(slots) = self.children_mut(parent) {
            slots.push(child);
        }
        self.propagate_from(parent);
        Ok(child)
    }

    fn insert(&mut self, requirement: &Requirement, parent: Option<NodeId>) -> NodeId {
        let kind = match requirement {
            Requirement::All(_) => NodeKind::All(Vec::new()),
            Requirement::Any(_) => NodeKind::Any(Vec::new()),
            Requirement::Categorical {
                attribute,
                accepted,
            } => NodeKind::Categorical {
                attribute: Arc::clone(attribute),
                accepted: accepted.clone(),
            },
            Requirement::Numeric {
                attribute,
                comparison,
            } => NodeKind::Numeric {
                attribute: Arc::clone(attribute),
                comparison: *comparison,
            },
        };
        let id = self.push(kind, parent);

        if let Requirement::All(children) | Requirement::Any(children) = requirement {
            let ids: Vec<NodeId> = children
                .iter()
                .map(|child| self.insert(child, Some(id)))
                .collect();
            if let Some(slots) = self.children_mut(id) {
                *slots = ids;
            }
        }
        id
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            outcome: Truth::Undetermined,
            relevant_attributes: BTreeSet::new(),
        });
        id
    }

    fn children_mut(&mut self, id: NodeId) -> Option<&mut Vec<NodeId>> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::All(children) | NodeKind::Any(children) => Some(children),
            _ => None,
        }
    }

    fn concrete_title(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Categorical { attribute, .. } | NodeKind::Numeric { attribute, .. } => {
                Some(attribute.title())
            }
            NodeKind::All(_) | NodeKind::Any(_) => None,
        }
    }

    fn settle(&mut self, id: NodeId, outcome: Truth) {
        let node = &mut self.nodes[id.0];
        node.outcome = outcome;
        node.relevant_attributes.clear();
    }

    /// Re-derives a logical node from its children. Concrete nodes are left alone.
    fn refresh(&mut self, id: NodeId) -> Truth {
        let (children, decisive, exhausted) = match &self.nodes[id.0].kind {
            NodeKind::All(children) => (children, Truth::Violated, Truth::Satisfied),
            NodeKind::Any(children) => (children, Truth::Satisfied, Truth::Violated),
            _ => return self.nodes[id.0].outcome,
        };

        let outcome = if children.iter().any(|c| self.nodes[c.0].outcome == decisive) {
            decisive
        } else if children.iter().all(|c| self.nodes[c.0].outcome.is_settled()) {
            exhausted
        } else {
            Truth::Undetermined
        };

        let relevant: BTreeSet<String> = if outcome.is_settled() {
            BTreeSet::new()
        } else {
            children
                .iter()
                .map(|c| &self.nodes[c.0])
                .filter(|child| !child.outcome.is_settled())
                .flat_map(|child| child.relevant_attributes.iter().cloned())
                .collect()
        };

        let node = &mut self.nodes[id.0];
        node.outcome = outcome;
        node.relevant_attributes = relevant;
        outcome
    }

    fn propagate_from(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node) = current {
            self.refresh(node);
            current = self.nodes[node.0].parent;
        }
    }
}
