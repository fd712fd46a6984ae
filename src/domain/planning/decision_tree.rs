//! Decision-Tree Builder - Precomputes a question tree over the relation.
//!
//! # Algorithm
//!
//! At every node, each attribute still constrained by some row is scored by
//! gain ratio over the benefit labels. The best attribute (earliest in the
//! registry on ties) becomes the split; rows that do not constrain it
//! (don't-care rows) are copied into every branch.
//!
//! # Termination
//!
//! - Empty relation: empty leaf
//! - No constrained attribute left: leaf with the distinct labels
//! - Depth limit reached (root is depth 1): leaf marked `pruned`, whose
//!   benefits still have unchecked requirements

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{probe_points, signature, Constraint, Interval, LabelledRow, PlanningError, Relation};
use crate::domain::catalog::{AnswerValue, Attribute, AttributeDomain, AttributeRegistry};

const GAIN_EPSILON: f64 = 1e-12;

static EMPTY_OUTCOME: DecisionNode = DecisionNode::Leaf {
    benefits: Vec::new(),
    pruned: false,
};

/// A node of the precomputed question tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum DecisionNode {
    /// Benefits the subject qualifies for along this path. A `pruned` leaf
    /// was cut by the depth limit: its benefits are only possible.
    Leaf { benefits: Vec<String>, pruned: bool },
    /// Ask about `attribute` and follow the matching branch.
    Split { attribute: String, branches: Branches },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Branches {
    /// One branch per declared option, in declaration order.
    Categorical { options: Vec<CategoricalBranch> },
    /// One branch per probe, plus the don't-care rows for answers that
    /// match no column interval.
    Numeric {
        intervals: Vec<Interval>,
        probes: Vec<NumericBranch>,
        unmatched: Option<Box<DecisionNode>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalBranch {
    pub label: String,
    pub node: DecisionNode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericBranch {
    pub probe: f64,
    pub node: DecisionNode,
}

impl DecisionNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, DecisionNode::Leaf { .. })
    }

    pub fn benefits(&self) -> Option<&[String]> {
        match self {
            DecisionNode::Leaf { benefits, .. } => Some(benefits),
            DecisionNode::Split { .. } => None,
        }
    }

    /// True for a leaf cut short by the depth limit.
    pub fn is_pruned(&self) -> bool {
        matches!(self, DecisionNode::Leaf { pruned: true, .. })
    }

    /// Split attribute, `None` at a leaf.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            DecisionNode::Split { attribute, .. } => Some(attribute),
            DecisionNode::Leaf { .. } => None,
        }
    }

    pub fn children(&self) -> Vec<&DecisionNode> {
        match self {
            DecisionNode::Leaf { .. } => Vec::new(),
            DecisionNode::Split {
                branches: Branches::Categorical { options },
                ..
            } => options.iter().map(|b| &b.node).collect(),
            DecisionNode::Split {
                branches: Branches::Numeric { probes, unmatched, .. },
                ..
            } => probes
                .iter()
                .map(|b| &b.node)
                .chain(unmatched.as_deref())
                .collect(),
        }
    }

    fn leaf(rows: &[&LabelledRow], pruned: bool) -> Self {
        let mut benefits: Vec<String> = Vec::new();
        for row in rows {
            if !benefits.contains(&row.benefit) {
                benefits.push(row.benefit.clone());
            }
        }
        DecisionNode::Leaf { benefits, pruned }
    }
}

/// Shape statistics of a built tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeStats {
    pub max_depth: usize,
    pub average_leaf_depth: f64,
    pub leaf_count: usize,
    pub relation_rows: usize,
}

impl TreeStats {
    fn collect(root: &DecisionNode, relation_rows: usize) -> Self {
        let mut leaf_depths = Vec::new();
        let mut stack = vec![(root, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            if node.is_leaf() {
                leaf_depths.push(depth);
            }
            stack.extend(node.children().into_iter().map(|child| (child, depth + 1)));
        }

        let leaf_count = leaf_depths.len();
        Self {
            max_depth: leaf_depths.iter().copied().max().unwrap_or(0),
            average_leaf_depth: if leaf_count == 0 {
                0.0
            } else {
                leaf_depths.iter().sum::<usize>() as f64 / leaf_count as f64
            },
            leaf_count,
            relation_rows,
        }
    }
}

/// A built tree with its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionTree {
    root: DecisionNode,
    stats: TreeStats,
}

impl DecisionTree {
    pub fn root(&self) -> &DecisionNode {
        &self.root
    }

    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Starts a walk at the root.
    pub fn walk(&self) -> TreeWalk<'_> {
        TreeWalk {
            node: &self.root,
            depth: 1,
        }
    }
}

/// Cursor that follows answers down a [`DecisionTree`].
#[derive(Debug, Clone)]
pub struct TreeWalk<'t> {
    node: &'t DecisionNode,
    depth: usize,
}

impl<'t> TreeWalk<'t> {
    /// The attribute to ask next, or `None` once a leaf is reached.
    pub fn next_question(&self) -> Option<&'t str> {
        self.node.attribute()
    }

    pub fn is_finished(&self) -> bool {
        self.node.is_leaf()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Benefits at the reached leaf.
    pub fn outcome(&self) -> Option<&'t [String]> {
        self.node.benefits()
    }

    /// True once the walk stops at a depth-limited leaf.
    pub fn is_pruned(&self) -> bool {
        self.node.is_pruned()
    }

    /// Follows the branch matching `value` and returns the next question.
    pub fn answer(&mut self, value: &AnswerValue) -> Option<&'t str> {
        let DecisionNode::Split {
            attribute,
            branches,
        } = self.node
        else {
            warn!(%value, "Answer received after the walk reached a leaf");
            return None;
        };

        self.node = route(attribute, branches, value);
        self.depth += 1;
        self.next_question()
    }
}

fn route<'t>(attribute: &str, branches: &'t Branches, value: &AnswerValue) -> &'t DecisionNode {
    match branches {
        Branches::Categorical { options } => {
            let matched = value
                .as_label()
                .and_then(|label| options.iter().find(|b| b.label == label));
            match matched {
                Some(branch) => &branch.node,
                None => {
                    warn!(attribute, %value, "Answer matches no declared option");
                    &EMPTY_OUTCOME
                }
            }
        }
        Branches::Numeric {
            intervals,
            probes,
            unmatched,
        } => {
            let matched = value.as_number().and_then(|number| {
                let key = signature(intervals, number);
                if key.is_empty() {
                    return None;
                }
                probes
                    .iter()
                    .find(|b| signature(intervals, b.probe) == key)
            });
            match (matched, unmatched) {
                (Some(branch), _) => &branch.node,
                (None, Some(fallback)) => &**fallback,
                (None, None) => &EMPTY_OUTCOME,
            }
        }
    }
}

/// Builds [`DecisionTree`]s from a relation and the attribute registry.
#[derive(Debug, Clone, Default)]
pub struct DecisionTreeBuilder {
    max_depth: Option<usize>,
}

impl DecisionTreeBuilder {
    /// Creates a builder without a depth limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops splitting once a node reaches `max_depth`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Builds the tree. Every relation column must be a registered attribute.
    pub fn build(
        &self,
        relation: &Relation,
        registry: &AttributeRegistry,
    ) -> Result<DecisionTree, PlanningError> {
        for row in relation.rows() {
            if let Some(title) = row.row.titles().find(|t| !registry.contains(t)) {
                return Err(PlanningError::UnknownAttribute(title.to_string()));
            }
        }

        let rows: Vec<&LabelledRow> = relation.rows().iter().collect();
        let candidates: Vec<&Arc<Attribute>> = registry.iter().collect();
        let root = self.build_node(&rows, &candidates, 1);
        let stats = TreeStats::collect(&root, relation.len());

        info!(
            relation_rows = stats.relation_rows,
            leaf_count = stats.leaf_count,
            max_depth = stats.max_depth,
            average_leaf_depth = stats.average_leaf_depth,
            "Decision tree built"
        );
        Ok(DecisionTree { root, stats })
    }

    fn build_node(
        &self,
        rows: &[&LabelledRow],
        candidates: &[&Arc<Attribute>],
        depth: usize,
    ) -> DecisionNode {
        if rows.is_empty() {
            return DecisionNode::Leaf {
                benefits: Vec::new(),
                pruned: false,
            };
        }

        let columns: Vec<&Arc<Attribute>> = candidates
            .iter()
            .copied()
            .filter(|a| rows.iter().any(|r| r.row.constrains(a.title())))
            .collect();
        if columns.is_empty() {
            return DecisionNode::leaf(rows, false);
        }
        if self.max_depth.map_or(false, |limit| depth >= limit) {
            debug!(rows = rows.len(), depth, "Depth limit reached");
            return DecisionNode::leaf(rows, true);
        }

        let mut best: Option<(f64, Partition<'_>)> = None;
        for attribute in &columns {
            let partition = Partition::of(rows, attribute);
            let ratio = partition.gain_ratio(rows);
            if best.as_ref().map_or(true, |(top, _)| ratio > top + GAIN_EPSILON) {
                best = Some((ratio, partition));
            }
        }
        let Some((ratio, partition)) = best else {
            return DecisionNode::leaf(rows, false);
        };

        debug!(
            attribute = partition.attribute.title(),
            gain_ratio = ratio,
            rows = rows.len(),
            depth,
            "Selected split"
        );

        let remaining: Vec<&Arc<Attribute>> = columns
            .into_iter()
            .filter(|a| a.title() != partition.attribute.title())
            .collect();
        partition.into_node(|subset| self.build_node(subset, &remaining, depth + 1))
    }
}

/// Rows routed to each branch of a candidate split.
struct Partition<'r> {
    attribute: Arc<Attribute>,
    kind: PartitionKind<'r>,
}

enum PartitionKind<'r> {
    Categorical(Vec<(String, Vec<&'r LabelledRow>)>),
    Numeric {
        intervals: Vec<Interval>,
        probes: Vec<(f64, Vec<&'r LabelledRow>)>,
        unmatched: Vec<&'r LabelledRow>,
    },
}

impl<'r> Partition<'r> {
    fn of(rows: &[&'r LabelledRow], attribute: &Arc<Attribute>) -> Self {
        let title = attribute.title();
        let kind = match attribute.domain() {
            AttributeDomain::Categorical { options } => PartitionKind::Categorical(
                options
                    .iter()
                    .map(|option| {
                        let branch = rows
                            .iter()
                            .copied()
                            .filter(|r| match r.row.get(title) {
                                None => true,
                                Some(cell) => cell.as_label() == Some(option.as_str()),
                            })
                            .collect();
                        (option.clone(), branch)
                    })
                    .collect(),
            ),
            AttributeDomain::Numerical { min, max } => {
                let mut intervals: Vec<Interval> = Vec::new();
                for interval in rows.iter().filter_map(|r| r.row.get(title).and_then(Constraint::as_range)) {
                    if !intervals.contains(interval) {
                        intervals.push(*interval);
                    }
                }
                let probes = probe_points(&intervals, *min, *max)
                    .into_iter()
                    .map(|probe| {
                        let branch = rows
                            .iter()
                            .copied()
                            .filter(|r| match r.row.get(title) {
                                None => true,
                                Some(cell) => cell.as_range().map_or(false, |i| i.contains(probe)),
                            })
                            .collect();
                        (probe, branch)
                    })
                    .collect();
                let unmatched = rows
                    .iter()
                    .copied()
                    .filter(|r| !r.row.constrains(title))
                    .collect();
                PartitionKind::Numeric {
                    intervals,
                    probes,
                    unmatched,
                }
            }
        };

        Self {
            attribute: Arc::clone(attribute),
            kind,
        }
    }

    fn branches(&self) -> Vec<&[&'r LabelledRow]> {
        match &self.kind {
            PartitionKind::Categorical(options) => options.iter().map(|(_, rows)| rows.as_slice()).collect(),
            PartitionKind::Numeric { probes, .. } => probes.iter().map(|(_, rows)| rows.as_slice()).collect(),
        }
    }

    /// Information gain over split information.
    ///
    /// Branch weights are normalized by the total rows across branches, since
    /// don't-care rows are counted once per branch.
    fn gain_ratio(&self, parent: &[&LabelledRow]) -> f64 {
        let branches: Vec<&[&LabelledRow]> = self.branches().into_iter().filter(|b| !b.is_empty()).collect();
        let total: usize = branches.iter().map(|b| b.len()).sum();
        if total == 0 {
            return 0.0;
        }

        let mut remainder = 0.0;
        let mut split_info = 0.0;
        for branch in &branches {
            let weight = branch.len() as f64 / total as f64;
            remainder += weight * entropy(branch);
            split_info -= weight * weight.log2();
        }

        if split_info <= GAIN_EPSILON {
            return 0.0;
        }
        (entropy(parent) - remainder) / split_info
    }

    fn into_node(self, mut build: impl FnMut(&[&'r LabelledRow]) -> DecisionNode) -> DecisionNode {
        let branches = match self.kind {
            PartitionKind::Categorical(options) => Branches::Categorical {
                options: options
                    .into_iter()
                    .map(|(label, rows)| CategoricalBranch {
                        label,
                        node: build(&rows),
                    })
                    .collect(),
            },
            PartitionKind::Numeric {
                intervals,
                probes,
                unmatched,
            } => Branches::Numeric {
                intervals,
                probes: probes
                    .into_iter()
                    .map(|(probe, rows)| NumericBranch {
                        probe,
                        node: build(&rows),
                    })
                    .collect(),
                unmatched: (!unmatched.is_empty()).then(|| Box::new(build(&unmatched))),
            },
        };

        DecisionNode::Split {
            attribute: self.attribute.title().to_string(),
            branches,
        }
    }
}

/// Shannon entropy of the benefit labels, in bits.
fn entropy(rows: &[&LabelledRow]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.benefit.as_str()).or_default() += 1;
    }
    let n = rows.len() as f64;
    counts
        .values()
        .map(|&c| {
            let p = c as f64 / n;
            -p * p.log2()
        })
        .sum()
}
