//! Benefit - A named requirement tree with a settled verdict.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::{Answer, CatalogError, NodeId, Requirement, RequirementTree, Truth};
use crate::domain::foundation::ValidationError;

/// Eligibility verdict for one benefit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Still depends on unanswered attributes.
    Unknown,
    Eligible,
    Ineligible,
}

impl From<Truth> for Verdict {
    fn from(truth: Truth) -> Self {
        match truth {
            Truth::Satisfied => Verdict::Eligible,
            Truth::Violated => Verdict::Ineligible,
            Truth::Undetermined => Verdict::Unknown,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Verdict::Unknown => "unknown",
            Verdict::Eligible => "eligible",
            Verdict::Ineligible => "ineligible",
        };
        f.write_str(text)
    }
}

/// Verdict snapshot handed to reporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitVerdict {
    pub name: String,
    pub verdict: Verdict,
}

/// A named benefit and the evaluator for its requirements.
#[derive(Debug, Clone)]
pub struct Benefit {
    name: String,
    tree: RequirementTree,
}

impl Benefit {
    /// Creates a benefit in its initial state.
    pub fn new(name: impl Into<String>, requirement: &Requirement) -> Result<Self, CatalogError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName("name"));
        }
        Ok(Self {
            name,
            tree: RequirementTree::new(requirement),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tree(&self) -> &RequirementTree {
        &self.tree
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from(self.tree.outcome())
    }

    pub fn is_relevant(&self) -> bool {
        self.tree.is_relevant()
    }

    /// Attributes that can still change the verdict; empty once settled.
    pub fn relevant_attributes(&self) -> &BTreeSet<String> {
        self.tree.relevant_attributes()
    }

    /// Returns true if any requirement node still tests the attribute.
    pub fn references(&self, title: &str) -> bool {
        !self.tree.find_concrete(title).is_empty()
    }

    /// The requirement expression in value form.
    pub fn requirement(&self) -> Requirement {
        self.tree.to_requirement()
    }

    pub fn snapshot(&self) -> BenefitVerdict {
        BenefitVerdict {
            name: self.name.clone(),
            verdict: self.verdict(),
        }
    }

    /// Feeds one answer through the requirement tree.
    ///
    /// Settled benefits and answers outside the relevant set are no-ops.
    pub fn evaluate(&mut self, answer: &Answer) -> Verdict {
        if !self.is_relevant() || !self.relevant_attributes().contains(&answer.attribute) {
            return self.verdict();
        }
        Verdict::from(self.tree.evaluate(answer))
    }

    /// Restores every node and the verdict to their initial state.
    pub fn reset(&mut self) {
        self.tree.reset();
    }

    pub fn set_comparison_operator(&mut self, node: NodeId, symbol: &str) -> Result<(), ValidationError> {
        self.tree.set_comparison_operator(node, symbol)
    }

    pub fn remove_requirements_for(&mut self, title: &str) -> usize {
        self.tree.remove_requirements_for(title)
    }

    pub fn add_requirement(
        &mut self,
        parent: NodeId,
        requirement: &Requirement,
    ) -> Result<NodeId, ValidationError> {
        self.tree.add_requirement(parent, requirement)
    }
}
