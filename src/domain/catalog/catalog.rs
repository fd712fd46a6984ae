//! Benefit Catalog - The attribute registry and the ordered benefit list.
//!
//! Construction checks every cross-reference; once built, a catalog is only
//! changed through the editing operations below, which keep benefits and
//! registry consistent.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{
    Answer, Attribute, AttributeRegistry, Benefit, BenefitVerdict, CatalogError, NodeId,
    Requirement, Verdict,
};
use crate::domain::foundation::ValidationError;

/// Registry plus benefits, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    attributes: AttributeRegistry,
    benefits: Vec<Benefit>,
}

impl Catalog {
    /// Assembles a catalog, rejecting duplicate benefit names and references
    /// to attributes missing from the registry.
    pub fn new(attributes: AttributeRegistry, benefits: Vec<Benefit>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for benefit in &benefits {
            if !seen.insert(benefit.name().to_string()) {
                return Err(CatalogError::DuplicateBenefit(benefit.name().to_string()));
            }
            check_references(&attributes, benefit.name(), &benefit.requirement())?;
        }
        Ok(Self {
            attributes,
            benefits,
        })
    }

    pub fn attributes(&self) -> &AttributeRegistry {
        &self.attributes
    }

    pub fn attribute(&self, title: &str) -> Option<&Arc<Attribute>> {
        self.attributes.get(title)
    }

    pub fn benefits(&self) -> &[Benefit] {
        &self.benefits
    }

    pub fn benefit(&self, name: &str) -> Option<&Benefit> {
        self.benefits.iter().find(|b| b.name() == name)
    }

    /// Benefits whose verdict is still unknown.
    pub fn relevant_benefits(&self) -> impl Iterator<Item = &Benefit> {
        self.benefits.iter().filter(|b| b.is_relevant())
    }

    /// Returns true once every benefit has a verdict.
    pub fn is_settled(&self) -> bool {
        self.relevant_benefits().next().is_none()
    }

    /// For each attribute in registry order, the number of still relevant
    /// benefits whose relevant set contains it.
    pub fn relevant_attribute_counts(&self) -> Vec<(&Arc<Attribute>, usize)> {
        self.attributes
            .iter()
            .map(|attribute| {
                let count = self
                    .relevant_benefits()
                    .filter(|b| b.relevant_attributes().contains(attribute.title()))
                    .count();
                (attribute, count)
            })
            .collect()
    }

    /// Feeds one answer to every relevant benefit.
    ///
    /// Returns the names of the benefits settled by this answer.
    pub fn evaluate(&mut self, answer: &Answer) -> Vec<String> {
        let mut settled = Vec::new();
        for benefit in self.benefits.iter_mut().filter(|b| b.is_relevant()) {
            let verdict = benefit.evaluate(answer);
            if verdict != Verdict::Unknown {
                debug!(
                    benefit = benefit.name(),
                    attribute = %answer.attribute,
                    %verdict,
                    "Benefit settled"
                );
                settled.push(benefit.name().to_string());
            }
        }
        settled
    }

    pub fn verdicts(&self) -> Vec<BenefitVerdict> {
        self.benefits.iter().map(Benefit::snapshot).collect()
    }

    /// Restores every benefit to its initial state.
    pub fn reset(&mut self) {
        for benefit in &mut self.benefits {
            benefit.reset();
        }
    }

    /// Appends a benefit built from a requirement over registered attributes.
    pub fn add_benefit(
        &mut self,
        name: impl Into<String>,
        requirement: &Requirement,
    ) -> Result<(), CatalogError> {
        let name = name.into();
        if self.benefit(&name).is_some() {
            return Err(CatalogError::DuplicateBenefit(name));
        }
        check_references(&self.attributes, &name, requirement)?;
        self.benefits.push(Benefit::new(name, requirement)?);
        Ok(())
    }

    pub fn remove_benefit(&mut self, name: &str) -> Option<Benefit> {
        let Some(index) = self.benefits.iter().position(|b| b.name() == name) else {
            warn!(benefit = name, "Cannot remove unknown benefit");
            return None;
        };
        Some(self.benefits.remove(index))
    }

    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<Arc<Attribute>, CatalogError> {
        self.attributes.add(attribute)
    }

    /// Removes an attribute and every requirement bound to it.
    pub fn remove_attribute(&mut self, title: &str) -> Option<Arc<Attribute>> {
        let Some(removed) = self.attributes.remove(title) else {
            warn!(attribute = title, "Cannot remove unknown attribute");
            return None;
        };
        for benefit in self.benefits.iter_mut().filter(|b| b.references(title)) {
            let detached = benefit.remove_requirements_for(title);
            debug!(benefit = benefit.name(), attribute = title, detached, "Detached requirements");
        }
        Some(removed)
    }

    /// Changes the comparison operator of one node in a benefit's tree.
    pub fn set_comparison_operator(
        &mut self,
        benefit: &str,
        node: NodeId,
        symbol: &str,
    ) -> Result<(), ValidationError> {
        match self.benefits.iter_mut().find(|b| b.name() == benefit) {
            Some(target) => target.set_comparison_operator(node, symbol),
            None => {
                let err = ValidationError::invalid_format("benefit", format!("unknown benefit '{}'", benefit));
                warn!("Rejected comparison operator change: {}", err);
                Err(err)
            }
        }
    }
}

fn check_references(
    registry: &AttributeRegistry,
    benefit: &str,
    requirement: &Requirement,
) -> Result<(), CatalogError> {
    match requirement.attribute_titles().into_iter().find(|t| !registry.contains(t)) {
        Some(title) => Err(CatalogError::UnknownAttribute {
            benefit: benefit.to_string(),
            title,
        }),
        None => Ok(()),
    }
}
