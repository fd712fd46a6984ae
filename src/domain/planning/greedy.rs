//! Greedy Planner - Picks the question that touches the most open benefits.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::catalog::{Attribute, Catalog};

/// How many still relevant benefits depend on one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeCoverage {
    pub title: String,
    pub relevant_benefits: usize,
}

/// Greedy question selection over a live catalog.
pub struct GreedyPlanner;

impl GreedyPlanner {
    /// Coverage of every registered attribute, in registry order.
    pub fn coverage(catalog: &Catalog) -> Vec<AttributeCoverage> {
        catalog
            .relevant_attribute_counts()
            .into_iter()
            .map(|(attribute, count)| AttributeCoverage {
                title: attribute.title().to_string(),
                relevant_benefits: count,
            })
            .collect()
    }

    /// Returns the attribute referenced by the most relevant benefits.
    ///
    /// # Edge Cases
    /// - No relevant benefit: `None`
    /// - Ties: the attribute declared first wins
    pub fn next_attribute(catalog: &Catalog) -> Option<Arc<Attribute>> {
        let mut best: Option<(&Arc<Attribute>, usize)> = None;
        for (attribute, count) in catalog.relevant_attribute_counts() {
            if count > best.map_or(0, |(_, top)| top) {
                best = Some((attribute, count));
            }
        }
        best.map(|(attribute, _)| Arc::clone(attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Answer, AttributeRegistry, Benefit, Comparison, Requirement};

    fn catalog() -> Catalog {
        let registry = AttributeRegistry::from_attributes(vec![
            Attribute::numerical("age", "", 0.0, 120.0).unwrap(),
            Attribute::categorical("employed", "", vec!["yes", "no"]).unwrap(),
            Attribute::categorical("resident", "", vec!["yes", "no"]).unwrap(),
        ])
        .unwrap();
        let adult = Requirement::numeric(registry.get("age").unwrap(), Comparison::AtLeast(18.0)).unwrap();
        let employed = Requirement::categorical(registry.get("employed").unwrap(), vec!["yes"]).unwrap();
        let resident = Requirement::categorical(registry.get("resident").unwrap(), vec!["yes"]).unwrap();

        let a = Benefit::new("A", &Requirement::all(vec![adult, employed.clone()])).unwrap();
        let b = Benefit::new("B", &Requirement::any(vec![employed, resident])).unwrap();
        Catalog::new(registry, vec![a, b]).unwrap()
    }

    #[test]
    fn picks_most_shared_attribute() {
        let catalog = catalog();
        assert_eq!(GreedyPlanner::next_attribute(&catalog).unwrap().title(), "employed");
    }

    #[test]
    fn ties_go_to_first_declared_attribute() {
        let mut catalog = catalog();
        // B alone needs employed and resident once each.
        catalog.remove_benefit("A");
        assert_eq!(GreedyPlanner::next_attribute(&catalog).unwrap().title(), "employed");

        let mut catalog = self::catalog();
        catalog.evaluate(&Answer::label("employed", "no"));
        assert!(GreedyPlanner::next_attribute(&catalog).is_some_and(|a| a.title() == "resident"));
    }

    #[test]
    fn returns_none_once_settled() {
        let mut catalog = catalog();
        catalog.evaluate(&Answer::label("employed", "no"));
        catalog.evaluate(&Answer::label("resident", "no"));
        assert!(catalog.is_settled());
        assert!(GreedyPlanner::next_attribute(&catalog).is_none());
    }

    #[test]
    fn coverage_reports_counts_in_registry_order() {
        let coverage = GreedyPlanner::coverage(&catalog());
        let counts: Vec<(&str, usize)> = coverage
            .iter()
            .map(|c| (c.title.as_str(), c.relevant_benefits))
            .collect();
        assert_eq!(counts, [("age", 1), ("employed", 2), ("resident", 1)]);
    }
}
