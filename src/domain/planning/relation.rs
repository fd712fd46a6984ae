//! Symbolic Enumerator - Turns requirement expressions into accepting rows.
//!
//! A row is a partial assignment of constraints to attributes; an attribute
//! missing from a row is a don't-care. A subject satisfies a requirement iff
//! it matches at least one of the requirement's rows.
//!
//! # Enumeration rules
//!
//! - Categorical: one row per accepted label
//! - Numeric: one row holding the closed interval the comparison accepts
//!   within the attribute's domain
//! - AND: cross join of the children's rows; same-attribute constraints are
//!   intersected and contradictory combinations dropped
//! - OR: concatenation of the children's rows

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use super::PlanningError;
use crate::domain::catalog::{Catalog, Requirement};

/// Closed numeric interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn point(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let low = self.low.max(other.low);
        let high = self.high.min(other.high);
        (low <= high).then_some(Interval { low, high })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// Constraint placed on one attribute by a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Constraint {
    Label(String),
    Range(Interval),
}

impl Constraint {
    /// Conjunction of two constraints on the same attribute.
    pub fn meet(&self, other: &Constraint) -> Option<Constraint> {
        match (self, other) {
            (Constraint::Label(a), Constraint::Label(b)) => (a == b).then(|| self.clone()),
            (Constraint::Range(a), Constraint::Range(b)) => a.intersect(b).map(Constraint::Range),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Constraint::Label(label) => Some(label),
            Constraint::Range(_) => None,
        }
    }

    pub fn as_range(&self) -> Option<&Interval> {
        match self {
            Constraint::Range(interval) => Some(interval),
            Constraint::Label(_) => None,
        }
    }
}

/// Partial assignment of constraints to attribute titles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConstraintRow {
    cells: BTreeMap<String, Constraint>,
}

impl ConstraintRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, title: impl Into<String>, constraint: Constraint) -> Self {
        self.cells.insert(title.into(), constraint);
        self
    }

    pub fn get(&self, title: &str) -> Option<&Constraint> {
        self.cells.get(title)
    }

    /// Returns false when the row does not care about the attribute.
    pub fn constrains(&self, title: &str) -> bool {
        self.cells.contains_key(title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Combines two rows; `None` when they contradict each other.
    pub fn merge(&self, other: &ConstraintRow) -> Option<ConstraintRow> {
        let mut merged = self.clone();
        for (title, constraint) in &other.cells {
            let cell = match merged.cells.get(title) {
                Some(existing) => existing.meet(constraint)?,
                None => constraint.clone(),
            };
            merged.cells.insert(title.clone(), cell);
        }
        Some(merged)
    }
}

/// An accepting row tagged with the benefit it qualifies for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledRow {
    pub benefit: String,
    pub row: ConstraintRow,
}

/// Union of every benefit's accepting rows, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Relation {
    rows: Vec<LabelledRow>,
}

impl Relation {
    pub fn new(rows: Vec<LabelledRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LabelledRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Enumerates the accepting rows of one requirement.
    pub fn accepting_rows(requirement: &Requirement) -> Vec<ConstraintRow> {
        match requirement {
            Requirement::Categorical {
                attribute,
                accepted,
            } => accepted
                .iter()
                .map(|label| ConstraintRow::new().with(attribute.title(), Constraint::Label(label.clone())))
                .collect(),
            Requirement::Numeric {
                attribute,
                comparison,
            } => {
                let Some((min, max)) = attribute.bounds() else {
                    return Vec::new();
                };
                let (low, high) = comparison.bounds_within(min, max);
                if low > high {
                    // Nothing inside the domain passes.
                    return Vec::new();
                }
                vec![ConstraintRow::new().with(attribute.title(), Constraint::Range(Interval::new(low, high)))]
            }
            Requirement::All(children) => {
                children.iter().fold(vec![ConstraintRow::new()], |product, child| {
                    let child_rows = Self::accepting_rows(child);
                    product
                        .iter()
                        .flat_map(|left| child_rows.iter().filter_map(move |right| left.merge(right)))
                        .collect()
                })
            }
            Requirement::Any(children) => children.iter().flat_map(Self::accepting_rows).collect(),
        }
    }

    /// Upper bound on the number of accepting rows, computed without
    /// enumerating. Contradictory combinations make the real count smaller.
    pub fn row_bound(requirement: &Requirement) -> usize {
        match requirement {
            Requirement::Categorical { accepted, .. } => accepted.len(),
            Requirement::Numeric { .. } => 1,
            Requirement::All(children) => children
                .iter()
                .fold(1usize, |acc, child| acc.saturating_mul(Self::row_bound(child))),
            Requirement::Any(children) => children
                .iter()
                .fold(0usize, |acc, child| acc.saturating_add(Self::row_bound(child))),
        }
    }

    /// Builds the global relation over every benefit of the catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let rows: Vec<LabelledRow> = catalog
            .benefits()
            .iter()
            .flat_map(|benefit| {
                Self::accepting_rows(&benefit.requirement())
                    .into_iter()
                    .map(move |row| LabelledRow {
                        benefit: benefit.name().to_string(),
                        row,
                    })
            })
            .collect();

        debug!(rows = rows.len(), benefits = catalog.benefits().len(), "Enumerated relation");
        Self { rows }
    }

    /// Same as [`Relation::from_catalog`], refusing catalogs whose row bound
    /// exceeds `max_rows`.
    pub fn from_catalog_bounded(catalog: &Catalog, max_rows: usize) -> Result<Self, PlanningError> {
        let bound = catalog
            .benefits()
            .iter()
            .fold(0usize, |acc, b| acc.saturating_add(Self::row_bound(&b.requirement())));
        if bound > max_rows {
            return Err(PlanningError::RelationTooLarge {
                bound,
                limit: max_rows,
            });
        }
        Ok(Self::from_catalog(catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Attribute, AttributeRegistry, Benefit, Comparison};

    fn registry() -> AttributeRegistry {
        AttributeRegistry::from_attributes(vec![
            Attribute::numerical("age", "", 0.0, 120.0).unwrap(),
            Attribute::categorical("employed", "", vec!["yes", "no"]).unwrap(),
            Attribute::categorical("status", "", vec!["a", "b", "c"]).unwrap(),
        ])
        .unwrap()
    }

    fn numeric(registry: &AttributeRegistry, comparison: Comparison) -> Requirement {
        Requirement::numeric(registry.get("age").unwrap(), comparison).unwrap()
    }

    fn categorical(registry: &AttributeRegistry, title: &str, labels: Vec<&str>) -> Requirement {
        Requirement::categorical(registry.get(title).unwrap(), labels).unwrap()
    }

    #[test]
    fn categorical_yields_one_row_per_label() {
        let registry = registry();
        let rows = Relation::accepting_rows(&categorical(&registry, "status", vec!["a", "b"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("status"), Some(&Constraint::Label("b".to_string())));
    }

    #[test]
    fn numeric_fills_open_side_from_domain() {
        let registry = registry();
        let rows = Relation::accepting_rows(&numeric(&registry, Comparison::AtLeast(18.0)));
        assert_eq!(rows, [ConstraintRow::new().with("age", Constraint::Range(Interval::new(18.0, 120.0)))]);

        let rows = Relation::accepting_rows(&numeric(&registry, Comparison::Equal(7.0)));
        assert_eq!(rows[0].get("age"), Some(&Constraint::Range(Interval::point(7.0))));
    }

    #[test]
    fn numeric_rows_stay_inside_domain() {
        let registry = registry();
        let rows = Relation::accepting_rows(&numeric(&registry, Comparison::Between { low: 100.0, high: 140.0 }));
        assert_eq!(rows, [ConstraintRow::new().with("age", Constraint::Range(Interval::new(100.0, 120.0)))]);

        assert!(Relation::accepting_rows(&numeric(&registry, Comparison::Equal(150.0))).is_empty());
    }

    #[test]
    fn numeric_outside_domain_yields_no_rows() {
        let registry = registry();
        assert!(Relation::accepting_rows(&numeric(&registry, Comparison::AtLeast(200.0))).is_empty());
    }

    #[test]
    fn and_takes_full_cross_product() {
        let registry = registry();
        let requirement = Requirement::all(vec![
            categorical(&registry, "status", vec!["a", "b", "c"]),
            categorical(&registry, "employed", vec!["yes", "no"]),
        ]);
        let rows = Relation::accepting_rows(&requirement);
        assert_eq!(rows.len(), 6);
        assert_eq!(Relation::row_bound(&requirement), 6);
        assert!(rows.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn and_intersects_same_attribute_and_drops_contradictions() {
        let registry = registry();
        let ranges = Requirement::all(vec![
            numeric(&registry, Comparison::AtLeast(18.0)),
            numeric(&registry, Comparison::AtMost(65.0)),
        ]);
        assert_eq!(
            Relation::accepting_rows(&ranges)[0].get("age"),
            Some(&Constraint::Range(Interval::new(18.0, 65.0)))
        );

        let labels = Requirement::all(vec![
            categorical(&registry, "employed", vec!["yes"]),
            categorical(&registry, "employed", vec!["no"]),
        ]);
        assert!(Relation::accepting_rows(&labels).is_empty());
    }

    #[test]
    fn or_concatenates_children() {
        let registry = registry();
        let requirement = Requirement::any(vec![
            categorical(&registry, "employed", vec!["yes"]),
            numeric(&registry, Comparison::AtMost(30.0)),
        ]);
        let rows = Relation::accepting_rows(&requirement);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].constrains("employed") && !rows[0].constrains("age"));
    }

    #[test]
    fn empty_logical_nodes_follow_identity_rules() {
        assert_eq!(Relation::accepting_rows(&Requirement::all(vec![])), [ConstraintRow::new()]);
        assert!(Relation::accepting_rows(&Requirement::any(vec![])).is_empty());
    }

    #[test]
    fn from_catalog_tags_rows_with_benefit_names() {
        let registry = registry();
        let a = Benefit::new("A", &categorical(&registry, "employed", vec!["yes"])).unwrap();
        let b = Benefit::new("B", &numeric(&registry, Comparison::AtMost(30.0))).unwrap();
        let catalog = Catalog::new(registry, vec![a, b]).unwrap();

        let relation = Relation::from_catalog(&catalog);
        let labels: Vec<&str> = relation.rows().iter().map(|r| r.benefit.as_str()).collect();
        assert_eq!(labels, ["A", "B"]);
    }

    #[test]
    fn from_catalog_bounded_refuses_large_relations() {
        let registry = registry();
        let requirement = Requirement::all(vec![
            categorical(&registry, "status", vec!["a", "b", "c"]),
            categorical(&registry, "employed", vec!["yes", "no"]),
        ]);
        let benefit = Benefit::new("A", &requirement).unwrap();
        let catalog = Catalog::new(registry, vec![benefit]).unwrap();

        assert_eq!(
            Relation::from_catalog_bounded(&catalog, 5),
            Err(PlanningError::RelationTooLarge { bound: 6, limit: 5 })
        );
        assert_eq!(Relation::from_catalog_bounded(&catalog, 6).map(|r| r.len()), Ok(6));
    }
}
