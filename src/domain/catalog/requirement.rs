//! Requirement - Value form of a benefit's boolean requirement expression.
//!
//! This is the structural shape used for construction, enumeration and
//! export. Evaluation state lives in [`super::RequirementTree`].

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::{Attribute, AttributeKind, CatalogError, Comparison};

/// A boolean predicate over attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// Every child must hold (AND).
    All(Vec<Requirement>),
    /// At least one child must hold (OR).
    Any(Vec<Requirement>),
    /// The answer must be one of the accepted labels.
    Categorical {
        attribute: Arc<Attribute>,
        accepted: Vec<String>,
    },
    /// The answer must pass the numeric comparison.
    Numeric {
        attribute: Arc<Attribute>,
        comparison: Comparison,
    },
}

impl Requirement {
    pub fn all(children: Vec<Requirement>) -> Self {
        Requirement::All(children)
    }

    pub fn any(children: Vec<Requirement>) -> Self {
        Requirement::Any(children)
    }

    /// Creates a categorical match, checking the attribute kind.
    pub fn categorical(
        attribute: &Arc<Attribute>,
        accepted: Vec<impl Into<String>>,
    ) -> Result<Self, CatalogError> {
        expect_kind(attribute, AttributeKind::Categorical)?;
        Ok(Requirement::Categorical {
            attribute: Arc::clone(attribute),
            accepted: accepted.into_iter().map(Into::into).collect(),
        })
    }

    /// Creates a numeric comparison, checking the attribute kind.
    pub fn numeric(attribute: &Arc<Attribute>, comparison: Comparison) -> Result<Self, CatalogError> {
        expect_kind(attribute, AttributeKind::Numerical)?;
        Ok(Requirement::Numeric {
            attribute: Arc::clone(attribute),
            comparison,
        })
    }

    /// The attribute a concrete requirement tests.
    pub fn attribute(&self) -> Option<&Arc<Attribute>> {
        match self {
            Requirement::Categorical { attribute, .. } | Requirement::Numeric { attribute, .. } => {
                Some(attribute)
            }
            Requirement::All(_) | Requirement::Any(_) => None,
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Requirement::All(_) | Requirement::Any(_))
    }

    /// Titles of every attribute referenced anywhere in the expression.
    pub fn attribute_titles(&self) -> BTreeSet<String> {
        let mut titles = BTreeSet::new();
        self.collect_titles(&mut titles);
        titles
    }

    fn collect_titles(&self, titles: &mut BTreeSet<String>) {
        match self {
            Requirement::All(children) | Requirement::Any(children) => {
                for child in children {
                    child.collect_titles(titles);
                }
            }
            Requirement::Categorical { attribute, .. } | Requirement::Numeric { attribute, .. } => {
                titles.insert(attribute.title().to_string());
            }
        }
    }
}

fn expect_kind(attribute: &Attribute, expected: AttributeKind) -> Result<(), CatalogError> {
    if attribute.kind() != expected {
        return Err(CatalogError::AttributeKindMismatch {
            title: attribute.title().to_string(),
            expected: expected.as_str(),
            actual: attribute.kind().as_str(),
        });
    }
    Ok(())
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::All(_) => f.write_str("AND"),
            Requirement::Any(_) => f.write_str("OR"),
            Requirement::Categorical {
                attribute,
                accepted,
            } => write!(f, "{} in [{}]", attribute.title(), accepted.join(", ")),
            Requirement::Numeric {
                attribute,
                comparison,
            } => write!(f, "{} {}", attribute.title(), comparison),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age() -> Arc<Attribute> {
        Arc::new(Attribute::numerical("age", "", 0.0, 120.0).unwrap())
    }

    fn employed() -> Arc<Attribute> {
        Arc::new(Attribute::categorical("employed", "", vec!["yes", "no"]).unwrap())
    }

    #[test]
    fn numeric_requirement_rejects_categorical_attribute() {
        let result = Requirement::numeric(&employed(), Comparison::AtLeast(1.0));
        assert_eq!(
            result,
            Err(CatalogError::AttributeKindMismatch {
                title: "employed".to_string(),
                expected: "numerical",
                actual: "categorical",
            })
        );
    }

    #[test]
    fn categorical_requirement_rejects_numerical_attribute() {
        assert!(Requirement::categorical(&age(), vec!["old"]).is_err());
    }

    #[test]
    fn attribute_titles_collects_nested_references() {
        let requirement = Requirement::all(vec![
            Requirement::numeric(&age(), Comparison::AtLeast(18.0)).unwrap(),
            Requirement::any(vec![
                Requirement::categorical(&employed(), vec!["yes"]).unwrap(),
                Requirement::numeric(&age(), Comparison::AtLeast(65.0)).unwrap(),
            ]),
        ]);

        let titles: Vec<String> = requirement.attribute_titles().into_iter().collect();
        assert_eq!(titles, ["age", "employed"]);
    }

    #[test]
    fn display_describes_nodes() {
        let numeric = Requirement::numeric(&age(), Comparison::AtLeast(18.0)).unwrap();
        let categorical = Requirement::categorical(&employed(), vec!["yes", "no"]).unwrap();
        assert_eq!(numeric.to_string(), "age >= 18");
        assert_eq!(categorical.to_string(), "employed in [yes, no]");
        assert_eq!(Requirement::any(vec![]).to_string(), "OR");
    }
}
