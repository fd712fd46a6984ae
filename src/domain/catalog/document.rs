//! Persisted catalog document.
//!
//! The serde shape of a catalog as it is stored on disk. Loading resolves
//! every attribute reference into a shared handle; exporting a loaded
//! catalog reproduces the document it came from.

use serde::{Deserialize, Serialize};

use super::{
    Attribute, AttributeDomain, AttributeRegistry, Benefit, Catalog, CatalogError, Comparison,
    Requirement,
};

/// Top-level document: attributes first, then benefits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub attributes: Vec<AttributeDocument>,
    #[serde(alias = "social_benefits")]
    pub benefits: Vec<BenefitDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttributeDocument {
    #[serde(rename = "attribute_categorical")]
    Categorical {
        title: String,
        #[serde(default)]
        question: String,
        answer_options: Vec<String>,
    },
    #[serde(rename = "attribute_numerical")]
    Numerical {
        title: String,
        #[serde(default)]
        question: String,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitDocument {
    pub name: String,
    pub requirements: RequirementDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RequirementDocument {
    #[serde(rename = "AND")]
    And(Vec<RequirementDocument>),
    #[serde(rename = "OR")]
    Or(Vec<RequirementDocument>),
    #[serde(rename = "attribute_categorical")]
    Categorical {
        title: String,
        required_value: Vec<String>,
    },
    #[serde(rename = "attribute_numerical")]
    Numerical {
        title: String,
        comparison_operator: String,
        required_value: Vec<f64>,
    },
}

impl CatalogDocument {
    /// Builds a catalog, failing on the first structural error.
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let attributes = self
            .attributes
            .into_iter()
            .map(AttributeDocument::into_attribute)
            .collect::<Result<Vec<_>, _>>()?;
        let registry = AttributeRegistry::from_attributes(attributes)?;

        let benefits = self
            .benefits
            .into_iter()
            .map(|doc| {
                let requirement = doc.requirements.resolve(&registry, &doc.name)?;
                Benefit::new(doc.name, &requirement)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Catalog::new(registry, benefits)
    }

    /// Captures the current structure of a catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            attributes: catalog
                .attributes()
                .iter()
                .map(|a| AttributeDocument::from_attribute(a))
                .collect(),
            benefits: catalog
                .benefits()
                .iter()
                .map(|b| BenefitDocument {
                    name: b.name().to_string(),
                    requirements: RequirementDocument::from_requirement(&b.requirement()),
                })
                .collect(),
        }
    }
}

impl AttributeDocument {
    pub fn into_attribute(self) -> Result<Attribute, CatalogError> {
        match self {
            AttributeDocument::Categorical {
                title,
                question,
                answer_options,
            } => Attribute::categorical(title, question, answer_options),
            AttributeDocument::Numerical {
                title,
                question,
                min,
                max,
            } => Attribute::numerical(title, question, min, max),
        }
    }

    pub fn from_attribute(attribute: &Attribute) -> Self {
        match attribute.domain() {
            AttributeDomain::Categorical { options } => AttributeDocument::Categorical {
                title: attribute.title().to_string(),
                question: attribute.question().to_string(),
                answer_options: options.clone(),
            },
            AttributeDomain::Numerical { min, max } => AttributeDocument::Numerical {
                title: attribute.title().to_string(),
                question: attribute.question().to_string(),
                min: *min,
                max: *max,
            },
        }
    }
}

impl RequirementDocument {
    /// Resolves attribute titles against the registry.
    pub fn resolve(
        &self,
        registry: &AttributeRegistry,
        benefit: &str,
    ) -> Result<Requirement, CatalogError> {
        let lookup = |title: &str| {
            registry
                .get(title)
                .ok_or_else(|| CatalogError::UnknownAttribute {
                    benefit: benefit.to_string(),
                    title: title.to_string(),
                })
        };

        match self {
            RequirementDocument::And(children) => Ok(Requirement::all(
                children
                    .iter()
                    .map(|c| c.resolve(registry, benefit))
                    .collect::<Result<_, _>>()?,
            )),
            RequirementDocument::Or(children) => Ok(Requirement::any(
                children
                    .iter()
                    .map(|c| c.resolve(registry, benefit))
                    .collect::<Result<_, _>>()?,
            )),
            RequirementDocument::Categorical {
                title,
                required_value,
            } => Requirement::categorical(lookup(title)?, required_value.clone()),
            RequirementDocument::Numerical {
                title,
                comparison_operator,
                required_value,
            } => {
                let comparison = Comparison::from_parts(title, comparison_operator, required_value)?;
                Requirement::numeric(lookup(title)?, comparison)
            }
        }
    }

    pub fn from_requirement(requirement: &Requirement) -> Self {
        match requirement {
            Requirement::All(children) => {
                RequirementDocument::And(children.iter().map(Self::from_requirement).collect())
            }
            Requirement::Any(children) => {
                RequirementDocument::Or(children.iter().map(Self::from_requirement).collect())
            }
            Requirement::Categorical {
                attribute,
                accepted,
            } => RequirementDocument::Categorical {
                title: attribute.title().to_string(),
                required_value: accepted.clone(),
            },
            Requirement::Numeric {
                attribute,
                comparison,
            } => RequirementDocument::Numerical {
                title: attribute.title().to_string(),
                comparison_operator: comparison.symbol().to_string(),
                required_value: comparison.required_values(),
            },
        }
    }
}
