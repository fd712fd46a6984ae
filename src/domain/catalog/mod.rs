//! Catalog module - Attributes, requirements and benefits.
//!
//! # Components
//!
//! - [`AttributeRegistry`]: ordered, title-unique question dimensions
//! - [`Requirement`]: value form of an AND/OR requirement expression
//! - [`RequirementTree`]: incremental three-valued evaluator over one expression
//! - [`Benefit`] / [`Catalog`]: named trees with verdicts, plus editing
//! - [`CatalogDocument`]: the persisted shape, loaded and exported by stores

mod answer;
mod attribute;
mod benefit;
#[allow(clippy::module_inception)]
mod catalog;
mod comparison;
mod document;
mod errors;
mod requirement;
mod requirement_tree;

pub use answer::{Answer, AnswerValue};
pub use attribute::{Attribute, AttributeDomain, AttributeKind, AttributeRegistry};
pub use benefit::{Benefit, BenefitVerdict, Verdict};
pub use catalog::Catalog;
pub use comparison::{Comparison, COMPARISON_OPERATORS};
pub use document::{AttributeDocument, BenefitDocument, CatalogDocument, RequirementDocument};
pub use errors::CatalogError;
pub use requirement::Requirement;
pub use requirement_tree::{NodeId, RequirementTree, Truth};
