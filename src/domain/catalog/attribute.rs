//! Attribute Registry - Named, typed question dimensions.

use std::fmt;
use std::sync::Arc;

use super::{AnswerValue, CatalogError};

/// The answer domain of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeDomain {
    /// Ordered set of unique answer labels.
    Categorical { options: Vec<String> },
    /// Closed numeric range `[min, max]`.
    Numerical { min: f64, max: f64 },
}

/// Discriminator for [`AttributeDomain`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Categorical,
    Numerical,
}

impl AttributeKind {
    /// Human-readable kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Categorical => "categorical",
            AttributeKind::Numerical => "numerical",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named question dimension, answered at most once per interview.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    title: String,
    question: String,
    domain: AttributeDomain,
}

impl Attribute {
    /// Creates a categorical attribute.
    ///
    /// Duplicate options are collapsed, keeping the first occurrence.
    pub fn categorical(
        title: impl Into<String>,
        question: impl Into<String>,
        options: Vec<impl Into<String>>,
    ) -> Result<Self, CatalogError> {
        let title = non_empty_title(title.into())?;
        let mut unique: Vec<String> = Vec::new();
        for option in options.into_iter().map(Into::into) {
            if !unique.contains(&option) {
                unique.push(option);
            }
        }
        if unique.is_empty() {
            return Err(CatalogError::EmptyAnswerOptions(title));
        }

        Ok(Self {
            title,
            question: question.into(),
            domain: AttributeDomain::Categorical { options: unique },
        })
    }

    /// Creates a numerical attribute over the closed domain `[min, max]`.
    pub fn numerical(
        title: impl Into<String>,
        question: impl Into<String>,
        min: f64,
        max: f64,
    ) -> Result<Self, CatalogError> {
        let title = non_empty_title(title.into())?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(CatalogError::InvalidDomain { title, min, max });
        }

        Ok(Self {
            title,
            question: question.into(),
            domain: AttributeDomain::Numerical { min, max },
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn domain(&self) -> &AttributeDomain {
        &self.domain
    }

    pub fn kind(&self) -> AttributeKind {
        match self.domain {
            AttributeDomain::Categorical { .. } => AttributeKind::Categorical,
            AttributeDomain::Numerical { .. } => AttributeKind::Numerical,
        }
    }

    /// Declared answer options, for categorical attributes.
    pub fn options(&self) -> Option<&[String]> {
        match &self.domain {
            AttributeDomain::Categorical { options } => Some(options),
            AttributeDomain::Numerical { .. } => None,
        }
    }

    /// Declared `(min, max)`, for numerical attributes.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.domain {
            AttributeDomain::Numerical { min, max } => Some((min, max)),
            AttributeDomain::Categorical { .. } => None,
        }
    }

    /// Returns true if the value lies within the declared domain.
    ///
    /// Out-of-domain answers are still legal; they simply fail every test.
    pub fn admits(&self, value: &AnswerValue) -> bool {
        match (&self.domain, value) {
            (AttributeDomain::Categorical { options }, AnswerValue::Label(label)) => {
                options.contains(label)
            }
            (AttributeDomain::Numerical { min, max }, AnswerValue::Number(n)) => {
                *min <= *n && *n <= *max
            }
            _ => false,
        }
    }
}

fn non_empty_title(title: String) -> Result<String, CatalogError> {
    if title.trim().is_empty() {
        return Err(CatalogError::EmptyName("title"));
    }
    Ok(title)
}

/// Ordered registry of attributes, unique by title.
///
/// Declaration order is significant: it breaks ties in both planners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeRegistry {
    attributes: Vec<Arc<Attribute>>,
}

impl AttributeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry, rejecting duplicate titles.
    pub fn from_attributes(attributes: Vec<Attribute>) -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        for attribute in attributes {
            registry.add(attribute)?;
        }
        Ok(registry)
    }

    /// Appends an attribute and returns its shared handle.
    pub fn add(&mut self, attribute: Attribute) -> Result<Arc<Attribute>, CatalogError> {
        if self.contains(attribute.title()) {
            return Err(CatalogError::DuplicateAttribute(attribute.title().to_string()));
        }
        let handle = Arc::new(attribute);
        self.attributes.push(Arc::clone(&handle));
        Ok(handle)
    }

    /// Removes an attribute by title.
    pub fn remove(&mut self, title: &str) -> Option<Arc<Attribute>> {
        let index = self.position(title)?;
        Some(self.attributes.remove(index))
    }

    pub fn get(&self, title: &str) -> Option<&Arc<Attribute>> {
        self.attributes.iter().find(|a| a.title() == title)
    }

    /// Declaration index of an attribute.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.title() == title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Attribute>> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employed() -> Attribute {
        Attribute::categorical("employed", "Are you employed?", vec!["yes", "no"]).unwrap()
    }

    fn age() -> Attribute {
        Attribute::numerical("age", "How old are you?", 0.0, 120.0).unwrap()
    }

    #[test]
    fn categorical_attribute_collapses_duplicate_options() {
        let attr = Attribute::categorical("status", "", vec!["a", "b", "a"]).unwrap();
        assert_eq!(attr.options().unwrap(), ["a", "b"]);
        assert_eq!(attr.kind(), AttributeKind::Categorical);
    }

    #[test]
    fn categorical_attribute_requires_options() {
        let result = Attribute::categorical("status", "", Vec::<String>::new());
        assert_eq!(result, Err(CatalogError::EmptyAnswerOptions("status".to_string())));
    }

    #[test]
    fn numerical_attribute_rejects_inverted_domain() {
        let result = Attribute::numerical("age", "", 10.0, 5.0);
        assert!(matches!(result, Err(CatalogError::InvalidDomain { .. })));
    }

    #[test]
    fn attribute_rejects_blank_title() {
        assert_eq!(
            Attribute::numerical("  ", "", 0.0, 1.0),
            Err(CatalogError::EmptyName("title"))
        );
    }

    #[test]
    fn admits_checks_declared_domain() {
        assert!(age().admits(&AnswerValue::Number(42.0)));
        assert!(!age().admits(&AnswerValue::Number(130.0)));
        assert!(!age().admits(&AnswerValue::Label("old".to_string())));
        assert!(employed().admits(&AnswerValue::Label("yes".to_string())));
        assert!(!employed().admits(&AnswerValue::Label("maybe".to_string())));
    }

    #[test]
    fn registry_rejects_duplicate_titles() {
        let result = AttributeRegistry::from_attributes(vec![age(), age()]);
        assert_eq!(result, Err(CatalogError::DuplicateAttribute("age".to_string())));
    }

    #[test]
    fn registry_preserves_declaration_order() {
        let registry = AttributeRegistry::from_attributes(vec![employed(), age()]).unwrap();
        assert_eq!(registry.position("employed"), Some(0));
        assert_eq!(registry.position("age"), Some(1));
        let titles: Vec<&str> = registry.iter().map(|a| a.title()).collect();
        assert_eq!(titles, ["employed", "age"]);
    }

    #[test]
    fn registry_remove_returns_handle() {
        let mut registry = AttributeRegistry::from_attributes(vec![employed(), age()]).unwrap();
        let removed = registry.remove("employed").unwrap();
        assert_eq!(removed.title(), "employed");
        assert_eq!(registry.len(), 1);
        assert!(registry.remove("employed").is_none());
    }
}
