//! Shared catalog for handler tests.

use crate::domain::catalog::{Catalog, CatalogDocument};

/// `A` needs an adult in work, `B` anyone aged 60 to 70.
pub const SAMPLE_CATALOG: &str = r#"{
    "attributes": [
        {"type": "attribute_categorical", "title": "employed", "question": "Are you employed?", "answer_options": ["yes", "no"]},
        {"type": "attribute_numerical", "title": "age", "question": "How old are you?", "min": 0, "max": 120}
    ],
    "benefits": [
        {"name": "A", "requirements": {"type": "AND", "content": [
            {"type": "attribute_numerical", "content": {"title": "age", "comparison_operator": ">=", "required_value": [18]}},
            {"type": "attribute_categorical", "content": {"title": "employed", "required_value": ["yes"]}}
        ]}},
        {"name": "B", "requirements": {"type": "attribute_numerical", "content": {"title": "age", "comparison_operator": "[]", "required_value": [60, 70]}}}
    ]
}"#;

pub fn sample_document() -> CatalogDocument {
    serde_json::from_str(SAMPLE_CATALOG).unwrap()
}

pub fn sample_catalog() -> Catalog {
    sample_document().into_catalog().unwrap()
}
