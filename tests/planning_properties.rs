//! Property tests for evaluation and planning.
//!
//! Catalogs are generated over a fixed registry (`status`, `income`, `age`)
//! with random AND/OR requirement trees, then checked against:
//! - relevance only ever shrinks and settled verdicts never change
//! - walking the decision tree agrees with direct evaluation
//! - a depth-limited walk never overstates eligibility
//! - greedy interviews always finish with a verdict for every benefit
//! - probe points cover every interval and avoid gaps
//! - exported documents reload to the same catalog

use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

use eligibility_planner::domain::catalog::{
    Answer, AnswerValue, Attribute, AttributeRegistry, Benefit, Catalog, CatalogDocument, Comparison,
    Requirement, Verdict,
};
use eligibility_planner::domain::interview::InterviewSession;
use eligibility_planner::domain::planning::{
    probe_points, signature, DecisionTree, DecisionTreeBuilder, Interval, Relation, TreeWalk,
};

// -- Generated shapes --

const STATUS: [&str; 3] = ["a", "b", "c"];

#[derive(Debug, Clone)]
enum Bound {
    AtMost(u32),
    AtLeast(u32),
    Equal(u32),
    Between(u32, u32),
}

#[derive(Debug, Clone)]
enum Shape {
    Status(Vec<usize>),
    Income(Bound),
    Age(Bound),
    All(Vec<Shape>),
    Any(Vec<Shape>),
}

#[derive(Debug, Clone, Copy)]
struct Subject {
    status: usize,
    income: u32,
    age: u32,
}

fn arb_bound(max: u32) -> impl Strategy<Value = Bound> {
    prop_oneof![
        (0..=max).prop_map(Bound::AtMost),
        (0..=max).prop_map(Bound::AtLeast),
        (0..=max).prop_map(Bound::Equal),
        (0..=max, 0u32..=30).prop_map(|(low, width)| Bound::Between(low, low + width)),
    ]
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        prop::sample::subsequence(vec![0usize, 1, 2], 1..=3).prop_map(Shape::Status),
        arb_bound(100).prop_map(Shape::Income),
        arb_bound(120).prop_map(Shape::Age),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Shape::All),
            prop::collection::vec(inner, 0..4).prop_map(Shape::Any),
        ]
    })
}

// Numbers run past the declared domains so out-of-domain answers show up.
fn arb_subject() -> impl Strategy<Value = Subject> {
    (0usize..3, 0u32..=130, 0u32..=150).prop_map(|(status, income, age)| Subject { status, income, age })
}

// -- Conversions --

fn registry() -> AttributeRegistry {
    AttributeRegistry::from_attributes(vec![
        Attribute::categorical("status", "", STATUS.to_vec()).unwrap(),
        Attribute::numerical("income", "", 0.0, 100.0).unwrap(),
        Attribute::numerical("age", "", 0.0, 120.0).unwrap(),
    ])
    .unwrap()
}

fn comparison(bound: &Bound) -> Comparison {
    match *bound {
        Bound::AtMost(v) => Comparison::AtMost(v as f64),
        Bound::AtLeast(v) => Comparison::AtLeast(v as f64),
        Bound::Equal(v) => Comparison::Equal(v as f64),
        Bound::Between(low, high) => Comparison::Between {
            low: low as f64,
            high: high as f64,
        },
    }
}

fn requirement(shape: &Shape, registry: &AttributeRegistry) -> Requirement {
    let status = registry.get("status").unwrap();
    let income = registry.get("income").unwrap();
    let age = registry.get("age").unwrap();
    match shape {
        Shape::Status(accepted) => {
            Requirement::categorical(status, accepted.iter().map(|i| STATUS[*i]).collect::<Vec<_>>()).unwrap()
        }
        Shape::Income(bound) => Requirement::numeric(income, comparison(bound)).unwrap(),
        Shape::Age(bound) => Requirement::numeric(age, comparison(bound)).unwrap(),
        Shape::All(children) => Requirement::all(children.iter().map(|c| requirement(c, registry)).collect()),
        Shape::Any(children) => Requirement::any(children.iter().map(|c| requirement(c, registry)).collect()),
    }
}

fn catalog(shapes: &[Shape]) -> Catalog {
    let registry = registry();
    let benefits = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| Benefit::new(format!("b{}", i), &requirement(shape, &registry)).unwrap())
        .collect();
    Catalog::new(registry, benefits).unwrap()
}

fn answers(subject: Subject) -> Vec<Answer> {
    vec![
        Answer::label("status", STATUS[subject.status]),
        Answer::number("income", subject.income as f64),
        Answer::number("age", subject.age as f64),
    ]
}

fn walk_to_leaf<'t>(tree: &'t DecisionTree, answers: &[Answer]) -> TreeWalk<'t> {
    let values: HashMap<&str, &AnswerValue> = answers.iter().map(|a| (a.attribute.as_str(), &a.value)).collect();
    let mut walk = tree.walk();
    while let Some(title) = walk.next_question() {
        walk.answer(values[title]);
    }
    walk
}

fn eligible(catalog: &Catalog) -> BTreeSet<String> {
    catalog
        .verdicts()
        .into_iter()
        .filter(|v| v.verdict == Verdict::Eligible)
        .map(|v| v.name)
        .collect()
}

proptest! {
    #[test]
    fn relevance_shrinks_and_verdicts_stick(
        shapes in prop::collection::vec(arb_shape(), 1..5),
        subject in arb_subject(),
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
    ) {
        let mut catalog = catalog(&shapes);
        let answers = answers(subject);

        for index in order {
            let before: Vec<(BTreeSet<String>, Verdict)> = catalog
                .benefits()
                .iter()
                .map(|b| (b.relevant_attributes().clone(), b.verdict()))
                .collect();

            let answer = &answers[index];
            catalog.evaluate(answer);

            for (benefit, (relevant, verdict)) in catalog.benefits().iter().zip(before) {
                prop_assert!(benefit.relevant_attributes().is_subset(&relevant));
                prop_assert!(!benefit.relevant_attributes().contains(&answer.attribute));
                if verdict != Verdict::Unknown {
                    prop_assert_eq!(benefit.verdict(), verdict);
                }
            }
        }

        prop_assert!(catalog.verdicts().iter().all(|v| v.verdict != Verdict::Unknown));
    }

    #[test]
    fn decision_tree_walk_agrees_with_evaluation(
        shapes in prop::collection::vec(arb_shape(), 1..5),
        subject in arb_subject(),
    ) {
        let mut catalog = catalog(&shapes);
        let relation = Relation::from_catalog(&catalog);
        let tree = DecisionTreeBuilder::new().build(&relation, catalog.attributes()).unwrap();

        let answers = answers(subject);
        let walk = walk_to_leaf(&tree, &answers);
        prop_assert!(!walk.is_pruned());
        let reached: BTreeSet<String> = walk.outcome().unwrap_or_default().iter().cloned().collect();

        for answer in &answers {
            catalog.evaluate(answer);
        }
        prop_assert_eq!(reached, eligible(&catalog));
    }

    #[test]
    fn depth_limited_walk_never_overstates_eligibility(
        shapes in prop::collection::vec(arb_shape(), 1..5),
        subject in arb_subject(),
        max_depth in 1usize..=3,
    ) {
        let mut catalog = catalog(&shapes);
        let relation = Relation::from_catalog(&catalog);
        let tree = DecisionTreeBuilder::new()
            .with_max_depth(max_depth)
            .build(&relation, catalog.attributes())
            .unwrap();

        let answers = answers(subject);
        let walk = walk_to_leaf(&tree, &answers);
        let reached: BTreeSet<String> = walk.outcome().unwrap_or_default().iter().cloned().collect();

        for answer in &answers {
            catalog.evaluate(answer);
        }
        let expected = eligible(&catalog);

        // Every truly eligible benefit survives to the leaf, settled or not.
        prop_assert!(expected.is_subset(&reached));
        if !walk.is_pruned() {
            prop_assert_eq!(reached, expected);
        }
    }

    #[test]
    fn greedy_interview_settles_every_benefit(
        shapes in prop::collection::vec(arb_shape(), 1..5),
        subject in arb_subject(),
    ) {
        let answers = answers(subject);
        let mut session = InterviewSession::new(catalog(&shapes));
        let mut asked = 0;

        while let Some(attribute) = session.next_attribute() {
            let answer = answers.iter().find(|a| a.attribute == attribute.title()).unwrap();
            session.submit(answer.clone()).unwrap();
            asked += 1;
            prop_assert!(asked <= answers.len());
        }

        prop_assert!(session.is_complete());
        prop_assert!(session.verdicts().iter().all(|v| v.verdict != Verdict::Unknown));
    }

    #[test]
    fn probes_cover_intervals_and_avoid_gaps(
        bounds in prop::collection::vec((0u32..=100, 0u32..=40), 1..6),
    ) {
        let intervals: Vec<Interval> = bounds
            .iter()
            .map(|(low, width)| Interval::new(*low as f64, (*low + *width).min(100) as f64))
            .collect();
        let probes = probe_points(&intervals, 0.0, 100.0);

        for interval in &intervals {
            prop_assert!(probes.iter().any(|p| interval.contains(*p)));
        }
        for probe in &probes {
            prop_assert!(!signature(&intervals, *probe).is_empty());
        }
        for pair in probes.windows(2) {
            prop_assert!(pair[0] < pair[1]);
            prop_assert_ne!(signature(&intervals, pair[0]), signature(&intervals, pair[1]));
        }
    }

    #[test]
    fn disjoint_conjunction_multiplies_rows(
        accepted in prop::sample::subsequence(vec![0usize, 1, 2], 1..=3),
        lows in prop::collection::vec(0u32..=90, 1..4),
    ) {
        let registry = registry();
        let status = Shape::Status(accepted.clone());
        let income = Shape::Any(lows.iter().map(|low| Shape::Income(Bound::Between(*low, low + 10))).collect());
        let conjunction = requirement(&Shape::All(vec![status, income]), &registry);

        prop_assert_eq!(Relation::accepting_rows(&conjunction).len(), accepted.len() * lows.len());
        prop_assert_eq!(Relation::row_bound(&conjunction), accepted.len() * lows.len());
    }

    #[test]
    fn exported_document_reloads_unchanged(shapes in prop::collection::vec(arb_shape(), 0..4)) {
        let document = CatalogDocument::from_catalog(&catalog(&shapes));

        let json = serde_json::to_string(&document).unwrap();
        let from_json: CatalogDocument = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(CatalogDocument::from_catalog(&from_json.into_catalog().unwrap()), document.clone());

        let yaml = serde_yaml::to_string(&document).unwrap();
        let from_yaml: CatalogDocument = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(from_yaml, document);
    }
}
