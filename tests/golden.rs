//! Golden file integration tests.
//!
//! Reads tests/testdata/products_golden.json and checks every strategy's
//! product and the Strassen call counts against recorded values.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use strassen_core::{
    multiply_classic, multiply_strassen, multiply_strassen_parallel, predicted_calls,
    select_multipliers, DefaultFactory, Element, Matrix, Options, SquareMultiplier,
};

#[derive(Deserialize)]
struct GoldenData {
    #[allow(dead_code)]
    description: String,
    cases: Vec<GoldenCase>,
}

#[derive(Deserialize)]
struct GoldenCase {
    name: String,
    a: Vec<Vec<Element>>,
    b: Vec<Vec<Element>>,
    product: Vec<Vec<Element>>,
    /// Cutoff (as a string key) to expected recursive calls.
    calls: BTreeMap<String, u64>,
}

fn load_golden() -> GoldenData {
    let data = std::fs::read_to_string("tests/testdata/products_golden.json")
        .or_else(|_| std::fs::read_to_string("../../tests/testdata/products_golden.json"))
        .expect("Failed to read golden file");
    serde_json::from_str(&data).expect("Failed to parse golden file")
}

fn operands(case: &GoldenCase) -> (Matrix, Matrix, Matrix) {
    (
        Matrix::from_rows_named(case.a.clone(), "A").unwrap(),
        Matrix::from_rows_named(case.b.clone(), "B").unwrap(),
        Matrix::from_rows(case.product.clone()).unwrap(),
    )
}

fn cutoffs(case: &GoldenCase) -> impl Iterator<Item = (usize, u64)> + '_ {
    case.calls
        .iter()
        .map(|(cutoff, &calls)| (cutoff.parse().unwrap(), calls))
}

#[test]
fn golden_file_has_cases() {
    let golden = load_golden();
    assert!(golden.cases.len() >= 5);
    assert!(golden.cases.iter().any(|c| c.name == "two_by_two"));
}

#[test]
fn golden_classic() {
    for case in &load_golden().cases {
        let (a, b, expected) = operands(case);
        assert_eq!(multiply_classic(&a, &b).unwrap(), expected, "{}", case.name);
    }
}

#[test]
fn golden_strassen_products_and_calls() {
    for case in &load_golden().cases {
        let (a, b, expected) = operands(case);
        for (cutoff, calls) in cutoffs(case) {
            let (product, stats) = multiply_strassen(&a, &b, cutoff, None).unwrap();
            assert_eq!(product, expected, "{} cutoff={cutoff}", case.name);
            assert_eq!(stats.calls, calls, "{} cutoff={cutoff}", case.name);
            assert_eq!(predicted_calls(a.size(), cutoff), calls);
        }
    }
}

#[test]
fn golden_parallel_matches_sequential_counts() {
    for case in &load_golden().cases {
        let (a, b, expected) = operands(case);
        for (cutoff, calls) in cutoffs(case) {
            let (product, stats) = multiply_strassen_parallel(&a, &b, cutoff, None).unwrap();
            assert_eq!(product, expected, "{} cutoff={cutoff}", case.name);
            assert_eq!(stats.calls, calls, "{} cutoff={cutoff}", case.name);
        }
    }
}

#[test]
fn golden_through_registry() {
    let factory = DefaultFactory::new(Options {
        cutoff: 2,
        parallel_grain: 1,
    });
    let strategies: Vec<Arc<dyn SquareMultiplier>> = select_multipliers("all", &factory).unwrap();
    for case in &load_golden().cases {
        let (a, b, expected) = operands(case);
        for s in &strategies {
            let product = s.multiply(&a, &b).unwrap();
            assert_eq!(product.matrix, expected, "{} via {}", case.name, s.name());
            if let Some(stats) = product.stats {
                assert_eq!(stats.calls, case.calls["2"], "{} via {}", case.name, s.name());
            }
        }
    }
}
