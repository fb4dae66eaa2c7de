//! Helpers shared by the depot-algo integration tests.
#![allow(dead_code)]

use depot_algo::{verify_solution, LaneCosts, NetworkDesignSolution};
use depot_core::{DcId, SupplyNetwork};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness (`RUST_LOG=debug cargo test`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Cheapest design found by enumerating every K-subset of candidate DCs.
///
/// With unlimited plant supply and no DC capacity, each store goes to the
/// open DC minimizing `demand × (truck + cheapest rail into that DC)`.
pub fn brute_force_optimum(network: &SupplyNetwork) -> (f64, Vec<DcId>) {
    let costs = LaneCosts::compute(network).expect("complete distance tables");
    let dcs = network.distribution_centers();
    let k = network.facilities_to_open();

    let mut best = (f64::INFINITY, Vec::new());
    for subset in combinations(dcs.len(), k) {
        let mut total: f64 = subset.iter().map(|&i| dcs[i].fixed_cost.value()).sum();
        for store in network.stores() {
            total += subset
                .iter()
                .map(|&i| {
                    let truck = costs.truck_between(&dcs[i].id, &store.id).unwrap().value();
                    let rail = costs.cheapest_rail_into(&dcs[i].id).unwrap().value();
                    store.demand.value() * (truck + rail)
                })
                .fold(f64::INFINITY, f64::min);
        }
        if total < best.0 {
            best = (total, subset.iter().map(|&i| dcs[i].id.clone()).collect());
        }
    }
    best
}

/// All k-element index subsets of 0..n, lexicographic.
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn walk(start: usize, n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            walk(i + 1, n, k, current, out);
            current.pop();
        }
    }
    let mut out = Vec::new();
    if k <= n {
        walk(0, n, k, &mut Vec::new(), &mut out);
    }
    out
}

/// Panic with every violated property if `solution` is not a valid design.
pub fn assert_valid_design(network: &SupplyNetwork, solution: &NetworkDesignSolution) {
    let violations = verify_solution(network, solution, 1e-6);
    assert!(
        violations.is_empty(),
        "design violates: {}",
        violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    );
}

pub fn assert_close(actual: f64, expected: f64) {
    let scale = actual.abs().max(expected.abs()).max(1.0);
    assert!(
        (actual - expected).abs() <= 1e-6 * scale,
        "expected {expected}, got {actual}"
    );
}
