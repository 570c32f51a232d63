//! Regression tables for the Smirnov distribution and its inverse.

use ksdist_core::config::DEFAULT_EXACT_MAX_N;
use ksdist_core::prelude::*;
use ksdist_core::smirnov::smirnov_exact;

const RTOL: f64 = 1e-10;

fn assert_close(actual: f64, expected: f64, rtol: f64) {
    assert!(
        (actual - expected).abs() <= rtol * expected.abs(),
        "got {actual}, expected {expected}"
    );
}

fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(|idx| start + step * idx as f64).collect()
}

fn sample_sizes() -> impl Iterator<Item = u64> {
    (2..20).chain(1010..1020)
}

#[test]
fn smirnov_nan() {
    assert!(smirnov(1, f64::NAN).is_nan());
    assert!(smirnov(0, 0.5).is_nan());
}

#[test]
fn smirnov_basic() {
    let dataset = [
        (1, 0.1, 0.9),
        (1, 0.875, 0.125),
        (2, 0.875, 0.125 * 0.125),
        (3, 0.875, 0.125 * 0.125 * 0.125),
    ];
    for (n, x, p) in dataset {
        assert_close(smirnov(n, x), p, RTOL);
    }
}

#[test]
fn smirnov_x_equals_0_and_1() {
    for n in sample_sizes() {
        assert_eq!(smirnov(n, 0.0), 1.0);
        assert_eq!(smirnov(n, 1.0), 0.0);
    }
}

#[test]
fn smirnov_x_equals_half() {
    let dataset = [
        (1, 0.5),
        (2, 0.25),
        (3, 0.166_666_666_667),
        (4, 0.093_75),
        (5, 0.056),
        (6, 0.032_793_209_876_5),
        (7, 0.019_195_870_768_1),
        (8, 0.011_295_318_603_5),
        (9, 0.006_619_332_573_55),
        (10, 0.003_888_705),
    ];
    for (n, p) in dataset {
        assert_close(smirnov(n, 0.5), p, RTOL);
    }
}

#[test]
fn smirnov_small_n_closed_forms() {
    for x in linspace(0.0, 1.0, 101) {
        assert_close(smirnov(1, x), 1.0 - x, RTOL);
    }
    for x in linspace(0.5, 1.0, 101) {
        assert_close(smirnov(2, x), (1.0 - x).powi(2), RTOL);
    }
    for x in linspace(0.7, 1.0, 31) {
        assert_close(smirnov(3, x), (1.0 - x).powi(3), RTOL);
    }
}

#[test]
fn smirnov_large_n() {
    let pvals: Vec<f64> = (400..1100).step_by(20).map(|n| smirnov(n, 0.4)).collect();
    assert!(pvals.windows(2).all(|w| w[1] <= w[0]));

    // 2000^-1000 is below the smallest subnormal.
    assert_eq!(smirnov(1000, 1.0 - 1.0 / 2000.0), 0.0);

    for n in [1000, 2000, 3000, 4000] {
        assert_close(smirnov(n, 1.0 / (n as f64).sqrt()), (-2.0_f64).exp(), 0.05);
    }
}

#[test]
fn smirnov_monotone_in_x() {
    for n in [5, 50, 500, 20_000, 2_000_000] {
        let values: Vec<f64> = linspace(0.0, 1.0, 501)
            .into_iter()
            .map(|x| smirnov(n, x))
            .collect();
        assert!(values.windows(2).all(|w| w[1] <= w[0]), "n={n}");
    }

    // Through the switch between the short exact sum and the expansion.
    let n = 2_000_000;
    let values: Vec<f64> = linspace(0.0, 20.0 / n as f64, 401)
        .into_iter()
        .map(|x| smirnov(n, x))
        .collect();
    assert!(values.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn smirnov_agrees_with_exact_above_crossover() {
    let n = DEFAULT_EXACT_MAX_N + 1;
    for t in [0.001, 0.005, 0.0095, 0.01, 0.1, 1.0, 2.0, 4.0, 8.0, 12.0, 18.0] {
        let x = t / (n as f64).sqrt();
        assert_close(smirnov(n, x), smirnov_exact(n, x), RTOL);
    }
}

#[test]
fn smirnov_non_increasing_in_n() {
    // Starts on the exact side of the crossover, and covers x well below 1 / n.
    let c = DEFAULT_EXACT_MAX_N;
    let ns = [c, 2 * c, 5 * c, 10 * c, 100 * c, 1000 * c];
    for x in [1e-9, 1e-8, 1e-7, 1e-6, 1e-5, 1e-4, 1e-3] {
        let values: Vec<f64> = ns.iter().map(|&n| smirnov(n, x)).collect();
        assert!(
            values.windows(2).all(|w| w[1] < w[0] || w[0] == 0.0),
            "x={x} {values:?}"
        );
    }
}

#[test]
fn smirnovi_nan() {
    assert!(smirnovi(1, f64::NAN).is_nan());
    assert!(smirnovi(0, 0.5).is_nan());
}

#[test]
fn smirnovi_basic() {
    let dataset = [
        (1, 0.4, 0.6),
        (1, 0.6, 0.4),
        (1, 0.99, 0.01),
        (1, 0.01, 0.99),
        (2, 0.125 * 0.125, 0.875),
        (3, 0.125 * 0.125 * 0.125, 0.875),
        (10, 1.0 / 16_f64.powi(10), 1.0 - 1.0 / 16.0),
    ];
    for (n, p, x) in dataset {
        assert_close(smirnovi(n, p), x, RTOL);
    }
}

#[test]
fn smirnovi_p_equals_0_and_1() {
    for n in sample_sizes() {
        assert_eq!(smirnovi(n, 0.0), 1.0);
        assert_eq!(smirnovi(n, 1.0), 0.0);
    }
}

#[test]
fn smirnovi_small_n_closed_forms() {
    for p in linspace(0.0, 1.0, 101) {
        assert_close(smirnovi(1, p), 1.0 - p, RTOL);
    }
    for x in linspace(0.5, 1.0, 101) {
        assert_close(smirnovi(2, (1.0 - x).powi(2)), x, RTOL);
    }
    for x in linspace(0.7, 1.0, 31) {
        assert_close(smirnovi(3, (1.0 - x).powi(3)), x, RTOL);
    }
}

#[test]
fn smirnovi_round_trip() {
    let dataset = [
        (1, 0.4),
        (1, 0.6),
        (2, 0.875),
        (3, 0.875),
        (3, 0.125),
        (10, 0.999),
        (10, 0.0001),
        (200, 1e-50),
        (5000, 0.5),
    ];
    for (n, p) in dataset {
        assert_close(smirnov(n, smirnovi(n, p)), p, RTOL);
    }
}

#[test]
fn smirnovi_near_one_large_n() {
    let smirnov_dist = Smirnov::default();
    let p = 1.0 - 1e-7;
    for n in [20_000, 2_000_000] {
        let quantile = smirnov_dist.isf(n, p);
        assert!(quantile.is_reliable(), "n={n} {quantile:?}");
        assert!(quantile.x > 1e-9);
        assert_close(smirnov(n, quantile.x), p, RTOL);
    }
}

#[test]
fn smirnovi_p_equals_half() {
    let dataset = [
        (1, 0.5, 0.5),
        (2, 0.5, 0.366_025_403_784),
        (2, 0.25, 0.5),
        (3, 0.5, 0.297_156_508_177),
        (4, 0.5, 0.255_520_481_121),
        (5, 0.5, 0.234_559_536_069),
        (6, 0.5, 0.217_159_658_98),
        (7, 0.5, 0.202_722_580_034),
        (8, 0.5, 0.190_621_765_256),
        (9, 0.5, 0.180_363_501_362),
        (10, 0.5, 0.171_578_670_06),
    ];
    for (n, p, x) in dataset {
        assert_close(smirnovi(n, p), x, RTOL);
    }
}

#[test]
fn inverse_reports_status() {
    let smirnov_dist = Smirnov::default();
    assert_eq!(smirnov_dist.isf(7, 0.0).status, InversionStatus::Exact);
    assert_eq!(smirnov_dist.isf(7, f64::NAN).status, InversionStatus::Invalid);
    assert!(smirnov_dist.isf(7, 0.42).is_reliable());
    assert!(smirnov_dist.isf(50_000, 0.42).is_reliable());
}

#[test]
fn batch_matches_scalar() {
    let ns = [1, 2, 3, 10, 100, 1000, 20_000];
    let out = smirnov_batch(&ns, &[0.05]).unwrap();
    for (&n, &p) in ns.iter().zip(&out) {
        assert_eq!(p, smirnov(n, 0.05));
    }
    let out = smirnovi_batch(&ns, &[0.05]).unwrap();
    for (&n, &x) in ns.iter().zip(&out) {
        assert_eq!(x, smirnovi(n, 0.05));
    }
    assert_eq!(
        smirnov_batch(&[1, 2], &[0.1, 0.2, 0.3]),
        Err(Error::ShapeMismatch(2, 3))
    );
}

#[test]
fn custom_crossover() {
    let config = SmirnovConfig {
        exact_max_n: 10,
        ..Default::default()
    };
    let smirnov_dist = Smirnov::new(config).unwrap();
    assert_eq!(smirnov_dist.config().exact_max_n, 10);
    let below = smirnov_dist.sf(10, 0.2);
    let above = smirnov_dist.sf(11, 0.2);
    assert!(above < below);

    let quantile = smirnov_dist.isf(40, 0.2);
    assert!(quantile.is_reliable());
    assert_close(smirnov_dist.sf(40, quantile.x), 0.2, RTOL);
}
