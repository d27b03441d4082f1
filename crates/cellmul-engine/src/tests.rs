use std::sync::Arc;
use std::time::Duration;

use foundation::{
    coordinates, AdmissionGate, ConfigError, Coordinate, Matrix, Product, Shape, SENTINEL,
};
use gate::GateKind;
use rng::{Lcg, RngKind};

use crate::unit::{compute_cell, run_unit};
use crate::*;

fn engine(max_workers: usize, gate: GateKind) -> Engine {
    Engine::new(
        EngineConfigBuilder::default()
            .max_workers(max_workers)
            .gate(gate)
            .build()
            .unwrap(),
    )
}

fn reference_product(a: &Matrix, b: &Matrix) -> Matrix {
    let mut c = Matrix::zeroed(Shape::new(a.rows(), b.cols()));
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            let mut sum = 0;
            for k in 0..a.cols() {
                sum += a.get(i, k).unwrap() * b.get(k, j).unwrap();
            }
            c.set(i, j, sum);
        }
    }
    c
}

fn rows(values: Vec<Vec<Element>>) -> Matrix {
    Matrix::from_rows(values).unwrap()
}

#[test]
fn test_two_by_two_product() {
    let outcome = engine(5, GateKind::Condvar)
        .multiply(rows(vec![vec![1, 2], vec![3, 4]]), rows(vec![vec![5, 6], vec![7, 8]]))
        .unwrap();
    assert_eq!(outcome.result.to_rows(), vec![vec![19, 22], vec![43, 50]]);
    assert_eq!(outcome.stats.admitted, 4);
    assert_eq!(outcome.stats.released, 4);
    assert!(outcome.stats.peak_active <= 5);
}

#[test]
fn test_inner_dimension_mismatch_rejected() {
    let a = Matrix::zeroed(Shape::new(2, 3));
    let b = Matrix::zeroed(Shape::new(2, 2));
    let err = engine(5, GateKind::Condvar).multiply(a, b).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Config(ConfigError::InnerDimensionMismatch { a_cols: 3, b_rows: 2 })
    ));
}

#[test]
fn test_single_slot_serializes_without_deadlock() {
    let a = rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
    let b = rows(vec![vec![9, 8, 7], vec![6, 5, 4], vec![3, 2, 1]]);
    let expected = reference_product(&a, &b);

    for kind in [GateKind::Condvar, GateKind::Spin] {
        let outcome = engine(1, kind).multiply(a.clone(), b.clone()).unwrap();
        assert_eq!(outcome.result, expected);
        assert_eq!(outcome.stats.peak_active, 1);
        assert_eq!(outcome.stats.admitted, 9);
    }
}

#[test]
fn test_non_square_product() {
    let product = Product::from_dims(3, 4, 2).unwrap();
    let outcome = engine(2, GateKind::Condvar)
        .run(product, &mut Lcg::new(11))
        .unwrap();
    assert_eq!(outcome.result.shape(), Shape::new(3, 2));
    assert_eq!(outcome.result, reference_product(&outcome.a, &outcome.b));
}

#[test]
fn test_stress_throttles_many_cells() {
    let product = Product::from_dims(24, 16, 24).unwrap();
    for (kind, max) in [(GateKind::Condvar, 3), (GateKind::Spin, 2)] {
        let outcome = engine(max, kind)
            .run(product, RngKind::Chacha.source(5).as_mut())
            .unwrap();
        assert_eq!(outcome.result, reference_product(&outcome.a, &outcome.b));
        assert!(outcome.stats.peak_active <= max);
        assert_eq!(outcome.stats.admitted, 24 * 24);
        assert_eq!(outcome.stats.released, 24 * 24);
    }
}

#[test]
fn test_every_cell_written_after_drain() {
    let product = Product::from_dims(5, 3, 7).unwrap();
    let outcome = engine(4, GateKind::Condvar)
        .run(product, &mut Lcg::new(3))
        .unwrap();
    assert!(outcome.result.as_slice().iter().all(|&v| v != SENTINEL));
}

#[test]
fn test_same_inputs_same_result() {
    let product = Product::from_dims(6, 5, 4).unwrap();
    let first = engine(3, GateKind::Condvar)
        .run(product, &mut Lcg::new(2024))
        .unwrap();
    let second = engine(3, GateKind::Condvar)
        .run(product, &mut Lcg::new(2024))
        .unwrap();
    assert_eq!(first.a, second.a);
    assert_eq!(first.b, second.b);
    assert_eq!(first.result, second.result);

    let again = engine(5, GateKind::Spin)
        .multiply(first.a.clone(), first.b.clone())
        .unwrap();
    assert_eq!(again.result, first.result);
}

#[test]
fn test_dispatch_order_is_row_major() {
    let product = Product::from_dims(3, 2, 4).unwrap();
    let config = EngineConfigBuilder::default()
        .max_workers(2)
        .work_delay(Duration::from_millis(1))
        .build()
        .unwrap();
    let mut run = Run::new(product, &config).unwrap();
    run.populate(|a, b| {
        rng::populate(a, &mut Lcg::new(1));
        rng::populate(b, &mut Lcg::new(2));
    })
    .unwrap();

    let tasks = run.dispatch().unwrap();
    let order: Vec<Coordinate> = tasks.coordinates().collect();
    assert_eq!(order, coordinates(product.result_shape()).collect::<Vec<_>>());
    assert_eq!(order[0], Coordinate::new(0, 0));
    assert_eq!(order[1], Coordinate::new(0, 1));
    assert_eq!(order[4], Coordinate::new(1, 0));

    let report = run.drain(tasks).unwrap();
    assert_eq!(report.completed, 12);
    assert_eq!(run.phase(), Phase::Done);
}

#[test]
fn test_gate_reaches_cap_under_slow_workers() {
    let config = EngineConfigBuilder::default()
        .max_workers(4)
        .work_delay(Duration::from_millis(50))
        .build()
        .unwrap();
    let outcome = Engine::new(config)
        .run(Product::from_dims(2, 2, 4).unwrap(), &mut Lcg::new(8))
        .unwrap();
    assert_eq!(outcome.stats.peak_active, 4);
    assert_eq!(outcome.result, reference_product(&outcome.a, &outcome.b));
}

#[test]
fn test_failing_workers_release_their_slots() {
    let a = rows(vec![vec![Element::MAX], vec![Element::MAX]]);
    let b = rows(vec![vec![2, 2]]);
    let product = Product::new(a.shape(), b.shape()).unwrap();
    let config = EngineConfigBuilder::default().max_workers(1).build().unwrap();

    let mut run = Run::new(product, &config).unwrap();
    run.populate(|dst_a, dst_b| {
        *dst_a = a;
        *dst_b = b;
    })
    .unwrap();
    let tasks = run.dispatch().unwrap();
    let err = run.drain(tasks).unwrap_err();

    match err {
        EngineError::Worker { failed, first } => {
            assert_eq!(failed, 4);
            assert_eq!(
                first,
                WorkError::Overflow {
                    coord: Coordinate::new(0, 0)
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    let gate = run.context().gate();
    assert_eq!(gate.active(), 0);
    assert_eq!(gate.stats().released, 4);
    assert_eq!(run.phase(), Phase::Draining);
    assert!(run.result().is_err());
}

#[test]
fn test_phase_order_enforced() {
    let product = Product::from_dims(1, 1, 1).unwrap();
    let mut run = Run::new(product, &EngineConfig::default()).unwrap();

    let err = run.dispatch().unwrap_err();
    assert!(matches!(
        err,
        EngineError::PhaseViolation {
            expected: Phase::Populated,
            actual: Phase::Init
        }
    ));
    assert!(matches!(
        run.result(),
        Err(EngineError::PhaseViolation {
            expected: Phase::Done,
            ..
        })
    ));

    run.populate(|_, _| {}).unwrap();
    assert!(matches!(
        run.populate(|_, _| {}),
        Err(EngineError::PhaseViolation {
            expected: Phase::Init,
            actual: Phase::Populated
        })
    ));
}

#[test]
fn test_populate_rejects_reshaped_input() {
    let product = Product::from_dims(2, 3, 2).unwrap();
    let mut run = Run::new(product, &EngineConfig::default()).unwrap();

    let err = run
        .populate(|a, b| {
            *a = rows(vec![vec![1], vec![1]]);
            *b = Matrix::filled(Shape::new(3, 2), 1);
        })
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Reshaped {
            name: "A",
            expected: Shape { rows: 2, cols: 3 },
            found: Shape { rows: 2, cols: 1 }
        }
    ));
    assert_eq!(run.phase(), Phase::Init);
    assert!(run.dispatch().is_err());

    run.populate(|a, b| {
        *a = Matrix::filled(Shape::new(2, 3), 1);
        *b = Matrix::filled(Shape::new(3, 2), 1);
    })
    .unwrap();
    let tasks = run.dispatch().unwrap();
    run.drain(tasks).unwrap();
    assert_eq!(run.result().unwrap().to_rows(), vec![vec![3, 3], vec![3, 3]]);
}

#[test]
fn test_second_write_to_a_cell_fails() {
    let product = Product::from_dims(1, 2, 1).unwrap();
    let mut run = Run::new(product, &EngineConfig::default()).unwrap();
    run.populate(|a, b| {
        a.as_mut_slice().copy_from_slice(&[2, 3]);
        b.as_mut_slice().copy_from_slice(&[4, 5]);
    })
    .unwrap();
    let ctx = run.context();
    let coord = Coordinate::new(0, 0);

    let permit = gate::enter_owned(Arc::clone(ctx.gate()));
    assert_eq!(run_unit(ctx, coord, permit), Ok(23));
    let permit = gate::enter_owned(Arc::clone(ctx.gate()));
    assert_eq!(run_unit(ctx, coord, permit), Err(WorkError::Rewrite { coord }));
    assert_eq!(ctx.gate().active(), 0);
    assert_eq!(ctx.result().snapshot().get(0, 0), Some(23));
}

#[test]
fn test_compute_cell_bounds() {
    let product = Product::from_dims(2, 3, 2).unwrap();
    let mut run = Run::new(product, &EngineConfig::default()).unwrap();
    run.populate(|a, b| {
        a.as_mut_slice().copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        b.as_mut_slice().copy_from_slice(&[1, 0, 0, 1, 1, 1]);
    })
    .unwrap();
    let ctx = run.context();

    assert_eq!(compute_cell(ctx, Coordinate::new(0, 0)), Ok(4));
    assert_eq!(compute_cell(ctx, Coordinate::new(1, 1)), Ok(11));
    assert_eq!(
        compute_cell(ctx, Coordinate::new(2, 0)),
        Err(WorkError::OutOfBounds {
            coord: Coordinate::new(2, 0),
            shape: Shape::new(2, 2)
        })
    );
}
