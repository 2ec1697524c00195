use rand::{rngs::StdRng, Rng, SeedableRng};
use rowview::matrix::{ColumnMajor, CompressedVector, DynamicMatrix, DynamicVector, StaticVector};
use rowview::{dispatch, row, row_mut, Op, Strategy, VectorExpr, ViewError};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_vector(rng: &mut StdRng, n: usize) -> DynamicVector<f64> {
    (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect()
}

#[test]
fn size_is_columns() {
    init();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        let nrows = rng.gen_range(1..10);
        let ncols = rng.gen_range(0..40);
        let a: DynamicMatrix<f64> = DynamicMatrix::new(0., nrows, ncols);
        for i in 0..nrows {
            assert_eq!(row(&a, i).unwrap().size(), ncols);
        }
        assert_eq!(
            row(&a, nrows).err(),
            Some(ViewError::InvalidIndex {
                index: nrows,
                rows: nrows
            })
        );

        let c: DynamicMatrix<f64, ColumnMajor> = DynamicMatrix::new(0., nrows, ncols);
        assert_eq!(row(&c, nrows - 1).unwrap().size(), ncols);
        assert!(row(&c, nrows + 3).is_err());
    }
}

#[test]
fn assigned_elements_match() {
    init();
    let mut rng = StdRng::seed_from_u64(2);
    for ncols in [1, 2, 3, 4, 7, 16, 17, 33, 64, 100] {
        let x = random_vector(&mut rng, ncols);

        let mut a: DynamicMatrix<f64> = DynamicMatrix::new(1., 5, ncols);
        let r = row_mut(&mut a, 3).unwrap();
        r.assign(&x).unwrap();
        for j in 0..ncols {
            assert_eq!(r.get(j), x[j]);
        }

        let mut c: DynamicMatrix<f64, ColumnMajor> = DynamicMatrix::new(1., 5, ncols);
        let r = row_mut(&mut c, 3).unwrap();
        r.assign(&x).unwrap();
        assert!(r == x);
        assert!(row(&c, 2).unwrap() == DynamicVector::new(1., ncols));
    }
}

#[test]
fn compound_assignments_match_vectors() {
    init();
    let mut rng = StdRng::seed_from_u64(3);
    let ncols = 21;
    let x = random_vector(&mut rng, ncols);
    let y = random_vector(&mut rng, ncols);

    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(0., 2, ncols);
    let r = row_mut(&mut a, 0).unwrap();
    r.assign(&x).unwrap();
    r.assign_add(&y).unwrap();
    assert_eq!(r.to_vector(), &x + &y);
    r.assign(&x).unwrap();
    r.assign_sub(&y).unwrap();
    assert_eq!(r.to_vector(), &x - &y);
    r.assign_mul(&y).unwrap();
    for j in 0..ncols {
        assert_eq!(r.get(j), (x[j] - y[j]) * y[j]);
    }
}

#[test]
fn self_assignment_is_a_no_op() {
    init();
    let mut rng = StdRng::seed_from_u64(4);
    let x = random_vector(&mut rng, 9);
    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(0., 3, 9);
    let r = row_mut(&mut a, 2).unwrap();
    r.assign(&x).unwrap();
    r.assign(r).unwrap();
    r.copy_from(&r).unwrap();
    assert!(r == x);
}

#[test]
fn reset_and_nan() {
    init();
    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(3., 3, 6);
    let r = row_mut(&mut a, 1).unwrap();
    assert!(!r.is_nan());
    r.set(4, f64::NAN);
    assert!(r.is_nan());
    r.reset();
    assert!(r.is_default());
    assert!(!r.is_nan());
    assert_eq!(row(&a, 0).unwrap().non_zeros(), 6);
}

#[test]
fn size_mismatch_changes_nothing() {
    init();
    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(0., 2, 4);
    let mut r = row_mut(&mut a, 0).unwrap();
    r.assign(&DynamicVector::from(vec![1., 2., 3., 4.])).unwrap();

    let five = DynamicVector::from(vec![9.; 5]);
    let expected = Err(ViewError::SizeMismatch {
        expected: 4,
        found: 5,
    });
    assert_eq!(r.assign(&five), expected);
    assert_eq!(r.assign_add(&five), expected);
    assert_eq!(r.assign_mul(&StaticVector::<f64, 5>::new(0.)), expected);
    assert_eq!(
        r.assign(&CompressedVector::<f64>::new(5)),
        expected
    );
    assert!(r == DynamicVector::from(vec![1., 2., 3., 4.]));

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        r += &five;
    }));
    assert!(result.is_err());
    assert!(r == DynamicVector::from(vec![1., 2., 3., 4.]));
}

#[test]
fn four_by_three() {
    init();
    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(0., 4, 3);
    let r = row_mut(&mut a, 1).unwrap();
    r.assign(&DynamicVector::from(vec![1., 2., 3.])).unwrap();
    assert_eq!(
        a.to_row_major_vec(),
        vec![0., 0., 0., 1., 2., 3., 0., 0., 0., 0., 0., 0.]
    );

    let r = row_mut(&mut a, 1).unwrap();
    r.assign_add(&DynamicVector::new(1., 3)).unwrap();
    assert_eq!(r.to_vector().as_slice(), &[2., 3., 4.]);
}

#[test]
fn sparse_multiplication_zeroes_the_rest() {
    init();
    let s = CompressedVector::from_pairs(8, vec![(3, 5.)]).unwrap();

    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(2., 3, 8);
    let mut r = row_mut(&mut a, 1).unwrap();
    r *= &s;
    let mut expected = vec![0.; 8];
    expected[3] = 10.;
    assert_eq!(r.to_vector().as_slice(), &expected[..]);

    let mut c: DynamicMatrix<f64, ColumnMajor> = DynamicMatrix::new(2., 3, 8);
    let r = row_mut(&mut c, 1).unwrap();
    r.assign_mul(&s).unwrap();
    assert_eq!(r.to_vector().as_slice(), &expected[..]);
    assert_eq!(row(&c, 0).unwrap().non_zeros(), 8);
}

#[test]
fn large_rows_stream() {
    init();
    let n = dispatch::streaming_threshold::<f64>() + 3;
    let mut rng = StdRng::seed_from_u64(5);
    let x = random_vector(&mut rng, n);

    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(0., 2, n);
    assert_eq!(dispatch::select(&a, &x, Op::Assign), Strategy::Streaming);
    let r = row_mut(&mut a, 1).unwrap();
    r.assign(&x).unwrap();
    assert!(r == x);
    assert!(row(&a, 0).unwrap().is_default());

    // reading the row being written never streams
    let r = row_mut(&mut a, 1).unwrap();
    assert_eq!(
        dispatch::select(r.matrix(), &(r * 2.0_f64), Op::Assign),
        Strategy::Vectorized
    );
    r.mul_scalar(2.);
    for j in (0..n).step_by(1000) {
        assert_eq!(r.get(j), 2. * x[j]);
    }
}

#[test]
fn integers() {
    init();
    let mut rng = StdRng::seed_from_u64(6);
    let x: DynamicVector<i32> = (0..19).map(|_| rng.gen_range(-100..100)).collect();
    let mut a: DynamicMatrix<i32> = DynamicMatrix::new(0, 2, 19);
    let mut r = row_mut(&mut a, 0).unwrap();
    r.assign(&x).unwrap();
    r *= 3_i32;
    r /= 3_i32;
    r -= &x;
    assert!(r.is_default());

    let mut bytes: DynamicMatrix<u8> = DynamicMatrix::new(1, 2, 40);
    let r = row_mut(&mut bytes, 1).unwrap();
    r.assign_add(&DynamicVector::new(2u8, 40)).unwrap();
    assert!(r == DynamicVector::new(3u8, 40));
    assert_eq!(r.evaluate().len(), 40);
}

#[test]
#[should_panic]
fn get_out_of_bounds_panics() {
    let a: DynamicMatrix<f64> = DynamicMatrix::new(0., 2, 4);
    let _ = row(&a, 0).unwrap().get(4);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn division_by_zero_panics_in_debug() {
    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(1., 2, 4);
    let mut r = row_mut(&mut a, 0).unwrap();
    r /= 0.0_f64;
}

#[test]
fn written_rows_survive_serialization() {
    init();
    let mut a: DynamicMatrix<f64, ColumnMajor> = DynamicMatrix::new(0., 3, 4);
    let r = row_mut(&mut a, 2).unwrap();
    r.assign(&DynamicVector::from(vec![1., 2., 3., 4.])).unwrap();

    let json = serde_json::to_string(&a).unwrap();
    let back: DynamicMatrix<f64, ColumnMajor> = serde_json::from_str(&json).unwrap();
    assert!(row(&back, 2).unwrap() == row(&a, 2).unwrap());
    assert!(row(&back, 0).unwrap().is_default());
}

#[test]
fn set_out_of_bounds_never_reaches_the_next_row() {
    init();
    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(0., 2, 3);
    let r = row_mut(&mut a, 0).unwrap();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| r.set(4, 9.)));
    assert!(result.is_err());
    assert!(row(&a, 1).unwrap().is_default());
    assert_eq!(a.to_row_major_vec(), vec![0.; 6]);
}

#[test]
fn column_major_rows_write_through_cells() {
    init();
    let mut a: DynamicMatrix<f64, ColumnMajor> = DynamicMatrix::new(1., 3, 4);
    let r = row_mut(&mut a, 1).unwrap();
    for (j, cell) in r.iter_mut().enumerate() {
        cell.set(cell.get() + j as f64);
    }
    assert_eq!(r.to_vector().as_slice(), &[1., 2., 3., 4.]);
    assert!(row(&a, 0).unwrap().iter().all(|v| v == 1.));
    assert!(row(&a, 2).unwrap().iter().all(|v| v == 1.));
}
