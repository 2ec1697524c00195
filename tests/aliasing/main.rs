use rand::{rngs::StdRng, Rng, SeedableRng};
use rowview::matrix::{
    ColumnMajor, CompressedMatrix, CompressedVector, DynamicMatrix, DynamicVector, RowMajor,
    RowStorage, StorageOrder,
};
use rowview::{dot, row, row_mut, AddType, MulType, RowMatProd, VecScale, VectorExpr};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_matrix<O: StorageOrder>(rng: &mut StdRng, n: usize) -> DynamicMatrix<i64, O> {
    let data = (0..n * n).map(|_| rng.gen_range(-5..5)).collect();
    DynamicMatrix::from_data(n, n, data)
}

fn row_times_itself<O: StorageOrder>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for n in [1, 2, 3, 5, 8, 13] {
        let mut a: DynamicMatrix<i64, O> = random_matrix(&mut rng, n);
        let copy = a.clone();
        let k = rng.gen_range(0..n);

        // the product, computed on a matrix nobody writes into
        let expected: DynamicVector<i64> = (0..n)
            .map(|j| (0..n).map(|l| copy.at(k, l) * copy.at(l, j)).sum::<i64>())
            .collect();

        let r = row_mut(&mut a, k).unwrap();
        r.assign(r * r.matrix()).unwrap();
        assert!(r == expected, "row {} of {}x{}: {} != {}", k, n, n, r, expected);

        for i in (0..n).filter(|i| *i != k) {
            assert!(row(&a, i).unwrap() == row(&copy, i).unwrap());
        }
    }
}

#[test]
fn row_times_its_own_matrix() {
    init();
    row_times_itself::<RowMajor>(10);
    row_times_itself::<ColumnMajor>(11);
}

#[test]
fn compound_assignments_read_their_own_row() {
    init();
    let mut rng = StdRng::seed_from_u64(12);
    let n = 9;
    let mut a: DynamicMatrix<i64> = random_matrix(&mut rng, n);
    let copy = a.clone();
    let r = row_mut(&mut a, 4).unwrap();
    let before = r.to_vector();

    r.assign_add(r * r.matrix()).unwrap();
    let product: DynamicVector<i64> = (row(&copy, 4).unwrap() * &copy).evaluate();
    assert!(r == &before + &product);

    r.assign_sub(r + r).unwrap();
    let negated: DynamicVector<i64> = (&before + &product).iter().map(|v| -v).collect();
    assert!(r == negated);
}

#[test]
fn rows_of_the_same_matrix() {
    init();
    let mut rng = StdRng::seed_from_u64(13);
    let n = 6;
    let mut a: DynamicMatrix<i64, ColumnMajor> = random_matrix(&mut rng, n);
    let copy = a.clone();

    let r = row_mut(&mut a, 0).unwrap();
    let last = r.sibling(n - 1).unwrap();
    r.assign(last - r).unwrap();
    let expected = &row(&copy, n - 1).unwrap().to_vector() - &row(&copy, 0).unwrap().to_vector();
    assert!(r == expected);

    r.copy_from(&r.sibling(2).unwrap()).unwrap();
    assert!(r == row(&copy, 2).unwrap());
}

#[test]
fn rows_of_sparse_matrices() {
    init();
    let s = CompressedMatrix::from_triplets(3, 4, vec![(0, 1, 2.), (2, 0, 1.), (2, 3, 4.)])
        .unwrap();
    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(1., 2, 4);
    let r = row_mut(&mut a, 1).unwrap();

    r.assign_add(row(&s, 2).unwrap()).unwrap();
    assert_eq!(r.to_vector().as_slice(), &[2., 1., 1., 5.]);

    let v = DynamicVector::from(vec![1., 1., 1.]);
    r.assign(RowMatProd::new(&v, &s)).unwrap();
    assert_eq!(r.to_vector().as_slice(), &[1., 2., 0., 4.]);

    assert_eq!(dot(&row(&s, 2).unwrap(), &r), Ok(17.));
}

#[test]
fn sparse_right_hand_sides() {
    init();
    let mut a: DynamicMatrix<f64> = DynamicMatrix::new(2., 3, 6);
    let r = row_mut(&mut a, 2).unwrap();
    let s = CompressedVector::from_pairs(6, vec![(1, 3.), (4, -1.)]).unwrap();

    r.assign(VecScale::new(&s, 2.)).unwrap();
    assert_eq!(r.to_vector().as_slice(), &[0., 6., 0., 0., -2., 0.]);

    r.fill(2.);
    r.assign_mul(r * &s).unwrap();
    assert_eq!(r.to_vector().as_slice(), &[0., 12., 0., 0., -4., 0.]);
    assert!(row(&a, 1).unwrap() == DynamicVector::new(2., 6));
}

#[test]
fn result_types() {
    use std::any::TypeId;
    type Row = rowview::DenseRow<'static, DynamicMatrix<f64>>;

    assert_eq!(
        TypeId::of::<AddType<Row, CompressedVector<f64>>>(),
        TypeId::of::<DynamicVector<f64>>()
    );
    assert_eq!(
        TypeId::of::<MulType<CompressedVector<f64>, Row>>(),
        TypeId::of::<CompressedVector<f64>>()
    );
    assert!(<Row as VectorExpr>::IS_ROW);
}
