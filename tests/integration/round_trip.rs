//! Tests that read data match the original written data.

use ndarray::prelude::*;
use ndarray_txt::{read_txt, write_txt, ReadTxtExt, ValueFormat, WritableElement, WriteTxtExt};
use std::fmt::Debug;

/// Tests that writing the array with `format` and reading it back again gives
/// `expected`.
fn test_round_trip_single_layout<A, D>(
    original: ArrayView<'_, A, D>,
    expected: ArrayView<'_, f64, D>,
    format: &ValueFormat,
) where
    A: Clone + Debug + WritableElement,
    D: Dimension,
{
    let mut txt = Vec::<u8>::new();
    original.write_txt_with_format(&mut txt, format).unwrap();
    let read = Array::<f64, D>::read_txt(&txt[..]).unwrap();
    assert_eq!(expected, read);
    let read_dyn = ArrayD::<f64>::read_txt(&txt[..]).unwrap();
    assert_eq!(expected.into_dyn(), read_dyn);
}

/// Calls `test_round_trip_single_layout` with standard layout, Fortran layout,
/// and (if ndim > 2) a permuted layout.
fn test_round_trip_multiple_layouts<A, D>(
    original: ArrayView<'_, A, D>,
    expected: ArrayView<'_, f64, D>,
    format: &ValueFormat,
) where
    A: Clone + Debug + WritableElement,
    D: Dimension,
{
    // Test with standard layout.
    let standard =
        Array::from_shape_vec(original.raw_dim(), original.iter().cloned().collect()).unwrap();
    test_round_trip_single_layout(standard.view(), expected.view(), format);

    // Test with Fortran layout.
    let fortran = Array::from_shape_vec(
        original.raw_dim().f(),
        original.t().iter().cloned().collect(),
    )
    .unwrap();
    test_round_trip_single_layout(fortran.view(), expected.view(), format);

    // Test with permuted axes layout.
    if original.ndim() > 2 {
        // Data with axes 1 and 2 swapped.
        let permuted_data: Vec<_> = {
            let mut perm = original.view();
            perm.swap_axes(1, 2);
            perm.iter().cloned().collect()
        };
        // Shape with axes 1 and 2 swapped.
        let permuted_shape: D = {
            let mut shape = original.raw_dim();
            shape[1] = original.len_of(Axis(2));
            shape[2] = original.len_of(Axis(1));
            shape
        };
        let mut permuted = Array::from_shape_vec(permuted_shape, permuted_data).unwrap();
        permuted.swap_axes(1, 2);
        test_round_trip_single_layout(permuted.view(), expected.view(), format);
    }
}

#[test]
fn round_trip_f64() {
    let arr = array![
        [2.7f64, -40.4, -23., 27.8, -49., -43.3],
        [-25.2, 11.8, -8.9, -17.8, 36.4, -25.6],
    ];
    test_round_trip_multiple_layouts(arr.view(), arr.view(), &ValueFormat::default());
}

#[test]
fn round_trip_f32() {
    let arr = array![
        [[3f32, -1.4], [-159., 26.], [5., -3.5]],
        [[-89.7, 93.], [2., 384.], [-626.4, 3.]],
    ];
    let expected = arr.mapv(f64::from);
    let mut txt = Vec::<u8>::new();
    arr.write_txt(&mut txt).unwrap();
    assert_eq!(arr, Array3::<f32>::read_txt(&txt[..]).unwrap());
    // Reading as f64 gives the f32 values rounded to six decimals.
    let read = Array3::<f64>::read_txt(&txt[..]).unwrap();
    assert!(read.iter().zip(&expected).all(|(a, b)| (a - b).abs() < 1e-6));
}

#[test]
fn round_trip_i32() {
    let arr = array![[[1i32, 8], [-3, 4], [2, 9]], [[-5, 0], [7, 38], [-4, 1]]];
    let expected = arr.mapv(f64::from);
    test_round_trip_multiple_layouts(arr.view(), expected.view(), &ValueFormat::default());
    test_round_trip_multiple_layouts(arr.view(), expected.view(), &ValueFormat::integer());
}

#[test]
fn round_trip_u8_4d() {
    let arr = Array4::from_shape_fn((2, 3, 1, 4), |(i, j, k, l)| (i * 12 + j * 4 + k + l) as u8);
    let expected = arr.mapv(f64::from);
    test_round_trip_multiple_layouts(arr.view(), expected.view(), &"%5d".parse().unwrap());
}

#[test]
fn round_trip_scientific() {
    let arr = array![[1.5e-12, -3.25e8], [6.02214076e23, 0.]];
    test_round_trip_multiple_layouts(arr.view(), arr.view(), &"%.10e".parse().unwrap());
}

#[test]
fn round_trip_ranks_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("array.txt");

    let rank0 = arr0(3.5).into_dyn();
    let rank1 = Array1::linspace(-1., 1., 5).into_dyn();
    let rank2 = Array2::from_shape_fn((3, 2), |(i, j)| (i as f64) - 0.5 * (j as f64)).into_dyn();
    let rank3 = Array3::from_shape_fn((2, 1, 3), |(i, j, k)| (i + j + k) as f64 / 4.).into_dyn();
    let rank4 =
        Array4::from_shape_fn((1, 2, 2, 3), |(i, j, k, l)| (i * 1000 + j * 100 + k * 10 + l) as f64)
            .into_dyn();
    for arr in &[rank0, rank1, rank2, rank3, rank4] {
        write_txt(&path, arr).unwrap();
        let read: ArrayD<f64> = read_txt(&path).unwrap();
        assert_eq!(arr, &read);
    }
}
