//! Writing with non-default value formats.

use crate::{read_lines, written_lines};
use ndarray::prelude::*;
use ndarray_txt::{
    read_txt, write_txt_with_format, ParseFormatError, ReadTxtExt, ValueFormat, WriteTxtExt,
};

fn written_lines_with(arr: &ArrayD<f64>, format: &str) -> Vec<String> {
    let mut buf = Vec::<u8>::new();
    arr.write_txt_with_format(&mut buf, &format.parse().unwrap())
        .unwrap();
    String::from_utf8(buf)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn default_format() {
    let arr = array![0.1, -12345.678901234, 1e-7];
    assert_eq!(
        written_lines(&arr)[2..],
        ["0.100000", "-12345.678901", "0.000000"]
    );
}

#[test]
fn scientific() {
    let arr = array![1234.56, -0.000123].into_dyn();
    assert_eq!(
        written_lines_with(&arr, "%.3e")[2..],
        ["1.235e+03", "-1.230e-04"]
    );
}

#[test]
fn header_is_always_integer() {
    let arr = Array2::<f64>::ones((2, 3)).into_dyn();
    let lines = written_lines_with(&arr, "%10.2e");
    assert_eq!(lines[..3], ["2", "2", "3"]);
    assert_eq!(lines[3], "  1.00e+00");
}

#[test]
fn integer_format_truncates() {
    let arr = array![2.9, -2.9, 0.].into_dyn();
    assert_eq!(written_lines_with(&arr, "%d")[2..], ["2", "-2", "0"]);
}

#[test]
fn integer_elements_with_integer_format() {
    let arr = array![u64::MAX, 0, 7];
    let mut buf = Vec::<u8>::new();
    arr.write_txt_with_format(&mut buf, &ValueFormat::integer())
        .unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "1\n3\n18446744073709551615\n0\n7\n"
    );
}

#[test]
fn non_finite_round_trip() {
    let arr = array![f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.];
    let mut buf = Vec::<u8>::new();
    arr.write_txt(&mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf.clone()).unwrap(),
        "1\n4\nnan\ninf\n-inf\n1.000000\n"
    );
    let read = Array1::<f64>::read_txt(&buf[..]).unwrap();
    assert!(read[0].is_nan());
    assert_eq!(read.slice(s![1..]), array![f64::INFINITY, f64::NEG_INFINITY, 1.]);
}

#[test]
fn precision_limits_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pi.txt");
    let arr = array![std::f64::consts::PI, std::f64::consts::E];

    write_txt_with_format(&path, &arr, &ValueFormat::fixed(2)).unwrap();
    assert_eq!(read_lines(&path)[2..], ["3.14", "2.72"]);
    let read: Array1<f64> = read_txt(&path).unwrap();
    assert_eq!(read, array![3.14, 2.72]);

    write_txt_with_format(&path, &arr, &"%.17g".parse().unwrap()).unwrap();
    let read: Array1<f64> = read_txt(&path).unwrap();
    assert_eq!(read, arr);
}

#[test]
fn invalid_format_string() {
    assert_eq!(
        "%.6".parse::<ValueFormat>(),
        Err(ParseFormatError::Truncated)
    );
    assert_eq!(
        "%s".parse::<ValueFormat>(),
        Err(ParseFormatError::UnknownConversion('s'))
    );
}

#[test]
fn oversized_width_and_precision() {
    assert_eq!(
        "%99999999999999999999f".parse::<ValueFormat>(),
        Err(ParseFormatError::NumberOverflow)
    );
    assert_eq!(
        "%.4294967296e".parse::<ValueFormat>(),
        Err(ParseFormatError::NumberOverflow)
    );
    assert_eq!(
        ValueFormat::scientific(usize::MAX).to_string(),
        "%.2147483647e"
    );

    // Large but representable precisions still write the shortest `%g` form.
    let arr = array![0.5, 1e21].into_dyn();
    assert_eq!(written_lines_with(&arr, "%.400g")[2..], ["0.5", "1000000000000000000000"]);
}
