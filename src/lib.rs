//! This crate provides methods to read/write [`ndarray`]'s `ArrayBase` type
//! from/to a plain-text, column-major file format.
//!
//! [`ndarray`]: https://github.com/rust-ndarray/ndarray
//!
//! # Format
//!
//! Every value sits on its own line:
//!
//! ```text
//! R            rank of the array
//! d_1          length of axis 0
//! ...
//! d_R          length of axis R - 1
//! v_1          elements in column-major order, d_1 * ... * d_R of them
//! ...
//! ```
//!
//! Column-major order means the first index varies fastest, so the array
//! `[[1., 2., 3.], [4., 5., 6.]]` is written as
//!
//! ```text
//! 2
//! 2
//! 3
//! 1.000000
//! 4.000000
//! 2.000000
//! 5.000000
//! 3.000000
//! 6.000000
//! ```
//!
//! Values are written with a printf-style [`ValueFormat`], `%.6f` by default.
//! On reading, everything from a `#` to the end of its line is a comment, and
//! blank lines are ignored, which matches how `numpy.loadtxt` treats the same
//! file.
//!
//! The format doesn't record the element type. Integer arrays can be written,
//! but files are always read back as floating-point arrays.
//!
//! # Reading and writing
//!
//! See [`read_txt`] and [`write_txt`] for reading/writing files by path, and
//! [`ReadTxtExt`] and [`WriteTxtExt`] for readers/writers.
//!
//! # Logging
//!
//! The crate emits diagnostics through the [`log`](https://docs.rs/log)
//! facade at `debug` and `trace` levels; install a logger in the application
//! to see them.

mod txt;

pub use crate::txt::{
    ParseFormatError, ParseHeaderError, ReadTxtError, ReadTxtExt, ReadableElement, ValueFormat,
    WritableElement, WriteDataError, WriteTxtError, WriteTxtExt,
};

use log::debug;
use std::fs::File;
use std::path::Path;

/// Writes an array to a text file at the specified path, formatting each
/// element as `%.6f`.
///
/// The file is created if it doesn't exist and truncated if it does. The
/// parent directory must already exist.
///
/// This is a convenience function for using `File::create` followed by
/// [`WriteTxtExt::write_txt`].
///
/// # Example
///
/// ```no_run
/// use ndarray::array;
/// use ndarray_txt::write_txt;
/// # use ndarray_txt::WriteTxtError;
///
/// let arr = array![[1, 2, 3], [4, 5, 6]];
/// write_txt("array.txt", &arr)?;
/// # Ok::<_, WriteTxtError>(())
/// ```
pub fn write_txt<P, T>(path: P, array: &T) -> Result<(), WriteTxtError>
where
    P: AsRef<Path>,
    T: WriteTxtExt + ?Sized,
{
    write_txt_with_format(path, array, &ValueFormat::default())
}

/// Writes an array to a text file at the specified path, formatting each
/// element with `format`.
///
/// This is a convenience function for using `File::create` followed by
/// [`WriteTxtExt::write_txt_with_format`].
///
/// # Example
///
/// ```no_run
/// use ndarray::array;
/// use ndarray_txt::{write_txt_with_format, ValueFormat};
///
/// let arr = array![[1.5, 2.25], [-3., 4e10]];
/// write_txt_with_format("array.txt", &arr, &"%.4e".parse::<ValueFormat>()?)?;
/// write_txt_with_format("rounded.txt", &arr, &ValueFormat::fixed(1))?;
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn write_txt_with_format<P, T>(
    path: P,
    array: &T,
    format: &ValueFormat,
) -> Result<(), WriteTxtError>
where
    P: AsRef<Path>,
    T: WriteTxtExt + ?Sized,
{
    let path = path.as_ref();
    debug!("writing array to {}", path.display());
    array.write_txt_with_format(std::io::BufWriter::new(File::create(path)?), format)
}

/// Reads an array from a text file at the specified path.
///
/// This is a convenience function for using `File::open` followed by
/// [`ReadTxtExt::read_txt`].
///
/// # Example
///
/// ```no_run
/// use ndarray::{Array2, ArrayD};
/// use ndarray_txt::read_txt;
/// # use ndarray_txt::ReadTxtError;
///
/// let arr: Array2<f64> = read_txt("array.txt")?;
/// let any_rank: ArrayD<f64> = read_txt("array.txt")?;
/// # println!("arr = {}, any_rank = {}", arr, any_rank);
/// # Ok::<_, ReadTxtError>(())
/// ```
pub fn read_txt<P, T>(path: P) -> Result<T, ReadTxtError>
where
    P: AsRef<Path>,
    T: ReadTxtExt,
{
    let path = path.as_ref();
    debug!("reading array from {}", path.display());
    T::read_txt(File::open(path)?)
}
