mod elements;
mod format;
mod header;
mod lines;

pub use self::format::{ParseFormatError, ValueFormat};
pub use self::header::ParseHeaderError;

use self::header::{Header, ReadHeaderError};
use self::lines::ContentLines;
use log::{debug, trace};
use ndarray::prelude::*;
use ndarray::{Data, DataOwned, IntoDimension, ShapeError};
use std::error::Error;
use std::fmt;
use std::io::{self, BufReader};

/// Upper bound on the capacity reserved up front for the values, since the
/// header hasn't been checked against the length of the input yet.
const MAX_INITIAL_CAPACITY: usize = 1 << 16;

/// An error writing array data.
#[derive(Debug)]
pub enum WriteDataError {
    /// An error caused by I/O.
    Io(io::Error),
}

impl Error for WriteDataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WriteDataError::Io(err) => Some(err),
        }
    }
}

impl fmt::Display for WriteDataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WriteDataError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl From<io::Error> for WriteDataError {
    fn from(err: io::Error) -> WriteDataError {
        WriteDataError::Io(err)
    }
}

/// An array element type that can be written to a text file.
pub trait WritableElement: Sized {
    /// Writes a single instance of `Self` as one line, formatted with
    /// `format`, including the terminating newline.
    fn write<W: io::Write>(&self, writer: W, format: &ValueFormat) -> Result<(), WriteDataError>;

    /// Writes a slice of `Self`, one value per line.
    fn write_slice<W: io::Write>(
        slice: &[Self],
        mut writer: W,
        format: &ValueFormat,
    ) -> Result<(), WriteDataError> {
        for elem in slice {
            elem.write(&mut writer, format)?;
        }
        Ok(())
    }
}

/// An error writing a text file.
#[derive(Debug)]
pub enum WriteTxtError {
    /// An error caused by I/O.
    Io(io::Error),
}

impl Error for WriteTxtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WriteTxtError::Io(err) => Some(err),
        }
    }
}

impl fmt::Display for WriteTxtError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WriteTxtError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl From<io::Error> for WriteTxtError {
    fn from(err: io::Error) -> WriteTxtError {
        WriteTxtError::Io(err)
    }
}

impl From<WriteDataError> for WriteTxtError {
    fn from(err: WriteDataError) -> WriteTxtError {
        match err {
            WriteDataError::Io(err) => WriteTxtError::Io(err),
        }
    }
}

/// Extension trait for writing `ArrayBase` to text files.
///
/// The file starts with the rank of the array on its own line, followed by
/// one line per axis length, followed by the elements in column-major
/// (Fortran) order, one per line. The layout of the array in memory doesn't
/// affect the output.
///
/// # Example
///
/// ```no_run
/// use ndarray::{array, Array2};
/// use ndarray_txt::{ValueFormat, WriteTxtExt};
/// use std::fs::File;
/// use std::io::BufWriter;
///
/// let arr: Array2<f64> = array![[1., 2., 3.], [4., 5., 6.]];
/// let writer = BufWriter::new(File::create("array.txt")?);
/// arr.write_txt(writer)?;
///
/// let writer = BufWriter::new(File::create("array_sci.txt")?);
/// arr.write_txt_with_format(writer, &"%.3e".parse::<ValueFormat>()?)?;
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub trait WriteTxtExt {
    /// Writes the array to `writer`, formatting each element as `%.6f`.
    ///
    /// This is a convenience function for calling
    /// [`WriteTxtExt::write_txt_with_format`] with the default
    /// [`ValueFormat`].
    fn write_txt<W: io::Write>(&self, writer: W) -> Result<(), WriteTxtError> {
        self.write_txt_with_format(writer, &ValueFormat::default())
    }

    /// Writes the array to `writer`, formatting each element with `format`.
    ///
    /// The writer is flushed before returning.
    fn write_txt_with_format<W: io::Write>(
        &self,
        writer: W,
        format: &ValueFormat,
    ) -> Result<(), WriteTxtError>;
}

impl<A, S, D> WriteTxtExt for ArrayBase<S, D>
where
    A: WritableElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn write_txt_with_format<W: io::Write>(
        &self,
        mut writer: W,
        format: &ValueFormat,
    ) -> Result<(), WriteTxtError> {
        let header = Header {
            shape: self.shape().to_owned(),
        };
        debug!("writing array with {} using value format `{}`", header, format);
        header.write(&mut writer)?;
        trace!("wrote header");

        // Iterating over the reversed axes in logical order visits the
        // elements with the first index varying fastest.
        let reversed = self.t();
        if let Some(slice) = reversed.as_slice() {
            A::write_slice(slice, &mut writer, format)?;
        } else {
            for elem in reversed.iter() {
                elem.write(&mut writer, format)?;
            }
        }
        trace!("wrote {} values", self.len());

        writer.flush()?;
        Ok(())
    }
}

/// An array element type that can be read from a text file.
pub trait ReadableElement: Sized {
    /// Parses a single value, already stripped of surrounding whitespace.
    fn parse_value(text: &str) -> Result<Self, Box<dyn Error + Send + Sync + 'static>>;
}

/// Reads exactly `len` values, one per line, and checks that nothing but
/// blank lines and comments follows them.
fn read_values<A, R>(lines: &mut ContentLines<R>, len: usize) -> Result<Vec<A>, ReadTxtError>
where
    A: ReadableElement,
    R: io::BufRead,
{
    let mut out = Vec::with_capacity(len.min(MAX_INITIAL_CAPACITY));
    while out.len() < len {
        let (line, text) = match lines.next_content()? {
            Some(content) => content,
            None => return Err(ReadTxtError::MissingValues(len - out.len())),
        };
        if text.split_whitespace().nth(1).is_some() {
            return Err(ReadTxtError::MultipleValues { line });
        }
        let value =
            A::parse_value(text).map_err(|source| ReadTxtError::ParseValue { line, source })?;
        out.push(value);
    }

    let mut num_extra = 0;
    while lines.next_content()?.is_some() {
        num_extra += 1;
    }
    if num_extra == 0 {
        Ok(out)
    } else {
        Err(ReadTxtError::ExtraValues(num_extra))
    }
}

/// An error reading a text file.
#[derive(Debug)]
pub enum ReadTxtError {
    /// An error caused by I/O.
    Io(io::Error),
    /// An error parsing the rank and shape lines.
    ParseHeader(ParseHeaderError),
    /// A value couldn't be parsed as the element type.
    ParseValue {
        line: usize,
        source: Box<dyn Error + Send + Sync + 'static>,
    },
    /// A line of the data section holds more than one value.
    MultipleValues { line: usize },
    /// The file ended before the number of values given by the shape.
    MissingValues(usize),
    /// The file has more values than given by the shape.
    ExtraValues(usize),
    /// The rank of the file doesn't match the dimensionality of the array
    /// type being read.
    Shape(ShapeError),
}

impl Error for ReadTxtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadTxtError::Io(err) => Some(err),
            ReadTxtError::ParseHeader(err) => Some(err),
            ReadTxtError::ParseValue { source, .. } => Some(&**source),
            ReadTxtError::MultipleValues { .. } => None,
            ReadTxtError::MissingValues(_) => None,
            ReadTxtError::ExtraValues(_) => None,
            ReadTxtError::Shape(err) => Some(err),
        }
    }
}

impl fmt::Display for ReadTxtError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadTxtError::Io(err) => write!(f, "I/O error: {}", err),
            ReadTxtError::ParseHeader(err) => write!(f, "error parsing header: {}", err),
            ReadTxtError::ParseValue { line, source } => {
                write!(f, "error parsing value on line {}: {}", line, source)
            }
            ReadTxtError::MultipleValues { line } => {
                write!(f, "more than one value on line {}", line)
            }
            ReadTxtError::MissingValues(num) => write!(f, "missing {} values", num),
            ReadTxtError::ExtraValues(num) => write!(f, "file had {} extra values", num),
            ReadTxtError::Shape(err) => write!(f, "data did not match shape in header: {}", err),
        }
    }
}

impl From<io::Error> for ReadTxtError {
    fn from(err: io::Error) -> ReadTxtError {
        ReadTxtError::Io(err)
    }
}

impl From<ReadHeaderError> for ReadTxtError {
    fn from(err: ReadHeaderError) -> ReadTxtError {
        match err {
            ReadHeaderError::Io(err) => ReadTxtError::Io(err),
            ReadHeaderError::Parse(err) => ReadTxtError::ParseHeader(err),
        }
    }
}

impl From<ParseHeaderError> for ReadTxtError {
    fn from(err: ParseHeaderError) -> ReadTxtError {
        ReadTxtError::ParseHeader(err)
    }
}

impl From<ShapeError> for ReadTxtError {
    fn from(err: ShapeError) -> ReadTxtError {
        ReadTxtError::Shape(err)
    }
}

/// Extension trait for reading `Array` from text files.
///
/// The format has no type tag, so only floating-point element types can be
/// read, whatever element type the file was written from.
///
/// Blank lines are ignored, and everything from a `#` to the end of its line
/// is a comment.
///
/// # Example
///
/// ```no_run
/// use ndarray::{Array2, ArrayD};
/// use ndarray_txt::ReadTxtExt;
/// use std::fs::File;
///
/// let reader = File::open("array.txt")?;
/// let arr = Array2::<f64>::read_txt(reader)?;
/// # println!("arr = {}", arr);
///
/// // When the rank isn't known in advance:
/// let arr = ArrayD::<f64>::read_txt(File::open("array.txt")?)?;
/// # println!("arr = {}", arr);
/// # Ok::<_, ndarray_txt::ReadTxtError>(())
/// ```
pub trait ReadTxtExt: Sized {
    /// Reads the array from `reader`.
    ///
    /// The reader is buffered internally.
    fn read_txt<R: io::Read>(reader: R) -> Result<Self, ReadTxtError>;
}

impl<A, S, D> ReadTxtExt for ArrayBase<S, D>
where
    A: ReadableElement,
    S: DataOwned<Elem = A>,
    D: Dimension,
{
    fn read_txt<R: io::Read>(reader: R) -> Result<Self, ReadTxtError> {
        let mut lines = ContentLines::new(BufReader::new(reader));
        let header = Header::from_lines(&mut lines)?;
        debug!("read header with {}", header);
        let len = header.num_values().ok_or(ParseHeaderError::LengthOverflow)?;
        let data = read_values(&mut lines, len)?;
        trace!("read {} values", data.len());
        let shape = header.shape.into_dimension().f();
        Ok(ArrayBase::from_shape_vec(shape, data)?.into_dimensionality()?)
    }
}
