use super::lines::ContentLines;
use num_traits::ToPrimitive;
use std::error::Error;
use std::fmt;
use std::io;

/// An error parsing the rank and extent lines at the start of a text file.
#[derive(Debug)]
pub enum ParseHeaderError {
    /// The input ended before the rank line.
    MissingRank,
    /// The input ended before the extent of `axis`.
    MissingExtent { axis: usize },
    /// The rank line isn't a non-negative integer.
    IllegalRank { line: usize, value: String },
    /// The extent line of `axis` isn't a non-negative integer.
    IllegalExtent {
        axis: usize,
        line: usize,
        value: String,
    },
    /// The product of the extents overflows `usize`.
    LengthOverflow,
}

impl Error for ParseHeaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for ParseHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ParseHeaderError::*;
        match self {
            MissingRank => write!(f, "missing rank line"),
            MissingExtent { axis } => write!(f, "missing extent of axis {}", axis),
            IllegalRank { line, value } => {
                write!(f, "illegal rank on line {}: {:?}", line, value)
            }
            IllegalExtent { axis, line, value } => write!(
                f,
                "illegal extent of axis {} on line {}: {:?}",
                axis, line, value
            ),
            LengthOverflow => write!(f, "number of elements overflows usize"),
        }
    }
}

/// An error reading the header, either from the underlying reader or from
/// the contents of its lines.
#[derive(Debug)]
pub(crate) enum ReadHeaderError {
    Io(io::Error),
    Parse(ParseHeaderError),
}

impl From<io::Error> for ReadHeaderError {
    fn from(err: io::Error) -> ReadHeaderError {
        ReadHeaderError::Io(err)
    }
}

impl From<ParseHeaderError> for ReadHeaderError {
    fn from(err: ParseHeaderError) -> ReadHeaderError {
        ReadHeaderError::Parse(err)
    }
}

/// Parses a header line as a non-negative integer.
///
/// Integral floats (`3.0`, `3.000000`) are accepted too, since the whole file
/// is commonly read back as floats by other tools.
fn parse_header_integer(text: &str) -> Option<usize> {
    if let Ok(int) = text.parse::<usize>() {
        return Some(int);
    }
    let float: f64 = text.parse().ok()?;
    if float.fract() == 0. {
        float.to_usize()
    } else {
        None
    }
}

/// The rank and shape lines at the start of a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub shape: Vec<usize>,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rank {}, shape {:?}", self.rank(), self.shape)
    }
}

impl Header {
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of values following the header.
    pub fn num_values(&self) -> Option<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
    }

    pub(crate) fn from_lines<R: io::BufRead>(
        lines: &mut ContentLines<R>,
    ) -> Result<Self, ReadHeaderError> {
        let rank = match lines.next_content()? {
            Some((line, text)) => {
                parse_header_integer(text).ok_or_else(|| ParseHeaderError::IllegalRank {
                    line,
                    value: text.to_owned(),
                })?
            }
            None => return Err(ParseHeaderError::MissingRank.into()),
        };

        // Not preallocated, since `rank` hasn't been checked against the input yet.
        let mut shape = Vec::new();
        for axis in 0..rank {
            let extent = match lines.next_content()? {
                Some((line, text)) => {
                    parse_header_integer(text).ok_or_else(|| ParseHeaderError::IllegalExtent {
                        axis,
                        line,
                        value: text.to_owned(),
                    })?
                }
                None => return Err(ParseHeaderError::MissingExtent { axis }.into()),
            };
            shape.push(extent);
        }

        let header = Header { shape };
        if header.num_values().is_none() {
            return Err(ParseHeaderError::LengthOverflow.into());
        }
        Ok(header)
    }

    /// Writes the rank line followed by one line per extent.
    pub fn write<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", self.rank())?;
        for extent in &self.shape {
            writeln!(writer, "{}", extent)?;
        }
        Ok(())
    }
}
