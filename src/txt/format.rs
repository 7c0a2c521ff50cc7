//! printf-style formatting of individual values.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Precision used when a format string doesn't give one, as in C.
const DEFAULT_PRECISION: usize = 6;

/// Largest width or precision accepted, the limit C's printf has too.
const MAX_NUMBER: usize = i32::MAX as usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Conversion {
    /// `%f` / `%F`
    Fixed { upper: bool },
    /// `%e` / `%E`
    Exponent { upper: bool },
    /// `%g` / `%G`
    General { upper: bool },
    /// `%d` / `%i`
    Integer,
}

impl Conversion {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'f' => Some(Conversion::Fixed { upper: false }),
            'F' => Some(Conversion::Fixed { upper: true }),
            'e' => Some(Conversion::Exponent { upper: false }),
            'E' => Some(Conversion::Exponent { upper: true }),
            'g' => Some(Conversion::General { upper: false }),
            'G' => Some(Conversion::General { upper: true }),
            'd' | 'i' => Some(Conversion::Integer),
            _ => None,
        }
    }

    fn as_char(&self) -> char {
        match *self {
            Conversion::Fixed { upper: false } => 'f',
            Conversion::Fixed { upper: true } => 'F',
            Conversion::Exponent { upper: false } => 'e',
            Conversion::Exponent { upper: true } => 'E',
            Conversion::General { upper: false } => 'g',
            Conversion::General { upper: true } => 'G',
            Conversion::Integer => 'd',
        }
    }

    fn is_upper(&self) -> bool {
        match *self {
            Conversion::Fixed { upper }
            | Conversion::Exponent { upper }
            | Conversion::General { upper } => upper,
            Conversion::Integer => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Flags {
    /// `-`
    left_align: bool,
    /// `+`
    plus_sign: bool,
    /// ` `
    space_sign: bool,
    /// `0`
    zero_pad: bool,
}

/// An error parsing a [`ValueFormat`] from a printf-style string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseFormatError {
    /// The string contains no conversion specification.
    MissingConversion,
    /// The string contains more than one conversion specification.
    MultipleConversions,
    /// The conversion character isn't one of `f F e E g G d i`.
    UnknownConversion(char),
    /// The string ends in the middle of a conversion specification.
    Truncated,
    /// A width or precision is larger than `i32::MAX`.
    NumberOverflow,
}

impl Error for ParseFormatError {}

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ParseFormatError::*;
        match self {
            MissingConversion => write!(f, "format string has no conversion specification"),
            MultipleConversions => {
                write!(f, "format string has more than one conversion specification")
            }
            UnknownConversion(c) => write!(f, "unsupported conversion character: {:?}", c),
            Truncated => write!(f, "format string ends inside a conversion specification"),
            NumberOverflow => write!(f, "width or precision is too large"),
        }
    }
}

/// The format used to write each value of an array, as a printf-style
/// conversion such as `%.6f`.
///
/// A format consists of a single conversion specification
/// `%[flags][width][.precision]conversion`, optionally surrounded by literal
/// text (`%%` writes a literal `%`). The supported flags are `-`, `+`, ` `
/// and `0`, and the supported conversions are:
///
/// * `f`, `F`: fixed-point notation
/// * `e`, `E`: scientific notation with a signed, at least two-digit exponent
/// * `g`, `G`: the shorter of the two above, with trailing zeros removed
/// * `d`, `i`: integer, truncating floating-point values toward zero
///
/// Length modifiers (`l`, `h`, `L`) are accepted and ignored, so C-style
/// strings like `%lf` work.
///
/// The default is `%.6f`.
///
/// # Example
///
/// ```
/// use ndarray_txt::ValueFormat;
///
/// let format: ValueFormat = "%.3e".parse()?;
/// assert_eq!(format.format_float(1234.56), "1.235e+03");
/// assert_eq!(ValueFormat::default().format_float(0.5), "0.500000");
/// # Ok::<_, ndarray_txt::ParseFormatError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueFormat {
    prefix: String,
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: Conversion,
    suffix: String,
}

impl Default for ValueFormat {
    fn default() -> ValueFormat {
        ValueFormat::fixed(DEFAULT_PRECISION)
    }
}

impl ValueFormat {
    fn with_conversion(conversion: Conversion, precision: Option<usize>) -> ValueFormat {
        ValueFormat {
            prefix: String::new(),
            flags: Flags::default(),
            width: None,
            precision,
            conversion,
            suffix: String::new(),
        }
    }

    /// Fixed-point notation with `precision` fractional digits (`%.<precision>f`).
    ///
    /// The precision is capped at `i32::MAX`.
    pub fn fixed(precision: usize) -> ValueFormat {
        ValueFormat::with_conversion(
            Conversion::Fixed { upper: false },
            Some(precision.min(MAX_NUMBER)),
        )
    }

    /// Scientific notation with `precision` fractional digits (`%.<precision>e`).
    ///
    /// The precision is capped at `i32::MAX`.
    pub fn scientific(precision: usize) -> ValueFormat {
        ValueFormat::with_conversion(
            Conversion::Exponent { upper: false },
            Some(precision.min(MAX_NUMBER)),
        )
    }

    /// Integer notation (`%d`).
    pub fn integer() -> ValueFormat {
        ValueFormat::with_conversion(Conversion::Integer, None)
    }

    fn precision(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }

    fn non_finite(&self, name: &str) -> String {
        if self.conversion.is_upper() {
            name.to_ascii_uppercase()
        } else {
            name.to_owned()
        }
    }

    /// Pads the digits of an integer to the minimum number given by the
    /// precision.
    fn integer_digits(&self, digits: String) -> String {
        match self.precision {
            Some(min) if digits.len() < min => {
                let mut out = "0".repeat(min - digits.len());
                out.push_str(&digits);
                out
            }
            _ => digits,
        }
    }

    /// Formats a floating-point value.
    pub fn format_float(&self, value: f64) -> String {
        if value.is_nan() {
            return self.finish(false, self.non_finite("nan"), false);
        }
        if value.is_infinite() {
            return self.finish(value < 0., self.non_finite("inf"), false);
        }
        match self.conversion {
            Conversion::Integer => {
                let truncated = value.trunc();
                let digits = self.integer_digits(format!("{:.0}", truncated.abs()));
                self.finish(truncated < 0., digits, self.precision.is_none())
            }
            Conversion::Fixed { .. } => {
                let body = format!("{:.*}", self.precision(), value.abs());
                self.finish(value.is_sign_negative(), body, true)
            }
            Conversion::Exponent { upper } => {
                let body = exponential(value.abs(), self.precision(), upper);
                self.finish(value.is_sign_negative(), body, true)
            }
            Conversion::General { upper } => {
                let body = general(value.abs(), self.precision(), upper);
                self.finish(value.is_sign_negative(), body, true)
            }
        }
    }

    /// Formats an integer value.
    ///
    /// With a floating-point conversion, the value is converted to `f64`
    /// first.
    pub fn format_integer(&self, value: i128) -> String {
        match self.conversion {
            Conversion::Integer => {
                let digits = self.integer_digits(value.unsigned_abs().to_string());
                self.finish(value < 0, digits, self.precision.is_none())
            }
            _ => self.format_float(value as f64),
        }
    }

    /// Adds the sign, the padding and the surrounding literal text.
    fn finish(&self, negative: bool, body: String, zero_pad_allowed: bool) -> String {
        let sign = if negative {
            "-"
        } else if self.flags.plus_sign {
            "+"
        } else if self.flags.space_sign {
            " "
        } else {
            ""
        };
        let len = sign.len() + body.len();
        let mut out = String::new();
        out.push_str(&self.prefix);
        match self.width {
            Some(width) if width > len => {
                let fill = width - len;
                if self.flags.left_align {
                    out.push_str(sign);
                    out.push_str(&body);
                    out.extend(std::iter::repeat(' ').take(fill));
                } else if self.flags.zero_pad && zero_pad_allowed {
                    out.push_str(sign);
                    out.extend(std::iter::repeat('0').take(fill));
                    out.push_str(&body);
                } else {
                    out.extend(std::iter::repeat(' ').take(fill));
                    out.push_str(sign);
                    out.push_str(&body);
                }
            }
            _ => {
                out.push_str(sign);
                out.push_str(&body);
            }
        }
        out.push_str(&self.suffix);
        out
    }
}

/// Splits the output of Rust's `{:e}` formatting into mantissa and exponent.
fn split_exponent(formatted: &str) -> (&str, i32) {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (formatted, 0),
    }
}

/// Formats a non-negative value in scientific notation the way C does
/// (`1.500000e+03` rather than Rust's `1.500000e3`).
fn exponential(value: f64, precision: usize, upper: bool) -> String {
    let formatted = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = split_exponent(&formatted);
    format!(
        "{}{}{}{:02}",
        mantissa,
        if upper { 'E' } else { 'e' },
        if exponent < 0 { '-' } else { '+' },
        exponent.abs(),
    )
}

fn strip_trailing_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Formats a non-negative value following the rules of C's `%g`.
fn general(value: f64, precision: usize, upper: bool) -> String {
    let precision = precision.clamp(1, MAX_NUMBER);
    // The exponent after rounding to `precision` significant digits decides
    // the notation.
    let exponent = if value == 0. {
        0
    } else {
        split_exponent(&format!("{:.*e}", precision - 1, value)).1
    };
    if exponent < -4 || i64::from(exponent) >= precision as i64 {
        let formatted = exponential(value, precision - 1, upper);
        match formatted.find(|c: char| c == 'e' || c == 'E') {
            Some(split) => format!(
                "{}{}",
                strip_trailing_zeros(&formatted[..split]),
                &formatted[split..]
            ),
            None => formatted,
        }
    } else {
        let decimals = (precision as i64 - 1 - i64::from(exponent)) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_owned()
    }
}

/// Consumes a run of decimal digits, if any, no larger than `MAX_NUMBER`.
fn take_number<I>(chars: &mut std::iter::Peekable<I>) -> Result<Option<usize>, ParseFormatError>
where
    I: Iterator<Item = char>,
{
    let mut number: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        number = Some(
            number
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit as usize))
                .filter(|&n| n <= MAX_NUMBER)
                .ok_or(ParseFormatError::NumberOverflow)?,
        );
    }
    Ok(number)
}

impl FromStr for ValueFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<ValueFormat, ParseFormatError> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut spec: Option<(Flags, Option<usize>, Option<usize>, Conversion)> = None;

        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            let literal = if spec.is_some() {
                &mut suffix
            } else {
                &mut prefix
            };
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }
            if spec.is_some() {
                return Err(ParseFormatError::MultipleConversions);
            }

            let mut flags = Flags::default();
            while let Some(&c) = chars.peek() {
                match c {
                    '-' => flags.left_align = true,
                    '+' => flags.plus_sign = true,
                    ' ' => flags.space_sign = true,
                    '0' => flags.zero_pad = true,
                    _ => break,
                }
                chars.next();
            }
            let width = take_number(&mut chars)?;
            let precision = if chars.peek() == Some(&'.') {
                chars.next();
                // A lone `.` means a precision of zero.
                Some(take_number(&mut chars)?.unwrap_or(0))
            } else {
                None
            };
            while let Some(&('l' | 'h' | 'L')) = chars.peek() {
                chars.next();
            }
            let conversion = match chars.next() {
                Some(c) => Conversion::from_char(c).ok_or(ParseFormatError::UnknownConversion(c))?,
                None => return Err(ParseFormatError::Truncated),
            };
            spec = Some((flags, width, precision, conversion));
        }

        match spec {
            Some((flags, width, precision, conversion)) => Ok(ValueFormat {
                prefix,
                flags,
                width,
                precision,
                conversion,
                suffix,
            }),
            None => Err(ParseFormatError::MissingConversion),
        }
    }
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}%", self.prefix.replace('%', "%%"))?;
        if self.flags.left_align {
            write!(f, "-")?;
        }
        if self.flags.plus_sign {
            write!(f, "+")?;
        }
        if self.flags.space_sign {
            write!(f, " ")?;
        }
        if self.flags.zero_pad {
            write!(f, "0")?;
        }
        if let Some(width) = self.width {
            write!(f, "{}", width)?;
        }
        if let Some(precision) = self.precision {
            write!(f, ".{}", precision)?;
        }
        write!(f, "{}{}", self.conversion.as_char(), self.suffix.replace('%', "%%"))
    }
}
