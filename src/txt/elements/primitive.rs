//! Trait implementations for primitive element types.

use super::{write_float, write_integer};
use crate::{ReadableElement, ValueFormat, WritableElement, WriteDataError};
use std::error::Error;
use std::io;

macro_rules! impl_writable_integer {
    ($($elem:ty),*) => {
        $(
            impl WritableElement for $elem {
                fn write<W: io::Write>(
                    &self,
                    writer: W,
                    format: &ValueFormat,
                ) -> Result<(), WriteDataError> {
                    write_integer(writer, i128::from(*self), format)
                }
            }
        )*
    };
}

macro_rules! impl_primitive_float {
    ($($elem:ty),*) => {
        $(
            impl WritableElement for $elem {
                fn write<W: io::Write>(
                    &self,
                    writer: W,
                    format: &ValueFormat,
                ) -> Result<(), WriteDataError> {
                    write_float(writer, f64::from(*self), format)
                }
            }

            impl ReadableElement for $elem {
                fn parse_value(text: &str) -> Result<Self, Box<dyn Error + Send + Sync + 'static>> {
                    Ok(text.parse::<$elem>()?)
                }
            }
        )*
    };
}

impl_writable_integer!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_primitive_float!(f32, f64);
