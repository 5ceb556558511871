//! Coercion targets: the field types the binder can assign.
//!
//! Each supported type declares its [`FieldKind`], which picks the typed
//! getter used on the source, and accepts the resulting [`FieldValue`].
//! `Vec`s of anything other than `String` have no coercion path; they carry
//! the `Unsupported` kind so a tagged field of that type is reported and
//! skipped rather than rejected at compile time.

use std::path::PathBuf;

use crate::types::{FieldKind, FieldValue};

/// A struct field the binder knows how to fill.
pub trait Field {
    const KIND: FieldKind;

    /// Replace the field's value. Returns a short description of the expected
    /// shape when the value does not fit (e.g. an out-of-range integer).
    fn assign(&mut self, value: FieldValue) -> Result<(), String>;
}

fn mismatch(expected: FieldKind, got: &FieldValue) -> String {
    format!("{expected:?} value, got {got:?}")
}

impl Field for String {
    const KIND: FieldKind = FieldKind::String;

    fn assign(&mut self, value: FieldValue) -> Result<(), String> {
        match value {
            FieldValue::String(s) => {
                *self = s;
                Ok(())
            }
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl Field for PathBuf {
    const KIND: FieldKind = FieldKind::String;

    fn assign(&mut self, value: FieldValue) -> Result<(), String> {
        match value {
            FieldValue::String(s) => {
                *self = PathBuf::from(s);
                Ok(())
            }
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

macro_rules! int_field {
    ($($ty:ty),*) => {
        $(
            impl Field for $ty {
                const KIND: FieldKind = FieldKind::Int;

                fn assign(&mut self, value: FieldValue) -> Result<(), String> {
                    match value {
                        FieldValue::Int(i) => {
                            *self = <$ty>::try_from(i).map_err(|_| {
                                format!("an integer in range for {}", stringify!($ty))
                            })?;
                            Ok(())
                        }
                        other => Err(mismatch(Self::KIND, &other)),
                    }
                }
            }
        )*
    };
}

int_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Field for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn assign(&mut self, value: FieldValue) -> Result<(), String> {
        match value {
            FieldValue::Float(f) => {
                *self = f;
                Ok(())
            }
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl Field for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn assign(&mut self, value: FieldValue) -> Result<(), String> {
        match value {
            FieldValue::Float(f) => {
                let narrowed = f as f32;
                if f.is_finite() && !narrowed.is_finite() {
                    return Err("a float in range for f32".into());
                }
                *self = narrowed;
                Ok(())
            }
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl Field for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn assign(&mut self, value: FieldValue) -> Result<(), String> {
        match value {
            FieldValue::Bool(b) => {
                *self = b;
                Ok(())
            }
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl Field for Vec<String> {
    const KIND: FieldKind = FieldKind::StringList;

    fn assign(&mut self, value: FieldValue) -> Result<(), String> {
        match value {
            FieldValue::StringList(items) => {
                *self = items;
                Ok(())
            }
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl<T: Field + Default> Field for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn assign(&mut self, value: FieldValue) -> Result<(), String> {
        match self {
            Some(inner) => inner.assign(value),
            None => {
                let mut inner = T::default();
                inner.assign(value)?;
                *self = Some(inner);
                Ok(())
            }
        }
    }
}

macro_rules! unsupported_list {
    ($($ty:ty),*) => {
        $(
            impl Field for Vec<$ty> {
                const KIND: FieldKind = FieldKind::Unsupported(concat!("Vec<", stringify!($ty), ">"));

                fn assign(&mut self, value: FieldValue) -> Result<(), String> {
                    Err(mismatch(Self::KIND, &value))
                }
            }
        )*
    };
}

unsupported_list!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, PathBuf);
