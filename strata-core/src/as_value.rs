use crate::{CoercionError, SqlType, Value};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::well_known::Rfc3339,
    macros::format_description,
};
use uuid::Uuid;

/// Conversion between native field types and the dynamically typed [`Value`].
///
/// Every field type a derived entity maps to a column implements this trait.
/// Conversions are checked in both directions:
/// - `as_value` fails when the native value cannot be stored (for example an
///   `u64` above `i64::MAX`).
/// - `try_from_value` accepts the canonical storage kind of the type, performs
///   range checks on integers and parses text for temporal types and uuids.
///   `Value::Null` is only accepted by `Option<T>`.
///
/// ```rust
/// use strata_core::{AsValue, Value};
/// assert_eq!(42i32.as_value(), Ok(Value::Integer(42)));
/// let n: u8 = AsValue::try_from_value(Value::Integer(7)).unwrap();
/// assert_eq!(n, 7);
/// assert!(u8::try_from_value(Value::Integer(300)).is_err());
/// ```
pub trait AsValue: Sized {
    fn as_value(self) -> Result<Value, CoercionError>;
    fn try_from_value(value: Value) -> Result<Self, CoercionError>;
}

fn mismatch<T>(value: &Value, to: &'static str) -> Result<T, CoercionError> {
    Err(CoercionError::new(value.sql_type().as_str(), to))
}

macro_rules! impl_as_value_integer {
    ($($source:ty),+ $(,)?) => {
        $(
            impl AsValue for $source {
                fn as_value(self) -> Result<Value, CoercionError> {
                    i64::try_from(self)
                        .map(Value::Integer)
                        .map_err(|_| CoercionError::new(stringify!($source), SqlType::Integer.as_str()))
                }
                fn try_from_value(value: Value) -> Result<Self, CoercionError> {
                    match value {
                        Value::Integer(v) => <$source>::try_from(v)
                            .map_err(|_| CoercionError::new(SqlType::Integer.as_str(), stringify!($source))),
                        _ => mismatch(&value, stringify!($source)),
                    }
                }
            }
        )+
    };
}
impl_as_value_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl AsValue for bool {
    fn as_value(self) -> Result<Value, CoercionError> {
        Ok(Value::Integer(self as i64))
    }
    fn try_from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Integer(v) => Ok(v != 0),
            _ => mismatch(&value, "bool"),
        }
    }
}

macro_rules! impl_as_value_float {
    ($($source:ty),+ $(,)?) => {
        $(
            impl AsValue for $source {
                fn as_value(self) -> Result<Value, CoercionError> {
                    Ok(Value::Real(self as f64))
                }
                fn try_from_value(value: Value) -> Result<Self, CoercionError> {
                    match value {
                        Value::Real(v) => Ok(v as _),
                        Value::Integer(v) => Ok(v as _),
                        _ => mismatch(&value, stringify!($source)),
                    }
                }
            }
        )+
    };
}
impl_as_value_float!(f32, f64);

impl AsValue for char {
    fn as_value(self) -> Result<Value, CoercionError> {
        Ok(Value::Text(self.to_string()))
    }
    fn try_from_value(value: Value) -> Result<Self, CoercionError> {
        if let Value::Text(ref v) = value {
            let mut chars = v.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return Ok(c);
            }
        }
        mismatch(&value, "char")
    }
}

impl AsValue for String {
    fn as_value(self) -> Result<Value, CoercionError> {
        Ok(Value::Text(self))
    }
    fn try_from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Text(v) => Ok(v),
            _ => mismatch(&value, "String"),
        }
    }
}

impl AsValue for Vec<u8> {
    fn as_value(self) -> Result<Value, CoercionError> {
        Ok(Value::Blob(self))
    }
    fn try_from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Blob(v) => Ok(v),
            _ => mismatch(&value, "Vec<u8>"),
        }
    }
}

impl AsValue for Box<[u8]> {
    fn as_value(self) -> Result<Value, CoercionError> {
        Ok(Value::Blob(self.into_vec()))
    }
    fn try_from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Blob(v) => Ok(v.into_boxed_slice()),
            _ => mismatch(&value, "Box<[u8]>"),
        }
    }
}

/// Formats then tries each parser in order, the first one that succeeds wins.
macro_rules! impl_as_value_temporal {
    ($source:ty, $format:expr, $($parse:expr),+ $(,)?) => {
        impl AsValue for $source {
            fn as_value(self) -> Result<Value, CoercionError> {
                self.format($format)
                    .map(Value::Text)
                    .map_err(|_| CoercionError::new(stringify!($source), SqlType::Text.as_str()))
            }
            fn try_from_value(value: Value) -> Result<Self, CoercionError> {
                if let Value::Text(ref v) = value {
                    $(
                        if let Ok(result) = <$source>::parse(v, $parse) {
                            return Ok(result);
                        }
                    )+
                }
                mismatch(&value, stringify!($source))
            }
        }
    };
}
impl_as_value_temporal!(
    Date,
    format_description!("[year]-[month]-[day]"),
    format_description!("[year]-[month]-[day]"),
);
impl_as_value_temporal!(
    Time,
    format_description!("[hour]:[minute]:[second].[subsecond digits:9]"),
    format_description!("[hour]:[minute]:[second].[subsecond]"),
    format_description!("[hour]:[minute]:[second]"),
    format_description!("[hour]:[minute]"),
);
impl_as_value_temporal!(
    PrimitiveDateTime,
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:9]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
);
impl_as_value_temporal!(OffsetDateTime, &Rfc3339, &Rfc3339);

impl AsValue for Uuid {
    fn as_value(self) -> Result<Value, CoercionError> {
        Ok(Value::Text(self.hyphenated().to_string()))
    }
    fn try_from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Text(ref v) => Uuid::parse_str(v).or_else(|_| mismatch(&value, "Uuid")),
            Value::Blob(ref v) => Uuid::from_slice(v).or_else(|_| mismatch(&value, "Uuid")),
            _ => mismatch(&value, "Uuid"),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(self) -> Result<Value, CoercionError> {
        match self {
            Some(v) => v.as_value(),
            None => Ok(Value::Null),
        }
    }
    fn try_from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Null => Ok(None),
            v => T::try_from_value(v).map(Some),
        }
    }
}
