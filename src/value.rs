//! Tagged value representation
//!
//! This module defines the [`Value`] enum: one tagged variant per declarable
//! type, plus `Null`, aggregates, and an `Uninitialized` marker. Values back
//! the zero-value column in reports and carry the conversion and narrowing
//! rules.
//!
//! # Narrowing
//!
//! Two spellings for getting a typed payload out:
//! - `as_int()` and friends return `Option`, for callers with a fallback
//! - `expect_int()` and friends return `Result` carrying a
//!   [`ValueError::TypeMismatch`] that names both sides
//!
//! # Conversion
//!
//! [`Value::convert`] applies C-style numeric conversion between primitive
//! kinds: truncation when narrowing integers, the nonzero rule for `bool`,
//! truncation toward zero for float to int (saturating at the target's
//! bounds when the float is out of range, NaN to 0). It never mutates the
//! receiver and never converts pointers or aggregates.

use std::fmt;
use thiserror::Error;

use crate::parser::ast::{BaseType, SourceLocation, Type};
use crate::types::{ResolveError, StructRegistry};

/// Memory address type (64-bit)
pub type Address = u64;

/// Value error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: &'static str },
}

/// Tagged values for every declarable type
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Char(i8),
    Bool(bool),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Pointer(Address),
    Null,
    Struct(Vec<(String, Value)>), // field name and value, in declaration order
    Array(Vec<Value>),
    // one element repeated n times; array zeros use this form so a huge
    // buffer costs one element, not one value per entry
    Repeat(Box<Value>, usize),
    #[default]
    Uninitialized,
}

/// Intermediate for numeric conversion; every numeric value widens to
/// `i64` or `f64` before narrowing to the target.
enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    // One accessor per integer width. The float arms cast at the target
    // width, which saturates out-of-range values and maps NaN to 0; the
    // int arms truncate, C-style.
    fn to_i8(&self) -> i8 {
        match self {
            Numeric::Int(n) => *n as i8,
            Numeric::Float(x) => *x as i8,
        }
    }

    fn to_i16(&self) -> i16 {
        match self {
            Numeric::Int(n) => *n as i16,
            Numeric::Float(x) => *x as i16,
        }
    }

    fn to_i32(&self) -> i32 {
        match self {
            Numeric::Int(n) => *n as i32,
            Numeric::Float(x) => *x as i32,
        }
    }

    fn to_i64(&self) -> i64 {
        match self {
            Numeric::Int(n) => *n,
            Numeric::Float(x) => *x as i64,
        }
    }

    fn to_f64(&self) -> f64 {
        match self {
            Numeric::Int(n) => *n as f64,
            Numeric::Float(x) => *x,
        }
    }

    fn is_nonzero(&self) -> bool {
        match self {
            Numeric::Int(n) => *n != 0,
            Numeric::Float(x) => *x != 0.0,
        }
    }
}

impl Value {
    /// Name of the value's kind, used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Char(_) => "char",
            Value::Bool(_) => "bool",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Pointer(_) => "pointer",
            Value::Null => "null",
            Value::Struct(_) => "struct",
            Value::Array(_) | Value::Repeat(..) => "array",
            Value::Uninitialized => "uninitialized",
        }
    }

    /// Check if this value is initialized
    pub fn is_initialized(&self) -> bool {
        !matches!(self, Value::Uninitialized)
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a pointer (including null)
    pub fn is_pointer(&self) -> bool {
        matches!(self, Value::Pointer(_) | Value::Null)
    }

    /// Get the char value, returns None if not a Char
    pub fn as_char(&self) -> Option<i8> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Get the bool value, returns None if not a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the short value, returns None if not a Short
    pub fn as_short(&self) -> Option<i16> {
        match self {
            Value::Short(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the integer value, returns None if not an Int
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the long value, returns None if not a Long
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the float value, returns None if not a Float
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Get the double value, returns None if not a Double
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(x) => Some(*x),
            _ => None,
        }
    }

    /// Get the pointer value; Null reads as address 0
    pub fn as_pointer(&self) -> Option<Address> {
        match self {
            Value::Pointer(addr) => Some(*addr),
            Value::Null => Some(0),
            _ => None,
        }
    }

    /// Expect a char value, or a [`ValueError::TypeMismatch`]
    pub fn expect_char(&self) -> Result<i8, ValueError> {
        self.as_char().ok_or_else(|| self.mismatch("char"))
    }

    /// Expect a bool value, or a [`ValueError::TypeMismatch`]
    pub fn expect_bool(&self) -> Result<bool, ValueError> {
        self.as_bool().ok_or_else(|| self.mismatch("bool"))
    }

    /// Expect a short value, or a [`ValueError::TypeMismatch`]
    pub fn expect_short(&self) -> Result<i16, ValueError> {
        self.as_short().ok_or_else(|| self.mismatch("short"))
    }

    /// Expect an integer value, or a [`ValueError::TypeMismatch`]
    pub fn expect_int(&self) -> Result<i32, ValueError> {
        self.as_int().ok_or_else(|| self.mismatch("int"))
    }

    /// Expect a long value, or a [`ValueError::TypeMismatch`]
    pub fn expect_long(&self) -> Result<i64, ValueError> {
        self.as_long().ok_or_else(|| self.mismatch("long"))
    }

    /// Expect a float value, or a [`ValueError::TypeMismatch`]
    pub fn expect_float(&self) -> Result<f32, ValueError> {
        self.as_float().ok_or_else(|| self.mismatch("float"))
    }

    /// Expect a double value, or a [`ValueError::TypeMismatch`]
    pub fn expect_double(&self) -> Result<f64, ValueError> {
        self.as_double().ok_or_else(|| self.mismatch("double"))
    }

    /// Expect a pointer value (Null reads as 0), or a [`ValueError::TypeMismatch`]
    pub fn expect_pointer(&self) -> Result<Address, ValueError> {
        self.as_pointer().ok_or_else(|| self.mismatch("pointer"))
    }

    fn mismatch(&self, expected: &str) -> ValueError {
        ValueError::TypeMismatch {
            expected: expected.to_string(),
            got: self.kind_name(),
        }
    }

    /// The zero value for a declarable type: numeric zero, `false`, `NULL`
    /// for pointers, recursively zeroed aggregates. Array zeros come back
    /// as [`Value::Repeat`].
    pub fn zero_of(ty: &Type, registry: &StructRegistry) -> Result<Value, ResolveError> {
        Self::zero_of_guarded(ty, registry, &mut Vec::new())
    }

    fn zero_of_guarded(
        ty: &Type,
        registry: &StructRegistry,
        visiting: &mut Vec<String>,
    ) -> Result<Value, ResolveError> {
        // Dimensions strip off before pointers: `char *names[4]` is an
        // array of four null pointers, not a single pointer. The zero of
        // an array is uniform, so it is stored as element plus count
        // rather than one value per entry.
        if let Some((&first, rest)) = ty.array_dims.split_first() {
            let mut element_type = ty.clone();
            element_type.array_dims = rest.to_vec();
            let element = Self::zero_of_guarded(&element_type, registry, visiting)?;
            return Ok(Value::Repeat(Box::new(element), first));
        }

        if ty.is_pointer() {
            return Ok(Value::Null);
        }

        match &ty.base {
            BaseType::Char => Ok(Value::Char(0)),
            BaseType::Bool => Ok(Value::Bool(false)),
            BaseType::Short => Ok(Value::Short(0)),
            BaseType::Int => Ok(Value::Int(0)),
            BaseType::Long => Ok(Value::Long(0)),
            BaseType::Float => Ok(Value::Float(0.0)),
            BaseType::Double => Ok(Value::Double(0.0)),
            BaseType::Void => Ok(Value::Uninitialized),
            BaseType::Struct(name) => {
                let def = match registry.get(name) {
                    Some(def) => def,
                    None => {
                        return Err(ResolveError::UnknownStruct {
                            name: name.clone(),
                            location: SourceLocation::new(0, 0),
                        });
                    }
                };
                if visiting.iter().any(|n| n == name) {
                    return Err(ResolveError::RecursiveStruct {
                        name: name.clone(),
                        location: def.location,
                    });
                }

                visiting.push(name.clone());
                let mut fields = Vec::with_capacity(def.fields.len());
                for field in &def.fields {
                    let zero = Self::zero_of_guarded(&field.field_type, registry, visiting)?;
                    fields.push((field.name.clone(), zero));
                }
                visiting.pop();

                Ok(Value::Struct(fields))
            }
        }
    }

    /// Convert to the primitive kind of `target`, C-style. Identity when the
    /// kinds already match. Pointer or aggregate on either side is a
    /// [`ValueError::TypeMismatch`].
    pub fn convert(&self, target: &Type) -> Result<Value, ValueError> {
        let mismatch = || ValueError::TypeMismatch {
            expected: target.to_string(),
            got: self.kind_name(),
        };

        if target.is_pointer() || target.is_array() {
            return Err(mismatch());
        }
        let numeric = self.as_numeric().ok_or_else(mismatch)?;

        let converted = match &target.base {
            BaseType::Char => Value::Char(numeric.to_i8()),
            BaseType::Bool => Value::Bool(numeric.is_nonzero()),
            BaseType::Short => Value::Short(numeric.to_i16()),
            BaseType::Int => Value::Int(numeric.to_i32()),
            BaseType::Long => Value::Long(numeric.to_i64()),
            BaseType::Float => Value::Float(numeric.to_f64() as f32),
            BaseType::Double => Value::Double(numeric.to_f64()),
            BaseType::Void | BaseType::Struct(_) => return Err(mismatch()),
        };
        Ok(converted)
    }

    fn as_numeric(&self) -> Option<Numeric> {
        match self {
            Value::Char(c) => Some(Numeric::Int(*c as i64)),
            Value::Bool(b) => Some(Numeric::Int(*b as i64)),
            Value::Short(n) => Some(Numeric::Int(*n as i64)),
            Value::Int(n) => Some(Numeric::Int(*n as i64)),
            Value::Long(n) => Some(Numeric::Int(*n)),
            Value::Float(x) => Some(Numeric::Float(*x as f64)),
            Value::Double(x) => Some(Numeric::Float(*x)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Arrays print at most this many leading elements, then a count.
        const SHOWN: usize = 4;

        match self {
            Value::Char(c) => {
                let byte = *c as u8;
                if byte.is_ascii_graphic() || byte == b' ' {
                    write!(f, "'{}'", byte as char)
                } else {
                    write!(f, "'\\x{:02x}'", byte)
                }
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::Short(n) => write!(f, "{}", n),
            Value::Int(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}", n),
            // {:?} keeps the decimal point on whole floats
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Double(x) => write!(f, "{:?}", x),
            Value::Pointer(addr) => write!(f, "0x{:08x}", addr),
            Value::Null => write!(f, "NULL"),
            Value::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, "}}")
            }
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().take(SHOWN).enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                if items.len() > SHOWN {
                    write!(f, ", ... {} total", items.len())?;
                }
                write!(f, "]")
            }
            Value::Repeat(element, count) => {
                write!(f, "[")?;
                for i in 0..(*count).min(SHOWN) {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                if *count > SHOWN {
                    write!(f, ", ... {} total", count)?;
                }
                write!(f, "]")
            }
            Value::Uninitialized => write!(f, "[uninit]"),
        }
    }
}
