//! Destinations a decoder can fill.
//!
//! Callers that know the physical type hand over a typed slice; callers that
//! treat every column uniformly hand over a slice of [`Value`]s.

/// A single decoded value in the representation shared by all column types.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Binary(Vec<u8>),
}

impl Value {
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

/// The output buffer of a single `decode` call.
///
/// Decoders write from index 0 and never past [`Output::capacity`].
#[derive(Debug)]
pub enum Output<'a> {
    Int32(&'a mut [i32]),
    Int64(&'a mut [i64]),
    Float(&'a mut [f32]),
    Double(&'a mut [f64]),
    Values(&'a mut [Value]),
}

impl Output<'_> {
    pub fn capacity(&self) -> usize {
        match self {
            Output::Int32(buf) => buf.len(),
            Output::Int64(buf) => buf.len(),
            Output::Float(buf) => buf.len(),
            Output::Double(buf) => buf.len(),
            Output::Values(buf) => buf.len(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Output::Int32(_) => "INT32",
            Output::Int64(_) => "INT64",
            Output::Float(_) => "FLOAT",
            Output::Double(_) => "DOUBLE",
            Output::Values(_) => "VALUE",
        }
    }
}

impl<'a> From<&'a mut [i32]> for Output<'a> {
    fn from(buf: &'a mut [i32]) -> Self {
        Output::Int32(buf)
    }
}

impl<'a> From<&'a mut [Value]> for Output<'a> {
    fn from(buf: &'a mut [Value]) -> Self {
        Output::Values(buf)
    }
}
