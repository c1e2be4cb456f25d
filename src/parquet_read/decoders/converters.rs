//! Conversion of decoded INT32 values into the representation an [`Output`]
//! asks for.
//!
//! [`Output`]: crate::parquet_read::output::Output

use std::marker::PhantomData;

use num_traits::AsPrimitive;

use crate::parquet_read::output::Value;

pub trait Converter<A, B> {
    fn convert(&self, input: A) -> B;
}

/// Lossless numeric widening, e.g. `i32` into `i64` or `f64`.
#[derive(Debug, Clone, Copy)]
pub struct Widen<B>(PhantomData<B>);

impl<B> Widen<B> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<B> Default for Widen<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, B> Converter<A, B> for Widen<B>
where
    A: AsPrimitive<B>,
    B: Copy + 'static,
{
    #[inline]
    fn convert(&self, input: A) -> B {
        input.as_()
    }
}

/// Wraps a physical INT32 into [`Value::Int32`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ToValue;

impl Converter<i32, Value> for ToValue {
    #[inline]
    fn convert(&self, input: i32) -> Value {
        Value::from(input)
    }
}
