/*******************************************************************************
 *     ___                  _   ____  ____
 *    / _ \ _   _  ___  ___| |_|  _ \| __ )
 *   | | | | | | |/ _ \/ __| __| | | |  _ \
 *   | |_| | |_| |  __/\__ \ |_| |_| | |_) |
 *    \__\_\\__,_|\___||___/\__|____/|____/
 *
 *  Copyright (c) 2014-2019 Appsicle
 *  Copyright (c) 2019-2024 QuestDB
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *  http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 *
 ******************************************************************************/
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Cause of a page decoding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParquetErrorCause {
    /// The current unit (a literal, a packed group, a run) is truncated.
    InsufficientData,
    /// Clean end of page: every declared value has already been produced.
    NoMoreData,
    /// A structural invariant of the encoding is violated.
    CorruptData,
    /// The caller asked for something the decoder does not support,
    /// e.g. an output kind or a page encoding.
    Unsupported,
}

impl ParquetErrorCause {
    #[track_caller]
    pub fn into_err(self) -> ParquetError {
        ParquetError::new(self)
    }
}

impl Display for ParquetErrorCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParquetErrorCause::InsufficientData => "insufficient data",
            ParquetErrorCause::NoMoreData => "no more data",
            ParquetErrorCause::CorruptData => "corrupt data",
            ParquetErrorCause::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// An error decoding a parquet page.
#[derive(Clone)]
pub struct ParquetError {
    /// What caused the error.
    cause: ParquetErrorCause,

    /// Stack of additional contextual information,
    /// printed in reverse order.
    context: Vec<String>,

    backtrace: Arc<Backtrace>,
}

impl ParquetError {
    #[track_caller]
    pub fn new(cause: ParquetErrorCause) -> Self {
        Self {
            cause,
            context: Vec::new(),
            backtrace: Backtrace::capture().into(),
        }
    }

    #[track_caller]
    pub fn with_descr(cause: ParquetErrorCause, descr: impl Into<String>) -> Self {
        Self {
            cause,
            context: vec![descr.into()],
            backtrace: Backtrace::capture().into(),
        }
    }

    pub fn cause(&self) -> ParquetErrorCause {
        self.cause
    }

    pub fn is_no_more_data(&self) -> bool {
        self.cause == ParquetErrorCause::NoMoreData
    }

    pub fn add_context(&mut self, context: impl Into<String>) {
        self.context.push(context.into());
    }
}

impl Debug for ParquetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParquetError({:?})", self.cause)?;
        for line in self.context.iter().rev() {
            write!(f, "\n    {line}")?;
        }
        if self.backtrace.status() == BacktraceStatus::Captured {
            write!(f, "\n{}", self.backtrace)?;
        }
        Ok(())
    }
}

impl Display for ParquetError {
    /// The outermost context first, the originating description last.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut lines = self.context.iter().rev();
        let Some(outermost) = lines.next() else {
            return write!(f, "{}", self.cause);
        };
        f.write_str(outermost)?;
        lines.try_for_each(|line| write!(f, ": {line}"))
    }
}

impl std::error::Error for ParquetError {}

impl From<parquet2::error::Error> for ParquetError {
    #[track_caller]
    fn from(source: parquet2::error::Error) -> Self {
        Self::with_descr(ParquetErrorCause::CorruptData, source.to_string())
    }
}

pub type ParquetResult<T> = Result<T, ParquetError>;

pub trait ParquetErrorExt<T> {
    fn context(self, context: &str) -> Self;
    fn with_context<F>(self, context: F) -> Self
    where
        F: FnOnce(&mut ParquetError) -> String;
}

impl<T> ParquetErrorExt<T> for ParquetResult<T> {
    fn context(self, context: &str) -> Self {
        self.map_err(|mut err| {
            err.add_context(context);
            err
        })
    }

    fn with_context<F>(self, context: F) -> Self
    where
        F: FnOnce(&mut ParquetError) -> String,
    {
        self.map_err(|mut err| {
            let context = context(&mut err);
            err.add_context(context);
            err
        })
    }
}

macro_rules! fmt_err {
    ($cause: ident, $($arg:tt)*) => {
        $crate::parquet::error::ParquetError::with_descr(
            $crate::parquet::error::ParquetErrorCause::$cause,
            format!($($arg)*))
    };
}

pub(crate) use fmt_err;
