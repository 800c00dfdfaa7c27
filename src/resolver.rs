//! Call-shape resolution for the dual calling convention.
//!
//! Every provider operation can be called either with the legacy ordered list
//! of positional scalars or with a single configuration object carrying the
//! named fields. Resolution is pure: no I/O, no mutation of caller-supplied
//! values, identical inputs always produce identical outputs.

use serde_json::{Map, Value};

use crate::error::Error;
use crate::operation::Operation;

/// Raw argument list for one operation call.
///
/// Thin builder over the heterogeneous `Vec<Value>` an operation receives.
/// Positional values, a configuration object, and trailing values can all be
/// expressed through it; the resolver decides which shape was meant.
#[derive(Debug, Clone, Default)]
pub struct CallArgs(Vec<Value>);

impl CallArgs {
    /// Positional form: one value per named field, in field order.
    #[must_use]
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// Configuration-object form: a single object holding named fields.
    #[must_use]
    pub fn config(fields: Map<String, Value>) -> Self {
        Self(vec![Value::Object(fields)])
    }

    /// Append one more raw argument (a trailing value, in either form).
    #[must_use]
    pub fn and(mut self, value: impl Into<Value>) -> Self {
        self.0.push(value.into());
        self
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<Map<String, Value>> for CallArgs {
    fn from(fields: Map<String, Value>) -> Self {
        Self::config(fields)
    }
}

/// Outcome of call-shape resolution: the normalized argument object plus the
/// optional passthrough tail.
///
/// `trailing_args` distinguishes "absent" (`None`, operation does not support
/// trailing arguments) from "present but empty" (`Some(&[])`).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    fields: Map<String, Value>,
    trailing: Option<Vec<Value>>,
}

impl ResolvedCall {
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn trailing_args(&self) -> Option<&[Value]> {
        self.trailing.as_deref()
    }

    #[must_use]
    pub fn into_parts(self) -> (Map<String, Value>, Option<Vec<Value>>) {
        (self.fields, self.trailing)
    }
}

/// Normalize a raw argument list into a [`ResolvedCall`].
///
/// A leading JSON object selects the configuration-object form: its properties
/// are copied, restricted to the operation's named fields, and every remaining
/// raw value becomes a trailing argument. Any other first value selects the
/// positional form: the first `named_fields().len()` values are zipped with
/// the field names by position.
///
/// # Errors
///
/// [`Error::Arity`] when the positional form supplies fewer values than the
/// operation has named fields; [`Error::AmbiguousArguments`] when values
/// remain beyond the named fields (or beyond the configuration object) for an
/// operation without trailing-argument support.
pub fn resolve(operation: Operation, args: impl Into<CallArgs>) -> Result<ResolvedCall, Error> {
    let names = operation.named_fields();
    let mut raw = args.into().into_values().into_iter();

    match raw.next() {
        Some(Value::Object(supplied)) => {
            let mut fields = Map::with_capacity(names.len());
            for &name in names {
                if let Some(value) = supplied.get(name) {
                    fields.insert(name.to_owned(), value.clone());
                }
            }
            let trailing = trailing(operation, raw.collect())?;
            Ok(ResolvedCall { fields, trailing })
        }
        first => {
            let mut raw = first.into_iter().chain(raw);
            let mut fields = Map::with_capacity(names.len());
            for (index, &name) in names.iter().enumerate() {
                let Some(value) = raw.next() else {
                    return Err(Error::Arity {
                        operation: operation.name(),
                        expected: names.len(),
                        got: index,
                    });
                };
                fields.insert(name.to_owned(), value);
            }
            let trailing = trailing(operation, raw.collect())?;
            Ok(ResolvedCall { fields, trailing })
        }
    }
}

fn trailing(operation: Operation, rest: Vec<Value>) -> Result<Option<Vec<Value>>, Error> {
    if operation.supports_trailing_args() {
        return Ok(Some(rest));
    }
    if rest.is_empty() {
        return Ok(None);
    }
    Err(Error::AmbiguousArguments {
        operation: operation.name(),
        extra: rest.len(),
    })
}
