//! Ordered list - index-addressed sequence
//!
//! Backed by Vec. Indices are contiguous and 0-based; inserting or deleting
//! shifts every element after the touched index.

use crate::value::{RuntimeError, RuntimeResult, Value};

/// Resizable, index-addressed sequence of values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DsList {
    inner: Vec<Value>,
}

impl DsList {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Append to the end of the list
    pub fn add(&mut self, value: Value) {
        self.inner.push(value);
    }

    /// Insert before `index`, shifting later elements right.
    ///
    /// `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: Value) -> RuntimeResult<()> {
        if index > self.inner.len() {
            return Err(self.out_of_range(index));
        }
        self.inner.insert(index, value);
        Ok(())
    }

    /// Remove the element at `index`, shifting later elements left.
    pub fn delete(&mut self, index: usize) -> RuntimeResult<Value> {
        self.check_index(index)?;
        Ok(self.inner.remove(index))
    }

    /// Overwrite the element at `index`, returning the previous value.
    pub fn replace(&mut self, index: usize, value: Value) -> RuntimeResult<Value> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.inner[index], value))
    }

    pub fn find_value(&self, index: usize) -> RuntimeResult<&Value> {
        self.inner.get(index).ok_or_else(|| self.out_of_range(index))
    }

    /// First index holding a value equal to `value`
    pub fn find_index(&self, value: &Value) -> Option<usize> {
        self.inner.iter().position(|v| v == value)
    }

    /// Stable sort using [`Value::sort_cmp`]
    pub fn sort(&mut self, ascending: bool) {
        if ascending {
            self.inner.sort_by(|a, b| a.sort_cmp(b));
        } else {
            self.inner.sort_by(|a, b| b.sort_cmp(a));
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.inner
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.inner.iter()
    }

    fn check_index(&self, index: usize) -> RuntimeResult<()> {
        if index < self.inner.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> RuntimeError {
        RuntimeError::IndexOutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len: self.inner.len(),
        }
    }
}

impl FromIterator<Value> for DsList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
