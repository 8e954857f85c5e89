// rpcgate - RPC server performance gating
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Named benchmark measurements.
//!
//! A [`MeasurementStore`] maps a benchmark name to a single numeric value
//! (typically nanoseconds per operation). Stores are built once, by the
//! result-file parser, the aggregator or the load harness, and are not
//! mutated afterwards. Iteration is always in lexicographic name order so
//! that everything derived from a store is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// One named measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Benchmark name, unique within a store.
    pub name: String,
    /// Measured value. Non-positive values are kept but never compared.
    pub value: f64,
}

impl Measurement {
    /// Creates a new measurement.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Immutable mapping from benchmark name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementStore {
    values: BTreeMap<String, f64>,
}

impl MeasurementStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value recorded for `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Returns whether `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of measurements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the store holds no measurements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(name, value)` pairs in name order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.values.iter(),
        }
    }

    /// Iterates benchmark names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns owned [`Measurement`] records in name order.
    pub fn measurements(&self) -> Vec<Measurement> {
        self.iter()
            .map(|(name, value)| Measurement::new(name, value))
            .collect()
    }

    /// Names whose value is negative, in order.
    ///
    /// Zero is deliberately not included: zero values are excluded from
    /// comparison but are not a data-quality warning.
    pub fn negative_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, value)| *value < 0.0)
            .map(|(name, _)| name)
            .collect()
    }

    /// Inserts a value, returning the previous one if the name was present.
    ///
    /// Only visible inside the crate: stores are frozen once handed out.
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }
}

/// Iterator over `(name, value)` pairs of a [`MeasurementStore`].
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, f64>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (name.as_str(), *value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a MeasurementStore {
    type Item = (&'a str, f64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Later entries with the same name replace earlier ones.
impl<K: Into<String>> FromIterator<(K, f64)> for MeasurementStore {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (name, value) in iter {
            store.insert(name, value);
        }
        store
    }
}

impl FromIterator<Measurement> for MeasurementStore {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        iter.into_iter().map(|m| (m.name, m.value)).collect()
    }
}
