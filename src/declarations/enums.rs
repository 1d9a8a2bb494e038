// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! Enumeration declarations.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single enumeration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    /// Signed 64-bit value.
    pub value: i64,

    /// Value name.
    pub name: String,

    /// Documentation paragraphs.
    pub documentation: Vec<String>,
}

/// An enumeration declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Enum {
    name: String,
    documentation: Vec<String>,
    values: BTreeMap<i64, EnumValue>,
}

impl Enum {
    /// Creates an enumeration declaration without values.
    pub fn new(name: impl Into<String>, documentation: Vec<String>) -> Self {
        Self {
            name: name.into(),
            documentation,
            values: BTreeMap::new(),
        }
    }

    /// Adds a value.
    ///
    /// The caller is expected to have validated that the value is not in
    /// use.
    pub fn add_value(&mut self, value: i64, name: impl Into<String>, documentation: Vec<String>) {
        self.values.insert(
            value,
            EnumValue {
                value,
                name: name.into(),
                documentation,
            },
        );
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn documentation(&self) -> &[String] {
        &self.documentation
    }

    /// Mapping of values to representation.
    pub fn values(&self) -> &BTreeMap<i64, EnumValue> {
        &self.values
    }

    pub fn value_in_use(&self, value: i64) -> bool {
        self.values.contains_key(&value)
    }

    pub fn value(&self, value: i64) -> Option<&EnumValue> {
        self.values.get(&value)
    }

    /// Values ordered by value.
    pub fn values_sorted_by_value(&self) -> Vec<&EnumValue> {
        self.values.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_sort_by_value() {
        let mut decl = Enum::new("Color", vec![]);
        decl.add_value(3, "Blue", vec![]);
        decl.add_value(1, "Red", vec![]);
        decl.add_value(-2, "Infra", vec![]);

        let names: Vec<&str> = decl
            .values_sorted_by_value()
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, vec!["Infra", "Red", "Blue"]);
    }

    #[test]
    fn value_lookups() {
        let mut decl = Enum::new("Color", vec![]);
        decl.add_value(1, "Red", vec![]);

        assert!(decl.value_in_use(1));
        assert!(!decl.value_in_use(2));
        assert_eq!(decl.value(1).unwrap().name, "Red");
    }
}
