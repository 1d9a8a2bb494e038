// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! Struct and field declarations.

use std::collections::HashMap;

use serde::Serialize;

use super::types::Type;

/// A field declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// 1-based field index.
    pub index: u64,

    /// Field name.
    pub name: String,

    /// Documentation paragraphs.
    pub documentation: Vec<String>,

    /// Field type.
    pub field_type: Type,
}

/// A struct declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Struct {
    name: String,
    parent_name: Option<String>,
    documentation: Vec<String>,
    fields: Vec<Field>,

    #[serde(skip)]
    name_index: HashMap<String, usize>,
    #[serde(skip)]
    index_index: HashMap<u64, usize>,
}

impl Struct {
    /// Creates a struct declaration without fields.
    pub fn new(name: impl Into<String>, documentation: Vec<String>) -> Self {
        Self {
            name: name.into(),
            parent_name: None,
            documentation,
            fields: Vec::new(),
            name_index: HashMap::new(),
            index_index: HashMap::new(),
        }
    }

    /// Creates a new struct inheriting from this one.
    ///
    /// All fields are copied into the new declaration; later changes to
    /// the parent do not affect the child.
    pub fn inherit(&self, name: impl Into<String>, documentation: Vec<String>) -> Self {
        let mut child = Self::new(name, documentation);
        child.parent_name = Some(self.name.clone());

        for field in &self.fields {
            child.add_field(
                field.index,
                field.name.clone(),
                field.documentation.clone(),
                field.field_type.clone(),
            );
        }

        child
    }

    /// Appends a field.
    ///
    /// The caller is expected to have validated that neither the name nor
    /// the index are in use.
    pub fn add_field(
        &mut self,
        index: u64,
        name: impl Into<String>,
        documentation: Vec<String>,
        field_type: Type,
    ) {
        let name = name.into();
        let slot = self.fields.len();

        self.name_index.insert(name.clone(), slot);
        self.index_index.insert(index, slot);
        self.fields.push(Field {
            index,
            name,
            documentation,
            field_type,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the parent struct, if the struct inherits from one.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    pub fn documentation(&self) -> &[String] {
        &self.documentation
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_index_in_use(&self, index: u64) -> bool {
        self.index_index.contains_key(&index)
    }

    pub fn field_name_in_use(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    pub fn field_named(&self, name: &str) -> Option<&Field> {
        self.name_index.get(name).map(|&slot| &self.fields[slot])
    }

    pub fn field_with_index(&self, index: u64) -> Option<&Field> {
        self.index_index.get(&index).map(|&slot| &self.fields[slot])
    }

    /// Fields ordered by index.
    pub fn fields_sorted_by_index(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.index);
        fields
    }
}
