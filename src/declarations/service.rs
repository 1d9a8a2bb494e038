// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! Service, function and argument declarations.

use std::collections::HashMap;

use serde::Serialize;

use super::types::Type;

/// A function argument declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionArgument {
    /// 1-based argument index.
    pub index: u64,

    /// Argument name.
    pub name: String,

    /// Argument type.
    pub argument_type: Type,
}

/// A function declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Function {
    name: String,
    documentation: Vec<String>,
    arguments: Vec<FunctionArgument>,

    /// If no return type is defined, the function is considered void.
    return_type: Option<Type>,

    #[serde(skip)]
    name_index: HashMap<String, usize>,
    #[serde(skip)]
    index_index: HashMap<u64, usize>,
}

impl Function {
    /// Creates a function declaration without arguments.
    pub fn new(name: impl Into<String>, documentation: Vec<String>) -> Self {
        Self {
            name: name.into(),
            documentation,
            arguments: Vec::new(),
            return_type: None,
            name_index: HashMap::new(),
            index_index: HashMap::new(),
        }
    }

    /// Appends an argument.
    ///
    /// The caller is expected to have validated that neither the name nor
    /// the index are in use.
    pub fn add_argument(&mut self, index: u64, name: impl Into<String>, argument_type: Type) {
        let name = name.into();
        let slot = self.arguments.len();

        self.name_index.insert(name.clone(), slot);
        self.index_index.insert(index, slot);
        self.arguments.push(FunctionArgument {
            index,
            name,
            argument_type,
        });
    }

    pub fn set_return_type(&mut self, return_type: Type) {
        self.return_type = Some(return_type);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn documentation(&self) -> &[String] {
        &self.documentation
    }

    /// Arguments in declaration order.
    pub fn arguments(&self) -> &[FunctionArgument] {
        &self.arguments
    }

    /// Return type, or `None` for a void function.
    pub fn return_type(&self) -> Option<&Type> {
        self.return_type.as_ref()
    }

    pub fn argument_index_in_use(&self, index: u64) -> bool {
        self.index_index.contains_key(&index)
    }

    pub fn argument_name_in_use(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// Arguments ordered by index.
    pub fn arguments_sorted_by_index(&self) -> Vec<&FunctionArgument> {
        let mut arguments: Vec<&FunctionArgument> = self.arguments.iter().collect();
        arguments.sort_by_key(|a| a.index);
        arguments
    }
}

/// A service declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Service {
    name: String,
    parent_name: Option<String>,
    documentation: Vec<String>,
    functions: Vec<Function>,

    #[serde(skip)]
    name_index: HashMap<String, usize>,
}

impl Service {
    /// Creates a service declaration without functions.
    pub fn new(name: impl Into<String>, documentation: Vec<String>) -> Self {
        Self {
            name: name.into(),
            parent_name: None,
            documentation,
            functions: Vec::new(),
            name_index: HashMap::new(),
        }
    }

    /// Creates a new service inheriting from this one.
    ///
    /// All functions are copied into the new declaration; later changes
    /// to the parent do not affect the child.
    pub fn inherit(&self, name: impl Into<String>, documentation: Vec<String>) -> Self {
        let mut child = Self::new(name, documentation);
        child.parent_name = Some(self.name.clone());

        for function in &self.functions {
            child.add_function(function.clone());
        }

        child
    }

    /// Appends a function.
    ///
    /// The caller is expected to have validated that the name is not in
    /// use.
    pub fn add_function(&mut self, function: Function) {
        self.name_index
            .insert(function.name.clone(), self.functions.len());
        self.functions.push(function);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the parent service, if the service inherits from one.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    pub fn documentation(&self) -> &[String] {
        &self.documentation
    }

    /// Functions in declaration order.
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn function_name_in_use(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    pub fn function_named(&self, name: &str) -> Option<&Function> {
        self.name_index.get(name).map(|&slot| &self.functions[slot])
    }

    /// Functions ordered by name.
    pub fn functions_sorted_by_name(&self) -> Vec<&Function> {
        let mut functions: Vec<&Function> = self.functions.iter().collect();
        functions.sort_by_key(|f| f.name.as_str());
        functions
    }
}
