// Copyright (c) 2025 John Wilger
// SPDX-License-Identifier: MIT

//! The interface declaration, root of the semantic model.

use std::collections::{HashMap, HashSet};

use nutype::nutype;
use serde::Serialize;

use super::enums::Enum;
use super::exception::Exception;
use super::service::Service;
use super::structs::Struct;

/// The validated definition name of an interface.
///
/// Definition names are lower snake case and become the generated
/// module/package name.
#[nutype(
    validate(regex = "^[a-z][a-z0-9]*$"),
    derive(Debug, Clone, PartialEq, Eq, Deref, Display, Serialize)
)]
pub struct DefinitionName(String);

/// An interface declaration.
///
/// Owns every declaration parsed from one definition file. Names are
/// unique across structs, exceptions, enumerations and services.
#[derive(Debug, Clone, Serialize)]
pub struct Interface {
    name: Option<DefinitionName>,
    documentation: Vec<String>,
    structs: HashMap<String, Struct>,
    exceptions: HashMap<String, Exception>,
    enums: HashMap<String, Enum>,
    services: HashMap<String, Service>,

    #[serde(skip)]
    used_names: HashSet<String>,
}

impl Default for Interface {
    fn default() -> Self {
        Self::new()
    }
}

impl Interface {
    /// Creates an empty interface declaration.
    pub fn new() -> Self {
        Self {
            name: None,
            documentation: Vec::new(),
            structs: HashMap::new(),
            exceptions: HashMap::new(),
            enums: HashMap::new(),
            services: HashMap::new(),
            used_names: HashSet::new(),
        }
    }

    /// Definition name, if one has been parsed.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(|n| n.as_str())
    }

    pub fn set_name(&mut self, name: DefinitionName) {
        self.name = Some(name);
    }

    pub fn documentation(&self) -> &[String] {
        &self.documentation
    }

    pub fn set_documentation(&mut self, documentation: Vec<String>) {
        self.documentation = documentation;
    }

    /// Adds a struct and marks its name as used.
    pub fn add_struct(&mut self, decl: Struct) {
        self.mark_name_as_used(decl.name());
        self.structs.insert(decl.name().to_string(), decl);
    }

    /// Adds an exception and marks its name as used.
    pub fn add_exception(&mut self, decl: Exception) {
        self.mark_name_as_used(decl.name());
        self.exceptions.insert(decl.name().to_string(), decl);
    }

    /// Adds an enumeration and marks its name as used.
    pub fn add_enum(&mut self, decl: Enum) {
        self.mark_name_as_used(decl.name());
        self.enums.insert(decl.name().to_string(), decl);
    }

    /// Adds a service and marks its name as used.
    pub fn add_service(&mut self, decl: Service) {
        self.mark_name_as_used(decl.name());
        self.services.insert(decl.name().to_string(), decl);
    }

    /// Whether a top-level name is already in use.
    pub fn name_in_use(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    /// Reserves a top-level name.
    pub fn mark_name_as_used(&mut self, name: &str) {
        self.used_names.insert(name.to_string());
    }

    pub fn structs(&self) -> &HashMap<String, Struct> {
        &self.structs
    }

    pub fn exceptions(&self) -> &HashMap<String, Exception> {
        &self.exceptions
    }

    pub fn enums(&self) -> &HashMap<String, Enum> {
        &self.enums
    }

    pub fn services(&self) -> &HashMap<String, Service> {
        &self.services
    }

    /// Resolves a struct reference by name.
    pub fn struct_named(&self, name: &str) -> Option<&Struct> {
        self.structs.get(name)
    }

    /// Resolves an enumeration reference by name.
    pub fn enum_named(&self, name: &str) -> Option<&Enum> {
        self.enums.get(name)
    }

    pub fn exception_named(&self, name: &str) -> Option<&Exception> {
        self.exceptions.get(name)
    }

    pub fn service_named(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    /// Structs ordered by name.
    pub fn structs_sorted_by_name(&self) -> Vec<&Struct> {
        let mut decls: Vec<&Struct> = self.structs.values().collect();
        decls.sort_by_key(|d| d.name());
        decls
    }

    /// Exceptions ordered by name.
    pub fn exceptions_sorted_by_name(&self) -> Vec<&Exception> {
        let mut decls: Vec<&Exception> = self.exceptions.values().collect();
        decls.sort_by_key(|d| d.name());
        decls
    }

    /// Enumerations ordered by name.
    pub fn enums_sorted_by_name(&self) -> Vec<&Enum> {
        let mut decls: Vec<&Enum> = self.enums.values().collect();
        decls.sort_by_key(|d| d.name());
        decls
    }

    /// Services ordered by name.
    pub fn services_sorted_by_name(&self) -> Vec<&Service> {
        let mut decls: Vec<&Service> = self.services.values().collect();
        decls.sort_by_key(|d| d.name());
        decls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_names_are_lower_snake_case() {
        assert!(DefinitionName::try_new("demo".to_string()).is_ok());
        assert!(DefinitionName::try_new("demo2".to_string()).is_ok());
        assert!(DefinitionName::try_new("Demo".to_string()).is_err());
        assert!(DefinitionName::try_new("de_mo".to_string()).is_err());
        assert!(DefinitionName::try_new("2demo".to_string()).is_err());
        assert!(DefinitionName::try_new("".to_string()).is_err());
    }

    #[test]
    fn added_declarations_reserve_their_names() {
        let mut interface = Interface::new();
        interface.add_struct(Struct::new("User", vec![]));
        interface.add_enum(Enum::new("Color", vec![]));

        assert!(interface.name_in_use("User"));
        assert!(interface.name_in_use("Color"));
        assert!(!interface.name_in_use("Missing"));
        assert!(interface.struct_named("User").is_some());
        assert!(interface.enum_named("Color").is_some());
        assert!(interface.struct_named("Color").is_none());
    }

    #[test]
    fn sorted_views_are_deterministic() {
        let mut interface = Interface::new();
        interface.add_struct(Struct::new("Zeta", vec![]));
        interface.add_struct(Struct::new("Alpha", vec![]));
        interface.add_struct(Struct::new("Mid", vec![]));

        let names: Vec<&str> = interface
            .structs_sorted_by_name()
            .iter()
            .map(|d| d.name())
            .collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }
}
