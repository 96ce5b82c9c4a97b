use crate::{Function, Symbol, Variable};
use derive_more::{From, IsVariant};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, From, IsVariant)]
pub enum Definition<'a> {
    Variable(Variable<'a>),
    Function(Function<'a>),
}

impl<'a> Definition<'a> {
    pub fn name(&self) -> &Symbol<'a> {
        match self {
            Self::Variable(variable) => &variable.name,
            Self::Function(function) => &function.name,
        }
    }

    /// Whether two definitions would expand identically: same shape, same
    /// parameter spelling and the same significant body tokens.
    pub fn same_as(&self, other: &Definition) -> bool {
        match (self, other) {
            (Self::Variable(a), Definition::Variable(b)) => {
                a.substitution.sequence.same_spelling(&b.substitution.sequence)
            }
            (Self::Function(a), Definition::Function(b)) => {
                a.variadic == b.variadic
                    && a.parameters.len() == b.parameters.len()
                    && a.parameters
                        .iter()
                        .zip(b.parameters.iter())
                        .all(|(a, b)| a.name == b.name)
                    && a.substitution.sequence.same_spelling(&b.substitution.sequence)
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Macro `{name}` is already defined")]
pub struct AlreadyDefined {
    pub name: String,
}

/// Macros in scope, at most one definition per name.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable<'a> {
    definitions: HashMap<&'a str, Definition<'a>>,
}

impl<'a> SymbolTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: Definition<'a>) -> Result<(), AlreadyDefined> {
        let name = definition.name().name;

        if self.definitions.contains_key(name) {
            return Err(AlreadyDefined {
                name: name.to_string(),
            });
        }

        self.definitions.insert(name, definition);
        Ok(())
    }

    /// Returns how many definitions were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        self.definitions.remove(name).map_or(0, |_| 1)
    }

    pub fn lookup(&self, name: &str) -> Option<&Definition<'a>> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &Definition<'a>)> {
        self.definitions
            .iter()
            .map(|(name, definition)| (*name, definition))
    }
}
