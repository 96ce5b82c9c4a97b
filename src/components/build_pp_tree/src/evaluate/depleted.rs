use std::collections::HashSet;

/*
    Names of the macros currently being expanded on the way to a value.

    A variable-like macro whose body refers back to a name that is already
    in this set evaluates that name to zero instead of expanding it again.
*/

#[derive(Debug, Default)]
pub struct Depleted<'a> {
    names: HashSet<&'a str>,
}

impl<'a> Depleted<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'a str) {
        self.names.insert(name);
    }

    pub fn pop(&mut self, name: &str) {
        self.names.remove(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
