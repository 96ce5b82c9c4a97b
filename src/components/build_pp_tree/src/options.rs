use derive_more::IsVariant;

/// What happens when `#define` names a macro that is already defined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, IsVariant)]
pub enum RedefinitionPolicy {
    /// Identical redefinitions are accepted, differing ones are errors
    #[default]
    ErrorOnDifferingBody,
    ErrorOnAny,
}

#[derive(Clone, Debug)]
pub struct ParserOptions {
    pub redefinition: RedefinitionPolicy,

    /// Decide which conditional branches are taken while parsing
    pub evaluate_conditions: bool,

    /// Turn failing directives into error statements instead of aborting
    pub recover: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            redefinition: RedefinitionPolicy::default(),
            evaluate_conditions: true,
            recover: false,
        }
    }
}
