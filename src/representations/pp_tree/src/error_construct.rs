use crate::Sequence;
use diagnostics::Severity;

/// `#error` or `#warning` with its free text, joined across spliced
/// lines.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorConstruct<'a> {
    pub sequence: Sequence<'a>,
    pub severity: Severity,
    pub text: String,
}
