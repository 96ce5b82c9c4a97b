#[derive(Clone, Debug, Default)]
pub struct LexerOptions {
    /// Lets ordinary string literals run across line terminators.
    pub multi_line_strings: bool,
}
