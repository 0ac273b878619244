// Per-call configuration

pub use spanfmt_lexer::Dialect;

/// What to do with arguments left over once the template is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurplusPolicy {
    /// Leave them unused (logged at debug level)
    #[default]
    Ignore,
    /// Fail the call with `FormatError::SurplusArguments`
    Reject,
}

/// Formatting options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Placeholder syntax
    pub dialect: Dialect,

    /// Handling of arguments without a placeholder
    pub surplus: SurplusPolicy,
}

impl Options {
    pub const fn new() -> Self {
        Self {
            dialect: Dialect::Brace,
            surplus: SurplusPolicy::Ignore,
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Reject surplus arguments
    pub fn strict(mut self) -> Self {
        self.surplus = SurplusPolicy::Reject;
        self
    }
}
