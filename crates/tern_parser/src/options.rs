//! Parse options.

use tern_ast::types::LanguageVariant;

/// Switches that each relax one acceptance rule. `Default` is the standard
/// grammar with every relaxation off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub language_variant: LanguageVariant,
    /// `if x {}`, `while x {}` and `switch x {}` without parentheses.
    pub allow_omitted_condition_parens: bool,
    /// Two statements on one line without a `;` between them.
    pub allow_omitted_semicolons: bool,
    /// `try {}` with neither `catch` nor `finally`.
    pub allow_bare_try: bool,
}

impl ParseOptions {
    pub fn jsx() -> Self {
        Self {
            language_variant: LanguageVariant::Jsx,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_jsx(&self) -> bool {
        self.language_variant == LanguageVariant::Jsx
    }
}
