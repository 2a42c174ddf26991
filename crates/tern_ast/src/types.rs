//! Flag sets and small value types attached to tokens and nodes.

use std::fmt;

bitflags::bitflags! {
    /// Per-node flags. The `*_CONTEXT` bits double as the parser's grammar
    /// context and are stamped onto nodes created under that context.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE                          = 0;
        const LET                           = 1 << 0;
        const CONST                         = 1 << 1;
        const USING                         = 1 << 2;
        const AWAIT_USING                   = 1 << 3;
        const NESTED_NAMESPACE              = 1 << 4;
        const NAMESPACE                     = 1 << 5;
        const OPTIONAL_CHAIN                = 1 << 6;
        const GLOBAL_AUGMENTATION           = 1 << 7;
        const DISALLOW_IN_CONTEXT           = 1 << 8;
        const YIELD_CONTEXT                 = 1 << 9;
        const DECORATOR_CONTEXT             = 1 << 10;
        const AWAIT_CONTEXT                 = 1 << 11;
        const DISALLOW_CONDITIONAL_TYPES_CONTEXT = 1 << 12;
        /// A placeholder synthesized where a construct was expected.
        const MISSING                       = 1 << 13;
        /// A diagnostic was reported at this node itself.
        const THIS_NODE_HAS_ERROR           = 1 << 14;
        /// A diagnostic was reported while this node's production was active.
        const THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR = 1 << 15;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits() | Self::USING.bits() | Self::AWAIT_USING.bits();

        const CONTEXT_FLAGS = Self::DISALLOW_IN_CONTEXT.bits()
            | Self::YIELD_CONTEXT.bits()
            | Self::DECORATOR_CONTEXT.bits()
            | Self::AWAIT_CONTEXT.bits()
            | Self::DISALLOW_CONDITIONAL_TYPES_CONTEXT.bits();
    }
}

bitflags::bitflags! {
    /// Modifiers seen on a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const NONE              = 0;
        const EXPORT            = 1 << 0;
        const AMBIENT           = 1 << 1;
        const PUBLIC            = 1 << 2;
        const PRIVATE           = 1 << 3;
        const PROTECTED         = 1 << 4;
        const STATIC            = 1 << 5;
        const READONLY          = 1 << 6;
        const ACCESSOR          = 1 << 7;
        const ABSTRACT          = 1 << 8;
        const ASYNC             = 1 << 9;
        const DEFAULT           = 1 << 10;
        const CONST             = 1 << 11;
        const OVERRIDE          = 1 << 12;
        const IN                = 1 << 13;
        const OUT               = 1 << 14;
        const DECORATOR         = 1 << 15;

        const ACCESSIBILITY_MODIFIER = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
    }
}

impl ModifierFlags {
    /// The flag a modifier keyword sets, or `NONE` for anything else.
    pub fn from_modifier_kind(kind: crate::SyntaxKind) -> ModifierFlags {
        use crate::SyntaxKind;
        match kind {
            SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
            SyntaxKind::DeclareKeyword => ModifierFlags::AMBIENT,
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
            SyntaxKind::AccessorKeyword => ModifierFlags::ACCESSOR,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
            SyntaxKind::DefaultKeyword => ModifierFlags::DEFAULT,
            SyntaxKind::ConstKeyword => ModifierFlags::CONST,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            SyntaxKind::InKeyword => ModifierFlags::IN,
            SyntaxKind::OutKeyword => ModifierFlags::OUT,
            _ => ModifierFlags::NONE,
        }
    }
}

bitflags::bitflags! {
    /// Lexical facts about the current token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                              = 0;
        const PRECEDING_LINE_BREAK              = 1 << 0;
        const PRECEDING_JSDOC_COMMENT           = 1 << 1;
        const UNTERMINATED                      = 1 << 2;
        const EXTENDED_UNICODE_ESCAPE           = 1 << 3;
        const SCIENTIFIC                        = 1 << 4;
        const OCTAL                             = 1 << 5;
        const HEX_SPECIFIER                     = 1 << 6;
        const BINARY_SPECIFIER                  = 1 << 7;
        const OCTAL_SPECIFIER                   = 1 << 8;
        const CONTAINS_SEPARATOR                = 1 << 9;
        const UNICODE_ESCAPE                    = 1 << 10;
        const CONTAINS_INVALID_ESCAPE           = 1 << 11;
        const CONTAINS_LEADING_ZERO             = 1 << 12;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::OCTAL.bits()
            | Self::CONTAINS_LEADING_ZERO.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();

        const TEMPLATE_LITERAL_LIKE_FLAGS = Self::EXTENDED_UNICODE_ESCAPE.bits()
            | Self::UNICODE_ESCAPE.bits()
            | Self::CONTAINS_INVALID_ESCAPE.bits();
    }
}

/// Creation-order id of a node within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Standard source, or source where `<` at expression position opens a
/// JSX element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageVariant {
    #[default]
    Standard,
    Jsx,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind;

    #[test]
    fn test_modifier_flags_from_kind() {
        assert_eq!(ModifierFlags::from_modifier_kind(SyntaxKind::StaticKeyword), ModifierFlags::STATIC);
        assert_eq!(ModifierFlags::from_modifier_kind(SyntaxKind::Identifier), ModifierFlags::NONE);
        assert!(ModifierFlags::ACCESSIBILITY_MODIFIER.contains(ModifierFlags::PROTECTED));
    }

    #[test]
    fn test_context_flags() {
        let flags = NodeFlags::AWAIT_CONTEXT | NodeFlags::LET;
        assert_eq!(flags & NodeFlags::CONTEXT_FLAGS, NodeFlags::AWAIT_CONTEXT);
        assert!(NodeFlags::BLOCK_SCOPED.contains(NodeFlags::CONST));
    }
}
