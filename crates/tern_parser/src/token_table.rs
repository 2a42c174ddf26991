//! Token classification table.
//!
//! Grammar-entry decisions ("can this token start a type?", "how tightly
//! does this operator bind?") are answered here, from one static array
//! indexed by `SyntaxKind as usize`. Node kinds fall outside the array and
//! classify as nothing.

use tern_ast::syntax_kind::SyntaxKind;

/// Operator precedence tiers, lowest first. Value and type expressions
/// share the same scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Comma = 0,
    Spread = 1,
    Yield = 2,
    Assignment = 3,
    Conditional = 4,
    NullishCoalescing = 5,
    LogicalOr = 6,
    LogicalAnd = 7,
    BitwiseOr = 8,
    BitwiseXor = 9,
    BitwiseAnd = 10,
    Equality = 11,
    Relational = 12,
    Shift = 13,
    Additive = 14,
    Multiplicative = 15,
    Exponentiation = 16,
    Unary = 17,
    Update = 18,
    LeftHandSide = 19,
    Member = 20,
    Primary = 21,
    Highest = 22,
    Invalid = 255,
}

impl OperatorPrecedence {
    /// The next tighter tier; `Highest` stays `Highest`.
    pub const fn next(self) -> OperatorPrecedence {
        use OperatorPrecedence::*;
        match self {
            Comma => Spread,
            Spread => Yield,
            Yield => Assignment,
            Assignment => Conditional,
            Conditional => NullishCoalescing,
            NullishCoalescing => LogicalOr,
            LogicalOr => LogicalAnd,
            LogicalAnd => BitwiseOr,
            BitwiseOr => BitwiseXor,
            BitwiseXor => BitwiseAnd,
            BitwiseAnd => Equality,
            Equality => Relational,
            Relational => Shift,
            Shift => Additive,
            Additive => Multiplicative,
            Multiplicative => Exponentiation,
            Exponentiation => Unary,
            Unary => Update,
            Update => LeftHandSide,
            LeftHandSide => Member,
            Member => Primary,
            Primary | Highest => Highest,
            Invalid => Invalid,
        }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        !matches!(self, OperatorPrecedence::Invalid)
    }
}

bitflags::bitflags! {
    /// Boolean attributes of a token kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TokenClass: u16 {
        const START_EXPRESSION   = 1 << 0;
        const START_TYPE         = 1 << 1;
        const START_STATEMENT    = 1 << 2;
        const START_DECLARATION  = 1 << 3;
        const START_PARAMETER    = 1 << 4;
        /// Identifiers, keywords, string/numeric literals and private names.
        const START_PROPERTY_NAME = 1 << 5;
        const MODIFIER           = 1 << 6;
        const FOLLOWS_MODIFIER   = 1 << 7;
        const RESERVED_WORD      = 1 << 8;
        /// Binary operator that groups right to left.
        const RIGHT_ASSOCIATIVE  = 1 << 9;
        /// Primary expressions that may be called or indexed. `import`
        /// is excluded since it needs the token after it.
        const START_LEFT_HAND_SIDE = 1 << 10;
    }
}

/// Everything the table knows about one token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAttrs {
    pub class: TokenClass,
    /// Tier as an infix operator in value expressions.
    pub binary_precedence: OperatorPrecedence,
    /// Tier as a postfix form (member access, call, index, `!`, `++`).
    pub postfix_precedence: OperatorPrecedence,
    /// Tier as an operator in type expressions.
    pub type_precedence: OperatorPrecedence,
}

impl TokenAttrs {
    pub const EMPTY: TokenAttrs = TokenAttrs {
        class: TokenClass::empty(),
        binary_precedence: OperatorPrecedence::Invalid,
        postfix_precedence: OperatorPrecedence::Invalid,
        type_precedence: OperatorPrecedence::Invalid,
    };

    #[inline]
    pub fn can_start_expression(&self) -> bool {
        self.class.contains(TokenClass::START_EXPRESSION)
    }

    #[inline]
    pub fn can_start_left_hand_side(&self) -> bool {
        self.class.contains(TokenClass::START_LEFT_HAND_SIDE)
    }

    #[inline]
    pub fn can_start_type(&self) -> bool {
        self.class.contains(TokenClass::START_TYPE)
    }

    #[inline]
    pub fn can_start_statement(&self) -> bool {
        self.class.contains(TokenClass::START_STATEMENT)
    }

    #[inline]
    pub fn can_start_declaration(&self) -> bool {
        self.class.contains(TokenClass::START_DECLARATION)
    }

    #[inline]
    pub fn can_start_parameter(&self) -> bool {
        self.class.contains(TokenClass::START_PARAMETER)
    }

    #[inline]
    pub fn can_start_property_name(&self) -> bool {
        self.class.contains(TokenClass::START_PROPERTY_NAME)
    }

    #[inline]
    pub fn is_modifier_keyword(&self) -> bool {
        self.class.contains(TokenClass::MODIFIER)
    }

    #[inline]
    pub fn can_follow_modifier(&self) -> bool {
        self.class.contains(TokenClass::FOLLOWS_MODIFIER)
    }

    #[inline]
    pub fn is_reserved_word(&self) -> bool {
        self.class.contains(TokenClass::RESERVED_WORD)
    }

    #[inline]
    pub fn is_right_associative(&self) -> bool {
        self.class.contains(TokenClass::RIGHT_ASSOCIATIVE)
    }
}

static TOKEN_TABLE: [TokenAttrs; SyntaxKind::TOKEN_COUNT] = build_table();

const fn build_table() -> [TokenAttrs; SyntaxKind::TOKEN_COUNT] {
    let mut table = [TokenAttrs::EMPTY; SyntaxKind::TOKEN_COUNT];
    let mut i = 0;
    while i < SyntaxKind::TOKEN_COUNT {
        let kind = SyntaxKind::TOKENS[i];
        table[i] = TokenAttrs {
            class: classify(kind),
            binary_precedence: binary_precedence_of(kind),
            postfix_precedence: postfix_precedence_of(kind),
            type_precedence: type_precedence_of(kind),
        };
        i += 1;
    }
    table
}

/// Attributes of `kind`.
#[inline]
pub fn attrs(kind: SyntaxKind) -> &'static TokenAttrs {
    TOKEN_TABLE.get(kind as usize).unwrap_or(&TokenAttrs::EMPTY)
}

#[inline]
pub fn binary_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    attrs(kind).binary_precedence
}

#[inline]
pub fn type_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    attrs(kind).type_precedence
}

const fn classify(kind: SyntaxKind) -> TokenClass {
    use SyntaxKind::*;

    let mut class = TokenClass::empty();
    // Identifiers and non-reserved words behave like identifiers everywhere
    // a name may appear.
    let identifier_like = kind.is_identifier_or_contextual_keyword();

    if identifier_like
        || matches!(
            kind,
            NumericLiteral
                | BigIntLiteral
                | StringLiteral
                | NoSubstitutionTemplateLiteral
                | TemplateHead
                | RegularExpressionLiteral
                | PrivateIdentifier
                | OpenParenToken
                | OpenBracketToken
                | OpenBraceToken
                | SlashToken
                | SlashEqualsToken
                | PlusToken
                | MinusToken
                | TildeToken
                | ExclamationToken
                | PlusPlusToken
                | MinusMinusToken
                | LessThanToken
                | AtToken
                | ThisKeyword
                | SuperKeyword
                | NullKeyword
                | TrueKeyword
                | FalseKeyword
                | FunctionKeyword
                | ClassKeyword
                | NewKeyword
                | DeleteKeyword
                | VoidKeyword
                | TypeOfKeyword
                | ImportKeyword
        )
    {
        class = class.union(TokenClass::START_EXPRESSION);
    }

    if matches!(
        kind,
        Identifier
            | NumericLiteral
            | BigIntLiteral
            | StringLiteral
            | NoSubstitutionTemplateLiteral
            | TemplateHead
            | RegularExpressionLiteral
            | OpenParenToken
            | OpenBracketToken
            | OpenBraceToken
            | SlashToken
            | SlashEqualsToken
            | ThisKeyword
            | SuperKeyword
            | NullKeyword
            | TrueKeyword
            | FalseKeyword
            | FunctionKeyword
            | ClassKeyword
            | NewKeyword
    ) {
        class = class.union(TokenClass::START_LEFT_HAND_SIDE);
    }

    if identifier_like
        || matches!(
            kind,
            NumericLiteral
                | BigIntLiteral
                | StringLiteral
                | NoSubstitutionTemplateLiteral
                | TemplateHead
                | OpenBraceToken
                | OpenBracketToken
                | OpenParenToken
                | LessThanToken
                | BarToken
                | AmpersandToken
                | AsteriskToken
                | QuestionToken
                | ExclamationToken
                | DotDotDotToken
                | MinusToken
                | NullKeyword
                | ThisKeyword
                | TypeOfKeyword
                | VoidKeyword
                | TrueKeyword
                | FalseKeyword
                | NewKeyword
                | ImportKeyword
                | FunctionKeyword
        )
    {
        class = class.union(TokenClass::START_TYPE);
    }

    if matches!(
        kind,
        AtToken
            | SemicolonToken
            | OpenBraceToken
            | VarKeyword
            | LetKeyword
            | FunctionKeyword
            | ClassKeyword
            | EnumKeyword
            | IfKeyword
            | DoKeyword
            | WhileKeyword
            | ForKeyword
            | ContinueKeyword
            | BreakKeyword
            | ReturnKeyword
            | WithKeyword
            | SwitchKeyword
            | ThrowKeyword
            | TryKeyword
            | DebuggerKeyword
            | CatchKeyword
            | FinallyKeyword
            | AsyncKeyword
            | DeclareKeyword
            | InterfaceKeyword
            | ModuleKeyword
            | NamespaceKeyword
            | TypeKeyword
            | GlobalKeyword
    ) {
        class = class.union(TokenClass::START_STATEMENT);
    }

    if matches!(
        kind,
        AtToken
            | VarKeyword
            | LetKeyword
            | ConstKeyword
            | UsingKeyword
            | AwaitKeyword
            | FunctionKeyword
            | ClassKeyword
            | EnumKeyword
            | InterfaceKeyword
            | TypeKeyword
            | ModuleKeyword
            | NamespaceKeyword
            | GlobalKeyword
            | ImportKeyword
            | ExportKeyword
            | DeclareKeyword
            | AbstractKeyword
            | AccessorKeyword
            | AsyncKeyword
            | PublicKeyword
            | PrivateKeyword
            | ProtectedKeyword
            | ReadonlyKeyword
            | StaticKeyword
            | OverrideKeyword
    ) {
        class = class.union(TokenClass::START_DECLARATION);
    }

    if identifier_like || matches!(kind, DotDotDotToken | AtToken | ThisKeyword | OpenBracketToken | OpenBraceToken) {
        class = class.union(TokenClass::START_PARAMETER);
    }

    let property_name =
        kind.is_identifier_or_keyword() || matches!(kind, StringLiteral | NumericLiteral | BigIntLiteral | PrivateIdentifier);
    if property_name {
        class = class.union(TokenClass::START_PROPERTY_NAME);
    }

    if property_name || matches!(kind, OpenBracketToken | OpenBraceToken | AsteriskToken | DotDotDotToken) {
        class = class.union(TokenClass::FOLLOWS_MODIFIER);
    }

    if matches!(
        kind,
        AbstractKeyword
            | AccessorKeyword
            | AsyncKeyword
            | ConstKeyword
            | DeclareKeyword
            | DefaultKeyword
            | ExportKeyword
            | InKeyword
            | OutKeyword
            | OverrideKeyword
            | PrivateKeyword
            | ProtectedKeyword
            | PublicKeyword
            | ReadonlyKeyword
            | StaticKeyword
    ) {
        class = class.union(TokenClass::MODIFIER);
    }

    if kind.is_reserved_word() {
        class = class.union(TokenClass::RESERVED_WORD);
    }

    if kind.is_assignment_operator() || matches!(kind, AsteriskAsteriskToken | QuestionToken) {
        class = class.union(TokenClass::RIGHT_ASSOCIATIVE);
    }

    class
}

const fn binary_precedence_of(kind: SyntaxKind) -> OperatorPrecedence {
    use SyntaxKind::*;

    if kind.is_assignment_operator() {
        return OperatorPrecedence::Assignment;
    }
    match kind {
        CommaToken => OperatorPrecedence::Comma,
        QuestionToken => OperatorPrecedence::Conditional,
        QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        BarBarToken => OperatorPrecedence::LogicalOr,
        AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        BarToken => OperatorPrecedence::BitwiseOr,
        CaretToken => OperatorPrecedence::BitwiseXor,
        AmpersandToken => OperatorPrecedence::BitwiseAnd,
        EqualsEqualsToken | ExclamationEqualsToken | EqualsEqualsEqualsToken | ExclamationEqualsEqualsToken => {
            OperatorPrecedence::Equality
        }
        LessThanToken
        | GreaterThanToken
        | LessThanEqualsToken
        | GreaterThanEqualsToken
        | InstanceOfKeyword
        | InKeyword
        | AsKeyword
        | SatisfiesKeyword => OperatorPrecedence::Relational,
        LessThanLessThanToken | GreaterThanGreaterThanToken | GreaterThanGreaterThanGreaterThanToken => {
            OperatorPrecedence::Shift
        }
        PlusToken | MinusToken => OperatorPrecedence::Additive,
        AsteriskToken | SlashToken | PercentToken => OperatorPrecedence::Multiplicative,
        AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

const fn postfix_precedence_of(kind: SyntaxKind) -> OperatorPrecedence {
    use SyntaxKind::*;

    match kind {
        DotToken
        | QuestionDotToken
        | OpenBracketToken
        | OpenParenToken
        | ExclamationToken
        | LessThanToken
        | NoSubstitutionTemplateLiteral
        | TemplateHead => OperatorPrecedence::Member,
        PlusPlusToken | MinusMinusToken => OperatorPrecedence::Update,
        _ => OperatorPrecedence::Invalid,
    }
}

const fn type_precedence_of(kind: SyntaxKind) -> OperatorPrecedence {
    use SyntaxKind::*;

    match kind {
        ExtendsKeyword => OperatorPrecedence::Conditional,
        BarToken => OperatorPrecedence::BitwiseOr,
        AmpersandToken => OperatorPrecedence::BitwiseAnd,
        OpenBracketToken => OperatorPrecedence::Member,
        _ => OperatorPrecedence::Invalid,
    }
}
