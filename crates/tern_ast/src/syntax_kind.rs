//! `SyntaxKind`: every token and node kind, in one `u16` enum.
//!
//! Token kinds come first and are contiguous so per-token tables can be
//! indexed directly by `kind as usize` (see [`SyntaxKind::TOKEN_COUNT`]).

macro_rules! syntax_kinds {
    (
        tokens { $($token:ident,)* }
        punctuation { $($punct:ident = $punct_text:literal,)* }
        names { $($name:ident,)* }
        keywords { $($keyword:ident = $keyword_text:literal,)* }
        nodes { $($node:ident,)* }
    ) => {
        /// The kind of a token or node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($token,)*
            $($punct,)*
            $($name,)*
            $($keyword,)*
            $($node,)*
        }

        impl SyntaxKind {
            /// Every token kind in discriminant order.
            pub const TOKENS: &'static [SyntaxKind] = &[
                $(SyntaxKind::$token,)*
                $(SyntaxKind::$punct,)*
                $(SyntaxKind::$name,)*
                $(SyntaxKind::$keyword,)*
            ];

            /// Source text of a punctuator, or `None`.
            pub const fn punctuation_text(self) -> Option<&'static str> {
                match self {
                    $(SyntaxKind::$punct => Some($punct_text),)*
                    _ => None,
                }
            }

            /// Source text of a keyword, or `None`.
            pub const fn keyword_text(self) -> Option<&'static str> {
                match self {
                    $(SyntaxKind::$keyword => Some($keyword_text),)*
                    _ => None,
                }
            }

            /// The keyword spelled `text`, if any.
            pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
                match text {
                    $($keyword_text => Some(SyntaxKind::$keyword),)*
                    _ => None,
                }
            }
        }
    };
}

syntax_kinds! {
    tokens {
        Unknown,
        EndOfFileToken,
        SingleLineCommentTrivia,
        MultiLineCommentTrivia,
        NewLineTrivia,
        WhitespaceTrivia,
        ShebangTrivia,
        ConflictMarkerTrivia,
        NumericLiteral,
        BigIntLiteral,
        StringLiteral,
        JsxText,
        JsxTextAllWhiteSpaces,
        RegularExpressionLiteral,
        NoSubstitutionTemplateLiteral,
        TemplateHead,
        TemplateMiddle,
        TemplateTail,
    }
    punctuation {
        OpenBraceToken = "{",
        CloseBraceToken = "}",
        OpenParenToken = "(",
        CloseParenToken = ")",
        OpenBracketToken = "[",
        CloseBracketToken = "]",
        DotToken = ".",
        DotDotDotToken = "...",
        SemicolonToken = ";",
        CommaToken = ",",
        QuestionDotToken = "?.",
        LessThanToken = "<",
        LessThanSlashToken = "</",
        GreaterThanToken = ">",
        LessThanEqualsToken = "<=",
        GreaterThanEqualsToken = ">=",
        EqualsEqualsToken = "==",
        ExclamationEqualsToken = "!=",
        EqualsEqualsEqualsToken = "===",
        ExclamationEqualsEqualsToken = "!==",
        EqualsGreaterThanToken = "=>",
        PlusToken = "+",
        MinusToken = "-",
        AsteriskToken = "*",
        AsteriskAsteriskToken = "**",
        SlashToken = "/",
        PercentToken = "%",
        PlusPlusToken = "++",
        MinusMinusToken = "--",
        LessThanLessThanToken = "<<",
        GreaterThanGreaterThanToken = ">>",
        GreaterThanGreaterThanGreaterThanToken = ">>>",
        AmpersandToken = "&",
        BarToken = "|",
        CaretToken = "^",
        ExclamationToken = "!",
        TildeToken = "~",
        AmpersandAmpersandToken = "&&",
        BarBarToken = "||",
        QuestionToken = "?",
        ColonToken = ":",
        AtToken = "@",
        QuestionQuestionToken = "??",
        BacktickToken = "`",
        HashToken = "#",
        EqualsToken = "=",
        PlusEqualsToken = "+=",
        MinusEqualsToken = "-=",
        AsteriskEqualsToken = "*=",
        AsteriskAsteriskEqualsToken = "**=",
        SlashEqualsToken = "/=",
        PercentEqualsToken = "%=",
        LessThanLessThanEqualsToken = "<<=",
        GreaterThanGreaterThanEqualsToken = ">>=",
        GreaterThanGreaterThanGreaterThanEqualsToken = ">>>=",
        AmpersandEqualsToken = "&=",
        BarEqualsToken = "|=",
        CaretEqualsToken = "^=",
        BarBarEqualsToken = "||=",
        AmpersandAmpersandEqualsToken = "&&=",
        QuestionQuestionEqualsToken = "??=",
    }
    names {
        Identifier,
        PrivateIdentifier,
    }
    keywords {
        // Reserved words
        BreakKeyword = "break",
        CaseKeyword = "case",
        CatchKeyword = "catch",
        ClassKeyword = "class",
        ConstKeyword = "const",
        ContinueKeyword = "continue",
        DebuggerKeyword = "debugger",
        DefaultKeyword = "default",
        DeleteKeyword = "delete",
        DoKeyword = "do",
        ElseKeyword = "else",
        EnumKeyword = "enum",
        ExportKeyword = "export",
        ExtendsKeyword = "extends",
        FalseKeyword = "false",
        FinallyKeyword = "finally",
        ForKeyword = "for",
        FunctionKeyword = "function",
        IfKeyword = "if",
        ImportKeyword = "import",
        InKeyword = "in",
        InstanceOfKeyword = "instanceof",
        NewKeyword = "new",
        NullKeyword = "null",
        ReturnKeyword = "return",
        SuperKeyword = "super",
        SwitchKeyword = "switch",
        ThisKeyword = "this",
        ThrowKeyword = "throw",
        TrueKeyword = "true",
        TryKeyword = "try",
        TypeOfKeyword = "typeof",
        VarKeyword = "var",
        VoidKeyword = "void",
        WhileKeyword = "while",
        WithKeyword = "with",
        // Strict mode reserved words
        ImplementsKeyword = "implements",
        InterfaceKeyword = "interface",
        LetKeyword = "let",
        PackageKeyword = "package",
        PrivateKeyword = "private",
        ProtectedKeyword = "protected",
        PublicKeyword = "public",
        StaticKeyword = "static",
        YieldKeyword = "yield",
        // Contextual keywords
        AbstractKeyword = "abstract",
        AccessorKeyword = "accessor",
        AsKeyword = "as",
        AssertsKeyword = "asserts",
        AssertKeyword = "assert",
        AnyKeyword = "any",
        AsyncKeyword = "async",
        AwaitKeyword = "await",
        BooleanKeyword = "boolean",
        ConstructorKeyword = "constructor",
        DeclareKeyword = "declare",
        GetKeyword = "get",
        InferKeyword = "infer",
        IntrinsicKeyword = "intrinsic",
        IsKeyword = "is",
        KeyOfKeyword = "keyof",
        ModuleKeyword = "module",
        NamespaceKeyword = "namespace",
        NeverKeyword = "never",
        OutKeyword = "out",
        ReadonlyKeyword = "readonly",
        RequireKeyword = "require",
        NumberKeyword = "number",
        ObjectKeyword = "object",
        SatisfiesKeyword = "satisfies",
        SetKeyword = "set",
        StringKeyword = "string",
        SymbolKeyword = "symbol",
        TypeKeyword = "type",
        UndefinedKeyword = "undefined",
        UniqueKeyword = "unique",
        UnknownKeyword = "unknown",
        UsingKeyword = "using",
        FromKeyword = "from",
        GlobalKeyword = "global",
        BigIntKeyword = "bigint",
        OverrideKeyword = "override",
        OfKeyword = "of",
    }
    nodes {
        // Names
        QualifiedName,
        ComputedPropertyName,
        // Signature elements
        TypeParameter,
        Parameter,
        Decorator,
        // Members
        PropertySignature,
        PropertyDeclaration,
        MethodSignature,
        MethodDeclaration,
        ClassStaticBlockDeclaration,
        Constructor,
        GetAccessor,
        SetAccessor,
        CallSignature,
        ConstructSignature,
        IndexSignature,
        // Types
        TypePredicate,
        TypeReference,
        FunctionType,
        ConstructorType,
        TypeQuery,
        TypeLiteral,
        ArrayType,
        TupleType,
        OptionalType,
        RestType,
        UnionType,
        IntersectionType,
        ConditionalType,
        InferType,
        ParenthesizedType,
        ThisType,
        TypeOperator,
        IndexedAccessType,
        MappedType,
        LiteralType,
        NamedTupleMember,
        TemplateLiteralType,
        TemplateLiteralTypeSpan,
        ImportType,
        // Binding patterns
        ObjectBindingPattern,
        ArrayBindingPattern,
        BindingElement,
        // Expressions
        ArrayLiteralExpression,
        ObjectLiteralExpression,
        PropertyAccessExpression,
        ElementAccessExpression,
        CallExpression,
        NewExpression,
        TaggedTemplateExpression,
        TypeAssertionExpression,
        ParenthesizedExpression,
        FunctionExpression,
        ArrowFunction,
        DeleteExpression,
        TypeOfExpression,
        VoidExpression,
        AwaitExpression,
        PrefixUnaryExpression,
        PostfixUnaryExpression,
        BinaryExpression,
        ConditionalExpression,
        TemplateExpression,
        YieldExpression,
        SpreadElement,
        ClassExpression,
        OmittedExpression,
        ExpressionWithTypeArguments,
        AsExpression,
        NonNullExpression,
        MetaProperty,
        SatisfiesExpression,
        TemplateSpan,
        SemicolonClassElement,
        // Statements
        Block,
        EmptyStatement,
        VariableStatement,
        ExpressionStatement,
        IfStatement,
        DoStatement,
        WhileStatement,
        ForStatement,
        ForInStatement,
        ForOfStatement,
        ContinueStatement,
        BreakStatement,
        ReturnStatement,
        WithStatement,
        SwitchStatement,
        LabeledStatement,
        ThrowStatement,
        TryStatement,
        DebuggerStatement,
        VariableDeclaration,
        VariableDeclarationList,
        FunctionDeclaration,
        ClassDeclaration,
        InterfaceDeclaration,
        TypeAliasDeclaration,
        EnumDeclaration,
        ModuleDeclaration,
        ModuleBlock,
        CaseBlock,
        NamespaceExportDeclaration,
        ImportEqualsDeclaration,
        ImportDeclaration,
        ImportClause,
        NamespaceImport,
        NamedImports,
        ImportSpecifier,
        ExportAssignment,
        ExportDeclaration,
        NamedExports,
        NamespaceExport,
        ExportSpecifier,
        MissingDeclaration,
        ExternalModuleReference,
        // JSX
        JsxElement,
        JsxSelfClosingElement,
        JsxOpeningElement,
        JsxClosingElement,
        JsxFragment,
        JsxOpeningFragment,
        JsxClosingFragment,
        JsxAttribute,
        JsxAttributes,
        JsxSpreadAttribute,
        JsxExpression,
        JsxNamespacedName,
        // Clauses
        CaseClause,
        DefaultClause,
        HeritageClause,
        CatchClause,
        ImportAttributes,
        ImportAttribute,
        // Object literal members
        PropertyAssignment,
        ShorthandPropertyAssignment,
        SpreadAssignment,
        EnumMember,
        // Top level
        SourceFile,
    }
}

impl SyntaxKind {
    pub const TOKEN_COUNT: usize = Self::TOKENS.len();
    pub const FIRST_TOKEN: SyntaxKind = SyntaxKind::Unknown;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::OfKeyword;
    pub const FIRST_TRIVIA: SyntaxKind = SyntaxKind::SingleLineCommentTrivia;
    pub const LAST_TRIVIA: SyntaxKind = SyntaxKind::ConflictMarkerTrivia;
    pub const FIRST_LITERAL: SyntaxKind = SyntaxKind::NumericLiteral;
    pub const LAST_LITERAL: SyntaxKind = SyntaxKind::NoSubstitutionTemplateLiteral;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::OfKeyword;
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::ImplementsKeyword;
    pub const LAST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::AbstractKeyword;
    pub const LAST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::OfKeyword;
    pub const FIRST_TYPE_NODE: SyntaxKind = SyntaxKind::TypePredicate;
    pub const LAST_TYPE_NODE: SyntaxKind = SyntaxKind::ImportType;

    #[inline]
    const fn between(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    #[inline]
    pub const fn is_token(self) -> bool {
        self.between(Self::FIRST_TOKEN, Self::LAST_TOKEN)
    }

    #[inline]
    pub const fn is_trivia(self) -> bool {
        self.between(Self::FIRST_TRIVIA, Self::LAST_TRIVIA)
    }

    #[inline]
    pub const fn is_literal(self) -> bool {
        self.between(Self::FIRST_LITERAL, Self::LAST_LITERAL)
    }

    #[inline]
    pub const fn is_template_literal_token(self) -> bool {
        self.between(SyntaxKind::NoSubstitutionTemplateLiteral, SyntaxKind::TemplateTail)
    }

    #[inline]
    pub const fn is_punctuation(self) -> bool {
        self.between(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    #[inline]
    pub const fn is_assignment_operator(self) -> bool {
        self.between(Self::FIRST_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        self.between(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    /// Words that may never be used as identifiers.
    #[inline]
    pub const fn is_reserved_word(self) -> bool {
        self.between(Self::FIRST_RESERVED_WORD, Self::LAST_RESERVED_WORD)
    }

    /// Words reserved only in strict mode.
    #[inline]
    pub const fn is_future_reserved_word(self) -> bool {
        self.between(Self::FIRST_FUTURE_RESERVED_WORD, Self::LAST_FUTURE_RESERVED_WORD)
    }

    /// Identifiers and every keyword that is not reserved.
    #[inline]
    pub const fn is_identifier_or_contextual_keyword(self) -> bool {
        matches!(self, SyntaxKind::Identifier)
            || self.between(Self::FIRST_FUTURE_RESERVED_WORD, Self::LAST_CONTEXTUAL_KEYWORD)
    }

    /// Identifiers and all keywords, which are valid property names.
    #[inline]
    pub const fn is_identifier_or_keyword(self) -> bool {
        matches!(self, SyntaxKind::Identifier) || self.is_keyword()
    }

    #[inline]
    pub const fn is_type_node(self) -> bool {
        self.between(Self::FIRST_TYPE_NODE, Self::LAST_TYPE_NODE)
    }

    /// Text of a punctuator or keyword.
    pub const fn text(self) -> Option<&'static str> {
        match self.punctuation_text() {
            Some(text) => Some(text),
            None => self.keyword_text(),
        }
    }

    /// How a token is named in "'{0}' expected." style messages.
    pub fn display_name(self) -> &'static str {
        if let Some(text) = self.text() {
            return text;
        }
        match self {
            SyntaxKind::EndOfFileToken => "end of file",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::PrivateIdentifier => "private identifier",
            SyntaxKind::NumericLiteral => "numeric literal",
            SyntaxKind::BigIntLiteral => "bigint literal",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::RegularExpressionLiteral => "regular expression literal",
            SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::TemplateMiddle
            | SyntaxKind::TemplateTail => "template literal",
            SyntaxKind::JsxText | SyntaxKind::JsxTextAllWhiteSpaces => "JSX text",
            _ => "token",
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
