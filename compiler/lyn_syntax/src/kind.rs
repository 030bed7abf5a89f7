//! The closed set of syntax node kinds.
//!
//! The grammar fixes this set, so it is a plain enum and all traversal
//! dispatch is ordinary pattern matching. Each kind has a fixed child
//! arity; sequence kinds hold however many children they were built with,
//! but that count is fixed per node instance too.

/// Kind tag carried by every green node.
///
/// Child slot layouts are listed in [`slot`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SyntaxKind {
    /// Root of a file: import list and top-level block.
    TranslationUnit,
    /// Sequence of import directives.
    ImportList,
    /// One import directive; the dotted module path is payload.
    Import,
    /// Ordered statement sequence, optionally carrying a scope.
    Block,
    /// `type declarator, declarator, ...` statement.
    VariableDecl,
    /// Sequence of declarators under one variable declaration.
    DeclaratorList,
    /// One declared name with an optional initializer.
    Declarator,
    /// Class declaration: name and body block.
    ClassDecl,
    /// Method declaration: name, return type, parameters, generics, body.
    MethodDecl,
    /// Constructor declaration: parameters and body.
    ConstructorDecl,
    /// Sequence of parameters.
    ParameterList,
    /// One parameter: declared type and name.
    Parameter,
    /// Sequence of generic parameters.
    GenericParameterList,
    /// One generic parameter name.
    GenericParameter,
    /// Selective flow: if, if-else, or while; sub-kind is payload.
    SelectiveFlow,
    /// For loop: induction type, name, iterable, body.
    For,
    /// Return statement with optional value.
    Return,
    /// Assignment statement: target and value.
    Assignment,
    /// Binary expression; the operator is payload.
    Binary,
    /// Call expression: target and argument list.
    Call,
    /// Sequence of call arguments.
    ArgumentList,
    /// Member access off a receiver; the member name is payload.
    MemberAccess,
    /// A read of a named variable.
    VariableRef,
    IntegerLiteral,
    RealLiteral,
    BooleanLiteral,
    StringLiteral,
    /// A reference to a type by name, decorated with the resolved type
    /// once type binding has run.
    TypeRef,
    /// A name in declaration position.
    Identifier,
}

/// Families group kinds for dispatch and documentation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum KindFamily {
    Unit,
    Sequence,
    Declaration,
    Flow,
    Statement,
    Expression,
    Leaf,
}

/// Child-count contract of a kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Arity {
    /// Exactly this many slots, always; absent optional children occupy
    /// their slot as an explicit empty entry.
    Fixed(usize),
    /// As many slots as the node was built with.
    Variadic,
}

impl SyntaxKind {
    pub fn family(self) -> KindFamily {
        use SyntaxKind::*;
        match self {
            TranslationUnit => KindFamily::Unit,
            ImportList | Block | DeclaratorList | ParameterList | GenericParameterList
            | ArgumentList => KindFamily::Sequence,
            VariableDecl | Declarator | ClassDecl | MethodDecl | ConstructorDecl | Parameter => {
                KindFamily::Declaration
            }
            SelectiveFlow | For => KindFamily::Flow,
            Return | Assignment => KindFamily::Statement,
            Binary | Call | MemberAccess | VariableRef | IntegerLiteral | RealLiteral
            | BooleanLiteral | StringLiteral => KindFamily::Expression,
            TypeRef | Identifier | Import | GenericParameter => KindFamily::Leaf,
        }
    }

    pub fn arity(self) -> Arity {
        use SyntaxKind::*;
        match self {
            ImportList | Block | DeclaratorList | ParameterList | GenericParameterList
            | ArgumentList => Arity::Variadic,
            Import | GenericParameter | VariableRef | IntegerLiteral | RealLiteral
            | BooleanLiteral | StringLiteral | TypeRef | Identifier => Arity::Fixed(0),
            Return | MemberAccess => Arity::Fixed(1),
            TranslationUnit | VariableDecl | Declarator | ClassDecl | ConstructorDecl
            | Parameter | Assignment | Binary | Call => Arity::Fixed(2),
            SelectiveFlow => Arity::Fixed(3),
            For => Arity::Fixed(4),
            MethodDecl => Arity::Fixed(5),
        }
    }

    /// Kinds that can carry an attached scope after scope attachment.
    pub fn can_bear_scope(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block | SyntaxKind::MethodDecl | SyntaxKind::ConstructorDecl
        )
    }
}

/// Sub-kind of a [`SyntaxKind::SelectiveFlow`] node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FlowKind {
    If,
    IfElse,
    While,
}

/// Binary expression operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    And,
    Or,
}

impl BinaryOp {
    /// Parse an operator from its source symbol.
    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Subtract),
            "*" => Some(BinaryOp::Multiply),
            "/" => Some(BinaryOp::Divide),
            "%" => Some(BinaryOp::Modulo),
            "==" => Some(BinaryOp::Equal),
            "!=" => Some(BinaryOp::NotEqual),
            "<" => Some(BinaryOp::Less),
            "<=" => Some(BinaryOp::LessOrEqual),
            ">" => Some(BinaryOp::Greater),
            ">=" => Some(BinaryOp::GreaterOrEqual),
            "and" => Some(BinaryOp::And),
            "or" => Some(BinaryOp::Or),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

/// Fixed child-slot layout for fixed-arity kinds.
pub mod slot {
    pub const UNIT_IMPORTS: usize = 0;
    pub const UNIT_BODY: usize = 1;

    pub const VAR_DECL_TYPE: usize = 0;
    pub const VAR_DECL_DECLARATORS: usize = 1;

    pub const DECLARATOR_NAME: usize = 0;
    pub const DECLARATOR_INIT: usize = 1;

    pub const CLASS_NAME: usize = 0;
    pub const CLASS_BODY: usize = 1;

    pub const METHOD_NAME: usize = 0;
    pub const METHOD_RETURN_TYPE: usize = 1;
    pub const METHOD_PARAMS: usize = 2;
    pub const METHOD_GENERICS: usize = 3;
    pub const METHOD_BODY: usize = 4;

    pub const CTOR_PARAMS: usize = 0;
    pub const CTOR_BODY: usize = 1;

    pub const PARAM_TYPE: usize = 0;
    pub const PARAM_NAME: usize = 1;

    pub const FLOW_CONDITION: usize = 0;
    pub const FLOW_PRIMARY: usize = 1;
    pub const FLOW_ALTERNATIVE: usize = 2;

    pub const FOR_TYPE: usize = 0;
    pub const FOR_NAME: usize = 1;
    pub const FOR_ITERABLE: usize = 2;
    pub const FOR_BODY: usize = 3;

    pub const RETURN_VALUE: usize = 0;

    pub const ASSIGN_TARGET: usize = 0;
    pub const ASSIGN_VALUE: usize = 1;

    pub const BINARY_LEFT: usize = 0;
    pub const BINARY_RIGHT: usize = 1;

    pub const CALL_TARGET: usize = 0;
    pub const CALL_ARGS: usize = 1;

    pub const MEMBER_RECEIVER: usize = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_matches_slot_layout() {
        assert_eq!(SyntaxKind::TranslationUnit.arity(), Arity::Fixed(2));
        assert_eq!(SyntaxKind::SelectiveFlow.arity(), Arity::Fixed(3));
        assert_eq!(SyntaxKind::MethodDecl.arity(), Arity::Fixed(5));
        assert_eq!(SyntaxKind::Block.arity(), Arity::Variadic);
        assert_eq!(SyntaxKind::VariableRef.arity(), Arity::Fixed(0));
    }

    #[test]
    fn test_scope_bearing_kinds() {
        assert!(SyntaxKind::Block.can_bear_scope());
        assert!(SyntaxKind::MethodDecl.can_bear_scope());
        assert!(SyntaxKind::ConstructorDecl.can_bear_scope());
        assert!(!SyntaxKind::ClassDecl.can_bear_scope());
        assert!(!SyntaxKind::VariableRef.can_bear_scope());
    }

    #[test]
    fn test_operator_round_trip() {
        for op in [
            BinaryOp::Add,
            BinaryOp::Subtract,
            BinaryOp::Equal,
            BinaryOp::LessOrEqual,
            BinaryOp::Or,
        ] {
            assert_eq!(BinaryOp::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(BinaryOp::from_symbol("**"), None);
    }

    #[test]
    fn test_flow_family() {
        assert_eq!(SyntaxKind::SelectiveFlow.family(), KindFamily::Flow);
        assert_eq!(SyntaxKind::For.family(), KindFamily::Flow);
        assert_eq!(SyntaxKind::Binary.family(), KindFamily::Expression);
    }
}
