/**
 * Condition Expression AST
 */

/// Span of a node inside the expression source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }
}

/// Literal values written directly in an expression
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AST {
    LiteralPrimitive(LiteralPrimitive),
    PropertyRead(PropertyRead),
    KeyedRead(KeyedRead),
    MemberRead(MemberRead),
    Binary(Binary),
    PrefixNot(PrefixNot),
    Unary(Unary),
    Conditional(Conditional),
}

impl AST {
    pub fn span(&self) -> ParseSpan {
        match self {
            AST::LiteralPrimitive(node) => node.span,
            AST::PropertyRead(node) => node.span,
            AST::KeyedRead(node) => node.span,
            AST::MemberRead(node) => node.span,
            AST::Binary(node) => node.span,
            AST::PrefixNot(node) => node.span,
            AST::Unary(node) => node.span,
            AST::Conditional(node) => node.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralPrimitive {
    pub span: ParseSpan,
    pub value: LiteralValue,
}

/// Data path read, e.g. `user.name` or `global.settings.theme`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRead {
    pub span: ParseSpan,
    pub path: String,
}

/// `receiver[key]`
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRead {
    pub span: ParseSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
}

/// `receiver.a.b` after a bracket or parenthesis, e.g. `users[0].name`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRead {
    pub span: ParseSpan,
    pub receiver: Box<AST>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub span: ParseSpan,
    pub operation: String,
    pub left: Box<AST>,
    pub right: Box<AST>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixNot {
    pub span: ParseSpan,
    pub expression: Box<AST>,
}

/// Unary `-` / `+`
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub span: ParseSpan,
    pub operator: String,
    pub expr: Box<AST>,
}

/// `condition ? true_exp : false_exp`
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub span: ParseSpan,
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}
