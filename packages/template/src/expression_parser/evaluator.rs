/**
 * Condition Expression Evaluator
 *
 * Walks a parsed condition against the current scope. Paths that do not
 * resolve evaluate to `false`; everything else follows JavaScript value
 * semantics (truthiness, loose equality, numeric coercion).
 */
use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Value;

use super::ast::*;
use super::parser::Parser;
use crate::display::{format_number, to_js_string};
use crate::error::{Result, TemplateError};
use crate::path_resolver::{self, get_member, length_of};
use crate::scope::Scope;

/// Runtime value of a sub-expression.
///
/// Data arrays and objects stay borrowed from the render data where possible;
/// scalars are unpacked so operators never have to look inside a `Value`.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'a> {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Cow<'a, str>),
    Data(Cow<'a, Value>),
}

impl<'a> Operand<'a> {
    pub fn from_value(value: Cow<'a, Value>) -> Self {
        match value {
            Cow::Borrowed(value) => match value {
                Value::String(s) => Operand::String(Cow::Borrowed(s.as_str())),
                Value::Array(_) | Value::Object(_) => Operand::Data(Cow::Borrowed(value)),
                scalar => Self::from_scalar(scalar),
            },
            Cow::Owned(value) => match value {
                Value::String(s) => Operand::String(Cow::Owned(s)),
                Value::Array(_) | Value::Object(_) => Operand::Data(Cow::Owned(value)),
                scalar => Self::from_scalar(&scalar),
            },
        }
    }

    fn from_scalar(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Operand::Bool(*b),
            Value::Number(n) => Operand::Number(n.as_f64().unwrap_or(f64::NAN)),
            _ => Operand::Null,
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Operand::Undefined | Operand::Null)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Operand::Undefined | Operand::Null => false,
            Operand::Bool(b) => *b,
            Operand::Number(n) => *n != 0.0 && !n.is_nan(),
            Operand::String(s) => !s.is_empty(),
            Operand::Data(_) => true,
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Operand::Undefined => f64::NAN,
            Operand::Null => 0.0,
            Operand::Bool(b) => f64::from(u8::from(*b)),
            Operand::Number(n) => *n,
            Operand::String(s) => string_to_number(s),
            Operand::Data(value) => match value.as_ref() {
                Value::Array(_) => string_to_number(&to_js_string(value)),
                _ => f64::NAN,
            },
        }
    }

    pub fn to_js_string(&self) -> String {
        match self {
            Operand::Undefined => "undefined".to_string(),
            Operand::Null => "null".to_string(),
            Operand::Bool(b) => b.to_string(),
            Operand::Number(n) => format_number(*n),
            Operand::String(s) => s.to_string(),
            Operand::Data(value) => to_js_string(value),
        }
    }

    /// Arrays and objects become strings; scalars are returned as they are.
    fn to_primitive(self) -> Operand<'a> {
        match self {
            Operand::Data(value) => Operand::String(Cow::Owned(to_js_string(&value))),
            other => other,
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Operand::Undefined => 0,
            Operand::Null => 1,
            Operand::Bool(_) => 2,
            Operand::Number(_) => 3,
            Operand::String(_) => 4,
            Operand::Data(_) => 5,
        }
    }

    /// `===`. Data values compare structurally.
    pub fn strict_equals(&self, other: &Operand<'_>) -> bool {
        match (self, other) {
            (Operand::Undefined, Operand::Undefined) | (Operand::Null, Operand::Null) => true,
            (Operand::Bool(a), Operand::Bool(b)) => a == b,
            (Operand::Number(a), Operand::Number(b)) => a == b,
            (Operand::String(a), Operand::String(b)) => a == b,
            (Operand::Data(a), Operand::Data(b)) => a == b,
            _ => false,
        }
    }

    /// `==`
    pub fn loose_equals(&self, other: &Operand<'_>) -> bool {
        if self.type_rank() == other.type_rank() {
            return self.strict_equals(other);
        }
        match (self, other) {
            (a, b) if a.is_nullish() || b.is_nullish() => a.is_nullish() && b.is_nullish(),
            (Operand::Bool(_), _) => Operand::Number(self.to_number()).loose_equals(other),
            (_, Operand::Bool(_)) => self.loose_equals(&Operand::Number(other.to_number())),
            (Operand::Number(n), Operand::String(_)) => *n == other.to_number(),
            (Operand::String(_), Operand::Number(n)) => self.to_number() == *n,
            (Operand::Data(_), _) => self.clone().to_primitive().loose_equals(other),
            (_, Operand::Data(_)) => self.loose_equals(&other.clone().to_primitive()),
            _ => false,
        }
    }
}

/// JavaScript `Number(string)` for decimal input.
fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let numeric = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Evaluates one parsed expression against a scope.
pub struct Evaluator<'s, 'a> {
    scope: &'s Scope<'a>,
    global: &'a Value,
    input: &'s str,
}

impl<'s, 'a> Evaluator<'s, 'a> {
    pub fn new(input: &'s str, scope: &'s Scope<'a>, global: &'a Value) -> Self {
        Evaluator {
            scope,
            global,
            input,
        }
    }

    fn error(&self, message: String) -> TemplateError {
        TemplateError::Evaluation {
            message,
            input: self.input.to_string(),
        }
    }

    pub fn evaluate(&self, ast: &AST) -> Result<Operand<'a>> {
        match ast {
            AST::LiteralPrimitive(literal) => Ok(match &literal.value {
                LiteralValue::Undefined => Operand::Undefined,
                LiteralValue::Null => Operand::Null,
                LiteralValue::Bool(b) => Operand::Bool(*b),
                LiteralValue::Number(n) => Operand::Number(*n),
                LiteralValue::String(s) => Operand::String(Cow::Owned(s.clone())),
            }),
            AST::PropertyRead(read) => {
                Ok(
                    match path_resolver::resolve(&read.path, self.scope, self.global) {
                        Some(value) => Operand::from_value(value),
                        // Unresolved paths read as the literal `false`
                        None => Operand::Bool(false),
                    },
                )
            }
            AST::KeyedRead(read) => {
                let receiver = self.evaluate(&read.receiver)?;
                let key = self.evaluate(&read.key)?;
                let key = match key {
                    Operand::Number(n) => format_number(n),
                    other => other.to_js_string(),
                };
                self.read_member(receiver, &key)
            }
            AST::MemberRead(read) => {
                let mut current = self.evaluate(&read.receiver)?;
                for segment in read.path.split('.') {
                    current = self.read_member(current, segment)?;
                }
                Ok(current)
            }
            AST::Binary(binary) => self.evaluate_binary(binary),
            AST::PrefixNot(not) => Ok(Operand::Bool(
                !self.evaluate(&not.expression)?.is_truthy(),
            )),
            AST::Unary(unary) => {
                let value = self.evaluate(&unary.expr)?.to_number();
                Ok(Operand::Number(if unary.operator == "-" {
                    -value
                } else {
                    value
                }))
            }
            AST::Conditional(conditional) => {
                if self.evaluate(&conditional.condition)?.is_truthy() {
                    self.evaluate(&conditional.true_exp)
                } else {
                    self.evaluate(&conditional.false_exp)
                }
            }
        }
    }

    fn read_member(&self, receiver: Operand<'a>, key: &str) -> Result<Operand<'a>> {
        match receiver {
            Operand::Undefined | Operand::Null => Err(self.error(format!(
                "Cannot read properties of {} (reading '{}')",
                receiver.to_js_string(),
                key
            ))),
            Operand::Data(Cow::Borrowed(value)) => Ok(match get_member(value, key) {
                Some(member) => Operand::from_value(Cow::Borrowed(member)),
                None => length_member(value, key),
            }),
            Operand::Data(Cow::Owned(value)) => Ok(match get_member(&value, key) {
                Some(member) => Operand::from_value(Cow::Owned(member.clone())),
                None => length_member(&value, key),
            }),
            Operand::String(s) => Ok(if key == "length" {
                Operand::Number(s.encode_utf16().count() as f64)
            } else {
                match key.parse::<usize>().ok().and_then(|i| s.chars().nth(i)) {
                    Some(c) => Operand::String(Cow::Owned(c.to_string())),
                    None => Operand::Undefined,
                }
            }),
            Operand::Bool(_) | Operand::Number(_) => Ok(Operand::Undefined),
        }
    }

    fn evaluate_binary(&self, binary: &Binary) -> Result<Operand<'a>> {
        let left = self.evaluate(&binary.left)?;

        // Short-circuit operators return one of their operands
        match binary.operation.as_str() {
            "&&" => {
                return if left.is_truthy() {
                    self.evaluate(&binary.right)
                } else {
                    Ok(left)
                }
            }
            "||" => {
                return if left.is_truthy() {
                    Ok(left)
                } else {
                    self.evaluate(&binary.right)
                }
            }
            "??" => {
                return if left.is_nullish() {
                    self.evaluate(&binary.right)
                } else {
                    Ok(left)
                }
            }
            _ => {}
        }

        let right = self.evaluate(&binary.right)?;
        let result = match binary.operation.as_str() {
            "==" => Operand::Bool(left.loose_equals(&right)),
            "!=" => Operand::Bool(!left.loose_equals(&right)),
            "===" => Operand::Bool(left.strict_equals(&right)),
            "!==" => Operand::Bool(!left.strict_equals(&right)),
            "<" => Operand::Bool(compare(left, right) == Some(Ordering::Less)),
            ">" => Operand::Bool(compare(left, right) == Some(Ordering::Greater)),
            "<=" => Operand::Bool(matches!(
                compare(left, right),
                Some(Ordering::Less | Ordering::Equal)
            )),
            ">=" => Operand::Bool(matches!(
                compare(left, right),
                Some(Ordering::Greater | Ordering::Equal)
            )),
            "+" => {
                let (left, right) = (left.to_primitive(), right.to_primitive());
                if matches!(left, Operand::String(_)) || matches!(right, Operand::String(_)) {
                    Operand::String(Cow::Owned(left.to_js_string() + &right.to_js_string()))
                } else {
                    Operand::Number(left.to_number() + right.to_number())
                }
            }
            "-" => Operand::Number(left.to_number() - right.to_number()),
            "*" => Operand::Number(left.to_number() * right.to_number()),
            "/" => Operand::Number(left.to_number() / right.to_number()),
            "%" => Operand::Number(left.to_number() % right.to_number()),
            "**" => Operand::Number(left.to_number().powf(right.to_number())),
            operation => {
                return Err(self.error(format!("Unsupported operator '{}'", operation)));
            }
        };
        Ok(result)
    }
}

fn length_member<'a>(value: &Value, key: &str) -> Operand<'a> {
    match length_of(value) {
        Some(len) if key == "length" => Operand::Number(len as f64),
        _ => Operand::Undefined,
    }
}

/// Relational comparison; `None` when either side is `NaN`.
fn compare(left: Operand<'_>, right: Operand<'_>) -> Option<Ordering> {
    let (left, right) = (left.to_primitive(), right.to_primitive());
    if let (Operand::String(a), Operand::String(b)) = (&left, &right) {
        return Some(a.cmp(b));
    }
    left.to_number().partial_cmp(&right.to_number())
}

/// Parse and evaluate `expression`, returning its truthiness.
pub fn evaluate_expression(expression: &str, scope: &Scope<'_>, global: &Value) -> Result<bool> {
    let ast = Parser::new().parse(expression)?;
    let value = Evaluator::new(expression, scope, global).evaluate(&ast)?;
    Ok(value.is_truthy())
}

/// Condition used by `if` / `if-not`. A malformed or failing expression is
/// logged and counts as `false`.
pub fn evaluate_condition(expression: &str, scope: &Scope<'_>, global: &Value) -> bool {
    match evaluate_expression(expression, scope, global) {
        Ok(result) => result,
        Err(error) => {
            tracing::warn!(expression, %error, "error evaluating expression");
            false
        }
    }
}
