use std::rc::Rc;

use crate::environment::Environment;
use crate::object::{EvaluationError, Object, QuickReturn};
use ember_core::ast;
use ember_core::ast::{Expression, InfixOperationKind, PrefixOperationKind};

/// Evaluates a whole program. A top-level `return` has no caller to return
/// past, so its value is unwrapped here; otherwise the value of the last
/// statement is the result.
pub fn eval_program(
    program: &ast::Program,
    environment: &mut Environment,
) -> Result<Rc<Object>, EvaluationError> {
    let mut output = Object::nil();
    for statement in &program.statements {
        let result = eval_statement(statement, environment);

        match result {
            Err(QuickReturn::Return(value)) => return Ok(value),
            Err(QuickReturn::Error(error)) => return Err(error),
            Ok(object) => output = object,
        };
    }
    Ok(output)
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match statement {
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
        ast::Statement::Return(statement) => eval_return_statement(statement, environment),
        ast::Statement::Let(statement) => eval_let_statement(statement, environment),
    }
}

fn eval_let_statement(
    statement: &ast::LetStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    environment.set(statement.identifier.name.clone(), value);
    // A binding is not an expression; it produces no usable value
    Ok(Object::nil())
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    Err(QuickReturn::Return(value))
}

fn eval_expression(
    expression: &Expression,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::StringLiteral(value) => Ok(Object::string(value.clone())),
        Expression::Identifier(identifier) => environment.get(&identifier.name).ok_or(
            QuickReturn::Error(EvaluationError::UnknownIdentifier(identifier.name.clone())),
        ),
        Expression::PrefixOperation(kind, expression) => {
            let right = eval_expression(expression, environment);
            eval_prefix_operation(kind, right)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment);
            let right = eval_expression(right, environment);
            eval_infix_operation(kind, left, right)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if is_truthy(&condition) {
                eval_block_statement(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment)
            } else {
                Ok(Object::nil())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            body.clone(),
            // the *defining* environment, not the call-site one
            environment.clone(),
        )),
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let function = eval_expression(function, environment)?;
            match function.as_ref() {
                Object::Function(function) => eval_call_function(function, arguments, environment),
                _ => Err(QuickReturn::Error(EvaluationError::CallNonFunction(
                    function.type_name(),
                ))),
            }
        }
    }
}

/// Everything that is not nil or false counts as true.
fn is_truthy(object: &Rc<Object>) -> bool {
    !matches!(object.as_ref(), Object::Nil | Object::Boolean(false))
}

fn eval_call_function(
    function: &crate::object::Function,
    arguments: &[Expression],
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    if function.parameters.len() != arguments.len() {
        return Err(QuickReturn::Error(EvaluationError::WrongArgumentCount {
            expected: function.parameters.len(),
            actual: arguments.len(),
        }));
    }
    let arguments = eval_expressions(arguments, environment)?;
    apply_function(function, arguments)
}

fn eval_expressions(
    arguments: &[Expression],
    environment: &mut Environment,
) -> Result<Vec<Rc<Object>>, QuickReturn> {
    let mut result = Vec::new();
    for argument in arguments {
        result.push(eval_expression(argument, environment)?);
    }
    Ok(result)
}

fn apply_function(
    function: &crate::object::Function,
    arguments: Vec<Rc<Object>>,
) -> Result<Rc<Object>, QuickReturn> {
    let mut new_environment = Environment::new_enclosed(function.env.clone());
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        new_environment.set(parameter.name.clone(), argument);
    }
    let result = eval_block_statement(&function.body, &mut new_environment);
    match result {
        Ok(object) => Ok(object),
        // A `return` escapes up to its call site and no further
        Err(QuickReturn::Return(value)) => Ok(value),
        Err(error) => Err(error),
    }
}

fn eval_block_statement(
    block: &ast::BlockStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let mut result = Object::nil();
    for statement in &block.statements {
        result = eval_statement(statement, environment)?;
    }
    Ok(result)
}

fn eval_prefix_operation(
    kind: &PrefixOperationKind,
    right: Result<Rc<Object>, QuickReturn>,
) -> Result<Rc<Object>, QuickReturn> {
    let right = right?;
    match kind {
        PrefixOperationKind::Bang => Ok(Object::boolean(!is_truthy(&right))),
        PrefixOperationKind::Minus => match right.as_ref() {
            Object::Integer(value) => Ok(Object::integer(value.wrapping_neg())),
            _ => Err(QuickReturn::Error(EvaluationError::UnknownPrefixOperator {
                operation: kind.clone(),
                right: right.type_name(),
            })),
        },
    }
}

/// Dispatches on the left operand's runtime type. Mismatched operand types
/// and an unsupported operator on matching types are distinct errors.
fn eval_infix_operation(
    kind: &InfixOperationKind,
    left: Result<Rc<Object>, QuickReturn>,
    right: Result<Rc<Object>, QuickReturn>,
) -> Result<Rc<Object>, QuickReturn> {
    let left = left?;
    let right = right?;
    match (left.as_ref(), right.as_ref()) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_operation(kind, *left, *right)
        }
        (Object::Boolean(left), Object::Boolean(right)) => {
            eval_boolean_infix_operation(kind, *left, *right)
        }
        (Object::String(left_value), _) => eval_string_infix_operation(kind, left_value, &right),
        _ => Err(QuickReturn::Error(EvaluationError::TypeMismatch {
            left: left.type_name(),
            operation: kind.clone(),
            right: right.type_name(),
        })),
    }
}

fn eval_integer_infix_operation(
    kind: &InfixOperationKind,
    left: i64,
    right: i64,
) -> Result<Rc<Object>, QuickReturn> {
    use InfixOperationKind::*;
    match kind {
        Plus => Ok(Object::integer(left.wrapping_add(right))),
        Minus => Ok(Object::integer(left.wrapping_sub(right))),
        Multiply => Ok(Object::integer(left.wrapping_mul(right))),
        Divide => {
            if right == 0 {
                Err(QuickReturn::Error(EvaluationError::DivisionByZero))
            } else {
                // truncates toward zero
                Ok(Object::integer(left.wrapping_div(right)))
            }
        }
        LessThan => Ok(Object::boolean(left < right)),
        GreaterThan => Ok(Object::boolean(left > right)),
        LessEq => Ok(Object::boolean(left <= right)),
        GreaterEq => Ok(Object::boolean(left >= right)),
        Equal => Ok(Object::boolean(left == right)),
        NotEqual => Ok(Object::boolean(left != right)),
    }
}

fn eval_boolean_infix_operation(
    kind: &InfixOperationKind,
    left: bool,
    right: bool,
) -> Result<Rc<Object>, QuickReturn> {
    match kind {
        InfixOperationKind::Equal => Ok(Object::boolean(left == right)),
        InfixOperationKind::NotEqual => Ok(Object::boolean(left != right)),
        _ => Err(QuickReturn::Error(EvaluationError::UnknownInfixOperator {
            left: "BOOLEAN",
            operation: kind.clone(),
            right: "BOOLEAN",
        })),
    }
}

/// String operations coerce the right operand through its decimal text: an
/// integer concatenates or sets the repeat count, a boolean (or any other
/// type) yields nil before the operator is even considered.
fn eval_string_infix_operation(
    kind: &InfixOperationKind,
    left: &str,
    right: &Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    use InfixOperationKind::*;

    let right_text = match right.as_ref() {
        Object::String(value) => value.clone(),
        Object::Integer(value) => value.to_string(),
        _ => return Ok(Object::nil()),
    };

    match kind {
        Plus => Ok(Object::string(format!("{}{}", left, right_text))),
        Multiply => match right_text.parse::<i64>() {
            // A negative count repeats zero times
            Ok(count) => Ok(Object::string(left.repeat(count.max(0) as usize))),
            Err(_) => Ok(Object::nil()),
        },
        Equal => Ok(Object::boolean(left == right_text)),
        NotEqual => Ok(Object::boolean(left != right_text)),
        _ => Err(QuickReturn::Error(EvaluationError::UnknownInfixOperator {
            left: "STRING",
            operation: kind.clone(),
            right: right.type_name(),
        })),
    }
}
