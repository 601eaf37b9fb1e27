use std::rc::Rc;

use ember_core::ast::Program;
use ember_interpreter::environment::Environment;
use ember_interpreter::evaluator;
use ember_interpreter::object::{EvaluationError, Object};

/// Evaluates each line against one long-lived top-level environment, so
/// bindings persist across inputs.
pub struct SessionEvaluator {
    environment: Environment,
}

impl SessionEvaluator {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }

    pub fn evaluate(&mut self, program: &Program) -> Result<Rc<Object>, EvaluationError> {
        evaluator::eval_program(program, &mut self.environment)
    }
}
