use std::rc::Rc;

use ember_interpreter::object::{EvaluationError, Object};

pub struct Printer {}

impl Printer {
    pub fn print(&mut self, object: Result<Rc<Object>, EvaluationError>) {
        match object {
            Ok(object) => println!("{}", object),
            Err(error) => println!("{}", error),
        }
    }
}
