use ember_core::lexer;
use ember_core::parser;
use ember_interpreter::environment;
use ember_interpreter::evaluator;

/// One-shot execution of a whole source text: print either the parse errors
/// or the displayed result.
pub fn execute(source: &str) {
    let tokenizer = lexer::Tokenizer::new(source);
    let mut parser = parser::Parser::new(tokenizer);
    let program = match parser.parse_program() {
        Ok(program) => program,
        Err(errors) => {
            for error in errors {
                eprintln!("parse error: {}", error);
            }
            return;
        }
    };

    let mut env = environment::Environment::new();
    match evaluator::eval_program(&program, &mut env) {
        Ok(object) => println!("{}", object),
        Err(error) => eprintln!("{}", error),
    }
}
