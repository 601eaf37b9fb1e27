use ember_core::ast::Program;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use ember_core::lexer;
use ember_core::parser;
use rustyline::Editor;

const PROMPT: &str = ">> ";

pub enum ReadOutput {
    Exit,
    Clear,
    Value(Program),
}

pub struct Reader {
    rl: Editor<(), DefaultHistory>,
}

impl Reader {
    pub fn new(rl: Editor<(), DefaultHistory>) -> Self {
        Self { rl }
    }

    pub fn read(&mut self) -> ReadOutput {
        let readline = self.rl.readline(PROMPT);

        let line = match readline {
            Err(ReadlineError::Interrupted) => {
                return ReadOutput::Clear; // Clear line
            }
            Err(ReadlineError::Eof) => {
                return ReadOutput::Exit;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                return ReadOutput::Exit;
            }
            Ok(line) => {
                let _ = self.rl.add_history_entry(&line);
                line
            }
        };

        // Literal `quit` ends the session
        if line.trim() == "quit" {
            return ReadOutput::Exit;
        }

        let tokenizer = lexer::Tokenizer::new(&line);
        let program = parser::Parser::new(tokenizer).parse_program();

        match program {
            Ok(value) => ReadOutput::Value(value),
            Err(errors) => {
                for error in errors {
                    println!("parse error: {}", error);
                }
                ReadOutput::Clear
            }
        }
    }
}
