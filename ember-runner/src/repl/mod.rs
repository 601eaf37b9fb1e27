mod evaluator;
mod printer;
mod reader;

use rustyline::DefaultEditor;

use evaluator::SessionEvaluator;
use printer::Printer;
use reader::{ReadOutput, Reader};

struct Repl {
    reader: Reader,
    evaluator: SessionEvaluator,
    printer: Printer,
}

impl Repl {
    fn run(mut self) {
        loop {
            match self.reader.read() {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Value(program) => {
                    let result = self.evaluator.evaluate(&program);
                    self.printer.print(result)
                }
            }
        }
    }
}

pub fn start() {
    let rl = DefaultEditor::new().expect("could not initialize line editor");

    Repl {
        reader: Reader::new(rl),
        evaluator: SessionEvaluator::new(),
        printer: Printer {},
    }
    .run()
}
