use argh::FromArgs;
use indentlang::eval::{Interpreter, DEFAULT_MAX_DEPTH};
use indentlang::lexer::Scanner;
use indentlang::results::{LangError, SourceError};
use indentlang::Program;
use miette::IntoDiagnostic;
use std::io::Read;

#[derive(FromArgs, Debug)]
/// Run indentlang programs, printing one `Out[i]` line per result.
struct Args {
    /// print the token stream before running
    #[argh(switch)]
    tokens: bool,

    /// print the parsed program as s-expressions before running
    #[argh(switch)]
    ast: bool,

    /// maximum function call depth
    #[argh(option, default = "DEFAULT_MAX_DEPTH")]
    max_depth: usize,

    /// program files; standard input is read when none are given
    #[argh(positional)]
    files: Vec<String>,
}

fn run_source(args: &Args, filename: &str, source: &str) -> Result<(), LangError> {
    if args.tokens {
        Scanner::new(source).for_each(|t| {
            println!("[{}] {:?} {:?}", filename, t.tok, t.loc);
        });
    }

    let program = Program::parse(source)?;
    if args.ast {
        for s in program.sexprs() {
            println!("{}", s);
        }
    }

    let interp = Interpreter::with_max_depth(args.max_depth);
    for (i, value) in program.results_with(interp).enumerate() {
        println!("Out[{}]: {}", i, value?);
    }
    Ok(())
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    if args.files.is_empty() {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source).into_diagnostic()?;
        run_source(&args, "<stdin>", &source)
            .map_err(|e| SourceError::new("<stdin>", &source, e))?;
    }

    for filename in &args.files {
        let source = std::fs::read_to_string(filename).into_diagnostic()?;
        run_source(&args, filename, &source).map_err(|e| SourceError::new(filename, &source, e))?;
    }
    Ok(())
}
