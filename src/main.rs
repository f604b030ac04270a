use anyhow::Result;
use argh::FromArgs;
use minish::Interpreter;

fn default_prompt() -> String {
    "$ ".to_string()
}

#[derive(FromArgs)]
/// A tiny line-oriented command interpreter.
struct Options {
    /// execute a single command line and exit instead of reading interactively
    #[argh(option, short = 'c')]
    command: Option<String>,

    /// prompt printed before each input line
    #[argh(option, default = "default_prompt()")]
    prompt: String,
}

fn main() -> Result<()> {
    let options: Options = argh::from_env();
    let mut interpreter = Interpreter::default();

    match options.command {
        Some(line) => {
            interpreter.execute_line(&line)?;
        }
        None => interpreter.repl(&options.prompt)?,
    }

    Ok(())
}
