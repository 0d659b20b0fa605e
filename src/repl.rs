use std::io::{self, Write};

use colored::Colorize;

use crate::{env::Env, eval_source, print::render};

pub const BANNER: &str = "Lispy Version 0.0.0.0.7\nPress Ctrl+c to Exit\n\n";
pub const PROMPT: &str = "lispy> ";

/// Feeds lines through parse, read, evaluate and render.
///
/// Results, parse errors and `printenv` listings all go to the environment's
/// output sink, so they interleave in the order they happen.
pub struct Repl {
    env: Env,
    color: bool,
    prompt: Option<&'static str>,
}

impl Repl {
    pub fn new<W>(env: Env, out: W) -> Self
    where
        W: Write + 'static,
    {
        Repl {
            env: env.with_output(out),
            color: false,
            prompt: None,
        }
    }

    pub fn colored(self, color: bool) -> Self {
        Repl { color, ..self }
    }

    pub fn prompt(self, prompt: &'static str) -> Self {
        Repl {
            prompt: Some(prompt),
            ..self
        }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        write!(self.env.output(), "{}", BANNER)
    }

    /// Evaluate a single line and write its rendering.
    pub fn eval_line(&mut self, line: &str) -> io::Result<()> {
        if cfg!(feature = "debug") {
            if let Ok(tree) = crate::parse::parse(line) {
                write!(self.env.output(), "{}", tree)?;
            }
        }
        match eval_source(&mut self.env, line) {
            Ok(value) => {
                let text = render(&value, &self.env);
                if self.color && value.is_error() {
                    writeln!(self.env.output(), "{}", text.red())
                } else {
                    writeln!(self.env.output(), "{}", text)
                }
            }
            Err(e) => {
                tracing::debug!("parse failed");
                writeln!(self.env.output(), "{}", e)
            }
        }
    }

    /// Run until the input ends or `exit` clears the run flag.
    pub fn run<I>(&mut self, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut lines = lines.into_iter();
        while self.env.is_running() {
            if let Some(prompt) = self.prompt {
                write!(self.env.output(), "{}", prompt)?;
                self.env.output().flush()?;
            }
            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.eval_line(&line)?;
        }
        self.env.output().flush()
    }
}
