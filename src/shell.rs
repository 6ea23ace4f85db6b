//! Hand rendered commands to the host command interpreter.

use std::path::PathBuf;
use std::process::Command;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging;
use crate::render::render;
use crate::token::Token;

/// Interpreter used when the configuration leaves `program` empty.
fn default_program() -> Result<&'static str> {
    if cfg!(unix) {
        Ok("/bin/sh")
    } else if cfg!(windows) {
        Ok("bash.exe")
    } else {
        Err(Error::PlatformUnsupported(std::env::consts::OS.to_owned()))
    }
}

/// A command interpreter plus the arguments preceding the command text.
#[derive(Debug, Clone)]
pub struct Shell {
    program: String,
    args: Vec<String>,
    history: Option<PathBuf>,
}

impl Shell {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            history: None,
        }
    }

    /// Build from configuration, resolving the platform default interpreter.
    pub fn from_config(config: &Config) -> Result<Self> {
        let program = match config.shell.program.trim() {
            "" => default_program()?.to_owned(),
            p => p.to_owned(),
        };
        let history = if config.logging.history {
            config.logging.history_path()
        } else {
            None
        };
        Ok(Self {
            program,
            args: config.shell.args.clone(),
            history,
        })
    }

    /// Record executed commands in `path`.
    pub fn with_history(mut self, path: impl Into<PathBuf>) -> Self {
        self.history = Some(path.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argv that [`Shell::run`] would execute, without executing it.
    pub fn command_line<I, T>(&self, tokens: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let command = render(tokens)?;
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv.push(command);
        Ok(argv)
    }

    /// Render `tokens` and run them, returning the interpreter's exit code.
    ///
    /// A process terminated by a signal reports `-1`.
    pub fn run<I, T>(&self, tokens: I) -> Result<i32>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let command = render(tokens)?;
        log::info!("running: {} {} {command}", self.program, self.args.join(" "));

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&command)
            .status()?;
        let code = status.code();
        log::debug!("exit status: {status}");

        if let Some(path) = &self.history {
            logging::log_command(path, &command, code);
        }
        Ok(code.unwrap_or(-1))
    }
}

/// Render and run `tokens` with the default configuration.
pub fn run<I, T>(tokens: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<Token>,
{
    Shell::from_config(&Config::default_config())?.run(tokens)
}
