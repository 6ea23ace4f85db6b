//! shcmd: render a JSON token sequence into a shell command.
//!
//! Reads tokens from stdin and prints the command line, or runs it with
//! `--run`. With `--escape`, stdin is treated as raw bytes and printed in
//! escaped form instead; `--escape --text` escapes it as UTF-8 text, where
//! `--encoding` picks the target encoding.

use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;

use shcmd::config::Config;
use shcmd::escape::{EscapeOptions, escape};
use shcmd::{Encoding, Shell, render, token};

#[derive(Parser, Debug)]
#[command(name = "shcmd")]
#[command(about = "Render a JSON token sequence into a quoted shell command")]
#[command(version)]
struct Args {
    /// Escape raw stdin bytes instead of rendering tokens
    #[arg(long, conflicts_with_all = ["run", "dump_config"])]
    escape: bool,

    /// Treat stdin as UTF-8 text when escaping
    #[arg(long, requires = "escape")]
    text: bool,

    /// Use the bash ANSI-C `$'...'` form for non-printable input
    #[arg(long, requires = "escape")]
    bash: bool,

    /// Target encoding for escaped text (utf-8, utf-16-le, latin-1, unicode, ...)
    #[arg(long, value_name = "NAME", requires = "text")]
    encoding: Option<String>,

    /// Execute the rendered command and exit with its status
    #[arg(long, conflicts_with = "dump_config")]
    run: bool,

    /// Print the effective configuration as TOML
    #[arg(long)]
    dump_config: bool,
}

fn escape_options(args: &Args, config: &Config) -> shcmd::Result<EscapeOptions> {
    let mut options = config.escape.options()?;
    options.bash |= args.bash;
    if let Some(name) = &args.encoding {
        options.encoding = Some(name.parse::<Encoding>()?);
    }
    Ok(options)
}

fn execute(args: &Args, config: &Config) -> shcmd::Result<ExitCode> {
    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;

    if args.escape {
        let options = escape_options(args, config)?;
        let escaped = if args.text {
            escape(&*String::from_utf8_lossy(&input), &options)?
        } else {
            escape(input.as_slice(), &options)?
        };
        println!("{escaped}");
        return Ok(ExitCode::SUCCESS);
    }

    let tokens = token::from_json(&String::from_utf8_lossy(&input))?;
    if args.run {
        let shell = Shell::from_config(config)?;
        let code = shell.run(tokens)?;
        return Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)));
    }

    let command = render(tokens)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{command}")?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("shcmd: {e}");
            return ExitCode::FAILURE;
        }
    };
    shcmd::logging::init(config.logging.level_filter());

    match execute(&args, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("shcmd: {e}");
            ExitCode::FAILURE
        }
    }
}
