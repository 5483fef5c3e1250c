use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use libcalc::{engine_from_config, logging, render, run_keys, CalculatorConfig, Report};

#[derive(Parser)]
#[command(name = "libcalc")]
#[command(about = "A keypad calculator driven one key at a time")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.libcalc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive REPL mode (each line is a key sequence)
    Repl,
    /// Run a key sequence and print the final display
    Eval {
        /// Keys, e.g. "50+25=" or "200+10%="
        keys: String,
        /// Print the display after every key
        #[arg(long)]
        trace: bool,
        /// Print display context and state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Also write it to the config path (--config, else the default path)
        #[arg(long)]
        write: bool,
    },
}

fn run_repl(config: &CalculatorConfig) -> anyhow::Result<()> {
    let mut engine = engine_from_config(config);

    println!("libcalc: type keys and press Enter (digits . ~ + - * / % = c <)");
    println!(":state prints the session as JSON, :quit or Ctrl-D exits.");
    println!("{}", render(engine.context()));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let input = line.trim();
        match input {
            "" => continue,
            ":quit" | ":q" => break,
            ":state" => {
                println!("{}", Report::of(&engine).to_json()?);
                continue;
            }
            _ => {}
        }

        for step in run_keys(&mut engine, input) {
            if step.result == libcalc::KeyResult::NotHandled {
                eprintln!("  (ignored key {:?})", step.key);
            }
        }
        println!("{}", render(engine.context()));
        io::stdout().flush()?;
    }
    Ok(())
}

fn run_eval(config: &CalculatorConfig, keys: &str, trace: bool, json: bool) -> anyhow::Result<()> {
    let mut engine = engine_from_config(config);
    let steps = run_keys(&mut engine, keys);

    if trace {
        for step in &steps {
            println!("{}  ->  {}  {:?}", step.key, step.display, step.result);
        }
    }

    if json {
        println!("{}", Report::of(&engine).to_json()?);
    } else {
        println!("{}", render(engine.context()));
    }

    if let Some(e) = &engine.context().error {
        anyhow::bail!("{}", e);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let path = CalculatorConfig::resolve_path(cli.config);
    let config = CalculatorConfig::load(&path)?;
    logging::init(&config.log_level);
    tracing::debug!("config loaded from {}", path.display());

    match cli.command {
        Some(Commands::Repl) | None => run_repl(&config),
        Some(Commands::Eval { keys, trace, json }) => run_eval(&config, &keys, trace, json),
        Some(Commands::Config { write }) => {
            print!("{}", config.to_toml_string()?);
            if write {
                config.save(&path)?;
                eprintln!("wrote {}", path.display());
            }
            Ok(())
        }
    }
}
