use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use structty::report::{render_packing_hint, render_report};
use structty::types::{StructLayout, StructRegistry};
use structty::ui::App;

/// Inspect the memory layout of C structs
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Declaration file to inspect
    file: PathBuf,

    /// Print text reports instead of opening the TUI
    #[arg(long)]
    print: bool,

    /// Only show the struct with this name
    #[arg(long = "struct", value_name = "NAME")]
    struct_name: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("could not read {}", cli.file.display()))?;

    let mut parser = structty::parser::parse::Parser::new(&source)
        .with_context(|| format!("failed to parse {}", cli.file.display()))?;
    let program = parser
        .parse_program()
        .with_context(|| format!("failed to parse {}", cli.file.display()))?;

    let mut registry = StructRegistry::from_program(program)?;
    if registry.is_empty() {
        bail!("{}: no struct definitions found", cli.file.display());
    }

    let names: Vec<String> = match &cli.struct_name {
        Some(name) => {
            if registry.get(name).is_none() {
                bail!(
                    "no struct named '{}' in {} (available: {})",
                    name,
                    cli.file.display(),
                    registry.names().join(", ")
                );
            }
            vec![name.clone()]
        }
        None => registry.names().to_vec(),
    };

    let mut layouts: Vec<StructLayout> = Vec::with_capacity(names.len());
    let mut packed: Vec<StructLayout> = Vec::with_capacity(names.len());
    for name in &names {
        layouts.push(
            registry
                .resolve(name)
                .with_context(|| format!("cannot lay out struct '{}'", name))?,
        );
        packed.push(
            registry
                .resolve_packed(name)
                .with_context(|| format!("cannot lay out struct '{}'", name))?,
        );
    }

    if cli.print {
        for (i, (declared, reordered)) in layouts.iter().zip(&packed).enumerate() {
            if i > 0 {
                println!();
            }
            print!("{}", render_report(declared));
            if let Some(hint) = render_packing_hint(declared, reordered) {
                println!("{}", hint);
            }
        }
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, layouts, packed);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal error")?;

    Ok(())
}
