//! Command-line front end for the Arimaa notation tools.
//!
//! - `replay` imports game files in parallel into one shared tree
//! - `annotate` marks the moves in engine output read from stdin
//! - `puzzle` checks the solutions stored in a packed puzzle file

use anyhow::Context;
use arimaa::*;
use clap::Parser;
use clap::Subcommand;
use rayon::prelude::*;
use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import game records and print their move lists
    Replay {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Label plies with w/b instead of g/s
        #[arg(long)]
        legacy: bool,
        /// Text placed between plies
        #[arg(long, default_value = "\n")]
        separator: String,
    },
    /// Mark recognised moves in engine output read from stdin
    Annotate {
        /// Game record whose final position the engine analyses
        #[arg(long)]
        game: Option<PathBuf>,
        /// Label plies with w/b instead of g/s
        #[arg(long)]
        legacy: bool,
    },
    /// Verify every solution in a packed puzzle file
    Puzzle {
        #[arg(required = true)]
        file: PathBuf,
    },
}

fn style(legacy: bool) -> Style {
    match legacy {
        true => Style::Legacy,
        false => Style::Modern,
    }
}

fn main() -> anyhow::Result<()> {
    arimaa::log()?;
    match Cli::parse().command {
        Command::Replay {
            files,
            legacy,
            separator,
        } => replay(&files, style(legacy), &separator),
        Command::Annotate { game, legacy } => annotate(game, style(legacy)),
        Command::Puzzle { file } => puzzle(&file),
    }
}

fn replay(files: &[PathBuf], style: Style, separator: &str) -> anyhow::Result<()> {
    let start = Node::start();
    let imports = files
        .par_iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))
                .map(|text| to_tree(&text, &start))
        })
        .collect::<anyhow::Result<Vec<Import>>>()?;
    for (path, import) in files.iter().zip(imports.iter()) {
        if let Some(error) = &import.error {
            log::warn!("{}: {}", path.display(), error);
        }
        println!("# {}", path.display());
        println!("{}", import.last().move_list(style, separator));
        match import.last().result() {
            Some(outcome) => println!("# {}", outcome),
            None if !import.complete => println!("# unfinished ply"),
            None => {}
        }
    }
    let created = imports.iter().map(|i| i.created).sum::<usize>();
    log::info!("{} files, {} positions added", files.len(), created);
    Ok(())
}

fn annotate(game: Option<PathBuf>, style: Style) -> anyhow::Result<()> {
    let start = Node::start();
    let base = match game {
        None => Arc::clone(&start),
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            let import = to_tree(&text, &start);
            if let Some(error) = import.error {
                anyhow::bail!("{}: {}", path.display(), error);
            }
            Arc::clone(import.last())
        }
    };
    log::info!("annotating against {}", base.label(style));
    let mut annotator = Annotator::new(base);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    let mut line = String::new();
    while stdin.lock().read_line(&mut line).context("read stdin")? > 0 {
        render(&mut stdout, annotator.feed(&line), style)?;
        line.clear();
    }
    render(&mut stdout, annotator.flush(), style)
}

fn render(out: &mut impl Write, segments: Vec<Segment>, style: Style) -> anyhow::Result<()> {
    for segment in segments {
        match segment {
            Segment::Text(text) => write!(out, "{}", text)?,
            Segment::Move { text, partial } => {
                write!(out, "[{} {}]", partial.node().label(style), text)?
            }
        }
    }
    out.flush().context("flush stdout")
}

fn puzzle(file: &std::path::Path) -> anyhow::Result<()> {
    let records = Record::load(file)?;
    let mut solved = 0;
    for (i, record) in records.iter().enumerate() {
        let root = Node::root(*record.state());
        match root.make_move(record.steps().to_vec()) {
            Ok(node) => {
                let words = step_words(record.state(), record.steps());
                match node.result() {
                    Some(outcome) => {
                        solved += 1;
                        println!("{:>4} {} ({})", i, words, outcome);
                    }
                    None => println!("{:>4} {} (no result)", i, words),
                }
            }
            Err(illegal) => println!("{:>4} illegal solution: {}", i, illegal),
        }
    }
    log::info!("{} of {} puzzles end the game", solved, records.len());
    Ok(())
}
