use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use othello_engine::ai::eval::Evaluator;
use othello_engine::ai::search::Searcher;
use othello_engine::config::EngineConfig;
use othello_engine::game::GameState;
use othello_engine::protocol;

/// Select a move for the Othello position in a request file.
#[derive(Parser)]
#[command(name = "othello-engine", about = "Othello move-selection engine")]
struct Cli {
    /// Request file: player id, 64 cells row-major, candidate move list
    input: PathBuf,

    /// File the chosen move is written to as "row col"
    output: PathBuf,

    /// Path to TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured depth schedule, e.g. --depths 2,4
    #[arg(long, value_delimiter = ',')]
    depths: Option<Vec<u8>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(depths) = cli.depths {
        config.depths = depths;
    }
    config.validate()?;

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read request file {}", cli.input.display()))?;
    let request = protocol::parse_request(&text)?;

    let state = GameState::from_cells(&request.cells, request.player);
    let evaluator = Evaluator::with_params(request.player, config.eval_params()?);
    let searcher = Searcher::new(&evaluator);

    // Shallow passes first: the output file always holds the best move
    // found so far, even if a deeper pass never finishes.
    for &depth in &config.depths {
        let Some((mv, _score)) = searcher.select_move(&state, &request.candidates, depth) else {
            break;
        };
        fs::write(&cli.output, protocol::format_move(mv))
            .with_context(|| format!("failed to write move to {}", cli.output.display()))?;
    }

    Ok(())
}
