//! Arimaa rules engine and shared move tree.
//!
//! The crate is layered leaf to root:
//! - [`board`] single-ply positions and step mechanics
//! - [`rules`] ply legality and game-end detection
//! - [`tree`] the transposition-merged tree of reachable positions
//! - [`notation`] text codecs and the incremental notation parser
pub mod board;
pub mod notation;
pub mod rules;
pub mod tree;

pub use board::*;
pub use notation::*;
pub use rules::*;
pub use tree::*;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// BOARD GEOMETRY
// ============================================================================
/// Files and ranks per side of the board.
pub const WIDTH: usize = 8;
/// Squares on the board.
pub const AREA: usize = WIDTH * WIDTH;
/// Trap squares as (file, rank): c3, f3, c6, f6.
pub const TRAPS: [(usize, usize); 4] = [(2, 2), (5, 2), (2, 5), (5, 5)];

// ============================================================================
// RULE PARAMETERS
// ============================================================================
/// Steps each side may take in one ply.
pub const STEPS_PER_PLY: usize = 4;
/// Starting allotment per piece type, weakest to strongest.
pub const ALLOTMENT: [usize; 6] = [8, 2, 2, 2, 1, 1];
/// Pieces each side places during setup.
pub const SETUP_SIZE: usize = 16;
/// Prior occurrences of a position that make reaching it again illegal.
pub const REPETITION_LIMIT: usize = 2;

// ============================================================================
// PERSISTED PUZZLE RECORDS
// ============================================================================
/// Bytes of nibble-packed board at the start of a record.
pub const RECORD_BOARD_BYTES: usize = AREA / 2;
/// Step bytes following the board.
pub const RECORD_STEP_BYTES: usize = STEPS_PER_PLY;
/// Total record size.
pub const RECORD_SIZE: usize = RECORD_BOARD_BYTES + RECORD_STEP_BYTES;
/// Nibble marking an empty square.
pub const RECORD_EMPTY: u8 = 15;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}
