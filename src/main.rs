use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dobble_gen::core::config::{
    DEFAULT_CARD_DIAMETER_CM, DEFAULT_DPI, DEFAULT_IMAGES_DIR, DEFAULT_MARGIN_PX,
    DEFAULT_MAX_CARD_ATTEMPTS, DEFAULT_MAX_PLACEMENT_RETRIES, DEFAULT_OUTPUT_DIR, DEFAULT_SEED,
    DEFAULT_SYMBOLS_PER_CARD,
};
use dobble_gen::{generate, DeckConfig, DeckError, PlacementStrategy};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dobble", version, about = "Generate spot-the-shared-symbol card decks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load images, design the deck and write one PNG per card.
    Run {
        #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
        images_dir: PathBuf,
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
        /// Must be a prime number + 1.
        #[arg(long, default_value_t = DEFAULT_SYMBOLS_PER_CARD)]
        symbols_per_card: usize,
        #[arg(long, default_value_t = DEFAULT_CARD_DIAMETER_CM)]
        card_diameter_cm: f64,
        /// Candidate positions tried per symbol (rejection strategy).
        #[arg(long, default_value_t = DEFAULT_MAX_PLACEMENT_RETRIES)]
        max_placement_retries: u32,
        /// Whole-card layout attempts before giving up.
        #[arg(long, default_value_t = DEFAULT_MAX_CARD_ATTEMPTS)]
        max_card_attempts: u32,
        #[arg(long, default_value_t = DEFAULT_DPI)]
        dpi: u32,
        /// Distance kept between symbols and the card edge, in pixels.
        #[arg(long, default_value_t = DEFAULT_MARGIN_PX)]
        margin: u32,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = PlacementStrategy::Packing)]
        strategy: PlacementStrategy,
        /// Reuse images when there are fewer than the deck needs.
        #[arg(long)]
        allow_image_reuse: bool,
    },
    /// Create the output directory structure.
    CreateOutputDir {
        #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
        images_dir: PathBuf,
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },
    /// Print the symbol ids of every card.
    ShowDeck {
        #[arg(long, default_value_t = DEFAULT_SYMBOLS_PER_CARD)]
        symbols_per_card: usize,
    },
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn execute(command: Commands) -> Result<(), DeckError> {
    match command {
        Commands::Run {
            images_dir,
            output_dir,
            symbols_per_card,
            card_diameter_cm,
            max_placement_retries,
            max_card_attempts,
            dpi,
            margin,
            seed,
            strategy,
            allow_image_reuse,
        } => {
            let config = DeckConfig::new()
                .with_dirs(images_dir, output_dir)
                .with_symbols_per_card(symbols_per_card)
                .with_card_diameter_cm(card_diameter_cm)
                .with_max_placement_retries(max_placement_retries)
                .with_max_card_attempts(max_card_attempts)
                .with_dpi(dpi)
                .with_margin_px(margin)
                .with_seed(seed)
                .with_strategy(strategy)
                .with_image_reuse(allow_image_reuse);
            let summary = dobble_gen::run(&config)?;
            println!("{} cards written to {}", summary.cards, summary.card_dir.display());
        }
        Commands::CreateOutputDir { images_dir, output_dir } => {
            let config = DeckConfig::new().with_dirs(images_dir, output_dir.clone());
            dobble_gen::create_output_dir(&config)?;
            println!("{} directory created.", output_dir.display());
        }
        Commands::ShowDeck { symbols_per_card } => {
            DeckConfig::new().with_symbols_per_card(symbols_per_card).validate()?;
            for (i, card) in generate(symbols_per_card).iter().enumerate() {
                println!("{:>4}: {}", i + 1, card);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    setup_tracing();
    let cli = Cli::parse();

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
