use clap::Parser;
use wasm_bindgen::prelude::*;

mod assets;
mod game;
mod slicer;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board width in cells
    #[arg(long)]
    width: Option<u8>,

    /// Board height in cells
    #[arg(long)]
    height: Option<u8>,

    /// Delay before a face-up pair resolves, in milliseconds
    #[arg(long)]
    delay: Option<u32>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }

    let mut config = memoria_core::GameConfig::default();
    if let Some(width) = args.width {
        config.board.0 = width;
    }
    if let Some(height) = args.height {
        config.board.1 = height;
    }
    if let Some(delay) = args.delay {
        config.tile_reveal_delay_ms = delay;
    }
    // Setup failures are fatal to this initialization attempt.
    config.validate().expect("Invalid board configuration");

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started, seed: {:?}", args.seed);
    yew::Renderer::<game::GameView>::with_root_and_props(
        root,
        game::GameProps {
            config,
            seed: args.seed,
        },
    )
    .render();
}
