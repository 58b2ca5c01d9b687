//! Jukebox Emulator
//!
//! Drives the real controller from the terminal. Type keys and press Enter:
//! digits pick a track, `*`/`#` step, `r` shuffles, `+`/`-` change volume,
//! `R` toggles repeat, `p` pauses, `e` cycles the EQ, `b` is the play
//! button, and `L` simulates a low battery. `q` quits.
//!
//! Run with: cargo run -p firmware --example jukebox_emulator --features emulator
//! Set RUST_LOG=debug to see every key and command.
#![allow(clippy::print_stdout)]

use std::io::BufRead;

use embassy_time::{Duration, Instant};
use firmware::{
    map_char, try_send_event, ChannelInput, ConsoleFeedback, SimulatedPlayer, INPUT_CHANNEL,
};
use platform::config::{self, JukeboxConfig};
use playback::Jukebox;
use tracing_subscriber::EnvFilter;

/// How long each simulated track plays.
const TRACK_LENGTH: Duration = Duration::from_secs(8);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("{} - {}", config::APP_NAME, config::APP_DESCRIPTION);
    println!(
        "Every track lasts {} s. Type keys, then Enter; q quits.\n",
        TRACK_LENGTH.as_secs()
    );

    let mut jukebox = Jukebox::new(
        JukeboxConfig::default(),
        SimulatedPlayer::new(TRACK_LENGTH),
        ConsoleFeedback::new(),
    )
    .map_err(|e| format!("invalid configuration: {e}"))?;

    std::thread::spawn(|| {
        let tx = INPUT_CHANNEL.sender();
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            for c in line.chars() {
                if c == 'q' {
                    std::process::exit(0);
                }
                // Keys typed on one line arrive together; space them out so
                // the keypad debounce does not swallow them.
                if let Some(event) = map_char(c) {
                    try_send_event(&tx, event);
                    std::thread::sleep(std::time::Duration::from_millis(300));
                }
            }
        }
        std::process::exit(0);
    });

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(async {
        jukebox.start(Instant::now());
        firmware::run(&mut jukebox, &mut ChannelInput::global()).await
    })
}
