//! xtask dev - run the terminal emulator
//!
//! Without `--watch` the emulator runs in the foreground until it exits.
//! With `--watch` it is spawned as a child process and killed, rebuilt, and
//! restarted whenever a `.rs` or `.toml` file under the watched paths changes.
//! Keys typed into the terminal go straight to the child's stdin.

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use platform::config;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

const WATCH_PATHS: [&str; 4] = [
    "crates/platform/src",
    "crates/playback/src",
    "crates/firmware/src",
    "crates/firmware/examples",
];

/// Ignore change bursts closer together than this.
const REBUILD_DEBOUNCE: Duration = Duration::from_millis(500);

pub fn run(watch: bool) -> Result<()> {
    clear_screen();
    print_banner();

    if !watch {
        let status = emulator_command()
            .status()
            .context("Failed to run cargo")?;
        if !status.success() {
            anyhow::bail!("Emulator exited with code: {:?}", status.code());
        }
        return Ok(());
    }

    println!("{}", "Starting watch mode".bold());
    println!("{}", format!("Watching: {}", WATCH_PATHS.join(", ")).dimmed());
    println!();

    let mut emulator = spawn_or_report();

    let (tx, rx) = channel();
    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                    && event.paths.iter().any(|p| {
                        p.extension()
                            .is_some_and(|ext| ext == "rs" || ext == "toml")
                    })
                {
                    let _ = tx.send(());
                }
            }
        },
        notify::Config::default(),
    )?;

    for path in WATCH_PATHS.iter().map(Path::new).chain([Path::new("Cargo.toml")]) {
        if path.exists() {
            let mode = if path.is_dir() {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            watcher
                .watch(path, mode)
                .with_context(|| format!("Failed to watch path: {}", path.display()))?;
        }
    }

    println!("{}", "Save any .rs or .toml file to rebuild".dimmed());
    println!("{}", "Press Ctrl+C to stop".dimmed());
    println!();

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(()) => {
                if last_rebuild.elapsed() < REBUILD_DEBOUNCE {
                    continue;
                }
                std::thread::sleep(Duration::from_millis(200));
                while rx.try_recv().is_ok() {}
                last_rebuild = Instant::now();

                stop(emulator.take());
                clear_screen();
                print_banner();
                println!("{}", "Changes detected - rebuilding...".yellow().bold());
                emulator = spawn_or_report();
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(child) = emulator.as_mut() {
                    if let Ok(Some(status)) = child.try_wait() {
                        println!();
                        if status.success() {
                            println!("{}", "Emulator exited normally".yellow());
                        } else {
                            println!(
                                "{}",
                                format!("Emulator exited with code: {:?}", status.code())
                                    .yellow()
                            );
                        }
                        println!("{}", "Waiting for changes...".dimmed());
                        emulator = None;
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                eprintln!("Watcher stopped");
                break;
            }
        }
    }

    stop(emulator);
    Ok(())
}

fn emulator_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args([
        "run",
        "-p",
        "firmware",
        "--example",
        "jukebox_emulator",
        "--features",
        "emulator",
    ])
    .stdin(Stdio::inherit())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit());

    // Default the child's filter to "info" so controller decisions show up.
    if std::env::var("RUST_LOG").is_err() {
        cmd.env("RUST_LOG", "info");
    }
    cmd
}

fn spawn_or_report() -> Option<Child> {
    let start = Instant::now();
    match emulator_command().spawn() {
        Ok(child) => {
            println!(
                "{}",
                format!("Started in {:.1}s", start.elapsed().as_secs_f64()).green()
            );
            println!();
            Some(child)
        }
        Err(e) => {
            eprintln!("{}", format!("Failed to start emulator: {e}").red().bold());
            eprintln!("{}", "Fix errors and save to trigger rebuild".dimmed());
            None
        }
    }
}

fn stop(child: Option<Child>) {
    if let Some(mut child) = child {
        let _ = child.kill();
        let _ = child.wait();
    }
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    io::stdout().flush().ok();
}

fn print_banner() {
    let banner_text = format!("     {} - Development Mode       ", config::APP_NAME);
    println!("{}", "═════════════════════════════════════════════".cyan());
    println!("{}", banner_text.cyan().bold());
    println!("{}", "═════════════════════════════════════════════".cyan());
    println!();
}
