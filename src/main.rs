//! handctl — hand-gesture OS control with a point-and-pinch virtual
//! keyboard.
//!
//! One hand (right) drives the pointer, clicks, scrolling, window and
//! app switching, and screenshots; the other (left) types on a two-layer
//! virtual keyboard.  Hand landmarks come from an external tracking
//! helper; OS actions go out through an injection backend.

mod config;
mod dispatch;
mod executor;
mod frame_stats;
mod hand;
mod provider;
mod session;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use config::AppConfig;
use dispatch::ActionDispatcher;
use executor::SystemExecutor;
use hand::keyboard::KeyboardConfig;
use provider::SubprocessProvider;
use session::Session;

#[derive(Parser, Debug)]
#[command(name = "handctl", about = "Hand-gesture OS control and virtual keyboard")]
struct Cli {
    /// Configuration file path
    #[arg(long, default_value = "handctl.json")]
    config: PathBuf,

    /// Tracking provider command, overriding the config
    /// (e.g. "python3 hand_provider.py --camera 1")
    #[arg(long)]
    provider_cmd: Option<String>,

    /// Display size override as WIDTHxHEIGHT, skipping the OS query
    #[arg(long)]
    screen_size: Option<String>,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("handctl {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handctl=info".into()),
        )
        .init();

    info!("handctl v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(cmd) = &cli.provider_cmd {
        let mut parts = cmd.split_whitespace().map(str::to_string);
        config.provider.command = parts.next().context("empty provider command")?;
        config.provider.args = parts.collect();
    }

    let screen = match &cli.screen_size {
        Some(spec) => parse_screen_size(spec)?,
        None => match (config.control.screen_width, config.control.screen_height) {
            (Some(w), Some(h)) => (w, h),
            _ => executor::detect_screen_size(),
        },
    };
    info!("target display: {}x{}", screen.0, screen.1);

    let screenshot_dir = PathBuf::from(&config.control.screenshot_dir);
    std::fs::create_dir_all(&screenshot_dir)
        .with_context(|| format!("creating {}", screenshot_dir.display()))?;

    let provider = SubprocessProvider::spawn(
        &config.provider.command,
        &config.provider.args,
        config.provider.min_score,
    )?;
    let executor = SystemExecutor::new()?;
    let dispatcher = ActionDispatcher::new(screen, config.control.scroll_step, screenshot_dir);
    let keyboard = KeyboardConfig {
        origin_x: config.keyboard.origin_x,
        origin_y: config.keyboard.origin_y,
        key_width: config.keyboard.key_width,
        key_height: config.keyboard.key_height,
        gap: config.keyboard.gap,
        press_cooldown: Duration::from_secs_f32(config.keyboard.press_cooldown_s),
    };

    let mut session = Session::new(Box::new(provider), Box::new(executor), dispatcher, keyboard);
    session.run()
}

/// Parse a "WIDTHxHEIGHT" display size spec.
fn parse_screen_size(spec: &str) -> Result<(u32, u32)> {
    let (w, h) = spec
        .split_once('x')
        .with_context(|| format!("expected WIDTHxHEIGHT, got {spec:?}"))?;
    Ok((
        w.parse().with_context(|| format!("bad width in {spec:?}"))?,
        h.parse().with_context(|| format!("bad height in {spec:?}"))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_screen_size() {
        assert_eq!(parse_screen_size("1920x1080").unwrap(), (1920, 1080));
        assert_eq!(parse_screen_size("2560x1440").unwrap(), (2560, 1440));
        assert!(parse_screen_size("1920").is_err());
        assert!(parse_screen_size("axb").is_err());
        assert!(parse_screen_size("").is_err());
    }
}
