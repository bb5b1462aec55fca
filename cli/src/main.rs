mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use logging::LogFormat;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;
use tiptime::config;
use tiptime::currency::CurrencyFormat;
use tiptime::tip::{TipCalculator, TipPercentage};
use tiptime::ui::{run_app, tip_amount_text, App, TipForm};

#[derive(Parser, Debug)]
#[command(name = "tiptime", version)]
#[command(about = "Tip calculator for the terminal", long_about = None)]
struct Args {
    /// Cost of service; prints the tip and exits without starting the TUI
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    cost: Option<String>,

    /// Tip percentage: 15, 18 or 20
    #[arg(short, long, default_value = "15", env = "TIPTIME_PERCENTAGE")]
    percentage: TipPercentage,

    /// Round the tip up to the next whole currency unit
    #[arg(long)]
    round_up: bool,

    /// Currency locale such as en-US or de_DE.UTF-8; defaults to LC_ALL, LC_MONETARY or LANG
    #[arg(long, value_name = "LOCALE", env = "TIPTIME_LOCALE")]
    locale: Option<String>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH", env = "TIPTIME_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "compact", value_name = "FORMAT")]
    log_format: LogFormat,
}

fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

fn main() -> Result<()> {
    let args = Args::parse();
    let one_shot = args.cost.is_some();

    let _log_guard = logging::init(args.log_file.as_deref(), args.log_format, one_shot)
        .context("Setting up logging")?;

    let (locale, source) = config::resolve_locale(args.locale.as_deref(), |var| std::env::var(var).ok())
        .context("Resolving currency locale")?;
    tracing::info!(%locale, ?source, "Starting up");

    let calculator = TipCalculator::new(CurrencyFormat::for_locale(locale));

    // One-shot mode - print the tip and exit
    if let Some(cost) = args.cost {
        let formatted = calculator.calculate(&cost, args.percentage, args.round_up);
        println!("{}", tip_amount_text(&formatted));
        return Ok(());
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        tracing::error!(panic = %panic_info, "panic");
        original_hook(panic_info);
    }));

    // Setup terminal
    enable_raw_mode().context("Enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let app = App::new(calculator, locale, TipForm::new(args.percentage, args.round_up));
    let res = run_app(&mut terminal, app);

    // Restore terminal
    cleanup_terminal();
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Event loop failed");
        eprintln!("Error: {:?}", err);
    }

    tracing::info!("Shutting down");
    Ok(())
}
