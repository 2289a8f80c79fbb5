use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use terrasort::config::{
    VisualizerConfig, DEFAULT_COLS, DEFAULT_FRAME_RATE, DEFAULT_ROWS, DEFAULT_STEP_DELAY_MS,
};
use terrasort::observer::{NullSink, PacedSink};
use terrasort::session::{Command, Flow, SessionController, SessionError};
use terrasort::sorting::SortAlgorithm;
use terrasort::source::{DataSource, SyntheticTerrain};
use terrasort::theme::ColorTheme;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "terrasort",
    version,
    about = "Animate classic sorting algorithms over a grid of elevation samples"
)]
struct Cli {
    /// Grid rows to fetch.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Grid columns to fetch.
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Seed for terrain generation and shuffles.
    #[arg(long, env = "TERRASORT_SEED")]
    seed: Option<u64>,

    /// Delay per observed event in milliseconds.
    #[arg(long, default_value_t = DEFAULT_STEP_DELAY_MS)]
    delay_ms: u64,

    /// Frame cap for the animation (0 disables it).
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE)]
    fps: u32,

    /// Algorithm by name or menu number (1 Quick, 2 Merge, 3 Insertion,
    /// 4 Selection, 5 Heap, 6 Bubble). Unknown values fall back to Quick Sort.
    #[arg(short, long, default_value = "quick")]
    algorithm: String,

    /// Color theme handed to the renderer.
    #[arg(long, default_value = "terrain")]
    theme: ColorTheme,

    /// Shuffle the grid before the first run.
    #[arg(long)]
    shuffle: bool,

    /// Run every algorithm on the same order without pacing and print a table.
    #[arg(long, conflicts_with = "interactive")]
    compare_all: bool,

    /// Read commands from stdin: r(eset), s(huffle), t(heme), p (replay),
    /// q(uit), or an algorithm name/number.
    #[arg(short, long)]
    interactive: bool,
}

impl Cli {
    fn config(&self) -> VisualizerConfig {
        VisualizerConfig {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed,
            frame_rate: self.fps,
            step_delay: Duration::from_millis(self.delay_ms),
            theme: self.theme,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config();
    config.validate().context("invalid grid configuration")?;

    info!("Fetching elevation data...");
    let mut session = SessionController::new(SyntheticTerrain::new(config.seed()), &config);
    if let Err(err) = session.load() {
        bail!("{err}; nothing to visualize");
    }
    if cli.shuffle {
        session.shuffle();
    }

    if cli.compare_all {
        return compare_all(&mut session);
    }

    let mut sink = PacedSink::new(NullSink, config.step_delay, config.frame_rate);
    if cli.interactive {
        return interactive(&mut session, &mut sink);
    }

    let algorithm = select_algorithm(&cli.algorithm);
    println!("Running: {algorithm}...");
    let metrics = session.run(algorithm, &mut sink)?;
    print_summary(&session);
    println!("{metrics}");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn select_algorithm(choice: &str) -> SortAlgorithm {
    choice.parse().unwrap_or_else(|err| {
        warn!(%err, "falling back to default algorithm");
        SortAlgorithm::default()
    })
}

fn compare_all<D: DataSource>(session: &mut SessionController<D>) -> Result<()> {
    print_summary(session);
    println!("{:<16} {:>12} {:>10} {:>12}", "algorithm", "comparisons", "swaps", "time");
    for algorithm in SortAlgorithm::ALL {
        let metrics = session.run(algorithm, &mut NullSink)?;
        println!(
            "{:<16} {:>12} {:>10} {:>11.3}ms",
            algorithm.name(),
            metrics.comparisons,
            metrics.swaps,
            metrics.elapsed.as_secs_f64() * 1000.0
        );
    }
    Ok(())
}

fn interactive<D: DataSource>(
    session: &mut SessionController<D>,
    sink: &mut PacedSink<NullSink>,
) -> Result<()> {
    print_menu();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("[{} | {}] > ", session.state(), session.theme());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match session.apply(command, sink) {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => report(session, command),
            // Load failures keep the previous dataset around; keep going.
            Err(err @ SessionError::DataUnavailable(_)) => println!("{err}"),
            Err(err @ SessionError::NothingToReplay) => println!("{err}"),
            Err(err) => return Err(err.into()),
        }
    }
}

fn report<D: DataSource>(session: &SessionController<D>, command: Command) {
    match command {
        Command::Select(_) | Command::Replay => println!("{}", session.metrics()),
        Command::Reset => print_summary(session),
        Command::Shuffle => println!("shuffled {} samples", session.working().len()),
        Command::CycleTheme => println!("theme: {}", session.theme()),
        Command::Quit => {}
    }
}

fn print_menu() {
    println!("Choose a sorting algorithm to visualize:");
    for algorithm in SortAlgorithm::menu() {
        println!("{}. {}", algorithm.menu_number(), algorithm);
    }
    println!("r: reset  s: shuffle  t: theme  p: replay  q: quit");
}

fn print_summary<D: DataSource>(session: &SessionController<D>) {
    let Some(summary) = session.summary() else {
        return;
    };
    for (label, sample) in [
        ("min", summary.min),
        ("median", summary.median),
        ("max", summary.max),
    ] {
        println!(
            "{label:>6}: {:>8.1} m at ({:.2}, {:.2})",
            sample.elevation, sample.latitude, sample.longitude
        );
    }
}
