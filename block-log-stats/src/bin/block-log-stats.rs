use std::{
    env,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use structopt::StructOpt;
use time::OffsetDateTime;

use block_log_stats::LogEventCounter;

/// Counts block membership events in a simulation log.
#[derive(StructOpt)]
struct Args {
    /// Path to the log file
    #[structopt(parse(from_os_str))]
    path: PathBuf,
}

/// Diagnostics go to stderr, `warn` unless `RUST_LOG` says otherwise.
fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            let time = OffsetDateTime::now_utc().time();
            writeln!(
                buf,
                "{:02}:{:02}:{:02}.{:06} [{}] {}",
                time.hour(),
                time.minute(),
                time.second(),
                time.microsecond(),
                record.level(),
                record.args()
            )
        })
        .filter(None, log::LevelFilter::Warn);
    if let Ok(rust_log) = env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let Args { path } = Args::from_args();
    let counter = LogEventCounter::open(&path)
        .with_context(|| format!("failed to analyze {}", path.display()))?;

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", counter.report())?;
    stdout.flush()?;

    Ok(())
}
