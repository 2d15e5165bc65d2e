use std::io::Write;

use env_logger::{fmt::Formatter, Builder, Target, WriteStyle};
use log::Level;

use crate::cli::LogLevel;

pub fn init_logger(level: LogLevel) -> anyhow::Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level.to_filter())
        .write_style(WriteStyle::Never)
        .format(|buf: &mut Formatter, record| {
            writeln!(buf, "{} {}", level_tag(record.level()), record.args())
        })
        .target(Target::Stderr);
    // RUST_LOG wins over --log-level.
    builder.parse_default_env();

    builder
        .try_init()
        .map_err(|e| anyhow::anyhow!("logger init failed: {e}"))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
