use flexi_logger::{DeferredNow, style};
use log::{Level, Record};

/// Info lines are printed bare; other levels get a coloured tag, and
/// debug/trace lines also name their module.
pub fn cli_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    let level = record.level();
    match level {
        Level::Info => write!(w, "{}", record.args()),
        Level::Error | Level::Warn => write!(
            w,
            "{}: {}",
            style(level).paint(level.as_str().to_lowercase()),
            record.args()
        ),
        Level::Debug | Level::Trace => write!(
            w,
            "{} [{}] {}",
            style(level).paint(level.as_str().to_lowercase()),
            record.module_path().unwrap_or("<unnamed>"),
            record.args()
        ),
    }
}
