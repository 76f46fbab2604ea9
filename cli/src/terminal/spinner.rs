use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Span carrying the scan progress bar. Entering it (or instrumenting a future with
/// it) shows the bar; it disappears once every clone is dropped.
pub fn scan_progress_span(total_hosts: usize, quiet: u8) -> Span {
    if quiet > 1 {
        return Span::none();
    }

    let span: Span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(&progress_style());
    span.pb_set_length(total_hosts as u64);
    span.pb_set_message("Scanning hosts");
    span
}

pub fn report_host_scanned(span: &Span) {
    span.pb_inc(1);
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} {pos}/{len} {wide_bar:.green/bright_black}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
}
