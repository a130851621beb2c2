use std::time::Duration;

const MS_PER_SEC: u128 = 1_000;
const US_PER_MS: u128 = 1_000;
const SECS_PER_MIN: u64 = 60;

/// `12.34%` from a percentage scaled by 100.
pub(crate) fn format_percent_x100(value_x100: u64) -> String {
    let whole = value_x100.checked_div(100).unwrap_or(0);
    let frac = value_x100.checked_rem(100).unwrap_or(0);
    format!("{whole}.{frac:02}%")
}

/// `12.3ms` for sub-second latencies, `1.23s` above.
pub(crate) fn format_latency(latency: Duration) -> String {
    let micros = latency.as_micros();
    let millis = micros.checked_div(US_PER_MS).unwrap_or(0);
    if millis >= MS_PER_SEC {
        let secs = millis.checked_div(MS_PER_SEC).unwrap_or(0);
        let hundredths = millis
            .checked_rem(MS_PER_SEC)
            .and_then(|rem| rem.checked_div(10))
            .unwrap_or(0);
        return format!("{secs}.{hundredths:02}s");
    }
    let tenths = micros
        .checked_rem(US_PER_MS)
        .and_then(|rem| rem.checked_div(100))
        .unwrap_or(0);
    format!("{millis}.{tenths}ms")
}

/// `1m05s`, or `42s` under a minute.
pub(crate) fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    let minutes = secs.checked_div(SECS_PER_MIN).unwrap_or(0);
    let rem = secs.checked_rem(SECS_PER_MIN).unwrap_or(0);
    if minutes > 0 {
        format!("{minutes}m{rem:02}s")
    } else {
        format!("{rem}s")
    }
}

pub(crate) fn format_bytes_compact(bytes: u128) -> String {
    const KB: u128 = 1_000;
    const MB: u128 = 1_000_000;
    const GB: u128 = 1_000_000_000;

    let (scale, suffix) = if bytes >= GB {
        (GB, "GB")
    } else if bytes >= MB {
        (MB, "MB")
    } else if bytes >= KB {
        (KB, "KB")
    } else {
        return format!("{bytes}B");
    };
    let whole = bytes.checked_div(scale).unwrap_or(0);
    let frac = bytes
        .saturating_sub(whole.saturating_mul(scale))
        .saturating_mul(100)
        .checked_div(scale)
        .unwrap_or(0);
    format!("{whole}.{frac:02}{suffix}")
}

/// Throughput in MB/s with two decimals.
pub(crate) fn format_mb_per_sec(bytes_per_sec: u64) -> String {
    const MB: u64 = 1_000_000;
    let whole = bytes_per_sec.checked_div(MB).unwrap_or(0);
    let frac = bytes_per_sec
        .checked_rem(MB)
        .and_then(|rem| rem.checked_div(MB / 100))
        .unwrap_or(0);
    format!("{whole}.{frac:02} MB/s")
}

/// Shortens `text` to `max` characters, marking the cut with `…`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
