/// Round to one decimal place, the precision every reported metric uses.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole * 100`, or `None` when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
    match whole {
        positive if positive > 0 => Some(part as f64 / whole as f64 * 100.0),
        _ => None,
    }
}

/// Events per minute over `elapsed_secs`, or `None` when no time has passed.
pub fn per_minute(count: usize, elapsed_secs: f64) -> Option<f64> {
    let minutes = elapsed_secs / 60.0;
    if minutes > 0.0 {
        Some(count as f64 / minutes)
    } else {
        None
    }
}
