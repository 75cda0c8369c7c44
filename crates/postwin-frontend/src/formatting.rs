/// Formats a model confidence in `[0.0, 1.0]` as a whole-number percentage.
pub fn format_confidence(confidence: f32) -> String {
    format!("{:.0}%", confidence.clamp(0.0, 1.0) * 100.0)
}

/// Formats an opacity scalar as a whole-number percentage.
pub fn format_opacity(opacity: f32) -> String {
    format!("{:.0}%", opacity * 100.0)
}

/// Formats the decimation interval for the settings label.
pub fn format_sample_interval(interval: u32) -> String {
    format!("every {interval} frames")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_rounded_and_clamped() {
        assert_eq!(format_confidence(0.873), "87%");
        assert_eq!(format_confidence(0.005), "1%");
        assert_eq!(format_confidence(1.7), "100%");
        assert_eq!(format_confidence(-0.2), "0%");
    }

    #[test]
    fn interval_label_reads_naturally() {
        assert_eq!(format_sample_interval(30), "every 30 frames");
    }
}
