const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;

/// Render a byte count for log lines, e.g. `512 B`, `48.8 KiB`, `2.7 MiB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!("0 B", format_size(0));
        assert_eq!("1023 B", format_size(1023));
    }

    #[test]
    fn test_format_size_kib() {
        assert_eq!("1.0 KiB", format_size(1024));
        // random fallback sample
        assert_eq!("48.8 KiB", format_size(50_000));
    }

    #[test]
    fn test_format_size_mib() {
        assert_eq!("2.7 MiB", format_size(2_810_784));
    }
}
