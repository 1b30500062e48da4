//! Utility helpers for rendering radio data and gated diagnostics.

/// Renders a hardware address as colon-delimited lowercase hex.
pub(crate) fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Logs a manager diagnostic.
///
/// Verbose managers log at `info`, everything else at `debug`.
/// Usage: `diag!(verbose, "Attempt #{}", n)`
macro_rules! diag {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            log::info!($($arg)+);
        } else {
            log::debug!($($arg)+);
        }
    };
}

pub(crate) use diag;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mac() {
        assert_eq!(
            format_mac(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
            "00:11:22:33:44:55"
        );
    }

    #[test]
    fn test_format_mac_is_lowercase() {
        assert_eq!(
            format_mac(&[0xde, 0xad, 0xBE, 0xEF, 0x0A, 0xff]),
            "de:ad:be:ef:0a:ff"
        );
    }

    #[test]
    fn test_format_mac_zero() {
        assert_eq!(format_mac(&[0; 6]), "00:00:00:00:00:00");
    }
}
