//! Lap-time parsing.
//!
//! Lap times arrive as free text inside video descriptions, either as
//! `M:SS.fff` (minutes and seconds) or a bare `SS.fff` seconds value.

/// Parse a lap-time string to total seconds.
///
/// Supports formats:
/// - `M:SS` or `M:SS.fff`
/// - `SS` or `SS.fff`
///
/// # Examples
/// ```
/// use pitwall_models::laptime::parse_lap_time;
/// assert_eq!(parse_lap_time("1:12.123").unwrap(), 72.123);
/// assert_eq!(parse_lap_time("45.5").unwrap(), 45.5);
/// ```
pub fn parse_lap_time(raw: &str) -> Result<f64, LapTimeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LapTimeError::Empty);
    }

    let parts: Vec<&str> = raw.split(':').collect();
    match parts.len() {
        1 => {
            let seconds: f64 = parts[0]
                .parse()
                .map_err(|_| LapTimeError::InvalidValue("seconds", parts[0].to_string()))?;
            if seconds < 0.0 {
                return Err(LapTimeError::Negative);
            }
            Ok(seconds)
        }
        2 => {
            let minutes: u32 = parts[0]
                .parse()
                .map_err(|_| LapTimeError::InvalidValue("minutes", parts[0].to_string()))?;
            let seconds: f64 = parts[1]
                .parse()
                .map_err(|_| LapTimeError::InvalidValue("seconds", parts[1].to_string()))?;
            if seconds < 0.0 {
                return Err(LapTimeError::Negative);
            }
            Ok(f64::from(minutes) * 60.0 + seconds)
        }
        _ => Err(LapTimeError::InvalidFormat(raw.to_string())),
    }
}

/// Lap-time parsing error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LapTimeError {
    #[error("Lap time cannot be empty")]
    Empty,

    #[error("Lap time cannot be negative")]
    Negative,

    #[error("Invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid lap time format '{0}'. Use M:SS.fff or SS.fff")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_and_seconds() {
        assert_eq!(parse_lap_time("1:12.123").unwrap(), 72.123);
        assert_eq!(parse_lap_time("0:59").unwrap(), 59.0);
        assert_eq!(parse_lap_time("2:00.5").unwrap(), 120.5);
    }

    #[test]
    fn test_parse_bare_seconds() {
        assert_eq!(parse_lap_time("45.5").unwrap(), 45.5);
        assert_eq!(parse_lap_time("90").unwrap(), 90.0);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_lap_time(" 1:12.123 ").unwrap(), 72.123);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_lap_time(""), Err(LapTimeError::Empty)));
        assert!(matches!(parse_lap_time("   "), Err(LapTimeError::Empty)));
        assert!(matches!(
            parse_lap_time("abc"),
            Err(LapTimeError::InvalidValue("seconds", _))
        ));
        assert!(matches!(
            parse_lap_time("x:12.1"),
            Err(LapTimeError::InvalidValue("minutes", _))
        ));
        assert!(matches!(
            parse_lap_time("1:2:3"),
            Err(LapTimeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(matches!(parse_lap_time("-5"), Err(LapTimeError::Negative)));
        assert!(matches!(
            parse_lap_time("1:-5"),
            Err(LapTimeError::Negative)
        ));
    }

    #[test]
    fn test_fractional_minutes_rejected() {
        // Minutes must be a whole number; "1.5:00" is not a lap time.
        assert!(matches!(
            parse_lap_time("1.5:00"),
            Err(LapTimeError::InvalidValue("minutes", _))
        ));
    }
}
