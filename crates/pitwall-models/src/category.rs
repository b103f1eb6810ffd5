//! Video category classification.

use std::fmt;

/// Separator between the category prefix and the rest of a video title.
const TITLE_SEPARATOR: &str = " - ";

/// Closed set of video categories recognized by the ingestion pipeline.
///
/// The category is the title prefix before the first `" - "`; a title
/// without the separator falls into [`VideoCategory::Other`] keyed by the
/// whole title. `RawFootage` is a reserved extension point: the pipeline
/// recognizes and dispatches it, but processing is contractually a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VideoCategory {
    /// Lap-time attempts; descriptions carry a metadata block.
    TimeAttack,
    /// Unedited session footage; recognized but not processed.
    RawFootage,
    /// Anything else; logged and skipped.
    Other(String),
}

impl VideoCategory {
    /// Classify a video by its title prefix.
    pub fn from_title(title: &str) -> Self {
        let label = title
            .split_once(TITLE_SEPARATOR)
            .map(|(prefix, _)| prefix)
            .unwrap_or(title);

        match label {
            "Time Attack" => Self::TimeAttack,
            "Raw Footage" => Self::RawFootage,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeAttack => write!(f, "Time Attack"),
            Self::RawFootage => write!(f, "Raw Footage"),
            Self::Other(label) => write!(f, "{}", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_attack_prefix() {
        assert_eq!(
            VideoCategory::from_title("Time Attack - Buttonwillow Run"),
            VideoCategory::TimeAttack
        );
    }

    #[test]
    fn test_raw_footage_prefix() {
        assert_eq!(
            VideoCategory::from_title("Raw Footage - Grid B Session 2"),
            VideoCategory::RawFootage
        );
    }

    #[test]
    fn test_only_first_separator_splits() {
        assert_eq!(
            VideoCategory::from_title("Time Attack - Tsukuba - Wet"),
            VideoCategory::TimeAttack
        );
    }

    #[test]
    fn test_unrecognized_prefix() {
        assert_eq!(
            VideoCategory::from_title("Vlog - Shop Day"),
            VideoCategory::Other("Vlog".to_string())
        );
    }

    #[test]
    fn test_title_without_separator_is_whole_title_category() {
        assert_eq!(
            VideoCategory::from_title("Season Recap 2025"),
            VideoCategory::Other("Season Recap 2025".to_string())
        );
    }
}
