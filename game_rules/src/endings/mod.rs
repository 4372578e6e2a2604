//! The five ways a night can end.

use serde::{Deserialize, Serialize};

/// Terminal reason for a playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingKind {
    /// Sanity reached zero.
    Sanity,
    /// Car condition reached zero.
    Crash,
    /// The clock reached dawn.
    Survived,
    /// The locket was returned.
    TrueEnding,
    /// She caught you.
    Captured,
}

impl EndingKind {
    pub const ALL: [EndingKind; 5] = [
        EndingKind::Sanity,
        EndingKind::Crash,
        EndingKind::Survived,
        EndingKind::TrueEnding,
        EndingKind::Captured,
    ];

    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            EndingKind::Sanity => "sanity",
            EndingKind::Crash => "crash",
            EndingKind::Survived => "survived",
            EndingKind::TrueEnding => "true_ending",
            EndingKind::Captured => "captured",
        }
    }

    /// Parse a reason code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Title shown on the ending card. The true ending has none.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            EndingKind::Sanity => Some("THE MADNESS"),
            EndingKind::Crash => Some("THE CRASH"),
            EndingKind::Survived => Some("THE SURVIVOR"),
            EndingKind::Captured => Some("THE CAPTURED"),
            EndingKind::TrueEnding => None,
        }
    }
}

impl std::fmt::Display for EndingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for kind in EndingKind::ALL {
            assert_eq!(EndingKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(EndingKind::from_code("escaped"), None);
    }

    #[test]
    fn test_serde_names_match_codes() {
        for kind in EndingKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }

    #[test]
    fn test_only_true_ending_is_untitled() {
        let untitled: Vec<_> = EndingKind::ALL
            .into_iter()
            .filter(|kind| kind.title().is_none())
            .collect();
        assert_eq!(untitled, vec![EndingKind::TrueEnding]);
    }
}
