use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// Ghostscript quality preset (`-dPDFSETTINGS`).
///
/// Variants are declared from least to most aggressive, so the derived
/// ordering doubles as the aggressiveness ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Highest fidelity, colour preserving
    Prepress,
    /// Print quality (~300 dpi)
    Printer,
    /// Medium quality (~150 dpi)
    #[default]
    Ebook,
    /// Smallest output (~72 dpi)
    Screen,
}

impl Profile {
    /// Value passed to `-dPDFSETTINGS`
    pub fn gs_setting(&self) -> &'static str {
        match self {
            Profile::Prepress => "/prepress",
            Profile::Printer => "/printer",
            Profile::Ebook => "/ebook",
            Profile::Screen => "/screen",
        }
    }

    /// Approximate image resolution Ghostscript targets for this preset
    pub fn nominal_dpi(&self) -> u32 {
        match self {
            Profile::Prepress => 300,
            Profile::Printer => 300,
            Profile::Ebook => 150,
            Profile::Screen => 72,
        }
    }

    /// Next preset down the prepress -> printer -> ebook -> screen ladder.
    pub fn downgrade(&self) -> Option<Profile> {
        match self {
            Profile::Prepress => Some(Profile::Printer),
            Profile::Printer => Some(Profile::Ebook),
            Profile::Ebook => Some(Profile::Screen),
            Profile::Screen => None,
        }
    }

    pub fn all() -> [Profile; 4] {
        [
            Profile::Prepress,
            Profile::Printer,
            Profile::Ebook,
            Profile::Screen,
        ]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gs_setting())
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    /// Accepts both `ebook` and the Ghostscript form `/ebook`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('/');
        Profile::all()
            .into_iter()
            .find(|p| p.gs_setting()[1..].eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownProfile(s.to_string()))
    }
}
