use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rules;
use super::table::SubstitutionTable;
use crate::error::CdiceError;

/// Built-in romanisation schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// Conway's Custom Romanisation, the canonical scheme
    Conway,
    /// Jyutping (LSHK)
    Jyutping,
    /// Sidney Lau
    SidneyLau,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Conway, Scheme::Jyutping, Scheme::SidneyLau];

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Conway => "conway",
            Scheme::Jyutping => "jyutping",
            Scheme::SidneyLau => "sidney_lau",
        }
    }

    /// Whether this is the scheme every list is derived from
    pub fn is_canonical(self) -> bool {
        self == Scheme::Conway
    }

    /// Build this scheme's substitution table
    pub fn table(self) -> SubstitutionTable {
        match self {
            Scheme::Conway => rules::conway(),
            Scheme::Jyutping => rules::jyutping(),
            Scheme::SidneyLau => rules::sidney_lau(),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = CdiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "conway" => Ok(Scheme::Conway),
            "jyutping" => Ok(Scheme::Jyutping),
            "sidney_lau" | "sidneylau" => Ok(Scheme::SidneyLau),
            _ => Err(CdiceError::UnknownScheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scheme() {
        assert_eq!("jyutping".parse::<Scheme>().unwrap(), Scheme::Jyutping);
        assert_eq!("Sidney-Lau".parse::<Scheme>().unwrap(), Scheme::SidneyLau);
        assert_eq!("sidney_lau".parse::<Scheme>().unwrap(), Scheme::SidneyLau);
        assert!(matches!(
            "yale".parse::<Scheme>(),
            Err(CdiceError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_names_round_trip() {
        for scheme in Scheme::ALL {
            assert_eq!(scheme.name().parse::<Scheme>().unwrap(), scheme);
            assert_eq!(scheme.table().name(), scheme.name());
        }
        assert!(Scheme::Conway.is_canonical());
        assert!(!Scheme::Jyutping.is_canonical());
    }
}
