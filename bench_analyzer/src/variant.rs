//!
//! The benchmark build variant.
//!

use std::str::FromStr;

///
/// The benchmark build variant.
///
/// Each variant corresponds to one build of the benchmark corpus and one
/// column group in the comparison reports.
///
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// The build running on a vanilla emulator without the security extension.
    NoExtension,
    /// The unmodified sources built for the extended emulator.
    Original,
    /// The sources with security instrumentation applied.
    Protected,
}

impl Variant {
    /// All variants in the order they are measured and reported.
    pub const ALL: [Self; 3] = [Self::NoExtension, Self::Original, Self::Protected];

    ///
    /// Returns the baseline variant degradation percentages are computed against.
    ///
    pub fn reference() -> Self {
        Self::NoExtension
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "no_extension" => Ok(Self::NoExtension),
            "original" => Ok(Self::Original),
            "protected" => Ok(Self::Protected),
            _ => Err(anyhow::anyhow!(
                "Unknown variant `{}`. Supported variants: {}",
                string,
                Self::ALL
                    .into_iter()
                    .map(|variant| variant.to_string())
                    .collect::<Vec<String>>()
                    .join(", ")
            )),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoExtension => write!(f, "no_extension"),
            Self::Original => write!(f, "original"),
            Self::Protected => write!(f, "protected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Variant;

    #[test]
    fn string_round_trip() {
        for variant in Variant::ALL {
            let parsed =
                Variant::from_str(variant.to_string().as_str()).expect("Always parseable");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn unknown_variant() {
        assert!(Variant::from_str("hardened").is_err());
    }

    #[test]
    fn reference_is_no_extension() {
        assert_eq!(Variant::reference(), Variant::NoExtension);
    }
}
