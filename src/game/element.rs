//! Tile Values
//!
//! The fixed set of nuclei a tile can carry. Labels follow the usual
//! mass-number-then-symbol notation; the two lightest species use their
//! particle symbols (`p`, `D`).

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// A tile value.
///
/// Ordered by mass so a reacting pair can be put into canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    /// Proton: the base unit, spawned on almost every move
    #[serde(rename = "p")]
    Proton = 0,
    /// Deuterium: rare spawn, and the product of two protons
    #[serde(rename = "D")]
    Deuterium = 1,
    /// Helium-3
    #[serde(rename = "3He")]
    Helium3 = 2,
    /// Helium-4 (alpha)
    #[serde(rename = "4He")]
    Helium4 = 3,
    /// Beryllium-8
    #[serde(rename = "8Be")]
    Beryllium8 = 4,
    /// Carbon-12
    #[serde(rename = "12C")]
    Carbon12 = 5,
    /// Carbon-13
    #[serde(rename = "13C")]
    Carbon13 = 6,
    /// Nitrogen-14
    #[serde(rename = "14N")]
    Nitrogen14 = 7,
    /// Nitrogen-15
    #[serde(rename = "15N")]
    Nitrogen15 = 8,
    /// Oxygen-16
    #[serde(rename = "16O")]
    Oxygen16 = 9,
    /// Neon-20
    #[serde(rename = "20Ne")]
    Neon20 = 10,
    /// Magnesium-24
    #[serde(rename = "24Mg")]
    Magnesium24 = 11,
    /// Silicon-28
    #[serde(rename = "28Si")]
    Silicon28 = 12,
    /// Sulfur-32
    #[serde(rename = "32S")]
    Sulfur32 = 13,
    /// Argon-36
    #[serde(rename = "36Ar")]
    Argon36 = 14,
    /// Calcium-40
    #[serde(rename = "40Ca")]
    Calcium40 = 15,
    /// Titanium-44
    #[serde(rename = "44Ti")]
    Titanium44 = 16,
    /// Chromium-48
    #[serde(rename = "48Cr")]
    Chromium48 = 17,
    /// Iron-52
    #[serde(rename = "52Fe")]
    Iron52 = 18,
    /// The end of the chain; reaching it wins the game
    #[serde(rename = "56Fe")]
    Iron56 = 19,
}

impl Element {
    /// Every element, lightest first.
    pub const ALL: [Element; 20] = [
        Element::Proton,
        Element::Deuterium,
        Element::Helium3,
        Element::Helium4,
        Element::Beryllium8,
        Element::Carbon12,
        Element::Carbon13,
        Element::Nitrogen14,
        Element::Nitrogen15,
        Element::Oxygen16,
        Element::Neon20,
        Element::Magnesium24,
        Element::Silicon28,
        Element::Sulfur32,
        Element::Argon36,
        Element::Calcium40,
        Element::Titanium44,
        Element::Chromium48,
        Element::Iron52,
        Element::Iron56,
    ];

    /// Display label, e.g. `"4He"`.
    pub const fn label(self) -> &'static str {
        match self {
            Element::Proton => "p",
            Element::Deuterium => "D",
            Element::Helium3 => "3He",
            Element::Helium4 => "4He",
            Element::Beryllium8 => "8Be",
            Element::Carbon12 => "12C",
            Element::Carbon13 => "13C",
            Element::Nitrogen14 => "14N",
            Element::Nitrogen15 => "15N",
            Element::Oxygen16 => "16O",
            Element::Neon20 => "20Ne",
            Element::Magnesium24 => "24Mg",
            Element::Silicon28 => "28Si",
            Element::Sulfur32 => "32S",
            Element::Argon36 => "36Ar",
            Element::Calcium40 => "40Ca",
            Element::Titanium44 => "44Ti",
            Element::Chromium48 => "48Cr",
            Element::Iron52 => "52Fe",
            Element::Iron56 => "56Fe",
        }
    }

    /// Parse a label. Exact match only.
    pub fn from_label(label: &str) -> Option<Element> {
        Element::ALL.iter().copied().find(|e| e.label() == label)
    }

    /// Get element from index (0-19).
    pub fn from_index(index: u8) -> Option<Element> {
        Element::ALL.get(index as usize).copied()
    }

    /// The numeric prefix of the label, if it has one.
    ///
    /// `p` and `D` carry no digits and return `None`.
    pub fn leading_number(self) -> Option<u32> {
        let label = self.label();
        let end = label
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(label.len(), |(i, _)| i);
        label[..end].parse().ok()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label that names no known element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown element label: {0:?}")]
pub struct UnknownElement(pub String);

impl FromStr for Element {
    type Err = UnknownElement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::from_label(s).ok_or_else(|| UnknownElement(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for element in Element::ALL {
            assert_eq!(Element::from_label(element.label()), Some(element));
            assert_eq!(element.label().parse::<Element>(), Ok(element));
        }
    }

    #[test]
    fn test_from_index_matches_discriminant() {
        for element in Element::ALL {
            assert_eq!(Element::from_index(element as u8), Some(element));
        }
        assert_eq!(Element::from_index(20), None);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(Element::Proton.leading_number(), None);
        assert_eq!(Element::Deuterium.leading_number(), None);
        assert_eq!(Element::Helium3.leading_number(), Some(3));
        assert_eq!(Element::Carbon12.leading_number(), Some(12));
        assert_eq!(Element::Iron56.leading_number(), Some(56));
    }

    #[test]
    fn test_unknown_label() {
        assert!(Element::from_label("He").is_none());
        assert!(matches!("xyz".parse::<Element>(), Err(UnknownElement(s)) if s == "xyz"));
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Element::Oxygen16).unwrap();
        assert_eq!(json, "\"16O\"");
        let back: Element = serde_json::from_str("\"p\"").unwrap();
        assert_eq!(back, Element::Proton);
    }

    #[test]
    fn test_ordering_is_by_mass() {
        assert!(Element::Proton < Element::Deuterium);
        assert!(Element::Helium4 < Element::Carbon12);
        assert!(Element::Iron52 < Element::Iron56);
    }
}
