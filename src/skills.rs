//! The frontier skill catalog.
//!
//! Thirty trainable skills, each governed by one of the core attributes.
//! The catalog is closed: the `Skill` enum is the complete list, and its
//! declaration order (alphabetical) is the canonical catalog order used by
//! the character sheet and the save format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute governing a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillAttribute {
    Vigor,
    Finesse,
    Smarts,
    /// Skills that draw on raw physicality and coordination alike.
    VigorFinesse,
}

impl SkillAttribute {
    pub fn name(&self) -> &'static str {
        match self {
            SkillAttribute::Vigor => "Vigor",
            SkillAttribute::Finesse => "Finesse",
            SkillAttribute::Smarts => "Smarts",
            SkillAttribute::VigorFinesse => "Vigor/Finesse",
        }
    }
}

impl fmt::Display for SkillAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Every trainable skill, in catalog order.
///
/// `Ord` follows declaration order, so a `BTreeMap<Skill, u8>` iterates and
/// serializes in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    #[serde(rename = "Actin'")]
    Actin,
    Agriculture,
    Animals,
    Athletics,
    Bows,
    Carouse,
    #[serde(rename = "Cookin'")]
    Cookin,
    Deceive,
    Escamotage,
    #[serde(rename = "First Aid")]
    FirstAid,
    Fisticuffs,
    #[serde(rename = "Gamblin'")]
    Gamblin,
    #[serde(rename = "Gunsmithin'")]
    Gunsmithin,
    #[serde(rename = "Huntin'")]
    Huntin,
    #[serde(rename = "Intimidatin'")]
    Intimidatin,
    Language,
    Law,
    Locksmith,
    #[serde(rename = "Melee Weapons")]
    MeleeWeapons,
    #[serde(rename = "Minin'")]
    Minin,
    Navigation,
    Perception,
    Persuasion,
    #[serde(rename = "Prospectin'")]
    Prospectin,
    #[serde(rename = "Ridin'")]
    Ridin,
    #[serde(rename = "Ropin'")]
    Ropin,
    #[serde(rename = "Shootin'")]
    Shootin,
    #[serde(rename = "Sneakin'")]
    Sneakin,
    Survival,
    #[serde(rename = "Trackin'")]
    Trackin,
}

impl Skill {
    pub fn name(&self) -> &'static str {
        match self {
            Skill::Actin => "Actin'",
            Skill::Agriculture => "Agriculture",
            Skill::Animals => "Animals",
            Skill::Athletics => "Athletics",
            Skill::Bows => "Bows",
            Skill::Carouse => "Carouse",
            Skill::Cookin => "Cookin'",
            Skill::Deceive => "Deceive",
            Skill::Escamotage => "Escamotage",
            Skill::FirstAid => "First Aid",
            Skill::Fisticuffs => "Fisticuffs",
            Skill::Gamblin => "Gamblin'",
            Skill::Gunsmithin => "Gunsmithin'",
            Skill::Huntin => "Huntin'",
            Skill::Intimidatin => "Intimidatin'",
            Skill::Language => "Language",
            Skill::Law => "Law",
            Skill::Locksmith => "Locksmith",
            Skill::MeleeWeapons => "Melee Weapons",
            Skill::Minin => "Minin'",
            Skill::Navigation => "Navigation",
            Skill::Perception => "Perception",
            Skill::Persuasion => "Persuasion",
            Skill::Prospectin => "Prospectin'",
            Skill::Ridin => "Ridin'",
            Skill::Ropin => "Ropin'",
            Skill::Shootin => "Shootin'",
            Skill::Sneakin => "Sneakin'",
            Skill::Survival => "Survival",
            Skill::Trackin => "Trackin'",
        }
    }

    pub fn attribute(&self) -> SkillAttribute {
        match self {
            Skill::Carouse | Skill::Fisticuffs | Skill::Intimidatin | Skill::MeleeWeapons
            | Skill::Minin => SkillAttribute::Vigor,
            Skill::Bows | Skill::Escamotage | Skill::Locksmith | Skill::Ridin | Skill::Ropin
            | Skill::Shootin | Skill::Sneakin => SkillAttribute::Finesse,
            Skill::Actin
            | Skill::Agriculture
            | Skill::Animals
            | Skill::Cookin
            | Skill::Deceive
            | Skill::FirstAid
            | Skill::Gamblin
            | Skill::Gunsmithin
            | Skill::Language
            | Skill::Law
            | Skill::Navigation
            | Skill::Perception
            | Skill::Persuasion
            | Skill::Prospectin
            | Skill::Survival
            | Skill::Trackin => SkillAttribute::Smarts,
            Skill::Athletics | Skill::Huntin => SkillAttribute::VigorFinesse,
        }
    }

    /// Look up a skill by its display name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Skill> {
        let wanted = name.trim().to_lowercase();
        Skill::all()
            .iter()
            .find(|s| s.name().to_lowercase() == wanted)
            .copied()
    }

    /// The full catalog, in catalog order.
    pub fn all() -> &'static [Skill] {
        &[
            Skill::Actin,
            Skill::Agriculture,
            Skill::Animals,
            Skill::Athletics,
            Skill::Bows,
            Skill::Carouse,
            Skill::Cookin,
            Skill::Deceive,
            Skill::Escamotage,
            Skill::FirstAid,
            Skill::Fisticuffs,
            Skill::Gamblin,
            Skill::Gunsmithin,
            Skill::Huntin,
            Skill::Intimidatin,
            Skill::Language,
            Skill::Law,
            Skill::Locksmith,
            Skill::MeleeWeapons,
            Skill::Minin,
            Skill::Navigation,
            Skill::Perception,
            Skill::Persuasion,
            Skill::Prospectin,
            Skill::Ridin,
            Skill::Ropin,
            Skill::Shootin,
            Skill::Sneakin,
            Skill::Survival,
            Skill::Trackin,
        ]
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert!(Skill::all().len() >= 28);
    }

    #[test]
    fn test_catalog_is_sorted_and_unique() {
        let all = Skill::all();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
            assert!(
                pair[0].name().to_lowercase() < pair[1].name().to_lowercase(),
                "catalog order should match name order at {}",
                pair[1]
            );
        }
    }

    #[test]
    fn test_from_name_round_trips() {
        for skill in Skill::all() {
            assert_eq!(Skill::from_name(skill.name()), Some(*skill));
        }
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Skill::from_name("shootin'"), Some(Skill::Shootin));
        assert_eq!(Skill::from_name("  RIDIN'  "), Some(Skill::Ridin));
        assert_eq!(Skill::from_name("melee weapons"), Some(Skill::MeleeWeapons));
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert_eq!(Skill::from_name("Basket Weavin'"), None);
        assert_eq!(Skill::from_name(""), None);
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Skill::Shootin).unwrap();
        assert_eq!(json, "\"Shootin'\"");
        let back: Skill = serde_json::from_str("\"First Aid\"").unwrap();
        assert_eq!(back, Skill::FirstAid);
    }
}
