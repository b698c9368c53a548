//! Character record and skill allocation.
//!
//! A `Character` aggregates identity, attributes, age bracket, trained
//! skills, and gear, and enforces the point-buy constraints during skill
//! allocation. Rendering the character sheet is pure: the shell decides
//! where the text goes.

use crate::rules::{AgeBracket, AttributeDeltas};
use crate::skills::Skill;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Lowest legal attribute score.
pub const ATTRIBUTE_MIN: u8 = 3;

/// Highest legal attribute score.
pub const ATTRIBUTE_MAX: u8 = 18;

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// The three core attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Vigor,
    Finesse,
    Smarts,
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Vigor => "Vigor",
            Attribute::Finesse => "Finesse",
            Attribute::Smarts => "Smarts",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Attribute::Vigor => "Strength & Toughness",
            Attribute::Finesse => "Agility & Coordination",
            Attribute::Smarts => "Intelligence & Awareness",
        }
    }

    pub fn all() -> [Attribute; 3] {
        [Attribute::Vigor, Attribute::Finesse, Attribute::Smarts]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Attribute scores container. Scores are valid in [3, 18].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub vigor: u8,
    pub finesse: u8,
    pub smarts: u8,
}

impl Attributes {
    pub fn new(vigor: u8, finesse: u8, smarts: u8) -> Self {
        Self {
            vigor,
            finesse,
            smarts,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Vigor => self.vigor,
            Attribute::Finesse => self.finesse,
            Attribute::Smarts => self.smarts,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: u8) {
        match attribute {
            Attribute::Vigor => self.vigor = value,
            Attribute::Finesse => self.finesse = value,
            Attribute::Smarts => self.smarts = value,
        }
    }

    /// D&D-style modifier: 8-9 is -1, 10-11 is 0, 12-13 is +1.
    pub fn modifier(&self, attribute: Attribute) -> i8 {
        let score = self.get(attribute) as i8;
        (score - 10).div_euclid(2)
    }

    pub fn in_valid_range(&self) -> bool {
        Attribute::all()
            .iter()
            .all(|&a| (ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&self.get(a)))
    }

    /// Apply a bracket's deltas, clamping each score to [3, 18].
    pub fn apply(&mut self, deltas: AttributeDeltas) {
        self.vigor = clamp_score(self.vigor as i16 + deltas.vigor as i16);
        self.finesse = clamp_score(self.finesse as i16 + deltas.finesse as i16);
        self.smarts = clamp_score(self.smarts as i16 + deltas.smarts as i16);
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(10, 10, 10)
    }
}

fn clamp_score(value: i16) -> u8 {
    value.clamp(ATTRIBUTE_MIN as i16, ATTRIBUTE_MAX as i16) as u8
}

// ============================================================================
// Creation lifecycle
// ============================================================================

/// Creation lifecycle stage. Transitions are one-directional; there is no
/// way back to `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreationStage {
    /// Attributes set, no bracket yet.
    Draft,
    /// Age effects applied; skill budget known.
    BracketApplied,
    /// At least one skill allocation has happened.
    Allocating,
    /// Persisted or explicitly marked complete.
    Finalized,
}

// ============================================================================
// Skill allocation
// ============================================================================

/// Errors from skill allocation.
///
/// Checks run in a fixed order so error reporting is deterministic when
/// several constraints would trip at once: catalog membership, then
/// non-negativity, then the distinct-skill cap, then the budget.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("no such skill in the catalog: {0:?}")]
    UnknownSkill(String),
    #[error("{skill} cannot drop below level 0")]
    NegativeAllocation { skill: Skill },
    #[error("a {bracket} character may train at most {cap} skills")]
    SkillCapExceeded { bracket: AgeBracket, cap: usize },
    #[error("not enough skill points: {requested} requested, {remaining} remaining")]
    BudgetExceeded { requested: u16, remaining: u16 },
}

// ============================================================================
// Character
// ============================================================================

/// A Whiskey Hollow character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub age: u8,

    // Core stats
    pub attributes: Attributes,
    pub level: u8,
    pub experience: u32,
    pub dollars: u16,

    // Age effects
    pub bracket: Option<AgeBracket>,
    pub stage: CreationStage,

    // Skills; only levels above zero are stored
    pub skills: BTreeMap<Skill, u8>,
    pub skill_points: u16,

    // Derived stats
    pub hit_points: u8,
    pub max_hit_points: u8,

    // Gear
    pub equipment: Vec<String>,
    pub weapon: String,
    pub armor: String,
    pub location: String,
}

impl Character {
    /// Create a draft character with starting gear.
    pub fn new(name: impl Into<String>, age: u8, attributes: Attributes) -> Self {
        let mut character = Self {
            id: CharacterId::new(),
            name: name.into(),
            age,
            attributes,
            level: 1,
            experience: 0,
            dollars: 0,
            bracket: None,
            stage: CreationStage::Draft,
            skills: BTreeMap::new(),
            skill_points: 0,
            hit_points: 0,
            max_hit_points: 0,
            equipment: vec![
                "Worn Boots".to_string(),
                "Tattered Hat".to_string(),
                "Old Knife".to_string(),
            ],
            weapon: "Old Knife".to_string(),
            armor: "Worn Clothes".to_string(),
            location: "Whiskey Hollow".to_string(),
        };
        character.recalculate_derived_stats();
        character
    }

    /// Recompute hit points from attributes.
    pub fn recalculate_derived_stats(&mut self) {
        let attrs = self.attributes;
        self.max_hit_points = (attrs.vigor + attrs.finesse + attrs.smarts) / 3;
        self.hit_points = self.max_hit_points;
    }

    /// Apply a bracket's one-time effects: attribute deltas (clamped to the
    /// valid range) and the skill-point grant.
    ///
    /// Deltas are additive. Calling this twice double-applies them; the
    /// creation flow is responsible for invoking it exactly once per
    /// character.
    pub fn apply_age_effects(&mut self, bracket: AgeBracket) {
        self.attributes.apply(bracket.attribute_deltas());
        self.skill_points += bracket.skill_points();
        self.bracket = Some(bracket);
        self.stage = CreationStage::BracketApplied;
        self.recalculate_derived_stats();
    }

    /// Current level of a skill (0 if untrained).
    pub fn skill_level(&self, skill: Skill) -> u8 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    /// Number of distinct skills holding points.
    pub fn trained_skill_count(&self) -> usize {
        self.skills.len()
    }

    /// Total skill points spent so far.
    pub fn spent_skill_points(&self) -> u16 {
        self.skills.values().map(|&level| level as u16).sum()
    }

    /// Move `delta` points into (or out of) a skill by name.
    ///
    /// Validation is all-or-nothing: a rejected allocation leaves the
    /// character untouched. On success, returns the remaining budget.
    pub fn allocate_skill(&mut self, name: &str, delta: i32) -> Result<u16, AllocationError> {
        let skill = Skill::from_name(name)
            .ok_or_else(|| AllocationError::UnknownSkill(name.to_string()))?;

        let current = self.skill_level(skill) as i32;
        let next = current + delta;
        if next < 0 {
            return Err(AllocationError::NegativeAllocation { skill });
        }

        // The cap on distinct skills only matters when this allocation
        // would newly raise a skill above zero.
        if current == 0 && next > 0 {
            if let Some(bracket) = self.bracket {
                let cap = bracket.skill_cap();
                if self.trained_skill_count() >= cap {
                    return Err(AllocationError::SkillCapExceeded { bracket, cap });
                }
            }
        }

        if delta > 0 && delta as u16 > self.skill_points {
            return Err(AllocationError::BudgetExceeded {
                requested: delta as u16,
                remaining: self.skill_points,
            });
        }

        if next == 0 {
            self.skills.remove(&skill);
        } else {
            self.skills.insert(skill, next as u8);
        }
        self.skill_points = (self.skill_points as i32 - delta) as u16;
        if self.stage == CreationStage::BracketApplied {
            self.stage = CreationStage::Allocating;
        }
        Ok(self.skill_points)
    }

    /// Mark the character complete. One-directional.
    pub fn finalize(&mut self) {
        self.stage = CreationStage::Finalized;
    }

    /// Render the character sheet: attributes first, then bracket, then
    /// skills in catalog order, then equipment in insertion order.
    pub fn sheet(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(out, "========================================");
        let _ = writeln!(out, " {}", self.name.to_uppercase());
        let _ = writeln!(
            out,
            " Age {} | Level {} | XP {} | ${}",
            self.age, self.level, self.experience, self.dollars
        );
        let _ = writeln!(out, " {}", self.location);
        let _ = writeln!(out, "========================================");

        let _ = writeln!(out, "Attributes:");
        for attribute in Attribute::all() {
            let _ = writeln!(
                out,
                "  {:<8} {:>2}  ({:+})   {}",
                attribute.name(),
                self.attributes.get(attribute),
                self.attributes.modifier(attribute),
                attribute.description()
            );
        }
        let _ = writeln!(out, "Hit Points: {}/{}", self.hit_points, self.max_hit_points);

        match self.bracket {
            Some(bracket) => {
                let (lo, hi) = bracket.age_range();
                let _ = writeln!(
                    out,
                    "Age Bracket: {} ({}-{}), skill cap {}",
                    bracket.label(),
                    lo,
                    hi,
                    bracket.skill_cap()
                );
            }
            None => {
                let _ = writeln!(out, "Age Bracket: not yet applied");
            }
        }

        let _ = writeln!(out, "Skills ({} points unspent):", self.skill_points);
        if self.skills.is_empty() {
            let _ = writeln!(out, "  (none trained)");
        } else {
            for skill in Skill::all() {
                let level = self.skill_level(*skill);
                if level > 0 {
                    let _ = writeln!(
                        out,
                        "  {:<14} {}  [{}]",
                        skill.name(),
                        level,
                        skill.attribute()
                    );
                }
            }
        }

        let _ = writeln!(out, "Equipment:");
        if self.equipment.is_empty() {
            let _ = writeln!(out, "  (empty pockets)");
        } else {
            for item in &self.equipment {
                let _ = writeln!(out, "  - {item}");
            }
        }
        let _ = writeln!(out, "Weapon: {}", self.weapon);
        let _ = writeln!(out, "Armor: {}", self.armor);

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prime_character() -> Character {
        let mut character = Character::new("Cole Younger", 30, Attributes::new(12, 14, 10));
        character.apply_age_effects(AgeBracket::Prime);
        character
    }

    #[test]
    fn test_modifier_math() {
        let attrs = Attributes::new(3, 10, 18);
        assert_eq!(attrs.modifier(Attribute::Vigor), -4);
        assert_eq!(attrs.modifier(Attribute::Finesse), 0);
        assert_eq!(attrs.modifier(Attribute::Smarts), 4);
    }

    #[test]
    fn test_apply_age_effects_prime_is_neutral() {
        let before = Attributes::new(12, 14, 10);
        let character = prime_character();
        assert_eq!(character.attributes, before);
        assert_eq!(character.skill_points, 10);
        assert_eq!(character.bracket, Some(AgeBracket::Prime));
        assert_eq!(character.stage, CreationStage::BracketApplied);
    }

    #[test]
    fn test_apply_age_effects_clamps_at_minimum() {
        let mut character = Character::new("Old Ezra", 57, Attributes::new(4, 3, 11));
        character.apply_age_effects(AgeBracket::Elder);
        // Vigor 4 - 2 = 3 exactly; Finesse 3 - 2 clamps at the floor
        assert_eq!(character.attributes.vigor, 3);
        assert_eq!(character.attributes.finesse, 3);
        assert_eq!(character.attributes.smarts, 11);
    }

    #[test]
    fn test_apply_age_effects_clamps_at_maximum() {
        let mut character = Character::new("Kid Dalton", 18, Attributes::new(18, 17, 9));
        character.apply_age_effects(AgeBracket::Young);
        assert_eq!(character.attributes.vigor, 18);
        assert_eq!(character.attributes.finesse, 18);
    }

    #[test]
    fn test_derived_stats_follow_attributes() {
        let character = Character::new("Doc", 40, Attributes::new(9, 9, 12));
        assert_eq!(character.max_hit_points, 10);
        assert_eq!(character.hit_points, 10);
    }

    #[test]
    fn test_unknown_skill_rejected_first() {
        let mut character = prime_character();
        // Even a negative delta reports the catalog failure first
        let err = character.allocate_skill("Knittin'", -3).unwrap_err();
        assert!(matches!(err, AllocationError::UnknownSkill(_)));
        assert_eq!(character.skill_points, 10);
        assert!(character.skills.is_empty());
    }

    #[test]
    fn test_negative_allocation_rejected_and_nothing_changes() {
        let mut character = prime_character();
        character.allocate_skill("Shootin'", 2).unwrap();
        let err = character.allocate_skill("Shootin'", -3).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::NegativeAllocation {
                skill: Skill::Shootin
            }
        ));
        assert_eq!(character.skill_level(Skill::Shootin), 2);
        assert_eq!(character.skill_points, 8);
    }

    #[test]
    fn test_skill_cap_enforced_for_new_skills_only() {
        let mut character = Character::new("Kid", 18, Attributes::new(12, 12, 12));
        character.apply_age_effects(AgeBracket::Young); // budget 6, cap 4

        for name in ["Shootin'", "Ridin'", "Ropin'", "Sneakin'"] {
            character.allocate_skill(name, 1).unwrap();
        }
        let err = character.allocate_skill("Gamblin'", 1).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::SkillCapExceeded {
                bracket: AgeBracket::Young,
                cap: 4
            }
        ));

        // Deepening an already-trained skill is still allowed
        assert_eq!(character.allocate_skill("Shootin'", 1).unwrap(), 1);
    }

    #[test]
    fn test_cap_checked_before_budget() {
        let mut character = Character::new("Kid", 18, Attributes::new(12, 12, 12));
        character.apply_age_effects(AgeBracket::Young); // budget 6, cap 4

        for name in ["Shootin'", "Ridin'", "Ropin'", "Sneakin'"] {
            character.allocate_skill(name, 1).unwrap();
        }
        // 2 points remain; asking for 5 in a fifth skill trips both the cap
        // and the budget, and the cap must win
        let err = character.allocate_skill("Gamblin'", 5).unwrap_err();
        assert!(matches!(err, AllocationError::SkillCapExceeded { .. }));
    }

    #[test]
    fn test_budget_scenario() {
        let mut character = prime_character();
        assert_eq!(character.allocate_skill("Shootin'", 4).unwrap(), 6);
        assert_eq!(character.allocate_skill("Ridin'", 6).unwrap(), 0);

        let err = character.allocate_skill("Shootin'", 1).unwrap_err();
        assert_eq!(
            err,
            AllocationError::BudgetExceeded {
                requested: 1,
                remaining: 0
            }
        );
        assert_eq!(character.skill_points, 0);
        assert_eq!(character.skill_level(Skill::Shootin), 4);
        assert_eq!(character.skill_level(Skill::Ridin), 6);
    }

    #[test]
    fn test_refund_returns_points_and_clears_zero_levels() {
        let mut character = prime_character();
        character.allocate_skill("Trackin'", 3).unwrap();
        assert_eq!(character.allocate_skill("Trackin'", -3).unwrap(), 10);
        assert_eq!(character.trained_skill_count(), 0);
        assert!(!character.skills.contains_key(&Skill::Trackin));
    }

    #[test]
    fn test_stage_progression() {
        let mut character = Character::new("Hank", 25, Attributes::new(11, 11, 11));
        assert_eq!(character.stage, CreationStage::Draft);
        character.apply_age_effects(AgeBracket::Prime);
        assert_eq!(character.stage, CreationStage::BracketApplied);
        character.allocate_skill("Law", 1).unwrap();
        assert_eq!(character.stage, CreationStage::Allocating);
        character.finalize();
        assert_eq!(character.stage, CreationStage::Finalized);
    }

    #[test]
    fn test_sheet_order_is_deterministic() {
        let mut character = prime_character();
        // Allocate out of catalog order on purpose
        character.allocate_skill("Trackin'", 2).unwrap();
        character.allocate_skill("Bows", 1).unwrap();
        character.equipment.push("Lucky Horseshoe".to_string());

        let sheet = character.sheet();
        let attributes_at = sheet.find("Attributes:").unwrap();
        let bracket_at = sheet.find("Age Bracket:").unwrap();
        let bows_at = sheet.find("Bows").unwrap();
        let trackin_at = sheet.find("Trackin'").unwrap();
        let equipment_at = sheet.find("Equipment:").unwrap();
        let horseshoe_at = sheet.find("Lucky Horseshoe").unwrap();

        assert!(attributes_at < bracket_at);
        assert!(bracket_at < bows_at);
        assert!(bows_at < trackin_at, "skills must print in catalog order");
        assert!(trackin_at < equipment_at);
        assert!(equipment_at < horseshoe_at);
        // Starting gear keeps insertion order
        let boots_at = sheet.find("Worn Boots").unwrap();
        assert!(boots_at < horseshoe_at);
    }
}
