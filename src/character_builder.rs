//! Character creation flow.
//!
//! Assembles a character from a name, an age, and an attribute source
//! (rolled or manually entered), resolves the age bracket, and applies the
//! bracket's effects exactly once. The shell drives this step by step; the
//! builder holds all of the validation.

use crate::character::{Attribute, Attributes, Character, ATTRIBUTE_MAX, ATTRIBUTE_MIN};
use crate::dice;
use crate::rules::{AgeBracket, AgeError};
use rand::Rng;

/// Longest name the save filenames tolerate gracefully.
pub const MAX_NAME_LEN: usize = 20;

/// Where attribute scores come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeSource {
    /// Roll 4d6, drop the lowest die, once per attribute.
    #[default]
    Rolled,
    /// Take the player's numbers as given (validated to [3, 18]).
    Manual(Attributes),
}

impl AttributeSource {
    pub fn name(&self) -> &'static str {
        match self {
            AttributeSource::Rolled => "Rolled",
            AttributeSource::Manual(_) => "Manual",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AttributeSource::Rolled => "Roll 4d6, drop the lowest die, for each attribute",
            AttributeSource::Manual(_) => "Enter each attribute yourself (3-18)",
        }
    }
}

/// Error from character building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    MissingName,
    MissingAge,
    InvalidName(String),
    AttributeOutOfRange { attribute: Attribute, value: u8 },
    InvalidAge(AgeError),
}

impl std::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuilderError::MissingName => write!(f, "Character name is required"),
            BuilderError::MissingAge => write!(f, "Character age is required"),
            BuilderError::InvalidName(reason) => write!(f, "Invalid name: {reason}"),
            BuilderError::AttributeOutOfRange { attribute, value } => {
                write!(
                    f,
                    "{attribute} score {value} is out of range ({ATTRIBUTE_MIN}-{ATTRIBUTE_MAX})"
                )
            }
            BuilderError::InvalidAge(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BuilderError {}

impl From<AgeError> for BuilderError {
    fn from(err: AgeError) -> Self {
        BuilderError::InvalidAge(err)
    }
}

/// Builder for new characters.
#[derive(Debug, Clone, Default)]
pub struct CharacterBuilder {
    name: Option<String>,
    age: Option<u8>,
    attributes: AttributeSource,
}

impl CharacterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the character's name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the character's age in years.
    pub fn age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    /// Set where attribute scores come from.
    pub fn attributes(mut self, source: AttributeSource) -> Self {
        self.attributes = source;
        self
    }

    /// Build the character.
    ///
    /// Validates the name and age, resolves the bracket, rolls or accepts
    /// attributes, rolls starting money, and applies age effects once. The
    /// returned character is ready for skill allocation.
    pub fn build(self) -> Result<Character, BuilderError> {
        let name = self.name.ok_or(BuilderError::MissingName)?;
        let name = name.trim().to_string();
        validate_name(&name)?;

        let age = self.age.ok_or(BuilderError::MissingAge)?;
        let bracket = AgeBracket::resolve(age)?;

        let attributes = match self.attributes {
            AttributeSource::Rolled => roll_attributes(),
            AttributeSource::Manual(attributes) => {
                for attribute in Attribute::all() {
                    let value = attributes.get(attribute);
                    if !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
                        return Err(BuilderError::AttributeOutOfRange { attribute, value });
                    }
                }
                attributes
            }
        };

        let mut character = Character::new(name, age, attributes);
        character.dollars = dice::roll_starting_money();
        character.apply_age_effects(bracket);
        Ok(character)
    }
}

/// One-call creation, for shells that have already collected every input.
pub fn create_character(
    name: &str,
    age: u8,
    source: AttributeSource,
) -> Result<Character, BuilderError> {
    CharacterBuilder::new()
        .name(name)
        .age(age)
        .attributes(source)
        .build()
}

/// Roll a full set of attributes.
pub fn roll_attributes() -> Attributes {
    roll_attributes_with_rng(&mut rand::thread_rng())
}

/// Roll a full set of attributes with a specific RNG.
pub fn roll_attributes_with_rng<R: Rng>(rng: &mut R) -> Attributes {
    Attributes::new(
        dice::roll_attribute_with_rng(rng),
        dice::roll_attribute_with_rng(rng),
        dice::roll_attribute_with_rng(rng),
    )
}

fn validate_name(name: &str) -> Result<(), BuilderError> {
    if name.is_empty() {
        return Err(BuilderError::InvalidName("name cannot be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(BuilderError::InvalidName(format!(
            "name must be {MAX_NAME_LEN} characters or less"
        )));
    }
    const FORBIDDEN: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    if let Some(bad) = name.chars().find(|c| FORBIDDEN.contains(c)) {
        return Err(BuilderError::InvalidName(format!(
            "name cannot contain {bad:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CreationStage;

    #[test]
    fn test_build_rolled_character() {
        let character = create_character("Silas Blackwood", 40, AttributeSource::Rolled)
            .expect("should build");

        assert_eq!(character.name, "Silas Blackwood");
        assert_eq!(character.age, 40);
        assert_eq!(character.bracket, Some(AgeBracket::Experienced));
        assert_eq!(character.skill_points, 13);
        assert_eq!(character.stage, CreationStage::BracketApplied);
        assert!(character.attributes.in_valid_range());
        assert!((30..=180).contains(&character.dollars));
        assert_eq!(character.equipment.len(), 3);
    }

    #[test]
    fn test_build_manual_character_applies_deltas_once() {
        let source = AttributeSource::Manual(Attributes::new(12, 13, 14));
        let character = create_character("Ruby Dawson", 55, source).expect("should build");

        // Elder: -2 Vigor, -2 Finesse, applied exactly once
        assert_eq!(character.attributes, Attributes::new(10, 11, 14));
        assert_eq!(character.bracket, Some(AgeBracket::Elder));
        assert_eq!(character.skill_points, 15);
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            CharacterBuilder::new().age(30).build(),
            Err(BuilderError::MissingName)
        ));
        assert!(matches!(
            CharacterBuilder::new().name("Hank").build(),
            Err(BuilderError::MissingAge)
        ));
    }

    #[test]
    fn test_invalid_ages_propagate() {
        for age in [13u8, 58] {
            let result = create_character("Drifter", age, AttributeSource::Rolled);
            assert_eq!(
                result.unwrap_err(),
                BuilderError::InvalidAge(AgeError::OutOfRange { age })
            );
        }
    }

    #[test]
    fn test_name_validation() {
        assert!(matches!(
            create_character("   ", 30, AttributeSource::Rolled),
            Err(BuilderError::InvalidName(_))
        ));
        assert!(matches!(
            create_character("A Name Far Too Long For Any Tombstone", 30, AttributeSource::Rolled),
            Err(BuilderError::InvalidName(_))
        ));
        assert!(matches!(
            create_character("Bad/Name", 30, AttributeSource::Rolled),
            Err(BuilderError::InvalidName(_))
        ));
        // Apostrophes are honest frontier punctuation
        assert!(create_character("Jeb O'Brien", 30, AttributeSource::Rolled).is_ok());
    }

    #[test]
    fn test_manual_attributes_validated() {
        let source = AttributeSource::Manual(Attributes::new(2, 10, 10));
        let err = create_character("Weakling", 30, source).unwrap_err();
        assert_eq!(
            err,
            BuilderError::AttributeOutOfRange {
                attribute: Attribute::Vigor,
                value: 2
            }
        );

        let source = AttributeSource::Manual(Attributes::new(10, 10, 19));
        let err = create_character("Sage", 30, source).unwrap_err();
        assert_eq!(
            err,
            BuilderError::AttributeOutOfRange {
                attribute: Attribute::Smarts,
                value: 19
            }
        );
    }

    #[test]
    fn test_rolled_attributes_stay_in_range() {
        for _ in 0..100 {
            let attrs = roll_attributes();
            assert!(attrs.in_valid_range());
        }
    }
}
