//! Interactive shell for Whiskey Hollow.
//!
//! A sequential menu loop over stdin/stdout. Every rule decision goes
//! through the library; this binary only prompts, prints, and relays
//! typed errors back to the player.

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use whiskey_hollow::character::{Attributes, Character};
use whiskey_hollow::character_builder::{create_character, AttributeSource, MAX_NAME_LEN};
use whiskey_hollow::dice;
use whiskey_hollow::names;
use whiskey_hollow::persist::{
    character_save_path, delete_save, list_character_saves, SaveInfo, SavedCharacter,
};
use whiskey_hollow::rules::{AgeBracket, MAX_AGE, MIN_AGE};
use whiskey_hollow::skills::Skill;

#[derive(Debug, Parser)]
#[command(name = "whiskey-hollow", version)]
#[command(about = "Character creation and management for the Whiskey Hollow western RPG")]
struct Args {
    /// Directory where character save files live
    #[arg(long, default_value = "saves")]
    saves_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!();
    println!("{}", "  WHISKEY HOLLOW".yellow().bold());
    println!("{}", "  A frontier town in need of legends".italic());

    loop {
        println!();
        println!("{}", "Main Menu".cyan().bold());
        println!("  1. New character");
        println!("  2. Load character");
        println!("  3. Delete a save");
        println!("  4. Quit");

        match prompt(&mut input, "> ") {
            Some(choice) => match choice.trim() {
                "1" => new_character(&mut input, &args.saves_dir),
                "2" => load_character(&mut input, &args.saves_dir),
                "3" => delete_character(&mut input, &args.saves_dir),
                "4" | "q" | "quit" => break,
                other => println!("No option {other:?} around these parts."),
            },
            None => break,
        }
    }

    println!("So long, stranger.");
}

// ============================================================================
// Character creation
// ============================================================================

fn new_character(input: &mut impl BufRead, saves_dir: &PathBuf) {
    let Some(name) = prompt_name(input) else {
        return;
    };
    let Some(age) = prompt_age(input) else {
        return;
    };
    let Some(source) = prompt_attributes(input) else {
        return;
    };

    let mut character = match create_character(&name, age, source) {
        Ok(character) => character,
        Err(err) => {
            println!("{} {err}", "Cannot create character:".red());
            return;
        }
    };

    if let Some(bracket) = character.bracket {
        let (lo, hi) = bracket.age_range();
        println!(
            "\nAge {} puts {} in the {} bracket ({lo}-{hi}): {} skill points, up to {} skills.",
            character.age,
            character.name,
            bracket.label().yellow(),
            bracket.skill_points(),
            bracket.skill_cap()
        );
    }

    allocate_skills(input, &mut character);
    println!("\n{}", character.sheet());

    if confirm(input, "Save this character?").unwrap_or(false) {
        character.finalize();
        save_character(&character, saves_dir);
    } else {
        println!("{} drifts back into the dust, unrecorded.", character.name);
    }
}

fn prompt_name(input: &mut impl BufRead) -> Option<String> {
    let line = prompt(
        input,
        &format!("Name (blank for a random one, {MAX_NAME_LEN} chars max): "),
    )?;
    let name = line.trim();
    if name.is_empty() {
        let generated = names::random_name();
        println!("The town register reads: {}", generated.yellow());
        return Some(generated);
    }
    Some(name.to_string())
}

fn prompt_age(input: &mut impl BufRead) -> Option<u8> {
    loop {
        let line = prompt(input, &format!("Age ({MIN_AGE}-{MAX_AGE}): "))?;
        match line.trim().parse::<u8>() {
            Ok(age) if AgeBracket::resolve(age).is_ok() => return Some(age),
            Ok(age) => println!("Age {age} is outside the playable range."),
            Err(_) => println!("That's no age I ever heard of."),
        }
    }
}

fn prompt_attributes(input: &mut impl BufRead) -> Option<AttributeSource> {
    loop {
        println!("\nAttributes: Vigor, Finesse, Smarts.");
        println!("  1. Roll them (4d6, drop the lowest)");
        println!("  2. Enter them by hand (3-18)");

        let choice = prompt(input, "> ")?;
        match choice.trim() {
            "1" => {
                loop {
                    let outcomes = [
                        dice::roll_attribute_detailed(),
                        dice::roll_attribute_detailed(),
                        dice::roll_attribute_detailed(),
                    ];
                    println!("  Vigor:   {}", outcomes[0]);
                    println!("  Finesse: {}", outcomes[1]);
                    println!("  Smarts:  {}", outcomes[2]);

                    if confirm(input, "Keep these rolls?")? {
                        return Some(AttributeSource::Manual(Attributes::new(
                            outcomes[0].total as u8,
                            outcomes[1].total as u8,
                            outcomes[2].total as u8,
                        )));
                    }
                    println!("Shaking the dice again...");
                }
            }
            "2" => {
                let vigor = prompt_score(input, "Vigor")?;
                let finesse = prompt_score(input, "Finesse")?;
                let smarts = prompt_score(input, "Smarts")?;
                return Some(AttributeSource::Manual(Attributes::new(
                    vigor, finesse, smarts,
                )));
            }
            _ => println!("Pick 1 or 2."),
        }
    }
}

fn prompt_score(input: &mut impl BufRead, label: &str) -> Option<u8> {
    loop {
        let line = prompt(input, &format!("{label} (3-18): "))?;
        match line.trim().parse::<u8>() {
            Ok(value) if (3..=18).contains(&value) => return Some(value),
            _ => println!("Scores run from 3 to 18."),
        }
    }
}

fn allocate_skills(input: &mut impl BufRead, character: &mut Character) {
    let catalog = Skill::all();

    while character.skill_points > 0 {
        println!(
            "\n{} ({} points left)",
            "Skill Training".cyan().bold(),
            character.skill_points
        );
        for (index, skill) in catalog.iter().enumerate() {
            let level = character.skill_level(*skill);
            let marker = if level > 0 {
                format!("level {level}").yellow().to_string()
            } else {
                "untrained".dimmed().to_string()
            };
            println!(
                "  {:>2}. {:<14} [{:<13}] {marker}",
                index + 1,
                skill.name(),
                skill.attribute().name()
            );
        }
        println!("   0. Stop training");

        let Some(line) = prompt(input, "Skill number: ") else {
            return;
        };
        let Ok(choice) = line.trim().parse::<usize>() else {
            println!("Give me a number.");
            continue;
        };
        if choice == 0 {
            if character.skill_points > 0
                && !confirm(input, "Leave the rest of your points unspent?").unwrap_or(true)
            {
                continue;
            }
            return;
        }
        let Some(skill) = catalog.get(choice - 1) else {
            println!("No skill under that number.");
            continue;
        };

        let Some(line) = prompt(
            input,
            &format!("Points for {} (negative to refund): ", skill.name()),
        ) else {
            return;
        };
        let Ok(delta) = line.trim().parse::<i32>() else {
            println!("Give me a number.");
            continue;
        };

        match character.allocate_skill(skill.name(), delta) {
            Ok(remaining) => println!(
                "{} {} is now level {} ({remaining} points left).",
                "Done.".green(),
                skill.name(),
                character.skill_level(*skill)
            ),
            Err(err) => println!("{} {err}", "No dice:".red()),
        }
    }

    println!("Every skill point is spent.");
}

// ============================================================================
// Save management
// ============================================================================

fn save_character(character: &Character, saves_dir: &PathBuf) {
    let path = character_save_path(saves_dir, &character.name);
    if let Err(err) = std::fs::create_dir_all(saves_dir) {
        println!("{} {err}", "Cannot create saves directory:".red());
        return;
    }
    match SavedCharacter::new(character.clone()).save_json(&path) {
        Ok(()) => println!("Saved to {}.", path.display()),
        Err(err) => println!("{} {err}", "Save failed:".red()),
    }
}

fn load_character(input: &mut impl BufRead, saves_dir: &PathBuf) {
    let Some(info) = pick_save(input, saves_dir) else {
        return;
    };
    match SavedCharacter::load_json(&info.path) {
        Ok(saved) => println!("\n{}", saved.character.sheet()),
        Err(err) => println!("{} {err}", "Load failed:".red()),
    }
}

fn delete_character(input: &mut impl BufRead, saves_dir: &PathBuf) {
    let Some(info) = pick_save(input, saves_dir) else {
        return;
    };
    if !confirm(
        input,
        &format!("Really delete {}? There's no bringing them back.", info.metadata.name),
    )
    .unwrap_or(false)
    {
        return;
    }
    match delete_save(&info.path) {
        Ok(()) => println!("{} rides off the record.", info.metadata.name),
        Err(err) => println!("{} {err}", "Delete failed:".red()),
    }
}

fn pick_save(input: &mut impl BufRead, saves_dir: &PathBuf) -> Option<SaveInfo> {
    let saves = match list_character_saves(saves_dir) {
        Ok(saves) => saves,
        Err(err) => {
            println!("{} {err}", "Cannot read saves:".red());
            return None;
        }
    };
    if saves.is_empty() {
        println!("No saved characters in {}.", saves_dir.display());
        return None;
    }

    println!();
    for (index, info) in saves.iter().enumerate() {
        println!(
            "  {}. {} (age {}, {}, ${})",
            index + 1,
            info.metadata.name,
            info.metadata.age,
            info.metadata.bracket,
            info.metadata.dollars
        );
    }

    loop {
        let line = prompt(input, "Which one (0 to cancel): ")?;
        match line.trim().parse::<usize>() {
            Ok(0) => return None,
            Ok(choice) if choice <= saves.len() => return Some(saves[choice - 1].clone()),
            _ => println!("Pick a number off the list."),
        }
    }
}

// ============================================================================
// Prompt helpers
// ============================================================================

fn prompt(input: &mut impl BufRead, message: &str) -> Option<String> {
    print!("{message}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(err) => {
            log::error!("stdin read failed: {err}");
            None
        }
    }
}

/// Ask a yes/no question. `None` means stdin closed on us.
fn confirm(input: &mut impl BufRead, message: &str) -> Option<bool> {
    loop {
        let line = prompt(input, &format!("{message} (y/n): "))?;
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Some(true),
            "n" | "no" => return Some(false),
            _ => println!("Yes or no, partner."),
        }
    }
}
