//! Western name tables.
//!
//! For players who stare at the name prompt too long.

use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;

lazy_static! {
    static ref FIRST_NAMES: Vec<&'static str> = vec![
        "Augustus", "Benjamin", "Caleb", "Dalton", "Ezra", "Franklin", "Gideon", "Hank",
        "Isaiah", "Jasper", "Knox", "Luther", "Montgomery", "Nathaniel", "Obadiah", "Porter",
        "Quincy", "Reuben", "Silas", "Thaddeus", "Adelaide", "Beatrice", "Charlotte", "Delilah",
        "Evangeline", "Florence", "Grace", "Helena", "Iris", "Josephine", "Katherine", "Lavinia",
        "Magnolia", "Naomi", "Ophelia", "Penelope", "Quinn", "Ruby", "Savannah", "Temperance",
    ];
    static ref SURNAMES: Vec<&'static str> = vec![
        "Blackwood", "Calhoun", "Dawson", "Evans", "Fletcher", "Garrett", "Hawthorne", "Irving",
        "Jackson", "Knox", "Lancaster", "Nash", "O'Brien", "Parker", "Quinn", "Remington",
        "Sterling", "Thompson", "Whitmore",
    ];
}

/// Generate a random frontier name.
pub fn random_name() -> String {
    random_name_with_rng(&mut rand::thread_rng())
}

/// Name generation with a specific RNG.
pub fn random_name_with_rng<R: Rng>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Drifter");
    let last = SURNAMES.choose(rng).copied().unwrap_or("Doe");
    format!("{first} {last}")
}
