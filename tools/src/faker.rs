//! Plausible-looking customer data for virtual users.

use rand::{
    Rng,
    distr::{Alphanumeric, SampleString},
    seq::IndexedRandom,
};
use shop_models::User;

const FIRST_NAMES: &[&str] = &[
    "Olivia", "Liam", "Emma", "Noah", "Amelia", "Oliver", "Sophia", "Elijah",
    "Mia", "James", "Harper", "Lucas", "Evelyn", "Mateo", "Aria", "Levi",
    "Chloe", "Ezra", "Nora", "Hugo",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller",
    "Davis", "Rodriguez", "Martinez", "Wilson", "Anderson", "Taylor",
    "Thomas", "Moore", "Jackson", "Martin", "Lee", "Walker", "Young",
];

const STREETS: &[&str] = &[
    "Maple", "Oak", "Cedar", "Pine", "Elm", "Washington", "Lake", "Hill",
    "Park", "River", "Sunset", "Highland",
];

const STREET_SUFFIXES: &[&str] =
    &["Street", "Avenue", "Road", "Lane", "Boulevard", "Court", "Drive"];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Franklin", "Greenville", "Bristol",
    "Clinton", "Fairview", "Salem", "Madison", "Georgetown",
];

const EMAIL_DOMAINS: &[&str] =
    &["example.com", "example.org", "example.net", "mail.test"];

/// Length of generated passwords.
pub const PASSWORD_LEN: usize = 6;

pub fn full_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(FIRST_NAMES, rng), pick(LAST_NAMES, rng))
}

/// An address unlikely to collide across virtual users: the local part
/// carries a random alphanumeric tag.
pub fn unique_email<R: Rng + ?Sized>(name: &str, rng: &mut R) -> String {
    let local: String = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(".");
    let tag = Alphanumeric.sample_string(rng, 10).to_lowercase();
    format!("{local}.{tag}@{}", pick(EMAIL_DOMAINS, rng))
}

pub fn password<R: Rng + ?Sized>(rng: &mut R) -> String {
    Alphanumeric.sample_string(rng, PASSWORD_LEN)
}

pub fn delivery_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}, {} {:05}",
        rng.random_range(1..=9999),
        pick(STREETS, rng),
        pick(STREET_SUFFIXES, rng),
        pick(CITIES, rng),
        rng.random_range(1000..=99999),
    )
}

pub fn user<R: Rng + ?Sized>(rng: &mut R) -> User {
    let name = full_name(rng);
    let email = unique_email(&name, rng);
    User::new(name, email, password(rng))
}

fn pick<R: Rng + ?Sized>(words: &[&'static str], rng: &mut R) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}
