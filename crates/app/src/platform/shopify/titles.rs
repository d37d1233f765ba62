//! Sample product titles.

use rand::{Rng, seq::SliceRandom};

const ADJECTIVES: &[&str] = &[
    "autumn", "hidden", "bitter", "misty", "silent", "empty", "dry", "dark", "summer", "icy",
    "delicate", "quiet", "white", "cool", "spring", "winter", "patient", "twilight", "dawn",
    "crimson", "wispy", "weathered", "blue", "billowing", "broken", "cold", "damp", "falling",
    "frosty", "green", "long", "late", "bold", "little", "morning", "muddy", "old", "red",
    "rough", "still", "small", "sparkling", "shy", "wandering", "withered", "wild", "black",
    "young", "holy", "solitary", "fragrant", "aged", "snowy", "proud", "floral", "restless",
    "divine", "polished", "ancient", "purple", "lively", "nameless",
];

const NOUNS: &[&str] = &[
    "waterfall", "river", "breeze", "moon", "rain", "wind", "sea", "morning", "snow", "lake",
    "sunset", "pine", "shadow", "leaf", "dawn", "glitter", "forest", "hill", "cloud", "meadow",
    "sun", "glade", "bird", "brook", "butterfly", "bush", "dew", "dust", "field", "fire",
    "flower", "firefly", "feather", "grass", "haze", "mountain", "night", "pond", "darkness",
    "snowflake", "silence", "sound", "sky", "shape", "surf", "thunder", "violet", "water",
    "wildflower", "wave", "resonance", "wood", "dream", "cherry", "tree", "fog", "frost",
    "voice", "paper", "frog", "smoke", "star",
];

/// `count` random "adjective noun" titles.
pub(crate) fn random_titles<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let adjective = ADJECTIVES.choose(rng).copied().unwrap_or_default();
            let noun = NOUNS.choose(rng).copied().unwrap_or_default();

            format!("{adjective} {noun}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_two_known_words() {
        let titles = random_titles(&mut rand::thread_rng(), 5);

        assert_eq!(titles.len(), 5);

        for title in titles {
            let (adjective, noun) = title.split_once(' ').expect("two words");

            assert!(ADJECTIVES.contains(&adjective), "unknown adjective in {title}");
            assert!(NOUNS.contains(&noun), "unknown noun in {title}");
        }
    }
}
