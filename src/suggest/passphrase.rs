//! Hyphenated four-word passphrases such as `orbit-tiger-bamboo-falcon-42`.

use super::token::random_index;

pub(crate) const MAX_PASSPHRASES: usize = 5;

const WORDS_A: [&str; 65] = [
    "orbit", "bamboo", "saffron", "velvet", "comet", "ember", "ridge", "cipher", "spruce", "kettle",
    "galaxy", "cobalt", "atlas", "prairie", "harbor", "signal", "drift", "puzzle", "lumen", "aurora",
    "quartz", "maple", "fable", "marble", "echo", "hazel", "river", "summit", "pepper", "sailor",
    "opal", "nova", "pioneer", "sierra", "violet", "zenith", "wander", "rocket", "thunder", "whisper",
    "ranger", "lantern", "rocketship", "paper", "bronze", "silver", "tangerine", "midnight",
    "sunrise", "meadow", "forest", "island", "oasis", "canopy", "monsoon", "cascade", "canyon",
    "glacier", "voltage", "matrix", "kernel", "polygon", "vector", "paradox", "spectrum",
];

const WORDS_B: [&str; 64] = [
    "tiger", "falcon", "otter", "lynx", "panda", "wolf", "eagle", "shark", "whale", "gecko", "badger",
    "phoenix", "dragon", "sparrow", "panther", "orca", "raven", "manta", "bison", "yak", "koala",
    "rabbit", "gopher", "turtle", "beetle", "spider", "lion", "zebra", "lemur", "ferret", "salmon",
    "sturgeon", "hummingbird", "heron", "weasel", "cougar", "puma", "rhino", "hippo", "gazelle",
    "dolphin", "octopus", "penguin", "caribou", "buffalo", "kangaroo", "wombat", "seal", "walrus",
    "alpaca", "monkey", "gorilla", "chameleon", "armadillo", "jaguar", "cheetah", "coyote", "lizard",
    "stingray", "eel", "narwhal", "peacock", "crane", "swallow",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PassphraseGenerator;

impl PassphraseGenerator {
    /// Up to five fresh passphrases.
    pub fn generate(&self, count: usize) -> Vec<String> {
        (0..count.min(MAX_PASSPHRASES)).map(|_| self.generate_one()).collect()
    }

    pub fn generate_one(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            pick(&WORDS_A),
            pick(&WORDS_B),
            pick(&WORDS_A),
            pick(&WORDS_B),
            10 + random_index(90)
        )
    }
}

fn pick(words: &[&'static str]) -> &'static str {
    words[random_index(words.len())]
}

/// `word-word-word-word-NN` with lowercase words and two decimal digits.
pub(crate) fn is_passphrase_shape(candidate: &str) -> bool {
    let parts: Vec<&str> = candidate.split('-').collect();
    parts.len() == 5
        && parts[..4]
            .iter()
            .all(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
        && parts[4].len() == 2
        && parts[4].chars().all(|c| c.is_ascii_digit())
}
