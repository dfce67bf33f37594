use log::{info, warn};

use crate::consts::WORD_LIST_URL;

/// Drawable words used whenever the remote list cannot be fetched.
pub const FALLBACK_WORDS: &[&str] = &[
    "Apple", "Bicycle", "Car", "Dog", "Elephant", "Flower", "Guitar", "House",
    "Ice Cream", "Jellyfish", "Kite", "Lion", "Moon", "Nose", "Owl", "Pizza",
    "Queen", "Rainbow", "Sun", "Tree", "Umbrella", "Violin", "Whale", "Xylophone",
    "Yacht", "Zebra", "Airplane", "Basketball", "Camera", "Dinosaur", "Ear",
    "Fish", "Grapes", "Helicopter", "Igloo", "Jacket", "Key", "Lamp", "Mouse",
    "Necklace", "Orange", "Pencil", "Robot", "Snake", "Train", "Unicorn", "Volcano",
    "Watch", "Yo-Yo", "Bee", "Cat", "Duck", "Frog", "Ghost", "Hat", "Island",
    "Jungle", "Kangaroo", "Leaf", "Mountain", "Nest", "Octopus", "Parrot", "Rabbit",
    "Spider", "Turtle", "Vase", "Window", "Butterfly", "Cloud", "Donut", "Eye",
    "Fire", "Glasses", "Hand", "Ice", "Jar", "Ladder", "Mushroom", "Net", "Ocean",
    "Pen", "Ring", "Star", "Tent", "Van", "Water", "Box", "Cup", "Door",
];

/// A non-empty pool of candidate secret words.
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Fetches the remote list. Called once at startup; the result is owned
    /// for the rest of the process, so the fetch never repeats.
    pub async fn load() -> Self {
        match Self::fetch().await {
            Ok(words) if !words.is_empty() => {
                info!("loaded {} words from {}", words.len(), WORD_LIST_URL);
                Self { words }
            }
            Ok(_) => {
                warn!("remote word list was empty, using built-in list");
                Self::fallback()
            }
            Err(err) => {
                warn!("word list fetch failed ({}), using built-in list", err);
                Self::fallback()
            }
        }
    }

    /// An empty `words` is replaced by the fallback list.
    pub fn new(words: Vec<String>) -> Self {
        if words.is_empty() {
            return Self::fallback();
        }
        Self { words }
    }

    pub fn fallback() -> Self {
        Self {
            words: FALLBACK_WORDS.iter().map(|word| word.to_string()).collect(),
        }
    }

    pub fn pick(&self) -> &str {
        let idx = rand::random::<usize>() % self.words.len();
        &self.words[idx]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    async fn fetch() -> Result<Vec<String>, reqwest::Error> {
        let body = reqwest::get(WORD_LIST_URL).await?.text().await?;
        Ok(Self::parse(&body))
    }

    fn parse(body: &str) -> Vec<String> {
        body.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}
