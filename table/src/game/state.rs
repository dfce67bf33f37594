use std::collections::HashMap;

use chrono::Utc;
use protocol::Phase;

use crate::consts::{CORRECT_GUESS_POINTS, GUESS_LIMIT, SEAT_COUNT};
use crate::words::WordPool;

/// The whole game in one record, owned by the table task.
pub struct GameState {
    /// Join order, unique names, at most `SEAT_COUNT` entries.
    pub players: Vec<String>,
    pub scores: HashMap<String, i32>,
    pub phase: Phase,
    /// Index into `players` of whoever draws this round.
    pub drawer_idx: usize,
    /// Present from round start until the next `reset`.
    pub current_word: Option<String>,
    /// Opaque canvas payload, never parsed here.
    pub drawing: Option<Vec<u8>>,
    pub guesses_left: u32,
    pub last_outcome: String,
    /// Bumped on every drawing update.
    pub revision: u64,
    /// Recorded at round start; no time limit is enforced.
    pub turn_started_at: i64,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            scores: HashMap::new(),
            phase: Phase::Lobby,
            drawer_idx: 0,
            current_word: None,
            drawing: None,
            guesses_left: GUESS_LIMIT,
            last_outcome: String::new(),
            revision: 0,
            turn_started_at: 0,
        }
    }

    /// Silently ignored when the table is full or the name is taken.
    pub fn join(&mut self, name: &str) -> bool {
        if self.players.len() >= SEAT_COUNT {
            return false;
        }
        if self.players.iter().any(|player| player == name) {
            return false;
        }
        self.players.push(name.to_string());
        self.scores.insert(name.to_string(), 0);
        true
    }

    pub fn start_round(&mut self, pool: &WordPool) -> bool {
        if self.players.len() < SEAT_COUNT {
            return false;
        }
        self.current_word = Some(capitalize(pool.pick()));
        self.drawing = None;
        self.guesses_left = GUESS_LIMIT;
        self.turn_started_at = Utc::now().timestamp();
        self.phase = Phase::Playing;
        true
    }

    pub fn update_drawing(&mut self, payload: Vec<u8>) {
        self.drawing = Some(payload);
        self.revision += 1;
    }

    /// Trimmed, case-insensitive match against the current word.
    pub fn guess(&mut self, guesser: &str, text: &str) -> bool {
        if self.guesses_left == 0 {
            return false;
        }
        let word = match self.current_word {
            Some(ref word) => word.clone(),
            None => return false,
        };
        if text.trim().to_lowercase() == word.to_lowercase() {
            if let Some(score) = self.scores.get_mut(guesser) {
                *score += CORRECT_GUESS_POINTS;
            }
            self.phase = Phase::RoundOver;
            self.last_outcome = format!("✅ Correct! {} guessed '{}'", guesser, word);
            true
        } else {
            self.guesses_left -= 1;
            if self.guesses_left == 0 {
                self.phase = Phase::RoundOver;
                self.last_outcome = format!("❌ Out of guesses! The word was '{}'", word);
            }
            false
        }
    }

    pub fn next_turn(&mut self, pool: &WordPool) -> bool {
        if self.players.is_empty() {
            return false;
        }
        self.drawer_idx = (self.drawer_idx + 1) % self.players.len();
        self.start_round(pool)
    }

    /// Back to an empty lobby. Stale word and drawing data stay behind the
    /// phase gate and are overwritten by the next round.
    pub fn reset(&mut self) {
        self.players.clear();
        self.scores.clear();
        self.drawer_idx = 0;
        self.phase = Phase::Lobby;
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_of(words: &[&str]) -> WordPool {
        WordPool::new(words.iter().map(|word| word.to_string()).collect())
    }

    fn two_player_game() -> GameState {
        let mut state = GameState::new();
        state.join("Alice");
        state.join("Bob");
        state
    }

    #[test]
    fn join_caps_at_two_and_rejects_duplicates() {
        let mut state = GameState::new();
        assert!(state.join("Alice"));
        assert!(!state.join("Alice"));
        assert!(state.join("Bob"));
        assert!(!state.join("Carol"));
        assert_eq!(state.players, vec!["Alice", "Bob"]);
        assert_eq!(state.scores.len(), 2);
        assert_eq!(state.scores["Alice"], 0);
    }

    #[test]
    fn start_round_needs_two_players() {
        let mut state = GameState::new();
        state.join("Alice");
        assert!(!state.start_round(&pool_of(&["fish"])));
        assert_eq!(state.phase, Phase::Lobby);
        assert!(state.current_word.is_none());
    }

    #[test]
    fn start_round_sets_up_a_fresh_turn() {
        let mut state = two_player_game();
        state.update_drawing(vec![1, 2, 3]);
        assert!(state.start_round(&pool_of(&["fish"])));
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.guesses_left, 3);
        assert!(state.drawing.is_none());
        assert_eq!(state.current_word.as_deref(), Some("Fish"));
    }

    #[test]
    fn picked_word_comes_from_the_pool_capitalized() {
        let pool = pool_of(&["owl", "kite", "moon"]);
        let mut state = two_player_game();
        state.start_round(&pool);
        let word = state.current_word.unwrap();
        assert!(["Owl", "Kite", "Moon"].contains(&word.as_str()));
    }

    #[test]
    fn correct_guess_scores_and_ends_round() {
        let mut state = two_player_game();
        state.start_round(&pool_of(&["fish"]));
        assert!(state.guess("Bob", "  FISH "));
        assert_eq!(state.scores["Bob"], 10);
        assert_eq!(state.phase, Phase::RoundOver);
        assert!(state.last_outcome.starts_with('✅'));
        assert!(state.last_outcome.contains("Bob"));
        assert!(state.last_outcome.contains("Fish"));
    }

    #[test]
    fn wrong_guesses_exhaust_and_reveal_the_word() {
        let mut state = two_player_game();
        state.start_round(&pool_of(&["fish"]));
        assert!(!state.guess("Bob", "cat"));
        assert!(!state.guess("Bob", "dog"));
        assert_eq!(state.guesses_left, 1);
        assert_eq!(state.phase, Phase::Playing);
        assert!(!state.guess("Bob", "owl"));
        assert_eq!(state.guesses_left, 0);
        assert_eq!(state.phase, Phase::RoundOver);
        assert!(state.last_outcome.starts_with('❌'));
        assert!(state.last_outcome.contains("Fish"));
        assert_eq!(state.scores["Bob"], 0);
    }

    #[test]
    fn guess_with_none_left_is_a_no_op() {
        let mut state = two_player_game();
        state.start_round(&pool_of(&["fish"]));
        state.guess("Bob", "a");
        state.guess("Bob", "b");
        state.guess("Bob", "c");
        let scores_before = state.scores.clone();
        assert!(!state.guess("Bob", "fish"));
        assert_eq!(state.scores, scores_before);
        assert_eq!(state.phase, Phase::RoundOver);
    }

    #[test]
    fn guess_before_any_round_is_a_no_op() {
        let mut state = two_player_game();
        assert!(!state.guess("Bob", "fish"));
        assert_eq!(state.phase, Phase::Lobby);
        assert_eq!(state.guesses_left, 3);
    }

    #[test]
    fn update_drawing_bumps_revision() {
        let mut state = two_player_game();
        state.update_drawing(vec![1]);
        state.update_drawing(vec![2]);
        assert_eq!(state.revision, 2);
        assert_eq!(state.drawing.as_deref(), Some(&[2u8][..]));
    }

    #[test]
    fn next_turn_alternates_the_drawer() {
        let pool = pool_of(&["fish"]);
        let mut state = two_player_game();
        state.start_round(&pool);
        assert_eq!(state.drawer_idx, 0);
        assert!(state.next_turn(&pool));
        assert_eq!(state.drawer_idx, 1);
        assert!(state.next_turn(&pool));
        assert_eq!(state.drawer_idx, 0);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn reset_returns_to_an_empty_lobby() {
        let mut state = two_player_game();
        state.start_round(&pool_of(&["fish"]));
        state.reset();
        assert!(state.players.is_empty());
        assert!(state.scores.is_empty());
        assert_eq!(state.drawer_idx, 0);
        assert_eq!(state.phase, Phase::Lobby);
    }

    #[test]
    fn round_won_on_the_last_guess() {
        let pool = pool_of(&["rainbow"]);
        let mut state = two_player_game();
        assert!(state.start_round(&pool));
        assert!(!state.guess("Bob", "wrongword"));
        assert!(!state.guess("Bob", "wrongword"));
        assert_eq!(state.guesses_left, 1);
        assert!(state.guess("Bob", " Rainbow "));
        assert_eq!(state.scores["Bob"], 10);
        assert_eq!(state.scores["Alice"], 0);
        assert_eq!(state.phase, Phase::RoundOver);
        assert!(state.last_outcome.starts_with('✅'));
    }
}
