//! Session results storage and reporting

use serde::{Deserialize, Serialize};
use std::path::Path;

use othello_core::StoneColor;

/// Tally of a finished self-play session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResults {
    /// Strategy seated as Black
    pub black: String,
    /// Strategy seated as White
    pub white: String,
    pub games: u32,
    pub black_wins: u32,
    pub white_wins: u32,
    pub draws: u32,
}

impl SessionResults {
    pub fn new(black: &str, white: &str) -> Self {
        Self {
            black: black.to_string(),
            white: white.to_string(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, winner: StoneColor) {
        self.games += 1;
        match winner {
            StoneColor::Black => self.black_wins += 1,
            StoneColor::White => self.white_wins += 1,
            StoneColor::Empty => self.draws += 1,
        }
    }

    /// Score from Black's perspective (1 per win, 0.5 per draw).
    pub fn black_score(&self) -> f64 {
        if self.games == 0 {
            return 0.5;
        }
        (self.black_wins as f64 + 0.5 * self.draws as f64) / self.games as f64
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write: {}", e))
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse: {}", e))
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Session: {} (Black) vs {} (White) ===\n",
            self.black, self.white
        ));
        report.push_str(&format!(
            "Games: {}  B-W-D: {}-{}-{}\n",
            self.games, self.black_wins, self.white_wins, self.draws
        ));
        report.push_str(&format!(
            "Black score: {:.1}%\n",
            self.black_score() * 100.0
        ));
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
mod results_tests {
    use super::*;

    #[test]
    fn test_tally_and_score() {
        let mut results = SessionResults::new("adaptive", "random");
        results.record(StoneColor::Black);
        results.record(StoneColor::Black);
        results.record(StoneColor::White);
        results.record(StoneColor::Empty);

        assert_eq!(results.games, 4);
        assert_eq!(
            (results.black_wins, results.white_wins, results.draws),
            (2, 1, 1)
        );
        assert!((results.black_score() - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_empty_session_scores_even() {
        let results = SessionResults::new("a", "b");
        assert_eq!(results.black_score(), 0.5);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = std::env::temp_dir().join(format!("trainer_results_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");

        let mut results = SessionResults::new("adaptive", "random");
        results.record(StoneColor::Black);
        results.save(&path).unwrap();

        let loaded = SessionResults::load(&path).unwrap();
        assert_eq!(loaded, results);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_report_mentions_both_seats() {
        let results = SessionResults::new("adaptive", "random");
        let report = results.generate_report();
        assert!(report.contains("adaptive"));
        assert!(report.contains("random"));
    }
}
