//! Output formatters

use super::{OutputFormat, TableFormatter};
use anyhow::Result;
use graph_challenge_domain::{format_score, LeaderboardRow};
use serde::Serialize;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a value as pretty JSON
    pub fn format<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Format a value as a single JSON line, for output parsed by CI
    pub fn line<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }
}

/// Renders published leaderboard rows
pub struct LeaderboardFormatter;

impl LeaderboardFormatter {
    pub fn format(rows: &[LeaderboardRow], precision: u32, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => JsonFormatter::format(&rows),
            OutputFormat::Table => Ok(TableFormatter::simple(
                vec!["Rank", "Score"],
                rows.iter()
                    .map(|row| vec![format!("#{}", row.rank), format_score(row.score, precision)])
                    .collect(),
            )),
            OutputFormat::Plain => Ok(rows
                .iter()
                .map(|row| format!("{}\t{}", row.rank, format_score(row.score, precision)))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<LeaderboardRow> {
        vec![
            LeaderboardRow { rank: 1, score: 0.9 },
            LeaderboardRow { rank: 1, score: 0.9 },
            LeaderboardRow { rank: 3, score: 0.8 },
        ]
    }

    #[test]
    fn test_json_line_is_compact() {
        let line = JsonFormatter::line(&rows()[0]).unwrap();
        assert_eq!(line, r#"{"rank":1,"score":0.9}"#);
    }

    #[test]
    fn test_plain_leaderboard() {
        let text = LeaderboardFormatter::format(&rows(), 8, OutputFormat::Plain).unwrap();
        assert_eq!(text, "1\t0.90000000\n1\t0.90000000\n3\t0.80000000");
    }

    #[test]
    fn test_table_leaderboard_keeps_tied_ranks() {
        let text = LeaderboardFormatter::format(&rows(), 8, OutputFormat::Table).unwrap();
        assert_eq!(text.matches("#1").count(), 2);
        assert!(text.contains("#3"));
    }

    #[test]
    fn test_json_leaderboard_round_trips() {
        let text = LeaderboardFormatter::format(&rows(), 8, OutputFormat::Json).unwrap();
        let parsed: Vec<LeaderboardRow> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, rows());
    }
}
