//! CSV table reading and writing
//!
//! Tables are comma-separated with a header row. Cells are trimmed and blank
//! lines are skipped. A row with the wrong number of cells makes the whole
//! file malformed.

use graph_challenge_domain::{
    ChallengeResult, ExpectedIds, GraphId, LeaderboardRow, StoreError, Table, format_score,
    GRAPH_ID_COLUMN,
};
use std::path::Path;
use tracing::debug;

/// Header of the published leaderboard
pub const LEADERBOARD_COLUMNS: [&str; 2] = ["rank", "score"];

fn malformed(path: &Path, reason: impl Into<String>) -> StoreError {
    StoreError::MalformedTable {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Parse CSV bytes into a raw table. `path` is only used in errors.
pub fn parse_table(path: &Path, data: &[u8]) -> Result<Table, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(data);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| malformed(path, e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| malformed(path, e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(columns, rows))
}

/// Read a CSV file into a raw table
pub async fn read_table(path: &Path) -> ChallengeResult<Table> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| StoreError::from_io(path, e))?;
    let table = parse_table(path, &data)?;
    debug!(path = %path.display(), rows = table.len(), "Read table");
    Ok(table)
}

/// Read an expected-ID file: the `graph_id` column of a split file.
///
/// Other columns are ignored. Every `graph_id` cell must be an integer.
pub async fn read_expected_ids(path: &Path) -> ChallengeResult<ExpectedIds> {
    let table = read_table(path).await?;
    let index = table
        .column_index(GRAPH_ID_COLUMN)
        .ok_or_else(|| malformed(path, format!("missing '{}' column", GRAPH_ID_COLUMN)))?;

    let ids = table
        .column_cells(index)
        .map(|(row, raw)| {
            GraphId::parse_cell(raw).ok_or_else(|| {
                malformed(path, format!("invalid graph_id {:?} at row {}", raw, row))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExpectedIds::new(ids))
}

/// Render leaderboard rows as CSV with `\n` line endings
pub fn render_leaderboard(rows: &[LeaderboardRow], precision: u32) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(LEADERBOARD_COLUMNS)?;
    for row in rows {
        writer.write_record([row.rank.to_string(), format_score(row.score, precision)])?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Parse a published leaderboard
pub fn parse_leaderboard(path: &Path, data: &[u8]) -> Result<Vec<LeaderboardRow>, StoreError> {
    let table = parse_table(path, data)?;
    if !table.has_exact_columns(&LEADERBOARD_COLUMNS) {
        return Err(malformed(
            path,
            format!("expected columns {:?}, found {:?}", LEADERBOARD_COLUMNS, table.columns()),
        ));
    }

    let rank_index = table.column_index("rank").unwrap_or(0);
    let score_index = table.column_index("score").unwrap_or(1);

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let rank = row[rank_index]
                .parse::<u32>()
                .map_err(|_| malformed(path, format!("invalid rank {:?} at row {}", row[rank_index], i + 1)))?;
            let score = row[score_index]
                .parse::<f64>()
                .map_err(|_| malformed(path, format!("invalid score {:?} at row {}", row[score_index], i + 1)))?;
            Ok(LeaderboardRow { rank, score })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_skips_blank_lines() {
        let data = b"graph_id , target\n 1 , 0\n\n2,1\n";

        let table = parse_table(Path::new("p.csv"), data).unwrap();

        assert_eq!(table.columns(), &["graph_id".to_string(), "target".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], vec!["1".to_string(), "0".to_string()]);
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let err = parse_table(Path::new("p.csv"), b"graph_id,target\n1,0,7\n").unwrap_err();

        assert_eq!(err.error_code(), "MALFORMED_TABLE");
    }

    #[test]
    fn test_empty_file_has_no_columns() {
        let table = parse_table(Path::new("p.csv"), b"").unwrap();

        assert!(table.columns().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_render_leaderboard() {
        let rows = vec![
            LeaderboardRow { rank: 1, score: 1.0 },
            LeaderboardRow { rank: 2, score: 1.0 / 3.0 },
            LeaderboardRow { rank: 2, score: 1.0 / 3.0 },
        ];

        let rendered = render_leaderboard(&rows, 8).unwrap();

        assert_eq!(
            String::from_utf8(rendered).unwrap(),
            "rank,score\n1,1.00000000\n2,0.33333333\n2,0.33333333\n"
        );
    }

    #[test]
    fn test_render_empty_leaderboard_is_header_only() {
        let rendered = render_leaderboard(&[], 8).unwrap();
        assert_eq!(rendered, b"rank,score\n");
    }

    #[test]
    fn test_parse_leaderboard() {
        let rows = parse_leaderboard(Path::new("l.csv"), b"rank,score\n1,0.90000000\n1,0.90000000\n3,0.5\n").unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], LeaderboardRow { rank: 3, score: 0.5 });
    }

    #[test]
    fn test_parse_leaderboard_rejects_bad_rank() {
        let err = parse_leaderboard(Path::new("l.csv"), b"rank,score\nfirst,0.9\n").unwrap_err();
        assert!(err.to_string().contains("invalid rank"));
    }
}
