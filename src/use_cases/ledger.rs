// Append-only per-name score ledger, one CSV column per finished game.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Parsed ledger table as served in state snapshots. `columns` holds
/// the game headers ("Game 1", "Game 2", …); each row carries one cell
/// per column, empty when the agent sat that game out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerTable {
    pub columns: Vec<String>,
    pub rows: Vec<LedgerRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    pub name: String,
    pub scores: Vec<String>,
}

/// Appends one finished game as a new column and returns the updated
/// table. Historical cells are never rewritten; agents absent from
/// history get a fresh row with blank cells for earlier games.
pub fn record_game(path: &Path, results: &[(String, i64)]) -> io::Result<LedgerTable> {
    let mut table = if path.exists() {
        load(path)?
    } else {
        LedgerTable::default()
    };

    let game_column = format!("Game {}", table.columns.len() + 1);
    table.columns.push(game_column.clone());
    for row in &mut table.rows {
        let score = results
            .iter()
            .find(|(name, _)| *name == row.name)
            .map(|(_, score)| score.to_string())
            .unwrap_or_default();
        row.scores.push(score);
    }
    for (name, score) in results {
        if table.rows.iter().any(|row| row.name == *name) {
            continue;
        }
        let mut scores = vec![String::new(); table.columns.len() - 1];
        scores.push(score.to_string());
        table.rows.push(LedgerRow {
            name: name.clone(),
            scores,
        });
    }

    save(path, &table)?;
    info!(path = %path.display(), column = %game_column, "score ledger updated");
    Ok(table)
}

pub fn load(path: &Path) -> io::Result<LedgerTable> {
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines();
    let Some(header) = lines.next() else {
        return Ok(LedgerTable::default());
    };

    // Header shape: Name,Game 1,Game 2,…  (names never contain commas)
    let columns: Vec<String> = header.split(',').skip(1).map(str::to_string).collect();
    let mut rows = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let mut cells = line.split(',');
        let Some(name) = cells.next() else {
            continue;
        };
        let mut scores: Vec<String> = cells.map(str::to_string).collect();
        scores.resize(columns.len(), String::new());
        rows.push(LedgerRow {
            name: name.to_string(),
            scores,
        });
    }
    Ok(LedgerTable { columns, rows })
}

fn save(path: &Path, table: &LedgerTable) -> io::Result<()> {
    let mut out = String::from("Name");
    for column in &table.columns {
        out.push(',');
        out.push_str(column);
    }
    out.push('\n');
    for row in &table.rows {
        out.push_str(&row.name);
        for score in &row.scores {
            out.push(',');
            out.push_str(score);
        }
        out.push('\n');
    }
    fs::write(path, out)
}
