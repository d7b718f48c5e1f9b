use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::history::Archive;
use crate::models::{Combination, Draw};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    draw_number      INTEGER NOT NULL,
    sequence_number  INTEGER NOT NULL,
    date             TEXT NOT NULL,
    number_1         INTEGER NOT NULL,
    number_2         INTEGER NOT NULL,
    number_3         INTEGER NOT NULL,
    number_4         INTEGER NOT NULL,
    number_5         INTEGER NOT NULL,
    number_6         INTEGER NOT NULL,
    bonus            INTEGER,
    PRIMARY KEY (draw_number, sequence_number)
);
";

const SELECT_DRAWS: &str = "
SELECT draw_number, sequence_number, date, number_1, number_2, number_3, number_4, number_5, number_6, bonus
FROM draws";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lotto649.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let n = draw.numbers.numbers();
    let changed = conn.execute(
        "INSERT OR IGNORE INTO draws (draw_number, sequence_number, date, number_1, number_2, number_3, number_4, number_5, number_6, bonus)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            draw.draw_number,
            draw.sequence_number,
            draw.date,
            n[0],
            n[1],
            n[2],
            n[3],
            n[4],
            n[5],
            draw.bonus,
        ],
    ).context("Échec de l'insertion")?;
    Ok(changed > 0)
}

struct StoredDraw {
    draw_number: u32,
    sequence_number: u32,
    date: String,
    numbers: [u8; 6],
    bonus: Option<u8>,
}

impl StoredDraw {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(StoredDraw {
            draw_number: row.get(0)?,
            sequence_number: row.get(1)?,
            date: row.get(2)?,
            numbers: [
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, u8>(5)?,
                row.get::<_, u8>(6)?,
                row.get::<_, u8>(7)?,
                row.get::<_, u8>(8)?,
            ],
            bonus: row.get(9)?,
        })
    }

    fn into_draw(self) -> Result<Draw> {
        let numbers = Combination::new(self.numbers)
            .with_context(|| format!("Tirage {} corrompu en base", self.draw_number))?;
        Ok(Draw {
            draw_number: self.draw_number,
            sequence_number: self.sequence_number,
            date: self.date,
            numbers,
            bonus: self.bonus,
        })
    }
}

fn query_draws(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, StoredDraw::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(StoredDraw::into_draw).collect()
}

pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let sql = format!(
        "{SELECT_DRAWS} ORDER BY date DESC, draw_number DESC, sequence_number DESC LIMIT ?1"
    );
    query_draws(conn, &sql, [limit])
}

/// The whole stored archive, oldest draw first.
pub fn fetch_archive(conn: &Connection) -> Result<Archive> {
    let sql = format!("{SELECT_DRAWS} ORDER BY date ASC, draw_number ASC, sequence_number ASC");
    let draws = query_draws(conn, &sql, [])?;
    Ok(Archive::new(draws))
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}
