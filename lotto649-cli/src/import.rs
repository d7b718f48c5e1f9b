use anyhow::{Context, Result};
use lotto649_core::rusqlite::Connection;
use std::path::Path;

use lotto649_core::config::ArchiveLayout;
use lotto649_core::db::insert_draw;
use lotto649_core::loader::load_csv;

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_csv(conn: &Connection, path: &Path, layout: &ArchiveLayout) -> Result<ImportResult> {
    let (archive, report) = load_csv(path, layout)
        .with_context(|| format!("Impossible de lire l'historique {:?}", path))?;

    let tx = conn.unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: report.total_records,
        inserted: 0,
        skipped: 0,
        errors: report.errors,
    };

    for draw in archive.draws() {
        match insert_draw(&tx, draw) {
            Ok(true) => result.inserted += 1,
            Ok(false) => result.skipped += 1,
            Err(e) => {
                log::warn!("Erreur insertion tirage {}: {}", draw.draw_number, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    log::info!("{} tirages insérés depuis {:?}", result.inserted, path);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto649_core::db::{count_draws, migrate};
    use std::io::Write;

    const SAMPLE: &str = "\
PRODUCT,DRAW NUMBER,SEQUENCE NUMBER,DRAW DATE,NUMBER DRAWN 1,NUMBER DRAWN 2,NUMBER DRAWN 3,NUMBER DRAWN 4,NUMBER DRAWN 5,NUMBER DRAWN 6,BONUS NUMBER
649,1,0,1982-06-12,3,11,12,14,41,43,13
649,2,0,1982-06-19,8,33,36,37,39,41,9
649,2,0,1982-06-19,8,33,36,37,39,41,9
649,3,0,1982-06-26,1,6,23,24,27,27,34
";

    #[test]
    fn test_import_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let result = import_csv(&conn, file.path(), &ArchiveLayout::default()).unwrap();
        assert_eq!(result.total_records, 4);
        assert_eq!(result.inserted, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.errors, 1);
        assert_eq!(count_draws(&conn).unwrap(), 2);

        let again = import_csv(&conn, file.path(), &ArchiveLayout::default()).unwrap();
        assert_eq!(again.inserted, 0);
        assert_eq!(again.skipped, 3);
    }

    #[test]
    fn test_import_missing_file() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert!(import_csv(&conn, Path::new("/nonexistent/649.csv"), &ArchiveLayout::default()).is_err());
    }
}
