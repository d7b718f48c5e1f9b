use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::config::ArchiveLayout;
use crate::error::{LottoError, Result};
use crate::history::Archive;
use crate::models::{Combination, Draw, PICK_COUNT, validate_bonus};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_records: u32,
    pub loaded: u32,
    pub errors: u32,
}

/// Normalises a draw date to `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<String> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok_or_else(|| LottoError::InvalidDate(raw.to_string()))
}

/// Only the six numbers decide whether a record is kept. Unreadable side
/// fields fall back: the draw number to the record position, the date to the
/// raw text, the bonus to `None`.
fn parse_record(record: &csv::StringRecord, line: u32, layout: &ArchiveLayout) -> Result<Draw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .ok_or(LottoError::MissingField(idx))
    };

    let get_num = |idx: usize| -> Result<u32> {
        let s = get(idx)?;
        s.parse::<u32>().map_err(|_| LottoError::InvalidField {
            index: idx,
            value: s,
        })
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>().map_err(|_| LottoError::InvalidField {
            index: idx,
            value: s,
        })
    };

    let mut numbers = [0u8; PICK_COUNT];
    for (slot, idx) in numbers.iter_mut().zip(layout.number_columns()) {
        *slot = get_u8(idx)?;
    }
    let numbers = Combination::new(numbers)?;

    let draw_number = get_num(layout.draw_number_column).unwrap_or_else(|e| {
        log::warn!("Ligne {line} : numéro de tirage illisible ({e}), position utilisée");
        line
    });
    let sequence_number = get_num(layout.sequence_number_column).unwrap_or_else(|e| {
        log::warn!("Ligne {line} : numéro de séquence illisible ({e})");
        0
    });

    let raw_date = get(layout.date_column).unwrap_or_default();
    let date = parse_date(&raw_date).unwrap_or_else(|e| {
        log::warn!("Ligne {line} : {e}, date conservée telle quelle");
        raw_date.clone()
    });

    let bonus = layout.bonus_column.and_then(|idx| {
        match get_u8(idx).and_then(|b| validate_bonus(&numbers, b).map(|_| b)) {
            Ok(b) => Some(b),
            Err(e) => {
                log::warn!("Ligne {line} : complémentaire ignoré ({e})");
                None
            }
        }
    });

    Ok(Draw {
        draw_number,
        sequence_number,
        date,
        numbers,
        bonus,
    })
}

/// Reads every record into an [`Archive`], keeping record order. Bad records
/// are logged and counted, never fatal.
pub fn read_csv<R: Read>(reader: R, layout: &ArchiveLayout) -> Result<(Archive, LoadReport)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(layout.delimiter_byte()?)
        .has_headers(layout.has_headers)
        .flexible(true)
        .from_reader(reader);

    let mut report = LoadReport::default();
    let mut draws = Vec::new();

    for record_result in reader.records() {
        report.total_records += 1;
        let parsed = record_result
            .map_err(LottoError::from)
            .and_then(|record| parse_record(&record, report.total_records, layout));
        match parsed {
            Ok(draw) => {
                draws.push(draw);
                report.loaded += 1;
            }
            Err(e) => {
                log::warn!("Ligne {} ignorée : {}", report.total_records, e);
                report.errors += 1;
            }
        }
    }

    log::info!(
        "{} tirages chargés ({} lignes, {} erreurs)",
        report.loaded,
        report.total_records,
        report.errors
    );
    Ok((Archive::new(draws), report))
}

pub fn load_csv(path: &Path, layout: &ArchiveLayout) -> Result<(Archive, LoadReport)> {
    let file = File::open(path).map_err(|source| LottoError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file, layout)
}
