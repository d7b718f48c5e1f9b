use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LottoError, Result};
use crate::models::PICK_COUNT;

/// Where the draw fields live in an archive CSV. Defaults match `649.csv`:
/// `PRODUCT,DRAW NUMBER,SEQUENCE NUMBER,DRAW DATE,NUMBER DRAWN 1..6,BONUS NUMBER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveLayout {
    pub delimiter: char,
    pub has_headers: bool,
    pub draw_number_column: usize,
    pub sequence_number_column: usize,
    pub date_column: usize,
    /// First of the six consecutive number columns.
    pub first_number_column: usize,
    pub bonus_column: Option<usize>,
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: true,
            draw_number_column: 1,
            sequence_number_column: 2,
            date_column: 3,
            first_number_column: 4,
            bonus_column: Some(10),
        }
    }
}

impl ArchiveLayout {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| LottoError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
        let layout: ArchiveLayout = serde_json::from_str(&json)?;
        layout.delimiter_byte()?;
        Ok(layout)
    }

    pub fn number_columns(&self) -> Range<usize> {
        self.first_number_column..self.first_number_column + PICK_COUNT
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(LottoError::Config {
                message: format!("le séparateur '{}' n'est pas un caractère ASCII", self.delimiter),
            })
        }
    }
}
