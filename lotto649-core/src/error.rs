use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LottoError {
    #[error("Argument invalide : {message}")]
    InvalidArgument { message: String },

    #[error("Dépassement de capacité lors du calcul de {operation}")]
    Overflow { operation: String },

    #[error("Numéro {number} hors limites (1-{max})")]
    NumberOutOfRange { number: u8, max: u8 },

    #[error("Numéro en double : {0}")]
    DuplicateNumber(u8),

    #[error("{expected} numéros attendus, {found} reçus")]
    WrongCount { expected: usize, found: usize },

    #[error("Champ manquant à l'index {0}")]
    MissingField(usize),

    #[error("Impossible de parser '{value}' (index {index})")]
    InvalidField { index: usize, value: String },

    #[error("Format de date invalide : '{0}'")]
    InvalidDate(String),

    #[error("Configuration invalide : {message}")]
    Config { message: String },

    #[error("Impossible d'ouvrir {path:?} : {source}")]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Erreur CSV : {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON invalide : {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LottoError>;
