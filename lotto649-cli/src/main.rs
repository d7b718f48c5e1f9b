mod display;
mod import;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use lotto649_core::config::ArchiveLayout;
use lotto649_core::db::{count_draws, db_path, fetch_archive, fetch_last_draws, migrate, open_db};
use lotto649_core::history::{Archive, HistoryCheck, matching_draws};
use lotto649_core::loader::load_csv;
use lotto649_core::models::{Combination, PICK_COUNT};
use lotto649_core::probability::{TOTAL_COMBINATIONS, multi_ticket_probability, one_ticket_probability};
use lotto649_core::rusqlite::Connection;
use crate::display::{display_draws, display_history, display_import_summary, display_probabilities};

#[derive(Parser)]
#[command(name = "lotto649", about = "Probabilités et historique du Lotto 6/49")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer l'historique des tirages depuis un fichier CSV
    Import {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = "649.csv")]
        file: PathBuf,

        /// Description JSON des colonnes du CSV
        #[arg(long)]
        layout: Option<PathBuf>,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Probabilité de gagner le gros lot
    Odds {
        /// Nombre de grilles différentes jouées
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..=TOTAL_COMBINATIONS))]
        tickets: u64,
    },

    /// Vérifier une combinaison : probabilités et apparitions passées
    Check {
        /// 6 numéros distincts entre 1 et 49 (demandés si absents)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=49))]
        numbers: Vec<u8>,

        /// Nombre de grilles différentes jouées
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..=TOTAL_COMBINATIONS))]
        tickets: u64,

        /// Fichier CSV d'historique (sinon la base importée)
        #[arg(short, long)]
        archive: Option<PathBuf>,

        /// Description JSON des colonnes du CSV
        #[arg(long)]
        layout: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file, layout } => cmd_import(&conn, &file, layout.as_deref()),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Odds { tickets } => cmd_odds(tickets),
        Command::Check {
            numbers,
            tickets,
            archive,
            layout,
        } => cmd_check(&conn, &numbers, tickets, archive.as_deref(), layout.as_deref()),
    }
}

fn load_layout(path: Option<&Path>) -> Result<ArchiveLayout> {
    match path {
        Some(p) => ArchiveLayout::from_json_file(p)
            .with_context(|| format!("Impossible de charger la description {:?}", p)),
        None => Ok(ArchiveLayout::default()),
    }
}

fn cmd_import(conn: &Connection, file: &Path, layout: Option<&Path>) -> Result<()> {
    let layout = load_layout(layout)?;
    let result = import::import_csv(conn, file, &layout)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &Connection, last: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : lotto649 import");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_odds(tickets: u64) -> Result<()> {
    let one = one_ticket_probability()?;
    let multi = multi_ticket_probability(tickets)?;
    display_probabilities(&one, &multi, tickets);
    Ok(())
}

fn cmd_check(
    conn: &Connection,
    numbers: &[u8],
    tickets: u64,
    archive_file: Option<&Path>,
    layout: Option<&Path>,
) -> Result<()> {
    let combination = if numbers.is_empty() {
        prompt_combination(&mut io::stdin().lock(), &mut io::stdout())?
    } else {
        Combination::from_slice(numbers).context("Combinaison invalide")?
    };

    cmd_odds(tickets)?;

    let layout = load_layout(layout)?;
    let archive = resolve_archive(conn, archive_file, &layout)?;
    let candidate = combination.numbers().iter().copied();
    let check = HistoryCheck::run(candidate.clone(), archive.as_ref());
    let matches = match &archive {
        Some(archive) => matching_draws(candidate, archive),
        None => Vec::new(),
    };
    display_history(&combination, check, &matches);
    Ok(())
}

/// `--archive` wins over the imported store; `None` when neither holds draws.
fn resolve_archive(
    conn: &Connection,
    archive_file: Option<&Path>,
    layout: &ArchiveLayout,
) -> Result<Option<Archive>> {
    if let Some(path) = archive_file {
        let (archive, report) = load_csv(path, layout)
            .with_context(|| format!("Impossible de lire l'historique {:?}", path))?;
        if report.errors > 0 {
            log::warn!("{} lignes ignorées dans {:?}", report.errors, path);
        }
        return Ok(Some(archive));
    }
    if count_draws(conn)? == 0 {
        return Ok(None);
    }
    Ok(Some(fetch_archive(conn)?))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, msg: &str) -> Result<String> {
    write!(out, "{}", msg)?;
    out.flush()?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Erreur de lecture")?;
    if read == 0 {
        bail!("Entrée interrompue");
    }
    Ok(line.trim().to_string())
}

fn parse_numbers(line: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u8>())
        .collect()
}

fn prompt_combination<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Combination> {
    loop {
        let line = prompt(input, out, "6 numéros distincts (séparés par des espaces, 1-49) : ")?;
        match parse_numbers(&line) {
            Ok(v) if v.len() == PICK_COUNT => match Combination::from_slice(&v) {
                Ok(combination) => return Ok(combination),
                Err(e) => writeln!(out, "{e}. Réessayez.")?,
            },
            _ => writeln!(out, "Entrez exactement {PICK_COUNT} numéros. Réessayez.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_prompt(input: &str) -> (Result<Combination>, String) {
        let mut out = Vec::new();
        let result = prompt_combination(&mut input.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_numbers("1 2 3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_numbers(" 4,5 , 6\t7 ").unwrap(), vec![4, 5, 6, 7]);
        assert!(parse_numbers("").unwrap().is_empty());
        assert!(parse_numbers("1 deux 3").is_err());
        assert!(parse_numbers("1 300").is_err());
    }

    #[test]
    fn test_prompt_combination_accepts_commas_and_spaces() {
        let (result, _) = run_prompt("49, 1 17,25 33 2\n");
        assert_eq!(result.unwrap().numbers(), &[1, 2, 17, 25, 33, 49]);
    }

    #[test]
    fn test_prompt_combination_retries_until_valid() {
        let (result, out) = run_prompt("1 2 3\n1 1 2 3 4 5\n1 2 3 4 5 50\nabc\n6 5 4 3 2 1\n");
        assert_eq!(result.unwrap().numbers(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(out.matches("Réessayez").count(), 4);
        assert!(out.contains("Numéro en double : 1"));
        assert!(out.contains("Numéro 50 hors limites"));
    }

    #[test]
    fn test_prompt_combination_empty_input_fails() {
        let (result, _) = run_prompt("");
        assert!(result.is_err());
    }

    #[test]
    fn test_prompt_combination_input_closed_after_invalid_line() {
        let (result, out) = run_prompt("1 2 3\n");
        assert!(result.is_err());
        assert_eq!(out.matches("Réessayez").count(), 1);
    }
}
