use comfy_table::{Table, ContentArrangement, presets::UTF8_FULL, Cell, Color};

use crate::import::ImportResult;
use lotto649_core::history::HistoryCheck;
use lotto649_core::models::{Combination, Draw};
use lotto649_core::probability::Probability;

/// `13983816` -> `13 983 816`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

pub fn format_percent(p: &Probability) -> String {
    format!("{:.8} %", p.percent())
}

pub fn format_odds(p: &Probability) -> String {
    format!("1 sur {}", format_thousands(p.odds()))
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// `None` when there is nothing to show.
fn draws_table<'a, I>(draws: I) -> Option<Table>
where
    I: IntoIterator<Item = &'a Draw>,
{
    let mut draws = draws.into_iter().peekable();
    draws.peek()?;

    let mut table = new_table(vec!["Date", "Tirage", "Numéros", "Complémentaire"]);

    for draw in draws {
        let draw_id = if draw.sequence_number > 0 {
            format!("{}-{}", draw.draw_number, draw.sequence_number)
        } else {
            draw.draw_number.to_string()
        };
        let bonus = match draw.bonus {
            Some(b) => format!("{:2}", b),
            None => "—".to_string(),
        };

        table.add_row(vec![
            &draw.date,
            &draw_id,
            &draw.numbers.to_string(),
            &bonus,
        ]);
    }

    Some(table)
}

pub fn display_draws<'a, I>(draws: I)
where
    I: IntoIterator<Item = &'a Draw>,
{
    match draws_table(draws) {
        Some(table) => println!("{table}"),
        None => println!("Aucun tirage à afficher."),
    }
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_probabilities(one: &Probability, multi: &Probability, tickets: u64) {
    println!("\n🎯 Probabilités de gagner le gros lot\n");

    let mut table = new_table(vec!["Grilles", "Probabilité", "Chances"]);
    table.add_row(vec![
        Cell::new("1"),
        Cell::new(format_percent(one)),
        Cell::new(format_odds(one)),
    ]);
    if tickets > 1 {
        let color = if multi.successes() == multi.total() {
            Color::Green
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(format_thousands(tickets)),
            Cell::new(format_percent(multi)).fg(color),
            Cell::new(format_odds(multi)),
        ]);
    }
    println!("{table}");
}

pub fn display_history(combination: &Combination, check: HistoryCheck, matches: &[&Draw]) {
    println!("\n📜 Historique pour {combination}\n");

    match check {
        HistoryCheck::Unavailable => {
            println!("Historique non chargé. Lancez d'abord : lotto649 import, ou passez --archive.");
        }
        HistoryCheck::Occurrences(0) => {
            println!("Votre combinaison n'est jamais sortie dans l'historique.");
        }
        HistoryCheck::Occurrences(n) => {
            println!("Votre combinaison est sortie {n} fois dans l'historique :");
            display_draws(matches.iter().copied());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto649_core::history::{Archive, matching_draws};
    use lotto649_core::probability::{multi_ticket_probability, one_ticket_probability};

    fn test_draw(draw_number: u32, numbers: [u8; 6]) -> Draw {
        Draw {
            draw_number,
            sequence_number: 0,
            date: "1982-06-12".to_string(),
            numbers: Combination::new(numbers).unwrap(),
            bonus: None,
        }
    }

    #[test]
    fn test_draws_table_from_borrowed_matches() {
        let archive = Archive::new(vec![
            test_draw(1, [1, 2, 3, 4, 5, 6]),
            test_draw(2, [7, 8, 9, 10, 11, 12]),
            test_draw(3, [6, 5, 4, 3, 2, 1]),
        ]);
        let matches = matching_draws([1, 2, 3, 4, 5, 6], &archive);
        let table = draws_table(matches.iter().copied()).unwrap();
        assert_eq!(table.row_iter().count(), 2);

        let table = draws_table(archive.draws()).unwrap();
        assert_eq!(table.row_iter().count(), 3);
    }

    #[test]
    fn test_draws_table_empty() {
        assert!(draws_table(&Vec::<Draw>::new()).is_none());
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1 000");
        assert_eq!(format_thousands(139_838), "139 838");
        assert_eq!(format_thousands(13_983_816), "13 983 816");
    }

    #[test]
    fn test_format_odds() {
        assert_eq!(format_odds(&one_ticket_probability().unwrap()), "1 sur 13 983 816");
        assert_eq!(format_odds(&multi_ticket_probability(999_999_999).unwrap()), "1 sur 1");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(&one_ticket_probability().unwrap()), "0.00000715 %");
        assert_eq!(format_percent(&multi_ticket_probability(13_983_816).unwrap()), "100.00000000 %");
    }
}
