//! Valuation table rendering and CSV export.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use crate::pricing::{RosterRow, TeamValuation};

/// Sort rows cheapest first, ranks breaking price ties.
pub fn sort_by_price(rows: &mut [TeamValuation]) {
    rows.sort_by(|a, b| {
        a.total_price
            .cmp(&b.total_price)
            .then_with(|| a.rank.cmp(&b.rank))
    });
}

/// Render the sweep result as a plain-text table.
pub fn render_table(rows: &[TeamValuation]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:<36}  {:<34}  {:>12}",
        "RANK", "PLAYER", "TWINS", "PRICE"
    );

    for row in rows {
        let _ = writeln!(
            out,
            "{:>5}  {:<36}  {:<34}  {:>12}",
            row.rank,
            row.player_id,
            row.twin_ids.join("|"),
            row.total_price,
        );
    }

    out
}

/// Render roster rows as a plain-text table.
pub fn render_roster(rows: &[RosterRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>10}  {:>10}  {:>12}", "AXIE", "TWIN", "PRICE");

    for row in rows {
        let _ = writeln!(
            out,
            "{:>10}  {:>10}  {:>12}",
            row.axie_id,
            row.twin_id.as_deref().unwrap_or("-"),
            row.price
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    out
}

/// Write the sweep result as CSV.
pub fn write_csv(path: &Path, rows: &[TeamValuation]) -> io::Result<()> {
    let mut out = String::from("rank,player_id,twin_id_1,twin_id_2,twin_id_3,total_price\n");

    for row in rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            row.rank,
            row.player_id,
            row.twin_ids[0],
            row.twin_ids[1],
            row.twin_ids[2],
            row.total_price,
        );
    }

    fs::write(path, out)
}

/// Write roster rows as CSV.
pub fn write_roster_csv(path: &Path, rows: &[RosterRow]) -> io::Result<()> {
    let mut out = String::from("axie_id,twin_id,price\n");

    for row in rows {
        let _ = writeln!(
            out,
            "{},{},{}",
            row.axie_id,
            row.twin_id.as_deref().unwrap_or(""),
            row.price.map(|p| p.to_string()).unwrap_or_default(),
        );
    }

    fs::write(path, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(rank: u32, price: rust_decimal::Decimal) -> TeamValuation {
        TeamValuation {
            rank,
            player_id: format!("player-{rank}"),
            twin_ids: ["1".to_string(), "2".to_string(), "3".to_string()],
            total_price: price,
        }
    }

    #[test]
    fn sorts_by_price_then_rank() {
        let mut rows = vec![
            row(3, dec!(50.00)),
            row(1, dec!(20.00)),
            row(2, dec!(20.00)),
        ];

        sort_by_price(&mut rows);

        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[2].rank, 3);
    }

    #[test]
    fn csv_keeps_exact_prices() {
        let rows = vec![row(1, dec!(425.75))];
        let dir = std::env::temp_dir().join("axie-valuer-test-csv");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("teams.csv");

        write_csv(&path, &rows).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        assert!(written.starts_with("rank,player_id,"));
        assert!(written.contains("1,player-1,1,2,3,425.75"));
    }

    #[test]
    fn table_includes_every_row() {
        let rows = vec![row(1, dec!(10.00)), row(2, dec!(20.00))];
        let table = render_table(&rows);
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("player-2"));
    }
}
