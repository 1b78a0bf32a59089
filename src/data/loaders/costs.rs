// costs.rs - Loader for substitution cost tables

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::core::SubstitutionCostTable;
use crate::data::loaders::delimited::find_column;

/// Layout of a cost table file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostFormat {
    /// Header row of symbols, one row per source symbol
    Square,
    /// One `from`, `to`, `cost` row per ordered pair
    Long,
}

impl FromStr for CostFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "square" | "matrix" => Ok(CostFormat::Square),
            "long" | "melted" => Ok(CostFormat::Long),
            _ => Err(format!("Invalid cost format: {}. Use: square, long", s)),
        }
    }
}

impl CostFormat {
    pub fn description(&self) -> &str {
        match self {
            CostFormat::Square => "square matrix",
            CostFormat::Long => "long format (from, to, cost)",
        }
    }
}

fn parse_symbol(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("Invalid symbol '{}': expected exactly one character", s)),
    }
}

fn parse_cost(s: &str, from: char, to: char) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|_| format!("Failed to parse cost '{}' for ({}, {})", s, from, to))
}

/// Load a cost table from a TSV/CSV file
pub fn load_cost_table(path: &Path, format: CostFormat) -> Result<SubstitutionCostTable, String> {
    println!(
        "🧮 Loading substitution costs ({}): {}",
        format.description(),
        path.display()
    );

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(super::delimiter_for(path))
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| format!("Failed to open cost table '{}': {}", path.display(), e))?;

    let table = match format {
        CostFormat::Square => read_square(&mut reader)?,
        CostFormat::Long => read_long(&mut reader)?,
    };

    println!(
        "✅ Cost table loaded: {} symbols ({})",
        table.len(),
        if table.is_symmetric() { "symmetric" } else { "asymmetric" }
    );
    Ok(table)
}

fn read_square<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<SubstitutionCostTable, String> {
    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read header: {}", e))?
        .clone();
    if headers.len() < 2 {
        return Err("Cost table header must have at least 2 columns".to_string());
    }

    // First header cell labels the row-symbol column
    let alphabet: Vec<char> = headers
        .iter()
        .skip(1)
        .map(parse_symbol)
        .collect::<Result<_, _>>()?;

    let mut rows: HashMap<char, Vec<f64>> = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("Failed to read cost row: {}", e))?;
        let from = parse_symbol(record.get(0).unwrap_or(""))?;

        let costs = record
            .iter()
            .skip(1)
            .zip(&alphabet)
            .map(|(value, &to)| parse_cost(value, from, to))
            .collect::<Result<Vec<_>, _>>()?;

        if rows.insert(from, costs).is_some() {
            return Err(format!("Duplicate row for symbol '{}'", from));
        }
    }

    // Rows may come in any order; columns define the alphabet order
    let mut ordered = Vec::with_capacity(alphabet.len());
    for symbol in &alphabet {
        let row = rows
            .remove(symbol)
            .ok_or_else(|| format!("Missing row for symbol '{}'", symbol))?;
        ordered.push(row);
    }
    if let Some(extra) = rows.keys().next() {
        return Err(format!("Row symbol '{}' has no matching column", extra));
    }

    SubstitutionCostTable::new(alphabet, ordered).map_err(|e| e.to_string())
}

fn read_long<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<SubstitutionCostTable, String> {
    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read header: {}", e))?
        .clone();
    if headers.len() < 3 {
        return Err("Long cost table must have at least 3 columns".to_string());
    }

    let lowered = csv::StringRecord::from(
        headers.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>(),
    );
    let (from_idx, to_idx, cost_idx) = match (
        find_column(&lowered, "from"),
        find_column(&lowered, "to"),
        find_column(&lowered, "cost"),
    ) {
        (Ok(f), Ok(t), Ok(c)) => (f, t, c),
        _ => (0, 1, 2),
    };

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("Failed to read cost row: {}", e))?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let from = parse_symbol(field(from_idx))?;
        let to = parse_symbol(field(to_idx))?;
        let cost = parse_cost(field(cost_idx), from, to)?;
        entries.push((from, to, cost));
    }

    SubstitutionCostTable::from_pairs(entries).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loaders::write_temp;

    #[test]
    fn test_cost_format_from_str() {
        assert_eq!(CostFormat::from_str("square").unwrap(), CostFormat::Square);
        assert_eq!(CostFormat::from_str("MELTED").unwrap(), CostFormat::Long);
        assert!(CostFormat::from_str("wide").is_err());
    }

    #[test]
    fn test_square_table() {
        let path = write_temp(
            "square.tsv",
            "aa\tA\tC\tD\nC\t0.3\t0\t1.5\nA\t0\t0.3\t0.7\nD\t0.7\t1.5\t0\n",
        );
        let table = load_cost_table(&path, CostFormat::Square).unwrap();
        assert_eq!(table.alphabet(), &['A', 'C', 'D']);
        assert_eq!(table.cost('A', 'D').unwrap(), 0.7);
        assert_eq!(table.cost('C', 'D').unwrap(), 1.5);
        assert!(table.is_symmetric());
    }

    #[test]
    fn test_square_table_errors() {
        let missing_row = write_temp("square_missing.csv", ",A,B\nA,0,1\n");
        assert!(load_cost_table(&missing_row, CostFormat::Square)
            .unwrap_err()
            .contains("Missing row"));

        let bad_symbol = write_temp("square_symbol.csv", ",A,BB\nA,0,1\nBB,1,0\n");
        assert!(load_cost_table(&bad_symbol, CostFormat::Square).is_err());

        let negative = write_temp("square_negative.csv", ",A,B\nA,0,-1\nB,1,0\n");
        assert!(load_cost_table(&negative, CostFormat::Square)
            .unwrap_err()
            .contains("invalid cost table"));
    }

    #[test]
    fn test_long_table() {
        let path = write_temp(
            "long.csv",
            "to,from,cost\nB,A,0.5\nA,B,3\n",
        );
        let table = load_cost_table(&path, CostFormat::Long).unwrap();
        assert_eq!(table.cost('A', 'B').unwrap(), 0.5);
        assert_eq!(table.cost('B', 'A').unwrap(), 3.0);
        assert_eq!(table.cost('A', 'A').unwrap(), 0.0);
    }

    #[test]
    fn test_long_table_positional_columns() {
        let path = write_temp("long_positional.tsv", "Var1\tVar2\tvalue\nA\tB\t2\nB\tA\t2\n");
        let table = load_cost_table(&path, CostFormat::Long).unwrap();
        assert_eq!(table.cost('A', 'B').unwrap(), 2.0);
        assert!(table.is_symmetric());
    }
}
