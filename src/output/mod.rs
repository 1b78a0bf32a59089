// mod.rs - Output formatters module

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::DistanceMatrix;

/// Output formats accepted by [`write_matrix`]
pub const FORMATS: &[&str] = &["tsv", "csv", "phylip", "nexus", "condensed"];

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent).map_err(|e| {
            format!("Failed to create parent directory '{}': {}", parent.display(), e)
        })?;
    }
    Ok(())
}

fn create_writer(file_path: &str) -> Result<BufWriter<File>, String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    Ok(BufWriter::new(file))
}

fn write_err(e: std::io::Error) -> String {
    format!("Write error: {}", e)
}

fn write_comment_header<W: Write>(writer: &mut W, prefix: &str, command_line: &str) -> std::io::Result<()> {
    writeln!(writer, "{} Command: {}", prefix, command_line)?;
    writeln!(
        writer,
        "{} Generated: {}",
        prefix,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(writer, "{} aadist v{}", prefix, env!("CARGO_PKG_VERSION"))
}

/// Full labelled matrix with a separator between cells.
///
/// Labels holding the separator or a quote are quoted.
pub fn write_delimited<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    separator: u8,
    command_line: &str,
) -> std::io::Result<()> {
    write_comment_header(writer, "#", command_line)?;

    let mut records = csv::WriterBuilder::new()
        .delimiter(separator)
        .from_writer(&mut *writer);

    let header = std::iter::once("Sequence").chain(matrix.labels().iter().map(String::as_str));
    records.write_record(header)?;

    for (i, label) in matrix.labels().iter().enumerate() {
        let row = std::iter::once(label.clone())
            .chain(matrix.row(i).iter().map(|distance| distance.to_string()));
        records.write_record(row)?;
    }
    records.flush()?;
    Ok(())
}

/// PHYLIP lower triangle including the diagonal
pub fn write_phylip<W: Write>(writer: &mut W, matrix: &DistanceMatrix) -> std::io::Result<()> {
    writeln!(writer, "    {}", matrix.len())?;
    for (i, label) in matrix.labels().iter().enumerate() {
        write!(writer, "{:<10}", label)?;
        for distance in &matrix.row(i)[..=i] {
            write!(writer, "  {}", distance)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// NEXUS DISTANCES block, lower triangle without the diagonal
pub fn write_nexus<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> std::io::Result<()> {
    writeln!(writer, "#NEXUS")?;
    writeln!(writer, "[Command: {}]", command_line)?;
    writeln!(
        writer,
        "[Generated: {}]",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(writer, "[aadist v{}]", env!("CARGO_PKG_VERSION"))?;
    writeln!(writer, "BEGIN DISTANCES;")?;
    writeln!(writer, "    DIMENSIONS NTAX={};", matrix.len())?;
    writeln!(writer, "    FORMAT TRIANGLE=LOWER NODIAGONAL LABELS;")?;
    writeln!(writer, "    MATRIX")?;

    for (i, label) in matrix.labels().iter().enumerate() {
        write!(writer, "        {}", label)?;
        for distance in &matrix.row(i)[..i] {
            write!(writer, " {}", distance)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "    ;")?;
    writeln!(writer, "END;")
}

/// Upper triangle (i < j), one value per line after an `# n=<N>` header
pub fn write_condensed<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> std::io::Result<()> {
    write_comment_header(writer, "#", command_line)?;
    writeln!(writer, "# n={}", matrix.len())?;
    for distance in matrix.condensed() {
        writeln!(writer, "{}", distance)?;
    }
    Ok(())
}

/// Write distance matrix in the specified format
pub fn write_matrix(
    file_path: &str,
    format: &str,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    let format = format.to_lowercase();
    if !FORMATS.contains(&format.as_str()) {
        return Err(format!(
            "Unsupported output format: {}. Use: {}",
            format,
            FORMATS.join(", ")
        ));
    }

    let mut writer = create_writer(file_path)?;
    let written = match format.as_str() {
        "tsv" => write_delimited(&mut writer, matrix, b'\t', command_line),
        "csv" => write_delimited(&mut writer, matrix, b',', command_line),
        "phylip" => write_phylip(&mut writer, matrix),
        "nexus" => write_nexus(&mut writer, matrix, command_line),
        _ => write_condensed(&mut writer, matrix, command_line),
    };
    written.map_err(write_err)?;

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Distance matrix written to: {} ({})", file_path, format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{build_distance_matrix, SubstitutionCostTable};

    fn sample_matrix() -> DistanceMatrix {
        let table = SubstitutionCostTable::uniform("AB", 1.0).unwrap();
        build_distance_matrix(&["AB", "BA", "A"], &table).unwrap()
    }

    fn data_lines(bytes: Vec<u8>) -> Vec<String> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .filter(|l| !l.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_tsv() {
        let mut out = Vec::new();
        write_delimited(&mut out, &sample_matrix(), b'\t', "aadist test").unwrap();
        let lines = data_lines(out);
        assert_eq!(lines[0], "Sequence\tAB\tBA\tA");
        assert_eq!(lines[1], "AB\t0\t2\t1");
        assert_eq!(lines[3], "A\t1\t1\t0");
    }

    #[test]
    fn test_csv_quotes_labels_with_separator() {
        let matrix = sample_matrix()
            .with_labels(vec!["clone,1".into(), "clone2".into(), "say \"hi\"".into()])
            .unwrap();
        let mut out = Vec::new();
        write_delimited(&mut out, &matrix, b',', "aadist test").unwrap();
        let lines = data_lines(out);
        assert_eq!(lines[0], "Sequence,\"clone,1\",clone2,\"say \"\"hi\"\"\"");
        assert_eq!(lines[1], "\"clone,1\",0,2,1");

        let data = lines.join("\n");
        let mut reader = csv::ReaderBuilder::new().from_reader(data.as_bytes());
        let header = reader.headers().unwrap().clone();
        assert_eq!(header.len(), 4);
        assert_eq!(&header[1], "clone,1");
        assert_eq!(&header[3], "say \"hi\"");
    }

    #[test]
    fn test_phylip() {
        let mut out = Vec::new();
        write_phylip(&mut out, &sample_matrix()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim(), "3");
        assert_eq!(lines[2], "BA          2  0");
    }

    #[test]
    fn test_nexus() {
        let mut out = Vec::new();
        write_nexus(&mut out, &sample_matrix(), "aadist test").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("#NEXUS"));
        assert!(text.contains("DIMENSIONS NTAX=3;"));
        assert!(text.contains("        A 1 1\n"));
    }

    #[test]
    fn test_condensed() {
        let mut out = Vec::new();
        write_condensed(&mut out, &sample_matrix(), "aadist test").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("# n=3\n"));
        assert_eq!(data_lines(text.into_bytes()), vec!["2", "1", "1"]);
    }

    #[test]
    fn test_unknown_format() {
        let err = write_matrix("/tmp/never-written.txt", "xlsx", &sample_matrix(), "").unwrap_err();
        assert!(err.contains("Unsupported output format"));
    }
}
