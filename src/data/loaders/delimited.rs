// delimited.rs - TSV/CSV loader for sequence lists

use std::path::Path;

use crate::data::sequence::SequenceSet;

/// Position of a named header column
pub(crate) fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, String> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        format!(
            "Column '{}' not found. Available columns: {}",
            name,
            headers.iter().collect::<Vec<_>>().join(", ")
        )
    })
}

impl SequenceSet {
    /// Load sequences from a delimited file with a header row.
    ///
    /// Lines starting with `#` are skipped and fields are trimmed. Without a label
    /// column each sequence labels itself.
    pub fn from_delimited(
        file_path: &Path,
        delimiter: u8,
        sequence_column: &str,
        label_column: Option<&str>,
    ) -> Result<Self, String> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_path(file_path)
            .map_err(|e| format!("Failed to open sequence file '{}': {}", file_path.display(), e))?;

        let headers = reader
            .headers()
            .map_err(|e| format!("Failed to read header: {}", e))?
            .clone();
        if headers.is_empty() {
            return Err("Empty sequence file".to_string());
        }

        let sequence_idx = find_column(&headers, sequence_column)?;
        let label_idx = label_column
            .map(|name| find_column(&headers, name))
            .transpose()?;

        let mut set = SequenceSet::new();
        for record in reader.records() {
            let record = record.map_err(|e| format!("Failed to read record: {}", e))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let sequence = record
                .get(sequence_idx)
                .ok_or_else(|| format!("Line {} has no '{}' column", line, sequence_column))?
                .to_string();
            let label = match label_idx {
                Some(idx) => record
                    .get(idx)
                    .ok_or_else(|| format!("Line {} has no label column", line))?
                    .to_string(),
                None => sequence.clone(),
            };

            set.push(label, sequence);
        }

        Ok(set)
    }
}
