// fasta.rs - FASTA loader for sequence lists

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use bio::io::fasta;

use crate::data::sequence::SequenceSet;

impl SequenceSet {
    /// Load every FASTA record in file order, labelled by record id
    pub fn from_fasta(fasta_path: &Path) -> Result<Self, String> {
        let file = File::open(fasta_path)
            .map_err(|e| format!("Failed to open FASTA file {}: {}", fasta_path.display(), e))?;

        let reader = fasta::Reader::new(BufReader::new(file));
        let mut set = SequenceSet::new();

        for record_result in reader.records() {
            let record = record_result
                .map_err(|e| format!("Invalid FASTA record in {}: {}", fasta_path.display(), e))?;

            let sequence = String::from_utf8(record.seq().to_vec())
                .map_err(|e| format!("Record '{}' is not valid UTF-8: {}", record.id(), e))?;
            set.push(record.id().to_string(), sequence);
        }

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loaders::write_temp;

    #[test]
    fn test_fasta_records() {
        let path = write_temp(
            "clones.fasta",
            ">clone1 first\nCASSLG\nQAYEQYF\n>clone2\nCAWSVGTGNTIYF\n>clone3\nCASSLGQAYEQYF\n",
        );
        let set = SequenceSet::from_fasta(&path).unwrap();
        assert_eq!(set.labels, vec!["clone1", "clone2", "clone3"]);
        assert_eq!(set.sequences[0], "CASSLGQAYEQYF");
        assert_eq!(set.sequences[0], set.sequences[2]);
    }

    #[test]
    fn test_missing_file() {
        assert!(SequenceSet::from_fasta(Path::new("/nonexistent/clones.fasta")).is_err());
    }
}
