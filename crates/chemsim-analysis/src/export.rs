//! CSV export of the raw descriptor table. Nulls become empty cells.

use std::io::Write;
use std::path::Path;

use chemsim_common::Result;
use tracing::info;

use crate::table::DescriptorTable;

pub fn write_table<W: Write>(table: &DescriptorTable, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(table.columns()).map_err(std::io::Error::from)?;
    for row in table.rows() {
        out.write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(std::io::Error::from)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_csv(table: &DescriptorTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_table(table, file)?;
    info!(path = %path.display(), rows = table.shape().0, "Descriptor table written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemsim_common::DescriptorRecord;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<DescriptorRecord> {
        vec![
            DescriptorRecord {
                cid: 2244,
                smiles: "CC(=O)OC1=CC=CC=C1C(=O)O".to_string(),
                iupac_name: Some("2-acetyloxybenzoic acid".to_string()),
                values: vec![("MW".to_string(), Some(180.042)), ("nRing".to_string(), Some(1.0))],
            },
            DescriptorRecord {
                cid: 7,
                smiles: "C".to_string(),
                iupac_name: None,
                values: vec![("MW".to_string(), None), ("nRing".to_string(), Some(0.0))],
            },
        ]
    }

    #[test]
    fn test_write_table() {
        let table = DescriptorTable::from_records(&records());
        let mut buf = Vec::new();
        write_table(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "CID,SMILES,IUPAC,MW,nRing\n\
             2244,CC(=O)OC1=CC=CC=C1C(=O)O,2-acetyloxybenzoic acid,180.042,1\n\
             7,C,,,0\n"
        );
    }

    #[test]
    fn test_write_csv_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("descriptors.csv");
        write_csv(&DescriptorTable::from_records(&records()), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 5);
        assert_eq!(reader.records().count(), 2);
    }
}
