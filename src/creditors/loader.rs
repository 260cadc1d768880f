//! Load creditor classes from CSV
//!
//! Expected header: `name,total_claim,haircut,installments,annual_rate`

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use super::CreditorClass;
use crate::error::Result;

/// Load and validate creditor classes from a CSV file
pub fn load_creditors<P: AsRef<Path>>(path: P) -> Result<Vec<CreditorClass>> {
    let file = std::fs::File::open(path)?;
    load_creditors_from_reader(file)
}

/// Load and validate creditor classes from any reader
pub fn load_creditors_from_reader<R: Read>(reader: R) -> Result<Vec<CreditorClass>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut classes = Vec::new();

    for result in csv_reader.deserialize() {
        let class: CreditorClass = result?;
        class.validate()?;
        classes.push(class);
    }

    Ok(classes)
}
