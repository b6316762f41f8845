use tracing::{debug, warn};

use crate::domain::{
    address_record::{AddressRecord, ProtocolGroup},
    protocol::Protocol,
    sheets::layout::{cell_text, data_sheet},
};

/// Turns the data sheet rows into address records, skipping the header.
///
/// Rows whose identifier names no known network, or without an address, are reported and
/// dropped; the remaining rows are still read.
pub fn read_address_records(rows: &[Vec<String>]) -> Vec<AddressRecord> {
    rows.iter()
        .enumerate()
        .skip(data_sheet::HEADER_ROWS)
        .filter_map(|(row_index, row)| parse_row(row_index, row))
        .collect()
}

fn parse_row(row_index: usize, row: &[String]) -> Option<AddressRecord> {
    let identifier = cell_text(row, data_sheet::RO_IDENTIFIER).trim();
    let address = cell_text(row, data_sheet::RO_ADDRESS).trim();
    let row_number = row_index + 1;

    if identifier.is_empty() && address.is_empty() {
        debug!(row_number, "Skipping blank row");
        return None;
    }

    let Some(protocol) = Protocol::from_identifier(identifier) else {
        warn!(row_number, "Invalid blockchain for ID: {}", identifier);
        return None;
    };

    if address.is_empty() {
        warn!(row_number, "Missing address for ID: {}", identifier);
        return None;
    }

    Some(AddressRecord {
        raw_identifier: identifier.to_owned(),
        protocol,
        address: address.to_owned(),
        row_index,
    })
}

pub fn group_by_protocol(records: Vec<AddressRecord>) -> ProtocolGroup {
    records
        .into_iter()
        .fold(ProtocolGroup::new(), |mut groups, record| {
            groups.entry(record.protocol).or_default().push(record);
            groups
        })
}
