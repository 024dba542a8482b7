use std::collections::HashSet;
use std::path::Path;

use csv::WriterBuilder;

use crate::aggregator::AggregatedRow;

const FIXED_COLUMNS: [&str; 5] = [
    "code",
    "name",
    "registeredVoters",
    "envelopesIssued",
    "validVotes",
];

/// Serializes the aggregated rows as one `;`-delimited table. The party
/// columns are frozen here: sorted lexicographically so two runs that
/// discover parties in different order still write identical files. A
/// party a municipality never reported stays an empty field, which is
/// distinct from a reported zero.
pub fn export_results(
    path: &Path,
    rows: &[AggregatedRow],
    parties: &HashSet<String>,
) -> anyhow::Result<()> {
    let mut party_columns: Vec<&str> = parties.iter().map(String::as_str).collect();
    party_columns.sort_unstable();

    let mut writer = WriterBuilder::new().delimiter(b';').from_path(path)?;

    let mut header = FIXED_COLUMNS.to_vec();
    header.extend(party_columns.iter().copied());
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.code.clone(),
            row.name.clone(),
            row.registered_voters.to_string(),
            row.envelopes_issued.to_string(),
            row.valid_votes.to_string(),
        ];
        for party in &party_columns {
            record.push(
                row.party_votes
                    .get(*party)
                    .map(u64::to_string)
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
