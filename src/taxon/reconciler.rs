use crate::config::ReferenceTables;
use log::trace;

/// Returns the finer rank to record for `genus`.
///
/// A genus listed in the correction table always takes the table's value,
/// whatever the page said.
pub fn reconcile_finer_rank(tables: &ReferenceTables, genus: &str, parsed: String) -> String {
    match tables.finer_rank_correction(genus) {
        Some(corrected) => {
            if corrected != parsed {
                trace!("Correcting finer rank of {} from '{}' to '{}'", genus, parsed, corrected);
            }
            corrected.to_string()
        }
        None => parsed,
    }
}
