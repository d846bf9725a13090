//! Weeding: remove what patrons must not see

use indexmap::IndexMap;

use crate::models::Holding;

/// Why a copy was left out of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    Missing,
    Lost,
}

/// Lost and missing copies per library display name, in first-seen order
pub type AbsenceLog = IndexMap<String, Vec<Absence>>;

/// Filter holdings and copies in place and return the lost/missing log.
///
/// Order matters: lost and missing copies are recorded before the hidden
/// filter would drop them silently.
pub fn weed(holdings: &mut Vec<Holding>, barcodes: Option<&[String]>) -> AbsenceLog {
    let mut absences = AbsenceLog::new();

    holdings.retain(|h| !h.shadowed && !h.is_void());

    for holding in holdings.iter_mut() {
        let library = holding.library.display_name().to_string();

        holding.copies.retain(|copy| {
            if copy.shadowed {
                return false;
            }
            let absence = if copy.is_missing() {
                Some(Absence::Missing)
            } else if copy.is_lost() {
                Some(Absence::Lost)
            } else {
                None
            };
            if let Some(absence) = absence {
                absences.entry(library.clone()).or_default().push(absence);
                return false;
            }
            if copy.is_hidden() {
                return false;
            }
            match barcodes {
                Some(allowed) => allowed.iter().any(|b| b == &copy.barcode),
                None => true,
            }
        });
    }

    holdings.retain(|h| !h.copies.is_empty());
    absences
}

/// Patron-facing note for a library's lost and missing counts
pub fn describe_absences(missing: usize, lost: usize) -> Option<String> {
    match (missing, lost) {
        (0, 0) => None,
        (0, 1) => Some("lost".to_string()),
        (1, 0) => Some("missing".to_string()),
        (0, l) => Some(format!("{} lost", l)),
        (m, 0) => Some(format!("{} missing", m)),
        (m, l) => Some(format!("{} missing; {} lost", m, l)),
    }
}

/// Collapse the log into one note per library, dropping empty entries
pub fn reduce_absences(log: AbsenceLog) -> IndexMap<String, String> {
    log.into_iter()
        .filter_map(|(library, entries)| {
            let missing = entries.iter().filter(|a| **a == Absence::Missing).count();
            let lost = entries.len() - missing;
            describe_absences(missing, lost).map(|note| (library, note))
        })
        .collect()
}
