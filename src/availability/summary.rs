//! Summary holdings text from the catalog record

use crate::models::{HomeLibrary, Summary};

const FIELD_SEPARATOR: char = '|';

fn field(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse `library|location|text|note|label|call number info` rows.
///
/// Libraries and locations are created once per distinct name and keep
/// first-seen order. Rows without a library name are skipped.
pub fn parse_summary_holdings(rows: &[String]) -> Vec<HomeLibrary> {
    let mut libraries: Vec<HomeLibrary> = Vec::new();

    for row in rows {
        let mut fields = row.split(FIELD_SEPARATOR);
        let Some(library_name) = field(fields.next()) else {
            tracing::debug!("Skipping summary holdings row without a library: {:?}", row);
            continue;
        };
        let location_name = field(fields.next()).unwrap_or_default();
        let summary = Summary {
            text: field(fields.next()).unwrap_or_default(),
            note: field(fields.next()),
            label: field(fields.next()),
            call_number_information: field(fields.next()),
        };

        let index = match libraries.iter().position(|l| l.name() == library_name) {
            Some(index) => index,
            None => {
                libraries.push(HomeLibrary::named(library_name));
                libraries.len() - 1
            }
        };
        libraries[index]
            .location_mut(&location_name)
            .summaries
            .push(summary);
    }

    libraries
}
