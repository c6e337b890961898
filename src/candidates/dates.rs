use regex::Regex;

use crate::config::patterns::{ISO_DATE, NUMERIC_DATE};
use crate::config::Configuration;

/// The three date families in precedence order: written, numeric, ISO.
pub(crate) fn date_patterns(config: &Configuration) -> impl Iterator<Item = &Regex> {
    config
        .patterns()
        .written_date
        .iter()
        .chain([&*NUMERIC_DATE, &*ISO_DATE])
}

/// Byte ranges of every date expression in `text`.
pub(crate) fn find_dates<'t>(
    config: &'t Configuration,
    text: &'t str,
) -> impl Iterator<Item = std::ops::Range<usize>> + 't {
    date_patterns(config).flat_map(move |re| re.find_iter(text).map(|m| m.range()))
}
