use std::ops::Range;

use crate::config::Configuration;

/// Byte ranges of every amount expression in `text`: symbol or code prefixed,
/// magnitude word followed by a currency word, and currency word prefixed.
///
/// Matches without a digit are dropped.
pub(crate) fn find_amounts<'t>(
    config: &'t Configuration,
    text: &'t str,
) -> impl Iterator<Item = Range<usize>> + 't {
    let patterns = config.patterns();
    [
        patterns.prefixed_amount.as_ref(),
        patterns.magnitude_amount.as_ref(),
        patterns.worded_amount.as_ref(),
    ]
    .into_iter()
    .flatten()
    .flat_map(move |re| re.find_iter(text))
    .filter(|m| m.as_str().chars().any(|c| c.is_ascii_digit()))
    .map(|m| m.range())
}
