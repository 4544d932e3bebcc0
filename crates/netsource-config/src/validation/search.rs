//! Validation for search provider settings.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::NetsourceConfig;

use super::helpers::validate_range;

static WIKI_LANG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]{1,15}$").unwrap());

pub(crate) fn validate_search(errors: &mut Vec<String>, config: &NetsourceConfig) {
    let search = &config.search;

    validate_range(errors, "search.max_results", search.max_results, 1, 25);
    validate_range(errors, "search.num_sentences", search.num_sentences, 1, 20);
    validate_range(errors, "search.wikipedia_pages", search.wikipedia_pages, 1, 10);
    validate_range(
        errors,
        "search.fetch_timeout_secs",
        search.fetch_timeout_secs,
        1,
        120,
    );

    if !WIKI_LANG_RE.is_match(&search.wikipedia_lang) {
        errors.push(format!(
            "search.wikipedia_lang = {:?} is not a Wikipedia language code",
            search.wikipedia_lang
        ));
    }
}
