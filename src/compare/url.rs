//! The `ids` query parameter of the compare page.
//!
//! `?ids=ubuntu,arch` seeds the selection on load and is rewritten after every
//! change. An empty selection means no query string at all.

use std::borrow::Cow;

/// Query parameter holding the comma-separated ids.
pub const IDS_PARAM: &str = "ids";

/// Extract the raw `ids` list from a query string (leading `?` optional).
///
/// Returns `None` when the parameter is missing or blank. Entries are trimmed
/// and blank entries dropped; deduplication and validation are up to the caller.
pub fn parse_ids_param(query: &str) -> Option<Vec<String>> {
    let query = query.trim().trim_start_matches('?');

    let raw = query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode(key) == IDS_PARAM)
        .map(|(_, value)| decode(value).into_owned())?;

    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect();

    (!ids.is_empty()).then_some(ids)
}

/// Build the query string for a selection, `None` when it is empty.
pub fn ids_query<I, T>(ids: I) -> Option<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let joined = ids
        .into_iter()
        .map(|id| urlencoding::encode(id.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(",");

    (!joined.is_empty()).then(|| format!("{IDS_PARAM}={joined}"))
}

/// Percent-decode a query component. `+` is a space; undecodable input is kept as is.
fn decode(component: &str) -> Cow<'_, str> {
    let spaced: Cow<'_, str> = if component.contains('+') {
        Cow::Owned(component.replace('+', " "))
    } else {
        Cow::Borrowed(component)
    };

    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_param() {
        assert_eq!(parse_ids_param("?ids=ubuntu,arch").unwrap(), ["ubuntu", "arch"]);
        assert_eq!(parse_ids_param("ids=a%2Cb").unwrap(), ["a", "b"]);
        assert_eq!(parse_ids_param("x=1&ids=+mint+,,void&y").unwrap(), ["mint", "void"]);
    }

    #[test]
    fn test_parse_ids_param_absent_or_blank() {
        assert!(parse_ids_param("").is_none());
        assert!(parse_ids_param("?").is_none());
        assert!(parse_ids_param("?other=1").is_none());
        assert!(parse_ids_param("?ids=").is_none());
        assert!(parse_ids_param("?ids=,, ,").is_none());
        assert!(parse_ids_param("?ids").is_none());
    }

    #[test]
    fn test_malformed_escape_kept_verbatim() {
        assert_eq!(parse_ids_param("ids=%zz").unwrap(), ["%zz"]);
    }

    #[test]
    fn test_ids_query() {
        assert_eq!(ids_query(["ubuntu", "arch"]).as_deref(), Some("ids=ubuntu,arch"));
        assert_eq!(ids_query(["pop os"]).as_deref(), Some("ids=pop%20os"));
        assert_eq!(ids_query(Vec::<String>::new()), None);
    }

    #[test]
    fn test_query_round_trip() {
        let query = ids_query(["a,b", "c"]).unwrap();
        // A comma inside an id survives encoding but splits on the way back
        assert_eq!(query, "ids=a%2Cb,c");
        assert_eq!(parse_ids_param(&query).unwrap(), ["a", "b", "c"]);
    }
}
