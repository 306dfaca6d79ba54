//! Ordered lists of tagged documents.

use crate::error::DecodeError;
use crate::format::Record;
use crate::keys::Keys;
use crate::node::Node;

/// Decodes every element in order. The first failing element fails the whole
/// list; its error is wrapped with the element index.
pub fn decode_list<T, N, F>(items: &[N], mut decode_one: F) -> Result<Vec<T>, DecodeError>
where
    F: FnMut(&N) -> Result<T, DecodeError>,
{
    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_one(item).map_err(|e| DecodeError::element(index, e)))
        .collect()
}

/// Like [`decode_list`], then stable-sorts the result ascending by `key`.
pub fn decode_sorted_by<T, N, K, F, G>(
    items: &[N],
    decode_one: F,
    key: G,
) -> Result<Vec<T>, DecodeError>
where
    F: FnMut(&N) -> Result<T, DecodeError>,
    K: Ord,
    G: FnMut(&T) -> K,
{
    let mut out = decode_list(items, decode_one)?;
    out.sort_by_key(key);
    Ok(out)
}

pub fn decode_records<T: Record, N: Node>(items: &[N], keys: &Keys) -> Result<Vec<T>, DecodeError> {
    decode_list(items, |item| T::read_node(item, keys))
}
