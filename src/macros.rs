/// Keep the first item for each distinct key, preserving order.
///
/// `dedupe!(items, by key_fn)` calls `key_fn(&item)`; the key must be
/// `Eq + Hash`.
#[macro_export]
macro_rules! dedupe {
    ($list:expr, by $key:expr) => {{
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for item in $list {
            if seen.insert($key(&item)) {
                result.push(item);
            }
        }
        result
    }};
}
