//! Mapping between flat delimited secret names and path segments.
//!
//! A full name is `namespace<d>environment<d>segment<d>...`, where either scope
//! component may be absent. All functions assume a non-empty delimiter;
//! [`StoreOptions`](crate::StoreOptions) enforces that on construction.

/// Builds the full secret name for `segments` under the given scope.
///
/// Absent or empty scope components are omitted rather than leaving an empty
/// segment behind.
pub fn encode<S: AsRef<str>>(
    env: Option<&str>,
    namespace: Option<&str>,
    delimiter: &str,
    segments: &[S],
) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(segments.len() + 2);
    parts.extend(present(namespace));
    parts.extend(present(env));
    parts.extend(segments.iter().map(AsRef::as_ref));
    parts.join(delimiter)
}

/// Removes the scope prefix from a full name, returning the relative key.
///
/// This is a literal substring strip: the first occurrence of
/// `namespace<d>` is removed, then the first occurrence of `environment<d>`.
/// It is not anchored to segment boundaries, so a scope value that also
/// appears inside another segment can be stripped from the wrong place.
pub fn strip_scope(full_name: &str, env: Option<&str>, namespace: Option<&str>, delimiter: &str) -> String {
    let mut name = full_name.to_string();
    for scope in [present(namespace), present(env)].into_iter().flatten() {
        let needle = format!("{scope}{delimiter}");
        name = name.replacen(&needle, "", 1);
    }
    name
}

/// Strips the scope prefix and splits the remainder into path segments.
pub fn decode(full_name: &str, env: Option<&str>, namespace: Option<&str>, delimiter: &str) -> Vec<String> {
    split_key(&strip_scope(full_name, env, namespace, delimiter), delimiter)
}

pub fn split_key(key: &str, delimiter: &str) -> Vec<String> {
    key.split(delimiter).map(str::to_string).collect()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
