use secretree_core::{decode, encode, flatten, unflatten, ConfigTree, FlatEntry, StoreOptions};
use serde_json::{json, Value};

fn tree(value: Value) -> ConfigTree {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn round_trip(t: &ConfigTree, delimiter: &str) -> ConfigTree {
    let entries = flatten(t, delimiter);
    unflatten(entries.into_iter().map(|FlatEntry { key, value }| (key, value)), delimiter)
}

#[test]
fn flatten_then_unflatten_restores_the_tree() {
    let cases = [
        json!({}),
        json!({ "a": 1, "b": "two", "c": null, "d": [1, { "x": 1 }] }),
        json!({ "db": { "auth": { "user": "u", "password": "p" }, "port": 5432 } }),
        json!({ "a": { "b": { "c": { "d": { "e": true } } } }, "z": false }),
        json!({ "svc": { "flat": { "k": "v" }, "deep": { "inner": { "k": "v" } } } }),
    ];
    for case in cases {
        let t = tree(case);
        assert_eq!(round_trip(&t, "/"), t);
        assert_eq!(round_trip(&t, "::"), t);
    }
}

#[test]
fn leaf_objects_stay_single_entries() {
    let t = tree(json!({ "a": { "b": "1", "c": { "x": true } } }));
    let keys: Vec<_> = flatten(&t, "/").into_iter().map(|e| e.key).collect();
    assert_eq!(keys, ["a/b", "a/c"]);
}

#[test]
fn unflatten_builds_the_documented_scenario() {
    let t = unflatten([("a/b", json!("1")), ("a/c", json!({ "x": true }))], "/");
    assert_eq!(Value::Object(t), json!({ "a": { "b": "1", "c": { "x": true } } }));
}

#[test]
fn decode_inverts_encode_for_distinct_scope_values() {
    let scopes = [
        (Some("dev"), Some("ns")),
        (Some("dev"), None),
        (None, Some("ns")),
        (None, None),
    ];
    let paths: [&[&str]; 3] = [&["a"], &["a", "b", "c"], &["database", "auth"]];
    for (env, ns) in scopes {
        for delimiter in ["/", ".", "::"] {
            for path in paths {
                let name = encode(env, ns, delimiter, path);
                assert_eq!(decode(&name, env, ns, delimiter), path, "{name}");
            }
        }
    }
}

#[test]
fn options_round_trip_names_in_scope() {
    let options = StoreOptions::builder()
        .environment("production")
        .namespace_parts(["acme", "billing"])
        .delimiter(".")
        .build_with(|_| None)
        .unwrap();

    let name = options.encode_name(&["db", "password"]);
    assert_eq!(name, "acme.billing.production.db.password");
    assert_eq!(options.decode_name(&name), ["db", "password"]);
    assert!(options.scope_filter().unwrap().matches(&name));
    assert!(!options.scope_filter().unwrap().matches("acme.billing.staging.db.password"));
}
