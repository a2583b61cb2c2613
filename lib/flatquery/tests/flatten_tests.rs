//! Integration tests for flattening serde and introspected values.

#![allow(missing_docs)]

use std::collections::{BTreeMap, HashMap};

use assert2::{check, let_assert};
use flatquery::prelude::*;
use flatquery::{DEFAULT_MAX_DEPTH, to_value};

#[derive(Debug, Clone, Serialize, Introspect)]
struct Dimens {
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, Serialize, Introspect)]
struct Logo {
    url: String,
    dimens: Option<Dimens>,
    tags: Vec<String>,
    labels: BTreeMap<String, String>,
}

fn logo() -> Logo {
    Logo {
        url: "https://x.test/favicon.ico".to_string(),
        dimens: Some(Dimens {
            width: 100,
            height: 120,
        }),
        tags: vec!["round".to_string(), String::new(), "blue".to_string()],
        labels: BTreeMap::from([("alt".to_string(), "company logo".to_string())]),
    }
}

#[test]
fn test_serde_and_derive_flatten_identically() {
    let derived = flatten(&logo()).expect("flatten derived");
    let captured = flatten_serialize(&logo()).expect("flatten serialized");

    check!(derived == captured);
    check!(derived.get("tags") == Some("round,blue"));
    check!(derived.get("labels.alt") == Some("company logo"));
}

#[derive(Debug, Clone, Serialize, Introspect)]
struct Marker;

#[derive(Debug, Clone, Serialize, Introspect)]
struct Tagged {
    q: String,
    markers: Vec<Marker>,
    tags: Vec<String>,
    ids: Vec<Option<u32>>,
}

#[test]
fn test_unit_structs_and_blank_elements_flatten_identically() {
    let tagged = Tagged {
        q: "x".to_string(),
        markers: vec![Marker, Marker],
        tags: vec![String::new()],
        ids: vec![None, None],
    };

    let derived = flatten(&tagged).expect("flatten derived");
    let captured = flatten_serialize(&tagged).expect("flatten serialized");

    check!(derived == captured);
    check!(derived.encode() == "q=x");
    check!(to_value(&Marker).expect("capture") == Marker.introspect());
}

#[test]
fn test_serde_renames_become_key_names() {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Search {
        search_query: &'static str,
        #[serde(rename = "p")]
        page: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        sort: Option<&'static str>,
    }

    let map = flatten_serialize(&Search {
        search_query: "rust",
        page: 2,
        sort: None,
    })
    .expect("flatten");

    check!(map.keys().collect::<Vec<_>>() == vec!["searchQuery", "p"]);
}

#[test]
fn test_json_objects_flatten_like_mappings() {
    let json = serde_json::json!({
        "q": "rust",
        "page": {"size": 20, "number": 1},
        "empty": "",
    });

    let map = flatten_serialize(&json).expect("flatten");

    check!(map.get("q") == Some("rust"));
    check!(map.get("page.size") == Some("20"));
    check!(map.get("page.number") == Some("1"));
    check!(!map.contains_key("empty"));
}

#[test]
fn test_serde_enums_are_keyed_by_variant() {
    #[derive(Serialize)]
    enum Filter {
        All,
        Lang(&'static str),
    }

    #[derive(Serialize)]
    struct Query {
        a: Filter,
        b: Filter,
    }

    let map = flatten_serialize(&Query {
        a: Filter::All,
        b: Filter::Lang("en"),
    })
    .expect("flatten");

    check!(map.get("a") == Some("All"));
    check!(map.get("b.Lang") == Some("en"));
}

#[test]
fn test_non_scalar_map_keys_fail_capture() {
    let map = BTreeMap::from([((1_u8, 2_u8), "pair")]);

    let_assert!(Err(err) = flatten_serialize(&map));
    check!(matches!(err, Error::Capture(_)));
}

#[test]
fn test_custom_separator() {
    let flattener = Flattener::with_config(FlattenConfig::builder().separator("_").build());

    let map = flattener.flatten_introspect(&logo()).expect("flatten");

    check!(map.get("dimens_width") == Some("100"));
    check!(map.get("labels_alt") == Some("company logo"));
}

#[test]
fn test_sorted_map_keys_make_hash_maps_deterministic() {
    let flattener = Flattener::with_config(FlattenConfig::builder().sort_map_keys(true).build());
    let filters: HashMap<&str, u32> = HashMap::from([("c", 3), ("a", 1), ("b", 2)]);

    let map = flattener.flatten_introspect(&filters).expect("flatten");

    check!(map.keys().collect::<Vec<_>>() == vec!["a", "b", "c"]);
}

#[test]
fn test_depth_limit_is_reported() {
    let deep = vec![vec![vec![vec![1_u8]]]];
    let flattener = Flattener::with_config(FlattenConfig::builder().max_depth(2).build());

    let_assert!(Err(err) = flattener.flatten_introspect(&deep));
    check!(err == Error::DepthExceeded { max: 2 });
    check!(err.is_depth_exceeded());
}

#[test]
fn test_default_depth_accepts_ordinary_nesting() {
    check!(Flattener::new().config().max_depth == DEFAULT_MAX_DEPTH);
    check!(flatten(&logo()).is_ok());
}

#[test]
fn test_top_level_nil_is_empty() {
    let none: Option<Logo> = None;

    let map = flatten(&none).expect("flatten");
    check!(map.is_empty());

    let outcome = Flattener::new()
        .flatten(&to_value(&none).expect("capture"))
        .expect("flatten");
    check!(outcome.is_none());
}

#[test]
fn test_pointer_to_pointer_is_invalid() {
    let nested: Option<Option<Dimens>> = Some(Some(Dimens {
        width: 1,
        height: 1,
    }));

    let_assert!(Err(err) = flatten(&nested));
    check!(err.is_invalid_value());
}

#[test]
fn test_flattened_pairs_plug_into_urls() {
    let map = flatten(&logo()).expect("flatten");
    let mut url = flatquery::url::Url::parse("https://api.example.com/render").expect("valid URL");

    map.append_to_url(&mut url);

    let pairs = map.to_query_pairs();
    check!(url.query_pairs().count() == pairs.len());
    check!(pairs.first() == Some(&("url".to_string(), "https://x.test/favicon.ico".to_string())));
}
