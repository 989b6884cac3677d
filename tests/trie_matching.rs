//! Registration and lookup behaviour of the segment trie.

use proptest::prelude::*;
use trie_router::{register_pattern, Pattern, Trie, TrieError};

mod common;

#[test]
fn test_literal_segment_with_dots() {
    let mut trie = common::isolated_trie();
    trie.put("a.b.c", "v").unwrap();
    let m = trie.match_path("a.b.c").unwrap();
    assert_eq!(m.value(), &"v");
    assert!(m.params().is_empty());
    assert!(trie.match_path("aXbXc").is_none());
}

#[test]
fn test_default_placeholder() {
    let mut trie = common::isolated_trie();
    trie.put(".b.c.<name>", "v").unwrap();
    let m = trie.match_path(".b.c.jiaju").unwrap();
    assert_eq!(m.param("name"), Some("jiaju"));
}

#[test]
fn test_int_placeholder() {
    let mut trie = common::isolated_trie();
    trie.put("a.b.c.<num:int>", "v").unwrap();
    assert_eq!(trie.match_path("a.b.c.123").unwrap().param("num"), Some("123"));
    assert!(trie.match_path("a.b.c.abc").is_none());
}

#[test]
fn test_wildcard_with_dot_delimiter() {
    let mut trie = common::isolated_trie();
    trie.set_delimiter(".").unwrap();
    trie.put("a.b.<name:*>", "v").unwrap();
    assert_eq!(trie.match_path("a.b.c.d").unwrap().param("name"), Some("c.d"));
}

#[test]
fn test_wildcard_with_slash_delimiter() {
    let mut trie = common::isolated_trie();
    trie.put("a/b/<name:*>", "v").unwrap();
    assert_eq!(trie.match_path("a/b/c/d").unwrap().param("name"), Some("c/d"));
    assert!(trie.match_path("a/b").is_none());
}

#[test]
fn test_registered_type_in_default_store() {
    let mobile = r"^((\+86)|(86))?(1(([35][0-9])|[8][0-9]|[7][06789]|[4][579]))\d{8}$";
    register_pattern("mobile", mobile).unwrap();
    assert!(matches!(
        register_pattern("mobile", r"\d+"),
        Err(TrieError::DuplicateName(_))
    ));

    let pattern = Pattern::new("a.b.<num:mobile>").unwrap();
    assert_eq!(pattern.regex_source(), format!("a.b.({mobile})"));

    // a trie without its own store resolves types at registration time
    let mut trie: Trie<&str> = Trie::new();
    trie.put("/call/<num:mobile>", "call").unwrap();
    let m = trie.match_path("/call/13812345678").unwrap();
    assert_eq!(m.param("num"), Some("13812345678"));
    assert_eq!(m.params().len(), 1);
    assert!(trie.match_path("/call/12345").is_none());
}

#[test]
fn test_later_segment_overrides_param() {
    let mut trie = common::isolated_trie();
    trie.put("/org/<id>/repo/<id:int>", "repo").unwrap();
    let params = trie.match_path("/org/acme/repo/7").unwrap().into_params();
    assert_eq!(params["id"], "7");
}

#[test]
fn test_unregistered_path() {
    let mut trie = common::isolated_trie();
    trie.put("/known", "k").unwrap();
    assert!(trie.match_path("/unknown").is_none());
    assert!(trie.match_path("/known/deeper").is_none());
}

#[test]
fn test_dead_end_after_accepted_sibling() {
    let mut trie = common::isolated_trie();
    trie.put("/a/b/c", "literal").unwrap();
    trie.put("/a/<x>/d", "typed").unwrap();
    assert!(trie.match_path("/a/b/d").is_none());
    assert_eq!(trie.match_path("/a/q/d").unwrap().value(), &"typed");
}

#[test]
fn test_overlapping_patterns_prefer_literal() {
    let mut trie = common::isolated_trie();
    trie.put("/n/<n:int>", "typed").unwrap();
    trie.put("/n/123", "literal").unwrap();
    assert_eq!(trie.match_path("/n/123").unwrap().value(), &"literal");
    assert_eq!(trie.match_path("/n/124").unwrap().value(), &"typed");
}

#[test]
fn test_concurrent_lookups() {
    let mut trie = common::isolated_trie();
    for i in 0..50 {
        trie.put(&format!("/static/{i}"), i).unwrap();
    }
    trie.put("/user/<id:int>", 1000).unwrap();
    let trie = &trie;

    std::thread::scope(|scope| {
        for worker in 0..4 {
            scope.spawn(move || {
                for i in 0..50 {
                    let path = format!("/static/{i}");
                    assert_eq!(trie.match_path(&path).unwrap().value(), &i);
                    let user = format!("/user/{}", worker * 100 + i);
                    assert_eq!(trie.match_path(&user).unwrap().value(), &1000);
                }
            });
        }
    });
}

fn segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{1,6}", 1..6)
}

proptest! {
    #[test]
    fn prop_put_then_has(parts in segments()) {
        let pattern = format!("/{}", parts.join("/"));
        let mut trie = common::isolated_trie();

        trie.put(&pattern, 1).unwrap();
        prop_assert!(trie.has(&pattern));
        for depth in 1..parts.len() {
            let prefix = format!("/{}", parts[..depth].join("/"));
            prop_assert!(trie.has(&prefix));
            prop_assert!(trie.match_path(&prefix).is_none());
        }

        let duplicate = trie.put(&pattern, 2);
        prop_assert!(matches!(duplicate, Err(TrieError::DuplicatePattern(_))));
        prop_assert_eq!(trie.get(&pattern), Some(&1));

        let m = trie.match_path(&pattern).unwrap();
        prop_assert_eq!(m.value(), &1);
        prop_assert!(m.params().is_empty());
    }

    #[test]
    fn prop_wildcard_rejoins_rest(prefix in segments(), rest in segments()) {
        let mut trie = common::isolated_trie();
        trie.put(&format!("/{}/<rest:*>", prefix.join("/")), ()).unwrap();

        let path = format!("/{}/{}", prefix.join("/"), rest.join("/"));
        let m = trie.match_path(&path).unwrap();
        let expected = rest.join("/");
        prop_assert_eq!(m.param("rest"), Some(expected.as_str()));
    }
}
