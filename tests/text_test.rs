// Integration tests for the text buffers
// Tests cover: index normalization, replacement, regions, case, splitting, shared buffers

use std::collections::HashMap;

use kcommon::text::functions::{camel_case, concatenate, padding, replace_all_map, replace_regions_with};
use kcommon::{KclError, StringFBuffer, StringFBuilder, StringLike, TrimSide};
use regex::Regex;

// ============================================================================
// Index Normalization
// ============================================================================

#[test]
fn test_non_negative_indices_are_identity() {
    let sb = StringFBuilder::from("abcdef");
    for i in 0..6 {
        assert_eq!(sb.char_at(i).unwrap(), "abcdef".chars().nth(i as usize).unwrap());
    }
}

#[test]
fn test_negative_indices_count_from_end() {
    let sb = StringFBuilder::from("abcdef");
    assert_eq!(sb.char_at(-1).unwrap(), 'f');
    assert_eq!(sb.char_at(-6).unwrap(), 'a');
    assert!(matches!(
        sb.char_at(-7),
        Err(KclError::IndexOutOfBounds { index: -7, length: 6 })
    ));
}

#[test]
fn test_zero_end_means_length() {
    let mut sb = StringFBuilder::from("hello world");
    assert_eq!(sb.substring_range(6, 0).unwrap(), "world");
    sb.delete(5, 0).unwrap();
    assert_eq!(sb, "hello");
}

#[test]
fn test_failed_operation_leaves_buffer_intact() {
    let mut sb = StringFBuilder::from("abc");
    assert!(sb.replace_range(1, 10, "x").is_err());
    assert!(sb.set_char_at(3, 'x').is_err());
    assert_eq!(sb, "abc");
}

// ============================================================================
// Replacement
// ============================================================================

#[test]
fn test_replace_all_literal_pattern() {
    let mut sb = StringFBuilder::from("aXbXc");
    sb.replace_all("X", "-").unwrap();
    assert_eq!(sb, "a-b-c");
}

#[test]
fn test_replace_all_inserts_replacement_literally() {
    let mut sb = StringFBuilder::from("a1b22c");
    sb.replace_all(r"\d+", "$0").unwrap();
    assert_eq!(sb, "a$0b$0c");
}

#[test]
fn test_replace_all_bad_pattern() {
    let mut sb = StringFBuilder::from("abc");
    let result = sb.replace_all("(", "x");
    assert!(matches!(result, Err(KclError::Pattern(_))));
}

#[test]
fn test_replace_all_multibyte_spans() {
    let mut sb = StringFBuilder::from("héllo wörld");
    sb.replace_all("[éö]", "__").unwrap();
    assert_eq!(sb, "h__llo w__rld");
    assert_eq!(sb.len(), 13);
}

#[test]
fn test_replace_literally_all() {
    let mut sb = StringFBuilder::from("a.b.c");
    sb.replace_literally_all(".", "::");
    assert_eq!(sb, "a::b::c");

    sb.replace_literally_all("", "x");
    assert_eq!(sb, "a::b::c");
}

#[test]
fn test_replace_all_with_stateful_replacer() {
    let regex = Regex::new("x").unwrap();
    let mut counter = 0;
    let mut sb = StringFBuilder::from("x-x-x");
    sb.replace_all_with(&regex, |_| {
        counter += 1;
        if counter == 2 { None } else { Some(counter.to_string()) }
    });
    assert_eq!(sb, "1--3");
}

#[test]
fn test_replace_all_map_plain_and_template() {
    let map = HashMap::from([("cat", "dog"), ("category", "kind")]);

    let mut sb = StringFBuilder::from("cat category");
    sb.replace_all_map(&map, None).unwrap();
    assert_eq!(sb, "dog kind");

    let vars = HashMap::from([("user".to_string(), "ada".to_string())]);
    let out = replace_all_map("hi ${user}, user", &vars, Some("${{}}")).unwrap();
    assert_eq!(out, "hi ada, user");
}

#[test]
fn test_replace_all_map_quotes_keys() {
    let map = HashMap::from([("a.b", "X"), ("(", "[")]);
    let mut sb = StringFBuilder::from("a.b aXb (");
    sb.replace_all_map(&map, None).unwrap();
    assert_eq!(sb, "X aXb [");
}

#[test]
fn test_replace_all_map_rejects_template_without_placeholder() {
    let map = HashMap::from([("a", "1"), ("b", "2")]);
    let mut sb = StringFBuilder::from("ab $");
    let result = sb.replace_all_map(&map, Some("$"));
    assert!(matches!(result, Err(KclError::InvalidTemplate { .. })));
    assert_eq!(sb, "ab $");
}

#[test]
fn test_replace_first_and_last() {
    let mut sb = StringFBuilder::from("1-2-3");
    sb.replace_first("-", "+").unwrap();
    assert_eq!(sb, "1+2-3");
    sb.replace_last(r"\d", "N").unwrap();
    assert_eq!(sb, "1+2-N");
}

// ============================================================================
// Regions
// ============================================================================

#[test]
fn test_replace_regions_distinct_delimiters() {
    let out = replace_regions_with("a(*hello*)b", "(*", Some("*)"), |inner| {
        assert_eq!(inner, "hello");
        Some("HI".to_string())
    });
    assert_eq!(out, "aHIb");
}

#[test]
fn test_replace_regions_same_delimiter() {
    let mut sb = StringFBuilder::from("x $a$ y $b$ z");
    sb.replace_regions_with("$", None, |inner| Some(inner.to_uppercase()));
    assert_eq!(sb, "x A y B z");
}

#[test]
fn test_replace_regions_unmatched_open() {
    let mut sb = StringFBuilder::from("[a] [b [c");
    sb.replace_regions("[", Some("]"), "_");
    assert_eq!(sb, "_ [b [c");

    let mut sb = StringFBuilder::from("[a] tail [open");
    sb.replace_regions("[", Some("]"), "_");
    assert_eq!(sb, "_ tail [open");
}

#[test]
fn test_replace_regions_does_not_reprocess() {
    let mut sb = StringFBuilder::from("<a><b>");
    sb.replace_regions_with("<", Some(">"), |inner| Some(format!("<{inner}{inner}>")));
    assert_eq!(sb, "<aa><bb>");
}

#[test]
fn test_replace_regions_none_removes() {
    let mut sb = StringFBuilder::from("keep/*drop*/keep");
    sb.replace_regions_with("/*", Some("*/"), |_| None);
    assert_eq!(sb, "keepkeep");
}

// ============================================================================
// Case, Padding, Trimming, Splitting
// ============================================================================

#[test]
fn test_camel_case() {
    assert_eq!(camel_case("hello_world_foo"), "helloWorldFoo");
    assert_eq!(camel_case("Hello-World"), "helloWorld");
    assert_eq!(camel_case(""), "");
    assert_eq!(camel_case("a"), "a");
}

#[test]
fn test_padding() {
    assert_eq!(padding(Some("ab"), 5, '*', true), "***ab");
    assert_eq!(padding(Some("ab"), 5, '*', false), "ab***");
}

#[test]
fn test_trim_variants() {
    let mut sb = StringFBuilder::from("  \t text \n");
    sb.trim();
    assert_eq!(sb, "text");

    let mut sb = StringFBuilder::from("xxtextxx");
    sb.trim_chars("x", TrimSide::Leading);
    assert_eq!(sb, "textxx");

    let mut sb = StringFBuilder::from("a-b_c");
    sb.remove_chars("-_");
    assert_eq!(sb, "abc");
}

#[test]
fn test_prefix_suffix_helpers() {
    let mut sb = StringFBuilder::from("path/to");
    sb.append_if_missing("/").append_if_missing("/");
    assert_eq!(sb, "path/to/");
    sb.prepend_if_missing("/").remove_end("/");
    assert_eq!(sb, "/path/to");
    sb.remove_start("/path");
    assert_eq!(sb, "/to");
    assert!(sb.starts_with_ignore_case("/TO"));
    assert!(sb.ends_with_ignore_case("TO"));
    assert!(sb.equals_ignore_case("/To"));
}

#[test]
fn test_split() {
    let sb = StringFBuilder::from(",a,,b;c,");
    assert_eq!(sb.split(",;"), vec!["a", "b", "c"]);

    let sb = StringFBuilder::from("a1b22c");
    assert_eq!(sb.split_regex(r"\d+").unwrap(), vec!["a", "b", "c"]);
    assert_eq!(sb.split_regex("x").unwrap(), vec!["a1b22c"]);
}

#[test]
fn test_search() {
    let sb = StringFBuilder::from("abcabc");
    assert_eq!(sb.index_of("bc"), Some(1));
    assert_eq!(sb.index_of_from("bc", 2), Some(4));
    assert_eq!(sb.index_of_from("bc", -2), Some(4));
    assert_eq!(sb.last_index_of("bc"), Some(4));
    assert_eq!(sb.last_index_of_from("bc", 3), Some(1));
    assert_eq!(sb.index_of_any_char(&['c', 'b'], 0), Some(1));
    assert_eq!(sb.index_of_any(&["ca", "x"], 0), Some(2));
    assert_eq!(sb.last_index_of_any_char(&['a']), Some(3));
    assert_eq!(sb.last_index_of_any(&["ab", "bc"]), Some(4));
    assert_eq!(sb.index_of("z"), None);
}

#[test]
fn test_reverse_and_case() {
    let mut sb = StringFBuilder::from("abC");
    sb.reverse();
    assert_eq!(sb, "Cba");
    sb.to_upper_case();
    assert_eq!(sb, "CBA");
    sb.to_lower_case().first_up();
    assert_eq!(sb, "Cba");
}

#[test]
fn test_concatenate() {
    assert_eq!(concatenate("/", ["usr", "", "local"]), "usr/local");
    assert_eq!(concatenate("/", Vec::<String>::new()), "");
}

// ============================================================================
// Synchronized Buffer
// ============================================================================

#[test]
fn test_buffer_shared_across_threads() {
    let buffer = StringFBuffer::new();
    std::thread::scope(|scope| {
        for i in 0..8 {
            let mut handle = buffer.clone();
            scope.spawn(move || {
                handle.append(&i.to_string());
            });
        }
    });
    let mut digits: Vec<char> = buffer.to_text().chars().collect();
    digits.sort_unstable();
    assert_eq!(digits.into_iter().collect::<String>(), "01234567");
}

#[test]
fn test_buffer_index_ops_race_with_shrinking_writers() {
    let buffer = StringFBuffer::new();
    std::thread::scope(|scope| {
        for _ in 0..3 {
            let mut writer = buffer.clone();
            scope.spawn(move || {
                for _ in 0..2000 {
                    writer.append("abcdefghij");
                    writer.clear();
                }
            });
        }
        for _ in 0..3 {
            let mut reader = buffer.clone();
            scope.spawn(move || {
                for _ in 0..2000 {
                    // Either a clean delete or a bounds error, never a panic
                    let _ = reader.delete(-3, 0);
                    let _ = reader.replace_range(1, -1, "x");
                    let _ = reader.char_at(-1);
                    reader.trim_chars("j", TrimSide::Trailing).remove_end("i");
                }
            });
        }
    });
    assert_eq!(buffer.len(), buffer.lock().as_str().chars().count());
}

#[test]
fn test_buffer_locked_replacement_is_not_interleaved() {
    let buffer = StringFBuffer::new();
    let regex = Regex::new("x+").unwrap();
    std::thread::scope(|scope| {
        for _ in 0..3 {
            let mut writer = buffer.clone();
            scope.spawn(move || {
                for _ in 0..500 {
                    writer.append("x");
                }
            });
        }
        for _ in 0..500 {
            buffer.locked(|sb| {
                sb.replace_all_regex(&regex, "y");
                assert!(!sb.as_str().contains('x'));
            });
        }
    });
    let text = buffer.to_text();
    assert_eq!(text.chars().filter(|c| *c == 'x' || *c == 'y').count(), text.len());
}
