// Property tests for index normalization and replacement

use kcommon::text::adjust_index;
use kcommon::text::functions::{padding, replace_literally_all};
use kcommon::{Bucket, StringFBuilder, StringLike};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_non_negative_index_is_identity(len in 0usize..1000, idx in 1isize..1000) {
        prop_assert_eq!(adjust_index(len, idx, false), idx);
        prop_assert_eq!(adjust_index(len, idx, true), idx);
    }

    #[test]
    fn prop_negative_index_counts_from_end(len in 0usize..1000, idx in -1000isize..0) {
        prop_assert_eq!(adjust_index(len, idx, false), len as isize + idx);
    }

    #[test]
    fn prop_char_at_matches_chars(text in "\\PC{1,40}", offset in 0usize..40) {
        let sb = StringFBuilder::from(text.as_str());
        let chars: Vec<char> = text.chars().collect();
        let pos = offset % chars.len();
        prop_assert_eq!(sb.char_at(pos as isize).unwrap(), chars[pos]);
        let neg = pos as isize - chars.len() as isize;
        prop_assert_eq!(sb.char_at(neg).unwrap(), chars[pos]);
    }

    #[test]
    fn prop_literal_replacement_matches_std(
        text in "[ab.]{0,40}",
        search in "[ab.]{1,3}",
        replacement in "[xy]{0,3}",
    ) {
        prop_assert_eq!(
            replace_literally_all(&text, &search, &replacement),
            text.replace(&search, &replacement)
        );
    }

    #[test]
    fn prop_regex_replacement_matches_std(text in "[a-c ]{0,40}", replacement in "[xyz$]{0,3}") {
        let mut sb = StringFBuilder::from(text.as_str());
        sb.replace_all("b+", &replacement).unwrap();
        let expected = regex::Regex::new("b+")
            .unwrap()
            .replace_all(&text, regex::NoExpand(&replacement))
            .into_owned();
        prop_assert_eq!(sb.to_text(), expected);
    }

    #[test]
    fn prop_char_count_tracks_content(parts in prop::collection::vec("\\PC{0,8}", 0..10)) {
        let mut sb = StringFBuilder::new();
        for part in &parts {
            sb.append(part);
            if sb.len() > 2 {
                sb.delete(0, 1).unwrap();
            }
        }
        prop_assert_eq!(sb.len(), sb.as_str().chars().count());
    }

    #[test]
    fn prop_padding_reaches_limit(text in "[a-z]{0,10}", limit in 0usize..20, left in any::<bool>()) {
        let padded = padding(Some(text.as_str()), limit, '*', left);
        prop_assert_eq!(padded.chars().count(), limit.max(text.len()));
        prop_assert!(padded.contains(text.as_str()));
    }

    #[test]
    fn prop_bucket_never_exceeds_bound(frees in 0usize..200) {
        let bucket = Bucket::new(String::new, String::clear);
        for _ in 0..frees {
            bucket.free(String::from("x"));
        }
        prop_assert!(bucket.len() <= bucket.config().max_pooled());
        prop_assert_eq!(bucket.stats().returns + bucket.stats().drops, frees);
    }
}
