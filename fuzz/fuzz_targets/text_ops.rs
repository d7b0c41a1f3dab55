#![no_main]

use kcommon::{StringFBuilder, StringLike};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (String, i16, i16, String)| {
    let (text, start, end, insert) = input;
    let mut sb = StringFBuilder::from(text.as_str());
    let len = sb.len();

    // Out-of-range indices must fail cleanly and leave the buffer untouched
    let before = sb.to_text();
    if sb.replace_range(start as isize, end as isize, &insert).is_err() {
        assert_eq!(sb.to_text(), before);
    } else {
        assert!(sb.len() <= len + insert.chars().count());
    }
    assert_eq!(sb.len(), sb.as_str().chars().count());

    let _ = sb.char_at(start as isize);
    let _ = sb.substring(end as isize);
    let _ = sb.index_of_from(&insert, start as isize);
    let _ = sb.last_index_of_from(&insert, end as isize);

    sb.reverse().camel_case().trim();
    assert_eq!(sb.len(), sb.as_str().chars().count());
});
