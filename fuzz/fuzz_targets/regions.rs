#![no_main]

use kcommon::{StringFBuilder, StringLike};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (String, String, Option<String>, String)| {
    let (text, open, close, replacement) = input;
    let mut sb = StringFBuilder::from(text.as_str());

    // Must terminate for any delimiters, including empty and overlapping ones
    sb.replace_regions(&open, close.as_deref(), &replacement);
    assert_eq!(sb.len(), sb.as_str().chars().count());

    if open.is_empty() {
        assert_eq!(sb.as_str(), text);
    }

    let mut sb = StringFBuilder::from(text.as_str());
    sb.replace_literally_all(&open, &replacement);
    assert_eq!(sb.as_str(), if open.is_empty() { text.clone() } else { text.replace(&open, &replacement) });
});
