#![no_main]

use libfuzzer_sys::fuzz_target;
use rados_pools::parse_pool_list;

fuzz_target!(|data: &[u8]| {
    if let Ok(names) = parse_pool_list(data) {
        // A listing that parses must account for every byte:
        // each name plus its NUL, and the closing NUL.
        let expected: usize = names.iter().map(|n| n.len() + 1).sum::<usize>() + 1;
        if names.is_empty() {
            assert_eq!(data, [0]);
        } else {
            assert_eq!(expected, data.len());
        }
    }
});
