#![no_main]

use harpc_fuzz::BeginCase;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|case: BeginCase| {
    harpc_fuzz::check_roundtrip(&case);
});
