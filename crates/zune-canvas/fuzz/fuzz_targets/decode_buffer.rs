#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = zune_canvas::load(data, false);
    let _ = zune_canvas::load(data, true);
});
