#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // anything that decodes must encode back to the same pixel bytes
    if let Ok(canvas) = zune_canvas::load(data, false) {
        let encoded = zune_canvas::save(&canvas, None).unwrap();
        let decoded = zune_canvas::load(&encoded, false).unwrap();
        assert_eq!(canvas, decoded);
    }
});
