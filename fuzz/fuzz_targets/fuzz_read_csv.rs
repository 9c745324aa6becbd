#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let options = fastab::ReadOptions::csv();
    if let Ok(table) = fastab::read_bytes(data, &options) {
        let rows = table.num_rows();
        for (_, col) in table.iter() {
            assert_eq!(col.len(), rows);
            if let Some(mask) = &col.mask {
                assert_eq!(mask.len(), rows);
            }
        }
    }
});
