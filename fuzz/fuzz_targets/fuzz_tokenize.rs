#![no_main]
use fastab::tokenize::Tokenizer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // NUL is the storage record terminator and not valid field content.
    if data.contains(&0) {
        return;
    }
    let mut source = data.to_vec();
    source.push(b'\n');

    let mut tok = Tokenizer::new(&source, b',', Some(b'#'), b'"', true);
    if let Ok(names) = tok.tokenize_header(0) {
        let use_cols = vec![true; names.len()];
        if tok.tokenize(1, None, &use_cols).is_ok() {
            for col in 0..use_cols.len() {
                assert_eq!(tok.column_fields(col).count(), tok.num_rows());
            }
        }
    }
});
