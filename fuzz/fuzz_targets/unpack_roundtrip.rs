#![no_main]
use compact_rational::canonical::canonicalize;
use compact_rational::wire::{pack, unpack};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok((value, used)) = unpack(data) else {
        return;
    };
    assert!(used <= data.len());
    assert_eq!(used, value.encoded_len());

    let packed = pack(&value);
    let (back, _) = unpack(&packed).unwrap();
    assert_eq!(back, value);

    if let Ok(canonical) = canonicalize(&value) {
        assert_eq!(canonical.to_rational(), value.to_rational());
        assert_eq!(canonicalize(&canonical).unwrap(), canonical);
    }
});
