#![no_main]

use libfuzzer_sys::fuzz_target;

use strassen_core::Matrix;

fuzz_target!(|data: &[u8]| {
    // Arbitrary JSON must either be rejected or yield a square matrix.
    if let Ok(m) = serde_json::from_slice::<Matrix>(data) {
        assert!(m.size() >= 1);
        assert_eq!(m.as_slice().len(), m.size() * m.size());
    }
});
