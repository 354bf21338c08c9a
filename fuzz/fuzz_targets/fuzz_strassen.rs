#![no_main]

use libfuzzer_sys::fuzz_target;

use strassen_core::{multiply_classic, multiply_strassen, multiply_strassen_parallel, Matrix};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // Size 1..=12 and cutoff 1..=8 from the first two bytes; the rest fills
    // both operands (zero when exhausted).
    let n = usize::from(data[0] % 12) + 1;
    let cutoff = usize::from(data[1] % 8) + 1;
    let mut values = data[2..].iter().map(|&b| i64::from(b as i8));
    let mut next = || values.next().unwrap_or(0);

    let a = Matrix::from_vec(n, (0..n * n).map(|_| next()).collect()).unwrap();
    let b = Matrix::from_vec(n, (0..n * n).map(|_| next()).collect()).unwrap();

    let classic = multiply_classic(&a, &b).unwrap();
    let (strassen, stats) = multiply_strassen(&a, &b, cutoff, None).unwrap();
    assert_eq!(classic, strassen, "n={n} cutoff={cutoff}");

    let (parallel, par_stats) = multiply_strassen_parallel(&a, &b, cutoff, None).unwrap();
    assert_eq!(classic, parallel, "n={n} cutoff={cutoff}");
    assert_eq!(stats.calls, par_stats.calls);
});
