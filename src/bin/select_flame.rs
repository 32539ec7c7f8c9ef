use compact_rational::select::select;
use compact_rational::wire::{pack, unpack};
use compact_rational::{Adder, Canonicalizer, Config, Encoder, EncodedValue};

fn main() {
    // denominators with no single-term form exercise the two-term search
    let fractions = (1..2000)
        .map(|i| (i % 997 + 1, 1000 + (i % 61) * 7))
        .collect::<Vec<(i64, i64)>>();

    let encoder = Encoder::with_config(Config::lossy());
    let adder = Adder::with_config(Config::lossy());
    let canonicalizer = Canonicalizer::with_config(Config::lossy());

    for _ in 0..50 {
        let mut acc = EncodedValue::zero();
        for &(n, d) in &fractions {
            std::hint::black_box(select(n % d, d));
            if let Ok(v) = encoder.encode_fraction(n as i32, d as i32) {
                let bytes = pack(&v);
                if let Ok((back, _)) = unpack(&bytes) {
                    acc = adder
                        .add(&acc, &back)
                        .and_then(|sum| canonicalizer.canonicalize(&sum))
                        .unwrap_or(acc);
                }
            }
        }
        std::hint::black_box(acc);
    }
}
