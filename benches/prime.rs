#![feature(test)]

extern crate test;

use num_bigint::{BigInt, BigUint};
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use ssrsa::{math::jacobi, prime};
use test::Bencher;

const NUM: &str = "203956878356401977405765866929034577280193993314348263094772646453283062722701277632936616063144088173312372882677123879538709400158306567338328279154499698366071906766440037074217117805690872792848149112022286332144876183376326512083574821647933992961249917319836219304274280243803104015000563790123";

macro_rules! bench_is_prime {
    ($name:ident, $n:expr) => {
        #[bench]
        fn $name(b: &mut Bencher) {
            let x = test::black_box(BigUint::parse_bytes(NUM.as_bytes(), 10).unwrap());
            let mut rng = ChaCha8Rng::from_seed([42; 32]);

            b.iter(|| {
                let res = prime::is_prime(&mut rng, &x, $n).unwrap();
                test::black_box(res);
            });
        }
    };
}

bench_is_prime!(is_prime_1, 1);
bench_is_prime!(is_prime_10, 10);
bench_is_prime!(is_prime_20, 20);
bench_is_prime!(is_prime_128, 128);

#[bench]
fn bench_jacobi(b: &mut Bencher) {
    let n = test::black_box(BigUint::parse_bytes(NUM.as_bytes(), 10).unwrap());
    let a = BigInt::parse_bytes(&NUM.as_bytes()[..150], 10).unwrap();

    b.iter(|| {
        let res = jacobi(&a, &n);
        test::black_box(res);
    });
}

#[bench]
fn bench_find_512(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    b.iter(|| {
        let res = prime::find(&mut rng, 512, prime::PRIME_ROUNDS).unwrap();
        test::black_box(res);
    });
}
