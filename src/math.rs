//! Number theoretic helpers used by the primality engine.

use num_bigint::Sign::Plus;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// Returns the Jacobi symbol `(a/b)`, either +1, -1, or 0.
///
/// `b` must be odd. Negative `a` is reduced modulo `b` first.
///
/// Each step reduces `a` modulo `b`, strips the powers of two with a single
/// shift and applies quadratic reciprocity before swapping the operands, so
/// the cost is logarithmic in `b`.
pub fn jacobi(a: &BigInt, b: &BigUint) -> isize {
    if !b.is_odd() {
        panic!("invalid arguments, b must be an odd integer, but got {}", b);
    }

    let modulus = BigInt::from_biguint(Plus, b.clone());
    let mut a = a
        .mod_floor(&modulus)
        .to_biguint()
        .unwrap_or_else(BigUint::zero);
    let mut b = b.clone();
    let mut s = 1;

    loop {
        if b.is_one() {
            return s;
        }

        a %= &b;
        if a.is_zero() {
            return 0;
        }
        if a.is_one() {
            return s;
        }

        // a = 2^twos * c, c odd
        let twos = a.trailing_zeros().unwrap_or(0);
        let c = &a >> twos;

        // (2/b) = -1 iff b = 3 or 5 (mod 8)
        let b_mod_8 = residue(&b, 8);
        if twos & 1 == 1 && (b_mod_8 == 3 || b_mod_8 == 5) {
            s = -s;
        }

        // (c/b)(b/c) = -1 iff c = b = 3 (mod 4)
        if residue(&c, 4) == 3 && b_mod_8 & 3 == 3 {
            s = -s;
        }

        a = b;
        b = c;
    }
}

/// Returns `x mod m` for a small modulus.
#[inline]
fn residue(x: &BigUint, m: u32) -> u32 {
    (x % m).to_u32().unwrap_or(0)
}

/// Returns `ceil(a / b)`.
pub(crate) fn div_ceil(a: &BigUint, b: &BigUint) -> BigUint {
    let (q, r) = a.div_rem(b);
    if r.is_zero() {
        q
    } else {
        q + BigUint::one()
    }
}

/// Returns `lcm(a, b) = a * b / gcd(a, b)`.
pub(crate) fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    (a * b) / a.gcd(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    /// Legendre symbol by Euler's criterion, for small odd primes.
    fn legendre(a: u64, p: u64) -> isize {
        let a = a % p;
        if a == 0 {
            return 0;
        }
        let mut result = 1u64;
        let mut base = a;
        let mut exp = (p - 1) / 2;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base % p;
            }
            base = base * base % p;
            exp >>= 1;
        }
        if result == 1 {
            1
        } else {
            -1
        }
    }

    /// Jacobi symbol from the factorization of `b`.
    fn reference_jacobi(a: u64, mut b: u64) -> isize {
        let mut j = 1;
        let mut f = 3;
        while b > 1 {
            while b % f == 0 {
                j *= legendre(a, f);
                b /= f;
            }
            f += 2;
        }
        j
    }

    fn gcd(mut a: u64, mut b: u64) -> u64 {
        while b != 0 {
            let t = a % b;
            a = b;
            b = t;
        }
        a
    }

    #[test]
    fn test_jacobi() {
        let cases = [
            [0, 1, 1],
            [1, 1, 1],
            [0, 5, 0],
            [1, 5, 1],
            [2, 5, -1],
            [-2, 5, -1],
            [3, 5, -1],
            [5, 5, 0],
            [-5, 5, 0],
            [6, 5, 1],
            [-6, 5, 1],
            [1001, 9907, -1],
            [19, 45, 1],
            [8, 21, -1],
            [5, 21, 1],
        ];

        for case in cases.iter() {
            let x = BigInt::from_i64(case[0]).unwrap();
            let y = BigUint::from_i64(case[1]).unwrap();

            assert_eq!(case[2] as isize, jacobi(&x, &y), "jacobi({}, {})", x, y);
        }
    }

    #[test]
    fn test_jacobi_matches_reference() {
        for b in (1u64..1000).step_by(2) {
            let big_b = BigUint::from(b);
            for a in 0u64..1000 {
                let got = jacobi(&BigInt::from(a), &big_b);
                assert_eq!(got, reference_jacobi(a, b), "jacobi({}, {})", a, b);
                assert_eq!(got == 0, gcd(a, b) > 1, "zero iff common factor ({}, {})", a, b);
            }
        }
    }

    #[test]
    fn test_jacobi_large() {
        // (a/p) for a prime p agrees with Euler's criterion a^((p-1)/2) mod p
        let p = BigUint::parse_bytes(
            b"57896044618658097711785492504343953926634992332820282019728792003956564819949",
            10,
        )
        .unwrap();
        let pow = (&p - BigUint::one()) >> 1;
        for a in [2u64, 3, 5, 7, 1_000_003, 987_654_321_987] {
            let a = BigUint::from(a);
            let euler = a.modpow(&pow, &p);
            let expected = if euler.is_one() { 1 } else { -1 };
            assert_eq!(jacobi(&BigInt::from_biguint(Plus, a.clone()), &p), expected);
        }
    }

    #[test]
    #[should_panic]
    fn test_jacobi_even_modulus() {
        jacobi(&BigInt::from(3), &BigUint::from(10u32));
    }

    #[test]
    fn test_div_ceil_and_lcm() {
        let a = BigUint::from(10u32);
        assert_eq!(div_ceil(&a, &BigUint::from(3u32)), BigUint::from(4u32));
        assert_eq!(div_ceil(&a, &BigUint::from(5u32)), BigUint::from(2u32));
        assert_eq!(lcm(&BigUint::from(12u32), &BigUint::from(18u32)), BigUint::from(36u32));
    }
}
