use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{Euclid, One, ToPrimitive, Zero};
use rand::RngCore;
use std::borrow::Borrow;
use std::ops::Deref;

// 2 以外的小素数, 用于试除以及筛选候选值
const SMALL_PRIMES: [u32; 53] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

// numbers below 257^2 without a factor in SMALL_PRIMES are prime
const TRIAL_DIVISION_BOUND: u32 = 257 * 257;

pub struct BigUintExt<T: Borrow<BigUint>>(pub T);

impl<T: Borrow<BigUint>> Deref for BigUintExt<T> {
    type Target = BigUint;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// <<算法导论>>
    /// 定理31.23: 若有d=gcd(a, n), 假设对于某些整数x'和y', 有d=ax'+ny'. 如果d|b, 则方程
    /// ax=b(mod n)有一个解的值位x0, 则x0=x'(b/d) mod n;
    ///
    /// self * inv = 1 \mod modulus, `None` if `gcd(self, modulus) != 1`.
    pub fn modinv(&self, modulus: &BigUint) -> Option<BigUint> {
        if modulus.is_zero() {
            return None;
        }

        let (a, n) = (BigInt::from(self.deref() % modulus), BigInt::from(modulus.clone()));
        let g = a.extended_gcd(&n);
        if g.gcd.is_one() {
            g.x.rem_euclid(&n).to_biguint()
        } else {
            None
        }
    }

    /// 生成[2, self-1)之间的随机数, self > 4
    fn gen_witness<R: RngCore + ?Sized>(&self, rng: &mut R) -> BigUint {
        let (low, high) = (BigUint::from(2u8), self.deref() - 1u32);
        rng.gen_biguint_range(&low, &high)
    }

    /// probability prime test by trial division and the Miller-Rabin algorithm.
    ///
    /// `test_rounds` means the number of Miller-Rabin rounds, for any odd composite the probability
    /// that it passes is at most $4^{-test\_rounds}$.
    pub fn probably_prime_test<R: RngCore + ?Sized>(&self, test_rounds: usize, rng: &mut R) -> bool {
        let n = self.deref();
        if n < &BigUint::from(2u8) {
            return false;
        } else if n.is_even() {
            return n == &BigUint::from(2u8);
        }

        if let Some(x) = n.to_u32() {
            for &p in SMALL_PRIMES.iter() {
                if x == p {
                    return true;
                } else if x % p == 0 {
                    return false;
                }
            }

            if x < TRIAL_DIVISION_BOUND {
                return true;
            }
        } else if SMALL_PRIMES.iter().any(|&p| (n % p).is_zero()) {
            return false;
        }

        self.prime_validate_by_miller_rabin(test_rounds.max(1), rng)
    }

    /// 判断`n`是否是合数, n - 1 = 2^s * r
    fn miller_rabin_witness(&self, s: u64, r: &BigUint, n_m1: &BigUint, a: &BigUint) -> bool {
        let n = self.deref();
        let mut y = a.modpow(r, n);
        if y.is_one() || &y == n_m1 {
            return false;
        }

        for _ in 1..s {
            y = (&y * &y) % n;
            if &y == n_m1 {
                return false;
            } else if y.is_one() {
                return true;
            }
        }

        true
    }

    /// note: 内部调用函数, self是大于`TRIAL_DIVISION_BOUND`的奇数, t>0
    fn prime_validate_by_miller_rabin<R: RngCore + ?Sized>(&self, t: usize, rng: &mut R) -> bool {
        let n_m1 = self.deref() - 1u32;
        let s = n_m1.trailing_zeros().unwrap_or(0);
        let r = &n_m1 >> s;

        for _ in 0..t {
            let a = self.gen_witness(rng);
            if self.miller_rabin_witness(s, &r, &n_m1, &a) {
                return false;
            }
        }

        true
    }

    /// the smallest probable prime that is not less than `self`.
    ///
    /// `0` and `1` advance to `2`, a value that already passes the test is returned unchanged.
    pub fn next_probable_prime<R: RngCore + ?Sized>(
        &self,
        test_rounds: usize,
        rng: &mut R,
    ) -> BigUint {
        let two = BigUint::from(2u8);
        if self.deref() <= &two {
            return two;
        }

        let mut base = self.deref().clone();
        if base.is_even() {
            base += 1u32;
        }

        if base.to_u32().is_some_and(|x| x < TRIAL_DIVISION_BOUND) {
            while !BigUintExt(&base).probably_prime_test(test_rounds, rng) {
                base += 2u32;
            }
            return base;
        }

        // 候选值 base + delta 模各小素数的余数由 base 的余数增量得到, 避免重复的大数取模
        let residues = SMALL_PRIMES
            .iter()
            .map(|&p| (&base % p).to_u64().unwrap_or_default())
            .collect::<Vec<_>>();

        let mut delta = 0u64;
        loop {
            let sieved = SMALL_PRIMES
                .iter()
                .zip(residues.iter())
                .any(|(&p, &r)| (r + delta % p as u64) % p as u64 == 0);

            if !sieved {
                let candidate = &base + delta;
                if BigUintExt(&candidate).prime_validate_by_miller_rabin(test_rounds.max(1), rng) {
                    return candidate;
                }
            }

            delta += 2;
        }
    }
}
