//! Primality check for projective plane orders.

/// Check whether `n` is prime.
///
/// Trial division by odd numbers up to `sqrt(n)`; the orders used for
/// decks are small.
#[must_use]
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Check whether `n` is a plane order the design generator supports.
///
/// Order 1 is the degenerate triangle plane (3 cards of 2 symbols);
/// every other supported order is prime.
#[must_use]
pub fn is_supported_order(n: usize) -> bool {
    n == 1 || is_prime(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_primes() {
        let primes: Vec<usize> = (0..20).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19]);
    }

    #[test]
    fn test_composites() {
        for n in [4, 6, 8, 9, 10, 12, 15, 21, 25, 49, 91, 121] {
            assert!(!is_prime(n), "{} is composite", n);
        }
    }

    #[test]
    fn test_supported_orders() {
        assert!(is_supported_order(1));
        assert!(is_supported_order(2));
        assert!(is_supported_order(7));
        assert!(!is_supported_order(0));
        assert!(!is_supported_order(8));
    }
}
