//! Shared utilities for sequence analysis

/// Reverse a sequence
pub fn reverse(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().rev().copied().collect()
}

/// Generate reverse complement of a sequence
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence
        .iter()
        .rev()
        .map(|&nucleotide| complement_nucleotide(nucleotide))
        .collect()
}

/// Complement of a single nucleotide, preserving case
pub fn complement_nucleotide(nucleotide: u8) -> u8 {
    match nucleotide {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        _ => nucleotide, // Return as-is for ambiguous or invalid characters
    }
}

/// Check whether a sequence equals its own reverse complement
pub fn is_reverse_complement_palindrome(sequence: &[u8]) -> bool {
    let n = sequence.len();
    (0..n.div_ceil(2)).all(|i| sequence[i] == complement_nucleotide(sequence[n - 1 - i]))
}

/// Check whether two sequences carry the same character at `pos`.
///
/// Positions past the end of either sequence never compare equal.
pub fn same_at(a: &[u8], b: &[u8], pos: usize) -> bool {
    match (a.get(pos), b.get(pos)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Count positions over the shared prefix where both sequences agree
pub fn matching_positions(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).filter(|(x, y)| x == y).count()
}

/// Check whether a sequence reads the same forwards and backwards
pub fn is_palindrome(sequence: &[u8]) -> bool {
    let n = sequence.len();
    (0..n / 2).all(|i| sequence[i] == sequence[n - 1 - i])
}

/// Check that a sequence is non-empty and drawn only from A/C/G/T (any case)
pub fn is_nucleotide(sequence: &[u8]) -> bool {
    !sequence.is_empty()
        && sequence
            .iter()
            .all(|&b| matches!(b.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T'))
}

/// Fraction of G and C characters over the full sequence length.
///
/// Returns `None` for an empty sequence.
pub fn gc_content(sequence: &[u8]) -> Option<f64> {
    if sequence.is_empty() {
        return None;
    }
    let gc = sequence
        .iter()
        .filter(|&&b| matches!(b.to_ascii_uppercase(), b'G' | b'C'))
        .count();
    Some(gc as f64 / sequence.len() as f64)
}

/// Round to a fixed number of decimal digits
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        assert_eq!(reverse(b"ATGC"), b"CGTA".to_vec());
        assert!(reverse(b"").is_empty());
    }

    #[test]
    fn test_same_at_bounds() {
        assert!(same_at(b"ATG", b"AAG", 0));
        assert!(!same_at(b"ATG", b"AAG", 1));
        assert!(!same_at(b"ATG", b"AT", 2));
        assert!(!same_at(b"", b"", 0));
    }

    #[test]
    fn test_is_palindrome() {
        assert!(is_palindrome(b"GAATTAAG"));
        assert!(is_palindrome(b"ACA"));
        assert!(is_palindrome(b""));
        assert!(!is_palindrome(b"GAATTC"));
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(b"ATGC"), b"GCAT".to_vec());
        assert_eq!(reverse_complement(b"aaCN"), b"NGtt".to_vec());
    }

    #[test]
    fn test_is_reverse_complement_palindrome() {
        assert!(is_reverse_complement_palindrome(b"GAATTC"));
        assert!(is_reverse_complement_palindrome(b"CGAATTCG"));
        // Odd length: the middle base would have to be its own complement
        assert!(!is_reverse_complement_palindrome(b"GAC"));
        assert!(!is_reverse_complement_palindrome(b"GAATTA"));
    }

    #[test]
    fn test_is_nucleotide() {
        assert!(is_nucleotide(b"ATGCatgc"));
        assert!(!is_nucleotide(b"ATGN"));
        assert!(!is_nucleotide(b""));
    }

    #[test]
    fn test_gc_content() {
        assert_eq!(gc_content(b"GGCC"), Some(1.0));
        assert_eq!(gc_content(b"ATGC"), Some(0.5));
        assert_eq!(gc_content(b""), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.6666666, 3), 0.667);
        assert_eq!(round_to(0.125, 2), 0.13);
    }
}
