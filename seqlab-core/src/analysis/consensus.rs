//! Consensus by column-majority vote over pre-aligned sequences
//!
//! The consensus length is fixed to the length of the *first* sequence, not
//! the shortest or longest one. Shorter sequences simply do not vote on the
//! columns they lack, and columns of longer sequences past that length are
//! ignored. When two characters tie for a column, the one that appears first
//! in input order wins.

/// Build the majority-vote consensus of a set of sequences
pub fn consensus<S: AsRef<[u8]>>(sequences: &[S]) -> Vec<u8> {
    let Some(first) = sequences.first() else {
        return Vec::new();
    };
    let length = first.as_ref().len();

    let mut result = Vec::with_capacity(length);
    // (character, votes) in first-seen order
    let mut tally: Vec<(u8, usize)> = Vec::new();

    for i in 0..length {
        tally.clear();
        for seq in sequences {
            let Some(&c) = seq.as_ref().get(i) else {
                continue;
            };
            match tally.iter_mut().find(|(ch, _)| *ch == c) {
                Some((_, votes)) => *votes += 1,
                None => tally.push((c, 1)),
            }
        }
        result.push(majority(&tally));
    }

    result
}

/// Highest-voted character; earlier entries win ties
fn majority(tally: &[(u8, usize)]) -> u8 {
    let mut best = tally[0];
    for &(c, votes) in &tally[1..] {
        if votes > best.1 {
            best = (c, votes);
        }
    }
    best.0
}
