use serde::Serialize;

/// Offset of species 1 within the first word of a per-species bitset.
///
/// Bits 0..=15 of the first word are never used; species `n` lives at bit
/// `n + 15`. The origin of the offset is not documented in the data files, so
/// it is reproduced as observed.
const SPECIES_BIT_OFFSET: u32 = 15;

/// Two 64-bit words with one bit per species (visited, contact, ally, enemy).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SpeciesBits([u64; 2]);

impl SpeciesBits {
    pub fn from_words(words: [u64; 2]) -> Self {
        Self(words)
    }

    pub fn words(&self) -> [u64; 2] {
        self.0
    }

    fn mask(species: u32) -> Option<u64> {
        if species == 0 {
            return None;
        }
        1u64.checked_shl(species + SPECIES_BIT_OFFSET)
    }

    /// Whether 1-based species number `species` is flagged.
    ///
    /// Numbers that would land past the first word are never set.
    pub fn is_set(&self, species: u32) -> bool {
        Self::mask(species).is_some_and(|mask| self.0[0] & mask != 0)
    }

    /// Flag `species`; returns false if the number has no bit in the first word.
    pub fn set(&mut self, species: u32) -> bool {
        match Self::mask(species) {
            Some(mask) => {
                self.0[0] |= mask;
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0 == [0, 0]
    }

    /// Every flagged species number in `1..=limit`, ascending.
    pub fn iter(self, limit: u32) -> impl Iterator<Item = u32> {
        (1..=limit).filter(move |&species| self.is_set(species))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_one_is_bit_sixteen() {
        let bits = SpeciesBits::from_words([0x10000, 0]);
        assert!(bits.is_set(1));
        assert!(!bits.is_set(2));
        assert!(!bits.is_set(0));
    }

    #[test]
    fn species_nine_is_bit_twenty_four() {
        let bits = SpeciesBits::from_words([0x100_0000, 0]);
        assert!(bits.is_set(9));
        assert!(!bits.is_set(8));
        assert!(!bits.is_set(10));
    }

    #[test]
    fn species_eighteen_matches_documented_pattern() {
        let bits = SpeciesBits::from_words([8_589_934_592, 0]);
        assert!(bits.is_set(18));
    }

    #[test]
    fn low_bits_and_second_word_are_ignored() {
        let bits = SpeciesBits::from_words([0xFFFF, u64::MAX]);
        assert!((1..=64).all(|species| !bits.is_set(species)));
    }

    #[test]
    fn numbers_past_the_first_word_never_set() {
        let mut bits = SpeciesBits::from_words([u64::MAX, 0]);
        assert!(bits.is_set(48), "bit 63 is the last usable one");
        assert!(!bits.is_set(49));
        assert!(!bits.set(49));
    }

    #[test]
    fn set_and_iter_agree() {
        let mut bits = SpeciesBits::default();
        for species in [1, 4, 9] {
            assert!(bits.set(species));
        }
        assert_eq!(bits.iter(10).collect::<Vec<_>>(), vec![1, 4, 9]);
        assert_eq!(bits.iter(3).collect::<Vec<_>>(), vec![1]);
        assert!(!bits.is_empty());
    }
}
