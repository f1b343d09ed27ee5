// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Label packing into 16-bit words.
//!
//! Labels fill each word from bit 0 upward, `id_bits` bits per label, at offsets
//! `0, id_bits, 2 * id_bits, ...` strictly below `16 - id_bits`. That is one slot fewer
//! than tight packing whenever the last slot would touch bit 15, so the top bits of
//! every word stay zero. Existing archives use this layout; both directions must agree.

use crate::config::WORD_BITS;
use crate::types::Label;

/// Labels stored in one word for a given label width.
///
/// `0` for `id_bits == 0` (single-entry codebook, no stream at all) and `1` for
/// `id_bits == 16`, where the slot loop would otherwise never run.
pub fn labels_per_word(id_bits: u16) -> usize {
    let bits = id_bits as u32;
    match bits {
        0 => 0,
        b if b >= WORD_BITS => 1,
        b => ((WORD_BITS - b) + b - 1) as usize / b as usize,
    }
}

/// Words needed to hold `count` labels.
pub fn word_count(count: usize, id_bits: u16) -> usize {
    match labels_per_word(id_bits) {
        0 => 0,
        per_word => count.div_ceil(per_word),
    }
}

/// Packs labels into words. The last word is emitted whole with unused slots zero.
///
/// Labels must already fit in `id_bits` bits.
pub fn pack_labels(labels: &[Label], id_bits: u16) -> Vec<u16> {
    let per_word = labels_per_word(id_bits);
    if per_word == 0 {
        return Vec::new();
    }
    let bits = id_bits as usize;
    labels
        .chunks(per_word)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u32, |word, (slot, &label)| word | (label << (slot * bits)))
                as u16
        })
        .collect()
}

/// Extracts exactly `count` labels from `words`, discarding trailing slots.
///
/// Returns fewer than `count` labels only if `words` is too short; callers check the
/// word count first.
pub fn unpack_labels(words: &[u16], id_bits: u16, count: usize) -> Vec<Label> {
    let per_word = labels_per_word(id_bits);
    if per_word == 0 {
        return vec![0; count];
    }
    let bits = id_bits as usize;
    let mask = (1u32 << id_bits) - 1;

    let mut labels = Vec::with_capacity(count);
    'words: for &word in words {
        for slot in 0..per_word {
            if labels.len() == count {
                break 'words;
            }
            labels.push((word as u32 >> (slot * bits)) & mask);
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_counts() {
        // offsets j = 0, b, 2b, ... while j < 16 - b
        let expected = [
            (0u16, 0usize),
            (1, 15),
            (2, 7),
            (3, 5),
            (4, 3),
            (5, 3),
            (6, 2),
            (7, 2),
            (8, 1),
            (12, 1),
            (15, 1),
            (16, 1),
        ];
        for (bits, slots) in expected {
            assert_eq!(labels_per_word(bits), slots, "id_bits = {}", bits);
        }
    }

    #[test]
    fn test_sixteen_entry_codebook_packs_three_per_word() {
        let labels: Vec<Label> = vec![1, 2, 3, 4, 5, 6, 7];
        let words = pack_labels(&labels, 4);
        assert_eq!(words.len(), 3);
        assert_eq!(word_count(labels.len(), 4), 3);
        assert_eq!(words[0], 0x0321);
        assert_eq!(words[1], 0x0654);
        // final word carries one label, the rest is zero
        assert_eq!(words[2], 0x0007);
    }

    #[test]
    fn test_top_bits_stay_clear() {
        let labels = vec![0xF; 30];
        for word in pack_labels(&labels, 4) {
            assert_eq!(word & 0xF000, 0);
        }
    }

    #[test]
    fn test_unpack_discards_trailing_slots() {
        let words = [0x0321u16, 0x0004];
        assert_eq!(unpack_labels(&words, 4, 4), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_full_width_labels() {
        let labels: Vec<Label> = vec![0, 65535, 1234];
        let words = pack_labels(&labels, 16);
        assert_eq!(words, vec![0, 65535, 1234]);
        assert_eq!(unpack_labels(&words, 16, 3), labels);
    }

    #[test]
    fn test_zero_width_has_no_stream() {
        assert!(pack_labels(&[0, 0, 0], 0).is_empty());
        assert_eq!(word_count(3, 0), 0);
        assert_eq!(unpack_labels(&[], 0, 3), vec![0, 0, 0]);
    }
}
