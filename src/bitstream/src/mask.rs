/// Pre-computed bit masks where `MASKS[k]` has the low `k` bits set.
pub const MASKS: [u64; 64] = {
    let mut masks = [0; 64];

    let mut k = 1;
    while k < masks.len() {
        masks[k] = (1u64 << k) - 1;
        k += 1;
    }

    masks
};

/// Gets a mask with the low `bits` bits set.
///
/// # Panics
///
/// Panics when `bits` is 64 or larger.
#[inline(always)]
pub const fn mask(bits: u32) -> u64 {
    MASKS[bits as usize]
}
