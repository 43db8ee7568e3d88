/// Weighted channel sum `src * alpha + dst * (255 - alpha)`.
///
/// Both weights sum to 255, so the result never exceeds `255 * 255 = 65025` and always fits a
/// `u16` lane.
#[inline(always)]
pub(crate) fn over_weighted_sum(src: u8, dst: u8, alpha: u8) -> u16 {
    let a = u16::from(alpha);
    u16::from(src) * a + u16::from(dst) * (255 - a)
}

/// Fast `over` for one channel: divides the weighted sum by 256 instead of 255.
#[inline(always)]
pub fn over_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    (over_weighted_sum(src, dst, alpha) >> 8) as u8
}

/// Exact truncating 255-divisor `over` for one channel.
///
/// [`over_channel`] is never above this value and never more than one below it.
pub fn over_channel_div255(src: u8, dst: u8, alpha: u8) -> u8 {
    (over_weighted_sum(src, dst, alpha) / 255) as u8
}

/// Largest per-channel gap between the fast blend and the exact 255-divisor blend of `src` over
/// `dst_before`, measured on the RGB channels of `dst_after`.
pub fn max_div255_deviation(dst_before: &[u8], src: &[u8], dst_after: &[u8]) -> u8 {
    dst_before
        .chunks_exact(4)
        .zip(src.chunks_exact(4))
        .zip(dst_after.chunks_exact(4))
        .flat_map(|((d, s), out)| {
            (0..3).map(move |c| over_channel_div255(s[c], d[c], s[3]).abs_diff(out[c]))
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
