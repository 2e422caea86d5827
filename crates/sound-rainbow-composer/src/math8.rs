/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn scale8(value: u8, scale: u8) -> u8 {
    ((u16::from(value) * u16::from(scale)) >> 8) as u8
}

/// Scale an 8-bit value, never dimming a lit channel all the way to zero
///
/// Result is zero only when `value` or `scale` is zero.
#[inline]
pub fn scale8_video(value: u8, scale: u8) -> u8 {
    let lit = u8::from(value != 0 && scale != 0);
    scale8(value, scale) + lit
}

/// Map `value` from `[0, in_span]` onto `[out_min, out_min + out_span]`
///
/// `value` above `in_span` saturates at the top of the output range.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn map_span(value: u16, in_span: u16, out_min: u8, out_span: u8) -> u8 {
    if in_span == 0 {
        return out_min.saturating_add(out_span);
    }
    let value = u32::from(value.min(in_span));
    let offset = value * u32::from(out_span) / u32::from(in_span);
    out_min.saturating_add(offset as u8)
}
