//! Length units used by DrawingML.

pub const EMUS_PER_INCH: i64 = 914_400;

/// Convert inches to EMUs, rounding to the nearest EMU.
#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

/// Convert a point size to the hundredths-of-a-point used by `a:rPr/@sz`.
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_emu() {
        assert_eq!(inches_to_emu(1.0), EMUS_PER_INCH);
        assert_eq!(inches_to_emu(7.5), 6_858_000);
        assert_eq!(inches_to_emu(13.33), 12_188_952);
    }

    #[test]
    fn test_pt_to_centipoints() {
        assert_eq!(pt_to_centipoints(44.0), 4400);
        assert_eq!(pt_to_centipoints(20.0), 2000);
    }
}
