//! Piconero amounts and their decimal XMR rendering.
//!
//! Rendering is integer division and remainder only; binary floating
//! point cannot represent piconero exactly and is never used.

/// Piconero per XMR (10^12).
pub const PICONERO_PER_XMR: u64 = 1_000_000_000_000;

/// Render a piconero amount as a decimal XMR string with exactly 12
/// fractional digits.
pub fn format_xmr(piconero: u64) -> String {
    let whole = piconero / PICONERO_PER_XMR;
    let frac = piconero % PICONERO_PER_XMR;
    format!("{whole}.{frac:012}")
}

/// Ceiling on plausible output amounts, in whole XMR.
///
/// Outputs that pass the view tag by coincidence decrypt to a uniform
/// 64-bit value, and almost all of those land far above any real payment;
/// dropping everything over the ceiling removes ≈90% of the survivors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeAmountCeiling(u64);

impl SafeAmountCeiling {
    pub const DEFAULT_XMR: u64 = 9999;

    pub fn new(xmr: u64) -> Self {
        SafeAmountCeiling(xmr)
    }

    /// True when the amount is at or below the ceiling. Saturates, so an
    /// enormous ceiling simply admits everything.
    pub fn allows(&self, piconero: u64) -> bool {
        piconero <= self.0.saturating_mul(PICONERO_PER_XMR)
    }
}

impl Default for SafeAmountCeiling {
    fn default() -> Self {
        SafeAmountCeiling(Self::DEFAULT_XMR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_twelve_fractional_digits() {
        assert_eq!(format_xmr(0), "0.000000000000");
        assert_eq!(format_xmr(1), "0.000000000001");
        assert_eq!(format_xmr(500_000_000), "0.000500000000");
        assert_eq!(format_xmr(100_000_000_000_000), "100.000000000000");
        assert_eq!(format_xmr(7_000_000_000), "0.007000000000");
        assert_eq!(format_xmr(u64::MAX), "18446744.073709551615");
    }

    #[test]
    fn ceiling_boundary() {
        let ceiling = SafeAmountCeiling::default();
        assert!(ceiling.allows(9_999 * PICONERO_PER_XMR));
        assert!(!ceiling.allows(9_999 * PICONERO_PER_XMR + 1));
        assert!(!ceiling.allows(20_000 * PICONERO_PER_XMR));
    }

    #[test]
    fn huge_ceiling_admits_everything() {
        let ceiling = SafeAmountCeiling::new(u64::MAX);
        assert!(ceiling.allows(u64::MAX));
    }
}
