//! Site capability bitset.
//!
//! A site (a base, a colony, a lab complex) advertises the functions it
//! provides as a 64-bit mask. Topics name the functions they need; the
//! catalog assigns each distinct function name its own bit at build time.

bitflags::bitflags! {
    /// Functions provided by a site, or required by a topic.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u64 {
        // Bits are assigned by name when the catalog is built.
        const _ = !0;
    }
}

/// Maximum number of distinct capability names a catalog can hold.
pub const MAX_CAPABILITIES: usize = 64;

impl Capabilities {
    /// The capability occupying bit `index`. Indices past 63 yield the empty set.
    pub fn bit(index: u32) -> Self {
        if index as usize >= MAX_CAPABILITIES {
            return Self::empty();
        }
        Self::from_bits_retain(1u64 << index)
    }

    /// Whether `self` provides every function in `required`.
    pub fn covers(self, required: Capabilities) -> bool {
        self.contains(required)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_requirement_is_always_covered() {
        assert!(Capabilities::empty().covers(Capabilities::empty()));
        assert!(Capabilities::bit(3).covers(Capabilities::empty()));
    }

    #[test]
    fn covers_requires_every_bit() {
        let site = Capabilities::bit(0) | Capabilities::bit(2);
        assert!(site.covers(Capabilities::bit(0)));
        assert!(site.covers(Capabilities::bit(0) | Capabilities::bit(2)));
        assert!(!site.covers(Capabilities::bit(1)));
        assert!(!site.covers(Capabilities::bit(0) | Capabilities::bit(1)));
    }

    #[test]
    fn out_of_range_bit_is_empty() {
        assert_eq!(Capabilities::bit(64), Capabilities::empty());
        assert_eq!(Capabilities::bit(63).bits(), 1u64 << 63);
    }

    #[test]
    fn default_is_empty() {
        assert!(Capabilities::default().is_empty());
    }
}
