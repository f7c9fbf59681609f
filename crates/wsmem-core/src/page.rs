//! Working-set page descriptor
//!
//! One machine word per resident page, laid out exactly like the OS
//! `PSAPI_WORKING_SET_BLOCK`. From the least-significant bit upward:
//!
//! ```text
//!  0..5   Protection
//!  5..8   ShareCount
//!  8      Shared
//!  9..12  Reserved
//! 12..    VirtualPage (20 bits on 32-bit builds, 52 on 64-bit)
//! ```
//!
//! Fields are decoded with explicit mask/shift arithmetic. The low 32 bits
//! have the same layout on every target.

use core::fmt;

const PROTECTION_SHIFT: u32 = 0;
const PROTECTION_MASK: usize = 0x1F;

const SHARE_COUNT_SHIFT: u32 = 5;
const SHARE_COUNT_MASK: usize = 0x7;

const SHARED_SHIFT: u32 = 8;
const SHARED_MASK: usize = 0x1;

const RESERVED_SHIFT: u32 = 9;
const RESERVED_MASK: usize = 0x7;

const VIRTUAL_PAGE_SHIFT: u32 = 12;

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        /// Width of the VirtualPage field
        pub const VIRTUAL_PAGE_BITS: u32 = 52;
    } else {
        /// Width of the VirtualPage field
        pub const VIRTUAL_PAGE_BITS: u32 = 20;
    }
}

const VIRTUAL_PAGE_MASK: usize = usize::MAX >> (usize::BITS - VIRTUAL_PAGE_BITS);

/// Descriptor of one resident page
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PageDescriptor(usize);

impl PageDescriptor {
    /// Wrap a raw word as written by the OS
    #[inline]
    pub const fn from_raw(flags: usize) -> Self {
        Self(flags)
    }

    /// Build a descriptor from its fields
    ///
    /// Out-of-range values are truncated to the field width.
    pub const fn new(protection: u8, share_count: u8, shared: bool, virtual_page: usize) -> Self {
        let mut flags = ((protection as usize) & PROTECTION_MASK) << PROTECTION_SHIFT;
        flags |= ((share_count as usize) & SHARE_COUNT_MASK) << SHARE_COUNT_SHIFT;
        if shared {
            flags |= SHARED_MASK << SHARED_SHIFT;
        }
        flags |= (virtual_page & VIRTUAL_PAGE_MASK) << VIRTUAL_PAGE_SHIFT;
        Self(flags)
    }

    /// The whole word
    #[inline]
    pub const fn raw(&self) -> usize {
        self.0
    }

    /// Page protection attributes (5 bits)
    #[inline]
    pub const fn protection(&self) -> u8 {
        ((self.0 >> PROTECTION_SHIFT) & PROTECTION_MASK) as u8
    }

    /// Number of processes sharing the page, saturating at 7
    #[inline]
    pub const fn share_count(&self) -> u8 {
        ((self.0 >> SHARE_COUNT_SHIFT) & SHARE_COUNT_MASK) as u8
    }

    /// Whether the page is in more than one working set
    #[inline]
    pub const fn is_shared(&self) -> bool {
        (self.0 >> SHARED_SHIFT) & SHARED_MASK != 0
    }

    #[inline]
    pub const fn reserved(&self) -> u8 {
        ((self.0 >> RESERVED_SHIFT) & RESERVED_MASK) as u8
    }

    /// Virtual page number (address >> 12)
    #[inline]
    pub const fn virtual_page(&self) -> usize {
        (self.0 >> VIRTUAL_PAGE_SHIFT) & VIRTUAL_PAGE_MASK
    }
}

impl From<usize> for PageDescriptor {
    fn from(flags: usize) -> Self {
        Self::from_raw(flags)
    }
}

impl fmt::Debug for PageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageDescriptor")
            .field("protection", &self.protection())
            .field("share_count", &self.share_count())
            .field("shared", &self.is_shared())
            .field("virtual_page", &format_args!("{:#x}", self.virtual_page()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_word_sized() {
        assert_eq!(core::mem::size_of::<PageDescriptor>(), core::mem::size_of::<usize>());
    }

    #[test]
    fn test_decode_raw_word() {
        // protection=4 (read/write), share_count=2, shared, reserved=5, vpn=0xABCDE
        let raw = 0x4 | (0x2 << 5) | (1 << 8) | (0x5 << 9) | (0xABCDE << 12);
        let page = PageDescriptor::from_raw(raw);

        assert_eq!(page.protection(), 4);
        assert_eq!(page.share_count(), 2);
        assert!(page.is_shared());
        assert_eq!(page.reserved(), 5);
        assert_eq!(page.virtual_page(), 0xABCDE);
        assert_eq!(page.raw(), raw);
    }

    #[test]
    fn test_shared_bit_only() {
        let page = PageDescriptor::from_raw(0x100);
        assert!(page.is_shared());
        assert_eq!(page.protection(), 0);
        assert_eq!(page.share_count(), 0);
        assert_eq!(page.virtual_page(), 0);

        let page = PageDescriptor::from_raw(0xFF);
        assert!(!page.is_shared());
        assert_eq!(page.protection(), 0x1F);
        assert_eq!(page.share_count(), 0x7);
    }

    #[test]
    fn test_low_32_bits_layout() {
        // Top of the 20-bit VirtualPage field on a 32-bit layout
        let page = PageDescriptor::from_raw(0xFFFF_F000);
        assert_eq!(page.virtual_page(), 0xF_FFFF);
        assert_eq!(page.reserved(), 0);
        assert!(!page.is_shared());
    }

    #[test]
    fn test_new_matches_fields() {
        let page = PageDescriptor::new(1, 3, true, 0x1234);
        assert_eq!(page.protection(), 1);
        assert_eq!(page.share_count(), 3);
        assert!(page.is_shared());
        assert_eq!(page.reserved(), 0);
        assert_eq!(page.virtual_page(), 0x1234);
        assert_eq!(page.raw(), 1 | (3 << 5) | (1 << 8) | (0x1234 << 12));
    }

    #[test]
    fn test_new_truncates_fields() {
        let page = PageDescriptor::new(0xFF, 0xFF, false, 0);
        assert_eq!(page.protection(), 0x1F);
        assert_eq!(page.share_count(), 0x7);
        assert!(!page.is_shared());
    }
}
