//! Per-connection cipher state and the stream transform.

/// Eight mask bytes and eight shift bytes derived from one key.
///
/// Written once when the host finishes writing the key, read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherState {
    mask: [u8; 8],
    shift: [u8; 8],
}

impl CipherState {
    pub const fn from_parts(mask: [u8; 8], shift: [u8; 8]) -> Self {
        Self { mask, shift }
    }

    pub const fn mask(&self) -> [u8; 8] {
        self.mask
    }

    pub const fn shift(&self) -> [u8; 8] {
        self.shift
    }

    /// Obfuscate `buf` in place. `addr` is the register offset of `buf[0]`.
    pub fn encode(&self, buf: &mut [u8], addr: usize) {
        for (i, byte) in buf.iter_mut().enumerate() {
            let k = (addr.wrapping_add(i)) % 8;
            *byte = byte.wrapping_sub(self.mask[k]) ^ self.shift[k];
        }
    }

    /// Inverse of [`encode`](Self::encode).
    pub fn decode(&self, buf: &mut [u8], addr: usize) {
        for (i, byte) in buf.iter_mut().enumerate() {
            let k = (addr.wrapping_add(i)) % 8;
            *byte = (*byte ^ self.shift[k]).wrapping_add(self.mask[k]);
        }
    }
}
