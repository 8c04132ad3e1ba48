//! Answer and substitution tables, and key derivation.

use crate::error::CipherError;
use crate::state::CipherState;

/// Length of the key written into the extension key registers.
pub const KEY_LEN: usize = 16;

/// Number of answer rows tried during derivation.
pub const ANSWER_ROWS: usize = 7;

/// Number of 256-entry substitution boxes. Box 0 scrambles the seed, boxes
/// `idx + 1` and `idx + 2` build the state for answer row `idx`, so row 6
/// reads box 8.
pub const SBOX_COUNT: usize = 10;

/// Size of a flat table blob: the answer rows followed by the boxes.
pub const RAW_LEN: usize = ANSWER_ROWS * ANSWER_LEN + SBOX_COUNT * 256;

const ANSWER_LEN: usize = 6;
const SEED_LEN: usize = 10;

/// Built-in table set: substitution boxes are permutations of `0..=255`
/// shuffled from a fixed seed. It has the layout of the console's table set
/// but not its contents; hosts that talk to a real console load that set with
/// [`CipherTables::from_bytes`].
static BUILTIN: CipherTables = CipherTables::generate(0x6D6F_7465);

/// Answer rows plus substitution boxes.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherTables {
    answers: [[u8; ANSWER_LEN]; ANSWER_ROWS],
    sboxes: [[u8; 256]; SBOX_COUNT],
}

impl core::fmt::Debug for CipherTables {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CipherTables")
            .field("answers", &self.answers)
            .field("sboxes", &format_args!("[[u8; 256]; {SBOX_COUNT}]"))
            .finish()
    }
}

impl Default for CipherTables {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

const fn xorshift(mut x: u32) -> u32 {
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    x
}

#[inline]
fn ror8(a: u8, n: u8) -> u8 {
    a.rotate_right(u32::from(n % 8))
}

impl CipherTables {
    /// The table set shipped with the crate.
    pub fn builtin() -> &'static CipherTables {
        &BUILTIN
    }

    /// Use a host-supplied table set.
    pub const fn from_raw(
        answers: [[u8; ANSWER_LEN]; ANSWER_ROWS],
        sboxes: [[u8; 256]; SBOX_COUNT],
    ) -> Self {
        Self { answers, sboxes }
    }

    /// Load a table set from a flat blob: 7×6 answer bytes followed by
    /// 10×256 substitution bytes.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, CipherError> {
        if raw.len() != RAW_LEN {
            return Err(CipherError::TableLength {
                expected: RAW_LEN,
                actual: raw.len(),
            });
        }
        let mut answers = [[0u8; ANSWER_LEN]; ANSWER_ROWS];
        let (answer_bytes, sbox_bytes) = raw.split_at(ANSWER_ROWS * ANSWER_LEN);
        for (row, chunk) in answers.iter_mut().zip(answer_bytes.chunks_exact(ANSWER_LEN)) {
            row.copy_from_slice(chunk);
        }
        let mut sboxes = [[0u8; 256]; SBOX_COUNT];
        for (sbox, chunk) in sboxes.iter_mut().zip(sbox_bytes.chunks_exact(256)) {
            sbox.copy_from_slice(chunk);
        }
        Ok(Self { answers, sboxes })
    }

    /// Deterministically generate a table set from `seed`.
    pub const fn generate(seed: u32) -> Self {
        let mut state = if seed == 0 { 0x9E37_79B9 } else { seed };
        let mut sboxes = [[0u8; 256]; SBOX_COUNT];
        let mut s = 0;
        while s < SBOX_COUNT {
            let mut i = 0;
            while i < 256 {
                sboxes[s][i] = i as u8;
                i += 1;
            }
            let mut j = 255;
            while j > 0 {
                state = xorshift(state);
                let k = (state % (j as u32 + 1)) as usize;
                let tmp = sboxes[s][j];
                sboxes[s][j] = sboxes[s][k];
                sboxes[s][k] = tmp;
                j -= 1;
            }
            s += 1;
        }

        let mut answers = [[0u8; ANSWER_LEN]; ANSWER_ROWS];
        let mut r = 0;
        while r < ANSWER_ROWS {
            let mut c = 0;
            while c < ANSWER_LEN {
                state = xorshift(state);
                answers[r][c] = (state >> 24) as u8;
                c += 1;
            }
            r += 1;
        }

        Self { answers, sboxes }
    }

    /// Check value produced by answer row `idx` for a seed.
    fn check_value(&self, seed: &[u8; SEED_LEN], idx: usize) -> [u8; ANSWER_LEN] {
        let ans = &self.answers[idx];
        let t: [u8; SEED_LEN] = core::array::from_fn(|i| self.sboxes[0][usize::from(seed[i])]);
        [
            ror8(ans[0] ^ t[5], t[2]).wrapping_sub(t[9]) ^ t[4],
            ror8(ans[1] ^ t[1], t[0]).wrapping_sub(t[5]) ^ t[7],
            ror8(ans[2] ^ t[6], t[8]).wrapping_sub(t[2]) ^ t[0],
            ror8(ans[3] ^ t[4], t[7]).wrapping_sub(t[3]) ^ t[2],
            ror8(ans[4] ^ t[1], t[6]).wrapping_sub(t[3]) ^ t[4],
            ror8(ans[5] ^ t[7], t[8]).wrapping_sub(t[5]) ^ t[9],
        ]
    }

    fn build_state(&self, seed: &[u8; SEED_LEN], check: &[u8; ANSWER_LEN], idx: usize) -> CipherState {
        let ans = &self.answers[idx];
        let hi = &self.sboxes[idx + 1];
        let lo = &self.sboxes[idx + 2];
        let h = |b: u8| hi[usize::from(b)];
        let l = |b: u8| lo[usize::from(b)];

        let mask = [
            h(check[4]) ^ l(seed[3]),
            h(check[2]) ^ l(seed[5]),
            h(check[5]) ^ l(seed[7]),
            h(check[0]) ^ l(seed[2]),
            h(check[1]) ^ l(seed[4]),
            h(check[3]) ^ l(seed[9]),
            h(seed[0]) ^ l(seed[6]),
            h(seed[1]) ^ l(seed[8]),
        ];
        let shift = [
            h(ans[0]) ^ l(check[5]),
            h(ans[1]) ^ l(seed[0]),
            h(ans[2]) ^ l(check[3]),
            h(ans[3]) ^ l(seed[8]),
            h(ans[4]) ^ l(check[1]),
            h(ans[5]) ^ l(seed[6]),
            h(check[0]) ^ l(seed[4]),
            h(seed[2]) ^ l(check[2]),
        ];
        CipherState::from_parts(mask, shift)
    }

    /// Derive the cipher state for `key`, or `None` if no answer row matches.
    pub fn derive(&self, key: &[u8; KEY_LEN]) -> Option<CipherState> {
        let seed: [u8; SEED_LEN] = core::array::from_fn(|i| key[SEED_LEN - 1 - i]);
        let check: [u8; ANSWER_LEN] = core::array::from_fn(|i| key[KEY_LEN - 1 - i]);

        (0..ANSWER_ROWS)
            .find(|&idx| self.check_value(&seed, idx) == check)
            .map(|idx| self.build_state(&seed, &check, idx))
    }

    /// Build a derivable key from a 10-byte seed and an answer row.
    ///
    /// This is what a host does before writing the key registers.
    pub fn key_material(&self, seed: [u8; SEED_LEN], idx: usize) -> [u8; KEY_LEN] {
        let check = self.check_value(&seed, idx);
        let mut key = [0u8; KEY_LEN];
        for i in 0..SEED_LEN {
            key[i] = seed[SEED_LEN - 1 - i];
        }
        for i in 0..ANSWER_LEN {
            key[SEED_LEN + i] = check[ANSWER_LEN - 1 - i];
        }
        key
    }
}
