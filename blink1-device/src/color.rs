//! Gamma correction for LED color channels

use blink1_transport::Rgb;

/// Map a linear intensity to the value the LED needs to look that bright
///
/// Piecewise over eight bands of 32 steps: band `k` covers `[32k, 32k + 31]`
/// and ramps from `2^k - 1` by `2^k / 32` per step. Monotonic, `0 -> 0` and
/// `255 -> 255`.
pub const fn degamma(n: u8) -> u8 {
    let n = n as u32;
    let scale = 1u32 << (n / 32);
    let out = (scale - 1) + (scale * ((n % 32) + 1) + 15) / 32;
    // band 7 tops out at 127 + 128
    if out > 255 {
        255
    } else {
        out as u8
    }
}

/// Precomputed `degamma` for every input
pub const GAMMA_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = degamma(i as u8);
        i += 1;
    }
    table
};

/// Channels to put on the wire
///
/// `already_corrected` is the caller asserting the values are gamma-correct;
/// otherwise each channel goes through the table.
pub fn wire_color(color: Rgb, already_corrected: bool) -> Rgb {
    if already_corrected {
        color
    } else {
        Rgb::new(
            GAMMA_TABLE[usize::from(color.r)],
            GAMMA_TABLE[usize::from(color.g)],
            GAMMA_TABLE[usize::from(color.b)],
        )
    }
}
