use std::{fmt::Display, ops::Deref, str::FromStr};

use log::trace;

use super::error::{QRError, QRResult};
use crate::builder::{Module, QR};

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    /// Unchecked; `QRBuilder::build` rejects patterns above 7 with
    /// `InvalidMaskingPattern`
    pub fn new(pattern: u8) -> Self {
        Self(pattern)
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<u8> for MaskPattern {
    type Error = QRError;
    fn try_from(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskingPattern),
        }
    }
}

impl FromStr for MaskPattern {
    type Err = QRError;
    fn from_str(s: &str) -> QRResult<Self> {
        s.trim().parse::<u8>().map_err(|_| QRError::InvalidMaskingPattern)?.try_into()
    }
}

impl Display for MaskPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (((r + c) as i32 & 1) + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate over (row, col) telling whether a data module gets flipped
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid masking pattern: {}", self.0),
        }
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Applies every mask to its own clone of the unmasked grid, keeps the one
/// with the lowest penalty and returns it alongside that penalty. Ties go to
/// the lowest mask id.
pub fn apply_best_mask(qr: &mut QR) -> (MaskPattern, u32) {
    let (best_mask, best_pen, best_qr) = evaluate_masks(qr);
    *qr = best_qr;
    (best_mask, best_pen)
}

fn evaluate_mask(qr: &QR, mask: MaskPattern) -> (MaskPattern, u32, QR) {
    let mut qr = qr.clone();
    qr.apply_mask(mask);
    let pen = compute_total_penalty(&qr);
    trace!("Mask {mask}: penalty {pen}");
    (mask, pen, qr)
}

#[cfg(not(feature = "parallel"))]
fn evaluate_masks(qr: &QR) -> (MaskPattern, u32, QR) {
    MaskPattern::all()
        .map(|m| evaluate_mask(qr, m))
        .min_by_key(|(m, pen, _)| (*pen, *m))
        .unwrap_or_else(|| unreachable!("There are always 8 mask patterns"))
}

#[cfg(feature = "parallel")]
fn evaluate_masks(qr: &QR) -> (MaskPattern, u32, QR) {
    use rayon::prelude::*;

    (0..8u8)
        .into_par_iter()
        .map(|m| evaluate_mask(qr, MaskPattern(m)))
        .min_by_key(|(m, pen, _)| (*pen, *m))
        .unwrap_or_else(|| unreachable!("There are always 8 mask patterns"))
}

// Penalty
//------------------------------------------------------------------------------

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let rows = (0..w).map(|r| (0..w).map(|c| qr.get(r, c) == Module::Dark).collect::<Vec<_>>());
    let cols = (0..w).map(|c| (0..w).map(|r| qr.get(r, c) == Module::Dark).collect::<Vec<_>>());
    let lines = rows.chain(cols).collect::<Vec<_>>();

    let run_pen = lines.iter().map(|l| compute_run_penalty(l)).sum::<u32>();
    let blk_pen = compute_block_penalty(&lines[..w as usize]);
    let fp_pen = lines.iter().map(|l| compute_finder_pattern_penalty(l)).sum::<u32>();
    let bal_pen = compute_balance_penalty(qr.count_dark_modules(), qr.width() * qr.width());
    run_pen + blk_pen + fp_pen + bal_pen
}

// Rule 1: each run of 5 or more same coloured modules scores 3 + (len - 5)
fn compute_run_penalty(line: &[bool]) -> u32 {
    let mut pen = 0;
    let mut run = 0;
    let mut last = None;
    for &m in line {
        if last == Some(m) {
            run += 1;
            continue;
        }
        if run >= 5 {
            pen += run - 2;
        }
        last = Some(m);
        run = 1;
    }
    if run >= 5 {
        pen += run - 2;
    }
    pen
}

// Rule 2: each 2x2 block of one colour scores 3, overlaps included
fn compute_block_penalty(rows: &[Vec<bool>]) -> u32 {
    rows.windows(2)
        .map(|pair| {
            let (top, bot) = (&pair[0], &pair[1]);
            (0..top.len() - 1)
                .filter(|&c| top[c] == top[c + 1] && top[c] == bot[c] && top[c] == bot[c + 1])
                .count() as u32
                * 3
        })
        .sum()
}

// Rule 3: each 1:1:3:1:1 finder-like pattern flanked by 4 light modules
// on one side scores 40
fn compute_finder_pattern_penalty(line: &[bool]) -> u32 {
    static PATTERN: [bool; 11] =
        [true, false, true, true, true, false, true, false, false, false, false];

    line.windows(11)
        .filter(|win| win.iter().eq(PATTERN.iter()) || win.iter().eq(PATTERN.iter().rev()))
        .count() as u32
        * 40
}

// Rule 4: 10 points per full 5% step the dark ratio strays from 50%
fn compute_balance_penalty(dark_count: usize, total: usize) -> u32 {
    let step = dark_count * 20 / total;
    step.abs_diff(10) as u32 * 10
}
