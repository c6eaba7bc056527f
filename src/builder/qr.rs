use crate::common::{
    iter::DataRegionIter,
    mask::MaskPattern,
    metadata::{
        format_info, ECLevel, Version, FORMAT_INFO_BIT_LEN, FORMAT_INFO_COORDS_QR_MAIN,
        FORMAT_INFO_COORDS_QR_SIDE, VERSION_INFO_BIT_LEN,
    },
};
use crate::Symbol;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Unset,
    Light,
    Dark,
}

impl Module {
    fn from_bit(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl std::ops::Not for Module {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Unset => Self::Unset,
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Symbol under construction. Function patterns and info areas are recorded
/// in the reserved map as they are drawn; data placement and masking only
/// ever touch cells outside it.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    reserved: Vec<bool>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self {
            grid: vec![Module::Unset; w * w],
            reserved: vec![false; w * w],
            w,
            ver,
            ecl,
            mask: None,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m == Module::Dark).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match (self.is_reserved(i, j), self.get(i, j)) {
                    (false, Module::Unset) => '.',
                    (true, Module::Unset) => 'm',
                    (true, Module::Dark) => 'f',
                    (true, Module::Light) => 'F',
                    (false, Module::Dark) => 'd',
                    (false, Module::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row out of bounds: {r}");
        debug_assert!(-w <= c && c < w, "Column out of bounds: {c}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        r as usize * self.w + c as usize
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }

    pub fn is_reserved(&self, r: i16, c: i16) -> bool {
        self.reserved[self.coord_to_index(r, c)]
    }

    fn reserve(&mut self, r: i16, c: i16) {
        let index = self.coord_to_index(r, c);
        self.reserved[index] = true;
    }

    fn set_function(&mut self, r: i16, c: i16, module: Module) {
        self.set(r, c, module);
        self.reserve(r, c);
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 pattern centred at (r, c) with its separator on the sides
    // facing the symbol
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                let module = match (i, j) {
                    (4 | -4, _) | (_, 4 | -4) => Module::Light,
                    (3 | -3, _) | (_, 3 | -3) => Module::Dark,
                    (2 | -2, _) | (_, 2 | -2) => Module::Light,
                    _ => Module::Dark,
                };
                self.set_function(r + i, c + j, module);
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let last = self.w as i16 - 9;
        self.draw_line(6, 8, 6, last);
        self.draw_line(8, 6, last, 6);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set_function(r1, j, Module::from_bit(j & 1 == 0));
            }
        } else {
            for i in r1..=r2 {
                self.set_function(i, c1, Module::from_bit(i & 1 == 0));
            }
        }
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use super::QR;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_timing_pattern_1() {
        let mut qr = QR::new(Version(1), ECLevel::L);
        qr.draw_timing_pattern();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........fFfFf........\n\
             .....................\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n"
        );
    }
}

// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                let module = match (i, j) {
                    (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Dark,
                    _ => Module::Light,
                };
                self.set_function(r + i, c + j, module);
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    /// Draws finders, separators, timing and alignment patterns, reserves the
    /// format and version info areas and sets the dark module
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
        self.reserve_format_area();
        self.reserve_version_area();
        self.draw_dark_module();
    }

    fn draw_dark_module(&mut self) {
        self.set_function(-8, 8, Module::Dark);
    }
}

// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn reserve_format_area(&mut self) {
        for &(r, c) in FORMAT_INFO_COORDS_QR_MAIN.iter().chain(FORMAT_INFO_COORDS_QR_SIDE.iter()) {
            self.reserve(r, c);
        }
    }

    fn reserve_version_area(&mut self) {
        if *self.ver < 7 {
            return;
        }
        for (r, c) in self.version_info_coords() {
            self.reserve(r, c);
            self.reserve(c, r);
        }
    }

    /// Stamps the 15 bit format word for the EC level and the mask onto both
    /// copies, most significant bit first
    pub fn draw_format_info(&mut self) {
        let mask = self.mask.unwrap_or_else(|| unreachable!("Format info drawn before masking"));
        let info = format_info(self.ecl, mask);
        self.draw_number(info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_QR_MAIN);
        self.draw_number(info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_QR_SIDE);
    }

    /// Stamps the 18 bit version word into the block above the bottom left
    /// finder and its transpose left of the top right finder
    pub fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let info = self.ver.info();
        // Least significant bit first
        let coords = self.version_info_coords().collect::<Vec<_>>();
        let coords_rev = coords.iter().rev().copied().collect::<Vec<_>>();
        let transposed = coords_rev.iter().map(|&(r, c)| (c, r)).collect::<Vec<_>>();
        self.draw_number(info, VERSION_INFO_BIT_LEN, &coords_rev);
        self.draw_number(info, VERSION_INFO_BIT_LEN, &transposed);
    }

    // Bit i of the version word sits at (i / 3, w - 11 + i % 3)
    fn version_info_coords(&self) -> impl Iterator<Item = (i16, i16)> {
        let w = self.w as i16;
        (0..VERSION_INFO_BIT_LEN as i16).map(move |i| (i / 3, w - 11 + i % 3))
    }

    fn draw_number(&mut self, number: u32, bit_len: usize, coords: &[(i16, i16)]) {
        debug_assert_eq!(coords.len(), bit_len, "Coordinate count doesn't match bit length");

        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            debug_assert!(self.is_reserved(r, c), "Info drawn outside reserved area: ({r}, {c})");
            self.set(r, c, Module::from_bit(number & mask != 0));
            mask >>= 1;
        }
    }
}

#[cfg(test)]
mod qr_information_tests {
    use super::QR;
    use crate::common::{
        mask::MaskPattern,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_reserve_format_info_qr() {
        let mut qr = QR::new(Version(1), ECLevel::L);
        qr.reserve_format_area();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             .....................\n\
             ........m............\n\
             mmmmmm.mm....mmmmmmmm\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n"
        );
    }

    #[test]
    fn test_format_info_m0() {
        let mut qr = QR::new(Version(1), ECLevel::M);
        qr.reserve_format_area();
        qr.mask = Some(MaskPattern::new(0));
        qr.draw_format_info();
        // 0x5412 = 101010000010010
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ........F............\n\
             ........f............\n\
             ........F............\n\
             ........F............\n\
             ........f............\n\
             ........F............\n\
             .....................\n\
             ........F............\n\
             fFfFfF.FF....FFFfFFfF\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........F............\n\
             ........F............\n\
             ........f............\n\
             ........F............\n\
             ........f............\n\
             ........F............\n\
             ........f............\n"
        );
    }

    #[test]
    fn test_version_info_1() {
        let mut qr = QR::new(Version(1), ECLevel::L);
        qr.reserve_version_area();
        qr.draw_version_info();
        assert!(qr.to_debug_str().chars().all(|c| c == '.' || c == '\n'));
    }

    #[test]
    fn test_version_info_7() {
        let mut qr = QR::new(Version(7), ECLevel::L);
        qr.reserve_version_area();
        qr.draw_version_info();
        let res = qr.to_debug_str();
        let rows = res.trim().lines().collect::<Vec<_>>();
        let top_right = rows[..6].iter().map(|r| &r[34..37]).collect::<Vec<_>>();
        assert_eq!(top_right, vec!["FFf", "FfF", "FfF", "Fff", "fff", "FFF"]);
        let bottom_left = rows[34..37].iter().map(|r| &r[..6]).collect::<Vec<_>>();
        assert_eq!(bottom_left, vec!["FFFFfF", "FffffF", "fFFffF"]);
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Places the codewords in zig-zag order over the data region. The cells
    /// left once the codewords run out are the remainder bits and stay light.
    pub fn draw_payload(&mut self, codewords: &[u8]) {
        let mut coords = DataRegionIter::new(self.ver);
        let bits = codewords.iter().flat_map(|&b| (0..8).rev().map(move |i| (b >> i) & 1 == 1));
        for bit in bits {
            let (r, c) = coords.next().unwrap_or_else(|| {
                unreachable!("Codewords exceed data region of version {}", self.ver)
            });
            self.draw_data_module(r, c, Module::from_bit(bit));
        }

        let mut remainder = 0;
        for (r, c) in coords {
            self.draw_data_module(r, c, Module::Light);
            remainder += 1;
        }
        assert_eq!(
            remainder,
            self.ver.remainder_bits(),
            "Unexpected number of remainder bits for version {}",
            self.ver
        );
    }

    fn draw_data_module(&mut self, r: i16, c: i16, module: Module) {
        assert!(!self.is_reserved(r, c), "Data placed on reserved module: ({r}, {c})");
        assert_eq!(self.get(r, c), Module::Unset, "Module drawn twice: ({r}, {c})");
        self.set(r, c, module);
    }

    /// Flips every unreserved module selected by the mask and stamps the
    /// format info that goes with it
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_function();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if !self.is_reserved(r, c) && mask_fn(r, c) {
                    self.set(r, c, !self.get(r, c));
                }
            }
        }
        self.draw_format_info();
    }

    pub fn into_symbol(self, penalty: u32) -> Symbol {
        let mask = self.mask().unwrap_or_else(|| unreachable!("Symbol assembled before masking"));
        let modules = self
            .grid
            .iter()
            .enumerate()
            .map(|(i, &m)| match m {
                Module::Dark => true,
                Module::Light => false,
                Module::Unset => panic!("Unset module found at: {} {}", i / self.w, i % self.w),
            })
            .collect();
        Symbol::new(self.w, self.ver, self.ecl, Some(mask), penalty, modules)
    }
}
