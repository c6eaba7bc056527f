use crate::common::{
    mask::MaskPattern,
    metadata::{ECLevel, Version},
};

// Symbol
//------------------------------------------------------------------------------

/// Finished QR symbol: a square grid of modules in row-major order where
/// `true` is dark. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    size: usize,
    version: Version,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
    penalty: u32,
    modules: Vec<bool>,
}

impl Symbol {
    pub(crate) fn new(
        size: usize,
        version: Version,
        ec_level: ECLevel,
        mask: Option<MaskPattern>,
        penalty: u32,
        modules: Vec<bool>,
    ) -> Self {
        debug_assert_eq!(modules.len(), size * size, "Module count doesn't match size {size}");
        Self { size, version, ec_level, mask, penalty, modules }
    }

    /// Blank symbol returned for empty content
    pub(crate) fn empty(ec_level: ECLevel) -> Self {
        Self::new(0, Version::MIN, ec_level, None, 0, Vec::new())
    }

    /// Modules per side, quiet zone excluded
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    /// Penalty score of the applied mask
    pub fn penalty(&self) -> u32 {
        self.penalty
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        assert!(r < self.size && c < self.size, "Module out of bounds: ({r}, {c})");
        self.modules[r * self.size + c]
    }

    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks(self.size.max(1))
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    /// Renders the symbol with a 4 module quiet zone for a terminal, each
    /// module drawn as a `module_sz` x `module_sz` block of characters. Light
    /// modules are full blocks so the symbol reads on a dark background.
    pub fn to_str(&self, module_sz: usize) -> String {
        if self.is_empty() {
            return String::new();
        }

        let qz_sz = 4 * module_sz;
        let qr_sz = self.size * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let r = (i - qz_sz) / module_sz;
                let c = (j - qz_sz) / module_sz;
                canvas.push(if self.get(r, c) { ' ' } else { '█' });
            }
            canvas.push('\n');
        }

        canvas
    }
}

#[cfg(test)]
mod symbol_tests {
    use super::Symbol;
    use crate::common::{
        mask::MaskPattern,
        metadata::{ECLevel, Version},
    };

    fn checkerboard(size: usize) -> Symbol {
        let modules = (0..size * size).map(|i| (i / size + i % size) % 2 == 0).collect();
        Symbol::new(size, Version(1), ECLevel::L, Some(MaskPattern::new(0)), 0, modules)
    }

    #[test]
    fn test_accessors() {
        let symbol = checkerboard(3);
        assert!(symbol.get(0, 0));
        assert!(!symbol.get(0, 1));
        assert!(symbol.get(2, 2));
        assert_eq!(symbol.count_dark_modules(), 5);
        let rows = symbol.rows().collect::<Vec<_>>();
        assert_eq!(rows, vec![&[true, false, true][..], &[false, true, false][..], &[true, false, true][..]]);
    }

    #[test]
    #[should_panic(expected = "Module out of bounds")]
    fn test_get_out_of_bounds() {
        checkerboard(3).get(0, 3);
    }

    #[test]
    fn test_empty() {
        let symbol = Symbol::empty(ECLevel::M);
        assert!(symbol.is_empty());
        assert_eq!(symbol.version(), Version(1));
        assert_eq!(symbol.rows().count(), 0);
        assert_eq!(symbol.to_str(1), "");
    }

    #[test]
    fn test_to_str() {
        let symbol = checkerboard(2);
        let res = symbol.to_str(1);
        let lines = res.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 10);
        assert!(lines[..4].iter().all(|l| l.chars().all(|c| c == '█')));
        assert_eq!(lines[4], "████ █████");
        assert_eq!(lines[5], "█████ ████");
        assert!(lines.iter().all(|l| l.chars().count() == 10));

        let res = symbol.to_str(2);
        assert_eq!(res.lines().count(), 20);
        assert_eq!(res.lines().nth(8), Some("████████  ██████████"));
        assert_eq!(res.lines().nth(10), Some("██████████  ████████"));
    }
}
