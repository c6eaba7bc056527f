use super::metadata::Version;

// Iterator over the data region of a QR in placement order
//------------------------------------------------------------------------------

/// Walks the modules not reserved for function patterns or metadata in the
/// standard zig-zag order: two-column strips from right to left, alternating
/// upwards and downwards, right column before left column. The vertical
/// timing column is skipped entirely.
#[derive(Debug, Clone)]
pub struct DataRegionIter {
    // Right column of the current strip
    col: i16,
    row: i16,
    // 0 for the right column of the strip, 1 for the left one
    side: i16,
    upward: bool,
    w: i16,
    ap: &'static [i16],
    has_version_info: bool,
}

impl DataRegionIter {
    pub fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self {
            col: w - 1,
            row: w - 1,
            side: 0,
            upward: true,
            w,
            ap: version.alignment_pattern(),
            has_version_info: *version >= 7,
        }
    }

    /// Whether the module at (r, c) belongs to a function pattern, a format or
    /// version info area, or the dark module
    pub fn is_reserved(&self, r: i16, c: i16) -> bool {
        let w = self.w;

        // Finders, separators, format info and the dark module
        if (r < 9 && c < 9) || (r < 9 && c >= w - 8) || (r >= w - 8 && c < 9) {
            return true;
        }

        // Timing patterns
        if r == 6 || c == 6 {
            return true;
        }

        if self.has_version_info
            && ((r < 6 && (w - 11..w - 8).contains(&c)) || (c < 6 && (w - 11..w - 8).contains(&r)))
        {
            return true;
        }

        let last = *self.ap.last().unwrap_or(&0);
        for &ar in self.ap {
            for &ac in self.ap {
                if (ar == 6 && (ac == 6 || ac == last)) || (ar == last && ac == 6) {
                    continue;
                }
                if (r - ar).abs() <= 2 && (c - ac).abs() <= 2 {
                    return true;
                }
            }
        }

        false
    }

    fn advance(&mut self) {
        if self.side == 0 {
            self.side = 1;
            return;
        }
        self.side = 0;

        let edge = if self.upward { 0 } else { self.w - 1 };
        if self.row != edge {
            self.row += if self.upward { -1 } else { 1 };
            return;
        }

        self.upward = !self.upward;
        self.col -= 2;
        if self.col == 6 {
            self.col = 5;
        }
    }
}

impl Iterator for DataRegionIter {
    type Item = (i16, i16);

    fn next(&mut self) -> Option<Self::Item> {
        while self.col >= 0 {
            let pos = (self.row, self.col - self.side);
            self.advance();
            if !self.is_reserved(pos.0, pos.1) {
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::DataRegionIter;
    use crate::common::metadata::Version;

    #[test]
    fn test_first_modules() {
        let res = DataRegionIter::new(Version(1)).take(6).collect::<Vec<_>>();
        assert_eq!(res, vec![(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
    }

    #[test]
    fn test_turns_at_top() {
        // The first strip climbs 12 rows below the top right format info
        let res = DataRegionIter::new(Version(1)).skip(22).take(4).collect::<Vec<_>>();
        assert_eq!(res, vec![(9, 20), (9, 19), (9, 18), (9, 17)]);
    }

    #[test]
    fn test_skips_timing_column() {
        let iter = DataRegionIter::new(Version(1));
        assert!(iter.clone().all(|(r, c)| r != 6 && c != 6));
        assert_eq!(iter.last(), Some((12, 0)));
    }

    #[test]
    fn test_data_region_size() {
        for v in Version::all() {
            let count = DataRegionIter::new(v).count();
            assert_eq!(count, v.total_codewords() * 8 + v.remainder_bits(), "Version {v}");
        }
    }

    #[test]
    fn test_visits_each_module_once() {
        for v in [Version(1), Version(7), Version(40)] {
            let w = v.width() as i16;
            let iter = DataRegionIter::new(v);
            let visited = iter.clone().collect::<HashSet<_>>();
            assert_eq!(visited.len(), iter.clone().count());
            for r in 0..w {
                for c in 0..w {
                    assert_eq!(visited.contains(&(r, c)), !iter.is_reserved(r, c));
                }
            }
        }
    }

    #[test]
    fn test_reserved_alignment_and_version() {
        let iter = DataRegionIter::new(Version(7));
        assert!(iter.is_reserved(22, 22));
        assert!(iter.is_reserved(24, 20));
        assert!(!iter.is_reserved(25, 22));
        assert!(iter.is_reserved(0, 34));
        assert!(iter.is_reserved(5, 36));
        assert!(!iter.is_reserved(6 + 1, 34));
        assert!(iter.is_reserved(34, 5));
        assert!(!iter.is_reserved(33, 5));

        let iter = DataRegionIter::new(Version(6));
        assert!(!iter.is_reserved(0, 30));
    }
}
