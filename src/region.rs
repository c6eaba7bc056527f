//! Classification of symbol modules into the areas a styled renderer paints
//! differently: the three finder "eyes" and the body.

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Region {
    /// Outer dark ring and inner light ring of a finder pattern
    EyeFrame(Corner),
    /// 3x3 core of a finder pattern
    EyeBall(Corner),
    Body,
}

// Finder pattern containing (r, c) with the local coordinates inside it
fn finder_local(r: usize, c: usize, size: usize) -> Option<(Corner, usize, usize)> {
    let far = size.checked_sub(7)?;
    match (r < 7, c < 7, r >= far, c >= far) {
        (true, true, ..) => Some((Corner::TopLeft, r, c)),
        (true, _, _, true) => Some((Corner::TopRight, r, c - far)),
        (_, true, true, _) => Some((Corner::BottomLeft, r - far, c)),
        _ => None,
    }
}

pub fn classify(r: usize, c: usize, size: usize) -> Region {
    match finder_local(r, c, size) {
        Some((corner, lr, lc)) if (2..=4).contains(&lr) && (2..=4).contains(&lc) => {
            Region::EyeBall(corner)
        }
        Some((corner, ..)) => Region::EyeFrame(corner),
        None => Region::Body,
    }
}

/// Whether (r, c) lies in one of the three 7x7 finder patterns
pub fn is_finder(r: usize, c: usize, size: usize) -> bool {
    finder_local(r, c, size).is_some()
}

pub fn is_eye_frame(r: usize, c: usize, size: usize) -> bool {
    matches!(classify(r, c, size), Region::EyeFrame(_))
}

pub fn is_eye_ball(r: usize, c: usize, size: usize) -> bool {
    matches!(classify(r, c, size), Region::EyeBall(_))
}
