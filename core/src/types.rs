use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u16;

/// Count type used for cell tallies (total cells, mines placed).
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount) * (b as CellCount)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(index, size)
    }
}

/// King-move offsets in fixed order: NW, N, NE, W, E, SW, S, SE.
const OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `offset` to `coords`, returning a value only when it stays in bounds.
fn apply_offset((x, y): Coord2, (dx, dy): (i32, i32), (max_x, max_y): Coord2) -> Option<Coord2> {
    let next_x = i32::from(x) + dx;
    let next_y = i32::from(y) + dy;

    if next_x < 0 || next_x >= i32::from(max_x) || next_y < 0 || next_y >= i32::from(max_y) {
        return None;
    }

    Some((next_x as Coord, next_y as Coord))
}

/// Iterator over the in-bounds 8-neighbors of a cell. Out-of-bounds positions
/// are skipped, so it yields between 0 and 8 coordinates.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    offsets: core::slice::Iter<'static, (i32, i32)>,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offsets: OFFSETS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        for &offset in self.offsets.by_ref() {
            let next_item = apply_offset(self.center, offset, self.bounds);
            if next_item.is_some() {
                return next_item;
            }
        }
        None
    }
}
