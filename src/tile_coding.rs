mod index_hash_table;
mod tile_coder;

pub use index_hash_table::IndexHashTable;
pub use tile_coder::{TileCoder, TileCoderConfig};

use crate::error::Result;

/// Turns a state into the indices of its active tiles.
pub trait TileEncoder<S: ?Sized> {
    /// Every index returned by `encode` is below this.
    fn table_size(&self) -> usize;

    fn encode(&mut self, state: &S) -> Result<Vec<usize>>;
}

fn hash_coords(coords: &[i64], iht: &mut IndexHashTable, read_only: bool) -> Option<usize> {
    iht.get_index(coords, read_only)
}

/// Hashed tile coding over `floats`, one tile per tiling.
///
/// Each float is expected to be scaled so that one unit is one tile width.
/// Tiling `t` is offset by `t / num_tilings` of a tile in the first
/// dimension and by an extra `2t / num_tilings` per further dimension.
/// `ints` are appended to every coordinate vector, which lets a caller
/// keep e.g. actions in disjoint regions of the table.
///
/// In `read_only` mode tilings whose cell was never seen are skipped.
/// Floats far outside the `i64` range saturate onto the outermost cells.
pub fn tiles(
    iht: &mut IndexHashTable,
    num_tilings: usize,
    floats: &[f64],
    ints: &[i64],
    read_only: bool,
) -> Vec<usize> {
    let n = num_tilings as i64;
    let qfloats: Vec<i64> = floats
        .iter()
        .map(|f| (f * num_tilings as f64).floor() as i64)
        .collect();
    let mut result: Vec<usize> = Vec::with_capacity(num_tilings);
    for tiling in 0..n {
        let tiling_x2 = tiling * 2;
        let mut coords: Vec<i64> = Vec::with_capacity(1 + qfloats.len() + ints.len());
        coords.push(tiling);
        let mut b = tiling;
        for q in &qfloats {
            coords.push(q.saturating_add(b).div_euclid(n));
            b += tiling_x2;
        }
        coords.extend_from_slice(ints);
        if let Some(index) = hash_coords(&coords, iht, read_only) {
            result.push(index);
        }
    }
    result
}

/// Like [`tiles`], but dimension `k` wraps around every `wrap_widths[k]`
/// tiles when a width is given. Used for periodic inputs such as angles.
pub fn tiles_wrap(
    iht: &mut IndexHashTable,
    num_tilings: usize,
    floats: &[f64],
    wrap_widths: &[Option<i64>],
    ints: &[i64],
    read_only: bool,
) -> Vec<usize> {
    let n = num_tilings as i64;
    let qfloats: Vec<i64> = floats
        .iter()
        .map(|f| (f * num_tilings as f64).floor() as i64)
        .collect();
    let mut result: Vec<usize> = Vec::with_capacity(num_tilings);
    for tiling in 0..n {
        let tiling_x2 = tiling * 2;
        let mut coords: Vec<i64> = Vec::with_capacity(1 + qfloats.len() + ints.len());
        coords.push(tiling);
        let mut b = tiling;
        for (k, q) in qfloats.iter().enumerate() {
            let c = q.saturating_add(b.rem_euclid(n)).div_euclid(n);
            match wrap_widths.get(k).copied().flatten() {
                Some(width) if width > 0 => coords.push(c.rem_euclid(width)),
                _ => coords.push(c),
            }
            b += tiling_x2;
        }
        coords.extend_from_slice(ints);
        if let Some(index) = hash_coords(&coords, iht, read_only) {
            result.push(index);
        }
    }
    result
}
