//! Layout Engine - column assignment and positioning
//!
//! Places a sequence of item boxes into a fixed number of equal-width
//! columns. The first `columns` items form the seed row, one per column,
//! spread evenly across 0-100% of the container width. Every later item goes
//! either under the currently shortest column or, when reading order must be
//! kept, under column `index % columns`.

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;
use crate::models::{ItemBox, ItemPosition, LeftOffset};

/// Result of a layout pass as handed to the DOM (or to JavaScript)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub positions: Vec<ItemPosition>,
    pub container_height: f64,
}

impl Layout {
    /// Reuse the seed row's horizontal offsets for every later item.
    ///
    /// `anchors[c]` is the left offset the seed item of column `c` ended up
    /// with. Items in the seed row are left untouched, as are columns
    /// without an anchor.
    pub fn anchor_columns(&mut self, anchors: &[LeftOffset]) {
        let seed = anchors.len();
        for position in self.positions.iter_mut().skip(seed) {
            if let Some(anchor) = anchors.get(position.column) {
                position.left = anchor.clone();
            }
        }
    }
}

/// Per-pass grid state
///
/// Created fresh for every pass and never updated incrementally.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    columns: usize,
    keep_order: bool,
    /// Column of each item, in document order
    item_column_of: Vec<usize>,
    /// Filled height of each column. `None` while a column is out of
    /// contention: not seeded yet, or between being picked and receiving
    /// the new bottom.
    column_bottoms: Vec<Option<f64>>,
    /// Left offset captured from each column's seed item
    column_lefts: Vec<LeftOffset>,
    positions: Vec<ItemPosition>,
    container_height: f64,
}

impl Grid {
    /// Empty grid for `columns` columns
    pub fn new(columns: u32, keep_order: bool) -> Result<Self, LayoutError> {
        if columns == 0 {
            return Err(LayoutError::NoColumns);
        }
        let columns = columns as usize;

        Ok(Self {
            columns,
            keep_order,
            item_column_of: Vec::new(),
            column_bottoms: vec![None; columns],
            column_lefts: Vec::with_capacity(columns),
            positions: Vec::new(),
            container_height: 0.0,
        })
    }

    /// Run a full pass over `items`
    pub fn stack(items: &[ItemBox], columns: u32, keep_order: bool) -> Result<Self, LayoutError> {
        let mut grid = Grid::new(columns, keep_order)?;
        for item in items {
            grid.place(item);
        }
        grid.container_height = grid.max_bottom();
        Ok(grid)
    }

    /// Place the next item in document order
    fn place(&mut self, item: &ItemBox) {
        let index = self.item_column_of.len();

        let (column, top, left) = if index < self.columns {
            let left = LeftOffset::Percent(index as f64 * (100.0 / self.columns as f64));
            self.column_lefts.push(left.clone());
            (index, 0.0, left)
        } else {
            let column = if self.keep_order {
                index % self.columns
            } else {
                self.shortest_column()
            };
            // Round-robin indexes directly; only the shortest-column search
            // needs the picked column out of contention.
            let top = if self.keep_order {
                self.column_bottoms[column].unwrap_or(0.0)
            } else {
                self.column_bottoms[column].take().unwrap_or(0.0)
            };
            (column, top, self.column_lefts[column].clone())
        };

        self.column_bottoms[column] = Some(top + item.stacked_height());
        self.item_column_of.push(column);
        self.positions.push(ItemPosition { column, left, top });
    }

    /// Column with the lowest bottom; ties go to the lowest column index
    fn shortest_column(&self) -> usize {
        let mut best: Option<(usize, f64)> = None;
        for (column, bottom) in self.column_bottoms.iter().enumerate() {
            if let Some(bottom) = *bottom {
                match best {
                    Some((_, lowest)) if lowest <= bottom => {}
                    _ => best = Some((column, bottom)),
                }
            }
        }
        best.map(|(column, _)| column).unwrap_or(0)
    }

    fn max_bottom(&self) -> f64 {
        self.column_bottoms
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn keep_order(&self) -> bool {
        self.keep_order
    }

    /// Column assigned to each item, indexed by document order
    pub fn item_column_of(&self) -> &[usize] {
        &self.item_column_of
    }

    /// Bottom of each column after the pass (`None` for unseeded columns)
    pub fn column_bottoms(&self) -> &[Option<f64>] {
        &self.column_bottoms
    }

    pub fn positions(&self) -> &[ItemPosition] {
        &self.positions
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    /// Number of items in the seed row
    pub fn seed_len(&self) -> usize {
        self.columns.min(self.positions.len())
    }

    pub fn to_layout(&self) -> Layout {
        Layout {
            positions: self.positions.clone(),
            container_height: self.container_height,
        }
    }
}

/// Compute positions and container height for `items`
pub fn compute_layout(
    items: &[ItemBox],
    columns: u32,
    keep_order: bool,
) -> Result<Layout, LayoutError> {
    Grid::stack(items, columns, keep_order).map(|grid| grid.to_layout())
}
