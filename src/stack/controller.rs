//! Stack Controller
//!
//! Drives one layout pass against a container: read geometry, run the
//! engine, write positions back, set markers. The element side is behind
//! [`StackHost`] so the same lifecycle runs against the real DOM and against
//! in-memory hosts in tests.

use crate::errors::StackError;
use crate::layout::Grid;
use crate::models::{ItemBox, LeftOffset, StackOptions};

/// Container class added when a pass starts
pub const CLASS_INIT: &str = "stackem--init";
/// Container class added once all items are placed
pub const CLASS_DONE: &str = "stackem--is-done";
/// Item class added once the item is placed
pub const CLASS_ITEM_DONE: &str = "stackem--item-is-done";
/// Container attribute holding the resolved column count
pub const COLUMNS_ATTRIBUTE: &str = "data-stackem-columns";

/// Element access needed to stack one container
pub trait StackHost {
    type Item;

    /// Items to stack, in document order
    fn items(&self) -> Result<Vec<Self::Item>, StackError>;

    /// Geometry of an item as it currently sits in the page
    fn measure(&self, item: &Self::Item) -> ItemBox;

    /// Round image heights inside `item` up by one pixel
    fn fix_image_heights(&self, item: &Self::Item) -> Result<(), StackError>;

    /// Switch `item` to absolute positioning at `left`/`top`
    fn place(&self, item: &Self::Item, left: &LeftOffset, top: f64) -> Result<(), StackError>;

    /// The `left` value the item ended up with after placement
    fn resolved_left(&self, item: &Self::Item) -> Option<String>;

    /// Drop inline position/left/top from `item`
    fn clear_placement(&self, item: &Self::Item) -> Result<(), StackError>;

    fn set_item_class(&self, item: &Self::Item, class: &str, on: bool) -> Result<(), StackError>;

    fn container_width(&self) -> f64;

    /// `None` clears the inline height
    fn set_container_height(&self, height: Option<f64>) -> Result<(), StackError>;

    fn set_container_class(&self, class: &str, on: bool) -> Result<(), StackError>;

    fn column_attribute(&self) -> Option<String>;

    /// `None` removes the attribute
    fn set_column_attribute(&self, value: Option<&str>) -> Result<(), StackError>;
}

/// Lifecycle of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackState {
    Uninitialized,
    Stacked,
    Unstacked,
}

/// Stacks the items of one container
pub struct Stacker<H: StackHost> {
    host: H,
    options: StackOptions,
    grid: Option<Grid>,
    state: StackState,
    /// Column attribute as authored in the markup, captured before the
    /// first write so reverting can put it back
    authored_columns: Option<Option<String>>,
}

impl<H: StackHost> Stacker<H> {
    pub fn new(host: H, options: StackOptions) -> Self {
        Self {
            host,
            options,
            grid: None,
            state: StackState::Uninitialized,
            authored_columns: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn options(&self) -> &StackOptions {
        &self.options
    }

    pub fn state(&self) -> StackState {
        self.state
    }

    /// Grid of the current pass, if stacked
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Column count the next pass would use
    pub fn resolve_columns(&mut self) -> u32 {
        let authored = self.authored_columns().clone();
        self.options.resolve_columns(authored.as_deref())
    }

    fn authored_columns(&mut self) -> &Option<String> {
        let host = &self.host;
        self.authored_columns
            .get_or_insert_with(|| host.column_attribute())
    }

    /// Stack all items
    ///
    /// With a single column there is nothing to pack, so this reverts any
    /// previous stacking instead.
    pub fn build(&mut self) -> Result<(), StackError> {
        let columns = self.resolve_columns();
        if columns <= 1 {
            log::debug!("single column, leaving items in flow");
            return self.remove();
        }

        // Listed before any write so a bad selector leaves the page untouched
        let items = self.host.items()?;

        match self.stack_items(&items, columns) {
            Ok(grid) => {
                self.grid = Some(grid);
                self.state = StackState::Stacked;
                Ok(())
            }
            Err(err) => {
                log::warn!("stacking failed, reverting partial pass: {}", err);
                if let Err(revert_err) = self.revert(&items) {
                    log::warn!("could not revert partial pass: {}", revert_err);
                }
                Err(err)
            }
        }
    }

    fn stack_items(&self, items: &[H::Item], columns: u32) -> Result<Grid, StackError> {
        self.host.set_container_class(CLASS_INIT, true)?;
        self.host.set_column_attribute(Some(&columns.to_string()))?;

        let mut boxes = Vec::with_capacity(items.len());
        for item in items {
            if self.options.fix_heights {
                self.host.fix_image_heights(item)?;
            }
            boxes.push(self.host.measure(item));
        }

        let grid = Grid::stack(&boxes, columns, self.options.keep_order)?;
        let mut layout = grid.to_layout();
        let seed = grid.seed_len();

        for (item, position) in items.iter().zip(&layout.positions).take(seed) {
            self.host.place(item, &position.left, position.top)?;
        }

        // Later rows reuse wherever the seed items actually landed
        let width = self.host.container_width();
        let anchors: Vec<LeftOffset> = items
            .iter()
            .zip(&layout.positions)
            .take(seed)
            .map(|(item, position)| match self.host.resolved_left(item) {
                Some(raw) => LeftOffset::parse(&raw, width),
                None => position.left.clone(),
            })
            .collect();
        layout.anchor_columns(&anchors);

        for (item, position) in items.iter().zip(&layout.positions).skip(seed) {
            self.host.place(item, &position.left, position.top)?;
        }
        for item in items {
            self.host.set_item_class(item, CLASS_ITEM_DONE, true)?;
        }

        self.host.set_container_height(Some(layout.container_height))?;
        self.host.set_container_class(CLASS_DONE, true)?;

        log::debug!(
            "stacked {} items into {} columns (keep_order={}), height {}px",
            items.len(),
            columns,
            self.options.keep_order,
            layout.container_height
        );
        Ok(grid)
    }

    /// Revert stacking. Does nothing unless currently stacked.
    pub fn remove(&mut self) -> Result<(), StackError> {
        if self.state != StackState::Stacked {
            return Ok(());
        }

        let items = self.host.items()?;
        self.revert(&items)?;
        log::debug!("stacking removed");
        Ok(())
    }

    /// Undo every write a pass can make, continuing past failures.
    ///
    /// On failure the stacker stays `Stacked` so a later `remove()` retries.
    fn revert(&mut self, items: &[H::Item]) -> Result<(), StackError> {
        let mut first_error = None;
        let mut keep = |result: Result<(), StackError>| {
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        };

        for item in items {
            keep(self.host.clear_placement(item));
            keep(self.host.set_item_class(item, CLASS_ITEM_DONE, false));
        }
        keep(self.host.set_container_height(None));
        keep(self.host.set_container_class(CLASS_DONE, false));
        let authored = self.authored_columns().clone();
        keep(self.host.set_column_attribute(authored.as_deref()));

        self.grid = None;
        match first_error {
            Some(err) => {
                self.state = StackState::Stacked;
                Err(err)
            }
            None => {
                self.state = StackState::Unstacked;
                Ok(())
            }
        }
    }
}
