use std::rc::Rc;

use crate::resources::types::{
    image::Image,
    tile_set::{NUM_TILES_TOTAL, TileAttributes, TileIndex, TileSet},
};

pub const NUM_LAYERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("A map of {width}x{height} tiles is too large")]
    TooLarge { width: usize, height: usize },
    #[error("Tile index {index} too large for tile set of {limit} tiles")]
    TileIndexTooLarge { index: TileIndex, limit: TileIndex },
    #[error("Layer {layer} out of bounds")]
    LayerOutOfRange { layer: usize },
    #[error("Position ({x}, {y}) out of bounds for map of {width}x{height} tiles")]
    PositionOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// A level's tile grid: two layers of tile indices over a shared tile set,
/// plus the backdrop images drawn behind them.
///
/// Both layers are `width * height` cells stored row by row, and start out
/// filled with tile 0.
#[derive(Debug, Clone)]
pub struct Map {
    tile_set: Rc<TileSet>,
    layers: [Vec<TileIndex>; NUM_LAYERS],
    backdrop: Image,
    secondary_backdrop: Option<Image>,
    width: usize,
    height: usize,
}

impl Map {
    pub fn new(
        tile_set: Rc<TileSet>,
        backdrop: Image,
        secondary_backdrop: Option<Image>,
        width: usize,
        height: usize,
    ) -> Result<Self, MapError> {
        let num_cells = width
            .checked_mul(height)
            .ok_or(MapError::TooLarge { width, height })?;
        let layer = vec![0; num_cells];
        Ok(Self {
            tile_set,
            layers: [layer.clone(), layer],
            backdrop,
            secondary_backdrop,
            width,
            height,
        })
    }

    /// Finds the storage position of a cell, as `(layer, offset)`.
    fn cell(&self, layer: usize, x: usize, y: usize) -> Result<(usize, usize), MapError> {
        if layer >= NUM_LAYERS {
            return Err(MapError::LayerOutOfRange { layer });
        }
        if x >= self.width || y >= self.height {
            return Err(MapError::PositionOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((layer, x + y * self.width))
    }

    fn tile_slot(&mut self, layer: usize, x: usize, y: usize) -> Result<&mut TileIndex, MapError> {
        let (layer, offset) = self.cell(layer, x, y)?;
        Ok(&mut self.layers[layer][offset])
    }

    fn tile_ref(&self, layer: usize, x: usize, y: usize) -> Result<&TileIndex, MapError> {
        let (layer, offset) = self.cell(layer, x, y)?;
        Ok(&self.layers[layer][offset])
    }

    pub fn tile_at(&self, layer: usize, x: usize, y: usize) -> Result<TileIndex, MapError> {
        self.tile_ref(layer, x, y).copied()
    }

    /// Stores `index` in one cell. Indices past the end of the tile set are
    /// rejected before the position is looked at.
    pub fn set_tile_at(
        &mut self,
        layer: usize,
        x: usize,
        y: usize,
        index: TileIndex,
    ) -> Result<(), MapError> {
        if index >= NUM_TILES_TOTAL {
            return Err(MapError::TileIndexTooLarge {
                index,
                limit: NUM_TILES_TOTAL,
            });
        }
        *self.tile_slot(layer, x, y)? = index;
        Ok(())
    }

    /// The attributes of the tile stored in a cell.
    pub fn attributes_at(
        &self,
        layer: usize,
        x: usize,
        y: usize,
    ) -> Result<TileAttributes, MapError> {
        let index = self.tile_at(layer, x, y)?;
        Ok(self.tile_set.attributes().attributes(index))
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn tile_set(&self) -> &Rc<TileSet> {
        &self.tile_set
    }

    #[must_use]
    pub fn backdrop_image(&self) -> &Image {
        &self.backdrop
    }

    #[must_use]
    pub fn secondary_backdrop_image(&self) -> Option<&Image> {
        self.secondary_backdrop.as_ref()
    }
}
