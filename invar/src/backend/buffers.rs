//! Image and grid buffers exchanged with the backend.

use serde_json::{Map, Value};

/// RGBA8 raster produced by a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap existing RGBA data. Returns `None` if the length does not match.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize * 4).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Index into [`GridBuffer::features`], offset by one. `0` is "no feature".
pub type FeatureId = u32;

/// A feature hit by the interaction grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Value of the grid key attribute.
    pub key: String,
    pub attributes: Map<String, Value>,
}

/// Per-pixel feature ids for one rendered layer.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBuffer {
    width: u32,
    height: u32,
    key_field: String,
    ids: Vec<FeatureId>,
    features: Vec<Feature>,
}

impl GridBuffer {
    pub fn new(width: u32, height: u32, key_field: impl Into<String>) -> Self {
        Self {
            width,
            height,
            key_field: key_field.into(),
            ids: vec![0; width as usize * height as usize],
            features: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Attribute used to key features.
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Register a feature and return its id.
    pub fn add_feature(&mut self, key: impl Into<String>, attributes: Map<String, Value>) -> FeatureId {
        self.features.push(Feature {
            key: key.into(),
            attributes,
        });
        self.features.len() as FeatureId
    }

    /// Feature id at `(x, y)`; `0` outside the grid or on empty pixels.
    pub fn id_at(&self, x: u32, y: u32) -> FeatureId {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.ids[(y as usize) * self.width as usize + x as usize]
    }

    /// Feature at `(x, y)`, if any.
    pub fn feature_at(&self, x: u32, y: u32) -> Option<&Feature> {
        match self.id_at(x, y) {
            0 => None,
            id => self.features.get(id as usize - 1),
        }
    }

    /// Paint `id` over the rectangle `[x0, x1) × [y0, y1)`, clipped to the grid.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, id: FeatureId) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            for x in x0..x1 {
                self.ids[row + x as usize] = id;
            }
        }
    }
}
