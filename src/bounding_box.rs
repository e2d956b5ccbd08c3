/// Pixel-space rectangle given by its two corners.
///
/// Coordinates are not validated; `xmin < xmax` and `ymin < ymax` are the
/// caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

impl BoundingBox {
    pub fn new(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from(coords: [i32; 4]) -> Self {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }
}

impl From<(i32, i32, i32, i32)> for BoundingBox {
    fn from((xmin, ymin, xmax, ymax): (i32, i32, i32, i32)) -> Self {
        Self::new(xmin, ymin, xmax, ymax)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32, channels: u32) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }
}

impl From<(u32, u32, u32)> for ImageSize {
    fn from((width, height, channels): (u32, u32, u32)) -> Self {
        Self::new(width, height, channels)
    }
}

impl From<[u32; 3]> for ImageSize {
    fn from(dims: [u32; 3]) -> Self {
        Self::new(dims[0], dims[1], dims[2])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledBox {
    pub bbox: BoundingBox,
    pub class_label: String,
}
