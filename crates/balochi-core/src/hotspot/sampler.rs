use crate::hotspot::Rgb;

/// Source of overlay pixel colors.
pub trait PixelSampler {
    /// Color under `(x, y)`, or `None` when the point is outside the overlay
    /// or the overlay has not been laid out yet.
    fn sample(&self, x: u32, y: u32) -> Option<Rgb>;
}

/// Named rectangle of a color-coded overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub color: Rgb,
}

impl Region {
    pub const fn new(
        name: &'static str,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Rgb,
    ) -> Self {
        Self {
            name,
            x,
            y,
            width,
            height,
            color,
        }
    }

    /// Center point, handy for scripted taps.
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Overlay of the built-in face picture. Later regions paint over earlier ones.
pub const FACE_REGIONS: [Region; 9] = [
    Region::new("hair", 0, 0, 40, 4, Rgb::BLACK),
    Region::new("left eye", 8, 7, 10, 5, Rgb::MAGENTA),
    Region::new("right eye", 22, 7, 10, 5, Rgb::MAGENTA),
    Region::new("left iris", 11, 8, 4, 3, Rgb::BLUE),
    Region::new("right iris", 25, 8, 4, 3, Rgb::BLUE),
    Region::new("nose", 18, 12, 4, 4, Rgb::YELLOW),
    Region::new("lips", 14, 17, 12, 2, Rgb::RED),
    Region::new("beard", 10, 20, 20, 4, Rgb::DARK_GRAY),
    Region::new("cheek", 2, 12, 5, 4, Rgb::GREEN),
];

/// In-memory RGB raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Raster {
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn from_regions(width: u32, height: u32, background: Rgb, regions: &[Region]) -> Self {
        let mut raster = Self::new(width, height, background);
        for region in regions {
            raster.fill_rect(region.x, region.y, region.width, region.height, region.color);
        }
        raster
    }

    /// The built-in face overlay on a white background.
    pub fn face() -> Self {
        Self::from_regions(40, 24, Rgb::WHITE, &FACE_REGIONS)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Paint a rectangle, clipped to the raster.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y.min(y_end)..y_end {
            for col in x.min(x_end)..x_end {
                let index = self.index(col, row);
                self.pixels[index] = color;
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PixelSampler for Raster {
    fn sample(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }
}
