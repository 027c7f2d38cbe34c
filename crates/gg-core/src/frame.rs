use crate::color::Rgb;
use crate::error::CoreError;
use crate::traits::RasterImage;

/// Image décodée, RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use gg_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir (alpha 0) aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use gg_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Buffer rempli d'une couleur opaque.
    ///
    /// # Example
    /// ```
    /// use gg_core::color::Rgb;
    /// use gg_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(4, 2, Rgb::new(128, 128, 128));
    /// assert_eq!(fb.pixel(3, 1), (128, 128, 128, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            data.extend_from_slice(&[color.r, color.g, color.b, 255]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    /// [`CoreError::InvalidImage`] if a side is zero or the buffer length is
    /// not `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize * 4 {
            return Err(CoreError::InvalidImage { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Accès au pixel (x, y) → (r, g, b, a). Hors limites : `(0, 0, 0, 0)`,
    /// jamais la ligne suivante.
    ///
    /// # Example
    /// ```
    /// use gg_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// assert_eq!(fb.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0, 0);
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Écrit un pixel opaque.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if let Some(px) = self.data.get_mut(idx..idx + 4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }
}

impl RasterImage for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    fn rgb(&self, x: u32, y: u32) -> Rgb {
        let (r, g, b, _) = self.pixel(x, y);
        Rgb::new(r, g, b)
    }
}

/// Taille de la grille de sortie, en caractères.
///
/// # Example
/// ```
/// use gg_core::frame::Dimensions;
/// let d = Dimensions::for_image(200, 100, 100).unwrap();
/// assert_eq!((d.columns, d.rows), (100, 50));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Characters per row.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
}

impl Dimensions {
    /// `rows = max(1, floor(columns * height / width))`.
    ///
    /// # Errors
    /// [`CoreError::InvalidImage`] for a zero-area source,
    /// [`CoreError::InvalidDimension`] for `columns == 0`.
    pub fn for_image(width: u32, height: u32, columns: u32) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidImage { width, height });
        }
        if columns == 0 {
            return Err(CoreError::InvalidDimension { columns });
        }
        let rows = u64::from(columns) * u64::from(height) / u64::from(width);
        let rows = u32::try_from(rows).unwrap_or(u32::MAX).max(1);
        Ok(Self { columns, rows })
    }

    /// Total number of cells.
    #[must_use]
    pub fn area(self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Grille rectangulaire row-major.
///
/// # Example
/// ```
/// use gg_core::frame::{Dimensions, Grid};
/// let mut grid = Grid::new(Dimensions { columns: 3, rows: 2 }, 0u8);
/// grid.set(2, 1, 7);
/// assert_eq!(*grid.get(2, 1), 7);
/// assert_eq!(grid.rows().count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    /// Flat array of cells, row-major.
    pub cells: Vec<T>,
    /// Width in cells.
    pub columns: u32,
    /// Height in cells.
    pub rows: u32,
}

impl<T: Clone> Grid<T> {
    /// Crée une grille remplie de `fill`.
    #[must_use]
    pub fn new(dims: Dimensions, fill: T) -> Self {
        Self {
            cells: vec![fill; dims.area()],
            columns: dims.columns,
            rows: dims.rows,
        }
    }
}

impl<T> Grid<T> {
    /// Build from an existing row-major vector.
    ///
    /// # Errors
    /// [`CoreError::InvalidDimension`] if `cells.len() != columns * rows` or a
    /// side is zero.
    pub fn from_cells(dims: Dimensions, cells: Vec<T>) -> Result<Self, CoreError> {
        if dims.columns == 0 || dims.rows == 0 || cells.len() != dims.area() {
            return Err(CoreError::InvalidDimension {
                columns: dims.columns,
            });
        }
        Ok(Self {
            cells,
            columns: dims.columns,
            rows: dims.rows,
        })
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            columns: self.columns,
            rows: self.rows,
        }
    }

    /// Set a cell at position (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        let idx = y as usize * self.columns as usize + x as usize;
        self.cells[idx] = value;
    }

    /// Get a cell reference at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> &T {
        &self.cells[y as usize * self.columns as usize + x as usize]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.cells.chunks_exact(self.columns.max(1) as usize)
    }

    /// Transform every cell, keeping the shape.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            columns: self.columns,
            rows: self.rows,
        }
    }
}

/// Une cellule de l'art rendu : un glyphe et, si la couleur est préservée,
/// la couleur d'origine de la cellule échantillonnée.
///
/// # Example
/// ```
/// use gg_core::frame::GlyphCell;
/// let cell = GlyphCell::default();
/// assert_eq!(cell.ch, ' ');
/// assert!(cell.color.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphCell {
    /// Caractère à afficher.
    pub ch: char,
    /// Source color, `None` for plain output.
    pub color: Option<Rgb>,
}

impl Default for GlyphCell {
    fn default() -> Self {
        Self { ch: ' ', color: None }
    }
}

/// Art rendu : grille de glyphes, avant toute mise en forme texte.
pub type RenderedArt = Grid<GlyphCell>;
