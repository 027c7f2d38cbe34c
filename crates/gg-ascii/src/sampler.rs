use gg_core::color::Rgb;
use gg_core::config::SampleFilter;
use gg_core::error::CoreError;
use gg_core::frame::{Dimensions, Grid};
use gg_core::traits::RasterImage;
use rayon::prelude::*;

/// Source span `[start, end)` covered by output cell `index` out of `count`.
///
/// Always non-empty and inside `[0, extent)`, even when upsampling.
#[inline(always)]
fn block_span(index: u32, count: u32, extent: u32) -> (u32, u32) {
    let start = u64::from(index) * u64::from(extent) / u64::from(count);
    let end = (u64::from(index) + 1) * u64::from(extent) / u64::from(count);
    let start = start as u32;
    (start, (end as u32).max(start + 1))
}

/// Échantillonne l'image sur une grille de `columns` colonnes (box filter).
///
/// See [`sample_with`].
///
/// # Errors
/// [`CoreError::InvalidImage`] for a zero-area image,
/// [`CoreError::InvalidDimension`] for `columns == 0`.
///
/// # Example
/// ```
/// use gg_ascii::sampler::sample;
/// use gg_core::frame::FrameBuffer;
/// let grid = sample(&FrameBuffer::new(200, 100), 100).unwrap();
/// assert_eq!((grid.columns, grid.rows), (100, 50));
/// ```
pub fn sample<I: RasterImage + ?Sized>(image: &I, columns: u32) -> Result<Grid<Rgb>, CoreError> {
    sample_with(image, columns, SampleFilter::Area)
}

/// Échantillonne l'image sur une grille `columns × rows`, avec
/// `rows = max(1, floor(columns * height / width))`.
///
/// Each cell covers the contiguous source block
/// `[cx*W/columns, (cx+1)*W/columns) × [cy*H/rows, (cy+1)*H/rows)`, widened
/// to at least one pixel. `Area` averages the block (rounded to nearest),
/// `Nearest` reads its top-left pixel. Rows are processed in parallel; the
/// result does not depend on scheduling.
///
/// # Errors
/// [`CoreError::InvalidImage`] for a zero-area image,
/// [`CoreError::InvalidDimension`] for `columns == 0`.
pub fn sample_with<I: RasterImage + ?Sized>(
    image: &I,
    columns: u32,
    filter: SampleFilter,
) -> Result<Grid<Rgb>, CoreError> {
    let dims = Dimensions::for_image(image.width(), image.height(), columns)?;
    sample_into(image, dims, filter)
}

/// Échantillonne sur une grille de taille imposée.
///
/// Used when `image` is a pre-scaled copy: `dims` is computed from the
/// native size so the row count does not drift with the scaled one.
///
/// # Errors
/// [`CoreError::InvalidImage`] for a zero-area image,
/// [`CoreError::InvalidDimension`] if `dims` has a zero side.
///
/// # Example
/// ```
/// use gg_ascii::sampler::sample_into;
/// use gg_core::config::SampleFilter;
/// use gg_core::frame::{Dimensions, FrameBuffer};
/// let dims = Dimensions { columns: 100, rows: 51 };
/// let grid = sample_into(&FrameBuffer::new(400, 200), dims, SampleFilter::Area).unwrap();
/// assert_eq!((grid.columns, grid.rows), (100, 51));
/// ```
pub fn sample_into<I: RasterImage + ?Sized>(
    image: &I,
    dims: Dimensions,
    filter: SampleFilter,
) -> Result<Grid<Rgb>, CoreError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidImage { width, height });
    }
    if dims.columns == 0 || dims.rows == 0 {
        return Err(CoreError::InvalidDimension {
            columns: dims.columns,
        });
    }
    log::debug!(
        "Échantillonnage {width}×{height} → {}×{} ({filter:?})",
        dims.columns,
        dims.rows
    );

    let x_spans: Vec<(u32, u32)> = (0..dims.columns)
        .map(|cx| block_span(cx, dims.columns, width))
        .collect();

    let mut grid = Grid::new(dims, Rgb::BLACK);
    grid.cells
        .par_chunks_mut(dims.columns as usize)
        .enumerate()
        .for_each(|(cy, row)| {
            let (y0, y1) = block_span(cy as u32, dims.rows, height);
            for (cell, &(x0, x1)) in row.iter_mut().zip(&x_spans) {
                *cell = match filter {
                    SampleFilter::Nearest => image.rgb(x0, y0),
                    SampleFilter::Area => average_block(image, x0, x1, y0, y1),
                };
            }
        });

    Ok(grid)
}

fn average_block<I: RasterImage + ?Sized>(image: &I, x0: u32, x1: u32, y0: u32, y1: u32) -> Rgb {
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for y in y0..y1 {
        for x in x0..x1 {
            let px = image.rgb(x, y);
            r += u64::from(px.r);
            g += u64::from(px.g);
            b += u64::from(px.b);
        }
    }
    let count = u64::from(x1 - x0) * u64::from(y1 - y0);
    let avg = |sum: u64| ((sum + count / 2) / count) as u8;
    Rgb::new(avg(r), avg(g), avg(b))
}
