//! Tile image loading, sprite-sheet slicing and raster export

use image::{RgbaImage, imageops};
use std::path::{Path, PathBuf};

use crate::algorithm::executor::TileGrid;
use crate::io::configuration::TILE_EXTENSIONS;
use crate::io::error::{Result, WaveError, invalid_parameter};

/// Load one image as RGBA
///
/// # Errors
///
/// Returns [`WaveError::ImageLoad`] if the file cannot be opened or decoded
pub fn load_tile(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| WaveError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Load every image in a directory, ordered by file name
///
/// Files without an image extension are skipped. The sort keeps module
/// indices stable across platforms.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be read
/// - An image file cannot be decoded
pub fn load_tile_folder(dir: &Path) -> Result<Vec<RgbaImage>> {
    let entries = std::fs::read_dir(dir).map_err(|e| WaveError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| WaveError::FileSystem {
                path: dir.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();
        if path.is_file() && is_image_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(|path| load_tile(path)).collect()
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Cut a sprite sheet into tiles, row by row
///
/// Partial tiles at the right and bottom edges are dropped.
///
/// # Errors
///
/// Returns [`WaveError::InvalidParameter`] if a tile dimension is zero or
/// larger than the sheet
pub fn slice_sprite_sheet(
    sheet: &RgbaImage,
    tile_width: u32,
    tile_height: u32,
) -> Result<Vec<RgbaImage>> {
    if tile_width == 0 || tile_height == 0 {
        return Err(invalid_parameter(
            "sheet",
            &format!("{tile_width}x{tile_height}"),
            &"tile dimensions must be positive",
        ));
    }

    let columns = sheet.width() / tile_width;
    let rows = sheet.height() / tile_height;
    if columns == 0 || rows == 0 {
        return Err(invalid_parameter(
            "sheet",
            &format!("{tile_width}x{tile_height}"),
            &format!(
                "tile is larger than the {}x{} sheet",
                sheet.width(),
                sheet.height()
            ),
        ));
    }

    let mut tiles = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for col in 0..columns {
            let tile = imageops::crop_imm(
                sheet,
                col * tile_width,
                row * tile_height,
                tile_width,
                tile_height,
            )
            .to_image();
            tiles.push(tile);
        }
    }
    Ok(tiles)
}

/// Assemble exported tiles into one raster
///
/// The cell size is taken from the first present tile. Cells without a
/// module stay transparent.
///
/// # Errors
///
/// Returns [`WaveError::InvalidParameter`] if no cell holds a tile
pub fn compose(grid: &TileGrid<'_, RgbaImage>) -> Result<RgbaImage> {
    let (tile_width, tile_height) = grid
        .iter()
        .find_map(|(_, tile)| tile)
        .map(RgbaImage::dimensions)
        .ok_or_else(|| invalid_parameter("grid", &"export", &"no cell holds a tile"))?;

    let mut canvas = RgbaImage::new(
        tile_width * grid.width() as u32,
        tile_height * grid.height() as u32,
    );

    for (coordinate, tile) in grid.iter() {
        if let Some(tile) = tile {
            let x = i64::from(tile_width) * coordinate.x as i64;
            let y = i64::from(tile_height) * coordinate.y as i64;
            imageops::replace(&mut canvas, tile, x, y);
        }
    }

    Ok(canvas)
}

/// Save an image as PNG, creating parent directories and overwriting
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| WaveError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| WaveError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
