//! PNG export.

use crate::renderer::{RenderResult, RendererError};
use crate::skia_impl::{PngRenderResult, flatten};
use airink_core::board::Board;
use airink_core::style::Theme;

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(image: &PngRenderResult) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(format!("PNG header: {e}")))?;
        writer
            .write_image_data(&image.rgba_data)
            .map_err(|e| RendererError::Encode(format!("PNG data: {e}")))?;
    }
    Ok(png_data)
}

/// Flatten the board onto the theme background and encode it as PNG.
pub fn export_png(board: &Board, theme: Theme) -> RenderResult<Vec<u8>> {
    let image = flatten(board, theme)?;
    let png_data = encode_png(&image)?;
    log::info!(
        "Exported {}x{} board as PNG ({} bytes)",
        image.width,
        image.height,
        png_data.len()
    );
    Ok(png_data)
}
