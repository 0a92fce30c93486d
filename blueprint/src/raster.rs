use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};

/// Rasterize an SVG document with the system fonts and write it as PNG.
pub fn write_png(svg: &str, w_px: u32, h_px: u32, path: &Path) -> Result<()> {
    let mut opt = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    if fontdb.is_empty() {
        log::warn!("no system fonts found; labels will not be drawn");
    }
    // Map generic 'sans-serif' to the first available family
    let family_name = fontdb
        .faces()
        .next()
        .and_then(|face| face.families.first().map(|(n, _)| n.clone()));
    if let Some(name) = family_name {
        fontdb.set_sans_serif_family(name);
    }
    opt.fontdb = Arc::new(fontdb);
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| anyhow!("SVG parse error: {e:?}"))?;
    let mut pixmap =
        tiny_skia::Pixmap::new(w_px, h_px).ok_or_else(|| anyhow!("pixmap alloc failed"))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pm);
    encode_png_deterministic(&pixmap, path)
}

fn encode_png_deterministic(pixmap: &tiny_skia::Pixmap, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    let mut enc = Encoder::new(file, pixmap.width(), pixmap.height());
    enc.set_color(ColorType::Rgba);
    enc.set_depth(BitDepth::Eight);
    enc.set_filter(FilterType::NoFilter);
    enc.set_compression(Compression::Default);
    let mut writer = enc.write_header()?;
    writer.write_image_data(pixmap.data())?;
    Ok(())
}
