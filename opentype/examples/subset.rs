use std::error::Error;
use std::fs::{self, File};
use std::process;

use opentype::tables::ids::NameId;
use opentype::Font;

fn main() -> Result<(), Box<dyn Error>> {
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: subset <fontfile>");
            process::exit(1);
        }
    };

    let data = fs::read(&path)?;
    let font = Font::from_slice(&data)?;
    if let Some(family) = font.name().find(NameId::FONT_FAMILY_NAME) {
        if let Some(family) = family.as_unicode() {
            println!("subsetting {} ({} glyphs)", family, font.num_glyphs());
        }
    }
    if let Some(cmap) = font.cmap() {
        for record in cmap.encoding_records() {
            println!(
                "cmap platform: {} encoding: {} format: {}",
                record.platform_id(),
                record.encoding_id().display(record.platform_id()),
                record.subtable().format()
            );
        }
    }

    // keep the missing glyph and the first few outlines
    let subset = font.filter_glyf(&[0, 1, 2, 3])?;

    let file = File::create("subset.ttf")?;
    subset.to_writer(file)?;
    println!("wrote subset.ttf ({} glyphs)", subset.num_glyphs());

    Ok(())
}
