use sheetkit_core::{Drawing, Point, SheetConfig};
use sheetkit_designer::dimension::radial_dimension;
use sheetkit_designer::renderer::{render, RenderState};
use sheetkit_designer::sheet_layout::SheetLayout;
use sheetkit_designer::viewport::Viewport;

#[test]
fn test_rendered_sheet_saves_as_png() {
    let mut drawing = Drawing::new("png", SheetConfig::default());
    let config = drawing.dimensions.config;
    drawing
        .dimensions
        .items
        .push(radial_dimension(Point::ORIGIN, 25.0, 30.0, &config, None).unwrap());
    let mut viewport = Viewport::new(420.0, 297.0);
    SheetLayout::compute(&drawing.sheet, 420.0, 297.0).apply_to(&mut viewport);

    let image = render(&drawing, &RenderState::default(), &viewport);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.png");
    image.save(&path).unwrap();

    let reloaded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(reloaded.dimensions(), (420, 297));
    assert_eq!(reloaded, image);
}
