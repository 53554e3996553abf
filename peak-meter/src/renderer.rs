use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
};

use crate::color_strategy::PaletteColor;

/// Sink for the meter's drawing commands.
///
/// Coordinates are pixels with the origin at the top-left of the surface.
pub trait Renderer {
    type Error;

    fn clear_region(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: PaletteColor,
    ) -> Result<(), Self::Error>;

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: PaletteColor,
    ) -> Result<(), Self::Error>;

    fn draw_horizontal_line(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        color: PaletteColor,
    ) -> Result<(), Self::Error>;
}

/// Concrete colours for each [`PaletteColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb888,
    pub hot: Rgb888,
    pub mid: Rgb888,
    pub cool: Rgb888,
    pub marker: Rgb888,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb888::BLACK,
            hot: Rgb888::RED,
            mid: Rgb888::YELLOW,
            cool: Rgb888::GREEN,
            marker: Rgb888::WHITE,
        }
    }
}

impl Palette {
    pub fn rgb(&self, color: PaletteColor) -> Rgb888 {
        match color {
            PaletteColor::Background => self.background,
            PaletteColor::Hot => self.hot,
            PaletteColor::Mid => self.mid,
            PaletteColor::Cool => self.cool,
            PaletteColor::Marker => self.marker,
        }
    }
}

/// Draws onto any embedded-graphics target (panel framebuffer, simulator, ...).
pub struct DrawTargetRenderer<'a, D> {
    target: &'a mut D,
    palette: Palette,
}

impl<'a, D> DrawTargetRenderer<'a, D>
where
    D: DrawTarget<Color = Rgb888>,
{
    pub fn new(target: &'a mut D, palette: Palette) -> Self {
        Self { target, palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl<D> Renderer for DrawTargetRenderer<'_, D>
where
    D: DrawTarget<Color = Rgb888>,
{
    type Error = D::Error;

    fn clear_region(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: PaletteColor,
    ) -> Result<(), Self::Error> {
        let area = Rectangle::new(Point::new(x, y), Size::new(width, height));
        self.target.fill_solid(&area, self.palette.rgb(color))
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: PaletteColor,
    ) -> Result<(), Self::Error> {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(self.palette.rgb(color)))
            .draw(&mut *self.target)
    }

    fn draw_horizontal_line(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        color: PaletteColor,
    ) -> Result<(), Self::Error> {
        if width == 0 {
            return Ok(());
        }
        let x_end = x + width as i32 - 1;
        Line::new(Point::new(x, y), Point::new(x_end, y))
            .into_styled(PrimitiveStyle::with_stroke(self.palette.rgb(color), 1))
            .draw(&mut *self.target)
    }
}
