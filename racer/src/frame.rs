//! Full-screen RGB565 frame buffer.
//!
//! Every frame is composed off-screen and pushed to the panel in one
//! `fill_contiguous` call, so the display never shows a half-drawn frame.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};

use crate::error::Error;

/// A `DrawTarget` over a caller-provided pixel slice, row-major.
pub struct Frame<'a> {
    buf: &'a mut [Rgb565],
    size: Size,
}

impl<'a> Frame<'a> {
    /// Wrap `buf`, which must hold exactly `size.width * size.height` pixels.
    pub fn new(buf: &'a mut [Rgb565], size: Size) -> Result<Self, Error> {
        let expected = size.width as usize * size.height as usize;
        if buf.len() != expected {
            return Err(Error::FrameSize {
                expected,
                actual: buf.len(),
            });
        }
        Ok(Self { buf, size })
    }

    pub fn pixels(&self) -> &[Rgb565] {
        self.buf
    }

    /// Color at `point`, `None` outside the frame.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).map(|i| self.buf[i])
    }

    /// Send the whole frame to `display`.
    pub fn present<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = Rectangle::new(Point::zero(), self.size);
        display.fill_contiguous(&area, self.buf.iter().copied())
    }

    fn index(&self, Point { x, y }: Point) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.width as i32 || y >= self.size.height as i32 {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }
}

impl DrawTarget for Frame<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.buf[i] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let width = self.size.width as usize;
        for y in area.top_left.y..=bottom_right.y {
            let row = y as usize * width;
            self.buf[row + area.top_left.x as usize..=row + bottom_right.x as usize].fill(color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(color);
        Ok(())
    }
}

impl OriginDimensions for Frame<'_> {
    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::{
        PrimitiveStyle,
        Rectangle,
    };

    use super::*;

    const SIZE: Size = Size::new(8, 4);

    /// Records what `present` pushes.
    struct Panel {
        area: Option<Rectangle>,
        pixels: [Rgb565; 32],
        count: usize,
    }

    impl Panel {
        fn new() -> Self {
            Self {
                area: None,
                pixels: [Rgb565::BLACK; 32],
                count: 0,
            }
        }
    }

    impl DrawTarget for Panel {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            unreachable!("frames are pushed with fill_contiguous")
        }

        fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Self::Color>,
        {
            self.area = Some(*area);
            for (slot, color) in self.pixels.iter_mut().zip(colors) {
                *slot = color;
                self.count += 1;
            }
            Ok(())
        }
    }

    impl OriginDimensions for Panel {
        fn size(&self) -> Size {
            SIZE
        }
    }

    #[test]
    fn rejects_mismatched_buffers() {
        let mut buf = [Rgb565::BLACK; 31];
        assert_eq!(
            Frame::new(&mut buf, SIZE).err(),
            Some(Error::FrameSize {
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn clips_out_of_bounds_pixels() {
        let mut buf = [Rgb565::BLACK; 32];
        let mut frame = Frame::new(&mut buf, SIZE).unwrap();
        let pixels = [
            Pixel(Point::new(-1, 0), Rgb565::RED),
            Pixel(Point::new(8, 0), Rgb565::RED),
            Pixel(Point::new(0, 4), Rgb565::RED),
            Pixel(Point::new(7, 3), Rgb565::GREEN),
        ];
        frame.draw_iter(pixels).unwrap();
        assert_eq!(frame.pixel(Point::new(7, 3)), Some(Rgb565::GREEN));
        assert_eq!(frame.pixel(Point::new(8, 3)), None);
        assert_eq!(frame.pixels().iter().filter(|&&c| c != Rgb565::BLACK).count(), 1);
    }

    #[test]
    fn fill_solid_is_clipped_to_the_frame() {
        let mut buf = [Rgb565::BLACK; 32];
        let mut frame = Frame::new(&mut buf, SIZE).unwrap();
        Rectangle::new(Point::new(6, 2), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.pixels().iter().filter(|&&c| c == Rgb565::BLUE).count(), 4);
        assert_eq!(frame.pixel(Point::new(5, 2)), Some(Rgb565::BLACK));
        assert_eq!(frame.pixel(Point::new(7, 3)), Some(Rgb565::BLUE));

        frame
            .fill_solid(&Rectangle::new(Point::new(-5, -5), Size::new(2, 2)), Rgb565::RED)
            .unwrap();
        assert!(frame.pixels().iter().all(|&c| c != Rgb565::RED));
    }

    #[test]
    fn present_pushes_the_whole_frame_at_once() {
        let mut buf = [Rgb565::BLACK; 32];
        let mut frame = Frame::new(&mut buf, SIZE).unwrap();
        frame.clear(Rgb565::WHITE).unwrap();
        Pixel(Point::new(1, 0), Rgb565::RED).draw(&mut frame).unwrap();

        let mut panel = Panel::new();
        frame.present(&mut panel).unwrap();
        assert_eq!(panel.area, Some(Rectangle::new(Point::zero(), SIZE)));
        assert_eq!(panel.count, 32);
        assert_eq!(panel.pixels[0], Rgb565::WHITE);
        assert_eq!(panel.pixels[1], Rgb565::RED);
    }
}
