use image::{GrayImage, RgbImage};
use ndarray::ArrayView3;

use crate::shared::error::GazeError;
use crate::shared::region::Region;

/// A still image: contiguous 8-bit pixels in row-major order.
///
/// Colour frames carry 3 channels in RGB order, grayscale frames carry 1.
/// Format conversion happens at I/O boundaries only; the domain layer
/// reads pixels through [`Frame::as_ndarray`].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(img.into_raw(), width, height, 3)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fails unless the frame has 1 or 3 channels and a buffer matching
    /// its dimensions.
    pub fn check_layout(&self) -> Result<(), GazeError> {
        if !matches!(self.channels, 1 | 3) {
            return Err(GazeError::InvalidImage(format!(
                "unsupported channel count {} (expected 1 or 3)",
                self.channels
            )));
        }
        let expected = self.width as usize * self.height as usize * self.channels as usize;
        if self.data.len() != expected {
            return Err(GazeError::InvalidImage(format!(
                "pixel buffer holds {} bytes, expected {expected}",
                self.data.len()
            )));
        }
        Ok(())
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// RGB triple at column `x`, row `y`. Grayscale frames replicate
    /// their single channel.
    pub fn rgb_at(&self, x: usize, y: usize) -> [u8; 3] {
        let arr = self.as_ndarray();
        if self.channels == 1 {
            let v = arr[[y, x, 0]];
            [v, v, v]
        } else {
            [arr[[y, x, 0]], arr[[y, x, 1]], arr[[y, x, 2]]]
        }
    }

    /// Single-channel luma copy. Already-gray frames are cloned as-is.
    ///
    /// Expects a layout accepted by [`Frame::check_layout`].
    pub fn to_grayscale(&self) -> Frame {
        if self.channels == 1 {
            return self.clone();
        }
        let rgb = RgbImage::from_raw(self.width, self.height, self.data.clone())
            .expect("Frame data length must match dimensions");
        let gray: GrayImage = image::imageops::grayscale(&rgb);
        Frame::new(gray.into_raw(), self.width, self.height, 1)
    }

    /// Copies the pixels covered by `region` into a new frame.
    ///
    /// Returns `None` when the region is not fully inside the frame.
    pub fn crop(&self, region: &Region) -> Option<Frame> {
        if !region.fits_within(self.width, self.height) {
            return None;
        }
        let channels = self.channels as usize;
        let row_len = self.width as usize * channels;
        let x0 = region.x as usize * channels;
        let span = region.width as usize * channels;

        let mut data = Vec::with_capacity(span * region.height as usize);
        for row in region.y as usize..(region.y + region.height) as usize {
            let start = row * row_len + x0;
            data.extend_from_slice(&self.data[start..start + span]);
        }
        Some(Frame::new(
            data,
            region.width as u32,
            region.height as u32,
            self.channels,
        ))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
