use image::{Rgb, RgbImage};
use rand::Rng;

/// An image of independent uniformly random RGB pixels.
pub fn noise_image<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> RgbImage {
    RgbImage::from_fn(width, height, |_, _| Rgb(rng.random()))
}
