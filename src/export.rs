//! Writing frame buffers out as PNG images and animated GIFs.

use std::{fs::File, io::BufWriter, path::Path};

use crate::{
    image::{codecs::gif::GifEncoder, Delay, Frame, RgbaImage},
    Error, FrameBuffer, Target,
};

fn to_image(frame: &FrameBuffer) -> Result<RgbaImage, Error> {
    let [w, h] = frame.size();
    RgbaImage::from_raw(w as u32, h as u32, frame.to_rgba8()).ok_or(Error::InvalidImageSize([w, h]))
}

/// Save a frame buffer as a PNG, top row first.
pub fn save_png<P: AsRef<Path>>(frame: &FrameBuffer, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    to_image(frame)?.save(path)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// An animated GIF being written one frame at a time.
pub struct GifRecorder {
    encoder: GifEncoder<BufWriter<File>>,
    size: [usize; 2],
    delay: Delay,
    frames: usize,
}

impl GifRecorder {
    /// Start a GIF of `width` by `height` pixels, showing each frame for `delay_ms` milliseconds.
    pub fn create<P: AsRef<Path>>(
        path: P,
        width: usize,
        height: usize,
        delay_ms: u32,
    ) -> Result<Self, Error> {
        let file = File::create(path.as_ref())?;
        log::debug!("Recording {}", path.as_ref().display());
        Ok(Self {
            encoder: GifEncoder::new(BufWriter::new(file)),
            size: [width, height],
            delay: Delay::from_numer_denom_ms(delay_ms, 1),
            frames: 0,
        })
    }

    /// Append a frame. It must have the size the recorder was created with.
    pub fn push_frame(&mut self, frame: &FrameBuffer) -> Result<(), Error> {
        if frame.size() != self.size {
            return Err(Error::InvalidImageSize(frame.size()));
        }
        let image = to_image(frame)?;
        self.encoder
            .encode_frame(Frame::from_parts(image, 0, 0, self.delay))?;
        self.frames += 1;
        Ok(())
    }

    /// The number of frames pushed so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Flush the remaining data and close the file.
    pub fn finish(self) -> Result<(), Error> {
        let frames = self.frames;
        // The encoder writes the trailer when dropped
        drop(self.encoder);
        log::info!("Finished GIF with {} frames", frames);
        Ok(())
    }
}
