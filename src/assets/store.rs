use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::decode::{RasterImage, decode_frame_file};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SeqviewError, SeqviewResult};

/// Source of decoded frames, addressed by sequence index.
///
/// `load` must be deterministic for a given index. Only the presentation loop calls it; the
/// playback scheduler never touches image data.
pub trait FrameStore {
    /// Number of frames in the sequence. Fixed for the lifetime of the store.
    fn len(&self) -> usize;

    /// Return `true` when the sequence has no frames.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode (or fetch from cache) the frame at `index`.
    fn load(&mut self, index: FrameIndex) -> SeqviewResult<Arc<RasterImage>>;
}

/// Path-backed frame store with a bounded decode cache.
///
/// Frames are decoded lazily on first use. At most `capacity` decoded frames are retained; the
/// oldest insertion is evicted first.
#[derive(Debug)]
pub struct FsFrameStore {
    paths: Vec<PathBuf>,
    capacity: usize,
    cache: HashMap<usize, Arc<RasterImage>>,
    order: VecDeque<usize>,
    decode_counts: Vec<u32>,
}

impl FsFrameStore {
    /// Create a store over `paths`. A `capacity` of zero is treated as one.
    pub fn new(paths: Vec<PathBuf>, capacity: usize) -> Self {
        let decode_counts = vec![0; paths.len()];
        Self {
            paths,
            capacity: capacity.max(1),
            cache: HashMap::new(),
            order: VecDeque::new(),
            decode_counts,
        }
    }

    /// Path backing `index`, if in range.
    pub fn path(&self, index: FrameIndex) -> Option<&std::path::Path> {
        self.paths.get(index.0).map(PathBuf::as_path)
    }

    /// How many times the frame at `index` has been decoded (cache misses).
    pub fn decode_count(&self, index: FrameIndex) -> u32 {
        self.decode_counts.get(index.0).copied().unwrap_or(0)
    }

    /// Number of frames currently held in the cache.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn insert(&mut self, index: usize, raster: Arc<RasterImage>) {
        while self.cache.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.cache.remove(&oldest);
        }
        self.cache.insert(index, raster);
        self.order.push_back(index);
    }
}

impl FrameStore for FsFrameStore {
    fn len(&self) -> usize {
        self.paths.len()
    }

    fn load(&mut self, index: FrameIndex) -> SeqviewResult<Arc<RasterImage>> {
        if let Some(hit) = self.cache.get(&index.0) {
            return Ok(Arc::clone(hit));
        }

        let path = self.paths.get(index.0).ok_or_else(|| {
            SeqviewError::validation(format!(
                "frame index {index} out of range (sequence has {} frames)",
                self.paths.len()
            ))
        })?;

        let raster = Arc::new(decode_frame_file(path)?);
        self.decode_counts[index.0] = self.decode_counts[index.0].saturating_add(1);
        self.insert(index.0, Arc::clone(&raster));
        Ok(raster)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
