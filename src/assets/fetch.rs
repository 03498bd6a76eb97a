use std::{
    cell::RefCell,
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::assets::decode::{ImageResource, decode_image};
use crate::foundation::error::{CrossfadeError, CrossfadeResult};

/// Completion for one image fetch: the decoded image or why it failed.
pub type FetchCallback = Box<dyn FnOnce(CrossfadeResult<ImageResource>)>;

/// Resolves an image reference to a decoded image.
///
/// `done` must be called exactly once. It may run before `fetch` returns (the resource was
/// already cached) or later from the host's event loop.
pub trait ImageFetcher {
    /// Start retrieving `source`.
    fn fetch(&self, source: &str, done: FetchCallback);
}

/// Turn an image source into a key below the assets root.
///
/// Separators are unified to `/` and empty or `.` segments drop out, so `./hero//a.png` and
/// `hero\a.png` name the same file. Sources that would escape the root (absolute, drive
/// prefixed, or containing `..`) fail to load.
pub fn normalize_image_source(source: &str) -> CrossfadeResult<String> {
    let source = source.trim();
    if source.is_empty() {
        return Err(CrossfadeError::missing_source("image source is blank"));
    }
    let unified = source.replace('\\', "/");
    let escapes_root = unified.starts_with('/')
        || unified.as_bytes().get(1) == Some(&b':')
        || unified.split('/').any(|seg| seg == "..");
    if escapes_root {
        return Err(CrossfadeError::load_failure(format!(
            "image source '{source}' points outside the assets root"
        )));
    }

    let segments: Vec<&str> = unified
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect();
    if segments.is_empty() {
        return Err(CrossfadeError::load_failure(format!(
            "image source '{source}' names no file"
        )));
    }
    Ok(segments.join("/"))
}

/// Reads and decodes images below a root directory, decoding each source once.
///
/// Completes synchronously: the callback runs before `fetch` returns.
#[derive(Debug)]
pub struct FsImageFetcher {
    root: PathBuf,
    cache: RefCell<HashMap<String, ImageResource>>,
    decodes: RefCell<HashMap<String, u32>>,
}

impl FsImageFetcher {
    /// Fetcher resolving sources relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RefCell::new(HashMap::new()),
            decodes: RefCell::new(HashMap::new()),
        }
    }

    /// Root directory used when resolving sources.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// How many times `source` was decoded (0 or 1 with a warm cache).
    pub fn decode_count(&self, source: &str) -> u32 {
        normalize_image_source(source)
            .ok()
            .and_then(|key| self.decodes.borrow().get(&key).copied())
            .unwrap_or(0)
    }

    /// Load `source` through the cache.
    pub fn load(&self, source: &str) -> CrossfadeResult<ImageResource> {
        let key = normalize_image_source(source)?;
        if let Some(hit) = self.cache.borrow().get(&key) {
            return Ok(hit.clone());
        }

        let path = self.root.join(Path::new(&key));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(|e| CrossfadeError::load_failure(format!("{e:#}")))?;
        let image = decode_image(&bytes)
            .map_err(|e| CrossfadeError::load_failure(format!("'{}': {e:#}", path.display())))?;

        tracing::debug!(
            source = %key,
            width = image.width(),
            height = image.height(),
            "decoded image"
        );
        *self.decodes.borrow_mut().entry(key.clone()).or_insert(0) += 1;
        self.cache.borrow_mut().insert(key, image.clone());
        Ok(image)
    }
}

impl ImageFetcher for FsImageFetcher {
    fn fetch(&self, source: &str, done: FetchCallback) {
        done(self.load(source));
    }
}

/// In-memory fetcher for hosts that already hold decoded images.
///
/// In deferred mode completions are held back until [`flush`](Self::flush), emulating a
/// network round trip.
#[derive(Default)]
pub struct MemoryImageFetcher {
    images: RefCell<HashMap<String, ImageResource>>,
    deferred: bool,
    queued: RefCell<Vec<(String, FetchCallback)>>,
}

impl MemoryImageFetcher {
    /// Fetcher completing synchronously.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher completing only on [`flush`](Self::flush).
    pub fn deferred() -> Self {
        Self {
            deferred: true,
            ..Self::default()
        }
    }

    /// Register `image` under `source`.
    pub fn insert(&self, source: impl Into<String>, image: ImageResource) {
        self.images.borrow_mut().insert(source.into(), image);
    }

    /// Number of fetches waiting for a flush.
    pub fn queued(&self) -> usize {
        self.queued.borrow().len()
    }

    /// Complete every queued fetch; returns how many completed.
    pub fn flush(&self) -> usize {
        let batch = std::mem::take(&mut *self.queued.borrow_mut());
        let n = batch.len();
        for (source, done) in batch {
            done(self.resolve(&source));
        }
        n
    }

    fn resolve(&self, source: &str) -> CrossfadeResult<ImageResource> {
        self.images
            .borrow()
            .get(source)
            .cloned()
            .ok_or_else(|| {
                CrossfadeError::load_failure(format!("no image registered for '{source}'"))
            })
    }
}

impl std::fmt::Debug for MemoryImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryImageFetcher")
            .field("images", &self.images.borrow().len())
            .field("deferred", &self.deferred)
            .field("queued", &self.queued())
            .finish()
    }
}

impl ImageFetcher for MemoryImageFetcher {
    fn fetch(&self, source: &str, done: FetchCallback) {
        if self.deferred {
            self.queued.borrow_mut().push((source.to_string(), done));
        } else {
            done(self.resolve(source));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
