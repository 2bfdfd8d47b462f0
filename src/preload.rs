use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, warn};

use crate::error::ImageError;

const FALLBACK_PARALLELISM: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub name: String,
    pub url: PathBuf,
}

impl ImageEntry {
    pub fn resolve(base_path: &Path, name: &str) -> Self {
        Self { name: name.to_string(), url: base_path.join(name) }
    }
}

/// Anything that can fetch an image from its resolved location.
pub trait ImageSource: Sync {
    type Image: Send;

    fn fetch(&self, url: &Path) -> Result<Self::Image, ImageError>;
}

/// Outcome of one preload attempt.
#[derive(Debug)]
pub struct Preloaded<T> {
    pub entry: ImageEntry,
    pub image: Result<T, ImageError>,
}

impl<T> Preloaded<T> {
    #[cfg(test)]
    pub fn is_ok(&self) -> bool {
        self.image.is_ok()
    }
}

/// Fetches every name once, as many at a time as the machine has cores, and
/// waits for all of them. Results come back in input order; a failed fetch
/// never affects the others.
pub fn preload<S: ImageSource>(source: &S, base_path: &Path, names: &[String]) -> Vec<Preloaded<S::Image>> {
    let entries: Vec<ImageEntry> = names.iter().map(|name| ImageEntry::resolve(base_path, name)).collect();
    let width = thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(FALLBACK_PARALLELISM);

    let mut images: Vec<Result<S::Image, ImageError>> = Vec::with_capacity(entries.len());
    thread::scope(|scope| {
        for batch in entries.chunks(width) {
            let workers: Vec<_> = batch
                .iter()
                .map(|entry| scope.spawn(move || source.fetch(&entry.url)))
                .collect();

            images.extend(workers.into_iter().zip(batch).map(|(worker, entry)| {
                worker.join().unwrap_or_else(|_| Err(ImageError::Worker { path: entry.url.clone() }))
            }));
        }
    });

    entries
        .into_iter()
        .zip(images)
        .map(|(entry, image)| {
            match &image {
                Ok(_) => debug!(url = %entry.url.display(), "preloaded"),
                Err(e) => warn!(url = %entry.url.display(), "skipping image: {e}"),
            }
            Preloaded { entry, image }
        })
        .collect()
}
