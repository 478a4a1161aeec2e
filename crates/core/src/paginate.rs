//! Photo pagination for photo-grid slides.
//!
//! Splits an image list into fixed-size pages (default: 4 per page) and
//! applies the `(n/total)` page indicator to titles.

/// Splits photo lists into pages.
#[derive(Debug, Clone)]
pub struct PhotoPaginator {
    /// Number of images per page.
    photos_per_page: usize,
}

impl Default for PhotoPaginator {
    fn default() -> Self {
        Self { photos_per_page: 4 }
    }
}

impl PhotoPaginator {
    /// Create a paginator with the default 4 photos per page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paginator with a custom page size.
    pub fn with_photos_per_page(mut self, photos: usize) -> Self {
        self.photos_per_page = photos.max(1); // At least 1 photo per page
        self
    }

    /// Split images into pages, in order.
    pub fn paginate(&self, images: &[String]) -> Vec<PhotoPage> {
        let total = images.len().div_ceil(self.photos_per_page);

        images
            .chunks(self.photos_per_page)
            .enumerate()
            .map(|(idx, chunk)| PhotoPage {
                number: idx + 1,
                total,
                images: chunk.to_vec(),
            })
            .collect()
    }
}

/// One page of images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPage {
    /// 1-based page number.
    pub number: usize,

    /// Total number of pages in the run.
    pub total: usize,

    /// Images on this page.
    pub images: Vec<String>,
}

impl PhotoPage {
    /// Title for this page: `base`, with `(n/total)` appended when there is more than one page.
    pub fn title(&self, base: &str) -> String {
        if self.total > 1 {
            format!("{} ({}/{})", base, self.number, self.total)
        } else {
            base.to_string()
        }
    }
}
