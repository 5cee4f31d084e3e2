use crate::config::{AUTO_CROP_AREA, MAX_CROP_SIZE, MAX_PROFILE_PICTURE_BYTES};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Invalid URL: {0}. Ensure it starts with http:// or https://")]
    InvalidLink(String),
    #[error("File is too large! Please upload an image smaller than 5MB.")]
    FileTooLarge,
}

pub fn is_valid_link(link: &str) -> bool {
    Url::parse(link)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Checks every non-empty social link, reporting the first bad one.
pub fn validate_links<'a>(links: impl IntoIterator<Item = &'a str>) -> Result<(), ProfileError> {
    links
        .into_iter()
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .find(|link| !is_valid_link(link))
        .map_or(Ok(()), |link| Err(ProfileError::InvalidLink(link.to_string())))
}

pub fn check_picture_size(bytes: f64) -> Result<(), ProfileError> {
    if bytes > MAX_PROFILE_PICTURE_BYTES {
        Err(ProfileError::FileTooLarge)
    } else {
        Ok(())
    }
}

/// A square crop in source image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropBox {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl CropBox {
    /// The initial crop: centered, covering most of the shorter side.
    pub fn initial(width: f64, height: f64) -> Self {
        let size = width.min(height) * AUTO_CROP_AREA;
        Self {
            x: (width - size) / 2.0,
            y: (height - size) / 2.0,
            size,
        }
    }

    /// Keeps the box square and fully inside a `width` x `height` image.
    pub fn clamped(self, width: f64, height: f64) -> Self {
        let size = self.size.clamp(1.0, width.min(height).max(1.0));
        Self {
            x: self.x.clamp(0.0, (width - size).max(0.0)),
            y: self.y.clamp(0.0, (height - size).max(0.0)),
            size,
        }
    }

    /// Resizes around the box center.
    pub fn resized(self, size: f64, width: f64, height: f64) -> Self {
        let center_x = self.x + self.size / 2.0;
        let center_y = self.y + self.size / 2.0;
        Self {
            x: center_x - size / 2.0,
            y: center_y - size / 2.0,
            size,
        }
        .clamped(width, height)
    }

    pub fn moved(self, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, ..self }.clamped(width, height)
    }

    /// Edge length of the rendered picture, never above the upload limit.
    pub fn output_size(&self) -> u32 {
        (self.size.round() as u32).clamp(1, MAX_CROP_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_http_links_are_valid() {
        assert!(is_valid_link("https://github.com/ana"));
        assert!(is_valid_link("http://example.com"));
        assert!(!is_valid_link("ftp://example.com"));
        assert!(!is_valid_link("javascript:alert(1)"));
        assert!(!is_valid_link("github.com/ana"));
    }

    #[test]
    fn reports_the_first_invalid_link() {
        assert_eq!(validate_links(["", "  https://x.com/ana  "]), Ok(()));
        assert_eq!(
            validate_links(["https://x.com/ana", "www.bad", "also bad"]),
            Err(ProfileError::InvalidLink("www.bad".to_string()))
        );
    }

    #[test]
    fn rejects_large_pictures() {
        assert_eq!(check_picture_size(1024.0), Ok(()));
        assert_eq!(
            check_picture_size(6.0 * 1024.0 * 1024.0),
            Err(ProfileError::FileTooLarge)
        );
    }

    #[test]
    fn initial_crop_is_centered() {
        let crop = CropBox::initial(1000.0, 500.0);
        assert_eq!(crop, CropBox { x: 300.0, y: 50.0, size: 400.0 });
    }

    #[test]
    fn crop_stays_inside_the_image() {
        let crop = CropBox::initial(800.0, 600.0).moved(790.0, -20.0, 800.0, 600.0);
        assert_eq!(crop.x, 800.0 - crop.size);
        assert_eq!(crop.y, 0.0);
        let grown = crop.resized(5000.0, 800.0, 600.0);
        assert_eq!(grown.size, 600.0);
        assert!(grown.x >= 0.0 && grown.x + grown.size <= 800.0);
    }

    #[test]
    fn output_is_capped() {
        let crop = CropBox::initial(4000.0, 4000.0);
        assert_eq!(crop.output_size(), MAX_CROP_SIZE);
        assert_eq!(CropBox::initial(100.0, 100.0).output_size(), 80);
    }
}
