//! Product catalog models.

use serde::{Deserialize, Serialize};

/// A product document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub created_at: String,
}

/// A validated product ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub image_url: String,
}

impl NewProduct {
    /// Assign an id and creation timestamp.
    pub fn into_product(self) -> Product {
        Product {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            price: self.price,
            image_url: self.image_url,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// An uploaded image file.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// File extension from the uploaded name, alphanumeric only.
    ///
    /// Falls back to the subtype of an `image/*` content type, then `bin`.
    pub fn extension(&self) -> String {
        let from_name = self.file_name.rsplit_once('.').map(|(_, ext)| ext);
        let from_type = self
            .content_type
            .as_deref()
            .and_then(|ct| ct.strip_prefix("image/"))
            .map(|sub| sub.split(['+', ';']).next().unwrap_or(sub));

        [from_name, from_type]
            .into_iter()
            .flatten()
            .map(sanitize_extension)
            .find(|ext| !ext.is_empty())
            .unwrap_or_else(|| "bin".to_string())
    }
}

fn sanitize_extension(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(8)
        .collect::<String>()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str) -> ImageUpload {
        ImageUpload { file_name: name.to_string(), content_type: None, bytes: vec![1] }
    }

    #[test]
    fn test_extension() {
        assert_eq!(upload("photo.PNG").extension(), "png");
        assert_eq!(upload("archive.tar.gz").extension(), "gz");
        assert_eq!(upload("noext").extension(), "bin");
        assert_eq!(upload("shell.p$h&p").extension(), "php");
    }

    #[test]
    fn test_extension_from_content_type() {
        let typed = |name: &str, ct: &str| ImageUpload {
            file_name: name.to_string(),
            content_type: Some(ct.to_string()),
            bytes: vec![1],
        };
        assert_eq!(typed("blob", "image/jpeg").extension(), "jpeg");
        assert_eq!(typed("blob", "image/svg+xml").extension(), "svg");
        assert_eq!(typed("photo.png", "image/jpeg").extension(), "png");
        assert_eq!(typed("blob", "application/octet-stream").extension(), "bin");
    }

    #[test]
    fn test_into_product_assigns_distinct_ids() {
        let new = NewProduct { name: "Widget".into(), price: 9.5, image_url: "/media/a.png".into() };
        let a = new.clone().into_product();
        let b = new.into_product();
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, b.name);
    }
}
