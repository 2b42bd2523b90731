//! Portfolio content document
//!
//! The document is parsed once at startup and shared read-only by every
//! request. It ships with the binary and can be replaced by a JSON file with
//! the same shape.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const BUILTIN_CONTENT: &str = include_str!("../content/portfolio.json");

/// Full portfolio document served by `GET /api/portfolio`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioContent {
    pub hero: Hero,
    pub about: About,
    pub services: Vec<Service>,
    pub experience: Vec<Experience>,
    pub certifications: Vec<Certification>,
    pub testimonials: Vec<Testimonial>,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub tagline: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub title: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub current_focus: String,
}

/// A bookable offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,

    /// Emoji shown next to the title
    pub icon: String,

    /// Theme color name used by the frontend
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: u32,
    pub role: String,
    pub organization: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: u32,
    pub title: String,
    pub issuer: String,
    pub year: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub content: String,

    /// Star rating, 1 to 5
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub title: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub services: Vec<String>,
}

impl PortfolioContent {
    /// Content bundled with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CONTENT).context("Bundled portfolio content is invalid")
    }

    /// Load content from a JSON file on disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read portfolio content: {}", path.display()))?;

        let content = Self::from_json(&raw)
            .with_context(|| format!("Invalid portfolio content: {}", path.display()))?;

        info!("Loaded portfolio content from {}", path.display());
        Ok(content)
    }

    /// Parse and check a content document
    pub fn from_json(raw: &str) -> Result<Self> {
        let content: PortfolioContent =
            serde_json::from_str(raw).context("Failed to parse portfolio content")?;
        content.validate()?;
        Ok(content)
    }

    fn validate(&self) -> Result<()> {
        if self.hero.name.trim().is_empty() {
            anyhow::bail!("hero.name must not be empty");
        }

        if self.services.is_empty() {
            anyhow::bail!("services must contain at least one entry");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_content_parses() {
        let content = PortfolioContent::builtin().unwrap();

        assert_eq!(content.hero.name, "Gunjan Jagtiani");
        assert_eq!(content.services.len(), 4);
        assert_eq!(content.experience.len(), 4);
        assert_eq!(content.certifications.len(), 5);
        assert_eq!(content.testimonials.len(), 4);
        assert_eq!(content.contact.email, "gunjan.wellness@gmail.com");

        let titles: Vec<&str> = content.services.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Yoga for Beginners",
                "Prenatal & Postnatal Yoga",
                "Sound Healing",
                "Online Wellness Sessions",
            ]
        );
    }

    #[test]
    fn test_about_uses_camel_case_on_the_wire() {
        let content = PortfolioContent::builtin().unwrap();
        let json = serde_json::to_value(&content).unwrap();

        assert!(json["about"]["currentFocus"].is_string());
        assert!(json["about"].get("current_focus").is_none());
    }

    #[test]
    fn test_rejects_empty_services() {
        let mut json: serde_json::Value = serde_json::from_str(BUILTIN_CONTENT).unwrap();
        json["services"] = serde_json::json!([]);

        let err = PortfolioContent::from_json(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("services"));
    }

    #[test]
    fn test_rejects_blank_hero_name() {
        let mut json: serde_json::Value = serde_json::from_str(BUILTIN_CONTENT).unwrap();
        json["hero"]["name"] = serde_json::json!("   ");

        let err = PortfolioContent::from_json(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("hero.name"));
    }

    #[test]
    fn test_rejects_missing_section() {
        let mut json: serde_json::Value = serde_json::from_str(BUILTIN_CONTENT).unwrap();
        json.as_object_mut().unwrap().remove("testimonials");

        assert!(PortfolioContent::from_json(&json.to_string()).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut json: serde_json::Value = serde_json::from_str(BUILTIN_CONTENT).unwrap();
        json["hero"]["name"] = serde_json::json!("Test Instructor");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.to_string().as_bytes()).unwrap();

        let content = PortfolioContent::from_file(file.path()).unwrap();
        assert_eq!(content.hero.name, "Test Instructor");
    }

    #[test]
    fn test_from_missing_file() {
        let err = PortfolioContent::from_file(Path::new("/nonexistent/portfolio.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read portfolio content"));
    }
}
