use crate::{ContentRepository, CoreError, Feature, Testimonial};

/// Content repository over compiled-in literals.
///
/// Used when the site runs without a database. Never fails.
#[derive(Clone, Debug)]
pub struct StaticContentRepo {
    features: Vec<Feature>,
    testimonials: Vec<Testimonial>,
}

impl StaticContentRepo {
    /// Repository holding the demo catalog.
    pub fn new() -> Self {
        Self::with_content(demo_features(), demo_testimonials())
    }

    pub fn with_content(features: Vec<Feature>, testimonials: Vec<Testimonial>) -> Self {
        Self {
            features,
            testimonials,
        }
    }
}

impl Default for StaticContentRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRepository for StaticContentRepo {
    fn list_features(&self) -> Result<Vec<Feature>, CoreError> {
        Ok(self.features.clone())
    }

    fn list_testimonials(&self) -> Result<Vec<Testimonial>, CoreError> {
        Ok(self.testimonials.clone())
    }
}

fn demo_features() -> Vec<Feature> {
    vec![
        Feature::new(
            "💻",
            "Web Development",
            "Responsive, fast and SEO-friendly websites built for your business.",
        ),
        Feature::new(
            "📱",
            "Mobile Apps",
            "Native-feeling iOS and Android applications with optimal performance.",
        ),
        Feature::new(
            "☁️",
            "Cloud Solutions",
            "Migration and day-to-day management of your cloud infrastructure.",
        ),
        Feature::new(
            "🔒",
            "Cyber Security",
            "Audits and hardening to keep your systems and data safe.",
        ),
    ]
}

fn demo_testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial::new(
            "Budi Santoso",
            "PT Maju Jaya",
            "Our new website doubled the number of inbound leads within three months.",
            "👨‍💼",
        ),
        Testimonial::new(
            "Siti Rahma",
            "Toko Online Sejahtera",
            "The mobile app they built is fast and our customers love it.",
            "👩‍💼",
        ),
        Testimonial::new(
            "Andi Wijaya",
            "CV Digital Kreatif",
            "Moving to the cloud went smoothly with zero downtime.",
            "👨‍💻",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_is_not_empty() {
        let repo = StaticContentRepo::new();
        assert_eq!(repo.list_features().unwrap().len(), 4);
        assert_eq!(repo.list_testimonials().unwrap().len(), 3);
    }

    #[test]
    fn with_content_preserves_order() {
        let repo = StaticContentRepo::with_content(
            vec![
                Feature::new("💻", "Web Dev", "desc1"),
                Feature::new("📱", "Mobile", "desc2"),
            ],
            vec![],
        );
        let titles: Vec<_> = repo
            .list_features()
            .unwrap()
            .into_iter()
            .map(|f| f.title)
            .collect();
        assert_eq!(titles, vec!["Web Dev", "Mobile"]);
        assert!(repo.list_testimonials().unwrap().is_empty());
    }
}
