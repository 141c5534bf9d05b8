use crate::{ContentRepository, CoreError, Feature, Testimonial};

/// Listing a fetch failure refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Features,
    Testimonials,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Features => "features",
            Section::Testimonials => "testimonials",
        }
    }
}

/// A listing that could not be loaded and was replaced by an empty one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchFailure {
    pub section: Section,
    pub error: CoreError,
}

/// Everything the home page shows besides company info.
///
/// Lists are always present; a failed fetch leaves its list empty and is
/// reported in `failures` so the caller can log it.
#[derive(Clone, Debug, Default)]
pub struct HomeContent {
    pub features: Vec<Feature>,
    pub testimonials: Vec<Testimonial>,
    pub failures: Vec<FetchFailure>,
}

impl HomeContent {
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Application service gathering page content from a repository.
///
/// Fetch errors never escape this service: they degrade to empty listings.
pub struct ContentService<R: ContentRepository> {
    repo: R,
}

impl<R: ContentRepository> ContentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Load features and testimonials, substituting empty lists on failure.
    pub fn home_content(&self) -> HomeContent {
        let mut failures = Vec::new();

        let features = self.repo.list_features().unwrap_or_else(|error| {
            failures.push(FetchFailure {
                section: Section::Features,
                error,
            });
            Vec::new()
        });

        let testimonials = self.repo.list_testimonials().unwrap_or_else(|error| {
            failures.push(FetchFailure {
                section: Section::Testimonials,
                error,
            });
            Vec::new()
        });

        HomeContent {
            features,
            testimonials,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::static_repo::StaticContentRepo;

    struct BrokenFeatures;
    impl ContentRepository for BrokenFeatures {
        fn list_features(&self) -> Result<Vec<Feature>, CoreError> {
            Err(CoreError::Repository("connection refused".into()))
        }
        fn list_testimonials(&self) -> Result<Vec<Testimonial>, CoreError> {
            Ok(vec![Testimonial::new("A", "B", "C", "D")])
        }
    }

    struct BrokenEverything;
    impl ContentRepository for BrokenEverything {
        fn list_features(&self) -> Result<Vec<Feature>, CoreError> {
            Err(CoreError::Repository("down".into()))
        }
        fn list_testimonials(&self) -> Result<Vec<Testimonial>, CoreError> {
            Err(CoreError::Repository("down".into()))
        }
    }

    #[test]
    fn healthy_repo_is_not_degraded() {
        let svc = ContentService::new(StaticContentRepo::new());
        let content = svc.home_content();
        assert!(!content.is_degraded());
        assert!(!content.features.is_empty());
        assert!(!content.testimonials.is_empty());
    }

    #[test]
    fn failed_section_falls_back_to_empty() {
        let svc = ContentService::new(BrokenFeatures);
        let content = svc.home_content();
        assert!(content.features.is_empty());
        assert_eq!(content.testimonials.len(), 1);
        assert_eq!(content.failures.len(), 1);
        assert_eq!(content.failures[0].section, Section::Features);
    }

    #[test]
    fn both_sections_fail_independently() {
        let svc = ContentService::new(BrokenEverything);
        let content = svc.home_content();
        assert!(content.features.is_empty());
        assert!(content.testimonials.is_empty());
        let sections: Vec<_> = content.failures.iter().map(|f| f.section.as_str()).collect();
        assert_eq!(sections, vec!["features", "testimonials"]);
    }
}
