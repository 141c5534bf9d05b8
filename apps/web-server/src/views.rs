//! Typed view models, one per page.
//!
//! Each page gets its own struct so handlers and templates agree on the
//! available fields. `PageView` serialises to the flat object the template
//! sees; the variant decides which template renders it.

use domain::service::HomeContent;
use domain::{CompanyInfo, ContactSubmission, Feature, Testimonial};
use serde::Serialize;

/// Navigation entry highlighted by the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavKey {
    Home,
    About,
    Services,
    Contact,
}

impl NavKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavKey::Home => "home",
            NavKey::About => "about",
            NavKey::Services => "services",
            NavKey::Contact => "contact",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TeamMember {
    pub name: &'static str,
    pub position: &'static str,
    pub bio: &'static str,
    pub avatar: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct ServiceOffer {
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
}

pub const TEAM: &[TeamMember] = &[
    TeamMember {
        name: "Wahyu Chaw",
        position: "CEO & Founder",
        bio: "Ten years of experience in the technology industry.",
        avatar: "👨‍💼",
    },
    TeamMember {
        name: "Ahmad Hab",
        position: "Lead Developer",
        bio: "Expert in Go, Python and JavaScript.",
        avatar: "👨‍🔧",
    },
];

pub const SERVICES: &[ServiceOffer] = &[
    ServiceOffer {
        name: "Web Development",
        description: "Responsive, fast and SEO-friendly websites.",
        price: "From Rp 5.000.000",
        features: &[
            "Responsive Design",
            "SEO Optimization",
            "CMS Integration",
            "Maintenance",
        ],
    },
    ServiceOffer {
        name: "Mobile App Development",
        description: "iOS and Android applications with optimal performance.",
        price: "From Rp 15.000.000",
        features: &[
            "iOS & Android",
            "API Integration",
            "Push Notification",
            "App Store Submission",
        ],
    },
    ServiceOffer {
        name: "Cloud Solutions",
        description: "Cloud migration and management for your business.",
        price: "From Rp 10.000.000",
        features: &[
            "Cloud Migration",
            "Server Management",
            "Backup Solutions",
            "24/7 Monitoring",
        ],
    },
];

pub const NOT_FOUND_TITLE: &str = "404 - Page Not Found";

#[derive(Debug, Serialize)]
pub struct HomeView<'a> {
    pub title: String,
    pub company: &'a CompanyInfo,
    pub active: NavKey,
    pub features: Vec<Feature>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Serialize)]
pub struct AboutView<'a> {
    pub title: String,
    pub company: &'a CompanyInfo,
    pub active: NavKey,
    pub team: &'static [TeamMember],
}

#[derive(Debug, Serialize)]
pub struct ServicesView<'a> {
    pub title: String,
    pub company: &'a CompanyInfo,
    pub active: NavKey,
    pub services: &'static [ServiceOffer],
}

#[derive(Debug, Serialize)]
pub struct ContactView<'a> {
    pub title: String,
    pub company: &'a CompanyInfo,
    pub active: NavKey,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_msg: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NotFoundView<'a> {
    pub title: &'static str,
    pub company: &'a CompanyInfo,
}

/// View model for a single rendered page.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PageView<'a> {
    Home(HomeView<'a>),
    About(AboutView<'a>),
    Services(ServicesView<'a>),
    Contact(ContactView<'a>),
    NotFound(NotFoundView<'a>),
}

impl PageView<'_> {
    /// Template (file stem under the views directory) for this page.
    pub fn template(&self) -> &'static str {
        match self {
            PageView::Home(_) => "index",
            PageView::About(_) => "about",
            PageView::Services(_) => "services",
            PageView::Contact(_) => "contact",
            PageView::NotFound(_) => "404",
        }
    }

    /// Highlighted nav entry; the not-found page has none.
    pub fn active(&self) -> Option<NavKey> {
        match self {
            PageView::Home(v) => Some(v.active),
            PageView::About(v) => Some(v.active),
            PageView::Services(v) => Some(v.active),
            PageView::Contact(v) => Some(v.active),
            PageView::NotFound(_) => None,
        }
    }
}

fn page_title(page: &str, company: &CompanyInfo) -> String {
    format!("{} - {}", page, company.name)
}

pub fn home(company: &CompanyInfo, content: HomeContent) -> PageView<'_> {
    PageView::Home(HomeView {
        title: page_title("Home", company),
        company,
        active: NavKey::Home,
        features: content.features,
        testimonials: content.testimonials,
    })
}

pub fn about(company: &CompanyInfo) -> PageView<'_> {
    PageView::About(AboutView {
        title: page_title("About Us", company),
        company,
        active: NavKey::About,
        team: TEAM,
    })
}

pub fn services(company: &CompanyInfo) -> PageView<'_> {
    PageView::Services(ServicesView {
        title: page_title("Services", company),
        company,
        active: NavKey::Services,
        services: SERVICES,
    })
}

pub fn contact(company: &CompanyInfo) -> PageView<'_> {
    PageView::Contact(ContactView {
        title: page_title("Contact", company),
        company,
        active: NavKey::Contact,
        success: false,
        success_msg: None,
    })
}

pub fn contact_submitted<'a>(
    company: &'a CompanyInfo,
    submission: &ContactSubmission,
) -> PageView<'a> {
    PageView::Contact(ContactView {
        title: page_title("Contact", company),
        company,
        active: NavKey::Contact,
        success: true,
        success_msg: Some(submission.confirmation_message()),
    })
}

pub fn not_found(company: &CompanyInfo) -> PageView<'_> {
    PageView::NotFound(NotFoundView {
        title: NOT_FOUND_TITLE,
        company,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::service::{FetchFailure, Section};
    use domain::CoreError;
    use serde_json::{json, Value};

    fn to_json(view: &PageView<'_>) -> Value {
        serde_json::to_value(view).unwrap()
    }

    #[test]
    fn active_key_matches_route() {
        let company = CompanyInfo::default();
        let cases = [
            (home(&company, HomeContent::default()), "home"),
            (about(&company), "about"),
            (services(&company), "services"),
            (contact(&company), "contact"),
        ];
        for (view, expected) in cases {
            assert_eq!(view.active().map(|k| k.as_str()), Some(expected));
            assert_eq!(to_json(&view)["active"], json!(expected));
        }
    }

    #[test]
    fn not_found_has_no_active_key() {
        let company = CompanyInfo::default();
        let view = not_found(&company);
        assert_eq!(view.template(), "404");
        assert!(view.active().is_none());
        let v = to_json(&view);
        assert!(v.get("active").is_none());
        assert_eq!(v["title"], json!("404 - Page Not Found"));
    }

    #[test]
    fn failed_content_serialises_as_empty_lists() {
        let company = CompanyInfo::default();
        let content = HomeContent {
            features: vec![],
            testimonials: vec![],
            failures: vec![FetchFailure {
                section: Section::Features,
                error: CoreError::Repository("down".into()),
            }],
        };
        let v = to_json(&home(&company, content));
        assert_eq!(v["features"], json!([]));
        assert_eq!(v["testimonials"], json!([]));
    }

    #[test]
    fn home_keeps_list_order() {
        let company = CompanyInfo::default();
        let content = HomeContent {
            features: vec![
                Feature::new("💻", "Web Dev", "desc1"),
                Feature::new("📱", "Mobile", "desc2"),
            ],
            testimonials: vec![],
            failures: vec![],
        };
        let v = to_json(&home(&company, content));
        assert_eq!(
            v["features"],
            json!([
                {"icon": "💻", "title": "Web Dev", "description": "desc1"},
                {"icon": "📱", "title": "Mobile", "description": "desc2"},
            ])
        );
    }

    #[test]
    fn repeated_builds_are_identical() {
        let company = CompanyInfo::default();
        assert_eq!(to_json(&about(&company)), to_json(&about(&company)));
        assert_eq!(to_json(&services(&company)), to_json(&services(&company)));
    }

    #[test]
    fn titles_carry_company_name() {
        let company = CompanyInfo::default();
        assert_eq!(to_json(&about(&company))["title"], json!("About Us - TechSolution Inc."));
        assert_eq!(to_json(&contact(&company))["company"]["phone"], json!(company.phone));
    }

    #[test]
    fn plain_contact_has_no_success_fields() {
        let company = CompanyInfo::default();
        let v = to_json(&contact(&company));
        assert!(v.get("success").is_none());
        assert!(v.get("success_msg").is_none());
    }

    #[test]
    fn submitted_contact_carries_confirmation() {
        let company = CompanyInfo::default();
        let sub = ContactSubmission::new("Budi", "budi@x.com", "Hi");
        let v = to_json(&contact_submitted(&company, &sub));
        assert_eq!(v["success"], json!(true));
        let msg = v["success_msg"].as_str().unwrap();
        assert!(msg.contains("Budi"));
        assert!(msg.contains("budi@x.com"));
    }

    #[test]
    fn static_catalogs() {
        let company = CompanyInfo::default();
        let v = to_json(&services(&company));
        assert_eq!(v["services"].as_array().unwrap().len(), 3);
        assert_eq!(v["services"][0]["features"][0], json!("Responsive Design"));
        let v = to_json(&about(&company));
        assert_eq!(v["team"][1]["position"], json!("Lead Developer"));
    }
}
