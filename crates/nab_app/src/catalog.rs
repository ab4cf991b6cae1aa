//! Static business content
//!
//! Services, gallery, testimonials, team and contact details shown across the
//! screens. Everything here is compiled in; there is no content backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five bookable services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceId {
    BirdNetting,
    IndustrialNetting,
    BirdSpikes,
    InvisibleGrills,
    Fabrication,
}

impl ServiceId {
    pub const ALL: [ServiceId; 5] = [
        ServiceId::BirdNetting,
        ServiceId::IndustrialNetting,
        ServiceId::BirdSpikes,
        ServiceId::InvisibleGrills,
        ServiceId::Fabrication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::BirdNetting => "bird-netting",
            ServiceId::IndustrialNetting => "industrial-netting",
            ServiceId::BirdSpikes => "bird-spikes",
            ServiceId::InvisibleGrills => "invisible-grills",
            ServiceId::Fabrication => "fabrication",
        }
    }

    /// Full catalog entry
    pub fn service(&self) -> &'static Service {
        // SERVICES is declared in ALL order
        &SERVICES[*self as usize]
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown service id in a route or config
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service '{0}'")]
pub struct UnknownService(pub String);

impl FromStr for ServiceId {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

/// How a service is priced
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pricing {
    /// Rupees per square foot
    PerSqFt { rate: f64 },
    /// Flat price depending on the spike material
    Spikes { pvc: f64, stainless_steel: f64 },
    /// Quoted after a site visit
    Custom,
}

#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub title: &'static str,
    /// Short name used on the booking screen
    pub name: &'static str,
    pub description: &'static str,
    pub price_label: &'static str,
    pub icon: &'static str,
    pub features: &'static [&'static str],
    pub pricing: Pricing,
}

pub static SERVICES: [Service; 5] = [
    Service {
        id: ServiceId::BirdNetting,
        title: "Bird Netting",
        name: "Bird Netting",
        description: "Professional bird netting installation for balconies, windows, and open areas. \
                      Our high-quality nets are UV-resistant and durable, providing long-lasting \
                      protection while maintaining the aesthetic appeal of your property.",
        price_label: "₹15/sq. ft. (with installation)",
        icon: "shield-outline",
        features: &[
            "UV-resistant material",
            "Professional installation",
            "2-year warranty",
            "Transparent design",
        ],
        pricing: Pricing::PerSqFt { rate: 15.0 },
    },
    Service {
        id: ServiceId::IndustrialNetting,
        title: "Industrial Netting",
        name: "Industrial Netting",
        description: "Heavy-duty netting solutions designed for industrial spaces, warehouses, and \
                      commercial buildings. Perfect for large-scale bird control and debris protection.",
        price_label: "₹10/sq. ft.",
        icon: "business-outline",
        features: &[
            "Heavy-duty material",
            "Large area coverage",
            "Weather resistant",
            "Industrial grade",
        ],
        pricing: Pricing::PerSqFt { rate: 10.0 },
    },
    Service {
        id: ServiceId::BirdSpikes,
        title: "Bird Spikes",
        name: "Bird Spikes",
        description: "Effective bird deterrent spikes that prevent birds from landing and nesting. \
                      Available in both PVC and Stainless Steel variants for different requirements.",
        price_label: "PVC: ₹120, Stainless Steel: ₹150",
        icon: "triangle-outline",
        features: &[
            "Humane bird deterrent",
            "Easy installation",
            "Weather resistant",
            "Multiple sizes available",
        ],
        pricing: Pricing::Spikes {
            pvc: 120.0,
            stainless_steel: 150.0,
        },
    },
    Service {
        id: ServiceId::InvisibleGrills,
        title: "Invisible Grills",
        name: "Invisible Grills",
        description: "Modern invisible grills that provide safety without compromising your view. \
                      Made from high-tensile steel cables, perfect for balconies and windows.",
        price_label: "₹120/sq. ft.",
        icon: "grid-outline",
        features: &[
            "2mm, 2.5mm, 3mm sizes",
            "Unobstructed view",
            "Child safety",
            "Corrosion resistant",
        ],
        pricing: Pricing::PerSqFt { rate: 120.0 },
    },
    Service {
        id: ServiceId::Fabrication,
        title: "Custom Fabrication",
        name: "Custom Fabrication",
        description: "Tailored fabrication services for unique requirements. We design and \
                      manufacture custom solutions based on your specific needs and space requirements.",
        price_label: "Custom Quotation",
        icon: "construct-outline",
        features: &[
            "Custom design",
            "Site measurement",
            "Quality materials",
            "Expert craftsmanship",
        ],
        pricing: Pricing::Custom,
    },
];

pub fn services() -> &'static [Service] {
    &SERVICES
}

/// A before/after installation shown in the gallery
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub category: ServiceId,
}

pub static GALLERY: [Project; 6] = [
    Project {
        id: 1,
        title: "Balcony Bird Netting",
        description: "Professional bird netting installation for residential balcony",
        category: ServiceId::BirdNetting,
    },
    Project {
        id: 2,
        title: "Industrial Warehouse Protection",
        description: "Large-scale industrial netting for warehouse bird control",
        category: ServiceId::IndustrialNetting,
    },
    Project {
        id: 3,
        title: "Invisible Grills Installation",
        description: "Modern invisible grills for apartment balcony safety",
        category: ServiceId::InvisibleGrills,
    },
    Project {
        id: 4,
        title: "Bird Spikes Installation",
        description: "Effective bird deterrent spikes on building ledges",
        category: ServiceId::BirdSpikes,
    },
    Project {
        id: 5,
        title: "Custom Fabrication Work",
        description: "Tailored netting solution for unique architectural requirements",
        category: ServiceId::Fabrication,
    },
    Project {
        id: 6,
        title: "Residential Complex",
        description: "Complete bird netting solution for residential complex",
        category: ServiceId::BirdNetting,
    },
];

/// Gallery projects of one service category
pub fn projects_in(category: ServiceId) -> impl Iterator<Item = &'static Project> {
    GALLERY.iter().filter(move |p| p.category == category)
}

#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub name: &'static str,
    pub location: &'static str,
    /// Stars out of five
    pub rating: u8,
    pub comment: &'static str,
}

pub static TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        name: "Rajesh Kumar",
        location: "Mumbai",
        rating: 5,
        comment: "Excellent service! The bird netting was installed professionally and has \
                  completely solved our bird problem.",
    },
    Testimonial {
        name: "Priya Sharma",
        location: "Delhi",
        rating: 5,
        comment: "Very satisfied with the invisible grills. Great quality and the view is \
                  completely unobstructed.",
    },
    Testimonial {
        name: "Amit Patel",
        location: "Bangalore",
        rating: 5,
        comment: "Professional team, quality materials, and reasonable pricing. Highly recommended!",
    },
];

impl Testimonial {
    /// Filled and empty stars, five in total
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        "★".repeat(filled) + &"☆".repeat(5 - filled)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub experience: &'static str,
}

pub static TEAM: [TeamMember; 3] = [
    TeamMember {
        name: "Rajesh Gupta",
        role: "Founder & CEO",
        experience: "15+ years",
    },
    TeamMember {
        name: "Amit Sharma",
        role: "Installation Manager",
        experience: "12+ years",
    },
    TeamMember {
        name: "Priya Patel",
        role: "Customer Relations",
        experience: "8+ years",
    },
];

/// A titled highlight with an icon: certifications and home features
#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub static CERTIFICATIONS: [Highlight; 3] = [
    Highlight {
        title: "ISO 9001:2015 Certified",
        description: "Quality Management System",
        icon: "ribbon",
    },
    Highlight {
        title: "Safety Certified",
        description: "Workplace Safety Standards",
        icon: "shield-checkmark",
    },
    Highlight {
        title: "Licensed Contractor",
        description: "Government Approved",
        icon: "document-text",
    },
];

pub static HOME_FEATURES: [Highlight; 4] = [
    Highlight {
        title: "Professional",
        description: "Expert installation team",
        icon: "checkmark-circle",
    },
    Highlight {
        title: "Fast Service",
        description: "Quick installation",
        icon: "time",
    },
    Highlight {
        title: "Quality",
        description: "Premium materials",
        icon: "shield-checkmark",
    },
    Highlight {
        title: "Affordable",
        description: "Best prices guaranteed",
        icon: "cash",
    },
];

/// (figure, label)
pub static ACHIEVEMENTS: [(&str, &str); 4] = [
    ("500+", "Projects Completed"),
    ("15+", "Years Experience"),
    ("100%", "Customer Satisfaction"),
    ("24/7", "Support Available"),
];

#[derive(Debug, Clone, Serialize)]
pub struct ContactChannel {
    pub title: &'static str,
    pub value: &'static str,
    pub icon: &'static str,
    pub url: &'static str,
}

pub static CONTACT_CHANNELS: [ContactChannel; 4] = [
    ContactChannel {
        title: "Phone",
        value: "+91 98765 43210",
        icon: "call",
        url: "tel:+919876543210",
    },
    ContactChannel {
        title: "WhatsApp",
        value: "+91 98765 43210",
        icon: "logo-whatsapp",
        url: "https://wa.me/919876543210",
    },
    ContactChannel {
        title: "Email",
        value: "info@netsandbirds.com",
        icon: "mail",
        url: "mailto:info@netsandbirds.com",
    },
    ContactChannel {
        title: "Address",
        value: "123 Business Park, Mumbai, Maharashtra 400001",
        icon: "location",
        url: "https://maps.google.com/?q=123+Business+Park+Mumbai",
    },
];

/// (days, hours)
pub static BUSINESS_HOURS: [(&str, &str); 3] = [
    ("Monday - Friday", "9:00 AM - 7:00 PM"),
    ("Saturday", "9:00 AM - 5:00 PM"),
    ("Sunday", "10:00 AM - 4:00 PM"),
];
