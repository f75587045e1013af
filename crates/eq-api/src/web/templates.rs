//! Askama template definitions for the site pages.

use askama::Template;
use eq_core::scroll::SECTION_LABELS;
use eq_core::view::{LoadingView, NotFoundView};
use eq_core::{Program, Service};

// ============================================
// Home
// ============================================

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub show_footer: bool,
    pub programs: Vec<ProgramCard>,
    pub services: Vec<ServiceCard>,
}

/// Program tile on the home page.
#[derive(Clone)]
pub struct ProgramCard {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub short_description: String,
    pub price: String,
    pub duration: String,
}

impl From<&Program> for ProgramCard {
    fn from(program: &Program) -> Self {
        Self {
            slug: program.slug.clone(),
            title: program.title.clone(),
            subtitle: program.subtitle.clone(),
            short_description: program.short_description.clone(),
            price: program.formatted_price(),
            duration: program.duration.clone(),
        }
    }
}

/// Service tile on the home page.
#[derive(Clone)]
pub struct ServiceCard {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
}

impl From<&Service> for ServiceCard {
    fn from(service: &Service) -> Self {
        Self {
            slug: service.slug.clone(),
            title: service.title.clone(),
            subtitle: service.subtitle.clone(),
        }
    }
}

// ============================================
// Detail pages
// ============================================

#[derive(Template)]
#[template(path = "service_detail.html")]
pub struct ServiceDetailTemplate {
    pub show_footer: bool,
    pub service: Service,
    pub booking_url: String,
}

impl ServiceDetailTemplate {
    pub fn new(service: &Service) -> Self {
        Self {
            show_footer: true,
            booking_url: service.booking_url(),
            service: service.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "program_detail.html")]
pub struct ProgramDetailTemplate {
    pub show_footer: bool,
    pub program: Program,
    pub price: String,
    pub sections: Vec<&'static str>,
}

impl ProgramDetailTemplate {
    pub fn new(program: &Program) -> Self {
        Self {
            show_footer: false,
            price: program.formatted_price(),
            program: program.clone(),
            sections: SECTION_LABELS.to_vec(),
        }
    }
}

// ============================================
// Placeholders
// ============================================

#[derive(Template)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub show_footer: bool,
    pub label: String,
}

impl LoadingTemplate {
    pub fn new(view: &LoadingView, show_footer: bool) -> Self {
        Self {
            show_footer,
            label: view.label.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub show_footer: bool,
    pub message: String,
    pub home_href: String,
    pub home_label: String,
}

impl NotFoundTemplate {
    pub fn new(view: &NotFoundView, show_footer: bool) -> Self {
        Self {
            show_footer,
            message: view.message.clone(),
            home_href: view.home_href.to_string(),
            home_label: view.home_label.to_string(),
        }
    }

    /// Page for a path no route handles.
    pub fn unknown_path(path: &str) -> Self {
        Self {
            show_footer: true,
            message: format!("Página no encontrada ({}).", path),
            home_href: eq_core::view::HOME_HREF.to_string(),
            home_label: "Volver al inicio".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eq_core::Catalog;

    #[test]
    fn test_loading_template_renders_label() {
        let html = LoadingTemplate::new(
            &LoadingView {
                label: "Cargando Experiencia...",
            },
            false,
        )
        .render()
        .unwrap();
        assert!(html.contains("Cargando Experiencia..."));
    }

    #[test]
    fn test_program_template_renders_sections_and_price() {
        let program = Catalog::bundled().program("programa-culpa").unwrap();
        let html = ProgramDetailTemplate::new(program).render().unwrap();
        assert!(html.contains("Redefinir la Culpa"));
        assert!(html.contains("$250.000"));
        for label in ["Inicio", "El Problema", "Inscripción"] {
            assert!(html.contains(label), "missing section {}", label);
        }
        assert!(html.contains("https://mpago.la/1pCPf7G"));
        assert!(!html.contains("site-footer"));
    }

    #[test]
    fn test_service_template_renders_booking_link() {
        let service = Catalog::bundled().service("psiquiatria").unwrap();
        let html = ServiceDetailTemplate::new(service).render().unwrap();
        assert!(html.contains("https://wa.me/56930179724?text="));
        assert!(html.contains("site-footer"));
    }
}
