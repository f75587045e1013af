//! Content catalog and the bundled fallback dataset.
//!
//! The bundled catalog is a compiled-in snapshot of the content store's two
//! collections. It is built once on first access and is read-only afterwards.
//! The content store seeds its in-memory lists from the same snapshot.

use crate::models::{Author, CollectionKind, ContentEntity, Entity, GridItem, Program, Service};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

static BUNDLED: OnceLock<Catalog> = OnceLock::new();

/// Problems found by [`Catalog::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{kind} at position {position} has an empty slug")]
    EmptySlug { kind: CollectionKind, position: usize },

    #[error("duplicate {kind} slug: {slug}")]
    DuplicateSlug { kind: CollectionKind, slug: String },
}

/// An immutable set of programs and services.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    programs: Vec<Program>,
    services: Vec<Service>,
}

impl Catalog {
    pub fn new(programs: Vec<Program>, services: Vec<Service>) -> Self {
        Self { programs, services }
    }

    /// The compiled-in fallback dataset.
    pub fn bundled() -> &'static Catalog {
        BUNDLED.get_or_init(build_bundled)
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn program(&self, slug: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.slug == slug)
    }

    pub fn service(&self, slug: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.slug == slug)
    }

    /// Typed lookup by slug.
    pub fn get<T: ContentEntity>(&self, slug: &str) -> Option<T> {
        self.find(T::KIND, slug).and_then(T::from_entity)
    }

    /// Looks up one entity of the given kind by slug.
    pub fn find(&self, kind: CollectionKind, slug: &str) -> Option<Entity> {
        match kind {
            CollectionKind::Program => self.program(slug).cloned().map(Entity::Program),
            CollectionKind::Service => self.service(slug).cloned().map(Entity::Service),
        }
    }

    /// All entities of the given kind, in catalog order.
    pub fn list(&self, kind: CollectionKind) -> Vec<Entity> {
        match kind {
            CollectionKind::Program => self.programs.iter().cloned().map(Entity::Program).collect(),
            CollectionKind::Service => self.services.iter().cloned().map(Entity::Service).collect(),
        }
    }

    pub fn slugs(&self, kind: CollectionKind) -> Vec<&str> {
        match kind {
            CollectionKind::Program => self.programs.iter().map(|p| p.slug.as_str()).collect(),
            CollectionKind::Service => self.services.iter().map(|s| s.slug.as_str()).collect(),
        }
    }

    /// Checks slug invariants: non-empty and unique per collection.
    ///
    /// Reports every finding rather than stopping at the first one.
    pub fn validate(&self) -> Vec<CatalogError> {
        let mut errors = Vec::new();
        for kind in CollectionKind::all() {
            let mut seen = HashSet::new();
            for (position, slug) in self.slugs(kind).into_iter().enumerate() {
                if slug.trim().is_empty() {
                    errors.push(CatalogError::EmptySlug { kind, position });
                } else if !seen.insert(slug) {
                    errors.push(CatalogError::DuplicateSlug {
                        kind,
                        slug: slug.to_string(),
                    });
                }
            }
        }
        errors
    }

    /// Slugs present in `self` but missing from `other`, per collection.
    ///
    /// Used to report drift between the content store and the bundled
    /// dataset. Nothing is reconciled.
    pub fn missing_from(&self, other: &Catalog) -> Vec<(CollectionKind, String)> {
        let mut missing = Vec::new();
        for kind in CollectionKind::all() {
            let theirs: HashSet<&str> = other.slugs(kind).into_iter().collect();
            for slug in self.slugs(kind) {
                if !theirs.contains(slug) {
                    missing.push((kind, slug.to_string()));
                }
            }
        }
        missing
    }
}

fn claudio_reyes() -> Author {
    Author {
        name: "Claudio Reyes Vera".to_string(),
        role: "Psicólogo Clínico Transdisciplinario".to_string(),
        image_url: Some("claudio-reyes.jpg".to_string()),
    }
}

fn points(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn build_bundled() -> Catalog {
    let programs = vec![
        Program {
            id: "p_angustia".to_string(),
            slug: "programa-angustia".to_string(),
            title: "Redefinir la Angustia".to_string(),
            subtitle: "Reprogramación Emocional".to_string(),
            price: 250000,
            short_description: "Un proceso clínico para resignificar el miedo a la pérdida y restaurar el vínculo interno.".to_string(),
            long_description: "La angustia no es enemiga; es una señal de desconexión profunda. Vivir en estado de alerta constante erosiona tu capacidad de confiar. Transita desde la parálisis hacia la seguridad interna.".to_string(),
            problem_title: "¿El miedo decide por ti?".to_string(),
            problem_points: points(&[
                "Hipervigilancia constante.",
                "Sensación inminente de catástrofe.",
                "Incapacidad para habitar el presente.",
            ]),
            solution_grid: vec![
                GridItem::new("Neurociencia", "Regulación vagal."),
                GridItem::new("Vínculo", "Seguridad interna."),
                GridItem::new("Cuerpo", "Habitar la calma."),
                GridItem::new("Mente", "Claridad cognitiva."),
            ],
            structure: vec![
                GridItem::new("Semanas 1-2", "Desactivar Alerta: Protocolos de seguridad."),
                GridItem::new("Semanas 3-4", "Restauración: Construir confianza básica."),
            ],
            duration: "4 Semanas".to_string(),
            is_online: true,
            image_url: "program-angustia.png".to_string(),
            author: claudio_reyes(),
        },
        Program {
            id: "p_culpa".to_string(),
            slug: "programa-culpa".to_string(),
            title: "Redefinir la Culpa".to_string(),
            subtitle: "Reprogramación Cognitiva".to_string(),
            price: 250000,
            short_description: "Transformar el castigo en responsabilidad soberana y desactivar el autoataque.".to_string(),
            long_description: "La culpa tóxica es un mecanismo de control interno que drena nuestra vitalidad. Aprende a distinguir entre la culpa neurótica y la responsabilidad ética para recuperar tu paz.".to_string(),
            problem_title: "¿Te castigas por existir?".to_string(),
            problem_points: points(&[
                "Rumiación mental obsesiva.",
                "Sensación de no ser suficiente.",
                "Autoexigencia destructiva.",
            ]),
            solution_grid: vec![
                GridItem::new("Ética", "Responsabilidad real."),
                GridItem::new("Compasión", "Cese del fuego."),
                GridItem::new("Dignidad", "Soberanía personal."),
                GridItem::new("Acción", "Reparación efectiva."),
            ],
            structure: vec![
                GridItem::new("Semanas 1-2", "Culpa vs Responsabilidad: Distinciones."),
                GridItem::new("Semanas 3-4", "Desactivar Autoataque: Paz interna."),
            ],
            duration: "4 Semanas".to_string(),
            is_online: true,
            image_url: "program-culpa.png".to_string(),
            author: claudio_reyes(),
        },
        Program {
            id: "p_irritabilidad".to_string(),
            slug: "programa-irritabilidad".to_string(),
            title: "Redefinir la Irritabilidad".to_string(),
            subtitle: "Reprogramación Focalizada".to_string(),
            price: 250000,
            short_description: "Un proceso profundo para resignificar la irritabilidad desde el amor propio.".to_string(),
            long_description: "La discrepancia entre la realidad y nuestras expectativas genera una fricción sistémica. La irritabilidad mantiene al sistema nervioso en alerta constante, erosionando tu vitalidad.".to_string(),
            problem_title: "¿Cuándo deja de ser una señal?".to_string(),
            problem_points: points(&[
                "Tensión corporal acumulada.",
                "Erosión de la energía vital.",
                "Debilitamiento de vínculos.",
            ]),
            solution_grid: vec![
                GridItem::new("Neurociencia", "Calma fisiológica."),
                GridItem::new("Presencia", "Habitar sin lucha."),
                GridItem::new("Reprogramar", "PNL y juicios."),
                GridItem::new("Amor Propio", "Autocompasión."),
            ],
            structure: vec![
                GridItem::new("Semanas 1-2", "Descomprimir: reactividad y seguridad."),
                GridItem::new("Semanas 3-4", "Reorganizar: identidad y amor propio."),
            ],
            duration: "4 Semanas".to_string(),
            is_online: true,
            image_url: "program-irritabilidad.jpg".to_string(),
            author: claudio_reyes(),
        },
    ];

    let services = vec![
        Service {
            id: "s_psiquiatria".to_string(),
            slug: "psiquiatria".to_string(),
            title: "Psiquiatría y Diagnóstico".to_string(),
            subtitle: "Enfoque Transdisciplinario y Neurociencia Afectiva".to_string(),
            description: "En Equilibrar, la psiquiatría trasciende la prescripción convencional.".to_string(),
            intervention_points: points(&[
                "Diagnóstico transdisciplinario integral.",
                "Neurociencia afectiva aplicada a la clínica.",
                "Integración con medicina oriental.",
                "Farmacología consciente y supervisada.",
            ]),
            image_url: "service-detail-psychiatry.jpg".to_string(),
            cta_text: "Agendar sesión vía WhatsApp".to_string(),
            cta_message: "Hola, me interesa agendar una hora de Psiquiatría/Diagnóstico.".to_string(),
        },
        Service {
            id: "s_psicologia".to_string(),
            slug: "psicologia".to_string(),
            title: "Psicología Clínica".to_string(),
            subtitle: "Regulación Somática y Vínculo Terapéutico".to_string(),
            description: "La sanación real ocurre en el contexto de un vínculo seguro.".to_string(),
            intervention_points: points(&[
                "Terapia centrada en la regulación somática.",
                "Fortalecimiento del vínculo terapéutico.",
                "Desarrollo de resiliencia emocional.",
                "Enfoque en trauma y apego.",
            ]),
            image_url: "service-detail-psychology.jpg".to_string(),
            cta_text: "Agendar sesión vía WhatsApp".to_string(),
            cta_message: "Hola, quisiera consultar por disponibilidad para Psicología Clínica.".to_string(),
        },
    ];

    Catalog::new(programs, services)
}
