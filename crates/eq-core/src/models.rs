//! Content records served by the content store and bundled as fallback.
//!
//! Field names follow the content store's JSON contract (camelCase on the
//! wire). Records are plain data: nothing here is computed or derived from
//! other records besides the author embedded in each program.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// WhatsApp number that receives booking requests.
pub const BOOKING_WHATSAPP_NUMBER: &str = "56930179724";

/// External checkout link for programs. Opaque to this system.
pub const PROGRAM_CHECKOUT_URL: &str = "https://mpago.la/1pCPf7G";

/// The two content collections exposed by the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Program,
    Service,
}

impl CollectionKind {
    /// Path segment of the collection (`programs` / `services`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            CollectionKind::Program => "programs",
            CollectionKind::Service => "services",
        }
    }

    /// Both kinds, in display order.
    pub fn all() -> [CollectionKind; 2] {
        [CollectionKind::Program, CollectionKind::Service]
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Program => write!(f, "program"),
            CollectionKind::Service => write!(f, "service"),
        }
    }
}

impl std::str::FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "program" | "programs" => Ok(CollectionKind::Program),
            "service" | "services" => Ok(CollectionKind::Service),
            _ => Err(format!("Invalid collection: {}", s)),
        }
    }
}

/// Byline attached to a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub role: String,
    /// Portrait file name; may be absent or empty.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Title/description pair used by the solution grid and the program structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GridItem {
    pub title: String,
    pub description: String,
}

impl GridItem {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// A paid therapeutic program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    /// Price in Chilean pesos.
    pub price: u64,
    pub short_description: String,
    pub long_description: String,
    pub problem_title: String,
    pub problem_points: Vec<String>,
    pub solution_grid: Vec<GridItem>,
    pub structure: Vec<GridItem>,
    pub duration: String,
    pub is_online: bool,
    pub image_url: String,
    pub author: Author,
}

impl Program {
    /// Price with es-CL thousands grouping, e.g. `$250.000`.
    pub fn formatted_price(&self) -> String {
        format!("${}", group_thousands(self.price, '.'))
    }

    /// Leading number of the duration ("4 Semanas" -> "4").
    pub fn duration_value(&self) -> &str {
        self.duration.split_whitespace().next().unwrap_or("4")
    }

    /// Delivery label shown in the clinical architecture section.
    pub fn delivery_label(&self) -> &'static str {
        if self.is_online {
            "100%"
        } else {
            "Mix"
        }
    }

    pub fn checkout_url(&self) -> &'static str {
        PROGRAM_CHECKOUT_URL
    }
}

/// A clinical service offered by the practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub intervention_points: Vec<String>,
    pub image_url: String,
    pub cta_text: String,
    pub cta_message: String,
}

impl Service {
    /// WhatsApp deep link carrying the service's booking message.
    pub fn booking_url(&self) -> String {
        format!(
            "https://wa.me/{}?text={}",
            BOOKING_WHATSAPP_NUMBER,
            urlencoding::encode(&self.cta_message)
        )
    }
}

/// Common surface of every content record.
pub trait ContentEntity: Clone + Send + Sync + 'static {
    /// Collection the record belongs to.
    const KIND: CollectionKind;

    fn id(&self) -> &str;

    fn slug(&self) -> &str;

    fn title(&self) -> &str;

    /// Narrows a polymorphic entity to this variant.
    fn from_entity(entity: Entity) -> Option<Self>;

    fn into_entity(self) -> Entity;
}

impl ContentEntity for Program {
    const KIND: CollectionKind = CollectionKind::Program;

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn from_entity(entity: Entity) -> Option<Self> {
        match entity {
            Entity::Program(program) => Some(program),
            Entity::Service(_) => None,
        }
    }

    fn into_entity(self) -> Entity {
        Entity::Program(self)
    }
}

impl ContentEntity for Service {
    const KIND: CollectionKind = CollectionKind::Service;

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn from_entity(entity: Entity) -> Option<Self> {
        match entity {
            Entity::Service(service) => Some(service),
            Entity::Program(_) => None,
        }
    }

    fn into_entity(self) -> Entity {
        Entity::Service(self)
    }
}

/// A program or a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entity {
    Program(Program),
    Service(Service),
}

impl Entity {
    pub fn kind(&self) -> CollectionKind {
        match self {
            Entity::Program(_) => CollectionKind::Program,
            Entity::Service(_) => CollectionKind::Service,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Entity::Program(p) => &p.slug,
            Entity::Service(s) => &s.slug,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Program(p) => &p.id,
            Entity::Service(s) => &s.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Entity::Program(p) => &p.title,
            Entity::Service(s) => &s.title,
        }
    }

    pub fn as_program(&self) -> Option<&Program> {
        match self {
            Entity::Program(p) => Some(p),
            Entity::Service(_) => None,
        }
    }

    pub fn as_service(&self) -> Option<&Service> {
        match self {
            Entity::Service(s) => Some(s),
            Entity::Program(_) => None,
        }
    }
}

impl From<Program> for Entity {
    fn from(program: Program) -> Self {
        Entity::Program(program)
    }
}

impl From<Service> for Entity {
    fn from(service: Service) -> Self {
        Entity::Service(service)
    }
}

/// Response envelope used by every content store endpoint.
///
/// `data` is `null` only on a not-found response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    ProgramEnvelope = ApiResponse<Program>,
    ProgramListEnvelope = ApiResponse<Vec<Program>>,
    ServiceEnvelope = ApiResponse<Service>,
    ServiceListEnvelope = ApiResponse<Vec<Service>>
)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            success: false,
            data: None,
            timestamp: Utc::now(),
        }
    }

    /// Returns the payload when the envelope reports success.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

/// Liveness payload of the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    pub fn ok(message: &str) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.to_string(),
        }
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
