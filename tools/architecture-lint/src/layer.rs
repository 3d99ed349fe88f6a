//! Layers of the service crate and what each one may reach.

use std::fmt;
use std::path::Path;

const RELATIVE_ROOTS: [&str; 3] = ["crate", "self", "super"];

/// Top-level module of the service crate that owns a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Entities, services and ports.
    Domain,
    /// Driving adapters (HTTP).
    Inbound,
    /// Driven adapters (persistence, in-memory store, security).
    Outbound,
}

impl Layer {
    /// Every layer, in the order sources are collected.
    pub const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    /// Module name of the layer under `src/`.
    #[must_use]
    pub const fn module(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    /// Layer owning `relative`, a path under `src/`.
    #[must_use]
    pub fn of_file(relative: &Path) -> Option<Self> {
        let first = relative.components().next()?;
        Self::from_module(&first.as_os_str().to_string_lossy())
    }

    fn from_module(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.module() == name)
    }

    const fn forbidden_layers(self) -> &'static [Self] {
        match self {
            Self::Domain => &[Self::Inbound, Self::Outbound],
            Self::Inbound => &[Self::Outbound],
            Self::Outbound => &[Self::Inbound],
        }
    }

    const fn forbidden_concerns(self) -> &'static [Concern] {
        match self {
            Self::Domain => &[
                Concern::Web,
                Concern::OpenApi,
                Concern::Database,
                Concern::Crypto,
            ],
            Self::Inbound => &[Concern::Database, Concern::Crypto],
            Self::Outbound => &[Concern::Web, Concern::OpenApi],
        }
    }

    /// Whether code in this layer may depend on `dependency`.
    #[must_use]
    pub fn permits(self, dependency: Dependency) -> bool {
        match dependency {
            Dependency::Layer(other) => !self.forbidden_layers().contains(&other),
            Dependency::Concern(concern) => !self.forbidden_concerns().contains(&concern),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module())
    }
}

/// Infrastructure the service builds on, grouped by the job it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Concern {
    /// Actix Web and its HTTP plumbing.
    Web,
    /// OpenAPI generation and Swagger UI.
    OpenApi,
    /// Diesel, its async driver, migrations and the pool.
    Database,
    /// Password hashing and token signing.
    Crypto,
}

impl Concern {
    /// Every concern the lint knows about.
    pub const ALL: [Self; 4] = [Self::Web, Self::OpenApi, Self::Database, Self::Crypto];

    /// Crate roots (as written in paths) belonging to the concern.
    #[must_use]
    pub const fn crates(self) -> &'static [&'static str] {
        match self {
            Self::Web => &["actix", "actix_http", "actix_web", "awc"],
            Self::OpenApi => &["utoipa", "utoipa_swagger_ui"],
            Self::Database => &["bb8", "diesel", "diesel_async", "diesel_migrations"],
            Self::Crypto => &["argon2", "jsonwebtoken"],
        }
    }

    /// Concern that owns crate root `name`, if any.
    #[must_use]
    pub fn of_crate(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|concern| concern.crates().contains(&name))
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Web => "the web framework",
            Self::OpenApi => "the OpenAPI generator",
            Self::Database => "the database stack",
            Self::Crypto => "a crypto backend",
        })
    }
}

/// Something a source file can depend on that the lint has rules for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dependency {
    /// Another layer of the service crate.
    Layer(Layer),
    /// A third-party infrastructure crate.
    Concern(Concern),
}

impl Dependency {
    /// Classify a path by its leading segments.
    ///
    /// `service_crate` is the name the crate is imported under from its own
    /// binaries, so `builders::outbound::...` resolves like `crate::outbound`.
    #[must_use]
    pub fn classify(segments: &[String], service_crate: &str) -> Option<Self> {
        let first = segments.first()?.as_str();
        if let Some(layer) = Layer::from_module(first) {
            return Some(Self::Layer(layer));
        }
        let module = if first == service_crate {
            segments.get(1)?
        } else if RELATIVE_ROOTS.contains(&first) {
            segments
                .iter()
                .find(|segment| !RELATIVE_ROOTS.contains(&segment.as_str()))?
        } else {
            return Concern::of_crate(first).map(Self::Concern);
        };
        Layer::from_module(module).map(Self::Layer)
    }

    /// How to fix a dependency the owning layer is not allowed.
    #[must_use]
    pub const fn remedy(self) -> &'static str {
        match self {
            Self::Layer(Layer::Outbound) => {
                "depend on a port in domain::ports and let the server wire the adapter"
            }
            Self::Layer(Layer::Inbound) => "translate at the HTTP boundary instead",
            Self::Layer(Layer::Domain) => "the domain is open to every layer",
            Self::Concern(Concern::Web) => "keep HTTP types inside inbound::http",
            Self::Concern(Concern::OpenApi) => "describe schemas in inbound::http::schemas",
            Self::Concern(Concern::Database) => "go through a repository port",
            Self::Concern(Concern::Crypto) => "go through the CredentialHasher or TokenCodec port",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layer(layer) => write!(f, "crate::{layer}"),
            Self::Concern(concern) => concern.fmt(f),
        }
    }
}
