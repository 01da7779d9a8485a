//! Closed service icon set.
//!
//! Service records store the icon as text. Rendering resolves it through this
//! table; identifiers outside the set fall back to `FALLBACK_SYMBOL`.

use std::fmt::{Display, Formatter};

/// Symbol rendered for identifiers outside the supported set.
pub const FALLBACK_SYMBOL: &str = "[*]";

/// Supported service icon identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceIcon {
    Code,
    Palette,
    Terminal,
    Globe,
    Smartphone,
    Database,
    Cpu,
    Zap,
    Award,
    Star,
}

impl ServiceIcon {
    /// Every supported icon, in picker order.
    pub const ALL: [ServiceIcon; 10] = [
        ServiceIcon::Code,
        ServiceIcon::Palette,
        ServiceIcon::Terminal,
        ServiceIcon::Globe,
        ServiceIcon::Smartphone,
        ServiceIcon::Database,
        ServiceIcon::Cpu,
        ServiceIcon::Zap,
        ServiceIcon::Award,
        ServiceIcon::Star,
    ];

    /// Identifier as persisted in `Service::icon`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Palette => "Palette",
            Self::Terminal => "Terminal",
            Self::Globe => "Globe",
            Self::Smartphone => "Smartphone",
            Self::Database => "Database",
            Self::Cpu => "Cpu",
            Self::Zap => "Zap",
            Self::Award => "Award",
            Self::Star => "Star",
        }
    }

    /// Exact-match lookup of a persisted identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.name() == name)
    }

    /// Terminal rendering symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Code => "</>",
            Self::Palette => "[~]",
            Self::Terminal => ">_",
            Self::Globe => "(@)",
            Self::Smartphone => "[.]",
            Self::Database => "[=]",
            Self::Cpu => "[#]",
            Self::Zap => "/!/",
            Self::Award => "(1)",
            Self::Star => "(*)",
        }
    }
}

impl Display for ServiceIcon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves a stored identifier to its symbol, falling back when unknown.
pub fn symbol_for(name: &str) -> &'static str {
    ServiceIcon::from_name(name).map_or(FALLBACK_SYMBOL, ServiceIcon::symbol)
}

#[cfg(test)]
mod tests {
    use super::{symbol_for, ServiceIcon, FALLBACK_SYMBOL};

    #[test]
    fn names_round_trip_through_lookup() {
        for icon in ServiceIcon::ALL {
            assert_eq!(ServiceIcon::from_name(icon.name()), Some(icon));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(ServiceIcon::from_name("code"), None);
    }

    #[test]
    fn unknown_identifier_uses_fallback_symbol() {
        assert_eq!(symbol_for("Rocket"), FALLBACK_SYMBOL);
        assert_eq!(symbol_for("Code"), "</>");
    }
}
