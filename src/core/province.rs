use serde::Serialize;

/// The nine provinces of Sicily. Fixed, not stored in any collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Province {
    Agrigento,
    Caltanissetta,
    Catania,
    Enna,
    Messina,
    Palermo,
    Ragusa,
    Siracusa,
    Trapani,
}

/// Wire shape of a province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvinceInfo {
    pub sigla: &'static str,
    pub nome: &'static str,
    pub slug: String,
}

impl Province {
    pub const ALL: [Province; 9] = [
        Province::Agrigento,
        Province::Caltanissetta,
        Province::Catania,
        Province::Enna,
        Province::Messina,
        Province::Palermo,
        Province::Ragusa,
        Province::Siracusa,
        Province::Trapani,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Province::Agrigento => "AG",
            Province::Caltanissetta => "CL",
            Province::Catania => "CT",
            Province::Enna => "EN",
            Province::Messina => "ME",
            Province::Palermo => "PA",
            Province::Ragusa => "RG",
            Province::Siracusa => "SR",
            Province::Trapani => "TP",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Province::Agrigento => "Agrigento",
            Province::Caltanissetta => "Caltanissetta",
            Province::Catania => "Catania",
            Province::Enna => "Enna",
            Province::Messina => "Messina",
            Province::Palermo => "Palermo",
            Province::Ragusa => "Ragusa",
            Province::Siracusa => "Siracusa",
            Province::Trapani => "Trapani",
        }
    }

    /// Lowercase code; municipalities are matched against it case-insensitively.
    pub fn slug(self) -> String {
        self.code().to_lowercase()
    }

    pub fn from_slug(slug: &str) -> Option<Province> {
        Self::ALL
            .into_iter()
            .find(|province| province.code().eq_ignore_ascii_case(slug.trim()))
    }

    pub fn info(self) -> ProvinceInfo {
        ProvinceInfo {
            sigla: self.code(),
            nome: self.name(),
            slug: self.slug(),
        }
    }

    pub fn codes() -> Vec<&'static str> {
        Self::ALL.into_iter().map(Province::code).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_in_fixed_order() {
        assert_eq!(
            Province::codes(),
            vec!["AG", "CL", "CT", "EN", "ME", "PA", "RG", "SR", "TP"]
        );
    }

    #[test]
    fn from_slug_is_case_insensitive() {
        assert_eq!(Province::from_slug("en"), Some(Province::Enna));
        assert_eq!(Province::from_slug("TP"), Some(Province::Trapani));
        assert_eq!(Province::from_slug("xx"), None);
    }

    #[test]
    fn info_carries_lowercase_slug() {
        let info = Province::Siracusa.info();
        assert_eq!(info.sigla, "SR");
        assert_eq!(info.nome, "Siracusa");
        assert_eq!(info.slug, "sr");
    }
}
