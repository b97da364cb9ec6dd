//! Dashboard configuration.
//!
//! Defaults are compiled in. `CHANNELSCOPE_API_BASE` set at build time
//! overrides the backend URL (read with `option_env!` so it also works in the
//! browser), and a JSON document can override any field.

use std::time::Duration;

use api::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use super::brands::BrandCatalog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    /// Backend request timeout in seconds (native builds only).
    pub request_timeout_secs: u64,
    /// How many of the newest videos feed the statistics tables.
    pub recent_video_limit: usize,
    /// Perfume brands highlighted in video titles.
    pub brands: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 120,
            recent_video_limit: 10,
            brands: DEFAULT_PERFUME_BRANDS.iter().map(|b| b.to_string()).collect(),
        }
    }
}

impl DashboardConfig {
    /// Defaults, with the build-time backend URL override applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(base) = option_env!("CHANNELSCOPE_API_BASE") {
            if !base.trim().is_empty() {
                config.api_base_url = base.trim().to_string();
            }
        }
        config
    }

    /// Parse an override document; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    pub fn brand_catalog(&self) -> BrandCatalog {
        BrandCatalog::new(&self.brands)
    }
}

/// Brands tracked by the product's perfume reviews.
pub const DEFAULT_PERFUME_BRANDS: &[&str] = &[
    "Tom Ford", "Dior", "Chanel", "Gucci", "Yves Saint Laurent", "Versace", "Hermès",
    "Prada", "Dolce & Gabbana", "Givenchy", "Burberry", "Armani", "Hugo Boss", "Calvin Klein",
    "Lacoste", "Marc Jacobs", "Ralph Lauren", "Paco Rabanne", "Carolina Herrera",
    "Jean Paul Gaultier", "Valentino", "Balenciaga", "Bulgari", "Fendi", "Lancome",
    "Victoria's Secret", "Zara", "Mercadona", "Amouage", "Creed", "Maison Francis Kurkdjian",
    "Byredo", "Le Labo", "Diptyque", "Frederic Malle", "Jo Malone", "Penhaligon's", "Aesop",
    "Xerjoff", "Clive Christian", "Parfums de Marly", "Roja Parfums", "Mancera", "Montale",
    "Initio", "Tiziana Terenzi", "Nishane", "Serge Lutens", "Comme des Garçons",
    "Etat Libre d'Orange", "Zoologist", "Acqua di Parma", "BDK Parfums", "Carner Barcelona",
    "Memo Paris", "Floris London", "Bond No.9", "Vilhelm Parfumerie", "Histoires de Parfums",
    "Masque Milano", "The Different Company", "Atelier Cologne", "Maison Margiela",
    "Ormonde Jayne", "House of Oud", "Olfactive Studio", "The Harmonist", "Viktor & Rolf",
    "Kilian", "Nasomatto", "Profumum Roma", "Nicolai", "Fueguia 1833", "Eight & Bob",
    "Juliette Has a Gun", "Miller Harris", "L'Artisan Parfumeur", "Frapin",
    "Arquiste", "Escentric Molecules", "Heeley", "Floraiku", "Keiko Mecheri",
    "Laboratorio Olfattivo", "Lubin", "M.Micallef", "Majda Bekkali", "Moresque",
    "Neela Vermeire", "Parfums MDCI", "Perris Monte Carlo", "Projet Alternative",
    "Robert Piguet", "Rothschild", "SHL 777", "Six Scents", "Stephane Humbert Lucas",
    "The House of Oud", "The Merchant of Venice", "Von Eusersdorff", "Widian",
    "Abel", "Acca Kappa", "Acqua dell'Elba", "Aedes de Venustas", "Affinessence",
    "Alyson Oldoini", "Angela Ciampagna", "Annick Goutal", "Antonio Alessandria", "April Aromatics",
    "Areej Le Doré", "Armaf", "Atelier des Ors", "Berdoues", "Bois 1920", "Croxatto",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_keep_unspecified_defaults() {
        let config =
            DashboardConfig::from_json(r#"{ "api_base_url": "https://backend.example" }"#).unwrap();
        assert_eq!(config.api_base_url, "https://backend.example");
        assert_eq!(config.recent_video_limit, 10);
        assert!(config.brands.iter().any(|b| b == "Creed"));
    }

    #[test]
    fn client_config_uses_base_url_and_timeout() {
        let config = DashboardConfig {
            api_base_url: "http://localhost:9000/".into(),
            request_timeout_secs: 5,
            ..DashboardConfig::default()
        };
        let client = config.client_config();
        assert_eq!(client.endpoint("/api/query"), "http://localhost:9000/api/query");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn default_catalog_has_no_duplicates() {
        let catalog = DashboardConfig::default().brand_catalog();
        assert_eq!(catalog.len(), DEFAULT_PERFUME_BRANDS.len());
        assert_eq!(catalog.mentioned_in("Probando Bond No.9 y M.Micallef").len(), 2);
    }
}
