use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePackage {
    pub package: String,
    pub price: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceCatalog {
    pub starter_followers: ServicePackage,
    pub growth_followers: ServicePackage,
    pub pro_followers: ServicePackage,
    pub engagement_boost: ServicePackage,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self {
            starter_followers: ServicePackage {
                package: "1000-1300 followers".to_string(),
                price: 74.90,
                reason: "Growing your follower base is essential at this stage to build credibility. This package delivers a significant visibility boost.".to_string(),
            },
            growth_followers: ServicePackage {
                package: "2000-2300 followers".to_string(),
                price: 129.90,
                reason: "With your current follower base, this package provides substantial growth that can push you toward micro-influencer territory.".to_string(),
            },
            pro_followers: ServicePackage {
                package: "5000 followers".to_string(),
                price: 289.90,
                reason: "For accounts with your visibility, this package helps reach the next level of influence on Instagram.".to_string(),
            },
            engagement_boost: ServicePackage {
                package: "500 likes".to_string(),
                price: 45.00,
                reason: "Your current engagement rate ({rate}%) is below the ideal level. This package will help increase engagement and visibility.".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub services: ServiceCatalog,
}

impl AnalyzerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<Self, String> {
        let config_path = path.or_else(default_config_path);
        let config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                AnalyzerConfig::default()
            }
        } else {
            AnalyzerConfig::default()
        };

        Ok(config)
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ANALYZER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/analyzer.toml")))
}
