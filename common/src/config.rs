use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, debug, instrument, warn};

// portfolio configuration
//
// every default reproduces the constants the page markup and stylesheet were
// written against; a page can override any subset of them with a json document
// in <script type="application/json" id="portfolio-config">
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub theme: ThemeConfig,
    pub nav: NavConfig,
    pub navbar: NavbarConfig,
    pub reveal: RevealConfig,
    pub contact: ContactConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    // local storage key holding "light" or "dark"
    pub storage_key: String,
    // attribute set on the root element
    pub attribute: String,
    pub light_icon: String,
    pub dark_icon: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            storage_key: String::from("theme"),
            attribute: String::from("data-theme"),
            light_icon: String::from("fas fa-moon"),
            dark_icon: String::from("fas fa-sun"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct NavConfig {
    // height of the fixed header that anchor scrolling compensates for
    pub header_offset: f64,
    // how far below the viewport top a section must reach to count as current
    pub active_probe_offset: f64,
    // viewport widths above this close the mobile menu
    pub mobile_breakpoint: f64,
    pub scroll_throttle_ms: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            header_offset: 70.0,
            active_probe_offset: 100.0,
            mobile_breakpoint: 768.0,
            scroll_throttle_ms: 10,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub solid_threshold: f64,
    pub light_translucent: String,
    pub light_solid: String,
    pub dark_translucent: String,
    pub dark_solid: String,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        NavbarConfig {
            solid_threshold: 50.0,
            light_translucent: String::from("rgba(255, 255, 255, 0.95)"),
            light_solid: String::from("rgba(255, 255, 255, 0.98)"),
            dark_translucent: String::from("rgba(17, 24, 39, 0.95)"),
            dark_solid: String::from("rgba(17, 24, 39, 0.98)"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RevealConfig {
    // fraction of the element that must be visible
    pub threshold: f64,
    pub root_margin: String,
    pub selector: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig {
            threshold: 0.1,
            root_margin: String::from("0px 0px -50px 0px"),
            selector: String::from(".skill-category, .project-card, .testimonial-card"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ContactConfig {
    pub endpoint: String,
    pub idle_label: String,
    pub sending_label: String,
    pub success_message: String,
    pub error_message: String,
    pub success_hide_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        ContactConfig {
            endpoint: String::from("https://formspree.io/f/mdkzlyan"),
            idle_label: String::from("Send Message"),
            sending_label: String::from("Sending..."),
            success_message: String::from(
                "Thank you! Your message has been sent successfully. I'll get back to you soon.",
            ),
            error_message: String::from(
                "Sorry, there was an error sending your message. Please try again or contact me directly.",
            ),
            success_hide_ms: 5000,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed portfolio config: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn parse_config(doc: &str) -> Result<PortfolioConfig, ConfigError> {
    Ok(serde_json::from_str(doc)?)
}

// resolve the effective configuration from an optional inline document
//
// a broken override must never take the page down, so parse failures fall back
// to the defaults with a warning
#[instrument(level=Level::DEBUG, skip(doc))]
pub fn read_config(doc: Option<&str>) -> PortfolioConfig {
    let Some(doc) = doc.map(str::trim).filter(|doc| !doc.is_empty()) else {
        debug!("no config override present, using defaults");
        return PortfolioConfig::default();
    };

    match parse_config(doc) {
        Ok(config) => {
            debug!("loaded config override");
            config
        }
        Err(err) => {
            warn!("{err}, using defaults");
            PortfolioConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let config = PortfolioConfig::default();

        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.nav.header_offset, 70.0);
        assert_eq!(config.nav.active_probe_offset, 100.0);
        assert_eq!(config.nav.mobile_breakpoint, 768.0);
        assert_eq!(config.nav.scroll_throttle_ms, 10);
        assert_eq!(config.navbar.solid_threshold, 50.0);
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.contact.success_hide_ms, 5000);
        assert_eq!(config.contact.endpoint, "https://formspree.io/f/mdkzlyan");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config(
            r#"{ "nav": { "header_offset": 80 }, "contact": { "endpoint": "https://relay.test/f/abc" } }"#,
        )
        .unwrap();

        assert_eq!(config.nav.header_offset, 80.0);
        assert_eq!(config.nav.mobile_breakpoint, 768.0);
        assert_eq!(config.contact.endpoint, "https://relay.test/f/abc");
        assert_eq!(config.contact.idle_label, "Send Message");
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn malformed_override_falls_back() {
        assert!(parse_config("{ nav: ").is_err());
        assert_eq!(read_config(Some("{ nav: ")), PortfolioConfig::default());
    }

    #[test]
    fn blank_override_is_ignored() {
        assert_eq!(read_config(None), PortfolioConfig::default());
        assert_eq!(read_config(Some("   \n")), PortfolioConfig::default());
    }
}
