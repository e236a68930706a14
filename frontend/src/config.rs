use serde::Deserialize;

use crate::error::LandingError;

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Waitlist endpoint baked in at build time. Without one the forms use the
/// simulated client.
pub fn get_waitlist_endpoint() -> Option<String> {
    option_env!("WAITLIST_ENDPOINT")
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub reveal: RevealConfig,
    pub counters: CounterConfig,
    pub typing_delay_ms: u32,
    pub scroll: ScrollConfig,
    pub waitlist: WaitlistConfig,
    pub notification_ms: u32,
    pub particles: ParticleConfig,
    pub ripple_ms: u32,
    pub autofill_highlight_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub card_threshold: f64,
    pub card_root_margin: String,
    pub stats_threshold: f64,
    pub section_threshold: f64,
    pub progress_threshold: f64,
    pub hero_threshold: f64,
    pub text_threshold: f64,
    pub default_fill_width: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u32,
    pub tick_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub throttle_ms: u32,
    pub parallax_base: f64,
    pub parallax_step: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaitlistConfig {
    /// POST target for signups. `None` keeps the simulated client.
    pub endpoint: Option<String>,
    pub simulated_delay_ms: u32,
    pub busy_label: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub interval_ms: u32,
    pub lifetime_ms: u32,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            counters: CounterConfig::default(),
            typing_delay_ms: 50,
            scroll: ScrollConfig::default(),
            waitlist: WaitlistConfig::default(),
            notification_ms: 6000,
            particles: ParticleConfig::default(),
            ripple_ms: 600,
            autofill_highlight_ms: 2000,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            card_threshold: 0.1,
            card_root_margin: "0px 0px -50px 0px".to_string(),
            stats_threshold: 0.5,
            section_threshold: 0.3,
            progress_threshold: 0.5,
            hero_threshold: 0.5,
            text_threshold: 0.5,
            default_fill_width: "75%".to_string(),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            tick_ms: 16,
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 16,
            parallax_base: 0.5,
            parallax_step: 0.1,
        }
    }
}

impl Default for WaitlistConfig {
    fn default() -> Self {
        Self {
            endpoint: get_waitlist_endpoint(),
            simulated_delay_ms: 1500,
            busy_label: r#"<i class="fas fa-spinner fa-spin"></i> Procesando..."#.to_string(),
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            lifetime_ms: 5000,
        }
    }
}

impl LandingConfig {
    /// Parses a JSON override. Fields left out keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, LandingError> {
        let mut config: LandingConfig = serde_json::from_str(raw)?;
        config.clamp_thresholds();
        Ok(config)
    }

    fn clamp_thresholds(&mut self) {
        let reveal = &mut self.reveal;
        for threshold in [
            &mut reveal.card_threshold,
            &mut reveal.stats_threshold,
            &mut reveal.section_threshold,
            &mut reveal.progress_threshold,
            &mut reveal.hero_threshold,
            &mut reveal.text_threshold,
        ] {
            *threshold = threshold.clamp(0.0, 1.0);
        }
        self.counters.tick_ms = self.counters.tick_ms.max(1);
    }

    /// Reads the config block from the page, falling back to defaults when absent.
    #[cfg(target_arch = "wasm32")]
    pub fn from_document(document: &web_sys::Document) -> Result<Self, LandingError> {
        match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }
}
