use std::time::Duration;

use crate::assets::loader::DEFAULT_LOAD_TIMEOUT;
use crate::foundation::error::{CrossfadeError, CrossfadeResult};
use crate::geometry::anchor::PositionalAnchor;

/// Default `backgroundPosition`.
pub const DEFAULT_BACKGROUND_POSITION: &str = "center center";
/// Default transition span, as a fraction of the element height.
pub const DEFAULT_DISTANCE: f64 = 0.5;

/// Widget options as supplied by the host, before validation.
///
/// Every field is optional so that explicit options can be layered over markup attributes.
/// JSON keys are camelCase; `image`/`imageBlurred` and `threshold` are accepted as aliases.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrossfadeConfig {
    /// Start image reference.
    #[serde(alias = "image", skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// End image reference.
    #[serde(alias = "imageBlurred", skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// One or two position keywords, e.g. `"center center"` or `"top left"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_position: Option<String>,
    /// Fraction of the element height the crossfade spans.
    #[serde(alias = "threshold", skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Log geometry and visibility values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    /// Upper bound on image loading, in milliseconds; `0` waits forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_timeout_ms: Option<u64>,
}

/// Validated options consumed by the widget.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    /// Start image reference.
    pub start: String,
    /// End image reference.
    pub end: String,
    /// Parsed `backgroundPosition`.
    pub anchor: PositionalAnchor,
    /// Transition span, `> 0`.
    pub distance: f64,
    /// Diagnostic logging switch.
    pub debug: bool,
    /// Bound on image loading.
    pub load_timeout: Option<Duration>,
}

impl CrossfadeConfig {
    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> CrossfadeResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            CrossfadeError::invalid_configuration(format!("crossfade options json: {e}"))
        })
    }

    /// Read options from markup `data-*` attributes.
    ///
    /// Recognizes `data-crossfade-start`/`-end` (and the older `data-image-start`/`-end`),
    /// `data-crossfade-background-position`, `data-crossfade-threshold`/`-distance`,
    /// `data-crossfade-debug` and `data-crossfade-load-timeout-ms`. Names are case-insensitive;
    /// the `data-` prefix is optional. Other attributes are ignored.
    pub fn from_data_attributes<'a, I>(attributes: I) -> CrossfadeResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = Self::default();
        for (name, value) in attributes {
            let name = name.trim().to_ascii_lowercase();
            let name = name.strip_prefix("data-").unwrap_or(&name);
            let value = value.trim();
            match name {
                "crossfade-start" | "image-start" => out.start = Some(value.to_string()),
                "crossfade-end" | "image-end" => out.end = Some(value.to_string()),
                "crossfade-background-position" => {
                    out.background_position = Some(value.to_string());
                }
                "crossfade-threshold" | "crossfade-distance" => {
                    out.distance = Some(value.parse().map_err(|_| {
                        CrossfadeError::invalid_configuration(format!(
                            "{name} must be a number, got '{value}'"
                        ))
                    })?);
                }
                "crossfade-debug" => out.debug = Some(parse_flag(name, value)?),
                "crossfade-load-timeout-ms" => {
                    out.load_timeout_ms = Some(value.parse().map_err(|_| {
                        CrossfadeError::invalid_configuration(format!(
                            "{name} must be a whole number of milliseconds, got '{value}'"
                        ))
                    })?);
                }
                _ => {}
            }
        }
        Ok(out)
    }

    /// Layer explicit `options` over markup `attributes`. Fields set in `options` win;
    /// anything still unset takes its default in [`resolve`](Self::resolve).
    pub fn merge_defaults(options: Self, attributes: Self) -> Self {
        Self {
            start: options.start.or(attributes.start),
            end: options.end.or(attributes.end),
            background_position: options.background_position.or(attributes.background_position),
            distance: options.distance.or(attributes.distance),
            debug: options.debug.or(attributes.debug),
            load_timeout_ms: options.load_timeout_ms.or(attributes.load_timeout_ms),
        }
    }

    /// Apply defaults and validate.
    ///
    /// Fails with `MissingSource` when either image is absent or blank, and with
    /// `InvalidConfiguration` for a non-positive distance or a malformed position.
    pub fn resolve(&self) -> CrossfadeResult<ResolvedConfig> {
        let start = required_source(self.start.as_deref(), "start")?;
        let end = required_source(self.end.as_deref(), "end")?;

        let distance = self.distance.unwrap_or(DEFAULT_DISTANCE);
        if !(distance.is_finite() && distance > 0.0) {
            return Err(CrossfadeError::invalid_configuration(format!(
                "distance/threshold must be a positive number, got {distance}"
            )));
        }

        let anchor = PositionalAnchor::parse(
            self.background_position
                .as_deref()
                .unwrap_or(DEFAULT_BACKGROUND_POSITION),
        )?;

        let load_timeout = match self.load_timeout_ms {
            None => Some(DEFAULT_LOAD_TIMEOUT),
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
        };

        Ok(ResolvedConfig {
            start,
            end,
            anchor,
            distance,
            debug: self.debug.unwrap_or(false),
            load_timeout,
        })
    }
}

fn required_source(value: Option<&str>, which: &str) -> CrossfadeResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CrossfadeError::missing_source(format!(
            "crossfade requires two images; the {which} image is missing"
        ))),
    }
}

fn parse_flag(name: &str, value: &str) -> CrossfadeResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        // A bare attribute (`data-crossfade-debug`) means on.
        "" | "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(CrossfadeError::invalid_configuration(format!(
            "{name} must be a boolean, got '{value}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/config.rs"]
mod tests;
