use keystack::config::{BehaviorConfig, OneShotConfig, TriLayerConfig};

use crate::error::{ConfigError, ConfigResult};
use crate::layout::LayoutConfig;
use crate::{KeyboardTomlConfig, LayerRef};

impl KeyboardTomlConfig {
    /// Runtime behavior config, with layer names resolved against the layout
    pub fn get_behavior_config(&self, layout: &LayoutConfig) -> ConfigResult<BehaviorConfig> {
        let behavior = self.behavior.clone().unwrap_or_default();

        let tri_layer = match &behavior.tri_layer {
            Some(tri_layer) => {
                let lower = resolve_layer(&tri_layer.lower, layout, "behavior.tri_layer.lower")?;
                let upper = resolve_layer(&tri_layer.upper, layout, "behavior.tri_layer.upper")?;
                let adjust = resolve_layer(&tri_layer.adjust, layout, "behavior.tri_layer.adjust")?;
                if lower == upper || adjust == lower || adjust == upper {
                    return Err(ConfigError::validation(
                        "behavior.tri_layer",
                        "lower, upper and adjust must be different layers",
                    ));
                }
                Some(TriLayerConfig::new(lower, upper, adjust))
            }
            None => None,
        };

        let one_shot = match behavior.one_shot.and_then(|o| o.timeout) {
            Some(timeout) => OneShotConfig { timeout_ms: timeout.0 },
            None => OneShotConfig::default(),
        };

        Ok(BehaviorConfig { tri_layer, one_shot })
    }
}

fn resolve_layer(layer: &LayerRef, layout: &LayoutConfig, field: &str) -> ConfigResult<u8> {
    let found = match layer {
        LayerRef::Number(n) => (*n < layout.layers).then_some(*n),
        LayerRef::Name(name) => layout.layer_index(name),
    };
    found.ok_or_else(|| ConfigError::UndefinedLayer {
        field: field.to_string(),
        layer: match layer {
            LayerRef::Number(n) => n.to_string(),
            LayerRef::Name(name) => name.clone(),
        },
    })
}
